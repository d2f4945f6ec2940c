//! Screen gating derived from session state.
//!
//! The guard owns no state: it maps (screen, session status) onto what to
//! render. Protected screens show a placeholder while the session is still
//! resolving and bounce to the auth screen once it settles unauthenticated.
//! The auth screen itself is public and issues no authorized calls, so the
//! bounce cannot loop.

use crate::app::Screen;
use crate::auth::SessionStatus;

/// Whether a screen requires an authenticated session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Public,
    Protected,
}

/// What to do for a screen given the current session status
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Gate {
    /// Render the screen's content
    Render,
    /// Session still resolving: render a loading placeholder
    Loading,
    /// Not authenticated: send the user to the auth screen
    Login,
}

impl Screen {
    pub fn access(&self) -> Access {
        match self {
            // The shared map is browsable without an account, as is auth itself
            Screen::Map | Screen::Auth => Access::Public,
            Screen::Agora | Screen::Echappees | Screen::Profile => Access::Protected,
        }
    }
}

pub fn gate(screen: Screen, status: SessionStatus) -> Gate {
    match (screen.access(), status) {
        (Access::Public, _) => Gate::Render,
        (Access::Protected, SessionStatus::Authenticated) => Gate::Render,
        (Access::Protected, SessionStatus::Resolving) => Gate::Loading,
        (Access::Protected, SessionStatus::Unauthenticated) => Gate::Login,
    }
}
