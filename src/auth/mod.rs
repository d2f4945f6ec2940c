//! Session and credential management.
//!
//! This module provides:
//! - `SessionStore`: the single source of truth for the current user,
//!   with an explicit three-state lifecycle
//! - `TokenStore`: the persisted bearer-token slot shared with the
//!   request gateway
//!
//! The token survives restarts; it is discarded on logout and whenever
//! the backend answers 401.

pub mod session;
pub mod token;

pub use session::{SessionStatus, SessionStore};
pub use token::TokenStore;
