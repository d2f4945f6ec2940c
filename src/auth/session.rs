//! Client-side session lifecycle.
//!
//! `SessionStore` is the single source of truth for "who is the current
//! user". Screens and the guard read it; nothing else writes it. The store
//! is created in `Resolving` and settles into `Authenticated` or
//! `Unauthenticated` once `initialize` has talked to the backend (or found
//! no token to talk about).

use tracing::{info, warn};

use crate::api::{ApiClient, ApiError};
use crate::models::{Credentials, NewAccount, ProfileUpdate, User};

use super::TokenStore;

/// Authentication status. `Resolving` is a suspend state: callers waiting
/// on it must show a placeholder, never treat it as "unauthenticated".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionStatus {
    Unauthenticated,
    Resolving,
    Authenticated,
}

pub struct SessionStore {
    tokens: TokenStore,
    user: Option<User>,
    status: SessionStatus,
}

impl SessionStore {
    /// Create the store in `Resolving`; `initialize` settles it.
    pub fn new(tokens: TokenStore) -> Self {
        Self {
            tokens,
            user: None,
            status: SessionStatus::Resolving,
        }
    }

    pub fn status(&self) -> SessionStatus {
        self.status
    }

    pub fn user(&self) -> Option<&User> {
        self.user.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.status == SessionStatus::Authenticated
    }

    /// Resolve the persisted token into a user, if there is one.
    ///
    /// No token: settles `Unauthenticated` without a network call. With a
    /// token: validates it against the backend; on success the session is
    /// `Authenticated` with the returned user, on any failure the stored
    /// token is discarded and the session settles `Unauthenticated`.
    pub async fn initialize(&mut self, api: &ApiClient) {
        if !self.tokens.is_present() {
            self.status = SessionStatus::Unauthenticated;
            info!("No persisted token, starting unauthenticated");
            return;
        }

        self.status = SessionStatus::Resolving;

        match api.validate().await {
            Ok(user) => {
                info!(user = %user.name, "Session restored from persisted token");
                self.user = Some(user);
                self.status = SessionStatus::Authenticated;
            }
            Err(e) => {
                warn!(error = %e, "Persisted token rejected, discarding");
                if let Err(e) = self.tokens.clear() {
                    warn!(error = %e, "Failed to clear token slot");
                }
                self.user = None;
                self.status = SessionStatus::Unauthenticated;
            }
        }
    }

    /// Log in. On success the token is persisted and the session becomes
    /// `Authenticated`; on failure the session is left exactly as it was
    /// and the error surfaces to the caller.
    pub async fn login(
        &mut self,
        api: &ApiClient,
        email: &str,
        password: &str,
    ) -> Result<User, ApiError> {
        let credentials = Credentials {
            email: email.to_string(),
            password: password.to_string(),
        };

        let payload = api.login(&credentials).await?;
        self.establish(payload.token, payload.user.clone());
        info!(user = %payload.user.name, "Login successful");
        Ok(payload.user)
    }

    /// Create an account. Same contract as `login`: success is an implicit
    /// login, failure leaves the session untouched.
    pub async fn register(
        &mut self,
        api: &ApiClient,
        account: NewAccount,
    ) -> Result<User, ApiError> {
        let payload = api.register(&account).await?;
        self.establish(payload.token, payload.user.clone());
        info!(user = %payload.user.name, "Registration successful");
        Ok(payload.user)
    }

    /// Discard the session. Synchronous: no network call is awaited, the
    /// token slot and in-memory state are cleared immediately.
    pub fn logout(&mut self) {
        if let Err(e) = self.tokens.clear() {
            warn!(error = %e, "Failed to clear token slot");
        }
        self.user = None;
        self.status = SessionStatus::Unauthenticated;
        info!("Logged out");
    }

    /// Forced logout after the backend rejected our credentials mid-flight.
    /// Observably identical to `logout`; safe to call repeatedly when
    /// several in-flight requests hit a 401 together.
    pub fn expire(&mut self) {
        if self.status == SessionStatus::Unauthenticated && self.user.is_none() {
            return;
        }
        warn!("Session expired, forcing logout");
        self.logout();
    }

    /// Update the profile. On success the stored user is replaced with the
    /// backend's record; on failure user and status are unchanged.
    pub async fn update_profile(
        &mut self,
        api: &ApiClient,
        update: &ProfileUpdate,
    ) -> Result<User, ApiError> {
        let user = api.update_profile(update).await?;
        info!(user = %user.name, "Profile updated");
        self.user = Some(user.clone());
        Ok(user)
    }

    /// Single success path for login and register: persist the token, then
    /// publish user and status together so no reader sees a half-written
    /// session.
    fn establish(&mut self, token: String, user: User) {
        if let Err(e) = self.tokens.put(&token) {
            // The session still works for this run; it just won't survive
            // a restart.
            warn!(error = %e, "Failed to persist token");
        }
        self.user = Some(user);
        self.status = SessionStatus::Authenticated;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with_tempdir() -> (tempfile::TempDir, SessionStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let tokens = TokenStore::open(dir.path().to_path_buf()).expect("slot");
        (dir, SessionStore::new(tokens))
    }

    fn sample_user() -> User {
        serde_json::from_str(r#"{"id":"1","name":"Amal","email":"a@b.com"}"#).expect("user")
    }

    #[test]
    fn test_store_starts_resolving() {
        let (_dir, store) = store_with_tempdir();
        assert_eq!(store.status(), SessionStatus::Resolving);
        assert!(store.user().is_none());
        assert!(!store.is_authenticated());
    }

    #[test]
    fn test_logout_from_resolving() {
        // logout must land in Unauthenticated from any state, Resolving included
        let (_dir, mut store) = store_with_tempdir();
        store.tokens.put("tok-123").expect("put");
        assert_eq!(store.status(), SessionStatus::Resolving);

        store.logout();
        assert_eq!(store.status(), SessionStatus::Unauthenticated);
        assert_eq!(store.tokens.get(), None);
    }

    #[test]
    fn test_expire_is_idempotent() {
        let (_dir, mut store) = store_with_tempdir();
        store.establish("tok-123".to_string(), sample_user());
        assert!(store.is_authenticated());

        store.expire();
        assert_eq!(store.status(), SessionStatus::Unauthenticated);
        assert!(store.user().is_none());

        // A second in-flight 401 repeating the cleanup changes nothing
        store.expire();
        assert_eq!(store.status(), SessionStatus::Unauthenticated);
        assert_eq!(store.tokens.get(), None);
    }

    #[test]
    fn test_establish_publishes_user_and_status_together() {
        let (_dir, mut store) = store_with_tempdir();
        store.establish("tok-123".to_string(), sample_user());

        // user present iff Authenticated
        assert_eq!(store.status(), SessionStatus::Authenticated);
        assert_eq!(store.user().map(|u| u.name.as_str()), Some("Amal"));
        assert_eq!(store.tokens.get().as_deref(), Some("tok-123"));
    }
}
