use std::path::PathBuf;
use std::sync::{Arc, RwLock};

use anyhow::{Context, Result};
use tracing::debug;

/// Token file name in the cache directory
const TOKEN_FILE: &str = "token";

/// The persisted bearer-token slot.
///
/// One opaque string in one file, mirrored in memory so the request path
/// never touches the filesystem. The session store owns every write; the
/// request gateway is additionally allowed to `clear` on a 401, which is
/// the logout-equivalent cleanup and safe to repeat.
///
/// Clone is cheap - the slot is shared, so the gateway and the session
/// store always observe the same value.
#[derive(Clone)]
pub struct TokenStore {
    path: Arc<PathBuf>,
    current: Arc<RwLock<Option<String>>>,
}

impl TokenStore {
    /// Open the slot, loading any token persisted by a previous run
    pub fn open(cache_dir: PathBuf) -> Result<Self> {
        let path = cache_dir.join(TOKEN_FILE);

        let current = if path.exists() {
            let contents = std::fs::read_to_string(&path)
                .with_context(|| format!("Failed to read token file: {}", path.display()))?;
            let token = contents.trim().to_string();
            if token.is_empty() {
                None
            } else {
                Some(token)
            }
        } else {
            None
        };

        debug!(present = current.is_some(), "Token slot opened");

        Ok(Self {
            path: Arc::new(path),
            current: Arc::new(RwLock::new(current)),
        })
    }

    /// Current token, if any
    pub fn get(&self) -> Option<String> {
        self.current.read().expect("token slot lock poisoned").clone()
    }

    pub fn is_present(&self) -> bool {
        self.current.read().expect("token slot lock poisoned").is_some()
    }

    /// Persist a new token, replacing any previous one
    pub fn put(&self, token: &str) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        std::fs::write(self.path.as_ref(), token)
            .with_context(|| format!("Failed to write token file: {}", self.path.display()))?;
        *self.current.write().expect("token slot lock poisoned") = Some(token.to_string());
        debug!("Token persisted");
        Ok(())
    }

    /// Discard the persisted token. Clearing an already-empty slot is a no-op,
    /// so concurrent 401 cleanups cannot step on each other.
    pub fn clear(&self) -> Result<()> {
        *self.current.write().expect("token slot lock poisoned") = None;
        if self.path.exists() {
            std::fs::remove_file(self.path.as_ref())
                .with_context(|| format!("Failed to remove token file: {}", self.path.display()))?;
            debug!("Token discarded");
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn open_in_tempdir() -> (tempfile::TempDir, TokenStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = TokenStore::open(dir.path().to_path_buf()).expect("open slot");
        (dir, store)
    }

    #[test]
    fn test_empty_slot() {
        let (_dir, store) = open_in_tempdir();
        assert_eq!(store.get(), None);
        assert!(!store.is_present());
    }

    #[test]
    fn test_put_get_clear() {
        let (_dir, store) = open_in_tempdir();
        store.put("tok-123").expect("put");
        assert_eq!(store.get().as_deref(), Some("tok-123"));

        store.clear().expect("clear");
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_token_survives_reopen() {
        let dir = tempfile::tempdir().expect("tempdir");
        {
            let store = TokenStore::open(dir.path().to_path_buf()).expect("open");
            store.put("tok-persisted").expect("put");
        }
        let reopened = TokenStore::open(dir.path().to_path_buf()).expect("reopen");
        assert_eq!(reopened.get().as_deref(), Some("tok-persisted"));
    }

    #[test]
    fn test_clear_is_idempotent() {
        let (_dir, store) = open_in_tempdir();
        store.put("tok-once").expect("put");
        store.clear().expect("first clear");
        store.clear().expect("second clear");
        assert_eq!(store.get(), None);
    }

    #[test]
    fn test_clones_share_the_slot() {
        let (_dir, store) = open_in_tempdir();
        let view = store.clone();
        store.put("tok-shared").expect("put");
        assert_eq!(view.get().as_deref(), Some("tok-shared"));
        view.clear().expect("clear");
        assert_eq!(store.get(), None);
    }
}
