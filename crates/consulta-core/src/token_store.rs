//! Persisted bearer token storage
//!
//! One key, one file: `<config_dir>/token`. The shell reads it at startup
//! and removes it on logout; nothing else touches it.

use crate::error::CoreError;
use std::path::{Path, PathBuf};
use tracing::warn;

/// File-backed storage for the bearer token
#[derive(Debug, Clone)]
pub struct TokenStore {
    path: PathBuf,
}

impl TokenStore {
    /// Token store rooted at the given config directory
    pub fn new(config_dir: &Path) -> Self {
        Self {
            path: config_dir.join("token"),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Load the token. A missing file is the logged-out state, not an error.
    pub fn load(&self) -> Option<String> {
        match std::fs::read_to_string(&self.path) {
            Ok(content) => {
                let token = content.trim();
                if token.is_empty() {
                    None
                } else {
                    Some(token.to_string())
                }
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => None,
            Err(e) => {
                warn!("Could not read token file {}: {e}", self.path.display());
                None
            }
        }
    }

    /// Persist the token, creating the config directory if needed
    pub fn save(&self, token: &str) -> Result<(), CoreError> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent).map_err(|source| CoreError::TokenWrite {
                path: self.path.clone(),
                source,
            })?;
        }
        std::fs::write(&self.path, token).map_err(|source| CoreError::TokenWrite {
            path: self.path.clone(),
            source,
        })
    }

    /// Remove the persisted token. Already-absent is fine (idempotent).
    pub fn clear(&self) -> Result<(), CoreError> {
        match std::fs::remove_file(&self.path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(CoreError::TokenWrite {
                path: self.path.clone(),
                source,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_load_missing_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path());
        assert!(store.load().is_none());
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path());
        store.save("eyJ.token.value").unwrap();
        assert_eq!(store.load().unwrap(), "eyJ.token.value");
    }

    #[test]
    fn test_load_trims_whitespace() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path());
        std::fs::write(store.path(), "  abc\n").unwrap();
        assert_eq!(store.load().unwrap(), "abc");
    }

    #[test]
    fn test_empty_file_is_logged_out() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path());
        std::fs::write(store.path(), "\n").unwrap();
        assert!(store.load().is_none());
    }

    #[test]
    fn test_clear_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path());
        store.save("abc").unwrap();
        store.clear().unwrap();
        store.clear().unwrap();
        assert!(store.load().is_none());
    }
}
