//! Error types for consulta-core
//!
//! Every failure in this layer is non-fatal to the shell: callers degrade
//! (absent identity, missing image, no-op toggle) instead of crashing.

use std::path::PathBuf;
use thiserror::Error;

/// Core error type for consulta operations
#[derive(Error, Debug)]
pub enum CoreError {
    // ===================
    // Session Errors
    // ===================
    #[error("Failed to read token file: {path}")]
    TokenRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to write token file: {path}")]
    TokenWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Failed to decode bearer token claims")]
    TokenDecode {
        #[source]
        source: jsonwebtoken::errors::Error,
    },

    // ===================
    // Profile Errors
    // ===================
    #[error("Profile request failed")]
    ProfileFetch {
        #[source]
        source: reqwest::Error,
    },

    #[error("Profile service returned status {status}")]
    ProfileStatus { status: u16 },

    // ===================
    // Notification Errors
    // ===================
    #[error("Unknown notification id: {id}")]
    UnknownNotification { id: u32 },
}

impl CoreError {
    /// Short human-readable form for status lines (no source chain)
    pub fn summary(&self) -> String {
        match self {
            CoreError::ProfileStatus { status } => {
                format!("profile service replied {status}")
            }
            CoreError::ProfileFetch { .. } => "profile service unreachable".to_string(),
            CoreError::TokenDecode { .. } => "session token is malformed".to_string(),
            other => other.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_profile_status_summary() {
        let err = CoreError::ProfileStatus { status: 404 };
        assert_eq!(err.summary(), "profile service replied 404");
    }

    #[test]
    fn test_unknown_notification_display() {
        let err = CoreError::UnknownNotification { id: 42 };
        assert_eq!(err.to_string(), "Unknown notification id: 42");
    }
}
