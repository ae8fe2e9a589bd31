//! Session context and bearer token claims
//!
//! The session is an explicit value injected by the binary instead of an
//! ambient global read: it owns the current token, recomputes the identity
//! on every query, and drives the login/logout lifecycle.
//!
//! The token is decoded for display only; signature verification belongs to
//! the backend that issued it.

use crate::error::CoreError;
use crate::event::{EventBus, SessionEvent};
use crate::token_store::TokenStore;
use jsonwebtoken::{decode, Algorithm, DecodingKey, Validation};
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Claims embedded in the bearer token
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    #[serde(rename = "userId")]
    pub user_id: String,
    pub name: String,
    pub role: String,
}

/// Decoded identity shown in the shell header
///
/// Either fully present (all three fields decoded) or entirely absent,
/// never partial.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub user_id: String,
    pub name: String,
    pub role: String,
}

impl Identity {
    /// Initials for the avatar fallback: "Jean Dupont" -> "JD"
    pub fn initials(&self) -> String {
        self.name
            .split_whitespace()
            .filter_map(|word| word.chars().next())
            .flat_map(|c| c.to_uppercase())
            .collect()
    }
}

/// Decode the display claims from a bearer token
///
/// Signature validation is intentionally disabled: the shell only renders
/// what the token claims, the profile service re-checks the token on every
/// request.
pub fn decode_identity(token: &str) -> Result<Identity, CoreError> {
    let mut validation = Validation::new(Algorithm::HS256);
    validation.insecure_disable_signature_validation();
    validation.validate_exp = false;
    validation.validate_aud = false;
    validation.required_spec_claims.clear();

    let data = decode::<Claims>(token, &DecodingKey::from_secret(&[]), &validation)
        .map_err(|source| CoreError::TokenDecode { source })?;

    Ok(Identity {
        user_id: data.claims.user_id,
        name: data.claims.name,
        role: data.claims.role,
    })
}

/// Explicit session context for the console shell
///
/// Thread-safe: the TUI reads it from the render loop while the profile
/// loader reads the token from a background task.
pub struct Session {
    /// Current bearer token, absent when logged out
    token: RwLock<Option<String>>,

    /// Persisted token location, cleared on logout
    store: Option<TokenStore>,

    /// Event bus for notifying subscribers
    event_bus: EventBus,
}

impl Session {
    /// Create a session from an already-loaded token
    pub fn new(token: Option<String>, store: Option<TokenStore>) -> Self {
        Self {
            token: RwLock::new(token),
            store,
            event_bus: EventBus::default_capacity(),
        }
    }

    pub fn event_bus(&self) -> &EventBus {
        &self.event_bus
    }

    /// Current token, cloned out of the lock
    pub fn token(&self) -> Option<String> {
        self.token.read().clone()
    }

    pub fn is_logged_in(&self) -> bool {
        self.token.read().is_some()
    }

    /// Decode the identity from the current token
    ///
    /// Recomputed on every call so a token swap is reflected immediately.
    /// A malformed token reads as logged-out rather than crashing the shell.
    pub fn identity(&self) -> Option<Identity> {
        let guard = self.token.read();
        let token = guard.as_deref()?;
        match decode_identity(token) {
            Ok(identity) => Some(identity),
            Err(e) => {
                warn!("Discarding malformed session token: {e}");
                None
            }
        }
    }

    /// Replace the token (login), persisting it when a store is attached
    pub fn login(&self, token: String) -> Result<(), CoreError> {
        if let Some(store) = &self.store {
            store.save(&token)?;
        }
        *self.token.write() = Some(token);
        debug!("Session token replaced");
        self.event_bus.publish(SessionEvent::TokenChanged);
        Ok(())
    }

    /// Tear down the session: remove the persisted token and clear state
    pub fn logout(&self) -> Result<(), CoreError> {
        if let Some(store) = &self.store {
            store.clear()?;
        }
        *self.token.write() = None;
        debug!("Session torn down");
        self.event_bus.publish(SessionEvent::LoggedOut);
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use jsonwebtoken::{encode, EncodingKey, Header};

    fn make_token(user_id: &str, name: &str, role: &str) -> String {
        let claims = Claims {
            user_id: user_id.to_string(),
            name: name.to_string(),
            role: role.to_string(),
        };
        encode(
            &Header::default(),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap()
    }

    #[test]
    fn test_decode_valid_token() {
        let token = make_token("d-17", "Jean Dupont", "Doctor");
        let identity = decode_identity(&token).unwrap();
        assert_eq!(identity.user_id, "d-17");
        assert_eq!(identity.name, "Jean Dupont");
        assert_eq!(identity.role, "Doctor");
    }

    #[test]
    fn test_decode_malformed_token() {
        assert!(decode_identity("not-a-jwt").is_err());
        assert!(decode_identity("a.b.c").is_err());
    }

    #[test]
    fn test_initials() {
        let token = make_token("d-17", "Jean Dupont", "Doctor");
        let identity = decode_identity(&token).unwrap();
        assert_eq!(identity.initials(), "JD");
    }

    #[test]
    fn test_initials_single_name() {
        let identity = Identity {
            user_id: "x".to_string(),
            name: "claire".to_string(),
            role: "Nurse".to_string(),
        };
        assert_eq!(identity.initials(), "C");
    }

    #[test]
    fn test_session_absent_token() {
        let session = Session::new(None, None);
        assert!(!session.is_logged_in());
        assert!(session.identity().is_none());
    }

    #[test]
    fn test_session_malformed_token_reads_logged_out_identity() {
        let session = Session::new(Some("garbage".to_string()), None);
        // Token is present but claims are unreadable
        assert!(session.is_logged_in());
        assert!(session.identity().is_none());
    }

    #[tokio::test]
    async fn test_login_logout_lifecycle() {
        let session = Session::new(None, None);
        let mut rx = session.event_bus().subscribe();

        session.login(make_token("d-1", "Ana Silva", "Admin")).unwrap();
        assert_eq!(session.identity().unwrap().name, "Ana Silva");
        assert!(matches!(rx.recv().await.unwrap(), SessionEvent::TokenChanged));

        session.logout().unwrap();
        assert!(session.identity().is_none());
        assert!(!session.is_logged_in());
        assert!(matches!(rx.recv().await.unwrap(), SessionEvent::LoggedOut));
    }

    #[test]
    fn test_logout_removes_persisted_token() {
        let dir = tempfile::tempdir().unwrap();
        let store = TokenStore::new(dir.path());
        store.save("abc").unwrap();

        let session = Session::new(store.load(), Some(store));
        assert!(session.is_logged_in());

        session.logout().unwrap();
        let reopened = TokenStore::new(dir.path());
        assert!(reopened.load().is_none());
    }
}
