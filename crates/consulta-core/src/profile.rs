//! Profile image loading
//!
//! One outbound HTTP call: `GET {base_url}/doctors/{user_id}` with the
//! bearer token, expecting a JSON body carrying an `imageUrl` field.
//!
//! The loader coordinates fetches with a generation counter so a stale
//! response can never overwrite the result of a newer token
//! (last-token-wins). A token transition to absent bumps the generation,
//! which invalidates any fetch still in flight.

use crate::error::CoreError;
use crate::event::{EventBus, SessionEvent};
use crate::session::Session;
use parking_lot::RwLock;
use serde::Deserialize;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, warn};

/// Bounded wait for the profile service so the image state cannot pend forever
const FETCH_TIMEOUT: Duration = Duration::from_secs(10);

#[derive(Debug, Deserialize)]
struct ProfileResponse {
    #[serde(rename = "imageUrl")]
    image_url: Option<String>,
}

/// HTTP client for the profile service
pub struct ProfileClient {
    http: reqwest::Client,
    base_url: String,
}

impl ProfileClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self, CoreError> {
        let http = reqwest::Client::builder()
            .timeout(FETCH_TIMEOUT)
            .build()
            .map_err(|source| CoreError::ProfileFetch { source })?;
        Ok(Self {
            http,
            base_url: base_url.into(),
        })
    }

    /// Fetch the profile image reference for a user
    ///
    /// `Ok(None)` means the profile exists but has no image set.
    pub async fn fetch_image_url(
        &self,
        user_id: &str,
        token: &str,
    ) -> Result<Option<String>, CoreError> {
        let url = format!("{}/doctors/{}", self.base_url.trim_end_matches('/'), user_id);
        debug!("Fetching profile image from {url}");

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|source| CoreError::ProfileFetch { source })?;

        let status = response.status();
        if !status.is_success() {
            return Err(CoreError::ProfileStatus {
                status: status.as_u16(),
            });
        }

        let body: ProfileResponse = response
            .json()
            .await
            .map_err(|source| CoreError::ProfileFetch { source })?;

        Ok(body.image_url.filter(|u| !u.is_empty()))
    }
}

/// Coordinates profile image fetches across token changes
///
/// At most one committed result per generation: `reload` bumps the counter
/// and spawns a fetch that carries its generation; `commit` drops results
/// whose generation is no longer current.
pub struct ProfileImageLoader {
    client: ProfileClient,

    /// Committed image reference, absent before a fetch lands or on failure
    image: RwLock<Option<String>>,

    /// Bumped on every reload/invalidation; fetches compare against it
    generation: AtomicU64,

    event_bus: EventBus,
}

impl ProfileImageLoader {
    pub fn new(client: ProfileClient, event_bus: EventBus) -> Self {
        Self {
            client,
            image: RwLock::new(None),
            generation: AtomicU64::new(0),
            event_bus,
        }
    }

    /// Currently committed image reference
    pub fn image_url(&self) -> Option<String> {
        self.image.read().clone()
    }

    /// Start a new fetch generation, staling any in-flight fetch
    pub fn begin(&self) -> u64 {
        self.generation.fetch_add(1, Ordering::SeqCst) + 1
    }

    /// Drop the image and stale any in-flight fetch (token became absent)
    pub fn invalidate(&self) {
        self.begin();
        *self.image.write() = None;
    }

    /// Commit a fetch result for the given generation
    ///
    /// Returns false when the result is stale and was discarded.
    pub fn commit(&self, generation: u64, result: Result<Option<String>, CoreError>) -> bool {
        let mut image = self.image.write();
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!("Discarding stale profile fetch result (generation {generation})");
            return false;
        }

        match result {
            Ok(url) => {
                *image = url;
                self.event_bus.publish(SessionEvent::ProfileImageLoaded);
            }
            Err(e) => {
                warn!("Profile image fetch failed: {e}");
                *image = None;
                self.event_bus
                    .publish(SessionEvent::ProfileImageFailed(e.summary()));
            }
        }
        true
    }

    /// React to the session's current token: fetch when a decodable
    /// identity is present, otherwise drop the image.
    ///
    /// Never issues a request without a token. The spawned task must not
    /// disrupt the caller; failures surface only through the event bus.
    pub fn reload(self: &Arc<Self>, session: &Session) {
        let (Some(token), Some(identity)) = (session.token(), session.identity()) else {
            self.invalidate();
            return;
        };

        let generation = self.begin();
        let loader = Arc::clone(self);
        tokio::spawn(async move {
            let result = loader
                .client
                .fetch_image_url(&identity.user_id, &token)
                .await;
            loader.commit(generation, result);
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loader() -> ProfileImageLoader {
        let client = ProfileClient::new("http://localhost:3000").unwrap();
        ProfileImageLoader::new(client, EventBus::default_capacity())
    }

    #[test]
    fn test_commit_current_generation() {
        let loader = loader();
        let gen1 = loader.begin();
        assert!(loader.commit(gen1, Ok(Some("http://img/a.png".to_string()))));
        assert_eq!(loader.image_url().unwrap(), "http://img/a.png");
    }

    #[test]
    fn test_stale_result_is_discarded() {
        let loader = loader();
        let gen1 = loader.begin();
        let gen2 = loader.begin();

        // The response for the old token arrives after the token changed
        assert!(!loader.commit(gen1, Ok(Some("http://img/stale.png".to_string()))));
        assert!(loader.image_url().is_none());

        // Only the latest generation may commit
        assert!(loader.commit(gen2, Ok(Some("http://img/fresh.png".to_string()))));
        assert_eq!(loader.image_url().unwrap(), "http://img/fresh.png");
    }

    #[test]
    fn test_failure_leaves_image_absent() {
        let loader = loader();
        let gen1 = loader.begin();
        assert!(loader.commit(gen1, Ok(Some("http://img/a.png".to_string()))));

        let gen2 = loader.begin();
        assert!(loader.commit(gen2, Err(CoreError::ProfileStatus { status: 502 })));
        assert!(loader.image_url().is_none());
    }

    #[tokio::test]
    async fn test_failure_is_reported_on_event_bus() {
        let bus = EventBus::default_capacity();
        let mut rx = bus.subscribe();
        let client = ProfileClient::new("http://localhost:3000").unwrap();
        let loader = ProfileImageLoader::new(client, bus);

        let generation = loader.begin();
        loader.commit(generation, Err(CoreError::ProfileStatus { status: 404 }));

        let event = rx.recv().await.unwrap();
        assert!(matches!(event, SessionEvent::ProfileImageFailed(msg) if msg.contains("404")));
    }

    #[test]
    fn test_invalidate_stales_in_flight_fetch() {
        let loader = loader();
        let generation = loader.begin();
        assert!(loader.commit(generation, Ok(Some("http://img/a.png".to_string()))));

        // Token goes absent while a refetch is outstanding
        let in_flight = loader.begin();
        loader.invalidate();
        assert!(loader.image_url().is_none());
        assert!(!loader.commit(in_flight, Ok(Some("http://img/late.png".to_string()))));
        assert!(loader.image_url().is_none());
    }

    #[tokio::test]
    async fn test_reload_without_token_clears_image() {
        let loader = Arc::new(loader());
        let generation = loader.begin();
        assert!(loader.commit(generation, Ok(Some("http://img/a.png".to_string()))));

        let session = Session::new(None, None);
        loader.reload(&session);
        assert!(loader.image_url().is_none());
    }

    #[tokio::test]
    async fn test_reload_with_undecodable_token_clears_image() {
        let loader = Arc::new(loader());
        let generation = loader.begin();
        assert!(loader.commit(generation, Ok(Some("http://img/a.png".to_string()))));

        // Present but malformed token: no identity, so no fetch
        let session = Session::new(Some("garbage".to_string()), None);
        loader.reload(&session);
        assert!(loader.image_url().is_none());
    }
}
