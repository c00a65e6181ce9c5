//! Debounced search session.
//!
//! Rapid query updates coalesce: each call registers a new generation, waits
//! out the debounce interval, and bails if a newer generation was issued in
//! the meantime. A late response from a superseded generation is discarded
//! rather than overwriting newer results: last writer wins by generation,
//! not by network arrival order.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use reqwest::Client;

use crate::registry::{self, DEFAULT_BASE_URL, PackageSuggestion, SearchError};

/// Default pause before a pending query is sent.
pub const DEFAULT_DEBOUNCE: Duration = Duration::from_millis(200);

/// Debounced, superseding search over the registry.
///
/// Clones share the generation counter, so concurrent [`SearchSession::query`]
/// calls on clones supersede each other.
#[derive(Debug, Clone)]
pub struct SearchSession {
    client: Client,
    base_url: String,
    debounce: Duration,
    generation: Arc<AtomicU64>,
}

impl SearchSession {
    /// Session against the public registry with the default debounce.
    #[must_use]
    pub fn new() -> Self {
        Self::with_registry(DEFAULT_BASE_URL, DEFAULT_DEBOUNCE)
    }

    /// Session with an explicit registry URL and debounce interval.
    ///
    /// A zero interval skips the pause entirely, for one-shot callers.
    #[must_use]
    pub fn with_registry(base_url: impl Into<String>, debounce: Duration) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
            debounce,
            generation: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Submit a query update.
    ///
    /// Returns `Ok(None)` when a newer query superseded this one, either
    /// during the debounce pause or while the request was in flight. At most
    /// one network call results from a burst of sub-interval updates.
    pub async fn query(
        &self,
        text: &str,
        size: usize,
    ) -> Result<Option<Vec<PackageSuggestion>>, SearchError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;

        if !self.debounce.is_zero() {
            tokio::time::sleep(self.debounce).await;
        }
        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::trace!("query '{text}' superseded during debounce");
            return Ok(None);
        }

        let results = registry::search(&self.client, &self.base_url, text, size).await?;

        if self.generation.load(Ordering::SeqCst) != generation {
            tracing::trace!("query '{text}' superseded in flight");
            return Ok(None);
        }
        Ok(Some(results))
    }
}

impl Default for SearchSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const BODY: &str = r#"[
        {"package": {"name": "lodash", "description": "utils", "version": "4.17.21", "publisher": {"username": "bnjmnt4n"}}}
    ]"#;

    #[tokio::test]
    async fn burst_of_updates_sends_exactly_one_request() {
        let mut server = mockito::Server::new_async().await;
        // Only the final query may hit the wire, exactly once.
        let mock = server
            .mock("GET", "/v2/search/suggestions")
            .match_query(Matcher::UrlEncoded("q".into(), "lod".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(BODY)
            .expect(1)
            .create_async()
            .await;

        let session = SearchSession::with_registry(server.url(), Duration::from_millis(150));

        let mut handles = Vec::new();
        for text in ["l", "lo", "lod"] {
            let s = session.clone();
            handles.push(tokio::spawn(async move { s.query(text, 10).await }));
            tokio::time::sleep(Duration::from_millis(20)).await;
        }

        let mut results = Vec::new();
        for handle in handles {
            results.push(handle.await.unwrap().unwrap());
        }

        mock.assert_async().await;
        assert_eq!(results[0], None, "superseded query must yield nothing");
        assert_eq!(results[1], None, "superseded query must yield nothing");
        let last = results[2].as_ref().expect("latest query must win");
        assert_eq!(last[0].name, "lodash");
    }

    #[tokio::test]
    async fn late_response_from_stale_query_is_discarded() {
        use std::io::Write as _;

        let mut server = mockito::Server::new_async().await;
        // The stale query's response is held back until well after a newer
        // query has resolved, so discarding must key on generation, not on
        // network arrival order.
        let slow = server
            .mock("GET", "/v2/search/suggestions")
            .match_query(Matcher::UrlEncoded("q".into(), "lod".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_chunked_body(|w| {
                std::thread::sleep(Duration::from_millis(300));
                w.write_all(BODY.as_bytes())
            })
            .create_async()
            .await;
        let fast = server
            .mock("GET", "/v2/search/suggestions")
            .match_query(Matcher::UrlEncoded("q".into(), "lodash".into()))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(BODY)
            .create_async()
            .await;

        let session = SearchSession::with_registry(server.url(), Duration::from_millis(10));

        let stale = {
            let s = session.clone();
            tokio::spawn(async move { s.query("lod", 10).await })
        };
        // Let the first request reach the wire, then supersede it mid-flight.
        tokio::time::sleep(Duration::from_millis(100)).await;
        let fresh = session.query("lodash", 10).await.unwrap();

        assert_eq!(fresh.expect("latest query must win")[0].name, "lodash");
        assert_eq!(
            stale.await.unwrap().unwrap(),
            None,
            "stale generation's late response must be discarded"
        );
        slow.assert_async().await;
        fast.assert_async().await;
    }

    #[tokio::test]
    async fn single_query_goes_through() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v2/search/suggestions")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(BODY)
            .create_async()
            .await;

        let session = SearchSession::with_registry(server.url(), Duration::from_millis(10));
        let results = session.query("lodash", 10).await.unwrap();
        assert_eq!(results.unwrap().len(), 1);
    }

    #[tokio::test]
    async fn zero_debounce_skips_the_pause() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/v2/search/suggestions")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body("[]")
            .create_async()
            .await;

        let session = SearchSession::with_registry(server.url(), Duration::ZERO);
        let start = std::time::Instant::now();
        let results = session.query("lodash", 10).await.unwrap();
        assert!(results.unwrap().is_empty());
        assert!(start.elapsed() < DEFAULT_DEBOUNCE);
    }
}
