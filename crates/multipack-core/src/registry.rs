//! npm registry search.
//!
//! Thin client for the npms.io suggestions endpoint. The base URL is a
//! parameter so tests can point at a local mock server.

use reqwest::Client;
use serde::Deserialize;
use thiserror::Error;

/// Default search endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.npms.io";

/// Queries shorter than this return no results without a network call.
pub const MIN_QUERY_LEN: usize = 2;

/// Errors from registry search. Transport, status, and decode failures all
/// surface as one aggregate error; no partial results are returned.
#[derive(Error, Debug)]
pub enum SearchError {
    /// Request failed, the server answered with an error status, or the
    /// response body did not decode.
    #[error("failed to fetch package suggestions: {0}")]
    Http(#[from] reqwest::Error),
}

/// One candidate package returned from search.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSuggestion {
    /// Package name as published.
    pub name: String,
    /// Short description, defaulted when the registry has none.
    pub description: String,
    /// Latest published version.
    pub version: String,
    /// Publisher username, defaulted when unknown.
    pub publisher: String,
}

// Wire shape of /v2/search/suggestions items.
#[derive(Debug, Deserialize)]
struct Suggestion {
    package: SuggestionPackage,
}

#[derive(Debug, Deserialize)]
struct SuggestionPackage {
    name: String,
    description: Option<String>,
    version: String,
    publisher: Option<SuggestionPublisher>,
}

#[derive(Debug, Deserialize)]
struct SuggestionPublisher {
    username: String,
}

/// Search the registry for up to `size` package suggestions matching `query`.
pub async fn search(
    client: &Client,
    base_url: &str,
    query: &str,
    size: usize,
) -> Result<Vec<PackageSuggestion>, SearchError> {
    if query.chars().count() < MIN_QUERY_LEN {
        return Ok(Vec::new());
    }

    let url = format!("{base_url}/v2/search/suggestions");
    tracing::debug!("searching registry for '{query}' (size {size})");

    let suggestions: Vec<Suggestion> = client
        .get(&url)
        .header(reqwest::header::USER_AGENT, crate::USER_AGENT)
        .query(&[("q", query.to_string()), ("size", size.to_string())])
        .send()
        .await?
        .error_for_status()?
        .json()
        .await?;

    Ok(suggestions
        .into_iter()
        .map(|s| {
            let pkg = s.package;
            PackageSuggestion {
                name: pkg.name,
                description: pkg
                    .description
                    .unwrap_or_else(|| "No description available".to_string()),
                version: pkg.version,
                publisher: pkg
                    .publisher
                    .map_or_else(|| "Unknown".to_string(), |p| p.username),
            }
        })
        .collect())
}
