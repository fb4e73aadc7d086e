//! HTTP client for the user enrichment service.

use std::time::Duration;

use thiserror::Error;

use crate::event::UserProfile;

/// Errors from a profile lookup.
#[derive(Debug, Error)]
pub enum EnrichmentError {
    /// Transport failure, timeout, or a non-success status. Status codes
    /// are not distinguished: 404 and 500 are handled identically.
    #[error("cannot retrieve user {id} from the users service: {source}")]
    LookupFailed {
        id: String,
        #[source]
        source: reqwest::Error,
    },

    /// The response body is not a valid user profile encoding.
    #[error("cannot decode profile for user {id}: {source}")]
    DecodeFailed {
        id: String,
        #[source]
        source: reqwest::Error,
    },
}

/// Client for fetching user profiles from the users query service.
///
/// Every call issues a fresh lookup; results are never cached. The
/// underlying client carries a request timeout so a hung enrichment
/// service cannot stall the consumption loop indefinitely.
#[derive(Clone)]
pub struct EnrichmentClient {
    http: reqwest::Client,
    base_url: String,
}

impl EnrichmentClient {
    /// Default lookup deadline.
    pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(5);

    /// Creates a client for the given service address.
    ///
    /// The address may be a bare `host:port`; the `http` scheme is assumed
    /// when none is given.
    pub fn new(address: &str, timeout: Duration) -> Result<Self, reqwest::Error> {
        let base_url = if address.starts_with("http://") || address.starts_with("https://") {
            address.trim_end_matches('/').to_string()
        } else {
            format!("http://{}", address.trim_end_matches('/'))
        };

        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self { http, base_url })
    }

    /// Fetches the profile for a user identifier.
    #[tracing::instrument(skip(self))]
    pub async fn fetch_user(&self, id: &str) -> Result<UserProfile, EnrichmentError> {
        let url = format!("{}/api/v1/users/{}", self.base_url, id);

        let response = self
            .http
            .get(&url)
            .send()
            .await
            .and_then(reqwest::Response::error_for_status)
            .map_err(|source| EnrichmentError::LookupFailed {
                id: id.to_string(),
                source,
            })?;

        response
            .json::<UserProfile>()
            .await
            .map_err(|source| EnrichmentError::DecodeFailed {
                id: id.to_string(),
                source,
            })
    }
}
