//! HTTP client for an Overpass API interpreter endpoint.
//!
//! Requests are sent as `GET <endpoint>?data=<query>`. There is no retry
//! here: a failed search is reported once and the next position update
//! triggers a fresh request.

use std::time::Duration;

use crate::{OverpassConfig, OverpassError, OverpassResponse};

/// Grace period added on top of the server-side timeout hint.
const CLIENT_TIMEOUT_GRACE_SECS: u64 = 5;

/// Maximum length of the response body preview included in error logs.
const BODY_PREVIEW_LEN: usize = 300;

/// Sends Overpass QL queries to a configured endpoint.
#[derive(Debug, Clone)]
pub struct OverpassClient {
    client: reqwest::Client,
    endpoint: String,
}

impl OverpassClient {
    /// Builds a client with the configured `User-Agent` and a request
    /// timeout slightly longer than the server-side hint.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError::Http`] if the TLS backend cannot be
    /// initialized.
    pub fn new(config: &OverpassConfig) -> Result<Self, OverpassError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.clone())
            .timeout(Duration::from_secs(
                u64::from(config.timeout_secs) + CLIENT_TIMEOUT_GRACE_SECS,
            ))
            .build()?;

        Ok(Self {
            client,
            endpoint: config.endpoint.clone(),
        })
    }

    /// The interpreter URL this client talks to.
    #[must_use]
    pub fn endpoint(&self) -> &str {
        &self.endpoint
    }

    /// Runs `query` and decodes the JSON answer.
    ///
    /// # Errors
    ///
    /// Returns [`OverpassError`] if the request fails, the server answers
    /// with a non-success status, or the body is not Overpass JSON.
    pub async fn execute(&self, query: &str) -> Result<OverpassResponse, OverpassError> {
        log::debug!("Querying Overpass at {} ({} byte query)", self.endpoint, query.len());

        let resp = self
            .client
            .get(&self.endpoint)
            .query(&[("data", query)])
            .send()
            .await?;

        let status = resp.status();
        if !status.is_success() {
            return Err(OverpassError::Status { status });
        }

        let text = resp.text().await?;
        parse_body(&text)
    }
}

/// Decodes an Overpass JSON body, logging a preview on failure.
fn parse_body(text: &str) -> Result<OverpassResponse, OverpassError> {
    serde_json::from_str(text).map_err(|e| {
        let preview: String = text.chars().take(BODY_PREVIEW_LEN).collect();
        log::warn!(
            "Overpass body did not decode ({} bytes): {e}\n  body preview: {preview}",
            text.len()
        );
        OverpassError::Decode(e)
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builds_client_from_default_config() {
        let client = OverpassClient::new(&OverpassConfig::default()).unwrap();
        assert_eq!(client.endpoint(), "https://overpass-api.de/api/interpreter");
    }

    #[test]
    fn decodes_valid_body() {
        let response = parse_body(r#"{"elements":[]}"#).unwrap();
        assert_eq!(response.elements.as_ref().map(Vec::len), Some(0));
    }

    #[test]
    fn rejects_html_error_page() {
        let err = parse_body("<html><body>Too many requests</body></html>").unwrap_err();
        assert!(matches!(err, OverpassError::Decode(_)));
    }
}
