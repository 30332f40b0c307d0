//! DNS-over-HTTPS client.
//!
//! # Responsibilities
//! - Issue TXT queries against the configured resolver endpoint
//! - Speak the `application/dns-json` GET wire format
//! - Surface upstream failures with status and body attached

use std::time::Duration;

use reqwest::header;

use crate::config::schema::ResolverConfig;
use crate::dns::types::{DnsJsonResponse, LookupError, TxtAnswer};

/// Client for TXT lookups against a single DoH endpoint.
///
/// Cheap to clone; the inner [`reqwest::Client`] shares its connection pool.
#[derive(Debug, Clone)]
pub struct DohClient {
    http: reqwest::Client,
    endpoint: String,
}

impl DohClient {
    /// Build a client from resolver configuration.
    pub fn new(config: &ResolverConfig) -> Result<Self, reqwest::Error> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.lookup_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            endpoint: config.endpoint.clone(),
        })
    }

    /// Fetch all TXT records for `domain`.
    ///
    /// Returns an empty vec when the name exists but carries no TXT
    /// records, or when the resolver omits the answer section entirely.
    pub async fn lookup_txt(&self, domain: &str) -> Result<Vec<TxtAnswer>, LookupError> {
        let response = self
            .http
            .get(&self.endpoint)
            .query(&[("name", domain), ("type", "TXT")])
            .header(header::ACCEPT, "application/dns-json")
            .send()
            .await
            .map_err(LookupError::Transport)?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(LookupError::Status { status, body });
        }

        let body: DnsJsonResponse = response.json().await.map_err(LookupError::Decode)?;

        tracing::debug!(
            domain = %domain,
            answers = body.answer.len(),
            "TXT lookup completed"
        );

        Ok(body.answer)
    }
}
