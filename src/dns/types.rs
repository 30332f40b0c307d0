//! Wire types and error definitions for DoH lookups.

use serde::Deserialize;
use thiserror::Error;

/// The subset of the `application/dns-json` response body we consume.
#[derive(Debug, Deserialize)]
pub struct DnsJsonResponse {
    /// Answer section. Absent when the name has no records of the queried type.
    #[serde(rename = "Answer", default)]
    pub answer: Vec<TxtAnswer>,
}

/// A single TXT answer record.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct TxtAnswer {
    /// Record payload. DoH resolvers return TXT data wrapped in literal
    /// double quotes.
    pub data: String,

    /// Record time-to-live in seconds.
    #[serde(rename = "TTL")]
    pub ttl: u32,
}

impl TxtAnswer {
    pub fn new(data: impl Into<String>, ttl: u32) -> Self {
        Self {
            data: data.into(),
            ttl,
        }
    }
}

/// Errors that can occur during a TXT lookup.
#[derive(Debug, Error)]
pub enum LookupError {
    /// Resolver answered with a non-success HTTP status.
    #[error("resolver returned {status}: {body}")]
    Status {
        status: reqwest::StatusCode,
        body: String,
    },

    /// The HTTP call itself failed (connect, timeout, interrupted body).
    #[error("resolver request failed: {0}")]
    Transport(#[source] reqwest::Error),

    /// Resolver answered 2xx but the body was not valid DNS JSON.
    #[error("resolver response was not DNS JSON: {0}")]
    Decode(#[source] reqwest::Error),
}
