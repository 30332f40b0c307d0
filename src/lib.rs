//! DNS-driven HTTP redirector.
//!
//! Resolves a request's host into a redirect target by querying DNS TXT
//! records over DNS-over-HTTPS, then answers with a 302 (directive found),
//! a 404 page (no record on the host or its `redirect.` fallback), or a
//! 502 (resolver unreachable). Plain-HTTP requests on the default port are
//! upgraded to HTTPS with a 301 before any lookup.

pub mod config;
pub mod dns;
pub mod http;
pub mod observability;
pub mod redirect;

pub use config::RedirectorConfig;
pub use http::HttpServer;
