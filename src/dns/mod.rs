//! DNS-over-HTTPS lookup subsystem.
//!
//! # Data Flow
//! ```text
//! domain name
//!     → doh.rs (GET <endpoint>?name=<domain>&type=TXT, Accept: application/dns-json)
//!     → types.rs (deserialize the JSON answer section)
//!     → Vec<TxtAnswer> (possibly empty)
//! ```
//!
//! # Design Decisions
//! - One shot per lookup: no retries, no caching; records are fetched
//!   fresh for every request so DNS edits take effect immediately
//! - A missing `Answer` key is an empty answer set, not an error
//! - Non-2xx from the resolver is a hard failure carrying the upstream
//!   status and body for diagnostics

pub mod doh;
pub mod types;

pub use doh::DohClient;
pub use types::{LookupError, TxtAnswer};
