//! Redirect resolution subsystem.
//!
//! # Data Flow
//! ```text
//! host + request path
//!     → resolver.rs (TXT lookup on host, then on redirect.<host>)
//!     → directive.rs (scan records, first match wins)
//!     → Option<RedirectDirective>
//! ```

pub mod directive;
pub mod resolver;

pub use directive::{parse_directive, RedirectDirective, MINIMUM_TTL};
pub use resolver::RedirectResolver;
