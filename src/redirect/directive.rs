//! TXT record parsing into redirect directives.
//!
//! # Record Format
//! ```text
//! "REDIRECT::<target>"
//! "REDIRECT::KEEP_PATH::<target>"        (request path appended to target)
//! "SL::REDIRECT::..."                     (legacy prefix, same semantics)
//! ```
//!
//! # Design Decisions
//! - Records are scanned in resolver-returned order; the first match wins
//!   and later matches are ignored
//! - KEEP_PATH appends the path verbatim, no slash normalization
//! - TTLs below the floor are raised to it so short DNS TTLs cannot force
//!   clients to revalidate constantly

use crate::dns::types::TxtAnswer;

/// Floor for directive TTLs, in seconds.
pub const MINIMUM_TTL: u32 = 3600;

const REDIRECT_PREFIX: &str = "REDIRECT::";
const LEGACY_PREFIX: &str = "SL::REDIRECT::";
const KEEP_PATH_PREFIX: &str = "KEEP_PATH::";

/// A parsed redirect instruction, valid for the current request only.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RedirectDirective {
    /// Target URL for the Location header.
    pub location: String,

    /// Clamped TTL in seconds, drives the Expires header.
    pub ttl: u32,
}

/// Scan TXT answers for a redirect directive.
///
/// Returns the directive from the first matching record, or `None` when no
/// record matches. `path` is the original request path, appended to the
/// target when the record carries the `KEEP_PATH::` modifier.
pub fn parse_directive(answers: &[TxtAnswer], path: &str) -> Option<RedirectDirective> {
    for record in answers {
        // TXT payloads arrive wrapped in literal double quotes.
        let data = unquote(&record.data);

        let target = if let Some(rest) = data.strip_prefix(LEGACY_PREFIX) {
            rest
        } else if let Some(rest) = data.strip_prefix(REDIRECT_PREFIX) {
            rest
        } else {
            continue;
        };

        let location = match target.strip_prefix(KEEP_PATH_PREFIX) {
            Some(base) => format!("{base}{path}"),
            None => target.to_string(),
        };

        return Some(RedirectDirective {
            location,
            ttl: record.ttl.max(MINIMUM_TTL),
        });
    }

    None
}

fn unquote(data: &str) -> &str {
    let data = data.strip_prefix('"').unwrap_or(data);
    data.strip_suffix('"').unwrap_or(data)
}
