//! Dual-domain resolution policy.

use crate::dns::doh::DohClient;
use crate::dns::types::LookupError;
use crate::redirect::directive::{parse_directive, RedirectDirective};

/// Resolves a request host into a redirect directive via DNS TXT records.
///
/// Resolution is attempted against the exact requested host first; when
/// that yields no directive, a second lookup is made against the host
/// prefixed with `redirect.`. The two lookups run sequentially, never in
/// parallel, since the fallback is only needed when the primary is empty.
#[derive(Debug, Clone)]
pub struct RedirectResolver {
    doh: DohClient,
}

impl RedirectResolver {
    pub fn new(doh: DohClient) -> Self {
        Self { doh }
    }

    /// Resolve `host` into at most one redirect directive.
    ///
    /// A lookup failure on either domain aborts the whole resolution; in
    /// particular a failed primary lookup is not papered over by the
    /// fallback.
    pub async fn resolve(
        &self,
        host: &str,
        path: &str,
    ) -> Result<Option<RedirectDirective>, LookupError> {
        if let Some(directive) = self.lookup(host, path).await? {
            return Ok(Some(directive));
        }

        let fallback = format!("redirect.{host}");
        let directive = self.lookup(&fallback, path).await?;
        if directive.is_some() {
            tracing::debug!(host = %host, fallback = %fallback, "Fallback domain resolved");
        }
        Ok(directive)
    }

    async fn lookup(
        &self,
        domain: &str,
        path: &str,
    ) -> Result<Option<RedirectDirective>, LookupError> {
        let answers = self.doh.lookup_txt(domain).await?;
        Ok(parse_directive(&answers, path))
    }
}
