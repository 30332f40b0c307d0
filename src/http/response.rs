//! Response construction.
//!
//! # Responsibilities
//! - Build the four terminal responses: HTTPS upgrade (301), redirect
//!   (302), not-found page (404), lookup failure (502)
//! - Stamp the marker and HSTS headers on every redirect-class response

use axum::body::Body;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use chrono::{Duration, Utc};

use crate::redirect::directive::RedirectDirective;

/// Marker header identifying responses produced by this service.
pub const SOURCE_HEADER: &str = "Source";
pub const SOURCE_VALUE: &str = "cf-worker";

pub const HSTS_VALUE: &str = "max-age=31536000; includeSubDomains; preload";

const DOCS_URL: &str =
    "https://dev.azure.com/thenetworg/Wiki/_wiki/wikis/Wiki.wiki/2047/DNS-Redirector";
const SUPPORT_URL: &str = "https://support.networg.com";

// RFC 7231 IMF-fixdate, e.g. "Sun, 06 Nov 1994 08:49:37 GMT".
const HTTP_DATE_FORMAT: &str = "%a, %d %b %Y %H:%M:%S GMT";

/// Permanent redirect upgrading a plain-HTTP request to HTTPS.
pub fn https_upgrade(location: &str) -> Response {
    let response = Response::builder()
        .status(StatusCode::MOVED_PERMANENTLY)
        .header(header::LOCATION, location)
        .header(SOURCE_HEADER, SOURCE_VALUE)
        .header(header::STRICT_TRANSPORT_SECURITY, HSTS_VALUE)
        .body(Body::empty());
    unwrap_or_server_error(response)
}

/// Temporary redirect to a resolved directive target.
///
/// Expires is set to now plus the directive TTL so intermediaries cache
/// the redirect no longer than the DNS record allows.
pub fn redirect(directive: &RedirectDirective) -> Response {
    let expires = (Utc::now() + Duration::seconds(i64::from(directive.ttl)))
        .format(HTTP_DATE_FORMAT)
        .to_string();

    let response = Response::builder()
        .status(StatusCode::FOUND)
        .header(header::LOCATION, &directive.location)
        .header(header::EXPIRES, expires)
        .header(SOURCE_HEADER, SOURCE_VALUE)
        .header(header::STRICT_TRANSPORT_SECURITY, HSTS_VALUE)
        .body(Body::empty());
    unwrap_or_server_error(response)
}

/// Explanatory page for hosts with no redirect record on either domain.
pub fn not_found(host: &str) -> Response {
    let body = format!(
        "<!DOCTYPE html>\n\
         <body>\n\
           <h1>Redirect not found</h1>\n\
           <p>No redirect record has been found for domain `{host}`. \
         Please ensure proper configuration as per <a href=\"{DOCS_URL}\">docs</a>. \
         If you are a customer, contact <a href=\"{SUPPORT_URL}\">support</a>.</p>\n\
         </body>"
    );

    let response = Response::builder()
        .status(StatusCode::NOT_FOUND)
        .header(header::CONTENT_TYPE, "text/html; charset=UTF-8")
        .body(Body::from(body));
    unwrap_or_server_error(response)
}

/// Terminal response when the upstream resolver could not be queried.
pub fn lookup_failed() -> Response {
    (
        StatusCode::BAD_GATEWAY,
        "Upstream DNS lookup failed".to_string(),
    )
        .into_response()
}

fn unwrap_or_server_error(result: Result<Response, axum::http::Error>) -> Response {
    match result {
        Ok(response) => response,
        Err(err) => {
            // Reachable only through header values the builder rejects,
            // e.g. a TXT record smuggling control bytes into Location.
            tracing::error!(error = %err, "Failed to build response");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
