//! End-to-end tests for the redirect resolution flow.
//!
//! Each test runs a real server instance against a wiremock DoH upstream
//! and drives it with a plain reqwest client.

use std::net::SocketAddr;

use serde_json::json;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use dns_redirector::config::RedirectorConfig;
use dns_redirector::http::HttpServer;

/// Start a redirector on an ephemeral port, pointed at the given DoH endpoint.
async fn spawn_app(doh_endpoint: String) -> SocketAddr {
    let mut config = RedirectorConfig::default();
    config.listener.bind_address = "127.0.0.1:0".into();
    config.resolver.endpoint = doh_endpoint;

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .unwrap();
    let addr = listener.local_addr().unwrap();

    let server = HttpServer::new(config).unwrap();
    tokio::spawn(async move {
        let _ = server.run(listener).await;
    });

    addr
}

/// Client that neither follows redirects nor consults proxy settings.
fn client() -> reqwest::Client {
    reqwest::Client::builder()
        .redirect(reqwest::redirect::Policy::none())
        .no_proxy()
        .build()
        .unwrap()
}

fn txt_response(records: &[(&str, u32)]) -> ResponseTemplate {
    let answers: Vec<_> = records
        .iter()
        .map(|(data, ttl)| json!({ "name": "x", "type": 16, "TTL": ttl, "data": data }))
        .collect();
    ResponseTemplate::new(200).set_body_json(json!({ "Status": 0, "Answer": answers }))
}

fn empty_response() -> ResponseTemplate {
    ResponseTemplate::new(200).set_body_json(json!({ "Status": 0 }))
}

async fn mock_txt(server: &MockServer, domain: &str, response: ResponseTemplate) {
    Mock::given(method("GET"))
        .and(path("/dns-query"))
        .and(query_param("name", domain))
        .and(query_param("type", "TXT"))
        .and(header("Accept", "application/dns-json"))
        .respond_with(response)
        .mount(server)
        .await;
}

#[tokio::test]
async fn resolves_primary_host_to_302() {
    let doh = MockServer::start().await;
    mock_txt(
        &doh,
        "example.com",
        txt_response(&[("\"REDIRECT::https://example.org\"", 7200)]),
    )
    .await;

    let addr = spawn_app(format!("{}/dns-query", doh.uri())).await;
    let res = client()
        .get(format!("http://{addr}/"))
        .header(reqwest::header::HOST, "example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 302);
    assert_eq!(res.headers()["location"], "https://example.org");
    assert_eq!(res.headers()["source"], "cf-worker");
    assert_eq!(
        res.headers()["strict-transport-security"],
        "max-age=31536000; includeSubDomains; preload"
    );
    let expires = res.headers()["expires"].to_str().unwrap();
    assert!(expires.ends_with("GMT"), "not an HTTP date: {expires}");
}

#[tokio::test]
async fn keep_path_appends_request_path() {
    let doh = MockServer::start().await;
    mock_txt(
        &doh,
        "example.com",
        txt_response(&[("\"SL::REDIRECT::KEEP_PATH::https://example.org\"", 7200)]),
    )
    .await;

    let addr = spawn_app(format!("{}/dns-query", doh.uri())).await;
    let res = client()
        .get(format!("http://{addr}/foo/bar"))
        .header(reqwest::header::HOST, "example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 302);
    assert_eq!(res.headers()["location"], "https://example.org/foo/bar");
}

#[tokio::test]
async fn falls_back_to_redirect_subdomain() {
    let doh = MockServer::start().await;
    mock_txt(&doh, "example.com", empty_response()).await;
    mock_txt(
        &doh,
        "redirect.example.com",
        txt_response(&[("\"REDIRECT::https://fallback.example\"", 60)]),
    )
    .await;

    let addr = spawn_app(format!("{}/dns-query", doh.uri())).await;
    let res = client()
        .get(format!("http://{addr}/"))
        .header(reqwest::header::HOST, "example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 302);
    assert_eq!(res.headers()["location"], "https://fallback.example");
}

#[tokio::test]
async fn unresolvable_host_gets_404_page() {
    let doh = MockServer::start().await;
    mock_txt(&doh, "unknown.example", empty_response()).await;
    mock_txt(&doh, "redirect.unknown.example", empty_response()).await;

    let addr = spawn_app(format!("{}/dns-query", doh.uri())).await;
    let res = client()
        .get(format!("http://{addr}/"))
        .header(reqwest::header::HOST, "unknown.example")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 404);
    assert_eq!(res.headers()["content-type"], "text/html; charset=UTF-8");
    let body = res.text().await.unwrap();
    assert!(body.contains("unknown.example"), "host missing from: {body}");
}

#[tokio::test]
async fn non_matching_records_are_skipped() {
    let doh = MockServer::start().await;
    mock_txt(
        &doh,
        "example.com",
        txt_response(&[
            ("\"v=spf1 include:_spf.example.com -all\"", 300),
            ("\"REDIRECT::https://winner.example\"", 7200),
            ("\"REDIRECT::https://loser.example\"", 7200),
        ]),
    )
    .await;

    let addr = spawn_app(format!("{}/dns-query", doh.uri())).await;
    let res = client()
        .get(format!("http://{addr}/"))
        .header(reqwest::header::HOST, "example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 302);
    assert_eq!(res.headers()["location"], "https://winner.example");
}

#[tokio::test]
async fn resolver_failure_surfaces_as_502() {
    let doh = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/dns-query"))
        .respond_with(ResponseTemplate::new(500).set_body_string("resolver exploded"))
        .mount(&doh)
        .await;

    let addr = spawn_app(format!("{}/dns-query", doh.uri())).await;
    let res = client()
        .get(format!("http://{addr}/"))
        .header(reqwest::header::HOST, "example.com")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 502);
}

#[tokio::test]
async fn plain_http_upgrades_to_https_without_lookup() {
    // No mocks mounted: an attempted lookup would 404 inside wiremock and
    // surface as 502, so a 301 proves no lookup happened.
    let doh = MockServer::start().await;

    let addr = spawn_app(format!("{}/dns-query", doh.uri())).await;
    let res = client()
        .get(format!("http://{addr}/some/path?q=1"))
        .header(reqwest::header::HOST, "example.com")
        .header("x-forwarded-proto", "http")
        .send()
        .await
        .unwrap();

    assert_eq!(res.status(), 301);
    assert_eq!(res.headers()["location"], "https://example.com/some/path?q=1");
    assert_eq!(res.headers()["source"], "cf-worker");
    assert_eq!(
        res.headers()["strict-transport-security"],
        "max-age=31536000; includeSubDomains; preload"
    );
}

#[tokio::test]
async fn explicit_port_is_not_upgraded() {
    let doh = MockServer::start().await;
    mock_txt(&doh, "example.com:8443", empty_response()).await;
    mock_txt(&doh, "redirect.example.com:8443", empty_response()).await;

    let addr = spawn_app(format!("{}/dns-query", doh.uri())).await;
    let res = client()
        .get(format!("http://{addr}/"))
        .header(reqwest::header::HOST, "example.com:8443")
        .header("x-forwarded-proto", "http")
        .send()
        .await
        .unwrap();

    // Falls through to resolution instead of a 301 upgrade.
    assert_eq!(res.status(), 404);
}
