//! HTTP API tests
//!
//! Drives the shorten and redirect routes through actix-web's test harness
//! against both storage backends.

use actix_web::http::StatusCode;
use actix_web::http::header;
use actix_web::middleware::Compress;
use actix_web::test::{self, TestRequest};
use actix_web::{App, web};

use shortener::api::middleware::RequestTracing;
use shortener::api::services::{ShortenResponse, redirect_routes, shorten_routes};
use shortener::config::ServerConfig;
use shortener::storage::{FileStore, MemoryStore, SharedStore};
use tempfile::TempDir;

const BASE_URL: &str = "http://server:port";

fn server_config() -> ServerConfig {
    ServerConfig {
        base_url: BASE_URL.to_string(),
        ..ServerConfig::default()
    }
}

fn memory_store() -> SharedStore {
    SharedStore::new(Box::new(MemoryStore::new()))
}

/// Create a test app with the full route table
macro_rules! shortener_app {
    ($store:expr) => {{
        test::init_service(
            App::new()
                .wrap(Compress::default())
                .wrap(RequestTracing)
                .app_data(web::Data::new($store))
                .app_data(web::Data::new(server_config()))
                .configure(shorten_routes)
                .configure(redirect_routes),
        )
        .await
    }};
}

// =============================================================================
// POST /
// =============================================================================

#[actix_rt::test]
async fn test_add_url_plain() {
    let app = shortener_app!(memory_store());

    let req = TestRequest::post()
        .uri("/")
        .set_payload("http://www.google.com")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = test::read_body(resp).await;
    assert_eq!(body, format!("{}/lFCg5Q==", BASE_URL).as_bytes());
}

#[actix_rt::test]
async fn test_add_url_twice_returns_same_short_url() {
    let app = shortener_app!(memory_store());

    let mut bodies = Vec::new();
    for _ in 0..2 {
        let req = TestRequest::post()
            .uri("/")
            .set_payload("http://www.yandex.ru")
            .to_request();
        bodies.push(test::call_and_read_body(&app, req).await);
    }
    assert_eq!(bodies[0], bodies[1]);
}

#[actix_rt::test]
async fn test_add_empty_url_is_bad_request() {
    let app = shortener_app!(memory_store());

    let req = TestRequest::post().uri("/").set_payload("").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_add_url_with_line_break_is_bad_request() {
    let app = shortener_app!(memory_store());

    let req = TestRequest::post()
        .uri("/")
        .set_payload("http://a\nhttp://b")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

// =============================================================================
// POST /api/shorten
// =============================================================================

#[actix_rt::test]
async fn test_add_url_json() {
    let app = shortener_app!(memory_store());

    let req = TestRequest::post()
        .uri("/api/shorten")
        .insert_header((header::CONTENT_TYPE, "application/json"))
        .set_payload(r#"{"url":"http://www.google.com"}"#)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).unwrap(),
        "application/json"
    );
    let body: ShortenResponse = test::read_body_json(resp).await;
    assert_eq!(body.result, format!("{}/lFCg5Q==", BASE_URL));
}

#[actix_rt::test]
async fn test_add_url_json_malformed_is_bad_request() {
    let app = shortener_app!(memory_store());

    for payload in [r#"{"url":"#, r#"{"link":"http://x"}"#, "not json"] {
        let req = TestRequest::post()
            .uri("/api/shorten")
            .set_payload(payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST, "payload {}", payload);
    }
}

// =============================================================================
// GET /{key}
// =============================================================================

#[actix_rt::test]
async fn test_redirect_after_add() {
    let store = memory_store();
    let key = store.add("http://www.google.com").unwrap();
    let app = shortener_app!(store);

    let req = TestRequest::get().uri(&format!("/{}", key)).to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    let location = resp.headers().get(header::LOCATION).unwrap().to_str().unwrap();
    assert_eq!(location, "http://www.google.com");
}

#[actix_rt::test]
async fn test_redirect_unknown_key_is_bad_request() {
    let app = shortener_app!(memory_store());

    let req = TestRequest::get().uri("/doesnotexist").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[actix_rt::test]
async fn test_add_then_redirect_with_file_store() {
    let temp_dir = TempDir::new().unwrap();
    let store = SharedStore::new(Box::new(
        FileStore::open(temp_dir.path().join("links.txt")).unwrap(),
    ));
    let app = shortener_app!(store.clone());

    let req = TestRequest::post()
        .uri("/")
        .set_payload("http://www.mail.ru")
        .to_request();
    let body = test::call_and_read_body(&app, req).await;
    let short_url = String::from_utf8(body.to_vec()).unwrap();
    let path = short_url.strip_prefix(BASE_URL).unwrap();

    let req = TestRequest::get().uri(path).to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::TEMPORARY_REDIRECT);
    assert_eq!(
        resp.headers().get(header::LOCATION).unwrap(),
        "http://www.mail.ru"
    );
}

#[actix_rt::test]
async fn test_closed_store_is_internal_error() {
    let temp_dir = TempDir::new().unwrap();
    let store = SharedStore::new(Box::new(
        FileStore::open(temp_dir.path().join("links.txt")).unwrap(),
    ));
    store.close().unwrap();
    let app = shortener_app!(store);

    let req = TestRequest::post()
        .uri("/")
        .set_payload("http://www.google.com")
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

// =============================================================================
// Middleware
// =============================================================================

#[actix_rt::test]
async fn test_request_id_is_echoed_or_generated() {
    let app = shortener_app!(memory_store());

    let req = TestRequest::get()
        .uri("/doesnotexist")
        .insert_header(("X-Request-ID", "abc-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.headers().get("x-request-id").unwrap(), "abc-123");

    let req = TestRequest::get().uri("/doesnotexist").to_request();
    let resp = test::call_service(&app, req).await;
    let generated = resp.headers().get("x-request-id").unwrap().to_str().unwrap();
    assert_eq!(generated.len(), 36);
}

/// gzip("http://www.google.com"), mtime 0
const GZIPPED_GOOGLE: &[u8] = &[
    0x1f, 0x8b, 0x08, 0x00, 0x00, 0x00, 0x00, 0x00, 0x02, 0x03, 0xcb, 0x28, 0x29, 0x29, 0xb0, 0xd2,
    0xd7, 0x2f, 0x2f, 0x2f, 0xd7, 0x4b, 0xcf, 0xcf, 0x4f, 0xcf, 0x49, 0xd5, 0x4b, 0xce, 0xcf, 0x05,
    0x00, 0xa5, 0x77, 0xa0, 0x5e, 0x15, 0x00, 0x00, 0x00,
];

#[actix_rt::test]
async fn test_gzip_request_body_is_decoded() {
    let app = shortener_app!(memory_store());

    let req = TestRequest::post()
        .uri("/")
        .insert_header((header::CONTENT_ENCODING, "gzip"))
        .set_payload(GZIPPED_GOOGLE)
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    let body = test::read_body(resp).await;
    assert_eq!(body, format!("{}/lFCg5Q==", BASE_URL).as_bytes());
}

#[actix_rt::test]
async fn test_gzip_response_when_accepted() {
    let app = shortener_app!(memory_store());

    let req = TestRequest::post()
        .uri("/")
        .insert_header((header::ACCEPT_ENCODING, "gzip"))
        .set_payload("http://www.google.com")
        .to_request();
    let resp = test::call_service(&app, req).await;

    assert_eq!(resp.status(), StatusCode::CREATED);
    assert_eq!(resp.headers().get(header::CONTENT_ENCODING).unwrap(), "gzip");
}
