use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use super::{blocking_error_response, error_response};
use crate::config::ServerConfig;
use crate::errors::{Result, ShortenerError};
use crate::storage::SharedStore;

#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenRequest {
    pub url: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ShortenResponse {
    pub result: String,
}

pub struct ShortenService;

impl ShortenService {
    /// `POST /` — the raw body is the URL, the response body the short URL.
    pub async fn add_url(
        body: web::Bytes,
        store: web::Data<SharedStore>,
        server: web::Data<ServerConfig>,
    ) -> HttpResponse {
        let url = match std::str::from_utf8(&body) {
            Ok(url) => url.trim().to_string(),
            Err(_) => {
                return error_response(&ShortenerError::validation(
                    "request body is not valid UTF-8",
                ));
            }
        };

        match Self::shorten(url, store, &server).await {
            Ok(short_url) => HttpResponse::build(StatusCode::CREATED)
                .content_type("text/plain; charset=utf-8")
                .body(short_url),
            Err(resp) => resp,
        }
    }

    /// `POST /api/shorten` — `{"url": "..."}` in, `{"result": "..."}` out.
    pub async fn add_url_json(
        body: web::Bytes,
        store: web::Data<SharedStore>,
        server: web::Data<ServerConfig>,
    ) -> HttpResponse {
        let request: ShortenRequest = match serde_json::from_slice(&body) {
            Ok(request) => request,
            Err(e) => {
                debug!("Rejected malformed shorten request: {}", e);
                return error_response(&ShortenerError::validation(format!(
                    "invalid JSON body: {}",
                    e
                )));
            }
        };

        match Self::shorten(request.url.trim().to_string(), store, &server).await {
            Ok(result) => HttpResponse::build(StatusCode::CREATED).json(ShortenResponse { result }),
            Err(resp) => resp,
        }
    }

    async fn shorten(
        url: String,
        store: web::Data<SharedStore>,
        server: &ServerConfig,
    ) -> std::result::Result<String, HttpResponse> {
        if let Err(e) = validate_url(&url) {
            return Err(error_response(&e));
        }

        let store = store.get_ref().clone();
        match web::block(move || store.add(&url)).await {
            Ok(Ok(key)) => {
                trace!("Stored URL under key {}", key);
                Ok(server.short_url(&key))
            }
            Ok(Err(e)) => Err(error_response(&e)),
            Err(e) => Err(blocking_error_response(e)),
        }
    }
}

/// Reject values the store cannot hold: empty input, and line breaks that
/// would split a record in the file backend.
pub fn validate_url(url: &str) -> Result<()> {
    if url.is_empty() {
        return Err(ShortenerError::validation("URL must not be empty"));
    }
    if url.contains(['\n', '\r']) {
        return Err(ShortenerError::validation(
            "URL must not contain line breaks",
        ));
    }
    Ok(())
}

pub fn shorten_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::post().to(ShortenService::add_url))
        .route("/api/shorten", web::post().to(ShortenService::add_url_json));
}
