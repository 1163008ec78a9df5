use actix_web::HttpResponse;
use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use tracing::error;

use crate::errors::ShortenerError;

pub mod redirect;
pub mod shorten;

pub use redirect::{RedirectService, redirect_routes};
pub use shorten::{ShortenRequest, ShortenResponse, ShortenService, shorten_routes};

/// Map a store error onto the HTTP response. Lookup misses and rejected
/// input are client errors; anything raised by the storage I/O path is a 500.
pub fn error_response(err: &ShortenerError) -> HttpResponse {
    let status = if err.is_fatal() {
        error!("Storage failure: {}", err);
        StatusCode::INTERNAL_SERVER_ERROR
    } else {
        StatusCode::BAD_REQUEST
    };

    HttpResponse::build(status)
        .content_type("text/plain; charset=utf-8")
        .body(err.format_simple())
}

fn blocking_error_response(err: BlockingError) -> HttpResponse {
    error!("Blocking storage task failed: {}", err);
    HttpResponse::build(StatusCode::INTERNAL_SERVER_ERROR)
        .content_type("text/plain; charset=utf-8")
        .body("Internal Server Error")
}
