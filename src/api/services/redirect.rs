use actix_web::http::StatusCode;
use actix_web::{HttpResponse, web};
use tracing::{debug, trace};

use super::{blocking_error_response, error_response};
use crate::errors::ShortenerError;
use crate::storage::SharedStore;

pub struct RedirectService;

impl RedirectService {
    /// `GET /{key}` — 307 to the stored URL.
    pub async fn handle_redirect(
        path: web::Path<String>,
        store: web::Data<SharedStore>,
    ) -> HttpResponse {
        let key = path.into_inner();
        if key.is_empty() {
            return error_response(&ShortenerError::validation("short URL key is missing"));
        }

        let store = store.get_ref().clone();
        let lookup_key = key.clone();
        match web::block(move || store.get(&lookup_key)).await {
            Ok(Ok(url)) => {
                trace!("Redirecting {} -> {}", key, url);
                HttpResponse::build(StatusCode::TEMPORARY_REDIRECT)
                    .insert_header(("Location", url))
                    .finish()
            }
            Ok(Err(e)) => {
                if matches!(e, ShortenerError::NotFound(_)) {
                    debug!("Short URL not found: {}", key);
                }
                error_response(&e)
            }
            Err(e) => blocking_error_response(e),
        }
    }
}

pub fn redirect_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/{key}", web::get().to(RedirectService::handle_redirect));
}
