mod listing_routes;
mod florist_routes;

use actix_web::{web, HttpResponse};
use log::info;

use crate::models::ApiError;
use crate::traits::DocumentStore;

pub use listing_routes::configure as configure_listing_routes;
pub use florist_routes::configure as configure_florist_routes;

pub fn configure<S: DocumentStore>(cfg: &mut web::ServiceConfig) {
    configure_listing_routes::<S>(cfg);
    configure_florist_routes::<S>(cfg);
    cfg.route("/health", web::get().to(|| async {
        info!("Health check");
        HttpResponse::Ok().body("OK")
    }));
}

/// JSON extractor settings: unreadable bodies become a `MALFORMED_BODY` 400.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default().error_handler(|err, _req| ApiError::MalformedBody(err.to_string()).into())
}

/// Query extractor settings: undecodable query strings become a `MALFORMED_QUERY` 400.
pub fn query_config() -> web::QueryConfig {
    web::QueryConfig::default().error_handler(|err, _req| ApiError::MalformedQuery(err.to_string()).into())
}
