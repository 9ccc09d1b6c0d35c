use actix_web::{HttpRequest, error::JsonPayloadError, web};
use std::sync::Arc;

use crate::application::auth::RegisterUserUseCase;

use super::errors::{ApiError, not_found};
use super::handlers::auth::register_handler;

/// Configure the application routes.
///
/// Mounts the registration endpoint, the liveness probe, and the fallback
/// for unmatched routes, and rebinds the JSON extractor's failure mode so a
/// malformed body surfaces through the error normalizer.
///
/// Shared between `main` and the integration tests so both run the exact
/// same pipeline.
pub fn configure_routes(cfg: &mut web::ServiceConfig, register_use_case: Arc<RegisterUserUseCase>) {
  cfg
    .app_data(web::Data::new(register_use_case))
    .app_data(web::JsonConfig::default().error_handler(json_error_handler))
    .route("/register", web::post().to(register_handler))
    .route("/health", web::get().to(health_check))
    .default_service(web::route().to(not_found));
}

/// Maps any payload-parse failure to the generic invalid-body error, leaking
/// nothing about the parser internals
fn json_error_handler(err: JsonPayloadError, _req: &HttpRequest) -> actix_web::Error {
  tracing::debug!("Rejected request payload: {}", err);
  ApiError::InvalidBody.into()
}

/// Health check endpoint
async fn health_check() -> &'static str {
  "OK"
}
