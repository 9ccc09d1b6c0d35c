//! Centralized error handling for the HTTP surface.
//!
//! Every failure raised upstream — payload parsing, schema validation,
//! domain operations — converges on [`ApiError`], the single place that
//! decides the wire representation.

use actix_web::{
  HttpRequest, HttpResponse,
  error::ResponseError,
  http::{StatusCode, header::ContentType},
};
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;

use crate::domain::auth::errors::DomainError;

use super::dtos::ErrorResponse;
use super::validation::SchemaError;

/// Whether 5xx responses may carry the underlying error detail. Installed
/// once at startup from the parsed run mode; defaults to redacting.
static EXPOSE_INTERNAL_ERRORS: AtomicBool = AtomicBool::new(false);

/// Enables or disables the `error` detail field on internal error responses
pub fn set_expose_internal_errors(expose: bool) {
  EXPOSE_INTERNAL_ERRORS.store(expose, Ordering::Relaxed);
}

fn expose_internal_errors() -> bool {
  EXPOSE_INTERNAL_ERRORS.load(Ordering::Relaxed)
}

/// API error type that maps pipeline failures to HTTP responses.
///
/// Dispatch order matters: payload-parse failures are checked before schema
/// violations, which are checked before domain errors.
#[derive(Debug, Error)]
pub enum ApiError {
  /// Body could not be parsed (400, no internals leaked)
  #[error("Invalid request body")]
  InvalidBody,

  /// Schema validation failed (400, one entry per violated rule)
  #[error("{0}")]
  Validation(SchemaError),

  /// A typed domain failure carrying its own status and code
  #[error("{0}")]
  Domain(DomainError),
}

impl ResponseError for ApiError {
  fn status_code(&self) -> StatusCode {
    match self {
      ApiError::InvalidBody => StatusCode::BAD_REQUEST,
      ApiError::Validation(_) => StatusCode::BAD_REQUEST,
      ApiError::Domain(err) => {
        StatusCode::from_u16(err.status()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
      }
    }
  }

  fn error_response(&self) -> HttpResponse {
    let body = match self {
      ApiError::InvalidBody => ErrorResponse::message("Invalid request body"),
      ApiError::Validation(err) => {
        let mut body = ErrorResponse::message("Validation failed");
        body.errors = Some(err.violations.clone());
        body
      }
      // Unexpected failures: hide the detail outside non-production modes
      ApiError::Domain(err) if err.status() >= 500 => {
        let mut body = ErrorResponse::message("Internal Server Error");
        body.error_code = err.code;
        if expose_internal_errors() {
          body.error = Some(err.message.clone());
        }
        body
      }
      ApiError::Domain(err) => {
        let mut body = ErrorResponse::message(err.message.clone());
        body.error_code = err.code;
        body
      }
    };

    HttpResponse::build(self.status_code())
      .content_type(ContentType::json())
      .json(body)
  }
}

impl From<DomainError> for ApiError {
  fn from(error: DomainError) -> Self {
    ApiError::Domain(error)
  }
}

impl From<SchemaError> for ApiError {
  fn from(error: SchemaError) -> Self {
    ApiError::Validation(error)
  }
}

/// Fallback handler for unmatched routes.
///
/// Raises a `NotFound` domain error carrying the requested URL so the
/// normalizer renders and logs it like any other failure.
pub async fn not_found(req: HttpRequest) -> Result<HttpResponse, ApiError> {
  use crate::domain::auth::errors::ErrorCode;

  Err(ApiError::Domain(DomainError::not_found(format!(
    "{} - {}",
    ErrorCode::ResourceNotFound,
    req.uri()
  ))))
}
