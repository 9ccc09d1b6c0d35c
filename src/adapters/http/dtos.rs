use serde::{Deserialize, Serialize};

use crate::domain::auth::entities::User;
use crate::domain::auth::errors::ErrorCode;

use super::validation::FieldViolation;

/// Raw registration payload, before schema validation.
///
/// Fields default to empty so a missing field surfaces as a per-field
/// validation error rather than a payload-parse failure.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
  #[serde(default)]
  pub name: String,

  #[serde(default)]
  pub email: String,

  #[serde(default)]
  pub password: String,

  #[serde(default)]
  pub confirm_password: String,

  /// Client agent string; accepted but unused
  #[serde(default)]
  pub user_agent: Option<String>,
}

/// Response after successful user registration
#[derive(Debug, Clone, Serialize)]
pub struct RegisterResponse {
  /// Success message
  pub message: String,

  /// Safe projection of the created user
  pub data: User,
}

/// Standard error response.
///
/// All error payloads share this shape; absent parts are omitted from the
/// JSON so each error kind renders only its own fields.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ErrorResponse {
  /// Human-readable error message
  pub message: String,

  /// Machine-readable error code
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error_code: Option<ErrorCode>,

  /// Per-field validation violations
  #[serde(skip_serializing_if = "Option::is_none")]
  pub errors: Option<Vec<FieldViolation>>,

  /// Underlying error detail, exposed outside production only
  #[serde(skip_serializing_if = "Option::is_none")]
  pub error: Option<String>,
}

impl ErrorResponse {
  /// A bare message-only error body
  pub fn message(message: impl Into<String>) -> Self {
    Self {
      message: message.into(),
      error_code: None,
      errors: None,
      error: None,
    }
  }
}
