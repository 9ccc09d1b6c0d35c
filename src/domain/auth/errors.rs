use serde::Serialize;
use std::fmt;
use thiserror::Error;

/// Machine-readable error codes exposed to API clients.
///
/// Serialized in SCREAMING_SNAKE_CASE, e.g. `AUTH_EMAIL_ALREADY_EXISTS`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
  AuthEmailAlreadyExists,
  ResourceNotFound,
  AccessUnauthorized,
  InternalServerError,
  ValidationError,
}

impl ErrorCode {
  /// Returns the wire representation of the code
  pub fn as_str(&self) -> &'static str {
    match self {
      ErrorCode::AuthEmailAlreadyExists => "AUTH_EMAIL_ALREADY_EXISTS",
      ErrorCode::ResourceNotFound => "RESOURCE_NOT_FOUND",
      ErrorCode::AccessUnauthorized => "ACCESS_UNAUTHORIZED",
      ErrorCode::InternalServerError => "INTERNAL_SERVER_ERROR",
      ErrorCode::ValidationError => "VALIDATION_ERROR",
    }
  }
}

impl fmt::Display for ErrorCode {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str(self.as_str())
  }
}

/// Failure kind of a [`DomainError`]; determines the HTTP status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DomainErrorKind {
  NotFound,
  BadRequest,
  Unauthorized,
  InternalServer,
  /// Generic HTTP failure with a caller-supplied status
  Http(u16),
}

/// A typed business-rule or request-shape failure.
///
/// Immutable once constructed; it propagates up the call stack untouched until
/// the HTTP error normalizer turns it into a response. Components must never
/// catch and swallow one of these.
#[derive(Debug, Clone, Error)]
#[error("{message}")]
pub struct DomainError {
  pub kind: DomainErrorKind,
  pub message: String,
  pub code: Option<ErrorCode>,
}

impl DomainError {
  /// 404 with the `RESOURCE_NOT_FOUND` code
  pub fn not_found(message: impl Into<String>) -> Self {
    Self {
      kind: DomainErrorKind::NotFound,
      message: message.into(),
      code: Some(ErrorCode::ResourceNotFound),
    }
  }

  /// 400; the machine code is caller-supplied via [`DomainError::with_code`]
  pub fn bad_request(message: impl Into<String>) -> Self {
    Self {
      kind: DomainErrorKind::BadRequest,
      message: message.into(),
      code: None,
    }
  }

  /// 401 with the `ACCESS_UNAUTHORIZED` code
  pub fn unauthorized(message: impl Into<String>) -> Self {
    Self {
      kind: DomainErrorKind::Unauthorized,
      message: message.into(),
      code: Some(ErrorCode::AccessUnauthorized),
    }
  }

  /// 500 with the `INTERNAL_SERVER_ERROR` code
  pub fn internal(message: impl Into<String>) -> Self {
    Self {
      kind: DomainErrorKind::InternalServer,
      message: message.into(),
      code: Some(ErrorCode::InternalServerError),
    }
  }

  /// Generic failure with a caller-supplied status
  pub fn http(status: u16, message: impl Into<String>) -> Self {
    Self {
      kind: DomainErrorKind::Http(status),
      message: message.into(),
      code: None,
    }
  }

  /// Replaces the machine code
  pub fn with_code(mut self, code: ErrorCode) -> Self {
    self.code = Some(code);
    self
  }

  /// HTTP status associated with this error
  pub fn status(&self) -> u16 {
    match self.kind {
      DomainErrorKind::NotFound => 404,
      DomainErrorKind::BadRequest => 400,
      DomainErrorKind::Unauthorized => 401,
      DomainErrorKind::InternalServer => 500,
      DomainErrorKind::Http(status) => status,
    }
  }
}

/// Repository-related errors
#[derive(Debug, Error)]
pub enum RepositoryError {
  #[error("Database connection failed: {0}")]
  ConnectionFailed(String),

  #[error("Query execution failed: {0}")]
  QueryFailed(String),

  #[error("Duplicate key violation: {0}")]
  DuplicateKey(String),

  #[error("Database error: {0}")]
  DatabaseError(String),
}

/// Password hashing and verification errors
#[derive(Debug, Error)]
pub enum HashError {
  #[error("Failed to hash password: {0}")]
  HashingFailed(String),

  #[error("Failed to verify password: {0}")]
  VerificationFailed(String),

  #[error("Invalid hash format")]
  InvalidFormat,
}

// Automatic conversions from external error types

impl From<sqlx::Error> for RepositoryError {
  fn from(error: sqlx::Error) -> Self {
    match error {
      sqlx::Error::Database(db_err) => {
        if db_err.is_unique_violation() {
          RepositoryError::DuplicateKey(db_err.message().to_string())
        } else {
          RepositoryError::DatabaseError(db_err.message().to_string())
        }
      }
      sqlx::Error::PoolTimedOut => RepositoryError::ConnectionFailed("Pool timed out".to_string()),
      sqlx::Error::PoolClosed => RepositoryError::ConnectionFailed("Pool closed".to_string()),
      _ => RepositoryError::QueryFailed(error.to_string()),
    }
  }
}

impl From<RepositoryError> for DomainError {
  fn from(error: RepositoryError) -> Self {
    match error {
      // The store's unique index fired on a race between the advisory
      // existence check and the create.
      RepositoryError::DuplicateKey(_) => DomainError::bad_request("Email already exists")
        .with_code(ErrorCode::AuthEmailAlreadyExists),
      other => DomainError::internal(other.to_string()),
    }
  }
}

impl From<HashError> for DomainError {
  fn from(error: HashError) -> Self {
    DomainError::internal(error.to_string())
  }
}
