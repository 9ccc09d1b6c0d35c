use std::sync::Arc;

use super::entities::User;
use super::errors::{DomainError, ErrorCode, RepositoryError};
use super::ports::{PasswordHasher, UserRepository};
use super::value_objects::{Email, Password};

/// Validated registration input.
///
/// Produced by the request schema: `name` is trimmed and the value objects are
/// already parsed, so nothing downstream re-validates.
#[derive(Debug, Clone)]
pub struct RegistrationData {
  /// User's display name
  pub name: String,
  /// User's email address, normalized
  pub email: Email,
  /// User's plaintext password, to be hashed
  pub password: Password,
}

/// Authentication service implementing core business logic
pub struct AuthService {
  user_repo: Arc<dyn UserRepository>,
  password_hasher: Arc<dyn PasswordHasher>,
}

impl AuthService {
  /// Creates a new instance of AuthService
  pub fn new(user_repo: Arc<dyn UserRepository>, password_hasher: Arc<dyn PasswordHasher>) -> Self {
    Self {
      user_repo,
      password_hasher,
    }
  }

  /// Registers a new user.
  ///
  /// Checks the email for prior use, hashes the password, and persists the
  /// record with a single create call. The existence check is advisory; the
  /// store's unique index is the authoritative guard, and a duplicate-key
  /// failure from it maps to the same error as the pre-check.
  ///
  /// # Errors
  ///
  /// Returns a `BadRequest` with code `AUTH_EMAIL_ALREADY_EXISTS` when the
  /// email is taken; store or hashing failures surface as internal errors.
  pub async fn register(&self, data: RegistrationData) -> Result<User, DomainError> {
    if self.user_repo.exists_by_email(&data.email).await? {
      return Err(email_already_exists());
    }

    let password_hash = self.password_hasher.hash(&data.password).await?;

    let user = User::new(data.name, data.email.into_inner(), password_hash.into_inner());

    match self.user_repo.create(user).await {
      Ok(created) => Ok(created),
      Err(RepositoryError::DuplicateKey(_)) => Err(email_already_exists()),
      Err(e) => Err(e.into()),
    }
  }
}

fn email_already_exists() -> DomainError {
  DomainError::bad_request("Email already exists").with_code(ErrorCode::AuthEmailAlreadyExists)
}
