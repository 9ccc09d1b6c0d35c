use async_trait::async_trait;

use super::entities::User;
use super::errors::{HashError, RepositoryError};
use super::value_objects::{Email, Password, PasswordHash};

/// Repository trait for user persistence operations.
///
/// Email uniqueness is enforced twice: callers may pre-check with
/// [`UserRepository::exists_by_email`], and the store itself must reject a
/// duplicate `create` with [`RepositoryError::DuplicateKey`].
#[async_trait]
pub trait UserRepository: Send + Sync {
  /// Checks whether a user with the given email already exists
  async fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError>;

  /// Creates a new user in the repository
  async fn create(&self, user: User) -> Result<User, RepositoryError>;
}

/// Service trait for password hashing operations
#[async_trait]
pub trait PasswordHasher: Send + Sync {
  /// Derives a stored hash from a plain text password
  async fn hash(&self, password: &Password) -> Result<PasswordHash, HashError>;

  /// Verifies a plain text password against a stored hash
  async fn verify(&self, password: &Password, stored: &PasswordHash) -> Result<bool, HashError>;
}
