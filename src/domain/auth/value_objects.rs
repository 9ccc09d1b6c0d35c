use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;
use validator::ValidateEmail;
use zeroize::{Zeroize, ZeroizeOnDrop};

#[derive(Debug, Error)]
pub enum ValueObjectError {
  #[error("Invalid email format: {0}")]
  InvalidEmail(String),

  #[error("Password is too short (minimum 8 characters)")]
  PasswordTooShort,

  #[error("Invalid password hash format")]
  InvalidPasswordHash,
}

// ============================================================================
// Email Value Object
// ============================================================================

/// A syntactically valid email address, normalized to lowercase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Email(String);

impl Email {
  /// Creates a new Email after validation
  pub fn new(email: impl Into<String>) -> Result<Self, ValueObjectError> {
    let email = email.into();

    if !email.validate_email() {
      return Err(ValueObjectError::InvalidEmail(email));
    }

    // Normalize to lowercase so lookups are case-insensitive
    Ok(Self(email.to_lowercase()))
  }

  /// Returns the email as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for Email {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}

impl AsRef<str> for Email {
  fn as_ref(&self) -> &str {
    &self.0
  }
}

// ============================================================================
// Password Value Object (Plain Password - Never Stored)
// ============================================================================

/// A plaintext password in transit between validation and hashing.
///
/// Never serialized, never logged; the backing memory is wiped on drop.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct Password(String);

impl Password {
  const MIN_LENGTH: usize = 8;

  /// Creates a new Password after validation
  pub fn new(password: impl Into<String>) -> Result<Self, ValueObjectError> {
    let password = password.into();

    if password.len() < Self::MIN_LENGTH {
      return Err(ValueObjectError::PasswordTooShort);
    }

    Ok(Self(password))
  }

  /// Returns the password as a string slice (use with caution)
  pub fn as_str(&self) -> &str {
    &self.0
  }
}

// Implement Debug without exposing the password
impl fmt::Debug for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("Password(***)")
  }
}

// Implement Display without exposing the password
impl fmt::Display for Password {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.write_str("***")
  }
}

// ============================================================================
// PasswordHash Value Object (salt:hash Stored Form)
// ============================================================================

/// The stored form of a derived password: `hex(salt):hex(digest)`.
///
/// The salt is 16 bytes (32 hex characters) and the digest 64 bytes
/// (128 hex characters).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordHash(String);

impl PasswordHash {
  const SALT_HEX_LEN: usize = 32;
  const DIGEST_HEX_LEN: usize = 128;

  /// Creates a PasswordHash from an existing stored string
  pub fn from_hash(hash: impl Into<String>) -> Result<Self, ValueObjectError> {
    let hash = hash.into();

    let Some((salt, digest)) = hash.split_once(':') else {
      return Err(ValueObjectError::InvalidPasswordHash);
    };

    let well_formed = |part: &str, len: usize| {
      part.len() == len && part.chars().all(|c| c.is_ascii_hexdigit())
    };

    if !well_formed(salt, Self::SALT_HEX_LEN) || !well_formed(digest, Self::DIGEST_HEX_LEN) {
      return Err(ValueObjectError::InvalidPasswordHash);
    }

    Ok(Self(hash))
  }

  /// Splits the stored form into its `(salt, digest)` hex parts
  pub fn parts(&self) -> (&str, &str) {
    // Validated at construction, the separator is always present
    self.0.split_once(':').unwrap_or((&self.0, ""))
  }

  /// Returns the stored form as a string slice
  pub fn as_str(&self) -> &str {
    &self.0
  }

  /// Consumes self and returns the inner String
  pub fn into_inner(self) -> String {
    self.0
  }
}

impl fmt::Display for PasswordHash {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    write!(f, "{}", self.0)
  }
}
