use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

/// Per-user preference flags.
///
/// The two-factor fields are inert data: nothing in the system issues or
/// consumes them, and the secret never leaves the process boundary.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
  /// Whether two-factor authentication is enabled
  #[serde(rename = "enable2FA")]
  pub enable_2fa: bool,
  /// Whether the user wants email notifications
  pub email_notification: bool,
  /// Two-factor secret, never serialized
  #[serde(skip_serializing)]
  pub two_factor_secret: Option<String>,
}

impl Default for UserPreferences {
  fn default() -> Self {
    Self {
      enable_2fa: false,
      email_notification: false,
      two_factor_secret: None,
    }
  }
}

/// User entity representing a registered account
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
  /// Unique identifier for the user
  pub id: Uuid,
  /// User's display name
  pub name: String,
  /// User's email address (unique, stored lowercase)
  pub email: String,
  /// Stored password in `salt:hash` form, never serialized
  #[serde(skip_serializing)]
  pub password: String,
  /// Whether the user's email has been verified
  pub is_email_verified: bool,
  /// Preference flags
  pub user_preferences: UserPreferences,
  /// Timestamp when the user was created
  pub created_at: DateTime<Utc>,
  /// Timestamp when the user was last updated
  pub updated_at: DateTime<Utc>,
}

impl User {
  /// Creates a new user with default preferences and an unverified email.
  ///
  /// `password` must already be the derived `salt:hash` form; plaintext never
  /// reaches the entity.
  pub fn new(name: String, email: String, password: String) -> Self {
    let now = Utc::now();
    Self {
      id: Uuid::new_v4(),
      name,
      email,
      password,
      is_email_verified: false,
      user_preferences: UserPreferences::default(),
      created_at: now,
      updated_at: now,
    }
  }

  /// Creates a user from database fields (for reconstruction)
  pub fn from_db(
    id: Uuid,
    name: String,
    email: String,
    password: String,
    is_email_verified: bool,
    user_preferences: UserPreferences,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
  ) -> Self {
    Self {
      id,
      name,
      email,
      password,
      is_email_verified,
      user_preferences,
      created_at,
      updated_at,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  fn sample_user() -> User {
    let mut user = User::new(
      "Test User".to_string(),
      "test@example.com".to_string(),
      format!("{}:{}", "ab".repeat(16), "cd".repeat(64)),
    );
    user.user_preferences.two_factor_secret = Some("super-secret".to_string());
    user
  }

  #[test]
  fn test_user_creation() {
    let user = sample_user();

    assert_eq!(user.email, "test@example.com");
    assert_eq!(user.name, "Test User");
    assert!(!user.is_email_verified);
    assert!(!user.user_preferences.enable_2fa);
    assert_eq!(user.created_at, user.updated_at);
  }

  #[test]
  fn test_serialization_omits_secrets() {
    let user = sample_user();
    let json = serde_json::to_value(&user).unwrap();

    assert!(json.get("password").is_none());
    assert!(json["userPreferences"].get("twoFactorSecret").is_none());
  }

  #[test]
  fn test_serialization_uses_wire_names() {
    let user = sample_user();
    let json = serde_json::to_value(&user).unwrap();

    assert!(json.get("id").is_some());
    assert_eq!(json["email"], "test@example.com");
    assert_eq!(json["isEmailVerified"], false);
    assert_eq!(json["userPreferences"]["enable2FA"], false);
    assert_eq!(json["userPreferences"]["emailNotification"], false);
    assert!(json.get("createdAt").is_some());
    assert!(json.get("updatedAt").is_some());
  }
}
