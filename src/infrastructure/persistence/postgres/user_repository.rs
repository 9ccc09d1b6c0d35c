use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::auth::{
  entities::{User, UserPreferences},
  errors::RepositoryError,
  ports::UserRepository,
  value_objects::Email,
};

/// PostgreSQL implementation of the UserRepository trait.
///
/// The `users.email` column carries a unique index, so a duplicate create
/// surfaces as `RepositoryError::DuplicateKey` — the race-safe second line
/// of defense behind the service's advisory existence check.
pub struct PostgresUserRepository {
  pool: PgPool,
}

impl PostgresUserRepository {
  /// Creates a new instance of PostgresUserRepository
  pub fn new(pool: PgPool) -> Self {
    Self { pool }
  }
}

/// Database row structure for users table
#[derive(Debug, sqlx::FromRow)]
struct UserRow {
  id: Uuid,
  name: String,
  email: String,
  password: String,
  is_email_verified: bool,
  enable_2fa: bool,
  email_notification: bool,
  two_factor_secret: Option<String>,
  created_at: DateTime<Utc>,
  updated_at: DateTime<Utc>,
}

impl From<UserRow> for User {
  fn from(row: UserRow) -> Self {
    User::from_db(
      row.id,
      row.name,
      row.email,
      row.password,
      row.is_email_verified,
      UserPreferences {
        enable_2fa: row.enable_2fa,
        email_notification: row.email_notification,
        two_factor_secret: row.two_factor_secret,
      },
      row.created_at,
      row.updated_at,
    )
  }
}

#[async_trait]
impl UserRepository for PostgresUserRepository {
  async fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError> {
    let exists = sqlx::query_scalar::<_, bool>(
      r#"
            SELECT EXISTS(SELECT 1 FROM users WHERE email = $1)
            "#,
    )
    .bind(email.as_str())
    .fetch_one(&self.pool)
    .await?;

    Ok(exists)
  }

  async fn create(&self, user: User) -> Result<User, RepositoryError> {
    let result = sqlx::query_as::<_, UserRow>(
      r#"
            INSERT INTO users (
                id,
                name,
                email,
                password,
                is_email_verified,
                enable_2fa,
                email_notification,
                two_factor_secret,
                created_at,
                updated_at
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10)
            RETURNING
                id,
                name,
                email,
                password,
                is_email_verified,
                enable_2fa,
                email_notification,
                two_factor_secret,
                created_at,
                updated_at
            "#,
    )
    .bind(user.id)
    .bind(&user.name)
    .bind(&user.email)
    .bind(&user.password)
    .bind(user.is_email_verified)
    .bind(user.user_preferences.enable_2fa)
    .bind(user.user_preferences.email_notification)
    .bind(&user.user_preferences.two_factor_secret)
    .bind(user.created_at)
    .bind(user.updated_at)
    .fetch_one(&self.pool)
    .await?;

    Ok(result.into())
  }
}
