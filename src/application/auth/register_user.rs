use std::sync::Arc;

use crate::domain::auth::entities::User;
use crate::domain::auth::errors::DomainError;
use crate::domain::auth::services::{AuthService, RegistrationData};

/// Use case for registering a new user
pub struct RegisterUserUseCase {
  auth_service: Arc<AuthService>,
}

impl RegisterUserUseCase {
  /// Creates a new instance of RegisterUserUseCase
  pub fn new(auth_service: Arc<AuthService>) -> Self {
    Self { auth_service }
  }

  /// Executes the registration use case.
  ///
  /// # Errors
  ///
  /// Returns a `DomainError` if registration fails (e.g. the email is already
  /// registered).
  pub async fn execute(&self, registration: RegistrationData) -> Result<User, DomainError> {
    self.auth_service.register(registration).await
  }
}
