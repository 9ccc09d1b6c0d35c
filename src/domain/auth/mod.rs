pub mod entities;
pub mod errors;
pub mod ports;
pub mod services;
pub mod value_objects;

// Re-export commonly used types
pub use entities::{User, UserPreferences};
pub use errors::{DomainError, DomainErrorKind, ErrorCode, HashError, RepositoryError};
pub use services::{AuthService, RegistrationData};
pub use value_objects::{Email, Password, PasswordHash};
