pub mod dtos;
pub mod errors;
pub mod handlers;
pub mod middleware;
pub mod routes;
pub mod validation;

// Re-export commonly used types
pub use dtos::{ErrorResponse, RegisterRequest, RegisterResponse};
pub use errors::{ApiError, set_expose_internal_errors};
pub use middleware::ErrorLogger;
pub use routes::configure_routes;
pub use validation::{FieldViolation, SchemaError, validate_registration};
