use actix_web::{HttpResponse, web};
use std::sync::Arc;

use crate::adapters::http::{
  dtos::{RegisterRequest, RegisterResponse},
  errors::ApiError,
  validation::validate_registration,
};
use crate::application::auth::RegisterUserUseCase;

/// Handler for user registration
///
/// POST /register
/// Body: RegisterRequest (JSON)
/// Response: RegisterResponse (JSON) with status 201
///
/// The handler carries no business logic: it validates the payload against
/// the registration schema, hands the coerced value to the use case, and
/// lets any failure fall through to the error normalizer.
pub async fn register_handler(
  request: web::Json<RegisterRequest>,
  use_case: web::Data<Arc<RegisterUserUseCase>>,
) -> Result<HttpResponse, ApiError> {
  let request = request.into_inner();
  let registration = validate_registration(&request)?;

  let user = use_case.execute(registration).await?;

  Ok(HttpResponse::Created().json(RegisterResponse {
    message: "User created successfully".to_string(),
    data: user,
  }))
}
