//! End-to-end tests for the registration pipeline: schema validation, the
//! register flow, and the error normalizer, run against the same route
//! configuration `main` uses, with an in-memory user repository standing in
//! for Postgres.

use actix_web::body::BoxBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::http::{StatusCode, header};
use actix_web::test::{self, TestRequest};
use actix_web::App;
use async_trait::async_trait;
use serde_json::{Value, json};
use std::sync::{Arc, Mutex};

use authcore::adapters::http::{ErrorLogger, configure_routes};
use authcore::application::auth::RegisterUserUseCase;
use authcore::domain::auth::entities::User;
use authcore::domain::auth::errors::RepositoryError;
use authcore::domain::auth::ports::UserRepository;
use authcore::domain::auth::services::AuthService;
use authcore::domain::auth::value_objects::Email;
use authcore::infrastructure::security::Pbkdf2PasswordHasher;

/// In-memory stand-in for the Postgres repository; enforces the same email
/// uniqueness contract, including the duplicate-key failure on create.
struct InMemoryUserRepository {
  users: Mutex<Vec<User>>,
}

impl InMemoryUserRepository {
  fn new() -> Self {
    Self {
      users: Mutex::new(Vec::new()),
    }
  }

  fn stored(&self) -> Vec<User> {
    self.users.lock().unwrap().clone()
  }
}

#[async_trait]
impl UserRepository for InMemoryUserRepository {
  async fn exists_by_email(&self, email: &Email) -> Result<bool, RepositoryError> {
    Ok(
      self
        .users
        .lock()
        .unwrap()
        .iter()
        .any(|u| u.email == email.as_str()),
    )
  }

  async fn create(&self, user: User) -> Result<User, RepositoryError> {
    let mut users = self.users.lock().unwrap();
    if users.iter().any(|u| u.email == user.email) {
      return Err(RepositoryError::DuplicateKey("users_email_key".to_string()));
    }
    users.push(user.clone());
    Ok(user)
  }
}

fn build_app(
  repo: Arc<InMemoryUserRepository>,
) -> App<
  impl ServiceFactory<
    ServiceRequest,
    Config = (),
    Response = ServiceResponse<BoxBody>,
    Error = actix_web::Error,
    InitError = (),
  >,
> {
  let service = Arc::new(AuthService::new(repo, Arc::new(Pbkdf2PasswordHasher::new())));
  let use_case = Arc::new(RegisterUserUseCase::new(service));

  App::new()
    .wrap(ErrorLogger::new())
    .configure(move |cfg| configure_routes(cfg, use_case.clone()))
}

fn valid_payload() -> Value {
  json!({
    "name": "Al",
    "email": "a@b.com",
    "password": "Abc12345!",
    "confirmPassword": "Abc12345!"
  })
}

#[actix_web::test]
async fn register_returns_created_user() {
  let repo = Arc::new(InMemoryUserRepository::new());
  let app = test::init_service(build_app(repo.clone())).await;

  let req = TestRequest::post()
    .uri("/register")
    .set_json(valid_payload())
    .to_request();
  let resp = test::call_service(&app, req).await;

  assert_eq!(resp.status(), StatusCode::CREATED);

  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["message"], "User created successfully");
  assert_eq!(body["data"]["email"], "a@b.com");
  assert!(body["data"]["id"].is_string());
  assert_eq!(body["data"]["isEmailVerified"], false);
  assert_eq!(body["data"]["userPreferences"]["enable2FA"], false);

  // The safe projection never carries secrets
  assert!(body["data"].get("password").is_none());
  assert!(body["data"]["userPreferences"].get("twoFactorSecret").is_none());
}

#[actix_web::test]
async fn register_stores_salted_hash_not_plaintext() {
  let repo = Arc::new(InMemoryUserRepository::new());
  let app = test::init_service(build_app(repo.clone())).await;

  let req = TestRequest::post()
    .uri("/register")
    .set_json(valid_payload())
    .to_request();
  test::call_service(&app, req).await;

  let stored = repo.stored();
  assert_eq!(stored.len(), 1);
  assert_ne!(stored[0].password, "Abc12345!");
  let (salt, digest) = stored[0].password.split_once(':').unwrap();
  assert_eq!(salt.len(), 32);
  assert_eq!(digest.len(), 128);
}

#[actix_web::test]
async fn repeated_registration_is_rejected() {
  let repo = Arc::new(InMemoryUserRepository::new());
  let app = test::init_service(build_app(repo.clone())).await;

  let first = TestRequest::post()
    .uri("/register")
    .set_json(valid_payload())
    .to_request();
  assert_eq!(
    test::call_service(&app, first).await.status(),
    StatusCode::CREATED
  );

  let second = TestRequest::post()
    .uri("/register")
    .set_json(valid_payload())
    .to_request();
  let resp = test::call_service(&app, second).await;

  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["message"], "Email already exists");
  assert_eq!(body["errorCode"], "AUTH_EMAIL_ALREADY_EXISTS");

  // No second record was written
  assert_eq!(repo.stored().len(), 1);
}

#[actix_web::test]
async fn email_uniqueness_is_case_insensitive() {
  let repo = Arc::new(InMemoryUserRepository::new());
  let app = test::init_service(build_app(repo.clone())).await;

  let mut payload = valid_payload();
  payload["email"] = json!("A@B.com");
  let first = TestRequest::post()
    .uri("/register")
    .set_json(payload)
    .to_request();
  assert_eq!(
    test::call_service(&app, first).await.status(),
    StatusCode::CREATED
  );

  let second = TestRequest::post()
    .uri("/register")
    .set_json(valid_payload())
    .to_request();
  let resp = test::call_service(&app, second).await;

  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["errorCode"], "AUTH_EMAIL_ALREADY_EXISTS");
}

#[actix_web::test]
async fn weak_password_lists_every_violation() {
  let repo = Arc::new(InMemoryUserRepository::new());
  let app = test::init_service(build_app(repo.clone())).await;

  let mut payload = valid_payload();
  payload["password"] = json!("short");
  payload["confirmPassword"] = json!("short");
  let req = TestRequest::post()
    .uri("/register")
    .set_json(payload)
    .to_request();
  let resp = test::call_service(&app, req).await;

  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body["message"], "Validation failed");

  let messages: Vec<&str> = body["errors"]
    .as_array()
    .unwrap()
    .iter()
    .map(|e| e["message"].as_str().unwrap())
    .collect();
  assert!(messages.contains(&"Password must be at least 8 characters long"));
  assert!(messages.contains(&"Password must contain at least one uppercase letter"));
  assert!(messages.contains(&"Password must contain at least one number"));
  assert!(messages.contains(&"Password must contain at least one special character"));

  assert!(repo.stored().is_empty());
}

#[actix_web::test]
async fn mismatched_confirmation_is_reported_on_confirm_field() {
  let repo = Arc::new(InMemoryUserRepository::new());
  let app = test::init_service(build_app(repo.clone())).await;

  let mut payload = valid_payload();
  payload["confirmPassword"] = json!("Different1!");
  let req = TestRequest::post()
    .uri("/register")
    .set_json(payload)
    .to_request();
  let resp = test::call_service(&app, req).await;

  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  let errors = body["errors"].as_array().unwrap();
  assert!(
    errors
      .iter()
      .any(|e| e["field"] == "confirmPassword" && e["message"] == "Passwords do not match")
  );
}

#[actix_web::test]
async fn malformed_json_yields_generic_bad_request() {
  let repo = Arc::new(InMemoryUserRepository::new());
  let app = test::init_service(build_app(repo.clone())).await;

  let req = TestRequest::post()
    .uri("/register")
    .insert_header((header::CONTENT_TYPE, "application/json"))
    .set_payload("{\"name\": ")
    .to_request();
  let resp = test::call_service(&app, req).await;

  assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  let body: Value = test::read_body_json(resp).await;
  assert_eq!(body, json!({"message": "Invalid request body"}));
}

#[actix_web::test]
async fn unknown_route_reports_requested_path() {
  let repo = Arc::new(InMemoryUserRepository::new());
  let app = test::init_service(build_app(repo.clone())).await;

  let resp = test::call_service(&app, TestRequest::get().uri("/nope").to_request()).await;

  assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  let body: Value = test::read_body_json(resp).await;
  assert!(body["message"].as_str().unwrap().contains("/nope"));
  assert_eq!(body["errorCode"], "RESOURCE_NOT_FOUND");
}

#[actix_web::test]
async fn health_endpoint_reports_ok() {
  let repo = Arc::new(InMemoryUserRepository::new());
  let app = test::init_service(build_app(repo)).await;

  let resp = test::call_service(&app, TestRequest::get().uri("/health").to_request()).await;

  assert_eq!(resp.status(), StatusCode::OK);
  assert_eq!(test::read_body(resp).await, "OK");
}

#[actix_web::test]
async fn user_agent_is_accepted_and_ignored() {
  let repo = Arc::new(InMemoryUserRepository::new());
  let app = test::init_service(build_app(repo.clone())).await;

  let mut payload = valid_payload();
  payload["userAgent"] = json!("integration-test/1.0");
  let req = TestRequest::post()
    .uri("/register")
    .set_json(payload)
    .to_request();
  let resp = test::call_service(&app, req).await;

  assert_eq!(resp.status(), StatusCode::CREATED);
  assert_eq!(repo.stored().len(), 1);
}
