use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware::Logger};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use authcore::{
  adapters::http::{ErrorLogger, configure_routes, set_expose_internal_errors},
  application::auth::RegisterUserUseCase,
  domain::auth::services::AuthService,
  infrastructure::{
    config::Config, persistence::postgres::PostgresUserRepository,
    security::Pbkdf2PasswordHasher,
  },
};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
  // Initialize environment variables from .env file
  dotenvy::dotenv().ok();

  // Initialize tracing subscriber for logging
  tracing_subscriber::registry()
    .with(
      tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "authcore=debug,actix_web=info".into()),
    )
    .with(tracing_subscriber::fmt::layer())
    .init();

  tracing::info!("Starting authcore");

  // Load configuration; a missing or invalid required value is fatal
  let config = Config::load().expect("Failed to load configuration");
  tracing::info!("Configuration loaded successfully");

  // Internal error detail is only exposed outside production
  set_expose_internal_errors(!config.run_mode.is_production());

  // Set up database connection pool with timeout
  tracing::info!("Connecting to database");

  let db_pool = tokio::time::timeout(
    Duration::from_secs(config.database.connect_timeout_seconds),
    PgPoolOptions::new()
      .max_connections(config.database.max_connections)
      .acquire_timeout(Duration::from_secs(config.database.acquire_timeout_seconds))
      .connect(&config.database.url),
  )
  .await
  .map_err(|_| {
    tracing::error!(
      "Database connection timed out after {} seconds. Is PostgreSQL running?",
      config.database.connect_timeout_seconds
    );
    std::io::Error::new(std::io::ErrorKind::TimedOut, "database connection timed out")
  })?
  .map_err(|e| {
    tracing::error!("Failed to connect to database: {}", e);
    std::io::Error::other(format!("database error: {}", e))
  })?;

  tracing::info!("Database connection pool created");

  // Run database migrations
  tracing::info!("Running database migrations");
  sqlx::migrate!("./migrations")
    .run(&db_pool)
    .await
    .expect("Failed to run database migrations");
  tracing::info!("Database migrations completed");

  // Initialize repositories and security services
  let user_repo = Arc::new(PostgresUserRepository::new(db_pool.clone()));
  let password_hasher = Arc::new(Pbkdf2PasswordHasher::new());

  // Initialize domain service and use cases
  let auth_service = Arc::new(AuthService::new(user_repo, password_hasher));
  let register_use_case = Arc::new(RegisterUserUseCase::new(auth_service));

  let server_host = config.server.host.clone();
  let server_port = config.server.port;
  let allowed_origin = config.server.allowed_origin.clone();

  tracing::info!("Starting HTTP server on {}:{}", server_host, server_port);

  // Create and start the HTTP server
  HttpServer::new(move || {
    let cors = Cors::default()
      .allowed_origin(&allowed_origin)
      .allow_any_method()
      .allow_any_header()
      .supports_credentials();

    App::new()
      // Add CORS and request logging middleware
      .wrap(cors)
      .wrap(Logger::default())
      // Terminal error logging; registered last so it wraps the whole chain
      .wrap(ErrorLogger::new())
      // Configure routes
      .configure(|cfg| configure_routes(cfg, register_use_case.clone()))
  })
  .bind((server_host.as_str(), server_port))?
  .run()
  .await
}
