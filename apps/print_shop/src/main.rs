// print_shop/src/main.rs

use actix_web::{web, App, HttpServer};
use anyhow::Context;
use print_shop::config::AppConfig;
use print_shop::db::Repositories;
use print_shop::services::LocalFileStore;
use print_shop::state::AppState;
use print_shop::telemetry;
use print_shop::web::configure_app_routes;
use printshop_core::{SessionIssuer, SystemClock};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
  // Configuration first: it decides the log format.
  let app_config = Arc::new(AppConfig::from_env().context("failed to load application configuration")?);
  telemetry::init_tracing(app_config.log_format)?;

  tracing::info!(config = ?app_config, "Starting print shop server...");

  let db_pool = PgPoolOptions::new()
    .max_connections(app_config.db_max_connections)
    .connect(&app_config.database_url)
    .await
    .context("failed to connect to the database")?;
  tracing::info!("Successfully connected to the database.");

  if app_config.run_migrations {
    sqlx::migrate!("./migrations")
      .run(&db_pool)
      .await
      .context("failed to run database migrations")?;
    tracing::info!("Database migrations applied.");
  }

  let files = LocalFileStore::open(&app_config.upload_dir)
    .await
    .with_context(|| format!("failed to prepare upload directory {}", app_config.upload_dir.display()))?;
  let sessions = SessionIssuer::new(app_config.jwt_secret.as_bytes(), Arc::new(SystemClock))
    .context("failed to initialise session issuer")?;

  let app_state = web::Data::new(AppState::new(
    app_config.clone(),
    Repositories::postgres(db_pool),
    Arc::new(files),
    Arc::new(sessions),
  ));

  let server_address = app_config.bind_address();
  tracing::info!("Binding server to {}...", server_address);

  HttpServer::new(move || {
    App::new()
      .app_data(app_state.clone())
      .wrap(tracing_actix_web::TracingLogger::default())
      .configure(configure_app_routes)
  })
  .bind(&server_address)
  .with_context(|| format!("failed to bind {}", server_address))?
  .run()
  .await
  .context("server terminated with an error")
}
