// print_shop/src/config.rs

use crate::errors::{AppError, Result};
use dotenvy::dotenv;
use std::env;
use std::fmt;
use std::path::PathBuf;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogFormat {
  Pretty,
  Json,
}

#[derive(Clone)]
pub struct AppConfig {
  pub server_host: String,
  pub server_port: u16,
  pub database_url: String,
  pub db_max_connections: u32,
  pub run_migrations: bool,

  /// HS256 signing secret for session tokens.
  pub jwt_secret: String,

  pub upload_dir: PathBuf,
  pub max_upload_bytes: usize,

  /// Enables the shop-side status endpoint when set.
  pub shop_api_key: Option<String>,

  pub log_format: LogFormat,
}

impl fmt::Debug for AppConfig {
  fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
    f.debug_struct("AppConfig")
      .field("server_host", &self.server_host)
      .field("server_port", &self.server_port)
      .field("database_url", &"[REDACTED]")
      .field("db_max_connections", &self.db_max_connections)
      .field("run_migrations", &self.run_migrations)
      .field("jwt_secret", &"[REDACTED]")
      .field("upload_dir", &self.upload_dir)
      .field("max_upload_bytes", &self.max_upload_bytes)
      .field("shop_api_key", &self.shop_api_key.as_ref().map(|_| "[REDACTED]"))
      .field("log_format", &self.log_format)
      .finish()
  }
}

const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

impl AppConfig {
  pub fn from_env() -> Result<Self> {
    dotenv().ok(); // Load .env file if present
    Self::from_lookup(|name| env::var(name).ok())
  }

  /// Builds the config from any variable source; `from_env` passes the process environment.
  pub fn from_lookup<F>(lookup: F) -> Result<Self>
  where
    F: Fn(&str) -> Option<String>,
  {
    let get_env = |var_name: &str| {
      lookup(var_name)
        .filter(|v| !v.trim().is_empty())
        .ok_or_else(|| AppError::Config(format!("Missing environment variable '{}'", var_name)))
    };
    let get_or = |var_name: &str, default: &str| get_env(var_name).unwrap_or_else(|_| default.to_string());

    let server_host = get_or("SERVER_HOST", "127.0.0.1");
    let server_port = get_or("SERVER_PORT", "3000")
      .parse::<u16>()
      .map_err(|e| AppError::Config(format!("Invalid SERVER_PORT: {}", e)))?;
    let database_url = get_env("DATABASE_URL")?;
    let db_max_connections = get_or("DB_MAX_CONNECTIONS", "10")
      .parse::<u32>()
      .map_err(|e| AppError::Config(format!("Invalid DB_MAX_CONNECTIONS: {}", e)))?;
    let run_migrations = get_or("RUN_MIGRATIONS", "true")
      .parse::<bool>()
      .map_err(|e| AppError::Config(format!("Invalid RUN_MIGRATIONS value: {}", e)))?;

    let jwt_secret = get_env("JWT_SECRET")?;

    let upload_dir = PathBuf::from(get_or("UPLOAD_DIR", "uploads"));
    let max_upload_bytes = match get_env("MAX_UPLOAD_BYTES") {
      Ok(raw) => raw
        .parse::<usize>()
        .map_err(|e| AppError::Config(format!("Invalid MAX_UPLOAD_BYTES: {}", e)))?,
      Err(_) => DEFAULT_MAX_UPLOAD_BYTES,
    };

    let shop_api_key = get_env("SHOP_API_KEY").ok();

    let log_format = match get_or("LOG_FORMAT", "pretty").to_ascii_lowercase().as_str() {
      "pretty" => LogFormat::Pretty,
      "json" => LogFormat::Json,
      other => return Err(AppError::Config(format!("Invalid LOG_FORMAT '{}': expected 'pretty' or 'json'", other))),
    };

    Ok(Self {
      server_host,
      server_port,
      database_url,
      db_max_connections,
      run_migrations,
      jwt_secret,
      upload_dir,
      max_upload_bytes,
      shop_api_key,
      log_format,
    })
  }

  pub fn bind_address(&self) -> String {
    format!("{}:{}", self.server_host, self.server_port)
  }
}
