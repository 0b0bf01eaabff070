//! Application configuration.
//!
//! Values come from the environment (a `.env` file is loaded when present).
//! The model-API token is required; everything else has a default.

use std::path::PathBuf;

// ==================== Server Configuration ====================

/// Server address to bind to
pub const SERVER_ADDR: &str = "0.0.0.0";

/// Default server port when PORT is not set
pub const DEFAULT_PORT: u16 = 3000;

// ==================== Database Configuration ====================

/// Default database path when DATABASE_PATH is not set
pub const DEFAULT_DATABASE_PATH: &str = "data/vocab.db";

// ==================== Query Limits ====================

/// Cap on word listings and search results (no pagination)
pub const WORD_LIST_CAP: i64 = 100;

/// Configuration error raised at startup
#[derive(Debug)]
pub enum ConfigError {
  MissingVar(&'static str),
  InvalidPort(String),
}

impl std::fmt::Display for ConfigError {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::MissingVar(name) => write!(f, "required environment variable {} is not set", name),
      Self::InvalidPort(value) => write!(f, "PORT value {:?} is not a valid port number", value),
    }
  }
}

impl std::error::Error for ConfigError {}

/// Runtime configuration resolved once at startup
#[derive(Debug, Clone)]
pub struct Config {
  pub database_path: PathBuf,
  pub port: u16,
  /// Bearer token for the text-generation endpoint (HF_TOKEN)
  pub model_token: String,
  /// Optional override for the generation endpoint URL (MODEL_ENDPOINT)
  pub model_endpoint: Option<String>,
  /// Optional override for the model identifier (MODEL_ID)
  pub model_id: Option<String>,
}

impl Config {
  /// Load configuration from `.env`/environment, failing fast on missing
  /// required values.
  pub fn load() -> Result<Self, ConfigError> {
    let _ = dotenvy::dotenv();

    let model_token =
      std::env::var("HF_TOKEN").map_err(|_| ConfigError::MissingVar("HF_TOKEN"))?;

    let database_path = match std::env::var("DATABASE_PATH") {
      Ok(path) => {
        tracing::info!("Using database from DATABASE_PATH env: {}", path);
        PathBuf::from(path)
      }
      Err(_) => PathBuf::from(DEFAULT_DATABASE_PATH),
    };

    let port = match std::env::var("PORT") {
      Ok(value) => value
        .parse::<u16>()
        .map_err(|_| ConfigError::InvalidPort(value))?,
      Err(_) => DEFAULT_PORT,
    };

    Ok(Self {
      database_path,
      port,
      model_token,
      model_endpoint: std::env::var("MODEL_ENDPOINT").ok(),
      model_id: std::env::var("MODEL_ID").ok(),
    })
  }

  /// Get the full server bind address
  pub fn bind_addr(&self) -> String {
    format!("{}:{}", SERVER_ADDR, self.port)
  }
}
