/// Application settings loaded from config.toml
pub mod app;

/// Database configuration and connection management
pub mod database;

/// Secrets loaded from environment variables
pub mod secrets;

pub use app::{AppConfig, load_config, load_default_config};
pub use secrets::Secrets;
