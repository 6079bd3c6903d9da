//! Application configuration loading from config.toml
//!
//! This module provides the non-secret settings of the storefront: server URLs used
//! for payment redirects, the cart decrement floor, token lifetime, gateway mode, and
//! the categories and admin accounts seeded on startup. Every section has defaults, so
//! a partial (or missing) config.toml is valid.

use crate::errors::{Error, Result};
use serde::Deserialize;
use std::path::Path;

/// Configuration structure representing the entire config.toml file
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct AppConfig {
    /// Listening port and public URLs
    pub server: ServerConfig,
    /// Cart quantity rules
    pub cart: CartConfig,
    /// Token settings
    pub auth: AuthConfig,
    /// Hosted payment gateway settings
    pub gateway: GatewayConfig,
    /// Categories to seed
    pub categories: Vec<CategoryConfig>,
    /// Emails promoted to the admin role on startup
    pub admins: Vec<String>,
}

/// Server settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ServerConfig {
    /// TCP port to listen on (overridden by `PORT`)
    pub port: u16,
    /// Base URL of this API, used to build gateway callback URLs
    pub public_url: String,
    /// Base URL of the storefront client, used for post-payment redirects
    pub client_url: String,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            port: 5000,
            public_url: "http://localhost:5000".to_string(),
            client_url: "http://localhost:5173".to_string(),
        }
    }
}

/// Cart settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CartConfig {
    /// A decrement applies only while the line quantity is strictly above this value
    pub decrement_floor: i64,
}

impl Default for CartConfig {
    fn default() -> Self {
        Self { decrement_floor: 1 }
    }
}

/// Token settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct AuthConfig {
    /// Lifetime of issued tokens
    pub token_ttl_hours: i64,
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_ttl_hours: 24,
        }
    }
}

/// Hosted payment gateway settings
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Live endpoint when true, sandbox otherwise
    pub is_live: bool,
    /// Currency code sent with every session
    pub currency: String,
    /// Instant payment notification URL handed to the gateway
    pub ipn_url: Option<String>,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            is_live: false,
            currency: "USD".to_string(),
            ipn_url: None,
        }
    }
}

/// Configuration for a single seeded category
#[derive(Debug, Deserialize, Clone)]
pub struct CategoryConfig {
    /// Category name
    pub name: String,
    /// Optional banner image
    #[serde(default)]
    pub image: Option<String>,
}

impl AppConfig {
    /// URL the gateway calls back for a given outcome of a checkout.
    #[must_use]
    pub fn callback_url(&self, outcome: &str, tran_id: &str) -> String {
        format!(
            "{}/payment/{outcome}/{tran_id}",
            self.server.public_url.trim_end_matches('/')
        )
    }

    /// Storefront page the buyer lands on after a payment outcome.
    #[must_use]
    pub fn client_redirect_url(&self, outcome: &str, tran_id: &str) -> String {
        format!(
            "{}/payment/{outcome}/{tran_id}",
            self.server.client_url.trim_end_matches('/')
        )
    }

    /// Applies `PORT` from the environment over the configured port.
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(port) = std::env::var("PORT") {
            self.server.port = port.parse().map_err(|e| Error::Config {
                message: format!("Invalid PORT value '{port}': {e}"),
            })?;
        }
        Ok(())
    }
}

/// Loads configuration from a TOML file
///
/// # Errors
/// Returns an error if:
/// - The file cannot be read
/// - The TOML syntax is invalid
pub fn load_config<P: AsRef<Path>>(path: P) -> Result<AppConfig> {
    let contents = std::fs::read_to_string(path.as_ref()).map_err(|e| Error::Config {
        message: format!("Failed to read config file: {e}"),
    })?;

    toml::from_str(&contents).map_err(|e| Error::Config {
        message: format!("Failed to parse config.toml: {e}"),
    })
}

/// Loads configuration from the default location (./config.toml), falling back to
/// defaults when the file does not exist.
pub fn load_default_config() -> Result<AppConfig> {
    let path = Path::new("config.toml");
    if !path.exists() {
        tracing::warn!("config.toml not found, using default settings");
        return Ok(AppConfig::default());
    }
    load_config(path)
}

#[cfg(test)]
mod tests {
    #![allow(clippy::unwrap_used)]
    use super::*;

    #[test]
    fn test_parse_full_config() {
        let toml_str = r#"
            admins = ["boss@example.com"]

            [server]
            port = 8080
            public_url = "https://api.example.com/"
            client_url = "https://shop.example.com"

            [cart]
            decrement_floor = 0

            [gateway]
            is_live = true
            currency = "BDT"

            [[categories]]
            name = "Phones"

            [[categories]]
            name = "Laptops"
            image = "https://img.example.com/laptops.png"
        "#;

        let config: AppConfig = toml::from_str(toml_str).unwrap();
        assert_eq!(config.server.port, 8080);
        assert_eq!(config.cart.decrement_floor, 0);
        assert!(config.gateway.is_live);
        assert_eq!(config.gateway.currency, "BDT");
        assert_eq!(config.admins, vec!["boss@example.com".to_string()]);
        assert_eq!(config.categories.len(), 2);
        assert!(config.categories[0].image.is_none());
        assert_eq!(
            config.categories[1].image.as_deref(),
            Some("https://img.example.com/laptops.png")
        );
        // Auth section omitted entirely
        assert_eq!(config.auth.token_ttl_hours, 24);
    }

    #[test]
    fn test_empty_config_uses_defaults() {
        let config: AppConfig = toml::from_str("").unwrap();
        assert_eq!(config.server.port, 5000);
        assert_eq!(config.cart.decrement_floor, 1);
        assert!(!config.gateway.is_live);
        assert!(config.categories.is_empty());
    }

    #[test]
    fn test_redirect_urls() {
        let mut config = AppConfig::default();
        config.server.public_url = "https://api.example.com/".to_string();

        assert_eq!(
            config.callback_url("success", "trx1"),
            "https://api.example.com/payment/success/trx1"
        );
        assert_eq!(
            config.client_redirect_url("fail", "trx1"),
            "http://localhost:5173/payment/fail/trx1"
        );
    }

    #[test]
    fn test_load_config_missing_file() {
        let result = load_config("does/not/exist.toml");
        assert!(matches!(result.unwrap_err(), Error::Config { message: _ }));
    }
}
