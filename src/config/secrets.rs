//! Secret settings loaded from environment variables.
//!
//! Secrets never live in config.toml. They are read from the process environment,
//! which `main` populates from `.env` via `dotenvy` before anything else runs.

/// Credentials for token signing and the payment providers.
#[derive(Clone, Default)]
pub struct Secrets {
    /// HMAC secret for bearer tokens (`ACCESS_TOKEN_SECRET`)
    pub access_token_secret: String,
    /// Hosted gateway store id (`STORE_ID`)
    pub store_id: String,
    /// Hosted gateway store password (`STORE_PASS`)
    pub store_passwd: String,
    /// Card payment provider secret key (`PAYMENT_SECRET_KEY`)
    pub payment_secret_key: String,
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("access_token_secret", &"<redacted>")
            .field("store_id", &self.store_id)
            .field("store_passwd", &"<redacted>")
            .field("payment_secret_key", &"<redacted>")
            .finish()
    }
}

impl Secrets {
    /// Reads all secrets from the environment.
    ///
    /// `ACCESS_TOKEN_SECRET` is required; without it no route behind authentication
    /// could ever succeed. The payment credentials are optional so the catalogue can
    /// run without a configured provider; calls to the provider will then fail.
    pub fn from_env() -> crate::errors::Result<Self> {
        let access_token_secret = std::env::var("ACCESS_TOKEN_SECRET")
            .inspect_err(|e| tracing::error!("ACCESS_TOKEN_SECRET not found: {}", e))?;

        let optional = |key: &str| {
            std::env::var(key).unwrap_or_else(|_| {
                tracing::warn!("{key} is not set, payment calls will be rejected");
                String::new()
            })
        };

        Ok(Self {
            access_token_secret,
            store_id: optional("STORE_ID"),
            store_passwd: optional("STORE_PASS"),
            payment_secret_key: optional("PAYMENT_SECRET_KEY"),
        })
    }
}
