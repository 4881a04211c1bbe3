//! Application configuration management.
//!
//! Configuration comes from environment variables (optionally seeded from a
//! `.env` file) and is deserialized with `envy` into a type-safe struct.

use serde::Deserialize;

/// Application configuration loaded from environment variables.
///
/// # Environment Variables
///
/// - `DATABASE_URL` (required): PostgreSQL connection string
/// - `SERVER_PORT` (optional): HTTP server port, defaults to 3000
/// - `DATABASE_MAX_CONNECTIONS` (optional): pool size, defaults to 5
/// - `API_KEY_SHA256` (required): hex SHA-256 digest of the operator API key
/// - `PAYMENT_WEBHOOK_SECRET` (required): key used to verify provider callbacks
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub database_url: String,

    #[serde(default = "default_port")]
    pub server_port: u16,

    #[serde(default = "default_max_connections")]
    pub database_max_connections: u32,

    /// Stored as the digest only, the raw key never sits in memory.
    pub api_key_sha256: String,

    pub payment_webhook_secret: String,
}

fn default_port() -> u16 {
    3000
}

fn default_max_connections() -> u32 {
    5
}

impl Config {
    /// Load configuration from environment variables.
    ///
    /// A missing `.env` file is not an error.
    ///
    /// # Errors
    ///
    /// Returns an error if a required variable is missing or a value cannot
    /// be parsed into its field type.
    pub fn from_env() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Build a config from an explicit set of `KEY=value` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        let config = envy::from_iter::<_, Config>(vars)?;
        Ok(Config {
            api_key_sha256: config.api_key_sha256.trim().to_ascii_lowercase(),
            ..config
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vars(pairs: &[(&str, &str)]) -> Vec<(String, String)> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn defaults_apply_when_optional_vars_missing() {
        let config = Config::from_vars(vars(&[
            ("DATABASE_URL", "postgres://localhost/market"),
            ("API_KEY_SHA256", "ABCDEF"),
            ("PAYMENT_WEBHOOK_SECRET", "sk_test"),
        ]))
        .unwrap();

        assert_eq!(config.server_port, 3000);
        assert_eq!(config.database_max_connections, 5);
        assert_eq!(config.api_key_sha256, "abcdef");
    }

    #[test]
    fn missing_webhook_secret_is_rejected() {
        let result = Config::from_vars(vars(&[
            ("DATABASE_URL", "postgres://localhost/market"),
            ("API_KEY_SHA256", "abcdef"),
        ]));

        assert!(result.is_err());
    }
}
