//! OAuth client configuration.
//!
//! Client credentials live in `config.toml` under the app config dir.
//! Environment variables override file values.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{BeancError, Result};

/// OAuth client settings for one provider.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OAuthClientConfig {
    #[serde(default)]
    pub client_id: String,
    #[serde(default)]
    pub client_secret: String,
    #[serde(default)]
    pub redirect_uri: String,
}

/// Top-level configuration file contents.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub google: OAuthClientConfig,
    #[serde(default)]
    pub stripe: OAuthClientConfig,
}

impl Config {
    /// Load configuration from a TOML file, then apply env overrides.
    ///
    /// A missing file yields the default (empty) config so that env-only
    /// setups work without touching disk.
    ///
    /// # Errors
    ///
    /// Returns error when the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self> {
        let mut config = if path.exists() {
            let raw = std::fs::read_to_string(path)?;
            toml::from_str(&raw)
                .map_err(|e| BeancError::Config(format!("{}: {e}", path.display())))?
        } else {
            Self::default()
        };
        config.apply_env_overrides();
        Ok(config)
    }

    /// Apply `BEANC_*` environment overrides, env winning over file.
    fn apply_env_overrides(&mut self) {
        override_from_env(&mut self.google.client_id, "BEANC_GOOGLE_CLIENT_ID");
        override_from_env(&mut self.google.client_secret, "BEANC_GOOGLE_CLIENT_SECRET");
        override_from_env(&mut self.google.redirect_uri, "BEANC_GOOGLE_REDIRECT_URI");
        override_from_env(&mut self.stripe.client_id, "BEANC_STRIPE_CLIENT_ID");
        override_from_env(&mut self.stripe.client_secret, "BEANC_STRIPE_CLIENT_SECRET");
        override_from_env(&mut self.stripe.redirect_uri, "BEANC_STRIPE_REDIRECT_URI");
    }

    /// Validate that a provider's credentials are present.
    ///
    /// # Errors
    ///
    /// Returns error naming the first missing key.
    pub fn require(config: &OAuthClientConfig, provider: &str) -> Result<()> {
        if config.client_id.is_empty() {
            return Err(BeancError::ConfigInvalid {
                key: format!("{provider}.client_id"),
                message: "missing".to_string(),
            });
        }
        if config.client_secret.is_empty() {
            return Err(BeancError::ConfigInvalid {
                key: format!("{provider}.client_secret"),
                message: "missing".to_string(),
            });
        }
        Ok(())
    }
}

fn override_from_env(target: &mut String, key: &str) {
    if let Ok(value) = std::env::var(key) {
        let trimmed = value.trim();
        if !trimmed.is_empty() {
            *target = trimmed.to_string();
        }
    }
}
