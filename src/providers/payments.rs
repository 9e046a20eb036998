//! Stripe Connect client.
//!
//! Covers the OAuth code exchange against the Connect token endpoint and the
//! account detail lookup. Base URLs are injectable for tests.

use reqwest::Client;
use serde::Deserialize;

use crate::core::http::{fetch_json_authorized, send_json};
use crate::error::{BeancError, Result};
use crate::storage::config::OAuthClientConfig;

/// Provider name used in errors and logs.
pub const PROVIDER: &str = "stripe";

const DEFAULT_CONNECT_BASE: &str = "https://connect.stripe.com";
const DEFAULT_API_BASE: &str = "https://api.stripe.com";

/// Tokens and account handle returned by the Connect code exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct StripeTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    pub stripe_user_id: String,
    #[serde(default)]
    pub livemode: bool,
}

#[derive(Debug, Deserialize)]
struct Account {
    id: String,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    business_profile: Option<BusinessProfile>,
}

#[derive(Debug, Deserialize)]
struct BusinessProfile {
    #[serde(default)]
    name: Option<String>,
}

/// Stripe API client.
#[derive(Debug, Clone)]
pub struct PaymentsClient {
    http: Client,
    connect_base: String,
    api_base: String,
}

impl PaymentsClient {
    /// Create a client against the production endpoints.
    #[must_use]
    pub fn new(http: Client) -> Self {
        Self {
            http,
            connect_base: DEFAULT_CONNECT_BASE.to_string(),
            api_base: DEFAULT_API_BASE.to_string(),
        }
    }

    /// Create a client with custom base URLs.
    #[must_use]
    pub fn with_bases(
        http: Client,
        connect_base: impl Into<String>,
        api_base: impl Into<String>,
    ) -> Self {
        Self {
            http,
            connect_base: connect_base.into(),
            api_base: api_base.into(),
        }
    }

    /// The consent URL the user opens to start the Connect flow.
    #[must_use]
    pub fn authorize_url(config: &OAuthClientConfig) -> String {
        format!(
            "https://connect.stripe.com/oauth/authorize?response_type=code&client_id={}&scope=read_only&redirect_uri={}",
            config.client_id, config.redirect_uri,
        )
    }

    /// Exchange an authorization code for tokens and the account id.
    ///
    /// # Errors
    ///
    /// Returns error when the token endpoint rejects the code.
    pub async fn exchange_code(
        &self,
        config: &OAuthClientConfig,
        code: &str,
    ) -> Result<StripeTokens> {
        let url = format!("{}/oauth/token", self.connect_base);
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("client_secret", config.client_secret.as_str()),
            ("client_id", config.client_id.as_str()),
        ];
        send_json(PROVIDER, self.http.post(&url).form(&form))
            .await
            .map_err(|e| BeancError::OAuthExchange {
                provider: PROVIDER.to_string(),
                reason: e.to_string(),
            })
    }

    /// Fetch the display name for a connected account.
    ///
    /// Prefers the business profile name, then the account email, then the
    /// raw account id.
    ///
    /// # Errors
    ///
    /// Returns error on network or parse failure.
    pub async fn fetch_account_name(&self, access_token: &str, account_id: &str) -> Result<String> {
        let url = format!("{}/v1/accounts/{account_id}", self.api_base);
        let account: Account =
            fetch_json_authorized(&self.http, PROVIDER, &url, access_token).await?;

        Ok(account
            .business_profile
            .and_then(|p| p.name)
            .or(account.email)
            .unwrap_or(account.id))
    }
}
