//! OAuth callback handling.
//!
//! Both providers share one exchange state machine. A callback carries either
//! an authorization code or a provider error; the handler walks
//! exchange -> identity lookup -> persistence and lands on `Connected` or
//! `Failed`. The state maps to the redirect query the original flow appended
//! (`connected=true` / `error=<reason>`).

use chrono::{Duration, Utc};

use crate::providers::analytics::AnalyticsClient;
use crate::providers::payments::PaymentsClient;
use crate::storage::config::OAuthClientConfig;
use crate::storage::connections::{AnalyticsConnection, ConnectionStore, StripeConnection};

/// Progress of one OAuth exchange attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeState {
    /// No exchange started.
    Idle,
    /// Code exchange in flight.
    Exchanging,
    /// Connection persisted.
    Connected,
    /// Exchange failed; the reason becomes the redirect error code.
    Failed(String),
}

impl ExchangeState {
    /// The query string appended to the post-exchange redirect.
    #[must_use]
    pub fn redirect_query(&self) -> String {
        match self {
            Self::Connected => "connected=true".to_string(),
            Self::Failed(reason) => format!("error={}", percent_encode(reason)),
            Self::Idle | Self::Exchanging => String::new(),
        }
    }

    /// Whether the exchange ended in failure.
    #[must_use]
    pub const fn is_failed(&self) -> bool {
        matches!(self, Self::Failed(_))
    }
}

/// Query parameters delivered to the one-shot callback.
#[derive(Debug, Clone, Default)]
pub struct CallbackParams {
    pub code: Option<String>,
    pub error: Option<String>,
}

impl CallbackParams {
    /// Resolve the authorization code, or the failure state when the
    /// provider sent an error or no code at all.
    fn code(&self) -> Result<&str, ExchangeState> {
        if let Some(error) = &self.error {
            return Err(ExchangeState::Failed(error.clone()));
        }
        match self.code.as_deref() {
            Some(code) if !code.is_empty() => Ok(code),
            _ => Err(ExchangeState::Failed("no_code".to_string())),
        }
    }
}

/// Run the Google Analytics callback: exchange the code, resolve the account
/// email, and upsert the connection keyed by that email.
///
/// Property enumeration afterwards is best-effort; its failure leaves the
/// connection `Connected`.
pub async fn handle_analytics_callback(
    client: &AnalyticsClient,
    config: &OAuthClientConfig,
    store: &mut ConnectionStore,
    params: &CallbackParams,
) -> ExchangeState {
    let code = match params.code() {
        Ok(code) => code,
        Err(state) => return state,
    };

    tracing::debug!("exchanging analytics authorization code");
    let tokens = match client.exchange_code(config, code).await {
        Ok(tokens) => tokens,
        Err(e) => return ExchangeState::Failed(e.to_string()),
    };

    let email = match client.fetch_user_email(&tokens.access_token).await {
        Ok(email) => email,
        Err(e) => return ExchangeState::Failed(e.to_string()),
    };

    let access_token = tokens.access_token.clone();
    store.upsert_analytics(AnalyticsConnection {
        account_email: email.clone(),
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        token_expiry: tokens
            .expires_in
            .map(|secs| Utc::now() + Duration::seconds(secs)),
        property_ids: Vec::new(),
        available_properties: Vec::new(),
    });
    if let Err(e) = store.save() {
        return ExchangeState::Failed(e.to_string());
    }

    // Best effort. The connection is already saved.
    match client.list_property_summaries(&access_token).await {
        Ok(properties) => {
            if store.set_available_properties(&email, properties).is_ok() {
                if let Err(e) = store.save() {
                    tracing::warn!(error = %e, "failed to persist available properties");
                }
            }
        }
        Err(e) => {
            tracing::warn!(account = %email, error = %e, "property enumeration failed");
        }
    }

    ExchangeState::Connected
}

/// Run the Stripe callback: exchange the code, resolve the account name, and
/// upsert the connection keyed by the account id.
pub async fn handle_payments_callback(
    client: &PaymentsClient,
    config: &OAuthClientConfig,
    store: &mut ConnectionStore,
    params: &CallbackParams,
) -> ExchangeState {
    let code = match params.code() {
        Ok(code) => code,
        Err(state) => return state,
    };

    tracing::debug!("exchanging payments authorization code");
    let tokens = match client.exchange_code(config, code).await {
        Ok(tokens) => tokens,
        Err(e) => return ExchangeState::Failed(e.to_string()),
    };

    let account_name = match client
        .fetch_account_name(&tokens.access_token, &tokens.stripe_user_id)
        .await
    {
        Ok(name) => name,
        Err(e) => return ExchangeState::Failed(e.to_string()),
    };

    store.upsert_stripe(StripeConnection {
        account_id: tokens.stripe_user_id,
        account_name,
        access_token: tokens.access_token,
        refresh_token: tokens.refresh_token,
        property_ids: Vec::new(),
        livemode: tokens.livemode,
    });
    if let Err(e) = store.save() {
        return ExchangeState::Failed(e.to_string());
    }

    ExchangeState::Connected
}

/// Minimal percent-encoding for redirect error codes.
fn percent_encode(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for byte in raw.bytes() {
        match byte {
            b'A'..=b'Z' | b'a'..=b'z' | b'0'..=b'9' | b'-' | b'_' | b'.' | b'~' => {
                out.push(byte as char);
            }
            _ => out.push_str(&format!("%{byte:02X}")),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_query_for_terminal_states() {
        assert_eq!(ExchangeState::Connected.redirect_query(), "connected=true");
        assert_eq!(
            ExchangeState::Failed("no_code".to_string()).redirect_query(),
            "error=no_code"
        );
        assert_eq!(ExchangeState::Idle.redirect_query(), "");
    }

    #[test]
    fn failure_reasons_are_percent_encoded() {
        let state = ExchangeState::Failed("bad code / denied".to_string());
        assert_eq!(state.redirect_query(), "error=bad%20code%20%2F%20denied");
    }

    #[test]
    fn missing_code_resolves_to_failure() {
        let params = CallbackParams::default();
        assert_eq!(
            params.code().unwrap_err(),
            ExchangeState::Failed("no_code".to_string())
        );

        let params = CallbackParams {
            code: Some("abc".to_string()),
            error: None,
        };
        assert_eq!(params.code().unwrap(), "abc");
    }

    #[test]
    fn provider_error_wins_over_code() {
        let params = CallbackParams {
            code: Some("abc".to_string()),
            error: Some("access_denied".to_string()),
        };
        assert_eq!(
            params.code().unwrap_err(),
            ExchangeState::Failed("access_denied".to_string())
        );
    }
}
