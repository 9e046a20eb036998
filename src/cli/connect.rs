//! Connect command implementation.
//!
//! Without a code, prints the provider consent URL. With a code (or an error
//! from the redirect), completes the callback and reports the resulting
//! redirect indicator.

use crate::cli::args::ConnectCommand;
use crate::core::http;
use crate::core::oauth::{
    CallbackParams, ExchangeState, handle_analytics_callback, handle_payments_callback,
};
use crate::error::{BeancError, Result};
use crate::providers::analytics::{self, AnalyticsClient};
use crate::providers::payments::{self, PaymentsClient};
use crate::storage::config::Config;
use crate::storage::connections::ConnectionStore;
use crate::storage::paths::AppPaths;

/// Execute a connect subcommand.
pub async fn execute(cmd: &ConnectCommand) -> Result<()> {
    let paths = AppPaths::resolve()?;
    let config = Config::load(&paths.config_file())?;

    match cmd {
        ConnectCommand::Google { code, error } => {
            Config::require(&config.google, "google")?;

            if code.is_none() && error.is_none() {
                println!("Open this URL to authorize Google Analytics access:\n");
                println!("{}", AnalyticsClient::authorize_url(&config.google));
                println!("\nThen run: beanc connect google --code <CODE>");
                return Ok(());
            }

            let client = AnalyticsClient::new(http::default_client()?);
            let mut store = ConnectionStore::load(&paths.connections_file())?;
            let params = CallbackParams {
                code: code.clone(),
                error: error.clone(),
            };
            let state =
                handle_analytics_callback(&client, &config.google, &mut store, &params).await;
            finish(analytics::PROVIDER, &state)
        }

        ConnectCommand::Stripe { code, error } => {
            Config::require(&config.stripe, "stripe")?;

            if code.is_none() && error.is_none() {
                println!("Open this URL to authorize Stripe access:\n");
                println!("{}", PaymentsClient::authorize_url(&config.stripe));
                println!("\nThen run: beanc connect stripe --code <CODE>");
                return Ok(());
            }

            let client = PaymentsClient::new(http::default_client()?);
            let mut store = ConnectionStore::load(&paths.connections_file())?;
            let params = CallbackParams {
                code: code.clone(),
                error: error.clone(),
            };
            let state =
                handle_payments_callback(&client, &config.stripe, &mut store, &params).await;
            finish(payments::PROVIDER, &state)
        }
    }
}

fn finish(provider: &str, state: &ExchangeState) -> Result<()> {
    println!("{}", state.redirect_query());
    match state {
        ExchangeState::Failed(reason) if reason == "no_code" => Err(BeancError::MissingCode),
        ExchangeState::Failed(reason) => Err(BeancError::OAuthExchange {
            provider: provider.to_string(),
            reason: reason.clone(),
        }),
        _ => Ok(()),
    }
}
