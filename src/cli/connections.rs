//! Connections management command implementation.

use crate::cli::args::{ConnectionsCommand, OutputFormat};
use crate::error::Result;
use crate::render::robot::{self, ConnectionsPayload};
use crate::render::human;
use crate::storage::connections::ConnectionStore;
use crate::storage::paths::AppPaths;

/// Execute a connections subcommand.
pub fn execute(
    cmd: &ConnectionsCommand,
    format: OutputFormat,
    pretty: bool,
    no_color: bool,
) -> Result<()> {
    let paths = AppPaths::resolve()?;
    let mut store = ConnectionStore::load(&paths.connections_file())?;

    match cmd {
        ConnectionsCommand::List => {
            let payload = ConnectionsPayload {
                analytics: store.analytics(),
                stripe: store.stripe(),
            };
            let output = match format {
                OutputFormat::Human => {
                    human::render_connections(store.analytics(), store.stripe(), no_color)?
                }
                OutputFormat::Json => robot::render_connections_json(&payload, pretty)?,
                OutputFormat::Md => robot::render_connections_md(&payload)?,
            };
            println!("{output}");
        }

        ConnectionsCommand::Select { account, property } => {
            store.toggle_property(account, property)?;
            store.save()?;
            let selected = store
                .analytics()
                .iter()
                .find(|c| &c.account_email == account)
                .is_some_and(|c| c.property_ids.contains(property));
            if selected {
                println!("Tracking property {property} for {account}");
            } else {
                println!("Stopped tracking property {property} for {account}");
            }
        }

        ConnectionsCommand::Disconnect { account } => {
            store.disconnect_analytics(account)?;
            store.save()?;
            println!("Disconnected {account}");
        }

        ConnectionsCommand::LinkStripe {
            property,
            stripe_account,
        } => {
            store.link_property(property, stripe_account);
            store.save()?;
            println!("Linked property {property} to {stripe_account}");
        }
    }

    Ok(())
}
