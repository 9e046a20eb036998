//! Connection storage.
//!
//! Connected accounts live in a single JSON file under the app data dir.
//! Upserts are keyed by account email (analytics) or account id (Stripe) so a
//! reconnect updates the existing record instead of duplicating it.

use std::path::Path;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::core::models::Property;
use crate::error::{BeancError, Result};

/// A connected Google Analytics account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyticsConnection {
    /// Account email, the conflict key.
    pub account_email: String,
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub token_expiry: Option<DateTime<Utc>>,
    /// Property ids the user selected for the dashboard.
    #[serde(default)]
    pub property_ids: Vec<String>,
    /// Properties the account can see, refreshed after each connect.
    #[serde(default)]
    pub available_properties: Vec<Property>,
}

/// A connected Stripe account.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StripeConnection {
    /// Stripe account id, the conflict key.
    pub account_id: String,
    pub account_name: String,
    pub access_token: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub property_ids: Vec<String>,
    pub livemode: bool,
}

/// A link correlating an analytics property with a Stripe account.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropertyLink {
    pub property_id: String,
    pub stripe_account_id: String,
}

/// Root connections file structure.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConnectionsFile {
    pub version: u32,
    #[serde(default)]
    pub analytics: Vec<AnalyticsConnection>,
    #[serde(default)]
    pub stripe: Vec<StripeConnection>,
    #[serde(default)]
    pub links: Vec<PropertyLink>,
}

impl Default for ConnectionsFile {
    fn default() -> Self {
        Self {
            version: 1,
            analytics: Vec::new(),
            stripe: Vec::new(),
            links: Vec::new(),
        }
    }
}

/// Connection store backed by a JSON file.
#[derive(Debug)]
pub struct ConnectionStore {
    data: ConnectionsFile,
    path: Option<std::path::PathBuf>,
}

impl ConnectionStore {
    /// Load from file or create empty.
    ///
    /// # Errors
    /// Returns [`BeancError::Store`] if the file exists but cannot be read or
    /// contains invalid JSON.
    pub fn load(path: &Path) -> Result<Self> {
        if path.exists() {
            let content = std::fs::read_to_string(path)
                .map_err(|e| BeancError::Store(format!("{}: {e}", path.display())))?;
            let data: ConnectionsFile = serde_json::from_str(&content)
                .map_err(|e| BeancError::Store(format!("{}: {e}", path.display())))?;
            Ok(Self {
                data,
                path: Some(path.to_path_buf()),
            })
        } else {
            Ok(Self {
                data: ConnectionsFile::default(),
                path: Some(path.to_path_buf()),
            })
        }
    }

    /// Create empty store.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            data: ConnectionsFile::default(),
            path: None,
        }
    }

    /// All analytics connections.
    #[must_use]
    pub fn analytics(&self) -> &[AnalyticsConnection] {
        &self.data.analytics
    }

    /// All Stripe connections.
    #[must_use]
    pub fn stripe(&self) -> &[StripeConnection] {
        &self.data.stripe
    }

    /// All property links.
    #[must_use]
    pub fn links(&self) -> &[PropertyLink] {
        &self.data.links
    }

    /// Insert or replace an analytics connection, keyed by account email.
    pub fn upsert_analytics(&mut self, connection: AnalyticsConnection) {
        match self
            .data
            .analytics
            .iter_mut()
            .find(|c| c.account_email == connection.account_email)
        {
            Some(existing) => *existing = connection,
            None => self.data.analytics.push(connection),
        }
    }

    /// Insert or replace a Stripe connection, keyed by account id.
    pub fn upsert_stripe(&mut self, connection: StripeConnection) {
        match self
            .data
            .stripe
            .iter_mut()
            .find(|c| c.account_id == connection.account_id)
        {
            Some(existing) => *existing = connection,
            None => self.data.stripe.push(connection),
        }
    }

    /// Toggle a property id in a connection's selection.
    ///
    /// # Errors
    /// Returns an error when no connection matches the email.
    pub fn toggle_property(&mut self, account_email: &str, property_id: &str) -> Result<()> {
        let connection = self
            .data
            .analytics
            .iter_mut()
            .find(|c| c.account_email == account_email)
            .ok_or_else(|| BeancError::ConnectionNotFound(account_email.to_string()))?;

        if let Some(pos) = connection.property_ids.iter().position(|id| id == property_id) {
            connection.property_ids.remove(pos);
        } else {
            connection.property_ids.push(property_id.to_string());
        }
        Ok(())
    }

    /// Replace a connection's available property list.
    ///
    /// # Errors
    /// Returns an error when no connection matches the email.
    pub fn set_available_properties(
        &mut self,
        account_email: &str,
        properties: Vec<Property>,
    ) -> Result<()> {
        let connection = self
            .data
            .analytics
            .iter_mut()
            .find(|c| c.account_email == account_email)
            .ok_or_else(|| BeancError::ConnectionNotFound(account_email.to_string()))?;
        connection.available_properties = properties;
        Ok(())
    }

    /// Remove an analytics connection by email.
    ///
    /// # Errors
    /// Returns an error when no connection matches the email.
    pub fn disconnect_analytics(&mut self, account_email: &str) -> Result<()> {
        let before = self.data.analytics.len();
        self.data.analytics.retain(|c| c.account_email != account_email);
        if self.data.analytics.len() == before {
            return Err(BeancError::ConnectionNotFound(account_email.to_string()));
        }
        Ok(())
    }

    /// Link a property to a Stripe account, replacing any existing link for
    /// that property.
    pub fn link_property(&mut self, property_id: &str, stripe_account_id: &str) {
        match self
            .data
            .links
            .iter_mut()
            .find(|l| l.property_id == property_id)
        {
            Some(existing) => existing.stripe_account_id = stripe_account_id.to_string(),
            None => self.data.links.push(PropertyLink {
                property_id: property_id.to_string(),
                stripe_account_id: stripe_account_id.to_string(),
            }),
        }
    }

    /// Save to file.
    ///
    /// # Errors
    /// Returns [`BeancError::Store`] if the parent directory cannot be
    /// created, serialization fails, or the file cannot be written.
    pub fn save(&self) -> Result<()> {
        if let Some(path) = &self.path {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| BeancError::Store(format!("{}: {e}", parent.display())))?;
            }
            let content = serde_json::to_string_pretty(&self.data)
                .map_err(|e| BeancError::Store(e.to_string()))?;
            std::fs::write(path, content)
                .map_err(|e| BeancError::Store(format!("{}: {e}", path.display())))?;
        }
        Ok(())
    }
}
