//! Google Analytics client.
//!
//! Covers property discovery (Admin API), daily reports (Data API), and the
//! OAuth code exchange. Base URLs are injectable so tests can point the
//! client at a mock server.

use chrono::NaiveDate;
use futures::future::join_all;
use reqwest::Client;
use serde::Deserialize;

use crate::core::http::{fetch_json_authorized, send_json};
use crate::core::models::{Property, PropertyReport};
use crate::core::window::TrailingWindow;
use crate::error::{BeancError, Result};
use crate::storage::config::OAuthClientConfig;
use crate::util::format::round_2dp;

/// Provider name used in errors and logs.
pub const PROVIDER: &str = "google-analytics";

const DEFAULT_ADMIN_BASE: &str = "https://analyticsadmin.googleapis.com";
const DEFAULT_DATA_BASE: &str = "https://analyticsdata.googleapis.com";
const DEFAULT_TOKEN_BASE: &str = "https://oauth2.googleapis.com";
const DEFAULT_USERINFO_BASE: &str = "https://www.googleapis.com";

const OAUTH_SCOPES: &str =
    "https://www.googleapis.com/auth/analytics.readonly https://www.googleapis.com/auth/userinfo.email";

/// Tokens returned by the OAuth code exchange.
#[derive(Debug, Clone, Deserialize)]
pub struct GoogleTokens {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_in: Option<i64>,
}

#[derive(Debug, Deserialize)]
struct UserInfo {
    email: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountSummariesResponse {
    #[serde(default)]
    account_summaries: Vec<AccountSummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AccountSummary {
    #[serde(default)]
    property_summaries: Vec<PropertySummary>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PropertySummary {
    property: String,
    display_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DataStreamsResponse {
    #[serde(default)]
    data_streams: Vec<DataStream>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct DataStream {
    #[serde(rename = "type", default)]
    stream_type: String,
    #[serde(default)]
    web_stream_data: Option<WebStreamData>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct WebStreamData {
    #[serde(default)]
    default_uri: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PropertiesResponse {
    #[serde(default)]
    properties: Vec<PropertyResource>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PropertyResource {
    name: String,
    display_name: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RunReportResponse {
    #[serde(default)]
    rows: Vec<ReportRow>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ReportRow {
    #[serde(default)]
    dimension_values: Vec<ReportValue>,
    #[serde(default)]
    metric_values: Vec<ReportValue>,
}

#[derive(Debug, Deserialize)]
struct ReportValue {
    #[serde(default)]
    value: String,
}

/// Google Analytics API client.
#[derive(Debug, Clone)]
pub struct AnalyticsClient {
    http: Client,
    admin_base: String,
    data_base: String,
    token_base: String,
    userinfo_base: String,
}

impl AnalyticsClient {
    /// Create a client against the production endpoints.
    #[must_use]
    pub fn new(http: Client) -> Self {
        Self {
            http,
            admin_base: DEFAULT_ADMIN_BASE.to_string(),
            data_base: DEFAULT_DATA_BASE.to_string(),
            token_base: DEFAULT_TOKEN_BASE.to_string(),
            userinfo_base: DEFAULT_USERINFO_BASE.to_string(),
        }
    }

    /// Create a client with custom base URLs.
    #[must_use]
    pub fn with_bases(
        http: Client,
        admin_base: impl Into<String>,
        data_base: impl Into<String>,
        token_base: impl Into<String>,
        userinfo_base: impl Into<String>,
    ) -> Self {
        Self {
            http,
            admin_base: admin_base.into(),
            data_base: data_base.into(),
            token_base: token_base.into(),
            userinfo_base: userinfo_base.into(),
        }
    }

    /// The consent URL the user opens to start the OAuth flow.
    #[must_use]
    pub fn authorize_url(config: &OAuthClientConfig) -> String {
        format!(
            "https://accounts.google.com/o/oauth2/v2/auth?client_id={}&redirect_uri={}&response_type=code&scope={}&access_type=offline&prompt=consent",
            config.client_id,
            config.redirect_uri,
            OAUTH_SCOPES.replace(' ', "%20"),
        )
    }

    /// Discover the properties visible to an access token.
    ///
    /// Flattens property summaries across all account summaries, then looks
    /// up each property's web data stream concurrently to resolve its domain.
    /// A property whose data-stream lookup fails is skipped.
    ///
    /// # Errors
    ///
    /// Returns error when the account summaries call itself fails.
    pub async fn list_properties(&self, access_token: &str) -> Result<Vec<Property>> {
        let url = format!("{}/v1beta/accountSummaries", self.admin_base);
        let summaries: AccountSummariesResponse =
            fetch_json_authorized(&self.http, PROVIDER, &url, access_token).await?;

        let flattened: Vec<PropertySummary> = summaries
            .account_summaries
            .into_iter()
            .flat_map(|account| account.property_summaries)
            .collect();

        let resolved = join_all(flattened.iter().map(|summary| {
            let id = last_segment(&summary.property);
            self.resolve_domain(access_token, id, &summary.display_name)
        }))
        .await;

        Ok(flattened
            .iter()
            .zip(resolved)
            .filter_map(|(summary, domain)| {
                let domain = domain?;
                Some(Property {
                    id: last_segment(&summary.property).to_string(),
                    name: summary.display_name.clone(),
                    domain,
                })
            })
            .collect())
    }

    /// Resolve a property's domain from its web data stream, or `None` when
    /// the lookup fails.
    async fn resolve_domain(
        &self,
        access_token: &str,
        property_id: &str,
        display_name: &str,
    ) -> Option<String> {
        let url = format!("{}/v1beta/properties/{property_id}/dataStreams", self.admin_base);
        let streams: DataStreamsResponse =
            match fetch_json_authorized(&self.http, PROVIDER, &url, access_token).await {
                Ok(streams) => streams,
                Err(e) => {
                    tracing::debug!(property = property_id, error = %e, "data stream lookup failed");
                    return None;
                }
            };

        let domain = streams
            .data_streams
            .iter()
            .find(|s| s.stream_type == "WEB_DATA_STREAM")
            .and_then(|s| s.web_stream_data.as_ref())
            .and_then(|w| w.default_uri.as_deref())
            .map(strip_scheme);

        Some(domain.unwrap_or_else(|| display_name.to_string()))
    }

    /// List properties by id and display name only (no domain resolution).
    ///
    /// Used after a connect to persist what the account can see.
    ///
    /// # Errors
    ///
    /// Returns error on network or parse failure.
    pub async fn list_property_summaries(&self, access_token: &str) -> Result<Vec<Property>> {
        let url = format!("{}/v1beta/properties", self.admin_base);
        let response: PropertiesResponse =
            fetch_json_authorized(&self.http, PROVIDER, &url, access_token).await?;

        Ok(response
            .properties
            .into_iter()
            .map(|p| Property {
                id: last_segment(&p.name).to_string(),
                name: p.display_name,
                domain: String::new(),
            })
            .collect())
    }

    /// Fetch a property's 7-day report.
    ///
    /// Rows arrive with an 8-digit `YYYYMMDD` date dimension and
    /// string-encoded metric values. Each row lands in the bucket with the
    /// exact matching calendar date; rows outside the window are dropped.
    ///
    /// # Errors
    ///
    /// Returns error on network, API, or parse failure. Callers in the
    /// aggregation pipeline convert this to a zero-valued report.
    pub async fn run_daily_report(
        &self,
        access_token: &str,
        property_id: &str,
        window: &TrailingWindow,
    ) -> Result<PropertyReport> {
        let url = format!("{}/v1beta/properties/{property_id}:runReport", self.data_base);
        let body = serde_json::json!({
            "dateRanges": [{
                "startDate": window.request_start().format("%Y-%m-%d").to_string(),
                "endDate": window.today().format("%Y-%m-%d").to_string(),
            }],
            "dimensions": [{"name": "date"}],
            "metrics": [{"name": "activeUsers"}, {"name": "totalRevenue"}],
        });

        let response: RunReportResponse = send_json(
            PROVIDER,
            self.http.post(&url).bearer_auth(access_token).json(&body),
        )
        .await?;

        let mut daily = window.buckets();
        for row in &response.rows {
            let Some(date) = row
                .dimension_values
                .first()
                .and_then(|v| parse_report_date(&v.value))
            else {
                continue;
            };
            let Some(bucket) = daily.iter_mut().find(|b| b.date == date) else {
                continue;
            };
            bucket.visitors = row
                .metric_values
                .first()
                .and_then(|v| v.value.parse().ok())
                .unwrap_or(0);
            bucket.revenue = row
                .metric_values
                .get(1)
                .and_then(|v| v.value.parse().ok())
                .unwrap_or(0.0);
        }

        Ok(PropertyReport {
            total_visitors: daily.iter().map(|b| b.visitors).sum(),
            total_revenue: round_2dp(daily.iter().map(|b| b.revenue).sum()),
            daily,
        })
    }

    /// Exchange an authorization code for tokens.
    ///
    /// # Errors
    ///
    /// Returns error when the token endpoint rejects the code.
    pub async fn exchange_code(
        &self,
        config: &OAuthClientConfig,
        code: &str,
    ) -> Result<GoogleTokens> {
        let url = format!("{}/token", self.token_base);
        let form = [
            ("code", code),
            ("client_id", config.client_id.as_str()),
            ("client_secret", config.client_secret.as_str()),
            ("redirect_uri", config.redirect_uri.as_str()),
            ("grant_type", "authorization_code"),
        ];
        send_json(PROVIDER, self.http.post(&url).form(&form))
            .await
            .map_err(|e| BeancError::OAuthExchange {
                provider: PROVIDER.to_string(),
                reason: e.to_string(),
            })
    }

    /// Fetch the email of the account behind an access token.
    ///
    /// # Errors
    ///
    /// Returns error on network or parse failure.
    pub async fn fetch_user_email(&self, access_token: &str) -> Result<String> {
        let url = format!("{}/oauth2/v2/userinfo", self.userinfo_base);
        let info: UserInfo =
            fetch_json_authorized(&self.http, PROVIDER, &url, access_token).await?;
        Ok(info.email)
    }
}

/// Last path segment of a resource name (`properties/123` -> `123`).
fn last_segment(resource: &str) -> &str {
    resource.rsplit('/').next().unwrap_or(resource)
}

/// Strip the scheme and trailing slash from a stream URI.
fn strip_scheme(uri: &str) -> String {
    uri.trim_start_matches("https://")
        .trim_start_matches("http://")
        .trim_end_matches('/')
        .to_string()
}

/// Parse an 8-digit `YYYYMMDD` report date.
fn parse_report_date(raw: &str) -> Option<NaiveDate> {
    if raw.len() != 8 {
        return None;
    }
    NaiveDate::parse_from_str(raw, "%Y%m%d").ok()
}
