//! Test data factories for provider API responses.
#![allow(dead_code)]

use serde_json::{Value, json};

/// Admin API account summaries response with one account holding the given
/// `(property_id, display_name)` pairs.
pub fn account_summaries(properties: &[(&str, &str)]) -> Value {
    let summaries: Vec<Value> = properties
        .iter()
        .map(|(id, name)| {
            json!({
                "property": format!("properties/{id}"),
                "displayName": name,
            })
        })
        .collect();
    json!({
        "accountSummaries": [{
            "account": "accounts/100",
            "displayName": "Test Account",
            "propertySummaries": summaries,
        }]
    })
}

/// Admin API data streams response with a single web stream.
pub fn web_data_streams(default_uri: Option<&str>) -> Value {
    let mut stream = json!({
        "name": "properties/1/dataStreams/1",
        "type": "WEB_DATA_STREAM",
        "displayName": "Web stream",
    });
    if let Some(uri) = default_uri {
        stream["webStreamData"] = json!({ "defaultUri": uri });
    }
    json!({ "dataStreams": [stream] })
}

/// Data API runReport response. Rows are `(YYYYMMDD, activeUsers, totalRevenue)`
/// with metric values string-encoded as the API sends them.
pub fn run_report(rows: &[(&str, u64, &str)]) -> Value {
    let rows: Vec<Value> = rows
        .iter()
        .map(|(date, visitors, revenue)| {
            json!({
                "dimensionValues": [{ "value": date }],
                "metricValues": [
                    { "value": visitors.to_string() },
                    { "value": revenue },
                ],
            })
        })
        .collect();
    json!({ "rows": rows })
}

/// Google OAuth token endpoint response.
pub fn google_tokens(access_token: &str) -> Value {
    json!({
        "access_token": access_token,
        "refresh_token": "refresh-1",
        "expires_in": 3599,
        "token_type": "Bearer",
    })
}

/// Google userinfo response.
pub fn userinfo(email: &str) -> Value {
    json!({ "id": "111", "email": email, "verified_email": true })
}

/// Admin API properties listing (id and display name only).
pub fn properties_list(properties: &[(&str, &str)]) -> Value {
    let properties: Vec<Value> = properties
        .iter()
        .map(|(id, name)| {
            json!({
                "name": format!("properties/{id}"),
                "displayName": name,
            })
        })
        .collect();
    json!({ "properties": properties })
}

/// Stripe Connect token endpoint response.
pub fn stripe_tokens(account_id: &str, livemode: bool) -> Value {
    json!({
        "access_token": "sk_test_access",
        "refresh_token": "rt_1",
        "stripe_user_id": account_id,
        "livemode": livemode,
        "token_type": "bearer",
        "scope": "read_only",
    })
}

/// Stripe account detail response.
pub fn stripe_account(id: &str, email: Option<&str>, business_name: Option<&str>) -> Value {
    let mut account = json!({ "id": id, "object": "account" });
    if let Some(email) = email {
        account["email"] = json!(email);
    }
    if let Some(name) = business_name {
        account["business_profile"] = json!({ "name": name });
    }
    account
}
