//! Autocomplete lookup of location names and codes.

use reqwest::Client;
use serde_json::Value;

use crate::{
    Location,
    error::{NalssiError, Result, truncate_body},
};

/// Query the autocomplete endpoint and map its answer to [`Location`]s.
pub async fn search_location(http: &Client, url: &str, query: &str) -> Result<Vec<Location>> {
    let query = query.trim();
    if query.is_empty() {
        return Err(NalssiError::InvalidQuery);
    }

    tracing::debug!(query, "searching locations");

    let res = http
        .get(url)
        .query(&[
            ("q_enc", "utf-8"),
            ("r_format", "json"),
            ("r_enc", "utf-8"),
            ("r_lt", "1"),
            ("st", "1"),
            ("q", query),
        ])
        .send()
        .await
        .map_err(|e| NalssiError::fetch("Failed to send location search request", e))?;

    let status = res.status();
    let body = res
        .text()
        .await
        .map_err(|e| NalssiError::fetch("Failed to read location search response body", e))?;

    if !status.is_success() {
        return Err(NalssiError::UnexpectedStatus {
            url: url.to_string(),
            status,
            body: truncate_body(&body),
        });
    }

    let raw: Value = serde_json::from_str(&body)
        .map_err(|e| NalssiError::parse("Failed to parse location search JSON", e))?;

    Ok(parse_locations(&raw))
}

/// Map `{ "items": [ [ [[name], [code]], ... ] ] }` to locations, keeping provider order.
///
/// Anything short of that shape means "no matches".
pub fn parse_locations(raw: &Value) -> Vec<Location> {
    let Some(entries) = raw
        .get("items")
        .and_then(Value::as_array)
        .and_then(|items| items.first())
        .and_then(Value::as_array)
    else {
        return Vec::new();
    };

    entries
        .iter()
        .filter_map(|entry| {
            let location = parse_entry(entry);
            if location.is_none() {
                tracing::warn!(%entry, "skipping malformed autocomplete entry");
            }
            location
        })
        .collect()
}

fn parse_entry(entry: &Value) -> Option<Location> {
    let first = |idx: usize| -> Option<String> {
        let s = entry.get(idx)?.get(0)?.as_str()?.trim();
        (!s.is_empty()).then(|| s.to_string())
    };

    Some(Location { name: first(0)?, code: first(1)? })
}
