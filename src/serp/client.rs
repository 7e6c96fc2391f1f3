//! Bright Data SERP API client
//!
//! Sends a Google search URL through the Bright Data `/request` endpoint and
//! extracts the organic results from the JSON payload.

use anyhow::{bail, Context, Result};
use serde::Deserialize;
use serde_json::Value;
use std::time::Duration;
use url::Url;

use super::SearchResult;

const API_ENDPOINT: &str = "https://api.brightdata.com/request";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Bright Data SERP API
pub struct BrightDataClient {
    http: reqwest::blocking::Client,
    api_key: String,
    zone: String,
    country: Option<String>,
}

impl BrightDataClient {
    /// Build a client from explicit values, falling back to the environment
    /// (`BRIGHT_DATA_API_KEY`, `BRIGHT_DATA_ZONE`, `BRIGHT_DATA_COUNTRY`).
    ///
    /// Missing credentials are a configuration error and fail immediately.
    pub fn new(
        api_key: Option<String>,
        zone: Option<String>,
        country: Option<String>,
    ) -> Result<Self> {
        let api_key = api_key
            .or_else(|| std::env::var("BRIGHT_DATA_API_KEY").ok())
            .context("BRIGHT_DATA_API_KEY must be provided or set in the environment")?;

        let zone = zone
            .or_else(|| std::env::var("BRIGHT_DATA_ZONE").ok())
            .context("BRIGHT_DATA_ZONE must be provided or set in the environment")?;

        let country = country.or_else(|| std::env::var("BRIGHT_DATA_COUNTRY").ok());

        let http = reqwest::blocking::Client::builder()
            .user_agent("serptrace")
            .timeout(REQUEST_TIMEOUT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            http,
            api_key,
            zone,
            country,
        })
    }

    /// Build a client entirely from environment variables.
    pub fn from_env() -> Result<Self> {
        Self::new(None, None, None)
    }

    /// Execute a Google search via the SERP API and return organic results.
    pub fn search(&self, query: &str, num_results: usize) -> Result<Vec<SearchResult>> {
        let target = search_url(query, num_results)?;

        let mut payload = serde_json::json!({
            "zone": self.zone,
            "url": target,
            "format": "json",
        });
        if let Some(country) = &self.country {
            payload["country"] = Value::String(country.clone());
        }

        let response = self
            .http
            .post(API_ENDPOINT)
            .bearer_auth(&self.api_key)
            .json(&payload)
            .send()
            .with_context(|| format!("Search request for '{}' failed", query))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            let snippet: String = body.chars().take(200).collect();
            bail!("Search request failed with HTTP {}: {}", status, snippet);
        }

        let parsed: SerpResponse = response
            .json()
            .context("Failed to parse SERP API response as JSON")?;

        let serp = parsed.into_serp()?;
        Ok(extract_organic(&serp))
    }
}

/// Response shape of the `/request` endpoint. The SERP payload usually sits
/// in a `body` field - as a JSON string or an embedded object - but bare
/// payloads come through without the envelope.
#[derive(Deserialize)]
#[serde(untagged)]
enum SerpResponse {
    Enveloped { body: SerpBody },
    Bare(Value),
}

#[derive(Deserialize)]
#[serde(untagged)]
enum SerpBody {
    Raw(String),
    Parsed(Value),
}

impl SerpResponse {
    fn into_serp(self) -> Result<Value> {
        match self {
            SerpResponse::Enveloped {
                body: SerpBody::Raw(raw),
            } => serde_json::from_str(&raw).context("Failed to parse SERP response body"),
            SerpResponse::Enveloped {
                body: SerpBody::Parsed(value),
            } => Ok(value),
            SerpResponse::Bare(value) => Ok(value),
        }
    }
}

/// Build the Google search URL requested through the proxy.
fn search_url(query: &str, num_results: usize) -> Result<String> {
    let mut target =
        Url::parse("https://www.google.com/search").context("Invalid search base URL")?;
    target
        .query_pairs_mut()
        .append_pair("q", query)
        .append_pair("num", &num_results.to_string())
        .append_pair("brd_json", "1");
    Ok(target.into())
}

fn extract_organic(serp: &Value) -> Vec<SearchResult> {
    serp.get("organic")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(SearchResult::from_value).collect())
        .unwrap_or_default()
}
