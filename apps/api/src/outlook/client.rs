/// Outlook client: the single point of entry for all LMI-EO API calls.
///
/// LMI-EO serves provincial employment outlooks keyed by NOC 2016 v1.3 unit
/// group code and region id, authenticated with a user key in a `USER_KEY`
/// request header. No other module may call the API directly.
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Deserializer};
use serde_json::Value;
use thiserror::Error;
use tracing::debug;

/// Production LMI-EO host.
pub const LMI_API_BASE_URL: &str =
    "https://lmi-outlooks-esdc-edsc-apicast-production.api.canada.ca";
const OUTLOOKS_PATH: &str = "/clmix-wsx/gcapis/outlooks";
const USER_KEY_HEADER: &str = "USER_KEY";
const LANG: &str = "en";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum OutlookError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Raw outlook payload as returned by LMI-EO. `potential` arrives as either
/// a JSON number or a numeric string depending on the endpoint; anything
/// unparseable coerces to 0 (source-scale undetermined). Fields beyond
/// `potential` and `trends` are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RawOutlook {
    #[serde(default, deserialize_with = "ordinal_from_number_or_string")]
    pub potential: u8,
    #[serde(default)]
    pub trends: Value,
}

fn ordinal_from_number_or_string<'de, D>(deserializer: D) -> Result<u8, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    let parsed = match &value {
        Value::Number(n) => n.as_u64(),
        Value::String(s) => s.trim().parse::<u64>().ok(),
        _ => None,
    };
    Ok(parsed.and_then(|n| u8::try_from(n).ok()).unwrap_or(0))
}

/// Narrow seam over the outlook upstream so handlers and cache behavior can
/// be exercised against a stub. Carried in `AppState` as `Arc<dyn OutlookSource>`.
#[async_trait]
pub trait OutlookSource: Send + Sync {
    async fn provincial_outlook(
        &self,
        noc: &str,
        region_id: &str,
    ) -> Result<RawOutlook, OutlookError>;
}

/// HTTP client for the LMI-EO outlooks API.
#[derive(Clone)]
pub struct OutlookClient {
    client: Client,
    base_url: String,
    user_key: String,
}

impl OutlookClient {
    /// Creates a client pointed at `base_url`. The production host lives in
    /// config; tests point this at a local listener.
    pub fn new(base_url: String, user_key: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            user_key,
        }
    }
}

#[async_trait]
impl OutlookSource for OutlookClient {
    async fn provincial_outlook(
        &self,
        noc: &str,
        region_id: &str,
    ) -> Result<RawOutlook, OutlookError> {
        let url = format!("{}{}", self.base_url, OUTLOOKS_PATH);
        let response = self
            .client
            .get(&url)
            .header(USER_KEY_HEADER, &self.user_key)
            .query(&[("noc", noc), ("rtp", "1"), ("rid", region_id), ("lang", LANG)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(OutlookError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let raw: RawOutlook = response.json().await?;
        debug!(noc, region_id, potential = raw.potential, "fetched provincial outlook");
        Ok(raw)
    }
}
