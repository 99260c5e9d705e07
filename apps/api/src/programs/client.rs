use std::sync::Arc;
use std::time::Duration;

use reqwest::Client;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::debug;

/// Production program directory host.
pub const PROGRAMS_API_BASE_URL: &str = "https://viu-career-outlook.herokuapp.com";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

#[derive(Debug, Error)]
pub enum ProgramsError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },
}

/// Response envelope used by every program directory endpoint.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// A searchable training program. The identifying fields are typed; every
/// other field the API sends is carried through untouched.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Program {
    #[serde(deserialize_with = "id_from_number_or_string")]
    pub nid: i64,
    pub title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// A job related to a training program.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgramJob {
    #[serde(default)]
    pub noc: Option<String>,
    pub title: String,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// Drupal-backed endpoints serialize node ids as strings on some routes.
fn id_from_number_or_string<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    match &value {
        Value::Number(n) => n.as_i64(),
        Value::String(s) => s.trim().parse::<i64>().ok(),
        _ => None,
    }
    .ok_or_else(|| serde::de::Error::custom(format!("invalid node id: {value}")))
}

/// HTTP client for the training program directory API. No authentication.
///
/// The searchable program list is memoized for the life of the client; job
/// lookups are always fetched fresh.
#[derive(Clone)]
pub struct ProgramsClient {
    client: Client,
    base_url: String,
    searchable: Arc<Mutex<Option<Arc<Vec<Program>>>>>,
}

impl ProgramsClient {
    pub fn new(base_url: String) -> Self {
        Self {
            client: Client::builder()
                .timeout(REQUEST_TIMEOUT)
                .build()
                .expect("Failed to build HTTP client"),
            base_url,
            searchable: Arc::new(Mutex::new(None)),
        }
    }

    /// Returns the searchable program list, fetching it on first use. The
    /// memo lock is held across the fill so concurrent first calls coalesce
    /// into a single upstream request.
    pub async fn searchable(&self) -> Result<Arc<Vec<Program>>, ProgramsError> {
        let mut memo = self.searchable.lock().await;
        if let Some(programs) = memo.as_ref() {
            return Ok(programs.clone());
        }

        let url = format!("{}/api/v1/programs/searchable", self.base_url);
        let envelope: Envelope<Vec<Program>> = self.get_json(&url).await?;
        let programs = Arc::new(envelope.data);
        debug!(count = programs.len(), "fetched searchable program list");
        *memo = Some(programs.clone());
        Ok(programs)
    }

    /// Returns the jobs related to one program.
    pub async fn jobs_for_program(&self, nid: i64) -> Result<Vec<ProgramJob>, ProgramsError> {
        let url = format!("{}/api/v1/jobs/program/{nid}", self.base_url);
        let envelope: Envelope<Vec<ProgramJob>> = self.get_json(&url).await?;
        Ok(envelope.data)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &str) -> Result<T, ProgramsError> {
        let response = self.client.get(url).send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(ProgramsError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response.json().await?)
    }
}
