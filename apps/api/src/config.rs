use anyhow::{Context, Result};

use crate::outlook::client::LMI_API_BASE_URL;
use crate::programs::client::PROGRAMS_API_BASE_URL;
use crate::regions::DEFAULT_REGION_ID;

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing.
#[derive(Debug, Clone)]
pub struct Config {
    /// LMI-EO user key. Required: without it no outlook request can ever
    /// succeed, so the service refuses to boot instead of failing per request.
    pub gc_api_user_key: String,
    pub lmi_api_base_url: String,
    pub programs_api_base_url: String,
    pub default_region: String,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            gc_api_user_key: require_env("GC_API_USER_KEY")?,
            lmi_api_base_url: std::env::var("LMI_API_BASE_URL")
                .unwrap_or_else(|_| LMI_API_BASE_URL.to_string()),
            programs_api_base_url: std::env::var("PROGRAMS_API_BASE_URL")
                .unwrap_or_else(|_| PROGRAMS_API_BASE_URL.to_string()),
            default_region: std::env::var("DEFAULT_REGION")
                .unwrap_or_else(|_| DEFAULT_REGION_ID.to_string()),
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}
