//! Assistant configuration loaded from the environment.

use anyhow::{Context, Result};
use std::env;
use std::time::Duration;

/// Assistant config loaded from environment variables.
#[derive(Debug, Clone)]
pub struct AssistantConfig {
    pub openai_api_key: String,
    pub openai_base_url: String,
    /// Credential of the assistant that answers WhatsApp users.
    pub primary_assistant: String,
    /// Credential of the assistant that analyzes conversations. Defaults to the primary one.
    pub analyzer_assistant: String,
    pub run_timeout_secs: u64,
    pub poll_interval_ms: u64,
    /// None keeps cached assistants for the life of the process.
    pub cache_ttl_secs: Option<u64>,
}

fn parse_var<T: std::str::FromStr>(name: &str) -> Result<Option<T>>
where
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match env::var(name) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse()
            .map(Some)
            .with_context(|| format!("{} must be a number, got {:?}", name, raw)),
        _ => Ok(None),
    }
}

impl AssistantConfig {
    /// Load from environment variables.
    pub fn from_env() -> Result<Self> {
        let openai_api_key = env::var("OPENAI_API_KEY").context("OPENAI_API_KEY not set")?;
        let openai_base_url = env::var("OPENAI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let primary_assistant =
            env::var("OPENAI_API_KEY_ASSISTANT").context("OPENAI_API_KEY_ASSISTANT not set")?;
        let analyzer_assistant = env::var("OPENAI_API_KEY_ASSISTANT_ANALYZER")
            .or_else(|_| env::var("OPENAI_API_KEY_ASSISTANT_ANALIZER"))
            .unwrap_or_else(|_| primary_assistant.clone());
        let run_timeout_secs = parse_var("RUN_TIMEOUT_SECS")?.unwrap_or(30);
        let poll_interval_ms = parse_var("RUN_POLL_INTERVAL_MS")?.unwrap_or(1000);
        let cache_ttl_secs = parse_var("ASSISTANT_CACHE_TTL_SECS")?;

        if poll_interval_ms == 0 {
            anyhow::bail!("RUN_POLL_INTERVAL_MS must be greater than zero");
        }

        Ok(Self {
            openai_api_key,
            openai_base_url,
            primary_assistant,
            analyzer_assistant,
            run_timeout_secs,
            poll_interval_ms,
            cache_ttl_secs,
        })
    }

    pub fn run_timeout(&self) -> Duration {
        Duration::from_secs(self.run_timeout_secs)
    }

    pub fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    pub fn cache_ttl(&self) -> Option<Duration> {
        self.cache_ttl_secs.map(Duration::from_secs)
    }
}
