use anyhow::{Context, Result};
use extract::SpanStrategy;
use serde::{Deserialize, Serialize};
use std::time::Duration;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub qa: QaConfig,
    pub parser: ParserConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    pub bind_addr: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QaConfig {
    pub base_url: String,
    /// Sent as `X-Token` on every backend call.
    pub token: String,
    pub request_timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ParserConfig {
    pub strategy: SpanStrategy,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                bind_addr: "0.0.0.0:3000".to_string(),
            },
            qa: QaConfig {
                base_url: "http://localhost:8000".to_string(),
                token: String::new(),
                request_timeout_secs: 60,
            },
            parser: ParserConfig {
                strategy: SpanStrategy::Balanced,
            },
        }
    }
}

impl AppConfig {
    /// Defaults overridden by `BIND_ADDR`, `QA_BASE_URL`, `QA_TOKEN`,
    /// `QA_TIMEOUT_SECS` and `PAYLOAD_STRATEGY`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();

        if let Some(addr) = lookup("BIND_ADDR") {
            config.server.bind_addr = addr;
        }
        if let Some(url) = lookup("QA_BASE_URL") {
            config.qa.base_url = url;
        }
        if let Some(token) = lookup("QA_TOKEN") {
            config.qa.token = token;
        }
        if let Some(secs) = lookup("QA_TIMEOUT_SECS") {
            config.qa.request_timeout_secs = secs
                .trim()
                .parse()
                .with_context(|| format!("QA_TIMEOUT_SECS must be a whole number, got '{}'", secs))?;
        }
        if let Some(strategy) = lookup("PAYLOAD_STRATEGY") {
            config.parser.strategy = strategy
                .parse()
                .map_err(anyhow::Error::msg)
                .context("Invalid PAYLOAD_STRATEGY")?;
        }

        Ok(config)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.qa.request_timeout_secs)
    }
}
