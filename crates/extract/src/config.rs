use std::time::Duration;

use crate::error::{NerError, Result};

pub const DEFAULT_MODEL: &str = "gemini-1.5-flash";
pub const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com/v1beta";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

/// Ordered list of model identifiers. Never empty once constructed.
#[derive(Debug, Clone, PartialEq)]
pub struct ModelPriority(Vec<String>);

impl ModelPriority {
    /// Parse a comma separated list, trimming each entry and dropping blanks.
    pub fn parse(raw: &str) -> Result<Self> {
        let models: Vec<String> = raw
            .split(',')
            .map(str::trim)
            .filter(|m| !m.is_empty())
            .map(str::to_string)
            .collect();

        if models.is_empty() {
            return Err(NerError::Config(format!(
                "MODEL_PRIORITY has no model names: {:?}",
                raw
            )));
        }
        Ok(Self(models))
    }

    pub fn as_slice(&self) -> &[String] {
        &self.0
    }
}

impl Default for ModelPriority {
    fn default() -> Self {
        Self(vec![DEFAULT_MODEL.to_string()])
    }
}

#[derive(Debug, Clone)]
pub struct NerConfig {
    pub api_key: String,
    pub models: ModelPriority,
    pub base_url: String,
    pub request_timeout: Duration,
}

impl NerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. `from_env` is this over the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = lookup("GEMINI_API_KEY")
            .filter(|k| !k.trim().is_empty())
            .ok_or_else(|| NerError::Config("GEMINI_API_KEY is not set".to_string()))?;

        let models = match lookup("MODEL_PRIORITY") {
            Some(raw) => ModelPriority::parse(&raw)?,
            None => ModelPriority::default(),
        };

        let base_url = lookup("GEMINI_BASE_URL")
            .map(|u| u.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

        let timeout_secs = match lookup("NER_REQUEST_TIMEOUT_SECS") {
            Some(raw) => raw.trim().parse::<u64>().map_err(|_| {
                NerError::Config(format!("NER_REQUEST_TIMEOUT_SECS is not a number: {:?}", raw))
            })?,
            None => DEFAULT_REQUEST_TIMEOUT_SECS,
        };

        Ok(Self {
            api_key,
            models,
            base_url,
            request_timeout: Duration::from_secs(timeout_secs),
        })
    }
}
