use anyhow::{Context, Result};

#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub log_format: LogFormat,
    pub model_version: String,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LogFormat {
    Pretty,
    Json, // one JSON object per line, for log shippers
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 9090,
            log_format: LogFormat::Pretty,
            model_version: "gemini-ner".to_string(),
        }
    }
}

impl ServerConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(host) = lookup("HOST") {
            config.host = host;
        }
        if let Some(port) = lookup("PORT") {
            config.port = port
                .trim()
                .parse()
                .with_context(|| format!("PORT is not a valid port: {:?}", port))?;
        }
        if let Some(format) = lookup("LOG_FORMAT") {
            config.log_format = match format.trim().to_lowercase().as_str() {
                "json" => LogFormat::Json,
                "pretty" | "" => LogFormat::Pretty,
                other => anyhow::bail!("LOG_FORMAT must be json or pretty, got {:?}", other),
            };
        }
        if let Some(version) = lookup("MODEL_VERSION") {
            config.model_version = version;
        }

        Ok(config)
    }

    pub fn addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = ServerConfig::from_lookup(|_| None).unwrap();
        assert_eq!(config.addr(), "0.0.0.0:9090");
        assert_eq!(config.log_format, LogFormat::Pretty);
    }

    #[test]
    fn test_overrides() {
        let config = ServerConfig::from_lookup(|key| match key {
            "PORT" => Some("8080".to_string()),
            "LOG_FORMAT" => Some("JSON".to_string()),
            _ => None,
        })
        .unwrap();
        assert_eq!(config.port, 8080);
        assert_eq!(config.log_format, LogFormat::Json);
    }

    #[test]
    fn test_invalid_values() {
        assert!(ServerConfig::from_lookup(|key| (key == "PORT").then(|| "nine".to_string())).is_err());
        assert!(ServerConfig::from_lookup(|key| (key == "LOG_FORMAT").then(|| "xml".to_string())).is_err());
    }
}
