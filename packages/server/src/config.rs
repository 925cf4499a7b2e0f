use anyhow::{Context, Result};
use dotenvy::dotenv;
use std::env;
use std::time::Duration;

use crate::domains::companies::activities::EnrichmentSettings;
use crate::kernel::GPT_4O_MINI;

pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    pub openai_api_key: Option<String>,
    /// Explicit `OPENAI_ENABLED` override, if set
    pub openai_enabled: Option<bool>,
    pub openai_model: String,
    pub enrichment_timeout: Duration,
    pub enrichment_concurrency: usize,
    pub max_upload_bytes: usize,
    pub allowed_origins: Vec<String>,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from any key lookup (tests pass a map instead of the process env)
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        Ok(Self {
            database_url: var("DATABASE_URL").context("DATABASE_URL must be set")?,
            port: var("PORT")
                .unwrap_or_else(|| "8080".to_string())
                .parse()
                .context("PORT must be a valid number")?,
            openai_api_key: var("OPENAI_API_KEY"),
            openai_enabled: var("OPENAI_ENABLED")
                .map(|v| parse_flag(&v))
                .transpose()
                .context("OPENAI_ENABLED must be one of 1, 0, true, false")?,
            openai_model: var("OPENAI_MODEL").unwrap_or_else(|| GPT_4O_MINI.to_string()),
            enrichment_timeout: Duration::from_secs(
                var("ENRICHMENT_TIMEOUT_SECS")
                    .unwrap_or_else(|| "20".to_string())
                    .parse()
                    .context("ENRICHMENT_TIMEOUT_SECS must be a whole number of seconds")?,
            ),
            enrichment_concurrency: var("ENRICHMENT_CONCURRENCY")
                .unwrap_or_else(|| "8".to_string())
                .parse::<usize>()
                .context("ENRICHMENT_CONCURRENCY must be a positive number")?
                .max(1),
            max_upload_bytes: var("MAX_UPLOAD_BYTES")
                .map(|v| v.parse())
                .transpose()
                .context("MAX_UPLOAD_BYTES must be a number")?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
            allowed_origins: var("ALLOWED_ORIGINS")
                .map(|v| {
                    v.split(',')
                        .map(|s| s.trim().to_string())
                        .filter(|s| !s.is_empty())
                        .collect()
                })
                .unwrap_or_default(),
        })
    }

    /// Key present, and the flag unset or truthy
    pub fn openai_enabled(&self) -> bool {
        self.openai_api_key.is_some() && self.openai_enabled.unwrap_or(true)
    }

    pub fn enrichment_settings(&self) -> EnrichmentSettings {
        EnrichmentSettings {
            timeout: self.enrichment_timeout,
            concurrency: self.enrichment_concurrency,
        }
    }
}

fn parse_flag(value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" => Ok(true),
        "0" | "false" => Ok(false),
        other => anyhow::bail!("unrecognized flag value {:?}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(pairs: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = config(&[("DATABASE_URL", "postgres://localhost/companies")]).unwrap();

        assert_eq!(config.port, 8080);
        assert_eq!(config.openai_model, "gpt-4o-mini");
        assert_eq!(config.enrichment_timeout, Duration::from_secs(20));
        assert_eq!(config.enrichment_concurrency, 8);
        assert_eq!(config.max_upload_bytes, 10 * 1024 * 1024);
        assert!(config.allowed_origins.is_empty());
        assert!(!config.openai_enabled());
    }

    #[test]
    fn database_url_is_required() {
        assert!(config(&[("PORT", "9000")]).is_err());
    }

    #[test]
    fn openai_enabled_requires_key_and_flag() {
        let key_only = config(&[("DATABASE_URL", "x"), ("OPENAI_API_KEY", "sk-test")]).unwrap();
        assert!(key_only.openai_enabled());

        let disabled = config(&[
            ("DATABASE_URL", "x"),
            ("OPENAI_API_KEY", "sk-test"),
            ("OPENAI_ENABLED", "false"),
        ])
        .unwrap();
        assert!(!disabled.openai_enabled());

        let flag_only = config(&[("DATABASE_URL", "x"), ("OPENAI_ENABLED", "1")]).unwrap();
        assert!(!flag_only.openai_enabled());

        assert!(config(&[("DATABASE_URL", "x"), ("OPENAI_ENABLED", "maybe")]).is_err());
    }

    #[test]
    fn parses_origins_and_limits() {
        let config = config(&[
            ("DATABASE_URL", "x"),
            ("ALLOWED_ORIGINS", "http://localhost:3000, https://app.example.com,"),
            ("ENRICHMENT_CONCURRENCY", "0"),
            ("MAX_UPLOAD_BYTES", "1024"),
        ])
        .unwrap();

        assert_eq!(
            config.allowed_origins,
            vec!["http://localhost:3000", "https://app.example.com"]
        );
        assert_eq!(config.enrichment_concurrency, 1);
        assert_eq!(config.max_upload_bytes, 1024);
    }
}
