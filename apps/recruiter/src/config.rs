use std::time::Duration;

use anyhow::{Context, Result};

const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_PORT: u16 = 8080;

/// Configuration loaded from environment variables.
/// Nothing is required: with no variables set the client runs against the simulated backend.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of a real Recruiting Backend. `None` selects the in-process mock.
    pub backend_url: Option<String>,
    /// Per-call deadline applied to every backend operation.
    pub request_timeout: Duration,
    /// Whether the mock sleeps like the real service would.
    pub mock_latency: bool,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the config from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let backend_url = lookup("BACKEND_URL")
            .map(|url| url.trim().trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty());

        let request_timeout = match lookup("REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs = raw
                    .parse::<u64>()
                    .context("REQUEST_TIMEOUT_SECS must be a whole number of seconds")?;
                anyhow::ensure!(secs > 0, "REQUEST_TIMEOUT_SECS must be greater than zero");
                Duration::from_secs(secs)
            }
            None => Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        };

        let mock_latency = match lookup("MOCK_LATENCY") {
            Some(raw) => parse_flag(&raw)
                .with_context(|| format!("MOCK_LATENCY must be true or false, got '{raw}'"))?,
            None => true,
        };

        let port = match lookup("PORT") {
            Some(raw) => raw
                .parse::<u16>()
                .context("PORT must be a valid port number")?,
            None => DEFAULT_PORT,
        };

        Ok(Config {
            backend_url,
            request_timeout,
            mock_latency,
            port,
            rust_log: lookup("RUST_LOG").unwrap_or_else(|| "info".to_string()),
        })
    }
}

fn parse_flag(raw: &str) -> Option<bool> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Some(true),
        "0" | "false" | "no" | "off" => Some(false),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> Result<Config> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Config::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults_select_mock_backend() {
        let config = config_from(&[]).unwrap();
        assert!(config.backend_url.is_none());
        assert_eq!(config.request_timeout, Duration::from_secs(30));
        assert!(config.mock_latency);
        assert_eq!(config.port, 8080);
        assert_eq!(config.rust_log, "info");
    }

    #[test]
    fn test_backend_url_trailing_slash_is_trimmed() {
        let config = config_from(&[("BACKEND_URL", "http://localhost:9000/")]).unwrap();
        assert_eq!(config.backend_url.as_deref(), Some("http://localhost:9000"));
    }

    #[test]
    fn test_blank_backend_url_means_mock() {
        let config = config_from(&[("BACKEND_URL", "   ")]).unwrap();
        assert!(config.backend_url.is_none());
    }

    #[test]
    fn test_zero_timeout_rejected() {
        assert!(config_from(&[("REQUEST_TIMEOUT_SECS", "0")]).is_err());
        assert!(config_from(&[("REQUEST_TIMEOUT_SECS", "soon")]).is_err());
    }

    #[test]
    fn test_mock_latency_flag() {
        let config = config_from(&[("MOCK_LATENCY", "off")]).unwrap();
        assert!(!config.mock_latency);
        assert!(config_from(&[("MOCK_LATENCY", "maybe")]).is_err());
    }

    #[test]
    fn test_invalid_port_rejected() {
        assert!(config_from(&[("PORT", "99999")]).is_err());
    }
}
