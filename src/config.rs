use serde::Deserialize;
use std::time::Duration;

/// Address of the public fiscal-code web service.
pub const DEFAULT_BASE_URL: &str = "http://webservices.dotnethell.it/codicefiscale.asmx";

/// Exact text the service returns for a code that passes verification.
pub const DEFAULT_VALIDITY_MARKER: &str = "Il codice è valido!";

pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Settings injected into the orchestrator.
///
/// Kept separate from [`Config`] so tests can point the client at a mock service
/// without touching the environment.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ServiceConfig {
    pub base_url: String,
    pub validity_marker: String,
    pub timeout_secs: u64,
}

impl ServiceConfig {
    /// Reads only the fiscal-code service settings, so callers without a server port
    /// (the CLI) are not affected by `PORT`.
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        Self::from_vars(
            std::env::var("CFISCALE_BASE_URL").ok(),
            std::env::var("CFISCALE_VALIDITY_MARKER").ok(),
            std::env::var("CFISCALE_TIMEOUT_SECS").ok(),
        )
    }

    fn from_vars(
        base_url: Option<String>,
        validity_marker: Option<String>,
        timeout_secs: Option<String>,
    ) -> anyhow::Result<Self> {
        Ok(Self {
            base_url: parse_base_url(base_url)?,
            validity_marker: validity_marker
                .filter(|s| !s.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_VALIDITY_MARKER.to_string()),
            timeout_secs: parse_timeout(timeout_secs)?,
        })
    }

    /// Builds a config for `base_url` with the default marker and timeout.
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Self::default()
        }
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            validity_marker: DEFAULT_VALIDITY_MARKER.to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }
}

/// Process configuration for the binaries.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub port: u16,
    pub service: ServiceConfig,
}

impl Config {
    pub fn from_env() -> anyhow::Result<Self> {
        dotenvy::dotenv().ok();

        let config = Self {
            port: std::env::var("PORT")
                .unwrap_or_else(|_| "3000".to_string())
                .parse()
                .map_err(|_| anyhow::anyhow!("PORT must be a valid number between 1-65535"))?,
            service: ServiceConfig::from_env()?,
        };

        tracing::info!("Configuration loaded successfully");
        tracing::debug!("Fiscal code service URL: {}", config.service.base_url);
        tracing::debug!("Request timeout: {}s", config.service.timeout_secs);
        tracing::debug!("Server Port: {}", config.port);

        Ok(config)
    }
}

fn parse_base_url(raw: Option<String>) -> anyhow::Result<String> {
    let Some(url) = raw else {
        return Ok(DEFAULT_BASE_URL.to_string());
    };
    if url.trim().is_empty() {
        anyhow::bail!("CFISCALE_BASE_URL cannot be empty");
    }
    if !url.starts_with("http://") && !url.starts_with("https://") {
        anyhow::bail!("CFISCALE_BASE_URL must start with http:// or https://");
    }
    Ok(url)
}

fn parse_timeout(raw: Option<String>) -> anyhow::Result<u64> {
    let Some(value) = raw else {
        return Ok(DEFAULT_TIMEOUT_SECS);
    };
    match value.trim().parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(secs),
        _ => anyhow::bail!("CFISCALE_TIMEOUT_SECS must be a positive number of seconds"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_base_url_defaults_when_unset() {
        assert_eq!(parse_base_url(None).unwrap(), DEFAULT_BASE_URL);
    }

    #[test]
    fn test_base_url_rejects_blank_and_bad_scheme() {
        assert!(parse_base_url(Some("  ".to_string())).is_err());
        assert!(parse_base_url(Some("ftp://example.com".to_string())).is_err());
        assert_eq!(
            parse_base_url(Some("https://mock.local/cf.asmx".to_string())).unwrap(),
            "https://mock.local/cf.asmx"
        );
    }

    #[test]
    fn test_timeout_parsing() {
        assert_eq!(parse_timeout(None).unwrap(), 30);
        assert_eq!(parse_timeout(Some("5".to_string())).unwrap(), 5);
        assert!(parse_timeout(Some("0".to_string())).is_err());
        assert!(parse_timeout(Some("soon".to_string())).is_err());
    }

    #[test]
    fn test_service_config_from_vars() {
        let service = ServiceConfig::from_vars(None, Some("  ".to_string()), None).unwrap();
        assert_eq!(service, ServiceConfig::default());

        let service = ServiceConfig::from_vars(
            Some("http://mock.local".to_string()),
            Some("OK".to_string()),
            Some("7".to_string()),
        )
        .unwrap();
        assert_eq!(service.base_url, "http://mock.local");
        assert_eq!(service.validity_marker, "OK");
        assert_eq!(service.timeout_secs, 7);

        assert!(ServiceConfig::from_vars(None, None, Some("0".to_string())).is_err());
    }

    #[test]
    fn test_service_config_new_keeps_defaults() {
        let service = ServiceConfig::new("http://127.0.0.1:9000");
        assert_eq!(service.base_url, "http://127.0.0.1:9000");
        assert_eq!(service.validity_marker, DEFAULT_VALIDITY_MARKER);
        assert_eq!(service.timeout(), Duration::from_secs(30));
    }
}
