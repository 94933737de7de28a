use std::env;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use url::Url;

const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_PORT: u16 = 8081;
const DEFAULT_DETECTOR_TIMEOUT_SECS: u64 = 30;
const DEFAULT_MAX_PAYLOAD_MB: usize = 10;

#[derive(Error, Debug, PartialEq)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    Missing(&'static str),
    #[error("Invalid value for {name}: {value}")]
    Invalid { name: &'static str, value: String },
    #[error("URL parsing failed for DETECTOR_URL: {0}")]
    DetectorUrl(#[from] url::ParseError),
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub frontend_dir: PathBuf,
    pub detector_url: Url,
    pub detector_timeout: Duration,
    pub max_payload_bytes: usize,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| env::var(name).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let host = lookup("HOST").unwrap_or_else(|| DEFAULT_HOST.to_string());
        let port = parse_or("PORT", lookup("PORT"), DEFAULT_PORT)?;

        let frontend_dir = match lookup("FRONTEND_DIR") {
            Some(dir) => PathBuf::from(dir),
            None => match lookup("CARGO_MANIFEST_DIR") {
                Some(manifest_dir) => PathBuf::from(format!("{}/../frontend/dist", manifest_dir)),
                None => PathBuf::from("/usr/src/app/frontend/dist"),
            },
        };

        let detector_url = lookup("DETECTOR_URL").ok_or(ConfigError::Missing("DETECTOR_URL"))?;
        let detector_url = Url::parse(&detector_url)?;

        let timeout_secs = parse_or(
            "DETECTOR_TIMEOUT_SECS",
            lookup("DETECTOR_TIMEOUT_SECS"),
            DEFAULT_DETECTOR_TIMEOUT_SECS,
        )?;
        let max_payload_mb: usize =
            parse_or("MAX_PAYLOAD_MB", lookup("MAX_PAYLOAD_MB"), DEFAULT_MAX_PAYLOAD_MB)?;
        let max_payload_bytes = max_payload_mb
            .checked_mul(1024 * 1024)
            .ok_or_else(|| ConfigError::Invalid {
                name: "MAX_PAYLOAD_MB",
                value: max_payload_mb.to_string(),
            })?;

        Ok(Self {
            host,
            port,
            frontend_dir,
            detector_url,
            detector_timeout: Duration::from_secs(timeout_secs),
            max_payload_bytes,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

fn parse_or<T: std::str::FromStr>(
    name: &'static str,
    value: Option<String>,
    default: T,
) -> Result<T, ConfigError> {
    match value {
        None => Ok(default),
        Some(raw) => raw
            .trim()
            .parse()
            .map_err(|_| ConfigError::Invalid { name, value: raw }),
    }
}
