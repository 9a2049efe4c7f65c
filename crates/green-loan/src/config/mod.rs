use std::env;
use std::fmt;
use std::fs;
use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use crate::workflows::underwriting::{EvaluationConfig, EvaluationConfigError};

/// Distinguishes runtime behavior for different stages of the service.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub server: ServerConfig,
    pub telemetry: TelemetryConfig,
    pub underwriting: EvaluationConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let host = env::var("APP_HOST").unwrap_or_else(|_| "127.0.0.1".to_string());
        let port = env::var("APP_PORT")
            .unwrap_or_else(|_| "3000".to_string())
            .parse::<u16>()
            .map_err(|_| ConfigError::InvalidPort)?;

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            server: ServerConfig { host, port },
            telemetry: TelemetryConfig { log_level },
            underwriting: load_underwriting()?,
        })
    }
}

/// Policy file first, then per-dial environment overrides, then validation.
fn load_underwriting() -> Result<EvaluationConfig, ConfigError> {
    let mut config = match env::var("GREEN_LOAN_POLICY_FILE") {
        Ok(path) if !path.trim().is_empty() => {
            let path = PathBuf::from(path.trim());
            let raw = fs::read_to_string(&path).map_err(|source| ConfigError::PolicyFile {
                path: path.clone(),
                source,
            })?;
            serde_json::from_str(&raw)
                .map_err(|source| ConfigError::PolicyFormat { path, source })?
        }
        _ => EvaluationConfig::default(),
    };

    if let Some(value) = numeric_override("GREEN_LOAN_CREDITS_PER_1000")? {
        config.credits_per_thousand = value;
    }
    if let Some(value) = numeric_override("GREEN_LOAN_GAP_TOLERANCE")? {
        config.gap_tolerance = value;
    }
    if let Some(value) = numeric_override("GREEN_LOAN_BASE_RATE")? {
        config.base_interest_rate = value;
    }
    if let Some(value) = numeric_override("GREEN_LOAN_RATE_STEP")? {
        config.interest_rate_step = value;
    }

    config.validate().map_err(ConfigError::Policy)?;
    Ok(config)
}

fn numeric_override(key: &'static str) -> Result<Option<f64>, ConfigError> {
    match env::var(key) {
        Ok(raw) if !raw.trim().is_empty() => raw
            .trim()
            .parse::<f64>()
            .map(Some)
            .map_err(|_| ConfigError::InvalidNumber { key, value: raw }),
        _ => Ok(None),
    }
}

/// Settings controlling the HTTP server binding.
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl ServerConfig {
    pub fn socket_addr(&self) -> Result<SocketAddr, ConfigError> {
        if self.host.eq_ignore_ascii_case("localhost") {
            return Ok(SocketAddr::new(IpAddr::from([127, 0, 0, 1]), self.port));
        }

        let ip: IpAddr = self
            .host
            .parse()
            .map_err(|source| ConfigError::InvalidHost { source })?;

        Ok(SocketAddr::new(ip, self.port))
    }
}

/// Tracing and metrics controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidPort,
    InvalidHost {
        source: std::net::AddrParseError,
    },
    InvalidNumber {
        key: &'static str,
        value: String,
    },
    PolicyFile {
        path: PathBuf,
        source: std::io::Error,
    },
    PolicyFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
    Policy(EvaluationConfigError),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidPort => write!(f, "APP_PORT must be a valid u16"),
            ConfigError::InvalidHost { .. } => {
                write!(f, "APP_HOST must parse to an IPv4 or IPv6 address")
            }
            ConfigError::InvalidNumber { key, value } => {
                write!(f, "{key} must be a number (found '{value}')")
            }
            ConfigError::PolicyFile { path, .. } => {
                write!(f, "unable to read policy file {}", path.display())
            }
            ConfigError::PolicyFormat { path, .. } => {
                write!(f, "policy file {} is not a valid policy", path.display())
            }
            ConfigError::Policy(err) => write!(f, "invalid lending policy: {err}"),
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidPort | ConfigError::InvalidNumber { .. } => None,
            ConfigError::InvalidHost { source } => Some(source),
            ConfigError::PolicyFile { source, .. } => Some(source),
            ConfigError::PolicyFormat { source, .. } => Some(source),
            ConfigError::Policy(err) => Some(err),
        }
    }
}
