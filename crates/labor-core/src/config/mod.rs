use std::env;
use std::fmt;

use crate::labor::ConflictPolicy;

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
    pub telemetry: TelemetryConfig,
    pub labor: LaborConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
        let show_targets = env::var("APP_LOG_TARGETS")
            .map(|raw| matches!(raw.trim(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let conflict_policy = match env::var("LABOR_CONFLICT_POLICY") {
            Ok(raw) => ConflictPolicy::parse(&raw)
                .ok_or_else(|| ConfigError::InvalidConflictPolicy { value: raw })?,
            Err(_) => ConflictPolicy::default(),
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig {
                log_level,
                show_targets,
            },
            labor: LaborConfig { conflict_policy },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
    /// Prefix each line with the emitting module.
    pub show_targets: bool,
}

/// Business rule dials for the lifecycle engine.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct LaborConfig {
    pub conflict_policy: ConflictPolicy,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidConflictPolicy { value: String },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidConflictPolicy { value } => write!(
                f,
                "LABOR_CONFLICT_POLICY must be 'any_overlap' or 'same_enterprise_and_type' (found '{value}')"
            ),
        }
    }
}

impl std::error::Error for ConfigError {}
