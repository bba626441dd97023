use crate::tracker::DoseScheduler;
use chrono::NaiveDate;
use std::env;
use std::fmt;
use std::path::PathBuf;

/// Distinguishes runtime behavior for different stages of the tool.
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
    pub storage: StorageConfig,
    pub schedule: ScheduleConfig,
    pub telemetry: TelemetryConfig,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("LEANLOG_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let data_dir = env::var("LEANLOG_DATA_DIR")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(StorageConfig::DEFAULT_DATA_DIR));

        let start = match env::var("LEANLOG_SCHEDULE_START") {
            Ok(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                .map_err(|source| ConfigError::InvalidScheduleStart { value: raw, source })?,
            Err(_) => ScheduleConfig::default().start,
        };

        let count = env::var("LEANLOG_SCHEDULE_COUNT")
            .unwrap_or_else(|_| ScheduleConfig::DEFAULT_COUNT.to_string())
            .trim()
            .parse::<u32>()
            .ok()
            .filter(|count| *count <= ScheduleConfig::MAX_COUNT)
            .ok_or(ConfigError::InvalidScheduleCount)?;

        let log_level = env::var("LEANLOG_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        Ok(Self {
            environment,
            storage: StorageConfig { data_dir },
            schedule: ScheduleConfig { start, count },
            telemetry: TelemetryConfig { log_level },
        })
    }
}

/// Where the key-value blobs live on disk.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    pub data_dir: PathBuf,
}

impl StorageConfig {
    pub const DEFAULT_DATA_DIR: &'static str = ".leanlog";
}

/// Defaults for the dose calendar when the caller gives no explicit range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScheduleConfig {
    pub start: NaiveDate,
    pub count: u32,
}

impl ScheduleConfig {
    pub const DEFAULT_COUNT: u32 = 16;
    pub const MAX_COUNT: u32 = DoseScheduler::MAX_OCCURRENCES;
}

impl Default for ScheduleConfig {
    fn default() -> Self {
        Self {
            start: NaiveDate::from_ymd_opt(2026, 1, 16).unwrap_or_default(),
            count: Self::DEFAULT_COUNT,
        }
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

#[derive(Debug)]
pub enum ConfigError {
    InvalidScheduleStart {
        value: String,
        source: chrono::ParseError,
    },
    InvalidScheduleCount,
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::InvalidScheduleStart { value, .. } => {
                write!(f, "LEANLOG_SCHEDULE_START '{value}' must be YYYY-MM-DD")
            }
            ConfigError::InvalidScheduleCount => {
                write!(
                    f,
                    "LEANLOG_SCHEDULE_COUNT must be an integer from 0 to {}",
                    ScheduleConfig::MAX_COUNT
                )
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::InvalidScheduleStart { source, .. } => Some(source),
            ConfigError::InvalidScheduleCount => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::{Mutex, OnceLock};

    fn env_guard() -> &'static Mutex<()> {
        static GUARD: OnceLock<Mutex<()>> = OnceLock::new();
        GUARD.get_or_init(|| Mutex::new(()))
    }

    fn reset_env() {
        env::remove_var("LEANLOG_ENV");
        env::remove_var("LEANLOG_DATA_DIR");
        env::remove_var("LEANLOG_SCHEDULE_START");
        env::remove_var("LEANLOG_SCHEDULE_COUNT");
        env::remove_var("LEANLOG_LOG_LEVEL");
    }

    #[test]
    fn load_uses_defaults_when_env_missing() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        let config = AppConfig::load().expect("config loads with defaults");
        assert_eq!(config.environment, AppEnvironment::Development);
        assert_eq!(config.storage.data_dir, PathBuf::from(".leanlog"));
        assert_eq!(
            config.schedule.start,
            NaiveDate::from_ymd_opt(2026, 1, 16).expect("valid date")
        );
        assert_eq!(config.schedule.count, 16);
        assert_eq!(config.telemetry.log_level, "info");
    }

    #[test]
    fn reads_overrides_from_env() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("LEANLOG_ENV", "prod");
        env::set_var("LEANLOG_DATA_DIR", "/tmp/leanlog-data");
        env::set_var("LEANLOG_SCHEDULE_START", "2026-03-02");
        env::set_var("LEANLOG_SCHEDULE_COUNT", "20");
        let config = AppConfig::load().expect("config loads");
        reset_env();

        assert_eq!(config.environment, AppEnvironment::Production);
        assert_eq!(config.storage.data_dir, PathBuf::from("/tmp/leanlog-data"));
        assert_eq!(
            config.schedule.start,
            NaiveDate::from_ymd_opt(2026, 3, 2).expect("valid date")
        );
        assert_eq!(config.schedule.count, 20);
    }

    #[test]
    fn rejects_malformed_schedule_start() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("LEANLOG_SCHEDULE_START", "16/01/2026");
        let result = AppConfig::load();
        reset_env();

        assert!(matches!(
            result,
            Err(ConfigError::InvalidScheduleStart { .. })
        ));
    }

    #[test]
    fn rejects_schedule_counts_beyond_the_cap() {
        let _lock = env_guard().lock().expect("env mutex poisoned");
        reset_env();
        env::set_var("LEANLOG_SCHEDULE_COUNT", "14000000");
        let result = AppConfig::load();
        reset_env();

        assert!(matches!(result, Err(ConfigError::InvalidScheduleCount)));
    }
}
