use crate::config::TelemetryConfig;
use thiserror::Error;
use tracing_subscriber::filter::ParseError;
use tracing_subscriber::EnvFilter;

/// Targets that follow the configured level. Everything else stays at `warn`.
const LOG_TARGETS: [&str; 2] = ["leanlog", "leanlog_cli"];
const OTHER_TARGETS_LEVEL: &str = "warn";

#[derive(Debug, Error)]
pub enum TelemetryError {
    #[error("invalid log filter '{value}' (set LEANLOG_LOG_LEVEL or RUST_LOG)")]
    EnvFilter {
        value: String,
        #[source]
        source: ParseError,
    },
    #[error("failed to install tracing subscriber: {0}")]
    Subscriber(#[source] Box<dyn std::error::Error + Send + Sync>),
}

/// Expand a bare level such as `debug` into per-target directives for the
/// tracker crates. Anything that already names targets is used as given.
fn filter_directives(level: &str) -> String {
    let level = match level.trim() {
        "" => "info",
        level => level,
    };
    if level.contains('=') || level.contains(',') {
        return level.to_string();
    }

    let mut directives = vec![OTHER_TARGETS_LEVEL.to_string()];
    directives.extend(LOG_TARGETS.iter().map(|target| format!("{target}={level}")));
    directives.join(",")
}

/// Install the global subscriber. `RUST_LOG` wins over the configured level.
/// Logs go to stderr so command output on stdout stays clean for piping.
pub fn init(config: &TelemetryConfig) -> Result<(), TelemetryError> {
    let env_filter = match EnvFilter::try_from_default_env() {
        Ok(filter) => filter,
        Err(_) => {
            let directives = filter_directives(&config.log_level);
            EnvFilter::try_new(&directives)
                .map_err(|source| TelemetryError::EnvFilter { value: directives, source })?
        }
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .compact()
        .with_ansi(false)
        .try_init()
        .map_err(TelemetryError::Subscriber)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_level_is_scoped_to_tracker_targets() {
        assert_eq!(
            filter_directives(" debug "),
            "warn,leanlog=debug,leanlog_cli=debug"
        );
        assert_eq!(filter_directives(""), "warn,leanlog=info,leanlog_cli=info");
    }

    #[test]
    fn explicit_directives_pass_through() {
        assert_eq!(
            filter_directives("leanlog::tracker=trace"),
            "leanlog::tracker=trace"
        );
        assert_eq!(filter_directives("info,csv=debug"), "info,csv=debug");
    }

    #[test]
    fn scoped_directives_build_a_filter() {
        assert!(EnvFilter::try_new(filter_directives("info")).is_ok());
        assert!(EnvFilter::try_new(filter_directives("loud")).is_err());
    }
}
