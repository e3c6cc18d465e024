//! Logger initialization.
//!
//! This module provides functions to initialize the logger with custom formatting.

use std::io::Write;

use crate::config::LogFormat;
use crate::error_handling::InitializationError;
use colored::*;
use log::LevelFilter;

/// Initializes the logger with the specified level and format.
///
/// Configures `env_logger` with custom formatting. Plain lines carry a local
/// timestamp, the colored level and the emitting component; JSON lines carry the
/// same fields under `time`, `level`, `component` and `message`. Output goes to
/// stderr so the report on stdout stays machine-readable.
///
/// The logger reads from the `RUST_LOG` environment variable by default, but
/// the provided `level` parameter will override it.
///
/// # Errors
///
/// Returns `InitializationError::LoggerError` if a logger is already installed.
///
/// # Examples
///
/// ```bash
/// # Trace every DNS question of the walk
/// caa_check www.example.com 9.9.9.9 --log-level debug
///
/// # Per-module filtering via RUST_LOG
/// RUST_LOG=caa_check=debug caa_check www.example.com 9.9.9.9
/// ```
pub fn init_logger_with(level: LevelFilter, format: LogFormat) -> Result<(), InitializationError> {
    let mut builder = env_logger::Builder::from_default_env();

    builder.filter_level(level);
    // Malformed UDP replies are reported as transport errors; keep the proto crate quiet
    builder.filter_module("trust_dns_proto", LevelFilter::Error);
    builder.filter_module("trust_dns_resolver", LevelFilter::Warn);
    builder.filter_module("caa_check", level);

    match format {
        LogFormat::Json => {
            builder.format(|buf, record| {
                let message = record.args().to_string();
                writeln!(buf, "{}", json_line(record.level(), &component(record), &message))
            });
        }
        LogFormat::Plain => {
            builder.format(|buf, record| {
                let level = record.level();
                let label = format!("{level:<5}");
                let label = match level {
                    log::Level::Error => label.red(),
                    log::Level::Warn => label.yellow(),
                    log::Level::Info => label.green(),
                    log::Level::Debug => label.blue(),
                    log::Level::Trace => label.purple(),
                };
                writeln!(
                    buf,
                    "{} {} {} {}",
                    chrono::Local::now().format("%H:%M:%S%.3f").to_string().dimmed(),
                    label,
                    component(record).cyan(),
                    record.args()
                )
            });
        }
    }

    // try_init: tests may initialize more than once per process
    builder.try_init().map_err(InitializationError::from)?;

    Ok(())
}

/// Module of a log record relative to this crate (`caa::engine`), or the full
/// target for records from other crates.
fn component(record: &log::Record<'_>) -> String {
    let target = record.module_path().unwrap_or_else(|| record.target());
    match target.strip_prefix("caa_check::") {
        Some(inner) => inner.to_string(),
        None => target.to_string(),
    }
}

/// One JSON log line: RFC 3339 time in UTC, level, component and message.
fn json_line(level: log::Level, component: &str, message: &str) -> String {
    serde_json::json!({
        "time": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        "level": level.as_str(),
        "component": component,
        "message": message,
    })
    .to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_second_init_reports_error() {
        let _ = env_logger::try_init();

        // A logger is installed by now, so this one must be rejected
        let result = init_logger_with(LevelFilter::Warn, LogFormat::Plain);
        assert!(matches!(result, Err(InitializationError::LoggerError(_))));
    }

    #[test]
    fn test_json_line_fields() {
        let line = json_line(log::Level::Warn, "caa::engine", "www.example.com: \"quoted\"");
        let value: serde_json::Value = serde_json::from_str(&line).unwrap();

        assert_eq!(value["level"], "WARN");
        assert_eq!(value["component"], "caa::engine");
        assert_eq!(value["message"], "www.example.com: \"quoted\"");
        let time = value["time"].as_str().unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(time).is_ok(), "bad time: {time}");
        assert!(time.ends_with('Z'));
    }

    #[test]
    fn test_component_strips_crate_prefix() {
        assert_eq!(
            component(
                &log::Record::builder()
                    .args(format_args!("walk"))
                    .target("caa_check::dns::client")
                    .module_path(Some("caa_check::dns::client"))
                    .build()
            ),
            "dns::client"
        );
        assert_eq!(
            component(
                &log::Record::builder()
                    .args(format_args!("walk"))
                    .target("trust_dns_proto::udp")
                    .build()
            ),
            "trust_dns_proto::udp"
        );
    }
}
