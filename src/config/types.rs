//! Configuration types and CLI options.
//!
//! This module defines enums and structs used for command-line argument parsing
//! and configuration.

use std::net::{IpAddr, Ipv4Addr, SocketAddr};
use std::time::Duration;

use clap::{Parser, ValueEnum};
use thiserror::Error;

use crate::config::constants::{DNS_PORT, DNS_TIMEOUT_SECS};

/// Logging level for the application.
///
/// Controls the verbosity of log output, from most restrictive (Error) to most
/// verbose (Trace).
#[derive(Clone, Debug, ValueEnum)]
pub enum LogLevel {
    /// Only error messages
    Error,
    /// Error and warning messages
    Warn,
    /// Error, warning, and informational messages
    Info,
    /// All messages except trace
    Debug,
    /// All messages including trace
    Trace,
}

impl From<LogLevel> for log::LevelFilter {
    fn from(l: LogLevel) -> Self {
        match l {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

/// Log output format.
///
/// Controls how log messages are formatted:
/// - `Plain`: Human-readable format with colors (default)
/// - `Json`: Structured JSON format for machine parsing
#[derive(Clone, Debug, ValueEnum)]
pub enum LogFormat {
    /// Human-readable format with colors (default)
    Plain,
    /// Structured JSON format for machine parsing
    Json,
}

/// Which record set populates `issue`/`issuewild` when a CNAME target is accepted.
///
/// `Origin` keeps the historical behavior of reading the walk's leaf record set
/// (which is always empty at that point, so the alias branch never accepts).
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, ValueEnum)]
pub enum AliasRecordSource {
    /// Use the record set of the CNAME target that was queried
    #[default]
    Target,
    /// Use the record set of the original hostname
    Origin,
}

/// Library configuration (no CLI dependencies).
///
/// # Examples
///
/// ```no_run
/// use caa_check::Config;
///
/// let config = Config {
///     hostname: "www.example.com".to_string(),
///     full: true,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone)]
pub struct Config {
    /// Hostname to evaluate (case-insensitive)
    pub hostname: String,

    /// Nameserver address; queries go to port 53
    pub nameserver: IpAddr,

    /// Query every level of the hierarchy without taking a policy decision
    pub full: bool,

    /// Per-query timeout in seconds
    pub timeout_seconds: u64,

    /// Record set used for issuer lists on CNAME acceptance
    pub alias_records: AliasRecordSource,

    /// Log level
    pub log_level: LogLevel,

    /// Log format
    pub log_format: LogFormat,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            hostname: String::new(),
            nameserver: IpAddr::V4(Ipv4Addr::new(8, 8, 8, 8)),
            full: false,
            timeout_seconds: DNS_TIMEOUT_SECS,
            alias_records: AliasRecordSource::Target,
            log_level: LogLevel::Info,
            log_format: LogFormat::Plain,
        }
    }
}

/// A configuration value that cannot be used.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("invalid {field}: {message}")]
pub struct ConfigValidationError {
    /// Name of the offending field
    pub field: &'static str,
    /// What is wrong with it
    pub message: String,
}

impl Config {
    /// Checks that the configuration can drive a resolution.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigValidationError` naming the first invalid field.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.hostname.trim().is_empty() {
            return Err(ConfigValidationError {
                field: "hostname",
                message: "must not be empty".to_string(),
            });
        }
        if self.timeout_seconds == 0 {
            return Err(ConfigValidationError {
                field: "timeout_seconds",
                message: "must be greater than 0".to_string(),
            });
        }
        Ok(())
    }

    /// Nameserver endpoint the resolver client talks to.
    pub fn nameserver_addr(&self) -> SocketAddr {
        SocketAddr::new(self.nameserver, DNS_PORT)
    }

    /// Per-query timeout.
    pub fn query_timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_seconds)
    }
}

/// Command-line options.
#[derive(Debug, Parser)]
#[command(
    name = "caa_check",
    version,
    about = "Report which CAs may issue certificates for a hostname"
)]
pub struct Cli {
    /// Hostname to evaluate
    pub hostname: String,

    /// Nameserver IP address (queried on port 53)
    pub nameserver: IpAddr,

    /// Query every level of the hierarchy instead of stopping at the first CAA set
    #[arg(long)]
    pub full: bool,

    /// Per-query timeout in seconds
    #[arg(long, default_value_t = DNS_TIMEOUT_SECS)]
    pub timeout_seconds: u64,

    /// Record set used for issuer lists when a CNAME target is accepted
    #[arg(long, value_enum, default_value_t = AliasRecordSource::Target)]
    pub alias_records: AliasRecordSource,

    /// Log level
    #[arg(long, value_enum, default_value_t = LogLevel::Warn)]
    pub log_level: LogLevel,

    /// Log format
    #[arg(long, value_enum, default_value_t = LogFormat::Plain)]
    pub log_format: LogFormat,
}

impl From<Cli> for Config {
    fn from(cli: Cli) -> Self {
        Self {
            hostname: cli.hostname.to_lowercase(),
            nameserver: cli.nameserver,
            full: cli.full,
            timeout_seconds: cli.timeout_seconds,
            alias_records: cli.alias_records,
            log_level: cli.log_level,
            log_format: cli.log_format,
        }
    }
}
