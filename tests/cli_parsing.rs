//! Tests for command-line parsing and its conversion into `Config`.

use caa_check::{AliasRecordSource, Cli, Config, LogFormat, LogLevel};
use clap::Parser;

#[test]
fn test_cli_defaults() {
    let args = ["caa_check", "www.example.com", "8.8.8.8"];
    let cli = Cli::try_parse_from(args.iter()).expect("Should parse positional arguments");

    assert_eq!(cli.hostname, "www.example.com");
    assert_eq!(cli.nameserver.to_string(), "8.8.8.8");
    assert!(!cli.full);
    assert_eq!(cli.timeout_seconds, 3);
    assert_eq!(cli.alias_records, AliasRecordSource::Target);
    // LogLevel and LogFormat don't implement PartialEq, so we compare via conversion
    assert_eq!(
        log::LevelFilter::from(cli.log_level.clone()),
        log::LevelFilter::from(LogLevel::Warn)
    );
    match cli.log_format {
        LogFormat::Plain => {}
        _ => panic!("Should be Plain format"),
    }
}

#[test]
fn test_cli_with_options() {
    let args = vec![
        "caa_check",
        "Shop.Example.COM",
        "2001:4860:4860::8888",
        "--full",
        "--timeout-seconds",
        "10",
        "--alias-records",
        "origin",
        "--log-level",
        "debug",
        "--log-format",
        "json",
    ];
    let config = Config::from(Cli::try_parse_from(args.iter()).expect("Should parse options"));

    assert_eq!(config.hostname, "shop.example.com");
    assert!(config.nameserver.is_ipv6());
    assert!(config.full);
    assert_eq!(config.query_timeout().as_secs(), 10);
    assert_eq!(config.nameserver_addr().port(), 53);
    assert_eq!(config.alias_records, AliasRecordSource::Origin);
    assert_eq!(
        log::LevelFilter::from(config.log_level.clone()),
        log::LevelFilter::Debug
    );
    match config.log_format {
        LogFormat::Json => {}
        _ => panic!("Should be Json format"),
    }
}

#[test]
fn test_cli_requires_nameserver() {
    let args = ["caa_check", "www.example.com"];
    assert!(Cli::try_parse_from(args.iter()).is_err());
}

#[test]
fn test_cli_rejects_hostname_as_nameserver() {
    let args = ["caa_check", "www.example.com", "ns1.example.com"];
    assert!(Cli::try_parse_from(args.iter()).is_err());
}

#[test]
fn test_cli_rejects_unknown_alias_source() {
    let args = [
        "caa_check",
        "www.example.com",
        "8.8.8.8",
        "--alias-records",
        "both",
    ];
    assert!(Cli::try_parse_from(args.iter()).is_err());
}

#[test]
fn test_zero_timeout_fails_validation() {
    let args = [
        "caa_check",
        "www.example.com",
        "8.8.8.8",
        "--timeout-seconds",
        "0",
    ];
    let config = Config::from(Cli::try_parse_from(args.iter()).expect("Should parse"));
    let err = config.validate().unwrap_err();
    assert_eq!(err.to_string(), "invalid timeout_seconds: must be greater than 0");
}
