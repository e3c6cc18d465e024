//! caa_check library: CAA issuance policy resolution
//!
//! This library evaluates which certificate authorities may issue certificates for a
//! hostname. It walks the hostname's DNS hierarchy up to its registrable domain,
//! follows CNAME aliases, checks DNSSEC consistency on every answer, and produces a
//! report of issuer lists, per-name results and advisory controls.
//!
//! # Example
//!
//! ```no_run
//! use caa_check::{run_check, Config};
//!
//! # #[tokio::main(flavor = "current_thread")]
//! # async fn main() {
//! let config = Config {
//!     hostname: "www.example.com".to_string(),
//!     ..Default::default()
//! };
//!
//! let report = run_check(&config).await;
//! println!("{} may be issued by {:?}", report.domain(), report.issue());
//! # }
//! ```
//!
//! # Requirements
//!
//! This library requires a Tokio runtime with I/O and timers enabled. Queries are
//! issued one at a time, so a current-thread runtime is sufficient.

#![warn(missing_docs)]

pub mod caa;
pub mod config;
pub mod dns;
pub mod domain;
pub mod error_handling;
pub mod initialization;

// Re-export public API
pub use caa::{CaaEngine, Control, HostResult, Outcome, Report, Severity};
pub use config::{AliasRecordSource, Cli, Config, LogFormat, LogLevel};
pub use dns::{CaaRecord, Exchange, NameserverClient};
pub use error_handling::ResolutionError;

use log::info;

use crate::initialization::{init_extractor, init_resolver};

/// Resolves the CAA policy of `config.hostname` against `config.nameserver`.
///
/// This is the library entry point used by the binary. It builds the Public Suffix
/// List extractor and the nameserver client, then runs one resolution. It never
/// fails: fatal conditions are carried in the report's error fields.
pub async fn run_check(config: &Config) -> Report {
    let extractor = init_extractor();
    let resolver = init_resolver(config);
    info!(
        "Checking CAA policy for {} via {}",
        config.hostname,
        resolver.nameserver()
    );

    CaaEngine::new(resolver.as_ref(), extractor.as_ref())
        .full(config.full)
        .alias_records(config.alias_records)
        .resolve(&config.hostname)
        .await
}
