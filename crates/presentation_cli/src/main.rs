//! ManPaSik flow CLI
//!
//! Runs one orchestration against the seeded in-memory collaborators and
//! prints the result as JSON.

#![allow(clippy::print_stdout)]

use std::path::PathBuf;

use anyhow::Context;
use application::FlowContext;
use clap::{Parser, Subcommand};
use infrastructure::{AppConfig, init_telemetry, seed};
use tracing::{debug, error};

/// ManPaSik flow CLI
#[derive(Debug, Parser)]
#[command(name = "manpasik-flow")]
#[command(author, version, about = "Run ManPaSik cross-service flows", long_about = None)]
struct Cli {
    /// Path to a TOML config file (default: ./manpasik.toml if present)
    #[arg(short, long, env = "MANPASIK_CONFIG")]
    config: Option<PathBuf>,

    /// Verbosity level (overrides the configured log filter)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Process a completed measurement session
    ///
    /// Example: manpasik-flow measurement --session session-demo-001
    Measurement {
        /// Measurement session ID
        #[arg(short, long)]
        session: String,
    },

    /// Purchase cartridges with the buyer's subscription discount
    ///
    /// Example: manpasik-flow purchase --user demo-user --product cartridge-glucose-10 --quantity 2
    Purchase {
        /// Buyer's user ID
        #[arg(short, long)]
        user: String,

        /// Cartridge product ID
        #[arg(short, long)]
        product: String,

        /// Number of cartridges
        #[arg(short, long, default_value = "1")]
        quantity: u32,

        /// Payment method (card, bank_transfer, kakao_pay, naver_pay)
        #[arg(short, long, default_value = "card")]
        method: String,
    },

    /// Share records covered by a consent with its provider
    ///
    /// Example: manpasik-flow share --consent consent-demo-active
    Share {
        /// Consent ID
        #[arg(short, long)]
        consent: String,
    },
}

/// Determine log filter level from verbosity count
const fn log_filter_from_verbosity(verbose: u8) -> Option<&'static str> {
    match verbose {
        0 => None,
        1 => Some("info"),
        2 => Some("debug"),
        _ => Some("trace"),
    }
}

fn load_config(cli: &Cli) -> anyhow::Result<AppConfig> {
    let mut config = match &cli.config {
        Some(path) => AppConfig::load_from(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => AppConfig::load().context("failed to load config")?,
    };
    if let Some(filter) = log_filter_from_verbosity(cli.verbose) {
        config.telemetry.log_filter = filter.to_string();
    }
    Ok(config)
}

async fn run(cli: Cli, config: &AppConfig) -> anyhow::Result<serde_json::Value> {
    let demo = seed(&config.demo);
    let ctx = FlowContext::new().with_timeout(config.request_timeout());
    debug!(request_id = %ctx.request_id(), timeout = ?config.request_timeout(), "Running flow");

    let output = match cli.command {
        Commands::Measurement { session } => {
            let result = demo
                .health_flow()
                .process_measurement_completed(&ctx, &session)
                .await?;
            serde_json::to_value(result)?
        },
        Commands::Purchase {
            user,
            product,
            quantity,
            method,
        } => {
            let result = demo
                .commerce_flow()
                .purchase_cartridge(&ctx, &user, &product, quantity, &method)
                .await?;
            serde_json::to_value(result)?
        },
        Commands::Share { consent } => {
            let result = demo.data_sharing_flow().share_data(&ctx, &consent).await?;
            serde_json::to_value(result)?
        },
    };
    Ok(output)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = load_config(&cli)?;
    init_telemetry(&config.telemetry)?;

    match run(cli, &config).await {
        Ok(output) => {
            println!("{}", serde_json::to_string_pretty(&output)?);
            Ok(())
        },
        Err(e) => {
            error!(error = %e, "Flow failed");
            Err(e)
        },
    }
}

#[cfg(test)]
mod tests {
    use std::ffi::OsString;

    use super::*;

    fn parse_args(args: &[&str]) -> Result<Cli, clap::Error> {
        let os_args: Vec<OsString> = args.iter().map(OsString::from).collect();
        Cli::try_parse_from(os_args)
    }

    #[test]
    fn parses_measurement_command() {
        let cli = parse_args(&["manpasik-flow", "measurement", "--session", "s-1"]).unwrap();
        assert!(matches!(cli.command, Commands::Measurement { ref session } if session == "s-1"));
        assert_eq!(cli.verbose, 0);
        assert!(cli.config.is_none());
    }

    #[test]
    fn purchase_defaults_quantity_and_method() {
        let cli = parse_args(&[
            "manpasik-flow",
            "purchase",
            "--user",
            "u-1",
            "--product",
            "cartridge-x",
        ])
        .unwrap();

        let Commands::Purchase {
            user,
            product,
            quantity,
            method,
        } = cli.command
        else {
            unreachable!("expected purchase command");
        };
        assert_eq!(user, "u-1");
        assert_eq!(product, "cartridge-x");
        assert_eq!(quantity, 1);
        assert_eq!(method, "card");
    }

    #[test]
    fn purchase_requires_user() {
        assert!(parse_args(&["manpasik-flow", "purchase", "--product", "p"]).is_err());
    }

    #[test]
    fn parses_share_with_global_flags() {
        let cli = parse_args(&[
            "manpasik-flow",
            "-vv",
            "--config",
            "/etc/manpasik.toml",
            "share",
            "--consent",
            "c-1",
        ])
        .unwrap();

        assert_eq!(cli.verbose, 2);
        assert_eq!(cli.config, Some(PathBuf::from("/etc/manpasik.toml")));
        assert!(matches!(cli.command, Commands::Share { ref consent } if consent == "c-1"));
    }

    #[test]
    fn rejects_negative_quantity() {
        let result = parse_args(&[
            "manpasik-flow",
            "purchase",
            "--user",
            "u",
            "--product",
            "p",
            "--quantity",
            "-1",
        ]);
        assert!(result.is_err());
    }

    #[test]
    fn verbosity_maps_to_filter() {
        assert_eq!(log_filter_from_verbosity(0), None);
        assert_eq!(log_filter_from_verbosity(1), Some("info"));
        assert_eq!(log_filter_from_verbosity(2), Some("debug"));
        assert_eq!(log_filter_from_verbosity(9), Some("trace"));
    }

    #[tokio::test]
    async fn runs_share_against_demo_data() {
        let cli = parse_args(&["manpasik-flow", "share", "--consent", "consent-demo-active"]).unwrap();

        let output = run(cli, &AppConfig::default()).await.unwrap();

        assert_eq!(output["consent_id"], "consent-demo-active");
        assert_eq!(output["record_count"], 3);
    }

    #[tokio::test]
    async fn unknown_session_is_an_error() {
        let cli = parse_args(&["manpasik-flow", "measurement", "--session", "nope"]).unwrap();

        let err = run(cli, &AppConfig::default()).await.unwrap_err();

        assert!(err.to_string().starts_with("측정 결과 조회 실패"));
    }
}
