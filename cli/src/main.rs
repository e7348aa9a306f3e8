//! `distributor`: offline simulator for batch distributions.

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::Context;
use clap::{Parser, ValueEnum};
use serde::Serialize;

use distributor_cli::{load_batch, simulate_ether, simulate_token, DistributorConfig, TokenRun};
use distributor_nullables::TokenDialect;
use distributor_types::{Amount, NATIVE_DECIMALS};
use distributor_utils::LogFormat;

#[derive(Parser)]
#[command(name = "distributor", about = "Simulate batch distributions against an in-memory ledger")]
struct Cli {
    /// Path to a TOML configuration file. CLI flags and env vars override it.
    #[arg(long, env = "DISTRIBUTOR_CONFIG")]
    config: Option<PathBuf>,

    /// Log level: "trace", "debug", "info", "warn", "error".
    #[arg(long, env = "DISTRIBUTOR_LOG_LEVEL")]
    log_level: Option<String>,

    /// Log format: "human" or "json".
    #[arg(long, env = "DISTRIBUTOR_LOG_FORMAT")]
    log_format: Option<LogFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(clap::Subcommand)]
enum Command {
    /// Print the overflow-checked total of a batch.
    Total {
        #[arg(long)]
        batch: PathBuf,

        /// Decimals to scale amounts by (defaults to the config value).
        #[arg(long, env = "DISTRIBUTOR_DECIMALS")]
        decimals: Option<u8>,
    },

    /// Simulate distributeEther. Amounts are in whole native units.
    Ether {
        #[arg(long)]
        batch: PathBuf,

        /// Value attached to the call, e.g. "5.0".
        #[arg(long)]
        value: String,

        #[arg(long, env = "DISTRIBUTOR_GAS_LIMIT")]
        gas_limit: Option<u64>,
    },

    /// Simulate distributeToken against a freshly deployed token.
    Token {
        #[arg(long)]
        batch: PathBuf,

        /// Allowance granted to the distributor, or "max".
        #[arg(long)]
        allowance: String,

        /// Caller's token balance. Defaults to the batch total.
        #[arg(long)]
        balance: Option<String>,

        #[arg(long, value_enum, default_value_t = Dialect::Standard)]
        dialect: Dialect,

        #[arg(long, env = "DISTRIBUTOR_DECIMALS")]
        decimals: Option<u8>,

        #[arg(long, env = "DISTRIBUTOR_GAS_LIMIT")]
        gas_limit: Option<u64>,
    },
}

/// How the simulated token reports failure.
#[derive(Clone, Copy, ValueEnum)]
enum Dialect {
    Standard,
    ReturnFalse,
    NoReturn,
}

impl From<Dialect> for TokenDialect {
    fn from(dialect: Dialect) -> Self {
        match dialect {
            Dialect::Standard => TokenDialect::Standard,
            Dialect::ReturnFalse => TokenDialect::ReturnFalse,
            Dialect::NoReturn => TokenDialect::NoReturn,
        }
    }
}

#[derive(Serialize)]
struct TotalReport {
    entries: usize,
    total: Amount,
    total_units: String,
}

fn parse_allowance(text: &str, decimals: u8) -> anyhow::Result<Amount> {
    if text.eq_ignore_ascii_case("max") {
        return Ok(Amount::MAX);
    }
    Amount::parse_units(text, decimals).with_context(|| format!("invalid allowance {text:?}"))
}

fn print_json(value: &impl Serialize) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn main() -> anyhow::Result<ExitCode> {
    let cli = Cli::parse();

    let mut config = match &cli.config {
        Some(path) => DistributorConfig::from_toml_file(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => DistributorConfig::default(),
    };
    if let Some(level) = cli.log_level {
        config.log_level = level;
    }
    if let Some(format) = cli.log_format {
        config.log_format = format;
    }
    distributor_utils::init_logging(config.log_format, &config.log_level);
    if let Some(path) = &cli.config {
        tracing::info!("Loaded config from {}", path.display());
    }

    match cli.command {
        Command::Total { batch, decimals } => {
            let decimals = decimals.unwrap_or(config.decimals);
            let batch = load_batch(&batch, decimals)?;
            let total = batch.total().context("batch total")?;
            print_json(&TotalReport {
                entries: batch.len(),
                total,
                total_units: total.format_units(decimals),
            })?;
        }
        Command::Ether {
            batch,
            value,
            gas_limit,
        } => {
            let batch = load_batch(&batch, NATIVE_DECIMALS)?;
            let value = Amount::parse_native(&value)
                .with_context(|| format!("invalid value {value:?}"))?;
            let outcome = simulate_ether(&config.gas, batch, value, gas_limit);
            print_json(&outcome)?;
            if !outcome.is_committed() {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::Token {
            batch,
            allowance,
            balance,
            dialect,
            decimals,
            gas_limit,
        } => {
            let decimals = decimals.unwrap_or(config.decimals);
            let batch = load_batch(&batch, decimals)?;
            let run = TokenRun {
                dialect: dialect.into(),
                allowance: parse_allowance(&allowance, decimals)?,
                balance: balance
                    .map(|text| Amount::parse_units(&text, decimals))
                    .transpose()
                    .context("invalid balance")?,
                decimals,
                gas_limit,
            };
            let outcome = simulate_token(&config.gas, batch, &run);
            print_json(&outcome)?;
            if !outcome.is_committed() {
                return Ok(ExitCode::FAILURE);
            }
        }
    }

    Ok(ExitCode::SUCCESS)
}
