use bitlens_dashboard::app::Dashboard;
use bitlens_dashboard::domains::session::LoadStatus;
use bitlens_dashboard::infra::config::Config;
use bitlens_dashboard::view;
use bitlens_model::{BalanceConfig, PriceConfig, ViewSelection};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use env_logger::{Builder, Target};
use log::LevelFilter;
use std::num::NonZeroU32;
use std::process::ExitCode;

/// Inspect Bitcoin price and address balances through the Bitquery API.
#[derive(Debug, Parser)]
#[command(name = "bitlens", version)]
struct Cli {
    /// Bearer token for the provider (overrides config and BITLENS_TOKEN)
    #[arg(long, global = true)]
    token: Option<String>,

    /// GraphQL endpoint (overrides config and BITLENS_PROVIDER_URL)
    #[arg(long, global = true)]
    provider_url: Option<String>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// USD output aggregation for one day
    Price {
        /// YYYY-MM-DD or full ISO-8601 datetime; defaults to today (UTC)
        #[arg(long)]
        date: Option<String>,
    },
    /// Received/spent totals for an address
    Balance {
        #[arg(long)]
        address: String,
        #[arg(long)]
        network: Option<String>,
        #[arg(long)]
        limit: Option<NonZeroU32>,
        #[arg(long, default_value_t = 0)]
        offset: u32,
        /// Range start, YYYY-MM-DD
        #[arg(long)]
        from: Option<String>,
        /// Range end, YYYY-MM-DD
        #[arg(long)]
        till: Option<String>,
    },
    /// Write the effective settings to the user config file
    Configure {
        #[arg(long)]
        network: Option<String>,
        #[arg(long)]
        limit: Option<u32>,
        /// Per-request timeout in seconds
        #[arg(long)]
        timeout_secs: Option<u64>,
    },
}

fn init_logger() {
    Builder::new()
        .target(Target::Stderr)
        .filter_level(LevelFilter::Warn)
        .filter_module("bitlens_dashboard", LevelFilter::Debug)
        .filter_module("bitlens", LevelFilter::Debug)
        .init();
}

fn save_config(
    mut config: Config,
    network: Option<String>,
    limit: Option<u32>,
    timeout_secs: Option<u64>,
) -> Result<()> {
    if let Some(network) = network {
        config.default_network = network;
    }
    if let Some(limit) = limit {
        config.default_limit = limit;
    }
    if timeout_secs.is_some() {
        config.request_timeout_secs = timeout_secs;
    }
    config.save().context("Failed to save config")?;
    match Config::config_path() {
        Some(path) => println!("Saved settings to {}", path.display()),
        None => println!("No config directory available; nothing saved."),
    }
    Ok(())
}

fn selection_for(command: Command, config: &Config) -> Result<ViewSelection> {
    match command {
        Command::Price { date } => Ok(date
            .map(PriceConfig::new)
            .unwrap_or_else(PriceConfig::today)
            .into()),
        Command::Balance {
            address,
            network,
            limit,
            offset,
            from,
            till,
        } => {
            let network =
                network.unwrap_or_else(|| config.default_network.clone());
            let limit = limit
                .or_else(|| NonZeroU32::new(config.default_limit))
                .unwrap_or(bitlens_model::DEFAULT_BALANCE_LIMIT);
            let balance = BalanceConfig::new(network, address)
                .context("Invalid balance query")?
                .with_page(limit, offset)
                .with_range(from, till);
            Ok(balance.into())
        }
        Command::Configure { .. } => {
            anyhow::bail!("configure does not select a view")
        }
    }
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    if std::env::var("RUST_LOG").is_err() {
        init_logger();
    } else {
        env_logger::init();
    }

    let cli = Cli::parse();
    let mut config = Config::load();
    if let Some(url) = cli.provider_url {
        config.provider_url = url;
    }
    if let Some(token) = cli.token {
        config.credential = Some(token);
    }

    if let Command::Configure {
        network,
        limit,
        timeout_secs,
    } = cli.command
    {
        save_config(config, network, limit, timeout_secs)?;
        return Ok(ExitCode::SUCCESS);
    }

    let dashboard = Dashboard::from_config(&config)
        .context("Failed to set up the dashboard")?;
    let selection = selection_for(cli.command, &config)?;

    let task = dashboard.select_view(selection);
    println!("{}", view::render(&dashboard.state()));

    let outcome = task.await.context("Load task panicked")?;
    log::debug!("Load finished: {:?}", outcome);

    let state = dashboard.state();
    println!("{}", view::render(&state));

    Ok(match state.status() {
        LoadStatus::Errored => ExitCode::FAILURE,
        _ => ExitCode::SUCCESS,
    })
}
