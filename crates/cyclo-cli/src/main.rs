// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
// CYCLO CLI - Rewards, APY & Leaderboard Inspector
//
// Offline front end over a JSON snapshot of subgraph payloads and quote
// tables. Every figure is computed by cyclo-core / cyclo-oracle.
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

use clap::{Parser, Subcommand};
use colored::*;
use std::path::PathBuf;

mod commands;
mod logger;

#[derive(Parser)]
#[command(name = "cyclo-cli")]
#[command(about = "Cyclo CLI - Rewards Pools, Shares, APY & Leaderboard", long_about = None)]
#[command(version)]
struct Cli {
    /// Network name or chain id (reads CYCLO_NETWORK env var)
    #[arg(short, long, env = "CYCLO_NETWORK", default_value = "flare")]
    network: String,

    /// TOML config file (defaults to CYCLO_CONFIG, then the built-in networks)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// JSON snapshot of subgraph payloads and quotes
    #[arg(short, long, env = "CYCLO_SNAPSHOT")]
    snapshot: Option<PathBuf>,

    /// Print machine-readable JSON instead of tables
    #[arg(long)]
    json: bool,

    /// -v info, -vv debug, -vvv trace (otherwise CYCLO_LOG)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List configured networks and receipt tokens
    Networks,

    /// Rewards pool per token
    Pools,

    /// Share and reward estimate of one account
    Shares {
        /// Account address
        account: String,
    },

    /// Annualized yield per token
    Apy,

    /// Top contributors with pro-rata reward estimates
    Leaderboard {
        /// Maximum rows
        #[arg(short, long, default_value_t = cyclo_core::LEADERBOARD_LIMIT)]
        limit: usize,

        /// Highlight this account's rank
        #[arg(short, long)]
        account: Option<String>,
    },

    /// Aggregate stats: holders, eligible totals, pools and APY
    Stats,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    logger::init(cli.verbose);

    if !cli.json {
        print_banner();
    }

    let ctx = commands::Context::load(
        cli.config.as_deref(),
        &cli.network,
        cli.snapshot.clone(),
        cli.json,
    )?;

    match cli.command {
        Commands::Networks => commands::networks::handle(&ctx)?,
        Commands::Pools => commands::rewards::pools(&ctx)?,
        Commands::Shares { account } => commands::rewards::shares(&ctx, &account)?,
        Commands::Apy => commands::stats::apy(&ctx).await?,
        Commands::Leaderboard { limit, account } => {
            commands::leaderboard::handle(&ctx, limit, account.as_deref())?
        }
        Commands::Stats => commands::stats::stats(&ctx).await?,
    }

    Ok(())
}

fn print_banner() {
    println!(
        "{}",
        "╔═══════════════════════════════════════════════╗".cyan()
    );
    println!(
        "{}",
        "║        CYCLO - Rewards & Price Engine         ║"
            .cyan()
            .bold()
    );
    println!(
        "{}",
        "║      Pools | Shares | APY | Leaderboard       ║".cyan()
    );
    println!(
        "{}",
        "╚═══════════════════════════════════════════════╝".cyan()
    );
    println!();
}

fn print_error(msg: &str) {
    eprintln!("{} {}", "✗".red().bold(), msg);
}

fn print_info(msg: &str) {
    println!("{} {}", "ℹ".blue().bold(), msg);
}

// ─────────────────────────────────────────────────────────────────
// UNIT TESTS
// ─────────────────────────────────────────────────────────────────
