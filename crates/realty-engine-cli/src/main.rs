mod commands;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::capital_stack::CapitalStackArgs;
use commands::deal::DealArgs;
use commands::underwriting::UnderwriteArgs;
use commands::waterfall::DistributeArgs;

/// Real-estate deal underwriting and equity waterfall calculations
#[derive(Parser)]
#[command(
    name = "realty",
    version,
    about = "Real-estate deal underwriting and equity waterfall calculations",
    long_about = "Computes single-period underwriting ratios (cap rate, yield on cost, \
                  DSCR, LTV, cash-on-cash, price per unit), acquisition capital stacks, \
                  and two-tier preferred return + promote distributions. Inputs may be \
                  passed as flags, a JSON file, or JSON on stdin."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Policy file (YAML or JSON) overriding the engine's default fallbacks
    #[arg(long, global = true)]
    policy: Option<String>,

    /// Increase diagnostic logging on stderr (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Underwriting ratios for a single deal or property
    Underwrite(UnderwriteArgs),
    /// Debt / equity and GP / LP split for an acquisition
    CapitalStack(CapitalStackArgs),
    /// Two-tier preferred return + promote distribution
    Distribute(DistributeArgs),
    /// Underwriting, capital stack and distribution for one deal
    Deal(DealArgs),
    /// Print version information
    Version,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    Json,
    Table,
    Csv,
    Minimal,
}

fn init_tracing(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run(command: Commands, policy_path: Option<&str>) -> Result<serde_json::Value, Box<dyn std::error::Error>> {
    let policy = policy_path.map(input::file::read_policy).transpose()?;

    match command {
        Commands::Underwrite(args) => {
            if policy.is_some() {
                tracing::debug!("underwriting ignores --policy; no fallbacks apply");
            }
            commands::underwriting::run_underwrite(args)
        }
        Commands::CapitalStack(args) => commands::capital_stack::run_capital_stack(args, policy),
        Commands::Distribute(args) => commands::waterfall::run_distribute(args, policy),
        Commands::Deal(args) => commands::deal::run_deal(args, policy),
        Commands::Version => Ok(serde_json::json!({ "version": env!("CARGO_PKG_VERSION") })),
    }
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if matches!(cli.command, Commands::Version) {
        println!("realty {}", env!("CARGO_PKG_VERSION"));
        return;
    }

    match run(cli.command, cli.policy.as_deref()) {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(0);
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
