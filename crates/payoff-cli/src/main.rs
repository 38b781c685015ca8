mod commands;
mod input;
mod output;

use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use colored::Colorize;
use std::process;
use tracing_subscriber::EnvFilter;

use commands::catalog::TemplateArgs;
use commands::payoff::StrategyArgs;

/// Expiry payoff tables and break-even points for option strategies
#[derive(Parser)]
#[command(
    name = "payoff",
    version,
    about = "Expiry payoff tables and break-even points for option strategies",
    long_about = "A CLI for computing payoff-at-expiration curves and break-even points \
                  with decimal precision. Supports single-leg calls and puts, vertical \
                  spreads, straddles, strangles, strips, straps and long butterflies."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Output format
    #[arg(long, default_value = "json", global = true)]
    output: OutputFormat,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace). RUST_LOG takes precedence.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Validate, compute and summarise a strategy (max profit/loss, chart annotations)
    Analyze(StrategyArgs),
    /// Compute the payoff table over the price sweep
    Curve(StrategyArgs),
    /// Compute the break-even point(s)
    BreakEven(StrategyArgs),
    /// Check strategy parameters; exits 1 when they are rejected
    Validate(StrategyArgs),
    /// Print example parameters for a strategy
    Template(TemplateArgs),
    /// List supported strategies and their characteristics
    List,
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
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(true)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let mut rejected = false;
    let result: Result<serde_json::Value, Box<dyn std::error::Error>> = match cli.command {
        Commands::Analyze(args) => commands::payoff::run_analyze(args),
        Commands::Curve(args) => commands::payoff::run_curve(args),
        Commands::BreakEven(args) => commands::payoff::run_break_even(args),
        Commands::Validate(args) => commands::payoff::run_validate(args).map(|value| {
            rejected = value.get("is_valid") == Some(&serde_json::Value::Bool(false));
            value
        }),
        Commands::Template(args) => commands::catalog::run_template(args),
        Commands::List => commands::catalog::run_list(),
        Commands::Version => {
            println!("payoff {}", env!("CARGO_PKG_VERSION"));
            return;
        }
    };

    match result {
        Ok(value) => {
            output::format_output(&cli.output, &value);
            process::exit(if rejected { 1 } else { 0 });
        }
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            process::exit(1);
        }
    }
}
