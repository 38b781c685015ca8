use clap::Args;
use rust_decimal::Decimal;
use serde_json::Value;
use std::time::Instant;
use tracing::{debug, info};

use payoff_core::analysis;
use payoff_core::validation;
use payoff_core::{with_metadata, Strategy, StrategyKind, StrategyParameters};

use crate::input;

/// Arguments shared by every command that takes a strategy
#[derive(Args)]
pub struct StrategyArgs {
    /// Path to a JSON or YAML parameter file
    #[arg(long)]
    pub input: Option<String>,

    /// Use the built-in example parameters for this strategy
    #[arg(long, conflicts_with = "input")]
    pub strategy: Option<String>,

    /// Override the sweep's start price
    #[arg(long)]
    pub start_price: Option<Decimal>,

    /// Override the sweep's end price
    #[arg(long)]
    pub end_price: Option<Decimal>,

    /// Override the sweep's step size
    #[arg(long)]
    pub step_size: Option<Decimal>,
}

fn load_parameters(args: &StrategyArgs) -> Result<StrategyParameters, Box<dyn std::error::Error>> {
    let mut params: StrategyParameters = if let Some(ref path) = args.input {
        input::file::read_document(path)?
    } else if let Some(ref name) = args.strategy {
        name.parse::<StrategyKind>()?.example_parameters()
    } else if let Some(data) = input::stdin::read_stdin()? {
        serde_json::from_value(data)?
    } else {
        return Err("--input <file.json>, --strategy <name> or stdin required".into());
    };

    let sweep = params.sweep_mut();
    if let Some(start) = args.start_price {
        sweep.start_price = start;
    }
    if let Some(end) = args.end_price {
        sweep.end_price = end;
    }
    if let Some(step) = args.step_size {
        sweep.step_size = step;
    }

    debug!(
        target: "payoff.cli",
        strategy = params.kind().name(),
        sweep = ?params.sweep(),
        "loaded strategy parameters"
    );
    Ok(params)
}

pub fn run_analyze(args: StrategyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_parameters(&args)?;
    let result = analysis::analyze(&params)?;
    info!(
        target: "payoff.cli",
        strategy = params.kind().name(),
        elapsed_us = result.metadata.computation_time_us,
        "analysis finished"
    );
    Ok(serde_json::to_value(result)?)
}

pub fn run_curve(args: StrategyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let params = load_parameters(&args)?;
    let strategy = Strategy::new(params.clone())?;
    let table = strategy.compute_payoff_curve();
    let sweep = params.sweep();
    let result = with_metadata(
        "Expiry payoff curve",
        &serde_json::json!({
            "strategy_type": strategy.kind().name(),
            "price_range": format!("{} - {}", sweep.start_price, sweep.end_price),
            "step_size": sweep.step_size.to_string(),
            "net_premium": strategy.net_premium().to_string(),
        }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        table,
    );
    Ok(serde_json::to_value(result)?)
}

pub fn run_break_even(args: StrategyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let start = Instant::now();
    let params = load_parameters(&args)?;
    let strategy = Strategy::new(params)?;
    let result = with_metadata(
        "Closed-form break-even",
        &serde_json::json!({ "strategy_type": strategy.kind().name() }),
        Vec::new(),
        start.elapsed().as_micros() as u64,
        serde_json::json!({
            "break_even": strategy.compute_break_even(),
            "net_premium": strategy.net_premium(),
        }),
    );
    Ok(serde_json::to_value(result)?)
}

pub fn run_validate(args: StrategyArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let params = load_parameters(&args)?;
    let verdict = validation::validate(&params);
    Ok(serde_json::to_value(verdict)?)
}
