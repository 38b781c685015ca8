use clap::Args;
use serde_json::Value;

use payoff_core::StrategyKind;

/// Arguments for the template command
#[derive(Args)]
pub struct TemplateArgs {
    /// Strategy name, e.g. long_call, bull-call-spread or "Long Butterfly"
    pub strategy: String,
}

pub fn run_template(args: TemplateArgs) -> Result<Value, Box<dyn std::error::Error>> {
    let kind: StrategyKind = args.strategy.parse()?;
    Ok(serde_json::to_value(kind.example_parameters())?)
}

pub fn run_list() -> Result<Value, Box<dyn std::error::Error>> {
    let entries: Vec<Value> = StrategyKind::ALL
        .iter()
        .map(|kind| {
            let c = kind.characteristics();
            serde_json::json!({
                "id": kind.id(),
                "name": kind.name(),
                "direction": c.direction,
                "profit_type": c.profit_type,
                "loss_type": c.loss_type,
                "requires_margin": c.requires_margin,
            })
        })
        .collect();
    Ok(Value::Array(entries))
}
