use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::time::Instant;
use tracing::debug;

use crate::error::PayoffError;
use crate::strategies::{
    BreakEven, PayoffProfile, PayoffTable, Strategy, StrategyCharacteristics, StrategyDefinition,
    StrategyKind, StrategyParameters,
};
use crate::types::*;
use crate::validation::{validate, Severity};
use crate::PayoffResult;

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Table row closest to a break-even, where a chart places its marker.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BreakEvenMarker {
    pub break_even: Price,
    pub price: Price,
    pub net_payoff: Money,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartAnnotations {
    pub break_even_markers: Vec<BreakEvenMarker>,
    pub y_axis_min: Money,
    pub y_axis_max: Money,
    pub profitable_rows: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StrategyAnalysis {
    pub strategy: StrategyKind,
    pub strategy_name: String,
    pub net_premium: Money,
    pub break_even: BreakEven,
    pub max_profit: Option<Money>,
    pub max_loss: Option<Money>,
    pub risk_reward_ratio: Option<Decimal>,
    pub profit_probability_estimate: Option<Decimal>,
    pub strategy_characteristics: StrategyCharacteristics,
    pub chart: ChartAnnotations,
    pub payoff_table: PayoffTable,
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

/// Determine max profit and max loss of the position, returning `None` for
/// an unbounded side.
///
/// Payoffs are piecewise linear with kinks only at strikes, so the extremes
/// over `[0, ∞)` sit at price zero, at a strike, or out at infinity. The slope
/// past the highest strike decides whether the upside is unbounded. The sweep
/// plays no part.
fn find_max_profit_loss(definition: &StrategyDefinition) -> (Option<Money>, Option<Money>) {
    let strikes = definition.strikes();
    let top = strikes.iter().copied().fold(Decimal::ZERO, Decimal::max);
    let beyond = top + Decimal::ONE;

    let mut prices: Vec<Price> = vec![Decimal::ZERO, beyond];
    prices.extend(strikes.into_iter().filter(|k| *k >= Decimal::ZERO));
    prices.extend(
        definition
            .break_even()
            .points()
            .into_iter()
            .filter(|p| *p >= Decimal::ZERO),
    );

    let payoffs: Vec<Money> = prices
        .iter()
        .map(|&p| definition.evaluate(p).net_payoff)
        .collect();
    let max_payoff = payoffs.iter().copied().fold(Decimal::MIN, Decimal::max);
    let min_payoff = payoffs.iter().copied().fold(Decimal::MAX, Decimal::min);

    let slope = definition.evaluate(beyond + Decimal::ONE).net_payoff
        - definition.evaluate(beyond).net_payoff;

    let max_profit = if slope > Decimal::ZERO {
        None
    } else {
        Some(max_payoff)
    };
    // Losses are negative payoffs; a position that never loses has max loss 0.
    let max_loss = if slope < Decimal::ZERO {
        None
    } else {
        Some((-min_payoff).max(Decimal::ZERO))
    };

    (max_profit, max_loss)
}

fn break_even_markers(table: &PayoffTable, break_even: &BreakEven) -> Vec<BreakEvenMarker> {
    break_even
        .points()
        .into_iter()
        .filter_map(|be| {
            table.nearest_row(be).map(|row| BreakEvenMarker {
                break_even: be,
                price: row.expiration_price,
                net_payoff: row.net_payoff,
            })
        })
        .collect()
}

/// Payoff extent padded by 10% of the span on each side.
fn y_axis_range(table: &PayoffTable) -> (Money, Money) {
    let mut payoffs = table.rows.iter().map(|r| r.net_payoff);
    let first = match payoffs.next() {
        Some(p) => p,
        None => return (Decimal::ZERO, Decimal::ZERO),
    };
    let (min, max) = payoffs.fold((first, first), |(lo, hi), p| (lo.min(p), hi.max(p)));
    let span = max - min;
    let padding = if span.is_zero() {
        Decimal::ONE
    } else {
        span * Decimal::new(1, 1)
    };
    (min - padding, max + padding)
}

// ---------------------------------------------------------------------------
// Main functions
// ---------------------------------------------------------------------------

/// Summarise an already-constructed strategy. No parameter validation.
pub fn summarize(strategy: &Strategy) -> StrategyAnalysis {
    let kind = strategy.kind();
    let payoff_table = strategy.compute_payoff_curve();
    let break_even = strategy.compute_break_even();

    let (max_profit, max_loss) = find_max_profit_loss(strategy.definition());

    let risk_reward_ratio = match (max_profit, max_loss) {
        (Some(mp), Some(ml)) if ml > Decimal::ZERO => Some(mp / ml),
        _ => None,
    };

    let profitable_rows = payoff_table
        .rows
        .iter()
        .filter(|r| r.net_payoff > Decimal::ZERO)
        .count();
    let profit_probability_estimate = if payoff_table.is_empty() {
        None
    } else {
        Some(Decimal::from(profitable_rows as u64) / Decimal::from(payoff_table.len() as u64))
    };

    let (y_axis_min, y_axis_max) = y_axis_range(&payoff_table);
    let chart = ChartAnnotations {
        break_even_markers: break_even_markers(&payoff_table, &break_even),
        y_axis_min,
        y_axis_max,
        profitable_rows,
    };

    StrategyAnalysis {
        strategy: kind,
        strategy_name: kind.name().to_string(),
        net_premium: strategy.net_premium(),
        break_even,
        max_profit,
        max_loss,
        risk_reward_ratio,
        profit_probability_estimate,
        strategy_characteristics: kind.characteristics(),
        chart,
        payoff_table,
    }
}

/// Validate, build and summarise a strategy in one call.
pub fn analyze(params: &StrategyParameters) -> PayoffResult<ComputationOutput<StrategyAnalysis>> {
    let start = Instant::now();
    let mut warnings: Vec<String> = Vec::new();
    let kind = params.kind();

    let verdict = validate(params);
    match verdict.severity {
        Severity::Error => {
            return Err(PayoffError::InvalidParameter {
                field: kind.id().into(),
                reason: verdict.message,
            });
        }
        Severity::Warning => warnings.push(verdict.message),
        Severity::None => {}
    }

    let strategy = Strategy::new(params.clone())?;
    let analysis = summarize(&strategy);

    if analysis.max_profit.is_none() {
        warnings.push("Profit potential is theoretically unlimited".to_string());
    }
    if analysis.max_loss.is_none() {
        warnings.push("Loss potential is theoretically unlimited".to_string());
    }

    let sweep = params.sweep();
    let synthetic_points = analysis.payoff_table.len() - strategy.sweep().len();

    debug!(
        target: "payoff.analysis",
        strategy = kind.name(),
        rows = analysis.payoff_table.len(),
        synthetic_points,
        warnings = warnings.len(),
        "analysis complete"
    );

    let elapsed = start.elapsed().as_micros() as u64;
    Ok(with_metadata(
        "Option Strategy Analysis — Expiry Payoff Profile",
        &serde_json::json!({
            "strategy_type": kind.name(),
            "price_range": format!("{} - {}", sweep.start_price, sweep.end_price),
            "step_size": sweep.step_size.to_string(),
            "sweep_points": strategy.sweep().len(),
            "synthetic_points": synthetic_points,
        }),
        warnings,
        elapsed,
        analysis,
    ))
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
