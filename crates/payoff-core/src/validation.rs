//! Pre-construction checks on strategy parameters.
//!
//! `Strategy::new` accepts anything with a valid sweep; the rules here catch
//! parameter sets that would give economically meaningless curves (unordered
//! strikes, credit butterflies, sweeps that miss the break-evens).

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::strategies::{
    ButterflyInput, LongButterfly, PayoffProfile, SingleLegInput, Straddle, StraddleInput,
    StrangleInput, StrategyParameters, VerticalSpreadInput,
};
use crate::sweep::{SweepRange, MAX_SWEEP_POINTS};
use crate::types::{Money, Price};

/// Sweeps larger than this are allowed but flagged.
pub const LARGE_SWEEP_WARNING_POINTS: usize = 1_000;

/// Tolerance on butterfly wing spacing.
const WING_SPACING_TOLERANCE: Decimal = dec!(0.01);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    None,
    Warning,
    Error,
}

/// Verdict on one parameter set. `Error` blocks construction, `Warning` does not.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationResult {
    pub is_valid: bool,
    pub message: String,
    pub severity: Severity,
}

impl ValidationResult {
    pub fn ok() -> Self {
        ValidationResult {
            is_valid: true,
            message: String::new(),
            severity: Severity::None,
        }
    }

    pub fn warning(message: impl Into<String>) -> Self {
        ValidationResult {
            is_valid: true,
            message: message.into(),
            severity: Severity::Warning,
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        ValidationResult {
            is_valid: false,
            message: message.into(),
            severity: Severity::Error,
        }
    }
}

type Check = Result<(), ValidationResult>;

fn require(condition: bool, message: &str) -> Check {
    if condition {
        Ok(())
    } else {
        Err(ValidationResult::error(message))
    }
}

fn require_positive(value: Money, label: &str) -> Check {
    require(value > Decimal::ZERO, &format!("{} must be positive", label))
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub fn validate(params: &StrategyParameters) -> ValidationResult {
    let verdict = match check(params) {
        Ok(()) => sweep_warnings(params.sweep()),
        Err(failed) => failed,
    };
    debug!(
        target: "payoff.validation",
        strategy = params.kind().name(),
        severity = ?verdict.severity,
        message = %verdict.message,
        "validated parameters"
    );
    verdict
}

fn check(params: &StrategyParameters) -> Check {
    check_sweep(params.sweep())?;
    match params {
        StrategyParameters::LongCall(p)
        | StrategyParameters::ShortCall(p)
        | StrategyParameters::LongPut(p)
        | StrategyParameters::ShortPut(p) => check_single_leg(p),
        StrategyParameters::BullCallSpread(p) => check_bull_call_spread(p),
        StrategyParameters::BearPutSpread(p) => check_bear_put_spread(p),
        StrategyParameters::LongStraddle(p) => {
            check_weighted_straddle(p, Straddle::long(p.strike_price, p.premium_call, p.premium_put))
        }
        StrategyParameters::LongStrangle(p) => check_long_strangle(p),
        StrategyParameters::Strip(p) => {
            check_weighted_straddle(p, Straddle::strip(p.strike_price, p.premium_call, p.premium_put))
        }
        StrategyParameters::Strap(p) => {
            check_weighted_straddle(p, Straddle::strap(p.strike_price, p.premium_call, p.premium_put))
        }
        StrategyParameters::LongButterfly(p) => check_long_butterfly(p),
    }
}

fn check_sweep(sweep: &SweepRange) -> Check {
    require(sweep.step_size > Decimal::ZERO, "Step Size must be positive")?;
    require(
        sweep.start_price < sweep.end_price,
        "Start Price must be less than End Price",
    )
}

fn check_covers_break_evens(sweep: &SweepRange, lower: Price, upper: Price) -> Check {
    require(
        sweep.start_price < lower,
        "Start Price should be below lower break-even point",
    )?;
    require(
        sweep.end_price > upper,
        "End Price should be above upper break-even point",
    )
}

// ---------------------------------------------------------------------------
// Per-strategy rules
// ---------------------------------------------------------------------------

fn check_single_leg(p: &SingleLegInput) -> Check {
    require(
        p.strike_price > Decimal::ZERO && p.premium > Decimal::ZERO,
        "Strike Price and Premium must be positive",
    )?;
    require(
        p.sweep.start_price < p.strike_price,
        "Start Price must be less than Strike Price",
    )?;
    require(
        p.sweep.end_price > p.strike_price,
        "End Price must be greater than Strike Price",
    )
}

fn check_spread_pricing(p: &VerticalSpreadInput) -> Check {
    require_positive(p.strike_price_low, "Lower Strike Price")?;
    require_positive(p.strike_price_high, "Higher Strike Price")?;
    require_positive(p.premium_low, "Lower Premium")?;
    require_positive(p.premium_high, "Higher Premium")
}

fn check_bull_call_spread(p: &VerticalSpreadInput) -> Check {
    check_spread_pricing(p)?;
    require(
        p.strike_price_low < p.strike_price_high,
        "Call 1 Strike Price (Lower) must be less than Call 2 Strike Price (Higher)",
    )?;
    require(
        p.premium_low < p.premium_high,
        "Call 2 Premium (Lower) must be less than Call 1 Premium (Higher)",
    )?;
    require(
        p.sweep.start_price < p.strike_price_low,
        "Start Price must be less than Call 1 Strike Price (Lower)",
    )?;
    require(
        p.sweep.end_price > p.strike_price_high,
        "End Price must be greater than Call 2 Strike Price (Higher)",
    )
}

fn check_bear_put_spread(p: &VerticalSpreadInput) -> Check {
    check_spread_pricing(p)?;
    require(
        p.strike_price_low < p.strike_price_high,
        "Lower Strike (Short Put) must be less than Higher Strike (Long Put)",
    )?;
    require(
        p.premium_low < p.premium_high,
        "Short Put Premium must be less than Long Put Premium",
    )?;
    require(
        p.sweep.start_price < p.strike_price_high,
        "Start Price must be less than Higher Strike Price",
    )?;
    require(
        p.sweep.end_price > p.strike_price_low,
        "End Price must be greater than Lower Strike Price",
    )
}

fn check_weighted_straddle(p: &StraddleInput, straddle: Straddle) -> Check {
    require_positive(p.strike_price, "Strike Price")?;
    require_positive(p.premium_call, "Call Premium")?;
    require_positive(p.premium_put, "Put Premium")?;
    let be = straddle.break_even().points();
    check_covers_break_evens(&p.sweep, be[0], be[1])
}

fn check_long_strangle(p: &StrangleInput) -> Check {
    require_positive(p.strike_price_low, "Put Strike")?;
    require(
        p.strike_price_low < p.strike_price_high,
        "Put Strike must be less than Call Strike",
    )?;
    require_positive(p.premium_call, "Call Premium")?;
    require_positive(p.premium_put, "Put Premium")?;
    let total = p.premium_call + p.premium_put;
    check_covers_break_evens(
        &p.sweep,
        p.strike_price_low - total,
        p.strike_price_high + total,
    )
}

fn check_long_butterfly(p: &ButterflyInput) -> Check {
    require_positive(p.strike_price_low, "Lower strike")?;
    require(
        p.strike_price_low < p.strike_price_middle,
        "Lower strike must be less than middle strike",
    )?;
    require(
        p.strike_price_middle < p.strike_price_high,
        "Middle strike must be less than upper strike",
    )?;

    let lower_gap = p.strike_price_middle - p.strike_price_low;
    let upper_gap = p.strike_price_high - p.strike_price_middle;
    require(
        (lower_gap - upper_gap).abs() <= WING_SPACING_TOLERANCE,
        "Distance between strikes must be equal",
    )?;

    require_positive(p.premium_low, "ITM call premium")?;
    require(
        p.premium_low < p.premium_middle,
        "ITM call premium must be less than ATM call premium",
    )?;
    require(
        p.premium_middle < p.premium_high,
        "ATM call premium must be less than OTM call premium",
    )?;

    let fly = LongButterfly::from(p);
    require(
        fly.net_premium() > Decimal::ZERO,
        "Butterfly must be opened at a net debit (net premium must be positive)",
    )?;
    check_covers_break_evens(&p.sweep, fly.lower_break_even(), fly.upper_break_even())
}

// ---------------------------------------------------------------------------
// Warnings
// ---------------------------------------------------------------------------

fn sweep_warnings(sweep: &SweepRange) -> ValidationResult {
    match sweep.point_count() {
        Ok(count) if count > MAX_SWEEP_POINTS => {
            return ValidationResult::error(format!(
                "Price sweep would have {} points (limit {}); increase Step Size",
                count, MAX_SWEEP_POINTS
            ));
        }
        Ok(count) if count > LARGE_SWEEP_WARNING_POINTS => {
            return ValidationResult::warning(format!(
                "Price sweep has {} points; consider a larger Step Size",
                count
            ));
        }
        Err(e) => return ValidationResult::error(e.to_string()),
        _ => {}
    }
    if let Ok(Some(last)) = sweep.overshoot() {
        return ValidationResult::warning(format!(
            "End Price is not a whole number of steps from Start Price; sweep ends at {}",
            last
        ));
    }
    ValidationResult::ok()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
