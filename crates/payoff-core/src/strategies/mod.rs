//! Expiry payoff profiles for the supported option strategies.
//!
//! Every strategy is a plain value built from a [`StrategyParameters`]
//! record. [`Strategy::compute_payoff_curve`] evaluates it over the price
//! sweep (plus any variant-specific synthetic points) and
//! [`Strategy::compute_break_even`] returns the closed-form break-even(s).

pub mod butterfly;
pub mod kind;
pub mod single_leg;
pub mod spreads;
pub mod volatility;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::sweep::{PriceSweep, SweepRange};
use crate::types::{Money, Price};
use crate::PayoffResult;

pub use butterfly::{ButterflyInput, LongButterfly};
pub use kind::{StrategyCharacteristics, StrategyKind};
pub use single_leg::{LegPosition, LegType, SingleLegInput, SingleLegOption};
pub use spreads::{BearPutSpread, BullCallSpread, VerticalSpreadInput};
pub use volatility::{LongStrangle, Straddle, StraddleInput, StrangleInput};

// ---------------------------------------------------------------------------
// Output types
// ---------------------------------------------------------------------------

/// Closed-form break-even result: one price, or a lower/upper pair.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BreakEven {
    Single(Price),
    Pair { lower: Price, upper: Price },
}

impl BreakEven {
    /// Break-even prices in ascending order.
    pub fn points(&self) -> Vec<Price> {
        match *self {
            BreakEven::Single(p) => vec![p],
            BreakEven::Pair { lower, upper } => vec![lower, upper],
        }
    }

    pub fn is_pair(&self) -> bool {
        matches!(self, BreakEven::Pair { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Profit,
    Loss,
    BreakEven,
}

/// One row of a payoff table. `values` lines up with [`PayoffTable::columns`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffRow {
    pub expiration_price: Price,
    pub values: Vec<Money>,
    pub net_payoff: Money,
}

impl PayoffRow {
    /// Negated worthless legs come in as `-0`; every zero is stored unsigned.
    pub fn new(expiration_price: Price, values: Vec<Money>, net_payoff: Money) -> Self {
        PayoffRow {
            expiration_price,
            values: values.into_iter().map(unsigned_zero).collect(),
            net_payoff: unsigned_zero(net_payoff),
        }
    }

    pub fn outcome(&self) -> Outcome {
        if self.net_payoff > Decimal::ZERO {
            Outcome::Profit
        } else if self.net_payoff < Decimal::ZERO {
            Outcome::Loss
        } else {
            Outcome::BreakEven
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoffTable {
    pub columns: Vec<String>,
    pub rows: Vec<PayoffRow>,
}

impl PayoffTable {
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn prices(&self) -> Vec<Price> {
        self.rows.iter().map(|r| r.expiration_price).collect()
    }

    /// Row evaluated at exactly `price`, if the table contains it.
    pub fn row_at(&self, price: Price) -> Option<&PayoffRow> {
        self.rows.iter().find(|r| r.expiration_price == price)
    }

    /// Row whose price is closest to `price`. Ties go to the lower price.
    pub fn nearest_row(&self, price: Price) -> Option<&PayoffRow> {
        self.rows
            .iter()
            .min_by_key(|r| (r.expiration_price - price).abs())
    }
}

// ---------------------------------------------------------------------------
// Profile trait
// ---------------------------------------------------------------------------

/// Behaviour shared by every strategy definition.
pub trait PayoffProfile {
    /// Premium paid (positive) or received (negative) to open the position.
    fn net_premium(&self) -> Money;

    /// Labels of the breakdown values in each row, excluding price and net payoff.
    fn columns(&self) -> &'static [&'static str];

    /// Payoff row at a single expiration price.
    fn evaluate(&self, price: Price) -> PayoffRow;

    fn break_even(&self) -> BreakEven;

    /// Strike prices of every leg. The payoff is linear between them.
    fn strikes(&self) -> Vec<Price>;

    /// Prices that must appear in the payoff curve regardless of the sweep grid.
    fn additional_evaluation_points(&self) -> Vec<Price> {
        Vec::new()
    }
}

fn unsigned_zero(value: Money) -> Money {
    if value.is_zero() {
        Decimal::ZERO
    } else {
        value
    }
}

pub(crate) fn call_intrinsic(price: Price, strike: Price) -> Money {
    (price - strike).max(Decimal::ZERO)
}

pub(crate) fn put_intrinsic(price: Price, strike: Price) -> Money {
    (strike - price).max(Decimal::ZERO)
}

// ---------------------------------------------------------------------------
// Parameters
// ---------------------------------------------------------------------------

/// Caller-supplied parameters for one strategy request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum StrategyParameters {
    LongCall(SingleLegInput),
    ShortCall(SingleLegInput),
    LongPut(SingleLegInput),
    ShortPut(SingleLegInput),
    BullCallSpread(VerticalSpreadInput),
    BearPutSpread(VerticalSpreadInput),
    LongStraddle(StraddleInput),
    LongStrangle(StrangleInput),
    Strip(StraddleInput),
    Strap(StraddleInput),
    LongButterfly(ButterflyInput),
}

impl StrategyParameters {
    pub fn kind(&self) -> StrategyKind {
        match self {
            StrategyParameters::LongCall(_) => StrategyKind::LongCall,
            StrategyParameters::ShortCall(_) => StrategyKind::ShortCall,
            StrategyParameters::LongPut(_) => StrategyKind::LongPut,
            StrategyParameters::ShortPut(_) => StrategyKind::ShortPut,
            StrategyParameters::BullCallSpread(_) => StrategyKind::BullCallSpread,
            StrategyParameters::BearPutSpread(_) => StrategyKind::BearPutSpread,
            StrategyParameters::LongStraddle(_) => StrategyKind::LongStraddle,
            StrategyParameters::LongStrangle(_) => StrategyKind::LongStrangle,
            StrategyParameters::Strip(_) => StrategyKind::Strip,
            StrategyParameters::Strap(_) => StrategyKind::Strap,
            StrategyParameters::LongButterfly(_) => StrategyKind::LongButterfly,
        }
    }

    pub fn sweep(&self) -> &SweepRange {
        match self {
            StrategyParameters::LongCall(p)
            | StrategyParameters::ShortCall(p)
            | StrategyParameters::LongPut(p)
            | StrategyParameters::ShortPut(p) => &p.sweep,
            StrategyParameters::BullCallSpread(p) | StrategyParameters::BearPutSpread(p) => {
                &p.sweep
            }
            StrategyParameters::LongStraddle(p)
            | StrategyParameters::Strip(p)
            | StrategyParameters::Strap(p) => &p.sweep,
            StrategyParameters::LongStrangle(p) => &p.sweep,
            StrategyParameters::LongButterfly(p) => &p.sweep,
        }
    }

    pub fn sweep_mut(&mut self) -> &mut SweepRange {
        match self {
            StrategyParameters::LongCall(p)
            | StrategyParameters::ShortCall(p)
            | StrategyParameters::LongPut(p)
            | StrategyParameters::ShortPut(p) => &mut p.sweep,
            StrategyParameters::BullCallSpread(p) | StrategyParameters::BearPutSpread(p) => {
                &mut p.sweep
            }
            StrategyParameters::LongStraddle(p)
            | StrategyParameters::Strip(p)
            | StrategyParameters::Strap(p) => &mut p.sweep,
            StrategyParameters::LongStrangle(p) => &mut p.sweep,
            StrategyParameters::LongButterfly(p) => &mut p.sweep,
        }
    }

    /// Economic definition without the sweep bounds.
    pub fn definition(&self) -> StrategyDefinition {
        match self {
            StrategyParameters::LongCall(p) => StrategyDefinition::LongCall(
                SingleLegOption::long_call(p.strike_price, p.premium),
            ),
            StrategyParameters::ShortCall(p) => StrategyDefinition::ShortCall(
                SingleLegOption::short_call(p.strike_price, p.premium),
            ),
            StrategyParameters::LongPut(p) => {
                StrategyDefinition::LongPut(SingleLegOption::long_put(p.strike_price, p.premium))
            }
            StrategyParameters::ShortPut(p) => StrategyDefinition::ShortPut(
                SingleLegOption::short_put(p.strike_price, p.premium),
            ),
            StrategyParameters::BullCallSpread(p) => {
                StrategyDefinition::BullCallSpread(BullCallSpread::from(p))
            }
            StrategyParameters::BearPutSpread(p) => {
                StrategyDefinition::BearPutSpread(BearPutSpread::from(p))
            }
            StrategyParameters::LongStraddle(p) => StrategyDefinition::LongStraddle(
                Straddle::long(p.strike_price, p.premium_call, p.premium_put),
            ),
            StrategyParameters::LongStrangle(p) => {
                StrategyDefinition::LongStrangle(LongStrangle::from(p))
            }
            StrategyParameters::Strip(p) => StrategyDefinition::Strip(Straddle::strip(
                p.strike_price,
                p.premium_call,
                p.premium_put,
            )),
            StrategyParameters::Strap(p) => StrategyDefinition::Strap(Straddle::strap(
                p.strike_price,
                p.premium_call,
                p.premium_put,
            )),
            StrategyParameters::LongButterfly(p) => {
                StrategyDefinition::LongButterfly(LongButterfly::from(p))
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Definitions
// ---------------------------------------------------------------------------

/// Closed set of strategy variants, each holding its economic parameters.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "strategy", rename_all = "snake_case")]
pub enum StrategyDefinition {
    LongCall(SingleLegOption),
    ShortCall(SingleLegOption),
    LongPut(SingleLegOption),
    ShortPut(SingleLegOption),
    BullCallSpread(BullCallSpread),
    BearPutSpread(BearPutSpread),
    LongStraddle(Straddle),
    LongStrangle(LongStrangle),
    Strip(Straddle),
    Strap(Straddle),
    LongButterfly(LongButterfly),
}

impl StrategyDefinition {
    pub fn kind(&self) -> StrategyKind {
        match self {
            StrategyDefinition::LongCall(_) => StrategyKind::LongCall,
            StrategyDefinition::ShortCall(_) => StrategyKind::ShortCall,
            StrategyDefinition::LongPut(_) => StrategyKind::LongPut,
            StrategyDefinition::ShortPut(_) => StrategyKind::ShortPut,
            StrategyDefinition::BullCallSpread(_) => StrategyKind::BullCallSpread,
            StrategyDefinition::BearPutSpread(_) => StrategyKind::BearPutSpread,
            StrategyDefinition::LongStraddle(_) => StrategyKind::LongStraddle,
            StrategyDefinition::LongStrangle(_) => StrategyKind::LongStrangle,
            StrategyDefinition::Strip(_) => StrategyKind::Strip,
            StrategyDefinition::Strap(_) => StrategyKind::Strap,
            StrategyDefinition::LongButterfly(_) => StrategyKind::LongButterfly,
        }
    }

    pub fn as_profile(&self) -> &dyn PayoffProfile {
        match self {
            StrategyDefinition::LongCall(s)
            | StrategyDefinition::ShortCall(s)
            | StrategyDefinition::LongPut(s)
            | StrategyDefinition::ShortPut(s) => s,
            StrategyDefinition::BullCallSpread(s) => s,
            StrategyDefinition::BearPutSpread(s) => s,
            StrategyDefinition::LongStraddle(s)
            | StrategyDefinition::Strip(s)
            | StrategyDefinition::Strap(s) => s,
            StrategyDefinition::LongStrangle(s) => s,
            StrategyDefinition::LongButterfly(s) => s,
        }
    }
}

impl PayoffProfile for StrategyDefinition {
    fn net_premium(&self) -> Money {
        self.as_profile().net_premium()
    }

    fn columns(&self) -> &'static [&'static str] {
        self.as_profile().columns()
    }

    fn evaluate(&self, price: Price) -> PayoffRow {
        self.as_profile().evaluate(price)
    }

    fn break_even(&self) -> BreakEven {
        self.as_profile().break_even()
    }

    fn strikes(&self) -> Vec<Price> {
        self.as_profile().strikes()
    }

    fn additional_evaluation_points(&self) -> Vec<Price> {
        self.as_profile().additional_evaluation_points()
    }
}

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// A strategy definition bound to the price sweep it is evaluated over.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Strategy {
    definition: StrategyDefinition,
    sweep: PriceSweep,
}

impl Strategy {
    /// Generates the sweep and binds it to the definition. Economic
    /// parameters are not re-validated here; see `validation::validate`.
    pub fn new(params: StrategyParameters) -> PayoffResult<Self> {
        let sweep = params.sweep().generate()?;
        Ok(Strategy {
            definition: params.definition(),
            sweep,
        })
    }

    pub fn from_definition(definition: StrategyDefinition, sweep: PriceSweep) -> Self {
        Strategy { definition, sweep }
    }

    pub fn kind(&self) -> StrategyKind {
        self.definition.kind()
    }

    pub fn definition(&self) -> &StrategyDefinition {
        &self.definition
    }

    pub fn sweep(&self) -> &PriceSweep {
        &self.sweep
    }

    pub fn net_premium(&self) -> Money {
        self.definition.net_premium()
    }

    /// Prices the curve is evaluated at: the sweep plus any synthetic points.
    pub fn evaluation_prices(&self) -> Vec<Price> {
        let extra = self.definition.additional_evaluation_points();
        if !extra.is_empty() {
            debug!(
                target: "payoff.curve",
                strategy = self.kind().name(),
                extra = ?extra,
                "adding synthetic evaluation points"
            );
        }
        self.sweep.with_additional_points(&extra)
    }

    pub fn compute_payoff_curve(&self) -> PayoffTable {
        let rows = self
            .evaluation_prices()
            .into_iter()
            .map(|p| self.definition.evaluate(p))
            .collect();
        PayoffTable {
            columns: self
                .definition
                .columns()
                .iter()
                .map(|c| c.to_string())
                .collect(),
            rows,
        }
    }

    pub fn compute_break_even(&self) -> BreakEven {
        self.definition.break_even()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn sweep(start: Decimal, end: Decimal, step: Decimal) -> SweepRange {
        SweepRange::new(start, end, step)
    }

    #[test]
    fn test_strategy_new_rejects_bad_sweep() {
        let params = StrategyParameters::LongCall(SingleLegInput {
            strike_price: dec!(100),
            premium: dec!(5),
            sweep: sweep(dec!(140), dec!(60), dec!(5)),
        });
        assert!(Strategy::new(params).is_err());
    }

    #[test]
    fn test_kind_matches_between_parameters_and_definition() {
        for kind in StrategyKind::ALL {
            let params = kind.example_parameters();
            assert_eq!(params.kind(), kind);
            assert_eq!(params.definition().kind(), kind);
        }
    }

    #[test]
    fn test_columns_align_with_row_values() {
        for kind in StrategyKind::ALL {
            let strategy = Strategy::new(kind.example_parameters()).unwrap();
            let table = strategy.compute_payoff_curve();
            assert!(!table.is_empty(), "{} produced no rows", kind.name());
            for row in &table.rows {
                assert_eq!(row.values.len(), table.columns.len(), "{}", kind.name());
            }
        }
    }

    #[test]
    fn test_row_outcome() {
        assert_eq!(
            PayoffRow::new(dec!(1), vec![], dec!(0.5)).outcome(),
            Outcome::Profit
        );
        assert_eq!(
            PayoffRow::new(dec!(1), vec![], dec!(-0.5)).outcome(),
            Outcome::Loss
        );
        assert_eq!(
            PayoffRow::new(dec!(1), vec![], dec!(0)).outcome(),
            Outcome::BreakEven
        );
    }

    #[test]
    fn test_nearest_row_prefers_lower_on_tie() {
        let table = PayoffTable {
            columns: vec![],
            rows: vec![
                PayoffRow::new(dec!(100), vec![], dec!(-1)),
                PayoffRow::new(dec!(110), vec![], dec!(1)),
            ],
        };
        assert_eq!(
            table.nearest_row(dec!(105)).unwrap().expiration_price,
            dec!(100)
        );
        assert_eq!(
            table.nearest_row(dec!(108)).unwrap().expiration_price,
            dec!(110)
        );
    }

    #[test]
    fn test_break_even_points_order() {
        let be = BreakEven::Pair {
            lower: dec!(90),
            upper: dec!(110),
        };
        assert!(be.is_pair());
        assert_eq!(be.points(), vec![dec!(90), dec!(110)]);
        assert!(!BreakEven::Single(dec!(105)).is_pair());
    }

    #[test]
    fn test_parameters_deserialize_from_tagged_json() {
        let json = serde_json::json!({
            "strategy": "long_straddle",
            "strike_price": 100,
            "premium_call": 6,
            "premium_put": 4,
            "sweep": { "start_price": 80, "end_price": 120, "step_size": 5 }
        });
        let params: StrategyParameters = serde_json::from_value(json).unwrap();
        assert_eq!(params.kind(), StrategyKind::LongStraddle);
        let strategy = Strategy::new(params).unwrap();
        assert_eq!(
            strategy.compute_break_even(),
            BreakEven::Pair {
                lower: dec!(90),
                upper: dec!(110)
            }
        );
    }

    #[test]
    fn test_wrong_field_set_fails_to_deserialize() {
        let json = serde_json::json!({
            "strategy": "long_butterfly",
            "strike_price": 100,
            "premium": 5,
            "sweep": { "start_price": 60, "end_price": 140, "step_size": 5 }
        });
        assert!(serde_json::from_value::<StrategyParameters>(json).is_err());
    }

    #[test]
    fn test_worthless_short_legs_serialize_unsigned() {
        let spread = BullCallSpread::from(&VerticalSpreadInput {
            strike_price_low: dec!(90),
            strike_price_high: dec!(110),
            premium_low: dec!(5),
            premium_high: dec!(15),
            sweep: sweep(dec!(80), dec!(120), dec!(5)),
        });
        let row = spread.evaluate(dec!(80));
        assert!(!row.values[3].is_sign_negative());
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["values"], serde_json::json!(["15", "5", "0", "0"]));

        let bear = BearPutSpread::from(&VerticalSpreadInput {
            strike_price_low: dec!(90),
            strike_price_high: dec!(110),
            premium_low: dec!(5),
            premium_high: dec!(15),
            sweep: sweep(dec!(80), dec!(120), dec!(5)),
        });
        let json = serde_json::to_value(bear.evaluate(dec!(120))).unwrap();
        assert_eq!(json["values"][3], "0");

        let fly = LongButterfly::from(&ButterflyInput {
            strike_price_low: dec!(120),
            strike_price_middle: dec!(125),
            strike_price_high: dec!(130),
            premium_low: dec!(3),
            premium_middle: dec!(4),
            premium_high: dec!(6),
            sweep: sweep(dec!(90), dec!(160), dec!(5)),
        });
        let json = serde_json::to_value(fly.evaluate(dec!(100))).unwrap();
        assert_eq!(json["values"][2], "0");
    }

    #[test]
    fn test_strikes_cover_every_leg() {
        for kind in StrategyKind::ALL {
            let definition = kind.example_parameters().definition();
            let strikes = definition.strikes();
            let expected = match kind {
                StrategyKind::LongButterfly => 3,
                StrategyKind::BullCallSpread
                | StrategyKind::BearPutSpread
                | StrategyKind::LongStrangle => 2,
                _ => 1,
            };
            assert_eq!(strikes.len(), expected, "{}", kind);
        }
    }
}
