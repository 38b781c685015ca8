use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{call_intrinsic, BreakEven, PayoffProfile, PayoffRow};
use crate::sweep::SweepRange;
use crate::types::{Money, Price};

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ButterflyInput {
    pub strike_price_low: Price,
    pub strike_price_middle: Price,
    pub strike_price_high: Price,
    pub premium_low: Money,
    pub premium_middle: Money,
    pub premium_high: Money,
    pub sweep: SweepRange,
}

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// Long call butterfly: +1 lower call, -2 middle calls, +1 upper call.
///
/// The payoff is piecewise linear with kinks at both break-evens and at the
/// middle strike, so those prices are always added to the evaluated set.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongButterfly {
    pub strike_price_low: Price,
    pub strike_price_middle: Price,
    pub strike_price_high: Price,
    pub premium_low: Money,
    pub premium_middle: Money,
    pub premium_high: Money,
}

impl From<&ButterflyInput> for LongButterfly {
    fn from(input: &ButterflyInput) -> Self {
        LongButterfly {
            strike_price_low: input.strike_price_low,
            strike_price_middle: input.strike_price_middle,
            strike_price_high: input.strike_price_high,
            premium_low: input.premium_low,
            premium_middle: input.premium_middle,
            premium_high: input.premium_high,
        }
    }
}

impl LongButterfly {
    pub fn lower_break_even(&self) -> Price {
        self.strike_price_low + self.net_premium()
    }

    pub fn upper_break_even(&self) -> Price {
        self.strike_price_high - self.net_premium()
    }

    /// Payoff at the middle strike, the apex of the tent.
    pub fn max_profit(&self) -> Money {
        self.strike_price_middle - self.strike_price_low - self.net_premium()
    }
}

impl PayoffProfile for LongButterfly {
    fn net_premium(&self) -> Money {
        (self.premium_low + self.premium_high) - Decimal::TWO * self.premium_middle
    }

    fn columns(&self) -> &'static [&'static str] {
        &[
            "Net Premium",
            "Lower Call Value",
            "Middle Call Value",
            "Upper Call Value",
        ]
    }

    fn evaluate(&self, price: Price) -> PayoffRow {
        let net_premium = self.net_premium();
        let lower = call_intrinsic(price, self.strike_price_low);
        let middle = -Decimal::TWO * call_intrinsic(price, self.strike_price_middle);
        let upper = call_intrinsic(price, self.strike_price_high);
        PayoffRow::new(
            price,
            vec![net_premium, lower, middle, upper],
            lower + middle + upper - net_premium,
        )
    }

    fn break_even(&self) -> BreakEven {
        BreakEven::Pair {
            lower: self.lower_break_even(),
            upper: self.upper_break_even(),
        }
    }

    fn strikes(&self) -> Vec<Price> {
        vec![
            self.strike_price_low,
            self.strike_price_middle,
            self.strike_price_high,
        ]
    }

    fn additional_evaluation_points(&self) -> Vec<Price> {
        vec![
            self.lower_break_even(),
            self.upper_break_even(),
            self.strike_price_middle,
        ]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
