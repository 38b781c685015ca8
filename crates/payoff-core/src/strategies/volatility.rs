//! Long-volatility combinations: a call and a put bought together.
//!
//! Straddle, strip and strap share one ATM strike and differ only in how many
//! calls and puts are held. Each side's break-even sits where that side's
//! intrinsic value covers the whole premium outlay, i.e. `total / count` away
//! from the strike.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{call_intrinsic, put_intrinsic, BreakEven, PayoffProfile, PayoffRow};
use crate::sweep::SweepRange;
use crate::types::{Money, Price};

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StraddleInput {
    pub strike_price: Price,
    pub premium_call: Money,
    pub premium_put: Money,
    pub sweep: SweepRange,
}

/// `strike_price_low` is the put strike, `strike_price_high` the call strike.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrangleInput {
    pub strike_price_low: Price,
    pub strike_price_high: Price,
    pub premium_call: Money,
    pub premium_put: Money,
    pub sweep: SweepRange,
}

// ---------------------------------------------------------------------------
// Straddle family
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StraddleWeighting {
    /// One call, one put.
    Even,
    /// One call, two puts.
    Strip,
    /// Two calls, one put.
    Strap,
}

impl StraddleWeighting {
    pub fn calls(&self) -> u32 {
        match self {
            StraddleWeighting::Even | StraddleWeighting::Strip => 1,
            StraddleWeighting::Strap => 2,
        }
    }

    pub fn puts(&self) -> u32 {
        match self {
            StraddleWeighting::Even | StraddleWeighting::Strap => 1,
            StraddleWeighting::Strip => 2,
        }
    }
}

/// Calls and puts bought at the same strike, in the proportion given by
/// `weighting`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Straddle {
    pub strike_price: Price,
    pub premium_call: Money,
    pub premium_put: Money,
    pub weighting: StraddleWeighting,
}

impl Straddle {
    pub fn long(strike_price: Price, premium_call: Money, premium_put: Money) -> Self {
        Self::weighted(strike_price, premium_call, premium_put, StraddleWeighting::Even)
    }

    pub fn strip(strike_price: Price, premium_call: Money, premium_put: Money) -> Self {
        Self::weighted(strike_price, premium_call, premium_put, StraddleWeighting::Strip)
    }

    pub fn strap(strike_price: Price, premium_call: Money, premium_put: Money) -> Self {
        Self::weighted(strike_price, premium_call, premium_put, StraddleWeighting::Strap)
    }

    fn weighted(
        strike_price: Price,
        premium_call: Money,
        premium_put: Money,
        weighting: StraddleWeighting,
    ) -> Self {
        Straddle {
            strike_price,
            premium_call,
            premium_put,
            weighting,
        }
    }

    fn call_count(&self) -> Decimal {
        Decimal::from(self.weighting.calls())
    }

    fn put_count(&self) -> Decimal {
        Decimal::from(self.weighting.puts())
    }

    pub fn total_call_premium(&self) -> Money {
        self.call_count() * self.premium_call
    }

    pub fn total_put_premium(&self) -> Money {
        self.put_count() * self.premium_put
    }
}

impl PayoffProfile for Straddle {
    fn net_premium(&self) -> Money {
        self.total_call_premium() + self.total_put_premium()
    }

    fn columns(&self) -> &'static [&'static str] {
        match self.weighting {
            StraddleWeighting::Even => &["Call Premium", "Put Premium", "Call Value", "Put Value"],
            StraddleWeighting::Strip => &[
                "Call Premium",
                "Total Put Premium",
                "Call Value",
                "Two Puts Value",
            ],
            StraddleWeighting::Strap => &[
                "Total Call Premium",
                "Put Premium",
                "Two Calls Value",
                "Put Value",
            ],
        }
    }

    fn evaluate(&self, price: Price) -> PayoffRow {
        let calls_value = self.call_count() * call_intrinsic(price, self.strike_price);
        let puts_value = self.put_count() * put_intrinsic(price, self.strike_price);
        let net_payoff = calls_value + puts_value - self.net_premium();
        PayoffRow::new(
            price,
            vec![
                self.total_call_premium(),
                self.total_put_premium(),
                calls_value,
                puts_value,
            ],
            net_payoff,
        )
    }

    fn break_even(&self) -> BreakEven {
        let total = self.net_premium();
        BreakEven::Pair {
            lower: self.strike_price - total / self.put_count(),
            upper: self.strike_price + total / self.call_count(),
        }
    }

    fn strikes(&self) -> Vec<Price> {
        vec![self.strike_price]
    }
}

// ---------------------------------------------------------------------------
// Strangle
// ---------------------------------------------------------------------------

/// Out-of-the-money put and call bought at separate strikes.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LongStrangle {
    pub put_strike: Price,
    pub call_strike: Price,
    pub premium_call: Money,
    pub premium_put: Money,
}

impl From<&StrangleInput> for LongStrangle {
    fn from(input: &StrangleInput) -> Self {
        LongStrangle {
            put_strike: input.strike_price_low,
            call_strike: input.strike_price_high,
            premium_call: input.premium_call,
            premium_put: input.premium_put,
        }
    }
}

impl PayoffProfile for LongStrangle {
    fn net_premium(&self) -> Money {
        self.premium_call + self.premium_put
    }

    fn columns(&self) -> &'static [&'static str] {
        &["Call Premium", "Put Premium", "Call Value", "Put Value"]
    }

    fn evaluate(&self, price: Price) -> PayoffRow {
        let call_value = call_intrinsic(price, self.call_strike);
        let put_value = put_intrinsic(price, self.put_strike);
        let net_payoff = call_value + put_value - self.net_premium();
        PayoffRow::new(
            price,
            vec![self.premium_call, self.premium_put, call_value, put_value],
            net_payoff,
        )
    }

    fn break_even(&self) -> BreakEven {
        let total = self.net_premium();
        BreakEven::Pair {
            lower: self.put_strike - total,
            upper: self.call_strike + total,
        }
    }

    fn strikes(&self) -> Vec<Price> {
        vec![self.put_strike, self.call_strike]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
