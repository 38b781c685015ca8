use serde::{Deserialize, Serialize};

use super::{call_intrinsic, put_intrinsic, BreakEven, PayoffProfile, PayoffRow};
use crate::sweep::SweepRange;
use crate::types::{Money, Price};

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

/// Two-strike debit spread.
///
/// `premium_high` is the larger premium, paid for the long (in-the-money)
/// leg; `premium_low` is received for the short leg. The pairing is taken
/// as given.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerticalSpreadInput {
    pub strike_price_low: Price,
    pub strike_price_high: Price,
    pub premium_low: Money,
    pub premium_high: Money,
    pub sweep: SweepRange,
}

// ---------------------------------------------------------------------------
// Bull call spread
// ---------------------------------------------------------------------------

/// Long call at the lower strike, short call at the higher strike.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BullCallSpread {
    pub strike_price_low: Price,
    pub strike_price_high: Price,
    pub premium_low: Money,
    pub premium_high: Money,
}

impl From<&VerticalSpreadInput> for BullCallSpread {
    fn from(input: &VerticalSpreadInput) -> Self {
        BullCallSpread {
            strike_price_low: input.strike_price_low,
            strike_price_high: input.strike_price_high,
            premium_low: input.premium_low,
            premium_high: input.premium_high,
        }
    }
}

impl PayoffProfile for BullCallSpread {
    fn net_premium(&self) -> Money {
        self.premium_high - self.premium_low
    }

    fn columns(&self) -> &'static [&'static str] {
        &[
            "Call 1 Premium",
            "Call 2 Premium",
            "Call 1 Value",
            "Call 2 Value (Short)",
        ]
    }

    fn evaluate(&self, price: Price) -> PayoffRow {
        let long_call = call_intrinsic(price, self.strike_price_low);
        let short_call = -call_intrinsic(price, self.strike_price_high);
        let net_payoff = long_call + short_call - self.net_premium();
        PayoffRow::new(
            price,
            vec![self.premium_high, self.premium_low, long_call, short_call],
            net_payoff,
        )
    }

    fn break_even(&self) -> BreakEven {
        BreakEven::Single(self.strike_price_low + self.net_premium())
    }

    fn strikes(&self) -> Vec<Price> {
        vec![self.strike_price_low, self.strike_price_high]
    }
}

// ---------------------------------------------------------------------------
// Bear put spread
// ---------------------------------------------------------------------------

/// Long put at the higher strike, short put at the lower strike.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BearPutSpread {
    pub strike_price_low: Price,
    pub strike_price_high: Price,
    pub premium_low: Money,
    pub premium_high: Money,
}

impl From<&VerticalSpreadInput> for BearPutSpread {
    fn from(input: &VerticalSpreadInput) -> Self {
        BearPutSpread {
            strike_price_low: input.strike_price_low,
            strike_price_high: input.strike_price_high,
            premium_low: input.premium_low,
            premium_high: input.premium_high,
        }
    }
}

impl PayoffProfile for BearPutSpread {
    fn net_premium(&self) -> Money {
        self.premium_high - self.premium_low
    }

    fn columns(&self) -> &'static [&'static str] {
        &[
            "Long Put Premium",
            "Short Put Premium",
            "Long Put Value",
            "Short Put Value",
        ]
    }

    fn evaluate(&self, price: Price) -> PayoffRow {
        let long_put = put_intrinsic(price, self.strike_price_high);
        let short_put = -put_intrinsic(price, self.strike_price_low);
        let net_payoff = long_put + short_put - self.net_premium();
        PayoffRow::new(
            price,
            vec![self.premium_high, self.premium_low, long_put, short_put],
            net_payoff,
        )
    }

    fn break_even(&self) -> BreakEven {
        BreakEven::Single(self.strike_price_high - self.net_premium())
    }

    fn strikes(&self) -> Vec<Price> {
        vec![self.strike_price_low, self.strike_price_high]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
