use serde::{Deserialize, Serialize};

use super::{call_intrinsic, put_intrinsic, BreakEven, PayoffProfile, PayoffRow};
use crate::sweep::SweepRange;
use crate::types::{Money, Price};

// ---------------------------------------------------------------------------
// Enums
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegType {
    Call,
    Put,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LegPosition {
    Long,
    Short,
}

// ---------------------------------------------------------------------------
// Input types
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SingleLegInput {
    pub strike_price: Price,
    pub premium: Money,
    pub sweep: SweepRange,
}

// ---------------------------------------------------------------------------
// Strategy
// ---------------------------------------------------------------------------

/// One call or put, bought or written.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SingleLegOption {
    pub leg_type: LegType,
    pub position: LegPosition,
    pub strike_price: Price,
    pub premium: Money,
}

impl SingleLegOption {
    pub fn new(leg_type: LegType, position: LegPosition, strike_price: Price, premium: Money) -> Self {
        SingleLegOption {
            leg_type,
            position,
            strike_price,
            premium,
        }
    }

    pub fn long_call(strike_price: Price, premium: Money) -> Self {
        Self::new(LegType::Call, LegPosition::Long, strike_price, premium)
    }

    pub fn short_call(strike_price: Price, premium: Money) -> Self {
        Self::new(LegType::Call, LegPosition::Short, strike_price, premium)
    }

    pub fn long_put(strike_price: Price, premium: Money) -> Self {
        Self::new(LegType::Put, LegPosition::Long, strike_price, premium)
    }

    pub fn short_put(strike_price: Price, premium: Money) -> Self {
        Self::new(LegType::Put, LegPosition::Short, strike_price, premium)
    }

    pub fn intrinsic_value(&self, price: Price) -> Money {
        match self.leg_type {
            LegType::Call => call_intrinsic(price, self.strike_price),
            LegType::Put => put_intrinsic(price, self.strike_price),
        }
    }
}

impl PayoffProfile for SingleLegOption {
    fn net_premium(&self) -> Money {
        match self.position {
            LegPosition::Long => self.premium,
            LegPosition::Short => -self.premium,
        }
    }

    fn columns(&self) -> &'static [&'static str] {
        match self.leg_type {
            LegType::Call => &["Premium", "Call Value"],
            LegType::Put => &["Premium", "Put Value"],
        }
    }

    fn evaluate(&self, price: Price) -> PayoffRow {
        let intrinsic = self.intrinsic_value(price);
        let net_payoff = match self.position {
            LegPosition::Long => intrinsic - self.premium,
            LegPosition::Short => self.premium - intrinsic,
        };
        PayoffRow::new(price, vec![self.premium, intrinsic], net_payoff)
    }

    /// Long and short share the same break-even; only the sign of the payoff differs.
    fn break_even(&self) -> BreakEven {
        match self.leg_type {
            LegType::Call => BreakEven::Single(self.strike_price + self.premium),
            LegType::Put => BreakEven::Single(self.strike_price - self.premium),
        }
    }

    fn strikes(&self) -> Vec<Price> {
        vec![self.strike_price]
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use rust_decimal_macros::dec;

    #[test]
    fn test_long_call_payoff() {
        let leg = SingleLegOption::long_call(dec!(100), dec!(5));
        // Below strike: premium lost
        assert_eq!(leg.evaluate(dec!(80)).net_payoff, dec!(-5));
        // At strike: premium lost
        assert_eq!(leg.evaluate(dec!(100)).net_payoff, dec!(-5));
        // Above strike: 120 - 100 - 5
        let row = leg.evaluate(dec!(120));
        assert_eq!(row.values, vec![dec!(5), dec!(20)]);
        assert_eq!(row.net_payoff, dec!(15));
    }

    #[test]
    fn test_long_call_break_even_is_zero_payoff() {
        let leg = SingleLegOption::long_call(dec!(100), dec!(5));
        assert_eq!(leg.break_even(), BreakEven::Single(dec!(105)));
        assert_eq!(leg.evaluate(dec!(105)).net_payoff, Decimal::ZERO);
    }

    #[test]
    fn test_short_call_payoff() {
        let leg = SingleLegOption::short_call(dec!(100), dec!(5));
        assert_eq!(leg.evaluate(dec!(80)).net_payoff, dec!(5));
        assert_eq!(leg.evaluate(dec!(130)).net_payoff, dec!(-25));
        assert_eq!(leg.break_even(), BreakEven::Single(dec!(105)));
        assert_eq!(leg.net_premium(), dec!(-5));
    }

    #[test]
    fn test_long_put_payoff() {
        let leg = SingleLegOption::long_put(dec!(100), dec!(5));
        let row = leg.evaluate(dec!(80));
        assert_eq!(row.values, vec![dec!(5), dec!(20)]);
        assert_eq!(row.net_payoff, dec!(15));
        assert_eq!(leg.evaluate(dec!(120)).net_payoff, dec!(-5));
        assert_eq!(leg.break_even(), BreakEven::Single(dec!(95)));
        assert_eq!(leg.evaluate(dec!(95)).net_payoff, Decimal::ZERO);
    }

    #[test]
    fn test_short_put_payoff() {
        let leg = SingleLegOption::short_put(dec!(100), dec!(5));
        assert_eq!(leg.evaluate(dec!(120)).net_payoff, dec!(5));
        assert_eq!(leg.evaluate(dec!(70)).net_payoff, dec!(-25));
        assert_eq!(leg.break_even(), BreakEven::Single(dec!(95)));
    }

    #[test]
    fn test_columns_by_leg_type() {
        assert_eq!(
            SingleLegOption::long_call(dec!(1), dec!(1)).columns(),
            &["Premium", "Call Value"]
        );
        assert_eq!(
            SingleLegOption::short_put(dec!(1), dec!(1)).columns(),
            &["Premium", "Put Value"]
        );
    }
}
