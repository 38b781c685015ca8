use std::fmt;
use std::str::FromStr;

use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};

use super::{
    ButterflyInput, SingleLegInput, StraddleInput, StrangleInput, StrategyParameters,
    VerticalSpreadInput,
};
use crate::error::PayoffError;
use crate::sweep::SweepRange;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StrategyKind {
    LongCall,
    ShortCall,
    LongPut,
    ShortPut,
    BullCallSpread,
    BearPutSpread,
    LongStraddle,
    LongStrangle,
    Strip,
    Strap,
    LongButterfly,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StrategyCharacteristics {
    pub direction: String,
    pub profit_type: String,
    pub loss_type: String,
    pub requires_margin: bool,
}

fn characteristics(
    direction: &str,
    profit_type: &str,
    loss_type: &str,
    requires_margin: bool,
) -> StrategyCharacteristics {
    StrategyCharacteristics {
        direction: direction.to_string(),
        profit_type: profit_type.to_string(),
        loss_type: loss_type.to_string(),
        requires_margin,
    }
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 11] = [
        StrategyKind::LongCall,
        StrategyKind::ShortCall,
        StrategyKind::LongPut,
        StrategyKind::ShortPut,
        StrategyKind::BullCallSpread,
        StrategyKind::BearPutSpread,
        StrategyKind::LongStraddle,
        StrategyKind::LongStrangle,
        StrategyKind::Strip,
        StrategyKind::Strap,
        StrategyKind::LongButterfly,
    ];

    /// Human-readable name.
    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::LongCall => "Long Call",
            StrategyKind::ShortCall => "Short Call",
            StrategyKind::LongPut => "Long Put",
            StrategyKind::ShortPut => "Short Put",
            StrategyKind::BullCallSpread => "Bull Call Spread",
            StrategyKind::BearPutSpread => "Bear Put Spread",
            StrategyKind::LongStraddle => "Long Straddle",
            StrategyKind::LongStrangle => "Long Strangle",
            StrategyKind::Strip => "Strip",
            StrategyKind::Strap => "Strap",
            StrategyKind::LongButterfly => "Long Butterfly",
        }
    }

    /// Identifier used in the `strategy` tag of parameter documents.
    pub fn id(&self) -> &'static str {
        match self {
            StrategyKind::LongCall => "long_call",
            StrategyKind::ShortCall => "short_call",
            StrategyKind::LongPut => "long_put",
            StrategyKind::ShortPut => "short_put",
            StrategyKind::BullCallSpread => "bull_call_spread",
            StrategyKind::BearPutSpread => "bear_put_spread",
            StrategyKind::LongStraddle => "long_straddle",
            StrategyKind::LongStrangle => "long_strangle",
            StrategyKind::Strip => "strip",
            StrategyKind::Strap => "strap",
            StrategyKind::LongButterfly => "long_butterfly",
        }
    }

    pub fn is_single_leg(&self) -> bool {
        matches!(
            self,
            StrategyKind::LongCall
                | StrategyKind::ShortCall
                | StrategyKind::LongPut
                | StrategyKind::ShortPut
        )
    }

    pub fn characteristics(&self) -> StrategyCharacteristics {
        match self {
            StrategyKind::LongCall => characteristics("bullish", "unlimited", "limited", false),
            StrategyKind::ShortCall => characteristics("bearish", "limited", "unlimited", true),
            StrategyKind::LongPut => characteristics("bearish", "limited", "limited", false),
            StrategyKind::ShortPut => characteristics("bullish", "limited", "limited", true),
            StrategyKind::BullCallSpread => characteristics("bullish", "limited", "limited", false),
            StrategyKind::BearPutSpread => characteristics("bearish", "limited", "limited", false),
            StrategyKind::LongStraddle => characteristics("volatile", "unlimited", "limited", false),
            StrategyKind::LongStrangle => characteristics("volatile", "unlimited", "limited", false),
            StrategyKind::Strip => {
                characteristics("volatile_bearish", "unlimited", "limited", false)
            }
            StrategyKind::Strap => {
                characteristics("volatile_bullish", "unlimited", "limited", false)
            }
            StrategyKind::LongButterfly => characteristics("neutral", "limited", "limited", false),
        }
    }

    /// A worked example for the strategy, suitable as a starting template.
    pub fn example_parameters(&self) -> StrategyParameters {
        match self {
            StrategyKind::LongCall => StrategyParameters::LongCall(single_leg_example()),
            StrategyKind::ShortCall => StrategyParameters::ShortCall(single_leg_example()),
            StrategyKind::LongPut => StrategyParameters::LongPut(single_leg_example()),
            StrategyKind::ShortPut => StrategyParameters::ShortPut(single_leg_example()),
            StrategyKind::BullCallSpread => {
                StrategyParameters::BullCallSpread(vertical_spread_example())
            }
            StrategyKind::BearPutSpread => {
                StrategyParameters::BearPutSpread(vertical_spread_example())
            }
            StrategyKind::LongStraddle => StrategyParameters::LongStraddle(StraddleInput {
                strike_price: dec!(100),
                premium_call: dec!(6),
                premium_put: dec!(4),
                sweep: SweepRange::new(dec!(80), dec!(120), dec!(5)),
            }),
            StrategyKind::LongStrangle => StrategyParameters::LongStrangle(StrangleInput {
                strike_price_low: dec!(80),
                strike_price_high: dec!(100),
                premium_call: dec!(4),
                premium_put: dec!(6),
                sweep: SweepRange::new(dec!(60), dec!(120), dec!(5)),
            }),
            StrategyKind::Strip => StrategyParameters::Strip(StraddleInput {
                strike_price: dec!(100),
                premium_call: dec!(8),
                premium_put: dec!(6),
                sweep: SweepRange::new(dec!(60), dec!(140), dec!(5)),
            }),
            StrategyKind::Strap => StrategyParameters::Strap(StraddleInput {
                strike_price: dec!(100),
                premium_call: dec!(11),
                premium_put: dec!(8),
                sweep: SweepRange::new(dec!(60), dec!(140), dec!(5)),
            }),
            StrategyKind::LongButterfly => StrategyParameters::LongButterfly(ButterflyInput {
                strike_price_low: dec!(120),
                strike_price_middle: dec!(125),
                strike_price_high: dec!(130),
                premium_low: dec!(3),
                premium_middle: dec!(4),
                premium_high: dec!(6),
                sweep: SweepRange::new(dec!(90), dec!(160), dec!(5)),
            }),
        }
    }
}

fn single_leg_example() -> SingleLegInput {
    SingleLegInput {
        strike_price: dec!(100),
        premium: dec!(5),
        sweep: SweepRange::new(dec!(60), dec!(140), dec!(5)),
    }
}

fn vertical_spread_example() -> VerticalSpreadInput {
    VerticalSpreadInput {
        strike_price_low: dec!(90),
        strike_price_high: dec!(110),
        premium_low: dec!(5),
        premium_high: dec!(15),
        sweep: SweepRange::new(dec!(80), dec!(120), dec!(5)),
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for StrategyKind {
    type Err = PayoffError;

    /// Accepts the snake_case id, kebab-case, or the display name in any case.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_ascii_lowercase().replace(['-', ' '], "_");
        StrategyKind::ALL
            .iter()
            .copied()
            .find(|k| k.id() == normalized)
            .ok_or_else(|| PayoffError::InvalidParameter {
                field: "strategy".into(),
                reason: format!(
                    "Unknown strategy '{}'. Use one of: {}",
                    s,
                    StrategyKind::ALL
                        .iter()
                        .map(|k| k.id())
                        .collect::<Vec<_>>()
                        .join(", ")
                ),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_accepts_common_spellings() {
        assert_eq!(
            "long_call".parse::<StrategyKind>().unwrap(),
            StrategyKind::LongCall
        );
        assert_eq!(
            "Bull Call Spread".parse::<StrategyKind>().unwrap(),
            StrategyKind::BullCallSpread
        );
        assert_eq!(
            "long-butterfly".parse::<StrategyKind>().unwrap(),
            StrategyKind::LongButterfly
        );
        assert!("iron_condor".parse::<StrategyKind>().is_err());
    }

    #[test]
    fn test_id_matches_serde_tag() {
        for kind in StrategyKind::ALL {
            let json = serde_json::to_value(kind).unwrap();
            assert_eq!(json, serde_json::Value::String(kind.id().to_string()));
            let params = serde_json::to_value(kind.example_parameters()).unwrap();
            assert_eq!(params["strategy"], kind.id());
        }
    }

    #[test]
    fn test_single_leg_partition() {
        let singles = StrategyKind::ALL.iter().filter(|k| k.is_single_leg()).count();
        assert_eq!(singles, 4);
    }
}
