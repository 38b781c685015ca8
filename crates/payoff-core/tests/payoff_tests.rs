use payoff_core::strategies::{
    ButterflyInput, SingleLegInput, StraddleInput, StrangleInput, VerticalSpreadInput,
};
use payoff_core::{BreakEven, PayoffTable, Strategy, StrategyKind, StrategyParameters, SweepRange};
use pretty_assertions::assert_eq;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn curve(params: StrategyParameters) -> (PayoffTable, BreakEven) {
    let strategy = Strategy::new(params).unwrap();
    (strategy.compute_payoff_curve(), strategy.compute_break_even())
}

fn payoff_at(table: &PayoffTable, price: Decimal) -> Decimal {
    table
        .row_at(price)
        .unwrap_or_else(|| panic!("no row at {}", price))
        .net_payoff
}

fn single_leg(strike: Decimal, premium: Decimal) -> SingleLegInput {
    SingleLegInput {
        strike_price: strike,
        premium,
        sweep: SweepRange::new(dec!(60), dec!(140), dec!(5)),
    }
}

// ===========================================================================
// Single-leg positions
// ===========================================================================

#[test]
fn test_long_call_worked_example() {
    let (table, be) = curve(StrategyParameters::LongCall(single_leg(dec!(100), dec!(5))));
    assert_eq!(be, BreakEven::Single(dec!(105)));
    assert_eq!(table.len(), 17);
    assert_eq!(table.columns, vec!["Premium", "Call Value"]);
    assert_eq!(payoff_at(&table, dec!(60)), dec!(-5));
    assert_eq!(payoff_at(&table, dec!(105)), Decimal::ZERO);
    assert_eq!(payoff_at(&table, dec!(140)), dec!(35));
}

#[test]
fn test_short_positions_mirror_long_positions() {
    let pairs = [
        (
            StrategyParameters::LongCall(single_leg(dec!(100), dec!(5))),
            StrategyParameters::ShortCall(single_leg(dec!(100), dec!(5))),
        ),
        (
            StrategyParameters::LongPut(single_leg(dec!(97.5), dec!(3.25))),
            StrategyParameters::ShortPut(single_leg(dec!(97.5), dec!(3.25))),
        ),
    ];
    for (long, short) in pairs {
        let (long_table, long_be) = curve(long);
        let (short_table, short_be) = curve(short);
        assert_eq!(long_be, short_be);
        for (l, s) in long_table.rows.iter().zip(&short_table.rows) {
            assert_eq!(l.expiration_price, s.expiration_price);
            assert_eq!(l.net_payoff, -s.net_payoff);
        }
    }
}

#[test]
fn test_long_put_break_even_and_floor() {
    let (table, be) = curve(StrategyParameters::LongPut(single_leg(dec!(100), dec!(5))));
    assert_eq!(be, BreakEven::Single(dec!(95)));
    assert_eq!(payoff_at(&table, dec!(95)), Decimal::ZERO);
    assert_eq!(payoff_at(&table, dec!(60)), dec!(35));
    // Out of the money: lose the premium and nothing more
    assert_eq!(payoff_at(&table, dec!(120)), dec!(-5));
}

// ===========================================================================
// Vertical spreads
// ===========================================================================

fn spread() -> VerticalSpreadInput {
    VerticalSpreadInput {
        strike_price_low: dec!(90),
        strike_price_high: dec!(110),
        premium_low: dec!(5),
        premium_high: dec!(15),
        sweep: SweepRange::new(dec!(80), dec!(120), dec!(5)),
    }
}

#[test]
fn test_bull_call_spread_bounded_payoff() {
    let (table, be) = curve(StrategyParameters::BullCallSpread(spread()));
    assert_eq!(be, BreakEven::Single(dec!(100)));
    assert_eq!(payoff_at(&table, dec!(80)), dec!(-10));
    assert_eq!(payoff_at(&table, dec!(100)), Decimal::ZERO);
    assert_eq!(payoff_at(&table, dec!(120)), dec!(10));
    assert!(table
        .rows
        .iter()
        .all(|r| r.net_payoff >= dec!(-10) && r.net_payoff <= dec!(10)));
    assert!(table.rows.windows(2).all(|w| w[0].net_payoff <= w[1].net_payoff));
}

#[test]
fn test_bear_put_spread_mirrors_bull_shape() {
    let (table, be) = curve(StrategyParameters::BearPutSpread(spread()));
    assert_eq!(be, BreakEven::Single(dec!(100)));
    assert_eq!(payoff_at(&table, dec!(80)), dec!(10));
    assert_eq!(payoff_at(&table, dec!(120)), dec!(-10));
    assert!(table.rows.windows(2).all(|w| w[0].net_payoff >= w[1].net_payoff));
}

// ===========================================================================
// Volatility combinations
// ===========================================================================

fn straddle_input(call: Decimal, put: Decimal) -> StraddleInput {
    StraddleInput {
        strike_price: dec!(100),
        premium_call: call,
        premium_put: put,
        sweep: SweepRange::new(dec!(60), dec!(140), dec!(5)),
    }
}

#[test]
fn test_long_straddle_worked_example() {
    let (table, be) = curve(StrategyParameters::LongStraddle(straddle_input(
        dec!(6),
        dec!(4),
    )));
    assert_eq!(
        be,
        BreakEven::Pair {
            lower: dec!(90),
            upper: dec!(110)
        }
    );
    assert_eq!(payoff_at(&table, dec!(100)), dec!(-10));
    assert_eq!(payoff_at(&table, dec!(70)), dec!(20));
}

#[test]
fn test_strip_and_strap_break_evens() {
    let (_, strip_be) = curve(StrategyParameters::Strip(straddle_input(dec!(8), dec!(6))));
    assert_eq!(
        strip_be,
        BreakEven::Pair {
            lower: dec!(90),
            upper: dec!(120)
        }
    );

    let (table, strap_be) = curve(StrategyParameters::Strap(straddle_input(dec!(11), dec!(8))));
    assert_eq!(
        strap_be,
        BreakEven::Pair {
            lower: dec!(70),
            upper: dec!(115)
        }
    );
    // Two calls at 140: 80 - 30
    assert_eq!(payoff_at(&table, dec!(140)), dec!(50));
}

#[test]
fn test_long_strangle_flat_between_strikes() {
    let (table, be) = curve(StrategyParameters::LongStrangle(StrangleInput {
        strike_price_low: dec!(80),
        strike_price_high: dec!(100),
        premium_call: dec!(4),
        premium_put: dec!(6),
        sweep: SweepRange::new(dec!(60), dec!(120), dec!(5)),
    }));
    assert_eq!(
        be,
        BreakEven::Pair {
            lower: dec!(70),
            upper: dec!(110)
        }
    );
    for p in [dec!(80), dec!(85), dec!(90), dec!(95), dec!(100)] {
        assert_eq!(payoff_at(&table, p), dec!(-10));
    }
}

// ===========================================================================
// Butterfly
// ===========================================================================

#[test]
fn test_butterfly_includes_exact_kinks_off_grid() {
    let (table, be) = curve(StrategyParameters::LongButterfly(ButterflyInput {
        strike_price_low: dec!(120),
        strike_price_middle: dec!(125),
        strike_price_high: dec!(130),
        premium_low: dec!(3),
        premium_middle: dec!(4),
        premium_high: dec!(6),
        sweep: SweepRange::new(dec!(90), dec!(160), dec!(10)),
    }));
    assert_eq!(
        be,
        BreakEven::Pair {
            lower: dec!(121),
            upper: dec!(129)
        }
    );
    // Grid 90..160 by 10 has 8 points; 121, 125 and 129 are all off-grid
    assert_eq!(table.len(), 11);
    assert_eq!(payoff_at(&table, dec!(121)), Decimal::ZERO);
    assert_eq!(payoff_at(&table, dec!(125)), dec!(4));
    assert_eq!(payoff_at(&table, dec!(129)), Decimal::ZERO);
    assert!(table.prices().windows(2).all(|w| w[0] < w[1]));
}

// ===========================================================================
// Cross-strategy properties
// ===========================================================================

#[test]
fn test_every_example_is_zero_at_its_break_evens() {
    for kind in StrategyKind::ALL {
        let strategy = Strategy::new(kind.example_parameters()).unwrap();
        let definition = strategy.definition();
        for be in strategy.compute_break_even().points() {
            let row = payoff_core::PayoffProfile::evaluate(definition, be);
            assert_eq!(row.net_payoff, Decimal::ZERO, "{} at {}", kind, be);
        }
    }
}

#[test]
fn test_sweep_closed_interval_with_overshoot() {
    let sweep = SweepRange::new(dec!(60), dec!(140), dec!(5)).generate().unwrap();
    assert_eq!(sweep.len(), 17);
    assert_eq!(sweep.prices().first(), Some(&dec!(60)));
    assert_eq!(sweep.prices().last(), Some(&dec!(140)));

    let sweep = SweepRange::new(dec!(0), dec!(10), dec!(3)).generate().unwrap();
    assert_eq!(sweep.prices(), &[dec!(0), dec!(3), dec!(6), dec!(9), dec!(12)]);
}

#[test]
fn test_invalid_sweeps_are_rejected() {
    assert!(SweepRange::new(dec!(100), dec!(100), dec!(5)).generate().is_err());
    assert!(SweepRange::new(dec!(60), dec!(140), dec!(0)).generate().is_err());
    assert!(SweepRange::new(dec!(60), dec!(140), dec!(-5)).generate().is_err());
}

#[test]
fn test_payoff_table_serializes_with_tagged_break_even() {
    let (table, be) = curve(StrategyKind::LongStraddle.example_parameters());
    let json = serde_json::to_value(&be).unwrap();
    assert_eq!(json["pair"]["lower"], "90");
    let json = serde_json::to_value(&table).unwrap();
    assert_eq!(json["columns"][0], "Call Premium");
    assert_eq!(json["rows"][0]["expiration_price"], "80");
}
