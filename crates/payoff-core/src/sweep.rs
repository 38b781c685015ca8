use std::collections::BTreeSet;

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::PayoffError;
use crate::types::Price;
use crate::PayoffResult;

/// Hard ceiling on the number of points a single sweep may hold.
pub const MAX_SWEEP_POINTS: usize = 100_000;

// ---------------------------------------------------------------------------
// Range
// ---------------------------------------------------------------------------

/// Bounds and step of a hypothetical expiration price grid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SweepRange {
    pub start_price: Price,
    pub end_price: Price,
    pub step_size: Price,
}

impl SweepRange {
    pub fn new(start_price: Price, end_price: Price, step_size: Price) -> Self {
        SweepRange {
            start_price,
            end_price,
            step_size,
        }
    }

    fn check(&self) -> PayoffResult<()> {
        if self.step_size <= Decimal::ZERO {
            return Err(self.invalid("Step size must be positive"));
        }
        if self.start_price >= self.end_price {
            return Err(self.invalid("Start price must be less than end price"));
        }
        Ok(())
    }

    fn invalid(&self, reason: &str) -> PayoffError {
        PayoffError::InvalidRange {
            start: self.start_price,
            end: self.end_price,
            step: self.step_size,
            reason: reason.into(),
        }
    }

    /// Number of whole steps that fit between start and end.
    fn whole_steps(&self) -> PayoffResult<u64> {
        ((self.end_price - self.start_price) / self.step_size)
            .floor()
            .to_u64()
            .ok_or_else(|| self.invalid("Sweep is too large to enumerate"))
    }

    /// Number of points `generate` would produce.
    pub fn point_count(&self) -> PayoffResult<usize> {
        self.check()?;
        let steps = self.whole_steps()?;
        let last = self.start_price + self.step_size * Decimal::from(steps);
        let extra = if last < self.end_price { 2 } else { 1 };
        usize::try_from(steps)
            .ok()
            .and_then(|s| s.checked_add(extra))
            .ok_or_else(|| self.invalid("Sweep is too large to enumerate"))
    }

    /// The final price of the sweep when it lands past `end_price`, i.e. when
    /// the range is not an exact multiple of the step.
    pub fn overshoot(&self) -> PayoffResult<Option<Price>> {
        self.check()?;
        let steps = self.whole_steps()?;
        let last = self.start_price + self.step_size * Decimal::from(steps);
        if last < self.end_price {
            Ok(Some(last + self.step_size))
        } else {
            Ok(None)
        }
    }

    pub fn generate(&self) -> PayoffResult<PriceSweep> {
        PriceSweep::generate(self.start_price, self.end_price, self.step_size)
    }
}

// ---------------------------------------------------------------------------
// Sweep
// ---------------------------------------------------------------------------

/// Strictly increasing closed-interval price grid.
///
/// Every `start + i·step` strictly below `end + step` is included, so the
/// final point is `end` itself or the first step past it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PriceSweep {
    range: SweepRange,
    prices: Vec<Price>,
}

impl PriceSweep {
    pub fn generate(start: Price, end: Price, step: Price) -> PayoffResult<Self> {
        let range = SweepRange::new(start, end, step);
        let count = range.point_count()?;
        if count > MAX_SWEEP_POINTS {
            return Err(range.invalid(&format!(
                "Sweep would contain {} points (limit {})",
                count, MAX_SWEEP_POINTS
            )));
        }

        let prices: Vec<Price> = (0..count)
            .map(|i| start + step * Decimal::from(i as u64))
            .collect();

        debug!(
            target: "payoff.sweep",
            start = %start,
            end = %end,
            step = %step,
            points = prices.len(),
            "generated price sweep"
        );

        Ok(PriceSweep { range, prices })
    }

    pub fn range(&self) -> &SweepRange {
        &self.range
    }

    pub fn prices(&self) -> &[Price] {
        &self.prices
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &Price> {
        self.prices.iter()
    }

    /// Sweep unioned with `extra`, deduplicated and sorted ascending.
    pub fn with_additional_points(&self, extra: &[Price]) -> Vec<Price> {
        if extra.is_empty() {
            return self.prices.clone();
        }
        let merged: BTreeSet<Price> = self.prices.iter().chain(extra).copied().collect();
        merged.into_iter().collect()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
