//! Goal progress calculation.

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

/// Progress of a goal towards its target.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoalProgress {
    /// Share of the target already saved, clamped to `[0, 1]`.
    pub fraction: Decimal,
    /// `fraction` as a whole-number percentage for display.
    pub percent: u32,
    pub is_achieved: bool,
}

impl GoalProgress {
    /// Derives progress from the saved and target amounts.
    ///
    /// A target of zero (or below) yields zero progress instead of dividing.
    pub fn calculate(current_amount: Decimal, target_amount: Decimal) -> Self {
        let fraction = if target_amount <= Decimal::ZERO {
            Decimal::ZERO
        } else {
            current_amount
                .checked_div(target_amount)
                .unwrap_or(Decimal::ONE)
                .clamp(Decimal::ZERO, Decimal::ONE)
        };
        let percent = (fraction * Decimal::ONE_HUNDRED)
            .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
            .to_u32()
            .unwrap_or(0);

        Self {
            fraction,
            percent,
            is_achieved: current_amount >= target_amount,
        }
    }
}
