//! Amount allocation using the Largest Remainder Method.
//!
//! Splitting a bill proportionally gives shares with more precision than the
//! bill currency has minor units. Rounding each share independently can gain
//! or lose a cent; this module rounds so the shares sum exactly to the total.
//!
//! 1. Calculate exact shares
//! 2. Truncate each to the target precision
//! 3. Hand the leftover units to the shares with the largest truncated parts

use rust_decimal::Decimal;
use rust_decimal::prelude::*;

/// Allocation utility for distributing amounts.
pub struct AllocationUtil;

impl AllocationUtil {
    /// Allocate `total` proportionally to `weights`.
    ///
    /// The total is first rounded to `decimal_places` with banker's rounding;
    /// the returned shares sum to exactly that value. Ties in the leftover
    /// distribution go to the earlier weight.
    ///
    /// Returns `None` when `weights` is empty, contains a negative weight,
    /// or sums to zero.
    ///
    /// # Example
    ///
    /// ```
    /// use rust_decimal_macros::dec;
    /// use fairshare_core::currency::AllocationUtil;
    ///
    /// // 100 split by 1:2 = [33.33, 66.67]
    /// let shares = AllocationUtil::allocate_by_weights(dec!(100), &[dec!(1), dec!(2)], 2).unwrap();
    /// assert_eq!(shares, vec![dec!(33.33), dec!(66.67)]);
    /// ```
    #[must_use]
    pub fn allocate_by_weights(
        total: Decimal,
        weights: &[Decimal],
        decimal_places: u32,
    ) -> Option<Vec<Decimal>> {
        if weights.is_empty() || weights.iter().any(Decimal::is_sign_negative) {
            return None;
        }
        let weight_sum = weights
            .iter()
            .try_fold(Decimal::ZERO, |acc, w| acc.checked_add(*w))?;
        if weight_sum.is_zero() {
            return None;
        }

        let unit = Decimal::new(1, decimal_places);
        let total_rounded =
            total.round_dp_with_strategy(decimal_places, RoundingStrategy::MidpointNearestEven);

        // Multiply by the proportion (<= 1) so large totals cannot overflow
        let exact: Vec<Decimal> = weights
            .iter()
            .map(|w| total_rounded * (*w / weight_sum))
            .collect();

        let mut rounded: Vec<Decimal> = exact
            .iter()
            .map(|a| a.round_dp_with_strategy(decimal_places, RoundingStrategy::ToZero))
            .collect();

        let sum_rounded: Decimal = rounded.iter().copied().sum();
        let remainder = total_rounded - sum_rounded;
        let units_to_distribute = (remainder / unit)
            .round_dp_with_strategy(0, RoundingStrategy::ToZero)
            .to_usize()
            .unwrap_or(0);

        if units_to_distribute > 0 {
            let mut remainders: Vec<(usize, Decimal)> = exact
                .iter()
                .zip(rounded.iter())
                .enumerate()
                .map(|(i, (e, r))| (i, *e - *r))
                .collect();

            // Stable sort keeps earlier weights first on ties
            remainders.sort_by(|a, b| b.1.cmp(&a.1));

            for (idx, _) in remainders.iter().take(units_to_distribute) {
                rounded[*idx] += unit;
            }
        }

        Some(rounded)
    }
}
