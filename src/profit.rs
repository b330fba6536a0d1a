use num_traits::{CheckedAdd, Num};
use serde::de::DeserializeOwned;

use crate::{error::Error, mono_deque::MonoDeque};

/// A daily profit value. Sums that do not fit the type are reported instead of wrapping.
pub trait Profit: Num + Copy + PartialOrd {
    /// Adds `other`, returning `None` if the result cannot be represented.
    fn add_profit(self, other: Self) -> Option<Self>;
}

macro_rules! impl_profit_checked {
    ($($t:ty),*) => {
        $(impl Profit for $t {
            #[inline(always)]
            fn add_profit(self, other: Self) -> Option<Self> {
                CheckedAdd::checked_add(&self, &other)
            }
        })*
    };
}

macro_rules! impl_profit_float {
    ($($t:ty),*) => {
        $(impl Profit for $t {
            #[inline(always)]
            fn add_profit(self, other: Self) -> Option<Self> {
                let sum = self + other;
                // Finite inputs summing to infinity overflowed
                if sum.is_infinite() && self.is_finite() && other.is_finite() {
                    None
                } else {
                    Some(sum)
                }
            }
        })*
    };
}

impl_profit_checked!(i8, i16, i32, i64, i128, isize);
impl_profit_float!(f32, f64);

/// Parses a JSON array of daily profits.
pub fn profits_from_json<N: DeserializeOwned>(json: &str) -> serde_json::Result<Vec<N>> {
    serde_json::from_str(json)
}

/// Computes the best cumulative profit attributable through each day, when consecutive
/// working days may be at most `k` days apart.
///
/// Entry 0 is the empty baseline and entry `d` is the best total for a schedule that starts
/// on day 1 and ends by working day `d`. The returned table always has `profits.len() + 1`
/// entries. Fails with [`Error::Overflow`] if a total does not fit `N`.
pub fn best_profits<N>(profits: &[N], k: usize) -> Result<Vec<N>, Error>
where
    N: Profit,
{
    if k == 0 {
        return Err(Error::InvalidWindow(k));
    }

    let num_days = profits.len();
    let mut best = Vec::with_capacity(num_days + 1);
    best.push(N::zero());

    // Candidate prior working days, best total first
    let mut candidates = MonoDeque::with_capacity(num_days);

    for (day, &profit) in (1..=num_days).zip(profits) {
        candidates.expire(day.saturating_sub(k));

        let best_today = match candidates.front() {
            Some(prior_day) => profit
                .add_profit(best[prior_day])
                .ok_or(Error::Overflow { day })?,
            None => profit,
        };
        best.push(best_today);

        candidates.push_max(day, &best);
    }

    log::debug!(
        "Computed best profits for {} days with a window of {} ({} candidates left)",
        num_days,
        k,
        candidates.len()
    );

    Ok(best)
}

/// Returns the maximum profit over `profits` when at least one day in every `k` consecutive
/// days must be worked. An empty period yields zero.
pub fn max_bounded_profit<N>(profits: &[N], k: usize) -> Result<N, Error>
where
    N: Profit,
{
    let best = best_profits(profits, k)?;
    Ok(best.last().copied().unwrap_or_else(N::zero))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn takes_every_profitable_day() {
        assert_eq!(max_bounded_profit(&[1, 2, 3], 2), Ok(6));
    }

    #[test]
    fn skips_losing_days_within_the_window() {
        // 7 + -1 + 4: day 3 can be skipped but day 2 cannot, since day 4 is 3 days after day 1
        assert_eq!(max_bounded_profit(&[7, -1, -5, 4], 2), Ok(10));
        assert_eq!(max_bounded_profit(&[7, -1, -5, 4], 3), Ok(11));
    }

    #[test]
    fn empty_period_yields_zero() {
        assert_eq!(max_bounded_profit::<i32>(&[], 3), Ok(0));
        assert_eq!(best_profits::<i32>(&[], 3), Ok(vec![0]));
    }

    #[test]
    fn rejects_zero_window() {
        assert_eq!(
            max_bounded_profit(&[1, 2, 3], 0),
            Err(Error::InvalidWindow(0))
        );
        assert_eq!(
            max_bounded_profit::<i64>(&[], 0),
            Err(Error::InvalidWindow(0))
        );
    }

    #[test]
    fn single_day_window_sums_everything() {
        assert_eq!(max_bounded_profit(&[5, -3, -2, 8], 1), Ok(8));
        assert_eq!(max_bounded_profit(&[1.5, -0.5, 2.0], 1), Ok(3.0));
    }

    #[test]
    fn all_losses_stay_negative() {
        assert_eq!(max_bounded_profit(&[-4, -9, -9, -1], 3), Ok(-5));
        assert_eq!(max_bounded_profit(&[-2], 5), Ok(-2));
    }

    #[test]
    fn wide_window_jumps_to_the_last_day() {
        assert_eq!(max_bounded_profit(&[5, -10, -10, 3], 3), Ok(8));
        assert_eq!(max_bounded_profit(&[5, -10, -10, 3], 100), Ok(8));
    }

    #[test]
    fn reports_overflow_instead_of_wrapping() {
        assert_eq!(
            max_bounded_profit(&[i64::MAX, 1], 2),
            Err(Error::Overflow { day: 2 })
        );
        assert_eq!(
            best_profits(&[i8::MIN, 0, -1], 1),
            Err(Error::Overflow { day: 3 })
        );
        assert_eq!(
            max_bounded_profit(&[f64::MAX, f64::MAX], 1),
            Err(Error::Overflow { day: 2 })
        );
        // Totals at the limit are fine as long as every sum fits
        assert_eq!(max_bounded_profit(&[i64::MAX, -1, 0], 2), Ok(i64::MAX));
    }

    #[test]
    fn parses_profits_from_json() {
        assert_eq!(profits_from_json::<i64>("[7, -1, -5, 4]").unwrap(), vec![7, -1, -5, 4]);
        assert_eq!(profits_from_json::<f64>("[1.5]").unwrap(), vec![1.5]);
        assert!(profits_from_json::<i64>("[]").unwrap().is_empty());
        assert!(profits_from_json::<i64>("{\"a\": 1}").is_err());
        assert!(profits_from_json::<i64>("[1.5]").is_err());
    }

    #[test]
    fn table_holds_each_days_best() {
        assert_eq!(
            best_profits(&[7, -1, -5, 4], 2),
            Ok(vec![0, 7, 6, 2, 10])
        );
    }
}

#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    /// Straightforward O(n * k) evaluation of the same recurrence.
    fn quadratic_best_profits(profits: &[i64], k: usize) -> Vec<i64> {
        let mut best = vec![0; profits.len() + 1];
        for day in 1..=profits.len() {
            let prior = (day.saturating_sub(k).max(1)..day).map(|d| best[d]).max();
            best[day] = profits[day - 1] + prior.unwrap_or(0);
        }
        best
    }

    /// Best total over every schedule that works day 1 and the last day, with no two
    /// consecutive working days more than `k` apart.
    fn exhaustive_max_profit(profits: &[i64], k: usize) -> i64 {
        let n = profits.len();
        (0u32..1 << n)
            .filter(|mask| mask & 1 == 1 && mask >> (n - 1) & 1 == 1)
            .filter(|mask| {
                let days: Vec<usize> = (0..n).filter(|d| mask >> d & 1 == 1).collect();
                days.windows(2).all(|pair| pair[1] - pair[0] <= k)
            })
            .map(|mask| (0..n).filter(|d| mask >> d & 1 == 1).map(|d| profits[d]).sum::<i64>())
            .max()
            .unwrap()
    }

    proptest! {
        #[test]
        fn prop_matches_quadratic_recurrence(
            profits in prop::collection::vec(-1000i64..1000, 0..300),
            k in 1usize..50
        ) {
            prop_assert_eq!(best_profits(&profits, k).unwrap(), quadratic_best_profits(&profits, k));
        }

        #[test]
        fn prop_matches_exhaustive_schedules(
            profits in prop::collection::vec(-100i64..100, 1..12),
            k in 1usize..6
        ) {
            prop_assert_eq!(max_bounded_profit(&profits, k).unwrap(), exhaustive_max_profit(&profits, k));
        }
    }
}
