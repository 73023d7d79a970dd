//! Reward accrual math.
//!
//! Rewards accrue linearly over the lock period toward a fixed yield:
//! `floor(amount * rate_bps * min(elapsed, duration) / duration / 10_000)`.
//! All arithmetic widens to u128 and is overflow-checked.

use crate::error::StakeErrorCode;
use anchor_lang::prelude::*;

pub const BPS_DENOMINATOR: u64 = 10_000;

/// Reward owed on `amount` after `elapsed_secs` of a `duration_secs` lock,
/// at `rate_bps` yield over the full period. Zero for non-positive elapsed
/// time; capped at the full-term yield once the lock has expired.
pub fn accrued(
    amount: u64,
    elapsed_secs: i64,
    duration_secs: i64,
    rate_bps: u64,
) -> Result<u64> {
    if elapsed_secs <= 0 || duration_secs <= 0 {
        return Ok(0);
    }
    let capped = elapsed_secs.min(duration_secs) as u128;

    let reward = (amount as u128)
        .checked_mul(rate_bps as u128)
        .ok_or(StakeErrorCode::ArithmeticOverflow)?
        .checked_mul(capped)
        .ok_or(StakeErrorCode::ArithmeticOverflow)?
        .checked_div(duration_secs as u128)
        .ok_or(StakeErrorCode::ArithmeticOverflow)?
        .checked_div(BPS_DENOMINATOR as u128)
        .ok_or(StakeErrorCode::ArithmeticOverflow)?;

    u64::try_from(reward).map_err(|_| error!(StakeErrorCode::ArithmeticOverflow))
}

#[cfg(test)]
mod tests {
    use super::*;

    const DAY: i64 = 86_400;

    #[test]
    fn zero_elapsed_accrues_nothing() {
        assert_eq!(accrued(1_000_000, 0, DAY, 1_000).unwrap(), 0);
        assert_eq!(accrued(1_000_000, -5, DAY, 1_000).unwrap(), 0);
    }

    #[test]
    fn zero_duration_accrues_nothing() {
        assert_eq!(accrued(1_000_000, DAY, 0, 1_000).unwrap(), 0);
    }

    #[test]
    fn full_term_pays_exact_yield() {
        // 10% over the lock period
        assert_eq!(accrued(1_000_000, DAY, DAY, 1_000).unwrap(), 100_000);
        // 300%
        assert_eq!(accrued(100_000_000, DAY, DAY, 30_000).unwrap(), 300_000_000);
    }

    #[test]
    fn partial_term_is_linear() {
        let full = accrued(1_000_000, DAY, DAY, 1_000).unwrap();
        let half = accrued(1_000_000, DAY / 2, DAY, 1_000).unwrap();
        assert_eq!(half, full / 2);
    }

    #[test]
    fn monotonic_in_elapsed_and_amount() {
        let mut prev = 0;
        for elapsed in [1, DAY / 4, DAY / 2, DAY, 2 * DAY] {
            let r = accrued(1_000_000, elapsed, DAY, 1_000).unwrap();
            assert!(r >= prev);
            prev = r;
        }
        assert!(
            accrued(2_000_000, DAY / 3, DAY, 1_000).unwrap()
                >= accrued(1_000_000, DAY / 3, DAY, 1_000).unwrap()
        );
    }

    #[test]
    fn capped_at_duration() {
        let full = accrued(1_000_000, DAY, DAY, 1_000).unwrap();
        assert_eq!(accrued(1_000_000, 10 * DAY, DAY, 1_000).unwrap(), full);
    }

    #[test]
    fn rounds_down() {
        // 1 unit at 1 bps over a day: 1 * 1 / 10_000 = 0
        assert_eq!(accrued(1, DAY, DAY, 1).unwrap(), 0);
        // 3 units at 50% yields floor(1.5) = 1
        assert_eq!(accrued(3, DAY, DAY, 5_000).unwrap(), 1);
    }

    #[test]
    fn result_wider_than_u64_fails() {
        let err = accrued(u64::MAX, DAY, DAY, 20_000).unwrap_err();
        assert_eq!(err, StakeErrorCode::ArithmeticOverflow.into());
    }
}
