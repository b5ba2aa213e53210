//! Spend allowance derived from a vault's quota fields at a given tick.
//!
//! Mirrors how the Quartz program processes a spend, without mutating anything:
//! once the reset tick has passed the stored remaining allowance is stale and
//! the full per-timeframe limit applies, and the per-transaction limit always
//! caps the result.

use crate::{check, config::QuotaError, state::SpendQuotaRecord};

/// Allowance left in the active window, before the per-transaction cap
pub fn effective_timeframe_allowance(record: &SpendQuotaRecord, current_tick: u64) -> u64 {
    if !record.is_timeframe_enabled() {
        return 0;
    }

    if record.is_window_elapsed(current_tick) {
        record.spend_limit_per_timeframe
    } else {
        record.remaining_spend_limit_per_timeframe
    }
}

/// Maximum amount, in base units, that can be spent in a single transaction at `current_tick`
pub fn remaining_allowance(record: &SpendQuotaRecord, current_tick: u64) -> u64 {
    effective_timeframe_allowance(record, current_tick).min(record.spend_limit_per_transaction)
}

/// The reset tick the program would store on its next spend.
///
/// An elapsed window is advanced by whole timeframes until it lies after `current_tick`.
/// Returns `None` when the timeframe is disabled or the new tick would overflow.
pub fn next_reset_tick(record: &SpendQuotaRecord, current_tick: u64) -> Option<u64> {
    if !record.is_timeframe_enabled() {
        return None;
    }

    if !record.is_window_elapsed(current_tick) {
        return Some(record.next_timeframe_reset_tick);
    }

    let overflow = current_tick - record.next_timeframe_reset_tick;
    let overflow_in_timeframes = overflow / record.timeframe_length_ticks;
    let ticks_to_add = overflow_in_timeframes
        .checked_add(1)?
        .checked_mul(record.timeframe_length_ticks)?;

    record.next_timeframe_reset_tick.checked_add(ticks_to_add)
}

/// Checks a prospective spend against both limits, in the order the program rejects them
pub fn validate_spend(
    record: &SpendQuotaRecord,
    current_tick: u64,
    amount_base_units: u64,
) -> Result<(), QuotaError> {
    check!(
        record.spend_limit_per_transaction >= amount_base_units,
        QuotaError::InsufficientTransactionSpendLimit
    );

    check!(
        record.is_timeframe_enabled(),
        QuotaError::InsufficientTimeframeSpendLimit
    );

    check!(
        effective_timeframe_allowance(record, current_tick) >= amount_base_units,
        QuotaError::InsufficientTimeframeSpendLimit
    );

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scenario_record() -> SpendQuotaRecord {
        SpendQuotaRecord {
            timeframe_length_ticks: 86_400,
            spend_limit_per_transaction: 500_000,
            spend_limit_per_timeframe: 2_000_000,
            remaining_spend_limit_per_timeframe: 300_000,
            next_timeframe_reset_tick: 1_000,
        }
    }

    #[test]
    fn test_active_window_uses_remaining() {
        assert_eq!(remaining_allowance(&scenario_record(), 500), 300_000);
    }

    #[test]
    fn test_elapsed_window_uses_full_limit_capped_by_transaction() {
        assert_eq!(remaining_allowance(&scenario_record(), 1_500), 500_000);
    }

    #[test]
    fn test_reset_tick_itself_counts_as_elapsed() {
        let record = scenario_record();
        assert_eq!(remaining_allowance(&record, 999), 300_000);
        assert_eq!(remaining_allowance(&record, 1_000), 500_000);
    }

    #[test]
    fn test_disabled_timeframe_allows_nothing() {
        let record = SpendQuotaRecord {
            timeframe_length_ticks: 0,
            ..scenario_record()
        };

        for tick in [0, 500, 1_000, 1_500, u64::MAX] {
            assert_eq!(remaining_allowance(&record, tick), 0);
            assert_eq!(effective_timeframe_allowance(&record, tick), 0);
        }
    }

    #[test]
    fn test_all_zero_record() {
        let record = SpendQuotaRecord::default();
        assert_eq!(remaining_allowance(&record, 0), 0);
        assert_eq!(next_reset_tick(&record, 0), None);
    }

    #[test]
    fn test_transaction_limit_caps_within_active_window() {
        let record = SpendQuotaRecord {
            remaining_spend_limit_per_timeframe: 1_800_000,
            ..scenario_record()
        };
        assert_eq!(remaining_allowance(&record, 500), 500_000);
    }

    #[test]
    fn test_elapsed_window_ignores_stale_remaining() {
        let record = SpendQuotaRecord {
            spend_limit_per_transaction: 5_000_000,
            remaining_spend_limit_per_timeframe: 0,
            ..scenario_record()
        };
        assert_eq!(remaining_allowance(&record, 500), 0);
        assert_eq!(remaining_allowance(&record, 2_000), 2_000_000);
    }

    #[test]
    fn test_transaction_limit_is_monotonic_then_plateaus() {
        let base = scenario_record();
        for tick in [500, 1_500] {
            let timeframe_allowance = effective_timeframe_allowance(&base, tick);
            let mut previous = 0;

            for limit in (0..=3_000_000).step_by(50_000) {
                let record = SpendQuotaRecord {
                    spend_limit_per_transaction: limit,
                    ..base
                };
                let allowance = remaining_allowance(&record, tick);

                assert!(allowance >= previous);
                if limit >= timeframe_allowance {
                    assert_eq!(allowance, timeframe_allowance);
                } else {
                    assert_eq!(allowance, limit);
                }
                previous = allowance;
            }
        }
    }

    #[test]
    fn test_remaining_allowance_is_idempotent() {
        let record = scenario_record();
        assert_eq!(remaining_allowance(&record, 500), remaining_allowance(&record, 500));
    }

    #[test]
    fn test_next_reset_tick_active_window() {
        assert_eq!(next_reset_tick(&scenario_record(), 500), Some(1_000));
    }

    #[test]
    fn test_next_reset_tick_rolls_forward_whole_timeframes() {
        let record = SpendQuotaRecord {
            timeframe_length_ticks: 100,
            next_timeframe_reset_tick: 1_000,
            ..scenario_record()
        };

        assert_eq!(next_reset_tick(&record, 1_000), Some(1_100));
        assert_eq!(next_reset_tick(&record, 1_099), Some(1_100));
        assert_eq!(next_reset_tick(&record, 1_100), Some(1_200));
        assert_eq!(next_reset_tick(&record, 1_350), Some(1_400));
    }

    #[test]
    fn test_next_reset_tick_is_after_current_tick() {
        let record = scenario_record();
        for tick in [1_000, 50_000, 86_401, 1_000_000] {
            let next = next_reset_tick(&record, tick).unwrap();
            assert!(next > tick);
            assert_eq!((next - record.next_timeframe_reset_tick) % record.timeframe_length_ticks, 0);
        }
    }

    #[test]
    fn test_next_reset_tick_overflow() {
        let record = SpendQuotaRecord {
            timeframe_length_ticks: u64::MAX / 2,
            next_timeframe_reset_tick: u64::MAX / 2,
            ..scenario_record()
        };
        assert_eq!(next_reset_tick(&record, u64::MAX), None);
    }

    #[test]
    fn test_next_reset_tick_overflow_on_timeframe_count() {
        let record = SpendQuotaRecord {
            timeframe_length_ticks: 1,
            next_timeframe_reset_tick: 0,
            ..scenario_record()
        };
        assert_eq!(next_reset_tick(&record, u64::MAX), None);
        assert_eq!(remaining_allowance(&record, u64::MAX), 500_000);
    }

    #[test]
    fn test_validate_spend_accepts_up_to_allowance() {
        let record = scenario_record();
        for tick in [500, 1_500] {
            let allowance = remaining_allowance(&record, tick);
            assert_eq!(validate_spend(&record, tick, allowance), Ok(()));
            assert_eq!(validate_spend(&record, tick, 0), Ok(()));
            assert!(validate_spend(&record, tick, allowance + 1).is_err());
        }
    }

    #[test]
    fn test_validate_spend_rejection_order() {
        let record = scenario_record();

        assert_eq!(
            validate_spend(&record, 500, 600_000),
            Err(QuotaError::InsufficientTransactionSpendLimit)
        );
        assert_eq!(
            validate_spend(&record, 500, 400_000),
            Err(QuotaError::InsufficientTimeframeSpendLimit)
        );

        let disabled = SpendQuotaRecord {
            timeframe_length_ticks: 0,
            ..record
        };
        assert_eq!(
            validate_spend(&disabled, 1_500, 1),
            Err(QuotaError::InsufficientTimeframeSpendLimit)
        );
    }
}
