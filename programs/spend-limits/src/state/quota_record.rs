use serde::{Deserialize, Serialize};

use crate::state::Vault;

/// Snapshot of the quota fields of a vault, in the chain's tick unit and USDC base units
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendQuotaRecord {
    /// Length of the reset window; 0 disables spending under the timeframe check
    pub timeframe_length_ticks: u64,
    pub spend_limit_per_transaction: u64,
    pub spend_limit_per_timeframe: u64,
    /// Allowance left in the current window, stale once next_timeframe_reset_tick passes
    pub remaining_spend_limit_per_timeframe: u64,
    pub next_timeframe_reset_tick: u64,
}

impl SpendQuotaRecord {
    pub fn is_timeframe_enabled(&self) -> bool {
        self.timeframe_length_ticks > 0
    }

    pub fn is_window_elapsed(&self, current_tick: u64) -> bool {
        current_tick >= self.next_timeframe_reset_tick
    }

    /// Whether the stored remaining allowance fits within the timeframe limit while the window is live
    pub fn is_consistent_at(&self, current_tick: u64) -> bool {
        self.is_window_elapsed(current_tick)
            || self.remaining_spend_limit_per_timeframe <= self.spend_limit_per_timeframe
    }
}

impl From<&Vault> for SpendQuotaRecord {
    fn from(vault: &Vault) -> Self {
        Self {
            timeframe_length_ticks: vault.timeframe_in_seconds,
            spend_limit_per_transaction: vault.spend_limit_per_transaction,
            spend_limit_per_timeframe: vault.spend_limit_per_timeframe,
            remaining_spend_limit_per_timeframe: vault.remaining_spend_limit_per_timeframe,
            next_timeframe_reset_tick: vault.next_timeframe_reset_timestamp,
        }
    }
}
