mod rpc;
pub use rpc::*;

mod source;
pub use source::*;

use std::sync::Arc;

use anchor_lang::prelude::Pubkey;
use serde::Serialize;
use tracing::{debug, warn};

use crate::{
    config::{ReaderError, Result, TickUnit},
    quota::{next_reset_tick, remaining_allowance},
    state::SpendQuotaRecord,
    utils::get_vault_public_key,
};

/// Spend limits of one vault as seen at `current_tick`
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SpendLimitReadout {
    #[serde(serialize_with = "serialize_pubkey")]
    pub owner: Pubkey,
    #[serde(serialize_with = "serialize_pubkey")]
    pub vault: Pubkey,
    pub remaining_allowance: u64,
    pub spend_limit_per_transaction: u64,
    pub spend_limit_per_timeframe: u64,
    pub timeframe_length: u64,
    pub tick_unit: TickUnit,
    pub current_tick: u64,
    pub next_timeframe_reset: Option<u64>,
}

fn serialize_pubkey<S: serde::Serializer>(
    pubkey: &Pubkey,
    serializer: S,
) -> std::result::Result<S::Ok, S::Error> {
    serializer.collect_str(pubkey)
}

/// Joins the vault and clock reads for an owner and derives the spendable amount
pub struct SpendLimitReader {
    source: Arc<dyn LedgerSource>,
    program_id: Pubkey,
    tick_unit: TickUnit,
}

impl SpendLimitReader {
    pub fn new(source: Arc<dyn LedgerSource>, program_id: Pubkey, tick_unit: TickUnit) -> Self {
        Self {
            source,
            program_id,
            tick_unit,
        }
    }

    pub fn tick_unit(&self) -> TickUnit {
        self.tick_unit
    }

    pub async fn read(&self, owner: &Pubkey) -> Result<SpendLimitReadout> {
        let vault_address = get_vault_public_key(owner, &self.program_id);

        let (vault, clock) = tokio::try_join!(
            self.source.fetch_vault(&vault_address, &self.program_id),
            self.source.fetch_clock()
        )?;
        let vault = vault.ok_or(ReaderError::VaultNotFound(vault_address))?;

        if vault.owner != *owner {
            return Err(ReaderError::invalid_account_data(
                &vault_address,
                format!("vault owner {} does not match {}", vault.owner, owner),
            ));
        }

        let current_tick = clock.tick(self.tick_unit)?;
        let record = SpendQuotaRecord::from(&vault);

        if !record.is_consistent_at(current_tick) {
            warn!(
                vault = %vault_address,
                remaining = record.remaining_spend_limit_per_timeframe,
                limit = record.spend_limit_per_timeframe,
                "Remaining timeframe spend limit exceeds the timeframe limit"
            );
        }

        let readout = SpendLimitReadout {
            owner: *owner,
            vault: vault_address,
            remaining_allowance: remaining_allowance(&record, current_tick),
            spend_limit_per_transaction: record.spend_limit_per_transaction,
            spend_limit_per_timeframe: record.spend_limit_per_timeframe,
            timeframe_length: record.timeframe_length_ticks,
            tick_unit: self.tick_unit,
            current_tick,
            next_timeframe_reset: next_reset_tick(&record, current_tick),
        };

        debug!(
            %owner,
            remaining_allowance = readout.remaining_allowance,
            current_tick,
            "Read spend limits"
        );

        Ok(readout)
    }
}
