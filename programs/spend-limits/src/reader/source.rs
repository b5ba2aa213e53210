use anchor_lang::prelude::Pubkey;
use async_trait::async_trait;

use crate::{
    config::{
        ReaderError, Result, TickUnit, CLOCK_SLOT_OFFSET, CLOCK_SYSVAR_ID, CLOCK_SYSVAR_SIZE,
        CLOCK_UNIX_TIMESTAMP_OFFSET, I64_SIZE, U64_SIZE,
    },
    state::Vault,
};

/// The parts of the chain's Clock sysvar the readout needs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChainClock {
    pub slot: u64,
    pub unix_timestamp: i64,
}

impl ChainClock {
    pub fn from_sysvar_data(data: &[u8]) -> Result<Self> {
        if data.len() < CLOCK_SYSVAR_SIZE {
            return Err(ReaderError::invalid_account_data(
                &CLOCK_SYSVAR_ID,
                format!("{} bytes, expected {}", data.len(), CLOCK_SYSVAR_SIZE),
            ));
        }

        let slot = data[CLOCK_SLOT_OFFSET..CLOCK_SLOT_OFFSET + U64_SIZE]
            .try_into()
            .map_err(|_| ReaderError::invalid_account_data(&CLOCK_SYSVAR_ID, "slot"))?;
        let unix_timestamp = data
            [CLOCK_UNIX_TIMESTAMP_OFFSET..CLOCK_UNIX_TIMESTAMP_OFFSET + I64_SIZE]
            .try_into()
            .map_err(|_| ReaderError::invalid_account_data(&CLOCK_SYSVAR_ID, "unix_timestamp"))?;

        Ok(Self {
            slot: u64::from_le_bytes(slot),
            unix_timestamp: i64::from_le_bytes(unix_timestamp),
        })
    }

    /// The current tick in the unit the vault's reset tick is stored in
    pub fn tick(&self, unit: TickUnit) -> Result<u64> {
        match unit {
            TickUnit::Slots => Ok(self.slot),
            TickUnit::Seconds => u64::try_from(self.unix_timestamp)
                .map_err(|_| ReaderError::InvalidTimestamp(self.unix_timestamp)),
        }
    }
}

/// Read access to the external ledger
#[async_trait]
pub trait LedgerSource: Send + Sync {
    /// Fetches and decodes the vault at `address`, or `None` if no account exists there
    async fn fetch_vault(&self, address: &Pubkey, program_id: &Pubkey) -> Result<Option<Vault>>;

    async fn fetch_clock(&self) -> Result<ChainClock>;
}
