use crate::config::{ReaderError, ANCHOR_DISCRIMINATOR, PUBKEY_SIZE, U64_SIZE, U8_SIZE};
use anchor_lang::prelude::*;

/// Read-only mirror of the vault account written by the Quartz program
#[account]
#[derive(Debug, PartialEq, Eq)]
pub struct Vault {
    pub owner: Pubkey,
    pub bump: u8,

    pub spend_limit_per_transaction: u64,
    pub spend_limit_per_timeframe: u64,
    pub remaining_spend_limit_per_timeframe: u64,

    // The next timestamp the remaining_spend_limit_per_timeframe will be reset at
    pub next_timeframe_reset_timestamp: u64,

    // How much the program extends next_timeframe_reset_timestamp by when it's reached
    pub timeframe_in_seconds: u64,
}

impl Space for Vault {
    const INIT_SPACE: usize = ANCHOR_DISCRIMINATOR
        + PUBKEY_SIZE
        + U8_SIZE
        + U64_SIZE
        + U64_SIZE
        + U64_SIZE
        + U64_SIZE
        + U64_SIZE;
}

impl Vault {
    /// Decodes raw account data fetched for `address`, checking the owning program and discriminator
    pub fn from_account_data(
        address: &Pubkey,
        account_owner: &Pubkey,
        program_id: &Pubkey,
        data: &[u8],
    ) -> std::result::Result<Self, ReaderError> {
        if account_owner != program_id {
            return Err(ReaderError::invalid_account_data(
                address,
                format!("owned by {}, expected {}", account_owner, program_id),
            ));
        }

        if data.len() < Self::INIT_SPACE {
            return Err(ReaderError::invalid_account_data(
                address,
                format!("{} bytes, expected {}", data.len(), Self::INIT_SPACE),
            ));
        }

        Self::try_deserialize(&mut &data[..])
            .map_err(|e| ReaderError::invalid_account_data(address, e.to_string()))
    }
}
