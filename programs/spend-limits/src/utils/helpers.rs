use std::str::FromStr;

use anchor_lang::prelude::*;

use crate::config::{ReaderError, BASE_UNITS_PER_CENT};

/// Parses a caller-supplied base58 wallet address
pub fn parse_owner_address(address: &str) -> std::result::Result<Pubkey, ReaderError> {
    let trimmed = address.trim();
    check!(
        !trimmed.is_empty(),
        ReaderError::InvalidAddress("address is empty".to_string())
    );

    Pubkey::from_str(trimmed).map_err(|e| ReaderError::InvalidAddress(format!("{}: {}", trimmed, e)))
}

/// Converts USDC base units to whole cents, rounding down
pub fn base_units_to_cents(amount_base_units: u64) -> u64 {
    amount_base_units / BASE_UNITS_PER_CENT
}
