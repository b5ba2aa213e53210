use anchor_lang::prelude::*;
use solana_program::pubkey;

pub const ANCHOR_DISCRIMINATOR: usize = 8;
pub const PUBKEY_SIZE: usize = 32;
pub const U8_SIZE: usize = 1;
pub const U64_SIZE: usize = 8;
pub const I64_SIZE: usize = 8;

pub const VAULT_SEED: &[u8] = b"vault";

/// Clock sysvar layout: slot, epoch_start_timestamp, epoch, leader_schedule_epoch, unix_timestamp
pub const SYSVAR_PROGRAM_ID: Pubkey = pubkey!("Sysvar1111111111111111111111111111111111111");
pub const CLOCK_SYSVAR_ID: Pubkey = pubkey!("SysvarC1ock11111111111111111111111111111111");
pub const CLOCK_SLOT_OFFSET: usize = 0;
pub const CLOCK_UNIX_TIMESTAMP_OFFSET: usize = U64_SIZE + I64_SIZE + U64_SIZE + U64_SIZE;
pub const CLOCK_SYSVAR_SIZE: usize = CLOCK_UNIX_TIMESTAMP_OFFSET + I64_SIZE;

// USDC has 6 decimals, cents are 2
pub const BASE_UNITS_PER_CENT: u64 = 10_000;

pub const DEFAULT_RPC_URL: &str = "https://api.mainnet-beta.solana.com";
pub const DEFAULT_LISTEN_ADDR: &str = "0.0.0.0:8080";
pub const DEFAULT_RPC_TIMEOUT_SECONDS: u64 = 10;
pub const DEFAULT_COMMITMENT: &str = "confirmed";
