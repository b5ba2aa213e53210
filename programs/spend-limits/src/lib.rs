#![cfg_attr(not(test), deny(clippy::unwrap_used))]
#![deny(unused_must_use)]

//! Off-chain readout of the spend limits stored on a Quartz vault.
//!
//! The vault account is owned and mutated by the on-chain program; this crate
//! only takes read-only snapshots of it, together with the chain clock, and
//! derives how much the vault owner may currently spend.

use anchor_lang::prelude::*;

pub mod config;
pub mod quota;
pub mod reader;
pub mod server;
pub mod state;
pub mod utils;

pub use config::{QuotaError, ReaderConfig, ReaderError, Result, TickUnit};
pub use quota::{effective_timeframe_allowance, next_reset_tick, remaining_allowance, validate_spend};
pub use reader::{ChainClock, LedgerSource, RpcLedgerSource, SpendLimitReader, SpendLimitReadout};
pub use state::{SpendQuotaRecord, Vault};

declare_id!("6JjHXLheGSNvvexgzMthEcgjkcirDrGduc3HAKB2P1v2");
