use anchor_lang::prelude::Pubkey;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ReaderError>;

/// Failures while fetching and decoding the inputs of a spend limit readout
#[derive(Error, Debug)]
pub enum ReaderError {
    #[error("Invalid owner address: {0}")]
    InvalidAddress(String),

    #[error("No vault found at {0}")]
    VaultNotFound(Pubkey),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    #[error("Invalid account data for {address}: {reason}")]
    InvalidAccountData { address: Pubkey, reason: String },

    #[error("Current timestamp cannot be negative: {0}")]
    InvalidTimestamp(i64),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl ReaderError {
    pub fn invalid_account_data(address: &Pubkey, reason: impl Into<String>) -> Self {
        Self::InvalidAccountData {
            address: *address,
            reason: reason.into(),
        }
    }

    /// Whether the error was caused by the caller's input rather than an upstream failure
    pub fn is_client_error(&self) -> bool {
        matches!(self, Self::InvalidAddress(_) | Self::VaultNotFound(_))
    }
}

/// Reasons the vault would reject a spend of a given amount
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuotaError {
    #[error("Insufficient spend limit remaining for the timeframe")]
    InsufficientTimeframeSpendLimit,
    #[error("Transaction is larger than the transaction spend limit")]
    InsufficientTransactionSpendLimit,
}
