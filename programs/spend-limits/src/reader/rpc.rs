//! Solana JSON-RPC implementation of [`LedgerSource`].

use std::{str::FromStr, time::Duration};

use anchor_lang::prelude::Pubkey;
use async_trait::async_trait;
use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, warn};

use crate::{
    config::{ReaderError, Result, RpcConfig, CLOCK_SYSVAR_ID, SYSVAR_PROGRAM_ID},
    reader::{ChainClock, LedgerSource},
    state::Vault,
};

#[derive(Debug, Serialize)]
struct RpcRequest<'a> {
    jsonrpc: &'static str,
    id: u64,
    method: &'a str,
    params: serde_json::Value,
}

#[derive(Debug, Deserialize)]
struct RpcResponse<T> {
    result: Option<T>,
    error: Option<RpcErrorObject>,
}

#[derive(Debug, Deserialize)]
struct RpcErrorObject {
    code: i64,
    message: String,
}

#[derive(Debug, Deserialize)]
struct RpcContextual<T> {
    value: T,
}

#[derive(Debug, Deserialize)]
struct UiAccount {
    /// `[payload, encoding]`
    data: (String, String),
    owner: String,
}

/// Reads vaults and the clock sysvar through `getAccountInfo`
pub struct RpcLedgerSource {
    client: reqwest::Client,
    url: String,
    commitment: String,
}

impl RpcLedgerSource {
    pub fn new(config: &RpcConfig) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .build()?;

        Ok(Self {
            client,
            url: config.url.clone(),
            commitment: config.commitment.clone(),
        })
    }

    async fn call<T: DeserializeOwned>(&self, method: &str, params: serde_json::Value) -> Result<T> {
        let request = RpcRequest {
            jsonrpc: "2.0",
            id: 1,
            method,
            params,
        };

        let response = self
            .client
            .post(&self.url)
            .json(&request)
            .send()
            .await?
            .error_for_status()?
            .json::<RpcResponse<T>>()
            .await?;

        if let Some(error) = response.error {
            warn!(method, code = error.code, "RPC returned an error: {}", error.message);
            return Err(ReaderError::Rpc {
                code: error.code,
                message: error.message,
            });
        }

        response.result.ok_or_else(|| ReaderError::Rpc {
            code: 0,
            message: format!("{} returned neither result nor error", method),
        })
    }

    /// Returns the account's owning program and raw data, or `None` if it does not exist
    async fn get_account(&self, address: &Pubkey) -> Result<Option<(Pubkey, Vec<u8>)>> {
        let params = json!([
            address.to_string(),
            { "encoding": "base64", "commitment": self.commitment }
        ]);

        let response: RpcContextual<Option<UiAccount>> = self.call("getAccountInfo", params).await?;
        let Some(account) = response.value else {
            return Ok(None);
        };

        let (payload, encoding) = &account.data;
        if encoding != "base64" {
            return Err(ReaderError::invalid_account_data(
                address,
                format!("unexpected encoding '{}'", encoding),
            ));
        }

        let data = STANDARD
            .decode(payload)
            .map_err(|e| ReaderError::invalid_account_data(address, e.to_string()))?;
        let owner = Pubkey::from_str(&account.owner)
            .map_err(|e| ReaderError::invalid_account_data(address, e.to_string()))?;

        Ok(Some((owner, data)))
    }
}

#[async_trait]
impl LedgerSource for RpcLedgerSource {
    async fn fetch_vault(&self, address: &Pubkey, program_id: &Pubkey) -> Result<Option<Vault>> {
        let Some((owner, data)) = self.get_account(address).await? else {
            debug!(%address, "vault account does not exist");
            return Ok(None);
        };

        Vault::from_account_data(address, &owner, program_id, &data).map(Some)
    }

    async fn fetch_clock(&self) -> Result<ChainClock> {
        let (owner, data) = self
            .get_account(&CLOCK_SYSVAR_ID)
            .await?
            .ok_or_else(|| ReaderError::invalid_account_data(&CLOCK_SYSVAR_ID, "missing"))?;

        if owner != SYSVAR_PROGRAM_ID {
            return Err(ReaderError::invalid_account_data(
                &CLOCK_SYSVAR_ID,
                format!("owned by {}, expected {}", owner, SYSVAR_PROGRAM_ID),
            ));
        }

        ChainClock::from_sysvar_data(&data)
    }
}
