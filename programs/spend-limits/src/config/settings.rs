use std::{fmt, path::Path, str::FromStr};

use anchor_lang::prelude::Pubkey;
use serde::{Deserialize, Serialize};

use crate::{
    check,
    config::{
        ReaderError, Result, DEFAULT_COMMITMENT, DEFAULT_LISTEN_ADDR, DEFAULT_RPC_TIMEOUT_SECONDS,
        DEFAULT_RPC_URL,
    },
};

pub const ENV_RPC_URL: &str = "SPEND_LIMITS_RPC_URL";
pub const ENV_LISTEN_ADDR: &str = "SPEND_LIMITS_LISTEN_ADDR";
pub const ENV_TICK_UNIT: &str = "SPEND_LIMITS_TICK_UNIT";

/// Which field of the chain clock the vault's reset tick is denominated in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TickUnit {
    #[default]
    Seconds,
    Slots,
}

impl fmt::Display for TickUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TickUnit::Seconds => write!(f, "seconds"),
            TickUnit::Slots => write!(f, "slots"),
        }
    }
}

impl FromStr for TickUnit {
    type Err = ReaderError;

    fn from_str(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "seconds" => Ok(TickUnit::Seconds),
            "slots" => Ok(TickUnit::Slots),
            other => Err(ReaderError::Config(format!("Unknown tick unit '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ReaderConfig {
    pub server: ServerConfig,
    pub rpc: RpcConfig,
    #[serde(default)]
    pub tick_unit: TickUnit,
    /// Overrides the Quartz program id, e.g. for a devnet deployment
    #[serde(default)]
    pub program_id: Option<String>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    pub listen_addr: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RpcConfig {
    pub url: String,
    #[serde(default = "default_timeout")]
    pub timeout_seconds: u64,
    #[serde(default = "default_commitment")]
    pub commitment: String,
}

fn default_timeout() -> u64 {
    DEFAULT_RPC_TIMEOUT_SECONDS
}

fn default_commitment() -> String {
    DEFAULT_COMMITMENT.to_string()
}

impl ReaderConfig {
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ReaderError::Config(format!("Failed to read config file: {}", e)))?;

        Self::from_toml(&content)
    }

    pub fn from_toml(content: &str) -> Result<Self> {
        toml::from_str(content)
            .map_err(|e| ReaderError::Config(format!("Failed to parse config: {}", e)))
    }

    pub fn development() -> Self {
        Self {
            server: ServerConfig {
                listen_addr: DEFAULT_LISTEN_ADDR.to_string(),
            },
            rpc: RpcConfig {
                url: DEFAULT_RPC_URL.to_string(),
                timeout_seconds: DEFAULT_RPC_TIMEOUT_SECONDS,
                commitment: DEFAULT_COMMITMENT.to_string(),
            },
            tick_unit: TickUnit::default(),
            program_id: None,
        }
    }

    /// Applies `SPEND_LIMITS_*` environment overrides on top of the loaded values
    pub fn apply_env_overrides(&mut self) -> Result<()> {
        self.apply_overrides(|key| std::env::var(key).ok())
    }

    fn apply_overrides<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(ENV_RPC_URL) {
            self.rpc.url = url;
        }
        if let Some(listen_addr) = lookup(ENV_LISTEN_ADDR) {
            self.server.listen_addr = listen_addr;
        }
        if let Some(tick_unit) = lookup(ENV_TICK_UNIT) {
            self.tick_unit = tick_unit.parse()?;
        }
        Ok(())
    }

    pub fn program_id(&self) -> Result<Pubkey> {
        match &self.program_id {
            Some(program_id) => Pubkey::from_str(program_id).map_err(|e| {
                ReaderError::Config(format!("Invalid program id '{}': {}", program_id, e))
            }),
            None => Ok(crate::ID),
        }
    }

    pub fn validate(&self) -> Result<()> {
        url::Url::parse(&self.rpc.url).map_err(|e| {
            ReaderError::Config(format!("Invalid RPC URL '{}': {}", self.rpc.url, e))
        })?;

        self.server
            .listen_addr
            .parse::<std::net::SocketAddr>()
            .map_err(|e| {
                ReaderError::Config(format!(
                    "Invalid listen address '{}': {}",
                    self.server.listen_addr, e
                ))
            })?;

        check!(
            self.rpc.timeout_seconds > 0,
            ReaderError::Config("RPC timeout must be greater than zero".to_string())
        );

        check!(
            matches!(
                self.rpc.commitment.as_str(),
                "processed" | "confirmed" | "finalized"
            ),
            ReaderError::Config(format!("Unknown commitment '{}'", self.rpc.commitment))
        );

        self.program_id()?;

        Ok(())
    }
}

impl Default for ReaderConfig {
    fn default() -> Self {
        Self::development()
    }
}
