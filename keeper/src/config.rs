//! Keeper configuration

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// RPC URL for Solana cluster
    pub rpc_url: String,

    /// Vault program ID
    #[serde(with = "pubkey_string")]
    pub vault_program: Pubkey,

    /// Vault account to monitor
    #[serde(with = "pubkey_string")]
    pub vault_account: Pubkey,

    /// Keeper wallet keypair path
    pub keypair_path: String,

    /// Polling interval in seconds
    pub poll_interval_secs: u64,

    /// Blocks without a report before a strategy is flagged stale
    pub stale_report_slots: u64,

    /// Drop revoked strategies from the withdrawal queue (keeper must be governance)
    pub auto_remove_revoked: bool,

    /// Maximum transactions submitted per poll
    pub max_actions_per_poll: usize,
}

impl Config {
    /// Load configuration from TOML file
    pub fn load() -> Result<Self> {
        let config_path = std::env::var("KEEPER_CONFIG")
            .unwrap_or_else(|_| "keeper-config.toml".to_string());

        let config_str = std::fs::read_to_string(&config_path)
            .context(format!("Failed to read config file: {}", config_path))?;

        Self::from_toml(&config_str)
    }

    /// Parse configuration from a TOML string
    pub fn from_toml(config_str: &str) -> Result<Self> {
        toml::from_str(config_str).context("Failed to parse config TOML")
    }

    /// Reject configurations the keeper cannot monitor
    pub fn validate(&self) -> Result<()> {
        if self.vault_account == Pubkey::default() {
            bail!("vault_account is not set; add it to the config file");
        }
        if self.vault_account == self.vault_program {
            bail!("vault_account must be the vault PDA, not the program id");
        }
        Ok(())
    }

    /// Create default configuration
    ///
    /// The vault account defaults to the all-zero key, which `validate`
    /// rejects; set it in the config file.
    pub fn default_devnet() -> Self {
        Self {
            rpc_url: "https://api.devnet.solana.com".to_string(),
            vault_program: Pubkey::new_from_array(strata_vault::ID),
            vault_account: Pubkey::default(),
            keypair_path: "~/.config/solana/id.json".to_string(),
            poll_interval_secs: 10,
            stale_report_slots: 216_000, // ~1 day of slots
            auto_remove_revoked: false,
            max_actions_per_poll: 5,
        }
    }

    /// Write default config to file
    #[allow(dead_code)]
    pub fn write_default(path: &str) -> Result<()> {
        let config = Self::default_devnet();
        let toml_str = toml::to_string_pretty(&config)
            .context("Failed to serialize config")?;

        std::fs::write(path, toml_str)
            .context(format!("Failed to write config to {}", path))?;

        log::info!("Created default config at {}", path);
        Ok(())
    }
}

/// Pubkeys are stored as base58 strings in the config file
mod pubkey_string {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};
    use solana_sdk::pubkey::Pubkey;
    use std::str::FromStr;

    pub fn serialize<S: Serializer>(key: &Pubkey, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&key.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Pubkey, D::Error> {
        let s = String::deserialize(deserializer)?;
        Pubkey::from_str(&s).map_err(D::Error::custom)
    }
}
