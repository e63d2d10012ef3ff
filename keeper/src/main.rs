//! Strata Vault Keeper
//!
//! Off-chain service that polls a vault account, flags strategies whose
//! reports have gone stale or whose debt is out of line with the pool, and
//! (when it holds the governance key) drops drained revoked strategies from
//! the withdrawal queue.

mod config;
mod error;
mod monitor;
mod priority_queue;
mod tx_builder;

use anyhow::{Context, Result};
use config::Config;
use monitor::{assess, decode_vault, render_id};
use priority_queue::HarvestQueue;
use solana_client::nonblocking::rpc_client::RpcClient;
use solana_sdk::{
    commitment_config::CommitmentConfig,
    pubkey::Pubkey,
    signature::{Keypair, Signer},
};
use std::time::Duration;
use tokio::time;

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    log::info!("Starting Strata Vault Keeper");

    // Load configuration
    let config = Config::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({:#}), using default devnet config", e);
        Config::default_devnet()
    });
    config.validate().context("Invalid keeper configuration")?;

    log::info!("Connected to RPC: {}", config.rpc_url);
    log::info!("Monitoring vault {} (program {})", config.vault_account, config.vault_program);

    let client = RpcClient::new_with_commitment(config.rpc_url.clone(), CommitmentConfig::confirmed());

    // Load keeper wallet
    let keeper = load_keypair(&config.keypair_path)?;
    log::info!("Keeper wallet: {}", keeper.pubkey());

    let mut queue = HarvestQueue::new();

    let mut interval = time::interval(Duration::from_secs(config.poll_interval_secs.max(1)));

    loop {
        interval.tick().await;

        if let Err(e) = poll(&mut queue, &client, &config, &keeper).await {
            log::error!("Error polling vault: {:#}", e);
        }

        if let Some(most_stale) = queue.peek() {
            log::debug!(
                "Tracking {} strategies; most stale {} ({} slots)",
                queue.len(),
                most_stale.strategy,
                most_stale.blocks_since_report
            );
        }
    }
}

/// One poll: read the vault, refresh the queue, alert and act
async fn poll(
    queue: &mut HarvestQueue,
    client: &RpcClient,
    config: &Config,
    keeper: &Keypair,
) -> Result<()> {
    let data = client
        .get_account_data(&config.vault_account)
        .await
        .context("Failed to fetch vault account")?;
    let slot = client.get_slot().await.context("Failed to fetch slot")?;

    let snapshot = decode_vault(&data).context("Failed to decode vault account")?;
    let state = &snapshot.state;
    queue.refresh(assess(&snapshot, slot));

    log::debug!(
        "Slot {}: {} strategies, queue length {}, idle {}, governance {}",
        slot,
        state.registry.len(),
        state.queue.len(),
        snapshot.total_idle,
        render_id(&state.governance)
    );

    for stale in queue.get_stale(config.stale_report_slots) {
        log::warn!(
            "Strategy {} has not reported for {} slots (expected return {})",
            stale.strategy,
            stale.blocks_since_report,
            stale.expected_return
        );
    }

    for health in queue.get_harvestable() {
        log::info!(
            "Strategy {} can draw {} on its next harvest",
            health.strategy,
            health.credit_available
        );
    }
    for health in queue.get_indebted() {
        log::warn!(
            "Strategy {} owes {} back to the vault",
            health.strategy,
            health.debt_outstanding
        );
    }

    if !config.auto_remove_revoked {
        return Ok(());
    }

    let revoked = queue.get_evictable();
    if revoked.is_empty() {
        return Ok(());
    }

    if keeper.pubkey().to_bytes() != state.governance {
        log::warn!(
            "{} drained revoked strategies still queued, but keeper is not governance",
            revoked.len()
        );
        return Ok(());
    }

    for health in revoked.iter().take(config.max_actions_per_poll) {
        match remove_from_queue(client, config, keeper, &health.strategy).await {
            Ok(signature) => {
                log::info!("Removed revoked strategy {} from queue: {}", health.strategy, signature);
                queue.remove(&health.strategy);
            }
            Err(e) => {
                log::error!("Failed to remove strategy {}: {:#}", health.strategy, e);
            }
        }
    }

    Ok(())
}

/// Submit a single remove_from_queue transaction
async fn remove_from_queue(
    client: &RpcClient,
    config: &Config,
    keeper: &Keypair,
    strategy: &Pubkey,
) -> Result<String> {
    let blockhash = client
        .get_latest_blockhash()
        .await
        .context("Failed to fetch blockhash")?;

    let tx = tx_builder::build_remove_from_queue_transaction(
        &config.vault_program,
        &config.vault_account,
        keeper,
        strategy,
        blockhash,
    );

    let signature = client
        .send_and_confirm_transaction(&tx)
        .await
        .context("Transaction failed")?;

    Ok(signature.to_string())
}

/// Load keeper keypair from file
fn load_keypair(path: &str) -> Result<Keypair> {
    let expanded_path = shellexpand::tilde(path);
    let bytes = std::fs::read(expanded_path.as_ref())
        .context(format!("Failed to read keypair from {}", path))?;

    let keypair = if bytes.first() == Some(&b'[') {
        // JSON format
        let json_data: Vec<u8> = serde_json::from_slice(&bytes)
            .context("Failed to parse keypair JSON")?;
        Keypair::try_from(&json_data[..])
            .context("Failed to create keypair from bytes")?
    } else {
        // Binary format
        Keypair::try_from(&bytes[..])
            .context("Failed to create keypair from bytes")?
    };

    Ok(keypair)
}
