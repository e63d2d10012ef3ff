//! Vault program entrypoint

use pinocchio::{
    account_info::AccountInfo,
    msg,
    pubkey::Pubkey,
    sysvars::{clock::Clock, Sysvar},
    ProgramResult,
};

use crate::instructions::{
    process_add_strategy, process_initialize, process_migrate_strategy,
    process_remove_from_queue, process_report, process_revoke_strategy,
    process_harvest, process_set_idle_assets, process_set_withdrawal_queue,
    process_update_strategy, VaultInstruction,
};
use crate::pda::derive_vault_pda;
use crate::state::VaultAccount;
use model_safety::{StrategyConfig, MAX_QUEUE_SLOTS, NULL_ID};
use strata_common::{
    borrow_account_data_mut, validate_owner, validate_signer, validate_writable,
    InstructionReader, StrataError,
};

#[cfg(feature = "bpf-entrypoint")]
pinocchio::entrypoint!(process_instruction);

pub fn process_instruction(
    program_id: &Pubkey,
    accounts: &[AccountInfo],
    instruction_data: &[u8],
) -> ProgramResult {
    let (discriminator, data) = match instruction_data.split_first() {
        Some(parts) => parts,
        None => {
            msg!("Error: Instruction data is empty");
            return Err(StrataError::InvalidInstruction.into());
        }
    };

    let instruction = VaultInstruction::try_from(*discriminator).map_err(|e| {
        msg!("Error: Unknown instruction");
        e
    })?;

    match instruction {
        VaultInstruction::Initialize => {
            msg!("Instruction: Initialize");
            process_initialize_inner(program_id, accounts, data)
        }
        VaultInstruction::AddStrategy => {
            msg!("Instruction: AddStrategy");
            process_add_strategy_inner(program_id, accounts, data)
        }
        VaultInstruction::UpdateStrategy => {
            msg!("Instruction: UpdateStrategy");
            process_update_strategy_inner(program_id, accounts, data)
        }
        VaultInstruction::RevokeStrategy => {
            msg!("Instruction: RevokeStrategy");
            process_revoke_strategy_inner(program_id, accounts, data)
        }
        VaultInstruction::MigrateStrategy => {
            msg!("Instruction: MigrateStrategy");
            process_migrate_strategy_inner(program_id, accounts, data)
        }
        VaultInstruction::RemoveFromQueue => {
            msg!("Instruction: RemoveFromQueue");
            process_remove_from_queue_inner(program_id, accounts, data)
        }
        VaultInstruction::SetWithdrawalQueue => {
            msg!("Instruction: SetWithdrawalQueue");
            process_set_withdrawal_queue_inner(program_id, accounts, data)
        }
        VaultInstruction::Report => {
            msg!("Instruction: Report");
            process_report_inner(program_id, accounts, data)
        }
        VaultInstruction::Harvest => {
            msg!("Instruction: Harvest");
            process_harvest_inner(program_id, accounts, data)
        }
        VaultInstruction::SetIdleAssets => {
            msg!("Instruction: SetIdleAssets");
            process_set_idle_assets_inner(program_id, accounts, data)
        }
    }
}

// Instruction processors with account validation

/// Split out the `[w] vault, [s] caller` pair every instruction takes
fn vault_and_caller<'a>(
    accounts: &'a [AccountInfo],
) -> Result<(&'a AccountInfo, &'a AccountInfo), StrataError> {
    match accounts {
        [vault, caller, ..] => Ok((vault, caller)),
        _ => {
            msg!("Error: Instruction requires vault and signer accounts");
            Err(StrataError::InvalidInstruction)
        }
    }
}

/// Validate and borrow an initialized-size vault account
fn load_vault<'a>(
    program_id: &Pubkey,
    vault_account: &'a AccountInfo,
) -> Result<&'a mut VaultAccount, StrataError> {
    validate_owner(vault_account, program_id)?;
    validate_writable(vault_account)?;

    if vault_account.data_len() != VaultAccount::LEN {
        msg!("Error: Vault account has incorrect size");
        return Err(StrataError::InvalidAccount);
    }

    unsafe { borrow_account_data_mut::<VaultAccount>(vault_account) }
}

fn current_block() -> Result<u64, pinocchio::program_error::ProgramError> {
    Ok(Clock::get()?.slot)
}

fn read_strategy_config(reader: &mut InstructionReader) -> Result<StrategyConfig, StrataError> {
    let debt_ratio = reader.read_u64()?;
    let rate_limit = reader.read_u128()?;
    let performance_fee = reader.read_u64()?;
    Ok(StrategyConfig::new(debt_ratio, rate_limit, performance_fee))
}

/// Process initialize instruction
///
/// Expected accounts:
/// 0. `[writable]` Vault account (PDA)
/// 1. `[signer]` Governance authority
///
/// Expected data layout (32 bytes):
/// - governance: Pubkey (32 bytes)
fn process_initialize_inner(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let (vault_account, governance_account) = vault_and_caller(accounts)?;

    let mut reader = InstructionReader::new(data);
    let governance = reader.read_pubkey()?;
    reader.finish()?;

    if governance_account.key() != &governance {
        msg!("Error: Governance account does not match instruction data");
        return Err(StrataError::InvalidAccount.into());
    }
    validate_signer(governance_account)?;

    let (expected_pda, bump) = derive_vault_pda(&governance, program_id);
    if vault_account.key() != &expected_pda {
        msg!("Error: Vault account is not the correct PDA");
        return Err(StrataError::InvalidAccount.into());
    }

    let vault = load_vault(program_id, vault_account)?;
    process_initialize(vault, &governance, bump)?;
    Ok(())
}

/// Process add strategy instruction
///
/// Expected accounts:
/// 0. `[writable]` Vault account
/// 1. `[signer]` Governance authority
///
/// Expected data layout (64 bytes):
/// - strategy: Pubkey (32 bytes)
/// - debt_ratio: u64 (8 bytes)
/// - rate_limit: u128 (16 bytes)
/// - performance_fee: u64 (8 bytes)
fn process_add_strategy_inner(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let (vault_account, caller) = vault_and_caller(accounts)?;
    validate_signer(caller)?;

    let mut reader = InstructionReader::new(data);
    let strategy = reader.read_pubkey()?;
    let config = read_strategy_config(&mut reader)?;
    reader.finish()?;

    let block = current_block()?;
    let vault = load_vault(program_id, vault_account)?;
    process_add_strategy(vault, caller.key(), block, &strategy, config)?;
    Ok(())
}

/// Process update strategy instruction
///
/// Expected accounts:
/// 0. `[writable]` Vault account
/// 1. `[signer]` Governance authority
///
/// Expected data layout: same as AddStrategy (64 bytes)
fn process_update_strategy_inner(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let (vault_account, caller) = vault_and_caller(accounts)?;
    validate_signer(caller)?;

    let mut reader = InstructionReader::new(data);
    let strategy = reader.read_pubkey()?;
    let config = read_strategy_config(&mut reader)?;
    reader.finish()?;

    let vault = load_vault(program_id, vault_account)?;
    process_update_strategy(vault, caller.key(), &strategy, config)?;
    Ok(())
}

/// Process revoke strategy instruction
///
/// Expected accounts:
/// 0. `[writable]` Vault account
/// 1. `[signer]` Governance authority
///
/// Expected data layout (32 bytes):
/// - strategy: Pubkey (32 bytes)
fn process_revoke_strategy_inner(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let (vault_account, caller) = vault_and_caller(accounts)?;
    validate_signer(caller)?;

    let mut reader = InstructionReader::new(data);
    let strategy = reader.read_pubkey()?;
    reader.finish()?;

    let vault = load_vault(program_id, vault_account)?;
    process_revoke_strategy(vault, caller.key(), &strategy)?;
    Ok(())
}

/// Process migrate strategy instruction
///
/// Expected accounts:
/// 0. `[writable]` Vault account
/// 1. `[signer]` Governance authority
///
/// Expected data layout (64 bytes):
/// - old: Pubkey (32 bytes)
/// - new: Pubkey (32 bytes)
fn process_migrate_strategy_inner(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let (vault_account, caller) = vault_and_caller(accounts)?;
    validate_signer(caller)?;

    let mut reader = InstructionReader::new(data);
    let old = reader.read_pubkey()?;
    let new = reader.read_pubkey()?;
    reader.finish()?;

    let vault = load_vault(program_id, vault_account)?;
    process_migrate_strategy(vault, caller.key(), &old, &new)?;
    Ok(())
}

/// Process remove from queue instruction
///
/// Expected accounts:
/// 0. `[writable]` Vault account
/// 1. `[signer]` Governance authority
///
/// Expected data layout (32 bytes):
/// - strategy: Pubkey (32 bytes)
fn process_remove_from_queue_inner(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let (vault_account, caller) = vault_and_caller(accounts)?;
    validate_signer(caller)?;

    let mut reader = InstructionReader::new(data);
    let strategy = reader.read_pubkey()?;
    reader.finish()?;

    let vault = load_vault(program_id, vault_account)?;
    process_remove_from_queue(vault, caller.key(), &strategy)?;
    Ok(())
}

/// Process set withdrawal queue instruction
///
/// Expected accounts:
/// 0. `[writable]` Vault account
/// 1. `[signer]` Governance authority
///
/// Expected data layout (640 bytes):
/// - ordering: [Pubkey; 20], null-padded
fn process_set_withdrawal_queue_inner(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let (vault_account, caller) = vault_and_caller(accounts)?;
    validate_signer(caller)?;

    let mut reader = InstructionReader::new(data);
    let mut ordering = [NULL_ID; MAX_QUEUE_SLOTS];
    for entry in ordering.iter_mut() {
        *entry = reader.read_pubkey()?;
    }
    reader.finish()?;

    let vault = load_vault(program_id, vault_account)?;
    process_set_withdrawal_queue(vault, caller.key(), &ordering)?;
    Ok(())
}

/// Process report instruction
///
/// The signer is both caller and reporting strategy, so an unregistered
/// signer fails with `NotActive` rather than `Unauthorized`.
///
/// Expected accounts:
/// 0. `[writable]` Vault account
/// 1. `[signer]` Strategy
///
/// Expected data layout (16 bytes):
/// - gain: u128 (16 bytes)
fn process_report_inner(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let (vault_account, strategy) = vault_and_caller(accounts)?;
    validate_signer(strategy)?;

    let mut reader = InstructionReader::new(data);
    let gain = reader.read_u128()?;
    reader.finish()?;

    let block = current_block()?;
    let vault = load_vault(program_id, vault_account)?;
    process_report(vault, strategy.key(), block, strategy.key(), gain)?;
    Ok(())
}

/// Process harvest instruction
///
/// As with Report, the signer is the harvesting strategy.
///
/// Expected accounts:
/// 0. `[writable]` Vault account
/// 1. `[signer]` Strategy
///
/// Expected data layout (32 bytes):
/// - gain: u128 (16 bytes)
/// - debt_payment: u128 (16 bytes)
fn process_harvest_inner(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let (vault_account, strategy) = vault_and_caller(accounts)?;
    validate_signer(strategy)?;

    let mut reader = InstructionReader::new(data);
    let gain = reader.read_u128()?;
    let debt_payment = reader.read_u128()?;
    reader.finish()?;

    let block = current_block()?;
    let vault = load_vault(program_id, vault_account)?;
    process_harvest(vault, strategy.key(), block, strategy.key(), gain, debt_payment)?;
    Ok(())
}

/// Process set idle assets instruction
///
/// Expected accounts:
/// 0. `[writable]` Vault account
/// 1. `[signer]` Governance authority
///
/// Expected data layout (16 bytes):
/// - total_idle: u128 (16 bytes)
fn process_set_idle_assets_inner(program_id: &Pubkey, accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    let (vault_account, caller) = vault_and_caller(accounts)?;
    validate_signer(caller)?;

    let mut reader = InstructionReader::new(data);
    let total_idle = reader.read_u128()?;
    reader.finish()?;

    let vault = load_vault(program_id, vault_account)?;
    process_set_idle_assets(vault, caller.key(), total_idle)?;
    Ok(())
}
