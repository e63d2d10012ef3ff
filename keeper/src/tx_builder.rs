//! Transaction builder for vault maintenance

use solana_sdk::{
    hash::Hash,
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    transaction::Transaction,
};
use strata_common::VaultInstruction;

/// Build remove_from_queue instruction
///
/// Accounts: `[writable]` vault, `[signer]` governance.
pub fn build_remove_from_queue_instruction(
    vault_program: &Pubkey,
    vault: &Pubkey,
    governance: &Pubkey,
    strategy: &Pubkey,
) -> Instruction {
    let mut data = Vec::with_capacity(1 + 32);
    data.push(VaultInstruction::RemoveFromQueue as u8);
    data.extend_from_slice(strategy.as_ref());

    Instruction {
        program_id: *vault_program,
        accounts: vec![
            AccountMeta::new(*vault, false),
            AccountMeta::new_readonly(*governance, true),
        ],
        data,
    }
}

/// Build transaction removing a strategy from the withdrawal queue
pub fn build_remove_from_queue_transaction(
    vault_program: &Pubkey,
    vault: &Pubkey,
    governance: &Keypair,
    strategy: &Pubkey,
    recent_blockhash: Hash,
) -> Transaction {
    let instruction = build_remove_from_queue_instruction(
        vault_program,
        vault,
        &governance.pubkey(),
        strategy,
    );

    Transaction::new_signed_with_payer(
        &[instruction],
        Some(&governance.pubkey()),
        &[governance],
        recent_blockhash,
    )
}
