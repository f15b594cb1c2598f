//! # Close Vault Instruction (pooled mode)
//!
//! Once a pooled vault is finalized the issuer collects the whole custody
//! balance and the record is destroyed.
//!
//! ```text
//! Vault Authority PDA ── reserve + total_amount ──> Issuer Wallet
//! PaymentVault PDA ───── rent (account closed) ───> Issuer Wallet
//! ```
//!
//! The custody PDA is drained to zero, which removes it from the ledger as
//! well. The custody PDA signs the transfer with its seeds:
//!
//! ```text
//! ["vault-authority", issuer, payment_id_le, authority_bump]
//! ```

use anchor_lang::prelude::*;

use crate::errors::VaultError;
use crate::events::VaultClosedEvent;
use crate::state::{PaymentVault, VaultMode};
use crate::utils::transfer_from_custody;

/// # close_vault
///
/// ## Returns
///
/// * `Err(VaultError::Unauthorized)` - signer is not the issuer
/// * `Err(VaultError::WrongVaultMode)` - tracked vaults close with `close_payment_vault`
/// * `Err(VaultError::VaultIsNotFinalized)` - target not reached yet
pub fn close_vault(ctx: Context<CloseVault>, payment_id: u32) -> Result<()> {
    // ===================================
    // STEP 1: Validate
    // ===================================

    let vault = &ctx.accounts.vault;
    vault.require_mode(VaultMode::Pooled)?;
    vault.ensure_finalized()?;

    let custody_lamports = ctx.accounts.vault_authority.lamports();
    vault.verify_custody(custody_lamports)?;

    // ===================================
    // STEP 2: Drain Custody to the Issuer
    // ===================================

    let issuer_key = ctx.accounts.issuer.key();
    let payment_id_bytes = payment_id.to_le_bytes();
    let seeds = &[
        PaymentVault::AUTHORITY_SEED_PREFIX,
        issuer_key.as_ref(),
        &payment_id_bytes,
        &[vault.authority_bump],
    ];
    let signer_seeds = &[&seeds[..]];

    transfer_from_custody(
        &ctx.accounts.system_program,
        ctx.accounts.vault_authority.to_account_info(),
        ctx.accounts.issuer.to_account_info(),
        custody_lamports,
        signer_seeds,
    )?;

    // The record itself is closed by the `close = issuer` constraint.
    emit!(VaultClosedEvent {
        issuer: issuer_key,
        vault: ctx.accounts.vault.key(),
        payment_id,
        mode: VaultMode::Pooled,
        released_amount: custody_lamports,
        was_finalized: true,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!(
        "Vault {} closed. Transferred {} lamports to issuer {}",
        payment_id,
        custody_lamports,
        issuer_key
    );

    Ok(())
}

#[derive(Accounts)]
#[instruction(payment_id: u32)]
pub struct CloseVault<'info> {
    /// The issuer. Receives the custody balance and the record's rent.
    #[account(mut)]
    pub issuer: Signer<'info>,

    #[account(
        mut,
        close = issuer,
        seeds = [
            PaymentVault::SEED_PREFIX,
            vault.issuer.as_ref(),
            &payment_id.to_le_bytes(),
        ],
        bump = vault.bump,
        has_one = issuer @ VaultError::Unauthorized,
    )]
    pub vault: Account<'info, PaymentVault>,

    #[account(
        mut,
        address = vault.authority @ VaultError::AddressMismatch,
    )]
    pub vault_authority: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}
