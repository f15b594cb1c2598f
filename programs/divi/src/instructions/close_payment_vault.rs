//! # Close Payment Vault Instruction (tracked mode)
//!
//! Destroys a tracked vault record. Allowed once no participation record is
//! left, whichever way they went:
//!
//! - open or cancelled vault: every participant was refunded
//! - finalized vault: every participant was settled to the issuer
//!
//! The shared custody PDA of a tracked vault only ever holds its reserve
//! (contributions live in the participant sub-accounts); it goes back to the
//! issuer together with the record's rent.

use anchor_lang::prelude::*;

use crate::errors::VaultError;
use crate::events::VaultClosedEvent;
use crate::state::{PaymentVault, VaultMode};
use crate::utils::{ensure_no_live_participations, transfer_from_custody};

/// # close_payment_vault
///
/// ## Remaining Accounts
///
/// Participation records of this vault (read-only). Unrelated accounts are
/// ignored.
///
/// ## Returns
///
/// * `Err(VaultError::Unauthorized)` - signer is not the issuer
/// * `Err(VaultError::WrongVaultMode)` - pooled vaults close with `close_vault`
/// * `Err(VaultError::NotAllParticipantsRefunded)` - a participation record is still alive
pub fn close_payment_vault(ctx: Context<ClosePaymentVault>, payment_id: u32) -> Result<()> {
    // ===================================
    // STEP 1: Validate
    // ===================================

    let issuer_key = ctx.accounts.issuer.key();

    let vault = &ctx.accounts.vault;
    vault.require_mode(VaultMode::Tracked)?;

    ensure_no_live_participations(ctx.remaining_accounts, &issuer_key, payment_id)?;
    vault.ensure_no_outstanding()?;

    let custody_lamports = ctx.accounts.vault_authority.lamports();
    vault.verify_custody(custody_lamports)?;

    // ===================================
    // STEP 2: Return the Custody Reserve
    // ===================================

    let was_finalized = vault.is_finalized;
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
        mode: VaultMode::Tracked,
        released_amount: custody_lamports,
        was_finalized,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Payment vault {} closed successfully", payment_id);

    Ok(())
}

#[derive(Accounts)]
#[instruction(payment_id: u32)]
pub struct ClosePaymentVault<'info> {
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
