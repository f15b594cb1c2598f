//! # Cancel Payment Instruction (tracked mode)
//!
//! Marks an open tracked vault as cancelled so that nobody can participate
//! any more. Refunds come first: the instruction is rejected while any
//! participation record of the vault is still alive.
//!
//! ## Ordering:
//!
//! ```text
//! participate × N ──> refund_participant × N ──> cancel_payment ──> close_payment_vault
//!                              ▲                        │
//!                              └── NotAllParticipantsRefunded if skipped
//! ```
//!
//! The caller passes every participation record it knows of as remaining
//! accounts. Independently of that list, the vault's own books must show
//! no outstanding contributions.

use anchor_lang::prelude::*;

use crate::errors::VaultError;
use crate::events::VaultCancelledEvent;
use crate::state::{PaymentVault, VaultMode};
use crate::utils::ensure_no_live_participations;

/// # cancel_payment
///
/// ## Remaining Accounts
///
/// Participation records of this vault (read-only). Unrelated accounts are
/// ignored.
///
/// ## Returns
///
/// * `Err(VaultError::Unauthorized)` - signer is not the issuer
/// * `Err(VaultError::WrongVaultMode)` - pooled vaults cannot be cancelled
/// * `Err(VaultError::NotAllParticipantsRefunded)` - a participant still has funds in
/// * `Err(VaultError::VaultIsAlreadyFinalized)` - target already reached
/// * `Err(VaultError::VaultIsCancelled)` - already cancelled
pub fn cancel_payment(ctx: Context<CancelPayment>, payment_id: u32) -> Result<()> {
    let issuer_key = ctx.accounts.issuer.key();

    ctx.accounts.vault.require_mode(VaultMode::Tracked)?;

    ensure_no_live_participations(ctx.remaining_accounts, &issuer_key, payment_id)?;

    // Outstanding value first, then the vault's own state
    let vault_key = ctx.accounts.vault.key();
    ctx.accounts.vault.cancel()?;

    emit!(VaultCancelledEvent {
        issuer: issuer_key,
        vault: vault_key,
        payment_id,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Payment {} cancelled by issuer", payment_id);

    Ok(())
}

#[derive(Accounts)]
#[instruction(payment_id: u32)]
pub struct CancelPayment<'info> {
    pub issuer: Signer<'info>,

    #[account(
        mut,
        seeds = [
            PaymentVault::SEED_PREFIX,
            vault.issuer.as_ref(),
            &payment_id.to_le_bytes(),
        ],
        bump = vault.bump,
        has_one = issuer @ VaultError::Unauthorized,
    )]
    pub vault: Account<'info, PaymentVault>,
}
