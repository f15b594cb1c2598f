//! # Refund Participant Instruction (tracked mode)
//!
//! The issuer gives one participant their contribution back. This works on
//! an open vault and on a finalized one that has not settled this record.
//! The custody sub-account is drained to the participant and the
//! participation record is closed, so a second refund finds nothing.
//!
//! ```text
//! BEFORE:                                  AFTER:
//!
//! Participant Vault Authority              Participant Vault Authority
//! └── lamports: reserve + 4                └── (drained)
//!
//! ParticipantVault { amount: 4 }           (closed, rent → participant)
//!
//! PaymentVault.received_amount: 4         PaymentVault.received_amount: 0
//!
//! Participant Wallet                       Participant Wallet: +4 + reserve + rent
//! ```
//!
//! On an open vault the refunded amount is offered to contributors again.
//! After finalization it is booked in `refunded_amount` instead.

use anchor_lang::prelude::*;

use crate::errors::VaultError;
use crate::events::ParticipantRefundedEvent;
use crate::state::{ParticipantVault, PaymentVault, VaultMode};
use crate::utils::transfer_from_custody;

/// # refund_participant
///
/// ## Returns
///
/// * `Err(VaultError::Unauthorized)` - signer is not the issuer
/// * `Err(VaultError::WrongVaultMode)` - pooled vaults keep no participation records
/// * `Err(VaultError::ParticipantMismatch)` - record belongs to someone else
/// * Anchor error - the record does not exist (already refunded)
pub fn refund_participant(ctx: Context<RefundParticipant>, payment_id: u32) -> Result<()> {
    // ===================================
    // STEP 1: Validate
    // ===================================

    let vault = &ctx.accounts.vault;
    vault.require_mode(VaultMode::Tracked)?;

    let record = &ctx.accounts.participant_vault;
    let amount = record.amount;
    let custody_lamports = ctx.accounts.participant_vault_authority.lamports();
    record.verify_custody(custody_lamports)?;

    // ===================================
    // STEP 2: Drain the Sub-Account to the Participant
    // ===================================

    let issuer_key = vault.issuer;
    let participant_key = ctx.accounts.participant.key();
    let payment_id_bytes = payment_id.to_le_bytes();
    let seeds = &[
        ParticipantVault::AUTHORITY_SEED_PREFIX,
        issuer_key.as_ref(),
        participant_key.as_ref(),
        &payment_id_bytes,
        &[record.authority_bump],
    ];
    let signer_seeds = &[&seeds[..]];

    transfer_from_custody(
        &ctx.accounts.system_program,
        ctx.accounts.participant_vault_authority.to_account_info(),
        ctx.accounts.participant.to_account_info(),
        custody_lamports,
        signer_seeds,
    )?;

    // ===================================
    // STEP 3: Update the Vault Books
    // ===================================

    // The record is closed by the `close = participant` constraint.
    let vault_key = ctx.accounts.vault.key();
    let vault = &mut ctx.accounts.vault;
    vault.record_refund(amount)?;

    emit!(ParticipantRefundedEvent {
        issuer: issuer_key,
        vault: vault_key,
        participant: participant_key,
        payment_id,
        amount,
        outstanding_amount: vault.outstanding_amount(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!(
        "Refunded {} lamports to participant {}",
        amount,
        participant_key
    );

    Ok(())
}

#[derive(Accounts)]
#[instruction(payment_id: u32)]
pub struct RefundParticipant<'info> {
    #[account(mut)]
    pub issuer: Signer<'info>,

    /// The participant being refunded. Receives the contribution, the
    /// custody reserve and the record's rent.
    #[account(mut)]
    pub participant: SystemAccount<'info>,

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

    #[account(
        mut,
        close = participant,
        seeds = [
            ParticipantVault::SEED_PREFIX,
            vault.issuer.as_ref(),
            participant.key().as_ref(),
            &payment_id.to_le_bytes(),
        ],
        bump = participant_vault.bump,
        constraint = participant_vault.participant == participant.key() @ VaultError::ParticipantMismatch,
        constraint = participant_vault.belongs_to(&vault.issuer, payment_id) @ VaultError::ParticipantMismatch,
    )]
    pub participant_vault: Account<'info, ParticipantVault>,

    #[account(
        mut,
        address = participant_vault.authority @ VaultError::AddressMismatch,
    )]
    pub participant_vault_authority: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}
