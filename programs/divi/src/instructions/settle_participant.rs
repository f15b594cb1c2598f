//! # Settle Participant Instruction (tracked mode)
//!
//! How the issuer collects a finalized tracked vault. Contributions sit in
//! per-participant custody sub-accounts, so they are collected one record at
//! a time:
//!
//! ```text
//! Participant Vault Authority ── amount ───> Issuer Wallet
//! Participant Vault Authority ── reserve ──> Participant Wallet
//! ParticipantVault PDA ───────── rent ─────> Participant Wallet (closed)
//!
//! PaymentVault.settled_amount += amount
//! ```
//!
//! Once every record is settled or refunded, nothing is outstanding and the
//! issuer can close the vault with `close_payment_vault`.

use anchor_lang::prelude::*;

use crate::errors::VaultError;
use crate::events::ParticipantSettledEvent;
use crate::state::{ParticipantVault, PaymentVault, VaultMode};
use crate::utils::transfer_from_custody;

/// # settle_participant
///
/// ## Returns
///
/// * `Err(VaultError::Unauthorized)` - signer is not the issuer
/// * `Err(VaultError::WrongVaultMode)` - pooled vaults close with `close_vault`
/// * `Err(VaultError::VaultIsNotFinalized)` - open vaults refund instead
/// * `Err(VaultError::ParticipantMismatch)` - record belongs to someone else
pub fn settle_participant(ctx: Context<SettleParticipant>, payment_id: u32) -> Result<()> {
    // ===================================
    // STEP 1: Validate
    // ===================================

    let vault = &ctx.accounts.vault;
    vault.require_mode(VaultMode::Tracked)?;
    vault.ensure_finalized()?;

    let record = &ctx.accounts.participant_vault;
    let amount = record.amount;
    let custody_lamports = ctx.accounts.participant_vault_authority.lamports();
    record.verify_custody(custody_lamports)?;

    // verify_custody guarantees custody_lamports >= amount
    let leftover = custody_lamports - amount;

    // ===================================
    // STEP 2: Split the Sub-Account
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
        ctx.accounts.issuer.to_account_info(),
        amount,
        signer_seeds,
    )?;

    transfer_from_custody(
        &ctx.accounts.system_program,
        ctx.accounts.participant_vault_authority.to_account_info(),
        ctx.accounts.participant.to_account_info(),
        leftover,
        signer_seeds,
    )?;

    // ===================================
    // STEP 3: Update the Vault Books
    // ===================================

    let vault_key = ctx.accounts.vault.key();
    let vault = &mut ctx.accounts.vault;
    vault.record_settlement(amount)?;

    emit!(ParticipantSettledEvent {
        issuer: issuer_key,
        vault: vault_key,
        participant: participant_key,
        payment_id,
        amount,
        outstanding_amount: vault.outstanding_amount(),
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!(
        "Settled {} lamports from participant {} to issuer. Outstanding: {}",
        amount,
        participant_key,
        vault.outstanding_amount()
    );

    Ok(())
}

#[derive(Accounts)]
#[instruction(payment_id: u32)]
pub struct SettleParticipant<'info> {
    /// The issuer. Receives the contribution.
    #[account(mut)]
    pub issuer: Signer<'info>,

    /// The participant. Gets the custody reserve and the record's rent back.
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
