//! # Participate Instruction (tracked mode)
//!
//! A participant contributes to a tracked vault. Unlike `pay`, the lamports
//! go into a custody sub-account of their own, and a `ParticipantVault`
//! record remembers who put in how much so the issuer can refund it later.
//!
//! ```text
//! Participant Wallet ── amount + reserve ──> Participant Vault Authority PDA
//! Participant Wallet ── rent ──────────────> ParticipantVault PDA (created)
//!
//! PaymentVault.received_amount += amount
//! ```
//!
//! A participant has at most one live record per vault: the `init`
//! constraint fails while a previous record still exists.

use anchor_lang::prelude::*;

use crate::errors::VaultError;
use crate::events::{ParticipationCreatedEvent, VaultFinalizedEvent};
use crate::state::{ParticipantVault, PaymentVault, VaultMode};

/// # participate
///
/// ## Returns
///
/// * `Err(VaultError::WrongVaultMode)` - the vault is a pooled vault
/// * `Err(VaultError::InvalidAmount)` - amount is zero
/// * `Err(VaultError::VaultIsAlreadyFinalized)` - target already reached
/// * `Err(VaultError::VaultIsCancelled)` - the issuer cancelled the payment
/// * `Err(VaultError::AmountIsGreaterThanVaultTotalAmount)` - amount exceeds what is left
/// * `Err(VaultError::AddressMismatch)` - custody sub-account is not the derived PDA
/// * Anchor/System error - this participant already has a live record
pub fn participate(ctx: Context<Participate>, payment_id: u32, amount: u64) -> Result<()> {
    // ===================================
    // STEP 1: Validate
    // ===================================

    let vault = &ctx.accounts.vault;
    vault.require_mode(VaultMode::Tracked)?;
    vault.check_contribution(amount)?;

    let issuer_key = vault.issuer;
    let participant_key = ctx.accounts.participant.key();
    let mut record = ParticipantVault::new(issuer_key, payment_id, participant_key, amount)?;

    let (expected_authority, authority_bump) =
        ParticipantVault::derive_authority(&issuer_key, &participant_key, payment_id);
    require_keys_eq!(
        ctx.accounts.participant_vault_authority.key(),
        expected_authority,
        VaultError::AddressMismatch
    );

    // ===================================
    // STEP 2: Fund the Custody Sub-Account
    // ===================================

    // Contribution plus whatever is missing from the rent-exempt reserve
    let reserve = Rent::get()?.minimum_balance(0);
    let top_up = reserve.saturating_sub(ctx.accounts.participant_vault_authority.lamports());
    let deposit = amount.checked_add(top_up).ok_or(VaultError::Overflow)?;

    anchor_lang::system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            anchor_lang::system_program::Transfer {
                from: ctx.accounts.participant.to_account_info(),
                to: ctx.accounts.participant_vault_authority.to_account_info(),
            },
        ),
        deposit,
    )?;

    // ===================================
    // STEP 3: Write the Participation Record
    // ===================================

    let clock = Clock::get()?;
    let vault_key = ctx.accounts.vault.key();
    let participant_vault_key = ctx.accounts.participant_vault.key();

    record.authority = ctx.accounts.participant_vault_authority.key();
    record.authority_bump = authority_bump;
    record.custody_reserve = reserve;
    record.bump = ctx.bumps.participant_vault;
    record.created_at = clock.unix_timestamp;

    ctx.accounts.participant_vault.set_inner(record);

    // ===================================
    // STEP 4: Update the Vault Books
    // ===================================

    let vault = &mut ctx.accounts.vault;
    let finalized = vault.record_contribution(amount)?;

    emit!(ParticipationCreatedEvent {
        issuer: issuer_key,
        vault: vault_key,
        participant: participant_key,
        participant_vault: participant_vault_key,
        payment_id,
        amount,
        received_amount: vault.received_amount,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "{} contributed {} lamports to vault {}. Received {}/{}",
        participant_key,
        amount,
        payment_id,
        vault.received_amount,
        vault.total_amount
    );

    if finalized {
        emit!(VaultFinalizedEvent {
            issuer: issuer_key,
            vault: vault_key,
            payment_id,
            total_amount: vault.total_amount,
            timestamp: clock.unix_timestamp,
        });

        msg!("Vault {} finalized", payment_id);
    }

    Ok(())
}

#[derive(Accounts)]
#[instruction(payment_id: u32)]
pub struct Participate<'info> {
    /// The contributing participant. Pays the contribution, the custody
    /// reserve and the record's rent.
    #[account(mut)]
    pub participant: Signer<'info>,

    #[account(
        mut,
        seeds = [
            PaymentVault::SEED_PREFIX,
            vault.issuer.as_ref(),
            &payment_id.to_le_bytes(),
        ],
        bump = vault.bump,
    )]
    pub vault: Account<'info, PaymentVault>,

    #[account(
        init,
        payer = participant,
        space = ParticipantVault::LEN,
        seeds = [
            ParticipantVault::SEED_PREFIX,
            vault.issuer.as_ref(),
            participant.key().as_ref(),
            &payment_id.to_le_bytes(),
        ],
        bump,
    )]
    pub participant_vault: Account<'info, ParticipantVault>,

    /// Custody sub-account for this participant's contribution. Its address
    /// is re-derived in the handler.
    #[account(mut)]
    pub participant_vault_authority: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}
