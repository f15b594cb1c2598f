//! # Pay Instruction (pooled mode)
//!
//! Anyone can pay into an open pooled vault. The lamports go straight into
//! the shared custody PDA; no per-payer record is kept.
//!
//! ## What Happens During a Payment:
//!
//! ```text
//! BEFORE:                              AFTER pay(4):
//!
//! Payer Wallet: 20                     Payer Wallet: 16 (-4)
//!
//! PaymentVault                         PaymentVault
//! ├── total_amount: 10                 ├── total_amount: 10
//! ├── received_amount: 6               ├── received_amount: 10 (+4)
//! └── is_finalized: false              └── is_finalized: true
//!
//! Vault Authority: reserve + 6         Vault Authority: reserve + 10
//! ```
//!
//! A payment that would overshoot the target is rejected whole; the vault
//! finalizes only on an exact fill.

use anchor_lang::prelude::*;

use crate::errors::VaultError;
use crate::events::{PaymentReceivedEvent, VaultFinalizedEvent};
use crate::state::{PaymentVault, VaultMode};

/// # pay
///
/// ## Returns
///
/// * `Err(VaultError::WrongVaultMode)` - the vault is a tracked vault
/// * `Err(VaultError::InvalidAmount)` - amount is zero
/// * `Err(VaultError::VaultIsAlreadyFinalized)` - target already reached
/// * `Err(VaultError::AmountIsGreaterThanVaultTotalAmount)` - amount exceeds what is left
pub fn pay(ctx: Context<Pay>, payment_id: u32, amount: u64) -> Result<()> {
    // ===================================
    // STEP 1: Validate
    // ===================================

    let vault = &ctx.accounts.vault;
    vault.require_mode(VaultMode::Pooled)?;
    vault.check_contribution(amount)?;
    vault.verify_custody(ctx.accounts.vault_authority.lamports())?;

    // ===================================
    // STEP 2: Move Lamports Into Custody
    // ===================================

    anchor_lang::system_program::transfer(
        CpiContext::new(
            ctx.accounts.system_program.to_account_info(),
            anchor_lang::system_program::Transfer {
                from: ctx.accounts.payer.to_account_info(),
                to: ctx.accounts.vault_authority.to_account_info(),
            },
        ),
        amount,
    )?;

    // ===================================
    // STEP 3: Update the Books
    // ===================================

    let vault_key = ctx.accounts.vault.key();
    let payer_key = ctx.accounts.payer.key();
    let clock = Clock::get()?;

    let vault = &mut ctx.accounts.vault;
    let finalized = vault.record_contribution(amount)?;

    emit!(PaymentReceivedEvent {
        issuer: vault.issuer,
        vault: vault_key,
        payer: payer_key,
        payment_id,
        amount,
        received_amount: vault.received_amount,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "{} paid {} lamports into vault {}. Received {}/{}",
        payer_key,
        amount,
        payment_id,
        vault.received_amount,
        vault.total_amount
    );

    if finalized {
        emit!(VaultFinalizedEvent {
            issuer: vault.issuer,
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
pub struct Pay<'info> {
    /// Whoever pays. Signs for their own lamports only.
    #[account(mut)]
    pub payer: Signer<'info>,

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

    /// Shared custody PDA recorded on the vault.
    #[account(
        mut,
        address = vault.authority @ VaultError::AddressMismatch,
    )]
    pub vault_authority: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}
