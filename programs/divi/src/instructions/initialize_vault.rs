//! # Initialize Vault Instruction
//!
//! Opens a payment vault for `(issuer, payment_id)` in either mode.
//!
//! ## Account Diagram:
//!
//! ```text
//! BEFORE:                          AFTER:
//!
//! Issuer Wallet                    Issuer Wallet
//! └── SOL                          └── SOL (minus rent + custody reserve)
//!
//!                                  PaymentVault PDA (created)
//!                                  ├── issuer: Issuer
//!                                  ├── total_amount: N
//!                                  ├── received_amount: 0
//!                                  └── is_finalized: false
//!
//!                                  Vault Authority PDA (funded)
//!                                  └── lamports: rent-exempt reserve
//! ```
//!
//! ## Custody Reserve:
//!
//! The custody PDA is a data-less system account. The runtime refuses to
//! leave such an account with a balance between zero and the rent-exempt
//! minimum, so a first payment of a few lamports would fail. The issuer
//! parks the minimum in it up front and gets it back on close.

use anchor_lang::prelude::*;

use crate::errors::VaultError;
use crate::events::VaultInitializedEvent;
use crate::state::{PaymentVault, VaultMode};

/// # initialize_vault
///
/// ## Arguments
///
/// * `payment_id` - Issuer-chosen id; one vault per `(issuer, payment_id)`
/// * `total_amount` - Target in lamports, must be greater than zero
/// * `mode` - `Pooled` (v1) or `Tracked` (v2)
///
/// ## Returns
///
/// * `Err(VaultError::InvalidAmount)` - `total_amount` is zero
/// * `Err(VaultError::AddressMismatch)` - custody account is not the derived PDA
/// * Anchor/System error - the vault address is already in use
pub fn initialize_vault(
    ctx: Context<InitializeVault>,
    payment_id: u32,
    total_amount: u64,
    mode: VaultMode,
) -> Result<()> {
    // ===================================
    // STEP 1: Validate Input
    // ===================================

    let issuer_key = ctx.accounts.issuer.key();
    let mut record = PaymentVault::new(issuer_key, payment_id, total_amount, mode)?;

    let (expected_authority, authority_bump) = PaymentVault::derive_authority(&issuer_key, payment_id);
    require_keys_eq!(
        ctx.accounts.vault_authority.key(),
        expected_authority,
        VaultError::AddressMismatch
    );

    // ===================================
    // STEP 2: Fund the Custody Reserve
    // ===================================

    let reserve = Rent::get()?.minimum_balance(0);
    let top_up = reserve.saturating_sub(ctx.accounts.vault_authority.lamports());

    if top_up > 0 {
        anchor_lang::system_program::transfer(
            CpiContext::new(
                ctx.accounts.system_program.to_account_info(),
                anchor_lang::system_program::Transfer {
                    from: ctx.accounts.issuer.to_account_info(),
                    to: ctx.accounts.vault_authority.to_account_info(),
                },
            ),
            top_up,
        )?;
    }

    // ===================================
    // STEP 3: Write the Record
    // ===================================

    let clock = Clock::get()?;
    let vault_key = ctx.accounts.vault.key();

    record.authority = ctx.accounts.vault_authority.key();
    record.authority_bump = authority_bump;
    record.custody_reserve = reserve;
    record.bump = ctx.bumps.vault;
    record.created_at = clock.unix_timestamp;

    ctx.accounts.vault.set_inner(record);

    emit!(VaultInitializedEvent {
        issuer: issuer_key,
        vault: vault_key,
        payment_id,
        mode,
        total_amount,
        timestamp: clock.unix_timestamp,
    });

    msg!(
        "Vault {} opened by {} for {} lamports ({:?})",
        payment_id,
        issuer_key,
        total_amount,
        mode
    );

    Ok(())
}

/// # InitializeVault Accounts
///
/// `init` fails if the record already exists, so an issuer cannot reopen a
/// live `payment_id`.
#[derive(Accounts)]
#[instruction(payment_id: u32)]
pub struct InitializeVault<'info> {
    /// Issuer opening the vault. Pays rent and the custody reserve.
    #[account(mut)]
    pub issuer: Signer<'info>,

    #[account(
        init,
        payer = issuer,
        space = PaymentVault::LEN,
        seeds = [
            PaymentVault::SEED_PREFIX,
            issuer.key().as_ref(),
            &payment_id.to_le_bytes(),
        ],
        bump,
    )]
    pub vault: Account<'info, PaymentVault>,

    /// Custody PDA that will hold the escrowed lamports. Its address is
    /// re-derived in the handler.
    #[account(mut)]
    pub vault_authority: SystemAccount<'info>,

    pub system_program: Program<'info, System>,
}
