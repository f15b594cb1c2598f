// Suppress warnings from Anchor/Solana version mismatches
#![allow(unexpected_cfgs)]
#![allow(ambiguous_glob_reexports)]

//! # Divi Payment Vaults
//!
//! A Solana program (Anchor) that collects a fixed lamport amount for an
//! issuer from any number of payers, in escrow, until the target is reached.
//!
//! ## Overview
//!
//! An issuer opens a vault for `(issuer, payment_id)` with a target amount.
//! Payers contribute until the vault holds exactly the target; nothing is
//! accepted past it. Two modes exist, chosen when the vault is opened:
//!
//! - **Pooled**: contributions go into one shared custody account. Once the
//!   target is reached the issuer collects everything and closes the vault.
//! - **Tracked**: every contributor gets a participation record and a custody
//!   sub-account of their own. While the vault is open the issuer can refund
//!   contributors one by one, and cancel once nobody has value left in it.
//!   After the target is reached the issuer settles each record to itself.
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                          DIVI PROGRAM                             │
//! │                                                                   │
//! │  PaymentVault ["vault", issuer, id]                               │
//! │    └── custody ["vault-authority", issuer, id]    (pooled value)  │
//! │                                                                   │
//! │  ParticipantVault ["participant-vault", issuer, participant, id]  │
//! │    └── custody ["participant-vault-authority", ...] (tracked)     │
//! └──────────────────────────────────────────────────────────────────┘
//!                               │
//!                               │ CPI (invoke_signed)
//!                               ▼
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                         SYSTEM PROGRAM                            │
//! │                  (moves the actual lamports)                      │
//! └──────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Security Model
//!
//! 1. **PDA Custody**: custody accounts have no private key, only the program
//!    signs for them
//! 2. **Address Checks**: every account handed in is re-derived and compared
//! 3. **Issuer Only**: collecting, refunding and cancelling need the issuer's signature
//! 4. **Exact Fill**: the books never go past the target
//! 5. **Conservation**: custody always covers `received - settled - refunded`
//!
//! ## Example Usage
//!
//! ```typescript
//! // 1. Issuer opens a pooled vault for 10 SOL
//! await program.methods.initializeVault(7, new BN(10 * LAMPORTS_PER_SOL), { pooled: {} }).rpc();
//!
//! // 2. Payers contribute 4 + 4 + 2 SOL
//! await program.methods.pay(7, new BN(4 * LAMPORTS_PER_SOL)).rpc();
//!
//! // 3. Issuer collects
//! await program.methods.closeVault(7).rpc();
//! ```

use anchor_lang::prelude::*;

// Module declarations
pub mod errors;
pub mod events;
pub mod instructions;
pub mod state;
pub mod utils;

#[cfg(test)]
mod test_utils;

// Re-export for easier access
pub use errors::*;
pub use events::*;
pub use instructions::*;
pub use state::*;

declare_id!("4pYKM8QS4SV7ffF8bMjjPhZtQfb8R8Q5M72GbnN5oKFs");

#[program]
pub mod divi {
    use super::*;

    // ========================================
    // VAULT SETUP
    // ========================================

    /// Open a vault for `(issuer, payment_id)`.
    ///
    /// ## Arguments:
    /// - `payment_id`: issuer-chosen id, part of every address of this vault
    /// - `total_amount`: target in lamports (non-zero)
    /// - `mode`: `Pooled` or `Tracked`, fixed for the vault's lifetime
    pub fn initialize_vault(
        ctx: Context<InitializeVault>,
        payment_id: u32,
        total_amount: u64,
        mode: VaultMode,
    ) -> Result<()> {
        instructions::initialize_vault(ctx, payment_id, total_amount, mode)
    }

    // ========================================
    // POOLED MODE
    // ========================================

    /// Pay `amount` lamports into a pooled vault.
    pub fn pay(ctx: Context<Pay>, payment_id: u32, amount: u64) -> Result<()> {
        instructions::pay(ctx, payment_id, amount)
    }

    /// Collect a finalized pooled vault and close it. Issuer only.
    pub fn close_vault(ctx: Context<CloseVault>, payment_id: u32) -> Result<()> {
        instructions::close_vault(ctx, payment_id)
    }

    // ========================================
    // TRACKED MODE
    // ========================================

    /// Contribute `amount` lamports to a tracked vault through a new
    /// participation record.
    pub fn participate(ctx: Context<Participate>, payment_id: u32, amount: u64) -> Result<()> {
        instructions::participate(ctx, payment_id, amount)
    }

    /// Cancel an open tracked vault. Issuer only.
    ///
    /// ## Remaining Accounts:
    /// Participation records of the vault; any live one fails the call.
    pub fn cancel_payment(ctx: Context<CancelPayment>, payment_id: u32) -> Result<()> {
        instructions::cancel_payment(ctx, payment_id)
    }

    /// Give one participant their contribution back. Issuer only.
    pub fn refund_participant(ctx: Context<RefundParticipant>, payment_id: u32) -> Result<()> {
        instructions::refund_participant(ctx, payment_id)
    }

    /// Hand one participant's contribution of a finalized vault to the
    /// issuer. Issuer only.
    pub fn settle_participant(ctx: Context<SettleParticipant>, payment_id: u32) -> Result<()> {
        instructions::settle_participant(ctx, payment_id)
    }

    /// Close a tracked vault with no participation left. Issuer only.
    ///
    /// ## Remaining Accounts:
    /// Participation records of the vault; any live one fails the call.
    pub fn close_payment_vault(ctx: Context<ClosePaymentVault>, payment_id: u32) -> Result<()> {
        instructions::close_payment_vault(ctx, payment_id)
    }
}
