//! # Events Module
//!
//! Events emitted by the Divi program for off-chain indexing.
//!
//! ## Event Flow:
//! ```text
//! initialize_vault ──> VaultInitializedEvent
//!        │
//!        ├── pay ─────────> PaymentReceivedEvent ──┐
//!        │                                         ├──> VaultFinalizedEvent (exact fill)
//!        └── participate ─> ParticipationCreatedEvent ┘
//!
//! refund_participant ──> ParticipantRefundedEvent
//! settle_participant ──> ParticipantSettledEvent
//! cancel_payment ──────> VaultCancelledEvent
//! close_vault / close_payment_vault ──> VaultClosedEvent
//! ```
//!
//! ## How to Listen for Events:
//!
//! ```javascript
//! program.addEventListener("VaultFinalizedEvent", (event) => {
//!     console.log(`Payment ${event.paymentId} reached ${event.totalAmount}`);
//! });
//! ```

use anchor_lang::prelude::*;

use crate::state::VaultMode;

/// Emitted when an issuer opens a payment vault.
#[event]
pub struct VaultInitializedEvent {
    pub issuer: Pubkey,
    pub vault: Pubkey,
    pub payment_id: u32,
    pub mode: VaultMode,
    pub total_amount: u64,
    pub timestamp: i64,
}

/// Emitted for every pooled-mode payment.
#[event]
pub struct PaymentReceivedEvent {
    pub issuer: Pubkey,
    pub vault: Pubkey,
    pub payer: Pubkey,
    pub payment_id: u32,
    /// Lamports paid in this instruction
    pub amount: u64,
    /// `received_amount` after this payment
    pub received_amount: u64,
    pub timestamp: i64,
}

/// Emitted when a participant joins a tracked-mode vault.
#[event]
pub struct ParticipationCreatedEvent {
    pub issuer: Pubkey,
    pub vault: Pubkey,
    pub participant: Pubkey,
    pub participant_vault: Pubkey,
    pub payment_id: u32,
    pub amount: u64,
    pub received_amount: u64,
    pub timestamp: i64,
}

/// Emitted by the contribution that makes `received_amount == total_amount`.
#[event]
pub struct VaultFinalizedEvent {
    pub issuer: Pubkey,
    pub vault: Pubkey,
    pub payment_id: u32,
    pub total_amount: u64,
    pub timestamp: i64,
}

/// Emitted when the issuer cancels a tracked-mode payment.
#[event]
pub struct VaultCancelledEvent {
    pub issuer: Pubkey,
    pub vault: Pubkey,
    pub payment_id: u32,
    pub timestamp: i64,
}

/// Emitted when a participant's contribution goes back to them.
#[event]
pub struct ParticipantRefundedEvent {
    pub issuer: Pubkey,
    pub vault: Pubkey,
    pub participant: Pubkey,
    pub payment_id: u32,
    /// Contribution returned (the custody reserve is returned on top)
    pub amount: u64,
    pub outstanding_amount: u64,
    pub timestamp: i64,
}

/// Emitted when the issuer collects a participant's contribution from a
/// finalized tracked-mode vault.
#[event]
pub struct ParticipantSettledEvent {
    pub issuer: Pubkey,
    pub vault: Pubkey,
    pub participant: Pubkey,
    pub payment_id: u32,
    pub amount: u64,
    /// Lamports still held in participant custody for this vault
    pub outstanding_amount: u64,
    pub timestamp: i64,
}

/// Emitted when a vault record is destroyed.
#[event]
pub struct VaultClosedEvent {
    pub issuer: Pubkey,
    pub vault: Pubkey,
    pub payment_id: u32,
    pub mode: VaultMode,
    /// Lamports moved from the shared custody account to the issuer
    pub released_amount: u64,
    /// Whether the vault had reached its target
    pub was_finalized: bool,
    pub timestamp: i64,
}
