//! # Error Handling Module
//!
//! Every way a Divi instruction can be rejected. All checks run before any
//! lamports move, so a rejected instruction leaves every account untouched.
//!
//! ## How Errors Work in Anchor:
//!
//! ```rust,ignore
//! require!(amount > 0, VaultError::InvalidAmount);
//! ```
//!
//! The client receives the error name, code and message. Anchor assigns
//! codes starting from 6000 (0x1770); the categories below pin explicit
//! starting codes so clients can match on ranges.

use anchor_lang::prelude::*;

/// # VaultError
///
/// | Category | Error Codes | Description |
/// |----------|-------------|-------------|
/// | Input Validation | 6000-6009 | Bad amounts, wrong vault mode |
/// | Lifecycle | 6010-6019 | Vault is in the wrong state for the instruction |
/// | Authorization & Integrity | 6020-6029 | Wrong signer, substituted accounts |
/// | Overflow/Math | 6040-6049 | Arithmetic errors |
#[error_code]
pub enum VaultError {
    // ============================================
    // INPUT VALIDATION ERRORS (6000-6009)
    // ============================================

    /// Target or contribution amount is zero.
    #[msg("Amount must be greater than zero")]
    InvalidAmount, // 6000

    /// The contribution would push `received_amount` past `total_amount`.
    ///
    /// ## Example:
    /// ```text
    /// total_amount:    10
    /// received_amount:  8
    ///
    /// pay(3) → ERROR (only 2 left)
    /// pay(2) → OK, vault finalized
    /// ```
    #[msg("The amount is greater than the vault total amount")]
    AmountIsGreaterThanVaultTotalAmount, // 6001

    /// A pooled instruction was sent to a tracked vault or the other way round.
    #[msg("This instruction is not available for the vault mode")]
    WrongVaultMode, // 6002

    // ============================================
    // LIFECYCLE ERRORS (6010-6019)
    // ============================================

    /// The vault reached its target; it accepts no more contributions
    /// and can no longer be cancelled.
    #[msg("Vault is already finalized")]
    VaultIsAlreadyFinalized = 10, // 6010

    /// The issuer tried to collect before the target was reached.
    #[msg("Vault is not finalized")]
    VaultIsNotFinalized, // 6011

    /// At least one participation record for this vault still holds value.
    ///
    /// ## How to fix:
    /// Call `refund_participant` (or, on a finalized vault,
    /// `settle_participant`) for every remaining participant first.
    #[msg("Not all participants have been refunded")]
    NotAllParticipantsRefunded, // 6012

    /// The issuer cancelled this payment.
    #[msg("Vault is cancelled")]
    VaultIsCancelled, // 6013

    // ============================================
    // AUTHORIZATION & INTEGRITY ERRORS (6020-6029)
    // ============================================

    /// Signer is not the identity the instruction requires.
    #[msg("You are not authorized to perform this action on this vault")]
    Unauthorized = 20, // 6020

    /// A supplied account does not sit at its derived address.
    ///
    /// ## Security:
    /// Stops a caller from substituting a custody account they control.
    #[msg("Account address does not match its derivation")]
    AddressMismatch, // 6021

    /// The participation record belongs to another participant or payment.
    #[msg("Participation record does not match the participant or payment")]
    ParticipantMismatch, // 6022

    /// A custody account holds less than its reserve plus the value the
    /// records say it holds.
    ///
    /// ## This is a critical error:
    /// It means the conservation invariant is broken.
    #[msg("Custody balance is lower than the recorded amount")]
    CustodyBalanceMismatch, // 6023

    // ============================================
    // OVERFLOW/MATH ERRORS (6040-6049)
    // ============================================

    #[msg("Arithmetic overflow - this should never happen")]
    Overflow = 40, // 6040

    #[msg("Arithmetic underflow - this should never happen")]
    Underflow, // 6041
}
