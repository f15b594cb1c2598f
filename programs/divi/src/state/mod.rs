//! # State Module
//!
//! Accounts stored on-chain by the Divi program.
//!
//! - `PaymentVault`: one per `(issuer, payment_id)`, both modes
//! - `ParticipantVault`: one per `(issuer, participant, payment_id)`, tracked mode only
//!
//! Custody accounts are not listed here: they are data-less system accounts
//! at PDAs, so they carry no state beyond their lamports.

pub mod participant_vault;
pub mod payment_vault;

pub use participant_vault::*;
pub use payment_vault::*;
