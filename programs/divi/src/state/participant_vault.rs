//! # Participant Vault Account Structure
//!
//! Tracked-mode bookkeeping for a single contribution. Each participant of a
//! payment gets one record plus a custody sub-account holding exactly what
//! they put in:
//!
//! ```text
//!   ParticipantVault PDA                         Participant Vault Authority PDA
//!   ["participant-vault",                        ["participant-vault-authority",
//!    issuer, participant, payment_id]             issuer, participant, payment_id]
//!   ├── participant: Alice                       └── lamports: reserve + 4
//!   └── amount: 4
//! ```
//!
//! The record lives until the issuer refunds it or, once the vault is
//! finalized, settles it. Both drain the sub-account and close the record,
//! so a participant can never be paid out twice.

use anchor_lang::prelude::*;

use crate::errors::VaultError;

/// # ParticipantVault
///
/// `issuer` is the first field on purpose: clients list every record of an
/// issuer with a memcmp filter at offset 8 (right after the discriminator).
#[account]
#[derive(Default, Debug)]
pub struct ParticipantVault {
    /// Issuer of the parent `PaymentVault`.
    pub issuer: Pubkey,

    /// Payment id of the parent `PaymentVault`.
    pub payment_id: u32,

    /// Who contributed.
    pub participant: Pubkey,

    /// Lamports contributed. Always greater than zero.
    pub amount: u64,

    /// The custody sub-account PDA.
    pub authority: Pubkey,

    /// Bump of the custody sub-account.
    pub authority_bump: u8,

    /// Rent-exempt lamports the participant parked in the custody
    /// sub-account on top of `amount`. Returned to them when the record closes.
    pub custody_reserve: u64,

    pub bump: u8,

    pub created_at: i64,
}

impl ParticipantVault {
    /// 8 (discriminator) + 32 + 4 + 32 + 8 + 32 + 1 + 8 + 1 + 8 = 134 bytes
    pub const LEN: usize = 8 + 32 + 4 + 32 + 8 + 32 + 1 + 8 + 1 + 8;

    pub const SEED_PREFIX: &'static [u8] = b"participant-vault";

    pub const AUTHORITY_SEED_PREFIX: &'static [u8] = b"participant-vault-authority";

    pub fn new(issuer: Pubkey, payment_id: u32, participant: Pubkey, amount: u64) -> Result<Self> {
        require!(amount > 0, VaultError::InvalidAmount);

        Ok(Self {
            issuer,
            payment_id,
            participant,
            amount,
            ..Self::default()
        })
    }

    /// Record PDA for `(issuer, participant, payment_id)`.
    pub fn derive_address(issuer: &Pubkey, participant: &Pubkey, payment_id: u32) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                Self::SEED_PREFIX,
                issuer.as_ref(),
                participant.as_ref(),
                &payment_id.to_le_bytes(),
            ],
            &crate::ID,
        )
    }

    /// Custody sub-account PDA for `(issuer, participant, payment_id)`.
    pub fn derive_authority(issuer: &Pubkey, participant: &Pubkey, payment_id: u32) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[
                Self::AUTHORITY_SEED_PREFIX,
                issuer.as_ref(),
                participant.as_ref(),
                &payment_id.to_le_bytes(),
            ],
            &crate::ID,
        )
    }

    /// Whether this record hangs off the vault `(issuer, payment_id)`.
    pub fn belongs_to(&self, issuer: &Pubkey, payment_id: u32) -> bool {
        self.issuer == *issuer && self.payment_id == payment_id
    }

    /// Custody sub-account must hold at least the reserve plus the amount.
    pub fn verify_custody(&self, custody_lamports: u64) -> Result<()> {
        let expected = self
            .custody_reserve
            .checked_add(self.amount)
            .ok_or(VaultError::Overflow)?;
        require!(
            custody_lamports >= expected,
            VaultError::CustodyBalanceMismatch
        );
        Ok(())
    }
}
