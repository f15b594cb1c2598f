//! # Payment Vault Account Structure
//!
//! The accounting record of one escrow. It is opened by an issuer for a
//! `payment_id` of their choosing and collects contributions until
//! `received_amount` reaches `total_amount` exactly.
//!
//! The lamports themselves never sit in this account. They are held by the
//! paired custody PDA (the "vault authority"), a data-less system account
//! that only this program can sign for:
//!
//! ```text
//!   PaymentVault PDA                    Vault Authority PDA
//!   ["vault", issuer, payment_id]       ["vault-authority", issuer, payment_id]
//!   ├── total_amount: 10                └── lamports: reserve + 10
//!   ├── received_amount: 10
//!   └── is_finalized: true
//! ```
//!
//! Every transition below is a plain method so that the instruction handlers
//! stay thin: check, move lamports, then apply the method.

use anchor_lang::prelude::*;

use crate::errors::VaultError;

/// How contributions are accounted for. Chosen at creation and never changed.
#[derive(AnchorSerialize, AnchorDeserialize, Clone, Copy, PartialEq, Eq, Debug, Default)]
pub enum VaultMode {
    /// Payers send lamports straight into the shared custody account.
    /// Contributions cannot be reversed; the issuer collects everything
    /// with `close_vault` once the target is reached.
    #[default]
    Pooled,
    /// Each participant gets a `ParticipantVault` record and a custody
    /// sub-account, so contributions can be refunded one by one and the
    /// payment can be cancelled safely.
    Tracked,
}

/// # PaymentVault
///
/// | Field | Type | Description |
/// |-------|------|-------------|
/// | issuer | Pubkey | Who opened the escrow and may close or cancel it |
/// | payment_id | u32 | Issuer-chosen id, part of the PDA seeds |
/// | mode | VaultMode | Pooled or tracked accounting |
/// | total_amount | u64 | Target in lamports |
/// | received_amount | u64 | Lamports contributed so far, less refunds made while open |
/// | settled_amount | u64 | Lamports already handed to the issuer (tracked mode) |
/// | refunded_amount | u64 | Lamports given back after finalization (tracked mode) |
/// | is_finalized | bool | `received_amount == total_amount` |
/// | is_cancelled | bool | Issuer cancelled the payment (tracked mode) |
/// | authority | Pubkey | The custody PDA |
/// | authority_bump | u8 | Bump of the custody PDA |
/// | custody_reserve | u64 | Rent-exempt lamports parked in the custody PDA |
/// | bump | u8 | Bump of this record |
/// | created_at | i64 | Unix timestamp |
///
/// ## Invariants:
/// - `received_amount <= total_amount`
/// - `received_amount` only decreases through refunds on an open vault
/// - `settled_amount + refunded_amount <= received_amount`
/// - once `is_finalized` is set it is never cleared
/// - custody lamports `>= custody_reserve + outstanding_amount()`
#[account]
#[derive(Default, Debug)]
pub struct PaymentVault {
    pub issuer: Pubkey,
    pub payment_id: u32,
    pub mode: VaultMode,
    pub total_amount: u64,
    pub received_amount: u64,
    pub settled_amount: u64,
    pub refunded_amount: u64,
    pub is_finalized: bool,
    pub is_cancelled: bool,
    pub authority: Pubkey,
    pub authority_bump: u8,
    pub custody_reserve: u64,
    pub bump: u8,
    pub created_at: i64,
}

impl PaymentVault {
    /// ## Calculation:
    /// - 8 bytes: Anchor discriminator
    /// - 32 bytes: issuer
    /// - 4 bytes: payment_id
    /// - 1 byte: mode
    /// - 8 bytes × 4: total_amount, received_amount, settled_amount, refunded_amount
    /// - 1 byte × 2: is_finalized, is_cancelled
    /// - 32 bytes: authority
    /// - 1 byte: authority_bump
    /// - 8 bytes: custody_reserve
    /// - 1 byte: bump
    /// - 8 bytes: created_at
    ///
    /// Total: 8 + 32 + 4 + 1 + (8 * 4) + 2 + 32 + 1 + 8 + 1 + 8 = 129 bytes
    pub const LEN: usize = 8 + 32 + 4 + 1 + (8 * 4) + 2 + 32 + 1 + 8 + 1 + 8;

    /// Seed prefix of the record PDA: `["vault", issuer, payment_id_le]`.
    pub const SEED_PREFIX: &'static [u8] = b"vault";

    /// Seed prefix of the custody PDA: `["vault-authority", issuer, payment_id_le]`.
    pub const AUTHORITY_SEED_PREFIX: &'static [u8] = b"vault-authority";

    /// A fresh, open vault. Custody fields are filled in by the caller once
    /// the custody PDA is known.
    pub fn new(issuer: Pubkey, payment_id: u32, total_amount: u64, mode: VaultMode) -> Result<Self> {
        require!(total_amount > 0, VaultError::InvalidAmount);

        Ok(Self {
            issuer,
            payment_id,
            mode,
            total_amount,
            ..Self::default()
        })
    }

    /// Record PDA for `(issuer, payment_id)`.
    pub fn derive_address(issuer: &Pubkey, payment_id: u32) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[Self::SEED_PREFIX, issuer.as_ref(), &payment_id.to_le_bytes()],
            &crate::ID,
        )
    }

    /// Custody PDA for `(issuer, payment_id)`.
    pub fn derive_authority(issuer: &Pubkey, payment_id: u32) -> (Pubkey, u8) {
        Pubkey::find_program_address(
            &[Self::AUTHORITY_SEED_PREFIX, issuer.as_ref(), &payment_id.to_le_bytes()],
            &crate::ID,
        )
    }

    /// Lamports still needed to reach the target.
    pub fn remaining_amount(&self) -> u64 {
        self.total_amount.saturating_sub(self.received_amount)
    }

    /// Contributed lamports that have been neither settled nor refunded.
    /// This is what the custody accounts must hold above their reserves.
    pub fn outstanding_amount(&self) -> u64 {
        self.received_amount
            .saturating_sub(self.settled_amount)
            .saturating_sub(self.refunded_amount)
    }

    pub fn require_mode(&self, mode: VaultMode) -> Result<()> {
        require!(self.mode == mode, VaultError::WrongVaultMode);
        Ok(())
    }

    /// Validates a contribution without applying it and returns the
    /// `received_amount` it would produce.
    ///
    /// Partial fills are never accepted: a contribution that does not fit
    /// in the remaining capacity is rejected whole.
    pub fn check_contribution(&self, amount: u64) -> Result<u64> {
        require!(amount > 0, VaultError::InvalidAmount);
        require!(!self.is_finalized, VaultError::VaultIsAlreadyFinalized);
        require!(!self.is_cancelled, VaultError::VaultIsCancelled);

        let received = self
            .received_amount
            .checked_add(amount)
            .ok_or(VaultError::AmountIsGreaterThanVaultTotalAmount)?;
        require!(
            received <= self.total_amount,
            VaultError::AmountIsGreaterThanVaultTotalAmount
        );

        Ok(received)
    }

    /// Applies a contribution. Returns `true` when this contribution
    /// completed the target.
    pub fn record_contribution(&mut self, amount: u64) -> Result<bool> {
        self.received_amount = self.check_contribution(amount)?;
        self.is_finalized = self.received_amount == self.total_amount;
        Ok(self.is_finalized)
    }

    /// Books a contribution given back to its participant (tracked mode).
    ///
    /// On an open vault the refund comes off `received_amount`, so the
    /// capacity is offered again and the custody keeps matching the target
    /// when the vault fills. A finalized vault stays finalized: refunds after
    /// the fill go to `refunded_amount` instead.
    pub fn record_refund(&mut self, amount: u64) -> Result<()> {
        require!(amount <= self.outstanding_amount(), VaultError::Underflow);

        if !self.is_finalized {
            self.received_amount = self
                .received_amount
                .checked_sub(amount)
                .ok_or(VaultError::Underflow)?;
            return Ok(());
        }

        self.refunded_amount = self
            .refunded_amount
            .checked_add(amount)
            .ok_or(VaultError::Overflow)?;
        Ok(())
    }

    /// Books a contribution handed to the issuer after finalization
    /// (tracked mode).
    pub fn record_settlement(&mut self, amount: u64) -> Result<()> {
        require!(self.is_finalized, VaultError::VaultIsNotFinalized);
        require!(amount <= self.outstanding_amount(), VaultError::Underflow);

        self.settled_amount = self
            .settled_amount
            .checked_add(amount)
            .ok_or(VaultError::Overflow)?;
        Ok(())
    }

    /// The pooled close path: the issuer collects only after exact fill.
    pub fn ensure_finalized(&self) -> Result<()> {
        require!(self.is_finalized, VaultError::VaultIsNotFinalized);
        Ok(())
    }

    /// No participation record may still hold value for this vault.
    pub fn ensure_no_outstanding(&self) -> Result<()> {
        require!(
            self.outstanding_amount() == 0,
            VaultError::NotAllParticipantsRefunded
        );
        Ok(())
    }

    /// Only an open, not yet cancelled vault can be cancelled.
    pub fn ensure_cancellable(&self) -> Result<()> {
        require!(!self.is_finalized, VaultError::VaultIsAlreadyFinalized);
        require!(!self.is_cancelled, VaultError::VaultIsCancelled);
        Ok(())
    }

    /// Marks an open tracked vault as cancelled. Only allowed once every
    /// participant has been refunded; that is checked first so a caller who
    /// skipped refunds learns about it whatever the vault's state.
    pub fn cancel(&mut self) -> Result<()> {
        self.ensure_no_outstanding()?;
        self.ensure_cancellable()?;

        self.is_cancelled = true;
        Ok(())
    }

    /// Checks the shared custody account against the books before any
    /// lamports leave or enter it.
    ///
    /// Tracked vaults keep contributions in the participant sub-accounts,
    /// so their shared custody only ever owes the reserve.
    ///
    /// Anyone can send lamports to any address, so a surplus is tolerated
    /// (it goes to the issuer on close); a shortfall is not.
    pub fn verify_custody(&self, custody_lamports: u64) -> Result<()> {
        let held = match self.mode {
            VaultMode::Pooled => self.outstanding_amount(),
            VaultMode::Tracked => 0,
        };
        let expected = self
            .custody_reserve
            .checked_add(held)
            .ok_or(VaultError::Overflow)?;
        require!(
            custody_lamports >= expected,
            VaultError::CustodyBalanceMismatch
        );
        Ok(())
    }
}
