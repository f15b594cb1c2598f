//! # Utilities
//!
//! Helpers shared by several instructions: PDA-signed lamport transfers and
//! the scan of caller-supplied participation records.

use anchor_lang::prelude::*;

use crate::errors::VaultError;
use crate::state::ParticipantVault;

/// Moves lamports out of a data-less custody PDA, signing with its seeds.
/// A zero amount is a no-op.
pub fn transfer_from_custody<'info>(
    system_program: &Program<'info, System>,
    from: AccountInfo<'info>,
    to: AccountInfo<'info>,
    amount: u64,
    signer_seeds: &[&[&[u8]]],
) -> Result<()> {
    if amount == 0 {
        return Ok(());
    }

    anchor_lang::system_program::transfer(
        CpiContext::new_with_signer(
            system_program.to_account_info(),
            anchor_lang::system_program::Transfer { from, to },
            signer_seeds,
        ),
        amount,
    )
}

/// Decides whether one remaining account is a live participation record of
/// the vault `(issuer, payment_id)`.
///
/// Accounts owned by another program, closed accounts and accounts of other
/// types or other vaults are ignored. A matching record that does not sit at
/// its derived address is rejected outright.
pub fn is_live_participation(
    key: &Pubkey,
    owner: &Pubkey,
    data: &[u8],
    issuer: &Pubkey,
    payment_id: u32,
) -> Result<bool> {
    if owner != &crate::ID {
        return Ok(false);
    }

    // try_deserialize checks the discriminator, so other account types fail here
    let record = match ParticipantVault::try_deserialize(&mut &data[..]) {
        Ok(record) => record,
        Err(_) => return Ok(false),
    };

    if !record.belongs_to(issuer, payment_id) {
        return Ok(false);
    }

    let (expected, _) = ParticipantVault::derive_address(issuer, &record.participant, payment_id);
    require_keys_eq!(expected, *key, VaultError::AddressMismatch);

    Ok(true)
}

/// Fails with `NotAllParticipantsRefunded` if any supplied account is a live
/// participation record of the vault `(issuer, payment_id)`.
pub fn ensure_no_live_participations(
    accounts: &[AccountInfo],
    issuer: &Pubkey,
    payment_id: u32,
) -> Result<()> {
    for account_info in accounts {
        let data = account_info.try_borrow_data()?;
        if is_live_participation(account_info.key, account_info.owner, &data, issuer, payment_id)? {
            msg!("Participation {} has not been refunded", account_info.key);
            return err!(VaultError::NotAllParticipantsRefunded);
        }
    }

    Ok(())
}
