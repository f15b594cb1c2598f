use anchor_lang::error::Error;
use anchor_lang::prelude::Result;

use crate::errors::VaultError;

/// Asserts that `result` failed with exactly `expected`.
pub fn assert_vault_error<T: std::fmt::Debug>(result: Result<T>, expected: VaultError) {
    match result {
        Err(Error::AnchorError(error)) => assert_eq!(
            error.error_code_number,
            u32::from(expected),
            "expected {}, got {}",
            expected.name(),
            error.error_name
        ),
        other => panic!("expected {}, got {:?}", expected.name(), other),
    }
}
