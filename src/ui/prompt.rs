//! Interactive passphrase prompts.
//!
//! Encryption prompts twice so a typo cannot silently seal a file under an
//! unknown passphrase; decryption prompts once, a wrong entry is caught by
//! the transform itself.

use anyhow::{Context, Result};
use inquire::{Password, PasswordDisplayMode};

use crate::secret::Passphrase;

pub fn prompt_encryption_passphrase() -> Result<Passphrase> {
    let value = Password::new("Encryption passphrase:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .with_custom_confirmation_message("Confirm passphrase:")
        .with_custom_confirmation_error_message("passphrases do not match")
        .with_validator(inquire::required!("passphrase cannot be empty"))
        .prompt()
        .context("no passphrase available: prompt failed")?;

    Ok(Passphrase::from_string(value))
}

pub fn prompt_decryption_passphrase() -> Result<Passphrase> {
    let value = Password::new("Decryption passphrase:")
        .with_display_mode(PasswordDisplayMode::Masked)
        .without_confirmation()
        .with_validator(inquire::required!("passphrase cannot be empty"))
        .prompt()
        .context("no passphrase available: prompt failed")?;

    Ok(Passphrase::from_string(value))
}
