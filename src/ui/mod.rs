//! Console output and interactive prompts.

pub mod display;
pub mod prompt;

pub use display::show_outcomes;
pub use prompt::{prompt_decryption_passphrase, prompt_encryption_passphrase};
