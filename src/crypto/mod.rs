//! Cryptographic modules for Padlock.

pub mod derive;
pub mod engine;

pub use derive::{derive_key, generate_iv, generate_salt, random_bytes};
