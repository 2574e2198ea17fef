//! Padlock - password-based file encryption.
//!
//! A small tool that seals files into a bare `salt ‖ iv ‖ ciphertext`
//! envelope using:
//! - PBKDF2-HMAC-SHA256 (100,000 iterations) for key derivation
//! - AES-256-CBC with PKCS7 padding for the payload
//! - A fresh random salt and IV for every encryption

pub mod app;
pub mod config;
pub mod crypto;
pub mod envelope;
pub mod error;
pub mod file;
pub mod processor;
pub mod secret;
pub mod textgen;
pub mod types;
pub mod ui;
