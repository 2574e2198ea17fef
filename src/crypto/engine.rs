//! AES-256-CBC cipher engine.
//!
//! Whole-buffer transforms with PKCS7 padding; the usable file size is
//! bounded by available memory, which is acceptable for this tool's target
//! use. The format carries no MAC, so PKCS7 validation is the only integrity
//! signal on decrypt and the error is reported generically to avoid leaking
//! padding internals.

use aes::Aes256;
use aes::cipher::block_padding::Pkcs7;
use aes::cipher::{BlockDecryptMut, BlockEncryptMut, KeyIvInit};

use crate::config::IV_LEN;
use crate::error::PadlockError;
use crate::secret::DerivedKey;

type Aes256CbcEnc = cbc::Encryptor<Aes256>;
type Aes256CbcDec = cbc::Decryptor<Aes256>;

/// Encrypts a plaintext buffer.
///
/// Always succeeds; the output is a whole number of cipher blocks, at least
/// one even for empty input.
#[must_use]
pub fn encrypt(key: &DerivedKey, iv: &[u8; IV_LEN], plaintext: &[u8]) -> Vec<u8> {
    Aes256CbcEnc::new(key.as_bytes().into(), iv.into()).encrypt_padded_vec_mut::<Pkcs7>(plaintext)
}

/// Decrypts a ciphertext buffer.
///
/// A wrong key, a truncated stream, and corrupted ciphertext all surface the
/// same way here: the final block fails PKCS7 validation. They are collapsed
/// into one generic [`PadlockError::DecryptionFailed`] on purpose.
pub fn decrypt(key: &DerivedKey, iv: &[u8; IV_LEN], ciphertext: &[u8]) -> Result<Vec<u8>, PadlockError> {
    Aes256CbcDec::new(key.as_bytes().into(), iv.into())
        .decrypt_padded_vec_mut::<Pkcs7>(ciphertext)
        .map_err(|_| PadlockError::DecryptionFailed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{AES_BLOCK_SIZE, KEY_LEN};

    fn test_key(byte: u8) -> DerivedKey {
        DerivedKey::from_bytes([byte; KEY_LEN])
    }

    #[test]
    fn test_roundtrip() {
        let key = test_key(1);
        let iv = [2u8; IV_LEN];
        let plaintext = b"hello12345";

        let ciphertext = encrypt(&key, &iv, plaintext);
        let decrypted = decrypt(&key, &iv, &ciphertext).unwrap();

        assert_eq!(decrypted, plaintext);
    }

    #[test]
    fn test_empty_plaintext_pads_to_one_block() {
        let key = test_key(3);
        let iv = [4u8; IV_LEN];

        let ciphertext = encrypt(&key, &iv, b"");
        assert_eq!(ciphertext.len(), AES_BLOCK_SIZE);

        let decrypted = decrypt(&key, &iv, &ciphertext).unwrap();
        assert!(decrypted.is_empty());
    }

    #[test]
    fn test_ciphertext_is_block_aligned() {
        let key = test_key(5);
        let iv = [6u8; IV_LEN];

        for len in [1, 15, 16, 17, 1000] {
            let ciphertext = encrypt(&key, &iv, &vec![0xAA; len]);
            assert_eq!(ciphertext.len() % AES_BLOCK_SIZE, 0);
            assert!(ciphertext.len() > len);
        }
    }

    #[test]
    fn test_wrong_key_never_roundtrips() {
        let iv = [8u8; IV_LEN];
        let plaintext = b"the wrong key must not come back clean";
        let ciphertext = encrypt(&test_key(9), &iv, plaintext);

        // A wrong key can occasionally produce bytes that pass PKCS7
        // validation; corrupted plaintext must never round-trip either way.
        match decrypt(&test_key(10), &iv, &ciphertext) {
            Err(PadlockError::DecryptionFailed) => {}
            Err(other) => panic!("unexpected error kind: {other}"),
            Ok(garbage) => assert_ne!(garbage, plaintext),
        }
    }

    #[test]
    fn test_unaligned_ciphertext_fails() {
        let key = test_key(11);
        let iv = [12u8; IV_LEN];

        let result = decrypt(&key, &iv, &[0u8; 17]);
        assert!(matches!(result, Err(PadlockError::DecryptionFailed)));
    }

    #[test]
    fn test_tampered_ciphertext_detected_or_garbled() {
        let key = test_key(13);
        let iv = [14u8; IV_LEN];
        let plaintext = b"tamper with me and see what happens";

        let mut ciphertext = encrypt(&key, &iv, plaintext);
        ciphertext[0] ^= 0xFF;

        match decrypt(&key, &iv, &ciphertext) {
            Err(_) => {}
            Ok(garbage) => assert_ne!(garbage, plaintext),
        }
    }
}
