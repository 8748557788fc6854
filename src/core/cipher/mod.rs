//! Cryptographic operations.
//!
//! Provides the encryption/decryption abstraction used by the store codec.
//! The only backend is RSA-OAEP with SHA-256, which encrypts the serialized
//! store in one block and therefore bounds store size by key size.

use ::rsa::{RsaPrivateKey, RsaPublicKey};
use zeroize::Zeroizing;

use crate::error::Result;

mod rsa;

pub use self::rsa::RsaOaep;

/// Cryptographic backend trait.
///
/// Abstracts the asymmetric primitive so the codec does not depend on a
/// specific padding scheme or key type.
pub trait Cipher {
    /// Key used for encryption.
    type PublicKey;

    /// Key used for decryption.
    type PrivateKey;

    /// Encrypt a complete payload.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::PayloadTooLarge` if the payload exceeds
    /// [`Cipher::max_plaintext_len`], or `CipherError::EncryptionFailed` for
    /// any other primitive failure.
    fn encrypt(&self, plaintext: &[u8], key: &Self::PublicKey) -> Result<Vec<u8>>;

    /// Decrypt a complete payload.
    ///
    /// # Errors
    ///
    /// Returns `CipherError::DecryptionFailed` if the ciphertext and key do
    /// not match, or the ciphertext is corrupted.
    fn decrypt(&self, ciphertext: &[u8], key: &Self::PrivateKey) -> Result<Zeroizing<Vec<u8>>>;

    /// Largest payload, in bytes, that `encrypt` accepts for this key.
    fn max_plaintext_len(&self, key: &Self::PublicKey) -> usize;

    /// Backend name for display/logging.
    fn name(&self) -> &'static str;
}

/// Encrypt a payload with the default RSA-OAEP backend.
///
/// This is a convenience wrapper around `RsaOaep::encrypt`.
pub fn encrypt(plaintext: &[u8], key: &RsaPublicKey) -> Result<Vec<u8>> {
    RsaOaep.encrypt(plaintext, key)
}

/// Decrypt a payload with the default RSA-OAEP backend.
///
/// This is a convenience wrapper around `RsaOaep::decrypt`.
pub fn decrypt(ciphertext: &[u8], key: &RsaPrivateKey) -> Result<Zeroizing<Vec<u8>>> {
    RsaOaep.decrypt(ciphertext, key)
}

/// Largest payload the default backend can encrypt with `key`.
pub fn max_plaintext_len(key: &RsaPublicKey) -> usize {
    RsaOaep.max_plaintext_len(key)
}
