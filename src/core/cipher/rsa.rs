//! RSA-OAEP encryption backend implementation.
//!
//! Encrypts the whole payload directly with the public key using OAEP
//! padding, with SHA-256 as both the label hash and the MGF1 hash. There is
//! no symmetric layer, so the payload is capped at `k - 2*hLen - 2` bytes
//! where `k` is the modulus size in bytes.

use ::rsa::traits::PublicKeyParts;
use ::rsa::{Oaep, RsaPrivateKey, RsaPublicKey};
use sha2::{Digest, Sha256};
use tracing::trace;
use zeroize::Zeroizing;

use super::Cipher;
use crate::error::{CipherError, Result};

/// RSA-OAEP(SHA-256) backend.
pub struct RsaOaep;

impl RsaOaep {
    fn padding() -> Oaep {
        Oaep::new::<Sha256>()
    }
}

impl Cipher for RsaOaep {
    type PublicKey = RsaPublicKey;
    type PrivateKey = RsaPrivateKey;

    fn name(&self) -> &'static str {
        "rsa-oaep-sha256"
    }

    fn max_plaintext_len(&self, key: &RsaPublicKey) -> usize {
        key.size().saturating_sub(2 * <Sha256 as Digest>::output_size() + 2)
    }

    fn encrypt(&self, plaintext: &[u8], key: &RsaPublicKey) -> Result<Vec<u8>> {
        let max = self.max_plaintext_len(key);
        trace!(
            plaintext_len = plaintext.len(),
            max_len = max,
            modulus_bits = key.size() * 8,
            "encrypting"
        );

        if plaintext.len() > max {
            return Err(CipherError::PayloadTooLarge {
                size: plaintext.len(),
                max,
            }
            .into());
        }

        let mut rng = rand::thread_rng();
        let encrypted = key
            .encrypt(&mut rng, Self::padding(), plaintext)
            .map_err(|e| match e {
                ::rsa::Error::MessageTooLong => CipherError::PayloadTooLarge {
                    size: plaintext.len(),
                    max,
                },
                other => CipherError::EncryptionFailed(other.to_string()),
            })?;

        trace!(ciphertext_len = encrypted.len(), "encrypted");
        Ok(encrypted)
    }

    fn decrypt(&self, ciphertext: &[u8], key: &RsaPrivateKey) -> Result<Zeroizing<Vec<u8>>> {
        trace!(ciphertext_len = ciphertext.len(), "decrypting");

        let decrypted = key
            .decrypt(Self::padding(), ciphertext)
            .map_err(|e| CipherError::DecryptionFailed(e.to_string()))?;

        trace!(plaintext_len = decrypted.len(), "decrypted");
        Ok(Zeroizing::new(decrypted))
    }
}
