//! Store serialization and encryption.
//!
//! A store is serialized as a UTF-8 JSON object of string values. The
//! encrypted form is the RSA-OAEP ciphertext of that JSON with no header, so
//! the whole serialized store must fit in one OAEP block.

use rsa::{RsaPrivateKey, RsaPublicKey};
use tracing::{debug, trace};
use zeroize::Zeroizing;

use crate::core::cipher::{self, Cipher, RsaOaep};
use crate::core::detect::StoreFormat;
use crate::core::state::Store;
use crate::error::{CipherError, Result, StoreError};

/// Re-encryption attempts before giving up on an unambiguous ciphertext.
/// Each attempt starts with `{` with probability below 1/128.
const MAX_ENCRYPT_ATTEMPTS: u32 = 16;

/// Parse plaintext store bytes.
///
/// # Errors
///
/// Returns `StoreError::Malformed` unless the bytes are a JSON object whose
/// values are all strings.
pub fn parse_plaintext(bytes: &[u8]) -> Result<Store> {
    let store: Store = serde_json::from_slice(bytes).map_err(StoreError::Malformed)?;
    debug!(entries = store.len(), "parsed store");
    Ok(store)
}

/// Serialize a store to its JSON bytes.
pub fn to_json(store: &Store) -> Result<Zeroizing<Vec<u8>>> {
    let bytes = serde_json::to_vec(store).map_err(StoreError::Malformed)?;
    Ok(Zeroizing::new(bytes))
}

/// Decrypt store file bytes and parse the result.
///
/// # Errors
///
/// Returns `CipherError::DecryptionFailed` if the key does not match or the
/// ciphertext is corrupted, and `StoreError::Malformed` if decryption
/// succeeds but the plaintext is not a serialized store.
pub fn decrypt(file_bytes: &[u8], private_key: &RsaPrivateKey) -> Result<Store> {
    let plaintext = cipher::decrypt(file_bytes, private_key)?;
    parse_plaintext(&plaintext)
}

/// Serialize a store and encrypt it.
///
/// OAEP output is randomized, so a ciphertext that would be sniffed as
/// plaintext (first byte `{`) is discarded and the payload re-encrypted.
/// Files written here always classify as encrypted.
///
/// # Errors
///
/// Returns `CipherError::PayloadTooLarge` when the serialized store exceeds
/// [`capacity`] for this key, or `CipherError::EncryptionFailed` for any
/// other primitive failure.
pub fn encrypt(store: &Store, public_key: &RsaPublicKey) -> Result<Vec<u8>> {
    let json = to_json(store)?;
    debug!(
        cipher = RsaOaep.name(),
        entries = store.len(),
        payload_len = json.len(),
        capacity = capacity(public_key),
        "encrypting store"
    );

    for attempt in 1..=MAX_ENCRYPT_ATTEMPTS {
        let ciphertext = cipher::encrypt(&json, public_key)?;
        if StoreFormat::detect(&ciphertext) == StoreFormat::Encrypted {
            return Ok(ciphertext);
        }
        trace!(attempt, "ciphertext starts with '{{', re-encrypting");
    }

    Err(CipherError::EncryptionFailed(
        "could not produce ciphertext distinguishable from plaintext".to_string(),
    )
    .into())
}

/// Maximum serialized store size, in bytes, that `public_key` can encrypt.
pub fn capacity(public_key: &RsaPublicKey) -> usize {
    cipher::max_plaintext_len(public_key)
}
