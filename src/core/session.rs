//! Session lifecycle.
//!
//! A [`Session`] owns the store for one run of the program and enforces the
//! lifecycle:
//!
//! ```text
//! open ──> Loaded ──> Mutating* ──> Saved               (terminal)
//!   │                          └──> ExitedWithoutSaving (terminal)
//!   └── load failure: no session is created (aborted)
//! ```
//!
//! Loading either fully succeeds or returns an error; a session never
//! starts from a partially read store. Save failures leave the session and
//! its store untouched so the caller can retry with another key.

use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use rsa::RsaPublicKey;
use tempfile::NamedTempFile;
use tracing::{debug, info};
use zeroize::Zeroizing;

use crate::core::codec;
use crate::core::detect::{FormatDetector, LeadingBrace, StoreFormat};
use crate::core::keys;
use crate::core::state::{SetOutcome, StoreState};
use crate::error::{Result, SessionError, StoreError};

/// Where the session's initial store came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Origin {
    /// The store file did not exist.
    New,
    /// Parsed from a plaintext store file.
    Plaintext,
    /// Decrypted from an encrypted store file.
    Decrypted,
}

/// Lifecycle phase of a live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Loaded(Origin),
    Mutating,
    Saved,
    ExitedWithoutSaving,
}

impl Phase {
    /// Whether the session has ended.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Saved | Self::ExitedWithoutSaving)
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Loaded(_) => "loaded",
            Self::Mutating => "mutating",
            Self::Saved => "saved",
            Self::ExitedWithoutSaving => "exited without saving",
        }
    }
}

/// The session context: the store file path, the in-memory store and the
/// lifecycle phase.
#[derive(Debug)]
pub struct Session {
    path: PathBuf,
    origin: Origin,
    phase: Phase,
    state: StoreState,
}

impl Session {
    /// Open a store file with the default format detector.
    ///
    /// `private_key` is called only when the file is encrypted and must
    /// return the path of the private key to decrypt it with.
    ///
    /// # Errors
    ///
    /// - `StoreError` if the file cannot be read, is empty, or does not
    ///   parse as a store (before or after decryption)
    /// - `KeyError` if the private key file is unreadable or invalid
    /// - `CipherError::DecryptionFailed` if decryption is rejected
    pub fn open<F>(path: impl Into<PathBuf>, private_key: F) -> Result<Self>
    where
        F: FnOnce() -> Result<PathBuf>,
    {
        Self::open_with(path, &LeadingBrace, private_key)
    }

    /// Open a store file with a specific format detector.
    ///
    /// # Errors
    ///
    /// See [`Session::open`].
    pub fn open_with<D, F>(path: impl Into<PathBuf>, detector: &D, private_key: F) -> Result<Self>
    where
        D: FormatDetector + ?Sized,
        F: FnOnce() -> Result<PathBuf>,
    {
        let path = path.into();
        debug!(path = %path.display(), "opening store");

        let bytes = match fs::read(&path) {
            Ok(bytes) => Zeroizing::new(bytes),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                info!(path = %path.display(), "store file does not exist, starting empty");
                return Ok(Self::from_parts(path, StoreState::new(), Origin::New));
            }
            Err(source) => return Err(StoreError::ReadFailed { path, source }.into()),
        };

        if bytes.is_empty() {
            return Err(StoreError::Empty(path).into());
        }

        let format = detector.classify(&bytes);
        debug!(format = format.display_name(), len = bytes.len(), "detected store format");

        let (store, origin) = match format {
            StoreFormat::Plaintext => (codec::parse_plaintext(&bytes)?, Origin::Plaintext),
            StoreFormat::Encrypted => {
                let key_path = private_key()?;
                let key = keys::load_private_key(&key_path)?;
                (codec::decrypt(&bytes, &key)?, Origin::Decrypted)
            }
        };

        info!(entries = store.len(), origin = ?origin, "store loaded");
        Ok(Self::from_parts(path, StoreState::from_store(store), origin))
    }

    fn from_parts(path: PathBuf, state: StoreState, origin: Origin) -> Self {
        Self {
            path,
            origin,
            phase: Phase::Loaded(origin),
            state,
        }
    }

    /// Store file path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// How the store was loaded.
    pub fn origin(&self) -> Origin {
        self.origin
    }

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Read-only view of the store.
    pub fn store(&self) -> &StoreState {
        &self.state
    }

    /// Set a value. See [`StoreState::set`].
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Ended` after a terminal transition, or
    /// `ValidationError` for an invalid key.
    pub fn set(&mut self, key: &str, value: &str) -> Result<SetOutcome> {
        self.ensure_active()?;
        let outcome = self.state.set(key, value)?;
        self.phase = Phase::Mutating;
        Ok(outcome)
    }

    /// Delete a key. See [`StoreState::delete`].
    ///
    /// # Errors
    ///
    /// Returns `SessionError::Ended` after a terminal transition, or
    /// `SecretError::NotFound` if the key is absent.
    pub fn delete(&mut self, key: &str) -> Result<Zeroizing<String>> {
        self.ensure_active()?;
        let value = self.state.delete(key)?;
        self.phase = Phase::Mutating;
        Ok(value)
    }

    /// Encrypt the store with the public key at `public_key` and write it
    /// over the store file. Ends the session on success.
    ///
    /// Returns the number of bytes written.
    ///
    /// # Errors
    ///
    /// Returns `KeyError` if the key file is unusable, `CipherError` if
    /// encryption fails (including a store too large for the key) and
    /// `StoreError::WriteFailed` if the file cannot be written. The session
    /// stays active in every case.
    pub fn save(&mut self, public_key: &Path) -> Result<usize> {
        self.ensure_active()?;
        let key = keys::load_public_key(public_key)?;
        self.save_with_key(&key)
    }

    /// Encrypt and write the store with an already loaded public key.
    ///
    /// # Errors
    ///
    /// See [`Session::save`].
    pub fn save_with_key(&mut self, public_key: &RsaPublicKey) -> Result<usize> {
        self.ensure_active()?;

        let ciphertext = codec::encrypt(self.state.entries(), public_key)?;
        write_store_file(&self.path, &ciphertext)?;

        info!(
            path = %self.path.display(),
            entries = self.state.len(),
            bytes = ciphertext.len(),
            "store saved"
        );
        self.phase = Phase::Saved;
        Ok(ciphertext.len())
    }

    /// End the session without writing anything.
    pub fn exit_without_saving(&mut self) {
        if !self.phase.is_terminal() {
            debug!("exiting without saving");
            self.phase = Phase::ExitedWithoutSaving;
        }
    }

    fn ensure_active(&self) -> Result<()> {
        if self.phase.is_terminal() {
            return Err(SessionError::Ended(self.phase.name()).into());
        }
        Ok(())
    }
}

/// Replace the store file atomically.
fn write_store_file(path: &Path, contents: &[u8]) -> Result<()> {
    let write_err = |source: io::Error| StoreError::WriteFailed {
        path: path.to_path_buf(),
        source,
    };

    let parent = match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() => dir,
        _ => Path::new("."),
    };

    let mut tmp = NamedTempFile::new_in(parent).map_err(write_err)?;
    tmp.write_all(contents).map_err(write_err)?;
    tmp.flush().map_err(write_err)?;

    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(
            tmp.path(),
            fs::Permissions::from_mode(crate::core::constants::STORE_FILE_MODE),
        )
        .map_err(write_err)?;
    }

    tmp.persist(path).map_err(|e| write_err(e.error))?;
    Ok(())
}
