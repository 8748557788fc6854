//! Error types for lockbox.
//!
//! Errors are grouped by the component that raises them and folded into a
//! single [`Error`] through `#[from]` conversions. Callers that need to branch
//! on the failure category use [`Error::kind`] instead of matching strings.

use std::path::PathBuf;

use thiserror::Error;

/// Top-level error type.
#[derive(Error, Debug)]
pub enum Error {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cipher(#[from] CipherError),

    #[error(transparent)]
    Key(#[from] KeyError),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Secret(#[from] SecretError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Session(#[from] SessionError),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("prompt failed: {0}")]
    Prompt(#[from] dialoguer::Error),
}

/// Store file errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("invalid store file: {0}")]
    Malformed(#[source] serde_json::Error),

    #[error("invalid store file: {} is empty", .0.display())]
    Empty(PathBuf),

    #[error("failed to read store file {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write store file {}: {source}", path.display())]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Cryptographic primitive errors.
#[derive(Error, Debug)]
pub enum CipherError {
    #[error("decryption failed: {0}")]
    DecryptionFailed(String),

    #[error("encryption failed: {0}")]
    EncryptionFailed(String),

    #[error(
        "encryption failed: store is {size} bytes but this key can encrypt at most {max} bytes"
    )]
    PayloadTooLarge { size: usize, max: usize },
}

/// Key file errors.
#[derive(Error, Debug)]
pub enum KeyError {
    #[error("failed to read key file {}: {source}", path.display())]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid {kind} key file {}: {reason}", path.display())]
    InvalidFormat {
        path: PathBuf,
        kind: &'static str,
        reason: String,
    },

    #[error("no {0} key path provided")]
    NotProvided(&'static str),
}

/// Input validation errors.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("key cannot be empty")]
    EmptyKey,

    #[error("invalid key '{0}': cannot start or end with a space")]
    SurroundingSpace(String),

    #[error(
        "invalid key '{key}': invalid character '{ch}' at position {position}. Only letters, digits, space, underscore and hyphen are allowed"
    )]
    InvalidCharacter {
        key: String,
        ch: char,
        position: usize,
    },
}

/// Secret lookup errors.
#[derive(Error, Debug)]
pub enum SecretError {
    #[error("key not found: {0}")]
    NotFound(String),
}

/// Settings file errors.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse config {}: {source}", path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: toml::de::Error,
    },
}

/// Session lifecycle errors.
#[derive(Error, Debug)]
pub enum SessionError {
    #[error("session already ended ({0})")]
    Ended(&'static str),
}

/// Failure category, independent of the component that raised it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The store file exists but cannot be read as a store.
    InvalidStoreFile,
    /// The cipher rejected the ciphertext/key pair.
    DecryptionFailure,
    /// A supplied key file is missing or does not parse.
    InvalidKeyFile,
    /// Encryption failed, including payload-too-large.
    EncryptionFailure,
    /// A key failed the format rule.
    Validation,
    /// Delete or lookup of an absent key.
    NotFound,
    /// Operation attempted on an ended session.
    SessionEnded,
    Config,
    Io,
    Prompt,
}

impl Error {
    /// Category of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::Store(StoreError::WriteFailed { .. }) => ErrorKind::Io,
            Error::Store(_) => ErrorKind::InvalidStoreFile,
            Error::Cipher(CipherError::DecryptionFailed(_)) => ErrorKind::DecryptionFailure,
            Error::Cipher(_) => ErrorKind::EncryptionFailure,
            Error::Key(_) => ErrorKind::InvalidKeyFile,
            Error::Validation(_) => ErrorKind::Validation,
            Error::Secret(SecretError::NotFound(_)) => ErrorKind::NotFound,
            Error::Session(_) => ErrorKind::SessionEnded,
            Error::Config(_) => ErrorKind::Config,
            Error::Io(_) => ErrorKind::Io,
            Error::Prompt(_) => ErrorKind::Prompt,
        }
    }

    /// Process exit code when this error ends the program.
    ///
    /// Load failures use dedicated codes: `2` for an unusable store file or
    /// private key, `3` for a decryption failure. Everything else exits `1`.
    pub fn exit_code(&self) -> i32 {
        match self.kind() {
            ErrorKind::InvalidStoreFile | ErrorKind::InvalidKeyFile => 2,
            ErrorKind::DecryptionFailure => 3,
            _ => 1,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
