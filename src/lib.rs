//! Lockbox - a single-user, file-backed secret store.
//!
//! # Architecture
//!
//! ```text
//! src/
//! ├── cli/              # Command-line interface
//! │   ├── menu          # Interactive menu loop
//! │   ├── prompt        # Terminal and piped-stdin prompts
//! │   └── output        # Styled terminal output
//! └── core/             # Core library components
//!     ├── validation    # Key format rule
//!     ├── detect        # Plaintext/encrypted classification
//!     ├── cipher/       # Encryption backends
//!     │   ├── mod       # Cipher trait
//!     │   └── rsa       # RSA-OAEP (SHA-256) implementation
//!     ├── keys          # RSA key file loading
//!     ├── codec         # Store (de)serialization and encryption
//!     ├── state         # In-memory store with CRUD semantics
//!     ├── session       # Load/mutate/save lifecycle
//!     └── config        # Optional settings file
//! ```
//!
//! # Storage format
//!
//! A store file is either a plaintext JSON object of strings, or the raw
//! RSA-OAEP ciphertext of that JSON. There is no header: content starting
//! with `{` is treated as plaintext. Because the whole store is encrypted in
//! a single OAEP block, its serialized size is bounded by the key size
//! (190 bytes for a 2048-bit key).

pub mod cli;
pub mod core;
pub mod error;
