//! In-memory store state.
//!
//! [`StoreState`] is the only mutation path for a [`Store`]: callers read
//! through [`StoreState::get`] or an owned [`StoreState::snapshot`], and write
//! through [`StoreState::set`] and [`StoreState::delete`].

use indexmap::IndexMap;
use tracing::debug;
use zeroize::{Zeroize, Zeroizing};

use crate::core::validation::validate_key;
use crate::error::{Result, SecretError};

/// Key/value mapping in insertion order.
pub type Store = IndexMap<String, String>;

/// Result of [`StoreState::set`].
#[derive(Debug, PartialEq, Eq)]
pub enum SetOutcome {
    /// The key was new.
    Inserted,
    /// The key existed; its previous value was replaced.
    Overwritten { previous: Zeroizing<String> },
}

impl SetOutcome {
    /// Whether an existing value was replaced.
    pub fn is_overwrite(&self) -> bool {
        matches!(self, Self::Overwritten { .. })
    }
}

/// Owned store contents with CRUD semantics.
///
/// Values are wiped from memory when overwritten, deleted, or when the
/// state is dropped.
#[derive(Default)]
pub struct StoreState {
    entries: Store,
}

impl std::fmt::Debug for StoreState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreState")
            .field("keys", &self.entries.keys().collect::<Vec<_>>())
            .finish()
    }
}

impl StoreState {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Take ownership of a loaded store.
    ///
    /// Keys are not re-validated; the file is the source of truth for what
    /// it already contains.
    pub fn from_store(entries: Store) -> Self {
        Self { entries }
    }

    /// Set a value, inserting or overwriting.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if the key breaks the key format rule. The
    /// store is unchanged in that case.
    pub fn set(&mut self, key: &str, value: &str) -> Result<SetOutcome> {
        validate_key(key)?;

        let outcome = match self.entries.insert(key.to_string(), value.to_string()) {
            Some(previous) => SetOutcome::Overwritten {
                previous: Zeroizing::new(previous),
            },
            None => SetOutcome::Inserted,
        };

        debug!(key, overwrite = outcome.is_overwrite(), "set");
        Ok(outcome)
    }

    /// Remove a key and return its value.
    ///
    /// # Errors
    ///
    /// Returns `SecretError::NotFound` if the key is absent. The store is
    /// unchanged in that case.
    pub fn delete(&mut self, key: &str) -> Result<Zeroizing<String>> {
        let value = self
            .entries
            .shift_remove(key)
            .ok_or_else(|| SecretError::NotFound(key.to_string()))?;

        debug!(key, "deleted");
        Ok(Zeroizing::new(value))
    }

    /// Look up a value.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Owned copy of the full mapping, for display.
    pub fn snapshot(&self) -> Store {
        self.entries.clone()
    }

    /// Keys in insertion order.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.entries.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Borrow the mapping for serialization.
    pub(crate) fn entries(&self) -> &Store {
        &self.entries
    }
}

impl Drop for StoreState {
    fn drop(&mut self) {
        for value in self.entries.values_mut() {
            value.zeroize();
        }
    }
}
