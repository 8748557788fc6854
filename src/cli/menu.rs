//! Interactive menu loop.
//!
//! Drives a [`Session`] from prompt answers until the user saves or quits.
//! Validation and not-found problems are reported inline; save failures are
//! reported and the loop continues with the store unchanged.

use std::path::{Path, PathBuf};

use tracing::debug;
use zeroize::Zeroizing;

use crate::cli::output;
use crate::cli::prompt::Prompt;
use crate::core::config::expand_home;
use crate::core::session::{Phase, Session};
use crate::core::validation::validate_key;
use crate::error::{CipherError, Error, ErrorKind, Result};

/// Menu entries in display order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    List,
    Set,
    Delete,
    Save,
    Quit,
}

impl Action {
    pub const ALL: [Action; 5] = [
        Action::List,
        Action::Set,
        Action::Delete,
        Action::Save,
        Action::Quit,
    ];

    /// Menu label. The first word doubles as the typed command.
    pub fn label(&self) -> &'static str {
        match self {
            Self::List => "List entries",
            Self::Set => "Set a value",
            Self::Delete => "Delete a key",
            Self::Save => "Save encrypted and exit",
            Self::Quit => "Quit without saving",
        }
    }
}

/// How the loop ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Saved,
    Quit,
}

/// Run the menu until a terminal action.
///
/// `public_key` is offered as the default answer to the public key prompt.
///
/// # Errors
///
/// Returns an error only for failures that cannot be reported inline, such
/// as a broken terminal.
pub fn run(
    session: &mut Session,
    prompt: &mut dyn Prompt,
    public_key: Option<&Path>,
) -> Result<Outcome> {
    let labels: Vec<&str> = Action::ALL.iter().map(Action::label).collect();

    loop {
        let Some(index) = prompt.select("Choose an action", &labels)? else {
            return Ok(quit(session));
        };
        let action = Action::ALL[index];
        debug!(?action, "menu action");

        let finished = match action {
            Action::List => {
                list(session);
                false
            }
            Action::Set => set(session, prompt)?,
            Action::Delete => delete(session, prompt)?,
            Action::Save => save(session, prompt, public_key)?,
            Action::Quit => return Ok(quit(session)),
        };

        if finished {
            return Ok(match session.phase() {
                Phase::Saved => Outcome::Saved,
                _ => quit(session),
            });
        }
    }
}

fn list(session: &Session) {
    let store = session.store();
    if store.is_empty() {
        output::dimmed("store is empty");
        return;
    }

    output::section(&format!("Entries ({})", store.len()));
    for key in store.keys() {
        output::kv(key, store.get(key).unwrap_or_default());
    }
}

/// Returns `true` when input ran out.
fn set(session: &mut Session, prompt: &mut dyn Prompt) -> Result<bool> {
    let Some(key) = prompt.input("Key", None)? else {
        return Ok(true);
    };
    if let Err(e) = validate_key(&key) {
        output::error(&e.to_string());
        return Ok(false);
    }

    let Some(value) = prompt.secret(&format!("Value for {}", key))?.map(Zeroizing::new) else {
        return Ok(true);
    };

    match session.set(&key, &value) {
        Ok(outcome) if outcome.is_overwrite() => {
            output::warn(&format!("overwrote existing value for {}", output::key(&key)));
        }
        Ok(_) => output::success(&format!("set {}", output::key(&key))),
        Err(e) => output::error(&e.to_string()),
    }
    Ok(false)
}

/// Returns `true` when input ran out.
fn delete(session: &mut Session, prompt: &mut dyn Prompt) -> Result<bool> {
    let Some(key) = prompt.input("Key to delete", None)? else {
        return Ok(true);
    };

    match session.delete(&key) {
        Ok(_) => output::success(&format!("deleted {}", output::key(&key))),
        Err(e) if e.kind() == ErrorKind::NotFound => output::warn(&e.to_string()),
        Err(e) => output::error(&e.to_string()),
    }
    Ok(false)
}

/// Returns `true` when the session ended, by saving or by running out of
/// input.
fn save(session: &mut Session, prompt: &mut dyn Prompt, default: Option<&Path>) -> Result<bool> {
    let default = default.map(|p| p.display().to_string());
    let Some(answer) = prompt.input("Public key path", default.as_deref())? else {
        return Ok(true);
    };
    if answer.trim().is_empty() {
        output::error("no public key path given");
        return Ok(false);
    }

    let key_path = expand_home(&PathBuf::from(answer.trim()));
    match session.save(&key_path) {
        Ok(bytes) => {
            output::success(&format!(
                "saved {} ({} entries, {} bytes encrypted)",
                output::path(session.path()),
                session.store().len(),
                bytes
            ));
            Ok(true)
        }
        Err(e) if is_recoverable(&e) => {
            output::error(&e.to_string());
            if let Some(hint) = save_hint(&e) {
                output::hint(hint);
            }
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

fn quit(session: &mut Session) -> Outcome {
    if session.phase() == Phase::Mutating {
        output::warn("unsaved changes discarded");
    } else {
        output::dimmed("exited without saving");
    }
    session.exit_without_saving();
    Outcome::Quit
}

/// Save failures the user can fix and retry.
fn is_recoverable(err: &Error) -> bool {
    matches!(
        err.kind(),
        ErrorKind::InvalidKeyFile | ErrorKind::EncryptionFailure | ErrorKind::Io
    )
}

fn save_hint(err: &Error) -> Option<&'static str> {
    match err {
        Error::Cipher(CipherError::PayloadTooLarge { .. }) => {
            Some("delete some entries or save with a larger key")
        }
        _ if err.kind() == ErrorKind::InvalidKeyFile => {
            Some("expected an RSA public key in PEM or DER format")
        }
        _ => None,
    }
}
