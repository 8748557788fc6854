//! Command-line interface.

pub mod menu;
pub mod output;
pub mod prompt;

use std::path::PathBuf;

use clap::Parser;
use tracing::debug;

use crate::core::config::{expand_home, Config};
use crate::core::session::{Origin, Session};
use crate::error::{KeyError, Result};

/// Lockbox - a single-user secret store encrypted at rest with RSA-OAEP.
#[derive(Parser, Debug)]
#[command(
    name = "lockbox",
    about = "A single-user secret store encrypted at rest with RSA-OAEP",
    version,
    after_help = "Exit codes: 0 ok, 2 invalid store file, 3 decryption failed"
)]
pub struct Cli {
    /// Path to the store file (created on first save if missing)
    pub store: PathBuf,

    /// Private key used to decrypt an encrypted store
    #[arg(long, env = "LOCKBOX_PRIVATE_KEY", value_name = "PATH")]
    pub private_key: Option<PathBuf>,

    /// Public key offered as the default when saving
    #[arg(long, env = "LOCKBOX_PUBLIC_KEY", value_name = "PATH")]
    pub public_key: Option<PathBuf>,

    /// Settings file (default: <config dir>/lockbox/config.toml)
    #[arg(long, env = "LOCKBOX_CONFIG", value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long)]
    pub verbose: bool,
}

/// Run an interactive session on the store file.
///
/// # Errors
///
/// Returns load failures (invalid store file, unusable private key,
/// decryption failure) and unrecoverable prompt errors. Save failures are
/// handled inside the menu.
pub fn execute(cli: Cli) -> Result<()> {
    let config = Config::load(cli.config.as_deref())?;
    let private_key = cli
        .private_key
        .map(|p| expand_home(&p))
        .or_else(|| config.private_key());
    let public_key = cli
        .public_key
        .map(|p| expand_home(&p))
        .or_else(|| config.public_key());

    // Dropped on every return path, including load failures.
    let mut prompt = prompt::from_stdin();

    let mut session = Session::open(&cli.store, || match private_key {
        Some(path) => Ok(path),
        None => {
            output::dimmed("store is encrypted");
            match prompt.input("Private key path", None)? {
                Some(answer) if !answer.trim().is_empty() => {
                    Ok(expand_home(&PathBuf::from(answer.trim())))
                }
                _ => Err(KeyError::NotProvided("private").into()),
            }
        }
    })?;

    let summary = match session.origin() {
        Origin::New => "new store".to_string(),
        Origin::Plaintext => format!("{} entries (plaintext)", session.store().len()),
        Origin::Decrypted => format!("{} entries (decrypted)", session.store().len()),
    };
    output::success(&format!("opened {}: {}", output::path(session.path()), summary));

    let outcome = menu::run(&mut session, prompt.as_mut(), public_key.as_deref())?;
    debug!(?outcome, phase = ?session.phase(), "session finished");
    Ok(())
}
