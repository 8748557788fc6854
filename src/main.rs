//! Lockbox - a single-user secret store encrypted at rest.

use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use lockbox::cli::output;
use lockbox::cli::{execute, Cli};
use lockbox::core::constants;
use lockbox::error::{Error, ErrorKind};

fn main() {
    let cli = Cli::parse();

    // Initialize tracing subscriber with env-filter support
    let filter = EnvFilter::try_from_env(constants::LOG_ENV).unwrap_or_else(|_| {
        if cli.verbose {
            EnvFilter::new("lockbox=debug")
        } else {
            EnvFilter::new("lockbox=warn")
        }
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(
            fmt::layer()
                .with_target(false)
                .without_time()
                .with_writer(std::io::stderr),
        )
        .init();

    output::init();

    if let Err(e) = execute(cli) {
        output::error(&e.to_string());
        if let Some(hint) = hint(&e) {
            output::hint(hint);
        }
        std::process::exit(e.exit_code());
    }
}

fn hint(e: &Error) -> Option<&'static str> {
    match e.kind() {
        ErrorKind::DecryptionFailure => Some("check that the private key matches the store"),
        ErrorKind::InvalidKeyFile => Some("expected an RSA private key in PEM or DER format"),
        ErrorKind::InvalidStoreFile => Some("the store must be a JSON object of strings"),
        _ => None,
    }
}
