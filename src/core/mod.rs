//! Core library components.
//!
//! This module contains the reusable logic for store encryption, parsing,
//! mutation and the session lifecycle, independent of the terminal UI.

pub mod cipher;
pub mod codec;
pub mod config;
pub mod constants;
pub mod detect;
pub mod keys;
pub mod session;
pub mod state;
pub mod validation;
