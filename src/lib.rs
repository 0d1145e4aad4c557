//! Versioned database schema migrations kept as plain `.migration` files.
//!
//! The [`migration::MigrationRepository`] scans a migrations directory,
//! orders the files by their 14-digit version prefix, reads the `SQL_UP` /
//! `SQL_DOWN` bodies and scaffolds new files. [`config`] resolves where that
//! directory lives along with the database settings a runner needs.

pub mod commands;
pub mod config;
pub mod constants;
pub mod error;
pub mod migration;
pub mod prompts;

pub use error::{ConfigError, MigrationError};
