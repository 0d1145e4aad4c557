use std::path::PathBuf;
use thiserror::Error;

/// Failures raised while building or reading the configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("invalid configuration key ('{0}')")]
    KeyNotFound(String),

    #[error("the configuration key '{0}' already exists and cannot be overridden")]
    DuplicateKey(String),

    #[error("unknown configuration key '{0}'")]
    UnknownKey(String),

    #[error("config file error: '{key}' is not defined")]
    MissingRequired { key: String },

    #[error("could not read config file ({}): {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("cannot resolve path '{}': {source}", .path.display())]
    InvalidPath {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("config file is not valid YAML ({}): {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_yaml::Error,
    },
}

/// Failures raised by migration discovery, parsing and scaffolding
#[derive(Error, Debug)]
pub enum MigrationError {
    #[error("directory not found ('{}')", .0.display())]
    DirectoryNotFound(PathBuf),

    #[error("no migration files found ('{}')", .0.display())]
    NoMigrationsFound(PathBuf),

    #[error(
        "invalid migration name; it should contain only letters, numbers and/or underscores ('{0}')"
    )]
    InvalidName(String),

    #[error("invalid migration timestamp; it should be 14 digits ('{0}')")]
    InvalidTimestamp(String),

    #[error("migration file does not exist ({})", .0.display())]
    NotFound(PathBuf),

    #[error("migration file is incorrect; it does not define '{directive}' ({})", .path.display())]
    MissingDirective { path: PathBuf, directive: String },

    #[error("migration command '{directive}' is empty ({})", .path.display())]
    EmptyBody { path: PathBuf, directive: String },

    #[error("migration file is malformed at line {line}: {reason} ({})", .path.display())]
    MalformedFile {
        path: PathBuf,
        line: usize,
        reason: String,
    },

    #[error("could not create file ('{}'): {source}", .path.display())]
    FileWrite {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("could not read '{}': {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

pub type Result<T, E = MigrationError> = std::result::Result<T, E>;
