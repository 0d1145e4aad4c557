use crate::error::ConfigError;
use clap::Args;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Raw configuration input - all fields Optional for merging
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct ConfigInput {
    pub database: Option<DatabaseInput>,
    pub migrations_dir: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct DatabaseInput {
    pub host: Option<String>,
    pub user: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
    pub version_table: Option<String>,
}

/// Resolved configuration. Built once by `ConfigBuilder` and read-only
/// afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    pub(crate) database: Database,
    pub(crate) migrations_dir: PathBuf,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Database {
    pub host: String,
    pub user: String,
    pub password: String,
    pub name: String,
    pub version_table: String,
}

impl Config {
    pub fn database(&self) -> &Database {
        &self.database
    }

    /// Absolute path of the migrations directory
    pub fn migrations_dir(&self) -> &Path {
        &self.migrations_dir
    }

    /// Look a setting up by its flat key name
    pub fn get(&self, key: &str) -> Result<String, ConfigError> {
        let key: ConfigKey = key
            .parse()
            .map_err(|_| ConfigError::KeyNotFound(key.to_string()))?;
        Ok(self.value(key))
    }

    pub fn value(&self, key: ConfigKey) -> String {
        match key {
            ConfigKey::DbHost => self.database.host.clone(),
            ConfigKey::DbUser => self.database.user.clone(),
            ConfigKey::DbPassword => self.database.password.clone(),
            ConfigKey::DbName => self.database.name.clone(),
            ConfigKey::DbVersionTable => self.database.version_table.clone(),
            ConfigKey::MigrationsDir => self.migrations_dir.display().to_string(),
        }
    }

    /// Every key with its value, in declaration order
    pub fn entries(&self) -> Vec<(ConfigKey, String)> {
        ConfigKey::ALL
            .iter()
            .map(|key| (*key, self.value(*key)))
            .collect()
    }
}

/// Flat names of the configuration settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    DbHost,
    DbUser,
    DbPassword,
    DbName,
    DbVersionTable,
    MigrationsDir,
}

impl ConfigKey {
    pub const ALL: [ConfigKey; 6] = [
        ConfigKey::DbHost,
        ConfigKey::DbUser,
        ConfigKey::DbPassword,
        ConfigKey::DbName,
        ConfigKey::DbVersionTable,
        ConfigKey::MigrationsDir,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            ConfigKey::DbHost => "db_host",
            ConfigKey::DbUser => "db_user",
            ConfigKey::DbPassword => "db_password",
            ConfigKey::DbName => "db_name",
            ConfigKey::DbVersionTable => "db_version_table",
            ConfigKey::MigrationsDir => "migrations_dir",
        }
    }

    pub fn is_secret(self) -> bool {
        self == ConfigKey::DbPassword
    }
}

impl FromStr for ConfigKey {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ConfigKey::ALL
            .iter()
            .copied()
            .find(|key| key.as_str() == s)
            .ok_or_else(|| ConfigError::UnknownKey(s.to_string()))
    }
}

impl fmt::Display for ConfigKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// CLI argument groups overriding the config file
#[derive(Debug, Clone, Default, Args)]
pub struct DatabaseArgs {
    #[arg(long, global = true, help = "Database host")]
    pub db_host: Option<String>,

    #[arg(long, global = true, help = "Database user")]
    pub db_user: Option<String>,

    #[arg(long, global = true, help = "Database password")]
    pub db_password: Option<String>,

    #[arg(long, global = true, help = "Database name")]
    pub db_name: Option<String>,

    #[arg(long, global = true, help = "Table recording applied versions")]
    pub db_version_table: Option<String>,
}

#[derive(Debug, Clone, Default, Args)]
pub struct DirectoryArgs {
    #[arg(long, global = true, help = "Migrations directory path")]
    pub migrations_dir: Option<String>,
}

// Conversion functions from CLI args to config input
impl From<DatabaseArgs> for DatabaseInput {
    fn from(args: DatabaseArgs) -> Self {
        Self {
            host: args.db_host,
            user: args.db_user,
            password: args.db_password,
            name: args.db_name,
            version_table: args.db_version_table,
        }
    }
}

impl ConfigInput {
    pub fn from_args(database_args: DatabaseArgs, directory_args: DirectoryArgs) -> Self {
        let database: DatabaseInput = database_args.into();
        Self {
            database: (database != DatabaseInput::default()).then_some(database),
            migrations_dir: directory_args.migrations_dir,
        }
    }
}
