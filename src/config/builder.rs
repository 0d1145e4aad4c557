use crate::config::{merge::Merge, types::*};
use crate::constants::{DB_PASSWORD_ENV, DEFAULT_VERSION_TABLE};
use crate::error::ConfigError;
use std::path::{Path, PathBuf};

pub struct ConfigBuilder {
    config_input: ConfigInput,
    base_dir: PathBuf,
}

impl ConfigBuilder {
    pub fn new() -> Self {
        Self {
            config_input: ConfigInput::default(),
            base_dir: PathBuf::from("."),
        }
    }

    /// Directory relative `migrations_dir` values are resolved against,
    /// normally the one holding the config file
    pub fn with_base_dir(mut self, base_dir: impl Into<PathBuf>) -> Self {
        self.base_dir = base_dir.into();
        self
    }

    pub fn with_file(mut self, file_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(file_input);
        self
    }

    pub fn with_cli_args(mut self, cli_input: ConfigInput) -> Self {
        self.config_input = self.config_input.merge(cli_input);
        self
    }

    /// Set a single key. Keys are write-once: setting one that already holds
    /// a value fails with `DuplicateKey`.
    pub fn put(mut self, key: &str, value: impl Into<String>) -> Result<Self, ConfigError> {
        let key: ConfigKey = key.parse()?;
        let slot = self.slot(key);
        if slot.is_some() {
            return Err(ConfigError::DuplicateKey(key.to_string()));
        }
        *slot = Some(value.into());
        Ok(self)
    }

    fn slot(&mut self, key: ConfigKey) -> &mut Option<String> {
        match key {
            ConfigKey::DbHost => &mut self.database_input().host,
            ConfigKey::DbUser => &mut self.database_input().user,
            ConfigKey::DbPassword => &mut self.database_input().password,
            ConfigKey::DbName => &mut self.database_input().name,
            ConfigKey::DbVersionTable => &mut self.database_input().version_table,
            ConfigKey::MigrationsDir => &mut self.config_input.migrations_dir,
        }
    }

    fn database_input(&mut self) -> &mut DatabaseInput {
        self.config_input
            .database
            .get_or_insert_with(Default::default)
    }

    pub fn resolve(self) -> Result<Config, ConfigError> {
        let db_input = self.config_input.database.clone().unwrap_or_default();

        let database = Database {
            host: required(ConfigKey::DbHost, db_input.host)?,
            user: required(ConfigKey::DbUser, db_input.user)?,
            password: required(
                ConfigKey::DbPassword,
                db_input
                    .password
                    .or_else(|| std::env::var(DB_PASSWORD_ENV).ok()),
            )?,
            name: required(ConfigKey::DbName, db_input.name)?,
            version_table: db_input
                .version_table
                .filter(|t| !t.is_empty())
                .unwrap_or_else(|| DEFAULT_VERSION_TABLE.to_string()),
        };

        let migrations_dir = required(
            ConfigKey::MigrationsDir,
            self.config_input.migrations_dir.clone(),
        )?;

        Ok(Config {
            database,
            migrations_dir: self.resolve_migrations_dir(&migrations_dir)?,
        })
    }

    fn resolve_migrations_dir(&self, migrations_dir: &str) -> Result<PathBuf, ConfigError> {
        let joined = self.base_dir.join(migrations_dir);
        std::path::absolute(&joined).map_err(|source| ConfigError::InvalidPath {
            path: joined.clone(),
            source,
        })
    }
}

impl Default for ConfigBuilder {
    fn default() -> Self {
        Self::new()
    }
}

// Present is enough: an empty password is a valid setting.
fn required(key: ConfigKey, value: Option<String>) -> Result<String, ConfigError> {
    value.ok_or_else(|| ConfigError::MissingRequired {
        key: key.to_string(),
    })
}

/// Build a config directly from values, without any file or CLI layer.
///
/// `db_version_table` falls back to `__db_version__` when `None`.
pub fn in_place_config(
    db_host: &str,
    db_user: &str,
    db_password: &str,
    db_name: &str,
    migrations_dir: &Path,
    db_version_table: Option<&str>,
) -> Result<Config, ConfigError> {
    let mut builder = ConfigBuilder::new()
        .put("db_host", db_host)?
        .put("db_user", db_user)?
        .put("db_password", db_password)?
        .put("db_name", db_name)?
        .put("migrations_dir", migrations_dir.display().to_string())?;

    if let Some(table) = db_version_table {
        builder = builder.put("db_version_table", table)?;
    }

    builder.resolve()
}
