use crate::config::Config;
use crate::constants::{MIGRATION_TEMPLATE, VERSION_TIMESTAMP_FORMAT, VERSION_WIDTH};
use crate::error::{MigrationError, Result};
use crate::migration::file::{Direction, MigrationFile, read_directives, require_body};
use crate::migration::naming::{
    extract_version, generate_file_name, is_valid_file_name, is_valid_migration_name,
};
use chrono::Utc;
use std::io::Write;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// View over a migrations directory.
///
/// Holds nothing but the directory path; every query re-reads the directory,
/// so the files on disk are the only source of truth.
#[derive(Debug, Clone)]
pub struct MigrationRepository {
    migrations_dir: PathBuf,
}

impl MigrationRepository {
    pub fn new(migrations_dir: impl Into<PathBuf>) -> Self {
        Self {
            migrations_dir: migrations_dir.into(),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.migrations_dir())
    }

    pub fn migrations_dir(&self) -> &Path {
        &self.migrations_dir
    }

    /// All migration filenames in the directory, sorted ascending
    pub fn list_files(&self) -> Result<Vec<String>> {
        let entries = std::fs::read_dir(&self.migrations_dir)
            .map_err(|_| MigrationError::DirectoryNotFound(self.migrations_dir.clone()))?;

        let mut files = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|source| MigrationError::Io {
                path: self.migrations_dir.clone(),
                source,
            })?;

            if let Some(file_name) = entry.file_name().to_str()
                && is_valid_file_name(file_name)
            {
                files.push(file_name.to_string());
            }
        }

        if files.is_empty() {
            return Err(MigrationError::NoMigrationsFound(
                self.migrations_dir.clone(),
            ));
        }

        // Fixed-width numeric prefixes make name order chronological
        files.sort();

        debug!(
            "Found {} migration files in {}",
            files.len(),
            self.migrations_dir.display()
        );
        Ok(files)
    }

    pub fn list_versions(&self) -> Result<Vec<String>> {
        Ok(self
            .list_files()?
            .iter()
            .map(|f| extract_version(f).to_string())
            .collect())
    }

    /// Versions strictly older than `limit_version`
    pub fn versions_before(&self, limit_version: &str) -> Result<Vec<String>> {
        Ok(self
            .list_versions()?
            .into_iter()
            .filter(|v| v.as_str() < limit_version)
            .collect())
    }

    pub fn version_exists(&self, version: &str) -> Result<bool> {
        Ok(self
            .list_files()?
            .iter()
            .any(|f| f.get(..VERSION_WIDTH) == Some(version)))
    }

    pub fn latest_version(&self) -> Result<String> {
        let mut files = self.list_files()?;
        files.sort_by(|a, b| b.cmp(a));

        // list_files never returns an empty list
        let latest = files
            .first()
            .ok_or_else(|| MigrationError::NoMigrationsFound(self.migrations_dir.clone()))?;
        Ok(extract_version(latest).to_string())
    }

    /// Read one side of a migration straight from disk.
    ///
    /// Both directives must be declared but only the requested one has to be
    /// non-blank.
    pub fn read_sql(&self, file_name: &str, direction: Direction) -> Result<String> {
        let path = self.migrations_dir.join(file_name);
        debug!("Reading {} SQL from {}", direction, path.display());

        let directives = read_directives(&path)?;
        require_body(&path, direction, &directives)
    }

    /// First migration filename starting with `version`
    pub fn file_name_for_version(&self, version: &str) -> Result<Option<String>> {
        Ok(self
            .list_files()?
            .into_iter()
            .find(|f| f.starts_with(version)))
    }

    pub fn load(&self, file_name: &str) -> Result<MigrationFile> {
        MigrationFile::parse(&self.migrations_dir.join(file_name))
    }

    /// Parse every migration in version order
    pub fn load_all(&self) -> Result<Vec<MigrationFile>> {
        self.list_files()?
            .iter()
            .map(|f| self.load(f))
            .collect()
    }

    /// Scaffold a new migration stamped with the current UTC time
    pub fn create_migration(&self, name: &str) -> Result<String> {
        let timestamp = Utc::now().format(VERSION_TIMESTAMP_FORMAT).to_string();
        self.create_migration_at(&timestamp, name)
    }

    /// Scaffold a new migration with an explicit 14-digit timestamp
    pub fn create_migration_at(&self, timestamp: &str, name: &str) -> Result<String> {
        if timestamp.len() != VERSION_WIDTH || !timestamp.bytes().all(|b| b.is_ascii_digit()) {
            return Err(MigrationError::InvalidTimestamp(timestamp.to_string()));
        }
        if !is_valid_migration_name(name) {
            return Err(MigrationError::InvalidName(name.to_string()));
        }

        let file_name = generate_file_name(timestamp, name);
        debug_assert!(is_valid_file_name(&file_name));

        let path = self.migrations_dir.join(&file_name);
        let write_error = |source| MigrationError::FileWrite {
            path: path.clone(),
            source,
        };

        let mut file = std::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(write_error)?;
        file.write_all(MIGRATION_TEMPLATE.as_bytes())
            .map_err(write_error)?;

        info!("Created migration {}", path.display());
        Ok(file_name)
    }
}
