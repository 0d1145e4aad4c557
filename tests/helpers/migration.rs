use anyhow::Result;
use dbmig::migration::MigrationRepository;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// A throwaway migrations directory
pub struct MigrationDir {
    pub temp_dir: TempDir,
}

impl MigrationDir {
    pub fn new() -> Result<Self> {
        Ok(Self {
            temp_dir: TempDir::new()?,
        })
    }

    pub fn path(&self) -> &Path {
        self.temp_dir.path()
    }

    pub fn repository(&self) -> MigrationRepository {
        MigrationRepository::new(self.path())
    }

    /// Write a migration with the given up/down bodies
    pub fn write_migration(&self, file_name: &str, up: &str, down: &str) -> Result<PathBuf> {
        self.write_raw(
            file_name,
            &format!("SQL_UP = \"\"\"\n{}\n\"\"\"\n\nSQL_DOWN = \"\"\"\n{}\n\"\"\"\n", up, down),
        )
    }

    pub fn write_raw(&self, file_name: &str, content: &str) -> Result<PathBuf> {
        let path = self.path().join(file_name);
        fs::write(&path, content)?;
        Ok(path)
    }
}
