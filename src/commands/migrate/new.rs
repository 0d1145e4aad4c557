use crate::config::Config;
use crate::migration::MigrationRepository;
use crate::prompts::prompt_migration_name;
use anyhow::{Context, Result};
use std::path::PathBuf;
use tracing::debug;

pub fn cmd_migrate_new(config: &Config, name: Option<&str>) -> Result<PathBuf> {
    let name = prompt_migration_name(name)?;

    let repository = MigrationRepository::from_config(config);
    std::fs::create_dir_all(repository.migrations_dir()).with_context(|| {
        format!(
            "Failed to create migrations directory {}",
            repository.migrations_dir().display()
        )
    })?;

    debug!("Scaffolding migration '{}'", name);
    let file_name = repository.create_migration(&name)?;
    let path = repository.migrations_dir().join(&file_name);

    println!("Created migration: {}", path.display());
    Ok(path)
}
