use crate::config::Config;
use crate::migration::{Direction, MigrationRepository};
use anyhow::{Result, anyhow};
use tracing::debug;

pub fn cmd_migrate_show(config: &Config, version: &str, direction: Direction) -> Result<()> {
    let repository = MigrationRepository::from_config(config);

    let file_name = repository
        .file_name_for_version(version)?
        .ok_or_else(|| anyhow!("No migration found for version '{}'", version))?;
    debug!("Version {} resolved to {}", version, file_name);

    let sql = repository.read_sql(&file_name, direction)?;
    println!("{}", sql.trim());
    Ok(())
}
