use crate::config::Config;
use crate::migration::MigrationRepository;
use anyhow::Result;

pub fn cmd_migrate_list(config: &Config) -> Result<()> {
    let repository = MigrationRepository::from_config(config);
    for file_name in repository.list_files()? {
        println!("{}", file_name);
    }
    Ok(())
}

pub fn cmd_migrate_versions(config: &Config, before: Option<&str>) -> Result<()> {
    let repository = MigrationRepository::from_config(config);
    let versions = match before {
        Some(limit) => repository.versions_before(limit)?,
        None => repository.list_versions()?,
    };

    for version in versions {
        println!("{}", version);
    }
    Ok(())
}

pub fn cmd_migrate_latest(config: &Config) -> Result<()> {
    let repository = MigrationRepository::from_config(config);
    println!("{}", repository.latest_version()?);
    Ok(())
}

/// Prints whether the version exists and returns the answer so the caller
/// can pick the exit code
pub fn cmd_migrate_exists(config: &Config, version: &str) -> Result<bool> {
    let repository = MigrationRepository::from_config(config);
    let exists = repository.version_exists(version)?;
    println!("{}", exists);
    Ok(exists)
}
