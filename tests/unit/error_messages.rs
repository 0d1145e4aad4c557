//! Error messages are what the CLI shows; keep them stable.

use dbmig::config::ConfigBuilder;
use dbmig::migration::MigrationRepository;
use insta::assert_snapshot;
use std::path::PathBuf;

#[test]
fn test_invalid_name_message() {
    let repository = MigrationRepository::new(std::env::temp_dir());
    let err = repository
        .create_migration_at("20240101120000", "add-users")
        .unwrap_err();

    assert_snapshot!(
        err.to_string(),
        @"invalid migration name; it should contain only letters, numbers and/or underscores ('add-users')"
    );
}

#[test]
fn test_invalid_timestamp_message() {
    let repository = MigrationRepository::new(std::env::temp_dir());
    let err = repository
        .create_migration_at("20240101", "add_users")
        .unwrap_err();

    assert_snapshot!(
        err.to_string(),
        @"invalid migration timestamp; it should be 14 digits ('20240101')"
    );
}

#[test]
fn test_directory_not_found_message() {
    let repository = MigrationRepository::new(PathBuf::from("/nonexistent/dbmig/migrations"));
    let err = repository.list_files().unwrap_err();

    assert_snapshot!(
        err.to_string(),
        @"directory not found ('/nonexistent/dbmig/migrations')"
    );
}

#[test]
fn test_config_messages() {
    let err = ConfigBuilder::new()
        .put("db_host", "a")
        .and_then(|b| b.put("db_host", "b"))
        .err()
        .unwrap();
    assert_snapshot!(
        err.to_string(),
        @"the configuration key 'db_host' already exists and cannot be overridden"
    );

    let err = ConfigBuilder::new().resolve().unwrap_err();
    assert_snapshot!(err.to_string(), @"config file error: 'db_host' is not defined");
}
