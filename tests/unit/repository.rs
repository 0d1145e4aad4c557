use crate::helpers::migration::MigrationDir;
use anyhow::Result;
use chrono::{NaiveDateTime, Utc};
use dbmig::MigrationError;
use dbmig::migration::{Direction, MigrationFile, is_valid_file_name, parse_directives};

fn seeded() -> Result<MigrationDir> {
    let dir = MigrationDir::new()?;
    dir.write_migration("20200101000000_a.migration", "CREATE TABLE a (id INT);", "DROP TABLE a;")?;
    dir.write_migration("20190101000000_b.migration", "CREATE TABLE b (id INT);", "DROP TABLE b;")?;
    dir.write_raw("notamigration.txt", "hello")?;
    Ok(dir)
}

#[test]
fn test_list_files_orders_and_filters() -> Result<()> {
    let dir = seeded()?;
    let repository = dir.repository();

    assert_eq!(
        repository.list_files()?,
        vec!["20190101000000_b.migration", "20200101000000_a.migration"]
    );
    assert_eq!(
        repository.list_versions()?,
        vec!["20190101000000", "20200101000000"]
    );

    Ok(())
}

#[test]
fn test_list_files_is_stable() -> Result<()> {
    let dir = seeded()?;
    let repository = dir.repository();

    let first = repository.list_files()?;
    let second = repository.list_files()?;
    assert_eq!(first, second);

    Ok(())
}

#[test]
fn test_list_files_ignores_directories() -> Result<()> {
    let dir = MigrationDir::new()?;
    dir.write_migration("20200101000000_a.migration", "SELECT 1;", "SELECT 2;")?;
    std::fs::create_dir(dir.path().join("archive"))?;

    assert_eq!(dir.repository().list_files()?, vec!["20200101000000_a.migration"]);

    Ok(())
}

#[test]
fn test_versions_before_boundary() -> Result<()> {
    let dir = seeded()?;
    let repository = dir.repository();

    assert_eq!(
        repository.versions_before("20200101000000")?,
        vec!["20190101000000"]
    );
    assert_eq!(
        repository.versions_before("99999999999999")?,
        vec!["20190101000000", "20200101000000"]
    );
    assert!(repository.versions_before("20190101000000")?.is_empty());

    Ok(())
}

#[test]
fn test_version_exists_is_exact() -> Result<()> {
    let dir = seeded()?;
    let repository = dir.repository();

    assert!(repository.version_exists("20200101000000")?);
    assert!(!repository.version_exists("2020010100000")?);
    assert!(!repository.version_exists("20200101000000_")?);
    assert!(!repository.version_exists("20210101000000")?);

    Ok(())
}

#[test]
fn test_latest_version() -> Result<()> {
    let dir = seeded()?;
    assert_eq!(dir.repository().latest_version()?, "20200101000000");

    let empty = MigrationDir::new()?;
    assert!(matches!(
        empty.repository().latest_version().unwrap_err(),
        MigrationError::NoMigrationsFound(_)
    ));

    Ok(())
}

#[test]
fn test_file_name_for_version() -> Result<()> {
    let dir = seeded()?;
    let repository = dir.repository();

    assert_eq!(
        repository.file_name_for_version("20190101000000")?,
        Some("20190101000000_b.migration".to_string())
    );
    assert_eq!(repository.file_name_for_version("20180101000000")?, None);

    Ok(())
}

#[test]
fn test_read_sql_both_directions() -> Result<()> {
    let dir = seeded()?;
    let repository = dir.repository();

    let up = repository.read_sql("20200101000000_a.migration", Direction::Up)?;
    let down = repository.read_sql("20200101000000_a.migration", Direction::Down)?;
    assert_eq!(up.trim(), "CREATE TABLE a (id INT);");
    assert_eq!(down.trim(), "DROP TABLE a;");

    Ok(())
}

#[test]
fn test_read_sql_checks_only_selected_body() -> Result<()> {
    let dir = MigrationDir::new()?;
    dir.write_raw(
        "20200101000000_irreversible.migration",
        "SQL_UP = \"DROP TABLE legacy;\"\nSQL_DOWN = \"\"\n",
    )?;
    let repository = dir.repository();

    assert_eq!(
        repository.read_sql("20200101000000_irreversible.migration", Direction::Up)?,
        "DROP TABLE legacy;"
    );
    assert!(matches!(
        repository
            .read_sql("20200101000000_irreversible.migration", Direction::Down)
            .unwrap_err(),
        MigrationError::EmptyBody { .. }
    ));

    Ok(())
}

#[test]
fn test_read_sql_accepts_none_body() -> Result<()> {
    let dir = MigrationDir::new()?;
    dir.write_raw(
        "20200101000000_drop_t.migration",
        "SQL_UP = \"\"\"DROP TABLE t;\"\"\"\nSQL_DOWN = None\n",
    )?;
    let repository = dir.repository();

    assert_eq!(
        repository.read_sql("20200101000000_drop_t.migration", Direction::Up)?,
        "DROP TABLE t;"
    );
    assert!(matches!(
        repository
            .read_sql("20200101000000_drop_t.migration", Direction::Down)
            .unwrap_err(),
        MigrationError::EmptyBody { directive, .. } if directive == "SQL_DOWN"
    ));

    Ok(())
}

#[test]
fn test_read_sql_failures() -> Result<()> {
    let dir = MigrationDir::new()?;
    dir.write_raw("20200101000000_up_only.migration", "SQL_UP = 'SELECT 1;'\n")?;
    let repository = dir.repository();

    assert!(matches!(
        repository
            .read_sql("20200101000000_up_only.migration", Direction::Up)
            .unwrap_err(),
        MigrationError::MissingDirective { .. }
    ));
    assert!(matches!(
        repository
            .read_sql("20200101000000_absent.migration", Direction::Up)
            .unwrap_err(),
        MigrationError::NotFound(_)
    ));

    Ok(())
}

#[test]
fn test_create_migration_round_trip() -> Result<()> {
    let dir = MigrationDir::new()?;
    let repository = dir.repository();

    let before = Utc::now().timestamp();
    let file_name = repository.create_migration("add_users")?;
    let after = Utc::now().timestamp();

    assert!(is_valid_file_name(&file_name));
    assert!(file_name.ends_with("_add_users.migration"));

    let version = &file_name[..14];
    let stamped = NaiveDateTime::parse_from_str(version, "%Y%m%d%H%M%S")?
        .and_utc()
        .timestamp();
    assert!(stamped >= before && stamped <= after);

    assert_eq!(repository.list_files()?, vec![file_name.clone()]);
    assert!(repository.version_exists(version)?);

    // Template bodies are declared but blank
    let path = dir.path().join(&file_name);
    let directives = parse_directives(&path, &std::fs::read_to_string(&path)?)?;
    assert!(directives.sql_up.is_some_and(|sql| sql.trim().is_empty()));
    assert!(directives.sql_down.is_some_and(|sql| sql.trim().is_empty()));

    assert!(matches!(
        MigrationFile::parse(&path).unwrap_err(),
        MigrationError::EmptyBody { .. }
    ));

    Ok(())
}

#[test]
fn test_create_migration_invalid_name_writes_nothing() -> Result<()> {
    let dir = MigrationDir::new()?;
    let repository = dir.repository();

    let err = repository.create_migration("add users").unwrap_err();
    assert!(matches!(err, MigrationError::InvalidName(name) if name == "add users"));
    assert_eq!(std::fs::read_dir(dir.path())?.count(), 0);

    Ok(())
}

#[test]
fn test_create_migration_missing_directory() -> Result<()> {
    let dir = MigrationDir::new()?;
    let repository = dbmig::migration::MigrationRepository::new(dir.path().join("missing"));

    assert!(matches!(
        repository.create_migration("add_users").unwrap_err(),
        MigrationError::FileWrite { .. }
    ));

    Ok(())
}

#[test]
fn test_load_all_parses_in_order() -> Result<()> {
    let dir = seeded()?;
    let migrations = dir.repository().load_all()?;

    let names: Vec<&str> = migrations.iter().map(|m| m.name.as_str()).collect();
    assert_eq!(names, vec!["b", "a"]);

    Ok(())
}
