use crate::helpers::cli::CliTestHelper;
use anyhow::Result;
use predicates::prelude::*;

#[test]
fn test_config_get() -> Result<()> {
    let helper = CliTestHelper::new()?;
    helper.init_project()?;

    helper
        .command()
        .args(["config", "get", "db_name"])
        .assert()
        .success()
        .stdout("app_test\n");

    helper
        .command()
        .args(["config", "get", "db_version_table"])
        .assert()
        .success()
        .stdout("__db_version__\n");

    helper
        .command()
        .args(["config", "get", "db_port"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid configuration key ('db_port')"));

    Ok(())
}

#[test]
fn test_config_list_masks_password() -> Result<()> {
    let helper = CliTestHelper::new()?;
    helper.init_project()?;

    let output = helper
        .command()
        .args(["config", "list", "--format", "json"])
        .output()?;
    assert!(output.status.success());

    let value: serde_json::Value = serde_json::from_slice(&output.stdout)?;
    assert_eq!(value["db_password"], "********");
    assert_eq!(value["db_user"], "root");

    Ok(())
}

#[test]
fn test_cli_args_override_file() -> Result<()> {
    let helper = CliTestHelper::new()?;
    helper.init_project()?;

    helper
        .command()
        .args(["config", "get", "db_host", "--db-host", "db.internal"])
        .assert()
        .success()
        .stdout("db.internal\n");

    Ok(())
}
