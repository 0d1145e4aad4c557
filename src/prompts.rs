use crate::migration::is_valid_migration_name;
use anyhow::{Result, bail};
use dialoguer::Input;

/// Check a migration name, returning the message shown to the user
pub fn validate_migration_name(name: &str) -> Result<(), String> {
    if name.is_empty() {
        Err("Name cannot be empty".to_string())
    } else if !is_valid_migration_name(name) {
        Err("Name should contain only letters, numbers and/or underscores".to_string())
    } else {
        Ok(())
    }
}

/// Use the name given on the command line, or ask for one interactively.
///
/// A given name is trimmed and validated without prompting.
pub fn prompt_migration_name(name: Option<&str>) -> Result<String> {
    if let Some(name) = name {
        let name = name.trim();
        if let Err(reason) = validate_migration_name(name) {
            bail!("Invalid migration name '{}': {}", name, reason);
        }
        return Ok(name.to_string());
    }

    let input: String = Input::new()
        .with_prompt("Enter migration name")
        .validate_with(|input: &String| validate_migration_name(input.trim()))
        .interact_text()?;

    Ok(input.trim().to_string())
}
