use crate::constants::MIGRATION_FILE_EXTENSION;
use once_cell::sync::Lazy;
use regex::Regex;

/// `{14 digits}{slug}.migration`, extension matched case-insensitively
static MIGRATION_FILE_NAME: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^[0-9]{14}[A-Za-z0-9_]+\.(?i:migration)$").expect("valid migration name regex")
});

static MIGRATION_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z0-9_]+$").expect("valid migration slug regex"));

/// Check a bare filename (no directory part) against the naming convention
pub fn is_valid_file_name(file_name: &str) -> bool {
    MIGRATION_FILE_NAME.is_match(file_name)
}

/// Check the human-readable part supplied when creating a migration
pub fn is_valid_migration_name(name: &str) -> bool {
    MIGRATION_NAME.is_match(name)
}

/// Version of a migration filename: everything before the first underscore.
/// A name without any underscore is returned whole.
pub fn extract_version(file_name: &str) -> &str {
    match file_name.find('_') {
        Some(idx) => &file_name[..idx],
        None => file_name,
    }
}

/// Slug between the version's underscore and the extension
pub fn extract_name(file_name: &str) -> &str {
    let rest = match file_name.find('_') {
        Some(idx) => &file_name[idx + 1..],
        None => "",
    };

    let ext_len = MIGRATION_FILE_EXTENSION.len();
    if rest.len() >= ext_len
        && rest.is_char_boundary(rest.len() - ext_len)
        && rest[rest.len() - ext_len..].eq_ignore_ascii_case(MIGRATION_FILE_EXTENSION)
    {
        &rest[..rest.len() - ext_len]
    } else {
        rest
    }
}

/// Build a migration filename like "20240101120000_add_users.migration"
pub fn generate_file_name(timestamp: &str, name: &str) -> String {
    format!("{}_{}{}", timestamp, name, MIGRATION_FILE_EXTENSION)
}
