// Migration file naming conventions
pub const MIGRATION_FILE_EXTENSION: &str = ".migration";
pub const VERSION_WIDTH: usize = 14;
pub const VERSION_TIMESTAMP_FORMAT: &str = "%Y%m%d%H%M%S";

// Directive names bound inside a migration file
pub const SQL_UP_DIRECTIVE: &str = "SQL_UP";
pub const SQL_DOWN_DIRECTIVE: &str = "SQL_DOWN";

/// Body written for every freshly scaffolded migration
pub const MIGRATION_TEMPLATE: &str = r#"SQL_UP = """

"""

SQL_DOWN = """

"""
"#;

// Configuration file name
pub const CONFIG_FILENAME: &str = "dbmig.yaml";

// Configuration defaults
pub const DEFAULT_VERSION_TABLE: &str = "__db_version__";
pub const DB_PASSWORD_ENV: &str = "DBMIG_DB_PASSWORD";
