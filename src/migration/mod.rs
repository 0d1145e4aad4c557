pub mod directives;
pub mod file;
pub mod naming;
pub mod repository;

pub use directives::{Directives, parse_directives};
pub use file::{Direction, MigrationFile};
pub use naming::{
    extract_name, extract_version, generate_file_name, is_valid_file_name,
    is_valid_migration_name,
};
pub use repository::MigrationRepository;
