pub mod config;
pub mod migrate;

// Re-export all command functions
pub use config::cmd_config;
pub use migrate::{
    cmd_migrate_exists, cmd_migrate_latest, cmd_migrate_list, cmd_migrate_new, cmd_migrate_show,
    cmd_migrate_versions,
};
