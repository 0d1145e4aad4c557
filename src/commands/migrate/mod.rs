pub mod list;
pub mod new;
pub mod show;

// Re-export all command functions
pub use list::{cmd_migrate_exists, cmd_migrate_latest, cmd_migrate_list, cmd_migrate_versions};
pub use new::cmd_migrate_new;
pub use show::cmd_migrate_show;
