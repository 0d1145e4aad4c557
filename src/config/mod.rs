pub mod builder;
pub mod merge;
pub mod types;


pub use builder::{ConfigBuilder, in_place_config};
pub use types::*;

use crate::error::ConfigError;
use std::path::{Path, PathBuf};
use tracing::debug;

/// Read the YAML config file, returning its input layer and the directory
/// relative paths inside it are resolved against. A missing file yields an
/// empty layer.
pub fn load_config(config_file: &str) -> Result<(ConfigInput, PathBuf), ConfigError> {
    let config_path = Path::new(config_file);
    let config_dir = config_path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."))
        .to_path_buf();

    let config_input = if config_path.exists() {
        let contents =
            std::fs::read_to_string(config_path).map_err(|source| ConfigError::Read {
                path: config_path.to_path_buf(),
                source,
            })?;
        debug!("Loaded config file {}", config_path.display());
        serde_yaml::from_str(&contents).map_err(|source| ConfigError::Parse {
            path: config_path.to_path_buf(),
            source,
        })?
    } else {
        debug!("Config file {} not found, using defaults", config_path.display());
        ConfigInput::default()
    };

    Ok((config_input, config_dir))
}
