use crate::config::{Config, ConfigKey};
use anyhow::Result;
use console::style;
use std::collections::BTreeMap;

const MASKED_VALUE: &str = "********";

/// Config subcommands
#[derive(Debug, Clone, clap::Subcommand)]
pub enum ConfigCommands {
    /// Get a configuration value
    Get {
        /// Configuration key (e.g., migrations_dir, db_name)
        key: String,
    },

    /// List all configuration values
    List {
        /// Output format
        #[arg(long, default_value = "text")]
        format: OutputFormat,

        /// Print the database password instead of masking it
        #[arg(long)]
        show_secrets: bool,
    },
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
    Yaml,
}

/// Execute config command
pub fn cmd_config(config: &Config, subcommand: Option<ConfigCommands>) -> Result<()> {
    match subcommand {
        Some(ConfigCommands::Get { key }) => {
            println!("{}", config.get(&key)?);
            Ok(())
        }

        Some(ConfigCommands::List {
            format,
            show_secrets,
        }) => {
            println!("{}", render_config(config, &format, show_secrets)?);
            Ok(())
        }

        None => {
            println!("dbmig config - Inspect dbmig configuration");
            println!();
            println!("Usage:");
            println!("  dbmig config get <KEY>     Get a configuration value");
            println!("  dbmig config list          List all configuration values");
            println!();
            println!("Keys:");
            for key in ConfigKey::ALL {
                println!("  {}", key);
            }
            Ok(())
        }
    }
}

/// Render every setting in the requested format
pub fn render_config(config: &Config, format: &OutputFormat, show_secrets: bool) -> Result<String> {
    let entries: BTreeMap<&str, String> = config
        .entries()
        .into_iter()
        .map(|(key, value)| {
            let value = if key.is_secret() && !show_secrets {
                MASKED_VALUE.to_string()
            } else {
                value
            };
            (key.as_str(), value)
        })
        .collect();

    let rendered = match format {
        OutputFormat::Text => entries
            .iter()
            .map(|(key, value)| format!("{} = {}", style(key).bold(), value))
            .collect::<Vec<_>>()
            .join("\n"),
        OutputFormat::Json => serde_json::to_string_pretty(&entries)?,
        OutputFormat::Yaml => serde_yaml::to_string(&entries)?.trim_end().to_string(),
    };

    Ok(rendered)
}
