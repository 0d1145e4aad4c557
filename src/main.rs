use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dbmig::commands;
use dbmig::config::{self, Config, ConfigBuilder, ConfigInput};
use dbmig::constants::CONFIG_FILENAME;
use dbmig::migration::Direction;
use dotenv::dotenv;
use tracing::info;
use tracing_subscriber::{EnvFilter, fmt};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[arg(long, default_value = CONFIG_FILENAME, global = true)]
    config_file: String,

    /// Enable verbose output (info level)
    #[arg(long, short = 'v', global = true)]
    verbose: bool,

    /// Suppress all non-essential output (error level only)
    #[arg(long, short = 'q', global = true)]
    quiet: bool,

    /// Enable debug output (debug level)
    #[arg(long, global = true)]
    debug: bool,

    #[command(flatten)]
    database_args: config::DatabaseArgs,

    #[command(flatten)]
    directory_args: config::DirectoryArgs,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Migration commands
    Migrate {
        #[command(subcommand)]
        command: MigrateCommands,
    },

    /// Inspect configuration
    Config {
        #[command(subcommand)]
        command: Option<commands::config::ConfigCommands>,
    },
}

#[derive(Subcommand)]
enum MigrateCommands {
    /// Scaffold a new migration file
    New {
        /// Name for the migration (letters, numbers and underscores)
        name: Option<String>,
    },

    /// List migration files in version order
    List,

    /// List migration versions
    Versions {
        /// Only versions strictly older than this one
        #[arg(long)]
        before: Option<String>,
    },

    /// Print the newest migration version
    Latest,

    /// Check whether a migration version exists (exit code 1 when it does not)
    Exists {
        /// 14-digit migration version
        version: String,
    },

    /// Print the SQL of a migration
    Show {
        /// Migration version (or a prefix of the filename)
        version: String,

        /// Print the down migration instead of the up migration
        #[arg(long)]
        down: bool,
    },
}

fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    initialize_logging(&cli);

    let config = resolve_config(&cli)?;

    match &cli.command {
        Commands::Migrate { command } => match command {
            MigrateCommands::New { name } => {
                info!("Creating new migration");
                commands::cmd_migrate_new(&config, name.as_deref())?;
                Ok(())
            }
            MigrateCommands::List => {
                info!("Listing migration files");
                commands::cmd_migrate_list(&config)
            }
            MigrateCommands::Versions { before } => {
                info!("Listing migration versions");
                commands::cmd_migrate_versions(&config, before.as_deref())
            }
            MigrateCommands::Latest => {
                info!("Finding latest migration version");
                commands::cmd_migrate_latest(&config)
            }
            MigrateCommands::Exists { version } => {
                info!("Checking migration version {}", version);
                if !commands::cmd_migrate_exists(&config, version)? {
                    std::process::exit(1);
                }
                Ok(())
            }
            MigrateCommands::Show { version, down } => {
                let direction = if *down { Direction::Down } else { Direction::Up };
                info!("Showing {} SQL for {}", direction, version);
                commands::cmd_migrate_show(&config, version, direction)
            }
        },
        Commands::Config { command } => {
            info!("Inspecting configuration");
            commands::cmd_config(&config, command.clone())
        }
    }
}

fn initialize_logging(cli: &Cli) {
    let level = if cli.debug {
        "debug"
    } else if cli.verbose {
        "info"
    } else if cli.quiet {
        "error"
    } else {
        "warn" // default level
    };

    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else {
        EnvFilter::new(level)
    };

    fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn resolve_config(cli: &Cli) -> Result<Config> {
    let (file_config, root_dir) = config::load_config(&cli.config_file)?;

    let cli_config =
        ConfigInput::from_args(cli.database_args.clone(), cli.directory_args.clone());

    ConfigBuilder::new()
        .with_base_dir(root_dir)
        .with_file(file_config)
        .with_cli_args(cli_config)
        .resolve()
        .with_context(|| format!("Failed to resolve configuration from {}", cli.config_file))
}
