//! The `stripkit config` command: inspect and seed the export settings.

use clap::{Args, Subcommand};
use std::path::{Path, PathBuf};
use stripkit_core::pipeline::{Clock, OutputNamer, SystemClock};
use stripkit_core::Config;

/// Arguments for the `config` command.
#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Subcommands for configuration management.
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Print the effective configuration and where today's strips would go
    Show,

    /// Show config file path
    Path,

    /// Validate a config file (defaults to the standard location)
    Check {
        /// Config file to check
        file: Option<PathBuf>,
    },

    /// Write a config file seeded with the given export settings
    Init {
        /// Overwrite existing config file
        #[arg(long)]
        force: bool,

        /// Number of strips per image
        #[arg(long)]
        parts: Option<u32>,

        /// Output strip width in pixels
        #[arg(long)]
        width: Option<u32>,

        /// Output strip height in pixels
        #[arg(long)]
        height: Option<u32>,

        /// Directory in which the dated output directory is created
        #[arg(long)]
        output_root: Option<PathBuf>,
    },
}

/// Execute the config command.
pub fn execute(args: ConfigArgs) -> anyhow::Result<()> {
    match args.command {
        ConfigCommand::Show => {
            let config = Config::load()?;
            print!("{}", config.to_toml()?);
            println!("{}", export_plan(&config, &SystemClock));
        }

        ConfigCommand::Path => println!("{}", Config::default_path().display()),

        ConfigCommand::Check { file } => {
            let path = file.unwrap_or_else(Config::default_path);
            let config = Config::load_from(&path)
                .map_err(|e| anyhow::anyhow!("{}: {}", path.display(), e))?;
            println!("{}: ok", path.display());
            println!("{}", export_plan(&config, &SystemClock));
        }

        ConfigCommand::Init {
            force,
            parts,
            width,
            height,
            output_root,
        } => {
            let mut config = Config::default();
            let export = &mut config.export;
            export.part_count = parts.unwrap_or(export.part_count);
            export.target_width = width.unwrap_or(export.target_width);
            export.target_height = height.unwrap_or(export.target_height);
            if let Some(root) = output_root {
                export.output_root = root;
            }

            let path = Config::default_path();
            write_config(&path, &config, force)?;
            tracing::info!("Config file created at: {}", path.display());
            println!("Configuration initialized at: {}", path.display());
        }
    }

    Ok(())
}

/// One-line summary of what an export would do right now.
fn export_plan(config: &Config, clock: &dyn Clock) -> String {
    let export = &config.export;
    let dir = config
        .output_root()
        .join(OutputNamer::new(export).dir_name(&clock.now()));
    format!(
        "# {} strip(s) per image at {}x{} -> {}",
        export.part_count,
        export.target_width,
        export.target_height,
        dir.display()
    )
}

/// Validate `config` and write it to `path`, creating parent directories.
///
/// Nothing is written when the settings are invalid or when the file exists
/// and `force` is false.
fn write_config(path: &Path, config: &Config, force: bool) -> anyhow::Result<()> {
    config.validate()?;

    if path.exists() && !force {
        anyhow::bail!(
            "Config file already exists at: {}\nUse --force to overwrite.",
            path.display()
        );
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)?;
    }
    std::fs::write(path, config.to_toml()?)?;
    Ok(())
}
