//! stripkit CLI - split images into equal-width strips of a fixed size.
//!
//! Every input image is cut into vertical strips, each strip is stretched to
//! the target resolution, and the strips are written as JPEG files into a
//! `saves-<date>` directory.
//!
//! # Usage
//!
//! ```bash
//! # Split two images with the defaults (2 strips, 3256x860)
//! stripkit split left.jpg right.png
//!
//! # Split every image in a directory into 3 strips
//! stripkit split ./photos/ --parts 3 --output-root ./exports
//!
//! # Check which files are images
//! stripkit check notes.jpg photo.png
//!
//! # View configuration
//! stripkit config show
//! ```

use clap::{Parser, Subcommand};

mod cli;
mod logging;

/// stripkit - Split images into equal-width strips of a fixed size.
#[derive(Parser, Debug)]
#[command(name = "stripkit")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose (debug) logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Output logs in JSON format
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

/// Available commands.
#[derive(Subcommand, Debug)]
enum Commands {
    /// Cut images into strips and write them to a dated directory
    Split(cli::split::SplitArgs),

    /// Report which files are supported images (by content)
    Check(cli::check::CheckArgs),

    /// View and manage configuration
    Config(cli::config::ConfigArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging from config, with CLI overrides.
    // Note: logging isn't initialized yet, so use eprintln for config warnings.
    let config = match stripkit_core::Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!(
                "Warning: Failed to load config: {e}\n  \
                 Using default configuration. Check your config file with `stripkit config path`."
            );
            stripkit_core::Config::default()
        }
    };
    logging::init_from_config(&config, cli.verbose, cli.json_logs);

    tracing::debug!("stripkit v{}", stripkit_core::VERSION);

    match cli.command {
        Commands::Split(args) => cli::split::execute(args),
        Commands::Check(args) => cli::check::execute(args),
        Commands::Config(args) => cli::config::execute(args),
    }
}
