//! The `stripkit split` command.

mod progress;
mod setup;
pub mod types;

pub use types::{Filter, Naming};

use clap::Args;
use std::path::PathBuf;
use stripkit_core::{Exporter, FileDiscovery, Selection};

use progress::{create_progress_bar, print_summary};
use setup::load_config;

/// Arguments for the `split` command.
#[derive(Args, Debug, Default)]
pub struct SplitArgs {
    /// Image files or directories to split
    #[arg(required = true)]
    pub inputs: Vec<PathBuf>,

    /// Number of strips per image
    #[arg(short = 'n', long)]
    pub parts: Option<u32>,

    /// Output strip width in pixels
    #[arg(long)]
    pub width: Option<u32>,

    /// Output strip height in pixels
    #[arg(long)]
    pub height: Option<u32>,

    /// Directory in which the dated output directory is created
    #[arg(short, long)]
    pub output_root: Option<PathBuf>,

    /// File naming strategy
    #[arg(long, value_enum)]
    pub naming: Option<Naming>,

    /// Resampling filter
    #[arg(long, value_enum)]
    pub filter: Option<Filter>,

    /// JPEG quality (1-100)
    #[arg(long)]
    pub quality: Option<u8>,

    /// Skip images that fail to decode instead of aborting
    #[arg(long)]
    pub keep_going: bool,

    /// Print the export report as JSON instead of the output directory
    #[arg(long)]
    pub json: bool,

    /// Disable the progress bar
    #[arg(long)]
    pub no_progress: bool,
}

/// Execute the split command.
pub fn execute(args: SplitArgs) -> anyhow::Result<()> {
    let config = load_config(&args)?;
    let exporter = Exporter::new(&config);

    let candidates = FileDiscovery::new(config.processing.clone()).discover_all(&args.inputs);
    let mut selection = Selection::new(exporter.validator().clone());
    let outcome = selection.add(candidates);

    if !outcome.rejected.is_empty() {
        tracing::warn!(
            "Not added, not a supported image ({}): {:?}",
            outcome.rejected.len(),
            outcome.rejected
        );
    }
    if selection.is_empty() {
        tracing::warn!("No supported images found; nothing to split");
    } else {
        tracing::info!("Splitting {} image(s)", selection.len());
    }

    let total = selection.len() as u64 * u64::from(exporter.part_count());
    let progress = create_progress_bar(total, args.no_progress);
    let result = exporter.export_with(selection.paths(), |written| {
        progress.inc(1);
        if let Some(name) = written.path.file_name() {
            progress.set_message(name.to_string_lossy().into_owned());
        }
    });
    progress.finish_and_clear();
    let report = result?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        println!("Files saved to {}", report.output_dir.display());
    }
    print_summary(&report, outcome.rejected.len());

    Ok(())
}
