//! The `stripkit check` command: classify files by content.

use clap::Args;
use std::path::PathBuf;
use stripkit_core::{Classification, Config, Validator};

/// Arguments for the `check` command.
#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Files to classify
    #[arg(required = true)]
    pub paths: Vec<PathBuf>,
}

/// Execute the check command.
pub fn execute(args: CheckArgs) -> anyhow::Result<()> {
    let config = Config::load()?;
    let validator = Validator::new(config.processing, config.limits);

    let rejected = report(&validator, &args.paths, |line| println!("{line}"));
    if rejected > 0 {
        anyhow::bail!(
            "{} of {} file(s) are not supported images",
            rejected,
            args.paths.len()
        );
    }
    Ok(())
}

/// Emit one line per path and return how many were rejected.
fn report(validator: &Validator, paths: &[PathBuf], mut emit: impl FnMut(String)) -> usize {
    let mut rejected = 0;
    for path in paths {
        let label = match validator.classify(path) {
            Classification::Image(format) => format!("image ({format})"),
            Classification::NotImage => {
                rejected += 1;
                "not-image".to_string()
            }
        };
        emit(format!("{label}\t{}", path.display()));
    }
    rejected
}
