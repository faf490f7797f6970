//! Export setup: config loading and CLI overrides.

use stripkit_core::{Config, FailurePolicy};

use super::SplitArgs;

/// Load the config file and apply command-line overrides on top of it.
pub fn load_config(args: &SplitArgs) -> anyhow::Result<Config> {
    let mut config = Config::load()?;
    apply_overrides(&mut config, args);
    config.export.validate()?;
    Ok(config)
}

/// Apply the flags that were given; absent flags keep the configured values.
pub fn apply_overrides(config: &mut Config, args: &SplitArgs) {
    let export = &mut config.export;
    if let Some(parts) = args.parts {
        export.part_count = parts;
    }
    if let Some(width) = args.width {
        export.target_width = width;
    }
    if let Some(height) = args.height {
        export.target_height = height;
    }
    if let Some(root) = &args.output_root {
        export.output_root = root.clone();
    }
    if let Some(naming) = args.naming {
        export.naming = naming.into();
    }
    if let Some(filter) = args.filter {
        export.filter = filter.into();
    }
    if let Some(quality) = args.quality {
        export.jpeg_quality = quality;
    }
    if args.keep_going {
        export.on_error = FailurePolicy::Skip;
    }
}
