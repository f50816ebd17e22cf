use anyhow::Result;
use rebatch_core::{
    plan_operation, rename_operation, ApplyOptions, Config, OutputFormatter, RenameMode,
};
use std::path::Path;

use crate::cli::{CommonOpts, OutputFormat};

pub fn handle_rename(
    directory: &Path,
    mode: &RenameMode,
    opts: &CommonOpts,
    config: &Config,
    use_color: bool,
) -> Result<()> {
    // No preview mixed into machine-readable output.
    let preview_format = match opts.output {
        OutputFormat::Json => None,
        OutputFormat::Summary => Some(match opts.preview {
            Some(p) => p.as_str().to_string(),
            None => config.defaults.preview_format.clone(),
        }),
    };

    if opts.dry_run {
        let (result, preview) =
            plan_operation(directory, mode, preview_format.as_deref(), use_color)?;
        match opts.output {
            OutputFormat::Json => println!("{}", result.format_json()),
            OutputFormat::Summary => {
                if let Some(preview) = preview {
                    print!("{preview}");
                }
                if !opts.quiet {
                    print!("{}", result.format_summary());
                }
            },
        }
        return Ok(());
    }

    let apply_options = ApplyOptions {
        log_file: opts.log.clone().or_else(|| config.defaults.log_file.clone()),
    };

    let (result, message) = rename_operation(
        directory,
        mode,
        preview_format.as_deref(),
        opts.force,
        use_color,
        &apply_options,
    )?;

    match opts.output {
        OutputFormat::Json => println!("{}", result.format_json()),
        OutputFormat::Summary => {
            if let Some(message) = message {
                println!("{message}");
            }
            if !opts.quiet {
                print!("{}", result.format_summary());
            }
        },
    }

    Ok(())
}
