use crate::apply::{apply_plan, ApplyOptions};
use crate::output::RenameResult;
use crate::planner::{self, RenamePlan};
use crate::preview::{render_plan, Preview};
use crate::transform::RenameMode;
use anyhow::{anyhow, Context, Result};
use std::io::{self, Write as IoWrite};
use std::path::Path;
use std::str::FromStr;

/// Rename operation: plan, preview, confirm, apply, report.
///
/// The preview (if a format is given) is printed to stdout before the
/// confirmation prompt. With `auto_approve` the prompt is skipped and the
/// plan is applied immediately; declining the prompt aborts with zero
/// filesystem mutations. The returned message, when present, is an
/// informational note for the operator ("nothing to do", "Aborted.").
pub fn rename_operation(
    directory: &Path,
    mode: &RenameMode,
    preview_format: Option<&str>,
    auto_approve: bool,
    use_color: bool,
    apply_options: &ApplyOptions,
) -> Result<(RenameResult, Option<String>)> {
    let plan = match planner::plan(directory, mode) {
        Ok(plan) => plan,
        Err(e) if e.is_informational() => {
            let result = RenameResult::empty(directory.to_path_buf(), mode.to_string(), false);
            return Ok((result, Some(e.to_string())));
        },
        Err(e) => return Err(e.into()),
    };

    // Print the preview before asking for confirmation.
    if let Some(format) = preview_format {
        let format = Preview::from_str(format).map_err(|e| anyhow!(e))?;
        let rendered = render_plan(&plan, format, Some(use_color));
        if !rendered.is_empty() {
            print!("{rendered}");
        }
    }

    if !auto_approve && !get_user_confirmation(&plan)? {
        let result = RenameResult::empty(directory.to_path_buf(), mode.to_string(), true);
        return Ok((result, Some("Aborted.".to_string())));
    }

    let report = apply_plan(&plan, apply_options).with_context(|| {
        format!("Failed to apply rename plan in {}", directory.display())
    })?;

    let result = RenameResult::from_report(directory.to_path_buf(), mode.to_string(), &report);
    Ok((result, None))
}

fn get_user_confirmation(plan: &RenamePlan) -> Result<bool> {
    print!("Rename {} file(s)? [y/N]: ", plan.len());
    io::stdout().flush().context("Failed to flush stdout")?;

    let mut input = String::new();
    io::stdin()
        .read_line(&mut input)
        .context("Failed to read user input")?;
    let input = input.trim().to_lowercase();

    Ok(input == "y" || input == "yes")
}
