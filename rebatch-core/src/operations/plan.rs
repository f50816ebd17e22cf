use crate::output::PlanResult;
use crate::planner;
use crate::preview::{render_plan, Preview};
use crate::transform::RenameMode;
use anyhow::{anyhow, Result};
use std::path::Path;
use std::str::FromStr;

/// Plan operation (dry run): build and preview a plan without touching the
/// filesystem.
pub fn plan_operation(
    directory: &Path,
    mode: &RenameMode,
    preview_format: Option<&str>,
    use_color: bool,
) -> Result<(PlanResult, Option<String>)> {
    let plan = match planner::plan(directory, mode) {
        Ok(plan) => plan,
        Err(e) if e.is_informational() => {
            let result = PlanResult {
                directory: directory.to_path_buf(),
                mode: mode.to_string(),
                planned: 0,
                dry_run: true,
                plan: None,
            };
            return Ok((result, Some(e.to_string())));
        },
        Err(e) => return Err(e.into()),
    };

    let preview_output = match preview_format {
        Some(format) => {
            let format = Preview::from_str(format).map_err(|e| anyhow!(e))?;
            let rendered = render_plan(&plan, format, Some(use_color));
            (!rendered.is_empty()).then_some(rendered)
        },
        None => None,
    };

    let result = PlanResult {
        directory: directory.to_path_buf(),
        mode: mode.to_string(),
        planned: plan.len(),
        dry_run: true,
        plan: Some(plan),
    };

    Ok((result, preview_output))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    #[test]
    fn dry_run_leaves_files_alone() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("a.txt")).unwrap();

        let mode = RenameMode::prefix("x_");
        let (result, preview) =
            plan_operation(dir.path(), &mode, Some("list"), false).unwrap();

        assert_eq!(result.planned, 1);
        assert!(preview.unwrap().contains("a.txt -> x_a.txt"));
        assert!(dir.path().join("a.txt").exists());
        assert!(!dir.path().join("x_a.txt").exists());
    }

    #[test]
    fn empty_directory_is_informational() {
        let dir = TempDir::new().unwrap();
        let mode = RenameMode::prefix("x_");
        let (result, message) =
            plan_operation(dir.path(), &mode, Some("list"), false).unwrap();

        assert_eq!(result.planned, 0);
        assert!(message.unwrap().contains("no files found"));
    }

    #[test]
    fn bad_directory_is_an_error() {
        let dir = TempDir::new().unwrap();
        let mode = RenameMode::prefix("x_");
        assert!(plan_operation(&dir.path().join("nope"), &mode, None, false).is_err());
    }

    #[test]
    fn bad_preview_format_is_an_error() {
        let dir = TempDir::new().unwrap();
        File::create(dir.path().join("a.txt")).unwrap();
        let mode = RenameMode::prefix("x_");
        assert!(plan_operation(dir.path(), &mode, Some("diff"), false).is_err());
    }
}
