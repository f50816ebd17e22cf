use crate::error::Result;
use crate::planner::{RenameEntry, RenamePlan};
use serde::{Deserialize, Serialize};
use std::fs::{self, File, OpenOptions};
use std::io::Write;
use std::path::PathBuf;

/// Options for applying a rename plan.
#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    /// Append a timestamped line per rename to this file.
    pub log_file: Option<PathBuf>,
}

/// Per-entry result of an apply run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntryStatus {
    Renamed,
    /// A file already exists at the target path; the source was left
    /// untouched. This guard is what prevents silent overwrites.
    SkippedTargetExists,
    Failed(String),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EntryOutcome {
    pub entry: RenameEntry,
    pub status: EntryStatus,
}

/// Aggregate outcome of one apply run.
///
/// `renamed + skipped + failed` always equals the number of plan entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApplyReport {
    pub outcomes: Vec<EntryOutcome>,
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
}

struct ApplyLog {
    file: Option<File>,
}

impl ApplyLog {
    fn open(path: Option<&PathBuf>) -> Result<Self> {
        let file = match path {
            Some(path) => {
                if let Some(parent) = path.parent() {
                    if !parent.as_os_str().is_empty() {
                        fs::create_dir_all(parent)?;
                    }
                }
                Some(OpenOptions::new().create(true).append(true).open(path)?)
            },
            None => None,
        };
        Ok(Self { file })
    }

    fn log(&mut self, message: &str) {
        if let Some(ref mut file) = self.file {
            let _ = writeln!(
                file,
                "[{}] {}",
                chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
                message
            );
        }
    }
}

/// Apply a rename plan to the filesystem.
///
/// Entries are processed in plan order. Each rename is independent: a
/// failure is recorded and the batch continues. There is no rollback of
/// earlier successes. The source is re-checked immediately before each
/// rename, since the directory can change between planning and applying.
pub fn apply_plan(plan: &RenamePlan, options: &ApplyOptions) -> Result<ApplyReport> {
    let mut log = ApplyLog::open(options.log_file.as_ref())?;
    log.log(&format!(
        "applying {} renames in {} ({})",
        plan.len(),
        plan.directory.display(),
        plan.mode
    ));

    let mut outcomes = Vec::with_capacity(plan.len());
    let (mut renamed, mut skipped, mut failed) = (0, 0, 0);

    for entry in &plan.entries {
        let status = apply_entry(plan, entry);
        match &status {
            EntryStatus::Renamed => {
                renamed += 1;
                log.log(&format!("renamed {} -> {}", entry.old_name, entry.new_name));
            },
            EntryStatus::SkippedTargetExists => {
                skipped += 1;
                log.log(&format!(
                    "skipped {} -> {}: target exists",
                    entry.old_name, entry.new_name
                ));
            },
            EntryStatus::Failed(reason) => {
                failed += 1;
                log.log(&format!(
                    "failed {} -> {}: {}",
                    entry.old_name, entry.new_name, reason
                ));
            },
        }
        outcomes.push(EntryOutcome {
            entry: entry.clone(),
            status,
        });
    }

    log.log(&format!(
        "done: {} renamed, {} skipped, {} failed",
        renamed, skipped, failed
    ));

    Ok(ApplyReport {
        outcomes,
        renamed,
        skipped,
        failed,
    })
}

fn apply_entry(plan: &RenamePlan, entry: &RenameEntry) -> EntryStatus {
    let source = plan.directory.join(&entry.old_name);
    let target = plan.directory.join(&entry.new_name);

    // symlink_metadata so a dangling symlink at the target still counts as
    // occupied rather than being clobbered.
    if target.symlink_metadata().is_ok() {
        return EntryStatus::SkippedTargetExists;
    }

    if source.symlink_metadata().is_err() {
        return EntryStatus::Failed("source no longer exists".to_string());
    }

    match fs::rename(&source, &target) {
        Ok(()) => EntryStatus::Renamed,
        Err(e) => EntryStatus::Failed(e.to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::planner::plan;
    use crate::transform::RenameMode;
    use std::fs::File;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) {
        File::create(dir.path().join(name)).unwrap();
    }

    fn names_in(dir: &TempDir) -> Vec<String> {
        let mut names: Vec<String> = fs::read_dir(dir.path())
            .unwrap()
            .map(|e| e.unwrap().file_name().into_string().unwrap())
            .collect();
        names.sort_unstable();
        names
    }

    #[test]
    fn applies_every_entry() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "a.txt");
        touch(&dir, "b.txt");
        touch(&dir, "c.txt");

        let plan = plan(dir.path(), &RenameMode::prefix("x_")).unwrap();
        let report = apply_plan(&plan, &ApplyOptions::default()).unwrap();

        assert_eq!(report.renamed, 3);
        assert_eq!(report.skipped, 0);
        assert_eq!(report.failed, 0);
        assert_eq!(names_in(&dir), ["x_a.txt", "x_b.txt", "x_c.txt"]);
    }

    #[test]
    fn existing_target_is_skipped_and_source_kept() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "a.txt");
        touch(&dir, "b.txt");
        touch(&dir, "x_a.txt");

        // Hand-built plan so the pre-existing x_a.txt is only a target, not
        // a source of its own.
        let plan = RenamePlan {
            directory: dir.path().to_path_buf(),
            mode: "prefix 'x_'".to_string(),
            entries: vec![
                RenameEntry {
                    old_name: "a.txt".to_string(),
                    new_name: "x_a.txt".to_string(),
                },
                RenameEntry {
                    old_name: "b.txt".to_string(),
                    new_name: "x_b.txt".to_string(),
                },
            ],
        };
        let report = apply_plan(&plan, &ApplyOptions::default()).unwrap();

        assert_eq!(report.renamed, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(
            report.outcomes[0].status,
            EntryStatus::SkippedTargetExists,
            "a.txt -> x_a.txt should be skipped"
        );
        // a.txt untouched, b.txt renamed, pre-existing x_a.txt intact.
        assert_eq!(names_in(&dir), ["a.txt", "x_a.txt", "x_b.txt"]);
    }

    #[test]
    fn vanished_source_fails_entry_but_batch_continues() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "a.txt");
        touch(&dir, "b.txt");

        let plan = plan(dir.path(), &RenameMode::suffix("_v2")).unwrap();
        fs::remove_file(dir.path().join("a.txt")).unwrap();

        let report = apply_plan(&plan, &ApplyOptions::default()).unwrap();
        assert_eq!(report.renamed, 1);
        assert_eq!(report.failed, 1);
        assert!(matches!(report.outcomes[0].status, EntryStatus::Failed(_)));
        assert_eq!(names_in(&dir), ["b_v2.txt"]);
    }

    #[test]
    fn second_collision_is_skipped_after_first_wins() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "a1.txt");
        touch(&dir, "a2.txt");

        let mode = RenameMode::regex(r"\d", "").unwrap();
        let plan = plan(dir.path(), &mode).unwrap();
        let report = apply_plan(&plan, &ApplyOptions::default()).unwrap();

        assert_eq!(report.renamed, 1);
        assert_eq!(report.skipped, 1);
        assert_eq!(names_in(&dir), ["a.txt", "a2.txt"]);
    }

    #[test]
    fn counts_always_cover_the_plan() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "a.txt");
        touch(&dir, "b.txt");
        touch(&dir, "x_b.txt");

        let plan = plan(dir.path(), &RenameMode::prefix("x_")).unwrap();
        let report = apply_plan(&plan, &ApplyOptions::default()).unwrap();
        assert_eq!(
            report.renamed + report.skipped + report.failed,
            report.outcomes.len()
        );
        assert_eq!(report.outcomes.len(), plan.len());
    }

    #[test]
    fn log_file_records_each_rename() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "a.txt");

        let log_path = dir.path().join("logs").join("apply.log");
        let plan = plan(dir.path(), &RenameMode::prefix("x_")).unwrap();
        let options = ApplyOptions {
            log_file: Some(log_path.clone()),
        };
        apply_plan(&plan, &options).unwrap();

        let log = fs::read_to_string(log_path).unwrap();
        assert!(log.contains("renamed a.txt -> x_a.txt"));
        assert!(log.contains("1 renamed, 0 skipped, 0 failed"));
    }
}
