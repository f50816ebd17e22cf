use crate::error::{Error, Result};
use crate::transform::RenameMode;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// One proposed rename: both names are relative to the plan's directory.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RenameEntry {
    pub old_name: String,
    pub new_name: String,
}

/// The full ordered list of proposed renames, built before any filesystem
/// mutation. Entries are ordered by the lexicographic sort of the original
/// names, so repeated runs over an unchanged directory produce identical
/// plans.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenamePlan {
    pub directory: PathBuf,
    /// Human-readable description of the mode that produced this plan.
    pub mode: String,
    pub entries: Vec<RenameEntry>,
}

impl RenamePlan {
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Build a rename plan for every regular file directly inside `directory`.
///
/// Directory entries that are not regular files are excluded: directories,
/// special files, and symlinks (`DirEntry::file_type` does not follow
/// links, so even a symlink pointing at a file is skipped). Entries whose
/// names are not valid UTF-8 are skipped as well. Filenames are sorted in
/// byte order before transforming, and pairs where the transform produced
/// the same name are dropped.
pub fn plan(directory: &Path, mode: &RenameMode) -> Result<RenamePlan> {
    if !directory.is_dir() {
        return Err(Error::NotADirectory(directory.to_path_buf()));
    }

    let mut names: Vec<String> = Vec::new();
    for entry in fs::read_dir(directory)? {
        let entry = entry?;
        if !entry.file_type()?.is_file() {
            continue;
        }
        if let Ok(name) = entry.file_name().into_string() {
            names.push(name);
        }
    }

    if names.is_empty() {
        return Err(Error::NoFilesFound(directory.to_path_buf()));
    }

    names.sort_unstable();

    let mut entries = Vec::new();
    let mut counter = 0usize;
    for (i, name) in names.iter().enumerate() {
        if mode.uses_counter() {
            counter += 1;
        }
        let new_name = mode.apply(name, i + 1, counter);
        if new_name == *name {
            continue;
        }
        entries.push(RenameEntry {
            old_name: name.clone(),
            new_name,
        });
    }

    if entries.is_empty() {
        return Err(Error::NoChangesNeeded);
    }

    Ok(RenamePlan {
        directory: directory.to_path_buf(),
        mode: mode.to_string(),
        entries,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs::File;
    use tempfile::TempDir;

    fn touch(dir: &TempDir, name: &str) {
        File::create(dir.path().join(name)).unwrap();
    }

    #[test]
    fn plan_is_sorted_by_original_name() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "c.txt");
        touch(&dir, "a.txt");
        touch(&dir, "b.txt");

        let plan = plan(dir.path(), &RenameMode::prefix("x_")).unwrap();
        let olds: Vec<_> = plan.entries.iter().map(|e| e.old_name.as_str()).collect();
        assert_eq!(olds, ["a.txt", "b.txt", "c.txt"]);
    }

    #[test]
    fn plan_is_stable_across_runs() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "b.txt");
        touch(&dir, "a.txt");

        let mode = RenameMode::suffix("_v2");
        let first = plan(dir.path(), &mode).unwrap();
        let second = plan(dir.path(), &mode).unwrap();
        assert_eq!(first.entries, second.entries);
    }

    #[test]
    fn subdirectories_are_excluded() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "a.txt");
        fs::create_dir(dir.path().join("subdir")).unwrap();

        let plan = plan(dir.path(), &RenameMode::prefix("x_")).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.entries[0].old_name, "a.txt");
    }

    #[cfg(unix)]
    #[test]
    fn symlinks_are_excluded() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "real.txt");
        std::os::unix::fs::symlink(dir.path().join("real.txt"), dir.path().join("link.txt"))
            .unwrap();

        let plan = plan(dir.path(), &RenameMode::prefix("x_")).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.entries[0].old_name, "real.txt");
    }

    #[test]
    fn missing_directory_fails() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("nope");
        assert!(matches!(
            plan(&missing, &RenameMode::prefix("x_")),
            Err(Error::NotADirectory(_))
        ));
    }

    #[test]
    fn file_path_is_not_a_directory() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "a.txt");
        assert!(matches!(
            plan(&dir.path().join("a.txt"), &RenameMode::prefix("x_")),
            Err(Error::NotADirectory(_))
        ));
    }

    #[test]
    fn empty_directory_reports_no_files() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            plan(dir.path(), &RenameMode::prefix("x_")),
            Err(Error::NoFilesFound(_))
        ));
    }

    #[test]
    fn noop_entries_are_dropped() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "keep.txt");
        touch(&dir, "old_name.txt");

        let mode = RenameMode::replace("old", "new").unwrap();
        let plan = plan(dir.path(), &mode).unwrap();
        assert_eq!(plan.len(), 1);
        assert_eq!(plan.entries[0].old_name, "old_name.txt");
        assert_eq!(plan.entries[0].new_name, "new_name.txt");
    }

    #[test]
    fn all_noops_reports_no_changes() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "a.txt");
        assert!(matches!(
            plan(dir.path(), &RenameMode::prefix("")),
            Err(Error::NoChangesNeeded)
        ));
    }

    #[test]
    fn pattern_mode_counts_in_sorted_order() {
        let dir = TempDir::new().unwrap();
        touch(&dir, "zebra.jpg");
        touch(&dir, "apple.png");
        touch(&dir, "mango.gif");

        let mode = RenameMode::pattern("file_{counter:03d}{ext}").unwrap();
        let plan = plan(dir.path(), &mode).unwrap();
        let news: Vec<_> = plan.entries.iter().map(|e| e.new_name.as_str()).collect();
        assert_eq!(news, ["file_001.png", "file_002.gif", "file_003.jpg"]);
    }

    #[test]
    fn colliding_targets_are_kept_in_plan() {
        // The planner does not deduplicate identical targets; collisions are
        // detected per item at apply time.
        let dir = TempDir::new().unwrap();
        touch(&dir, "a1.txt");
        touch(&dir, "a2.txt");

        let mode = RenameMode::regex(r"\d", "").unwrap();
        let plan = plan(dir.path(), &mode).unwrap();
        assert_eq!(plan.len(), 2);
        assert!(plan.entries.iter().all(|e| e.new_name == "a.txt"));
    }
}
