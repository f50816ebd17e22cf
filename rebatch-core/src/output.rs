use crate::apply::{ApplyReport, EntryStatus};
use crate::github::{ExportRecord, Repository};
use crate::planner::RenamePlan;
use serde::{Deserialize, Serialize};
use serde_json::json;
use std::fmt::Write;
use std::path::PathBuf;

/// Output format for CLI commands
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    Summary,
    Json,
}

/// Result of a plan (dry-run) operation
#[derive(Debug, Serialize, Deserialize)]
pub struct PlanResult {
    pub directory: PathBuf,
    pub mode: String,
    pub planned: usize,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub plan: Option<RenamePlan>,
}

/// Per-entry outcome in a rename result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenameOutcomeItem {
    pub old_name: String,
    pub new_name: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<String>,
}

/// Result of a full rename run
#[derive(Debug, Serialize, Deserialize)]
pub struct RenameResult {
    pub directory: PathBuf,
    pub mode: String,
    pub planned: usize,
    pub renamed: usize,
    pub skipped: usize,
    pub failed: usize,
    pub aborted: bool,
    pub outcomes: Vec<RenameOutcomeItem>,
}

impl RenameResult {
    pub fn from_report(directory: PathBuf, mode: String, report: &ApplyReport) -> Self {
        let outcomes = report
            .outcomes
            .iter()
            .map(|o| {
                let (status, reason) = match &o.status {
                    EntryStatus::Renamed => ("renamed", None),
                    EntryStatus::SkippedTargetExists => {
                        ("skipped", Some("target already exists".to_string()))
                    },
                    EntryStatus::Failed(reason) => ("failed", Some(reason.clone())),
                };
                RenameOutcomeItem {
                    old_name: o.entry.old_name.clone(),
                    new_name: o.entry.new_name.clone(),
                    status: status.to_string(),
                    reason,
                }
            })
            .collect();

        Self {
            directory,
            mode,
            planned: report.outcomes.len(),
            renamed: report.renamed,
            skipped: report.skipped,
            failed: report.failed,
            aborted: false,
            outcomes,
        }
    }

    /// An empty result for runs that stopped before touching the filesystem
    /// (nothing to do, or the operator declined the plan).
    pub fn empty(directory: PathBuf, mode: String, aborted: bool) -> Self {
        Self {
            directory,
            mode,
            planned: 0,
            renamed: 0,
            skipped: 0,
            failed: 0,
            aborted,
            outcomes: Vec::new(),
        }
    }
}

/// Result of a repository search
#[derive(Debug, Serialize, Deserialize)]
pub struct SearchResult {
    pub query: String,
    pub repositories: Vec<Repository>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exported_to: Option<PathBuf>,
}

/// Trait for formatting output in different formats
pub trait OutputFormatter {
    fn format(&self, format: OutputFormat) -> String {
        match format {
            OutputFormat::Json => self.format_json(),
            OutputFormat::Summary => self.format_summary(),
        }
    }
    fn format_json(&self) -> String;
    fn format_summary(&self) -> String;
}

impl OutputFormatter for PlanResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "plan",
            "directory": self.directory,
            "mode": self.mode,
            "dry_run": self.dry_run,
            "summary": {
                "planned": self.planned,
            },
            "plan": self.plan,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();
        writeln!(
            output,
            "Planned {} rename(s) in {} ({})",
            self.planned,
            self.directory.display(),
            self.mode
        )
        .unwrap();
        if self.dry_run {
            output.push_str("Dry run: no files were changed\n");
        }
        output
    }
}

impl OutputFormatter for RenameResult {
    fn format_json(&self) -> String {
        serde_json::to_string(&json!({
            "success": true,
            "operation": "rename",
            "directory": self.directory,
            "mode": self.mode,
            "aborted": self.aborted,
            "summary": {
                "planned": self.planned,
                "renamed": self.renamed,
                "skipped": self.skipped,
                "failed": self.failed,
            },
            "outcomes": self.outcomes,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        for item in &self.outcomes {
            match item.status.as_str() {
                "skipped" => {
                    writeln!(
                        output,
                        "skipped '{}' -> '{}' (target already exists)",
                        item.old_name, item.new_name
                    )
                    .unwrap();
                },
                "failed" => {
                    writeln!(
                        output,
                        "failed '{}' -> '{}': {}",
                        item.old_name,
                        item.new_name,
                        item.reason.as_deref().unwrap_or("unknown error")
                    )
                    .unwrap();
                },
                _ => {},
            }
        }

        // Skipped entries count as failures in the closing tally: the file
        // did not end up renamed.
        writeln!(
            output,
            "{} succeeded, {} failed",
            self.renamed,
            self.skipped + self.failed
        )
        .unwrap();
        output
    }
}

impl OutputFormatter for SearchResult {
    fn format_json(&self) -> String {
        let records: Vec<ExportRecord> =
            self.repositories.iter().map(ExportRecord::from).collect();
        serde_json::to_string(&json!({
            "success": true,
            "operation": "search",
            "query": self.query,
            "count": records.len(),
            "repositories": records,
        }))
        .unwrap_or_default()
    }

    fn format_summary(&self) -> String {
        let mut output = String::new();

        if self.repositories.is_empty() {
            output.push_str("No repositories found in the specified date range.\n");
            return output;
        }

        writeln!(output, "Found {} repositories:\n", self.repositories.len()).unwrap();
        for (i, repo) in self.repositories.iter().enumerate() {
            writeln!(
                output,
                "{}. {} - ★ {}",
                i + 1,
                repo.full_name,
                repo.stargazers_count
            )
            .unwrap();
            writeln!(
                output,
                "   Description: {}",
                repo.description.as_deref().unwrap_or("No description")
            )
            .unwrap();
            writeln!(output, "   URL: {}", repo.html_url).unwrap();
            writeln!(
                output,
                "   Language: {}\n",
                repo.language.as_deref().unwrap_or("Not specified")
            )
            .unwrap();
        }

        if let Some(path) = &self.exported_to {
            writeln!(output, "Results exported to {}", path.display()).unwrap();
        }

        output
    }
}
