#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::missing_const_for_fn)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod apply;
pub mod config;
pub mod error;
pub mod github;
pub mod operations;
pub mod output;
pub mod planner;
pub mod preview;
pub mod template;
pub mod transform;

pub use apply::{apply_plan, ApplyOptions, ApplyReport, EntryOutcome, EntryStatus};
pub use config::Config;
pub use error::{Error, Result};
pub use github::{
    export_records, ExportRecord, GitHubClient, Repository, SearchQuery, DEFAULT_API_URL,
};
pub use operations::{plan_operation, rename_operation, search_operation};
pub use output::{
    OutputFormat, OutputFormatter, PlanResult, RenameOutcomeItem, RenameResult, SearchResult,
};
pub use planner::{plan, RenameEntry, RenamePlan};
pub use preview::{render_plan, Preview};
pub use template::Template;
pub use transform::{split_name, RenameMode};
