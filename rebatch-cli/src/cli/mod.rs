pub mod args;
pub mod types;

pub use args::{Cli, Commands, CommonOpts};
pub use types::{OutputFormat, PreviewArg};
