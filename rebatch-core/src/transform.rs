use crate::error::{Error, Result};
use crate::template::Template;
use regex::Regex;
use std::fmt;

/// Split a filename into stem and extension.
///
/// The extension is the portion from the last `.` to the end, including the
/// dot. A name with no dot has an empty extension. Concatenating the two
/// halves always reconstructs the original name.
pub fn split_name(name: &str) -> (&str, &str) {
    match name.rfind('.') {
        Some(idx) => name.split_at(idx),
        None => (name, ""),
    }
}

/// The rename transformation selected for a run.
///
/// Exactly one mode is active per invocation. All mode arguments are
/// validated at construction, before any filesystem access: a bad regex or
/// template never gets as far as planning.
#[derive(Debug, Clone)]
pub enum RenameMode {
    /// Prepend a value to the stem.
    Prefix { prefix: String },
    /// Append a value to the stem, before the extension.
    Suffix { suffix: String },
    /// Replace all occurrences of a literal substring in the stem.
    Replace { old: String, new: String },
    /// Replace all regex matches in the stem, with `$1`-style backreferences.
    RegexReplace { pattern: Regex, replacement: String },
    /// Rebuild the whole name from a template over `{name}`, `{ext}`,
    /// `{index}` and `{counter}`.
    PatternFormat { template: Template },
}

impl RenameMode {
    pub fn prefix(prefix: impl Into<String>) -> Self {
        Self::Prefix {
            prefix: prefix.into(),
        }
    }

    pub fn suffix(suffix: impl Into<String>) -> Self {
        Self::Suffix {
            suffix: suffix.into(),
        }
    }

    /// Literal replacement mode. An empty `old` is rejected: it would match
    /// everywhere and nowhere, so the run fails up front instead.
    pub fn replace(old: impl Into<String>, new: impl Into<String>) -> Result<Self> {
        let old = old.into();
        if old.is_empty() {
            return Err(Error::EmptyOldText);
        }
        Ok(Self::Replace {
            old,
            new: new.into(),
        })
    }

    pub fn regex(pattern: &str, replacement: impl Into<String>) -> Result<Self> {
        let pattern = Regex::new(pattern).map_err(|e| Error::InvalidPattern {
            pattern: pattern.to_string(),
            source: Box::new(e),
        })?;
        Ok(Self::RegexReplace {
            pattern,
            replacement: replacement.into(),
        })
    }

    pub fn pattern(template: &str) -> Result<Self> {
        Ok(Self::PatternFormat {
            template: Template::parse(template)?,
        })
    }

    /// True if this mode consumes the per-file counter.
    pub fn uses_counter(&self) -> bool {
        matches!(self, Self::PatternFormat { .. })
    }

    /// Compute the new filename for `name`.
    ///
    /// `index` is the 1-based position of the file in the sorted listing;
    /// `counter` is the separately incremented 1-based value for pattern
    /// mode. The extension is preserved in every mode except pattern mode,
    /// where the template decides whether `{ext}` appears.
    pub fn apply(&self, name: &str, index: usize, counter: usize) -> String {
        let (stem, ext) = split_name(name);
        match self {
            Self::Prefix { prefix } => format!("{prefix}{stem}{ext}"),
            Self::Suffix { suffix } => format!("{stem}{suffix}{ext}"),
            Self::Replace { old, new } => {
                format!("{}{ext}", stem.replace(old.as_str(), new))
            },
            Self::RegexReplace {
                pattern,
                replacement,
            } => {
                format!("{}{ext}", pattern.replace_all(stem, replacement.as_str()))
            },
            Self::PatternFormat { template } => template.render(stem, ext, index, counter),
        }
    }
}

impl fmt::Display for RenameMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Prefix { prefix } => write!(f, "prefix '{prefix}'"),
            Self::Suffix { suffix } => write!(f, "suffix '{suffix}'"),
            Self::Replace { old, new } => write!(f, "replace '{old}' -> '{new}'"),
            Self::RegexReplace {
                pattern,
                replacement,
            } => write!(f, "regex '{pattern}' -> '{replacement}'"),
            Self::PatternFormat { template } => write!(f, "pattern '{}'", template.raw()),
        }
    }
}
