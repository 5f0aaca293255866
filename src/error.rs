//! Fatal configuration errors.
//!
//! Everything else travels as `Box<dyn Error>`; these variants exist so a
//! caller can tell a bad group definition apart from an I/O failure.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum RuleError {
    /// `--group-with` given a group name but no VM names.
    #[error("no VM name specified for --group-with {group}")]
    EmptyIncludeGroup { group: String },

    /// Pattern for a regexp group does not compile.
    #[error("invalid regexp '{pattern}' for group {group}: {source}")]
    InvalidPattern {
        group: String,
        pattern: String,
        #[source]
        source: regex::Error,
    },
}
