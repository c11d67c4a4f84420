//! Instruction aggregation error types.

use std::path::PathBuf;

use thiserror::Error;

/// Fatal failures while assembling instructions.
///
/// Absent files never produce these; they indicate an environment problem
/// such as unreadable files or directories.
#[derive(Debug, Error)]
pub enum InstructionError {
    /// Reading a rule source failed for a reason other than absence.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// Path being read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The blocking directory walk did not complete.
    #[error("directory walk for {} aborted: {message}", path.display())]
    WalkAborted {
        /// Directory being walked.
        path: PathBuf,
        /// Join error description.
        message: String,
    },
}

/// Result type for instruction operations.
pub type Result<T> = std::result::Result<T, InstructionError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_display() {
        let err = InstructionError::Io {
            path: PathBuf::from("/repo/.clinerules"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert_eq!(err.to_string(), "failed to read /repo/.clinerules: denied");
    }
}
