//! Lint resolution error types.
//!
//! None of these escape [`LintConfigResolver::resolve`](crate::LintConfigResolver::resolve);
//! they describe why a single source produced nothing.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by an individual configuration source.
#[derive(Debug, Error)]
pub enum LintError {
    /// Reading a config file failed for a reason other than absence.
    #[error("failed to read {}: {source}", path.display())]
    Io {
        /// File that could not be read.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// A config file or probe output could not be parsed.
    #[error("failed to parse {origin}: {message}")]
    Parse {
        /// File name or probe description.
        origin: String,
        /// Parser message.
        message: String,
    },

    /// The linter process could not be started.
    #[error("failed to spawn `{command}`: {source}")]
    Spawn {
        /// Executable that failed to start.
        command: String,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The linter exited with a code other than 0 or 1.
    #[error("linter exited with code {code:?}: {stderr}")]
    ProbeExit {
        /// Exit code, `None` when killed by a signal.
        code: Option<i32>,
        /// Captured standard error.
        stderr: String,
    },

    /// The linter did not finish within the configured timeout.
    #[error("linter timed out after {timeout_ms}ms")]
    Timeout {
        /// Configured timeout in milliseconds.
        timeout_ms: u64,
    },

    /// The probe was cancelled.
    #[error("linter probe cancelled")]
    Cancelled,
}

impl LintError {
    /// Build a [`LintError::Parse`] from any displayable error.
    pub fn parse(origin: impl Into<String>, err: impl std::fmt::Display) -> Self {
        Self::Parse {
            origin: origin.into(),
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn io_display_includes_path() {
        let err = LintError::Io {
            path: PathBuf::from("/w/.eslintrc.json"),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        let msg = err.to_string();
        assert!(msg.contains("/w/.eslintrc.json"));
        assert!(msg.contains("denied"));
    }

    #[test]
    fn probe_exit_display() {
        let err = LintError::ProbeExit {
            code: Some(2),
            stderr: "Oops! Something went wrong!".into(),
        };
        assert_eq!(
            err.to_string(),
            "linter exited with code Some(2): Oops! Something went wrong!"
        );
    }

    #[test]
    fn parse_helper() {
        let err = LintError::parse(".eslintrc.yml", "bad indent");
        assert_eq!(err.to_string(), "failed to parse .eslintrc.yml: bad indent");
    }
}
