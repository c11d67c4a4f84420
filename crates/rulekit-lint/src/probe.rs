//! Computed-configuration probe.
//!
//! The linter is the only authority on inherited and extended configuration,
//! so the first resolution step asks it directly. [`EffectiveConfigProbe`] is
//! the seam; [`EslintCliProbe`] is the production implementation, running the
//! linter's "print effective config" command as a subprocess.

use std::path::Path;
use std::process::Stdio;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use serde_json::Value;
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use rulekit_settings::LintSettings;

use crate::errors::LintError;

/// Computes the linter's effective configuration for a file.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait EffectiveConfigProbe: Send + Sync {
    /// Return the fully resolved configuration object that applies to
    /// `file` when linting inside `workspace`.
    async fn effective_config(&self, workspace: &Path, file: &Path) -> Result<Value, LintError>;
}

/// Runs `<command> <args...> <file>` in the workspace and parses stdout as JSON.
///
/// Exit codes 0 and 1 both count as success: linters exit 1 when the file has
/// violations, which does not affect the printed configuration.
pub struct EslintCliProbe {
    command: String,
    args: Vec<String>,
    timeout: Duration,
    cancellation: CancellationToken,
}

impl EslintCliProbe {
    /// Create a probe running `command args... <file>`.
    pub fn new(command: impl Into<String>, args: Vec<String>, timeout: Duration) -> Self {
        Self {
            command: command.into(),
            args,
            timeout,
            cancellation: CancellationToken::new(),
        }
    }

    /// Create a probe from lint settings.
    pub fn from_settings(settings: &LintSettings) -> Self {
        Self::new(
            settings.command.clone(),
            settings.args.clone(),
            Duration::from_millis(settings.timeout_ms),
        )
    }

    /// Attach a cancellation token; cancelling it kills an in-flight probe.
    #[must_use]
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancellation = token;
        self
    }

    /// Human-readable command line, for logs and errors.
    fn command_line(&self) -> String {
        std::iter::once(self.command.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[async_trait]
impl EffectiveConfigProbe for EslintCliProbe {
    async fn effective_config(&self, workspace: &Path, file: &Path) -> Result<Value, LintError> {
        let start = Instant::now();

        let mut cmd = tokio::process::Command::new(&self.command);
        let _ = cmd
            .args(&self.args)
            .arg(file)
            .current_dir(workspace)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        debug!(command = %self.command_line(), file = %file.display(), "spawning linter");

        let child = cmd.spawn().map_err(|source| LintError::Spawn {
            command: self.command.clone(),
            source,
        })?;

        // Dropping the wait future on timeout/cancel kills the child.
        let output = tokio::select! {
            result = child.wait_with_output() => result.map_err(|source| LintError::Spawn {
                command: self.command.clone(),
                source,
            })?,
            () = tokio::time::sleep(self.timeout) => {
                let timeout_ms = u64::try_from(self.timeout.as_millis()).unwrap_or(u64::MAX);
                warn!(command = %self.command_line(), timeout_ms, "linter probe timed out");
                return Err(LintError::Timeout { timeout_ms });
            }
            () = self.cancellation.cancelled() => {
                debug!(command = %self.command_line(), "linter probe cancelled");
                return Err(LintError::Cancelled);
            }
        };

        let duration_ms = u64::try_from(start.elapsed().as_millis()).unwrap_or(u64::MAX);
        let code = output.status.code();
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_owned();
        if !stderr.is_empty() {
            debug!(%stderr, "linter stderr");
        }
        debug!(?code, duration_ms, "linter probe completed");

        if !matches!(code, Some(0 | 1)) {
            return Err(LintError::ProbeExit { code, stderr });
        }

        serde_json::from_slice(&output.stdout)
            .map_err(|e| LintError::parse(format!("output of `{}`", self.command_line()), e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_matches::assert_matches;

    fn sh_probe(script: &str, timeout_ms: u64) -> EslintCliProbe {
        // `sh -c <script> <file>`: the file lands in $0
        EslintCliProbe::new(
            "sh",
            vec!["-c".into(), script.into()],
            Duration::from_millis(timeout_ms),
        )
    }

    #[test]
    fn from_settings_uses_configured_command() {
        let probe = EslintCliProbe::from_settings(&LintSettings::default());
        assert_eq!(probe.command_line(), "npx eslint --print-config");
        assert_eq!(probe.timeout, Duration::from_millis(30_000));
    }

    #[tokio::test]
    async fn parses_stdout_on_exit_zero() {
        let tmp = tempfile::tempdir().unwrap();
        let probe = sh_probe(r#"echo '{"rules":{"semi":"error"}}'"#, 10_000);
        let value = probe
            .effective_config(tmp.path(), Path::new("index.js"))
            .await
            .unwrap();
        assert_eq!(value["rules"]["semi"], "error");
    }

    #[tokio::test]
    async fn exit_one_is_success() {
        let tmp = tempfile::tempdir().unwrap();
        let probe = sh_probe(r#"echo '{"rules":{"semi":2}}'; echo lint >&2; exit 1"#, 10_000);
        let value = probe
            .effective_config(tmp.path(), Path::new("index.js"))
            .await
            .unwrap();
        assert_eq!(value["rules"]["semi"], 2);
    }

    #[tokio::test]
    async fn exit_two_is_failure() {
        let tmp = tempfile::tempdir().unwrap();
        let probe = sh_probe(r#"echo '{"rules":{"semi":2}}'; echo boom >&2; exit 2"#, 10_000);
        let err = probe
            .effective_config(tmp.path(), Path::new("index.js"))
            .await
            .unwrap_err();
        assert_matches!(err, LintError::ProbeExit { code: Some(2), ref stderr } if stderr == "boom");
    }

    #[tokio::test]
    async fn runs_in_workspace_directory() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("marker.json"), r#"{"rules":{"curly":1}}"#).unwrap();
        let probe = sh_probe("cat marker.json", 10_000);
        let value = probe
            .effective_config(tmp.path(), Path::new("index.js"))
            .await
            .unwrap();
        assert_eq!(value["rules"]["curly"], 1);
    }

    #[tokio::test]
    async fn invalid_output_is_parse_error() {
        let tmp = tempfile::tempdir().unwrap();
        let probe = sh_probe("echo not json", 10_000);
        let err = probe
            .effective_config(tmp.path(), Path::new("index.js"))
            .await
            .unwrap_err();
        assert_matches!(err, LintError::Parse { .. });
    }

    #[tokio::test]
    async fn missing_executable_is_spawn_error() {
        let tmp = tempfile::tempdir().unwrap();
        let probe = EslintCliProbe::new(
            "rulekit-definitely-not-a-linter",
            vec![],
            Duration::from_secs(5),
        );
        let err = probe
            .effective_config(tmp.path(), Path::new("index.js"))
            .await
            .unwrap_err();
        assert_matches!(err, LintError::Spawn { .. });
    }

    #[tokio::test]
    async fn times_out() {
        let tmp = tempfile::tempdir().unwrap();
        let probe = sh_probe("sleep 10", 50);
        let err = probe
            .effective_config(tmp.path(), Path::new("index.js"))
            .await
            .unwrap_err();
        assert_matches!(err, LintError::Timeout { timeout_ms: 50 });
    }

    #[tokio::test]
    async fn cancellation_stops_probe() {
        let tmp = tempfile::tempdir().unwrap();
        let token = CancellationToken::new();
        token.cancel();
        let probe = sh_probe("sleep 10", 10_000).with_cancellation(token);
        let err = probe
            .effective_config(tmp.path(), Path::new("index.js"))
            .await
            .unwrap_err();
        assert_matches!(err, LintError::Cancelled);
    }
}
