//! Linter configuration resolution settings.

use serde::{Deserialize, Serialize};

/// Conventional linter config files, in lookup order.
pub const DEFAULT_LINT_CONFIG_FILES: &[&str] = &[
    ".eslintrc",
    ".eslintrc.js",
    ".eslintrc.json",
    ".eslintrc.yaml",
    ".eslintrc.yml",
];

/// Files tried, in order, as the path the linter computes configuration for.
pub const DEFAULT_REPRESENTATIVE_FILES: &[&str] =
    &["src/index.ts", "src/index.js", "index.ts", "index.js"];

/// Settings for the lint config resolver.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LintSettings {
    /// Whether to ask the linter for its computed configuration first.
    pub enabled: bool,
    /// Executable used for the computed-configuration probe.
    pub command: String,
    /// Arguments passed before the representative file path.
    pub args: Vec<String>,
    /// Probe timeout in milliseconds.
    pub timeout_ms: u64,
    /// Candidate representative files, relative to the workspace root.
    pub representative_files: Vec<String>,
    /// Conventional config file names, in lookup order.
    pub config_files: Vec<String>,
    /// Consult `package.json`'s `eslintConfig` after the config files.
    pub include_package_json: bool,
}

impl Default for LintSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            command: "npx".to_string(),
            args: vec!["eslint".to_string(), "--print-config".to_string()],
            timeout_ms: 30_000,
            representative_files: DEFAULT_REPRESENTATIVE_FILES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            config_files: DEFAULT_LINT_CONFIG_FILES
                .iter()
                .map(|s| (*s).to_string())
                .collect(),
            include_package_json: true,
        }
    }
}
