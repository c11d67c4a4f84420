//! Configuration sources for the resolution chain.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::errors::LintError;
use crate::formats;
use crate::probe::EffectiveConfigProbe;
use crate::types::RuleConfig;

/// One step of the resolution chain.
///
/// `Ok(None)` means the source is absent. Errors mean the source exists but
/// could not be used; the resolver treats both the same way.
#[async_trait]
pub trait ConfigSource: Send + Sync {
    /// Short name for logs (`"computed"`, `".eslintrc.json"`, ...).
    fn name(&self) -> &str;

    /// Load the rule mapping this source provides for `workspace`.
    async fn load(&self, workspace: &Path) -> Result<Option<RuleConfig>, LintError>;
}

// =============================================================================
// Computed configuration
// =============================================================================

/// Asks the linter for the configuration it computes for a representative file.
pub struct ComputedConfigSource {
    probe: Arc<dyn EffectiveConfigProbe>,
    candidates: Vec<String>,
}

impl ComputedConfigSource {
    /// Create a source probing the first existing file among `candidates`
    /// (paths relative to the workspace root).
    pub fn new(probe: Arc<dyn EffectiveConfigProbe>, candidates: Vec<String>) -> Self {
        Self { probe, candidates }
    }

    /// Pick the representative file.
    ///
    /// The first candidate that exists wins. If none exist, the first
    /// candidate is used anyway: the linter resolves configuration by path,
    /// so the file does not need to exist.
    async fn representative_file(&self, workspace: &Path) -> Option<PathBuf> {
        for candidate in &self.candidates {
            if tokio::fs::try_exists(workspace.join(candidate))
                .await
                .unwrap_or(false)
            {
                return Some(PathBuf::from(candidate));
            }
        }
        self.candidates.first().map(PathBuf::from)
    }
}

#[async_trait]
impl ConfigSource for ComputedConfigSource {
    fn name(&self) -> &str {
        "computed"
    }

    async fn load(&self, workspace: &Path) -> Result<Option<RuleConfig>, LintError> {
        let Some(file) = self.representative_file(workspace).await else {
            return Ok(None);
        };
        debug!(file = %file.display(), "probing computed configuration");
        let config = self.probe.effective_config(workspace, &file).await?;
        Ok(Some(RuleConfig::from_config_object(&config)))
    }
}

// =============================================================================
// Config files
// =============================================================================

/// On-disk format of a conventional config file.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigFormat {
    /// JSON with comments.
    Json,
    /// YAML.
    Yaml,
    /// Extensionless `.eslintrc`: JSON, else YAML.
    JsonOrYaml,
    /// CommonJS / ES module exporting an object literal.
    JsModule,
    /// `package.json` with an embedded `eslintConfig` section.
    PackageJson,
}

impl ConfigFormat {
    /// Infer the format from a file name.
    pub fn for_file_name(name: &str) -> Self {
        let lower = name.to_ascii_lowercase();
        if lower == "package.json" {
            Self::PackageJson
        } else if lower.ends_with(".json") {
            Self::Json
        } else if lower.ends_with(".yaml") || lower.ends_with(".yml") {
            Self::Yaml
        } else if lower.ends_with(".js") || lower.ends_with(".cjs") || lower.ends_with(".mjs") {
            Self::JsModule
        } else {
            Self::JsonOrYaml
        }
    }

    fn parse(self, origin: &str, src: &str) -> Result<serde_json::Value, LintError> {
        match self {
            Self::Json => formats::parse_json(origin, src),
            Self::Yaml => formats::parse_yaml(origin, src),
            Self::JsonOrYaml => formats::parse_json_or_yaml(origin, src),
            Self::JsModule => formats::parse_js_module(origin, src),
            Self::PackageJson => formats::parse_package_json(origin, src),
        }
    }
}

/// A conventional config file at the workspace root.
#[derive(Clone, Debug)]
pub struct FileConfigSource {
    file_name: String,
    format: ConfigFormat,
}

impl FileConfigSource {
    /// Create a source for `file_name`, inferring its format.
    pub fn new(file_name: impl Into<String>) -> Self {
        let file_name = file_name.into();
        let format = ConfigFormat::for_file_name(&file_name);
        Self { file_name, format }
    }

    /// Format this source parses.
    pub fn format(&self) -> ConfigFormat {
        self.format
    }
}

#[async_trait]
impl ConfigSource for FileConfigSource {
    fn name(&self) -> &str {
        &self.file_name
    }

    async fn load(&self, workspace: &Path) -> Result<Option<RuleConfig>, LintError> {
        let path = workspace.join(&self.file_name);
        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => return Err(LintError::Io { path, source }),
        };
        let config = self.format.parse(&self.file_name, &content)?;
        Ok(Some(RuleConfig::from_config_object(&config)))
    }
}
