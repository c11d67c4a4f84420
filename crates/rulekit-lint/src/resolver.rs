//! Short-circuiting lint configuration resolver.

use std::path::Path;
use std::sync::Arc;

use tracing::{debug, instrument};

use rulekit_core::workspace::{WorkspaceRoots, primary_root};
use rulekit_settings::LintSettings;

use crate::probe::{EffectiveConfigProbe, EslintCliProbe};
use crate::sources::{ComputedConfigSource, ConfigSource, FileConfigSource};
use crate::types::RuleConfig;

/// Resolves the effective rule set by trying sources in a fixed order.
///
/// First-match, not union: the first source yielding a non-empty rule
/// mapping is returned as-is and later sources are never consulted.
pub struct LintConfigResolver {
    sources: Vec<Box<dyn ConfigSource>>,
}

impl LintConfigResolver {
    /// Create a resolver over an explicit, ordered list of sources.
    pub fn new(sources: Vec<Box<dyn ConfigSource>>) -> Self {
        Self { sources }
    }

    /// Build the standard chain using the CLI probe described by `settings`.
    pub fn from_settings(settings: &LintSettings) -> Self {
        Self::with_probe(Arc::new(EslintCliProbe::from_settings(settings)), settings)
    }

    /// Build the standard chain around a caller-supplied probe.
    ///
    /// Order: computed config (when `settings.enabled`), each of
    /// `settings.config_files`, then `package.json` (when
    /// `settings.include_package_json`).
    pub fn with_probe(probe: Arc<dyn EffectiveConfigProbe>, settings: &LintSettings) -> Self {
        let mut sources: Vec<Box<dyn ConfigSource>> = Vec::new();
        if settings.enabled {
            sources.push(Box::new(ComputedConfigSource::new(
                probe,
                settings.representative_files.clone(),
            )));
        }
        for file_name in &settings.config_files {
            sources.push(Box::new(FileConfigSource::new(file_name.clone())));
        }
        if settings.include_package_json {
            sources.push(Box::new(FileConfigSource::new("package.json")));
        }
        Self::new(sources)
    }

    /// Source names in resolution order.
    pub fn source_names(&self) -> Vec<&str> {
        self.sources.iter().map(|s| s.name()).collect()
    }

    /// Resolve the effective rules for `workspace`.
    ///
    /// Never fails: a source that is absent, malformed, or errors out is
    /// skipped. Returns `None` once every source is exhausted.
    #[instrument(skip(self, workspace), fields(workspace = %workspace.display()))]
    pub async fn resolve(&self, workspace: &Path) -> Option<RuleConfig> {
        for source in &self.sources {
            match source.load(workspace).await {
                Ok(Some(rules)) if !rules.is_empty() => {
                    debug!(source = source.name(), rules = rules.len(), "resolved lint rules");
                    return Some(rules);
                }
                Ok(Some(_)) => debug!(source = source.name(), "source has no rules"),
                Ok(None) => debug!(source = source.name(), "source absent"),
                Err(e) => debug!(source = source.name(), error = %e, "source failed"),
            }
        }
        debug!("no lint configuration found");
        None
    }

    /// Resolve against the host's first workspace root.
    pub async fn resolve_workspace(&self, workspace: &dyn WorkspaceRoots) -> Option<RuleConfig> {
        let root = primary_root(workspace)?;
        self.resolve(&root).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::LintError;
    use crate::probe::MockEffectiveConfigProbe;
    use rulekit_core::workspace::StaticWorkspace;
    use serde_json::json;

    fn settings() -> LintSettings {
        LintSettings::default()
    }

    fn failing_probe() -> MockEffectiveConfigProbe {
        let mut probe = MockEffectiveConfigProbe::new();
        let _ = probe.expect_effective_config().returning(|_, _| {
            Err(LintError::ProbeExit {
                code: Some(2),
                stderr: "no eslint".into(),
            })
        });
        probe
    }

    #[test]
    fn standard_chain_order() {
        let resolver = LintConfigResolver::with_probe(Arc::new(failing_probe()), &settings());
        assert_eq!(
            resolver.source_names(),
            vec![
                "computed",
                ".eslintrc",
                ".eslintrc.js",
                ".eslintrc.json",
                ".eslintrc.yaml",
                ".eslintrc.yml",
                "package.json",
            ]
        );
    }

    #[test]
    fn chain_respects_toggles() {
        let settings = LintSettings {
            enabled: false,
            include_package_json: false,
            ..LintSettings::default()
        };
        let resolver = LintConfigResolver::with_probe(Arc::new(failing_probe()), &settings);
        assert_eq!(resolver.source_names().len(), 5);
        assert!(!resolver.source_names().contains(&"computed"));
    }

    #[tokio::test]
    async fn probe_result_wins_over_files() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join(".eslintrc.json"),
            r#"{"rules": {"semi": "off"}}"#,
        )
        .unwrap();

        let mut probe = MockEffectiveConfigProbe::new();
        let _ = probe
            .expect_effective_config()
            .times(1)
            .returning(|_, _| Ok(json!({"rules": {"semi": ["error", "always"], "curly": 2}})));

        let resolver = LintConfigResolver::with_probe(Arc::new(probe), &settings());
        let rules = resolver.resolve(tmp.path()).await.unwrap();
        assert_eq!(rules.len(), 2);
        assert_eq!(
            serde_json::to_value(&rules).unwrap(),
            json!({"curly": 2, "semi": ["error", "always"]})
        );
    }

    #[tokio::test]
    async fn empty_probe_result_falls_through() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(".eslintrc.yaml"), "rules:\n  eqeqeq: warn\n").unwrap();

        let mut probe = MockEffectiveConfigProbe::new();
        let _ = probe
            .expect_effective_config()
            .returning(|_, _| Ok(json!({"rules": {}})));

        let resolver = LintConfigResolver::with_probe(Arc::new(probe), &settings());
        let rules = resolver.resolve(tmp.path()).await.unwrap();
        assert!(rules.get("eqeqeq").is_some());
    }

    #[tokio::test]
    async fn failed_probe_falls_through_to_first_valid_file() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join(".eslintrc"), "{ this is not: [valid").unwrap();
        std::fs::write(tmp.path().join(".eslintrc.json"), r#"{"rules": {}}"#).unwrap();
        std::fs::write(tmp.path().join(".eslintrc.yml"), "rules:\n  semi: 2\n").unwrap();
        std::fs::write(
            tmp.path().join("package.json"),
            r#"{"eslintConfig": {"rules": {"quotes": 1}}}"#,
        )
        .unwrap();

        let resolver = LintConfigResolver::with_probe(Arc::new(failing_probe()), &settings());
        let rules = resolver.resolve(tmp.path()).await.unwrap();
        assert_eq!(rules.len(), 1);
        assert!(rules.get("semi").is_some());
    }

    #[tokio::test]
    async fn package_json_is_last_resort() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(
            tmp.path().join("package.json"),
            r#"{"name": "x", "eslintConfig": {"rules": {"quotes": ["error", "double"]}}}"#,
        )
        .unwrap();

        let resolver = LintConfigResolver::with_probe(Arc::new(failing_probe()), &settings());
        let rules = resolver.resolve(tmp.path()).await.unwrap();
        assert!(rules.get("quotes").is_some());
    }

    #[tokio::test]
    async fn nothing_found_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        std::fs::write(tmp.path().join("package.json"), r#"{"name": "x"}"#).unwrap();
        let resolver = LintConfigResolver::with_probe(Arc::new(failing_probe()), &settings());
        assert!(resolver.resolve(tmp.path()).await.is_none());
    }

    #[tokio::test]
    async fn resolve_workspace_uses_first_root() {
        let first = tempfile::tempdir().unwrap();
        let second = tempfile::tempdir().unwrap();
        std::fs::write(second.path().join(".eslintrc.json"), r#"{"rules": {"semi": 2}}"#).unwrap();

        let resolver = LintConfigResolver::with_probe(Arc::new(failing_probe()), &settings());
        let ws = StaticWorkspace::new(vec![first.path().into(), second.path().into()]);
        assert!(resolver.resolve_workspace(&ws).await.is_none());

        let empty = StaticWorkspace::default();
        assert!(resolver.resolve_workspace(&empty).await.is_none());
    }
}
