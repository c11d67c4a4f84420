//! Instruction document settings.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Conventional rule files at the working directory root, in order.
pub const DEFAULT_RULE_FILES: &[&str] = &[".clinerules", ".cursorrules", ".windsurfrules"];

/// Settings for the instruction aggregator.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InstructionSettings {
    /// Generic rule files (or directories), in document order.
    pub rule_files: Vec<String>,
    /// Prefix of the mode-specific rule file; the mode slug is appended.
    pub mode_rule_prefix: String,
    /// Ignore-pattern file whose contents become ignore instructions.
    pub ignore_file: String,
    /// Preferred response language code (e.g. `"fr"`, `"pt-BR"`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    /// Instructions that apply to every mode.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub global_instructions: Option<String>,
    /// Per-mode instructions, keyed by mode slug.
    pub mode_instructions: BTreeMap<String, String>,
}

impl Default for InstructionSettings {
    fn default() -> Self {
        Self {
            rule_files: DEFAULT_RULE_FILES.iter().map(|s| (*s).to_string()).collect(),
            mode_rule_prefix: ".clinerules-".to_string(),
            ignore_file: ".clineignore".to_string(),
            language: None,
            global_instructions: None,
            mode_instructions: BTreeMap::new(),
        }
    }
}

impl InstructionSettings {
    /// Instructions configured for `mode`, if any.
    pub fn instructions_for_mode(&self, mode: &str) -> Option<&str> {
        self.mode_instructions.get(mode).map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rule_file_order() {
        let settings = InstructionSettings::default();
        assert_eq!(
            settings.rule_files,
            vec![".clinerules", ".cursorrules", ".windsurfrules"]
        );
    }

    #[test]
    fn instructions_for_mode_lookup() {
        let mut settings = InstructionSettings::default();
        let _ = settings
            .mode_instructions
            .insert("code".into(), "Prefer small diffs.".into());
        assert_eq!(settings.instructions_for_mode("code"), Some("Prefer small diffs."));
        assert!(settings.instructions_for_mode("architect").is_none());
    }
}
