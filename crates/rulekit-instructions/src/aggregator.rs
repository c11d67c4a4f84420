//! Instruction document assembly.

use std::path::Path;

use tracing::{debug, instrument};

use rulekit_settings::InstructionSettings;

use crate::constants::{IGNORE_FILE, MODE_RULE_PREFIX, RULE_FILES};
use crate::document::{InstructionDocument, InstructionOrigin, RuleFileInstruction};
use crate::errors::Result;
use crate::ignore;
use crate::languages;
use crate::rule_files;

/// Optional inputs to [`InstructionAggregator::build`].
#[derive(Clone, Debug, Default)]
pub struct BuildOptions {
    /// Preferred language code.
    pub language: Option<String>,
    /// Pre-rendered ignore-pattern instructions.
    pub ignore_instructions: Option<String>,
}

/// Assembles the custom instruction document for a working directory.
#[derive(Clone, Debug)]
pub struct InstructionAggregator {
    rule_files: Vec<String>,
    mode_rule_prefix: String,
    ignore_file: String,
}

impl Default for InstructionAggregator {
    fn default() -> Self {
        Self {
            rule_files: RULE_FILES.iter().map(|s| (*s).to_string()).collect(),
            mode_rule_prefix: MODE_RULE_PREFIX.to_string(),
            ignore_file: IGNORE_FILE.to_string(),
        }
    }
}

impl InstructionAggregator {
    /// Aggregator with the conventional file names.
    pub fn new() -> Self {
        Self::default()
    }

    /// Aggregator using the file names from `settings`.
    pub fn from_settings(settings: &InstructionSettings) -> Self {
        Self {
            rule_files: settings.rule_files.clone(),
            mode_rule_prefix: settings.mode_rule_prefix.clone(),
            ignore_file: settings.ignore_file.clone(),
        }
    }

    /// Name of the mode rule source for `mode`, if the mode is usable.
    ///
    /// Empty modes and modes containing path separators have no rule file.
    pub fn mode_rule_file_name(&self, mode: &str) -> Option<String> {
        if mode.is_empty() || mode.contains(['/', '\\']) || mode.contains("..") {
            return None;
        }
        Some(format!("{}{mode}", self.mode_rule_prefix))
    }

    /// Load the generic rule sources, in configured order.
    pub async fn load_rule_files(&self, cwd: &Path) -> Result<Vec<RuleFileInstruction>> {
        rule_files::load_rule_files(cwd, &self.rule_files).await
    }

    /// Ignore instructions derived from the configured ignore file.
    pub async fn ignore_instructions(&self, cwd: &Path) -> Result<Option<String>> {
        ignore::ignore_instructions(cwd, &self.ignore_file).await
    }

    /// Collect every section for the document without rendering it.
    #[instrument(skip_all, fields(cwd = %cwd.display(), mode))]
    pub async fn assemble(
        &self,
        cwd: &Path,
        mode: &str,
        global_instructions: Option<&str>,
        mode_instructions: Option<&str>,
        options: &BuildOptions,
    ) -> Result<InstructionDocument> {
        let mut doc = InstructionDocument::new();

        let mode_rules = match self.mode_rule_file_name(mode) {
            Some(name) => rule_files::load_mode_rule_file(cwd, &name).await?,
            None => None,
        };

        if let Some(code) = options.language.as_deref().filter(|c| !c.trim().is_empty()) {
            doc.push(RuleFileInstruction::new(
                "language",
                InstructionOrigin::LanguagePreference,
                &languages::preference_line(code.trim()),
            ));
        }
        if let Some(text) = global_instructions {
            doc.push(RuleFileInstruction::new("global", InstructionOrigin::Global, text));
        }
        if let Some(text) = mode_instructions {
            doc.push(RuleFileInstruction::new(mode, InstructionOrigin::ModeSpecific, text));
        }
        if let Some(block) = mode_rules {
            doc.push(block);
        }
        if let Some(text) = options.ignore_instructions.as_deref() {
            doc.push(RuleFileInstruction::new(
                "ignore",
                InstructionOrigin::IgnorePatterns,
                text,
            ));
        }
        for block in self.load_rule_files(cwd).await? {
            doc.push(block);
        }

        debug!(blocks = doc.blocks().len(), "assembled instructions");
        Ok(doc)
    }

    /// Build the rendered instruction document.
    ///
    /// Returns `""` when no section has content.
    pub async fn build(
        &self,
        cwd: &Path,
        mode: &str,
        global_instructions: Option<&str>,
        mode_instructions: Option<&str>,
        options: &BuildOptions,
    ) -> Result<String> {
        let doc = self
            .assemble(cwd, mode, global_instructions, mode_instructions, options)
            .await?;
        Ok(doc.render())
    }
}
