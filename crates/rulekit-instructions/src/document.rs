//! Instruction document model and rendering.

use std::fmt;

use serde::Serialize;

use crate::constants::{
    BANNER, BLOCK_SEPARATOR, GLOBAL_HEADING, LANGUAGE_HEADING, MODE_HEADING, RULES_HEADING,
};

/// Where an instruction block came from.
///
/// The origin alone decides where the block lands in the document.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum InstructionOrigin {
    /// Preferred response language.
    LanguagePreference,
    /// Instructions for every mode.
    Global,
    /// Instructions for the active mode.
    ModeSpecific,
    /// `.clinerules-<mode>` file or directory.
    ModeRuleFile,
    /// Instructions derived from ignore patterns.
    IgnorePatterns,
    /// A generic rule file.
    RuleFile,
    /// A generic rule directory, aggregated into one block.
    DirectoryAggregate,
}

impl InstructionOrigin {
    /// Position in the document. Generic files and directories share a rank
    /// so they keep their discovery order.
    fn rank(self) -> u8 {
        match self {
            Self::LanguagePreference => 0,
            Self::Global => 1,
            Self::ModeSpecific => 2,
            Self::ModeRuleFile => 3,
            Self::IgnorePatterns => 4,
            Self::RuleFile | Self::DirectoryAggregate => 5,
        }
    }

    /// Whether blocks of this origin go inside the rules section.
    pub fn is_rule(self) -> bool {
        self.rank() >= 3
    }

    fn heading(self) -> Option<&'static str> {
        match self {
            Self::LanguagePreference => Some(LANGUAGE_HEADING),
            Self::Global => Some(GLOBAL_HEADING),
            Self::ModeSpecific => Some(MODE_HEADING),
            _ => None,
        }
    }
}

/// A named, tagged block of instruction text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct RuleFileInstruction {
    /// Source name (file name, `"global"`, ...).
    pub name: String,
    /// Where the block came from.
    pub origin: InstructionOrigin,
    /// Trimmed block text, including any label.
    pub text: String,
}

impl RuleFileInstruction {
    /// Create a block; the text is trimmed.
    pub fn new(name: impl Into<String>, origin: InstructionOrigin, text: &str) -> Self {
        Self {
            name: name.into(),
            origin,
            text: text.trim().to_owned(),
        }
    }
}

/// Ordered collection of instruction blocks.
///
/// Blocks may be pushed in any order; [`render`](Self::render) always emits
/// language → global → mode → rules (mode rule file → ignore → generic).
#[derive(Clone, Debug, Default, Serialize)]
pub struct InstructionDocument {
    blocks: Vec<RuleFileInstruction>,
}

impl InstructionDocument {
    /// Create an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a block. Blocks that are empty after trimming are dropped.
    pub fn push(&mut self, block: RuleFileInstruction) {
        if !block.text.is_empty() {
            self.blocks.push(block);
        }
    }

    /// Whether no block has content.
    pub fn is_empty(&self) -> bool {
        self.blocks.is_empty()
    }

    /// Blocks in document order.
    pub fn blocks(&self) -> Vec<&RuleFileInstruction> {
        let mut ordered: Vec<&RuleFileInstruction> = self.blocks.iter().collect();
        ordered.sort_by_key(|b| b.origin.rank());
        ordered
    }

    /// Render the final text. Empty documents render to `""`.
    pub fn render(&self) -> String {
        let ordered = self.blocks();
        let mut sections: Vec<String> = Vec::new();
        let mut rules: Vec<&str> = Vec::new();

        for block in ordered {
            match block.origin.heading() {
                Some(heading) => sections.push(format!("{heading}\n{}", block.text)),
                None => rules.push(&block.text),
            }
        }
        if !rules.is_empty() {
            sections.push(format!(
                "{RULES_HEADING}{BLOCK_SEPARATOR}{}",
                rules.join(BLOCK_SEPARATOR)
            ));
        }

        if sections.is_empty() {
            return String::new();
        }
        format!("{BANNER}{}", sections.join(BLOCK_SEPARATOR))
    }
}

impl fmt::Display for InstructionDocument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.render())
    }
}
