//! Settings type definitions.
//!
//! All types use `#[serde(rename_all = "camelCase", default)]` so a partial
//! JSON file only needs the keys it changes.

mod instructions;
mod lint;

pub use instructions::*;
pub use lint::*;

use serde::{Deserialize, Serialize};

/// Root settings type.
///
/// ```json
/// {
///   "lint": { "command": "pnpm", "args": ["exec", "eslint", "--print-config"] },
///   "instructions": { "language": "fr" }
/// }
/// ```
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RulekitSettings {
    /// Settings schema version.
    pub version: String,
    /// Linter configuration resolution.
    pub lint: LintSettings,
    /// Instruction document assembly.
    pub instructions: InstructionSettings,
    /// Logging configuration.
    pub logging: LoggingSettings,
}

impl Default for RulekitSettings {
    fn default() -> Self {
        Self {
            version: "0.1.0".to_string(),
            lint: LintSettings::default(),
            instructions: InstructionSettings::default(),
            logging: LoggingSettings::default(),
        }
    }
}

/// Logging configuration.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct LoggingSettings {
    /// `tracing` filter directive used when `RUST_LOG` is unset.
    pub level: String,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "warn".to_string(),
        }
    }
}
