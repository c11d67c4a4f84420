//! # rulekit-instructions
//!
//! Builds the user's custom instruction document.
//!
//! - **Rule files**: `.clinerules`, `.cursorrules`, `.windsurfrules` at the
//!   working directory root, each either a file or a directory tree
//! - **Mode rule file**: `.clinerules-<mode>`, same file/directory handling
//! - **Ignore instructions**: derived from `.clineignore`
//! - **Document**: language preference, global instructions, mode
//!   instructions and rules, in that fixed order, under one banner
//!
//! Missing sources are not errors. Only unexpected I/O failures (permissions
//! and the like) reach the caller.

#![deny(unsafe_code)]

pub mod aggregator;
pub mod constants;
pub mod document;
pub mod errors;
pub mod ignore;
pub mod languages;
pub mod rule_files;

pub use aggregator::{BuildOptions, InstructionAggregator};
pub use document::{InstructionDocument, InstructionOrigin, RuleFileInstruction};
pub use errors::{InstructionError, Result};
pub use rule_files::{RuleFile, RuleSource, load_rule_files};
