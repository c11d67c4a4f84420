//! # rulekit-lint
//!
//! Resolves the effective linter rule set for a workspace.
//!
//! Resolution is a short-circuiting chain of [`ConfigSource`]s:
//!
//! 1. **Computed config**: ask the linter itself (via an
//!    [`EffectiveConfigProbe`]) for the configuration it would apply to a
//!    representative file. This sees inherited and extended configuration.
//! 2. **Config files**: `.eslintrc`, `.eslintrc.js`, `.eslintrc.json`,
//!    `.eslintrc.yaml`, `.eslintrc.yml`, then `package.json#eslintConfig`.
//!
//! The first source producing a non-empty rule mapping wins. Sources that
//! are missing, malformed or fail to run contribute nothing; exhausting the
//! chain yields `None`.

#![deny(unsafe_code)]

pub mod errors;
pub mod formats;
pub mod probe;
pub mod resolver;
pub mod sources;
pub mod types;

pub use errors::LintError;
pub use probe::{EffectiveConfigProbe, EslintCliProbe};
pub use resolver::LintConfigResolver;
pub use sources::{ComputedConfigSource, ConfigFormat, ConfigSource, FileConfigSource};
pub use types::{RuleConfig, RuleValue, Severity};
