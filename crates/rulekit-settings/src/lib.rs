//! # rulekit-settings
//!
//! Configuration management with layered sources.
//!
//! Settings are loaded from three layers (in priority order):
//! 1. **Compiled defaults** - [`RulekitSettings::default()`]
//! 2. **User file** - `~/.rulekit/settings.json` (deep-merged over defaults)
//! 3. **Environment variables** - `RULEKIT_*` overrides (highest priority)
//!
//! # Usage
//!
//! ```no_run
//! use rulekit_settings::get_settings;
//!
//! let settings = get_settings();
//! println!("lint command: {}", settings.lint.command);
//! ```

#![deny(unsafe_code)]

pub mod errors;
pub mod loader;
pub mod types;

pub use errors::{Result, SettingsError};
pub use loader::{deep_merge, load_settings, load_settings_from_path, settings_path};
pub use types::*;

use std::sync::OnceLock;

/// Global settings singleton.
static SETTINGS: OnceLock<RulekitSettings> = OnceLock::new();

/// Get the global settings instance.
///
/// On first call, loads settings from `~/.rulekit/settings.json` with env var
/// overrides. If loading fails, returns compiled defaults.
pub fn get_settings() -> &'static RulekitSettings {
    SETTINGS.get_or_init(|| load_settings().unwrap_or_default())
}
