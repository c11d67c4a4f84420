//! Fixed text and file names used in the instruction document.

/// Generic rule files, in document order.
pub const RULE_FILES: &[&str] = &[".clinerules", ".cursorrules", ".windsurfrules"];

/// Prefix of the mode-specific rule file.
pub const MODE_RULE_PREFIX: &str = ".clinerules-";

/// Ignore-pattern file at the working directory root.
pub const IGNORE_FILE: &str = ".clineignore";

/// Document banner, emitted only when at least one section has content.
pub const BANNER: &str = "====\n\nUSER'S CUSTOM INSTRUCTIONS\n\n\
The following additional instructions are provided by the user, and should be followed \
to the best of your ability without interfering with the TOOL USE guidelines.\n\n";

/// Separator between sections and between blocks inside the rules section.
pub const BLOCK_SEPARATOR: &str = "\n\n";

/// Heading of the language preference section.
pub const LANGUAGE_HEADING: &str = "Language Preference:";

/// Heading of the global instructions section.
pub const GLOBAL_HEADING: &str = "Global Instructions:";

/// Heading of the mode-specific instructions section.
pub const MODE_HEADING: &str = "Mode-specific Instructions:";

/// Heading of the rules section.
pub const RULES_HEADING: &str = "Rules:";
