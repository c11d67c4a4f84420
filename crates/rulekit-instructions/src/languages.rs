//! Language code to display name lookup.

/// Supported language codes and their native display names.
pub const LANGUAGES: &[(&str, &str)] = &[
    ("ca", "Català"),
    ("de", "Deutsch"),
    ("en", "English"),
    ("es", "Español"),
    ("fr", "Français"),
    ("hi", "हिन्दी"),
    ("id", "Bahasa Indonesia"),
    ("it", "Italiano"),
    ("ja", "日本語"),
    ("ko", "한국어"),
    ("nl", "Nederlands"),
    ("pl", "Polski"),
    ("pt-BR", "Português"),
    ("ru", "Русский"),
    ("tr", "Türkçe"),
    ("vi", "Tiếng Việt"),
    ("zh-CN", "简体中文"),
    ("zh-TW", "繁體中文"),
];

/// Display name for `code`, or `code` itself when unknown.
pub fn display_name(code: &str) -> &str {
    LANGUAGES
        .iter()
        .find(|(c, _)| *c == code)
        .map_or(code, |(_, name)| *name)
}

/// The language preference sentence for `code`.
pub fn preference_line(code: &str) -> String {
    format!(
        "You should always speak and think in the \"{}\" ({code}) language unless the user \
         gives you instructions below to do otherwise.",
        display_name(code)
    )
}
