//! Config file format parsing.
//!
//! Every parser returns the whole configuration object as a
//! [`serde_json::Value`]; rule extraction happens in
//! [`RuleConfig::from_config_object`](crate::RuleConfig::from_config_object).

use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::errors::LintError;

/// Where a JS config module hands over its configuration object.
static EXPORT_SITE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?:module\.exports\s*=|export\s+default)\s*").expect("valid regex")
});

/// Parse JSON, tolerating comments and trailing commas.
pub fn parse_json(origin: &str, src: &str) -> Result<Value, LintError> {
    json5::from_str(src).map_err(|e| LintError::parse(origin, e))
}

/// Parse YAML into a JSON value.
pub fn parse_yaml(origin: &str, src: &str) -> Result<Value, LintError> {
    serde_yaml::from_str(src).map_err(|e| LintError::parse(origin, e))
}

/// Parse a file that may be JSON or YAML (extensionless `.eslintrc`).
///
/// JSON is tried first; the YAML error is reported if both fail.
pub fn parse_json_or_yaml(origin: &str, src: &str) -> Result<Value, LintError> {
    parse_json(origin, src).or_else(|_| parse_yaml(origin, src))
}

/// Extract the `eslintConfig` section of a `package.json`.
///
/// A manifest without the section parses to `Value::Null`.
pub fn parse_package_json(origin: &str, src: &str) -> Result<Value, LintError> {
    let manifest: Value = serde_json::from_str(src).map_err(|e| LintError::parse(origin, e))?;
    Ok(manifest.get("eslintConfig").cloned().unwrap_or(Value::Null))
}

/// Best-effort parse of a JS config module.
///
/// Only a literal object directly assigned to `module.exports` or
/// `export default` is understood. Computed values, spreads, `require`
/// calls and template literals are parse failures. Export sites inside
/// comments or strings are ignored.
pub fn parse_js_module(origin: &str, src: &str) -> Result<Value, LintError> {
    let site = EXPORT_SITE
        .find_iter(src)
        .find(|m| is_code(src, m.start()))
        .ok_or_else(|| LintError::parse(origin, "no module.exports or export default"))?;
    let start = site.end();
    if !src[start..].starts_with('{') {
        return Err(LintError::parse(origin, "exported value is not an object literal"));
    }
    let end = matching_brace(src, start)
        .ok_or_else(|| LintError::parse(origin, "unterminated object literal"))?;
    json5::from_str(&src[start..=end]).map_err(|e| LintError::parse(origin, e))
}

/// Whether byte `pos` lies outside every string and comment.
fn is_code(src: &str, pos: usize) -> bool {
    let bytes = src.as_bytes();
    let mut i = 0;
    while i < pos {
        let end = skip_non_code(bytes, i);
        if end >= pos && end != i {
            return false;
        }
        i = end + 1;
    }
    true
}

/// End of the string or comment starting at `i`, or `i` for plain code.
fn skip_non_code(bytes: &[u8], i: usize) -> usize {
    match bytes[i] {
        b'"' | b'\'' | b'`' => skip_string(bytes, i),
        b'/' if bytes.get(i + 1) == Some(&b'/') => skip_line_comment(bytes, i),
        b'/' if bytes.get(i + 1) == Some(&b'*') => skip_block_comment(bytes, i),
        _ => i,
    }
}

/// Byte index of the `}` closing the `{` at `open`, skipping strings and comments.
fn matching_brace(src: &str, open: usize) -> Option<usize> {
    let bytes = src.as_bytes();
    let mut depth = 0usize;
    let mut i = open;
    while i < bytes.len() {
        let end = skip_non_code(bytes, i);
        if end == i {
            match bytes[i] {
                b'{' => depth += 1,
                b'}' => {
                    depth -= 1;
                    if depth == 0 {
                        return Some(i);
                    }
                }
                _ => {}
            }
        }
        i = end + 1;
    }
    None
}

/// Index of the closing quote of the string opened at `i` (or last byte).
fn skip_string(bytes: &[u8], i: usize) -> usize {
    let quote = bytes[i];
    let mut j = i + 1;
    while j < bytes.len() {
        match bytes[j] {
            b'\\' => j += 1,
            b if b == quote => return j,
            _ => {}
        }
        j += 1;
    }
    bytes.len() - 1
}

/// Index of the newline ending the line comment at `i` (or last byte).
fn skip_line_comment(bytes: &[u8], i: usize) -> usize {
    bytes[i..]
        .iter()
        .position(|&b| b == b'\n')
        .map_or(bytes.len() - 1, |p| i + p)
}

/// Index of the `/` closing the block comment at `i` (or last byte).
fn skip_block_comment(bytes: &[u8], i: usize) -> usize {
    let mut j = i + 2;
    while j + 1 < bytes.len() {
        if bytes[j] == b'*' && bytes[j + 1] == b'/' {
            return j + 1;
        }
        j += 1;
    }
    bytes.len() - 1
}
