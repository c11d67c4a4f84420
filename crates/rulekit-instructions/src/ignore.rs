//! Ignore-pattern instructions.
//!
//! A root-level ignore file lists paths the assistant must not access. Its
//! patterns are passed through verbatim inside a short explanatory block.

use std::path::Path;

use crate::errors::Result;
use crate::rule_files::read_trimmed;

/// Build the ignore instructions for `cwd` from `file_name`.
///
/// Returns `None` when the file is absent or empty.
pub async fn ignore_instructions(cwd: &Path, file_name: &str) -> Result<Option<String>> {
    let patterns = read_trimmed(&cwd.join(file_name)).await?;
    if patterns.is_empty() {
        return Ok(None);
    }
    Ok(Some(render(file_name, &patterns)))
}

fn render(file_name: &str, patterns: &str) -> String {
    format!(
        "# {file_name}\n\n\
         (The following is provided by a root-level {file_name} file where the user has \
         specified files and directories that should not be accessed. Requests to read or \
         modify matching paths will be refused.)\n\
         {patterns}\n\
         {file_name}"
    )
}
