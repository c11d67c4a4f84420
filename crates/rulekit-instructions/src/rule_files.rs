//! Rule file discovery.
//!
//! A rule source is a conventional name at the working directory root that
//! may be a regular file or a directory. Directories are walked recursively
//! and every regular file beneath them is read.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tracing::debug;
use walkdir::WalkDir;

use crate::document::{InstructionOrigin, RuleFileInstruction};
use crate::errors::{InstructionError, Result};

/// One file read from a rule directory.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RuleFile {
    /// Absolute path of the file.
    pub path: PathBuf,
    /// Trimmed content.
    pub content: String,
}

/// A rule source, resolved once by `stat`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum RuleSource {
    /// A regular file.
    SingleFile {
        /// Path of the file.
        path: PathBuf,
        /// Trimmed content.
        content: String,
    },
    /// A directory and every non-empty regular file beneath it.
    DirectoryTree {
        /// Path of the directory.
        path: PathBuf,
        /// Files in walk order (depth-first, siblings by name).
        files: Vec<RuleFile>,
    },
}

impl RuleSource {
    /// Resolve and read the source at `path`.
    ///
    /// Returns `Ok(None)` when nothing exists at `path`.
    pub async fn load(path: &Path) -> Result<Option<Self>> {
        let metadata = match tokio::fs::metadata(path).await {
            Ok(m) => m,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(source) => {
                return Err(InstructionError::Io {
                    path: path.to_path_buf(),
                    source,
                });
            }
        };

        if metadata.is_dir() {
            let files = read_directory(path).await?;
            return Ok(Some(Self::DirectoryTree {
                path: path.to_path_buf(),
                files,
            }));
        }

        let content = read_trimmed(path).await?;
        Ok(Some(Self::SingleFile {
            path: path.to_path_buf(),
            content,
        }))
    }

    /// Whether the source contributed no text.
    pub fn is_empty(&self) -> bool {
        match self {
            Self::SingleFile { content, .. } => content.is_empty(),
            Self::DirectoryTree { files, .. } => files.is_empty(),
        }
    }

    /// Render the source as one labeled block, or `None` when empty.
    ///
    /// `label` is the conventional name the source was found under.
    pub fn render(&self, label: &str, cwd: &Path) -> Option<String> {
        if self.is_empty() {
            return None;
        }
        let text = match self {
            Self::SingleFile { content, .. } => {
                format!("# Rules from {label} ({}):\n{content}", cwd.display())
            }
            Self::DirectoryTree { files, .. } => {
                let blocks: Vec<String> = files
                    .iter()
                    .map(|f| format!("## {}:\n{}", f.path.display(), f.content))
                    .collect();
                format!(
                    "# Rules from {label}/ directory ({}):\n\n{}",
                    cwd.display(),
                    blocks.join("\n\n")
                )
            }
        };
        Some(text)
    }

    /// Render as a tagged instruction block with the given file origin.
    ///
    /// Directories are always tagged [`InstructionOrigin::DirectoryAggregate`]
    /// unless `file_origin` is [`InstructionOrigin::ModeRuleFile`].
    pub fn into_instruction(
        self,
        label: &str,
        cwd: &Path,
        file_origin: InstructionOrigin,
    ) -> Option<RuleFileInstruction> {
        let text = self.render(label, cwd)?;
        let origin = match (&self, file_origin) {
            (Self::DirectoryTree { .. }, InstructionOrigin::RuleFile) => {
                InstructionOrigin::DirectoryAggregate
            }
            _ => file_origin,
        };
        Some(RuleFileInstruction::new(label, origin, &text))
    }
}

/// Load each of `names` from `cwd`, in order, as generic rule blocks.
pub async fn load_rule_files(cwd: &Path, names: &[String]) -> Result<Vec<RuleFileInstruction>> {
    let cwd = absolute(cwd);
    let mut blocks = Vec::new();
    for name in names {
        let Some(source) = RuleSource::load(&cwd.join(name)).await? else {
            debug!(name, "rule source absent");
            continue;
        };
        if let Some(block) = source.into_instruction(name, &cwd, InstructionOrigin::RuleFile) {
            blocks.push(block);
        }
    }
    Ok(blocks)
}

/// Load the single rule source `name` from `cwd` as a mode rule block.
pub async fn load_mode_rule_file(cwd: &Path, name: &str) -> Result<Option<RuleFileInstruction>> {
    let cwd = absolute(cwd);
    let Some(source) = RuleSource::load(&cwd.join(name)).await? else {
        debug!(name, "mode rule source absent");
        return Ok(None);
    };
    Ok(source.into_instruction(name, &cwd, InstructionOrigin::ModeRuleFile))
}

/// Read a file and trim it.
///
/// A missing path or a directory reads as empty; other errors propagate.
/// Invalid UTF-8 is replaced rather than rejected.
pub async fn read_trimmed(path: &Path) -> Result<String> {
    match tokio::fs::read(path).await {
        Ok(bytes) => Ok(String::from_utf8_lossy(&bytes).trim().to_owned()),
        Err(e) if matches!(e.kind(), ErrorKind::NotFound | ErrorKind::IsADirectory) => {
            Ok(String::new())
        }
        Err(source) => Err(InstructionError::Io {
            path: path.to_path_buf(),
            source,
        }),
    }
}

/// Read every non-empty regular file beneath `dir`.
async fn read_directory(dir: &Path) -> Result<Vec<RuleFile>> {
    let paths = list_files(dir).await?;
    let mut files = Vec::with_capacity(paths.len());
    for path in paths {
        let content = read_trimmed(&path).await?;
        if content.is_empty() {
            continue;
        }
        files.push(RuleFile { path, content });
    }
    Ok(files)
}

/// Regular files beneath `dir`, depth-first with siblings sorted by name.
async fn list_files(dir: &Path) -> Result<Vec<PathBuf>> {
    let root = dir.to_path_buf();
    let walk = tokio::task::spawn_blocking(move || {
        let mut paths = Vec::new();
        for entry in WalkDir::new(&root).min_depth(1).sort_by_file_name() {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) => {
                    let path = err.path().map_or_else(|| root.clone(), Path::to_path_buf);
                    // Entries removed mid-walk are treated as absent
                    if err.io_error().map(std::io::Error::kind) == Some(ErrorKind::NotFound) {
                        continue;
                    }
                    return Err(InstructionError::Io {
                        path,
                        source: err.into(),
                    });
                }
            };
            if entry.file_type().is_file() {
                paths.push(entry.into_path());
            }
        }
        Ok(paths)
    })
    .await;

    walk.map_err(|e| InstructionError::WalkAborted {
        path: dir.to_path_buf(),
        message: e.to_string(),
    })?
}

/// `path` made absolute against the current directory, unchanged on failure.
fn absolute(path: &Path) -> PathBuf {
    std::path::absolute(path).unwrap_or_else(|_| path.to_path_buf())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| (*s).to_string()).collect()
    }

    #[tokio::test]
    async fn absent_source_is_none() {
        let tmp = tempfile::tempdir().unwrap();
        assert!(RuleSource::load(&tmp.path().join(".clinerules")).await.unwrap().is_none());
    }

    #[tokio::test]
    async fn single_file_is_trimmed() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(".cursorrules"), "\n  Use 4 spaces.\n\n").unwrap();
        let source = RuleSource::load(&tmp.path().join(".cursorrules")).await.unwrap().unwrap();
        assert_eq!(
            source,
            RuleSource::SingleFile {
                path: tmp.path().join(".cursorrules"),
                content: "Use 4 spaces.".into(),
            }
        );
    }

    #[tokio::test]
    async fn single_file_block_names_file_and_cwd() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(".windsurfrules"), "Prefer iterators.").unwrap();
        let blocks = load_rule_files(tmp.path(), &names(&[".windsurfrules"])).await.unwrap();
        assert_eq!(blocks.len(), 1);
        assert_eq!(blocks[0].origin, InstructionOrigin::RuleFile);
        assert_eq!(
            blocks[0].text,
            format!(
                "# Rules from .windsurfrules ({}):\nPrefer iterators.",
                tmp.path().display()
            )
        );
    }

    #[tokio::test]
    async fn empty_file_contributes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(".clinerules"), "   \n").unwrap();
        let blocks = load_rule_files(tmp.path(), &names(&[".clinerules"])).await.unwrap();
        assert!(blocks.is_empty());
    }

    #[tokio::test]
    async fn directory_is_walked_recursively_in_name_order() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(".clinerules");
        fs::create_dir_all(dir.join("nested")).unwrap();
        fs::write(dir.join("b.md"), "B").unwrap();
        fs::write(dir.join("a.md"), "A").unwrap();
        fs::write(dir.join("nested").join("c.md"), "C").unwrap();
        fs::write(dir.join("empty.md"), "").unwrap();

        let source = RuleSource::load(&dir).await.unwrap().unwrap();
        let RuleSource::DirectoryTree { files, .. } = source else {
            panic!("expected directory");
        };
        let contents: Vec<&str> = files.iter().map(|f| f.content.as_str()).collect();
        assert_eq!(contents, vec!["A", "B", "C"]);
        assert_eq!(files[2].path, dir.join("nested").join("c.md"));
    }

    #[tokio::test]
    async fn directory_of_empty_files_contributes_nothing() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(".clinerules");
        fs::create_dir_all(dir.join("sub")).unwrap();
        fs::write(dir.join("blank.md"), "\n").unwrap();
        let blocks = load_rule_files(tmp.path(), &names(&[".clinerules"])).await.unwrap();
        assert!(blocks.is_empty());
    }

    #[tokio::test]
    async fn order_follows_names() {
        let tmp = tempfile::tempdir().unwrap();
        fs::write(tmp.path().join(".windsurfrules"), "W").unwrap();
        fs::write(tmp.path().join(".clinerules"), "C").unwrap();
        let blocks = load_rule_files(
            tmp.path(),
            &names(&[".clinerules", ".cursorrules", ".windsurfrules"]),
        )
        .await
        .unwrap();
        let labels: Vec<&str> = blocks.iter().map(|b| b.name.as_str()).collect();
        assert_eq!(labels, vec![".clinerules", ".windsurfrules"]);
    }

    #[tokio::test]
    async fn mode_rule_directory_keeps_mode_origin() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(".clinerules-code");
        fs::create_dir_all(&dir).unwrap();
        fs::write(dir.join("style.md"), "Small commits.").unwrap();
        let block = load_mode_rule_file(tmp.path(), ".clinerules-code")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(block.origin, InstructionOrigin::ModeRuleFile);
        assert!(block.text.contains("Small commits."));
    }

    #[tokio::test]
    async fn read_trimmed_swallows_directory() {
        let tmp = tempfile::tempdir().unwrap();
        assert_eq!(read_trimmed(tmp.path()).await.unwrap(), "");
        assert_eq!(read_trimmed(&tmp.path().join("missing")).await.unwrap(), "");
    }

    #[tokio::test]
    async fn binary_file_in_directory_is_not_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join(".clinerules");
        fs::create_dir(&dir).unwrap();
        fs::write(dir.join(".DS_Store"), [0x00, 0x00, 0x00, 0x01, 0xff, 0xfe, 0x42, 0x75, 0xd8]).unwrap();
        fs::write(dir.join("a.md"), "Use tabs.").unwrap();

        let blocks = load_rule_files(tmp.path(), &names(&[".clinerules"])).await.unwrap();
        assert_eq!(blocks.len(), 1);
        assert!(blocks[0].text.contains("Use tabs."));
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn permission_error_propagates() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = tempfile::tempdir().unwrap();
        let file = tmp.path().join(".cursorrules");
        fs::write(&file, "secret").unwrap();
        fs::set_permissions(&file, fs::Permissions::from_mode(0o000)).unwrap();

        // Root ignores file modes; nothing to assert there.
        if fs::read_to_string(&file).is_ok() {
            return;
        }
        let err = read_trimmed(&file).await.unwrap_err();
        assert!(matches!(err, InstructionError::Io { .. }));
    }
}
