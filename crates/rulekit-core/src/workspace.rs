//! Host workspace abstraction.
//!
//! Editors expose a list of open workspace folders. Both pipelines only
//! ever look at the first one.

use std::path::{Path, PathBuf};

/// Source of the host's open workspace roots.
pub trait WorkspaceRoots: Send + Sync {
    /// All open roots, in the host's order.
    fn roots(&self) -> Vec<PathBuf>;
}

/// Return the first workspace root, if any.
pub fn primary_root(workspace: &dyn WorkspaceRoots) -> Option<PathBuf> {
    workspace.roots().into_iter().next()
}

/// Fixed list of roots, for CLI use and tests.
#[derive(Clone, Debug, Default)]
pub struct StaticWorkspace {
    roots: Vec<PathBuf>,
}

impl StaticWorkspace {
    /// Create a workspace with the given roots.
    pub fn new(roots: Vec<PathBuf>) -> Self {
        Self { roots }
    }

    /// Create a workspace with a single root.
    pub fn single(root: impl AsRef<Path>) -> Self {
        Self {
            roots: vec![root.as_ref().to_path_buf()],
        }
    }
}

impl WorkspaceRoots for StaticWorkspace {
    fn roots(&self) -> Vec<PathBuf> {
        self.roots.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn primary_root_is_first() {
        let ws = StaticWorkspace::new(vec!["/a".into(), "/b".into()]);
        assert_eq!(primary_root(&ws), Some(PathBuf::from("/a")));
    }

    #[test]
    fn primary_root_none_when_empty() {
        let ws = StaticWorkspace::default();
        assert!(primary_root(&ws).is_none());
    }

    #[test]
    fn single_root() {
        let tmp = tempfile::tempdir().unwrap();
        let ws = StaticWorkspace::single(tmp.path());
        assert_eq!(ws.roots(), vec![tmp.path().to_path_buf()]);
    }
}
