//! Workspace discovery and structure

use std::path::{Path, PathBuf};
use thiserror::Error;

use crate::core::identity::ArtifactId;

/// Represents a Tally workspace
#[derive(Debug)]
pub struct Workspace {
    /// Root directory of the workspace (parent of .tally/)
    root: PathBuf,
}

impl Workspace {
    /// Find workspace root by walking up from the current directory
    pub fn discover() -> Result<Self, WorkspaceError> {
        let current =
            std::env::current_dir().map_err(|e| WorkspaceError::IoError(e.to_string()))?;
        Self::discover_from(&current)
    }

    /// Find workspace root by walking up from the given directory
    pub fn discover_from(start: &Path) -> Result<Self, WorkspaceError> {
        let mut current = start
            .canonicalize()
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        loop {
            let tally_dir = current.join(".tally");
            if tally_dir.is_dir() {
                return Ok(Self { root: current });
            }

            if !current.pop() {
                return Err(WorkspaceError::NotFound {
                    searched_from: start.to_path_buf(),
                });
            }
        }
    }

    /// Create a new workspace structure at the given path
    pub fn init(path: &Path) -> Result<Self, WorkspaceError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());

        let tally_dir = root.join(".tally");
        if tally_dir.exists() {
            return Err(WorkspaceError::AlreadyExists(root.clone()));
        }

        Self::create_skeleton(&root)?;
        Ok(Self { root })
    }

    /// Force initialization even if .tally/ exists
    pub fn init_force(path: &Path) -> Result<Self, WorkspaceError> {
        let root = path.canonicalize().unwrap_or_else(|_| path.to_path_buf());
        Self::create_skeleton(&root)?;
        Ok(Self { root })
    }

    fn create_skeleton(root: &Path) -> Result<(), WorkspaceError> {
        let tally_dir = root.join(".tally");
        std::fs::create_dir_all(&tally_dir)
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        let config_path = tally_dir.join("config.yaml");
        std::fs::write(&config_path, Self::default_config())
            .map_err(|e| WorkspaceError::IoError(e.to_string()))?;

        for dir in ["forms", "responses"] {
            std::fs::create_dir_all(root.join(dir))
                .map_err(|e| WorkspaceError::IoError(e.to_string()))?;
        }

        Ok(())
    }

    fn default_config() -> &'static str {
        r#"# Tally Workspace Configuration

# Editor to use for `tally form edit --editor` (default: $EDITOR)
# editor: ""

# Default output format (auto, yaml, tsv, json, csv, id)
# default_format: auto
"#
    }

    /// Get the workspace root directory
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the .tally configuration directory
    pub fn tally_dir(&self) -> PathBuf {
        self.root.join(".tally")
    }

    /// Directory holding persisted form schema documents
    pub fn forms_dir(&self) -> PathBuf {
        self.root.join("forms")
    }

    /// Directory holding persisted response records
    pub fn responses_dir(&self) -> PathBuf {
        self.root.join("responses")
    }

    /// Get the file path for a form schema document
    pub fn form_path(&self, id: &ArtifactId) -> PathBuf {
        self.forms_dir().join(format!("{}.tally.yaml", id))
    }

    /// Get the file path for a response record
    pub fn response_path(&self, id: &ArtifactId) -> PathBuf {
        self.responses_dir().join(format!("{}.tally.yaml", id))
    }
}

/// Errors that can occur during workspace operations
#[derive(Debug, Error)]
pub enum WorkspaceError {
    #[error("not a Tally workspace (searched from {searched_from:?}). Run 'tally init' to create one.")]
    NotFound { searched_from: PathBuf },

    #[error("Tally workspace already exists at {0:?}")]
    AlreadyExists(PathBuf),

    #[error("IO error: {0}")]
    IoError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_workspace_init_creates_structure() {
        let tmp = tempdir().unwrap();
        let ws = Workspace::init(tmp.path()).unwrap();

        assert!(ws.tally_dir().exists());
        assert!(ws.tally_dir().join("config.yaml").exists());
        assert!(ws.forms_dir().is_dir());
        assert!(ws.responses_dir().is_dir());
    }

    #[test]
    fn test_workspace_init_fails_if_exists() {
        let tmp = tempdir().unwrap();
        Workspace::init(tmp.path()).unwrap();

        let err = Workspace::init(tmp.path()).unwrap_err();
        assert!(matches!(err, WorkspaceError::AlreadyExists(_)));
    }

    #[test]
    fn test_workspace_discover_finds_tally_dir() {
        let tmp = tempdir().unwrap();
        Workspace::init(tmp.path()).unwrap();

        let subdir = tmp.path().join("some/nested/dir");
        std::fs::create_dir_all(&subdir).unwrap();

        let ws = Workspace::discover_from(&subdir).unwrap();
        assert_eq!(
            ws.root().canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }

    #[test]
    fn test_workspace_discover_fails_without_tally_dir() {
        let tmp = tempdir().unwrap();
        let err = Workspace::discover_from(tmp.path()).unwrap_err();
        assert!(matches!(err, WorkspaceError::NotFound { .. }));
    }
}
