//! Asset root discovery.
//!
//! Default shader paths are relative (`shaders/...`). Hosts may be launched from the workspace
//! root or from a crate directory, so we walk up from a starting directory until we find one
//! that contains the shader directory.

use std::path::{Path, PathBuf};

use crate::EngineError;

/// Directory name that marks an asset root.
pub const SHADER_DIR: &str = "shaders";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetsRoot {
    root: PathBuf,
}

impl AssetsRoot {
    /// Wraps an explicit root without checking it.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Searches `start_dir` and its ancestors for a directory containing `shaders/`.
    pub fn discover(start_dir: &Path) -> Result<Self, EngineError> {
        for dir in start_dir.ancestors() {
            if dir.join(SHADER_DIR).is_dir() {
                tracing::debug!(root = %dir.display(), "asset root found");
                return Ok(Self::new(dir));
            }
        }
        Err(EngineError::AssetsNotFound {
            start_dir: start_dir.to_path_buf(),
        })
    }

    pub fn discover_from_cwd() -> Result<Self, EngineError> {
        let cwd = std::env::current_dir().map_err(|e| EngineError::io(".", e))?;
        Self::discover(&cwd)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Resolves a root-relative path.
    pub fn resolve(&self, rel: impl AsRef<Path>) -> PathBuf {
        self.root.join(rel)
    }
}
