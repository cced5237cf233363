//! Artifact discovery and loading
//!
//! [`ArtifactLoader`] is the seam between the merger and wherever compiled
//! artifacts live. [`FileSystemArtifactLoader`] walks a forge output directory.

use std::path::{Path, PathBuf};

use serde_json::Value;
use walkdir::WalkDir;

use crate::error::{Error, Result};
use crate::fragment::{fragments_from_value, AbiFragment};

// =============================================================================
// Artifact Type
// =============================================================================

/// A compiled contract-interface document. Only `abi` is consumed.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceArtifact {
    abi: Option<Value>,
}

impl InterfaceArtifact {
    /// Build from any JSON document. Non-objects and `"abi": null` carry no ABI.
    pub fn from_value(value: Value) -> Self {
        let abi = match value {
            Value::Object(mut map) => map.remove("abi").filter(|abi| !abi.is_null()),
            _ => None,
        };
        Self { abi }
    }

    pub fn parse(content: &str) -> serde_json::Result<Self> {
        serde_json::from_str(content).map(Self::from_value)
    }

    pub fn has_abi(&self) -> bool {
        self.abi.is_some()
    }

    /// The ABI fragments, `None` if the artifact has no `abi` field.
    ///
    /// Fails with a description when `abi` is present but is not an array of objects.
    pub fn into_fragments(self) -> Option<std::result::Result<Vec<AbiFragment>, String>> {
        self.abi.map(fragments_from_value)
    }
}

// =============================================================================
// Trait Definition
// =============================================================================

/// Trait for discovering and loading interface artifacts
pub trait ArtifactLoader: Send + Sync {
    /// List artifact paths in scan order
    fn list(&self) -> Result<Vec<PathBuf>>;

    /// Load and parse one artifact
    fn load(&self, path: &Path) -> Result<InterfaceArtifact>;
}

// =============================================================================
// Filesystem Implementation
// =============================================================================

/// Artifact loader that walks a forge output directory for `*.json` files
#[derive(Debug, Clone)]
pub struct FileSystemArtifactLoader {
    /// Directory containing compiled artifacts (typically "out")
    root: PathBuf,
    /// Files never treated as artifacts, e.g. the merged output
    exclude: Vec<PathBuf>,
}

impl FileSystemArtifactLoader {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into(),
            exclude: Vec::new(),
        }
    }

    /// Exclude a file from discovery
    pub fn excluding(mut self, path: impl Into<PathBuf>) -> Self {
        self.exclude.push(path.into());
        self
    }

    /// `build-info/` and hidden entries below the root are not descended into
    fn is_pruned(entry: &walkdir::DirEntry) -> bool {
        if entry.depth() == 0 {
            return false;
        }
        let name = entry.file_name().to_str();
        name.is_some_and(|n| n.starts_with('.'))
            || (entry.file_type().is_dir() && name == Some("build-info"))
    }

    /// Regular files, or symlinks resolving to one
    fn is_file(entry: &walkdir::DirEntry) -> bool {
        entry.file_type().is_file() || (entry.path_is_symlink() && entry.path().is_file())
    }

    fn is_json_file(path: &Path) -> bool {
        path.extension().is_some_and(|e| e == "json")
    }
}

impl ArtifactLoader for FileSystemArtifactLoader {
    fn list(&self) -> Result<Vec<PathBuf>> {
        if !self.root.is_dir() {
            return Err(Error::ArtifactsDirNotFound(self.root.clone()));
        }

        let mut artifacts = Vec::new();

        let walker = WalkDir::new(&self.root)
            .follow_links(false)
            .sort_by_file_name()
            .into_iter()
            .filter_entry(|e| !Self::is_pruned(e));

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(err) if err.depth() == 0 => return Err(err.into()),
                Err(err) => {
                    tracing::warn!(error = %err, "skipping unreadable directory entry");
                    continue;
                }
            };

            if !Self::is_file(&entry) || !Self::is_json_file(entry.path()) {
                continue;
            }

            if self.exclude.iter().any(|p| p == entry.path()) {
                tracing::debug!(path = %entry.path().display(), "excluded from scan");
                continue;
            }

            artifacts.push(entry.into_path());
        }

        Ok(artifacts)
    }

    fn load(&self, path: &Path) -> Result<InterfaceArtifact> {
        let content = std::fs::read_to_string(path).map_err(|source| Error::ArtifactRead {
            path: path.to_path_buf(),
            source,
        })?;

        InterfaceArtifact::parse(&content).map_err(|e| Error::malformed(path, e))
    }
}
