//! Project directory handling
//!
//! The [`ProjectDir`] struct anchors every relative path in the configuration
//! (artifacts directory, merged output, deployment records) to one project root.

use std::path::{Path, PathBuf};

/// Root of a Foundry project using abiweld.
#[derive(Debug, Clone)]
pub struct ProjectDir {
    path: PathBuf,
}

impl ProjectDir {
    /// The abiweld configuration file name
    pub const CONFIG_FILE: &str = "abiweld.toml";

    /// The Foundry configuration file name
    pub const FOUNDRY_CONFIG_FILE: &str = "foundry.toml";

    /// Create a new `ProjectDir` rooted at the current directory.
    pub fn new() -> Self {
        Self {
            path: PathBuf::from("."),
        }
    }

    /// Create a `ProjectDir` at a custom location.
    pub fn at<P: Into<PathBuf>>(path: P) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Resolve a configured path against the project root. Absolute paths are
    /// returned unchanged.
    pub fn join<P: AsRef<Path>>(&self, path: P) -> PathBuf {
        self.path.join(path)
    }

    pub fn config_path(&self) -> PathBuf {
        self.join(Self::CONFIG_FILE)
    }

    pub fn foundry_config_path(&self) -> PathBuf {
        self.join(Self::FOUNDRY_CONFIG_FILE)
    }

    pub fn has_config(&self) -> bool {
        self.config_path().is_file()
    }

    pub fn is_foundry_project(&self) -> bool {
        self.foundry_config_path().is_file()
    }
}

impl Default for ProjectDir {
    fn default() -> Self {
        Self::new()
    }
}

impl AsRef<Path> for ProjectDir {
    fn as_ref(&self) -> &Path {
        &self.path
    }
}
