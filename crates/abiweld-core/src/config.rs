//! Project configuration
//!
//! One [`ProjectConfig`] drives both the merger and the bindings, so the file
//! the merger writes is the file the `merged` ABI source reads. The config
//! lives in `abiweld.toml`; when absent the defaults reproduce the classic
//! diamond-proxy layout (`out/abi.json`, `IDiamondProxy.json` merged in full,
//! errors only from everything else).

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::dir::ProjectDir;
use crate::error::{Error, Result};
use crate::strategy::{ArtifactRule, ErrorPolicy, SelectionStrategy};

const DEFAULT_ARTIFACTS_DIR: &str = "out";
const DEFAULT_OUTPUT: &str = "abi.json";
const DEFAULT_PROXY_ARTIFACT: &str = "IDiamondProxy.json";
const DEFAULT_DEPLOYMENTS: &str = "gemforge.deployments.json";

/// Contents of `abiweld.toml`
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProjectConfig {
    #[serde(default)]
    pub merge: MergeConfig,
    #[serde(default)]
    pub exports: ExportsConfig,
}

/// `[merge]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MergeConfig {
    /// Artifacts root. Falls back to foundry.toml's `out`, then `out`
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub artifacts_dir: Option<PathBuf>,
    /// Merged ABI file, relative to the artifacts directory
    #[serde(default = "default_output")]
    pub output: PathBuf,
    #[serde(default)]
    pub on_error: ErrorPolicy,
    #[serde(default)]
    pub default_strategy: SelectionStrategy,
    #[serde(default = "default_rules")]
    pub rules: Vec<ArtifactRule>,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            artifacts_dir: None,
            output: default_output(),
            on_error: ErrorPolicy::default(),
            default_strategy: SelectionStrategy::default(),
            rules: default_rules(),
        }
    }
}

fn default_output() -> PathBuf {
    PathBuf::from(DEFAULT_OUTPUT)
}

fn default_rules() -> Vec<ArtifactRule> {
    vec![ArtifactRule::new(
        DEFAULT_PROXY_ARTIFACT,
        SelectionStrategy::Full,
    )]
}

/// `[exports]` section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportsConfig {
    /// Deployment records file, relative to the project root
    #[serde(default = "default_deployments")]
    pub deployments: PathBuf,
    #[serde(default)]
    pub abi: AbiSource,
}

impl Default for ExportsConfig {
    fn default() -> Self {
        Self {
            deployments: default_deployments(),
            abi: AbiSource::default(),
        }
    }
}

fn default_deployments() -> PathBuf {
    PathBuf::from(DEFAULT_DEPLOYMENTS)
}

/// Where the exported ABI comes from
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AbiSource {
    /// The merger's output file
    #[default]
    Merged,
    /// The `abi` field of a single artifact, relative to the project root
    Artifact(PathBuf),
    /// A flat JSON array of fragments, relative to the project root
    File(PathBuf),
}

impl ProjectConfig {
    /// Load `abiweld.toml` from the project, or defaults if it does not exist
    pub fn load(project: &ProjectDir) -> Result<Self> {
        let path = project.config_path();
        if !path.is_file() {
            return Ok(Self::default());
        }
        Self::load_from(&path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| Error::config(path, e))?;
        Self::parse(&content).map_err(|e| Error::config(path, e))
    }

    pub fn parse(content: &str) -> std::result::Result<Self, toml::de::Error> {
        toml::from_str(content)
    }

    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| Error::config(ProjectDir::CONFIG_FILE, e))
    }

    /// Resolve the artifacts directory: explicit setting, then foundry.toml, then `out`
    pub fn artifacts_dir(&self, project: &ProjectDir) -> Result<PathBuf> {
        if let Some(dir) = &self.merge.artifacts_dir {
            return Ok(project.join(dir));
        }

        let foundry_out = FoundryConfig::load_if_exists(&project.foundry_config_path())?
            .and_then(|config| config.out_dir().map(Path::to_path_buf));

        Ok(project.join(foundry_out.unwrap_or_else(|| PathBuf::from(DEFAULT_ARTIFACTS_DIR))))
    }

    /// Path of the merged ABI file
    pub fn output_path(&self, project: &ProjectDir) -> Result<PathBuf> {
        Ok(self.artifacts_dir(project)?.join(&self.merge.output))
    }

    pub fn deployments_path(&self, project: &ProjectDir) -> PathBuf {
        project.join(&self.exports.deployments)
    }
}

// =============================================================================
// foundry.toml
// =============================================================================

/// Foundry configuration file structure (foundry.toml)
/// We only parse the sections we need
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoundryConfig {
    #[serde(default)]
    pub profile: HashMap<String, FoundryProfile>,
}

/// A `[profile.<name>]` table
#[derive(Debug, Clone, Default, Deserialize)]
pub struct FoundryProfile {
    #[serde(default)]
    pub out: Option<PathBuf>,
}

impl FoundryConfig {
    pub fn load_if_exists(path: &Path) -> Result<Option<Self>> {
        if !path.is_file() {
            return Ok(None);
        }

        let content = std::fs::read_to_string(path).map_err(|e| Error::config(path, e))?;
        let config: FoundryConfig = toml::from_str(&content).map_err(|e| Error::config(path, e))?;
        Ok(Some(config))
    }

    /// The `out` directory of the default profile
    pub fn out_dir(&self) -> Option<&Path> {
        self.profile
            .get("default")
            .and_then(|p| p.out.as_deref())
    }
}
