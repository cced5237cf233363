//! Per-artifact fragment selection
//!
//! Each discovered artifact is matched against the configured [`ArtifactRule`]s
//! to pick a [`SelectionStrategy`]. The first rule whose `artifact` equals the
//! file name wins; unmatched artifacts fall back to the default strategy.

use std::fmt;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::fragment::{AbiFragment, FragmentKind};

/// Which fragments of an artifact's ABI end up in the merged output
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SelectionStrategy {
    /// Every fragment, in file order
    Full,
    /// Only `type == "error"` fragments
    #[default]
    Errors,
    /// Fragments whose kind is listed
    Kinds(Vec<FragmentKind>),
    /// Nothing
    Skip,
}

impl SelectionStrategy {
    /// Check whether a single fragment is kept under this strategy
    pub fn keeps(&self, fragment: &AbiFragment) -> bool {
        match self {
            SelectionStrategy::Full => true,
            SelectionStrategy::Errors => fragment.is_kind(&FragmentKind::Error),
            SelectionStrategy::Kinds(kinds) => fragment
                .kind()
                .is_some_and(|kind| kinds.contains(&kind)),
            SelectionStrategy::Skip => false,
        }
    }

    /// Keep the selected fragments, preserving their order
    pub fn select(&self, fragments: Vec<AbiFragment>) -> Vec<AbiFragment> {
        match self {
            SelectionStrategy::Full => fragments,
            SelectionStrategy::Skip => Vec::new(),
            _ => fragments.into_iter().filter(|f| self.keeps(f)).collect(),
        }
    }
}

impl fmt::Display for SelectionStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionStrategy::Full => write!(f, "full"),
            SelectionStrategy::Errors => write!(f, "errors"),
            SelectionStrategy::Kinds(kinds) => {
                let names: Vec<&str> = kinds.iter().map(FragmentKind::as_str).collect();
                write!(f, "kinds[{}]", names.join(","))
            }
            SelectionStrategy::Skip => write!(f, "skip"),
        }
    }
}

/// Assigns a strategy to the artifact with the given file name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ArtifactRule {
    /// Artifact file name, e.g. `IDiamondProxy.json`
    pub artifact: String,
    pub strategy: SelectionStrategy,
}

impl ArtifactRule {
    pub fn new(artifact: impl Into<String>, strategy: SelectionStrategy) -> Self {
        Self {
            artifact: artifact.into(),
            strategy,
        }
    }

    pub fn matches(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|n| n.to_str())
            .is_some_and(|name| name == self.artifact)
    }
}

/// Resolve the strategy for an artifact path
pub fn resolve<'a>(
    rules: &'a [ArtifactRule],
    default: &'a SelectionStrategy,
    path: &Path,
) -> &'a SelectionStrategy {
    rules
        .iter()
        .find(|rule| rule.matches(path))
        .map(|rule| &rule.strategy)
        .unwrap_or(default)
}

/// What to do when an artifact cannot be read or parsed
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorPolicy {
    /// Record the artifact as skipped and keep going
    #[default]
    Skip,
    /// Abort the merge on the first bad artifact
    Fail,
}

impl ErrorPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorPolicy::Skip => "skip",
            ErrorPolicy::Fail => "fail",
        }
    }
}

impl fmt::Display for ErrorPolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
