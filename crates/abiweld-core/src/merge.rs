//! ABI merging
//!
//! The [`Merger`] walks every artifact its loader lists, picks fragments per
//! the configured [`SelectionStrategy`], and concatenates them in scan order.
//! No deduplication happens: an error declared by three artifacts appears
//! three times.

use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::artifact::{ArtifactLoader, FileSystemArtifactLoader};
use crate::config::{MergeConfig, ProjectConfig};
use crate::dir::ProjectDir;
use crate::error::{Error, Result};
use crate::fragment::AbiFragment;
use crate::strategy::{self, ArtifactRule, ErrorPolicy, SelectionStrategy};

// =============================================================================
// Report Types
// =============================================================================

/// What happened to one discovered artifact
#[derive(Debug, Clone, PartialEq)]
pub enum ArtifactOutcome {
    /// Fragments were selected from the artifact's ABI
    Merged {
        strategy: SelectionStrategy,
        selected: usize,
        total: usize,
    },
    /// The document has no `abi` field
    NoAbi,
    /// The artifact could not be read or parsed
    Skipped { reason: String },
}

/// Per-artifact entry of a [`MergeReport`]
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactReport {
    pub path: PathBuf,
    pub outcome: ArtifactOutcome,
}

/// Result of a merge run
#[derive(Debug, Clone)]
pub struct MergeReport {
    /// Where the merged ABI is (or would be) written
    pub output: PathBuf,
    /// The merged fragments, in output order
    pub fragments: Vec<AbiFragment>,
    /// Every discovered artifact in scan order
    pub artifacts: Vec<ArtifactReport>,
}

impl MergeReport {
    /// Artifacts that were skipped because they could not be read or parsed
    pub fn skipped(&self) -> impl Iterator<Item = (&Path, &str)> {
        self.artifacts.iter().filter_map(|a| match &a.outcome {
            ArtifactOutcome::Skipped { reason } => Some((a.path.as_path(), reason.as_str())),
            _ => None,
        })
    }

    /// Number of artifacts that contributed an ABI (possibly zero fragments)
    pub fn merged_count(&self) -> usize {
        self.artifacts
            .iter()
            .filter(|a| matches!(a.outcome, ArtifactOutcome::Merged { .. }))
            .count()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped().count()
    }
}

// =============================================================================
// Merger
// =============================================================================

/// Merges artifact ABIs into one fragment list
#[derive(Clone)]
pub struct Merger {
    loader: Arc<dyn ArtifactLoader>,
    rules: Vec<ArtifactRule>,
    default_strategy: SelectionStrategy,
    on_error: ErrorPolicy,
    output: PathBuf,
}

impl Merger {
    /// Create a merger for a project from its configuration
    pub fn new(project: &ProjectDir, config: &ProjectConfig) -> Result<Self> {
        let artifacts_dir = config.artifacts_dir(project)?;
        let output = artifacts_dir.join(&config.merge.output);
        let loader = FileSystemArtifactLoader::new(artifacts_dir).excluding(output.clone());

        Ok(Self::with_loader(Arc::new(loader), &config.merge, output))
    }

    /// Create a merger with an explicit artifact loader
    pub fn with_loader(
        loader: Arc<dyn ArtifactLoader>,
        config: &MergeConfig,
        output: PathBuf,
    ) -> Self {
        Self {
            loader,
            rules: config.rules.clone(),
            default_strategy: config.default_strategy.clone(),
            on_error: config.on_error,
            output,
        }
    }

    /// Override the configured error policy
    pub fn with_error_policy(mut self, policy: ErrorPolicy) -> Self {
        self.on_error = policy;
        self
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    /// Scan and merge without writing anything
    pub fn plan(&self) -> Result<MergeReport> {
        let mut fragments = Vec::new();
        let mut artifacts = Vec::new();

        for path in self.loader.list()? {
            let outcome = match self.merge_artifact(&path) {
                Ok(Some((strategy, selected, total))) => {
                    let count = selected.len();
                    fragments.extend(selected);
                    ArtifactOutcome::Merged {
                        strategy,
                        selected: count,
                        total,
                    }
                }
                Ok(None) => {
                    tracing::debug!(path = %path.display(), "no abi field");
                    ArtifactOutcome::NoAbi
                }
                Err(err) => match self.on_error {
                    ErrorPolicy::Fail => return Err(err),
                    ErrorPolicy::Skip => {
                        tracing::warn!(path = %path.display(), error = %err, "skipping artifact");
                        ArtifactOutcome::Skipped {
                            reason: err.to_string(),
                        }
                    }
                },
            };

            artifacts.push(ArtifactReport { path, outcome });
        }

        Ok(MergeReport {
            output: self.output.clone(),
            fragments,
            artifacts,
        })
    }

    /// Scan, merge and write the merged ABI to the output path
    pub fn run(&self) -> Result<MergeReport> {
        let report = self.plan()?;
        write_merged(&report.output, &report.fragments)?;

        tracing::info!(
            output = %report.output.display(),
            fragments = report.fragments.len(),
            artifacts = report.merged_count(),
            skipped = report.skipped_count(),
            "wrote merged abi"
        );

        Ok(report)
    }

    fn merge_artifact(
        &self,
        path: &Path,
    ) -> Result<Option<(SelectionStrategy, Vec<AbiFragment>, usize)>> {
        let artifact = self.loader.load(path)?;

        let fragments = match artifact.into_fragments() {
            None => return Ok(None),
            Some(parsed) => parsed.map_err(|message| Error::malformed(path, message))?,
        };

        let strategy = strategy::resolve(&self.rules, &self.default_strategy, path).clone();
        let total = fragments.len();
        let selected = strategy.select(fragments);

        tracing::debug!(
            path = %path.display(),
            strategy = %strategy,
            selected = selected.len(),
            total,
            "merged artifact"
        );

        Ok(Some((strategy, selected, total)))
    }
}

/// Serialize fragments as 2-space indented JSON and replace `path` atomically
pub fn write_merged(path: &Path, fragments: &[AbiFragment]) -> Result<()> {
    let json = serde_json::to_string_pretty(fragments)?;

    let parent = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(parent)?;

    let mut tmp = tempfile::NamedTempFile::new_in(parent)?;
    tmp.write_all(json.as_bytes())?;
    tmp.flush()?;
    tmp.persist(path).map_err(|e| Error::Persist {
        path: path.to_path_buf(),
        source: e.error,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artifact::InterfaceArtifact;
    use serde_json::{json, Value};
    use std::collections::BTreeMap;

    /// In-memory loader; `None` content simulates an unparseable file
    struct MemoryLoader {
        files: BTreeMap<PathBuf, Option<Value>>,
    }

    impl MemoryLoader {
        fn new(files: Vec<(&str, Option<Value>)>) -> Arc<Self> {
            Arc::new(Self {
                files: files
                    .into_iter()
                    .map(|(p, v)| (PathBuf::from(p), v))
                    .collect(),
            })
        }
    }

    impl ArtifactLoader for MemoryLoader {
        fn list(&self) -> Result<Vec<PathBuf>> {
            Ok(self.files.keys().cloned().collect())
        }

        fn load(&self, path: &Path) -> Result<InterfaceArtifact> {
            match self.files.get(path) {
                Some(Some(value)) => Ok(InterfaceArtifact::from_value(value.clone())),
                _ => Err(Error::malformed(path, "expected value at line 1 column 3")),
            }
        }
    }

    fn merger(loader: Arc<MemoryLoader>) -> Merger {
        Merger::with_loader(loader, &MergeConfig::default(), PathBuf::from("out/abi.json"))
    }

    fn names(report: &MergeReport) -> Vec<&str> {
        report.fragments.iter().filter_map(|f| f.name()).collect()
    }

    fn scenario() -> Vec<(&'static str, Option<Value>)> {
        vec![
            (
                "out/A.sol/A.json",
                Some(json!({"abi": [{"type": "function", "name": "f"}]})),
            ),
            (
                "out/B.sol/B.json",
                Some(json!({"abi": [
                    {"type": "error", "name": "E1"},
                    {"type": "event", "name": "Ev"}
                ]})),
            ),
            (
                "out/IDiamondProxy.sol/IDiamondProxy.json",
                Some(json!({"abi": [
                    {"type": "error", "name": "E2"},
                    {"type": "function", "name": "g"}
                ]})),
            ),
        ]
    }

    #[test]
    fn test_proxy_in_full_others_errors_only() {
        let report = merger(MemoryLoader::new(scenario())).plan().unwrap();

        assert_eq!(names(&report), vec!["E1", "E2", "g"]);
        assert_eq!(report.merged_count(), 3);
        assert_eq!(report.skipped_count(), 0);
        assert_eq!(
            report.artifacts[2].outcome,
            ArtifactOutcome::Merged {
                strategy: SelectionStrategy::Full,
                selected: 2,
                total: 2,
            }
        );
        assert_eq!(
            report.artifacts[0].outcome,
            ArtifactOutcome::Merged {
                strategy: SelectionStrategy::Errors,
                selected: 0,
                total: 1,
            }
        );
    }

    #[test]
    fn test_no_deduplication() {
        let error = json!({"type": "error", "name": "Unauthorized", "inputs": []});
        let loader = MemoryLoader::new(vec![
            ("out/A.sol/A.json", Some(json!({"abi": [error.clone()]}))),
            ("out/B.sol/B.json", Some(json!({"abi": [error.clone()]}))),
        ]);

        let report = merger(loader).plan().unwrap();
        assert_eq!(names(&report), vec!["Unauthorized", "Unauthorized"]);
    }

    #[test]
    fn test_missing_abi_contributes_nothing() {
        let loader = MemoryLoader::new(vec![
            ("out/A.sol/A.json", Some(json!({"bytecode": {"object": "0x"}}))),
            ("out/B.sol/B.json", Some(json!({"abi": [{"type": "error", "name": "E"}]}))),
        ]);

        let report = merger(loader).plan().unwrap();
        assert_eq!(names(&report), vec!["E"]);
        assert_eq!(report.artifacts[0].outcome, ArtifactOutcome::NoAbi);
    }

    #[test]
    fn test_unparseable_artifact_skipped_and_reported() {
        let mut files = scenario();
        files.push(("out/Broken.sol/Broken.json", None));

        let report = merger(MemoryLoader::new(files)).plan().unwrap();

        assert_eq!(names(&report), vec!["E1", "E2", "g"]);
        let skipped: Vec<_> = report.skipped().collect();
        assert_eq!(skipped.len(), 1);
        assert_eq!(skipped[0].0, Path::new("out/Broken.sol/Broken.json"));
    }

    #[test]
    fn test_fail_fast_policy() {
        let mut files = scenario();
        files.push(("out/Broken.sol/Broken.json", None));

        let result = merger(MemoryLoader::new(files))
            .with_error_policy(ErrorPolicy::Fail)
            .plan();

        assert!(matches!(result, Err(Error::MalformedArtifact { .. })));
    }

    #[test]
    fn test_non_array_abi_follows_error_policy() {
        let loader = MemoryLoader::new(vec![
            ("out/A.sol/A.json", Some(json!({"abi": {"type": "error"}}))),
            ("out/B.sol/B.json", Some(json!({"abi": [{"type": "error", "name": "E"}]}))),
        ]);

        let report = merger(loader.clone()).plan().unwrap();
        assert_eq!(names(&report), vec!["E"]);
        assert_eq!(report.skipped_count(), 1);

        assert!(merger(loader)
            .with_error_policy(ErrorPolicy::Fail)
            .plan()
            .is_err());
    }

    #[test]
    fn test_non_object_entries_dropped_individually() {
        let loader = MemoryLoader::new(vec![(
            "out/A.sol/A.json",
            Some(json!({"abi": [{"type": "error", "name": "E1"}, 3]})),
        )]);

        let report = merger(loader).plan().unwrap();
        assert_eq!(names(&report), vec!["E1"]);
        assert_eq!(report.skipped_count(), 0);
    }

    #[test]
    fn test_custom_rules_and_default() {
        let config = MergeConfig {
            default_strategy: SelectionStrategy::Skip,
            rules: vec![ArtifactRule::new("B.json", SelectionStrategy::Full)],
            ..MergeConfig::default()
        };
        let merger = Merger::with_loader(
            MemoryLoader::new(scenario()),
            &config,
            PathBuf::from("abi.json"),
        );

        let report = merger.plan().unwrap();
        assert_eq!(names(&report), vec!["E1", "Ev"]);
    }

    #[test]
    fn test_fragments_pass_through_verbatim() {
        let fragment = json!({
            "type": "error",
            "name": "InsufficientBalance",
            "inputs": [
                {"name": "available", "type": "uint256", "internalType": "uint256"},
                {"name": "required", "type": "uint256", "internalType": "uint256"}
            ]
        });
        let loader = MemoryLoader::new(vec![(
            "out/T.sol/T.json",
            Some(json!({"abi": [fragment.clone()]})),
        )]);

        let report = merger(loader).plan().unwrap();
        assert_eq!(report.fragments[0].clone().into_value(), fragment);
    }

    #[test]
    fn test_write_merged_pretty_and_overwrites() {
        let tmp = tempfile::tempdir().unwrap();
        let path = tmp.path().join("nested/abi.json");
        let fragments: Vec<AbiFragment> = [json!({"type": "error", "name": "E"})]
            .into_iter()
            .filter_map(AbiFragment::from_value)
            .collect();

        write_merged(&path, &fragments).unwrap();
        let first = std::fs::read_to_string(&path).unwrap();
        assert_eq!(
            first,
            "[\n  {\n    \"type\": \"error\",\n    \"name\": \"E\"\n  }\n]"
        );

        write_merged(&path, &[]).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "[]");
    }
}
