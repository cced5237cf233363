pub mod abi;
pub mod artifact;
pub mod bindings;
pub mod config;
pub mod deployments;
pub mod dir;
pub mod error;
pub mod fragment;
pub mod merge;
pub mod strategy;

pub use abi::{Abi, AbiSummary};
pub use artifact::{ArtifactLoader, FileSystemArtifactLoader, InterfaceArtifact};
pub use bindings::Bindings;
pub use config::{AbiSource, ExportsConfig, FoundryConfig, MergeConfig, ProjectConfig};
pub use deployments::{
    ContractDeploymentRecord, DeploymentRecords, OnChainRecord, TargetDeploymentRecord,
};
pub use dir::ProjectDir;
pub use error::{Error, Result};
pub use fragment::{AbiFragment, FragmentKind};
pub use merge::{ArtifactOutcome, ArtifactReport, MergeReport, Merger};
pub use strategy::{ArtifactRule, ErrorPolicy, SelectionStrategy};
