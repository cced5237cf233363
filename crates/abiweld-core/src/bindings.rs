//! Typed bindings over generated files
//!
//! [`Bindings`] loads the deployment records and the exported ABI named by
//! the project's `[exports]` section. Any missing or malformed backing file
//! fails the whole load; there are no fallbacks.

use std::path::{Path, PathBuf};

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::abi::Abi;
use crate::config::{AbiSource, ProjectConfig};
use crate::deployments::DeploymentRecords;
use crate::dir::ProjectDir;
use crate::error::{Error, Result};
use crate::fragment::{fragments_from_value, AbiFragment};

const DEPLOYED_ADDRESSES: &str = "deployedAddresses";
const ABI: &str = "abi";

/// Deployment addresses and exported ABI for a project
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bindings {
    pub deployed_addresses: DeploymentRecords,
    pub abi: Vec<AbiFragment>,
}

impl Bindings {
    /// Load both bindings as configured for the project
    pub fn load(project: &ProjectDir, config: &ProjectConfig) -> Result<Self> {
        let deployed_addresses = load_deployments(&config.deployments_path(project))?;
        let abi = load_abi(project, config)?;

        Ok(Self {
            deployed_addresses,
            abi,
        })
    }

    /// Address of a contract deployed on a target
    ///
    /// Fails if the target's entry does not have the record shape.
    pub fn address_of(&self, target: &str, contract: &str) -> Result<Option<Address>> {
        Ok(self.deployed_addresses.address_of(target, contract)?)
    }

    /// Typed view of the exported ABI
    pub fn json_abi(&self) -> Result<Abi> {
        Abi::from_fragments(&self.abi)
    }

    /// The bundle document written by `abiweld export`
    pub fn to_bundle(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

/// Load the deployment records file as-is
pub fn load_deployments(path: &Path) -> Result<DeploymentRecords> {
    let content = read_binding(DEPLOYED_ADDRESSES, path)?;
    let value: Value = serde_json::from_str(&content)
        .map_err(|e| Error::binding_load(DEPLOYED_ADDRESSES, path, e))?;
    Ok(DeploymentRecords::from_value(value))
}

/// Load the ABI from whichever source the project exports
pub fn load_abi(project: &ProjectDir, config: &ProjectConfig) -> Result<Vec<AbiFragment>> {
    let (path, nested) = abi_source_path(project, config)?;
    let content = read_binding(ABI, &path)?;
    let value: Value =
        serde_json::from_str(&content).map_err(|e| Error::binding_load(ABI, &path, e))?;

    let abi = if nested {
        match value {
            Value::Object(mut map) => map
                .remove("abi")
                .ok_or_else(|| Error::binding_load(ABI, &path, "artifact has no `abi` field"))?,
            _ => return Err(Error::binding_load(ABI, &path, "artifact is not an object")),
        }
    } else {
        value
    };

    fragments_from_value(abi).map_err(|message| Error::binding_load(ABI, &path, message))
}

/// Resolve the ABI source to a file, and whether the ABI sits under an `abi` key
fn abi_source_path(project: &ProjectDir, config: &ProjectConfig) -> Result<(PathBuf, bool)> {
    Ok(match &config.exports.abi {
        AbiSource::Merged => (config.output_path(project)?, false),
        AbiSource::Artifact(path) => (project.join(path), true),
        AbiSource::File(path) => (project.join(path), false),
    })
}

fn read_binding(binding: &'static str, path: &Path) -> Result<String> {
    std::fs::read_to_string(path).map_err(|e| Error::binding_load(binding, path, e))
}
