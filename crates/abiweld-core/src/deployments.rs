//! Deployment records
//!
//! The deployment file written by the deploy tooling
//! (`gemforge.deployments.json`) is kept as loaded: [`DeploymentRecords`]
//! holds the raw JSON document, so re-exporting it reproduces the file with
//! its key order and any fields this crate does not know about. Typed records
//! are only built on demand for address lookups.

use alloy::primitives::Address;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// The deployment document, keyed by target name (e.g. `local`, `base_sepolia`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct DeploymentRecords(Value);

impl DeploymentRecords {
    pub fn from_value(value: Value) -> Self {
        Self(value)
    }

    pub fn as_value(&self) -> &Value {
        &self.0
    }

    /// Target names in file order
    pub fn targets(&self) -> Vec<&str> {
        self.0
            .as_object()
            .map(|map| map.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn contains_target(&self, target: &str) -> bool {
        self.0.get(target).is_some()
    }

    /// Typed view of one target's entry, `None` if the target is not recorded
    pub fn target(&self, target: &str) -> serde_json::Result<Option<TargetDeploymentRecord>> {
        match self.0.get(target) {
            Some(entry) => TargetDeploymentRecord::deserialize(entry).map(Some),
            None => Ok(None),
        }
    }

    /// Address of a contract deployed on a target
    pub fn address_of(&self, target: &str, contract: &str) -> serde_json::Result<Option<Address>> {
        Ok(self
            .target(target)?
            .and_then(|record| record.contract(contract).map(|c| c.address())))
    }
}

/// Contracts deployed for one target
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetDeploymentRecord {
    #[serde(default)]
    pub chain_id: Option<u64>,
    #[serde(default)]
    pub contracts: Vec<ContractDeploymentRecord>,
}

impl TargetDeploymentRecord {
    /// Find a contract by name (returns the last deployment if listed twice)
    pub fn contract(&self, name: &str) -> Option<&ContractDeploymentRecord> {
        self.contracts.iter().rev().find(|c| c.name == name)
    }
}

/// A single deployed contract
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ContractDeploymentRecord {
    pub name: String,
    #[serde(default)]
    pub fully_qualified_name: Option<String>,
    #[serde(default)]
    pub sender: Option<Address>,
    #[serde(default)]
    pub tx_hash: Option<String>,
    pub on_chain: OnChainRecord,
}

impl ContractDeploymentRecord {
    pub fn address(&self) -> Address {
        self.on_chain.address
    }
}

/// On-chain details of a deployment
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OnChainRecord {
    pub address: Address,
    #[serde(default)]
    pub constructor_args: Vec<Value>,
}
