//! Typed ABI view
//!
//! Merged fragments are stored as raw JSON. [`Abi`] wraps alloy's `JsonAbi`
//! for callers that want signatures, selectors or encoding helpers on top.

use alloy::json_abi::JsonAbi;

use crate::error::Error;
use crate::fragment::AbiFragment;

// =============================================================================
// Abi Struct
// =============================================================================

/// Wrapper around alloy's JsonAbi
#[derive(Debug, Clone)]
pub struct Abi(JsonAbi);

impl Abi {
    /// Parse a JSON ABI string into an Abi struct
    pub fn parse(json: &str) -> Result<Self, Error> {
        let abi: JsonAbi = serde_json::from_str(json)
            .map_err(|e| Error::Abi(format!("Failed to parse ABI: {}", e)))?;
        Ok(Self(abi))
    }

    /// Build from merged fragments
    pub fn from_fragments(fragments: &[AbiFragment]) -> Result<Self, Error> {
        let value = serde_json::to_value(fragments)?;
        let abi: JsonAbi = serde_json::from_value(value)
            .map_err(|e| Error::Abi(format!("Failed to parse ABI: {}", e)))?;
        Ok(Self(abi))
    }

    /// Get the inner JsonAbi for advanced operations
    pub fn inner(&self) -> &JsonAbi {
        &self.0
    }

    /// Count the members of each kind
    pub fn summary(&self) -> AbiSummary {
        AbiSummary {
            functions: self.0.functions().count(),
            events: self.0.events().count(),
            errors: self.0.errors().count(),
            has_constructor: self.0.constructor.is_some(),
            has_fallback: self.0.fallback.is_some(),
            has_receive: self.0.receive.is_some(),
        }
    }

    /// Error signatures with their 4-byte selectors, sorted by signature
    pub fn error_selectors(&self) -> Vec<(String, String)> {
        let mut selectors: Vec<_> = self
            .0
            .errors()
            .map(|e| (e.signature(), e.selector().to_string()))
            .collect();
        selectors.sort();
        selectors
    }
}

/// Member counts of an ABI
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AbiSummary {
    pub functions: usize,
    pub events: usize,
    pub errors: usize,
    pub has_constructor: bool,
    pub has_fallback: bool,
    pub has_receive: bool,
}
