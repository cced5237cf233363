//! ABI fragments as they appear in compiler artifacts
//!
//! A fragment is kept as the raw JSON object the compiler emitted so that
//! merging never adds, drops, or reorders fields. Only the `type`
//! discriminator is inspected.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

// =============================================================================
// Fragment Kind
// =============================================================================

/// The `type` discriminator of an ABI fragment
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum FragmentKind {
    Function,
    Event,
    Error,
    Constructor,
    Fallback,
    Receive,
    Other(String),
}

impl FragmentKind {
    pub fn as_str(&self) -> &str {
        match self {
            FragmentKind::Function => "function",
            FragmentKind::Event => "event",
            FragmentKind::Error => "error",
            FragmentKind::Constructor => "constructor",
            FragmentKind::Fallback => "fallback",
            FragmentKind::Receive => "receive",
            FragmentKind::Other(other) => other,
        }
    }
}

impl From<&str> for FragmentKind {
    fn from(value: &str) -> Self {
        match value {
            "function" => FragmentKind::Function,
            "event" => FragmentKind::Event,
            "error" => FragmentKind::Error,
            "constructor" => FragmentKind::Constructor,
            "fallback" => FragmentKind::Fallback,
            "receive" => FragmentKind::Receive,
            other => FragmentKind::Other(other.to_string()),
        }
    }
}

impl From<String> for FragmentKind {
    fn from(value: String) -> Self {
        FragmentKind::from(value.as_str())
    }
}

impl From<FragmentKind> for String {
    fn from(value: FragmentKind) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for FragmentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// =============================================================================
// Fragment
// =============================================================================

/// One entry of an `abi` array, passed through verbatim
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AbiFragment(Map<String, Value>);

impl AbiFragment {
    /// Wrap a JSON value, returning `None` if it is not an object
    pub fn from_value(value: Value) -> Option<Self> {
        match value {
            Value::Object(map) => Some(Self(map)),
            _ => None,
        }
    }

    /// The fragment's `type` discriminator, if present and a string
    pub fn kind(&self) -> Option<FragmentKind> {
        self.0
            .get("type")
            .and_then(Value::as_str)
            .map(FragmentKind::from)
    }

    /// The fragment's `name`, absent for constructors, fallbacks and receives
    pub fn name(&self) -> Option<&str> {
        self.0.get("name").and_then(Value::as_str)
    }

    pub fn is_kind(&self, kind: &FragmentKind) -> bool {
        self.kind().as_ref() == Some(kind)
    }

    pub fn into_value(self) -> Value {
        Value::Object(self.0)
    }
}

/// Parse an `abi` value into fragments
///
/// Fails unless the value is an array. Entries that are not objects are
/// dropped one by one.
pub fn fragments_from_value(value: Value) -> Result<Vec<AbiFragment>, String> {
    let entries = match value {
        Value::Array(entries) => entries,
        other => {
            return Err(format!(
                "`abi` is {}, expected an array",
                json_type_name(&other)
            ))
        }
    };

    Ok(entries
        .into_iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let kind = json_type_name(&entry);
            let fragment = AbiFragment::from_value(entry);
            if fragment.is_none() {
                tracing::debug!(index, "dropping abi entry: {} is not an object", kind);
            }
            fragment
        })
        .collect())
}

fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
