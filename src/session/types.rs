//! Session Document Types
//!
//! The persisted session is a JSON object with exactly two top-level
//! fields: an ordered array of forwarding parameters and the dark-mode
//! flag. No schema version field exists; any structural mismatch is an
//! invalid document.

use serde::{Deserialize, Serialize};

/// Configurable fields of one forwarding rule
///
/// A plain value: duplicates are allowed and an entry carries no
/// identity beyond its fields. `Default` is the blank entry shown as
/// an empty row in a fresh session. The registry stores these; the
/// forwarding engine consumes them elsewhere.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ForwardingParameters {
    /// Display label for the rule row
    #[serde(default)]
    pub label: String,
    /// Local bind address
    #[serde(default)]
    pub local_ip: String,
    /// Local bind port (a blank row has none)
    #[serde(default)]
    pub local_port: Option<u16>,
    /// Target host
    #[serde(default)]
    pub target_ip: String,
    /// Target port
    #[serde(default)]
    pub target_port: Option<u16>,
}

impl ForwardingParameters {
    /// Create fully populated parameters
    pub fn new(
        label: impl Into<String>,
        local_ip: impl Into<String>,
        local_port: u16,
        target_ip: impl Into<String>,
        target_port: u16,
    ) -> Self {
        Self {
            label: label.into(),
            local_ip: local_ip.into(),
            local_port: Some(local_port),
            target_ip: target_ip.into(),
            target_port: Some(target_port),
        }
    }

    /// Whether every field still holds its default value
    pub fn is_blank(&self) -> bool {
        *self == Self::default()
    }
}

/// The serializable session aggregate
///
/// Exactly what goes to disk: the ordered rule parameters plus the
/// display preference. Insertion order is significant and an empty
/// entry list is valid.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct SessionDocument {
    /// Ordered forwarding rules, one per visual row
    pub parameters: Vec<ForwardingParameters>,
    /// Whether the dark style sheet is applied
    pub dark_mode: bool,
}

/// A persisted session payload that could not be decoded
#[derive(Debug, thiserror::Error)]
#[error("Invalid session document: {0}")]
pub struct DocumentDecodeError(#[from] pub serde_json::Error);

impl SessionDocument {
    /// Decode a document from JSON. All-or-nothing: a malformed payload
    /// never yields a partially populated document.
    pub fn from_json(data: &str) -> Result<Self, DocumentDecodeError> {
        Ok(serde_json::from_str(data)?)
    }

    /// Encode the document to JSON. `pretty` affects formatting only,
    /// never decoded semantics.
    pub fn to_json(&self, pretty: bool) -> Result<String, serde_json::Error> {
        if pretty {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        }
    }
}
