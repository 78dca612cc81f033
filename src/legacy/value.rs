use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque payload carried by an input. The resolver never looks inside it.
pub use serde_json::Value;

/// Stable, name-based identifier of a node input.
pub type InputId = String;

/// Class name of a node type.
pub type NodeType = String;

/// Reference to the upstream output feeding an input.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WireRef {
    pub node_id: String,
    pub slot: u32,
}

impl WireRef {
    pub fn new(node_id: impl Into<String>, slot: u32) -> Self {
        Self {
            node_id: node_id.into(),
            slot,
        }
    }
}

impl fmt::Display for WireRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.node_id, self.slot)
    }
}

/// What an input holds: an inline value or a wire from another node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum InputValue {
    Literal(Value),
    Wire(WireRef),
}

impl InputValue {
    pub fn literal(value: impl Into<Value>) -> Self {
        InputValue::Literal(value.into())
    }

    pub fn wire(node_id: impl Into<String>, slot: u32) -> Self {
        InputValue::Wire(WireRef::new(node_id, slot))
    }

    pub fn as_literal(&self) -> Option<&Value> {
        match self {
            InputValue::Literal(v) => Some(v),
            InputValue::Wire(_) => None,
        }
    }

    pub fn as_wire(&self) -> Option<&WireRef> {
        match self {
            InputValue::Wire(w) => Some(w),
            InputValue::Literal(_) => None,
        }
    }
}

impl fmt::Display for InputValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputValue::Literal(v) => write!(f, "{}", v),
            InputValue::Wire(w) => write!(f, "<-{}", w),
        }
    }
}

/// How a legacy input is addressed in its serialized form.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum InputAddress {
    /// Widget value stored by index in the positional value array.
    ByPosition(usize),
    /// Input keyed by its stable ID.
    ById(InputId),
}

impl fmt::Display for InputAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            InputAddress::ByPosition(i) => write!(f, "#{}", i),
            InputAddress::ById(id) => write!(f, "{}", id),
        }
    }
}

/// A downstream wire leaving one of a node's outputs.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct OutputLink {
    pub link_id: u64,
    /// Output slot on the node this link leaves from.
    pub origin_slot: u32,
    pub target_node: String,
    pub target_slot: u32,
}

impl OutputLink {
    pub fn new(link_id: u64, origin_slot: u32, target_node: impl Into<String>, target_slot: u32) -> Self {
        Self {
            link_id,
            origin_slot,
            target_node: target_node.into(),
            target_slot,
        }
    }

    /// Returns a copy of this link re-targeted to leave from `slot`.
    pub fn with_origin(&self, slot: u32) -> Self {
        Self {
            origin_slot: slot,
            ..self.clone()
        }
    }
}
