use crate::error::{DanglingOutputReference, UnmappedRequiredInput};
use crate::legacy::{InputId, InputValue, NodeType, OutputLink};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// The replacement node as the host should materialize it.
///
/// Inputs absent from `inputs` fall back to the new node's own defaults.
/// `outputs` holds, per new output slot, the downstream links that used to
/// leave the corresponding old slot, already re-targeted. Links whose old
/// slot has no mapping are listed in `dangling_outputs` instead.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct NewNodeDescriptor {
    pub node_id: String,
    pub node_type: NodeType,
    pub replaced_type: NodeType,
    pub inputs: BTreeMap<InputId, InputValue>,
    pub outputs: BTreeMap<u32, Vec<OutputLink>>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dangling_outputs: Vec<DanglingOutputReference>,
}

impl NewNodeDescriptor {
    pub fn input(&self, id: &str) -> Option<&InputValue> {
        self.inputs.get(id)
    }

    pub fn links_from(&self, slot: u32) -> &[OutputLink] {
        self.outputs.get(&slot).map(Vec::as_slice).unwrap_or_default()
    }

    pub fn has_dangling_outputs(&self) -> bool {
        !self.dangling_outputs.is_empty()
    }

    /// Strict-mode check for hosts that know which inputs the new node
    /// requires. Resolution itself never fails on a missing input.
    pub fn require_inputs<S: AsRef<str>>(&self, required: &[S]) -> Result<(), UnmappedRequiredInput> {
        let missing: Vec<String> = required
            .iter()
            .map(|id| id.as_ref())
            .filter(|id: &&str| !self.inputs.contains_key(*id))
            .map(str::to_string)
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(UnmappedRequiredInput {
                node_id: self.node_id.clone(),
                node_type: self.node_type.clone(),
                missing,
            })
        }
    }
}
