use super::snapshot::RecordSnapshot;
use crate::error::InvalidMigrationSpec;
use crate::legacy::{InputId, NodeType, Value};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

/// One rule populating an input of the new node.
#[derive(Debug, Clone, PartialEq)]
pub enum InputMapping {
    /// Carry the old input's value or wire, looked up by its stable ID.
    Rewire { new_id: InputId, old_id: InputId },
    /// Ignore the old node and assign a fixed value.
    SetLiteral { new_id: InputId, value: Value },
}

impl InputMapping {
    pub fn rewire(new_id: impl Into<InputId>, old_id: impl Into<InputId>) -> Self {
        InputMapping::Rewire {
            new_id: new_id.into(),
            old_id: old_id.into(),
        }
    }

    pub fn set_literal(new_id: impl Into<InputId>, value: impl Into<Value>) -> Self {
        InputMapping::SetLiteral {
            new_id: new_id.into(),
            value: value.into(),
        }
    }

    /// The new node input this mapping writes.
    pub fn new_id(&self) -> &str {
        match self {
            InputMapping::Rewire { new_id, .. } | InputMapping::SetLiteral { new_id, .. } => new_id,
        }
    }
}

/// Moves downstream links from an old output slot to a new one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct OutputMapping {
    pub new_index: u32,
    pub old_index: u32,
}

impl OutputMapping {
    pub fn new(new_index: u32, old_index: u32) -> Self {
        Self {
            new_index,
            old_index,
        }
    }
}

/// A validated, immutable description of one old-node to new-node migration.
///
/// Construction checks every structural invariant, so a `MigrationRecord`
/// that exists is always consistent: widget IDs, mapped input targets, and
/// both sides of the output mappings are unique. Records are plain data and
/// can be shared freely between threads.
///
/// Serialization goes through [`RecordSnapshot`]; deserialization validates,
/// so malformed catalog entries surface as [`InvalidMigrationSpec`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(into = "RecordSnapshot", try_from = "RecordSnapshot")]
pub struct MigrationRecord {
    pub(super) new_node_type: NodeType,
    pub(super) old_node_type: NodeType,
    pub(super) old_widget_positions: Option<Vec<InputId>>,
    pub(super) input_mappings: Vec<InputMapping>,
    pub(super) output_mappings: Vec<OutputMapping>,
}

impl MigrationRecord {
    pub fn new(
        new_node_type: impl Into<NodeType>,
        old_node_type: impl Into<NodeType>,
        old_widget_positions: Option<Vec<InputId>>,
        input_mappings: Vec<InputMapping>,
        output_mappings: Vec<OutputMapping>,
    ) -> Result<Self, InvalidMigrationSpec> {
        let record = Self {
            new_node_type: new_node_type.into(),
            old_node_type: old_node_type.into(),
            old_widget_positions,
            input_mappings,
            output_mappings,
        };
        record.validate()?;
        Ok(record)
    }

    pub fn builder(
        new_node_type: impl Into<NodeType>,
        old_node_type: impl Into<NodeType>,
    ) -> super::MigrationRecordBuilder {
        super::MigrationRecordBuilder::new(new_node_type, old_node_type)
    }

    fn validate(&self) -> Result<(), InvalidMigrationSpec> {
        if self.new_node_type.is_empty() {
            return Err(InvalidMigrationSpec::EmptyNodeType {
                field: "new_node_type",
            });
        }
        if self.old_node_type.is_empty() {
            return Err(InvalidMigrationSpec::EmptyNodeType {
                field: "old_node_type",
            });
        }

        if let Some(positions) = &self.old_widget_positions {
            if let Some(position) = positions.iter().position(String::is_empty) {
                return Err(InvalidMigrationSpec::EmptyWidgetId { position });
            }
            if let Some(dup) = positions.iter().duplicates().next() {
                return Err(InvalidMigrationSpec::DuplicateWidgetId(dup.clone()));
            }
        }

        if let Some(entry) = self.input_mappings.iter().position(|m| m.new_id().is_empty()) {
            return Err(InvalidMigrationSpec::EmptyInputId { entry });
        }
        if let Some(dup) = self.input_mappings.iter().map(InputMapping::new_id).duplicates().next() {
            return Err(InvalidMigrationSpec::DuplicateInputTarget(dup.to_string()));
        }

        if let Some(dup) = self.output_mappings.iter().map(|m| m.old_index).duplicates().next() {
            return Err(InvalidMigrationSpec::DuplicateOldOutput(dup));
        }
        if let Some(dup) = self.output_mappings.iter().map(|m| m.new_index).duplicates().next() {
            return Err(InvalidMigrationSpec::DuplicateNewOutput(dup));
        }

        Ok(())
    }

    pub fn new_node_type(&self) -> &str {
        &self.new_node_type
    }

    pub fn old_node_type(&self) -> &str {
        &self.old_node_type
    }

    /// IDs of the legacy widgets, indexed by their position in the old node's
    /// positional value array. `None` when the old node had no positional widgets.
    pub fn old_widget_positions(&self) -> Option<&[InputId]> {
        self.old_widget_positions.as_deref()
    }

    pub fn input_mappings(&self) -> &[InputMapping] {
        &self.input_mappings
    }

    pub fn output_mappings(&self) -> &[OutputMapping] {
        &self.output_mappings
    }

    /// Stable ID of the widget stored at `position`, if the record knows it.
    pub fn widget_id(&self, position: usize) -> Option<&str> {
        self.old_widget_positions
            .as_ref()
            .and_then(|p| p.get(position))
            .map(String::as_str)
    }

    /// New output slot for an old one, or `None` if the old output is dropped.
    pub fn new_output_for(&self, old_index: u32) -> Option<u32> {
        self.output_mappings
            .iter()
            .find(|m| m.old_index == old_index)
            .map(|m| m.new_index)
    }

    /// Structural snapshot in insertion order, for persistence and debugging.
    pub fn snapshot(&self) -> RecordSnapshot {
        RecordSnapshot::from(self.clone())
    }
}
