use super::definition::{InputMapping, MigrationRecord, OutputMapping};
use crate::error::InvalidMigrationSpec;
use crate::legacy::{InputId, NodeType, Value};

/// Incrementally assembles a [`MigrationRecord`]. Validation runs once, in
/// [`build`](Self::build).
pub struct MigrationRecordBuilder {
    new_node_type: NodeType,
    old_node_type: NodeType,
    old_widget_positions: Option<Vec<InputId>>,
    input_mappings: Vec<InputMapping>,
    output_mappings: Vec<OutputMapping>,
}

impl MigrationRecordBuilder {
    pub fn new(new_node_type: impl Into<NodeType>, old_node_type: impl Into<NodeType>) -> Self {
        Self {
            new_node_type: new_node_type.into(),
            old_node_type: old_node_type.into(),
            old_widget_positions: None,
            input_mappings: Vec::new(),
            output_mappings: Vec::new(),
        }
    }

    pub fn widget_positions<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<InputId>,
    {
        self.old_widget_positions = Some(ids.into_iter().map(Into::into).collect());
        self
    }

    pub fn rewire(mut self, new_id: impl Into<InputId>, old_id: impl Into<InputId>) -> Self {
        self.input_mappings.push(InputMapping::rewire(new_id, old_id));
        self
    }

    pub fn set_literal(mut self, new_id: impl Into<InputId>, value: impl Into<Value>) -> Self {
        self.input_mappings.push(InputMapping::set_literal(new_id, value));
        self
    }

    pub fn output(mut self, new_index: u32, old_index: u32) -> Self {
        self.output_mappings.push(OutputMapping::new(new_index, old_index));
        self
    }

    pub fn build(self) -> Result<MigrationRecord, InvalidMigrationSpec> {
        MigrationRecord::new(
            self.new_node_type,
            self.old_node_type,
            self.old_widget_positions,
            self.input_mappings,
            self.output_mappings,
        )
    }
}
