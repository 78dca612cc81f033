use crate::legacy::OutputLink;
use thiserror::Error;

/// Structural violations detected while constructing a `MigrationRecord`.
///
/// These are fatal to the record being built: a catalog skips the entry and
/// keeps loading the rest.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InvalidMigrationSpec {
    #[error("Migration field '{field}' must be a non-empty node type")]
    EmptyNodeType { field: &'static str },

    #[error("Widget position {position} has an empty input ID")]
    EmptyWidgetId { position: usize },

    #[error("Input mapping at entry {entry} has an empty 'new_id'")]
    EmptyInputId { entry: usize },

    #[error("Input mapping for '{new_id}' sets both 'old_id' and 'value'; exactly one is allowed")]
    AmbiguousInputMapping { new_id: String },

    #[error("Input mapping for '{new_id}' has neither 'old_id' nor 'value'")]
    IncompleteInputMapping { new_id: String },

    #[error("Widget ID '{0}' appears more than once in 'old_widget_positions'")]
    DuplicateWidgetId(String),

    #[error("Input '{0}' is targeted by more than one input mapping")]
    DuplicateInputTarget(String),

    #[error("Old output index {0} is mapped more than once")]
    DuplicateOldOutput(u32),

    #[error("New output index {0} is the target of more than one output mapping")]
    DuplicateNewOutput(u32),

    #[error("Output mapping field '{field}' has invalid index {index}; indices must be non-negative 32-bit slot numbers")]
    InvalidOutputIndex { field: &'static str, index: i64 },
}

/// Errors raised while building a `MigrationCatalog`. Each one describes a
/// single entry that was skipped.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CatalogError {
    #[error("Failed to parse migration catalog JSON: {0}")]
    JsonParseError(String),

    #[error("Failed to serialize migration catalog: {0}")]
    SerializeError(String),

    #[error("Migration entry {index} is malformed: {message}")]
    MalformedEntry { index: usize, message: String },

    #[error("Migration entry {index} ('{old_node_type}') is invalid: {source}")]
    InvalidEntry {
        index: usize,
        old_node_type: String,
        #[source]
        source: InvalidMigrationSpec,
    },

    #[error(
        "Migration entry {index} redefines old node type '{old_node_type}', which already migrates to '{existing}'"
    )]
    DuplicateMigration {
        index: usize,
        old_node_type: String,
        existing: String,
    },
}

/// Errors raised when a catalog is asked to migrate a node.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ResolveError {
    #[error("No migration is registered for node type '{node_type}' (node '{node_id}')")]
    NoMigration { node_id: String, node_type: String },
}

/// A downstream wire that targeted an old output slot absent from the
/// record's output mappings. Reported as a warning; the host decides whether
/// to drop the edge or abort the node's migration.
#[derive(Error, Debug, Clone, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
#[error(
    "Link {} from old output {} to node '{}' (slot {}) has no counterpart on the new node",
    .link.link_id, .link.origin_slot, .link.target_node, .link.target_slot
)]
pub struct DanglingOutputReference {
    pub link: OutputLink,
}

/// Inputs the host declared required that remained unset after resolution.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Node '{node_id}' ({node_type}) is missing required inputs: {}", .missing.join(", "))]
pub struct UnmappedRequiredInput {
    pub node_id: String,
    pub node_type: String,
    pub missing: Vec<String>,
}
