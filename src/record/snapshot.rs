use super::definition::{InputMapping, MigrationRecord, OutputMapping};
use crate::error::InvalidMigrationSpec;
use crate::legacy::Value;
use serde::{Deserialize, Deserializer, Serialize};

/// The unvalidated, structural form of a [`MigrationRecord`].
///
/// This is what migration catalogs are authored in. Field order and names are
/// the canonical encoding; the older catalog key names (`new_node_id`,
/// `old_widget_ids`, `set_value`, `new_idx`, ...) are accepted when reading.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecordSnapshot {
    #[serde(alias = "new_node_id")]
    pub new_node_type: String,
    #[serde(alias = "old_node_id")]
    pub old_node_type: String,
    #[serde(default, alias = "old_widget_ids")]
    pub old_widget_positions: Option<Vec<String>>,
    #[serde(default, alias = "input_mapping", deserialize_with = "null_as_empty")]
    pub input_mappings: Vec<InputMappingEntry>,
    #[serde(default, alias = "output_mapping", deserialize_with = "null_as_empty")]
    pub output_mappings: Vec<OutputMappingEntry>,
}

/// An input mapping as written in a catalog: `{new_id, old_id}` or
/// `{new_id, value}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InputMappingEntry {
    pub new_id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub old_id: Option<String>,
    #[serde(
        default,
        alias = "set_value",
        deserialize_with = "present",
        skip_serializing_if = "Option::is_none"
    )]
    pub value: Option<Value>,
}

/// An output mapping as written in a catalog. Indices are signed here so that
/// negative values are reported as invalid instead of failing to parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputMappingEntry {
    #[serde(alias = "new_idx")]
    pub new_index: i64,
    #[serde(alias = "old_idx")]
    pub old_index: i64,
}

fn null_as_empty<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    Option::<Vec<T>>::deserialize(deserializer).map(Option::unwrap_or_default)
}

// A present key always yields `Some`, even for an explicit `null` literal.
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

impl InputMappingEntry {
    fn into_mapping(self) -> Result<InputMapping, InvalidMigrationSpec> {
        match (self.old_id, self.value) {
            (Some(old_id), None) => Ok(InputMapping::Rewire {
                new_id: self.new_id,
                old_id,
            }),
            (None, Some(value)) => Ok(InputMapping::SetLiteral {
                new_id: self.new_id,
                value,
            }),
            (Some(_), Some(_)) => Err(InvalidMigrationSpec::AmbiguousInputMapping {
                new_id: self.new_id,
            }),
            (None, None) => Err(InvalidMigrationSpec::IncompleteInputMapping {
                new_id: self.new_id,
            }),
        }
    }
}

impl From<InputMapping> for InputMappingEntry {
    fn from(mapping: InputMapping) -> Self {
        match mapping {
            InputMapping::Rewire { new_id, old_id } => Self {
                new_id,
                old_id: Some(old_id),
                value: None,
            },
            InputMapping::SetLiteral { new_id, value } => Self {
                new_id,
                old_id: None,
                value: Some(value),
            },
        }
    }
}

impl OutputMappingEntry {
    fn into_mapping(self) -> Result<OutputMapping, InvalidMigrationSpec> {
        let index = |field: &'static str, index: i64| {
            u32::try_from(index).map_err(|_| InvalidMigrationSpec::InvalidOutputIndex { field, index })
        };
        Ok(OutputMapping {
            new_index: index("new_index", self.new_index)?,
            old_index: index("old_index", self.old_index)?,
        })
    }
}

impl From<OutputMapping> for OutputMappingEntry {
    fn from(mapping: OutputMapping) -> Self {
        Self {
            new_index: i64::from(mapping.new_index),
            old_index: i64::from(mapping.old_index),
        }
    }
}

impl TryFrom<RecordSnapshot> for MigrationRecord {
    type Error = InvalidMigrationSpec;

    fn try_from(snapshot: RecordSnapshot) -> Result<Self, Self::Error> {
        let input_mappings = snapshot
            .input_mappings
            .into_iter()
            .map(InputMappingEntry::into_mapping)
            .collect::<Result<Vec<_>, _>>()?;
        let output_mappings = snapshot
            .output_mappings
            .into_iter()
            .map(OutputMappingEntry::into_mapping)
            .collect::<Result<Vec<_>, _>>()?;

        MigrationRecord::new(
            snapshot.new_node_type,
            snapshot.old_node_type,
            snapshot.old_widget_positions,
            input_mappings,
            output_mappings,
        )
    }
}

impl From<MigrationRecord> for RecordSnapshot {
    fn from(record: MigrationRecord) -> Self {
        Self {
            new_node_type: record.new_node_type,
            old_node_type: record.old_node_type,
            old_widget_positions: record.old_widget_positions,
            input_mappings: record
                .input_mappings
                .into_iter()
                .map(InputMappingEntry::from)
                .collect(),
            output_mappings: record
                .output_mappings
                .into_iter()
                .map(OutputMappingEntry::from)
                .collect(),
        }
    }
}
