use crate::legacy::{InputAddress, InputId, InputValue, LegacyNodeInstance};
use crate::record::MigrationRecord;
use ahash::AHashMap;

/// The legacy node's inputs, all addressed by stable ID.
///
/// Positional widget values are translated through the record's widget
/// positions. When an input is present both ways, the ID-addressed entry
/// wins: a connected wire overrides the stale widget snapshot left behind in
/// the positional array.
#[derive(Debug, Clone, Default)]
pub struct IdView {
    entries: AHashMap<InputId, InputValue>,
}

impl IdView {
    pub fn build(record: &MigrationRecord, legacy: &LegacyNodeInstance) -> Self {
        let mut entries: AHashMap<InputId, InputValue> = AHashMap::new();
        let mut positional = Vec::new();

        for (address, value) in legacy.entries() {
            match address {
                InputAddress::ById(id) => {
                    entries.insert(id, value.to_input_value());
                }
                InputAddress::ByPosition(index) => match record.widget_id(index) {
                    Some(id) => positional.push((id, value)),
                    None => log::trace!(
                        "Node '{}': widget value at position {} has no known ID, ignoring",
                        legacy.id,
                        index
                    ),
                },
            }
        }

        for (id, value) in positional {
            if entries.contains_key(id) {
                log::trace!(
                    "Node '{}': input '{}' is keyed, positional value {} discarded",
                    legacy.id,
                    id,
                    value
                );
            } else {
                entries.insert(id.to_string(), value.to_input_value());
            }
        }

        log::debug!(
            "Node '{}': built ID view with {} inputs ({} keyed, {} positional)",
            legacy.id,
            entries.len(),
            legacy.inputs.len(),
            legacy.widget_values.len()
        );
        Self { entries }
    }

    pub fn get(&self, id: &str) -> Option<&InputValue> {
        self.entries.get(id)
    }

    pub fn contains(&self, id: &str) -> bool {
        self.entries.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
