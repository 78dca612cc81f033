use crate::descriptor::NewNodeDescriptor;
use crate::error::DanglingOutputReference;
use crate::legacy::{InputValue, LegacyNodeInstance};
use crate::record::{InputMapping, MigrationRecord};
use ahash::AHashMap;

mod view;

pub use view::IdView;

/// Applies one [`MigrationRecord`] to legacy node instances.
///
/// A `Resolver` only borrows its record and holds no mutable state, so one
/// instance can serve any number of nodes, from any number of threads.
pub struct Resolver<'r> {
    record: &'r MigrationRecord,
    output_map: AHashMap<u32, u32>,
}

impl<'r> Resolver<'r> {
    pub fn new(record: &'r MigrationRecord) -> Self {
        let output_map = record
            .output_mappings()
            .iter()
            .map(|m| (m.old_index, m.new_index))
            .collect();
        Self { record, output_map }
    }

    pub fn record(&self) -> &MigrationRecord {
        self.record
    }

    /// Produces the replacement node for `legacy`.
    ///
    /// Never fails: a rewired input the legacy node does not carry is simply
    /// left unset, and downstream links on unmapped outputs are reported in
    /// [`NewNodeDescriptor::dangling_outputs`].
    pub fn resolve(&self, legacy: &LegacyNodeInstance) -> NewNodeDescriptor {
        if legacy.node_type != self.record.old_node_type() {
            log::debug!(
                "Node '{}' is of type '{}' but is migrated with the record for '{}'",
                legacy.id,
                legacy.node_type,
                self.record.old_node_type()
            );
        }

        let view = IdView::build(self.record, legacy);
        let mut descriptor = NewNodeDescriptor {
            node_id: legacy.id.clone(),
            node_type: self.record.new_node_type().to_string(),
            replaced_type: legacy.node_type.clone(),
            ..Default::default()
        };

        self.apply_inputs(&view, legacy, &mut descriptor);
        self.apply_outputs(legacy, &mut descriptor);

        log::debug!(
            "Migrated node '{}' from '{}' to '{}': {} inputs set, {} dangling links",
            descriptor.node_id,
            descriptor.replaced_type,
            descriptor.node_type,
            descriptor.inputs.len(),
            descriptor.dangling_outputs.len()
        );
        descriptor
    }

    fn apply_inputs(&self, view: &IdView, legacy: &LegacyNodeInstance, descriptor: &mut NewNodeDescriptor) {
        for mapping in self.record.input_mappings() {
            let value = match mapping {
                InputMapping::SetLiteral { value, .. } => InputValue::Literal(value.clone()),
                InputMapping::Rewire { new_id, old_id } => match view.get(old_id) {
                    Some(value) => value.clone(),
                    None => {
                        log::trace!(
                            "Node '{}': no value for old input '{}', leaving '{}' unset",
                            legacy.id,
                            old_id,
                            new_id
                        );
                        continue;
                    }
                },
            };

            let previous = descriptor.inputs.insert(mapping.new_id().to_string(), value);
            if previous.is_some() {
                log::error!(
                    "Record '{}' -> '{}' writes input '{}' twice",
                    self.record.old_node_type(),
                    self.record.new_node_type(),
                    mapping.new_id()
                );
            }
            debug_assert!(
                previous.is_none(),
                "input '{}' mapped more than once",
                mapping.new_id()
            );
        }
    }

    fn apply_outputs(&self, legacy: &LegacyNodeInstance, descriptor: &mut NewNodeDescriptor) {
        for mapping in self.record.output_mappings() {
            descriptor.outputs.entry(mapping.new_index).or_default();
        }

        for link in &legacy.output_links {
            match self.output_map.get(&link.origin_slot) {
                Some(&new_index) => descriptor
                    .outputs
                    .entry(new_index)
                    .or_default()
                    .push(link.with_origin(new_index)),
                None => {
                    let dangling = DanglingOutputReference { link: link.clone() };
                    log::warn!("Node '{}': {}", legacy.id, dangling);
                    descriptor.dangling_outputs.push(dangling);
                }
            }
        }
    }
}

/// Resolves `legacy` against `record` in one call.
pub fn resolve(record: &MigrationRecord, legacy: &LegacyNodeInstance) -> NewNodeDescriptor {
    Resolver::new(record).resolve(legacy)
}
