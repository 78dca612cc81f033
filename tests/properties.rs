//! Property tests: serialization round trips and resolution determinism.
use ikou::prelude::*;
use proptest::prelude::*;
use std::collections::BTreeSet;

fn literal_value() -> impl Strategy<Value = serde_json::Value> {
    prop_oneof![
        Just(serde_json::Value::Null),
        any::<bool>().prop_map(serde_json::Value::from),
        any::<i64>().prop_map(serde_json::Value::from),
        "[a-z]{0,8}".prop_map(serde_json::Value::from),
    ]
}

fn input_mapping(new_id: String) -> impl Strategy<Value = InputMapping> {
    prop_oneof![
        "[a-e]".prop_map({
            let new_id = new_id.clone();
            move |old_id| InputMapping::rewire(new_id.clone(), old_id)
        }),
        literal_value().prop_map(move |value| InputMapping::set_literal(new_id.clone(), value)),
    ]
}

prop_compose! {
    fn valid_record()(
        widgets in prop::option::of(prop::collection::btree_set("[a-e]", 0..5)),
        targets in prop::collection::btree_set("[p-z]", 0..6),
        outputs in prop::collection::btree_map(0u32..6, 0u32..6, 0..4)
    )(
        mappings in targets
            .into_iter()
            .map(input_mapping)
            .collect::<Vec<_>>(),
        widgets in Just(widgets),
        outputs in Just(outputs)
    ) -> MigrationRecord {
        // Keys of the map are unique old indices; dedup the new side.
        let mut seen = BTreeSet::new();
        let outputs: Vec<OutputMapping> = outputs
            .into_iter()
            .filter(|(_, new)| seen.insert(*new))
            .map(|(old, new)| OutputMapping::new(new, old))
            .collect();
        MigrationRecord::new(
            "NewNode",
            "OldNode",
            widgets.map(|w| w.into_iter().collect()),
            mappings,
            outputs,
        )
        .expect("generated record is valid")
    }
}

prop_compose! {
    fn legacy_node()(
        keyed in prop::collection::btree_map("[a-e]", 0u32..4, 0..4),
        widgets in prop::collection::vec(literal_value(), 0..6),
        links in prop::collection::vec((0u32..6, 0u32..3), 0..5)
    ) -> LegacyNodeInstance {
        let mut node = LegacyNodeInstance::new("1", "OldNode").with_widget_values(widgets);
        for (id, slot) in keyed {
            node = node.with_input(id, InputValue::wire("0", slot));
        }
        for (i, (origin, target_slot)) in links.into_iter().enumerate() {
            node = node.with_link(OutputLink::new(i as u64, origin, "2", target_slot));
        }
        node
    }
}

proptest! {
    #[test]
    fn record_round_trips_through_json(record in valid_record()) {
        let json = serde_json::to_string(&record).unwrap();
        let back: MigrationRecord = serde_json::from_str(&json).unwrap();
        prop_assert_eq!(back, record);
    }

    #[test]
    fn resolve_is_deterministic(record in valid_record(), legacy in legacy_node()) {
        let first = resolve(&record, &legacy);
        let second = resolve(&record, &legacy);
        prop_assert_eq!(&first, &second);
        prop_assert_eq!(
            serde_json::to_string(&first).unwrap(),
            serde_json::to_string(&second).unwrap()
        );
    }

    #[test]
    fn every_link_is_moved_or_dangling(record in valid_record(), legacy in legacy_node()) {
        let descriptor = resolve(&record, &legacy);
        let moved: usize = descriptor.outputs.values().map(Vec::len).sum();
        prop_assert_eq!(moved + descriptor.dangling_outputs.len(), legacy.output_links.len());
    }

    #[test]
    fn only_mapped_inputs_are_set(record in valid_record(), legacy in legacy_node()) {
        let descriptor = resolve(&record, &legacy);
        for id in descriptor.inputs.keys() {
            prop_assert!(record.input_mappings().iter().any(|m| m.new_id() == id));
        }
    }
}
