//! Common test utilities for building migration records and legacy nodes.
use ikou::prelude::*;
use serde_json::json;

/// A sampler migration that renames, reorders and drops inputs.
///
/// Old widgets: `[seed, steps, cfg, sampler_name, scheduler, denoise]`.
/// `denoise` is dropped, `noise_seed` comes from `seed`, `add_noise` is a literal.
/// Old output 0 moves to new output 1; old output 1 is dropped.
#[allow(dead_code)]
pub fn create_sampler_record() -> MigrationRecord {
    MigrationRecord::builder("SamplerAdvancedV2", "SamplerLegacy")
        .widget_positions(["seed", "steps", "cfg", "sampler_name", "scheduler", "denoise"])
        .rewire("model", "model")
        .rewire("positive", "positive")
        .rewire("noise_seed", "seed")
        .rewire("steps", "steps")
        .rewire("cfg", "cfg")
        .rewire("sampler_name", "sampler_name")
        .rewire("scheduler", "scheduler")
        .set_literal("add_noise", "enable")
        .output(1, 0)
        .build()
        .expect("sampler record should be valid")
}

/// A legacy sampler node: model and positive conditioning are wired, widgets
/// are positional, and both outputs feed downstream nodes.
#[allow(dead_code)]
pub fn create_sampler_node() -> LegacyNodeInstance {
    LegacyNodeInstance::new("3", "SamplerLegacy")
        .with_input("model", InputValue::wire("4", 0))
        .with_input("positive", InputValue::wire("6", 0))
        .with_widget_values([
            json!(156680208700286u64),
            json!(20),
            json!(8.0),
            json!("euler"),
            json!("normal"),
            json!(1.0),
        ])
        .with_link(OutputLink::new(7, 0, "8", 0))
        .with_link(OutputLink::new(9, 0, "10", 1))
        .with_link(OutputLink::new(11, 1, "12", 0))
}

/// A catalog in the older key layout, as authored before the field renames.
#[allow(dead_code)]
pub const LEGACY_KEYS_CATALOG_JSON: &str = r#"[
    {
        "new_node_id": "ImageScaleV2",
        "old_node_id": "ImageScale",
        "old_widget_ids": ["upscale_method", "width", "height", "crop"],
        "input_mapping": [
            {"new_id": "image", "old_id": "image"},
            {"new_id": "method", "old_id": "upscale_method"},
            {"new_id": "width", "old_id": "width"},
            {"new_id": "height", "old_id": "height"},
            {"new_id": "antialias", "set_value": true}
        ],
        "output_mapping": [{"new_idx": 0, "old_idx": 0}]
    },
    {
        "new_node_id": "PrimitiveStringV2",
        "old_node_id": "PrimitiveString",
        "old_widget_ids": null,
        "input_mapping": null,
        "output_mapping": null
    }
]"#;

/// A catalog with one valid entry, one entry with both `old_id` and `value`,
/// one with a negative output index, and a duplicate old node type.
#[allow(dead_code)]
pub const MIXED_CATALOG_JSON: &str = r#"[
    {
        "new_node_type": "LoadVideoV2",
        "old_node_type": "LoadVideo",
        "input_mappings": [{"new_id": "file", "old_id": "video"}],
        "output_mappings": [{"new_index": 0, "old_index": 0}]
    },
    {
        "new_node_type": "SaveVideoV2",
        "old_node_type": "SaveVideo",
        "input_mappings": [{"new_id": "codec", "old_id": "format", "value": "h264"}]
    },
    {
        "new_node_type": "GetVideoComponentsV2",
        "old_node_type": "GetVideoComponents",
        "output_mappings": [{"new_index": 0, "old_index": -1}]
    },
    {
        "new_node_type": "LoadVideoV3",
        "old_node_type": "LoadVideo"
    }
]"#;
