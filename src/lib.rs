//! # Ikou - Node-Schema Migration Resolver
//!
//! **Ikou** migrates serialized graph nodes built against a deprecated node type
//! onto their replacement type. Each migration is described declaratively by a
//! [`MigrationRecord`](record::MigrationRecord): which legacy widget sits at which
//! position, how the new node's inputs are fed, and how output slots are renumbered.
//!
//! ## Core Workflow
//!
//! Legacy nodes address their inputs two ways. Connected inputs are keyed by a
//! stable ID, while widget values were historically stored by position. The
//! resolver reconciles both into one ID-addressed view before applying any
//! mapping, so the mapping rules only ever deal with IDs.
//!
//! 1.  **Describe the migration**: Build a `MigrationRecord` (or load a catalog of
//!     them from JSON). Construction validates every structural invariant.
//! 2.  **Register it**: Collect records into a `MigrationCatalog`, an immutable
//!     lookup table keyed by old node type.
//! 3.  **Resolve**: Hand each `LegacyNodeInstance` to the catalog (or call
//!     [`resolve`](resolver::resolve) directly) and get back a `NewNodeDescriptor`
//!     with keyed inputs, renumbered outputs and any dangling downstream links.
//!
//! ## Quick Start
//!
//! ```rust
//! use ikou::prelude::*;
//!
//! fn main() -> Result<()> {
//!     let record = MigrationRecord::builder("ImageScaleV2", "ImageScale")
//!         .widget_positions(["method", "width", "height"])
//!         .rewire("image", "image")
//!         .rewire("upscale_method", "method")
//!         .rewire("width", "width")
//!         .rewire("height", "height")
//!         .set_literal("crop", "disabled")
//!         .output(0, 0)
//!         .build()?;
//!
//!     let legacy = LegacyNodeInstance::new("12", "ImageScale")
//!         .with_input("image", InputValue::wire("7", 0))
//!         .with_widget_values([serde_json::json!("bilinear"), 512.into(), 768.into()])
//!         .with_link(OutputLink::new(40, 0, "15", 0));
//!
//!     let descriptor = resolve(&record, &legacy);
//!
//!     assert_eq!(descriptor.node_type, "ImageScaleV2");
//!     assert_eq!(descriptor.input("width"), Some(&InputValue::literal(512)));
//!     assert_eq!(descriptor.input("crop"), Some(&InputValue::literal("disabled")));
//!     assert_eq!(descriptor.links_from(0).len(), 1);
//!     assert!(!descriptor.has_dangling_outputs());
//!     Ok(())
//! }
//! ```

pub mod catalog;
pub mod descriptor;
pub mod error;
pub mod legacy;
pub mod prelude;
pub mod record;
pub mod resolver;
