//! Prelude module for convenient imports
//!
//! This module re-exports the most commonly used types and functions from the ikou
//! crate. Import it to get the record, resolver and catalog types in one line.
//!
//! # Example
//!
//! ```rust,no_run
//! use ikou::prelude::*;
//!
//! # fn run_example() -> Result<()> {
//! let catalog_json = std::fs::read_to_string("path/to/migrations.json")?;
//! let load = MigrationCatalog::from_json(&catalog_json)?;
//!
//! let node_json = std::fs::read_to_string("path/to/node.json")?;
//! let legacy: LegacyNodeInstance = serde_json::from_str(&node_json)?;
//!
//! let descriptor = load.catalog.resolve(&legacy)?;
//! println!("{}", serde_json::to_string_pretty(&descriptor)?);
//! # Ok(())
//! # }
//! ```

// Migration records
pub use crate::record::{
    InputMapping, InputMappingEntry, MigrationRecord, MigrationRecordBuilder, OutputMapping, OutputMappingEntry,
    RecordSnapshot,
};

// Legacy node model and shared value types
pub use crate::legacy::{
    InputAddress, InputId, InputRef, InputValue, LegacyNodeInstance, NodeType, OutputLink, Value, WireRef,
};

// Resolution
pub use crate::catalog::{CatalogLoad, MigrationCatalog};
pub use crate::descriptor::NewNodeDescriptor;
pub use crate::resolver::{IdView, Resolver, resolve};

// Error types
pub use crate::error::{
    CatalogError, DanglingOutputReference, InvalidMigrationSpec, ResolveError, UnmappedRequiredInput,
};

// Result type alias for convenience
pub type Result<T> = std::result::Result<T, Box<dyn std::error::Error>>;
