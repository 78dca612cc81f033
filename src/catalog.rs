use crate::descriptor::NewNodeDescriptor;
use crate::error::{CatalogError, ResolveError};
use crate::legacy::{LegacyNodeInstance, NodeType};
use crate::record::{MigrationRecord, RecordSnapshot};
use crate::resolver::Resolver;
use ahash::AHashMap;
use itertools::Itertools;

/// An immutable lookup table of migrations, keyed by old node type.
///
/// Built once at startup and then only read. Each old node type has at most
/// one migration edge; there is no chaining from one record to another.
#[derive(Debug, Clone, Default)]
pub struct MigrationCatalog {
    records: AHashMap<NodeType, MigrationRecord>,
}

/// The outcome of loading a catalog: the usable catalog plus every entry that
/// had to be skipped.
#[derive(Debug)]
pub struct CatalogLoad {
    pub catalog: MigrationCatalog,
    pub rejected: Vec<CatalogError>,
}

// Accumulates records while a catalog is being built.
#[derive(Default)]
struct CatalogLoader {
    records: AHashMap<NodeType, MigrationRecord>,
    rejected: Vec<CatalogError>,
}

impl CatalogLoader {
    fn reject(&mut self, err: CatalogError) {
        log::warn!("Skipping migration: {}", err);
        self.rejected.push(err);
    }

    fn accept_snapshot(&mut self, index: usize, snapshot: RecordSnapshot) {
        let old_node_type = snapshot.old_node_type.clone();
        match MigrationRecord::try_from(snapshot) {
            Ok(record) => self.insert(index, record),
            Err(source) => self.reject(CatalogError::InvalidEntry {
                index,
                old_node_type,
                source,
            }),
        }
    }

    fn insert(&mut self, index: usize, record: MigrationRecord) {
        if let Some(existing) = self.records.get(record.old_node_type()) {
            let err = CatalogError::DuplicateMigration {
                index,
                old_node_type: record.old_node_type().to_string(),
                existing: existing.new_node_type().to_string(),
            };
            self.reject(err);
            return;
        }

        log::debug!(
            "Registered migration '{}' -> '{}'",
            record.old_node_type(),
            record.new_node_type()
        );
        self.records.insert(record.old_node_type().to_string(), record);
    }

    fn finish(self) -> CatalogLoad {
        log::info!(
            "Loaded {} node migrations ({} rejected)",
            self.records.len(),
            self.rejected.len()
        );
        CatalogLoad {
            catalog: MigrationCatalog {
                records: self.records,
            },
            rejected: self.rejected,
        }
    }
}

impl MigrationCatalog {
    /// Validates and registers each snapshot. Invalid entries and entries
    /// redefining an already registered old node type are logged and skipped;
    /// the remaining entries still load.
    pub fn load<I>(snapshots: I) -> CatalogLoad
    where
        I: IntoIterator<Item = RecordSnapshot>,
    {
        let mut loader = CatalogLoader::default();
        for (index, snapshot) in snapshots.into_iter().enumerate() {
            loader.accept_snapshot(index, snapshot);
        }
        loader.finish()
    }

    /// Parses a JSON array of records and loads it. Only a document that is
    /// not a JSON array is fatal; entries that fail to parse or validate are
    /// reported through [`CatalogLoad::rejected`].
    pub fn from_json(json: &str) -> Result<CatalogLoad, CatalogError> {
        let entries: Vec<serde_json::Value> =
            serde_json::from_str(json).map_err(|e| CatalogError::JsonParseError(e.to_string()))?;

        let mut loader = CatalogLoader::default();
        for (index, entry) in entries.into_iter().enumerate() {
            match serde_json::from_value::<RecordSnapshot>(entry) {
                Ok(snapshot) => loader.accept_snapshot(index, snapshot),
                Err(e) => loader.reject(CatalogError::MalformedEntry {
                    index,
                    message: e.to_string(),
                }),
            }
        }
        Ok(loader.finish())
    }

    /// Serializes the catalog as a JSON array ordered by old node type.
    pub fn to_json(&self) -> Result<String, CatalogError> {
        let snapshots: Vec<RecordSnapshot> = self.iter().map(MigrationRecord::snapshot).collect();
        serde_json::to_string_pretty(&snapshots).map_err(|e| CatalogError::SerializeError(e.to_string()))
    }

    pub fn get(&self, old_node_type: &str) -> Option<&MigrationRecord> {
        self.records.get(old_node_type)
    }

    pub fn contains(&self, old_node_type: &str) -> bool {
        self.records.contains_key(old_node_type)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Records in a stable order, sorted by old node type.
    pub fn iter(&self) -> impl Iterator<Item = &MigrationRecord> {
        self.records
            .values()
            .sorted_by(|a, b| a.old_node_type().cmp(b.old_node_type()))
    }

    /// Migrates `legacy` with the record registered for its node type.
    pub fn resolve(&self, legacy: &LegacyNodeInstance) -> Result<NewNodeDescriptor, ResolveError> {
        let record = self
            .get(&legacy.node_type)
            .ok_or_else(|| ResolveError::NoMigration {
                node_id: legacy.id.clone(),
                node_type: legacy.node_type.clone(),
            })?;
        Ok(Resolver::new(record).resolve(legacy))
    }
}

impl FromIterator<MigrationRecord> for MigrationCatalog {
    /// Collects already validated records; later duplicates of an old node
    /// type are logged and dropped.
    fn from_iter<T: IntoIterator<Item = MigrationRecord>>(iter: T) -> Self {
        let mut loader = CatalogLoader::default();
        for (index, record) in iter.into_iter().enumerate() {
            loader.insert(index, record);
        }
        loader.finish().catalog
    }
}
