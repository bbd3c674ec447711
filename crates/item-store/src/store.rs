use std::path::{Path, PathBuf};

use menuseal_core_types::MenuItem;
use menuseal_seal_engine::RuleTable;
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::audit::{audit_nutrients, AuditFinding};
use crate::decode::{decode_items, effective_rules};
use crate::errors::{StoreErrKind, StoreError};
use crate::fs::{reader as fs_reader, writer as fs_writer};
use crate::graph::GraphDocument;
use crate::materialize::materialize_seals;

pub type StoreResult<T> = Result<T, StoreError>;

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Source documents merged in order (for example ontology, then menu).
    #[serde(default)]
    pub sources: Vec<PathBuf>,
    /// Materialized snapshot with seal links; `None` disables caching.
    #[serde(default)]
    pub cache_path: Option<PathBuf>,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CatalogOrigin {
    Cache,
    Sources,
    Memory,
}

/// Read-only view produced by [`ItemStore::initialize`].
#[derive(Clone, Debug)]
pub struct Catalog {
    items: Vec<MenuItem>,
    rules: RuleTable,
    document: GraphDocument,
    origin: CatalogOrigin,
}

impl Catalog {
    fn from_document(document: GraphDocument, fallback: &RuleTable, origin: CatalogOrigin) -> Self {
        let rules = effective_rules(&document, fallback);
        let items = decode_items(&document, &rules);
        Self {
            items,
            rules,
            document,
            origin,
        }
    }

    pub fn items(&self) -> &[MenuItem] {
        &self.items
    }

    pub fn rules(&self) -> &RuleTable {
        &self.rules
    }

    pub fn document(&self) -> &GraphDocument {
        &self.document
    }

    pub fn origin(&self) -> CatalogOrigin {
        self.origin
    }
}

/// Menu item store over a graph dataset.
///
/// Construction does no I/O. [`ItemStore::initialize`] loads the dataset and
/// runs the seal classification pass at most once per instance, even with
/// concurrent callers; afterwards the catalog is read-only.
pub struct ItemStore {
    config: StoreConfig,
    rules: RuleTable,
    catalog: OnceCell<Catalog>,
}

impl ItemStore {
    pub fn new(config: StoreConfig, rules: RuleTable) -> Self {
        Self {
            config,
            rules,
            catalog: OnceCell::new(),
        }
    }

    /// Store over an in-memory document, classified and ready immediately.
    pub fn from_document(mut document: GraphDocument, rules: RuleTable) -> Self {
        let effective = effective_rules(&document, &rules);
        materialize_seals(&mut document, &effective);
        let store = Self::new(StoreConfig::default(), rules);
        let catalog = Catalog::from_document(document, &store.rules, CatalogOrigin::Memory);
        let _ = store.catalog.set(catalog);
        store
    }

    pub fn config(&self) -> &StoreConfig {
        &self.config
    }

    pub fn is_ready(&self) -> bool {
        self.catalog.get().is_some()
    }

    pub fn initialize(&self) -> StoreResult<&Catalog> {
        self.catalog.get_or_try_init(|| self.build_catalog())
    }

    fn catalog(&self) -> StoreResult<&Catalog> {
        self.catalog
            .get()
            .ok_or_else(|| StoreError::new(StoreErrKind::NotReady))
    }

    /// All items in dataset order.
    pub fn load(&self) -> StoreResult<Vec<MenuItem>> {
        Ok(self.catalog()?.items().to_vec())
    }

    pub fn items(&self) -> StoreResult<&[MenuItem]> {
        Ok(self.catalog()?.items())
    }

    /// Case-insensitive exact match on the item name; first match wins.
    pub fn lookup_by_name(&self, name: &str) -> StoreResult<&MenuItem> {
        let needle = name.to_lowercase();
        self.catalog()?
            .items()
            .iter()
            .find(|item| item.name.to_lowercase() == needle)
            .ok_or_else(|| StoreError::new(StoreErrKind::NotFound(name.to_string())))
    }

    /// Rules the classification pass actually used.
    pub fn rules(&self) -> StoreResult<&RuleTable> {
        Ok(self.catalog()?.rules())
    }

    pub fn audit(&self) -> StoreResult<Vec<AuditFinding>> {
        Ok(audit_nutrients(self.catalog()?.document()))
    }

    /// Deletes the materialized snapshot and forgets the loaded catalog so
    /// the next [`ItemStore::initialize`] reclassifies from the sources.
    pub fn invalidate(&mut self) -> StoreResult<bool> {
        self.catalog.take();
        match &self.config.cache_path {
            Some(path) => fs_writer::remove_file(path)
                .map_err(|err| StoreError::new(StoreErrKind::IoFailed(err.to_string()))),
            None => Ok(false),
        }
    }

    fn build_catalog(&self) -> StoreResult<Catalog> {
        if let Some(cache) = self.config.cache_path.as_deref() {
            if cache.exists() {
                match fs_reader::read_document(cache) {
                    Ok(document) => {
                        info!(path = %cache.display(), triples = document.len(), "loaded seal cache");
                        return Ok(Catalog::from_document(
                            document,
                            &self.rules,
                            CatalogOrigin::Cache,
                        ));
                    }
                    Err(err) => {
                        warn!(path = %cache.display(), error = %err, "seal cache unreadable; rebuilding");
                    }
                }
            }
        }

        let mut document = self.read_sources()?;
        let rules = effective_rules(&document, &self.rules);
        let report = materialize_seals(&mut document, &rules);
        info!(
            items = report.items,
            links = report.links,
            "classified catalog from sources"
        );

        if let Some(cache) = self.config.cache_path.as_deref() {
            persist_cache(cache, &document)?;
        }
        Ok(Catalog::from_document(
            document,
            &self.rules,
            CatalogOrigin::Sources,
        ))
    }

    fn read_sources(&self) -> StoreResult<GraphDocument> {
        for path in &self.config.sources {
            if !path.exists() {
                return Err(StoreErrKind::SourceMissing(path.clone()).into());
            }
        }
        fs_reader::read_merged(&self.config.sources)
            .map_err(|err| StoreErrKind::Corrupt(err.to_string()).into())
    }
}

fn persist_cache(path: &Path, document: &GraphDocument) -> StoreResult<()> {
    fs_writer::write_document(path, document)
        .map_err(|err| StoreError::new(StoreErrKind::IoFailed(err.to_string())))?;
    info!(path = %path.display(), "seal cache written");
    Ok(())
}
