//! Catalog sources
//!
//! Loads catalog snapshots shaped like Data Dragon `item.json` documents.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde::Deserialize;
use tracing::{debug, instrument};

use crate::domain::Catalog;
use crate::infrastructure::traits::FileSystem;
use crate::infrastructure::{InfraError, InfraResult};

/// Anything that can produce a catalog snapshot.
pub trait CatalogSource: Send + Sync {
    fn load(&self) -> InfraResult<Catalog>;
}

/// Accepted document layouts: the full `item.json` or a bare id -> item map.
#[derive(Deserialize)]
#[serde(untagged)]
enum CatalogDocument {
    Wrapped { data: Catalog },
    Bare(Catalog),
}

/// Parse a catalog document from JSON text.
pub fn parse_catalog(content: &str) -> Result<Catalog, serde_json::Error> {
    serde_json::from_str::<CatalogDocument>(content).map(|doc| match doc {
        CatalogDocument::Wrapped { data } => data,
        CatalogDocument::Bare(data) => data,
    })
}

/// Catalog stored as a JSON file.
pub struct JsonCatalogSource {
    path: PathBuf,
    fs: Arc<dyn FileSystem>,
}

impl JsonCatalogSource {
    pub fn new(path: impl Into<PathBuf>, fs: Arc<dyn FileSystem>) -> Self {
        Self {
            path: path.into(),
            fs,
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl CatalogSource for JsonCatalogSource {
    #[instrument(level = "debug", skip(self), fields(path = %self.path.display()))]
    fn load(&self) -> InfraResult<Catalog> {
        let content = self
            .fs
            .read_to_string(&self.path)
            .map_err(|e| InfraError::io(format!("read catalog {}", self.path.display()), e))?;
        let catalog = parse_catalog(&content).map_err(|e| InfraError::Parse {
            context: format!("parse catalog {}", self.path.display()),
            source: e,
        })?;
        debug!("loaded {} items", catalog.len());
        Ok(catalog)
    }
}

/// Catalog already held in memory.
pub struct StaticCatalogSource {
    catalog: Catalog,
}

impl StaticCatalogSource {
    pub fn new(catalog: Catalog) -> Self {
        Self { catalog }
    }
}

impl CatalogSource for StaticCatalogSource {
    fn load(&self) -> InfraResult<Catalog> {
        Ok(self.catalog.clone())
    }
}
