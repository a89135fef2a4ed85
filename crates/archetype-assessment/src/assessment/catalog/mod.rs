//! Category definitions: the read-only question banks and archetype lists the engine scores
//! against.
//!
//! Categories are registered once into an immutable [`StaticCatalog`]; each entry is loaded
//! lazily on first use and memoized for the life of the catalog.

mod bundled;
mod directory;

use std::path::PathBuf;
use std::sync::{Arc, OnceLock};

use serde::Serialize;

use super::domain::{CategoryDefinition, CategoryId};

/// Upstream collaborator resolving a category id to its definition.
pub trait CategoryProvider: Send + Sync {
    fn categories(&self) -> Vec<CategorySummary>;
    fn load(&self, id: &CategoryId) -> Result<Arc<CategoryDefinition>, CatalogError>;
}

/// Listing entry for a registered category.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CategorySummary {
    pub id: CategoryId,
    pub name: String,
}

/// Failures resolving category reference data. All of them are content defects, not
/// respondent errors.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("assessment category '{0}' not found")]
    NotFound(CategoryId),
    #[error("failed to read category definition {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid category definition for '{category}': {source}")]
    Parse {
        category: CategoryId,
        #[source]
        source: serde_json::Error,
    },
    #[error("category file for '{expected}' declares id '{found}'")]
    IdMismatch {
        expected: CategoryId,
        found: CategoryId,
    },
}

type Loader = Box<dyn Fn() -> Result<CategoryDefinition, CatalogError> + Send + Sync>;

struct CatalogEntry {
    summary: CategorySummary,
    loader: Loader,
    loaded: OnceLock<Arc<CategoryDefinition>>,
}

/// Immutable id-to-loader mapping with per-entry memoization.
pub struct StaticCatalog {
    entries: Vec<CatalogEntry>,
}

impl StaticCatalog {
    pub fn builder() -> StaticCatalogBuilder {
        StaticCatalogBuilder {
            entries: Vec::new(),
        }
    }

    /// Leadership and middle-management banks compiled into the crate.
    pub fn bundled() -> Self {
        bundled::register(Self::builder()).build()
    }

    /// One category per `*.json` file in `dir`, keyed by file stem.
    pub fn from_dir(dir: impl Into<PathBuf>) -> Result<Self, CatalogError> {
        directory::register(Self::builder(), dir.into()).map(StaticCatalogBuilder::build)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    fn entry(&self, id: &CategoryId) -> Option<&CatalogEntry> {
        self.entries.iter().find(|entry| &entry.summary.id == id)
    }
}

impl CategoryProvider for StaticCatalog {
    fn categories(&self) -> Vec<CategorySummary> {
        self.entries
            .iter()
            .map(|entry| entry.summary.clone())
            .collect()
    }

    fn load(&self, id: &CategoryId) -> Result<Arc<CategoryDefinition>, CatalogError> {
        let entry = self
            .entry(id)
            .ok_or_else(|| CatalogError::NotFound(id.clone()))?;

        if let Some(definition) = entry.loaded.get() {
            return Ok(Arc::clone(definition));
        }

        let definition = (entry.loader)()?;
        if &definition.id != id {
            return Err(CatalogError::IdMismatch {
                expected: id.clone(),
                found: definition.id,
            });
        }

        // A concurrent first load may have won the race; either copy is identical.
        Ok(Arc::clone(entry.loaded.get_or_init(|| Arc::new(definition))))
    }
}

pub struct StaticCatalogBuilder {
    entries: Vec<CatalogEntry>,
}

impl StaticCatalogBuilder {
    /// Register a loader. Re-registering an id replaces the earlier entry.
    pub fn register<F>(mut self, id: CategoryId, name: impl Into<String>, loader: F) -> Self
    where
        F: Fn() -> Result<CategoryDefinition, CatalogError> + Send + Sync + 'static,
    {
        self.entries.retain(|entry| entry.summary.id != id);
        self.entries.push(CatalogEntry {
            summary: CategorySummary {
                id,
                name: name.into(),
            },
            loader: Box::new(loader),
            loaded: OnceLock::new(),
        });
        self
    }

    pub fn build(self) -> StaticCatalog {
        StaticCatalog {
            entries: self.entries,
        }
    }
}
