//! Load-once catalogue cache

use crate::loader::{CataloguePaths, FileCatalogueSource};
use crate::ports::CatalogueSource;
use once_cell::sync::OnceCell;
use std::sync::Arc;
use thatnightsky_core::error::Result;
use thatnightsky_core::models::Catalogue;

static SHARED_CATALOGUE: OnceCell<CatalogueCache> = OnceCell::new();

/// Holds a catalogue loaded at most once
///
/// Concurrent first callers block until the single load finishes. A failed
/// load leaves the cache empty so a later call can try again.
#[derive(Debug, Default)]
pub struct CatalogueCache {
    cell: OnceCell<Arc<Catalogue>>,
}

impl CatalogueCache {
    pub const fn new() -> Self {
        Self {
            cell: OnceCell::new(),
        }
    }

    /// Cached catalogue, loading it from `source` on first use
    pub fn get_or_load<S: CatalogueSource + ?Sized>(&self, source: &S) -> Result<Arc<Catalogue>> {
        self.cell
            .get_or_try_init(|| {
                tracing::debug!(source = %source.describe(), "Loading catalogue");
                source.load().map(Arc::new)
            })
            .cloned()
    }

    /// Cached catalogue if already loaded
    pub fn get(&self) -> Option<Arc<Catalogue>> {
        self.cell.get().cloned()
    }

    pub fn is_loaded(&self) -> bool {
        self.cell.get().is_some()
    }
}

/// Process-wide catalogue, loaded from `paths` on the first call
///
/// Later calls return the same catalogue regardless of the paths passed.
pub fn shared_catalogue(paths: &CataloguePaths) -> Result<Arc<Catalogue>> {
    SHARED_CATALOGUE
        .get_or_init(CatalogueCache::new)
        .get_or_load(&FileCatalogueSource::new(paths.clone()))
}
