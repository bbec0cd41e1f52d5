//! In-memory catalogue source for development and testing.

use crate::ports::CatalogueSource;
use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use thatnightsky_core::error::{NightSkyError, Result};
use thatnightsky_core::models::{Catalogue, CatalogueStar, ConstellationLine};

/// Serves a fixed set of stars and segments, counting loads
#[derive(Debug, Default)]
pub struct MemoryCatalogueSource {
    stars: Vec<CatalogueStar>,
    lines: Vec<ConstellationLine>,
    failure: Option<String>,
    loads: AtomicUsize,
}

impl MemoryCatalogueSource {
    pub fn new(stars: Vec<CatalogueStar>, lines: Vec<ConstellationLine>) -> Self {
        Self {
            stars,
            lines,
            ..Default::default()
        }
    }

    /// Source whose every load fails with `reason`
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Default::default()
        }
    }

    /// Number of times `load` has been called
    pub fn load_count(&self) -> usize {
        self.loads.load(Ordering::SeqCst)
    }
}

impl CatalogueSource for MemoryCatalogueSource {
    fn load(&self) -> Result<Catalogue> {
        self.loads.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(reason) => Err(NightSkyError::catalogue(PathBuf::from("memory"), reason.clone())),
            None => Ok(Catalogue::new(self.stars.clone(), self.lines.clone())),
        }
    }

    fn describe(&self) -> String {
        format!("memory ({} stars)", self.stars.len())
    }
}
