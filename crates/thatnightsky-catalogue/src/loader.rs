use crate::binary::{read_binary_catalogue, write_binary_catalogue};
use crate::constellationship::read_constellationship;
use crate::hipparcos::read_hipparcos;
use crate::ports::CatalogueSource;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thatnightsky_core::config::{CatalogueFormat, LayeredConfig};
use thatnightsky_core::error::Result;
use thatnightsky_core::models::Catalogue;

/// Where the catalogue files live and how the star file is encoded
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CataloguePaths {
    pub stars: PathBuf,
    pub format: CatalogueFormat,
    pub constellations: PathBuf,
}

impl CataloguePaths {
    pub fn new(
        stars: impl Into<PathBuf>,
        format: CatalogueFormat,
        constellations: impl Into<PathBuf>,
    ) -> Self {
        Self {
            stars: stars.into(),
            format,
            constellations: constellations.into(),
        }
    }

    /// Paths from the resolved configuration
    pub fn from_config(config: &LayeredConfig) -> Self {
        Self {
            stars: config.catalogue_path.value.clone(),
            format: config.catalogue_format.value,
            constellations: config.constellation_path.value.clone(),
        }
    }
}

/// Catalogue source backed by files on disk
#[derive(Debug, Clone)]
pub struct FileCatalogueSource {
    paths: CataloguePaths,
}

impl FileCatalogueSource {
    pub fn new(paths: CataloguePaths) -> Self {
        Self { paths }
    }

    pub fn paths(&self) -> &CataloguePaths {
        &self.paths
    }
}

impl CatalogueSource for FileCatalogueSource {
    fn load(&self) -> Result<Catalogue> {
        load_catalogue(&self.paths)
    }

    fn describe(&self) -> String {
        format!("{} + {}", self.paths.stars.display(), self.paths.constellations.display())
    }
}

/// Load stars and constellation segments from disk
///
/// Segments that reference stars missing from the catalogue are dropped
/// individually; any file-level problem fails the whole load.
pub fn load_catalogue(paths: &CataloguePaths) -> Result<Catalogue> {
    let stars = match paths.format {
        CatalogueFormat::Binary => read_binary_catalogue(&paths.stars)?,
        CatalogueFormat::Hipparcos => read_hipparcos(&paths.stars)?,
    };
    let lines = read_constellationship(&paths.constellations)?;

    let catalogue = Catalogue::new(stars, lines);
    tracing::info!(
        stars = catalogue.len(),
        lines = catalogue.lines().len(),
        dropped_lines = catalogue.dropped_lines(),
        path = %paths.stars.display(),
        "Loaded star catalogue"
    );
    Ok(catalogue)
}

/// Convert a Hipparcos text catalogue into the binary format
///
/// Returns the number of stars written.
pub fn convert_hipparcos(src: &Path, dst: &Path) -> Result<usize> {
    let stars = read_hipparcos(src)?;
    write_binary_catalogue(dst, &stars)?;
    tracing::info!(
        stars = stars.len(),
        src = %src.display(),
        dst = %dst.display(),
        "Converted catalogue"
    );
    Ok(stars.len())
}

/// Counts describing a loaded catalogue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogueSummary {
    pub stars: usize,
    pub stars_with_magnitude: usize,
    pub naked_eye_stars: usize,
    pub lines: usize,
    pub dropped_lines: usize,
    pub constellations: usize,
}

impl CatalogueSummary {
    /// Naked-eye limit used for the summary count
    pub const NAKED_EYE_LIMIT: f64 = 6.5;

    pub fn from_catalogue(catalogue: &Catalogue) -> Self {
        let stars_with_magnitude =
            catalogue.stars().iter().filter(|s| !s.magnitude.is_nan()).count();
        let naked_eye_stars =
            catalogue.stars().iter().filter(|s| s.magnitude <= Self::NAKED_EYE_LIMIT).count();

        Self {
            stars: catalogue.len(),
            stars_with_magnitude,
            naked_eye_stars,
            lines: catalogue.lines().len(),
            dropped_lines: catalogue.dropped_lines(),
            constellations: catalogue.constellation_count(),
        }
    }
}
