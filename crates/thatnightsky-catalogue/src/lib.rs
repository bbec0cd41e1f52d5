//! ThatNightSky Catalogue - Star catalogue sources and the process-wide cache
//!
//! This crate reads the packed binary catalogue, the raw Hipparcos text
//! catalogue and Stellarium constellation line files, and keeps the loaded
//! [`Catalogue`](thatnightsky_core::models::Catalogue) in memory for the life
//! of the process.

pub mod binary;
pub mod cache;
pub mod constellationship;
pub mod hipparcos;
pub mod loader;
pub mod memory;
pub mod ports;

pub use cache::{shared_catalogue, CatalogueCache};
pub use loader::{
    convert_hipparcos, load_catalogue, CataloguePaths, CatalogueSummary, FileCatalogueSource,
};
pub use ports::CatalogueSource;
