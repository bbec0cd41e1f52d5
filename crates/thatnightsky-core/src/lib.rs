//! ThatNightSky Core - Domain models, errors, and configuration
//!
//! This crate contains the data model shared by every stage of the star chart
//! pipeline: raw queries, resolved observers, the star catalogue, and the
//! computed sky snapshot.

pub mod config;
pub mod error;
pub mod models;

pub use error::{NightSkyError, Result};
