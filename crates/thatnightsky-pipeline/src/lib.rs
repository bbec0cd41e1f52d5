//! ThatNightSky Pipeline - Chart use case
//!
//! This crate orchestrates observer resolution, sky computation and the
//! optional narrative into a single chart request.

pub mod models;
pub mod pipeline;

pub use models::{ChartPlan, ChartResult, ChartSummary};
pub use pipeline::NightSkyPipeline;
