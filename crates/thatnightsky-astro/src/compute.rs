//! The sky computer: catalogue + observer → projected snapshot

use crate::constellations;
use crate::projection::stereographic;
use crate::transform::HorizonFrame;
use crate::validation::{check_result, check_star, validate_observer, validate_settings};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use thatnightsky_core::config::LayeredConfig;
use thatnightsky_core::error::Result;
use thatnightsky_core::models::{
    Catalogue, ObserverContext, ProjectedLine, SkyData, StarId, StarRecord,
};

/// Parameters of a sky computation
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SkySettings {
    /// Stars fainter than this are not considered
    pub limiting_magnitude: f64,

    /// Chart radius the horizon is mapped to
    pub chart_radius: f64,
}

impl Default for SkySettings {
    fn default() -> Self {
        Self {
            limiting_magnitude: 6.5,
            chart_radius: 1.0,
        }
    }
}

impl SkySettings {
    /// Settings from the resolved configuration
    pub fn from_config(config: &LayeredConfig) -> Self {
        Self {
            limiting_magnitude: config.limiting_magnitude.value,
            chart_radius: config.chart_radius.value,
        }
    }

    pub fn with_limiting_magnitude(mut self, magnitude: f64) -> Self {
        self.limiting_magnitude = magnitude;
        self
    }
}

/// Computes [`SkyData`] snapshots
///
/// Pure: no I/O, and identical inputs produce identical output.
#[derive(Debug, Clone, Copy, Default)]
pub struct SkyComputer {
    settings: SkySettings,
}

impl SkyComputer {
    pub fn new(settings: SkySettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &SkySettings {
        &self.settings
    }

    /// Compute the visible sky for one observer
    pub fn compute(&self, observer: &ObserverContext, catalogue: &Catalogue) -> Result<SkyData> {
        validate_observer(observer)?;
        validate_settings(&self.settings)?;

        let frame = HorizonFrame::for_observer(
            observer.latitude,
            observer.longitude,
            &observer.instant_utc,
        );
        let radius = self.settings.chart_radius;

        let mut stars = Vec::new();
        for star in catalogue.stars() {
            // NaN magnitudes fail this comparison as well
            if !(star.magnitude <= self.settings.limiting_magnitude) {
                continue;
            }

            if let Err(issue) = check_star(star) {
                tracing::warn!(id = star.id.0, %issue, "Skipping star");
                continue;
            }

            let horizontal = frame.to_horizontal(star.ra_deg, star.dec_deg);
            if let Err(issue) = check_result(&[horizontal.alt_deg, horizontal.az_deg]) {
                tracing::warn!(id = star.id.0, %issue, "Skipping star");
                continue;
            }

            if !is_visible(horizontal.alt_deg) {
                continue;
            }

            let (x, y) = stereographic(horizontal.alt_deg, horizontal.az_deg, radius);
            if let Err(issue) = check_result(&[x, y]) {
                tracing::warn!(id = star.id.0, %issue, "Skipping star");
                continue;
            }

            stars.push(StarRecord {
                id: star.id,
                ra_deg: star.ra_deg,
                dec_deg: star.dec_deg,
                magnitude: star.magnitude,
                alt_deg: horizontal.alt_deg,
                az_deg: horizontal.az_deg,
                x,
                y,
            });
        }

        let lines = resolve_lines(catalogue, &stars);
        let names = constellations::visible_constellations(&lines);
        let positions = constellations::constellation_positions(&names, catalogue.lines(), &stars);

        tracing::debug!(
            latitude = observer.latitude,
            longitude = observer.longitude,
            instant = %observer.instant_utc,
            stars = stars.len(),
            lines = lines.len(),
            constellations = names.len(),
            "Computed sky"
        );

        Ok(SkyData::new(
            observer.clone(),
            stars,
            lines,
            self.settings.limiting_magnitude,
            radius,
        )
        .with_constellations(names, positions))
    }
}

/// Compute the visible sky with explicit settings
pub fn compute_sky(
    observer: &ObserverContext,
    catalogue: &Catalogue,
    settings: SkySettings,
) -> Result<SkyData> {
    SkyComputer::new(settings).compute(observer, catalogue)
}

/// Whether an altitude is on or above the horizon
///
/// A star exactly on the horizon is visible, including at `-0.0`.
pub fn is_visible(alt_deg: f64) -> bool {
    alt_deg >= 0.0
}

/// Keep the segments whose endpoints are both visible
fn resolve_lines(catalogue: &Catalogue, stars: &[StarRecord]) -> Vec<ProjectedLine> {
    let visible: HashMap<StarId, &StarRecord> = stars.iter().map(|s| (s.id, s)).collect();

    catalogue
        .lines()
        .iter()
        .filter_map(|line| {
            let from = visible.get(&line.from)?;
            let to = visible.get(&line.to)?;
            Some(ProjectedLine {
                constellation: line.constellation.clone(),
                from: line.from,
                to: line.to,
                x1: from.x,
                y1: from.y,
                x2: to.x,
                y2: to.y,
            })
        })
        .collect()
}
