use serde::{Deserialize, Serialize};

use super::{ObserverContext, StarId};

/// A visible star with horizontal and chart coordinates
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StarRecord {
    /// Catalogue identifier
    pub id: StarId,

    /// Right ascension (degrees, J2000)
    pub ra_deg: f64,

    /// Declination (degrees, J2000)
    pub dec_deg: f64,

    /// Apparent visual magnitude
    pub magnitude: f64,

    /// Altitude above the horizon (degrees, always >= 0)
    pub alt_deg: f64,

    /// Azimuth (degrees, 0 = N, 90 = E)
    pub az_deg: f64,

    /// Stereographic chart x (east positive)
    pub x: f64,

    /// Stereographic chart y (north positive)
    pub y: f64,
}

/// A constellation segment with both endpoints on the chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectedLine {
    /// IAU abbreviation
    pub constellation: String,
    pub from: StarId,
    pub to: StarId,
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
}

/// Representative sky position for a single constellation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConstellationPosition {
    /// IAU abbreviation
    pub name: String,

    /// Brightness-weighted mean azimuth (0 = N, 90 = E, 180 = S, 270 = W)
    pub az_deg: f64,

    /// Brightness-weighted mean altitude (degrees)
    pub alt_deg: f64,
}

/// The sole input to renderers. Fully computed, never mutated.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SkyData {
    observer: ObserverContext,
    stars: Vec<StarRecord>,
    lines: Vec<ProjectedLine>,
    limiting_magnitude: f64,
    chart_radius: f64,
    visible_constellations: Vec<String>,
    constellation_positions: Vec<ConstellationPosition>,
}

impl SkyData {
    /// Assemble a snapshot from computed parts
    pub fn new(
        observer: ObserverContext,
        stars: Vec<StarRecord>,
        lines: Vec<ProjectedLine>,
        limiting_magnitude: f64,
        chart_radius: f64,
    ) -> Self {
        Self {
            observer,
            stars,
            lines,
            limiting_magnitude,
            chart_radius,
            visible_constellations: Vec::new(),
            constellation_positions: Vec::new(),
        }
    }

    /// Attach constellation summaries
    pub fn with_constellations(
        mut self,
        names: Vec<String>,
        positions: Vec<ConstellationPosition>,
    ) -> Self {
        self.visible_constellations = names;
        self.constellation_positions = positions;
        self
    }

    pub fn observer(&self) -> &ObserverContext {
        &self.observer
    }

    /// Visible stars in catalogue order
    pub fn stars(&self) -> &[StarRecord] {
        &self.stars
    }

    /// Constellation segments with both endpoints visible
    pub fn lines(&self) -> &[ProjectedLine] {
        &self.lines
    }

    pub fn limiting_magnitude(&self) -> f64 {
        self.limiting_magnitude
    }

    pub fn chart_radius(&self) -> f64 {
        self.chart_radius
    }

    /// Visible constellation abbreviations in first-seen order
    pub fn visible_constellations(&self) -> &[String] {
        &self.visible_constellations
    }

    pub fn constellation_positions(&self) -> &[ConstellationPosition] {
        &self.constellation_positions
    }

    /// Find a visible star by identifier
    pub fn star(&self, id: StarId) -> Option<&StarRecord> {
        self.stars.iter().find(|s| s.id == id)
    }

    pub fn is_empty(&self) -> bool {
        self.stars.is_empty()
    }
}
