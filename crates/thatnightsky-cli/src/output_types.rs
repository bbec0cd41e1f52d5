use serde::Serialize;
use tabled::Tabled;
use thatnightsky_catalogue::CatalogueSummary;
use thatnightsky_core::models::{ConstellationPosition, StarRecord};
use thatnightsky_pipeline::ChartSummary;

/// Output for chart and observe commands
#[derive(Debug, Serialize)]
pub struct ChartOutput {
    pub summary: ChartSummary,
    pub constellations: Vec<ConstellationPosition>,
    pub narrative: Option<String>,
    pub written_to: Option<String>,
}

/// Output for catalogue inspect
#[derive(Debug, Serialize)]
pub struct CatalogueOutput {
    pub catalogue_path: String,
    pub catalogue_format: String,
    pub constellation_path: String,
    #[serde(flatten)]
    pub summary: CatalogueSummary,
}

/// Output for catalogue convert
#[derive(Debug, Serialize)]
pub struct ConvertOutput {
    pub src: String,
    pub dst: String,
    pub stars: usize,
}

/// One row of the config command
#[derive(Debug, Serialize, Tabled)]
pub struct ConfigRow {
    #[tabled(rename = "Key")]
    pub key: String,
    #[tabled(rename = "Value")]
    pub value: String,
    #[tabled(rename = "Source")]
    pub source: String,
}

/// One row of the constellation table
#[derive(Debug, Tabled)]
pub struct ConstellationRow {
    #[tabled(rename = "Constellation")]
    pub name: String,
    #[tabled(rename = "Altitude")]
    pub altitude: String,
    #[tabled(rename = "Azimuth")]
    pub azimuth: String,
}

impl From<&ConstellationPosition> for ConstellationRow {
    fn from(position: &ConstellationPosition) -> Self {
        Self {
            name: position.name.clone(),
            altitude: format!("{:.1}°", position.alt_deg),
            azimuth: format!("{:.1}° {}", position.az_deg, compass_point(position.az_deg)),
        }
    }
}

/// One row of the brightest-stars table
#[derive(Debug, Tabled)]
pub struct StarRow {
    #[tabled(rename = "Star")]
    pub id: String,
    #[tabled(rename = "Mag")]
    pub magnitude: String,
    #[tabled(rename = "Altitude")]
    pub altitude: String,
    #[tabled(rename = "Azimuth")]
    pub azimuth: String,
}

impl From<&StarRecord> for StarRow {
    fn from(star: &StarRecord) -> Self {
        Self {
            id: star.id.to_string(),
            magnitude: format!("{:.2}", star.magnitude),
            altitude: format!("{:.1}°", star.alt_deg),
            azimuth: format!("{:.1}° {}", star.az_deg, compass_point(star.az_deg)),
        }
    }
}

/// Eight-point compass name for an azimuth measured from north through east
pub fn compass_point(az_deg: f64) -> &'static str {
    const POINTS: [&str; 8] = ["N", "NE", "E", "SE", "S", "SW", "W", "NW"];
    let index = ((az_deg.rem_euclid(360.0) + 22.5) / 45.0) as usize % 8;
    POINTS[index]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compass_point() {
        assert_eq!(compass_point(0.0), "N");
        assert_eq!(compass_point(359.0), "N");
        assert_eq!(compass_point(90.0), "E");
        assert_eq!(compass_point(181.0), "S");
        assert_eq!(compass_point(300.0), "NW");
    }
}
