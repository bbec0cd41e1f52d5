//! Constellation summaries: visible names and label positions

use crate::time::normalize_degrees;
use std::collections::{HashMap, HashSet};
use thatnightsky_core::models::{
    ConstellationLine, ConstellationPosition, ProjectedLine, StarId, StarRecord,
};

/// Constellation names in first-seen order over the resolved lines
pub fn visible_constellations(lines: &[ProjectedLine]) -> Vec<String> {
    let mut seen = HashSet::new();
    lines
        .iter()
        .filter(|line| seen.insert(line.constellation.as_str()))
        .map(|line| line.constellation.clone())
        .collect()
}

/// Brightness-weighted mean position of each named constellation
///
/// Members are gathered from every catalogue segment of the constellation,
/// so a star above the horizon counts even when its partner has set. Each
/// distinct visible star counts once with weight `1 / (mag + 3)`. Azimuth
/// uses a circular mean so constellations straddling north do not average
/// to south.
pub fn constellation_positions(
    names: &[String],
    lines: &[ConstellationLine],
    stars: &[StarRecord],
) -> Vec<ConstellationPosition> {
    let visible: HashMap<StarId, &StarRecord> = stars.iter().map(|s| (s.id, s)).collect();
    let wanted: HashSet<&str> = names.iter().map(String::as_str).collect();

    let mut members: HashMap<&str, Vec<StarId>> = HashMap::new();
    for line in lines.iter().filter(|l| wanted.contains(l.constellation.as_str())) {
        let ids = members.entry(line.constellation.as_str()).or_default();
        for id in [line.from, line.to] {
            if visible.contains_key(&id) && !ids.contains(&id) {
                ids.push(id);
            }
        }
    }

    names
        .iter()
        .filter_map(|name| {
            let ids = members.get(name.as_str())?;
            let members = ids.iter().filter_map(|id| visible.get(id).copied());
            let (az_deg, alt_deg) = weighted_position(members)?;
            Some(ConstellationPosition {
                name: name.clone(),
                az_deg,
                alt_deg,
            })
        })
        .collect()
}

fn weighted_position<'a>(stars: impl Iterator<Item = &'a StarRecord>) -> Option<(f64, f64)> {
    let mut sum_w = 0.0;
    let mut sum_sin = 0.0;
    let mut sum_cos = 0.0;
    let mut sum_alt = 0.0;

    for star in stars {
        let w = magnitude_weight(star.magnitude);
        let (sin_az, cos_az) = star.az_deg.to_radians().sin_cos();
        sum_w += w;
        sum_sin += w * sin_az;
        sum_cos += w * cos_az;
        sum_alt += w * star.alt_deg;
    }

    if sum_w <= 0.0 {
        return None;
    }

    let mean_az = normalize_degrees(sum_sin.atan2(sum_cos).to_degrees());
    let az = normalize_degrees(round_tenth(mean_az));
    let alt = round_tenth(sum_alt / sum_w);
    Some((az, alt))
}

// Brighter (smaller magnitude) stars pull harder. Clamped for stars brighter than -3.
fn magnitude_weight(magnitude: f64) -> f64 {
    1.0 / (magnitude + 3.0).max(0.1)
}

fn round_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}
