//! Observe command implementation
//!
//! Skips geocoding: the observer is given directly.

use crate::cli::ObserveArgs;
use crate::output::OutputWriter;
use crate::output_types::{ChartOutput, ConstellationRow, StarRow};
use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use thatnightsky_astro::{SkyComputer, SkySettings};
use thatnightsky_catalogue::{shared_catalogue, CataloguePaths};
use thatnightsky_core::config::LayeredConfig;
use thatnightsky_core::models::{ObserverContext, SkyData};
use thatnightsky_pipeline::ChartResult;

/// Number of stars listed in human output
const BRIGHTEST_STARS: usize = 10;

pub fn execute(args: ObserveArgs, config: &LayeredConfig, output: &OutputWriter) -> Result<()> {
    let catalogue = shared_catalogue(&CataloguePaths::from_config(config))
        .context("Failed to load the star catalogue")?;

    let observer = ObserverContext::new(args.lat, args.lon, args.at, "")?;
    let sky = SkyComputer::new(SkySettings::from_config(config)).compute(&observer, &catalogue)?;

    let written_to = match &args.output {
        Some(path) => {
            write_json(path, &sky)?;
            Some(path.display().to_string())
        }
        None => None,
    };

    if output.is_json() {
        let result = ChartResult {
            sky,
            narrative: None,
        };
        output.result(ChartOutput {
            summary: result.summary(),
            constellations: result.sky.constellation_positions().to_vec(),
            narrative: None,
            written_to,
        })?;
        return Ok(());
    }

    show_sky(&sky, output);

    if let Some(path) = written_to {
        output.success(format!("Wrote sky data to {}", path));
    }

    Ok(())
}

/// Human-readable summary of a computed sky
pub fn show_sky(sky: &SkyData, output: &OutputWriter) {
    let observer = sky.observer();

    output.section("Observer");
    if !observer.address_display.is_empty() {
        output.kv("Place", &observer.address_display);
    }
    output.kv("Latitude", format!("{:.4}°", observer.latitude));
    output.kv("Longitude", format!("{:.4}°", observer.longitude));
    output.kv("Instant (UTC)", observer.instant_utc.format("%Y-%m-%d %H:%M:%S"));

    output.section("Sky");
    output.kv("Visible stars", sky.stars().len());
    output.kv("Constellation lines", sky.lines().len());
    output.kv("Limiting magnitude", sky.limiting_magnitude());

    if sky.is_empty() {
        output.info("No stars above the horizon at this limit");
        return;
    }

    output.section("Constellations");
    output.table(sky.constellation_positions().iter().map(ConstellationRow::from).collect());

    output.section("Brightest Stars");
    let mut stars: Vec<_> = sky.stars().iter().collect();
    stars.sort_by(|a, b| a.magnitude.total_cmp(&b.magnitude));
    output.table(stars.into_iter().take(BRIGHTEST_STARS).map(StarRow::from).collect());
}

/// Write a value as pretty JSON
pub fn write_json<T: Serialize>(path: &Path, value: &T) -> Result<()> {
    let json = serde_json::to_string_pretty(value)?;
    fs::write(path, json).with_context(|| format!("Failed to write {}", path.display()))?;
    Ok(())
}
