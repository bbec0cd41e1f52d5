//! Pipeline assembly from configuration files

use std::fs;
use tempfile::TempDir;
use thatnightsky_astro::SkySettings;
use thatnightsky_catalogue::binary::write_binary_catalogue;
use thatnightsky_core::config::{ConfigSource, LayeredConfig, Secrets};
use thatnightsky_core::models::{CatalogueStar, Lang, ObserverContext};
use thatnightsky_pipeline::NightSkyPipeline;

const FAB: &str = "UMi 2 11767 85822 85822 82080\nOri 1 27989 24436\n";

fn write_resources(dir: &TempDir) -> LayeredConfig {
    let stars = dir.path().join("hip_main.bin");
    let lines = dir.path().join("constellationship.fab");
    write_binary_catalogue(
        &stars,
        &[
            CatalogueStar::new(11767, 37.946_146_89, 89.264_138_05, 1.97),
            CatalogueStar::new(85822, 263.054_154_9, 86.586_460_47, 4.35),
            CatalogueStar::new(82080, 251.492_655_59, 82.037_250_71, 4.21),
            CatalogueStar::new(27989, 88.792_939, 7.407_064, 0.45),
            CatalogueStar::new(24436, 78.634_467, -8.201_638, 0.18),
        ],
    )
    .unwrap();
    fs::write(&lines, FAB).unwrap();

    let mut config = LayeredConfig::with_defaults();
    config.catalogue_path.update(stars, ConfigSource::File);
    config.constellation_path.update(lines, ConfigSource::File);
    config
}

// The catalogue is process-wide, so one test covers every assembly path.
#[test]
fn test_from_config_loads_catalogue_once() {
    let dir = TempDir::new().unwrap();
    let config = write_resources(&dir);

    let plain = NightSkyPipeline::from_config(&config, &Secrets::default(), Lang::En).unwrap();
    assert_eq!(plain.catalogue().len(), 5);
    assert_eq!(plain.catalogue().lines().len(), 3);
    assert!(!plain.has_narrator());

    let secrets = Secrets {
        vworld_api_key: Some("vworld".to_string()),
        anthropic_api_key: Some("anthropic".to_string()),
    };
    let narrated = NightSkyPipeline::from_config(&config, &secrets, Lang::Ko).unwrap();
    assert!(narrated.has_narrator());
    assert!(std::sync::Arc::ptr_eq(plain.catalogue(), narrated.catalogue()));

    // Busan, 1995-01-15 00:00 KST: Orion is up in the south
    let instant = chrono::DateTime::parse_from_rfc3339("1995-01-14T15:00:00Z")
        .unwrap()
        .with_timezone(&chrono::Utc);
    let observer = ObserverContext::new(35.18, 129.08, instant, "Busan").unwrap();
    let sky = plain.compute_for_observer(&observer, SkySettings::default()).unwrap();

    assert_eq!(sky.stars().len(), 5);
    assert_eq!(sky.visible_constellations(), ["UMi".to_string(), "Ori".to_string()]);
}
