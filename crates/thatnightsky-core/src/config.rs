use crate::error::{NightSkyError, Result};
use crate::models::Lang;
use chrono::FixedOffset;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// Configuration source for tracking where values come from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ConfigSource {
    /// Default value
    Default,
    /// Loaded from config file
    File,
    /// Loaded from environment variable
    Environment,
    /// Provided via CLI argument
    Cli,
}

impl ConfigSource {
    /// Returns the precedence level (higher = higher priority)
    pub fn precedence(&self) -> u8 {
        match self {
            ConfigSource::Default => 0,
            ConfigSource::File => 1,
            ConfigSource::Environment => 2,
            ConfigSource::Cli => 3,
        }
    }
}

/// A configuration value with its source
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigValue<T> {
    pub value: T,
    pub source: ConfigSource,
}

impl<T> ConfigValue<T> {
    pub fn new(value: T, source: ConfigSource) -> Self {
        Self { value, source }
    }

    /// Update the value if the new source has higher precedence
    pub fn update(&mut self, value: T, source: ConfigSource) {
        if source.precedence() > self.source.precedence() {
            self.value = value;
            self.source = source;
        }
    }
}

/// On-disk encoding of the star catalogue
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CatalogueFormat {
    /// Packed little-endian records (see `thatnightsky-catalogue`)
    Binary,
    /// Raw Hipparcos `hip_main.dat`
    Hipparcos,
}

/// Default regional offset (KST, +09:00) in minutes
pub const DEFAULT_UTC_OFFSET_MINUTES: i32 = 9 * 60;

/// Layered configuration for ThatNightSky
#[derive(Debug, Clone)]
pub struct LayeredConfig {
    pub catalogue_path: ConfigValue<PathBuf>,
    pub catalogue_format: ConfigValue<CatalogueFormat>,
    pub constellation_path: ConfigValue<PathBuf>,
    pub limiting_magnitude: ConfigValue<f64>,
    pub chart_radius: ConfigValue<f64>,
    pub utc_offset_minutes: ConfigValue<i32>,
    pub lang: ConfigValue<Lang>,
    pub http_timeout_secs: ConfigValue<u64>,
    pub narrative_model: ConfigValue<String>,
}

impl LayeredConfig {
    /// Create a new configuration with default values
    pub fn with_defaults() -> Self {
        Self {
            catalogue_path: ConfigValue::new(
                PathBuf::from("resources/hip_main.bin"),
                ConfigSource::Default,
            ),
            catalogue_format: ConfigValue::new(CatalogueFormat::Binary, ConfigSource::Default),
            constellation_path: ConfigValue::new(
                PathBuf::from("resources/constellationship.fab"),
                ConfigSource::Default,
            ),
            limiting_magnitude: ConfigValue::new(6.5, ConfigSource::Default),
            chart_radius: ConfigValue::new(1.0, ConfigSource::Default),
            utc_offset_minutes: ConfigValue::new(DEFAULT_UTC_OFFSET_MINUTES, ConfigSource::Default),
            lang: ConfigValue::new(Lang::Ko, ConfigSource::Default),
            http_timeout_secs: ConfigValue::new(10, ConfigSource::Default),
            narrative_model: ConfigValue::new(
                "claude-sonnet-4-5".to_string(),
                ConfigSource::Default,
            ),
        }
    }

    /// Load configuration from a TOML file
    pub fn load_from_file<P: AsRef<Path>>(mut self, path: P) -> Result<Self> {
        let content =
            fs::read_to_string(path.as_ref()).map_err(|e| NightSkyError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to read config file: {}", e),
            })?;

        let file_config: FileConfig =
            toml::from_str(&content).map_err(|e| NightSkyError::ConfigInvalid {
                key: "file".to_string(),
                reason: format!("Failed to parse TOML: {}", e),
            })?;

        if let Some(path) = file_config.catalogue_path {
            self.catalogue_path.update(path, ConfigSource::File);
        }

        if let Some(format) = file_config.catalogue_format {
            self.catalogue_format.update(format, ConfigSource::File);
        }

        if let Some(path) = file_config.constellation_path {
            self.constellation_path.update(path, ConfigSource::File);
        }

        if let Some(magnitude) = file_config.limiting_magnitude {
            self.limiting_magnitude.update(magnitude, ConfigSource::File);
        }

        if let Some(radius) = file_config.chart_radius {
            self.chart_radius.update(parse_chart_radius(radius)?, ConfigSource::File);
        }

        if let Some(offset) = file_config.utc_offset {
            self.utc_offset_minutes.update(parse_utc_offset(&offset)?, ConfigSource::File);
        }

        if let Some(lang) = file_config.lang {
            self.lang.update(lang, ConfigSource::File);
        }

        if let Some(timeout) = file_config.http_timeout_secs {
            self.http_timeout_secs.update(timeout, ConfigSource::File);
        }

        if let Some(model) = file_config.narrative_model {
            self.narrative_model.update(model, ConfigSource::File);
        }

        Ok(self)
    }

    /// Load configuration from environment variables
    pub fn load_from_env(mut self) -> Self {
        // THATNIGHTSKY_CATALOGUE_PATH
        if let Ok(path) = env::var("THATNIGHTSKY_CATALOGUE_PATH") {
            self.catalogue_path.update(PathBuf::from(path), ConfigSource::Environment);
        }

        // THATNIGHTSKY_CATALOGUE_FORMAT
        if let Ok(format_str) = env::var("THATNIGHTSKY_CATALOGUE_FORMAT") {
            match parse_catalogue_format(&format_str) {
                Ok(format) => self.catalogue_format.update(format, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    value = %format_str,
                    "Invalid THATNIGHTSKY_CATALOGUE_FORMAT: expected binary or hipparcos"
                ),
            }
        }

        // THATNIGHTSKY_CONSTELLATION_PATH
        if let Ok(path) = env::var("THATNIGHTSKY_CONSTELLATION_PATH") {
            self.constellation_path.update(PathBuf::from(path), ConfigSource::Environment);
        }

        // THATNIGHTSKY_LIMITING_MAGNITUDE
        if let Ok(mag_str) = env::var("THATNIGHTSKY_LIMITING_MAGNITUDE") {
            match mag_str.parse::<f64>() {
                Ok(mag) if mag.is_finite() => {
                    self.limiting_magnitude.update(mag, ConfigSource::Environment)
                }
                _ => tracing::warn!(
                    "Invalid THATNIGHTSKY_LIMITING_MAGNITUDE value '{}': expected a number",
                    mag_str
                ),
            }
        }

        // THATNIGHTSKY_CHART_RADIUS
        if let Ok(radius_str) = env::var("THATNIGHTSKY_CHART_RADIUS") {
            match radius_str.parse::<f64>().map_err(|_| ()).and_then(|r| {
                parse_chart_radius(r).map_err(|_| ())
            }) {
                Ok(radius) => self.chart_radius.update(radius, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid THATNIGHTSKY_CHART_RADIUS value '{}': expected a positive number",
                    radius_str
                ),
            }
        }

        // THATNIGHTSKY_UTC_OFFSET
        if let Ok(offset_str) = env::var("THATNIGHTSKY_UTC_OFFSET") {
            match parse_utc_offset(&offset_str) {
                Ok(minutes) => self.utc_offset_minutes.update(minutes, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    "Invalid THATNIGHTSKY_UTC_OFFSET value '{}': expected +HH:MM",
                    offset_str
                ),
            }
        }

        // THATNIGHTSKY_LANG
        if let Ok(lang_str) = env::var("THATNIGHTSKY_LANG") {
            match lang_str.parse::<Lang>() {
                Ok(lang) => self.lang.update(lang, ConfigSource::Environment),
                Err(_) => tracing::warn!(
                    value = %lang_str,
                    "Invalid THATNIGHTSKY_LANG: expected ko or en"
                ),
            }
        }

        // THATNIGHTSKY_HTTP_TIMEOUT_SECS
        if let Ok(timeout_str) = env::var("THATNIGHTSKY_HTTP_TIMEOUT_SECS") {
            match timeout_str.parse::<u64>() {
                Ok(timeout) if timeout > 0 => {
                    self.http_timeout_secs.update(timeout, ConfigSource::Environment)
                }
                _ => tracing::warn!(
                    "Invalid THATNIGHTSKY_HTTP_TIMEOUT_SECS value '{}': expected positive integer",
                    timeout_str
                ),
            }
        }

        // THATNIGHTSKY_NARRATIVE_MODEL
        if let Ok(model) = env::var("THATNIGHTSKY_NARRATIVE_MODEL") {
            self.narrative_model.update(model, ConfigSource::Environment);
        }

        self
    }

    /// Update configuration from CLI arguments
    pub fn update_from_cli(&mut self, overrides: CliConfigOverrides) {
        if let Some(path) = overrides.catalogue_path {
            self.catalogue_path.update(path, ConfigSource::Cli);
        }

        if let Some(format) = overrides.catalogue_format {
            self.catalogue_format.update(format, ConfigSource::Cli);
        }

        if let Some(path) = overrides.constellation_path {
            self.constellation_path.update(path, ConfigSource::Cli);
        }

        if let Some(magnitude) = overrides.limiting_magnitude {
            self.limiting_magnitude.update(magnitude, ConfigSource::Cli);
        }

        if let Some(lang) = overrides.lang {
            self.lang.update(lang, ConfigSource::Cli);
        }
    }

    /// Regional offset used to interpret local time strings
    pub fn utc_offset(&self) -> Result<FixedOffset> {
        FixedOffset::east_opt(self.utc_offset_minutes.value * 60).ok_or_else(|| {
            NightSkyError::ConfigInvalid {
                key: "utc_offset".to_string(),
                reason: format!(
                    "Offset out of range: {}",
                    format_utc_offset(self.utc_offset_minutes.value)
                ),
            }
        })
    }

    /// Get all configuration values as a map for inspection
    pub fn to_inspection_map(&self) -> HashMap<String, (String, ConfigSource)> {
        let mut map = HashMap::new();

        map.insert(
            "catalogue_path".to_string(),
            (self.catalogue_path.value.display().to_string(), self.catalogue_path.source),
        );

        map.insert(
            "catalogue_format".to_string(),
            (format!("{:?}", self.catalogue_format.value), self.catalogue_format.source),
        );

        map.insert(
            "constellation_path".to_string(),
            (self.constellation_path.value.display().to_string(), self.constellation_path.source),
        );

        map.insert(
            "limiting_magnitude".to_string(),
            (self.limiting_magnitude.value.to_string(), self.limiting_magnitude.source),
        );

        map.insert(
            "chart_radius".to_string(),
            (self.chart_radius.value.to_string(), self.chart_radius.source),
        );

        map.insert(
            "utc_offset".to_string(),
            (format_utc_offset(self.utc_offset_minutes.value), self.utc_offset_minutes.source),
        );

        map.insert("lang".to_string(), (self.lang.value.to_string(), self.lang.source));

        map.insert(
            "http_timeout_secs".to_string(),
            (self.http_timeout_secs.value.to_string(), self.http_timeout_secs.source),
        );

        map.insert(
            "narrative_model".to_string(),
            (self.narrative_model.value.clone(), self.narrative_model.source),
        );

        map
    }
}

/// Configuration loaded from TOML file
#[derive(Debug, Deserialize, Serialize)]
struct FileConfig {
    catalogue_path: Option<PathBuf>,
    catalogue_format: Option<CatalogueFormat>,
    constellation_path: Option<PathBuf>,
    limiting_magnitude: Option<f64>,
    chart_radius: Option<f64>,
    utc_offset: Option<String>,
    lang: Option<Lang>,
    http_timeout_secs: Option<u64>,
    narrative_model: Option<String>,
}

/// CLI configuration overrides
#[derive(Debug, Default)]
pub struct CliConfigOverrides {
    pub catalogue_path: Option<PathBuf>,
    pub catalogue_format: Option<CatalogueFormat>,
    pub constellation_path: Option<PathBuf>,
    pub limiting_magnitude: Option<f64>,
    pub lang: Option<Lang>,
}

/// API keys. Read from the environment only, never from files.
#[derive(Clone, Default)]
pub struct Secrets {
    pub vworld_api_key: Option<String>,
    pub anthropic_api_key: Option<String>,
}

impl Secrets {
    pub fn from_env() -> Self {
        Self {
            vworld_api_key: env::var("VWORLD_API_KEY").ok().filter(|k| !k.trim().is_empty()),
            anthropic_api_key: env::var("ANTHROPIC_API_KEY").ok().filter(|k| !k.trim().is_empty()),
        }
    }
}

impl std::fmt::Debug for Secrets {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Secrets")
            .field("vworld_api_key", &self.vworld_api_key.as_ref().map(|_| "***"))
            .field("anthropic_api_key", &self.anthropic_api_key.as_ref().map(|_| "***"))
            .finish()
    }
}

/// Parse catalogue format from string
pub fn parse_catalogue_format(s: &str) -> Result<CatalogueFormat> {
    match s.to_lowercase().as_str() {
        "binary" | "bin" => Ok(CatalogueFormat::Binary),
        "hipparcos" | "hip" | "dat" => Ok(CatalogueFormat::Hipparcos),
        _ => Err(NightSkyError::ConfigInvalid {
            key: "catalogue_format".to_string(),
            reason: format!("Invalid catalogue format: {}. Use binary or hipparcos", s),
        }),
    }
}

/// Parse a UTC offset like "+09:00", "-0530" or "+9" into minutes
pub fn parse_utc_offset(s: &str) -> Result<i32> {
    let invalid = || NightSkyError::ConfigInvalid {
        key: "utc_offset".to_string(),
        reason: format!("Invalid UTC offset: {}. Use +HH:MM", s),
    };

    let s = s.trim();
    if s.eq_ignore_ascii_case("z") || s.eq_ignore_ascii_case("utc") {
        return Ok(0);
    }

    let (sign, rest) = match s.chars().next() {
        Some('+') => (1, &s[1..]),
        Some('-') => (-1, &s[1..]),
        _ => return Err(invalid()),
    };

    let (hours, minutes) = if let Some((h, m)) = rest.split_once(':') {
        (h, m)
    } else if rest.len() == 4 {
        rest.split_at(2)
    } else {
        (rest, "0")
    };

    let hours: i32 = hours.parse().map_err(|_| invalid())?;
    let minutes: i32 = minutes.parse().map_err(|_| invalid())?;
    if !(0..=18).contains(&hours) || !(0..60).contains(&minutes) {
        return Err(invalid());
    }

    let total = sign * (hours * 60 + minutes);
    if total.abs() > 18 * 60 {
        return Err(invalid());
    }
    Ok(total)
}

/// Format minutes as "+HH:MM"
pub fn format_utc_offset(minutes: i32) -> String {
    let sign = if minutes < 0 { '-' } else { '+' };
    let minutes = minutes.abs();
    format!("{}{:02}:{:02}", sign, minutes / 60, minutes % 60)
}

fn parse_chart_radius(radius: f64) -> Result<f64> {
    if radius.is_finite() && radius > 0.0 {
        Ok(radius)
    } else {
        Err(NightSkyError::ConfigInvalid {
            key: "chart_radius".to_string(),
            reason: format!("Chart radius must be positive, got {}", radius),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.catalogue_format.value, CatalogueFormat::Binary);
        assert_eq!(config.catalogue_format.source, ConfigSource::Default);
        assert_eq!(config.limiting_magnitude.value, 6.5);
        assert_eq!(config.utc_offset_minutes.value, 540);
        assert_eq!(config.lang.value, Lang::Ko);
    }

    #[test]
    fn test_config_precedence() {
        let mut value = ConfigValue::new(100, ConfigSource::Default);

        // File should override default
        value.update(200, ConfigSource::File);
        assert_eq!(value.value, 200);
        assert_eq!(value.source, ConfigSource::File);

        // Environment should override file
        value.update(300, ConfigSource::Environment);
        assert_eq!(value.value, 300);
        assert_eq!(value.source, ConfigSource::Environment);

        // CLI should override environment
        value.update(400, ConfigSource::Cli);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);

        // Lower precedence should not override
        value.update(500, ConfigSource::File);
        assert_eq!(value.value, 400);
        assert_eq!(value.source, ConfigSource::Cli);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
catalogue_path = "data/hip_main.dat"
catalogue_format = "Hipparcos"
limiting_magnitude = 5.0
utc_offset = "+08:00"
lang = "en"
"#
        )
        .unwrap();

        let config = LayeredConfig::with_defaults().load_from_file(file.path()).unwrap();

        assert_eq!(config.catalogue_path.value, PathBuf::from("data/hip_main.dat"));
        assert_eq!(config.catalogue_path.source, ConfigSource::File);
        assert_eq!(config.catalogue_format.value, CatalogueFormat::Hipparcos);
        assert_eq!(config.limiting_magnitude.value, 5.0);
        assert_eq!(config.utc_offset_minutes.value, 480);
        assert_eq!(config.lang.value, Lang::En);
        assert_eq!(config.chart_radius.source, ConfigSource::Default);
    }

    #[test]
    fn test_file_with_bad_offset_rejected() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, r#"utc_offset = "nine""#).unwrap();

        let result = LayeredConfig::with_defaults().load_from_file(file.path());
        assert!(matches!(result, Err(NightSkyError::ConfigInvalid { .. })));
    }

    #[test]
    fn test_cli_overrides() {
        let mut config = LayeredConfig::with_defaults();

        let overrides = CliConfigOverrides {
            limiting_magnitude: Some(4.0),
            lang: Some(Lang::En),
            ..Default::default()
        };

        config.update_from_cli(overrides);

        assert_eq!(config.limiting_magnitude.value, 4.0);
        assert_eq!(config.limiting_magnitude.source, ConfigSource::Cli);
        assert_eq!(config.lang.source, ConfigSource::Cli);
        assert_eq!(config.catalogue_path.source, ConfigSource::Default);
    }

    #[test]
    fn test_parse_utc_offset() {
        assert_eq!(parse_utc_offset("+09:00").unwrap(), 540);
        assert_eq!(parse_utc_offset("+9").unwrap(), 540);
        assert_eq!(parse_utc_offset("-0530").unwrap(), -330);
        assert_eq!(parse_utc_offset("Z").unwrap(), 0);
        assert!(parse_utc_offset("09:00").is_err());
        assert!(parse_utc_offset("+19:00").is_err());
        assert!(parse_utc_offset("+09:75").is_err());
    }

    #[test]
    fn test_format_utc_offset() {
        assert_eq!(format_utc_offset(540), "+09:00");
        assert_eq!(format_utc_offset(-330), "-05:30");
        assert_eq!(format_utc_offset(0), "+00:00");
    }

    #[test]
    fn test_utc_offset_conversion() {
        let config = LayeredConfig::with_defaults();
        assert_eq!(config.utc_offset().unwrap().local_minus_utc(), 9 * 3600);
    }

    #[test]
    fn test_parse_catalogue_format() {
        assert_eq!(parse_catalogue_format("binary").unwrap(), CatalogueFormat::Binary);
        assert_eq!(parse_catalogue_format("HIP").unwrap(), CatalogueFormat::Hipparcos);
        assert!(parse_catalogue_format("csv").is_err());
    }

    #[test]
    fn test_inspection_map() {
        let config = LayeredConfig::with_defaults();
        let map = config.to_inspection_map();

        assert!(map.contains_key("catalogue_path"));
        assert!(map.contains_key("limiting_magnitude"));
        assert!(map.contains_key("narrative_model"));

        let (offset, source) = &map["utc_offset"];
        assert_eq!(offset, "+09:00");
        assert_eq!(*source, ConfigSource::Default);
    }

    #[test]
    fn test_secrets_debug_masks_keys() {
        let secrets = Secrets {
            vworld_api_key: Some("secret-vworld".to_string()),
            anthropic_api_key: None,
        };
        let debug = format!("{:?}", secrets);
        assert!(!debug.contains("secret-vworld"));
        assert!(debug.contains("***"));
    }
}
