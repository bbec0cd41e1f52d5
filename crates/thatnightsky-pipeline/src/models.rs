use serde::{Deserialize, Serialize};
use thatnightsky_astro::SkySettings;
use thatnightsky_core::models::{Lang, QueryInput, SkyData};

/// One chart request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartPlan {
    /// Address and local time as entered
    pub query: QueryInput,

    /// Language of generated text
    #[serde(default)]
    pub lang: Lang,

    /// Whether to ask for a narrative paragraph
    #[serde(default)]
    pub narrative: bool,

    /// Computation settings
    pub settings: SkySettings,
}

impl ChartPlan {
    /// Create a new chart plan with default settings
    pub fn new(query: QueryInput) -> Self {
        Self {
            query,
            lang: Lang::default(),
            narrative: false,
            settings: SkySettings::default(),
        }
    }

    /// Set the language
    pub fn with_lang(mut self, lang: Lang) -> Self {
        self.lang = lang;
        self
    }

    /// Enable or disable the narrative
    pub fn with_narrative(mut self, narrative: bool) -> Self {
        self.narrative = narrative;
        self
    }

    /// Set the computation settings
    pub fn with_settings(mut self, settings: SkySettings) -> Self {
        self.settings = settings;
        self
    }

    /// Override only the limiting magnitude
    pub fn with_limiting_magnitude(mut self, magnitude: f64) -> Self {
        self.settings.limiting_magnitude = magnitude;
        self
    }
}

/// Outcome of a chart request
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartResult {
    /// The computed sky
    pub sky: SkyData,

    /// Narrative paragraph when requested; the fallback sentence if generation failed
    pub narrative: Option<String>,
}

impl ChartResult {
    /// Headline counts for display
    pub fn summary(&self) -> ChartSummary {
        ChartSummary {
            address: self.sky.observer().address_display.clone(),
            latitude: self.sky.observer().latitude,
            longitude: self.sky.observer().longitude,
            instant_utc: self.sky.observer().instant_utc.to_rfc3339(),
            visible_stars: self.sky.stars().len(),
            lines: self.sky.lines().len(),
            constellations: self.sky.visible_constellations().len(),
        }
    }
}

/// Headline counts of a chart
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChartSummary {
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    pub instant_utc: String,
    pub visible_stars: usize,
    pub lines: usize,
    pub constellations: usize,
}
