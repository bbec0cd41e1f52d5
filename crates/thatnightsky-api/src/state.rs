use std::sync::Arc;

use thatnightsky_astro::SkySettings;
use thatnightsky_core::config::{LayeredConfig, Secrets};
use thatnightsky_core::error::Result;
use thatnightsky_core::models::{Catalogue, Lang};
use thatnightsky_geocode::Geocoder;
use thatnightsky_pipeline::NightSkyPipeline;

/// Pipeline type hosted by the server
pub type ApiPipeline = NightSkyPipeline<Arc<dyn Geocoder>>;

/// Shared server state
///
/// Geocoder selection depends on the request language, so one pipeline is
/// kept per language. Both share the same catalogue.
#[derive(Clone)]
pub struct AppState {
    pub ko: Arc<ApiPipeline>,
    pub en: Arc<ApiPipeline>,
    pub settings: SkySettings,
    pub default_lang: Lang,
}

impl AppState {
    pub fn new(
        ko: ApiPipeline,
        en: ApiPipeline,
        settings: SkySettings,
        default_lang: Lang,
    ) -> Self {
        Self {
            ko: Arc::new(ko),
            en: Arc::new(en),
            settings,
            default_lang,
        }
    }

    /// Build both pipelines from configuration, loading the catalogue
    pub fn from_config(config: &LayeredConfig, secrets: &Secrets) -> Result<Self> {
        let ko = NightSkyPipeline::from_config(config, secrets, Lang::Ko)?;
        let en = NightSkyPipeline::from_config(config, secrets, Lang::En)?;
        let settings = SkySettings::from_config(config);
        Ok(Self::new(ko, en, settings, config.lang.value))
    }

    /// Pipeline for a request language
    pub fn pipeline(&self, lang: Lang) -> &Arc<ApiPipeline> {
        match lang {
            Lang::Ko => &self.ko,
            Lang::En => &self.en,
        }
    }

    pub fn catalogue(&self) -> &Arc<Catalogue> {
        self.ko.catalogue()
    }
}
