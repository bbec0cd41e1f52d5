use std::sync::Arc;
use thatnightsky_astro::{SkyComputer, SkySettings};
use thatnightsky_catalogue::{shared_catalogue, CataloguePaths};
use thatnightsky_core::config::{LayeredConfig, Secrets};
use thatnightsky_core::error::Result;
use thatnightsky_core::models::{Catalogue, Lang, ObserverContext, QueryInput, SkyData};
use thatnightsky_geocode::{build_geocoder, Geocoder, ObserverResolver};
use thatnightsky_llm::{
    build_generator, fallback_text, Generator, NarrativeRequest, NarrativeWriter,
};

use crate::models::{ChartPlan, ChartResult};

/// Chart pipeline: resolve the observer, compute the sky, then narrate
pub struct NightSkyPipeline<G>
where
    G: Geocoder,
{
    resolver: ObserverResolver<G>,
    catalogue: Arc<Catalogue>,
    narrator: Option<NarrativeWriter<Arc<dyn Generator>>>,
}

impl<G> NightSkyPipeline<G>
where
    G: Geocoder,
{
    /// Create a new pipeline without narrative support
    pub fn new(resolver: ObserverResolver<G>, catalogue: Arc<Catalogue>) -> Self {
        Self {
            resolver,
            catalogue,
            narrator: None,
        }
    }

    /// Attach a text generator for narratives
    pub fn with_generator(mut self, generator: Arc<dyn Generator>) -> Self {
        self.narrator = Some(NarrativeWriter::new(generator));
        self
    }

    pub fn catalogue(&self) -> &Arc<Catalogue> {
        &self.catalogue
    }

    pub fn has_narrator(&self) -> bool {
        self.narrator.is_some()
    }

    /// Execute a chart plan
    pub async fn execute(&self, plan: &ChartPlan) -> Result<ChartResult> {
        // Phase 1: address + local time → observer
        let observer = self.resolve_observer(&plan.query).await?;

        // Phase 2: sky computation
        let sky = self.compute_for_observer(&observer, plan.settings)?;

        // Phase 3: optional narrative, never fatal
        let narrative = self.narrative_for(&sky, plan).await;

        Ok(ChartResult { sky, narrative })
    }

    /// Resolve an address and local time to an observer
    pub async fn resolve_observer(&self, query: &QueryInput) -> Result<ObserverContext> {
        self.resolver.resolve(query).await
    }

    /// Narrative for a computed sky, when the plan asks for one
    pub async fn narrative_for(&self, sky: &SkyData, plan: &ChartPlan) -> Option<String> {
        if !plan.narrative {
            return None;
        }
        Some(self.narrate(sky, plan).await)
    }

    /// Compute the sky for an already resolved observer
    pub fn compute_for_observer(
        &self,
        observer: &ObserverContext,
        settings: SkySettings,
    ) -> Result<SkyData> {
        SkyComputer::new(settings).compute(observer, &self.catalogue)
    }

    // A requested narrative always yields text: the generated paragraph or
    // the fallback sentence for the plan language.
    async fn narrate(&self, sky: &SkyData, plan: &ChartPlan) -> String {
        let Some(narrator) = &self.narrator else {
            tracing::warn!("Narrative requested but no generator is configured");
            return fallback_text(plan.lang).to_string();
        };

        let request = NarrativeRequest::from_sky(sky, plan.query.when.clone(), plan.lang);
        narrator.write_or_fallback(&request).await
    }
}

impl NightSkyPipeline<Arc<dyn Geocoder>> {
    /// Assemble a pipeline from configuration
    ///
    /// Loads the process-wide catalogue on first use. A narrative generator is
    /// attached only when an API key is available.
    pub fn from_config(config: &LayeredConfig, secrets: &Secrets, lang: Lang) -> Result<Self> {
        let catalogue = shared_catalogue(&CataloguePaths::from_config(config))?;
        let geocoder = build_geocoder(config, secrets, lang)?;
        let resolver = ObserverResolver::new(geocoder, config.utc_offset()?);

        let pipeline = Self::new(resolver, catalogue);
        match build_generator(config, secrets) {
            Ok(generator) => Ok(pipeline.with_generator(generator)),
            Err(e) => {
                tracing::debug!(reason = %e, "Narrative generation disabled");
                Ok(pipeline)
            }
        }
    }
}
