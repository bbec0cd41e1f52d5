//! ThatNightSky LLM - Narrative generation
//!
//! This crate defines the text generation port, the Anthropic Messages API
//! adapter and the prompt used to describe a night sky.

pub mod anthropic;
pub mod memory;
pub mod narrative;
pub mod ports;

// Re-export main types
pub use anthropic::AnthropicGenerator;
pub use memory::StaticGenerator;
pub use narrative::{build_prompt, fallback_text, NarrativeRequest, NarrativeWriter};
pub use ports::Generator;

use std::sync::Arc;
use std::time::Duration;
use thatnightsky_core::config::{LayeredConfig, Secrets};
use thatnightsky_core::error::{NightSkyError, Result};

/// Build the configured generator
///
/// Fails with `ConfigMissing` when no API key is available.
pub fn build_generator(config: &LayeredConfig, secrets: &Secrets) -> Result<Arc<dyn Generator>> {
    let api_key = secrets
        .anthropic_api_key
        .as_deref()
        .ok_or_else(|| NightSkyError::ConfigMissing {
            key: "ANTHROPIC_API_KEY".to_string(),
        })?;

    let generator = AnthropicGenerator::new(
        api_key,
        config.narrative_model.value.clone(),
        Duration::from_secs(config.http_timeout_secs.value),
    )?;
    Ok(Arc::new(generator))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_build_generator_requires_key() {
        let config = LayeredConfig::with_defaults();
        let err = build_generator(&config, &Secrets::default()).err().unwrap();
        assert!(matches!(err, NightSkyError::ConfigMissing { .. }));

        let secrets = Secrets {
            vworld_api_key: None,
            anthropic_api_key: Some("k".to_string()),
        };
        let generator = build_generator(&config, &secrets).unwrap();
        assert_eq!(generator.model_name(), "claude-sonnet-4-5");
    }
}
