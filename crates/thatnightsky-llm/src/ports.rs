//! LLM port definitions

use async_trait::async_trait;
use std::sync::Arc;
use thatnightsky_core::error::Result;

/// Port for text generation
#[async_trait]
pub trait Generator: Send + Sync {
    /// Generate text for a prompt
    ///
    /// # Arguments
    /// * `prompt` - The complete user prompt
    ///
    /// # Returns
    /// Generated text string
    async fn generate(&self, prompt: &str) -> Result<String>;

    /// Get the name/identifier of the generation model
    fn model_name(&self) -> &str;
}

#[async_trait]
impl<T: Generator + ?Sized> Generator for Arc<T> {
    async fn generate(&self, prompt: &str) -> Result<String> {
        (**self).generate(prompt).await
    }

    fn model_name(&self) -> &str {
        (**self).model_name()
    }
}
