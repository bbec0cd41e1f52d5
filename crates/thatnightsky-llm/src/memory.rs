//! In-memory generator for development and testing.
//!
//! Uses `Mutex::lock().unwrap()`: poisoning only follows a panic in another
//! test thread.

use crate::ports::Generator;
use async_trait::async_trait;
use std::sync::Mutex;
use thatnightsky_core::error::{NightSkyError, Result};

/// Returns a fixed reply and records every prompt
#[derive(Debug, Default)]
pub struct StaticGenerator {
    reply: String,
    failure: Option<String>,
    prompts: Mutex<Vec<String>>,
}

impl StaticGenerator {
    pub fn new(reply: impl Into<String>) -> Self {
        Self {
            reply: reply.into(),
            ..Default::default()
        }
    }

    /// Generator whose every call fails with `reason`
    pub fn failing(reason: impl Into<String>) -> Self {
        Self {
            failure: Some(reason.into()),
            ..Default::default()
        }
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Generator for StaticGenerator {
    async fn generate(&self, prompt: &str) -> Result<String> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.failure {
            Some(reason) => Err(NightSkyError::Narrative {
                reason: reason.clone(),
                remediation: "none (static generator)".to_string(),
            }),
            None => Ok(self.reply.clone()),
        }
    }

    fn model_name(&self) -> &str {
        "static"
    }
}
