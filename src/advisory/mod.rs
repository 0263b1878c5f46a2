//! Health advisory generation
//!
//! Turns a pollutant reading into a prompt, asks a text generator for a short
//! paragraph of advice and makes the answer safe to ship as a single-line
//! JSON string. Generation failures never leave this module.

pub mod gemini;

use async_trait::async_trait;
use std::sync::Arc;
use tracing::{debug, warn};

use crate::Result;
use crate::models::{Advisory, PollutantReading};

pub use gemini::GeminiClient;

pub const GENERATION_FAILED: &str = "AI recommendations could not be generated at this time.";
pub const MODEL_NOT_CONFIGURED: &str = "AI model is not configured.";

/// Free-text prompt in, free-text completion out
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String>;
}

/// Produces [`Advisory`] text, falling back to fixed messages
#[derive(Clone, Default)]
pub struct AdvisoryGenerator {
    model: Option<Arc<dyn TextGenerator>>,
}

impl AdvisoryGenerator {
    pub fn new(model: Arc<dyn TextGenerator>) -> Self {
        Self { model: Some(model) }
    }

    /// A generator with no model behind it
    #[must_use]
    pub fn unconfigured() -> Self {
        Self { model: None }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.model.is_some()
    }

    /// Advice for the given reading; never fails
    pub async fn generate(&self, reading: &PollutantReading) -> Advisory {
        let Some(model) = &self.model else {
            return Advisory::new(MODEL_NOT_CONFIGURED);
        };

        let prompt = build_prompt(reading);
        debug!("Advisory prompt: {}", prompt);

        match model.generate(&prompt).await {
            Ok(text) => Advisory::new(sanitize(&text)),
            Err(e) => {
                warn!("Advisory generation failed: {}", e);
                Advisory::new(GENERATION_FAILED)
            }
        }
    }
}

/// Prompt asking for actionable, number-free health guidance
#[must_use]
pub fn build_prompt(reading: &PollutantReading) -> String {
    format!(
        "The current Air Quality Index (AQI) is {aqi}.\n\
         The pollutant levels (in μg/m³) are: {pollutants}.\n\
         Provide clear, concise, and actionable health recommendations for a general audience.\n\
         Structure your response as a short paragraph.\n\
         Focus on advice about outdoor activities, window ventilation, mask usage, and\n\
         notes for sensitive groups (children, elderly, people with respiratory issues).\n\
         Do not repeat the AQI or pollutant data. Keep it human-friendly.",
        aqi = reading.aqi_index,
        pollutants = reading.format_pollutants(),
    )
}

/// Drop `*` and turn newlines into the two characters `\n`
#[must_use]
pub fn sanitize(text: &str) -> String {
    text.replace('*', "").replace('\n', "\\n")
}
