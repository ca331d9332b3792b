use std::sync::Arc;

use nd_core::{Error, Result, Summarizer};

use crate::Config;

pub mod dummy;
pub mod gemini;

pub use dummy::DummyModel;
pub use gemini::GeminiModel;

/// Model names accepted by [`create_model`].
pub const AVAILABLE_MODELS: &[&str] = &["gemini", "dummy"];

pub fn create_model(name: &str, config: &Config) -> Result<Arc<dyn Summarizer>> {
    match name.to_lowercase().as_str() {
        "gemini" => Ok(Arc::new(GeminiModel::new(config))),
        "dummy" => Ok(Arc::new(DummyModel::new())),
        other => Err(Error::Inference(format!(
            "Unknown model '{}'. Available models: {}",
            other,
            AVAILABLE_MODELS.join(", ")
        ))),
    }
}
