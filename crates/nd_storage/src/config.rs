use std::path::PathBuf;

use nd_core::{Config, Result};
use tracing::{info, warn};

use crate::JsonDocument;

#[derive(Debug, Clone)]
pub struct ConfigStore {
    doc: JsonDocument<Config>,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { doc: JsonDocument::new(path) }
    }

    /// Returns an empty topic list with default settings if no config was saved yet.
    pub fn load(&self) -> Result<Config> {
        self.doc.load()
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        self.doc.save(config)?;
        info!("Saved config with {} topics", config.topics.len());
        Ok(())
    }

    /// Remembers that `name` should be summarized. The config is written back
    /// even when no topic matched.
    pub fn enable_ai(&self, name: &str) -> Result<Config> {
        let mut config = self.load()?;
        if !config.enable_ai(name) {
            warn!("Cannot enable AI for unknown topic '{}'", name);
        }
        self.save(&config)?;
        Ok(config)
    }
}
