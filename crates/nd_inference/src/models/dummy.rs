use std::fmt;

use nd_core::{Result, Summarizer};

/// Offline stand-in that echoes the headlines it was given.
pub struct DummyModel;

impl fmt::Debug for DummyModel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DummyModel").finish()
    }
}

impl DummyModel {
    pub fn new() -> Self {
        Self
    }
}

impl Default for DummyModel {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl Summarizer for DummyModel {
    fn name(&self) -> &str {
        "Dummy"
    }

    async fn complete(&self, prompt: &str) -> Result<String> {
        let headlines: Vec<&str> = prompt
            .lines()
            .filter_map(|line| line.strip_prefix("- "))
            .collect();

        let mut text = format!("**{} Schlagzeilen** (ohne KI zusammengefasst):\n", headlines.len());
        for headline in headlines.iter().take(3) {
            text.push_str("\n- ");
            text.push_str(headline);
        }
        Ok(text)
    }
}
