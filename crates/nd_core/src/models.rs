use std::fmt;
use async_trait::async_trait;
use crate::Result;

/// A text-completion backend used to summarize headlines.
#[async_trait]
pub trait Summarizer: Send + Sync + fmt::Debug {
    fn name(&self) -> &str;

    /// Send `prompt` to the model and return its raw (Markdown) answer.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
