use async_trait::async_trait;
use crate::types::{FeedRequest, NewsItem};
use crate::Result;

#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Returns the name of the news source
    fn name(&self) -> &str;

    /// Fetches at most `request.count` headlines, newest feed order preserved
    async fn fetch(&self, request: &FeedRequest) -> Result<Vec<NewsItem>>;
}
