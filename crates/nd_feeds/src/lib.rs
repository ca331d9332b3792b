pub mod google_news;
pub mod parser;

pub use google_news::GoogleNewsSource;
pub use parser::parse_items;

pub mod prelude {
    pub use super::google_news::GoogleNewsSource;
    pub use nd_core::{FeedRequest, NewsItem, NewsSource, Result, Error};
}
