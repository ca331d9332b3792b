pub mod error;
pub mod models;
pub mod sources;
pub mod types;

pub use error::Error;
pub use models::Summarizer;
pub use sources::NewsSource;
pub use types::*;

pub type Result<T> = std::result::Result<T, Error>;
