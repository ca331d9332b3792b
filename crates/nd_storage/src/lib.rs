use std::path::{Path, PathBuf};

pub mod archive;
pub mod cache;
pub mod config;
pub mod document;

pub use archive::ArchiveStore;
pub use cache::SummaryCache;
pub use config::ConfigStore;
pub use document::JsonDocument;

pub const CONFIG_FILE: &str = "config.json";
pub const CACHE_FILE: &str = "cache.json";
pub const ARCHIVE_FILE: &str = "archive.json";

/// The three sibling documents that make up all persisted state.
#[derive(Debug, Clone)]
pub struct Storage {
    pub config: ConfigStore,
    pub cache: SummaryCache,
    pub archive: ArchiveStore,
    data_dir: PathBuf,
}

impl Storage {
    pub fn open(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        Self {
            config: ConfigStore::new(data_dir.join(CONFIG_FILE)),
            cache: SummaryCache::new(data_dir.join(CACHE_FILE)),
            archive: ArchiveStore::new(data_dir.join(ARCHIVE_FILE)),
            data_dir,
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }
}

pub mod prelude {
    pub use super::{ArchiveStore, ConfigStore, JsonDocument, Storage, SummaryCache};
    pub use nd_core::{Error, Result};
}
