use std::sync::Arc;
use nd_core::NewsSource;
use nd_inference::SummaryService;
use nd_storage::Storage;

pub struct AppState {
    pub storage: Storage,
    pub summaries: SummaryService,
    pub source: Arc<dyn NewsSource>,
}
