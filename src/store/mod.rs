pub mod json_store;
pub mod schema;

use anyhow::Result;

use crate::store::schema::HistoryData;

/// Where the practice history lives between runs.
pub trait HistoryStore {
    /// `None` when nothing has been persisted yet.
    fn load_history(&self) -> Result<Option<HistoryData>>;

    fn save_history(&self, data: &HistoryData) -> Result<()>;
}
