use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::engine::history::HistoryRecord;

const SCHEMA_VERSION: u32 = 1;

/// On-disk practice history. Rows are addressed by their position in `records`.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct HistoryData {
    pub schema_version: u32,
    #[serde(default)]
    pub updated_at: Option<DateTime<Utc>>,
    pub records: Vec<HistoryRecord>,
}

impl Default for HistoryData {
    fn default() -> Self {
        Self {
            schema_version: SCHEMA_VERSION,
            updated_at: None,
            records: Vec::new(),
        }
    }
}

impl HistoryData {
    pub fn new(records: Vec<HistoryRecord>) -> Self {
        Self {
            records,
            ..Self::default()
        }
    }

    /// Check if loaded data has a stale schema version and needs a rebuild.
    pub fn needs_reset(&self) -> bool {
        self.schema_version != SCHEMA_VERSION
    }
}
