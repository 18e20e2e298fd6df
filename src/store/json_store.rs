use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use chrono::Utc;

use crate::store::HistoryStore;
use crate::store::schema::HistoryData;

const HISTORY_FILE: &str = "history.json";

pub struct JsonStore {
    base_dir: PathBuf,
}

impl JsonStore {
    pub fn with_base_dir(base_dir: PathBuf) -> Result<Self> {
        fs::create_dir_all(&base_dir)
            .with_context(|| format!("creating data directory {}", base_dir.display()))?;
        Ok(Self { base_dir })
    }

    fn file_path(&self, name: &str) -> PathBuf {
        self.base_dir.join(name)
    }

    /// Write through a temporary file so a crash never leaves a torn history.
    fn write_atomic(&self, name: &str, contents: &str) -> Result<()> {
        let path = self.file_path(name);
        let tmp_path = path.with_extension("tmp");

        let mut file = fs::File::create(&tmp_path)
            .with_context(|| format!("creating {}", tmp_path.display()))?;
        file.write_all(contents.as_bytes())?;
        file.sync_all()?;

        fs::rename(&tmp_path, &path)
            .with_context(|| format!("replacing {}", path.display()))?;
        Ok(())
    }
}

impl HistoryStore for JsonStore {
    fn load_history(&self) -> Result<Option<HistoryData>> {
        let path = self.file_path(HISTORY_FILE);

        if !path.exists() {
            return Ok(None);
        }

        let content =
            fs::read_to_string(&path).with_context(|| format!("reading {}", path.display()))?;
        let data: HistoryData = serde_json::from_str(&content)
            .with_context(|| format!("parsing practice history {}", path.display()))?;

        tracing::debug!(records = data.records.len(), path = %path.display(), "loaded history");
        Ok(Some(data))
    }

    fn save_history(&self, data: &HistoryData) -> Result<()> {
        let mut data = data.clone();
        data.updated_at = Some(Utc::now());

        let json = serde_json::to_string_pretty(&data)?;
        self.write_atomic(HISTORY_FILE, &json)?;

        tracing::trace!(records = data.records.len(), "saved history");
        Ok(())
    }
}
