//! Draft handoff buffer.
//!
//! Carries a just-analysed resume from the analysis workflow to answer
//! generation without a backend round trip. Only a descriptor of the file
//! travels; the destination must ask the user to attach the file again before
//! anything that needs its contents.

pub mod store;

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, warn};

use store::{KeyValueStore, StoreError, StoreResult};

pub const RESUME_FILE_KEY: &str = "resumeFile";
pub const ANALYSIS_DATA_KEY: &str = "analysisData";

/// Serializable stand-in for an uploaded file.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FileDescriptor {
    pub name: String,
    pub size: u64,
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Handoff {
    pub file: FileDescriptor,
    pub analysis: Value,
}

impl Handoff {
    pub fn predicted_field(&self) -> Option<&str> {
        self.analysis
            .get("predicted_field")
            .and_then(Value::as_str)
            .filter(|s| !s.is_empty())
    }
}

/// When consumed keys are removed from the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ClearPolicy {
    /// Keys are gone before `consume` returns.
    #[default]
    Immediate,
    /// Keys are removed by a background task after the delay. A second reader
    /// inside the window still sees the entry.
    Deferred(Duration),
}

#[derive(Clone)]
pub struct HandoffBuffer {
    store: Arc<dyn KeyValueStore>,
    policy: ClearPolicy,
}

impl HandoffBuffer {
    pub fn new(store: Arc<dyn KeyValueStore>) -> Self {
        Self {
            store,
            policy: ClearPolicy::Immediate,
        }
    }

    pub fn with_policy(mut self, policy: ClearPolicy) -> Self {
        self.policy = policy;
        self
    }

    pub fn store(&self, file: &FileDescriptor, analysis: &Value) -> StoreResult<()> {
        let file_json = serde_json::to_string(file).map_err(StoreError::Encode)?;
        let analysis_json = serde_json::to_string(analysis).map_err(StoreError::Encode)?;

        self.store.set(RESUME_FILE_KEY, &file_json)?;
        if let Err(e) = self.store.set(ANALYSIS_DATA_KEY, &analysis_json) {
            // Never leave a half entry behind.
            if let Err(cleanup) = self.store.remove(RESUME_FILE_KEY) {
                warn!("Could not roll back partial handoff write: {cleanup}");
            }
            return Err(e);
        }
        debug!("Stored handoff for {} ({} bytes)", file.name, file.size);
        Ok(())
    }

    /// Returns the pending handoff, if both halves are present, and schedules its removal.
    pub fn consume(&self) -> StoreResult<Option<Handoff>> {
        let (Some(file_raw), Some(analysis_raw)) = (
            self.store.get(RESUME_FILE_KEY)?,
            self.store.get(ANALYSIS_DATA_KEY)?,
        ) else {
            return Ok(None);
        };

        let parsed = serde_json::from_str::<FileDescriptor>(&file_raw).and_then(|file| {
            serde_json::from_str::<Value>(&analysis_raw).map(|analysis| Handoff { file, analysis })
        });

        let handoff = match parsed {
            Ok(handoff) => handoff,
            Err(e) => {
                warn!("Discarding unreadable handoff entry: {e}");
                clear_keys(self.store.as_ref())?;
                return Ok(None);
            }
        };

        self.schedule_clear()?;
        Ok(Some(handoff))
    }

    fn schedule_clear(&self) -> StoreResult<()> {
        let ClearPolicy::Deferred(delay) = self.policy else {
            return clear_keys(self.store.as_ref());
        };

        match tokio::runtime::Handle::try_current() {
            Ok(handle) => {
                let store = Arc::clone(&self.store);
                handle.spawn(async move {
                    tokio::time::sleep(delay).await;
                    if let Err(e) = clear_keys(store.as_ref()) {
                        warn!("Deferred handoff clear failed: {e}");
                    }
                });
                Ok(())
            }
            Err(_) => {
                warn!("No async runtime for deferred handoff clear; clearing now");
                clear_keys(self.store.as_ref())
            }
        }
    }
}

fn clear_keys(store: &dyn KeyValueStore) -> StoreResult<()> {
    store.remove(RESUME_FILE_KEY)?;
    store.remove(ANALYSIS_DATA_KEY)
}
