//! Persisted record types.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Audit sidecar written next to every stored artifact, sharing its base
/// name with a `.json` extension. Write-only from this system's
/// perspective; nothing ever reads it back.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MetadataRecord {
    pub uploaded_at: DateTime<Utc>,
    pub vet: String,
    pub patient: String,
    pub owner: String,
    pub title: String,
    /// Resolved server-local date, `YYYYMMDD`.
    pub date: String,
    pub original_filename: Option<String>,
    pub size_bytes: u64,
    pub mime: Option<String>,
    pub saved_path: String,
    pub client_ip: Option<String>,
    pub user_agent: Option<String>,
}

impl MetadataRecord {
    /// Pretty-printed JSON bytes, the format stored in the Object Store.
    pub fn to_pretty_json(&self) -> Result<Vec<u8>, serde_json::Error> {
        serde_json::to_vec_pretty(self)
    }
}
