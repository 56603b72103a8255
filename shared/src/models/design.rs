//! Design Upload Model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored artwork upload (keyed singleton, one per session)
///
/// The file content is carried inline as a base64 `data:` URI so the
/// record survives in plain key-value storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DesignUpload {
    /// Original file name
    pub name: String,
    /// File size in bytes
    pub size: u64,
    /// MIME type guessed from the file name
    pub mime_type: String,
    /// `data:{mime};base64,{payload}`
    pub data_url: String,
    pub uploaded_at: DateTime<Utc>,
}
