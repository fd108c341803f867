//! Processing history records.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::FileHandle;

/// One finished run of a PDF tool, successful or not.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProcessingRecord {
    pub id: u64,
    pub tool_id: String,
    pub input_files: Vec<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub output: Option<FileHandle>,
    pub succeeded: bool,
    pub message: Option<String>,
    pub created_at: Timestamp,
}

/// Data needed to append a record to the history.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewProcessingRecord {
    pub tool_id: String,
    pub input_files: Vec<String>,
    pub output: Option<FileHandle>,
    pub succeeded: bool,
    pub message: Option<String>,
}
