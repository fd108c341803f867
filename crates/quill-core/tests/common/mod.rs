#![allow(dead_code)]

use std::sync::Arc;

use quill_core::{
    models::{EnvelopeDraft, EnvelopeStatus, FileHandle, Recipient},
    processing::InstantClock,
    Studio, StudioBuilder,
};
use tempfile::TempDir;

/// Studio backed by a SQLite file in a fresh temporary directory.
pub async fn create_test_studio() -> (TempDir, Studio) {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let db_path = temp_dir.path().join("test.db");
    let studio = StudioBuilder::new()
        .with_database_path(Some(&db_path))
        .with_clock(Arc::new(InstantClock))
        .build()
        .await
        .expect("Failed to create studio");
    (temp_dir, studio)
}

/// Studio that keeps everything in memory.
pub async fn create_memory_studio() -> Studio {
    StudioBuilder::new()
        .in_memory()
        .with_clock(Arc::new(InstantClock))
        .build()
        .await
        .expect("Failed to create studio")
}

pub fn sample_file(name: &str) -> FileHandle {
    FileHandle::new(name, 4096, format!("uploads/{name}"))
}

pub fn sample_draft(subject: &str, status: EnvelopeStatus) -> EnvelopeDraft {
    EnvelopeDraft {
        subject: subject.to_string(),
        message: Some("Please review".to_string()),
        documents: vec![sample_file("contract.pdf"), sample_file("annex.pdf")],
        recipients: vec![
            Recipient::signer("Jane", "jane@example.com"),
            Recipient::signer("Omar", "omar@example.com"),
        ],
        status,
        access_code: Some("4711".to_string()),
        expires_in_days: 14,
        reminders: false,
    }
}
