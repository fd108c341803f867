//! Storage of the tool catalog, envelopes and processing history.
//!
//! Wizards never reach for global mock data: everything they list or store
//! goes through the [`CatalogRepository`] trait. Two implementations exist:
//!
//! - [`MemoryCatalog`]: seeded in-process store, used for `--in-memory`
//!   runs and tests
//! - [`SqliteCatalog`]: persistent store in a SQLite file
//!
//! Both implementations are synchronous; the [`crate::Studio`] calls them on
//! the blocking pool.

use crate::{
    error::{Result, StudioError},
    models::{
        Envelope, EnvelopeDraft, EnvelopeStats, EnvelopeStatus, NewProcessingRecord, PdfTool,
        ProcessingRecord, ToolFilter,
    },
};

pub mod memory;
pub mod seed;
pub mod sqlite;

pub use memory::MemoryCatalog;
pub use seed::default_tools;
pub use sqlite::SqliteCatalog;

/// Persistent state behind the studio.
pub trait CatalogRepository: Send + Sync {
    /// Tools passing `filter`, in catalog order.
    fn list_tools(&self, filter: &ToolFilter) -> Result<Vec<PdfTool>>;

    fn get_tool(&self, id: &str) -> Result<Option<PdfTool>>;

    /// Pin or unpin a tool.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::ToolNotFound` for unknown ids.
    fn set_favorite(&self, id: &str, favorite: bool) -> Result<PdfTool>;

    fn create_envelope(&self, draft: &EnvelopeDraft) -> Result<Envelope>;

    fn get_envelope(&self, id: u64) -> Result<Option<Envelope>>;

    /// Envelopes, newest first, optionally restricted to one status.
    fn list_envelopes(&self, status: Option<EnvelopeStatus>) -> Result<Vec<Envelope>>;

    /// Move an envelope along its lifecycle.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::EnvelopeNotFound` for unknown ids and
    /// `StudioError::InvalidInput` for transitions the lifecycle forbids.
    fn update_envelope_status(&self, id: u64, status: EnvelopeStatus) -> Result<Envelope>;

    fn envelope_stats(&self) -> Result<EnvelopeStats>;

    fn record_processing(&self, record: &NewProcessingRecord) -> Result<ProcessingRecord>;

    /// The `limit` most recent processing records, newest first.
    fn recent_processing(&self, limit: usize) -> Result<Vec<ProcessingRecord>>;
}

/// Reject status changes the envelope lifecycle does not allow.
pub(crate) fn check_transition(current: EnvelopeStatus, next: EnvelopeStatus) -> Result<()> {
    if current.can_transition_to(next) {
        Ok(())
    } else {
        Err(StudioError::invalid_input("status").with_reason(format!(
            "cannot change an envelope from {} to {}",
            current.as_str(),
            next.as_str()
        )))
    }
}

/// Reject drafts that could never be delivered.
pub(crate) fn validate_draft(draft: &EnvelopeDraft) -> Result<()> {
    if draft.subject.trim().is_empty() {
        return Err(StudioError::invalid_input("subject").with_reason("must not be empty"));
    }
    if draft.documents.is_empty() {
        return Err(StudioError::invalid_input("documents").with_reason("at least one document is required"));
    }
    if draft.recipients.is_empty() || !draft.recipients.iter().all(|r| r.is_complete()) {
        return Err(StudioError::invalid_input("recipients")
            .with_reason("every recipient needs a name and an email"));
    }
    Ok(())
}
