//! In-process catalog.

use std::sync::{Mutex, MutexGuard};

use jiff::Timestamp;
use log::debug;

use super::{check_transition, default_tools, validate_draft, CatalogRepository};
use crate::{
    error::{Result, StudioError},
    models::{
        Envelope, EnvelopeDraft, EnvelopeStats, EnvelopeStatus, NewProcessingRecord, PdfTool,
        ProcessingRecord, ToolFilter,
    },
};

#[derive(Debug, Default)]
struct MemoryState {
    tools: Vec<PdfTool>,
    envelopes: Vec<Envelope>,
    history: Vec<ProcessingRecord>,
    next_envelope_id: u64,
    next_record_id: u64,
}

/// Catalog kept entirely in memory and lost on exit.
#[derive(Debug)]
pub struct MemoryCatalog {
    state: Mutex<MemoryState>,
}

impl MemoryCatalog {
    /// A catalog holding the default tool set and nothing else.
    pub fn new() -> Self {
        Self::with_tools(default_tools())
    }

    pub fn with_tools(tools: Vec<PdfTool>) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                tools,
                ..MemoryState::default()
            }),
        }
    }

    fn state(&self) -> Result<MutexGuard<'_, MemoryState>> {
        self.state.lock().map_err(|_| StudioError::Configuration {
            message: "in-memory catalog lock poisoned".to_string(),
        })
    }
}

impl Default for MemoryCatalog {
    fn default() -> Self {
        Self::new()
    }
}

impl CatalogRepository for MemoryCatalog {
    fn list_tools(&self, filter: &ToolFilter) -> Result<Vec<PdfTool>> {
        let state = self.state()?;
        Ok(state
            .tools
            .iter()
            .filter(|tool| filter.accepts(tool))
            .cloned()
            .collect())
    }

    fn get_tool(&self, id: &str) -> Result<Option<PdfTool>> {
        let state = self.state()?;
        Ok(state.tools.iter().find(|tool| tool.id == id).cloned())
    }

    fn set_favorite(&self, id: &str, favorite: bool) -> Result<PdfTool> {
        let mut state = self.state()?;
        let tool = state
            .tools
            .iter_mut()
            .find(|tool| tool.id == id)
            .ok_or_else(|| StudioError::ToolNotFound { id: id.to_string() })?;
        tool.favorite = favorite;
        Ok(tool.clone())
    }

    fn create_envelope(&self, draft: &EnvelopeDraft) -> Result<Envelope> {
        validate_draft(draft)?;
        let mut state = self.state()?;
        state.next_envelope_id += 1;
        let now = Timestamp::now();

        let envelope = Envelope {
            id: state.next_envelope_id,
            subject: draft.subject.clone(),
            message: draft.message.clone(),
            documents: draft.documents.clone(),
            recipients: draft.recipients.clone(),
            status: draft.status,
            access_code: draft.access_code.clone(),
            expires_in_days: draft.expires_in_days,
            reminders: draft.reminders,
            created_at: now,
            updated_at: now,
        };
        debug!("stored envelope {} in memory", envelope.id);
        state.envelopes.push(envelope.clone());
        Ok(envelope)
    }

    fn get_envelope(&self, id: u64) -> Result<Option<Envelope>> {
        let state = self.state()?;
        Ok(state.envelopes.iter().find(|e| e.id == id).cloned())
    }

    fn list_envelopes(&self, status: Option<EnvelopeStatus>) -> Result<Vec<Envelope>> {
        let state = self.state()?;
        Ok(state
            .envelopes
            .iter()
            .rev()
            .filter(|e| status.map_or(true, |s| e.status == s))
            .cloned()
            .collect())
    }

    fn update_envelope_status(&self, id: u64, status: EnvelopeStatus) -> Result<Envelope> {
        let mut state = self.state()?;
        let envelope = state
            .envelopes
            .iter_mut()
            .find(|e| e.id == id)
            .ok_or(StudioError::EnvelopeNotFound { id })?;
        check_transition(envelope.status, status)?;
        envelope.status = status;
        envelope.updated_at = Timestamp::now();
        Ok(envelope.clone())
    }

    fn envelope_stats(&self) -> Result<EnvelopeStats> {
        let state = self.state()?;
        let mut stats = EnvelopeStats::default();
        for envelope in &state.envelopes {
            stats.add(envelope.status, 1);
        }
        Ok(stats)
    }

    fn record_processing(&self, record: &NewProcessingRecord) -> Result<ProcessingRecord> {
        let mut state = self.state()?;
        state.next_record_id += 1;
        let stored = ProcessingRecord {
            id: state.next_record_id,
            tool_id: record.tool_id.clone(),
            input_files: record.input_files.clone(),
            output: record.output.clone(),
            succeeded: record.succeeded,
            message: record.message.clone(),
            created_at: Timestamp::now(),
        };
        state.history.push(stored.clone());
        Ok(stored)
    }

    fn recent_processing(&self, limit: usize) -> Result<Vec<ProcessingRecord>> {
        let state = self.state()?;
        Ok(state.history.iter().rev().take(limit).cloned().collect())
    }
}
