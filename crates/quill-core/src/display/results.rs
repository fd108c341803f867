//! Wrappers for displaying the result of state-changing operations.

use std::fmt;

use crate::{
    models::{Envelope, PdfTool},
    processing::ProcessingReport,
    session::SessionSnapshot,
};

/// Outcome of sending an envelope.
pub struct SentEnvelope(pub Envelope);

impl fmt::Display for SentEnvelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Sent envelope with ID: {} to {} recipient(s)",
            self.0.id,
            self.0.recipients.len()
        )?;
        writeln!(f)?;
        write!(f, "{}", self.0)
    }
}

/// An updated resource together with a list of what changed.
pub struct UpdateResult<T> {
    pub resource: T,
    pub changes: Vec<String>,
}

impl<T> UpdateResult<T> {
    pub fn new(resource: T) -> Self {
        Self {
            resource,
            changes: Vec::new(),
        }
    }

    pub fn with_changes(resource: T, changes: Vec<String>) -> Self {
        Self { resource, changes }
    }
}

impl<T: fmt::Display> fmt::Display for UpdateResult<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if !self.changes.is_empty() {
            writeln!(f, "Changes made:")?;
            for change in &self.changes {
                writeln!(f, "- {change}")?;
            }
            writeln!(f)?;
        }
        write!(f, "{}", self.resource)
    }
}

impl UpdateResult<PdfTool> {
    /// Result of pinning or unpinning a tool.
    pub fn favorite(tool: PdfTool) -> Self {
        let change = if tool.favorite {
            format!("Added '{}' to favorites", tool.id)
        } else {
            format!("Removed '{}' from favorites", tool.id)
        };
        Self::with_changes(tool, vec![change])
    }
}

impl UpdateResult<Envelope> {
    /// Result of a status change.
    pub fn status(envelope: Envelope) -> Self {
        let change = format!("Status changed to {}", envelope.status.with_icon());
        Self::with_changes(envelope, vec![change])
    }
}

/// A processing report followed by the session state it left behind.
pub struct ProcessingResult {
    pub report: ProcessingReport,
    pub session: SessionSnapshot,
}

impl fmt::Display for ProcessingResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.report)?;
        writeln!(f)?;
        write!(f, "{}", self.session)
    }
}
