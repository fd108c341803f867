//! Envelope model definition and related functionality.

use jiff::Timestamp;
use serde::{Deserialize, Serialize};

use super::{EnvelopeStatus, FileHandle, Recipient};

/// An e-signature envelope: documents routed to recipients for signing.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Envelope {
    /// Unique identifier for the envelope
    pub id: u64,

    /// Email subject shown to recipients
    pub subject: String,

    /// Optional message body
    pub message: Option<String>,

    /// Documents included in the envelope
    pub documents: Vec<FileHandle>,

    /// Recipients in routing order
    pub recipients: Vec<Recipient>,

    /// Current lifecycle status
    pub status: EnvelopeStatus,

    /// Access code recipients must enter before opening
    #[serde(skip_serializing_if = "Option::is_none")]
    pub access_code: Option<String>,

    /// Days until the envelope expires
    pub expires_in_days: u32,

    /// Whether automatic reminders are sent
    pub reminders: bool,

    /// Timestamp when the envelope was created (UTC)
    pub created_at: Timestamp,

    /// Timestamp when the envelope was last updated (UTC)
    pub updated_at: Timestamp,
}

/// Everything needed to store a new envelope.
#[derive(Debug, Clone, PartialEq)]
pub struct EnvelopeDraft {
    pub subject: String,
    pub message: Option<String>,
    pub documents: Vec<FileHandle>,
    pub recipients: Vec<Recipient>,
    pub status: EnvelopeStatus,
    pub access_code: Option<String>,
    pub expires_in_days: u32,
    pub reminders: bool,
}

/// Default validity of a sent envelope.
pub const DEFAULT_EXPIRY_DAYS: u32 = 30;

/// Envelope counts per status for dashboard summaries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnvelopeStats {
    pub draft: u64,
    pub sent: u64,
    pub completed: u64,
    pub declined: u64,
    pub voided: u64,
}

impl EnvelopeStats {
    /// Count one more envelope in the given status.
    pub fn add(&mut self, status: EnvelopeStatus, count: u64) {
        match status {
            EnvelopeStatus::Draft => self.draft += count,
            EnvelopeStatus::Sent => self.sent += count,
            EnvelopeStatus::Completed => self.completed += count,
            EnvelopeStatus::Declined => self.declined += count,
            EnvelopeStatus::Voided => self.voided += count,
        }
    }

    /// Number of envelopes in the given status.
    pub fn get(&self, status: EnvelopeStatus) -> u64 {
        match status {
            EnvelopeStatus::Draft => self.draft,
            EnvelopeStatus::Sent => self.sent,
            EnvelopeStatus::Completed => self.completed,
            EnvelopeStatus::Declined => self.declined,
            EnvelopeStatus::Voided => self.voided,
        }
    }

    pub fn total(&self) -> u64 {
        self.draft + self.sent + self.completed + self.declined + self.voided
    }

    /// Share of sent-out envelopes that reached completion, in percent.
    pub fn completion_rate(&self) -> Option<u8> {
        let dispatched = self.sent + self.completed + self.declined;
        if dispatched == 0 {
            return None;
        }
        Some(((self.completed * 100) / dispatched) as u8)
    }
}
