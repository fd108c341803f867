//! Envelope CRUD operations and queries.

use jiff::Timestamp;
use rusqlite::{params, OptionalExtension, Row};

use super::utils;
use crate::{
    catalog::{check_transition, validate_draft},
    error::{DatabaseResultExt, Result, StudioError},
    models::{
        Envelope, EnvelopeDraft, EnvelopeStats, EnvelopeStatus, FileHandle, Recipient,
    },
};

const INSERT_ENVELOPE_SQL: &str = "INSERT INTO envelopes (subject, message, status, access_code, expires_in_days, reminders, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)";
const INSERT_DOCUMENT_SQL: &str = "INSERT INTO envelope_documents (envelope_id, position, name, size, location) VALUES (?1, ?2, ?3, ?4, ?5)";
const INSERT_RECIPIENT_SQL: &str = "INSERT INTO envelope_recipients (envelope_id, position, name, email, role) VALUES (?1, ?2, ?3, ?4, ?5)";
const SELECT_ENVELOPE_SQL: &str = "SELECT id, subject, message, status, access_code, expires_in_days, reminders, created_at, updated_at FROM envelopes WHERE id = ?1";
const LIST_ENVELOPES_SQL: &str = "SELECT id, subject, message, status, access_code, expires_in_days, reminders, created_at, updated_at FROM envelopes ORDER BY id DESC";
const LIST_ENVELOPES_BY_STATUS_SQL: &str = "SELECT id, subject, message, status, access_code, expires_in_days, reminders, created_at, updated_at FROM envelopes WHERE status = ?1 ORDER BY id DESC";
const SELECT_DOCUMENTS_SQL: &str =
    "SELECT name, size, location FROM envelope_documents WHERE envelope_id = ?1 ORDER BY position";
const SELECT_RECIPIENTS_SQL: &str =
    "SELECT name, email, role FROM envelope_recipients WHERE envelope_id = ?1 ORDER BY position";
const UPDATE_STATUS_SQL: &str =
    "UPDATE envelopes SET status = ?1, updated_at = ?2 WHERE id = ?3 AND status = ?4";
const STATUS_COUNTS_SQL: &str = "SELECT status, total FROM envelope_status_counts";

/// Envelope row without its documents and recipients.
fn envelope_from_row(row: &Row<'_>) -> rusqlite::Result<Envelope> {
    Ok(Envelope {
        id: row.get::<_, i64>(0)? as u64,
        subject: row.get(1)?,
        message: row.get(2)?,
        documents: Vec::new(),
        recipients: Vec::new(),
        status: utils::parsed(row, 3)?,
        access_code: row.get(4)?,
        expires_in_days: row.get(5)?,
        reminders: row.get(6)?,
        created_at: utils::timestamp(row, 7)?,
        updated_at: utils::timestamp(row, 8)?,
    })
}

impl super::Database {
    /// Stores a new envelope together with its documents and recipients.
    pub fn create_envelope(&mut self, draft: &EnvelopeDraft) -> Result<Envelope> {
        validate_draft(draft)?;

        let tx = self
            .connection
            .transaction()
            .db_context("Failed to begin transaction")?;

        let now = Timestamp::now();
        let now_str = now.to_string();

        tx.execute(
            INSERT_ENVELOPE_SQL,
            params![
                draft.subject,
                draft.message,
                draft.status.as_str(),
                draft.access_code,
                draft.expires_in_days,
                draft.reminders,
                &now_str,
                &now_str
            ],
        )
        .db_context("Failed to insert envelope")?;
        let id = tx.last_insert_rowid();

        for (position, document) in draft.documents.iter().enumerate() {
            tx.execute(
                INSERT_DOCUMENT_SQL,
                params![
                    id,
                    position as i64,
                    document.name,
                    document.size as i64,
                    document.location
                ],
            )
            .db_context("Failed to insert envelope document")?;
        }

        for (position, recipient) in draft.recipients.iter().enumerate() {
            tx.execute(
                INSERT_RECIPIENT_SQL,
                params![
                    id,
                    position as i64,
                    recipient.name,
                    recipient.email,
                    recipient.role.as_str()
                ],
            )
            .db_context("Failed to insert envelope recipient")?;
        }

        tx.commit().db_context("Failed to commit transaction")?;

        Ok(Envelope {
            id: id as u64,
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
        })
    }

    /// Retrieves an envelope by its ID, documents and recipients included.
    pub fn get_envelope(&self, id: u64) -> Result<Option<Envelope>> {
        let envelope = self
            .connection
            .query_row(SELECT_ENVELOPE_SQL, params![id as i64], envelope_from_row)
            .optional()
            .db_context("Failed to query envelope")?;

        match envelope {
            Some(envelope) => Ok(Some(self.load_children(envelope)?)),
            None => Ok(None),
        }
    }

    /// Lists envelopes newest first, optionally filtered by status.
    pub fn list_envelopes(&self, status: Option<EnvelopeStatus>) -> Result<Vec<Envelope>> {
        let envelopes = match status {
            Some(status) => {
                let mut stmt = self
                    .connection
                    .prepare(LIST_ENVELOPES_BY_STATUS_SQL)
                    .db_context("Failed to prepare envelope query")?;
                let rows = stmt
                    .query_map(params![status.as_str()], envelope_from_row)
                    .db_context("Failed to query envelopes")?
                    .collect::<rusqlite::Result<Vec<_>>>();
                rows
            }
            None => {
                let mut stmt = self
                    .connection
                    .prepare(LIST_ENVELOPES_SQL)
                    .db_context("Failed to prepare envelope query")?;
                let rows = stmt
                    .query_map([], envelope_from_row)
                    .db_context("Failed to query envelopes")?
                    .collect::<rusqlite::Result<Vec<_>>>();
                rows
            }
        }
        .db_context("Failed to read envelope row")?;

        envelopes
            .into_iter()
            .map(|envelope| self.load_children(envelope))
            .collect()
    }

    /// Moves an envelope to `status` if its lifecycle allows it.
    pub fn update_envelope_status(&self, id: u64, status: EnvelopeStatus) -> Result<Envelope> {
        let current = self
            .get_envelope(id)?
            .ok_or(StudioError::EnvelopeNotFound { id })?;
        check_transition(current.status, status)?;

        let now = Timestamp::now();
        if !self.replace_status(id, current.status, status, now)? {
            return Err(StudioError::invalid_input("status").with_reason(format!(
                "envelope {id} was changed by another writer; reload it and retry"
            )));
        }

        Ok(Envelope {
            status,
            updated_at: now,
            ..current
        })
    }

    /// Writes `next` only while the stored status is still `expected`.
    ///
    /// Returns `false` when the row is missing or its status moved on.
    pub fn replace_status(
        &self,
        id: u64,
        expected: EnvelopeStatus,
        next: EnvelopeStatus,
        updated_at: Timestamp,
    ) -> Result<bool> {
        let changed = self
            .connection
            .execute(
                UPDATE_STATUS_SQL,
                params![
                    next.as_str(),
                    updated_at.to_string(),
                    id as i64,
                    expected.as_str()
                ],
            )
            .db_context("Failed to update envelope status")?;
        Ok(changed == 1)
    }

    /// Counts envelopes per status.
    pub fn envelope_stats(&self) -> Result<EnvelopeStats> {
        let mut stmt = self
            .connection
            .prepare(STATUS_COUNTS_SQL)
            .db_context("Failed to prepare status counts")?;
        let counts = stmt
            .query_map([], |row| {
                Ok((utils::parsed::<EnvelopeStatus>(row, 0)?, row.get::<_, i64>(1)?))
            })
            .db_context("Failed to query status counts")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read status count")?;

        let mut stats = EnvelopeStats::default();
        for (status, total) in counts {
            stats.add(status, total as u64);
        }
        Ok(stats)
    }

    fn load_children(&self, mut envelope: Envelope) -> Result<Envelope> {
        let id = envelope.id as i64;

        let mut stmt = self
            .connection
            .prepare_cached(SELECT_DOCUMENTS_SQL)
            .db_context("Failed to prepare document query")?;
        envelope.documents = stmt
            .query_map(params![id], |row| {
                Ok(FileHandle {
                    name: row.get(0)?,
                    size: row.get::<_, i64>(1)? as u64,
                    location: row.get(2)?,
                })
            })
            .db_context("Failed to query envelope documents")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read envelope document")?;

        let mut stmt = self
            .connection
            .prepare_cached(SELECT_RECIPIENTS_SQL)
            .db_context("Failed to prepare recipient query")?;
        envelope.recipients = stmt
            .query_map(params![id], |row| {
                Ok(Recipient {
                    name: row.get(0)?,
                    email: row.get(1)?,
                    role: utils::parsed(row, 2)?,
                })
            })
            .db_context("Failed to query envelope recipients")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read envelope recipient")?;

        Ok(envelope)
    }
}
