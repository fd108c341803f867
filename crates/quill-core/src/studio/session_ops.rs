//! Wizard session operations for the Studio.

use std::sync::Arc;

use log::info;

use super::Studio;
use crate::{
    error::{Result, StudioError},
    models::{
        Envelope, EnvelopeDraft, EnvelopeStatus, NewProcessingRecord, DEFAULT_EXPIRY_DAYS,
    },
    params::{DispatchEvent, ToolId},
    processing::{run_processing, ProcessingReport, ProgressSource},
    session::{SessionId, SessionSnapshot, SharedSession, WizardSession},
    wizard::{
        flows::{
            envelope_steps, ACCESS_CODE_KEY, EXPIRES_KEY, MESSAGE_KEY, REMINDERS_KEY, SUBJECT_KEY,
        },
        Outcome, WizardData,
    },
};

impl Studio {
    /// Starts the Upload → Settings → Process → Download wizard for a tool.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::ToolNotFound` for unknown tool slugs.
    pub async fn start_tool_wizard(&self, params: &ToolId) -> Result<SharedSession> {
        let tool = self
            .get_tool(params)
            .await?
            .ok_or_else(|| StudioError::ToolNotFound {
                id: params.tool_id.clone(),
            })?;

        let id = self.sessions.allocate_id();
        info!("session {id}: starting '{}' wizard", tool.id);
        let session = WizardSession::for_tool(id, tool)?;
        Ok(self.sessions.insert(session).await)
    }

    /// Starts the envelope creation wizard.
    pub async fn start_envelope_wizard(&self) -> Result<SharedSession> {
        let id = self.sessions.allocate_id();
        info!("session {id}: starting envelope wizard");
        let session = WizardSession::for_envelope(id)?;
        Ok(self.sessions.insert(session).await)
    }

    /// Looks up a live session.
    pub async fn session(&self, id: SessionId) -> Result<SharedSession> {
        self.sessions
            .get(id)
            .await
            .ok_or(StudioError::SessionNotFound { id: id.0 })
    }

    /// Ends a session, cancelling any processing it still runs.
    pub async fn close_session(&self, id: SessionId) -> Result<()> {
        let session = self
            .sessions
            .remove(id)
            .await
            .ok_or(StudioError::SessionNotFound { id: id.0 })?;
        session.lock().await.reset();
        Ok(())
    }

    /// Applies one event to a live session and returns the outcome together
    /// with the resulting state.
    pub async fn dispatch(&self, params: &DispatchEvent) -> Result<(Outcome, SessionSnapshot)> {
        let session = self.session(params.session).await?;
        let mut session = session.lock().await;
        let outcome = session.dispatch(params.event.clone());
        Ok((outcome, session.snapshot()))
    }

    /// Runs the processing step of a tool session and records the result in
    /// the processing history.
    pub async fn process(
        &self,
        session: &SharedSession,
        progress: &mut dyn ProgressSource,
    ) -> Result<ProcessingReport> {
        let report = run_processing(
            session,
            Arc::clone(&self.backend),
            self.clock.as_ref(),
            progress,
            self.tick,
        )
        .await?;

        let record = {
            let guard = session.lock().await;
            let tool_id = guard.tool().map(|t| t.id.clone()).unwrap_or_default();
            let input_files = guard
                .wizard()
                .data()
                .files()
                .iter()
                .map(|f| f.name.clone())
                .collect();
            match &report {
                ProcessingReport::Completed { output } => Some(NewProcessingRecord {
                    tool_id,
                    input_files,
                    output: Some(output.clone()),
                    succeeded: true,
                    message: None,
                }),
                ProcessingReport::Failed { message } => Some(NewProcessingRecord {
                    tool_id,
                    input_files,
                    output: None,
                    succeeded: false,
                    message: Some(message.clone()),
                }),
                ProcessingReport::Cancelled | ProcessingReport::NotStarted => None,
            }
        };

        if let Some(record) = record {
            self.with_catalog(move |catalog| catalog.record_processing(&record))
                .await?;
        }
        Ok(report)
    }

    /// Sends the envelope collected by an envelope session.
    ///
    /// The session must sit on the review step with every earlier step
    /// satisfied. The stored envelope starts out as sent, and the session is
    /// reset so the same data cannot be sent twice.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::InvalidInput` when the session is not an
    /// envelope wizard, is not on the review step, or holds incomplete data.
    pub async fn send_envelope(&self, session: &SharedSession) -> Result<Envelope> {
        let draft = {
            let guard = session.lock().await;
            if !guard.is_envelope() {
                return Err(StudioError::invalid_input("session")
                    .with_reason("only envelope wizards can be sent"));
            }

            let wizard = guard.wizard();
            if wizard.current_id() != envelope_steps::REVIEW {
                return Err(StudioError::invalid_input("step").with_reason(format!(
                    "envelopes are sent from '{}', not '{}'",
                    envelope_steps::REVIEW,
                    wizard.current_id()
                )));
            }

            let definition = wizard.definition();
            if let Some(blocked) =
                definition.first_blocked_before(wizard.current_index(), wizard.data())
            {
                let step = &definition.steps()[blocked];
                let reason = step
                    .guard
                    .as_ref()
                    .map(|g| g.description().to_string())
                    .unwrap_or_default();
                return Err(StudioError::invalid_input(step.id.as_str()).with_reason(reason));
            }

            envelope_draft(wizard.data())?
        };

        let envelope = self
            .with_catalog(move |catalog| catalog.create_envelope(&draft))
            .await?;
        info!(
            "envelope {} sent to {} recipient(s)",
            envelope.id,
            envelope.recipients.len()
        );

        session.lock().await.reset();
        Ok(envelope)
    }
}

/// Build the stored form of an envelope from wizard data.
fn envelope_draft(data: &WizardData) -> Result<EnvelopeDraft> {
    let optional_text = |key: &str| {
        data.text(key)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(String::from)
    };

    let expires_in_days = match data.number(EXPIRES_KEY) {
        None => DEFAULT_EXPIRY_DAYS,
        Some(days) if (1.0..=f64::from(u32::MAX)).contains(&days) => {
            days.round() as u32
        }
        Some(days) => {
            return Err(StudioError::invalid_input(EXPIRES_KEY)
                .with_reason(format!("{days} is not a positive number of days")))
        }
    };

    Ok(EnvelopeDraft {
        subject: optional_text(SUBJECT_KEY).unwrap_or_default(),
        message: optional_text(MESSAGE_KEY),
        documents: data.files().to_vec(),
        recipients: data.recipients().to_vec(),
        status: EnvelopeStatus::Sent,
        access_code: optional_text(ACCESS_CODE_KEY),
        expires_in_days,
        reminders: data.flag(REMINDERS_KEY).unwrap_or(true),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{FileHandle, Recipient};

    fn complete_data() -> WizardData {
        let mut data = WizardData::new();
        data.push_file(FileHandle::new("nda.pdf", 10, "uploads/nda.pdf"));
        data.add_recipient(Recipient::signer("Jane", "jane@example.com"));
        data.set(SUBJECT_KEY, "  Please sign  ");
        data
    }

    #[test]
    fn test_envelope_draft_defaults() {
        let draft = envelope_draft(&complete_data()).unwrap();
        assert_eq!(draft.subject, "Please sign");
        assert_eq!(draft.message, None);
        assert_eq!(draft.expires_in_days, DEFAULT_EXPIRY_DAYS);
        assert!(draft.reminders);
        assert_eq!(draft.status, EnvelopeStatus::Sent);
    }

    #[test]
    fn test_envelope_draft_settings() {
        let mut data = complete_data();
        data.set(EXPIRES_KEY, 14.0);
        data.set(REMINDERS_KEY, false);
        data.set(ACCESS_CODE_KEY, "1234");
        data.set(MESSAGE_KEY, " ");

        let draft = envelope_draft(&data).unwrap();
        assert_eq!(draft.expires_in_days, 14);
        assert!(!draft.reminders);
        assert_eq!(draft.access_code.as_deref(), Some("1234"));
        assert_eq!(draft.message, None);

        data.set(EXPIRES_KEY, -3.0);
        assert!(envelope_draft(&data).is_err());
    }
}
