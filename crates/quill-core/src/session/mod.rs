//! Wizard sessions: a wizard plus the lifecycle of its processing step.
//!
//! Processing runs asynchronously while the session stays usable. Every run
//! is stamped with the session's generation; a reset bumps the generation
//! and fires the run's cancellation signal, so late progress ticks or a
//! late backend answer from before the reset are discarded.

use std::fmt;

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use tokio::sync::watch;

use crate::{
    error::{Result, StudioError},
    models::PdfTool,
    processing::{ProcessingJob, ProcessingReceipt},
    wizard::{
        envelope_flow, flows::OUTPUT_KEY, pdf_tool_flow, Outcome, Wizard, WizardEvent,
        WizardSnapshot, FILES_KEY,
    },
};

pub mod registry;
pub mod state;

#[cfg(test)]
mod tests;

pub use registry::{SessionRegistry, SharedSession};
pub use state::{ProcessingState, PROGRESS_CEILING};

/// Identifier of a live session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(transparent)]
pub struct SessionId(pub u64);

impl fmt::Display for SessionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Handed to the processing driver when a run starts.
#[derive(Debug)]
pub struct ProcessingTicket {
    pub generation: u64,
    pub job: ProcessingJob,
    cancel: watch::Receiver<bool>,
}

impl ProcessingTicket {
    /// Resolves once the run is cancelled or its session is gone.
    pub async fn cancelled(&mut self) {
        loop {
            if *self.cancel.borrow_and_update() {
                return;
            }
            if self.cancel.changed().await.is_err() {
                return;
            }
        }
    }
}

/// Serializable view of a session.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSnapshot {
    pub id: SessionId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tool: Option<String>,
    pub processing: ProcessingState,
    #[serde(flatten)]
    pub wizard: WizardSnapshot,
}

/// One user's pass through a PDF tool or envelope wizard.
#[derive(Debug)]
pub struct WizardSession {
    id: SessionId,
    wizard: Wizard,
    tool: Option<PdfTool>,
    processing: ProcessingState,
    generation: u64,
    cancel: Option<watch::Sender<bool>>,
}

impl WizardSession {
    pub fn new(id: SessionId, wizard: Wizard, tool: Option<PdfTool>) -> Self {
        Self {
            id,
            wizard,
            tool,
            processing: ProcessingState::Idle,
            generation: 0,
            cancel: None,
        }
    }

    /// Session running the Upload → Settings → Process → Download flow.
    pub fn for_tool(id: SessionId, tool: PdfTool) -> Result<Self> {
        let definition = pdf_tool_flow(&tool)?;
        Ok(Self::new(id, Wizard::new(definition.into()), Some(tool)))
    }

    /// Session running the envelope creation flow.
    pub fn for_envelope(id: SessionId) -> Result<Self> {
        let definition = envelope_flow()?;
        Ok(Self::new(id, Wizard::new(definition.into()), None))
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn wizard(&self) -> &Wizard {
        &self.wizard
    }

    pub fn tool(&self) -> Option<&PdfTool> {
        self.tool.as_ref()
    }

    pub fn processing(&self) -> &ProcessingState {
        &self.processing
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn is_envelope(&self) -> bool {
        self.tool.is_none()
    }

    /// Forward an event to the wizard. `Reset` also cancels processing.
    pub fn dispatch(&mut self, event: WizardEvent) -> Outcome {
        match event {
            WizardEvent::Reset => self.reset(),
            event => self.wizard.dispatch(event),
        }
    }

    /// Whether the wizard sits on its processing step with nothing running.
    pub fn can_process(&self) -> bool {
        self.tool.is_some()
            && !self.processing.is_running()
            && self
                .wizard
                .definition()
                .processing_step()
                .is_some_and(|step| step == self.wizard.current_id())
    }

    /// Start a run. Returns `None` when processing is not possible right now.
    pub fn begin_processing(&mut self) -> Option<ProcessingTicket> {
        if !self.can_process() {
            return None;
        }
        let tool = self.tool.clone()?;

        let data = self.wizard.data();
        let files = data.files().to_vec();
        let settings = data
            .iter()
            .filter(|(key, _)| *key != FILES_KEY && *key != OUTPUT_KEY)
            .map(|(key, value)| (key.to_string(), value.clone()))
            .collect();

        let (sender, receiver) = watch::channel(false);
        self.cancel = Some(sender);
        self.processing = ProcessingState::Running { progress: 0 };
        info!(
            "session {} started '{}' (generation {})",
            self.id, tool.id, self.generation
        );

        Some(ProcessingTicket {
            generation: self.generation,
            job: ProcessingJob {
                tool,
                files,
                settings,
            },
            cancel: receiver,
        })
    }

    /// Apply one progress tick of at least one percent. Returns the new
    /// progress, or `None` when the tick is stale or nothing is running.
    pub fn advance_progress(&mut self, generation: u64, increment: u8) -> Option<u8> {
        if generation != self.generation {
            debug!("session {}: dropped stale tick", self.id);
            return None;
        }
        match &mut self.processing {
            ProcessingState::Running { progress } => {
                *progress = progress
                    .saturating_add(increment.max(1))
                    .min(PROGRESS_CEILING);
                Some(*progress)
            }
            _ => None,
        }
    }

    /// Record the backend's answer. Returns `false` when the answer is stale.
    ///
    /// On success the output is stored under `output` and the wizard moves
    /// on to its next step. On failure the step and data are kept so the
    /// user can retry.
    pub fn finish_processing(
        &mut self,
        generation: u64,
        result: Result<ProcessingReceipt>,
    ) -> bool {
        if generation != self.generation || !self.processing.is_running() {
            debug!("session {}: dropped stale processing result", self.id);
            return false;
        }
        self.cancel = None;

        match result {
            Ok(receipt) => {
                self.wizard
                    .data_mut()
                    .set(OUTPUT_KEY, vec![receipt.output.clone()]);
                self.processing = ProcessingState::Succeeded {
                    output: receipt.output,
                };
                let on_processing_step = self
                    .wizard
                    .definition()
                    .processing_step()
                    .is_some_and(|step| step == self.wizard.current_id());
                if on_processing_step {
                    self.wizard.go_next();
                }
            }
            Err(error) => {
                let message = match error {
                    StudioError::Processing { message } => message,
                    other => other.to_string(),
                };
                warn!("session {}: processing failed: {message}", self.id);
                self.processing = ProcessingState::Failed { message };
            }
        }
        true
    }

    /// Cancel any run, invalidate its ticks and reset the wizard.
    pub fn reset(&mut self) -> Outcome {
        if let Some(cancel) = self.cancel.take() {
            let _ = cancel.send(true);
        }
        self.generation += 1;
        self.processing = ProcessingState::Idle;
        self.wizard.reset()
    }

    pub fn snapshot(&self) -> SessionSnapshot {
        SessionSnapshot {
            id: self.id,
            tool: self.tool.as_ref().map(|t| t.id.clone()),
            processing: self.processing.clone(),
            wizard: self.wizard.snapshot(),
        }
    }
}
