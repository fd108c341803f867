//! Tick-based processing loop.

use std::{sync::Arc, time::Duration};

use log::debug;
use serde::Serialize;
use tokio::task;

use super::{Clock, ProcessingBackend, ProgressSource};
use crate::{
    error::{Result, StudioError},
    models::FileHandle,
    session::{ProcessingState, SharedSession, PROGRESS_CEILING},
};

/// Delay between two progress ticks.
pub const DEFAULT_TICK: Duration = Duration::from_millis(300);

/// How a call to [`run_processing`] ended.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "result", rename_all = "snake_case")]
pub enum ProcessingReport {
    Completed { output: FileHandle },
    Failed { message: String },
    /// The session was reset or dropped while running
    Cancelled,
    /// The session was not on its processing step, or already running
    NotStarted,
}

/// Drive one processing run of `session` to the end.
///
/// Progress advances by one [`ProgressSource`] increment per tick until the
/// ceiling is reached, then `backend` runs on the blocking pool. The session
/// lock is only held while a tick or the final result is applied.
///
/// # Errors
///
/// Returns an error only when the blocking task cannot be joined. Backend
/// failures are reported as [`ProcessingReport::Failed`].
pub async fn run_processing(
    session: &SharedSession,
    backend: Arc<dyn ProcessingBackend>,
    clock: &dyn Clock,
    progress: &mut dyn ProgressSource,
    tick: Duration,
) -> Result<ProcessingReport> {
    let ticket = session.lock().await.begin_processing();
    let Some(mut ticket) = ticket else {
        return Ok(ProcessingReport::NotStarted);
    };
    let generation = ticket.generation;

    loop {
        tokio::select! {
            () = ticket.cancelled() => {
                debug!("processing cancelled (generation {generation})");
                return Ok(ProcessingReport::Cancelled);
            }
            () = clock.sleep(tick) => {}
        }

        let increment = progress.next_increment();
        match session.lock().await.advance_progress(generation, increment) {
            Some(current) if current >= PROGRESS_CEILING => break,
            Some(current) => debug!("progress {current}%"),
            None => return Ok(ProcessingReport::Cancelled),
        }
    }

    let job = ticket.job.clone();
    let result = task::spawn_blocking(move || backend.process(&job))
        .await
        .map_err(StudioError::join)?;

    let mut guard = session.lock().await;
    if !guard.finish_processing(generation, result) {
        return Ok(ProcessingReport::Cancelled);
    }
    let report = match guard.processing() {
        ProcessingState::Succeeded { output } => ProcessingReport::Completed {
            output: output.clone(),
        },
        ProcessingState::Failed { message } => ProcessingReport::Failed {
            message: message.clone(),
        },
        ProcessingState::Idle | ProcessingState::Running { .. } => ProcessingReport::Cancelled,
    };
    Ok(report)
}
