//! Tests for sessions and the processing driver.

use std::{future, sync::Arc, time::Duration};

use tokio::sync::Mutex;

use super::*;
use crate::{
    catalog::default_tools,
    models::{FieldValue, FileHandle},
    processing::{
        run_processing, Clock, FixedProgress, InstantClock, ProcessingReport, SimulatedBackend,
        Sleep,
    },
    wizard::flows::tool_steps,
};

struct NeverClock;

impl Clock for NeverClock {
    fn sleep(&self, _duration: Duration) -> Sleep {
        Box::pin(future::pending())
    }
}

fn tool(id: &str) -> PdfTool {
    default_tools()
        .into_iter()
        .find(|t| t.id == id)
        .expect("seeded tool")
}

fn session_at_process() -> WizardSession {
    let mut session = WizardSession::for_tool(SessionId(1), tool("compress")).unwrap();
    session.dispatch(WizardEvent::AddFile {
        file: FileHandle::new("report.pdf", 2048, "uploads/report.pdf"),
    });
    session.dispatch(WizardEvent::Set {
        key: "quality".to_string(),
        value: FieldValue::Text("high".to_string()),
    });
    assert!(session.dispatch(WizardEvent::Next).is_moved());
    assert!(session.dispatch(WizardEvent::Next).is_moved());
    assert_eq!(session.wizard().current_id(), tool_steps::PROCESS);
    session
}

fn receipt(name: &str) -> ProcessingReceipt {
    ProcessingReceipt {
        output: FileHandle::new(name, 1024, format!("processed/{name}")),
        message: None,
    }
}

#[test]
fn test_begin_only_on_processing_step() {
    let mut session = WizardSession::for_tool(SessionId(1), tool("compress")).unwrap();
    assert!(session.begin_processing().is_none());

    let mut envelope = WizardSession::for_envelope(SessionId(2)).unwrap();
    assert!(envelope.begin_processing().is_none());

    let mut session = session_at_process();
    let ticket = session.begin_processing().expect("ticket");
    assert_eq!(ticket.job.files.len(), 1);
    assert!(ticket.job.settings.contains_key("quality"));
    assert!(!ticket.job.settings.contains_key(FILES_KEY));
    assert!(session.processing().is_running());

    // Already running
    assert!(session.begin_processing().is_none());
}

#[test]
fn test_progress_saturates_below_completion() {
    let mut session = session_at_process();
    let ticket = session.begin_processing().unwrap();

    assert_eq!(session.advance_progress(ticket.generation, 60), Some(60));
    assert_eq!(session.advance_progress(ticket.generation, 60), Some(PROGRESS_CEILING));
    assert_eq!(session.processing().progress(), PROGRESS_CEILING);
}

#[test]
fn test_stale_ticks_after_reset_are_ignored() {
    let mut session = session_at_process();
    let ticket = session.begin_processing().unwrap();
    session.advance_progress(ticket.generation, 20);

    assert_eq!(session.dispatch(WizardEvent::Reset), Outcome::Reset);
    assert_eq!(session.processing(), &ProcessingState::Idle);
    assert!(session.wizard().data().is_empty());

    assert_eq!(session.advance_progress(ticket.generation, 20), None);
    assert!(!session.finish_processing(ticket.generation, Ok(receipt("late.pdf"))));
    assert_eq!(session.processing(), &ProcessingState::Idle);
    assert_eq!(session.wizard().current_id(), tool_steps::UPLOAD);
    assert!(!session.wizard().data().contains(OUTPUT_KEY));
}

#[test]
fn test_success_advances_to_download() {
    let mut session = session_at_process();
    let ticket = session.begin_processing().unwrap();

    assert!(session.finish_processing(ticket.generation, Ok(receipt("report-compressed.pdf"))));
    assert_eq!(session.wizard().current_id(), tool_steps::DOWNLOAD);
    assert_eq!(session.processing().progress(), 100);
    assert_eq!(
        session.wizard().data().get(OUTPUT_KEY).and_then(FieldValue::as_files).map(<[_]>::len),
        Some(1)
    );
}

#[test]
fn test_forged_output_cannot_reach_download() {
    let mut session = session_at_process();

    let outcome = session.dispatch(WizardEvent::Set {
        key: OUTPUT_KEY.to_string(),
        value: FieldValue::Text("fake.pdf".to_string()),
    });
    assert!(outcome.is_rejected());
    assert!(session.dispatch(WizardEvent::Next).is_rejected());
    assert!(session
        .dispatch(WizardEvent::GoTo {
            step: tool_steps::DOWNLOAD.into(),
        })
        .is_rejected());
    assert_eq!(session.wizard().current_id(), tool_steps::PROCESS);
    assert_eq!(session.processing(), &ProcessingState::Idle);

    let ticket = session.begin_processing().unwrap();
    assert!(session.finish_processing(ticket.generation, Ok(receipt("report-compressed.pdf"))));
    assert_eq!(session.wizard().current_id(), tool_steps::DOWNLOAD);
}

#[test]
fn test_failure_keeps_step_and_data() {
    let mut session = session_at_process();
    let data_before = session.wizard().data().clone();
    let ticket = session.begin_processing().unwrap();

    assert!(session.finish_processing(
        ticket.generation,
        Err(StudioError::processing("backend unavailable"))
    ));
    assert_eq!(
        session.processing(),
        &ProcessingState::Failed {
            message: "backend unavailable".to_string()
        }
    );
    assert_eq!(session.processing().progress(), 0);
    assert_eq!(session.wizard().current_id(), tool_steps::PROCESS);
    assert_eq!(session.wizard().data(), &data_before);

    // Retry is allowed
    assert!(session.begin_processing().is_some());
}

#[tokio::test]
async fn test_ticket_cancelled_when_session_dropped() {
    let mut session = session_at_process();
    let mut ticket = session.begin_processing().unwrap();
    drop(session);
    ticket.cancelled().await;
}

#[tokio::test]
async fn test_driver_completes() {
    let session: SharedSession = Arc::new(Mutex::new(session_at_process()));
    let backend = Arc::new(SimulatedBackend::new());
    let mut progress = FixedProgress(30);

    let report = run_processing(&session, backend, &InstantClock, &mut progress, Duration::ZERO)
        .await
        .unwrap();

    assert!(matches!(
        report,
        ProcessingReport::Completed { ref output } if output.name == "report-compressed.pdf"
    ));
    let session = session.lock().await;
    assert_eq!(session.wizard().current_id(), tool_steps::DOWNLOAD);
}

#[tokio::test]
async fn test_driver_reports_failure() {
    let session: SharedSession = Arc::new(Mutex::new(session_at_process()));
    let backend = Arc::new(SimulatedBackend::failing("quota exceeded"));
    let mut progress = FixedProgress(50);

    let report = run_processing(&session, backend, &InstantClock, &mut progress, Duration::ZERO)
        .await
        .unwrap();

    assert_eq!(
        report,
        ProcessingReport::Failed {
            message: "quota exceeded".to_string()
        }
    );
    assert_eq!(session.lock().await.wizard().current_id(), tool_steps::PROCESS);
}

#[tokio::test]
async fn test_driver_not_started_off_step() {
    let session: SharedSession = Arc::new(Mutex::new(
        WizardSession::for_tool(SessionId(1), tool("compress")).unwrap(),
    ));
    let report = run_processing(
        &session,
        Arc::new(SimulatedBackend::new()),
        &InstantClock,
        &mut FixedProgress(50),
        Duration::ZERO,
    )
    .await
    .unwrap();
    assert_eq!(report, ProcessingReport::NotStarted);
}

#[tokio::test]
async fn test_driver_cancelled_by_reset() {
    let session: SharedSession = Arc::new(Mutex::new(session_at_process()));
    let running = Arc::clone(&session);
    let handle = tokio::spawn(async move {
        run_processing(
            &running,
            Arc::new(SimulatedBackend::new()),
            &NeverClock,
            &mut FixedProgress(10),
            Duration::from_secs(1),
        )
        .await
    });

    while !session.lock().await.processing().is_running() {
        tokio::task::yield_now().await;
    }
    session.lock().await.reset();

    let report = handle.await.unwrap().unwrap();
    assert_eq!(report, ProcessingReport::Cancelled);
    let session = session.lock().await;
    assert_eq!(session.processing(), &ProcessingState::Idle);
    assert_eq!(session.generation(), 1);
}
