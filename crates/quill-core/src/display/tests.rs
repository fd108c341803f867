//! Tests for markdown formatting.

use std::sync::Arc;

use jiff::Timestamp;

use super::*;
use crate::{
    catalog::default_tools,
    models::{Envelope, EnvelopeStats, EnvelopeStatus, FileHandle, ProcessingRecord, Recipient, StepId},
    wizard::{envelope_flow, Outcome, Rejection, Wizard, WizardEvent},
};

fn envelope() -> Envelope {
    Envelope {
        id: 7,
        subject: "Lease agreement".to_string(),
        message: Some("Please sign by Friday".to_string()),
        documents: vec![FileHandle::new("lease.pdf", 2048, "uploads/lease.pdf")],
        recipients: vec![
            Recipient::signer("Jane", "jane@example.com"),
            Recipient::signer("Omar", "omar@example.com"),
        ],
        status: EnvelopeStatus::Sent,
        access_code: None,
        expires_in_days: 30,
        reminders: true,
        created_at: Timestamp::now(),
        updated_at: Timestamp::now(),
    }
}

#[test]
fn test_tool_display() {
    let mut tool = default_tools()
        .into_iter()
        .find(|t| t.id == "watermark")
        .unwrap();
    tool.favorite = true;

    let output = tool.to_string();
    assert!(output.starts_with("# Add Watermark (`watermark`)"));
    assert!(output.contains("- Favorite: ★ yes"));
    assert!(output.contains("- Required settings: watermark_text"));

    let list = Tools(vec![tool]).to_string();
    assert!(list.starts_with("- ★ **Add Watermark**"));
}

#[test]
fn test_envelope_display() {
    let output = envelope().to_string();
    assert!(output.starts_with("# 7. Lease agreement"));
    assert!(output.contains("- Status: ➤ Sent"));
    assert!(output.contains("- lease.pdf (2.0 KiB)"));
    assert!(output.contains("2. Omar <omar@example.com> (signer)"));

    let list = Envelopes(vec![envelope()]).to_string();
    assert!(list.contains("## Lease agreement (ID: 7)"));
    assert!(list.contains("**Recipients**: 2"));
    assert_eq!(Envelopes(vec![]).to_string(), "No envelopes found.\n");

    let sent = SentEnvelope(envelope()).to_string();
    assert!(sent.starts_with("Sent envelope with ID: 7 to 2 recipient(s)"));
}

#[test]
fn test_stats_display() {
    let mut stats = EnvelopeStats::default();
    stats.add(EnvelopeStatus::Sent, 1);
    stats.add(EnvelopeStatus::Completed, 3);

    let output = stats.to_string();
    assert!(output.contains("- ✓ Completed: 3"));
    assert!(output.contains("Total: 4"));
    assert!(output.contains("Completion rate: 75%"));
}

#[test]
fn test_history_display() {
    let record = ProcessingRecord {
        id: 1,
        tool_id: "compress".to_string(),
        input_files: vec!["a.pdf".to_string()],
        output: Some(FileHandle::new("a-compressed.pdf", 10, "processed/a-compressed.pdf")),
        succeeded: true,
        message: None,
        created_at: Timestamp::now(),
    };
    let failed = ProcessingRecord {
        id: 2,
        output: None,
        succeeded: false,
        message: Some("quota exceeded".to_string()),
        ..record.clone()
    };

    let output = ProcessingHistory(vec![failed, record]).to_string();
    assert!(output.contains("- ✗ **compress**: a.pdf: quota exceeded"));
    assert!(output.contains("- ✓ **compress**: a.pdf → a-compressed.pdf"));
    assert_eq!(
        ProcessingHistory(vec![]).to_string(),
        "No processing history yet.\n"
    );
}

#[test]
fn test_wizard_snapshot_display() {
    let mut wizard = Wizard::new(Arc::new(envelope_flow().unwrap()));
    wizard.dispatch(WizardEvent::AddFile {
        file: FileHandle::new("nda.pdf", 100, "uploads/nda.pdf"),
    });
    wizard.dispatch(WizardEvent::Next);

    let output = wizard.snapshot().to_string();
    assert!(output.starts_with("# New envelope (step 2 of 6)"));
    assert!(output.contains("1. ✓ Documents"));
    assert!(output.contains("2. ➤ Recipients (needs: every entry in 'recipients' needs a name and an email)"));
    assert!(output.contains("- files: nda.pdf (100 B)"));
}

#[test]
fn test_outcome_display() {
    let moved = Outcome::Moved {
        from: StepId::from("upload"),
        to: StepId::from("settings"),
    };
    assert_eq!(moved.to_string(), "Moved from 'upload' to 'settings'");

    let rejected = Outcome::Rejected(Rejection::Unreachable {
        target: StepId::from("review"),
        blocked_by: StepId::from("recipients"),
    });
    assert_eq!(
        rejected.to_string(),
        "Rejected: cannot jump to 'review': 'recipients' is not complete"
    );
}

#[test]
fn test_update_results() {
    let mut tool = default_tools().remove(0);
    tool.favorite = true;
    let output = UpdateResult::favorite(tool).to_string();
    assert!(output.starts_with("Changes made:\n- Added 'merge' to favorites"));

    let output = UpdateResult::status(envelope()).to_string();
    assert!(output.contains("- Status changed to ➤ Sent"));
}
