//! Tests for the wizard controller.

use std::sync::Arc;

use super::*;
use crate::models::{FieldValue, FileHandle, PdfTool, Recipient, StepId, ToolCategory};
use super::flows::{envelope_steps, tool_steps, OUTPUT_KEY, SUBJECT_KEY};

fn compress_tool() -> PdfTool {
    PdfTool {
        id: "compress".to_string(),
        name: "Compress PDF".to_string(),
        description: "Reduce file size".to_string(),
        category: ToolCategory::Optimize,
        favorite: false,
        premium: false,
        required_settings: vec![],
        output_suffix: "compressed".to_string(),
        multi_file: false,
    }
}

fn tool_wizard() -> Wizard {
    let definition = pdf_tool_flow(&compress_tool()).expect("valid flow");
    Wizard::new(Arc::new(definition))
}

fn envelope_wizard() -> Wizard {
    Wizard::new(Arc::new(envelope_flow().expect("valid flow")))
}

fn file(name: &str) -> FileHandle {
    FileHandle::new(name, 1024, format!("uploads/{name}"))
}

fn add_file(wizard: &mut Wizard, name: &str) -> Outcome {
    wizard.dispatch(WizardEvent::AddFile { file: file(name) })
}

#[test]
fn test_upload_guard_blocks_empty_files() {
    let mut wizard = tool_wizard();
    wizard.dispatch(WizardEvent::Set {
        key: "files".to_string(),
        value: FieldValue::Files(vec![]),
    });

    let outcome = wizard.dispatch(WizardEvent::Next);
    assert!(matches!(
        outcome,
        Outcome::Rejected(Rejection::GuardRejected { ref step, .. }) if step == tool_steps::UPLOAD
    ));
    assert_eq!(wizard.current_id(), tool_steps::UPLOAD);

    add_file(&mut wizard, "a.pdf");
    let outcome = wizard.dispatch(WizardEvent::Next);
    assert_eq!(
        outcome,
        Outcome::Moved {
            from: StepId::from(tool_steps::UPLOAD),
            to: StepId::from(tool_steps::SETTINGS),
        }
    );
}

#[test]
fn test_recipients_guard_requires_name_and_email() {
    let mut wizard = envelope_wizard();
    add_file(&mut wizard, "contract.pdf");
    assert!(wizard.dispatch(WizardEvent::Next).is_moved());
    assert_eq!(wizard.current_id(), envelope_steps::RECIPIENTS);

    // No recipients at all
    assert!(wizard.dispatch(WizardEvent::Next).is_rejected());

    wizard.dispatch(WizardEvent::AddRecipient {
        recipient: Recipient::signer("", "a@b.com"),
    });
    assert!(wizard.dispatch(WizardEvent::Next).is_rejected());
    assert_eq!(wizard.current_id(), envelope_steps::RECIPIENTS);

    wizard.dispatch(WizardEvent::UpdateRecipient {
        index: 0,
        name: Some("Jane".to_string()),
        email: None,
        role: None,
    });
    assert!(wizard.dispatch(WizardEvent::Next).is_moved());
    assert_eq!(wizard.current_id(), envelope_steps::FIELDS);
}

#[test]
fn test_reset_from_terminal_step() {
    let mut wizard = tool_wizard();
    add_file(&mut wizard, "a.pdf");
    wizard.dispatch(WizardEvent::Next);
    wizard.dispatch(WizardEvent::Next);
    wizard
        .data_mut()
        .set(OUTPUT_KEY, vec![file("a-compressed.pdf")]);
    wizard.dispatch(WizardEvent::Next);
    assert_eq!(wizard.current_id(), tool_steps::DOWNLOAD);
    assert!(wizard.is_terminal());

    assert_eq!(wizard.dispatch(WizardEvent::Reset), Outcome::Reset);
    assert_eq!(wizard.current_id(), tool_steps::UPLOAD);
    assert!(wizard.data().files().is_empty());
    assert!(wizard.data().is_empty());
    assert!((0..4).all(|i| !wizard.is_completed(i)));
}

#[test]
fn test_guard_monotonicity() {
    let definition = envelope_flow().unwrap();
    let mut data = WizardData::new();
    data.push_file(file("a.pdf"));
    data.add_recipient(Recipient::signer("Jane", "jane@example.com"));
    data.set(SUBJECT_KEY, "Please sign");

    let passing: Vec<bool> = definition
        .steps()
        .iter()
        .map(|s| definition.can_leave(s.id.as_str(), &data))
        .collect();
    assert!(passing.iter().all(|p| *p));

    for (key, value) in [
        ("quality", FieldValue::Text("low".to_string())),
        ("pages", FieldValue::Number(4.0)),
        ("empty_list", FieldValue::List(vec![])),
        ("blank", FieldValue::Text("   ".to_string())),
    ] {
        data.set(key, value);
        for step in definition.steps() {
            assert!(
                definition.can_leave(step.id.as_str(), &data),
                "unrelated key '{key}' flipped guard of '{}'",
                step.id
            );
        }
    }
}

#[test]
fn test_no_skip_with_repeated_next() {
    let mut wizard = envelope_wizard();

    // Nothing entered: stuck on the first step no matter how often we push
    for _ in 0..10 {
        wizard.dispatch(WizardEvent::Next);
    }
    assert_eq!(wizard.current_index(), 0);

    add_file(&mut wizard, "a.pdf");
    for _ in 0..10 {
        wizard.dispatch(WizardEvent::Next);
    }
    // Recipients guard stops progress
    assert_eq!(wizard.current_id(), envelope_steps::RECIPIENTS);

    wizard.dispatch(WizardEvent::AddRecipient {
        recipient: Recipient::signer("Jane", "jane@example.com"),
    });
    for _ in 0..10 {
        wizard.dispatch(WizardEvent::Next);
    }
    // Settings guard (subject) stops progress
    assert_eq!(wizard.current_id(), envelope_steps::SETTINGS);
    assert!(wizard.is_completed(0));
    assert!(wizard.is_completed(1));
    assert!(!wizard.is_completed(4));
}

#[test]
fn test_backward_freedom() {
    let mut wizard = envelope_wizard();
    add_file(&mut wizard, "a.pdf");
    wizard.dispatch(WizardEvent::Next);

    // Remove the file: the documents guard is now unsatisfied
    wizard.dispatch(WizardEvent::RemoveFile {
        name: "a.pdf".to_string(),
    });
    let outcome = wizard.dispatch(WizardEvent::Previous);
    assert_eq!(
        outcome,
        Outcome::Moved {
            from: StepId::from(envelope_steps::RECIPIENTS),
            to: StepId::from(envelope_steps::DOCUMENTS),
        }
    );
}

#[test]
fn test_idempotent_boundaries() {
    let mut wizard = tool_wizard();
    let before = wizard.snapshot();
    let outcome = wizard.dispatch(WizardEvent::Previous);
    assert!(matches!(
        outcome,
        Outcome::Rejected(Rejection::AtBoundary { .. })
    ));
    assert_eq!(wizard.current_index(), before.position - 1);
    assert_eq!(wizard.data(), &before.data);

    add_file(&mut wizard, "a.pdf");
    wizard.data_mut().set(OUTPUT_KEY, vec![file("out.pdf")]);
    for _ in 0..3 {
        assert!(wizard.dispatch(WizardEvent::Next).is_moved());
    }
    let data_before = wizard.data().clone();
    let outcome = wizard.dispatch(WizardEvent::Next);
    assert!(matches!(
        outcome,
        Outcome::Rejected(Rejection::AtBoundary { ref step }) if step == tool_steps::DOWNLOAD
    ));
    assert_eq!(wizard.current_id(), tool_steps::DOWNLOAD);
    assert_eq!(wizard.data(), &data_before);
}

#[test]
fn test_data_preserved_across_round_trip() {
    let mut wizard = tool_wizard();
    add_file(&mut wizard, "a.pdf");
    wizard.dispatch(WizardEvent::Set {
        key: "quality".to_string(),
        value: FieldValue::Text("high".to_string()),
    });
    let data_before = wizard.data().clone();

    assert!(wizard.dispatch(WizardEvent::Next).is_moved());
    assert!(wizard.dispatch(WizardEvent::Previous).is_moved());

    assert_eq!(wizard.current_id(), tool_steps::UPLOAD);
    assert_eq!(wizard.data(), &data_before);
}

#[test]
fn test_go_to_rules() {
    let mut wizard = envelope_wizard();

    let outcome = wizard.dispatch(WizardEvent::GoTo {
        step: StepId::from("nowhere"),
    });
    assert_eq!(
        outcome,
        Outcome::Rejected(Rejection::InvalidTarget {
            target: "nowhere".to_string()
        })
    );

    add_file(&mut wizard, "a.pdf");
    let outcome = wizard.dispatch(WizardEvent::GoTo {
        step: StepId::from(envelope_steps::SECURITY),
    });
    assert_eq!(
        outcome,
        Outcome::Rejected(Rejection::Unreachable {
            target: StepId::from(envelope_steps::SECURITY),
            blocked_by: StepId::from(envelope_steps::RECIPIENTS),
        })
    );
    assert_eq!(wizard.current_index(), 0);

    wizard.dispatch(WizardEvent::AddRecipient {
        recipient: Recipient::signer("Jane", "jane@example.com"),
    });
    assert!(wizard.can_reach(envelope_steps::SECURITY));
    assert!(wizard
        .dispatch(WizardEvent::GoTo {
            step: StepId::from(envelope_steps::SECURITY),
        })
        .is_moved());
    assert!(wizard.is_completed(0) && wizard.is_completed(1) && wizard.is_completed(2));

    // Review needs the settings guard (subject) as well
    assert!(!wizard.can_reach(envelope_steps::REVIEW));

    // Revisiting earlier steps is always allowed, even with broken guards
    wizard.dispatch(WizardEvent::RemoveRecipient { index: 0 });
    assert!(wizard
        .dispatch(WizardEvent::GoTo {
            step: StepId::from(envelope_steps::DOCUMENTS),
        })
        .is_moved());

    let outcome = wizard.dispatch(WizardEvent::GoTo {
        step: StepId::from(envelope_steps::DOCUMENTS),
    });
    assert!(matches!(outcome, Outcome::Stayed { .. }));
}

#[test]
fn test_missing_entries_are_rejected() {
    let mut wizard = envelope_wizard();
    assert_eq!(
        wizard.dispatch(WizardEvent::Remove {
            key: "subject".to_string()
        }),
        Outcome::Rejected(Rejection::NoSuchEntry {
            key: "subject".to_string()
        })
    );
    assert!(wizard
        .dispatch(WizardEvent::RemoveFile {
            name: "ghost.pdf".to_string()
        })
        .is_rejected());
    assert!(wizard
        .dispatch(WizardEvent::UpdateRecipient {
            index: 3,
            name: None,
            email: None,
            role: None,
        })
        .is_rejected());
    assert!(wizard.data().is_empty());
}

#[test]
fn test_multi_file_tool_needs_two_files() {
    let mut tool = compress_tool();
    tool.multi_file = true;
    let mut wizard = Wizard::new(Arc::new(pdf_tool_flow(&tool).unwrap()));

    add_file(&mut wizard, "a.pdf");
    assert!(!wizard.can_go_next());
    add_file(&mut wizard, "b.pdf");
    assert!(wizard.can_go_next());
}

#[test]
fn test_required_settings_guard() {
    let mut tool = compress_tool();
    tool.required_settings = vec!["watermark_text".to_string()];
    let mut wizard = Wizard::new(Arc::new(pdf_tool_flow(&tool).unwrap()));

    add_file(&mut wizard, "a.pdf");
    wizard.dispatch(WizardEvent::Next);
    wizard.dispatch(WizardEvent::Set {
        key: "watermark_text".to_string(),
        value: FieldValue::Text("  ".to_string()),
    });
    assert!(wizard.dispatch(WizardEvent::Next).is_rejected());

    wizard.dispatch(WizardEvent::Set {
        key: "watermark_text".to_string(),
        value: FieldValue::Text("DRAFT".to_string()),
    });
    assert!(wizard.dispatch(WizardEvent::Next).is_moved());
    assert_eq!(wizard.current_id(), tool_steps::PROCESS);
}

#[test]
fn test_required_settings_accept_numbers_and_lists() {
    let mut tool = compress_tool();
    tool.required_settings = vec!["angle".to_string(), "pages".to_string()];
    let mut wizard = Wizard::new(Arc::new(pdf_tool_flow(&tool).unwrap()));

    add_file(&mut wizard, "a.pdf");
    wizard.dispatch(WizardEvent::Next);
    wizard.dispatch(WizardEvent::Set {
        key: "angle".to_string(),
        value: FieldValue::Number(90.0),
    });
    let outcome = wizard.dispatch(WizardEvent::Next);
    assert!(matches!(
        outcome,
        Outcome::Rejected(Rejection::GuardRejected { ref reason, .. }) if reason.contains("'pages'")
    ));

    wizard.dispatch(WizardEvent::Set {
        key: "pages".to_string(),
        value: FieldValue::parse_literal("1,3"),
    });
    assert!(wizard.dispatch(WizardEvent::Next).is_moved());
    assert_eq!(wizard.current_id(), tool_steps::PROCESS);
}

#[test]
fn test_output_key_is_closed_to_events() {
    let mut wizard = tool_wizard();
    add_file(&mut wizard, "a.pdf");

    let outcome = wizard.dispatch(WizardEvent::Set {
        key: OUTPUT_KEY.to_string(),
        value: FieldValue::Files(vec![file("forged.pdf")]),
    });
    assert_eq!(
        outcome,
        Outcome::Rejected(Rejection::ReservedKey {
            key: OUTPUT_KEY.to_string()
        })
    );
    assert!(!wizard.data().contains(OUTPUT_KEY));

    let outcome = wizard.dispatch(WizardEvent::GoTo {
        step: StepId::from(tool_steps::DOWNLOAD),
    });
    assert_eq!(
        outcome,
        Outcome::Rejected(Rejection::Unreachable {
            target: StepId::from(tool_steps::DOWNLOAD),
            blocked_by: StepId::from(tool_steps::PROCESS),
        })
    );

    wizard.data_mut().set(OUTPUT_KEY, vec![file("a-compressed.pdf")]);
    assert!(wizard
        .dispatch(WizardEvent::Remove {
            key: OUTPUT_KEY.to_string()
        })
        .is_rejected());
    assert!(wizard.data().contains(OUTPUT_KEY));

    // Other flows leave the key open
    let mut envelope = envelope_wizard();
    assert!(!envelope
        .dispatch(WizardEvent::Set {
            key: OUTPUT_KEY.to_string(),
            value: FieldValue::Text("anything".to_string()),
        })
        .is_rejected());
}

#[test]
fn test_definition_validation() {
    assert!(WizardDefinition::builder("empty").build().is_err());

    let duplicate = WizardDefinition::builder("dup")
        .step("a", "A")
        .step("a", "Again")
        .build();
    assert!(duplicate.is_err());

    let blank = WizardDefinition::builder("blank").step(" ", "Blank").build();
    assert!(blank.is_err());

    let bad_processing = WizardDefinition::builder("proc")
        .step("a", "A")
        .processing_step("b")
        .build();
    assert!(bad_processing.is_err());

    let single = WizardDefinition::builder("single").step("only", "Only").build().unwrap();
    let mut wizard = Wizard::new(Arc::new(single));
    assert!(wizard.is_terminal());
    assert!(wizard.dispatch(WizardEvent::Next).is_rejected());
    assert!(wizard.dispatch(WizardEvent::Previous).is_rejected());
}

#[test]
fn test_snapshot_reports_guards() {
    let mut wizard = tool_wizard();
    add_file(&mut wizard, "a.pdf");
    let snapshot = wizard.snapshot();

    assert_eq!(snapshot.position, 1);
    assert_eq!(snapshot.total, 4);
    assert!(snapshot.steps[0].current);
    assert!(snapshot.steps[0].satisfied);
    assert!(snapshot.steps[0].requirement.is_some());
    assert!(snapshot.steps[1].requirement.is_none());
    assert!(!snapshot.steps[2].satisfied);

    let json = serde_json::to_value(&snapshot).unwrap();
    assert_eq!(json["current"], "upload");
    assert_eq!(json["data"]["files"]["type"], "files");
}

#[test]
fn test_event_script_deserialization() {
    let script = r#"
        {"event":"add_file","file":{"name":"a.pdf","size":10}}
        {"event":"set","key":"quality","value":{"type":"text","value":"high"}}
        {"event":"next"}
        {"event":"update_recipient","index":0,"name":"Jane"}
    "#;
    let events: Vec<WizardEvent> = script
        .lines()
        .map(str::trim)
        .filter(|l| !l.is_empty())
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();

    assert_eq!(events.len(), 4);
    assert_eq!(events[2], WizardEvent::Next);
    assert_eq!(
        events[3],
        WizardEvent::UpdateRecipient {
            index: 0,
            name: Some("Jane".to_string()),
            email: None,
            role: None,
        }
    );
}

#[test]
fn test_outcome_serialization() {
    let outcome = Outcome::Rejected(Rejection::GuardRejected {
        step: StepId::from("upload"),
        reason: "'files' must not be empty".to_string(),
    });
    let json = serde_json::to_value(&outcome).unwrap();
    assert_eq!(json["outcome"], "rejected");
    assert_eq!(json["detail"]["kind"], "guard_rejected");
    assert_eq!(json["detail"]["step"], "upload");
}
