//! Behaviour shared by every catalog implementation.

mod common;

use common::{sample_draft, sample_file};
use quill_core::{
    catalog::{default_tools, sqlite::Database, CatalogRepository, MemoryCatalog, SqliteCatalog},
    models::{EnvelopeStatus, NewProcessingRecord, RecipientRole, ToolCategory, ToolFilter},
    StudioError,
};
use tempfile::TempDir;

fn with_each_catalog(check: impl Fn(&dyn CatalogRepository)) {
    let memory = MemoryCatalog::new();
    check(&memory);

    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let sqlite = SqliteCatalog::open(temp_dir.path().join("catalog.db"))
        .expect("Failed to open catalog");
    check(&sqlite);
}

#[test]
fn test_tool_listing_and_filters() {
    with_each_catalog(|catalog| {
        let all = catalog.list_tools(&ToolFilter::default()).unwrap();
        let ids: Vec<&str> = all.iter().map(|t| t.id.as_str()).collect();
        let expected: Vec<String> = default_tools().into_iter().map(|t| t.id).collect();
        assert_eq!(ids, expected);

        let security = catalog
            .list_tools(&ToolFilter {
                category: Some(ToolCategory::Security),
                ..ToolFilter::default()
            })
            .unwrap();
        assert_eq!(security.len(), 2);
        assert!(security.iter().all(|t| t.category == ToolCategory::Security));

        let search = catalog
            .list_tools(&ToolFilter {
                search: Some(" PASSWORD ".to_string()),
                ..ToolFilter::default()
            })
            .unwrap();
        let ids: Vec<&str> = search.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["protect", "unlock"]);

        let merge = catalog.get_tool("merge").unwrap().unwrap();
        assert!(merge.multi_file);
        assert!(catalog.get_tool("shred").unwrap().is_none());
    });
}

#[test]
fn test_favorites() {
    with_each_catalog(|catalog| {
        assert!(catalog.list_tools(&ToolFilter::favorites()).unwrap().is_empty());

        let tool = catalog.set_favorite("ocr", true).unwrap();
        assert!(tool.favorite);
        catalog.set_favorite("merge", true).unwrap();

        let favorites = catalog.list_tools(&ToolFilter::favorites()).unwrap();
        let ids: Vec<&str> = favorites.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["merge", "ocr"]);

        catalog.set_favorite("ocr", false).unwrap();
        assert_eq!(catalog.list_tools(&ToolFilter::favorites()).unwrap().len(), 1);

        let err = catalog.set_favorite("shred", true).unwrap_err();
        assert!(matches!(err, StudioError::ToolNotFound { ref id } if id == "shred"));
    });
}

#[test]
fn test_envelope_lifecycle() {
    with_each_catalog(|catalog| {
        let first = catalog
            .create_envelope(&sample_draft("Lease", EnvelopeStatus::Sent))
            .unwrap();
        let second = catalog
            .create_envelope(&sample_draft("NDA", EnvelopeStatus::Draft))
            .unwrap();
        assert!(second.id > first.id);

        let loaded = catalog.get_envelope(first.id).unwrap().unwrap();
        assert_eq!(loaded.subject, "Lease");
        assert_eq!(loaded.documents.len(), 2);
        assert_eq!(loaded.documents[1].name, "annex.pdf");
        assert_eq!(loaded.recipients[0].name, "Jane");
        assert_eq!(loaded.recipients[0].role, RecipientRole::Signer);
        assert_eq!(loaded.access_code.as_deref(), Some("4711"));
        assert_eq!(loaded.expires_in_days, 14);
        assert!(!loaded.reminders);

        let listed = catalog.list_envelopes(None).unwrap();
        let subjects: Vec<&str> = listed.iter().map(|e| e.subject.as_str()).collect();
        assert_eq!(subjects, vec!["NDA", "Lease"]);

        let drafts = catalog.list_envelopes(Some(EnvelopeStatus::Draft)).unwrap();
        assert_eq!(drafts.len(), 1);
        assert_eq!(drafts[0].id, second.id);

        let completed = catalog
            .update_envelope_status(first.id, EnvelopeStatus::Completed)
            .unwrap();
        assert_eq!(completed.status, EnvelopeStatus::Completed);

        let err = catalog
            .update_envelope_status(first.id, EnvelopeStatus::Sent)
            .unwrap_err();
        assert!(matches!(err, StudioError::InvalidInput { ref field, .. } if field == "status"));

        let err = catalog
            .update_envelope_status(999, EnvelopeStatus::Voided)
            .unwrap_err();
        assert!(matches!(err, StudioError::EnvelopeNotFound { id: 999 }));

        catalog
            .update_envelope_status(second.id, EnvelopeStatus::Voided)
            .unwrap();
        let stats = catalog.envelope_stats().unwrap();
        assert_eq!(stats.completed, 1);
        assert_eq!(stats.voided, 1);
        assert_eq!(stats.total(), 2);
        assert_eq!(stats.completion_rate(), Some(100));
    });
}

#[test]
fn test_incomplete_envelopes_rejected() {
    with_each_catalog(|catalog| {
        let mut draft = sample_draft("   ", EnvelopeStatus::Sent);
        assert!(catalog.create_envelope(&draft).is_err());

        draft.subject = "Lease".to_string();
        draft.recipients[1].email = String::new();
        assert!(catalog.create_envelope(&draft).is_err());

        assert!(catalog.list_envelopes(None).unwrap().is_empty());
    });
}

#[test]
fn test_processing_history() {
    with_each_catalog(|catalog| {
        for index in 0..3 {
            catalog
                .record_processing(&NewProcessingRecord {
                    tool_id: "compress".to_string(),
                    input_files: vec![format!("file-{index}.pdf")],
                    output: (index != 1).then(|| sample_file(&format!("out-{index}.pdf"))),
                    succeeded: index != 1,
                    message: (index == 1).then(|| "quota exceeded".to_string()),
                })
                .unwrap();
        }

        let recent = catalog.recent_processing(2).unwrap();
        assert_eq!(recent.len(), 2);
        assert_eq!(recent[0].input_files, vec!["file-2.pdf"]);
        assert_eq!(recent[0].output.as_ref().map(|o| o.name.as_str()), Some("out-2.pdf"));
        assert!(!recent[1].succeeded);
        assert_eq!(recent[1].message.as_deref(), Some("quota exceeded"));
        assert!(recent[1].output.is_none());
    });
}

#[test]
fn test_sqlite_persists_between_connections() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("catalog.db");

    {
        let catalog = SqliteCatalog::open(&path).unwrap();
        catalog.set_favorite("split", true).unwrap();
        catalog
            .create_envelope(&sample_draft("Lease", EnvelopeStatus::Sent))
            .unwrap();
    }

    // Reopening re-runs the seed, which must not reset favorites
    let catalog = SqliteCatalog::open(&path).unwrap();
    assert!(catalog.get_tool("split").unwrap().unwrap().favorite);
    assert_eq!(catalog.list_envelopes(None).unwrap().len(), 1);
    assert_eq!(catalog.path(), path.as_path());
}

#[test]
fn test_sqlite_status_update_loses_to_concurrent_writer() {
    let temp_dir = TempDir::new().expect("Failed to create temp dir");
    let path = temp_dir.path().join("catalog.db");
    let catalog = SqliteCatalog::open(&path).unwrap();
    let envelope = catalog
        .create_envelope(&sample_draft("Lease", EnvelopeStatus::Sent))
        .unwrap();

    // Both writers saw `sent`; the first one wins
    let first = Database::new(&path).unwrap();
    let second = Database::new(&path).unwrap();
    assert!(first
        .replace_status(
            envelope.id,
            EnvelopeStatus::Sent,
            EnvelopeStatus::Completed,
            jiff::Timestamp::now()
        )
        .unwrap());
    assert!(!second
        .replace_status(
            envelope.id,
            EnvelopeStatus::Sent,
            EnvelopeStatus::Voided,
            jiff::Timestamp::now()
        )
        .unwrap());

    let stored = catalog.get_envelope(envelope.id).unwrap().unwrap();
    assert_eq!(stored.status, EnvelopeStatus::Completed);
    assert!(matches!(
        catalog.update_envelope_status(envelope.id, EnvelopeStatus::Voided),
        Err(StudioError::InvalidInput { .. })
    ));
}
