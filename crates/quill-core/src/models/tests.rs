#[cfg(test)]
mod model_tests {
    use std::io::Write;

    use crate::models::{
        EnvelopeStats, EnvelopeStatus, FieldValue, FileHandle, PdfTool, Recipient, RecipientRole,
        ToolCategory, ToolFilter,
    };

    fn create_test_tool(favorite: bool) -> PdfTool {
        PdfTool {
            id: "watermark".to_string(),
            name: "Add Watermark".to_string(),
            description: "Stamp text over every page".to_string(),
            category: ToolCategory::Edit,
            favorite,
            premium: false,
            required_settings: vec!["watermark_text".to_string()],
            output_suffix: "watermarked".to_string(),
            multi_file: false,
        }
    }

    #[test]
    fn test_field_value_is_filled() {
        assert!(FieldValue::Text("hello".to_string()).is_filled());
        assert!(!FieldValue::Text("   \t".to_string()).is_filled());
        assert!(!FieldValue::Text(String::new()).is_filled());
        assert!(FieldValue::Number(0.0).is_filled());
        assert!(FieldValue::Flag(false).is_filled());
        assert!(!FieldValue::List(vec![]).is_filled());
        assert!(!FieldValue::Files(vec![]).is_filled());
        assert!(!FieldValue::Recipients(vec![]).is_filled());
        assert!(FieldValue::Files(vec![FileHandle::new("a.pdf", 1, "a")]).is_filled());
    }

    #[test]
    fn test_field_value_parse_literal() {
        assert_eq!(FieldValue::parse_literal("true"), FieldValue::Flag(true));
        assert_eq!(FieldValue::parse_literal("42"), FieldValue::Number(42.0));
        assert_eq!(
            FieldValue::parse_literal("1-3, 5"),
            FieldValue::List(vec!["1-3".to_string(), "5".to_string()])
        );
        assert_eq!(
            FieldValue::parse_literal("CONFIDENTIAL"),
            FieldValue::Text("CONFIDENTIAL".to_string())
        );
        // Not finite, stays text
        assert_eq!(
            FieldValue::parse_literal("NaN"),
            FieldValue::Text("NaN".to_string())
        );
    }

    #[test]
    fn test_field_value_serde_shape() {
        let value = FieldValue::Text("high".to_string());
        let json = serde_json::to_string(&value).unwrap();
        assert_eq!(json, r#"{"type":"text","value":"high"}"#);

        let parsed: FieldValue =
            serde_json::from_str(r#"{"type":"files","value":[{"name":"a.pdf"}]}"#).unwrap();
        assert_eq!(parsed, FieldValue::Files(vec![FileHandle::new("a.pdf", 0, "")]));
    }

    #[test]
    fn test_recipient_completeness() {
        assert!(Recipient::signer("Jane", "jane@example.com").is_complete());
        assert!(!Recipient::signer("", "a@b.com").is_complete());
        assert!(!Recipient::signer("Jane", "  ").is_complete());

        let parsed: Recipient =
            serde_json::from_str(r#"{"name":"Bob","email":"bob@example.com"}"#).unwrap();
        assert_eq!(parsed.role, RecipientRole::Signer);
    }

    #[test]
    fn test_file_handle_stem() {
        assert_eq!(FileHandle::new("report.final.pdf", 0, "").stem(), "report.final");
        assert_eq!(FileHandle::new("README", 0, "").stem(), "README");
        assert_eq!(FileHandle::new(".hidden", 0, "").stem(), ".hidden");
    }

    #[test]
    fn test_file_handle_from_path() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"%PDF-1.7 test").unwrap();

        let handle = FileHandle::from_path(file.path()).unwrap();
        assert_eq!(handle.size, 13);
        assert_eq!(handle.location, file.path().display().to_string());

        let dir = tempfile::TempDir::new().unwrap();
        assert!(FileHandle::from_path(dir.path()).is_err());
        assert!(FileHandle::from_path(&dir.path().join("missing.pdf")).is_err());
    }

    #[test]
    fn test_status_parsing() {
        assert_eq!("Sent".parse::<EnvelopeStatus>(), Ok(EnvelopeStatus::Sent));
        assert_eq!("cc".parse::<RecipientRole>(), Ok(RecipientRole::Viewer));
        assert_eq!("EDIT".parse::<ToolCategory>(), Ok(ToolCategory::Edit));
        assert!("shipped".parse::<EnvelopeStatus>().is_err());
    }

    #[test]
    fn test_envelope_status_transitions() {
        use EnvelopeStatus::*;
        assert!(Draft.can_transition_to(Sent));
        assert!(Draft.can_transition_to(Voided));
        assert!(Sent.can_transition_to(Completed));
        assert!(Sent.can_transition_to(Declined));
        assert!(!Completed.can_transition_to(Voided));
        assert!(!Voided.can_transition_to(Sent));
        assert!(!Draft.can_transition_to(Completed));
    }

    #[test]
    fn test_envelope_stats() {
        let mut stats = EnvelopeStats::default();
        assert_eq!(stats.completion_rate(), None);

        stats.add(EnvelopeStatus::Sent, 2);
        stats.add(EnvelopeStatus::Completed, 1);
        stats.add(EnvelopeStatus::Declined, 1);
        stats.add(EnvelopeStatus::Draft, 3);

        assert_eq!(stats.total(), 7);
        assert_eq!(stats.get(EnvelopeStatus::Draft), 3);
        assert_eq!(stats.completion_rate(), Some(25));
    }

    #[test]
    fn test_tool_filter() {
        let tool = create_test_tool(false);

        assert!(ToolFilter::default().accepts(&tool));
        assert!(!ToolFilter::favorites().accepts(&tool));
        assert!(ToolFilter::favorites().accepts(&create_test_tool(true)));

        let by_category = ToolFilter {
            category: Some(ToolCategory::Security),
            ..ToolFilter::default()
        };
        assert!(!by_category.accepts(&tool));

        let by_search = ToolFilter {
            search: Some("STAMP".to_string()),
            ..ToolFilter::default()
        };
        assert!(by_search.accepts(&tool));
    }
}
