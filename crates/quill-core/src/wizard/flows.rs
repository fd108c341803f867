//! The two concrete flows: running a PDF tool and creating an envelope.

use super::{Guard, WizardDefinition, FILES_KEY, RECIPIENTS_KEY};
use crate::{error::Result, models::PdfTool};

/// Step identifiers of the PDF tool flow.
pub mod tool_steps {
    pub const UPLOAD: &str = "upload";
    pub const SETTINGS: &str = "settings";
    pub const PROCESS: &str = "process";
    pub const DOWNLOAD: &str = "download";
}

/// Step identifiers of the envelope flow.
pub mod envelope_steps {
    pub const DOCUMENTS: &str = "documents";
    pub const RECIPIENTS: &str = "recipients";
    pub const FIELDS: &str = "fields";
    pub const SECURITY: &str = "security";
    pub const SETTINGS: &str = "settings";
    pub const REVIEW: &str = "review";
}

/// Key holding the processed file once the backend succeeded.
pub const OUTPUT_KEY: &str = "output";
/// Envelope subject line.
pub const SUBJECT_KEY: &str = "subject";
/// Envelope message body.
pub const MESSAGE_KEY: &str = "message";
/// Optional access code recipients must enter.
pub const ACCESS_CODE_KEY: &str = "access_code";
/// Envelope validity in days.
pub const EXPIRES_KEY: &str = "expires_in_days";
/// Whether reminders are sent.
pub const REMINDERS_KEY: &str = "reminders";

/// Upload → Settings → Process → Download for one catalog tool.
///
/// Tools that combine several inputs need at least two files. The settings
/// step requires every key listed in `required_settings` to be filled, as
/// text, number or list. The process step is left only once processing
/// stored an output, and events cannot write that key themselves.
pub fn pdf_tool_flow(tool: &PdfTool) -> Result<WizardDefinition> {
    let upload_guard = if tool.multi_file {
        Guard::min_items(FILES_KEY, 2)
    } else {
        Guard::non_empty(FILES_KEY)
    };

    let builder = WizardDefinition::builder(tool.name.clone())
        .guarded_step(tool_steps::UPLOAD, "Upload files", upload_guard);

    let builder = if tool.required_settings.is_empty() {
        builder.step(tool_steps::SETTINGS, "Settings")
    } else {
        let guards = tool
            .required_settings
            .iter()
            .map(Guard::non_empty)
            .collect();
        builder.guarded_step(tool_steps::SETTINGS, "Settings", Guard::all(guards))
    };

    builder
        .guarded_step(tool_steps::PROCESS, "Process", Guard::non_empty(OUTPUT_KEY))
        .step(tool_steps::DOWNLOAD, "Download")
        .processing_step(tool_steps::PROCESS)
        .reserved_key(OUTPUT_KEY)
        .build()
}

/// Documents → Recipients → Fields → Security → Settings → Review.
pub fn envelope_flow() -> Result<WizardDefinition> {
    WizardDefinition::builder("New envelope")
        .guarded_step(
            envelope_steps::DOCUMENTS,
            "Documents",
            Guard::non_empty(FILES_KEY),
        )
        .guarded_step(
            envelope_steps::RECIPIENTS,
            "Recipients",
            Guard::recipients_complete(RECIPIENTS_KEY),
        )
        .step(envelope_steps::FIELDS, "Signature fields")
        .step(envelope_steps::SECURITY, "Security")
        .guarded_step(
            envelope_steps::SETTINGS,
            "Settings",
            Guard::non_empty_text(SUBJECT_KEY),
        )
        .step(envelope_steps::REVIEW, "Review & send")
        .build()
}
