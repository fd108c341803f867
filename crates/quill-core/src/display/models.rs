//! Display implementations for domain models, wizard state and outcomes.
//!
//! Everything renders as markdown so the CLI can hand it straight to the
//! terminal renderer; plain output stays readable as well.

use std::fmt;

use super::datetime::{ByteSize, LocalDateTime};
use crate::{
    models::{
        Envelope, EnvelopeStats, EnvelopeStatus, FieldValue, FileHandle, PdfTool,
        ProcessingRecord, Recipient, RecipientRole, ToolCategory,
    },
    processing::ProcessingReport,
    session::{ProcessingState, SessionSnapshot},
    wizard::{Outcome, Rejection, WizardSnapshot},
};

impl fmt::Display for ToolCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for EnvelopeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for RecipientRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl fmt::Display for FileHandle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, ByteSize(self.size))
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = if self.name.trim().is_empty() {
            "(no name)"
        } else {
            self.name.as_str()
        };
        let email = if self.email.trim().is_empty() {
            "no email"
        } else {
            self.email.as_str()
        };
        write!(f, "{name} <{email}> ({})", self.role)
    }
}

impl fmt::Display for FieldValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldValue::Text(text) => write!(f, "{text}"),
            FieldValue::Number(number) => write!(f, "{number}"),
            FieldValue::Flag(flag) => write!(f, "{}", if *flag { "yes" } else { "no" }),
            FieldValue::List(items) => write!(f, "{}", items.join(", ")),
            FieldValue::Files(files) => {
                let names: Vec<String> = files.iter().map(ToString::to_string).collect();
                write!(f, "{}", names.join(", "))
            }
            FieldValue::Recipients(recipients) => {
                let names: Vec<String> = recipients.iter().map(ToString::to_string).collect();
                write!(f, "{}", names.join("; "))
            }
        }
    }
}

impl PdfTool {
    /// One list entry, as used by [`super::Tools`].
    pub(crate) fn fmt_list_item(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let star = if self.favorite { "★ " } else { "" };
        let premium = if self.premium { " [premium]" } else { "" };
        writeln!(
            f,
            "- {star}**{}** `{}` ({}){premium}: {}",
            self.name, self.id, self.category, self.description
        )
    }
}

impl fmt::Display for PdfTool {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {} (`{}`)", self.name, self.id)?;
        writeln!(f)?;
        writeln!(f, "{}", self.description)?;
        writeln!(f)?;
        writeln!(f, "- Category: {}", self.category)?;
        writeln!(f, "- Favorite: {}", if self.favorite { "★ yes" } else { "no" })?;
        if self.premium {
            writeln!(f, "- Premium: yes")?;
        }
        if self.multi_file {
            writeln!(f, "- Input: two or more files")?;
        } else {
            writeln!(f, "- Input: one or more files")?;
        }
        if !self.required_settings.is_empty() {
            writeln!(f, "- Required settings: {}", self.required_settings.join(", "))?;
        }
        writeln!(f, "- Output suffix: {}", self.output_suffix)
    }
}

impl Envelope {
    /// Compact entry for envelope lists.
    pub(crate) fn fmt_summary(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "## {} (ID: {})", self.subject, self.id)?;
        writeln!(f)?;
        writeln!(f, "- **Status**: {}", self.status.with_icon())?;
        writeln!(
            f,
            "- **Documents**: {}, **Recipients**: {}",
            self.documents.len(),
            self.recipients.len()
        )?;
        writeln!(f, "- **Created**: {}", LocalDateTime(&self.created_at))?;
        writeln!(f)
    }
}

impl fmt::Display for Envelope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# {}. {}", self.id, self.subject)?;
        writeln!(f)?;
        writeln!(f, "- Status: {}", self.status.with_icon())?;
        writeln!(f, "- Expires in: {} days", self.expires_in_days)?;
        writeln!(f, "- Reminders: {}", if self.reminders { "on" } else { "off" })?;
        if self.access_code.is_some() {
            writeln!(f, "- Access code: required")?;
        }
        writeln!(f, "- Created: {}", LocalDateTime(&self.created_at))?;
        writeln!(f, "- Updated: {}", LocalDateTime(&self.updated_at))?;

        if let Some(message) = &self.message {
            writeln!(f)?;
            writeln!(f, "{message}")?;
        }

        writeln!(f, "\n## Documents")?;
        writeln!(f)?;
        for document in &self.documents {
            writeln!(f, "- {document}")?;
        }

        writeln!(f, "\n## Recipients")?;
        writeln!(f)?;
        for (index, recipient) in self.recipients.iter().enumerate() {
            writeln!(f, "{}. {recipient}", index + 1)?;
        }
        Ok(())
    }
}

impl fmt::Display for EnvelopeStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "# Envelopes")?;
        writeln!(f)?;
        for status in EnvelopeStatus::ALL {
            writeln!(f, "- {}: {}", status.with_icon(), self.get(status))?;
        }
        writeln!(f)?;
        writeln!(f, "Total: {}", self.total())?;
        if let Some(rate) = self.completion_rate() {
            writeln!(f, "Completion rate: {rate}%")?;
        }
        Ok(())
    }
}

impl fmt::Display for ProcessingRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inputs = self.input_files.join(", ");
        let when = LocalDateTime(&self.created_at);
        match (&self.output, self.succeeded) {
            (Some(output), true) => {
                writeln!(f, "- ✓ **{}**: {inputs} → {} ({when})", self.tool_id, output.name)
            }
            _ => {
                let reason = self.message.as_deref().unwrap_or("failed");
                writeln!(f, "- ✗ **{}**: {inputs}: {reason} ({when})", self.tool_id)
            }
        }
    }
}

impl fmt::Display for ProcessingState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingState::Idle => write!(f, "idle"),
            ProcessingState::Running { progress } => write!(f, "running ({progress}%)"),
            ProcessingState::Succeeded { output } => write!(f, "succeeded: {}", output.name),
            ProcessingState::Failed { message } => write!(f, "failed: {message}"),
        }
    }
}

impl fmt::Display for ProcessingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProcessingReport::Completed { output } => write!(f, "Processing complete: {output}"),
            ProcessingReport::Failed { message } => write!(f, "Processing failed: {message}"),
            ProcessingReport::Cancelled => write!(f, "Processing cancelled"),
            ProcessingReport::NotStarted => {
                write!(f, "Processing not started: the wizard is not on its processing step")
            }
        }
    }
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Rejection::AtBoundary { step } => write!(f, "'{step}' is at the edge of the wizard"),
            Rejection::GuardRejected { step, reason } => {
                write!(f, "cannot leave '{step}': {reason}")
            }
            Rejection::InvalidTarget { target } => write!(f, "unknown step '{target}'"),
            Rejection::Unreachable { target, blocked_by } => {
                write!(f, "cannot jump to '{target}': '{blocked_by}' is not complete")
            }
            Rejection::NoSuchEntry { key } => write!(f, "nothing to change at '{key}'"),
            Rejection::ReservedKey { key } => write!(f, "'{key}' is set by processing only"),
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::Moved { from, to } => write!(f, "Moved from '{from}' to '{to}'"),
            Outcome::Stayed { step } => write!(f, "Already on '{step}'"),
            Outcome::Updated { key } => write!(f, "Updated '{key}'"),
            Outcome::Reset => write!(f, "Wizard reset"),
            Outcome::Rejected(rejection) => write!(f, "Rejected: {rejection}"),
        }
    }
}

impl fmt::Display for WizardSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "# {} (step {} of {})",
            self.wizard, self.position, self.total
        )?;
        writeln!(f)?;

        for (index, step) in self.steps.iter().enumerate() {
            let icon = if step.current {
                "➤"
            } else if step.completed {
                "✓"
            } else {
                "○"
            };
            write!(f, "{}. {icon} {}", index + 1, step.title)?;
            match &step.requirement {
                Some(requirement) if !step.satisfied => writeln!(f, " (needs: {requirement})")?,
                _ => writeln!(f)?,
            }
        }

        if !self.data.is_empty() {
            writeln!(f, "\n## Data")?;
            writeln!(f)?;
            for (key, value) in self.data.iter() {
                writeln!(f, "- {key}: {value}")?;
            }
        }
        Ok(())
    }
}

impl fmt::Display for SessionSnapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.wizard)?;
        writeln!(f)?;
        match &self.tool {
            Some(tool) => writeln!(f, "Session {} (tool `{tool}`)", self.id)?,
            None => writeln!(f, "Session {} (envelope)", self.id)?,
        }
        if self.tool.is_some() {
            writeln!(f, "Processing: {}", self.processing)?;
        }
        Ok(())
    }
}
