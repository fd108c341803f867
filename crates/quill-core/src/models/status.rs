//! Enumerations for tool categories, envelope statuses and recipient roles.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Grouping used by the tool catalog.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum ToolCategory {
    /// Merge, split, rotate and reorder pages
    Organize,
    /// Reduce size and repair
    Optimize,
    /// Conversion to and from other formats
    Convert,
    /// Content edits such as watermarks, OCR and page numbers
    Edit,
    /// Password protection and removal
    Security,
}

impl FromStr for ToolCategory {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "organize" => Ok(ToolCategory::Organize),
            "optimize" => Ok(ToolCategory::Optimize),
            "convert" => Ok(ToolCategory::Convert),
            "edit" => Ok(ToolCategory::Edit),
            "security" => Ok(ToolCategory::Security),
            _ => Err(format!("Invalid tool category: {s}")),
        }
    }
}

impl ToolCategory {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            ToolCategory::Organize => "organize",
            ToolCategory::Optimize => "optimize",
            ToolCategory::Convert => "convert",
            ToolCategory::Edit => "edit",
            ToolCategory::Security => "security",
        }
    }
}

/// Lifecycle status of an e-signature envelope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum EnvelopeStatus {
    /// Saved but not yet sent to recipients
    Draft,
    /// Sent and awaiting signatures
    Sent,
    /// Every recipient has signed
    Completed,
    /// A recipient declined to sign
    Declined,
    /// Cancelled by the sender
    Voided,
}

impl FromStr for EnvelopeStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "draft" => Ok(EnvelopeStatus::Draft),
            "sent" => Ok(EnvelopeStatus::Sent),
            "completed" => Ok(EnvelopeStatus::Completed),
            "declined" => Ok(EnvelopeStatus::Declined),
            "voided" => Ok(EnvelopeStatus::Voided),
            _ => Err(format!("Invalid envelope status: {s}")),
        }
    }
}

impl EnvelopeStatus {
    /// All statuses in lifecycle order.
    pub const ALL: [EnvelopeStatus; 5] = [
        EnvelopeStatus::Draft,
        EnvelopeStatus::Sent,
        EnvelopeStatus::Completed,
        EnvelopeStatus::Declined,
        EnvelopeStatus::Voided,
    ];

    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            EnvelopeStatus::Draft => "draft",
            EnvelopeStatus::Sent => "sent",
            EnvelopeStatus::Completed => "completed",
            EnvelopeStatus::Declined => "declined",
            EnvelopeStatus::Voided => "voided",
        }
    }

    /// Whether an envelope in this status may move to `next`.
    ///
    /// Drafts are sent or voided; sent envelopes end as completed, declined
    /// or voided. Terminal statuses never change again.
    pub fn can_transition_to(&self, next: EnvelopeStatus) -> bool {
        matches!(
            (self, next),
            (EnvelopeStatus::Draft, EnvelopeStatus::Sent)
                | (EnvelopeStatus::Draft, EnvelopeStatus::Voided)
                | (EnvelopeStatus::Sent, EnvelopeStatus::Completed)
                | (EnvelopeStatus::Sent, EnvelopeStatus::Declined)
                | (EnvelopeStatus::Sent, EnvelopeStatus::Voided)
        )
    }

    /// Get status with consistent icon formatting for display.
    ///
    /// ```rust
    /// use quill_core::models::EnvelopeStatus;
    ///
    /// assert_eq!(EnvelopeStatus::Completed.with_icon(), "✓ Completed");
    /// assert_eq!(EnvelopeStatus::Sent.with_icon(), "➤ Sent");
    /// ```
    pub fn with_icon(&self) -> &'static str {
        match self {
            EnvelopeStatus::Draft => "○ Draft",
            EnvelopeStatus::Sent => "➤ Sent",
            EnvelopeStatus::Completed => "✓ Completed",
            EnvelopeStatus::Declined => "✗ Declined",
            EnvelopeStatus::Voided => "⊘ Voided",
        }
    }
}

/// What a recipient is asked to do with an envelope.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(rename_all = "lowercase")]
pub enum RecipientRole {
    /// Must sign the documents
    #[default]
    Signer,
    /// Must approve before signers receive the envelope
    Approver,
    /// Receives a copy only
    Viewer,
}

impl FromStr for RecipientRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "signer" => Ok(RecipientRole::Signer),
            "approver" => Ok(RecipientRole::Approver),
            "viewer" | "cc" => Ok(RecipientRole::Viewer),
            _ => Err(format!("Invalid recipient role: {s}")),
        }
    }
}

impl RecipientRole {
    /// Convert to database string representation
    pub fn as_str(&self) -> &'static str {
        match self {
            RecipientRole::Signer => "signer",
            RecipientRole::Approver => "approver",
            RecipientRole::Viewer => "viewer",
        }
    }
}
