//! Parameter structures for Quill operations.
//!
//! These structures are shared by the CLI and the MCP server. Interface
//! layers wrap them with their own derives (clap `Args`, transparent serde
//! wrappers) and convert into them, so the [`crate::Studio`] only ever sees
//! the types defined here.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │   CLI Args      │    │   MCP Params    │    │  Core Params    │
//! │  (clap derives) │───▶│ (serde derives) │───▶│ (minimal deps)  │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! JSON schemas are only derived with the `schema` feature.

#[cfg(feature = "schema")]
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::{
    models::{EnvelopeStatus, ToolCategory},
    session::SessionId,
    wizard::WizardEvent,
};

/// Number of history entries shown when no limit is given.
pub const DEFAULT_HISTORY_LIMIT: usize = 10;

/// Generic parameters for operations requiring just a numeric ID.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct Id {
    /// The ID of the resource to operate on
    pub id: u64,
}

/// Parameters naming a catalog tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ToolId {
    /// Tool slug, e.g. "merge" or "pdf-to-word"
    pub tool_id: String,
}

/// Parameters for listing catalog tools.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListTools {
    /// Only tools of this category
    #[serde(default)]
    pub category: Option<ToolCategory>,
    /// Only tools marked as favorite
    #[serde(default)]
    pub favorites: bool,
    /// Case-insensitive text searched in name and description
    #[serde(default)]
    pub search: Option<String>,
}

/// Parameters for pinning or unpinning a tool.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct FavoriteTool {
    /// Tool slug
    pub tool_id: String,
    /// New favorite state
    pub favorite: bool,
}

/// Parameters for listing envelopes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ListEnvelopes {
    /// Only envelopes in this status
    #[serde(default)]
    pub status: Option<EnvelopeStatus>,
}

/// Parameters for moving an envelope along its lifecycle.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct UpdateEnvelopeStatus {
    /// Envelope ID
    pub id: u64,
    /// Target status ('sent', 'completed', 'declined' or 'voided')
    pub status: EnvelopeStatus,
}

/// Parameters naming a live wizard session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct SessionRef {
    /// Session ID returned when the wizard was started
    pub session: SessionId,
}

/// Parameters for sending one event to a live wizard session.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct DispatchEvent {
    /// Session ID returned when the wizard was started
    pub session: SessionId,
    /// Navigation or data-entry event, tagged by its "event" field
    pub event: WizardEvent,
}

/// Parameters for running the processing step of a tool session.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct ProcessSession {
    /// Session ID returned when the wizard was started
    pub session: SessionId,
    /// Seed for reproducible progress increments
    #[serde(default)]
    pub seed: Option<u64>,
}

/// Parameters for listing processing history.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(JsonSchema))]
pub struct RecentProcessing {
    /// Maximum number of records (defaults to 10)
    #[serde(default)]
    pub limit: Option<usize>,
}

impl RecentProcessing {
    pub fn limit(&self) -> usize {
        self.limit.unwrap_or(DEFAULT_HISTORY_LIMIT)
    }
}
