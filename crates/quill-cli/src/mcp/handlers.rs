//! MCP tool handlers implementation

use std::sync::Arc;

use log::debug;
use quill_core::{
    display::{
        Envelopes, OperationStatus, ProcessingHistory, ProcessingResult, SentEnvelope, Tools,
        UpdateResult,
    },
    params as core,
    processing::RandomProgress,
    Studio,
};
use rmcp::{
    handler::server::wrapper::Parameters,
    model::{CallToolResult, Content},
    ErrorData,
};
use schemars::JsonSchema;
use serde::Deserialize;

use super::errors::{not_found, to_mcp_error};

/// Transparent serde wrapper giving any core parameter type the derives the
/// MCP layer needs, so `quill_core::params` stays free of rmcp concerns.
#[derive(Debug, Deserialize)]
#[serde(transparent)]
pub struct McpParams<T>(T)
where
    T: JsonSchema;

impl<T> JsonSchema for McpParams<T>
where
    T: JsonSchema,
{
    fn schema_name() -> std::borrow::Cow<'static, str> {
        T::schema_name()
    }

    fn json_schema(g: &mut schemars::SchemaGenerator) -> schemars::Schema {
        T::json_schema(g)
    }
}

impl<T> AsRef<T> for McpParams<T>
where
    T: JsonSchema,
{
    fn as_ref(&self) -> &T {
        &self.0
    }
}

pub type Id = McpParams<core::Id>;
pub type ToolId = McpParams<core::ToolId>;
pub type ListTools = McpParams<core::ListTools>;
pub type FavoriteTool = McpParams<core::FavoriteTool>;
pub type ListEnvelopes = McpParams<core::ListEnvelopes>;
pub type UpdateEnvelopeStatus = McpParams<core::UpdateEnvelopeStatus>;
pub type SessionRef = McpParams<core::SessionRef>;
pub type DispatchEvent = McpParams<core::DispatchEvent>;
pub type ProcessSession = McpParams<core::ProcessSession>;
pub type RecentProcessing = McpParams<core::RecentProcessing>;

pub type McpResult = Result<CallToolResult, ErrorData>;

fn text(body: impl ToString) -> McpResult {
    Ok(CallToolResult::success(vec![Content::text(body.to_string())]))
}

/// Handler implementations for the MCP server
pub struct McpHandlers {
    studio: Arc<Studio>,
}

impl McpHandlers {
    pub fn new(studio: Arc<Studio>) -> Self {
        Self { studio }
    }

    pub async fn list_tools(&self, Parameters(params): Parameters<ListTools>) -> McpResult {
        debug!("list_tools: {params:?}");

        let tools = self
            .studio
            .list_tools(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list tools", &e))?;
        text(format!("# Tools\n\n{}", Tools(tools)))
    }

    pub async fn favorite_tool(&self, Parameters(params): Parameters<FavoriteTool>) -> McpResult {
        debug!("favorite_tool: {params:?}");

        let tool = self
            .studio
            .set_favorite(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update favorite", &e))?;
        text(UpdateResult::favorite(tool))
    }

    pub async fn start_tool_wizard(&self, Parameters(params): Parameters<ToolId>) -> McpResult {
        debug!("start_tool_wizard: {params:?}");

        let session = self
            .studio
            .start_tool_wizard(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to start tool wizard", &e))?;
        let snapshot = session.lock().await.snapshot();
        text(format!(
            "{}\n{snapshot}",
            OperationStatus::success(format!("Started session {}", snapshot.id))
        ))
    }

    pub async fn start_envelope_wizard(&self) -> McpResult {
        debug!("start_envelope_wizard");

        let session = self
            .studio
            .start_envelope_wizard()
            .await
            .map_err(|e| to_mcp_error("Failed to start envelope wizard", &e))?;
        let snapshot = session.lock().await.snapshot();
        text(format!(
            "{}\n{snapshot}",
            OperationStatus::success(format!("Started session {}", snapshot.id))
        ))
    }

    pub async fn wizard_event(&self, Parameters(params): Parameters<DispatchEvent>) -> McpResult {
        debug!("wizard_event: {params:?}");

        let (outcome, snapshot) = self
            .studio
            .dispatch(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to apply event", &e))?;
        text(format!("{outcome}\n\n{snapshot}"))
    }

    pub async fn wizard_state(&self, Parameters(params): Parameters<SessionRef>) -> McpResult {
        debug!("wizard_state: {params:?}");

        let session = self
            .studio
            .session(params.as_ref().session)
            .await
            .map_err(|e| to_mcp_error("Failed to load session", &e))?;
        let snapshot = session.lock().await.snapshot();
        text(snapshot)
    }

    pub async fn wizard_process(&self, Parameters(params): Parameters<ProcessSession>) -> McpResult {
        debug!("wizard_process: {params:?}");

        let params = params.as_ref();
        let session = self
            .studio
            .session(params.session)
            .await
            .map_err(|e| to_mcp_error("Failed to load session", &e))?;
        let mut progress = match params.seed {
            Some(seed) => RandomProgress::seeded(seed),
            None => RandomProgress::from_entropy(),
        };
        let report = self
            .studio
            .process(&session, &mut progress)
            .await
            .map_err(|e| to_mcp_error("Failed to process", &e))?;
        let snapshot = session.lock().await.snapshot();
        text(ProcessingResult {
            report,
            session: snapshot,
        })
    }

    pub async fn close_wizard(&self, Parameters(params): Parameters<SessionRef>) -> McpResult {
        debug!("close_wizard: {params:?}");

        let id = params.as_ref().session;
        self.studio
            .close_session(id)
            .await
            .map_err(|e| to_mcp_error("Failed to close session", &e))?;
        text(OperationStatus::success(format!("Closed session {id}")))
    }

    pub async fn send_envelope(&self, Parameters(params): Parameters<SessionRef>) -> McpResult {
        debug!("send_envelope: {params:?}");

        let session = self
            .studio
            .session(params.as_ref().session)
            .await
            .map_err(|e| to_mcp_error("Failed to load session", &e))?;
        let envelope = self
            .studio
            .send_envelope(&session)
            .await
            .map_err(|e| to_mcp_error("Failed to send envelope", &e))?;
        text(SentEnvelope(envelope))
    }

    pub async fn list_envelopes(&self, Parameters(params): Parameters<ListEnvelopes>) -> McpResult {
        debug!("list_envelopes: {params:?}");

        let envelopes = self
            .studio
            .list_envelopes(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to list envelopes", &e))?;
        text(format!("# Envelopes\n\n{}", Envelopes(envelopes)))
    }

    pub async fn show_envelope(&self, Parameters(params): Parameters<Id>) -> McpResult {
        debug!("show_envelope: {params:?}");

        let envelope = self
            .studio
            .get_envelope(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to load envelope", &e))?
            .ok_or_else(|| not_found(format!("Envelope with ID {}", params.as_ref().id)))?;
        text(envelope)
    }

    pub async fn update_envelope_status(
        &self,
        Parameters(params): Parameters<UpdateEnvelopeStatus>,
    ) -> McpResult {
        debug!("update_envelope_status: {params:?}");

        let envelope = self
            .studio
            .update_envelope_status(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to update envelope status", &e))?;
        text(UpdateResult::status(envelope))
    }

    pub async fn processing_history(
        &self,
        Parameters(params): Parameters<RecentProcessing>,
    ) -> McpResult {
        debug!("processing_history: {params:?}");

        let records = self
            .studio
            .recent_processing(params.as_ref())
            .await
            .map_err(|e| to_mcp_error("Failed to load processing history", &e))?;
        text(format!("# Processing history\n\n{}", ProcessingHistory(records)))
    }
}
