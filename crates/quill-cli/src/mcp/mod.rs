//! MCP server implementation for Quill
//!
//! Exposes the tool catalog, envelopes and live wizard sessions to AI
//! assistants over the Model Context Protocol. Sessions live in the studio
//! for as long as the server runs, so an assistant can start a wizard, feed
//! it events one call at a time and process or send the result.

use std::{future::Future, sync::Arc};

use anyhow::Result;
use log::{debug, error, info};
use quill_core::Studio;
use rmcp::{
    handler::server::{router::tool::ToolRouter, wrapper::Parameters},
    model::{Implementation, ProtocolVersion, ServerCapabilities, ServerInfo},
    tool, tool_handler, tool_router, ServerHandler,
};
use tokio::signal::unix::{signal, SignalKind};

pub mod errors;
pub mod handlers;

pub use handlers::{
    DispatchEvent, FavoriteTool, Id, ListEnvelopes, ListTools, McpResult, ProcessSession,
    RecentProcessing, SessionRef, ToolId, UpdateEnvelopeStatus,
};

/// MCP server for Quill
#[derive(Clone)]
pub struct QuillMcpServer {
    studio: Arc<Studio>,
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl QuillMcpServer {
    pub fn new(studio: Studio) -> Self {
        Self {
            studio: Arc::new(studio),
            tool_router: Self::tool_router(),
        }
    }

    fn handlers(&self) -> handlers::McpHandlers {
        handlers::McpHandlers::new(Arc::clone(&self.studio))
    }

    #[tool(
        name = "list_tools",
        description = "List the PDF tools in the catalog. Optional filters: category ('organize', 'optimize', 'convert', 'edit' or 'security'), favorites=true for pinned tools only, and search for case-insensitive text in names and descriptions. Favorites are listed first."
    )]
    async fn list_tools(&self, params: Parameters<ListTools>) -> McpResult {
        self.handlers().list_tools(params).await
    }

    #[tool(
        name = "favorite_tool",
        description = "Pin (favorite=true) or unpin (favorite=false) a catalog tool by its tool_id slug."
    )]
    async fn favorite_tool(&self, params: Parameters<FavoriteTool>) -> McpResult {
        self.handlers().favorite_tool(params).await
    }

    #[tool(
        name = "start_tool_wizard",
        description = "Start the Upload → Settings → Process → Download wizard for a catalog tool (tool_id, e.g. 'compress'). Returns the session ID used by wizard_event, wizard_state and wizard_process."
    )]
    async fn start_tool_wizard(&self, params: Parameters<ToolId>) -> McpResult {
        self.handlers().start_tool_wizard(params).await
    }

    #[tool(
        name = "start_envelope_wizard",
        description = "Start the envelope wizard: Documents → Recipients → Signature fields → Security → Settings → Review & send. Returns the session ID used by wizard_event and send_envelope."
    )]
    async fn start_envelope_wizard(&self) -> McpResult {
        self.handlers().start_envelope_wizard().await
    }

    #[tool(
        name = "wizard_event",
        description = "Apply one event to a wizard session and return the outcome and the new state. Events are tagged by 'event': next, previous, reset, go_to {step}, set {key, value}, remove {key}, add_file {file: {name, size, location}}, remove_file {name}, add_recipient {recipient: {name, email, role}}, update_recipient {index, name?, email?, role?}, remove_recipient {index}. Values are tagged as {type, value} with type text, number, flag, list, files or recipients.

        Moving forward is refused while the current step is incomplete; the outcome then explains what is missing. Moving backward is always allowed and keeps all entered data. The 'output' key of a tool wizard is written by wizard_process only."
    )]
    async fn wizard_event(&self, params: Parameters<DispatchEvent>) -> McpResult {
        self.handlers().wizard_event(params).await
    }

    #[tool(
        name = "wizard_state",
        description = "Show the current state of a wizard session: steps with their completion, the current step, what the current step still needs, and all entered data."
    )]
    async fn wizard_state(&self, params: Parameters<SessionRef>) -> McpResult {
        self.handlers().wizard_state(params).await
    }

    #[tool(
        name = "wizard_process",
        description = "Run the processing step of a tool wizard session. The session must be on the 'process' step. On success the output file is stored and the wizard moves to 'download'; on failure the wizard stays on 'process' with all data kept so processing can be retried. Optional seed makes progress reproducible."
    )]
    async fn wizard_process(&self, params: Parameters<ProcessSession>) -> McpResult {
        self.handlers().wizard_process(params).await
    }

    #[tool(
        name = "close_wizard",
        description = "End a wizard session and cancel any processing it is still running."
    )]
    async fn close_wizard(&self, params: Parameters<SessionRef>) -> McpResult {
        self.handlers().close_wizard(params).await
    }

    #[tool(
        name = "send_envelope",
        description = "Send the envelope built by an envelope wizard session. The session must be on the 'review' step with every earlier step complete. The envelope is stored with status 'sent' and the session starts over."
    )]
    async fn send_envelope(&self, params: Parameters<SessionRef>) -> McpResult {
        self.handlers().send_envelope(params).await
    }

    #[tool(
        name = "list_envelopes",
        description = "List envelopes, newest first. Optional status filter: 'draft', 'sent', 'completed', 'declined' or 'voided'."
    )]
    async fn list_envelopes(&self, params: Parameters<ListEnvelopes>) -> McpResult {
        self.handlers().list_envelopes(params).await
    }

    #[tool(
        name = "show_envelope",
        description = "Show one envelope with its documents, recipients and settings."
    )]
    async fn show_envelope(&self, params: Parameters<Id>) -> McpResult {
        self.handlers().show_envelope(params).await
    }

    #[tool(
        name = "update_envelope_status",
        description = "Move an envelope along its lifecycle. Drafts can be sent or voided; sent envelopes can be completed, declined or voided. Completed, declined and voided envelopes are final."
    )]
    async fn update_envelope_status(&self, params: Parameters<UpdateEnvelopeStatus>) -> McpResult {
        self.handlers().update_envelope_status(params).await
    }

    #[tool(
        name = "processing_history",
        description = "List recent processing runs, newest first, with their input files and output or failure reason. Optional limit (default 10)."
    )]
    async fn processing_history(&self, params: Parameters<RecentProcessing>) -> McpResult {
        self.handlers().processing_history(params).await
    }
}

#[tool_handler(router = self.tool_router)]
impl ServerHandler for QuillMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder().enable_tools().build(),
            server_info: Implementation {
                name: "quill".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                ..Default::default()
            },
            instructions: Some(r#"Quill runs PDF tools and prepares e-signature envelopes through step-by-step wizards.

## Core Concepts
- **Tools**: catalog entries such as merge, split, compress or pdf-to-word
- **Wizards**: ordered steps; each step may require data before you can move on
- **Sessions**: a running wizard, identified by the ID returned when it starts
- **Envelopes**: documents sent to recipients for signature

## Running a Tool
1. `list_tools` to find the tool slug
2. `start_tool_wizard` with the slug
3. `wizard_event` with `add_file` events, then `next`
4. `wizard_event` with `set` events for required settings, then `next`
5. `wizard_process` to run the job; the output appears in the wizard data

## Sending an Envelope
1. `start_envelope_wizard`
2. Add documents (`add_file`), recipients (`add_recipient`) and a subject (`set` with key 'subject'), moving on with `next`
3. On the review step, `send_envelope`

When a `next` is refused, the outcome names the step and what it still needs. `wizard_state` shows the whole wizard at any time."#.to_string()),
        }
    }
}

/// Run the MCP server with stdio transport
pub async fn run_stdio_server(server: QuillMcpServer) -> Result<()> {
    use rmcp::{transport::stdio, ServiceExt};

    info!("Starting Quill MCP server on stdio");
    debug!(
        "Server created with {} tools",
        server.tool_router.list_all().len()
    );

    let service = server.serve(stdio()).await.inspect_err(|e| {
        error!("serving error: {e:?}");
    })?;

    let mut sigint = signal(SignalKind::interrupt())?;
    let mut sigterm = signal(SignalKind::terminate())?;

    tokio::select! {
        result = service.waiting() => {
            match result {
                Ok(_) => info!("MCP server stopped normally"),
                Err(e) => error!("MCP server error: {e:?}"),
            }
        }
        _ = sigint.recv() => {
            info!("Received SIGINT, shutting down gracefully...");
        }
        _ = sigterm.recv() => {
            info!("Received SIGTERM, shutting down gracefully...");
        }
    }

    info!("MCP server shutdown complete");
    Ok(())
}
