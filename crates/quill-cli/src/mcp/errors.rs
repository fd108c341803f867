//! Error handling utilities for the MCP server

use quill_core::StudioError;
use rmcp::ErrorData;

/// Convert a studio error into an MCP error, prefixed with what was attempted.
pub fn to_mcp_error(message: &str, error: &StudioError) -> ErrorData {
    ErrorData::internal_error(format!("{message}: {error}"), None)
}

/// Error for a lookup that found nothing.
pub fn not_found(what: impl std::fmt::Display) -> ErrorData {
    ErrorData::internal_error(format!("{what} not found"), None)
}
