//! Catalog operations for the Studio: tools, envelopes and history.

use super::Studio;
use crate::{
    error::Result,
    models::{Envelope, EnvelopeStats, PdfTool, ProcessingRecord, ToolFilter},
    params::{FavoriteTool, Id, ListEnvelopes, ListTools, RecentProcessing, ToolId, UpdateEnvelopeStatus},
};

impl Studio {
    /// Lists catalog tools matching the given criteria.
    pub async fn list_tools(&self, params: &ListTools) -> Result<Vec<PdfTool>> {
        let filter = ToolFilter::from(params);
        self.with_catalog(move |catalog| catalog.list_tools(&filter))
            .await
    }

    /// Retrieves a tool by its slug.
    pub async fn get_tool(&self, params: &ToolId) -> Result<Option<PdfTool>> {
        let tool_id = params.tool_id.clone();
        self.with_catalog(move |catalog| catalog.get_tool(&tool_id))
            .await
    }

    /// Pins or unpins a tool.
    pub async fn set_favorite(&self, params: &FavoriteTool) -> Result<PdfTool> {
        let tool_id = params.tool_id.clone();
        let favorite = params.favorite;
        self.with_catalog(move |catalog| catalog.set_favorite(&tool_id, favorite))
            .await
    }

    /// Lists envelopes, newest first.
    pub async fn list_envelopes(&self, params: &ListEnvelopes) -> Result<Vec<Envelope>> {
        let status = params.status;
        self.with_catalog(move |catalog| catalog.list_envelopes(status))
            .await
    }

    /// Retrieves an envelope by its ID.
    pub async fn get_envelope(&self, params: &Id) -> Result<Option<Envelope>> {
        let id = params.id;
        self.with_catalog(move |catalog| catalog.get_envelope(id))
            .await
    }

    /// Moves an envelope along its lifecycle.
    pub async fn update_envelope_status(&self, params: &UpdateEnvelopeStatus) -> Result<Envelope> {
        let id = params.id;
        let status = params.status;
        self.with_catalog(move |catalog| catalog.update_envelope_status(id, status))
            .await
    }

    /// Counts envelopes per status.
    pub async fn envelope_stats(&self) -> Result<EnvelopeStats> {
        self.with_catalog(|catalog| catalog.envelope_stats()).await
    }

    /// Most recent processing runs, newest first.
    pub async fn recent_processing(&self, params: &RecentProcessing) -> Result<Vec<ProcessingRecord>> {
        let limit = params.limit();
        self.with_catalog(move |catalog| catalog.recent_processing(limit))
            .await
    }
}
