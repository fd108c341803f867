//! The studio: async application facade over the catalog, the processing
//! backend and live wizard sessions.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  CLI / MCP      │    │     Studio      │    │ CatalogRepository│
//! │  (params)       │───▶│ (sessions,      │───▶│ ProcessingBackend│
//! │                 │    │  spawn_blocking)│    │ Clock            │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`builder`]: configures storage, clock and backend
//! - [`catalog_ops`]: tools, envelopes and history
//! - [`session_ops`]: starting wizards, dispatching events, processing and
//!   sending envelopes
//!
//! # Examples
//!
//! ```rust
//! use quill_core::{params::ToolId, wizard::WizardEvent, models::FileHandle, StudioBuilder};
//!
//! # async fn example() -> Result<(), quill_core::StudioError> {
//! let studio = StudioBuilder::new().in_memory().build().await?;
//! let session = studio
//!     .start_tool_wizard(&ToolId { tool_id: "compress".to_string() })
//!     .await?;
//!
//! let mut session = session.lock().await;
//! session.dispatch(WizardEvent::AddFile {
//!     file: FileHandle::new("scan.pdf", 4096, "uploads/scan.pdf"),
//! });
//! assert!(session.dispatch(WizardEvent::Next).is_moved());
//! # Ok(())
//! # }
//! ```

use std::{sync::Arc, time::Duration};

use tokio::task;

use crate::{
    catalog::CatalogRepository,
    error::{Result, StudioError},
    processing::{Clock, ProcessingBackend},
    session::SessionRegistry,
};

pub mod builder;
pub mod catalog_ops;
pub mod session_ops;

pub use builder::StudioBuilder;

/// Main studio interface.
pub struct Studio {
    catalog: Arc<dyn CatalogRepository>,
    backend: Arc<dyn ProcessingBackend>,
    clock: Arc<dyn Clock>,
    tick: Duration,
    sessions: SessionRegistry,
}

impl Studio {
    pub(crate) fn new(
        catalog: Arc<dyn CatalogRepository>,
        backend: Arc<dyn ProcessingBackend>,
        clock: Arc<dyn Clock>,
        tick: Duration,
    ) -> Self {
        Self {
            catalog,
            backend,
            clock,
            tick,
            sessions: SessionRegistry::new(),
        }
    }

    /// Live sessions started through this studio.
    pub fn sessions(&self) -> &SessionRegistry {
        &self.sessions
    }

    /// Run a repository call on the blocking pool.
    async fn with_catalog<T, F>(&self, operation: F) -> Result<T>
    where
        T: Send + 'static,
        F: FnOnce(&dyn CatalogRepository) -> Result<T> + Send + 'static,
    {
        let catalog = Arc::clone(&self.catalog);
        task::spawn_blocking(move || operation(catalog.as_ref()))
            .await
            .map_err(StudioError::join)?
    }
}
