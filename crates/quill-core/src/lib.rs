//! Core library for Quill, a headless wizard engine for PDF tools and
//! e-signature envelopes.
//!
//! The heart of the crate is the [`wizard`] module: a linear step wizard whose
//! forward transitions are gated by guards over the data the user entered.
//! Around it sit the pieces needed to run a wizard end to end:
//!
//! - [`session`]: a wizard plus its processing lifecycle
//! - [`processing`]: the tick-based processing driver and its injected clock,
//!   progress source and backend
//! - [`catalog`]: tools, envelopes and processing history behind the
//!   [`CatalogRepository`] trait (in memory or SQLite)
//! - [`studio`]: the async facade used by the CLI and the MCP server
//! - [`display`]: markdown formatting of everything above
//!
//! # Quick Start
//!
//! ```rust
//! use quill_core::{
//!     models::FileHandle,
//!     params::ToolId,
//!     processing::FixedProgress,
//!     wizard::WizardEvent,
//!     StudioBuilder,
//! };
//!
//! # async fn example() -> Result<(), quill_core::StudioError> {
//! let studio = StudioBuilder::new().in_memory().build().await?;
//! let session = studio
//!     .start_tool_wizard(&ToolId { tool_id: "compress".to_string() })
//!     .await?;
//!
//! {
//!     let mut session = session.lock().await;
//!     session.dispatch(WizardEvent::AddFile {
//!         file: FileHandle::new("report.pdf", 4096, "uploads/report.pdf"),
//!     });
//!     session.dispatch(WizardEvent::Next);
//!     session.dispatch(WizardEvent::Next);
//! }
//!
//! let report = studio.process(&session, &mut FixedProgress(25)).await?;
//! println!("{report}");
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod display;
pub mod error;
pub mod models;
pub mod params;
pub mod processing;
pub mod session;
pub mod studio;
pub mod wizard;

// Re-export commonly used types
pub use catalog::{CatalogRepository, MemoryCatalog, SqliteCatalog};
pub use display::{
    Envelopes, OperationStatus, ProcessingHistory, ProcessingResult, SentEnvelope, Tools,
    UpdateResult,
};
pub use error::{Result, StudioError};
pub use models::{
    Envelope, EnvelopeStats, EnvelopeStatus, FieldValue, FileHandle, PdfTool, ProcessingRecord,
    Recipient, RecipientRole, StepId, ToolCategory,
};
pub use processing::ProcessingReport;
pub use session::{SessionId, SessionSnapshot, SharedSession, WizardSession};
pub use studio::{Studio, StudioBuilder};
pub use wizard::{Outcome, Rejection, Wizard, WizardEvent};
