//! Data models for tools, envelopes, wizard values and processing history.
//!
//! Display implementations for these models live in
//! [`crate::display::models`], keeping data structures separate from
//! presentation.
//!
//! # Overview
//!
//! - [`PdfTool`] and [`ToolCategory`]: entries of the tool catalog
//! - [`Envelope`], [`EnvelopeStatus`] and [`EnvelopeStats`]: e-signature
//!   envelopes and their dashboard counts
//! - [`FieldValue`], [`FileHandle`] and [`Recipient`]: values collected by
//!   wizards
//! - [`StepId`]: stable identifier of a wizard step
//! - [`ProcessingRecord`]: history of tool runs
//!
//! # Examples
//!
//! ```rust
//! use quill_core::models::{FieldValue, FileHandle, Recipient};
//!
//! let files = FieldValue::Files(vec![FileHandle::new("report.pdf", 1024, "uploads/1")]);
//! assert!(files.is_filled());
//!
//! let empty = FieldValue::Files(vec![]);
//! assert!(!empty.is_filled());
//!
//! let jane = Recipient::signer("Jane", "jane@example.com");
//! assert!(jane.is_complete());
//! ```

pub mod envelope;
pub mod filters;
pub mod record;
pub mod status;
pub mod step;
pub mod tool;
pub mod value;

#[cfg(test)]
mod tests;

pub use envelope::{Envelope, EnvelopeDraft, EnvelopeStats, DEFAULT_EXPIRY_DAYS};
pub use filters::ToolFilter;
pub use record::{NewProcessingRecord, ProcessingRecord};
pub use status::{EnvelopeStatus, RecipientRole, ToolCategory};
pub use step::StepId;
pub use tool::PdfTool;
pub use value::{FieldValue, FileHandle, Recipient};
