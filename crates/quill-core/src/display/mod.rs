//! Markdown formatting for terminal and MCP output.
//!
//! Domain models implement [`std::fmt::Display`] directly (see [`models`]);
//! lists and operation results get newtype wrappers so the same data can be
//! rendered differently depending on context.
//!
//! - [`collections`]: [`Tools`], [`Envelopes`], [`ProcessingHistory`]
//! - [`results`]: [`SentEnvelope`], [`UpdateResult`], [`ProcessingResult`]
//! - [`status`]: [`OperationStatus`]
//! - [`datetime`]: [`LocalDateTime`], [`ByteSize`]
//!
//! ```rust
//! use quill_core::display::OperationStatus;
//!
//! let status = OperationStatus::success("Envelope voided");
//! assert_eq!(status.to_string(), "Success: Envelope voided\n");
//! ```

pub mod collections;
pub mod datetime;
pub mod models;
pub mod results;
pub mod status;

#[cfg(test)]
mod tests;

pub use collections::{Envelopes, ProcessingHistory, Tools};
pub use datetime::{ByteSize, LocalDateTime};
pub use results::{ProcessingResult, SentEnvelope, UpdateResult};
pub use status::OperationStatus;
