//! Linear step wizard controller.
//!
//! A wizard walks the user through a fixed, ordered list of steps. Each step
//! may declare a [`Guard`] that must hold before the user can move forward
//! out of it; moving backward is always allowed. Everything the user enters
//! lives in a [`WizardData`] accumulator that survives navigation and is only
//! cleared by a reset.
//!
//! ```text
//! ┌─────────────────┐    ┌─────────────────┐    ┌─────────────────┐
//! │  WizardEvent    │    │   Wizard        │    │   Outcome       │
//! │ (next, go_to,   │───▶│ (guards + data  │───▶│ (moved, updated │
//! │  set, add_file) │    │  + current step)│    │  or rejected)   │
//! └─────────────────┘    └─────────────────┘    └─────────────────┘
//! ```
//!
//! ## Submodules
//!
//! - [`definition`]: step sequence and builder
//! - [`guard`]: guard predicates
//! - [`data`]: the data accumulator
//! - [`controller`]: navigation (`go_next`, `go_previous`, `go_to`, `reset`)
//! - [`event`]: the event reducer
//! - [`flows`]: PDF tool and envelope flows
//!
//! # Examples
//!
//! ```rust
//! use std::sync::Arc;
//!
//! use quill_core::models::FileHandle;
//! use quill_core::wizard::{Guard, Wizard, WizardDefinition, WizardEvent};
//!
//! # fn main() -> Result<(), quill_core::StudioError> {
//! let definition = WizardDefinition::builder("Compress PDF")
//!     .guarded_step("upload", "Upload", Guard::non_empty("files"))
//!     .step("settings", "Settings")
//!     .build()?;
//! let mut wizard = Wizard::new(Arc::new(definition));
//!
//! assert!(wizard.dispatch(WizardEvent::Next).is_rejected());
//!
//! wizard.dispatch(WizardEvent::AddFile {
//!     file: FileHandle::new("scan.pdf", 2048, "uploads/scan"),
//! });
//! assert!(wizard.dispatch(WizardEvent::Next).is_moved());
//! assert_eq!(wizard.current_id().as_str(), "settings");
//! # Ok(())
//! # }
//! ```

pub mod controller;
pub mod data;
pub mod definition;
pub mod event;
pub mod flows;
pub mod guard;

#[cfg(test)]
mod tests;

pub use controller::{StepSnapshot, Wizard, WizardSnapshot};
pub use data::{RecipientPatch, WizardData, FILES_KEY, RECIPIENTS_KEY};
pub use definition::{StepDefinition, WizardBuilder, WizardDefinition};
pub use event::{Outcome, Rejection, WizardEvent};
pub use flows::{envelope_flow, pdf_tool_flow};
pub use guard::Guard;
