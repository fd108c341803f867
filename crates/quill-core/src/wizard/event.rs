//! Wizard events and the reducer that applies them.
//!
//! Every change to a wizard goes through [`Wizard::dispatch`], so the whole
//! transition table is a single function from `(state, event)` to
//! `(state', outcome)`.

use log::debug;
use serde::{Deserialize, Serialize};

use super::{RecipientPatch, Wizard, FILES_KEY, RECIPIENTS_KEY};
use crate::models::{FieldValue, FileHandle, Recipient, RecipientRole, StepId};

/// A navigation or data-entry intent.
///
/// Events deserialize from JSON tagged with an `event` field:
///
/// ```rust
/// use quill_core::wizard::WizardEvent;
///
/// let event: WizardEvent = serde_json::from_str(r#"{"event":"go_to","step":"review"}"#).unwrap();
/// assert_eq!(event, WizardEvent::GoTo { step: "review".into() });
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum WizardEvent {
    Next,
    Previous,
    GoTo {
        step: StepId,
    },
    Reset,
    Set {
        key: String,
        value: FieldValue,
    },
    Remove {
        key: String,
    },
    AddFile {
        file: FileHandle,
    },
    RemoveFile {
        name: String,
    },
    AddRecipient {
        recipient: Recipient,
    },
    UpdateRecipient {
        index: usize,
        #[serde(default)]
        name: Option<String>,
        #[serde(default)]
        email: Option<String>,
        #[serde(default)]
        role: Option<RecipientRole>,
    },
    RemoveRecipient {
        index: usize,
    },
}

/// Result of dispatching an event.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", content = "detail", rename_all = "snake_case")]
pub enum Outcome {
    /// The current step changed
    Moved { from: StepId, to: StepId },
    /// A jump named the step the wizard is already on
    Stayed { step: StepId },
    /// One data key was written or removed
    Updated { key: String },
    /// Back to the first step with empty data
    Reset,
    /// Nothing changed
    Rejected(Rejection),
}

/// Why an event left the wizard unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Rejection {
    /// `Next` on the terminal step or `Previous` on the first one
    AtBoundary { step: StepId },
    /// The current step's guard does not hold
    GuardRejected { step: StepId, reason: String },
    /// The target is not part of the wizard
    InvalidTarget { target: String },
    /// A step before the target is not satisfied
    Unreachable { target: StepId, blocked_by: StepId },
    /// An edit named an entry that does not exist
    NoSuchEntry { key: String },
    /// The key is only written by the session, never by events
    ReservedKey { key: String },
}

impl Outcome {
    pub fn is_moved(&self) -> bool {
        matches!(self, Outcome::Moved { .. })
    }

    pub fn is_rejected(&self) -> bool {
        matches!(self, Outcome::Rejected(_))
    }

    pub fn rejection(&self) -> Option<&Rejection> {
        match self {
            Outcome::Rejected(rejection) => Some(rejection),
            _ => None,
        }
    }
}

impl Wizard {
    /// Apply one event and report what happened.
    pub fn dispatch(&mut self, event: WizardEvent) -> Outcome {
        let description = format!("{event:?}");
        let outcome = self.apply(event);
        debug!(
            "wizard '{}' on '{}': {description} -> {outcome:?}",
            self.definition().name(),
            self.current_id()
        );
        outcome
    }

    fn apply(&mut self, event: WizardEvent) -> Outcome {
        match event {
            WizardEvent::Next => self.go_next(),
            WizardEvent::Previous => self.go_previous(),
            WizardEvent::GoTo { step } => self.go_to(step.as_str()),
            WizardEvent::Reset => self.reset(),
            WizardEvent::Set { key, .. } | WizardEvent::Remove { key }
                if self.definition().is_reserved(&key) =>
            {
                Outcome::Rejected(Rejection::ReservedKey { key })
            }
            WizardEvent::Set { key, value } => {
                self.data_mut().set(key.clone(), value);
                Outcome::Updated { key }
            }
            WizardEvent::Remove { key } => match self.data_mut().remove(&key) {
                Some(_) => Outcome::Updated { key },
                None => Outcome::Rejected(Rejection::NoSuchEntry { key }),
            },
            WizardEvent::AddFile { file } => {
                self.data_mut().push_file(file);
                Outcome::Updated {
                    key: FILES_KEY.to_string(),
                }
            }
            WizardEvent::RemoveFile { name } => {
                if self.data_mut().remove_file(&name) {
                    Outcome::Updated {
                        key: FILES_KEY.to_string(),
                    }
                } else {
                    Outcome::Rejected(Rejection::NoSuchEntry {
                        key: format!("{FILES_KEY}/{name}"),
                    })
                }
            }
            WizardEvent::AddRecipient { recipient } => {
                self.data_mut().add_recipient(recipient);
                Outcome::Updated {
                    key: RECIPIENTS_KEY.to_string(),
                }
            }
            WizardEvent::UpdateRecipient {
                index,
                name,
                email,
                role,
            } => {
                let patch = RecipientPatch { name, email, role };
                if self.data_mut().update_recipient(index, patch) {
                    Outcome::Updated {
                        key: RECIPIENTS_KEY.to_string(),
                    }
                } else {
                    Outcome::Rejected(Rejection::NoSuchEntry {
                        key: format!("{RECIPIENTS_KEY}/{index}"),
                    })
                }
            }
            WizardEvent::RemoveRecipient { index } => {
                if self.data_mut().remove_recipient(index) {
                    Outcome::Updated {
                        key: RECIPIENTS_KEY.to_string(),
                    }
                } else {
                    Outcome::Rejected(Rejection::NoSuchEntry {
                        key: format!("{RECIPIENTS_KEY}/{index}"),
                    })
                }
            }
        }
    }
}
