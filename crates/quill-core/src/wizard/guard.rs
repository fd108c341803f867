//! Guards: pure predicates gating forward progress out of a step.

use std::{fmt, sync::Arc};

use super::WizardData;

type Predicate = dyn Fn(&WizardData) -> bool + Send + Sync;

/// A side-effect-free predicate over the accumulated wizard data.
///
/// Guards only read the keys they name, so adding unrelated keys to the data
/// never turns a passing guard into a failing one. Cloning is cheap; the
/// predicate is shared.
///
/// # Examples
///
/// ```rust
/// use quill_core::models::{FieldValue, FileHandle};
/// use quill_core::wizard::{Guard, WizardData};
///
/// let guard = Guard::non_empty("files");
/// let mut data = WizardData::new();
/// assert!(!guard.allows(&data));
///
/// data.set("files", FieldValue::Files(vec![]));
/// assert!(!guard.allows(&data));
///
/// data.push_file(FileHandle::new("a.pdf", 10, "a"));
/// assert!(guard.allows(&data));
/// ```
#[derive(Clone)]
pub struct Guard {
    description: String,
    predicate: Arc<Predicate>,
}

impl Guard {
    /// Wrap an arbitrary predicate.
    pub fn custom<F>(description: impl Into<String>, predicate: F) -> Self
    where
        F: Fn(&WizardData) -> bool + Send + Sync + 'static,
    {
        Self {
            description: description.into(),
            predicate: Arc::new(predicate),
        }
    }

    /// The key is present and filled (see [`crate::models::FieldValue::is_filled`]).
    pub fn non_empty(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::custom(format!("'{key}' must not be empty"), move |data| {
            data.is_filled(&key)
        })
    }

    /// The key holds text with at least one non-whitespace character.
    pub fn non_empty_text(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::custom(format!("'{key}' must be filled in"), move |data| {
            data.text(&key).is_some_and(|text| !text.trim().is_empty())
        })
    }

    /// The key holds a collection with at least `min` entries.
    pub fn min_items(key: impl Into<String>, min: usize) -> Self {
        let key = key.into();
        Self::custom(
            format!("'{key}' needs at least {min} entries"),
            move |data| data.item_count(&key) >= min,
        )
    }

    /// At least one recipient, and every recipient has a name and an email.
    pub fn recipients_complete(key: impl Into<String>) -> Self {
        let key = key.into();
        Self::custom(
            format!("every entry in '{key}' needs a name and an email"),
            move |data| {
                data.get(&key)
                    .and_then(|value| value.as_recipients())
                    .is_some_and(|recipients| {
                        !recipients.is_empty() && recipients.iter().all(|r| r.is_complete())
                    })
            },
        )
    }

    /// Conjunction of several guards. An empty list always passes.
    pub fn all(guards: Vec<Guard>) -> Self {
        let description = guards
            .iter()
            .map(|g| g.description.as_str())
            .collect::<Vec<_>>()
            .join(" and ");
        Self::custom(description, move |data| guards.iter().all(|g| g.allows(data)))
    }

    /// Evaluate the guard against the data.
    pub fn allows(&self, data: &WizardData) -> bool {
        (self.predicate)(data)
    }

    /// Human readable requirement, used when reporting a rejection.
    pub fn description(&self) -> &str {
        &self.description
    }
}

impl fmt::Debug for Guard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Guard")
            .field("description", &self.description)
            .finish_non_exhaustive()
    }
}
