//! The data accumulator: step-scoped values that survive navigation.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::models::{FieldValue, FileHandle, Recipient, RecipientRole};

/// Key under which selected files are stored.
pub const FILES_KEY: &str = "files";
/// Key under which envelope recipients are stored.
pub const RECIPIENTS_KEY: &str = "recipients";

/// Mutable bag of everything the user entered during one wizard session.
///
/// Every write is an upsert on a single key; no operation clears unrelated
/// keys. Only a wizard reset empties the whole accumulator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WizardData {
    values: BTreeMap<String, FieldValue>,
}

/// Partial update of a recipient; `None` leaves the field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecipientPatch {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub role: Option<RecipientRole>,
}

impl WizardData {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, key: &str) -> Option<&FieldValue> {
        self.values.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    /// Insert or overwrite one key, returning the previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<FieldValue>) -> Option<FieldValue> {
        self.values.insert(key.into(), value.into())
    }

    pub fn remove(&mut self, key: &str) -> Option<FieldValue> {
        self.values.remove(key)
    }

    /// Present and filled; empty collections and blank text count as absent.
    pub fn is_filled(&self, key: &str) -> bool {
        self.values.get(key).is_some_and(FieldValue::is_filled)
    }

    pub fn text(&self, key: &str) -> Option<&str> {
        self.values.get(key).and_then(FieldValue::as_text)
    }

    pub fn number(&self, key: &str) -> Option<f64> {
        self.values.get(key).and_then(FieldValue::as_number)
    }

    pub fn flag(&self, key: &str) -> Option<bool> {
        self.values.get(key).and_then(FieldValue::as_flag)
    }

    /// Number of entries held by a collection value, zero otherwise.
    pub fn item_count(&self, key: &str) -> usize {
        match self.values.get(key) {
            Some(FieldValue::List(items)) => items.len(),
            Some(FieldValue::Files(files)) => files.len(),
            Some(FieldValue::Recipients(recipients)) => recipients.len(),
            _ => 0,
        }
    }

    /// Selected files, empty when none were added.
    pub fn files(&self) -> &[FileHandle] {
        self.values
            .get(FILES_KEY)
            .and_then(FieldValue::as_files)
            .unwrap_or(&[])
    }

    /// Envelope recipients, empty when none were added.
    pub fn recipients(&self) -> &[Recipient] {
        self.values
            .get(RECIPIENTS_KEY)
            .and_then(FieldValue::as_recipients)
            .unwrap_or(&[])
    }

    /// Append a file to the `files` collection, creating it if needed.
    pub fn push_file(&mut self, file: FileHandle) {
        match self.values.get_mut(FILES_KEY) {
            Some(FieldValue::Files(files)) => files.push(file),
            _ => {
                self.values
                    .insert(FILES_KEY.to_string(), FieldValue::Files(vec![file]));
            }
        }
    }

    /// Drop every file with the given name. Returns whether anything was removed.
    pub fn remove_file(&mut self, name: &str) -> bool {
        match self.values.get_mut(FILES_KEY) {
            Some(FieldValue::Files(files)) => {
                let before = files.len();
                files.retain(|f| f.name != name);
                files.len() != before
            }
            _ => false,
        }
    }

    /// Append a recipient, creating the collection if needed.
    pub fn add_recipient(&mut self, recipient: Recipient) {
        match self.values.get_mut(RECIPIENTS_KEY) {
            Some(FieldValue::Recipients(recipients)) => recipients.push(recipient),
            _ => {
                self.values.insert(
                    RECIPIENTS_KEY.to_string(),
                    FieldValue::Recipients(vec![recipient]),
                );
            }
        }
    }

    /// Apply a patch to the recipient at `index`. Returns false when out of range.
    pub fn update_recipient(&mut self, index: usize, patch: RecipientPatch) -> bool {
        let Some(FieldValue::Recipients(recipients)) = self.values.get_mut(RECIPIENTS_KEY) else {
            return false;
        };
        let Some(recipient) = recipients.get_mut(index) else {
            return false;
        };
        if let Some(name) = patch.name {
            recipient.name = name;
        }
        if let Some(email) = patch.email {
            recipient.email = email;
        }
        if let Some(role) = patch.role {
            recipient.role = role;
        }
        true
    }

    /// Remove the recipient at `index`. Returns false when out of range.
    pub fn remove_recipient(&mut self, index: usize) -> bool {
        match self.values.get_mut(RECIPIENTS_KEY) {
            Some(FieldValue::Recipients(recipients)) if index < recipients.len() => {
                recipients.remove(index);
                true
            }
            _ => false,
        }
    }

    pub fn clear(&mut self) {
        self.values.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &FieldValue)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }
}
