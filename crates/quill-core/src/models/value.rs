//! Values collected by wizards: form fields, file handles and recipients.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::RecipientRole;
use crate::error::{Result, StudioError};

/// Reference to a file selected by the user.
///
/// The wizard only ever looks at presence and count; `location` is an
/// opaque content reference (a local path or an upload id) that is handed
/// to the processing backend untouched.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct FileHandle {
    /// Display name, usually the file name
    pub name: String,

    /// Size in bytes
    #[serde(default)]
    pub size: u64,

    /// Content reference passed through to the backend
    #[serde(default)]
    pub location: String,
}

impl FileHandle {
    /// Create a handle from its parts.
    pub fn new(name: impl Into<String>, size: u64, location: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size,
            location: location.into(),
        }
    }

    /// Build a handle for a local file, reading its size from metadata.
    pub fn from_path(path: &Path) -> Result<Self> {
        let metadata = std::fs::metadata(path).map_err(|e| StudioError::FileSystem {
            path: path.to_path_buf(),
            source: e,
        })?;
        if !metadata.is_file() {
            return Err(StudioError::invalid_input("file")
                .with_reason(format!("'{}' is not a regular file", path.display())));
        }
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .map(String::from)
            .ok_or_else(|| {
                StudioError::invalid_input("file")
                    .with_reason(format!("'{}' has no usable file name", path.display()))
            })?;
        Ok(Self {
            name,
            size: metadata.len(),
            location: path.display().to_string(),
        })
    }

    /// File name without its final extension.
    pub fn stem(&self) -> &str {
        match self.name.rsplit_once('.') {
            Some((stem, _)) if !stem.is_empty() => stem,
            _ => &self.name,
        }
    }
}

/// A person an envelope is sent to.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
pub struct Recipient {
    /// Full name as shown on the signature
    pub name: String,

    /// Delivery address
    pub email: String,

    /// What the recipient is asked to do
    #[serde(default)]
    pub role: RecipientRole,
}

impl Recipient {
    /// Create a signer.
    pub fn signer(name: impl Into<String>, email: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            email: email.into(),
            role: RecipientRole::Signer,
        }
    }

    /// Both name and email contain something other than whitespace.
    pub fn is_complete(&self) -> bool {
        !self.name.trim().is_empty() && !self.email.trim().is_empty()
    }
}

/// Any value the data accumulator can hold.
///
/// Values are opaque to the controller; guards inspect them through
/// [`FieldValue::is_filled`] and the typed accessors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "schema", derive(schemars::JsonSchema))]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum FieldValue {
    Text(String),
    Number(f64),
    Flag(bool),
    List(Vec<String>),
    Files(Vec<FileHandle>),
    Recipients(Vec<Recipient>),
}

impl FieldValue {
    /// Whether the value counts as "entered".
    ///
    /// Empty collections and whitespace-only text are treated exactly like an
    /// absent key. Numbers and flags are always filled once present.
    pub fn is_filled(&self) -> bool {
        match self {
            FieldValue::Text(text) => !text.trim().is_empty(),
            FieldValue::Number(_) | FieldValue::Flag(_) => true,
            FieldValue::List(items) => !items.is_empty(),
            FieldValue::Files(files) => !files.is_empty(),
            FieldValue::Recipients(recipients) => !recipients.is_empty(),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FieldValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn as_number(&self) -> Option<f64> {
        match self {
            FieldValue::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_flag(&self) -> Option<bool> {
        match self {
            FieldValue::Flag(flag) => Some(*flag),
            _ => None,
        }
    }

    pub fn as_files(&self) -> Option<&[FileHandle]> {
        match self {
            FieldValue::Files(files) => Some(files),
            _ => None,
        }
    }

    pub fn as_recipients(&self) -> Option<&[Recipient]> {
        match self {
            FieldValue::Recipients(recipients) => Some(recipients),
            _ => None,
        }
    }

    /// Parse a `key=value` style literal from the command line.
    ///
    /// `true`/`false` become flags, anything that parses as a number becomes
    /// a number, comma-separated input becomes a list, the rest is text.
    pub fn parse_literal(raw: &str) -> Self {
        let trimmed = raw.trim();
        match trimmed {
            "true" => return FieldValue::Flag(true),
            "false" => return FieldValue::Flag(false),
            _ => {}
        }
        if let Ok(n) = trimmed.parse::<f64>() {
            if n.is_finite() {
                return FieldValue::Number(n);
            }
        }
        if trimmed.contains(',') {
            return FieldValue::List(
                trimmed
                    .split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect(),
            );
        }
        FieldValue::Text(raw.to_string())
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        FieldValue::Text(value.to_string())
    }
}

impl From<String> for FieldValue {
    fn from(value: String) -> Self {
        FieldValue::Text(value)
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        FieldValue::Flag(value)
    }
}

impl From<f64> for FieldValue {
    fn from(value: f64) -> Self {
        FieldValue::Number(value)
    }
}

impl From<Vec<FileHandle>> for FieldValue {
    fn from(value: Vec<FileHandle>) -> Self {
        FieldValue::Files(value)
    }
}

impl From<Vec<Recipient>> for FieldValue {
    fn from(value: Vec<Recipient>) -> Self {
        FieldValue::Recipients(value)
    }
}
