//! PDF tool model definition.

use serde::{Deserialize, Serialize};

use super::ToolCategory;

/// A PDF tool offered by the catalog (merge, compress, watermark, ...).
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct PdfTool {
    /// Stable slug, e.g. `merge` or `pdf-to-word`
    pub id: String,

    /// Display name
    pub name: String,

    /// One-line summary shown in tool lists
    pub description: String,

    /// Catalog grouping
    pub category: ToolCategory,

    /// Pinned by the user
    pub favorite: bool,

    /// Only available on paid plans
    pub premium: bool,

    /// Settings keys that must hold non-empty text before processing
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub required_settings: Vec<String>,

    /// Suffix used to name the produced file
    pub output_suffix: String,

    /// Whether the tool combines several inputs into one output
    pub multi_file: bool,
}

impl PdfTool {
    /// Case-insensitive substring match over name and description.
    pub fn matches(&self, needle: &str) -> bool {
        let needle = needle.trim().to_lowercase();
        needle.is_empty()
            || self.name.to_lowercase().contains(&needle)
            || self.description.to_lowercase().contains(&needle)
    }
}
