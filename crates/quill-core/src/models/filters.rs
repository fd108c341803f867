//! Filter types for catalog queries.

use super::{PdfTool, ToolCategory};
use crate::params::ListTools;

/// Filter for listing PDF tools.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ToolFilter {
    /// Only tools of this category
    pub category: Option<ToolCategory>,

    /// Only tools the user marked as favorite
    pub favorites_only: bool,

    /// Case-insensitive substring over name and description
    pub search: Option<String>,
}

impl ToolFilter {
    /// Create a filter that only keeps favorites.
    pub fn favorites() -> Self {
        Self {
            favorites_only: true,
            ..Self::default()
        }
    }

    /// Whether a tool passes every criterion of the filter.
    pub fn accepts(&self, tool: &PdfTool) -> bool {
        if let Some(category) = self.category {
            if tool.category != category {
                return false;
            }
        }
        if self.favorites_only && !tool.favorite {
            return false;
        }
        match &self.search {
            Some(needle) => tool.matches(needle),
            None => true,
        }
    }
}

impl From<&ListTools> for ToolFilter {
    fn from(params: &ListTools) -> Self {
        Self {
            category: params.category,
            favorites_only: params.favorites,
            search: params.search.clone().filter(|s| !s.trim().is_empty()),
        }
    }
}
