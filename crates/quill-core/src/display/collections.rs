//! Newtype wrappers for displaying lists of catalog objects.

use std::fmt;

use crate::models::{Envelope, PdfTool, ProcessingRecord};

/// Implements the shared accessors of a `Vec` newtype.
macro_rules! collection {
    ($name:ident, $item:ty) => {
        impl $name {
            pub fn is_empty(&self) -> bool {
                self.0.is_empty()
            }

            pub fn len(&self) -> usize {
                self.0.len()
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $item> {
                self.0.iter()
            }
        }

        impl IntoIterator for $name {
            type Item = $item;
            type IntoIter = std::vec::IntoIter<$item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.into_iter()
            }
        }

        impl<'a> IntoIterator for &'a $name {
            type Item = &'a $item;
            type IntoIter = std::slice::Iter<'a, $item>;

            fn into_iter(self) -> Self::IntoIter {
                self.0.iter()
            }
        }
    };
}

/// Catalog tools, one line each.
///
/// ```rust
/// use quill_core::{catalog::default_tools, display::Tools};
///
/// let output = Tools(default_tools()).to_string();
/// assert!(output.contains("**Merge PDF** `merge`"));
/// assert_eq!(Tools(vec![]).to_string(), "No tools found.\n");
/// ```
pub struct Tools(pub Vec<PdfTool>);

collection!(Tools, PdfTool);

impl fmt::Display for Tools {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No tools found.");
        }
        for tool in &self.0 {
            tool.fmt_list_item(f)?;
        }
        Ok(())
    }
}

/// Envelope summaries.
pub struct Envelopes(pub Vec<Envelope>);

collection!(Envelopes, Envelope);

impl fmt::Display for Envelopes {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No envelopes found.");
        }
        for envelope in &self.0 {
            envelope.fmt_summary(f)?;
        }
        Ok(())
    }
}

/// Recent processing runs.
pub struct ProcessingHistory(pub Vec<ProcessingRecord>);

collection!(ProcessingHistory, ProcessingRecord);

impl fmt::Display for ProcessingHistory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.0.is_empty() {
            return writeln!(f, "No processing history yet.");
        }
        for record in &self.0 {
            write!(f, "{record}")?;
        }
        Ok(())
    }
}
