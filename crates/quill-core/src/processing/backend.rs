//! Processing backend abstraction and the simulated implementation.

use std::collections::BTreeMap;

use log::info;
use serde::Serialize;

use crate::{
    error::{Result, StudioError},
    models::{FieldValue, FileHandle, PdfTool},
};

/// Everything a backend needs to run one tool.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ProcessingJob {
    pub tool: PdfTool,
    pub files: Vec<FileHandle>,
    /// Every wizard value except the file list
    pub settings: BTreeMap<String, FieldValue>,
}

/// What a backend hands back after a successful run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProcessingReceipt {
    pub output: FileHandle,
    pub message: Option<String>,
}

/// Runs a PDF tool over a set of input files.
///
/// Implementations are called from the blocking pool and may take as long
/// as they need.
pub trait ProcessingBackend: Send + Sync {
    /// # Errors
    ///
    /// Returns `StudioError::Processing` when the tool cannot produce an
    /// output for the given job.
    fn process(&self, job: &ProcessingJob) -> Result<ProcessingReceipt>;
}

/// Backend that fabricates an output name without touching file content.
#[derive(Debug, Clone, Default)]
pub struct SimulatedBackend {
    failure: Option<String>,
}

impl SimulatedBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// A backend that rejects every job with `message`.
    pub fn failing(message: impl Into<String>) -> Self {
        Self {
            failure: Some(message.into()),
        }
    }

    /// Output name for a tool: `<stem>-<suffix>.pdf`, or `<suffix>.pdf`
    /// when the tool combines several inputs.
    pub fn output_name(tool: &PdfTool, files: &[FileHandle]) -> String {
        match files.first() {
            Some(first) if !tool.multi_file => format!("{}-{}.pdf", first.stem(), tool.output_suffix),
            _ => format!("{}.pdf", tool.output_suffix),
        }
    }
}

impl ProcessingBackend for SimulatedBackend {
    fn process(&self, job: &ProcessingJob) -> Result<ProcessingReceipt> {
        if let Some(message) = &self.failure {
            return Err(StudioError::processing(message));
        }
        if job.files.is_empty() {
            return Err(StudioError::processing("no input files"));
        }

        let name = Self::output_name(&job.tool, &job.files);
        let size = job.files.iter().map(|f| f.size).sum();
        info!(
            "simulated '{}' over {} file(s) -> {name}",
            job.tool.id,
            job.files.len()
        );

        Ok(ProcessingReceipt {
            output: FileHandle::new(name.clone(), size, format!("processed/{name}")),
            message: Some(format!("{} completed", job.tool.name)),
        })
    }
}
