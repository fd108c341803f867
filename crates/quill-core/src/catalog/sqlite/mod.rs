//! SQLite-backed catalog.
//!
//! A fresh [`Database`] connection is opened for every repository call, so
//! the catalog itself holds nothing but the file path and can be shared
//! freely between blocking tasks.

use std::path::{Path, PathBuf};

use rusqlite::Connection;

use super::CatalogRepository;
use crate::{
    error::{DatabaseResultExt, Result},
    models::{
        Envelope, EnvelopeDraft, EnvelopeStats, EnvelopeStatus, NewProcessingRecord, PdfTool,
        ProcessingRecord, ToolFilter,
    },
};

pub mod envelope_queries;
pub mod history_queries;
pub mod migrations;
pub mod tool_queries;
mod utils;

/// Database connection and operations handler.
pub struct Database {
    connection: Connection,
}

impl Database {
    /// Opens a connection and makes sure the schema and seed tools exist.
    pub fn new<P: AsRef<Path>>(path: P) -> Result<Self> {
        let connection = Connection::open(path).db_context("Failed to open database connection")?;

        let db = Self { connection };
        db.initialize_schema()?;
        Ok(db)
    }
}

/// [`CatalogRepository`] stored in a SQLite file.
#[derive(Debug, Clone)]
pub struct SqliteCatalog {
    db_path: PathBuf,
}

impl SqliteCatalog {
    /// Open (and initialize if needed) the database at `path`.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        let db_path = path.into();
        Database::new(&db_path)?;
        Ok(Self { db_path })
    }

    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Database> {
        Database::new(&self.db_path)
    }
}

impl CatalogRepository for SqliteCatalog {
    fn list_tools(&self, filter: &ToolFilter) -> Result<Vec<PdfTool>> {
        self.connect()?.list_tools(filter)
    }

    fn get_tool(&self, id: &str) -> Result<Option<PdfTool>> {
        self.connect()?.get_tool(id)
    }

    fn set_favorite(&self, id: &str, favorite: bool) -> Result<PdfTool> {
        self.connect()?.set_favorite(id, favorite)
    }

    fn create_envelope(&self, draft: &EnvelopeDraft) -> Result<Envelope> {
        self.connect()?.create_envelope(draft)
    }

    fn get_envelope(&self, id: u64) -> Result<Option<Envelope>> {
        self.connect()?.get_envelope(id)
    }

    fn list_envelopes(&self, status: Option<EnvelopeStatus>) -> Result<Vec<Envelope>> {
        self.connect()?.list_envelopes(status)
    }

    fn update_envelope_status(&self, id: u64, status: EnvelopeStatus) -> Result<Envelope> {
        self.connect()?.update_envelope_status(id, status)
    }

    fn envelope_stats(&self) -> Result<EnvelopeStats> {
        self.connect()?.envelope_stats()
    }

    fn record_processing(&self, record: &NewProcessingRecord) -> Result<ProcessingRecord> {
        self.connect()?.record_processing(record)
    }

    fn recent_processing(&self, limit: usize) -> Result<Vec<ProcessingRecord>> {
        self.connect()?.recent_processing(limit)
    }
}
