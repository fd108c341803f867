//! Builder for creating and configuring Studio instances.

use std::{
    path::{Path, PathBuf},
    sync::Arc,
    time::Duration,
};

use log::debug;
use tokio::task;

use super::Studio;
use crate::{
    catalog::{CatalogRepository, MemoryCatalog, SqliteCatalog},
    error::{Result, StudioError},
    processing::{Clock, ProcessingBackend, SimulatedBackend, TokioClock, DEFAULT_TICK},
};

/// Builder for creating and configuring Studio instances.
#[derive(Clone)]
pub struct StudioBuilder {
    database_path: Option<PathBuf>,
    in_memory: bool,
    catalog: Option<Arc<dyn CatalogRepository>>,
    backend: Option<Arc<dyn ProcessingBackend>>,
    clock: Option<Arc<dyn Clock>>,
    tick: Duration,
}

impl StudioBuilder {
    /// Creates a new builder with default settings.
    pub fn new() -> Self {
        Self {
            database_path: None,
            in_memory: false,
            catalog: None,
            backend: None,
            clock: None,
            tick: DEFAULT_TICK,
        }
    }

    /// Sets a custom database file path.
    ///
    /// If not specified, uses XDG Base Directory specification:
    /// `$XDG_DATA_HOME/quill/quill.db` or `~/.local/share/quill/quill.db`
    pub fn with_database_path<P: AsRef<Path>>(mut self, path: Option<P>) -> Self {
        if let Some(path) = path {
            self.database_path = Some(path.as_ref().to_path_buf());
        }
        self
    }

    /// Keep everything in memory; nothing is written to disk.
    pub fn in_memory(mut self) -> Self {
        self.in_memory = true;
        self
    }

    /// Use an already constructed repository instead of opening one.
    pub fn with_catalog(mut self, catalog: Arc<dyn CatalogRepository>) -> Self {
        self.catalog = Some(catalog);
        self
    }

    /// Replace the simulated processing backend.
    pub fn with_backend(mut self, backend: Arc<dyn ProcessingBackend>) -> Self {
        self.backend = Some(backend);
        self
    }

    /// Replace the real-time clock driving progress ticks.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Delay between progress ticks.
    pub fn with_tick(mut self, tick: Duration) -> Self {
        self.tick = tick;
        self
    }

    /// Builds the configured studio instance.
    ///
    /// # Errors
    ///
    /// Returns `StudioError::FileSystem` if the database directory cannot be
    /// created, `StudioError::XdgDirectory` if no default location exists and
    /// `StudioError::Database` if database initialization fails.
    pub async fn build(self) -> Result<Studio> {
        let catalog: Arc<dyn CatalogRepository> = match self.catalog {
            Some(catalog) => catalog,
            None if self.in_memory => {
                debug!("using in-memory catalog");
                Arc::new(MemoryCatalog::new())
            }
            None => {
                let db_path = match self.database_path {
                    Some(path) => path,
                    None => Self::default_database_path()?,
                };
                Self::open_sqlite(db_path).await?
            }
        };

        Ok(Studio::new(
            catalog,
            self.backend
                .unwrap_or_else(|| Arc::new(SimulatedBackend::new())),
            self.clock.unwrap_or_else(|| Arc::new(TokioClock)),
            self.tick,
        ))
    }

    async fn open_sqlite(db_path: PathBuf) -> Result<Arc<dyn CatalogRepository>> {
        if let Some(parent) = db_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| StudioError::FileSystem {
                path: parent.to_path_buf(),
                source: e,
            })?;
        }

        debug!("opening catalog at {}", db_path.display());
        let catalog = task::spawn_blocking(move || SqliteCatalog::open(db_path))
            .await
            .map_err(StudioError::join)??;
        Ok(Arc::new(catalog))
    }

    /// Returns the default database path following XDG Base Directory
    /// specification.
    fn default_database_path() -> Result<PathBuf> {
        xdg::BaseDirectories::with_prefix("quill")
            .place_data_file("quill.db")
            .map_err(|e| StudioError::XdgDirectory(e.to_string()))
    }
}

impl Default for StudioBuilder {
    fn default() -> Self {
        Self::new()
    }
}
