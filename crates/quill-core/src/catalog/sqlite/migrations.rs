//! Schema initialization and tool seeding.

use rusqlite::params;

use crate::{
    catalog::default_tools,
    error::{DatabaseResultExt, Result},
};

const SEED_TOOL_SQL: &str = "INSERT OR IGNORE INTO tools (id, position, name, description, category, premium, required_settings, output_suffix, multi_file) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)";

impl super::Database {
    /// Initializes the database schema using the embedded SQL file.
    pub(super) fn initialize_schema(&self) -> Result<()> {
        self.connection
            .execute("PRAGMA foreign_keys = ON", [])
            .db_context("Failed to enable foreign keys")?;

        let schema_sql = include_str!("../../../assets/schema.sql");
        self.connection
            .execute_batch(schema_sql)
            .db_context("Failed to initialize database schema")?;

        self.seed_tools()
    }

    /// Insert default tools that are missing. Existing rows, and with them
    /// the user's favorites, are left alone.
    fn seed_tools(&self) -> Result<()> {
        let mut stmt = self
            .connection
            .prepare_cached(SEED_TOOL_SQL)
            .db_context("Failed to prepare tool seed")?;

        for (position, tool) in default_tools().iter().enumerate() {
            let required = serde_json::to_string(&tool.required_settings)?;
            stmt.execute(params![
                tool.id,
                position as i64,
                tool.name,
                tool.description,
                tool.category.as_str(),
                tool.premium,
                required,
                tool.output_suffix,
                tool.multi_file,
            ])
            .db_context("Failed to seed tools")?;
        }
        Ok(())
    }
}
