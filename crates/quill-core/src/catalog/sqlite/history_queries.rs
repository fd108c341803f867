//! Processing history queries.

use jiff::Timestamp;
use rusqlite::{params, Row};

use super::utils;
use crate::{
    error::{DatabaseResultExt, Result},
    models::{NewProcessingRecord, ProcessingRecord},
};

const INSERT_RECORD_SQL: &str = "INSERT INTO processing_history (tool_id, input_files, output, succeeded, message, created_at) VALUES (?1, ?2, ?3, ?4, ?5, ?6)";
const RECENT_RECORDS_SQL: &str = "SELECT id, tool_id, input_files, output, succeeded, message, created_at FROM processing_history ORDER BY id DESC LIMIT ?1";

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<ProcessingRecord> {
    Ok(ProcessingRecord {
        id: row.get::<_, i64>(0)? as u64,
        tool_id: row.get(1)?,
        input_files: utils::json(row, 2)?,
        output: utils::optional_json(row, 3)?,
        succeeded: row.get(4)?,
        message: row.get(5)?,
        created_at: utils::timestamp(row, 6)?,
    })
}

impl super::Database {
    /// Appends a record to the processing history.
    pub fn record_processing(&self, record: &NewProcessingRecord) -> Result<ProcessingRecord> {
        let now = Timestamp::now();
        let input_files = serde_json::to_string(&record.input_files)?;
        let output = record
            .output
            .as_ref()
            .map(serde_json::to_string)
            .transpose()?;

        self.connection
            .execute(
                INSERT_RECORD_SQL,
                params![
                    record.tool_id,
                    input_files,
                    output,
                    record.succeeded,
                    record.message,
                    now.to_string()
                ],
            )
            .db_context("Failed to insert processing record")?;

        Ok(ProcessingRecord {
            id: self.connection.last_insert_rowid() as u64,
            tool_id: record.tool_id.clone(),
            input_files: record.input_files.clone(),
            output: record.output.clone(),
            succeeded: record.succeeded,
            message: record.message.clone(),
            created_at: now,
        })
    }

    /// Most recent records first.
    pub fn recent_processing(&self, limit: usize) -> Result<Vec<ProcessingRecord>> {
        let mut stmt = self
            .connection
            .prepare(RECENT_RECORDS_SQL)
            .db_context("Failed to prepare history query")?;
        let records = stmt
            .query_map(params![limit as i64], record_from_row)
            .db_context("Failed to query processing history")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read processing record")?;
        Ok(records)
    }
}
