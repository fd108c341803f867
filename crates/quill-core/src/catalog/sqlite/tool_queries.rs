//! Tool catalog queries.

use rusqlite::{params, OptionalExtension, Row};

use super::utils;
use crate::{
    error::{DatabaseResultExt, Result, StudioError},
    models::{PdfTool, ToolFilter},
};

const TOOL_COLUMNS: &str =
    "id, name, description, category, favorite, premium, required_settings, output_suffix, multi_file";
const SELECT_TOOL_SQL: &str = "SELECT id, name, description, category, favorite, premium, required_settings, output_suffix, multi_file FROM tools WHERE id = ?1";
const UPDATE_FAVORITE_SQL: &str = "UPDATE tools SET favorite = ?1 WHERE id = ?2";

fn tool_from_row(row: &Row<'_>) -> rusqlite::Result<PdfTool> {
    Ok(PdfTool {
        id: row.get(0)?,
        name: row.get(1)?,
        description: row.get(2)?,
        category: utils::parsed(row, 3)?,
        favorite: row.get(4)?,
        premium: row.get(5)?,
        required_settings: utils::json(row, 6)?,
        output_suffix: row.get(7)?,
        multi_file: row.get(8)?,
    })
}

impl super::Database {
    /// Lists tools in catalog order, applying every criterion of `filter`.
    pub fn list_tools(&self, filter: &ToolFilter) -> Result<Vec<PdfTool>> {
        let mut query = format!("SELECT {TOOL_COLUMNS} FROM tools");
        let mut conditions = Vec::new();
        let mut params_vec: Vec<Box<dyn rusqlite::ToSql>> = Vec::new();

        if let Some(category) = filter.category {
            conditions.push("category = ?");
            params_vec.push(Box::new(category.as_str()));
        }
        if filter.favorites_only {
            conditions.push("favorite = 1");
        }
        if let Some(needle) = filter.search.as_deref().map(str::trim) {
            if !needle.is_empty() {
                let needle = needle.to_lowercase();
                conditions.push("(instr(lower(name), ?) > 0 OR instr(lower(description), ?) > 0)");
                params_vec.push(Box::new(needle.clone()));
                params_vec.push(Box::new(needle));
            }
        }

        if !conditions.is_empty() {
            query.push_str(" WHERE ");
            query.push_str(&conditions.join(" AND "));
        }
        query.push_str(" ORDER BY position");

        let mut stmt = self
            .connection
            .prepare(&query)
            .db_context("Failed to prepare tool query")?;
        let params_refs: Vec<&dyn rusqlite::ToSql> = params_vec.iter().map(|p| p.as_ref()).collect();
        let tools = stmt
            .query_map(params_refs.as_slice(), tool_from_row)
            .db_context("Failed to query tools")?
            .collect::<rusqlite::Result<Vec<_>>>()
            .db_context("Failed to read tool row")?;

        Ok(tools)
    }

    /// Retrieves a tool by its id.
    pub fn get_tool(&self, id: &str) -> Result<Option<PdfTool>> {
        self.connection
            .query_row(SELECT_TOOL_SQL, params![id], tool_from_row)
            .optional()
            .db_context("Failed to query tool")
    }

    /// Pins or unpins a tool and returns its new state.
    pub fn set_favorite(&self, id: &str, favorite: bool) -> Result<PdfTool> {
        let changed = self
            .connection
            .execute(UPDATE_FAVORITE_SQL, params![favorite, id])
            .db_context("Failed to update favorite")?;
        if changed == 0 {
            return Err(StudioError::ToolNotFound { id: id.to_string() });
        }

        self.get_tool(id)?
            .ok_or_else(|| StudioError::ToolNotFound { id: id.to_string() })
    }
}
