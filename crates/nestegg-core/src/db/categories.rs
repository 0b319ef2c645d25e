//! Category operations

use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::Category;

impl Database {
    /// Create a category, or return the existing one with the same name
    ///
    /// When the category already exists and `default_budget` is provided,
    /// the default budget is updated.
    pub fn upsert_category(&self, name: &str, default_budget: Option<f64>) -> Result<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidData("Category name cannot be empty".to_string()));
        }
        if let Some(budget) = default_budget {
            if !budget.is_finite() || budget < 0.0 {
                return Err(Error::InvalidData(format!(
                    "Default budget must be a non-negative number, got {}",
                    budget
                )));
            }
        }

        let conn = self.conn()?;

        let existing: Option<i64> = conn
            .query_row(
                "SELECT id FROM categories WHERE name = ? COLLATE NOCASE",
                params![name],
                |row| row.get(0),
            )
            .optional()?;

        if let Some(id) = existing {
            if default_budget.is_some() {
                conn.execute(
                    "UPDATE categories SET default_budget = ? WHERE id = ?",
                    params![default_budget, id],
                )?;
            }
            return Ok(id);
        }

        conn.execute(
            "INSERT INTO categories (name, default_budget) VALUES (?, ?)",
            params![name, default_budget],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// List all categories ordered by name
    pub fn list_categories(&self) -> Result<Vec<Category>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, default_budget, created_at FROM categories ORDER BY name COLLATE NOCASE",
        )?;

        let categories = stmt
            .query_map([], Self::row_to_category)?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(categories)
    }

    /// Get a category by ID
    pub fn get_category(&self, id: i64) -> Result<Option<Category>> {
        let conn = self.conn()?;
        let category = conn
            .query_row(
                "SELECT id, name, default_budget, created_at FROM categories WHERE id = ?",
                params![id],
                Self::row_to_category,
            )
            .optional()?;
        Ok(category)
    }

    /// Find a category by name (case-insensitive)
    pub fn find_category(&self, name: &str) -> Result<Option<Category>> {
        let conn = self.conn()?;
        let category = conn
            .query_row(
                "SELECT id, name, default_budget, created_at FROM categories WHERE name = ? COLLATE NOCASE",
                params![name.trim()],
                Self::row_to_category,
            )
            .optional()?;
        Ok(category)
    }

    /// Delete a category
    ///
    /// Transactions keep their rows with the category cleared; monthly budgets
    /// for the category are removed.
    pub fn delete_category(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM categories WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Category {}", id)));
        }
        Ok(())
    }

    fn row_to_category(row: &rusqlite::Row) -> rusqlite::Result<Category> {
        let created_at: String = row.get(3)?;
        Ok(Category {
            id: row.get(0)?,
            name: row.get(1)?,
            default_budget: row.get(2)?,
            created_at: parse_datetime(&created_at),
        })
    }
}
