//! Monthly budget operations

use rusqlite::params;

use super::Database;
use crate::error::{Error, Result};
use crate::models::{BudgetSource, EffectiveBudget, MonthlyBudget};

fn validate_period(year: i32, month: u32) -> Result<()> {
    if !(1..=12).contains(&month) {
        return Err(Error::InvalidData(format!(
            "Month must be between 1 and 12, got {}",
            month
        )));
    }
    if !(1900..=9999).contains(&year) {
        return Err(Error::InvalidData(format!("Year out of range: {}", year)));
    }
    Ok(())
}

impl Database {
    /// Set the planned amount for a category in a month (insert or replace)
    pub fn set_monthly_budget(
        &self,
        category_id: i64,
        year: i32,
        month: u32,
        planned_amount: f64,
    ) -> Result<i64> {
        validate_period(year, month)?;
        if !planned_amount.is_finite() || planned_amount < 0.0 {
            return Err(Error::InvalidData(format!(
                "Planned amount must be a non-negative number, got {}",
                planned_amount
            )));
        }

        let conn = self.conn()?;
        conn.execute(
            r#"
            INSERT INTO monthly_budgets (category_id, year, month, planned_amount)
            VALUES (?1, ?2, ?3, ?4)
            ON CONFLICT(category_id, year, month) DO UPDATE SET planned_amount = excluded.planned_amount
            "#,
            params![category_id, year, month, planned_amount],
        )?;

        let id: i64 = conn.query_row(
            "SELECT id FROM monthly_budgets WHERE category_id = ? AND year = ? AND month = ?",
            params![category_id, year, month],
            |row| row.get(0),
        )?;
        Ok(id)
    }

    /// Explicit budget rows for a month
    pub fn list_monthly_budgets(&self, year: i32, month: u32) -> Result<Vec<MonthlyBudget>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT id, category_id, year, month, planned_amount
            FROM monthly_budgets
            WHERE year = ? AND month = ?
            ORDER BY category_id
            "#,
        )?;

        let budgets = stmt
            .query_map(params![year, month], |row| {
                Ok(MonthlyBudget {
                    id: row.get(0)?,
                    category_id: row.get(1)?,
                    year: row.get(2)?,
                    month: row.get(3)?,
                    planned_amount: row.get(4)?,
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(budgets)
    }

    /// Delete a monthly budget row (the category falls back to its default)
    pub fn delete_monthly_budget(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM monthly_budgets WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Monthly budget {}", id)));
        }
        Ok(())
    }

    /// Budgets in force for a month
    ///
    /// Categories with an explicit row use it; the rest use their positive
    /// default budget if they have one. Categories with neither are unbudgeted.
    pub fn effective_budgets(&self, year: i32, month: u32) -> Result<Vec<EffectiveBudget>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            r#"
            SELECT category_id, planned_amount, 'monthly' AS source
            FROM monthly_budgets
            WHERE year = ?1 AND month = ?2
            UNION ALL
            SELECT c.id, c.default_budget, 'default' AS source
            FROM categories c
            WHERE c.default_budget IS NOT NULL
              AND c.default_budget > 0
              AND NOT EXISTS (
                  SELECT 1 FROM monthly_budgets b
                  WHERE b.category_id = c.id AND b.year = ?1 AND b.month = ?2
              )
            ORDER BY 1
            "#,
        )?;

        let budgets = stmt
            .query_map(params![year, month], |row| {
                let source: String = row.get(2)?;
                Ok(EffectiveBudget {
                    category_id: row.get(0)?,
                    planned_amount: row.get(1)?,
                    source: if source == "monthly" {
                        BudgetSource::Monthly
                    } else {
                        BudgetSource::Default
                    },
                })
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;

        Ok(budgets)
    }
}
