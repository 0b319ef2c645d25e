//! Debt operations

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

use super::{parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{Debt, TransactionType};

impl Database {
    /// Create a debt with its original principal
    pub fn create_debt(&self, name: &str, original_amount: f64) -> Result<i64> {
        let name = name.trim();
        if name.is_empty() {
            return Err(Error::InvalidData("Debt name cannot be empty".to_string()));
        }
        if !original_amount.is_finite() || original_amount <= 0.0 {
            return Err(Error::InvalidData(format!(
                "Debt amount must be positive, got {}",
                original_amount
            )));
        }

        let conn = self.conn()?;
        conn.execute(
            "INSERT INTO debts (name, original_amount) VALUES (?, ?)",
            params![name, original_amount],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// List all debts, paid off or not
    pub fn list_debts(&self) -> Result<Vec<Debt>> {
        let conn = self.conn()?;
        let mut stmt = conn.prepare(
            "SELECT id, name, original_amount, paid_amount, created_at FROM debts ORDER BY id",
        )?;
        let debts = stmt
            .query_map([], Self::row_to_debt)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(debts)
    }

    /// Get a debt by ID
    pub fn get_debt(&self, id: i64) -> Result<Option<Debt>> {
        let conn = self.conn()?;
        let debt = conn
            .query_row(
                "SELECT id, name, original_amount, paid_amount, created_at FROM debts WHERE id = ?",
                params![id],
                Self::row_to_debt,
            )
            .optional()?;
        Ok(debt)
    }

    /// Record a repayment against a debt
    ///
    /// Inserts an expense transaction linked to the debt and adds the amount to
    /// the debt's `paid_amount`, atomically. Returns the new transaction ID.
    pub fn record_debt_payment(
        &self,
        debt_id: i64,
        amount: f64,
        date: NaiveDate,
        category_id: Option<i64>,
        description: Option<&str>,
    ) -> Result<i64> {
        if !amount.is_finite() || amount <= 0.0 {
            return Err(Error::InvalidData(format!(
                "Payment amount must be positive, got {}",
                amount
            )));
        }

        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let name: Option<String> = tx
            .query_row(
                "SELECT name FROM debts WHERE id = ?",
                params![debt_id],
                |row| row.get(0),
            )
            .optional()?;
        let name = name.ok_or_else(|| Error::NotFound(format!("Debt {}", debt_id)))?;

        let description = description
            .map(str::to_string)
            .unwrap_or_else(|| format!("Payment: {}", name));

        tx.execute(
            r#"
            INSERT INTO transactions (amount, type, category_id, date, debt_id, description)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                amount,
                TransactionType::Expense.as_str(),
                category_id,
                date.to_string(),
                debt_id,
                description,
            ],
        )?;
        let transaction_id = tx.last_insert_rowid();

        tx.execute(
            "UPDATE debts SET paid_amount = paid_amount + ? WHERE id = ?",
            params![amount, debt_id],
        )?;

        tx.commit()?;
        Ok(transaction_id)
    }

    /// Delete a debt (its repayment transactions stay, unlinked)
    pub fn delete_debt(&self, id: i64) -> Result<()> {
        let conn = self.conn()?;
        let deleted = conn.execute("DELETE FROM debts WHERE id = ?", params![id])?;
        if deleted == 0 {
            return Err(Error::NotFound(format!("Debt {}", id)));
        }
        Ok(())
    }

    fn row_to_debt(row: &rusqlite::Row) -> rusqlite::Result<Debt> {
        let created_at: String = row.get(4)?;
        Ok(Debt {
            id: row.get(0)?,
            name: row.get(1)?,
            original_amount: row.get(2)?,
            paid_amount: row.get(3)?,
            created_at: parse_datetime(&created_at),
        })
    }
}
