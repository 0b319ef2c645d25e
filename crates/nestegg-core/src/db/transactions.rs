//! Transaction operations

use chrono::NaiveDate;
use rusqlite::{params, OptionalExtension};

use super::{parse_date, parse_datetime, Database};
use crate::error::{Error, Result};
use crate::models::{NewTransaction, Transaction, TransactionType};

const TRANSACTION_COLUMNS: &str =
    "id, amount, type, category_id, date, debt_id, description, created_at";

/// Check the invariants a transaction must satisfy before it is stored
pub(crate) fn validate_new_transaction(tx: &NewTransaction) -> Result<()> {
    if !tx.amount.is_finite() {
        return Err(Error::InvalidData(format!(
            "Transaction amount must be finite, got {}",
            tx.amount
        )));
    }
    if tx.transaction_type == TransactionType::Savings && tx.category_id.is_some() {
        return Err(Error::InvalidData(
            "Savings transfers cannot have a category".to_string(),
        ));
    }
    // The debt's paid amount moves only through record_debt_payment
    if tx.debt_id.is_some() {
        return Err(Error::InvalidData(
            "Debt repayments must be recorded with record_debt_payment".to_string(),
        ));
    }
    Ok(())
}

impl Database {
    /// Insert a transaction, returning its ID
    pub fn insert_transaction(&self, tx: &NewTransaction) -> Result<i64> {
        validate_new_transaction(tx)?;
        let conn = self.conn()?;

        conn.execute(
            r#"
            INSERT INTO transactions (amount, type, category_id, date, debt_id, description)
            VALUES (?, ?, ?, ?, ?, ?)
            "#,
            params![
                tx.amount,
                tx.transaction_type.as_str(),
                tx.category_id,
                tx.date.to_string(),
                tx.debt_id,
                tx.description,
            ],
        )?;

        Ok(conn.last_insert_rowid())
    }

    /// Get a transaction by ID
    pub fn get_transaction(&self, id: i64) -> Result<Option<Transaction>> {
        let conn = self.conn()?;
        let sql = format!("SELECT {} FROM transactions WHERE id = ?", TRANSACTION_COLUMNS);
        let tx = conn
            .query_row(&sql, params![id], Self::row_to_transaction)
            .optional()?;
        Ok(tx)
    }

    /// List most recent transactions first
    pub fn list_transactions(&self, limit: i64, offset: i64) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM transactions ORDER BY date DESC, id DESC LIMIT ? OFFSET ?",
            TRANSACTION_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let txs = stmt
            .query_map(params![limit, offset], Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(txs)
    }

    /// Transactions dated within `from..=to` (inclusive both ends)
    pub fn transactions_between(&self, from: NaiveDate, to: NaiveDate) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM transactions WHERE date BETWEEN ?1 AND ?2 ORDER BY date, id",
            TRANSACTION_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let txs = stmt
            .query_map(
                params![from.to_string(), to.to_string()],
                Self::row_to_transaction,
            )?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(txs)
    }

    /// All repayments recorded against a debt
    pub fn transactions_for_debt(&self, debt_id: i64) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM transactions WHERE debt_id = ? ORDER BY date, id",
            TRANSACTION_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let txs = stmt
            .query_map(params![debt_id], Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(txs)
    }

    /// All transactions in a category
    pub fn transactions_for_category(&self, category_id: i64) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM transactions WHERE category_id = ? ORDER BY date, id",
            TRANSACTION_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let txs = stmt
            .query_map(params![category_id], Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(txs)
    }

    /// Full history, oldest first (used for lifetime aggregates)
    pub fn list_all_transactions(&self) -> Result<Vec<Transaction>> {
        let conn = self.conn()?;
        let sql = format!(
            "SELECT {} FROM transactions ORDER BY date, id",
            TRANSACTION_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;
        let txs = stmt
            .query_map([], Self::row_to_transaction)?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        Ok(txs)
    }

    /// Delete a transaction
    ///
    /// Deleting a debt repayment also takes its amount back off the debt's
    /// `paid_amount`, in the same SQL transaction.
    pub fn delete_transaction(&self, id: i64) -> Result<()> {
        let mut conn = self.conn()?;
        let tx = conn.transaction()?;

        let row: Option<(f64, Option<i64>)> = tx
            .query_row(
                "SELECT amount, debt_id FROM transactions WHERE id = ?",
                params![id],
                |row| Ok((row.get(0)?, row.get(1)?)),
            )
            .optional()?;

        let (amount, debt_id) = row.ok_or_else(|| Error::NotFound(format!("Transaction {}", id)))?;

        tx.execute("DELETE FROM transactions WHERE id = ?", params![id])?;
        if let Some(debt_id) = debt_id {
            tx.execute(
                "UPDATE debts SET paid_amount = MAX(0, paid_amount - ?) WHERE id = ?",
                params![amount, debt_id],
            )?;
        }

        tx.commit()?;
        Ok(())
    }

    pub(crate) fn row_to_transaction(row: &rusqlite::Row) -> rusqlite::Result<Transaction> {
        let type_str: String = row.get(2)?;
        let date_str: String = row.get(4)?;
        let created_at_str: String = row.get(7)?;

        let transaction_type = type_str.parse::<TransactionType>().map_err(|e| {
            rusqlite::Error::FromSqlConversionFailure(
                2,
                rusqlite::types::Type::Text,
                Box::new(Error::InvalidData(e)),
            )
        })?;

        Ok(Transaction {
            id: row.get(0)?,
            amount: row.get(1)?,
            transaction_type,
            category_id: row.get(3)?,
            date: parse_date(&date_str, 4)?,
            debt_id: row.get(5)?,
            description: row.get(6)?,
            created_at: parse_datetime(&created_at_str),
        })
    }
}
