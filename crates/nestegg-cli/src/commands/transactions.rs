//! Transaction command implementations

use anyhow::{Context, Result};
use nestegg_core::db::Database;
use nestegg_core::models::{NewTransaction, TransactionType};

use super::{format_amount, parse_date, resolve_category, truncate};

pub fn cmd_transactions_list(db: &Database, limit: i64) -> Result<()> {
    let transactions = db.list_transactions(limit, 0)?;

    if transactions.is_empty() {
        println!("No transactions found. Record one with:");
        println!("  nestegg transactions add expense 12.50 --category Groceries");
        return Ok(());
    }

    println!();
    println!("📝 Recent Transactions");
    println!("   ─────────────────────────────────────────────────────────────");

    for tx in transactions {
        let amount_str = match tx.transaction_type {
            TransactionType::Expense => {
                format!("\x1b[31m{:>10}\x1b[0m", format_amount(tx.amount)) // Red for expenses
            }
            TransactionType::Income => {
                format!("\x1b[32m{:>10}\x1b[0m", format_amount(tx.amount)) // Green for income
            }
            TransactionType::Savings => format!("{:>10}", format_amount(tx.amount)),
        };
        let debt_marker = if tx.debt_id.is_some() { " (debt)" } else { "" };

        println!(
            "   [{:>4}] {} │ {:<8} │ {} │ {}{}",
            tx.id,
            tx.date,
            tx.transaction_type,
            amount_str,
            truncate(tx.description.as_deref().unwrap_or(""), 35),
            debt_marker
        );
    }

    Ok(())
}

pub fn cmd_transactions_add(
    db: &Database,
    kind: &str,
    amount: f64,
    date: Option<&str>,
    category: Option<&str>,
    description: Option<&str>,
) -> Result<()> {
    let transaction_type: TransactionType = kind
        .parse()
        .map_err(|e: String| anyhow::anyhow!(e))
        .context("Type must be income, expense, or savings")?;
    let date = parse_date(date)?;

    let mut tx = NewTransaction::new(transaction_type, amount, date);
    if let Some(name) = category {
        if transaction_type == TransactionType::Savings {
            anyhow::bail!("Savings transfers cannot have a category");
        }
        tx = tx.with_category(resolve_category(db, name)?);
    }
    if let Some(text) = description {
        tx = tx.with_description(text);
    }

    let id = db.insert_transaction(&tx)?;

    println!(
        "✅ Recorded {} {} on {} (ID {})",
        transaction_type,
        format_amount(amount),
        date,
        id
    );

    Ok(())
}

pub fn cmd_transactions_delete(db: &Database, id: i64) -> Result<()> {
    let tx = db
        .get_transaction(id)?
        .ok_or_else(|| anyhow::anyhow!("Transaction {} not found", id))?;

    db.delete_transaction(id)?;

    println!(
        "✅ Deleted transaction {}: {} │ {} │ {}",
        id,
        tx.date,
        tx.transaction_type,
        format_amount(tx.amount)
    );
    if tx.debt_id.is_some() {
        println!("   The payment was taken back off its debt.");
    }

    Ok(())
}
