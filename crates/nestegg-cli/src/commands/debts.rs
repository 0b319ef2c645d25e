//! Debt command implementations

use anyhow::Result;
use nestegg_core::db::Database;

use super::{format_amount, parse_date, resolve_category};

pub fn cmd_debts_list(db: &Database) -> Result<()> {
    let debts = db.list_debts()?;

    if debts.is_empty() {
        println!("No debts tracked. Add one with:");
        println!("  nestegg debts add \"Car loan\" 12000");
        return Ok(());
    }

    println!();
    println!("💳 Debts");
    println!("   ─────────────────────────────────────────────────────────────");

    for debt in debts {
        let progress = if debt.original_amount > 0.0 {
            debt.paid_amount / debt.original_amount * 100.0
        } else {
            0.0
        };
        let status = if debt.is_paid_off() { " ✅" } else { "" };

        println!(
            "   [{:>3}] {:<20} {:>12} of {:>12} paid ({:>5.1}%){}",
            debt.id,
            debt.name,
            format_amount(debt.paid_amount),
            format_amount(debt.original_amount),
            progress,
            status
        );
    }

    Ok(())
}

pub fn cmd_debts_add(db: &Database, name: &str, amount: f64) -> Result<()> {
    let id = db.create_debt(name, amount)?;
    println!(
        "✅ Tracking debt '{}' of {} (ID {})",
        name.trim(),
        format_amount(amount),
        id
    );
    Ok(())
}

pub fn cmd_debts_pay(
    db: &Database,
    id: i64,
    amount: f64,
    date: Option<&str>,
    category: Option<&str>,
    description: Option<&str>,
) -> Result<()> {
    let date = parse_date(date)?;
    let category_id = category.map(|name| resolve_category(db, name)).transpose()?;

    let tx_id = db.record_debt_payment(id, amount, date, category_id, description)?;

    let debt = db
        .get_debt(id)?
        .ok_or_else(|| anyhow::anyhow!("Debt {} not found", id))?;

    println!(
        "✅ Paid {} toward '{}' on {} (transaction {})",
        format_amount(amount),
        debt.name,
        date,
        tx_id
    );
    println!("   Remaining: {}", format_amount(debt.remaining()));
    if debt.is_paid_off() {
        println!("   🎉 Paid off!");
    }

    Ok(())
}

pub fn cmd_debts_delete(db: &Database, id: i64) -> Result<()> {
    let debt = db
        .get_debt(id)?
        .ok_or_else(|| anyhow::anyhow!("Debt {} not found", id))?;

    db.delete_debt(id)?;

    println!("✅ Deleted debt '{}'", debt.name);
    println!("   Its payments are kept as plain expenses.");

    Ok(())
}
