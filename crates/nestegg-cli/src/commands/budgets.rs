//! Monthly budget command implementations

use anyhow::Result;
use nestegg_core::db::Database;
use nestegg_core::models::BudgetSource;

use super::{format_amount, resolve_category, resolve_month};

pub fn cmd_budgets_list(db: &Database, year: Option<i32>, month: Option<u32>) -> Result<()> {
    let (year, month) = resolve_month(year, month)?;
    let budgets = db.effective_budgets(year, month)?;

    if budgets.is_empty() {
        println!("No budgets for {}-{:02}. Set one with:", year, month);
        println!("  nestegg budgets set Groceries 400");
        return Ok(());
    }

    let explicit = db.list_monthly_budgets(year, month)?;

    println!();
    println!("🎯 Budgets for {}-{:02}", year, month);
    println!("   ─────────────────────────────────────────────────");

    let mut total = 0.0;
    for budget in &budgets {
        let name = db
            .get_category(budget.category_id)?
            .map(|c| c.name)
            .unwrap_or_else(|| format!("#{}", budget.category_id));
        let source = match budget.source {
            BudgetSource::Monthly => {
                let id = explicit
                    .iter()
                    .find(|b| b.category_id == budget.category_id)
                    .map(|b| b.id)
                    .unwrap_or_default();
                format!("monthly [{}]", id)
            }
            BudgetSource::Default => "default".to_string(),
        };
        total += budget.planned_amount;

        println!(
            "   {:<24} {:>12}   {}",
            name,
            format_amount(budget.planned_amount),
            source
        );
    }

    println!("   ─────────────────────────────────────────────────");
    println!("   {:<24} {:>12}", "Total", format_amount(total));

    Ok(())
}

pub fn cmd_budgets_set(
    db: &Database,
    category: &str,
    amount: f64,
    year: Option<i32>,
    month: Option<u32>,
) -> Result<()> {
    let (year, month) = resolve_month(year, month)?;
    let category_id = resolve_category(db, category)?;

    let id = db.set_monthly_budget(category_id, year, month, amount)?;

    println!(
        "✅ Budget for '{}' in {}-{:02}: {} (ID {})",
        category.trim(),
        year,
        month,
        format_amount(amount),
        id
    );

    Ok(())
}

pub fn cmd_budgets_delete(db: &Database, id: i64) -> Result<()> {
    db.delete_monthly_budget(id)?;
    println!("✅ Deleted budget {}", id);
    Ok(())
}
