//! Category command implementations

use anyhow::Result;
use nestegg_core::db::Database;

use super::format_amount;

pub fn cmd_categories_list(db: &Database) -> Result<()> {
    let categories = db.list_categories()?;

    if categories.is_empty() {
        println!("No categories yet. Add one with:");
        println!("  nestegg categories add Groceries --budget 400");
        return Ok(());
    }

    println!();
    println!("🗂  Categories");
    println!("   ─────────────────────────────────────────");

    for category in categories {
        let budget = category
            .default_budget
            .map(format_amount)
            .unwrap_or_else(|| "-".to_string());
        println!("   [{:>3}] {:<24} {:>12}", category.id, category.name, budget);
    }

    Ok(())
}

pub fn cmd_categories_add(db: &Database, name: &str, budget: Option<f64>) -> Result<()> {
    let id = db.upsert_category(name, budget)?;

    match budget {
        Some(amount) => println!(
            "✅ Category '{}' (ID {}) with default budget {}",
            name.trim(),
            id,
            format_amount(amount)
        ),
        None => println!("✅ Category '{}' (ID {})", name.trim(), id),
    }

    Ok(())
}

pub fn cmd_categories_delete(db: &Database, id: i64) -> Result<()> {
    let category = db
        .get_category(id)?
        .ok_or_else(|| anyhow::anyhow!("Category {} not found", id))?;

    db.delete_category(id)?;

    println!("✅ Deleted category '{}'", category.name);
    println!("   Its transactions are kept without a category.");

    Ok(())
}
