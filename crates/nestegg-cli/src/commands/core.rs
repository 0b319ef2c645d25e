//! Core command implementations and shared utilities
//!
//! This module contains:
//! - `open_db` - Shared utility to open the database
//! - `load_settings` - Resolve health score settings
//! - `resolve_month` / `parse_date` - Argument helpers
//! - `cmd_init` - Initialize the database

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Datelike, NaiveDate};
use nestegg_core::db::Database;
use nestegg_core::health::today;
use nestegg_core::settings::HealthSettings;

/// Open database with encryption by default, or unencrypted if --no-encrypt
pub fn open_db(db_path: &Path, no_encrypt: bool) -> Result<Database> {
    let path_str = db_path
        .to_str()
        .context("Database path must be valid UTF-8")?;
    if no_encrypt {
        Database::new_unencrypted(path_str).context("Failed to open database (unencrypted)")
    } else {
        Database::new(path_str).context("Failed to open database")
    }
}

/// Load settings from `--config`, the default location, and the environment
pub fn load_settings(config: Option<&Path>) -> Result<HealthSettings> {
    HealthSettings::load_from(config).context("Failed to load settings")
}

/// Fill in a missing year or month from today's date
pub fn resolve_month(year: Option<i32>, month: Option<u32>) -> Result<(i32, u32)> {
    let now = today();
    let year = year.unwrap_or(now.year());
    let month = month.unwrap_or(now.month());
    if !(1..=12).contains(&month) {
        anyhow::bail!("Month must be between 1 and 12, got {}", month);
    }
    Ok((year, month))
}

/// Parse a YYYY-MM-DD date, defaulting to today
pub fn parse_date(date: Option<&str>) -> Result<NaiveDate> {
    match date {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .with_context(|| format!("Invalid date '{}' (use YYYY-MM-DD)", s)),
        None => Ok(today()),
    }
}

/// Look up a category by name, creating it if it doesn't exist
pub fn resolve_category(db: &Database, name: &str) -> Result<i64> {
    match db.find_category(name)? {
        Some(category) => Ok(category.id),
        None => {
            let id = db.upsert_category(name, None)?;
            println!("   Created category '{}'", name.trim());
            Ok(id)
        }
    }
}

pub fn cmd_init(db_path: &Path, no_encrypt: bool) -> Result<()> {
    println!("🔧 Initializing database at {}...", db_path.display());

    let _db = open_db(db_path, no_encrypt)?;

    if no_encrypt {
        println!("   ⚠️  Encryption: DISABLED (--no-encrypt)");
    } else {
        println!("   🔒 Encryption: ENABLED");
    }

    println!("✅ Database initialized successfully!");
    println!();
    println!("Next steps:");
    println!("  1. Add a category:      nestegg categories add Groceries --budget 400");
    println!("  2. Record transactions: nestegg transactions add income 3200");
    println!("  3. Check your health:   nestegg score");

    Ok(())
}
