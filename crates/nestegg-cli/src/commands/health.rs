//! Health score and trend commands

use anyhow::Result;
use chrono::Datelike;
use nestegg_core::db::Database;
use nestegg_core::health::{
    today, HealthComponent, HealthScoreEngine, HealthScoreReport, RecordOutcome,
    SnapshotRecorder, TrendPoint,
};
use nestegg_core::settings::HealthSettings;
use tracing::debug;

use super::resolve_month;

fn score_bar(score: f64) -> String {
    let filled = (score / 10.0).round().clamp(0.0, 10.0) as usize;
    format!("{}{}", "█".repeat(filled), "░".repeat(10 - filled))
}

pub(crate) fn component_emoji(component: HealthComponent) -> &'static str {
    match component {
        HealthComponent::SavingsRate => "💰",
        HealthComponent::BudgetAdherence => "🎯",
        HealthComponent::DebtProgress => "💳",
        HealthComponent::SpendingStability => "📊",
        HealthComponent::EmergencyFund => "🛟",
    }
}

fn print_report(report: &HealthScoreReport) {
    println!();
    println!(
        "💚 Financial Health for {}-{:02}",
        report.year, report.month
    );
    println!("   ─────────────────────────────────────────────────────────────");
    println!();

    let change = match report.change() {
        Some(delta) if delta > 0 => format!("  (▲ {} from last month)", delta),
        Some(delta) if delta < 0 => format!("  (▼ {} from last month)", -delta),
        Some(_) => "  (no change from last month)".to_string(),
        None => String::new(),
    };
    println!("   Score: {}/100{}", report.total_score, change);
    println!();

    for (component, result) in report.components.iter() {
        println!(
            "   {} {:<20} {} {:>5.1}  ({:.0}%)",
            component_emoji(component),
            component.label(),
            score_bar(result.score),
            result.score,
            component.weight() * 100.0
        );
        println!("      {}", result.description);
    }
}

/// Show the health score for a month, then record it as a snapshot
pub fn cmd_score(
    db: &Database,
    settings: HealthSettings,
    year: Option<i32>,
    month: Option<u32>,
    json: bool,
) -> Result<()> {
    let (year, month) = resolve_month(year, month)?;
    let engine = HealthScoreEngine::new(db, settings);
    let report = engine.score_month(year, month)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    let outcome = SnapshotRecorder::new().record(db, &report, today());
    debug!(?outcome, "Snapshot follow-up finished");
    if outcome == RecordOutcome::SkippedFuture && !json {
        println!();
        println!("   Month is in the future, score not saved.");
    }

    Ok(())
}

fn print_trend(year: i32, points: &[TrendPoint]) {
    println!();
    println!("📈 Health Score Trend for {}", year);
    println!("   ─────────────────────────────────────────");
    println!("   Month    Actual   Predicted");

    for point in points {
        let actual = point
            .actual
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let predicted = point
            .predicted
            .map(|s| s.to_string())
            .unwrap_or_else(|| "-".to_string());
        let marker = if point.is_future { "  (future)" } else { "" };

        println!(
            "   {:>5}    {:>6}   {:>9}{}",
            point.month, actual, predicted, marker
        );
    }

    if points.iter().all(|p| p.actual.is_none()) {
        println!();
        println!("   No scores recorded for {} yet. Run `nestegg score` to record one.", year);
    }
}

/// Show the twelve-month trend with a linear projection
pub fn cmd_trend(
    db: &Database,
    settings: HealthSettings,
    year: Option<i32>,
    json: bool,
) -> Result<()> {
    let year = year.unwrap_or_else(|| today().year());
    let engine = HealthScoreEngine::new(db, settings);
    let points = engine.trend(year)?;

    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(&serde_json::json!({
                "year": year,
                "trend": points,
            }))?
        );
    } else {
        print_trend(year, &points);
    }

    Ok(())
}
