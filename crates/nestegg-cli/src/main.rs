//! Nestegg CLI - Local-first budgeting with a financial health score
//!
//! Usage:
//!   nestegg init                          Initialize database
//!   nestegg transactions add expense 42   Record a transaction
//!   nestegg score --month 6               Show this year's June health score
//!   nestegg serve --port 3000             Start web server

mod cli;
mod commands;


use anyhow::Result;
use clap::Parser;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use cli::*;

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set up logging
    // Priority: RUST_LOG env var > --verbose flag > default (info)
    let filter = if std::env::var("RUST_LOG").is_ok() {
        EnvFilter::from_default_env()
    } else if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::new("info")
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().with_target(false).compact())
        .init();

    match cli.command {
        Commands::Init => commands::cmd_init(&cli.db, cli.no_encrypt),
        Commands::Categories { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(CategoriesAction::List) => commands::cmd_categories_list(&db),
                Some(CategoriesAction::Add { name, budget }) => {
                    commands::cmd_categories_add(&db, &name, budget)
                }
                Some(CategoriesAction::Delete { id }) => commands::cmd_categories_delete(&db, id),
            }
        }
        Commands::Transactions { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None => commands::cmd_transactions_list(&db, 20),
                Some(TransactionsAction::List { limit }) => {
                    commands::cmd_transactions_list(&db, limit)
                }
                Some(TransactionsAction::Add {
                    kind,
                    amount,
                    date,
                    category,
                    description,
                }) => commands::cmd_transactions_add(
                    &db,
                    &kind,
                    amount,
                    date.as_deref(),
                    category.as_deref(),
                    description.as_deref(),
                ),
                Some(TransactionsAction::Delete { id }) => {
                    commands::cmd_transactions_delete(&db, id)
                }
            }
        }
        Commands::Budgets { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None => commands::cmd_budgets_list(&db, None, None),
                Some(BudgetsAction::List { year, month }) => {
                    commands::cmd_budgets_list(&db, year, month)
                }
                Some(BudgetsAction::Set {
                    category,
                    amount,
                    year,
                    month,
                }) => commands::cmd_budgets_set(&db, &category, amount, year, month),
                Some(BudgetsAction::Delete { id }) => commands::cmd_budgets_delete(&db, id),
            }
        }
        Commands::Debts { action } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            match action {
                None | Some(DebtsAction::List) => commands::cmd_debts_list(&db),
                Some(DebtsAction::Add { name, amount }) => {
                    commands::cmd_debts_add(&db, &name, amount)
                }
                Some(DebtsAction::Pay {
                    id,
                    amount,
                    date,
                    category,
                    description,
                }) => commands::cmd_debts_pay(
                    &db,
                    id,
                    amount,
                    date.as_deref(),
                    category.as_deref(),
                    description.as_deref(),
                ),
                Some(DebtsAction::Delete { id }) => commands::cmd_debts_delete(&db, id),
            }
        }
        Commands::Score { year, month, json } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let settings = commands::load_settings(cli.config.as_deref())?;
            commands::cmd_score(&db, settings, year, month, json)
        }
        Commands::Trend { year, json } => {
            let db = commands::open_db(&cli.db, cli.no_encrypt)?;
            let settings = commands::load_settings(cli.config.as_deref())?;
            commands::cmd_trend(&db, settings, year, json)
        }
        Commands::Serve {
            port,
            host,
            no_auth,
        } => {
            let settings = commands::load_settings(cli.config.as_deref())?;
            commands::cmd_serve(&cli.db, &host, port, no_auth, cli.no_encrypt, settings).await
        }
    }
}
