//! CLI argument definitions using clap
//!
//! This module contains all the clap structs and enums for parsing CLI arguments.
//! The actual command implementations are in the `commands` module.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Nestegg - Track your budget and financial health
#[derive(Parser)]
#[command(name = "nestegg")]
#[command(about = "Local-first budgeting with a monthly financial health score", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Database path
    #[arg(long, default_value = "nestegg.db", global = true)]
    pub db: PathBuf,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Disable database encryption (not recommended for production)
    ///
    /// By default, the database is encrypted using SQLCipher.
    /// Set NESTEGG_DB_KEY environment variable with your passphrase.
    /// Use --no-encrypt only for development or testing.
    #[arg(long, global = true)]
    pub no_encrypt: bool,

    /// Settings file (defaults to ~/.local/share/nestegg/config/settings.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database
    Init,

    /// Manage categories (list, add, delete)
    Categories {
        #[command(subcommand)]
        action: Option<CategoriesAction>,
    },

    /// Manage transactions (list, add, delete)
    Transactions {
        #[command(subcommand)]
        action: Option<TransactionsAction>,
    },

    /// Manage monthly budgets (list, set, delete)
    Budgets {
        #[command(subcommand)]
        action: Option<BudgetsAction>,
    },

    /// Manage debts (list, add, pay, delete)
    Debts {
        #[command(subcommand)]
        action: Option<DebtsAction>,
    },

    /// Show the financial health score for a month
    Score {
        /// Year (defaults to current year)
        #[arg(long)]
        year: Option<i32>,

        /// Month 1-12 (defaults to current month)
        #[arg(long)]
        month: Option<u32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Show the yearly health score trend with projection
    Trend {
        /// Year (defaults to current year)
        #[arg(long)]
        year: Option<i32>,

        /// Output as JSON
        #[arg(long)]
        json: bool,
    },

    /// Start the web server
    Serve {
        /// Port to listen on
        #[arg(short, long, default_value = "3000")]
        port: u16,

        /// Host to bind to
        #[arg(long, default_value = "127.0.0.1")]
        host: String,

        /// Disable authentication (for local development only)
        ///
        /// WARNING: Do not use this flag when exposing the server to a network.
        /// By default, every API request needs a key from NESTEGG_API_KEYS.
        #[arg(long)]
        no_auth: bool,
    },
}

#[derive(Subcommand)]
pub enum CategoriesAction {
    /// List categories
    List,

    /// Add a category (or update its default budget)
    Add {
        /// Category name
        name: String,

        /// Default monthly budget, used when a month has no explicit budget
        #[arg(long)]
        budget: Option<f64>,
    },

    /// Delete a category
    Delete {
        /// Category ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum TransactionsAction {
    /// List recent transactions
    List {
        /// Number of transactions to show
        #[arg(short, long, default_value = "20")]
        limit: i64,
    },

    /// Record a transaction
    Add {
        /// Type: income, expense, or savings
        #[arg(value_name = "TYPE")]
        kind: String,

        /// Amount (negative savings = withdrawal from savings)
        #[arg(allow_negative_numbers = true)]
        amount: f64,

        /// Date YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Category name (created if missing; not allowed for savings)
        #[arg(short, long)]
        category: Option<String>,

        /// Description
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a transaction
    Delete {
        /// Transaction ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum BudgetsAction {
    /// List budgets in force for a month
    List {
        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        month: Option<u32>,
    },

    /// Set a category's planned amount for a month
    Set {
        /// Category name
        category: String,

        /// Planned amount
        amount: f64,

        #[arg(long)]
        year: Option<i32>,

        #[arg(long)]
        month: Option<u32>,
    },

    /// Delete a monthly budget row (category falls back to its default)
    Delete {
        /// Budget ID
        id: i64,
    },
}

#[derive(Subcommand)]
pub enum DebtsAction {
    /// List debts
    List,

    /// Add a debt
    Add {
        /// Debt name
        name: String,

        /// Original amount owed
        amount: f64,
    },

    /// Record a repayment
    Pay {
        /// Debt ID
        id: i64,

        /// Amount paid
        amount: f64,

        /// Date YYYY-MM-DD (defaults to today)
        #[arg(short, long)]
        date: Option<String>,

        /// Category name for the repayment expense
        #[arg(short, long)]
        category: Option<String>,

        /// Description (defaults to "Payment: <debt name>")
        #[arg(long)]
        description: Option<String>,
    },

    /// Delete a debt (repayments stay as plain expenses)
    Delete {
        /// Debt ID
        id: i64,
    },
}
