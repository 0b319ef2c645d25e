//! Domain models for Nestegg

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Kind of money movement a transaction records
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Income,
    Expense,
    /// Transfer between checking and savings. Positive amounts are deposits
    /// into savings, negative amounts are withdrawals back to checking.
    Savings,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Income => "income",
            Self::Expense => "expense",
            Self::Savings => "savings",
        }
    }
}

impl std::str::FromStr for TransactionType {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "income" => Ok(Self::Income),
            "expense" => Ok(Self::Expense),
            "savings" | "saving" => Ok(Self::Savings),
            _ => Err(format!("Unknown transaction type: {}", s)),
        }
    }
}

impl std::fmt::Display for TransactionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A spending or income category
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Category {
    pub id: i64,
    pub name: String,
    /// Budget used for any month without an explicit monthly budget row
    pub default_budget: Option<f64>,
    pub created_at: DateTime<Utc>,
}

/// A recorded transaction
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Absent for savings transfers
    pub category_id: Option<i64>,
    pub date: NaiveDate,
    /// Set when this transaction repays a debt
    pub debt_id: Option<i64>,
    pub description: Option<String>,
    pub created_at: DateTime<Utc>,
}

/// A transaction to be inserted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewTransaction {
    pub amount: f64,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    #[serde(default)]
    pub category_id: Option<i64>,
    pub date: NaiveDate,
    /// Must stay `None` here; repayments go through `record_debt_payment`
    #[serde(default)]
    pub debt_id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
}

impl NewTransaction {
    pub fn new(transaction_type: TransactionType, amount: f64, date: NaiveDate) -> Self {
        Self {
            amount,
            transaction_type,
            category_id: None,
            date,
            debt_id: None,
            description: None,
        }
    }

    pub fn with_category(mut self, category_id: i64) -> Self {
        self.category_id = Some(category_id);
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Planned spending for one category in one calendar month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MonthlyBudget {
    pub id: i64,
    pub category_id: i64,
    pub year: i32,
    /// 1-based month (1 = January)
    pub month: u32,
    pub planned_amount: f64,
}

/// Where an effective budget amount came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BudgetSource {
    /// Explicit row for the month
    Monthly,
    /// Category default budget
    Default,
}

/// Budget in force for a category in a given month
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EffectiveBudget {
    pub category_id: i64,
    pub planned_amount: f64,
    pub source: BudgetSource,
}

/// A liability being paid down
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Debt {
    pub id: i64,
    pub name: String,
    /// Principal
    pub original_amount: f64,
    /// Cumulative repayments
    pub paid_amount: f64,
    pub created_at: DateTime<Utc>,
}

impl Debt {
    pub fn remaining(&self) -> f64 {
        (self.original_amount - self.paid_amount).max(0.0)
    }

    pub fn is_paid_off(&self) -> bool {
        self.paid_amount >= self.original_amount
    }
}

/// Component scores stored alongside a snapshot
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ComponentScores {
    pub savings_rate: f64,
    pub budget_adherence: f64,
    pub debt_progress: f64,
    pub spending_stability: f64,
    pub emergency_fund: f64,
}

/// Persisted health score for one (year, month)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthScoreSnapshot {
    pub id: i64,
    pub year: i32,
    pub month: u32,
    pub total_score: u8,
    pub component_scores: ComponentScores,
    /// Set on first insert, never changed afterwards
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}
