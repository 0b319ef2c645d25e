//! Monthly aggregation of raw records into scorer inputs
//!
//! A financial month may start on any day from 1 to 28. The window for
//! (year, month) runs from `start_day` of that month up to the day before
//! `start_day` of the next month, inclusive on both ends.

use std::collections::{BTreeMap, BTreeSet, HashSet};

use chrono::{Datelike, Duration, NaiveDate};

use super::aggregate::total_score;
use super::scorers;
use super::types::HealthComponents;
use crate::error::{Error, Result};
use crate::models::{Debt, EffectiveBudget, Transaction, TransactionType};
use crate::settings::MAX_MONTH_START_DAY;

/// Calendar month preceding (year, month), wrapping January to December
pub fn previous_month(year: i32, month: u32) -> (i32, u32) {
    if month <= 1 {
        (year - 1, 12)
    } else {
        (year, month - 1)
    }
}

/// Calendar month following (year, month), wrapping December to January
pub fn next_month(year: i32, month: u32) -> (i32, u32) {
    if month >= 12 {
        (year + 1, 1)
    } else {
        (year, month + 1)
    }
}

/// The date window of a financial month
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FinancialMonth {
    pub year: i32,
    pub month: u32,
    start: NaiveDate,
    end: NaiveDate,
}

impl FinancialMonth {
    pub fn new(year: i32, month: u32, start_day: u32) -> Result<Self> {
        if !(1..=12).contains(&month) {
            return Err(Error::InvalidData(format!(
                "Month must be between 1 and 12, got {}",
                month
            )));
        }
        if !(1..=MAX_MONTH_START_DAY).contains(&start_day) {
            return Err(Error::InvalidData(format!(
                "Month start day must be between 1 and {}, got {}",
                MAX_MONTH_START_DAY, start_day
            )));
        }

        let out_of_range = || Error::InvalidData(format!("Date out of range: {}-{}", year, month));

        let start = NaiveDate::from_ymd_opt(year, month, start_day).ok_or_else(out_of_range)?;
        let (next_year, next_month) = next_month(year, month);
        let next_start =
            NaiveDate::from_ymd_opt(next_year, next_month, start_day).ok_or_else(out_of_range)?;

        Ok(Self {
            year,
            month,
            start,
            end: next_start - Duration::days(1),
        })
    }

    /// First day of the window
    pub fn start(&self) -> NaiveDate {
        self.start
    }

    /// Last day of the window (inclusive)
    pub fn end(&self) -> NaiveDate {
        self.end
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

/// Raw per-month aggregates fed to the component scorers
#[derive(Debug, Clone, PartialEq, Default)]
pub struct MonthlyInputs {
    pub income: f64,
    pub expenses: f64,
    /// Net savings flow: deposits minus withdrawals
    pub savings: f64,
    pub planned_budget: f64,
    /// Expenses in categories that have a budget this month
    pub spent_budget: f64,
    pub total_debt: f64,
    /// Debt repayments made inside the window
    pub total_debt_paid: f64,
    /// Expense totals for each day in the window that had expenses
    pub daily_spending: BTreeMap<NaiveDate, f64>,
    /// Lifetime income minus expenses minus net savings
    pub current_balance: f64,
    pub avg_monthly_expenses: f64,
}

impl MonthlyInputs {
    /// Build inputs for one financial month
    ///
    /// `window_transactions` are the transactions dated inside `window`
    /// (anything outside is ignored); `history` is the full transaction
    /// history used for the balance and average monthly expenses.
    pub fn build(
        window: &FinancialMonth,
        window_transactions: &[Transaction],
        history: &[Transaction],
        budgets: &[EffectiveBudget],
        debts: &[Debt],
    ) -> Self {
        let budgeted: HashSet<i64> = budgets.iter().map(|b| b.category_id).collect();

        let mut inputs = Self {
            planned_budget: budgets.iter().map(|b| b.planned_amount).sum(),
            total_debt: debts.iter().map(|d| d.original_amount).sum(),
            ..Self::default()
        };

        for tx in window_transactions.iter().filter(|tx| window.contains(tx.date)) {
            match tx.transaction_type {
                TransactionType::Income => inputs.income += tx.amount,
                TransactionType::Savings => inputs.savings += tx.amount,
                TransactionType::Expense => {
                    inputs.expenses += tx.amount;
                    *inputs.daily_spending.entry(tx.date).or_insert(0.0) += tx.amount;
                    if tx.category_id.is_some_and(|id| budgeted.contains(&id)) {
                        inputs.spent_budget += tx.amount;
                    }
                }
            }
            if tx.debt_id.is_some() {
                inputs.total_debt_paid += tx.amount;
            }
        }

        let mut lifetime_expenses = 0.0;
        let mut expense_months = BTreeSet::new();
        for tx in history {
            match tx.transaction_type {
                TransactionType::Income => inputs.current_balance += tx.amount,
                TransactionType::Savings => inputs.current_balance -= tx.amount,
                TransactionType::Expense => {
                    inputs.current_balance -= tx.amount;
                    lifetime_expenses += tx.amount;
                    expense_months.insert((tx.date.year(), tx.date.month()));
                }
            }
        }

        inputs.avg_monthly_expenses = if expense_months.is_empty() {
            inputs.expenses
        } else {
            lifetime_expenses / expense_months.len() as f64
        };

        inputs
    }

    /// Run the five component scorers
    pub fn components(&self) -> HealthComponents {
        let daily: Vec<f64> = self.daily_spending.values().copied().collect();

        HealthComponents {
            savings_rate: scorers::savings_rate(self.income, self.savings),
            budget_adherence: scorers::budget_adherence(self.planned_budget, self.spent_budget),
            debt_progress: scorers::debt_progress(self.total_debt, self.total_debt_paid),
            spending_stability: scorers::spending_stability(&daily),
            emergency_fund: scorers::emergency_fund(
                self.current_balance,
                self.avg_monthly_expenses,
            ),
        }
    }

    /// Component results plus the weighted total
    pub fn score(&self) -> (u8, HealthComponents) {
        let components = self.components();
        (total_score(&components), components)
    }
}
