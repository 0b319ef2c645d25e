//! Core types for the health score engine

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::models::ComponentScores;

/// The five weighted sub-scores that make up a health score
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HealthComponent {
    SavingsRate,
    BudgetAdherence,
    DebtProgress,
    SpendingStability,
    EmergencyFund,
}

impl HealthComponent {
    /// All components, in display order
    pub const ALL: [HealthComponent; 5] = [
        Self::SavingsRate,
        Self::BudgetAdherence,
        Self::DebtProgress,
        Self::SpendingStability,
        Self::EmergencyFund,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::SavingsRate => "savings_rate",
            Self::BudgetAdherence => "budget_adherence",
            Self::DebtProgress => "debt_progress",
            Self::SpendingStability => "spending_stability",
            Self::EmergencyFund => "emergency_fund",
        }
    }

    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            Self::SavingsRate => "Savings Rate",
            Self::BudgetAdherence => "Budget Adherence",
            Self::DebtProgress => "Debt Progress",
            Self::SpendingStability => "Spending Stability",
            Self::EmergencyFund => "Emergency Fund",
        }
    }

    /// Icon name for front ends
    pub fn icon(&self) -> &'static str {
        match self {
            Self::SavingsRate => "piggy-bank",
            Self::BudgetAdherence => "target",
            Self::DebtProgress => "credit-card",
            Self::SpendingStability => "activity",
            Self::EmergencyFund => "shield",
        }
    }

    /// Share of the total score. Weights sum to 1.0.
    pub fn weight(&self) -> f64 {
        match self {
            Self::SavingsRate => 0.30,
            Self::BudgetAdherence => 0.25,
            Self::DebtProgress => 0.20,
            Self::SpendingStability => 0.15,
            Self::EmergencyFund => 0.10,
        }
    }
}

impl fmt::Display for HealthComponent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HealthComponent {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "savings_rate" => Ok(Self::SavingsRate),
            "budget_adherence" => Ok(Self::BudgetAdherence),
            "debt_progress" => Ok(Self::DebtProgress),
            "spending_stability" => Ok(Self::SpendingStability),
            "emergency_fund" => Ok(Self::EmergencyFund),
            _ => Err(format!("Unknown health component: {}", s)),
        }
    }
}

/// Result of one component scorer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComponentScore {
    /// Normalized score in 0..=100
    pub score: f64,
    /// Raw metric for display (percentage, ratio, or months; may be negative
    /// or exceed 100)
    pub value: f64,
    /// One-line explanation of the value
    pub description: String,
}

/// The five component results of a month
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthComponents {
    pub savings_rate: ComponentScore,
    pub budget_adherence: ComponentScore,
    pub debt_progress: ComponentScore,
    pub spending_stability: ComponentScore,
    pub emergency_fund: ComponentScore,
}

impl HealthComponents {
    pub fn get(&self, component: HealthComponent) -> &ComponentScore {
        match component {
            HealthComponent::SavingsRate => &self.savings_rate,
            HealthComponent::BudgetAdherence => &self.budget_adherence,
            HealthComponent::DebtProgress => &self.debt_progress,
            HealthComponent::SpendingStability => &self.spending_stability,
            HealthComponent::EmergencyFund => &self.emergency_fund,
        }
    }

    /// Components paired with their identity, in display order
    pub fn iter(&self) -> impl Iterator<Item = (HealthComponent, &ComponentScore)> {
        HealthComponent::ALL.into_iter().map(move |c| (c, self.get(c)))
    }

    /// Bare scores, as persisted in a snapshot
    pub fn to_scores(&self) -> ComponentScores {
        ComponentScores {
            savings_rate: self.savings_rate.score,
            budget_adherence: self.budget_adherence.score,
            debt_progress: self.debt_progress.score,
            spending_stability: self.spending_stability.score,
            emergency_fund: self.emergency_fund.score,
        }
    }
}

/// A month's health score as returned to callers
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthScoreReport {
    pub year: i32,
    /// 1-based month
    pub month: u32,
    pub total_score: u8,
    pub components: HealthComponents,
    /// Stored total of the preceding calendar month, if one was recorded
    pub prev_score: Option<u8>,
}

impl HealthScoreReport {
    /// Change versus the previous month's stored score
    pub fn change(&self) -> Option<i16> {
        self.prev_score
            .map(|prev| self.total_score as i16 - prev as i16)
    }
}

/// One month of the yearly trend chart
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TrendPoint {
    /// 1-based month
    pub month: u32,
    pub actual: Option<u8>,
    pub predicted: Option<u8>,
    pub is_future: bool,
}
