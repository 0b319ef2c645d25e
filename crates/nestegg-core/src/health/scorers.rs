//! Component scorers
//!
//! Each scorer maps one month's raw aggregates to a 0-100 score plus a
//! display value. All of them are total: zero denominators have explicit
//! policies instead of producing NaN.

use super::types::ComponentScore;

/// Savings rate that earns a full score (20%)
const SAVINGS_RATE_MULTIPLIER: f64 = 500.0;

/// Monthly debt reduction that earns a full score (2%)
const DEBT_REDUCTION_MULTIPLIER: f64 = 5000.0;

/// Points per month of expenses covered. Six months lands just under 100.
/// Kept at 16.6 rather than 100/6 so existing scores stay comparable.
const EMERGENCY_FUND_POINTS_PER_MONTH: f64 = 16.6;

fn clamp_score(raw: f64) -> f64 {
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, 100.0)
    }
}

/// Score the share of income moved into savings
///
/// `savings` is the net signed savings flow (deposits minus withdrawals).
/// A month without income scores 0.
pub fn savings_rate(income: f64, savings: f64) -> ComponentScore {
    let rate = if income > 0.0 { savings / income } else { 0.0 };
    let value = rate * 100.0;

    let description = if income > 0.0 {
        format!("You saved {:.1}% of your income", value)
    } else {
        "No income recorded this month".to_string()
    };

    ComponentScore {
        score: clamp_score(rate * SAVINGS_RATE_MULTIPLIER),
        value,
        description,
    }
}

/// Score spending against the month's planned budget
///
/// Only overspend costs points: the score drops linearly from 100 at
/// `spent == planned` to 0 at `spent == 2 * planned`.
pub fn budget_adherence(planned: f64, spent: f64) -> ComponentScore {
    if planned <= 0.0 {
        return ComponentScore {
            score: 100.0,
            value: 0.0,
            description: "No budget set for this month".to_string(),
        };
    }

    let overspend = (spent - planned).max(0.0);
    let value = spent / planned * 100.0;

    let description = if overspend > 0.0 {
        format!("{:.0}% of budget used, {:.2} over", value, overspend)
    } else {
        format!("{:.0}% of budget used", value)
    };

    ComponentScore {
        score: clamp_score(100.0 - overspend / planned * 100.0),
        value,
        description,
    }
}

/// Score this month's repayments against total debt
pub fn debt_progress(total_debt: f64, total_paid: f64) -> ComponentScore {
    if total_debt <= 0.0 {
        return ComponentScore {
            score: 100.0,
            value: 0.0,
            description: "No debt".to_string(),
        };
    }

    let reduction_rate = total_paid / total_debt;
    let value = reduction_rate * 100.0;

    ComponentScore {
        score: clamp_score(reduction_rate * DEBT_REDUCTION_MULTIPLIER),
        value,
        description: format!("Paid down {:.1}% of total debt this month", value),
    }
}

/// Score day-to-day spending variability
///
/// `daily_spending` holds one entry per day that had expenses. Uses the
/// coefficient of variation with population variance; a CV of 1.0 or more
/// scores 0.
pub fn spending_stability(daily_spending: &[f64]) -> ComponentScore {
    if daily_spending.len() < 2 {
        return ComponentScore {
            score: 100.0,
            value: 0.0,
            description: "Not enough spending data".to_string(),
        };
    }

    let n = daily_spending.len() as f64;
    let mean = daily_spending.iter().sum::<f64>() / n;
    if mean == 0.0 {
        return ComponentScore {
            score: 100.0,
            value: 0.0,
            description: "No spending variation".to_string(),
        };
    }

    let variance = daily_spending
        .iter()
        .map(|amount| (amount - mean).powi(2))
        .sum::<f64>()
        / n;
    let cv = variance.sqrt() / mean;

    ComponentScore {
        score: clamp_score(100.0 - cv * 100.0),
        value: cv,
        description: format!(
            "Daily spending varies by {:.0}% around an average of {:.2}",
            cv * 100.0,
            mean
        ),
    }
}

/// Score how many months of average expenses the current balance covers
pub fn emergency_fund(current_balance: f64, avg_monthly_expenses: f64) -> ComponentScore {
    if avg_monthly_expenses == 0.0 {
        return ComponentScore {
            score: 100.0,
            value: 0.0,
            description: "No expenses to cover".to_string(),
        };
    }

    let months_covered = current_balance / avg_monthly_expenses;

    ComponentScore {
        score: clamp_score(months_covered * EMERGENCY_FUND_POINTS_PER_MONTH),
        value: months_covered,
        description: format!("{:.1} months of expenses covered", months_covered),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_savings_rate_full_score_at_twenty_percent() {
        let result = savings_rate(5000.0, 1000.0);
        assert!(approx(result.score, 100.0));
        assert!(approx(result.value, 20.0));
        assert!(result.description.contains("20.0%"));

        assert!(approx(savings_rate(5000.0, 2500.0).score, 100.0));
    }

    #[test]
    fn test_savings_rate_partial() {
        // 10% saved -> 50
        let result = savings_rate(4000.0, 400.0);
        assert!(approx(result.score, 50.0));
        assert!(approx(result.value, 10.0));
    }

    #[test]
    fn test_savings_rate_no_income_scores_zero() {
        let result = savings_rate(0.0, 500.0);
        assert_eq!(result.score, 0.0);
        assert_eq!(result.value, 0.0);
    }

    #[test]
    fn test_savings_rate_net_withdrawal() {
        let result = savings_rate(3000.0, -300.0);
        assert_eq!(result.score, 0.0);
        assert!(approx(result.value, -10.0));
    }

    #[test]
    fn test_savings_rate_bounds() {
        for income in [0.0, 1.0, 100.0, 5000.0] {
            for savings in [-1000.0, -1.0, 0.0, 1.0, 250.0, 10_000.0] {
                let score = savings_rate(income, savings).score;
                assert!((0.0..=100.0).contains(&score));
                if savings <= 0.0 || income == 0.0 {
                    assert_eq!(score, 0.0);
                }
            }
        }
    }

    #[test]
    fn test_budget_adherence_no_budget() {
        let result = budget_adherence(0.0, 750.0);
        assert_eq!(result.score, 100.0);
        assert_eq!(result.value, 0.0);
    }

    #[test]
    fn test_budget_adherence_overspend() {
        let result = budget_adherence(1000.0, 1200.0);
        assert!(approx(result.score, 80.0));
        assert!(approx(result.value, 120.0));
    }

    #[test]
    fn test_budget_adherence_under_budget() {
        let result = budget_adherence(1000.0, 400.0);
        assert_eq!(result.score, 100.0);
        assert!(approx(result.value, 40.0));
    }

    #[test]
    fn test_budget_adherence_zero_at_double() {
        assert_eq!(budget_adherence(500.0, 1000.0).score, 0.0);
        assert_eq!(budget_adherence(500.0, 5000.0).score, 0.0);
    }

    #[test]
    fn test_budget_adherence_monotonic_in_spent() {
        let planned = 800.0;
        let mut previous = f64::INFINITY;
        for step in 0..=40 {
            let spent = step as f64 * 50.0;
            let score = budget_adherence(planned, spent).score;
            assert!(score <= previous, "score rose at spent={}", spent);
            previous = score;
        }
    }

    #[test]
    fn test_debt_progress_no_debt() {
        let result = debt_progress(0.0, 250.0);
        assert_eq!(result.score, 100.0);
        assert_eq!(result.value, 0.0);
    }

    #[test]
    fn test_debt_progress_two_percent_is_full() {
        let result = debt_progress(10_000.0, 200.0);
        assert!(approx(result.score, 100.0));
        assert!(approx(result.value, 2.0));

        // 1% -> 50
        assert!(approx(debt_progress(10_000.0, 100.0).score, 50.0));
        assert_eq!(debt_progress(10_000.0, 0.0).score, 0.0);
    }

    #[test]
    fn test_spending_stability_not_enough_data() {
        assert_eq!(spending_stability(&[]).score, 100.0);
        let single = spending_stability(&[42.0]);
        assert_eq!(single.score, 100.0);
        assert_eq!(single.value, 0.0);
    }

    #[test]
    fn test_spending_stability_identical_days() {
        let result = spending_stability(&[50.0, 50.0, 50.0]);
        assert_eq!(result.score, 100.0);
        assert_eq!(result.value, 0.0);
    }

    #[test]
    fn test_spending_stability_uses_population_variance() {
        // mean 20, population std dev 10 -> cv 0.5 -> 50
        let result = spending_stability(&[10.0, 30.0]);
        assert!(approx(result.value, 0.5));
        assert!(approx(result.score, 50.0));
    }

    #[test]
    fn test_spending_stability_high_variation_floors_at_zero() {
        // mean 25, std dev ~43.3 -> cv > 1
        let result = spending_stability(&[100.0, 0.0, 0.0, 0.0]);
        assert!(result.value > 1.0);
        assert_eq!(result.score, 0.0);
    }

    #[test]
    fn test_emergency_fund_no_expenses() {
        let result = emergency_fund(5000.0, 0.0);
        assert_eq!(result.score, 100.0);
        assert_eq!(result.value, 0.0);
    }

    #[test]
    fn test_emergency_fund_six_months_keeps_constant() {
        let result = emergency_fund(12_000.0, 2000.0);
        assert!(approx(result.value, 6.0));
        assert!(approx(result.score, 99.6));
    }

    #[test]
    fn test_emergency_fund_saturates() {
        assert_eq!(emergency_fund(13_000.0, 2000.0).score, 100.0);
        assert_eq!(emergency_fund(-4000.0, 2000.0).score, 0.0);
    }

    #[test]
    fn test_emergency_fund_monotonic_in_balance() {
        let mut previous = -1.0;
        for step in 0..=30 {
            let balance = step as f64 * 500.0;
            let score = emergency_fund(balance, 1500.0).score;
            assert!(score >= previous);
            previous = score;
        }
    }
}
