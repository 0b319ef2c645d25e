//! Weighted aggregation of component scores

use super::types::{HealthComponent, HealthComponents};

/// Combine the five component scores into the 0-100 total
///
/// Rounds once, after weighting, half away from zero.
pub fn total_score(components: &HealthComponents) -> u8 {
    let weighted: f64 = components
        .iter()
        .map(|(component, result)| component.weight() * result.score)
        .sum();

    if weighted.is_nan() {
        return 0;
    }
    weighted.round().clamp(0.0, 100.0) as u8
}

/// Sum of all component weights
pub fn total_weight() -> f64 {
    HealthComponent::ALL.iter().map(HealthComponent::weight).sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::health::types::ComponentScore;

    fn score(value: f64) -> ComponentScore {
        ComponentScore {
            score: value,
            value: 0.0,
            description: String::new(),
        }
    }

    fn components(sr: f64, ba: f64, dp: f64, ss: f64, ef: f64) -> HealthComponents {
        HealthComponents {
            savings_rate: score(sr),
            budget_adherence: score(ba),
            debt_progress: score(dp),
            spending_stability: score(ss),
            emergency_fund: score(ef),
        }
    }

    #[test]
    fn test_weights_sum_to_one() {
        assert!((total_weight() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_all_perfect_is_100() {
        assert_eq!(total_score(&components(100.0, 100.0, 100.0, 100.0, 100.0)), 100);
    }

    #[test]
    fn test_all_zero_is_0() {
        assert_eq!(total_score(&components(0.0, 0.0, 0.0, 0.0, 0.0)), 0);
    }

    #[test]
    fn test_rounds_once_after_weighting() {
        // 30 + 20 + 20 + 15 + 9.96 = 94.96
        assert_eq!(total_score(&components(100.0, 80.0, 100.0, 100.0, 99.6)), 95);
    }

    #[test]
    fn test_half_rounds_up() {
        // 0.10 * 45 = 4.5
        assert_eq!(total_score(&components(0.0, 0.0, 0.0, 0.0, 45.0)), 5);
    }

    #[test]
    fn test_single_component_weight() {
        assert_eq!(total_score(&components(100.0, 0.0, 0.0, 0.0, 0.0)), 30);
        assert_eq!(total_score(&components(0.0, 100.0, 0.0, 0.0, 0.0)), 25);
        assert_eq!(total_score(&components(0.0, 0.0, 100.0, 0.0, 0.0)), 20);
        assert_eq!(total_score(&components(0.0, 0.0, 0.0, 100.0, 0.0)), 15);
        assert_eq!(total_score(&components(0.0, 0.0, 0.0, 0.0, 100.0)), 10);
    }

    #[test]
    fn test_total_stays_in_range() {
        let values = [0.0, 12.5, 33.3, 50.0, 99.9, 100.0];
        for &a in &values {
            for &b in &values {
                let total = total_score(&components(a, b, a, b, a));
                assert!(total <= 100);
            }
        }
    }
}
