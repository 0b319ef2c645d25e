//! Yearly trend with a least-squares projection
//!
//! Months with a stored snapshot are plotted as actuals. A straight line fit
//! through those actuals fills in the months that have none, including
//! months still ahead.

use chrono::{Datelike, NaiveDate};

use super::types::TrendPoint;
use crate::models::HealthScoreSnapshot;

fn clamp_round(value: f64) -> u8 {
    if value.is_nan() {
        return 0;
    }
    value.round().clamp(0.0, 100.0) as u8
}

/// Line fitted through (month, score) points
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Projection {
    Linear { slope: f64, intercept: f64 },
    Constant(f64),
}

impl Projection {
    /// Fit a projection; `None` when there are no points
    ///
    /// Two or more points get an ordinary least squares line, a single
    /// point a constant.
    pub fn fit(points: &[(u32, u8)]) -> Option<Self> {
        match points {
            [] => None,
            [(_, score)] => Some(Self::Constant(*score as f64)),
            _ => {
                let n = points.len() as f64;
                let (mut sum_x, mut sum_y, mut sum_xy, mut sum_xx) = (0.0, 0.0, 0.0, 0.0);
                for &(month, score) in points {
                    let (x, y) = (month as f64, score as f64);
                    sum_x += x;
                    sum_y += y;
                    sum_xy += x * y;
                    sum_xx += x * x;
                }

                let denominator = n * sum_xx - sum_x * sum_x;
                if denominator == 0.0 {
                    return Some(Self::Constant(sum_y / n));
                }

                let slope = (n * sum_xy - sum_x * sum_y) / denominator;
                let intercept = (sum_y - slope * sum_x) / n;
                Some(Self::Linear { slope, intercept })
            }
        }
    }

    /// Projected score for a 1-based month
    pub fn predict(&self, month: u32) -> u8 {
        match *self {
            Self::Linear { slope, intercept } => clamp_round(slope * month as f64 + intercept),
            Self::Constant(value) => clamp_round(value),
        }
    }
}

/// Build the 12-month trend for `year`
///
/// Snapshots from other years are ignored.
pub fn project_trend(
    year: i32,
    snapshots: &[HealthScoreSnapshot],
    today: NaiveDate,
) -> Vec<TrendPoint> {
    let current = (today.year(), today.month());

    let mut actuals = [None; 12];
    for snapshot in snapshots.iter().filter(|s| s.year == year) {
        if let Some(slot) = snapshot
            .month
            .checked_sub(1)
            .and_then(|i| actuals.get_mut(i as usize))
        {
            slot.get_or_insert(snapshot.total_score);
        }
    }

    let points: Vec<(u32, u8)> = (1..=12u32)
        .zip(actuals)
        .filter_map(|(month, actual)| actual.map(|score| (month, score)))
        .collect();
    let projection = Projection::fit(&points);
    let last_actual_month = points.last().map(|&(month, _)| month);

    (1..=12u32)
        .zip(actuals)
        .map(|(month, actual)| {
            let is_future = (year, month) > current;

            let predicted = if Some(month) == last_actual_month {
                actual
            } else if actual.is_none() || is_future {
                projection.map(|p| p.predict(month))
            } else {
                None
            };

            TrendPoint {
                month,
                actual,
                predicted,
                is_future,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::ComponentScores;
    use chrono::Utc;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn snapshot(year: i32, month: u32, total_score: u8) -> HealthScoreSnapshot {
        HealthScoreSnapshot {
            id: month as i64,
            year,
            month,
            total_score,
            component_scores: ComponentScores::default(),
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_always_twelve_months() {
        let trend = project_trend(2024, &[], date(2024, 6, 1));
        assert_eq!(trend.len(), 12);
        for (i, point) in trend.iter().enumerate() {
            assert_eq!(point.month, i as u32 + 1);
        }
    }

    #[test]
    fn test_no_snapshots_has_no_predictions() {
        let trend = project_trend(2024, &[], date(2024, 6, 1));
        assert!(trend.iter().all(|p| p.actual.is_none() && p.predicted.is_none()));
        assert!(trend[5..].iter().skip(1).all(|p| p.is_future));
        assert!(!trend[5].is_future);
    }

    #[test]
    fn test_single_snapshot_predicts_constant() {
        let trend = project_trend(2024, &[snapshot(2024, 3, 64)], date(2024, 6, 1));

        assert_eq!(trend[2].actual, Some(64));
        assert_eq!(trend[2].predicted, Some(64));
        for point in trend.iter().filter(|p| p.month != 3) {
            assert_eq!(point.predicted, Some(64));
        }
    }

    #[test]
    fn test_linear_projection_extends_line() {
        // 50, 60, 70 in Jan..Mar -> slope 10
        let snapshots = vec![
            snapshot(2024, 1, 50),
            snapshot(2024, 2, 60),
            snapshot(2024, 3, 70),
        ];
        let trend = project_trend(2024, &snapshots, date(2024, 3, 20));

        assert_eq!(trend[0].predicted, None);
        assert_eq!(trend[1].predicted, None);
        assert_eq!(trend[2].predicted, Some(70));
        assert_eq!(trend[3].predicted, Some(80));
        assert_eq!(trend[4].predicted, Some(90));
        // Clamped at 100
        assert_eq!(trend[11].predicted, Some(100));
        assert!(trend[3].is_future);
        assert!(!trend[2].is_future);
    }

    #[test]
    fn test_gap_months_are_predicted() {
        let snapshots = vec![snapshot(2024, 1, 40), snapshot(2024, 5, 80)];
        let trend = project_trend(2024, &snapshots, date(2024, 12, 31));

        // slope 10, intercept 30
        assert_eq!(trend[2].actual, None);
        assert_eq!(trend[2].predicted, Some(60));
        assert_eq!(trend[0].predicted, None);
        assert_eq!(trend[4].predicted, Some(80));
        assert!(trend.iter().all(|p| !p.is_future));
    }

    #[test]
    fn test_declining_projection_floors_at_zero() {
        let snapshots = vec![snapshot(2024, 1, 40), snapshot(2024, 2, 10)];
        let trend = project_trend(2024, &snapshots, date(2024, 2, 1));
        assert_eq!(trend[2].predicted, Some(0));
        assert_eq!(trend[11].predicted, Some(0));
    }

    #[test]
    fn test_other_years_ignored() {
        let snapshots = vec![snapshot(2023, 4, 90), snapshot(2024, 4, 30)];
        let trend = project_trend(2024, &snapshots, date(2024, 6, 1));
        assert_eq!(trend[3].actual, Some(30));
        assert_eq!(trend[0].predicted, Some(30));
    }

    #[test]
    fn test_past_year_has_no_future_months() {
        let trend = project_trend(2023, &[], date(2024, 1, 1));
        assert!(trend.iter().all(|p| !p.is_future));

        let trend = project_trend(2025, &[], date(2024, 12, 31));
        assert!(trend.iter().all(|p| p.is_future));
    }

    #[test]
    fn test_fit_is_ols() {
        let fit = Projection::fit(&[(1, 10), (2, 30), (3, 20)]).unwrap();
        match fit {
            Projection::Linear { slope, intercept } => {
                assert!((slope - 5.0).abs() < 1e-9);
                assert!((intercept - 10.0).abs() < 1e-9);
            }
            other => panic!("expected linear fit, got {:?}", other),
        }
        assert!(Projection::fit(&[]).is_none());
    }
}
