//! Aggregated statistics read from the store-maintained views.

use chrono::{Duration, NaiveDate};
use serde_json::json;

use crate::error::AppError;

/// Longest range the dashboard may request in one call.
pub const MAX_RANGE_DAYS: i64 = 366;

/// One row of `v_affiliate_stats_daily`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DailyStat {
    pub day: NaiveDate,
    pub clicks: i64,
    pub conversions: i64,
    pub revenue_cents: i64,
}

/// Summed counters with the derived EPC and CVR metrics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StatsTotals {
    pub clicks: i64,
    pub conversions: i64,
    pub revenue_cents: i64,
}

impl StatsTotals {
    pub fn from_rows(rows: &[DailyStat]) -> Self {
        rows.iter().fold(Self::default(), |acc, r| Self {
            clicks: acc.clicks + r.clicks,
            conversions: acc.conversions + r.conversions,
            revenue_cents: acc.revenue_cents + r.revenue_cents,
        })
    }

    /// Earnings per click in major currency units; 0 without clicks.
    pub fn epc(&self) -> f64 {
        if self.clicks == 0 {
            return 0.0;
        }
        self.revenue_cents as f64 / 100.0 / self.clicks as f64
    }

    /// Conversions per click; 0 without clicks.
    pub fn cvr(&self) -> f64 {
        if self.clicks == 0 {
            return 0.0;
        }
        self.conversions as f64 / self.clicks as f64
    }
}

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum DateRangeError {
    #[error("start date {from} is after end date {to}")]
    Inverted { from: NaiveDate, to: NaiveDate },
    #[error("range of {days} days exceeds the maximum of 366")]
    TooLong { days: i64 },
}

impl From<DateRangeError> for AppError {
    fn from(e: DateRangeError) -> Self {
        AppError::bad_request("Invalid date range", json!({ "reason": e.to_string() }))
    }
}

/// Inclusive calendar range.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateRange {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateRange {
    pub fn new(from: NaiveDate, to: NaiveDate) -> Result<Self, DateRangeError> {
        if from > to {
            return Err(DateRangeError::Inverted { from, to });
        }

        let days = (to - from).num_days() + 1;
        if days > MAX_RANGE_DAYS {
            return Err(DateRangeError::TooLong { days });
        }

        Ok(Self { from, to })
    }

    /// The `days` most recent days ending at (and including) `today`.
    pub fn last_days(today: NaiveDate, days: i64) -> Self {
        Self {
            from: today - Duration::days(days.max(1) - 1),
            to: today,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(s: &str) -> NaiveDate {
        NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
    }

    #[test]
    fn test_totals_from_rows() {
        let rows = vec![
            DailyStat {
                day: date("2026-01-01"),
                clicks: 10,
                conversions: 1,
                revenue_cents: 500,
            },
            DailyStat {
                day: date("2026-01-02"),
                clicks: 30,
                conversions: 3,
                revenue_cents: 1500,
            },
        ];

        let totals = StatsTotals::from_rows(&rows);
        assert_eq!(totals.clicks, 40);
        assert_eq!(totals.conversions, 4);
        assert_eq!(totals.revenue_cents, 2000);
        assert!((totals.epc() - 0.5).abs() < f64::EPSILON);
        assert!((totals.cvr() - 0.1).abs() < f64::EPSILON);
    }

    #[test]
    fn test_metrics_without_clicks_are_zero() {
        let totals = StatsTotals {
            clicks: 0,
            conversions: 2,
            revenue_cents: 900,
        };
        assert_eq!(totals.epc(), 0.0);
        assert_eq!(totals.cvr(), 0.0);
    }

    #[test]
    fn test_last_30_days_includes_today() {
        let range = DateRange::last_days(date("2026-03-30"), 30);
        assert_eq!(range.from, date("2026-03-01"));
        assert_eq!(range.to, date("2026-03-30"));
    }

    #[test]
    fn test_range_validation() {
        assert!(DateRange::new(date("2026-01-01"), date("2026-01-01")).is_ok());
        assert_eq!(
            DateRange::new(date("2026-02-01"), date("2026-01-01")),
            Err(DateRangeError::Inverted {
                from: date("2026-02-01"),
                to: date("2026-01-01"),
            })
        );
        assert!(matches!(
            DateRange::new(date("2024-01-01"), date("2026-01-01")),
            Err(DateRangeError::TooLong { .. })
        ));
    }

    #[test]
    fn test_range_error_maps_to_validation() {
        let err: AppError = DateRangeError::TooLong { days: 400 }.into();
        assert!(matches!(err, AppError::Validation { .. }));
    }
}
