//! DTOs for affiliate statistics.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_with::{NoneAsEmptyString, serde_as};

use crate::application::services::StatsOverview;
use crate::domain::entities::{DailyStat, StatsTotals};

/// Query parameters of `GET /api/affiliates/{code}/stats`.
///
/// Empty values (`?from=`) count as absent.
#[serde_as]
#[derive(Debug, Default, Deserialize)]
pub struct StatsQuery {
    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub from: Option<NaiveDate>,

    #[serde_as(as = "NoneAsEmptyString")]
    #[serde(default)]
    pub to: Option<NaiveDate>,
}

#[derive(Debug, Serialize)]
pub struct DailyStatResponse {
    pub day: NaiveDate,
    pub clicks: i64,
    pub conversions: i64,
    pub revenue_cents: i64,
}

impl From<DailyStat> for DailyStatResponse {
    fn from(s: DailyStat) -> Self {
        Self {
            day: s.day,
            clicks: s.clicks,
            conversions: s.conversions,
            revenue_cents: s.revenue_cents,
        }
    }
}

/// Counters with derived metrics.
#[derive(Debug, Serialize)]
pub struct TotalsResponse {
    pub clicks: i64,
    pub conversions: i64,
    pub revenue_cents: i64,
    /// Earnings per click in major currency units.
    pub epc: f64,
    /// Conversions per click.
    pub cvr: f64,
}

impl From<StatsTotals> for TotalsResponse {
    fn from(t: StatsTotals) -> Self {
        Self {
            clicks: t.clicks,
            conversions: t.conversions,
            revenue_cents: t.revenue_cents,
            epc: t.epc(),
            cvr: t.cvr(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct StatsResponse {
    pub from: NaiveDate,
    pub to: NaiveDate,
    pub days: Vec<DailyStatResponse>,
    pub totals: TotalsResponse,
}

impl From<StatsOverview> for StatsResponse {
    fn from(o: StatsOverview) -> Self {
        Self {
            from: o.range.from,
            to: o.range.to,
            days: o.rows.into_iter().map(DailyStatResponse::from).collect(),
            totals: o.totals.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_dates() {
        let q: StatsQuery = serde_json::from_str(r#"{"from":"2026-01-01","to":"2026-01-31"}"#)
            .unwrap();
        assert_eq!(q.from, NaiveDate::from_ymd_opt(2026, 1, 1));
        assert_eq!(q.to, NaiveDate::from_ymd_opt(2026, 1, 31));
    }

    #[test]
    fn test_query_empty_values_are_absent() {
        let q: StatsQuery = serde_json::from_str(r#"{"from":"","to":""}"#).unwrap();
        assert!(q.from.is_none());
        assert!(q.to.is_none());

        let q: StatsQuery = serde_json::from_str("{}").unwrap();
        assert!(q.from.is_none());
    }

    #[test]
    fn test_query_invalid_date_is_error() {
        assert!(serde_json::from_str::<StatsQuery>(r#"{"from":"01/02/2026"}"#).is_err());
    }

    #[test]
    fn test_totals_metrics() {
        let totals: TotalsResponse = StatsTotals {
            clicks: 4,
            conversions: 1,
            revenue_cents: 1000,
        }
        .into();

        assert_eq!(totals.epc, 2.5);
        assert_eq!(totals.cvr, 0.25);
    }
}
