//! Dated cash flows and the calendar arithmetic the solver needs

use std::collections::BTreeMap;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

/// Day count used to turn day deltas into years
pub const DAYS_PER_YEAR: f64 = 365.0;

/// A signed amount on a calendar date
///
/// Negative amounts are outflows (cost to the investor), positive amounts are
/// inflows.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CashFlow {
    pub date: NaiveDate,
    pub amount: f64,
}

impl CashFlow {
    pub fn new(date: NaiveDate, amount: f64) -> Self {
        Self { date, amount }
    }

    pub fn is_outflow(&self) -> bool {
        self.amount < 0.0
    }

    pub fn is_inflow(&self) -> bool {
        self.amount > 0.0
    }
}

/// Sum flows falling on the same date, returned in date order
pub fn consolidate(flows: &[CashFlow]) -> Vec<CashFlow> {
    let mut by_date: BTreeMap<NaiveDate, f64> = BTreeMap::new();
    for flow in flows {
        *by_date.entry(flow.date).or_insert(0.0) += flow.amount;
    }
    by_date
        .into_iter()
        .map(|(date, amount)| CashFlow { date, amount })
        .collect()
}

/// Years from `t0` to `date` on an actual/365 basis
pub fn year_fraction(t0: NaiveDate, date: NaiveDate) -> f64 {
    (date - t0).num_days() as f64 / DAYS_PER_YEAR
}

/// Whole calendar months from `start` to `end`; zero if `end` precedes `start`
pub fn whole_months_between(start: NaiveDate, end: NaiveDate) -> u32 {
    let mut months = (end.year() - start.year()) * 12 + end.month() as i32 - start.month() as i32;
    if end.day() < start.day() {
        months -= 1;
    }
    months.max(0) as u32
}

/// Earliest and latest dates in `flows`
pub fn date_span(flows: &[CashFlow]) -> Option<(NaiveDate, NaiveDate)> {
    let first = flows.iter().map(|f| f.date).min()?;
    let last = flows.iter().map(|f| f.date).max()?;
    Some((first, last))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_consolidate_same_date() {
        let flows = vec![
            CashFlow::new(date(2025, 3, 1), 500.0),
            CashFlow::new(date(2025, 1, 1), -1_000.0),
            CashFlow::new(date(2025, 3, 1), 250.0),
        ];
        let merged = consolidate(&flows);

        assert_eq!(merged.len(), 2);
        assert_eq!(merged[0], CashFlow::new(date(2025, 1, 1), -1_000.0));
        assert_eq!(merged[1], CashFlow::new(date(2025, 3, 1), 750.0));
    }

    #[test]
    fn test_year_fraction() {
        assert_relative_eq!(year_fraction(date(2025, 1, 1), date(2026, 1, 1)), 1.0);
        // 2024 is a leap year: 366 days
        assert_relative_eq!(year_fraction(date(2024, 1, 1), date(2025, 1, 1)), 366.0 / 365.0);
    }

    #[test]
    fn test_whole_months_between() {
        assert_eq!(whole_months_between(date(2024, 1, 15), date(2025, 3, 14)), 13);
        assert_eq!(whole_months_between(date(2024, 1, 15), date(2025, 3, 15)), 14);
        assert_eq!(whole_months_between(date(2024, 1, 31), date(2024, 2, 29)), 0);
        assert_eq!(whole_months_between(date(2025, 6, 1), date(2025, 1, 1)), 0);
    }

    #[test]
    fn test_date_span() {
        let flows = vec![
            CashFlow::new(date(2025, 6, 1), 1.0),
            CashFlow::new(date(2024, 2, 1), -1.0),
        ];
        assert_eq!(date_span(&flows), Some((date(2024, 2, 1), date(2025, 6, 1))));
        assert_eq!(date_span(&[]), None);
    }
}
