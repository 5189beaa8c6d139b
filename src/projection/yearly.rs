//! Yearly output records and aggregates for projections

use serde::{Deserialize, Serialize};

use crate::error::{ReturnsError, ReturnsResult};

/// A single row of projection output for one year
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyData {
    pub year: u32,

    // Drivers
    pub occupancy: f64,
    pub adr: f64,

    // Revenue and costs
    pub gross_revenue: f64,
    pub operating_costs: f64,
    pub net_operating_income: f64,

    // Management fee tiers
    pub base_fee: f64,
    pub incentive_fee: f64,
    pub management_fee: f64,

    // Owner returns
    pub take_home_profit: f64,
    pub roi_after_management: f64,
    pub cumulative_profit: f64,
}

impl YearlyData {
    /// Reject a row whose closed-form drivers overflowed f64
    pub(crate) fn check_finite(&self) -> ReturnsResult<()> {
        check_fields(
            &format!("year {}", self.year),
            &[
                ("occupancy", self.occupancy),
                ("adr", self.adr),
                ("gross_revenue", self.gross_revenue),
                ("operating_costs", self.operating_costs),
                ("net_operating_income", self.net_operating_income),
                ("base_fee", self.base_fee),
                ("incentive_fee", self.incentive_fee),
                ("management_fee", self.management_fee),
                ("take_home_profit", self.take_home_profit),
                ("roi_after_management", self.roi_after_management),
                ("cumulative_profit", self.cumulative_profit),
            ],
        )
    }
}

fn check_fields(scope: &str, fields: &[(&str, f64)]) -> ReturnsResult<()> {
    match fields.iter().find(|(_, value)| !value.is_finite()) {
        Some((field, value)) => Err(ReturnsError::invalid(
            *field,
            format!("overflowed to {} in {}", value, scope),
        )),
        None => Ok(()),
    }
}

/// Arithmetic mean of each numeric field across the projected years
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AggregateAverages {
    pub occupancy: f64,
    pub adr: f64,
    pub gross_revenue: f64,
    pub operating_costs: f64,
    pub net_operating_income: f64,
    pub base_fee: f64,
    pub incentive_fee: f64,
    pub management_fee: f64,
    pub take_home_profit: f64,
    pub roi_after_management: f64,
}

/// Average every numeric field of `data`
///
/// Empty input has no mean and is rejected.
pub fn average(data: &[YearlyData]) -> ReturnsResult<AggregateAverages> {
    if data.is_empty() {
        return Err(ReturnsError::invalid("data", "cannot average an empty projection"));
    }

    let n = data.len() as f64;
    let mean = |f: fn(&YearlyData) -> f64| data.iter().map(f).sum::<f64>() / n;

    let averages = AggregateAverages {
        occupancy: mean(|r| r.occupancy),
        adr: mean(|r| r.adr),
        gross_revenue: mean(|r| r.gross_revenue),
        operating_costs: mean(|r| r.operating_costs),
        net_operating_income: mean(|r| r.net_operating_income),
        base_fee: mean(|r| r.base_fee),
        incentive_fee: mean(|r| r.incentive_fee),
        management_fee: mean(|r| r.management_fee),
        take_home_profit: mean(|r| r.take_home_profit),
        roi_after_management: mean(|r| r.roi_after_management),
    };
    check_fields(
        "averages",
        &[
            ("occupancy", averages.occupancy),
            ("adr", averages.adr),
            ("gross_revenue", averages.gross_revenue),
            ("operating_costs", averages.operating_costs),
            ("net_operating_income", averages.net_operating_income),
            ("base_fee", averages.base_fee),
            ("incentive_fee", averages.incentive_fee),
            ("management_fee", averages.management_fee),
            ("take_home_profit", averages.take_home_profit),
            ("roi_after_management", averages.roi_after_management),
        ],
    )?;

    Ok(averages)
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Capital outlay the ROI figures are measured against
    pub initial_investment: f64,

    /// Yearly rows, year 1 first
    pub years: Vec<YearlyData>,

    pub averages: AggregateAverages,

    /// Sum of take-home profit over the horizon
    pub total_take_home_profit: f64,

    /// First year whose cumulative profit recovers the initial investment
    pub payback_year: Option<u32>,
}

impl ProjectionResult {
    /// Assemble a result from finished yearly rows
    pub fn from_years(initial_investment: f64, years: Vec<YearlyData>) -> ReturnsResult<Self> {
        let averages = average(&years)?;
        let total_take_home_profit: f64 = years.iter().map(|r| r.take_home_profit).sum();
        check_fields("totals", &[("total_take_home_profit", total_take_home_profit)])?;
        let payback_year = years
            .iter()
            .find(|r| r.cumulative_profit >= initial_investment)
            .map(|r| r.year);

        Ok(Self {
            initial_investment,
            years,
            averages,
            total_take_home_profit,
            payback_year,
        })
    }

    /// Row for a 1-indexed year
    pub fn year(&self, year: u32) -> Option<&YearlyData> {
        self.years.iter().find(|r| r.year == year)
    }

    /// Total return over the horizon as a percent of the initial investment
    pub fn total_roi(&self) -> f64 {
        self.total_take_home_profit / self.initial_investment * 100.0
    }
}
