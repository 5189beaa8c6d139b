//! Core projection engine for yearly rental income projections

use crate::assumptions::{compound_factor, YearlyAssumptions};
use crate::error::{ReturnsError, ReturnsResult};
use super::state::YearState;
use super::yearly::{ProjectionResult, YearlyData};

/// Length of every projection in years
pub const PROJECTION_YEARS: u32 = 10;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Rentable nights per year
    pub nights_per_year: f64,
}

impl Default for ProjectionConfig {
    fn default() -> Self {
        Self {
            nights_per_year: 365.0,
        }
    }
}

/// Main projection engine
///
/// Holds configuration only; each call to [`ProjectionEngine::project`] is a
/// pure function of its assumptions.
#[derive(Debug, Clone, Default)]
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    /// Run the ten-year projection
    pub fn project(&self, assumptions: &YearlyAssumptions) -> ReturnsResult<ProjectionResult> {
        assumptions.validate()?;
        if !(self.config.nights_per_year.is_finite() && self.config.nights_per_year > 0.0) {
            return Err(ReturnsError::invalid(
                "nights_per_year",
                format!("must be positive, got {}", self.config.nights_per_year),
            ));
        }
        if assumptions.initial_investment == 0.0 {
            return Err(ReturnsError::DivisionUndefined {
                context: "roi_after_management with zero initial_investment".into(),
            });
        }

        let mut years = Vec::with_capacity(PROJECTION_YEARS as usize);
        let mut cumulative_profit = 0.0;

        for year in 1..=PROJECTION_YEARS {
            let mut row = self.calculate_year(assumptions, year);
            cumulative_profit += row.take_home_profit;
            row.cumulative_profit = cumulative_profit;
            row.check_finite()?;
            years.push(row);
        }

        let result = ProjectionResult::from_years(assumptions.initial_investment, years)?;
        log::debug!(
            "Projected {} years: avg ROI {:.2}%, payback {:?}",
            result.years.len(),
            result.averages.roi_after_management,
            result.payback_year
        );

        Ok(result)
    }

    /// Calculate one year from the closed-form drivers
    fn calculate_year(&self, assumptions: &YearlyAssumptions, year: u32) -> YearlyData {
        let state = YearState::for_year(assumptions, year, self.config.nights_per_year);
        let gross_revenue = state.gross_revenue();

        let operating_costs: f64 = assumptions
            .cost_lines
            .iter()
            .map(|line| line.amount_for_year(year, gross_revenue))
            .sum();
        let net_operating_income = gross_revenue - operating_costs;

        let (base_fee, incentive_fee) = management_fee(assumptions, year, net_operating_income);
        let management_fee = base_fee + incentive_fee;
        let take_home_profit = net_operating_income - management_fee;

        YearlyData {
            year,
            occupancy: state.occupancy,
            adr: state.adr,
            gross_revenue,
            operating_costs,
            net_operating_income,
            base_fee,
            incentive_fee,
            management_fee,
            take_home_profit,
            roi_after_management: take_home_profit / assumptions.initial_investment * 100.0,
            cumulative_profit: 0.0,
        }
    }
}

/// Base and incentive fee for a year
///
/// The incentive is charged on profit before fee and is never negative: a loss
/// year pays the base fee only.
pub fn management_fee(assumptions: &YearlyAssumptions, year: u32, net_before_fee: f64) -> (f64, f64) {
    let base = assumptions.y1_base_fee * compound_factor(assumptions.fee_escalation, year);
    let incentive = net_before_fee.max(0.0) * assumptions.incentive_fee_pct / 100.0;
    (base, incentive)
}

/// Project with the default configuration
pub fn project(assumptions: &YearlyAssumptions) -> ReturnsResult<ProjectionResult> {
    ProjectionEngine::default().project(assumptions)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assumptions::CostLine;
    use approx::assert_relative_eq;

    /// Round numbers: 50% of 365 nights at 200 = 36,500 gross in year 1
    fn simple_assumptions() -> YearlyAssumptions {
        YearlyAssumptions {
            initial_investment: 100_000.0,
            y1_occupancy: 50.0,
            occupancy_growth: 0.0,
            adr: 200.0,
            adr_growth: 0.0,
            y1_base_fee: 1_000.0,
            incentive_fee_pct: 10.0,
            fee_escalation: 0.0,
            cost_lines: vec![CostLine::fixed("Utilities", 6_500.0, 0.0)],
        }
    }

    #[test]
    fn test_projection_runs() {
        let result = project(&YearlyAssumptions::default()).unwrap();

        assert_eq!(result.years.len(), PROJECTION_YEARS as usize);
        assert_eq!(result.years[0].year, 1);
        assert_eq!(result.years[9].year, 10);
        assert!(result.years[0].gross_revenue > 0.0);
    }

    #[test]
    fn test_year_one_figures() {
        let result = project(&simple_assumptions()).unwrap();
        let y1 = &result.years[0];

        assert_relative_eq!(y1.gross_revenue, 36_500.0, epsilon = 1e-9);
        assert_relative_eq!(y1.operating_costs, 6_500.0);
        assert_relative_eq!(y1.net_operating_income, 30_000.0, epsilon = 1e-9);
        assert_relative_eq!(y1.base_fee, 1_000.0);
        assert_relative_eq!(y1.incentive_fee, 3_000.0, epsilon = 1e-9);
        assert_relative_eq!(y1.management_fee, 4_000.0, epsilon = 1e-9);
        assert_relative_eq!(y1.take_home_profit, 26_000.0, epsilon = 1e-9);
        assert_relative_eq!(y1.roi_after_management, 26.0, epsilon = 1e-9);
    }

    #[test]
    fn test_projection_is_deterministic() {
        let a = YearlyAssumptions::default();
        let first = project(&a).unwrap();
        let second = project(&a).unwrap();

        assert_eq!(first, second);
        for (x, y) in first.years.iter().zip(&second.years) {
            assert_eq!(x.take_home_profit.to_bits(), y.take_home_profit.to_bits());
        }
    }

    #[test]
    fn test_roi_consistency() {
        let a = YearlyAssumptions::default();
        let result = project(&a).unwrap();

        for row in &result.years {
            assert_relative_eq!(
                row.roi_after_management,
                row.take_home_profit / a.initial_investment * 100.0,
                max_relative = 1e-12
            );
            assert_relative_eq!(
                row.take_home_profit,
                row.net_operating_income - row.management_fee,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn test_gross_revenue_non_decreasing_with_growth() {
        let a = YearlyAssumptions::default().with_occupancy(85.0, 3.0).with_adr(2_000_000.0, 4.0);
        let result = project(&a).unwrap();

        for pair in result.years.windows(2) {
            assert!(pair[1].gross_revenue >= pair[0].gross_revenue);
        }
        // Occupancy saturates at 100% before year 10
        assert_relative_eq!(result.years[9].occupancy, 100.0);
    }

    #[test]
    fn test_zero_investment_is_division_undefined() {
        let a = YearlyAssumptions::default().with_initial_investment(0.0);
        let err = project(&a).unwrap_err();
        assert!(matches!(err, ReturnsError::DivisionUndefined { .. }));
    }

    #[test]
    fn test_overflowing_drivers_are_rejected() {
        let a = YearlyAssumptions::default()
            .with_adr(1e306, 1000.0)
            .with_cost_line(CostLine::fixed("Utilities", 1e307, 1000.0));
        assert!(a.validate().is_ok());

        match project(&a) {
            Err(ReturnsError::InvalidInput { field, reason }) => {
                assert_eq!(field, "gross_revenue");
                assert!(reason.contains("year 1"), "{}", reason);
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }

        // Finite in year 1, overflows once ADR has compounded for six years
        let a = YearlyAssumptions::default().with_adr(1e300, 1000.0);
        match project(&a) {
            Err(ReturnsError::InvalidInput { field, reason }) => {
                assert_eq!(field, "gross_revenue");
                assert!(reason.contains("year 7"), "{}", reason);
            }
            other => panic!("expected InvalidInput, got {:?}", other),
        }
    }

    #[test]
    fn test_invalid_input_rejected_before_projection() {
        let a = YearlyAssumptions::default().with_occupancy(-5.0, 0.0);
        assert!(matches!(project(&a), Err(ReturnsError::InvalidInput { .. })));

        let engine = ProjectionEngine::new(ProjectionConfig { nights_per_year: 0.0 });
        assert!(matches!(
            engine.project(&YearlyAssumptions::default()),
            Err(ReturnsError::InvalidInput { .. })
        ));
    }

    #[test]
    fn test_incentive_fee_clamped_on_loss() {
        // Costs exceed revenue every year
        let a = simple_assumptions().with_cost_line(CostLine::fixed("Utilities", 50_000.0, 0.0));
        let result = project(&a).unwrap();

        for row in &result.years {
            assert!(row.net_operating_income < 0.0);
            assert_eq!(row.incentive_fee, 0.0);
            assert_relative_eq!(row.management_fee, row.base_fee);
            assert!(row.roi_after_management < 0.0);
        }
        assert_eq!(result.payback_year, None);
    }

    #[test]
    fn test_base_fee_escalates() {
        let a = simple_assumptions().with_fees(1_000.0, 0.0, 10.0);
        let result = project(&a).unwrap();

        assert_relative_eq!(result.years[0].base_fee, 1_000.0);
        assert_relative_eq!(result.years[2].base_fee, 1_210.0, epsilon = 1e-9);
    }

    #[test]
    fn test_revenue_share_costs_follow_revenue() {
        let a = simple_assumptions()
            .without_cost_line("Utilities")
            .with_cost_line(CostLine::revenue_share("OTA", 20.0))
            .with_adr(200.0, 10.0);
        let result = project(&a).unwrap();

        for row in &result.years {
            assert_relative_eq!(row.operating_costs, row.gross_revenue * 0.2, max_relative = 1e-12);
        }
    }

    #[test]
    fn test_nights_per_year_config() {
        let engine = ProjectionEngine::new(ProjectionConfig { nights_per_year: 360.0 });
        let result = engine.project(&simple_assumptions()).unwrap();
        assert_relative_eq!(result.years[0].gross_revenue, 36_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_cumulative_profit_and_payback() {
        let result = project(&simple_assumptions()).unwrap();

        // 26,000 per year against 100,000 invested
        assert_relative_eq!(result.years[3].cumulative_profit, 104_000.0, epsilon = 1e-6);
        assert_eq!(result.payback_year, Some(4));
        assert_relative_eq!(result.averages.take_home_profit, 26_000.0, epsilon = 1e-6);
    }
}
