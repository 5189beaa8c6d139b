//! Scenario runner for batch and sensitivity projections
//!
//! Holds one engine and a base assumption set, then runs many variations of it
//! in parallel.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assumptions::YearlyAssumptions;
use crate::error::ReturnsResult;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};

/// One cell of an occupancy x ADR-growth sensitivity grid
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GridPoint {
    pub y1_occupancy: f64,
    pub adr_growth: f64,
    pub average_roi: f64,
    pub total_take_home_profit: f64,
    pub payback_year: Option<u32>,
}

/// Batch projection runner
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::with_base(YearlyAssumptions::default());
///
/// let variants: Vec<_> = [60.0, 70.0, 80.0]
///     .iter()
///     .map(|&occ| runner.base().with_occupancy(occ, 2.0))
///     .collect();
/// let results = runner.run_batch(&variants);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    engine: ProjectionEngine,
    base_assumptions: YearlyAssumptions,
}

impl ScenarioRunner {
    /// Runner over the default assumptions
    pub fn new(config: ProjectionConfig) -> Self {
        Self {
            engine: ProjectionEngine::new(config),
            base_assumptions: YearlyAssumptions::default(),
        }
    }

    /// Runner over the given assumptions with the default configuration
    pub fn with_base(assumptions: YearlyAssumptions) -> Self {
        Self {
            engine: ProjectionEngine::default(),
            base_assumptions: assumptions,
        }
    }

    pub fn base(&self) -> &YearlyAssumptions {
        &self.base_assumptions
    }

    /// Project the base assumptions
    pub fn run_base(&self) -> ReturnsResult<ProjectionResult> {
        self.engine.project(&self.base_assumptions)
    }

    pub fn run(&self, assumptions: &YearlyAssumptions) -> ReturnsResult<ProjectionResult> {
        self.engine.project(assumptions)
    }

    /// Project every assumption set in parallel; results keep input order
    pub fn run_batch(&self, scenarios: &[YearlyAssumptions]) -> Vec<ReturnsResult<ProjectionResult>> {
        scenarios.par_iter().map(|a| self.engine.project(a)).collect()
    }

    /// Vary year-1 occupancy and ADR growth around the base assumptions
    ///
    /// Points are ordered occupancy-major. Any invalid combination fails the
    /// whole grid.
    pub fn sensitivity_grid(&self, occupancies: &[f64], adr_growths: &[f64]) -> ReturnsResult<Vec<GridPoint>> {
        let base = &self.base_assumptions;
        let cells: Vec<(f64, f64)> = occupancies
            .iter()
            .flat_map(|&occ| adr_growths.iter().map(move |&growth| (occ, growth)))
            .collect();

        log::debug!("Running sensitivity grid of {} cells", cells.len());

        cells
            .par_iter()
            .map(|&(occupancy, adr_growth)| {
                let assumptions = base
                    .with_occupancy(occupancy, base.occupancy_growth)
                    .with_adr(base.adr, adr_growth);
                let result = self.engine.project(&assumptions)?;
                Ok(GridPoint {
                    y1_occupancy: occupancy,
                    adr_growth,
                    average_roi: result.averages.roi_after_management,
                    total_take_home_profit: result.total_take_home_profit,
                    payback_year: result.payback_year,
                })
            })
            .collect()
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new(ProjectionConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ReturnsError;

    #[test]
    fn test_run_batch_preserves_order() {
        let runner = ScenarioRunner::default();
        let scenarios: Vec<_> = [50.0, 60.0, 70.0, 80.0]
            .iter()
            .map(|&occ| runner.base().with_occupancy(occ, 0.0))
            .collect();

        let results = runner.run_batch(&scenarios);
        assert_eq!(results.len(), 4);

        for (scenario, result) in scenarios.iter().zip(&results) {
            let result = result.as_ref().unwrap();
            assert_eq!(result.years[0].occupancy, scenario.y1_occupancy);
        }

        // Higher occupancy should result in higher profit
        let profits: Vec<f64> = results
            .iter()
            .map(|r| r.as_ref().unwrap().total_take_home_profit)
            .collect();
        assert!(profits.windows(2).all(|w| w[1] > w[0]));
    }

    #[test]
    fn test_batch_reports_errors_per_scenario() {
        let runner = ScenarioRunner::default();
        let scenarios = vec![
            runner.base().clone(),
            runner.base().with_initial_investment(0.0),
        ];

        let results = runner.run_batch(&scenarios);
        assert!(results[0].is_ok());
        assert!(matches!(results[1], Err(ReturnsError::DivisionUndefined { .. })));
    }

    #[test]
    fn test_batch_matches_single_runs() {
        let runner = ScenarioRunner::default();
        let scenarios = vec![runner.base().clone(), runner.base().with_adr(3_000_000.0, 2.0)];

        let batch = runner.run_batch(&scenarios);
        for (scenario, result) in scenarios.iter().zip(batch) {
            assert_eq!(result.unwrap(), runner.run(scenario).unwrap());
        }
    }

    #[test]
    fn test_sensitivity_grid() {
        let runner = ScenarioRunner::default();
        let grid = runner.sensitivity_grid(&[60.0, 80.0], &[0.0, 5.0, 10.0]).unwrap();

        assert_eq!(grid.len(), 6);
        assert_eq!((grid[0].y1_occupancy, grid[0].adr_growth), (60.0, 0.0));
        assert_eq!((grid[5].y1_occupancy, grid[5].adr_growth), (80.0, 10.0));
        assert!(grid[2].average_roi > grid[0].average_roi);
        assert!(grid[3].average_roi > grid[0].average_roi);
    }

    #[test]
    fn test_sensitivity_grid_rejects_invalid_cell() {
        let runner = ScenarioRunner::default();
        assert!(runner.sensitivity_grid(&[70.0, 120.0], &[5.0]).is_err());
    }
}
