//! Irregular-interval internal rate of return (XIRR)
//!
//! Newton-Raphson on the actual/365 NPV with an analytic derivative, falling
//! back to bisection when Newton leaves the valid domain or stalls.

use serde::{Deserialize, Serialize};

use super::cashflow::{consolidate, date_span, whole_months_between, year_fraction, CashFlow};
use crate::error::{ensure_finite, ReturnsError, ReturnsResult};

/// Solver tolerances and search limits
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Newton starting rate
    pub initial_guess: f64,
    /// Accept a rate once |NPV| falls below this, in currency units
    pub npv_tolerance: f64,
    pub max_iterations: u32,
    /// Newton iterates at or below this rate are treated as divergent
    pub rate_floor: f64,
    /// Bisection bracket
    pub bracket: (f64, f64),
    pub max_bisection_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            initial_guess: 0.1,
            npv_tolerance: 1e-6,
            max_iterations: 100,
            rate_floor: -0.999999,
            bracket: (-0.9999, 10.0),
            max_bisection_iterations: 200,
        }
    }
}

/// Rate of return and headline figures for a cash-flow set
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct XirrResult {
    /// Annualized rate as a decimal (0.184 = 18.4%)
    pub rate: f64,
    /// Sum of outflow magnitudes
    pub total_invested: f64,
    /// Sum of all flows
    pub net_profit: f64,
    /// Whole months between the first and last flow
    pub hold_period_months: u32,
}

impl XirrResult {
    pub fn rate_percent(&self) -> f64 {
        self.rate * 100.0
    }
}

/// XIRR solver
#[derive(Debug, Clone, Default)]
pub struct XirrSolver {
    config: SolverConfig,
}

impl XirrSolver {
    pub fn new(config: SolverConfig) -> Self {
        Self { config }
    }

    /// Solve for the rate and summarize the flows
    pub fn solve(&self, flows: &[CashFlow]) -> ReturnsResult<XirrResult> {
        check_amounts(flows)?;
        let total_invested: f64 = flows.iter().filter(|f| f.is_outflow()).map(|f| -f.amount).sum();
        let net_profit: f64 = flows.iter().map(|f| f.amount).sum();
        ensure_finite("total_invested", total_invested)?;
        ensure_finite("net_profit", net_profit)?;

        let rate = self.solve_rate(flows)?;
        let hold_period_months = date_span(flows)
            .map(|(first, last)| whole_months_between(first, last))
            .unwrap_or(0);

        Ok(XirrResult {
            rate,
            total_invested,
            net_profit,
            hold_period_months,
        })
    }

    /// Solve for the annualized rate only
    pub fn solve_rate(&self, flows: &[CashFlow]) -> ReturnsResult<f64> {
        check_amounts(flows)?;

        let consolidated = consolidate(flows);
        for flow in &consolidated {
            ensure_finite(&format!("flows on {}", flow.date), flow.amount)?;
        }
        let has_outflow = consolidated.iter().any(CashFlow::is_outflow);
        let has_inflow = consolidated.iter().any(CashFlow::is_inflow);
        if !has_outflow || !has_inflow {
            return Err(ReturnsError::InvalidCashFlowSet(format!(
                "{} flows on {} dates need at least one outflow and one inflow",
                flows.len(),
                consolidated.len()
            )));
        }

        let t0 = consolidated[0].date;
        let points: Vec<(f64, f64)> = consolidated
            .iter()
            .map(|f| (year_fraction(t0, f.date), f.amount))
            .collect();

        match self.newton(&points) {
            Ok(rate) => Ok(rate),
            Err(last_npv) => {
                log::debug!("Newton-Raphson did not converge (last NPV {}), bisecting", last_npv);
                self.bisection(&points, last_npv)
            }
        }
    }

    /// Newton-Raphson iteration; `Err` carries the last finite NPV seen
    fn newton(&self, points: &[(f64, f64)]) -> Result<f64, f64> {
        let mut rate = self.config.initial_guess;
        let mut last_npv = f64::NAN;

        for _ in 0..self.config.max_iterations {
            let (npv, dnpv) = npv_and_derivative(points, rate);
            if !npv.is_finite() || !dnpv.is_finite() {
                return Err(last_npv);
            }
            last_npv = npv;

            if npv.abs() < self.config.npv_tolerance {
                return Ok(rate);
            }
            if dnpv == 0.0 {
                return Err(last_npv);
            }

            let next = rate - npv / dnpv;
            if !next.is_finite() || next <= self.config.rate_floor {
                return Err(last_npv);
            }
            rate = next;
        }

        Err(last_npv)
    }

    /// Bisection over the configured bracket
    ///
    /// Stops when |NPV| is within tolerance or the bracket can no longer be
    /// halved in f64; very large amounts can keep NPV rounding error above the
    /// tolerance even at the exact root.
    fn bisection(&self, points: &[(f64, f64)], last_npv: f64) -> ReturnsResult<f64> {
        let tolerance = self.config.npv_tolerance;
        let (mut low, mut high) = self.config.bracket;
        let mut npv_low = npv_at_rate(points, low);
        let npv_high = npv_at_rate(points, high);

        if npv_low.abs() < tolerance {
            return Ok(low);
        }
        if npv_high.abs() < tolerance {
            return Ok(high);
        }
        if npv_low.is_nan() || npv_high.is_nan() || npv_low.signum() == npv_high.signum() {
            return Err(ReturnsError::NoConvergence {
                iterations: self.config.max_iterations,
                last_npv,
            });
        }

        let mut npv_mid = last_npv;
        for _ in 0..self.config.max_bisection_iterations {
            let mid = 0.5 * (low + high);
            npv_mid = npv_at_rate(points, mid);

            let collapsed = (high - low) <= f64::EPSILON * mid.abs().max(1.0);
            if npv_mid.abs() < tolerance || collapsed {
                if collapsed {
                    log::warn!("XIRR bisection reached f64 resolution with NPV {}", npv_mid);
                }
                return Ok(mid);
            }

            if npv_mid.signum() == npv_low.signum() {
                low = mid;
                npv_low = npv_mid;
            } else {
                high = mid;
            }
        }

        Err(ReturnsError::NoConvergence {
            iterations: self.config.max_iterations + self.config.max_bisection_iterations,
            last_npv: npv_mid,
        })
    }
}

fn check_amounts(flows: &[CashFlow]) -> ReturnsResult<()> {
    for (i, flow) in flows.iter().enumerate() {
        ensure_finite(&format!("flows[{}].amount", i), flow.amount)?;
    }
    Ok(())
}

/// NPV and its derivative with respect to rate over (years, amount) points
fn npv_and_derivative(points: &[(f64, f64)], rate: f64) -> (f64, f64) {
    let mut npv = 0.0;
    let mut dnpv = 0.0;

    for &(t, amount) in points {
        let discount = (1.0 + rate).powf(-t);
        npv += amount * discount;
        // d/dr [a (1+r)^-t] = -t a (1+r)^(-t-1)
        dnpv -= t * amount * discount / (1.0 + rate);
    }

    (npv, dnpv)
}

fn npv_at_rate(points: &[(f64, f64)], rate: f64) -> f64 {
    points.iter().map(|&(t, amount)| amount * (1.0 + rate).powf(-t)).sum()
}

/// Net present value of `flows` at an annual `rate`, discounted to the earliest date
pub fn npv(flows: &[CashFlow], rate: f64) -> f64 {
    let Some((t0, _)) = date_span(flows) else {
        return 0.0;
    };
    flows
        .iter()
        .map(|f| f.amount * (1.0 + rate).powf(-year_fraction(t0, f.date)))
        .sum()
}

/// Solve with the default configuration
pub fn solve(flows: &[CashFlow]) -> ReturnsResult<XirrResult> {
    XirrSolver::default().solve(flows)
}
