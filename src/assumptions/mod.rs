//! Yearly rental assumptions: occupancy, pricing, operating costs and management fees

pub mod loader;

pub use loader::{load_assumptions, DEFAULT_ASSUMPTIONS_PATH};

use serde::{Deserialize, Serialize};

use crate::error::{ensure_growth, ensure_non_negative, ensure_percent, ReturnsResult};

/// How an operating cost line evolves over the projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "basis", rename_all = "snake_case")]
pub enum CostBasis {
    /// Flat year-1 amount compounded geometrically by `growth_pct` per year
    Fixed { y1_amount: f64, growth_pct: f64 },
    /// Percentage of the same year's gross revenue (OTA commission, consumables)
    RevenueShare { pct: f64 },
}

/// A named operating cost series (utilities, maintenance, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CostLine {
    pub name: String,
    #[serde(flatten)]
    pub basis: CostBasis,
}

impl CostLine {
    pub fn fixed(name: impl Into<String>, y1_amount: f64, growth_pct: f64) -> Self {
        Self {
            name: name.into(),
            basis: CostBasis::Fixed { y1_amount, growth_pct },
        }
    }

    pub fn revenue_share(name: impl Into<String>, pct: f64) -> Self {
        Self {
            name: name.into(),
            basis: CostBasis::RevenueShare { pct },
        }
    }

    /// Cost for a 1-indexed projection year given that year's gross revenue
    pub fn amount_for_year(&self, year: u32, gross_revenue: f64) -> f64 {
        match self.basis {
            CostBasis::Fixed { y1_amount, growth_pct } => {
                y1_amount * compound_factor(growth_pct, year)
            }
            CostBasis::RevenueShare { pct } => gross_revenue * pct / 100.0,
        }
    }

    fn validate(&self) -> ReturnsResult<()> {
        match self.basis {
            CostBasis::Fixed { y1_amount, growth_pct } => {
                ensure_non_negative(&format!("cost_lines.{}.y1_amount", self.name), y1_amount)?;
                ensure_growth(&format!("cost_lines.{}.growth_pct", self.name), growth_pct)
            }
            CostBasis::RevenueShare { pct } => {
                ensure_percent(&format!("cost_lines.{}.pct", self.name), pct)
            }
        }
    }
}

/// `(1 + pct/100)^(year-1)` evaluated in closed form
pub fn compound_factor(growth_pct: f64, year: u32) -> f64 {
    (1.0 + growth_pct / 100.0).powi(year.saturating_sub(1) as i32)
}

/// Assumptions for one projection run
///
/// All percentage fields are expressed in percent (5.0 = 5%). Money fields share
/// the currency unit of `initial_investment`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct YearlyAssumptions {
    /// Capital outlay at time zero
    pub initial_investment: f64,

    /// Year 1 occupancy in percent of available nights
    pub y1_occupancy: f64,
    /// Occupancy growth in percent per year
    pub occupancy_growth: f64,

    /// Year 1 average daily rate
    pub adr: f64,
    /// ADR growth in percent per year
    pub adr_growth: f64,

    /// Year 1 flat management fee
    pub y1_base_fee: f64,
    /// Incentive fee in percent of profit before fee
    pub incentive_fee_pct: f64,
    /// Base fee escalation in percent per year
    #[serde(default)]
    pub fee_escalation: f64,

    /// Operating cost series
    #[serde(default)]
    pub cost_lines: Vec<CostLine>,
}

impl Default for YearlyAssumptions {
    /// Sample two-bedroom villa priced in IDR
    fn default() -> Self {
        Self {
            initial_investment: 3_500_000_000.0,
            y1_occupancy: 70.0,
            occupancy_growth: 2.0,
            adr: 2_500_000.0,
            adr_growth: 5.0,
            y1_base_fee: 60_000_000.0,
            incentive_fee_pct: 10.0,
            fee_escalation: 3.0,
            cost_lines: vec![
                CostLine::fixed("Utilities", 48_000_000.0, 5.0),
                CostLine::fixed("Maintenance", 36_000_000.0, 4.0),
                CostLine::revenue_share("OTA Commission", 15.0),
            ],
        }
    }
}

impl YearlyAssumptions {
    /// Check every field for finiteness and range.
    ///
    /// A zero `initial_investment` passes here; the engine reports it as
    /// `DivisionUndefined` when ROI is computed.
    pub fn validate(&self) -> ReturnsResult<()> {
        ensure_non_negative("initial_investment", self.initial_investment)?;
        ensure_percent("y1_occupancy", self.y1_occupancy)?;
        ensure_growth("occupancy_growth", self.occupancy_growth)?;
        ensure_non_negative("adr", self.adr)?;
        ensure_growth("adr_growth", self.adr_growth)?;
        ensure_non_negative("y1_base_fee", self.y1_base_fee)?;
        ensure_percent("incentive_fee_pct", self.incentive_fee_pct)?;
        ensure_growth("fee_escalation", self.fee_escalation)?;
        for line in &self.cost_lines {
            line.validate()?;
        }
        Ok(())
    }

    pub fn with_initial_investment(&self, initial_investment: f64) -> Self {
        Self {
            initial_investment,
            ..self.clone()
        }
    }

    pub fn with_occupancy(&self, y1_occupancy: f64, occupancy_growth: f64) -> Self {
        Self {
            y1_occupancy,
            occupancy_growth,
            ..self.clone()
        }
    }

    pub fn with_adr(&self, adr: f64, adr_growth: f64) -> Self {
        Self {
            adr,
            adr_growth,
            ..self.clone()
        }
    }

    pub fn with_fees(&self, y1_base_fee: f64, incentive_fee_pct: f64, fee_escalation: f64) -> Self {
        Self {
            y1_base_fee,
            incentive_fee_pct,
            fee_escalation,
            ..self.clone()
        }
    }

    /// Replace the cost line with the same name, or append it
    pub fn with_cost_line(&self, line: CostLine) -> Self {
        let mut cost_lines = self.cost_lines.clone();
        match cost_lines.iter_mut().find(|l| l.name == line.name) {
            Some(existing) => *existing = line,
            None => cost_lines.push(line),
        }
        Self {
            cost_lines,
            ..self.clone()
        }
    }

    pub fn without_cost_line(&self, name: &str) -> Self {
        Self {
            cost_lines: self.cost_lines.iter().filter(|l| l.name != name).cloned().collect(),
            ..self.clone()
        }
    }
}
