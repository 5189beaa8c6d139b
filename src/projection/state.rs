//! Per-year revenue drivers for a projection

use crate::assumptions::{compound_factor, YearlyAssumptions};

/// Revenue drivers for one projection year
///
/// Every field is derived in closed form from the year-1 assumptions, never
/// from the previous year's output.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct YearState {
    /// Projection year (1-indexed)
    pub year: u32,

    /// Occupancy in percent, clamped to [0, 100]
    pub occupancy: f64,

    /// Average daily rate
    pub adr: f64,

    /// Rentable nights in the year
    pub nights: f64,
}

impl YearState {
    /// Drivers for `year` of a projection over `assumptions`
    pub fn for_year(assumptions: &YearlyAssumptions, year: u32, nights: f64) -> Self {
        let occupancy = (assumptions.y1_occupancy
            * compound_factor(assumptions.occupancy_growth, year))
        .clamp(0.0, 100.0);
        let adr = assumptions.adr * compound_factor(assumptions.adr_growth, year);

        Self {
            year,
            occupancy,
            adr,
            nights,
        }
    }

    /// Room revenue for the year
    pub fn gross_revenue(&self) -> f64 {
        self.occupancy / 100.0 * self.adr * self.nights
    }
}
