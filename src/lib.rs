//! Property Returns - projection and rate-of-return engine for rental real estate
//!
//! This library provides:
//! - Ten-year rental projections (occupancy, ADR, operating costs, base + incentive fees)
//! - XIRR on irregular dated cash flows (Newton-Raphson with bisection fallback)
//! - Mapping of off-plan purchase terms and exit strategies onto cash flows
//! - Parallel scenario and sensitivity runs

pub mod error;
pub mod assumptions;
pub mod projection;
pub mod xirr;
pub mod investment;
pub mod scenario;

// Re-export commonly used types
pub use error::{ReturnsError, ReturnsResult};
pub use assumptions::{CostBasis, CostLine, YearlyAssumptions};
pub use projection::{average, project, AggregateAverages, ProjectionEngine, ProjectionResult, YearlyData};
pub use xirr::{solve, CashFlow, XirrResult, XirrSolver};
pub use investment::{build_cash_flows, calculate_investment_return, InvestmentData};
pub use scenario::ScenarioRunner;
