//! XIRR solver for dated, irregular cash flows

mod cashflow;
mod solver;
pub mod loader;

pub use cashflow::{consolidate, date_span, whole_months_between, year_fraction, CashFlow, DAYS_PER_YEAR};
pub use solver::{npv, solve, SolverConfig, XirrResult, XirrSolver};
pub use loader::{load_cash_flows, read_cash_flows, write_cash_flows};
