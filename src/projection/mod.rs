//! Ten-year rental projection engine

mod state;
mod engine;
mod yearly;

pub use state::YearState;
pub use engine::{management_fee, project, ProjectionConfig, ProjectionEngine, PROJECTION_YEARS};
pub use yearly::{average, AggregateAverages, ProjectionResult, YearlyData};
