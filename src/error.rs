//! Error types shared by the projection engine, XIRR solver and loaders

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ReturnsError {
    /// Non-finite or out-of-range input, rejected before any computation
    #[error("Invalid input: {field} ({reason})")]
    InvalidInput { field: String, reason: String },

    /// A ratio whose denominator is zero (ROI on a zero investment)
    #[error("Division undefined in {context}")]
    DivisionUndefined { context: String },

    /// Cash flows without both an outflow and an inflow have no rate of return
    #[error("Invalid cash flow set: {0}")]
    InvalidCashFlowSet(String),

    #[error("No convergence after {iterations} iterations (last NPV {last_npv})")]
    NoConvergence { iterations: u32, last_npv: f64 },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Date error: {0}")]
    Date(String),
}

impl ReturnsError {
    pub(crate) fn invalid(field: impl Into<String>, reason: impl Into<String>) -> Self {
        ReturnsError::InvalidInput {
            field: field.into(),
            reason: reason.into(),
        }
    }
}

pub type ReturnsResult<T> = Result<T, ReturnsError>;

/// Reject NaN and infinities for a named input field
pub(crate) fn ensure_finite(field: &str, value: f64) -> ReturnsResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(ReturnsError::invalid(field, format!("must be finite, got {}", value)))
    }
}

pub(crate) fn ensure_non_negative(field: &str, value: f64) -> ReturnsResult<()> {
    ensure_finite(field, value)?;
    if value < 0.0 {
        return Err(ReturnsError::invalid(field, format!("must not be negative, got {}", value)));
    }
    Ok(())
}

pub(crate) fn ensure_percent(field: &str, value: f64) -> ReturnsResult<()> {
    ensure_finite(field, value)?;
    if !(0.0..=100.0).contains(&value) {
        return Err(ReturnsError::invalid(field, format!("must be within [0, 100], got {}", value)));
    }
    Ok(())
}

/// Growth rates at or below -100% would drive the compounded base negative
pub(crate) fn ensure_growth(field: &str, value: f64) -> ReturnsResult<()> {
    ensure_finite(field, value)?;
    if value <= -100.0 {
        return Err(ReturnsError::invalid(field, format!("must be greater than -100%, got {}", value)));
    }
    Ok(())
}
