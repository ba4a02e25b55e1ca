//! Error types shared by every component of the crate.
use thiserror::Error;

/// Failure of the numerical integrator used for the slow-response moisture classes.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SolverError {
    /// The integration produced a non-finite value.
    #[error("integration from t={t0} to t={t1} (y0={y0}) did not converge: {reason}")]
    NonConvergence {
        t0: f64,
        t1: f64,
        y0: f64,
        reason: String,
    },
    /// The integrator was configured with no steps or an empty interval.
    #[error("invalid integration setup from t={t0} to t={t1} with {steps} steps")]
    InvalidSetup { t0: f64, t1: f64, steps: usize },
}

/// Error type for the crate.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FireSpreadError {
    /// A scalar input violates its contract (e.g. SAV ratio <= 0).
    #[error("invalid input {name} = {value}: {reason}")]
    InvalidInput {
        name: &'static str,
        value: f64,
        reason: &'static str,
    },
    /// A discrete class index is outside its lookup table.
    #[error("{name} = {value} is out of range, expected {min}..={max}")]
    ClassOutOfRange {
        name: &'static str,
        value: i64,
        min: i64,
        max: i64,
    },
    /// Unknown fuel model code.
    #[error("fuel model '{code}' not found, valid codes are: {valid}")]
    FuelModelNotFound { code: String, valid: String },
    /// Unsupported model version string.
    #[error("unknown model version '{version}', expected one of: {valid}")]
    UnknownModelVersion { version: String, valid: &'static str },
    /// Forwarded from the integrator.
    #[error(transparent)]
    Solver(#[from] SolverError),
}

/// Shorthand for results.
pub type Result<T> = std::result::Result<T, FireSpreadError>;

fn invalid(name: &'static str, value: f64, reason: &'static str) -> FireSpreadError {
    FireSpreadError::InvalidInput {
        name,
        value,
        reason,
    }
}

/// Value must be finite and strictly positive.
pub fn check_positive(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(invalid(name, value, "must be finite"));
    }
    if value <= 0.0 {
        return Err(invalid(name, value, "must be > 0"));
    }
    Ok(value)
}

/// Value must be finite and >= 0.
pub fn check_non_negative(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(invalid(name, value, "must be finite"));
    }
    if value < 0.0 {
        return Err(invalid(name, value, "must be >= 0"));
    }
    Ok(value)
}

/// Value must lie in [0, 1].
pub fn check_fraction(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(invalid(name, value, "must be finite"));
    }
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(name, value, "must be in [0, 1]"));
    }
    Ok(value)
}

pub fn check_finite(name: &'static str, value: f64) -> Result<f64> {
    if !value.is_finite() {
        return Err(invalid(name, value, "must be finite"));
    }
    Ok(value)
}

/// Discrete class index must lie in `min..=max`.
pub fn check_class(name: &'static str, value: u8, min: u8, max: u8) -> Result<u8> {
    if value < min || value > max {
        return Err(FireSpreadError::ClassOutOfRange {
            name,
            value: value as i64,
            min: min as i64,
            max: max as i64,
        });
    }
    Ok(value)
}
