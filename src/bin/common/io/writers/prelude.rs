use firespread::models::output::Output;

use crate::common::helpers::AppError;

/// Trait implemented by concrete output sinks that persist model variables.
pub trait OutputSink: Send {
    fn write(&mut self, output: &Output, lats: &[f64], lons: &[f64]) -> Result<(), AppError>;
}
