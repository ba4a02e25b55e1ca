use std::{fmt, sync::Arc};

use crate::{
    error::{FireSpreadError, Result},
    modules::{
        fuel_models::models::{FuelMoistures, NFDRSFuelModel},
        nfdrs_danger::{
            functions::fire_danger,
            models::{DangerConditions, FireDangerIndices},
        },
        nfdrs_moisture::functions::{hundred_hour_moisture, thousand_hour_moisture},
    },
    solver::{EquationSolver, RungeKutta4},
};

type DangerFn = fn(&NFDRSFuelModel, &FuelMoistures, &DangerConditions) -> Result<FireDangerIndices>;
type SlowMoistureFn = fn(&dyn EquationSolver, f64, f64, f64) -> Result<f64>;

const MODEL_VERSIONS: &str = "1978";

/// configuration structure for the daily NFDRS driver
/// stores the selected equations and the integrator of the slow-response classes
#[derive(Clone)]
pub struct NFDRSModelConfig {
    pub model_version: String,

    solver: Arc<dyn EquationSolver>,
    hundred_hour_fn: SlowMoistureFn,
    thousand_hour_fn: SlowMoistureFn,
    danger_fn: DangerFn,
}

impl fmt::Debug for NFDRSModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NFDRSModelConfig")
            .field("model_version", &self.model_version)
            .finish_non_exhaustive()
    }
}

impl NFDRSModelConfig {
    pub fn new(model_version_str: &str) -> Result<Self> {
        Self::with_solver(model_version_str, Arc::new(RungeKutta4::default()))
    }

    pub fn with_solver(model_version_str: &str, solver: Arc<dyn EquationSolver>) -> Result<Self> {
        let hundred_hour_fn: SlowMoistureFn;
        let thousand_hour_fn: SlowMoistureFn;
        let danger_fn: DangerFn;

        match model_version_str {
            "1978" => {
                hundred_hour_fn = hundred_hour_moisture;
                thousand_hour_fn = thousand_hour_moisture;
                danger_fn = fire_danger;
            }
            _ => {
                return Err(FireSpreadError::UnknownModelVersion {
                    version: model_version_str.to_owned(),
                    valid: MODEL_VERSIONS,
                })
            }
        }

        Ok(NFDRSModelConfig {
            model_version: model_version_str.to_owned(),
            solver,
            hundred_hour_fn,
            thousand_hour_fn,
            danger_fn,
        })
    }

    /// `boundary_start` is the previous day's boundary, `boundary_end` today's.
    pub fn hundred_hour(&self, previous: f64, boundary_start: f64, boundary_end: f64) -> Result<f64> {
        (self.hundred_hour_fn)(self.solver.as_ref(), previous, boundary_start, boundary_end)
    }

    pub fn thousand_hour(&self, previous: f64, mean_start: f64, mean_end: f64) -> Result<f64> {
        (self.thousand_hour_fn)(self.solver.as_ref(), previous, mean_start, mean_end)
    }

    pub fn danger(
        &self,
        model: &NFDRSFuelModel,
        moistures: &FuelMoistures,
        conditions: &DangerConditions,
    ) -> Result<FireDangerIndices> {
        (self.danger_fn)(model, moistures, conditions)
    }
}
