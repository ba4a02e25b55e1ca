use crate::{
    error::Result,
    modules::{
        auxiliary::config::WindLimit,
        heterogeneous::{functions::compute_complex_spread, models::{FuelComplex, HeterogeneousSpreadState}},
    },
    units::UnitSystem,
};

use super::{
    functions::compute_spread,
    models::{DerivedSpreadState, EnvironmentalConditions, FuelBedProperties, FuelParticleProperties},
};

/// configuration structure for the spread models
/// stores the unit convention of inputs/outputs and the wind limit variant
#[derive(Debug, Clone)]
pub struct SpreadModelConfig {
    pub model_version: String,
    pub unit_system: UnitSystem,

    wind_limit: Option<WindLimit>,
}

impl SpreadModelConfig {
    /// `"1972"` applies no wind limit, `"corrected"` the Andrews et al. (2013)
    /// limit, anything else the original 0.9 * I_R limit.
    pub fn new(model_version_str: &str, unit_system: UnitSystem) -> Self {
        let wind_limit = match model_version_str {
            "1972" => None,
            "corrected" => Some(WindLimit::new(true)),
            _ => Some(WindLimit::new(false)),
        };

        SpreadModelConfig {
            model_version: model_version_str.to_owned(),
            unit_system,
            wind_limit,
        }
    }

    pub fn wind_limit(&self) -> Option<&WindLimit> {
        self.wind_limit.as_ref()
    }

    /// Single fuel class spread with inputs and outputs in `unit_system`.
    pub fn spread(
        &self,
        bed: &FuelBedProperties,
        particle: &FuelParticleProperties,
        env: &EnvironmentalConditions,
    ) -> Result<DerivedSpreadState> {
        let system = self.unit_system;
        let state = compute_spread(
            &bed.to_us(system),
            &particle.to_us(system),
            &env.to_us(system),
            self.wind_limit(),
        )?;
        Ok(state.convert(system))
    }

    /// Multi-class spread with inputs and outputs in `unit_system`.
    pub fn spread_complex(
        &self,
        complex: &FuelComplex,
        env: &EnvironmentalConditions,
    ) -> Result<HeterogeneousSpreadState> {
        let system = self.unit_system;
        let state =
            compute_complex_spread(&complex.to_us(system), &env.to_us(system), self.wind_limit())?;
        Ok(state.convert(system))
    }
}
