use std::{fs::File, io::BufReader};

use chrono::{DateTime, Duration, Utc};
use firespread::{
    models::output::OutputVariableName,
    modules::{
        fuel_models::{
            functions::{fuel_complex, get_fuel_model},
            models::NFDRSFuelModel,
        },
        heterogeneous::models::FuelComplex,
        nfdrs::{
            config::NFDRSModelConfig,
            models::{NFDRSCellPropertiesContainer, NFDRSProperties, NFDRSState, NFDRSWarmState},
        },
        rothermel::{
            config::SpreadModelConfig,
            models::{EnvironmentalConditions, FuelBedProperties, FuelParticleProperties},
        },
    },
    units::UnitSystem,
};
use log::{info, warn};

use crate::common::{
    helpers::AppError,
    io::writers::{json::JsonLinesWriter, prelude::OutputSink},
};

use super::builder::{DangerConfigBuilder, FuelConfig, SpreadConfigBuilder};

const WARM_STATE_LOOKBACK_DAYS: i64 = 4;

pub struct DangerConfig {
    warm_state_path: Option<String>,
    warm_state: Vec<NFDRSWarmState>,
    warm_state_time: DateTime<Utc>,
    properties: NFDRSProperties,
    model_version: String,
    output_file: String,
    variables: Vec<OutputVariableName>,
}

impl DangerConfig {
    pub fn new(config_defs: &DangerConfigBuilder, date: DateTime<Utc>) -> Result<Self, AppError> {
        let n_cells = config_defs.cells.len();
        let cells = &config_defs.cells;
        let props_container = NFDRSCellPropertiesContainer {
            lons: cells.iter().map(|c| c.lon).collect(),
            lats: cells.iter().map(|c| c.lat).collect(),
            fuel_models: cells.iter().map(|c| c.fuel_model.clone()).collect(),
            climate_classes: cells.iter().map(|c| c.climate_class).collect(),
            slope_classes: cells.iter().map(|c| c.slope_class).collect(),
            human_risks: cells.iter().map(|c| c.human_risk).collect(),
            lightning_risks: cells.iter().map(|c| c.lightning_risk).collect(),
        };
        let properties = NFDRSProperties::new(props_container)
            .map_err(|err| format!("error reading cells of {}: {}", config_defs.model_name, err))?;

        let previous_day = date - Duration::days(1);
        let (warm_state, warm_state_time) = config_defs
            .warm_state_path
            .as_deref()
            .and_then(|path| read_warm_state(path, date, n_cells))
            .unwrap_or((vec![NFDRSWarmState::default(); n_cells], previous_day));

        Ok(DangerConfig {
            warm_state_path: config_defs.warm_state_path.clone(),
            warm_state,
            warm_state_time,
            properties,
            model_version: config_defs.model_version.clone(),
            output_file: config_defs.output_file.clone(),
            variables: config_defs.output_variables()?,
        })
    }

    pub fn get_properties(&self) -> &NFDRSProperties {
        &self.properties
    }

    pub fn new_state(&self) -> Result<NFDRSState, AppError> {
        info!("Model version: {}", &self.model_version);
        let config = NFDRSModelConfig::new(&self.model_version).map_err(|err| err.to_string())?;
        Ok(NFDRSState::new(
            &self.warm_state,
            &self.warm_state_time,
            config,
        ))
    }

    pub fn get_output_writer(&self) -> Result<Box<dyn OutputSink>, AppError> {
        Ok(Box::new(JsonLinesWriter::new(
            &self.output_file,
            &self.variables,
        )?))
    }

    /// Warm state valid for the day after the state time, stored as JSON in
    /// `<warm_state_path>YYYYmmDDHHMM`.
    pub fn write_warm_state(&self, state: &NFDRSState) -> Result<(), AppError> {
        let Some(base) = &self.warm_state_path else {
            return Ok(());
        };
        let warm_state_time = state.time + Duration::days(1);
        let name = format!("{}{}", base, warm_state_time.format("%Y%m%d%H%M"));
        let file =
            File::create(&name).map_err(|error| format!("error creating {}, {}", &name, error))?;
        serde_json::to_writer(file, &state.warm_state())
            .map_err(|error| format!("error writing to {}, {}", &name, error))?;
        Ok(())
    }
}

/// Reads the most recent warm state written for `date` or one of the days before.
fn read_warm_state(
    base_warm_file: &str,
    date: DateTime<Utc>,
    n_cells: usize,
) -> Option<(Vec<NFDRSWarmState>, DateTime<Utc>)> {
    for days_before in 0..WARM_STATE_LOOKBACK_DAYS {
        let current_date = date - Duration::days(days_before);
        let filename = format!("{}{}", base_warm_file, current_date.format("%Y%m%d%H%M"));
        let Ok(file) = File::open(&filename) else {
            continue;
        };
        let warm_state: Vec<NFDRSWarmState> = match serde_json::from_reader(BufReader::new(file)) {
            Ok(warm_state) => warm_state,
            Err(err) => {
                warn!("Error reading warm state file {}: {}", filename, err);
                return None;
            }
        };
        if warm_state.len() != n_cells {
            warn!(
                "Warm state {} has {} cells, expected {}",
                filename,
                warm_state.len(),
                n_cells
            );
            return None;
        }
        info!("Loading warm state from {}", current_date.format("%Y-%m-%d"));
        return Some((warm_state, current_date - Duration::days(1)));
    }
    warn!(
        "Could not find a valid warm state file for run date {}",
        date.format("%Y-%m-%d")
    );
    None
}

/// Fuel of a spread scenario converted to US customary units.
pub enum SpreadFuel {
    Complex {
        model: &'static NFDRSFuelModel,
        complex: FuelComplex,
    },
    Bed {
        bed: FuelBedProperties,
        particle: FuelParticleProperties,
    },
}

pub struct SpreadConfig {
    pub fuel: SpreadFuel,
    /// conditions in US customary units
    pub conditions: Vec<EnvironmentalConditions>,
    pub unit_system: UnitSystem,
    /// [rad]
    pub wind_bearing: f64,
    /// [rad]
    pub bearings: Vec<f64>,
    /// [min]
    pub elapsed_time: f64,
    pub output_file: String,
    model: SpreadModelConfig,
}

impl SpreadConfig {
    pub fn new(config_defs: &SpreadConfigBuilder) -> Result<Self, AppError> {
        let system = config_defs.unit_system;
        let fuel = match &config_defs.fuel {
            FuelConfig::Catalog { code, moistures } => {
                let model = get_fuel_model(code).map_err(|err| err.to_string())?;
                let (complex, _) = fuel_complex(model, moistures).map_err(|err| err.to_string())?;
                SpreadFuel::Complex { model, complex }
            }
            FuelConfig::Bed { bed, particle, .. } => SpreadFuel::Bed {
                bed: bed.to_us(system),
                particle: particle.to_us(system),
            },
        };
        let conditions = config_defs
            .conditions()?
            .iter()
            .map(|env| env.to_us(system))
            .collect();

        Ok(SpreadConfig {
            fuel,
            conditions,
            unit_system: system,
            wind_bearing: config_defs.wind_bearing.to_radians(),
            bearings: config_defs.bearings.iter().map(|b| b.to_radians()).collect(),
            elapsed_time: config_defs.elapsed_time,
            output_file: config_defs.output_file.clone(),
            // evaluation runs in US customary units, results are converted afterwards
            model: SpreadModelConfig::new(&config_defs.model_version, UnitSystem::US),
        })
    }

    pub fn model(&self) -> &SpreadModelConfig {
        &self.model
    }
}
