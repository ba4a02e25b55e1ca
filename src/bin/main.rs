mod common;
use std::env::{set_var, var};
use std::error::Error;
use std::path::Path;

use chrono::prelude::*;
use clap::{Parser, Subcommand};
use rayon::prelude::*;
use serde_derive::Serialize;

use common::config::builder::{
    ConfigBuilderType, ConfigContainer, DangerConfigBuilder, SpreadConfigBuilder,
};
use common::config::models::{SpreadConfig, SpreadFuel};
use common::helpers::{get_input, AppError};
use common::io::readers::json::JsonInputHandler;
use common::io::readers::prelude::InputHandler;
use common::io::writers::json::write_json;
use firespread::{
    modules::{
        geometry::{
            functions::fire_geometry,
            models::{FireGeometryState, SpreadVectorInput},
        },
        heterogeneous::models::HeterogeneousSpreadState,
        rothermel::models::{DerivedSpreadState, EnvironmentalConditions},
    },
    units::UnitSystem,
    version::LONG_VERSION,
};
use log::{info, trace, warn};

#[derive(Parser, Debug)]
#[command(
    version,
    long_version=LONG_VERSION,
    about="Rothermel surface fire spread and NFDRS fire danger rating",
    long_about="firespread evaluates the Rothermel surface fire spread model, the elliptical fire growth geometry and the daily NFDRS fuel moisture and fire danger indices.
Runs are described by YAML configuration files."
)]
struct Args {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Run the daily NFDRS driver over a weather series
    Danger {
        #[arg(required = true, help = "Path to the configuration file")]
        config_path: String,
    },
    /// Evaluate spread scenarios over a wind sweep
    Spread {
        #[arg(required = true, help = "Path to the scenario file")]
        config_path: String,
    },
}

fn run_danger(model_config: &DangerConfigBuilder) -> Result<(), AppError> {
    let n_cells = model_config.cells.len();
    let handler = JsonInputHandler::new(&model_config.weather_file, n_cells)?;
    info!("Input files:\n{}", handler.info_input());

    let timeline = handler.get_timeline();
    let Some(date) = timeline.first() else {
        return Err(format!("no data in {}", model_config.weather_file).into());
    };

    let current_time = Utc::now();
    let config = model_config.build(date)?;
    let mut output_writer = config.get_output_writer()?;

    let props = config.get_properties();
    let mut state = config.new_state()?;

    let (lats, lons) = props.get_coords();
    let (lats, lons) = (lats.as_slice(), lons.as_slice());
    trace!(
        "Loading input configuration took {} seconds",
        Utc::now() - current_time
    );

    let len = state.len();
    for time in &timeline {
        let step_time = Utc::now();
        info!("Processing {}", time.format("%Y-%m-%d %H:%M"));
        let input = get_input(&handler, time, len);

        let c = Utc::now();
        state.update(props, &input);
        trace!("Updating state took {} seconds", Utc::now() - c);

        let c = Utc::now();
        let output = state.output(&input);
        if let Err(err) = output_writer.write(&output, lats, lons) {
            warn!("Error writing output: {}", err);
        }
        trace!("Writing output took {} seconds", Utc::now() - c);
        trace!("Step took {} seconds", Utc::now() - step_time);
    }

    info!("Writing warm state");
    if let Err(err) = config.write_warm_state(&state) {
        warn!("Error writing warm state: {}", err);
    }
    Ok(())
}

#[derive(Debug, Serialize)]
#[serde(untagged)]
enum SpreadResult {
    Single(DerivedSpreadState),
    Complex(Box<HeterogeneousSpreadState>),
}

#[derive(Debug, Serialize)]
struct BearingRecord {
    /// [deg]
    bearing: f64,
    /// US customary units
    geometry: FireGeometryState,
}

#[derive(Debug, Serialize)]
struct SpreadRecord {
    /// midflame wind speed in the scenario's unit system
    wind_speed: f64,
    unit_system: UnitSystem,
    spread: SpreadResult,
    geometry: Vec<BearingRecord>,
}

fn evaluate_spread(
    config: &SpreadConfig,
    wind_speed: f64,
    env: &EnvironmentalConditions,
) -> Result<SpreadRecord, AppError> {
    let model = config.model();
    let (spread, vector) = match &config.fuel {
        SpreadFuel::Bed { bed, particle } => {
            let state = model
                .spread(bed, particle, env)
                .map_err(|err| err.to_string())?;
            let vector =
                SpreadVectorInput::from_spread_state(&state, config.wind_bearing, config.elapsed_time);
            (SpreadResult::Single(state.convert(config.unit_system)), vector)
        }
        SpreadFuel::Complex { complex, .. } => {
            let state = model
                .spread_complex(complex, env)
                .map_err(|err| err.to_string())?;
            let vector = SpreadVectorInput::from_complex_state(
                &state,
                config.wind_bearing,
                config.elapsed_time,
            );
            (
                SpreadResult::Complex(Box::new(state.convert(config.unit_system))),
                vector,
            )
        }
    };

    let geometry = config
        .bearings
        .iter()
        .map(|bearing| -> Result<BearingRecord, AppError> {
            let geometry = fire_geometry(&vector, model.wind_limit(), *bearing)
                .map_err(|err| err.to_string())?;
            Ok(BearingRecord {
                bearing: bearing.to_degrees(),
                geometry,
            })
        })
        .collect::<Result<Vec<_>, _>>()?;

    Ok(SpreadRecord {
        wind_speed,
        unit_system: config.unit_system,
        spread,
        geometry,
    })
}

fn run_spread(model_config: &SpreadConfigBuilder) -> Result<(), AppError> {
    let config = model_config.build()?;
    if let SpreadFuel::Complex { model, .. } = &config.fuel {
        info!("Fuel model {} ({})", model.code, model.name);
    }
    let wind_speeds = model_config.wind.values()?;

    let records: Vec<SpreadRecord> = wind_speeds
        .par_iter()
        .zip(config.conditions.par_iter())
        .filter_map(|(wind_speed, env)| match evaluate_spread(&config, *wind_speed, env) {
            Ok(record) => Some(record),
            Err(err) => {
                warn!("Wind speed {}: {}", wind_speed, err);
                None
            }
        })
        .collect();

    info!("Writing {} records to {}", records.len(), config.output_file);
    write_json(&config.output_file, &records)
}

/// main function
fn main() -> Result<(), Box<dyn Error>> {
    let args = Args::parse();

    if var("RUST_LOG").is_err() {
        set_var("RUST_LOG", "info")
    }
    pretty_env_logger::init();

    let (config_path_str, kind) = match &args.command {
        Command::Danger { config_path } => (config_path, "Danger"),
        Command::Spread { config_path } => (config_path, "Spread"),
    };

    if !Path::new(config_path_str).is_file() {
        return Err(format!("Config file {} is not a file", config_path_str).into());
    }

    let configs = ConfigContainer::from_file(config_path_str)
        .map_err(|err| format!("Failed to load config: {}", err))?;

    for model_config in &configs.models {
        let model_run = match (model_config, &args.command) {
            (ConfigBuilderType::Danger(model_config), Command::Danger { .. }) => {
                info!("Running model: {}", model_config.model_name);
                let start_time = Utc::now();
                let run = run_danger(model_config);
                info!("Elapsed time: {} seconds", (Utc::now() - start_time).num_seconds());
                run
            }
            (ConfigBuilderType::Spread(model_config), Command::Spread { .. }) => {
                info!("Running scenario: {}", model_config.model_name);
                run_spread(model_config)
            }
            _ => {
                info!(
                    "Skipping {}: not a {} configuration",
                    model_config.get_model_name(),
                    kind
                );
                Ok(())
            }
        };

        if let Err(err) = model_run {
            warn!("Error running model: {}", err);
        }
    }

    Ok(())
}
