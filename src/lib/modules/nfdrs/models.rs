use crate::{
    error::Result,
    models::{input::Input, output::Output},
    modules::{
        fuel_models::{functions::get_fuel_model, models::NFDRSFuelModel},
        nfdrs_danger::{functions::slope_class_factor, models::FireDangerIndices},
        nfdrs_moisture::{
            constants::THOUSAND_HOUR_HISTORY,
            functions::climate_coefficients,
            models::{ClimateCoefficients, FineDeadMoisture, LiveMoisture},
        },
    },
};
use chrono::prelude::*;
use itertools::izip;
use ndarray::{Array1, Zip};
use serde_derive::{Deserialize, Serialize};

use super::{
    config::NFDRSModelConfig,
    constants::*,
    functions::{get_output_fn, update_state_fn},
};

// CELLS PROPERTIES
#[derive(Debug)]
pub struct NFDRSPropertiesElement {
    pub lon: f64,
    pub lat: f64,
    pub fuel_model: &'static NFDRSFuelModel,
    pub climate: &'static ClimateCoefficients,
    pub slope_class: u8,
    /// human-caused risk, MRISK
    pub human_risk: f64,
    /// lightning risk scaling factor, LRSF
    pub lightning_risk: f64,
}

#[derive(Debug)]
pub struct NFDRSProperties {
    pub data: Array1<NFDRSPropertiesElement>,
    pub len: usize,
}

pub struct NFDRSCellPropertiesContainer {
    pub lons: Vec<f64>,
    pub lats: Vec<f64>,
    pub fuel_models: Vec<String>,
    pub climate_classes: Vec<u8>,
    pub slope_classes: Vec<u8>,
    pub human_risks: Vec<f64>,
    pub lightning_risks: Vec<f64>,
}

impl NFDRSProperties {
    /// Fails on the first cell with an unknown fuel model or an out of range class.
    pub fn new(props: NFDRSCellPropertiesContainer) -> Result<Self> {
        let data = izip!(
            props.lons,
            props.lats,
            props.fuel_models,
            props.climate_classes,
            props.slope_classes,
            props.human_risks,
            props.lightning_risks
        )
        .map(
            |(lon, lat, code, climate, slope_class, human_risk, lightning_risk)| -> Result<_> {
                slope_class_factor(slope_class)?;
                Ok(NFDRSPropertiesElement {
                    lon,
                    lat,
                    fuel_model: get_fuel_model(&code)?,
                    climate: climate_coefficients(climate)?,
                    slope_class,
                    human_risk,
                    lightning_risk,
                })
            },
        )
        .collect::<Result<Vec<_>>>()?;

        let data = Array1::from_vec(data);
        let len = data.len();
        Ok(Self { data, len })
    }

    pub fn get_coords(&self) -> (Vec<f64>, Vec<f64>) {
        let lats: Vec<f64> = self.data.iter().map(|p| p.lat).collect();
        let lons: Vec<f64> = self.data.iter().map(|p| p.lon).collect();
        (lats, lons)
    }
}

// WARM STATE
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NFDRSWarmState {
    /// [%]
    pub mc100: f64,
    /// [%]
    pub mc1000: f64,
    /// 100-hr boundary of the last complete day
    #[serde(default)]
    pub hundred_hour_boundary: Option<f64>,
    /// most recent daily 1000-hr boundaries, oldest first
    pub boundary_history: Vec<f64>,
    pub greenup_date: Option<DateTime<Utc>>,
    pub previous_loi: f64,
}

impl Default for NFDRSWarmState {
    fn default() -> Self {
        NFDRSWarmState {
            mc100: MC100_INIT,
            mc1000: MC1000_INIT,
            hundred_hour_boundary: None,
            boundary_history: vec![],
            greenup_date: None,
            previous_loi: LOI_INIT,
        }
    }
}

// STATE
#[derive(Debug, Clone, Default)]
pub struct NFDRSStateElement {
    pub warm: NFDRSWarmState,
    // values of the last complete observation, None when it was missing
    pub fine: Option<FineDeadMoisture>,
    pub herb: Option<LiveMoisture>,
    pub wood: Option<LiveMoisture>,
    pub indices: Option<FireDangerIndices>,
}

impl NFDRSStateElement {
    pub fn new(warm: &NFDRSWarmState) -> Self {
        Self {
            warm: warm.clone(),
            ..Default::default()
        }
    }

    pub fn clear_daily(&mut self) {
        self.fine = None;
        self.herb = None;
        self.wood = None;
        self.indices = None;
    }

    /// Boundary history with `boundary` appended, trimmed to the last week.
    pub fn next_boundary_history(&self, boundary: f64) -> Vec<f64> {
        let history = &self.warm.boundary_history;
        let skip = (history.len() + 1).saturating_sub(THOUSAND_HOUR_HISTORY);
        history
            .iter()
            .skip(skip)
            .copied()
            .chain(Some(boundary))
            .collect()
    }

    /// Whole days since green-up started, 0 when it has not.
    pub fn days_since_greenup(&self, time: &DateTime<Utc>) -> f64 {
        self.warm
            .greenup_date
            .map(|start| time.signed_duration_since(start).num_days().max(0) as f64)
            .unwrap_or(0.0)
    }

    /// Record the start of green-up on the first flagged day, forget it when the flag drops.
    pub fn track_greenup(&mut self, greenup: bool, time: &DateTime<Utc>) {
        if !greenup {
            self.warm.greenup_date = None;
        } else if self.warm.greenup_date.is_none() {
            self.warm.greenup_date = Some(*time);
        }
    }
}

#[derive(Debug)]
pub struct NFDRSState {
    pub time: DateTime<Utc>,
    pub data: Array1<NFDRSStateElement>,
    len: usize,
    config: NFDRSModelConfig,
}

impl NFDRSState {
    /// Create a new state.
    pub fn new(
        warm_state: &[NFDRSWarmState],
        time: &DateTime<Utc>,
        config: NFDRSModelConfig,
    ) -> NFDRSState {
        let data = Array1::from_vec(warm_state.iter().map(NFDRSStateElement::new).collect());

        NFDRSState {
            time: *time,
            data,
            len: warm_state.len(),
            config,
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn update_state(&mut self, props: &NFDRSProperties, input: &Input) {
        let time = &self.time;
        let config = &self.config;
        Zip::from(&mut self.data)
            .and(&props.data)
            .and(&input.data)
            .par_for_each(|state, props, input_data| {
                update_state_fn(state, props, input_data, time, config)
            });
    }

    pub fn get_output(&self, input: &Input) -> Output {
        let time = &self.time;

        let output_data = Zip::from(&self.data)
            .and(&input.data)
            .par_map_collect(|state, input| get_output_fn(state, input, &self.config));

        Output::new(*time, output_data)
    }

    /// Update the state of the cells
    pub fn update(&mut self, props: &NFDRSProperties, input: &Input) {
        self.time = input.time;
        self.update_state(props, input);
    }

    pub fn output(&self, input: &Input) -> Output {
        self.get_output(input)
    }

    /// Warm state to restart a later run from.
    pub fn warm_state(&self) -> Vec<NFDRSWarmState> {
        self.data.iter().map(|s| s.warm.clone()).collect()
    }
}
