use std::fs::File;
use std::io::Read;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use firespread::{
    models::output::OutputVariableName,
    modules::{
        fuel_models::models::FuelMoistures,
        rothermel::models::{EnvironmentalConditions, FuelBedProperties, FuelParticleProperties},
    },
    units::UnitSystem,
};
use serde_derive::{Deserialize, Serialize};

use crate::common::helpers::AppError;

use super::models::{DangerConfig, SpreadConfig};

fn default_model_version() -> String {
    "1978".to_owned()
}

fn default_risk() -> f64 {
    0.0
}

/// One cell of a daily run.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CellConfig {
    pub lon: f64,
    pub lat: f64,
    pub fuel_model: String,
    pub climate_class: u8,
    #[serde(default = "CellConfig::default_slope_class")]
    pub slope_class: u8,
    #[serde(default = "default_risk")]
    pub human_risk: f64,
    #[serde(default = "default_risk")]
    pub lightning_risk: f64,
}

impl CellConfig {
    fn default_slope_class() -> u8 {
        1
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct DangerConfigBuilder {
    pub model_name: String,
    #[serde(default = "default_model_version")]
    pub model_version: String,
    pub cells: Vec<CellConfig>,
    pub weather_file: String,
    /// base path of the warm state files, the date is appended
    pub warm_state_path: Option<String>,
    pub output_file: String,
    pub variables: Vec<String>,
}

impl DangerConfigBuilder {
    pub fn build(&self, date: &DateTime<Utc>) -> Result<DangerConfig, AppError> {
        DangerConfig::new(self, *date)
    }

    /// Requested variables, unknown names are reported all at once.
    pub fn output_variables(&self) -> Result<Vec<OutputVariableName>, AppError> {
        let (known, unknown): (Vec<_>, Vec<_>) = self
            .variables
            .iter()
            .map(|name| (name, OutputVariableName::from_str(name)))
            .partition(|(_, parsed)| parsed.is_ok());
        if !unknown.is_empty() {
            let names: Vec<&str> = unknown.iter().map(|(name, _)| name.as_str()).collect();
            return Err(format!("unknown output variables: {}", names.join(", ")).into());
        }
        Ok(known.into_iter().filter_map(|(_, parsed)| parsed.ok()).collect())
    }
}

/// Fuel of a spread scenario: a catalog model with per-class moistures [%]
/// or a single class bed in the scenario's unit system.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "kind")]
pub enum FuelConfig {
    Catalog {
        code: String,
        moistures: FuelMoistures,
    },
    Bed {
        bed: FuelBedProperties,
        #[serde(default)]
        particle: FuelParticleProperties,
        /// dry-weight fraction
        moisture: f64,
    },
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindSweep {
    pub start: f64,
    pub stop: f64,
    pub step: f64,
}

impl WindSweep {
    pub fn values(&self) -> Result<Vec<f64>, AppError> {
        if self.step <= 0.0 || self.stop < self.start {
            return Err(format!(
                "invalid wind sweep {} to {} by {}",
                self.start, self.stop, self.step
            )
            .into());
        }
        let n = ((self.stop - self.start) / self.step + 1e-9).floor() as usize;
        Ok((0..=n).map(|i| self.start + i as f64 * self.step).collect())
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct SpreadConfigBuilder {
    pub model_name: String,
    #[serde(default = "default_model_version")]
    pub model_version: String,
    #[serde(default)]
    pub unit_system: UnitSystem,
    pub fuel: FuelConfig,
    /// tan of the slope angle
    #[serde(default)]
    pub slope: f64,
    /// midflame wind speeds
    pub wind: WindSweep,
    /// wind direction relative to upslope [deg]
    #[serde(default)]
    pub wind_bearing: f64,
    /// [min]
    pub elapsed_time: f64,
    /// query bearings from the direction of maximum spread [deg]
    #[serde(default)]
    pub bearings: Vec<f64>,
    pub output_file: String,
}

impl SpreadConfigBuilder {
    pub fn build(&self) -> Result<SpreadConfig, AppError> {
        SpreadConfig::new(self)
    }

    /// Conditions of the sweep, in the scenario's unit system.
    pub fn conditions(&self) -> Result<Vec<EnvironmentalConditions>, AppError> {
        let moisture = match &self.fuel {
            FuelConfig::Bed { moisture, .. } => *moisture,
            FuelConfig::Catalog { .. } => 0.0,
        };
        Ok(self
            .wind
            .values()?
            .into_iter()
            .map(|wind_speed| EnvironmentalConditions {
                moisture,
                wind_speed,
                slope: self.slope,
            })
            .collect())
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ConfigBuilderType {
    Danger(DangerConfigBuilder),
    Spread(SpreadConfigBuilder),
}

impl ConfigBuilderType {
    pub fn get_model_name(&self) -> &str {
        match self {
            ConfigBuilderType::Danger(builder) => &builder.model_name,
            ConfigBuilderType::Spread(builder) => &builder.model_name,
        }
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ConfigContainer {
    pub models: Vec<ConfigBuilderType>,
}

impl ConfigContainer {
    pub fn from_file(config_file: &str) -> Result<ConfigContainer, AppError> {
        if config_file.ends_with(".yaml") || config_file.ends_with(".yml") {
            Self::from_yaml(config_file)
        } else {
            Err(AppError::from(format!(
                "Unsupported config file format: {}",
                config_file
            )))
        }
    }

    pub fn from_yaml(config_file: &str) -> Result<Self, AppError> {
        let mut file = File::open(config_file)
            .map_err(|err| format!("Cannot open config file {}: {}", config_file, err))?;

        let mut contents = String::new();
        file.read_to_string(&mut contents)
            .map_err(|err| format!("Cannot read config file {}: {}", config_file, err))?;

        Self::from_yaml_str(&contents)
            .map_err(|err| format!("Cannot parse config file {}: {}", config_file, err).into())
    }

    pub fn from_yaml_str(contents: &str) -> Result<Self, serde_yaml::Error> {
        serde_yaml::from_str(contents)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const CONFIG: &str = r#"
models:
  - type: Danger
    model_name: nfdrs
    cells:
      - { lon: -110.0, lat: 40.0, fuel_model: A, climate_class: 2 }
      - { lon: -110.1, lat: 40.1, fuel_model: g, climate_class: 3, slope_class: 2, human_risk: 40 }
    weather_file: weather.json
    output_file: out.jsonl
    variables: [bi, ERC, windSpeed]
  - type: Spread
    model_name: grass
    unit_system: US
    fuel:
      kind: Catalog
      code: A
      moistures: { mc1: 5, mc10: 6, mc100: 8, mc1000: 12, herb: 60, wood: 90 }
    slope: 0.3
    wind: { start: 0, stop: 440, step: 88 }
    elapsed_time: 60
    bearings: [0, 90, 180]
    output_file: spread.json
"#;

    #[test]
    fn parses_tagged_models() {
        let container = ConfigContainer::from_yaml_str(CONFIG).unwrap();
        assert_eq!(container.models.len(), 2);
        match &container.models[0] {
            ConfigBuilderType::Danger(danger) => {
                assert_eq!(danger.model_version, "1978");
                assert_eq!(danger.cells[0].slope_class, 1);
                assert_eq!(danger.cells[1].human_risk, 40.0);
                let vars = danger.output_variables().unwrap();
                assert_eq!(
                    vars,
                    vec![
                        OutputVariableName::bi,
                        OutputVariableName::erc,
                        OutputVariableName::windSpeed
                    ]
                );
            }
            other => panic!("unexpected {other:?}"),
        }
        match &container.models[1] {
            ConfigBuilderType::Spread(spread) => {
                assert_eq!(spread.wind.values().unwrap(), vec![0.0, 88.0, 176.0, 264.0, 352.0, 440.0]);
                assert_eq!(spread.conditions().unwrap()[1].slope, 0.3);
                assert_eq!(container.models[1].get_model_name(), "grass");
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn unknown_variables_are_listed() {
        let mut container = ConfigContainer::from_yaml_str(CONFIG).unwrap();
        if let ConfigBuilderType::Danger(danger) = &mut container.models[0] {
            danger.variables.push("ffmc".to_owned());
            danger.variables.push("dc".to_owned());
            let err = danger.output_variables().unwrap_err();
            assert_eq!(String::from(err), "unknown output variables: ffmc, dc");
        }
    }

    #[test]
    fn empty_sweep_is_rejected() {
        let sweep = WindSweep {
            start: 10.0,
            stop: 0.0,
            step: 1.0,
        };
        assert!(sweep.values().is_err());
    }
}
