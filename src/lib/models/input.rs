use chrono::{DateTime, Utc};
use ndarray::Array1;

use serde_derive::{Deserialize, Serialize};

use crate::constants::NODATAVAL;

/// One daily observation for one cell.
/// Units are SI; the NFDRS driver converts them to the US customary inputs of the equations.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InputElement {
    /// observation-time air temperature [°C]
    pub temperature: f64,
    /// observation-time relative humidity [%]
    pub humidity: f64,
    /// daily maximum temperature [°C]
    pub max_temperature: f64,
    /// daily minimum temperature [°C]
    pub min_temperature: f64,
    /// daily maximum relative humidity [%]
    pub max_humidity: f64,
    /// daily minimum relative humidity [%]
    pub min_humidity: f64,
    /// 20-ft wind speed [m/s]
    pub wind_speed: f64,
    /// precipitation duration over the last 24 hours [h]
    pub precipitation_duration: f64,
    /// raining at observation time
    pub raining: bool,
    /// lightning activity level, 1..=6
    pub lightning_activity_level: u8,
    /// 10-hr fuel stick moisture [%], NODATAVAL when not measured
    pub fuel_stick: f64,
    /// green-up has started
    pub greenup: bool,
    /// herbaceous fuels are cured
    pub cured: bool,
    /// vegetation is frozen
    pub frozen: bool,
    /// snow or dew make the fine fuels wet
    pub fuels_wet: bool,
}

impl Default for InputElement {
    fn default() -> Self {
        Self {
            temperature: NODATAVAL,
            humidity: NODATAVAL,
            max_temperature: NODATAVAL,
            min_temperature: NODATAVAL,
            max_humidity: NODATAVAL,
            min_humidity: NODATAVAL,
            wind_speed: NODATAVAL,
            precipitation_duration: 0.0,
            raining: false,
            lightning_activity_level: 1,
            fuel_stick: NODATAVAL,
            greenup: false,
            cured: false,
            frozen: false,
            fuels_wet: false,
        }
    }
}

impl InputElement {
    /// All the weather values needed by the daily update are present.
    pub fn is_complete(&self) -> bool {
        [
            self.temperature,
            self.humidity,
            self.max_temperature,
            self.min_temperature,
            self.max_humidity,
            self.min_humidity,
            self.wind_speed,
            self.precipitation_duration,
        ]
        .iter()
        .all(|v| *v != NODATAVAL)
    }

    pub fn fuel_stick(&self) -> Option<f64> {
        if self.fuel_stick == NODATAVAL {
            None
        } else {
            Some(self.fuel_stick)
        }
    }
}

pub struct Input {
    pub time: DateTime<Utc>,
    pub data: Array1<InputElement>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_values_make_input_incomplete() {
        let mut input = InputElement::default();
        assert!(!input.is_complete());
        input.temperature = 25.0;
        input.humidity = 30.0;
        input.max_temperature = 30.0;
        input.min_temperature = 12.0;
        input.max_humidity = 80.0;
        input.min_humidity = 20.0;
        input.wind_speed = 3.0;
        assert!(input.is_complete());
        assert_eq!(input.fuel_stick(), None);
    }

    #[test]
    fn partial_records_deserialize_with_defaults() {
        let input: InputElement =
            serde_json::from_str(r#"{"temperature": 20.0, "fuel_stick": 9.5}"#).unwrap();
        assert_eq!(input.temperature, 20.0);
        assert_eq!(input.fuel_stick(), Some(9.5));
        assert_eq!(input.humidity, NODATAVAL);
        assert_eq!(input.lightning_activity_level, 1);
    }
}
