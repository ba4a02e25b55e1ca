use chrono::{DateTime, Utc};
use ndarray::Array1;
use rayon::prelude::*;
use serde_derive::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumProperty, EnumString};

use crate::constants::NODATAVAL;

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OutputElement {
    // ------------------- MOISTURE ------------------- //
    /// Equilibrium moisture content [%]
    pub emc: f64,
    /// 1-hr fuel moisture [%]
    pub mc1: f64,
    /// 10-hr fuel moisture [%]
    pub mc10: f64,
    /// 100-hr fuel moisture [%]
    pub mc100: f64,
    /// 1000-hr fuel moisture [%]
    pub mc1000: f64,
    /// Herbaceous fuel moisture [%]
    pub mcherb: f64,
    /// Woody fuel moisture [%]
    pub mcwood: f64,
    /// Cured fraction of the herbaceous load
    pub fctcur: f64,

    // ------------------- INDICES ------------------- //
    /// Spread component [ft/min]
    pub sc: f64,
    /// Energy release component
    pub erc: f64,
    /// Burning index
    pub bi: f64,
    /// Ignition component [%]
    pub ic: f64,
    /// Human-caused fire occurrence index
    pub mcoi: f64,
    /// Lightning-caused fire occurrence index
    pub loi: f64,
    /// Fire load index
    pub fli: f64,

    // ----------------- INPUTS ---------------//
    /// Input temperature in celsius
    pub temperature: f64,
    /// Input relative humidity in %
    pub humidity: f64,
    /// Input wind speed in m/s
    pub wind_speed: f64,
}

impl Default for OutputElement {
    fn default() -> Self {
        Self {
            emc: NODATAVAL,
            mc1: NODATAVAL,
            mc10: NODATAVAL,
            mc100: NODATAVAL,
            mc1000: NODATAVAL,
            mcherb: NODATAVAL,
            mcwood: NODATAVAL,
            fctcur: NODATAVAL,
            sc: NODATAVAL,
            erc: NODATAVAL,
            bi: NODATAVAL,
            ic: NODATAVAL,
            mcoi: NODATAVAL,
            loi: NODATAVAL,
            fli: NODATAVAL,
            temperature: NODATAVAL,
            humidity: NODATAVAL,
            wind_speed: NODATAVAL,
        }
    }
}

#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(
    Debug,
    PartialEq,
    Eq,
    Hash,
    Copy,
    Clone,
    EnumString,
    EnumProperty,
    EnumIter,
    Display,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum OutputVariableName {
    /// Equilibrium Moisture Content
    #[strum(props(long_name = "Equilibrium Moisture Content", units = "%"))]
    emc,
    /// 1-hr Fuel Moisture
    #[strum(props(long_name = "1-hr Fuel Moisture", units = "%"))]
    mc1,
    /// 10-hr Fuel Moisture
    #[strum(props(long_name = "10-hr Fuel Moisture", units = "%"))]
    mc10,
    /// 100-hr Fuel Moisture
    #[strum(props(long_name = "100-hr Fuel Moisture", units = "%"))]
    mc100,
    /// 1000-hr Fuel Moisture
    #[strum(props(long_name = "1000-hr Fuel Moisture", units = "%"))]
    mc1000,
    /// Herbaceous Fuel Moisture
    #[strum(props(long_name = "Herbaceous Fuel Moisture", units = "%"))]
    mcherb,
    /// Woody Fuel Moisture
    #[strum(props(long_name = "Woody Fuel Moisture", units = "%"))]
    mcwood,
    /// Cured Herbaceous Fraction
    #[strum(props(long_name = "Cured Herbaceous Fraction", units = "-"))]
    fctcur,
    /// Spread Component
    #[strum(props(long_name = "Spread Component", units = "ft/min"))]
    sc,
    /// Energy Release Component
    #[strum(props(long_name = "Energy Release Component", units = "-"))]
    erc,
    /// Burning Index
    #[strum(props(long_name = "Burning Index", units = "-"))]
    bi,
    /// Ignition Component
    #[strum(props(long_name = "Ignition Component", units = "%"))]
    ic,
    /// Human-Caused Fire Occurrence Index
    #[strum(props(long_name = "Human-Caused Fire Occurrence Index", units = "-"))]
    mcoi,
    /// Lightning-Caused Fire Occurrence Index
    #[strum(props(long_name = "Lightning-Caused Fire Occurrence Index", units = "-"))]
    loi,
    /// Fire Load Index
    #[strum(props(long_name = "Fire Load Index", units = "-"))]
    fli,
    /// Input Temperature
    #[strum(props(long_name = "Input Temperature", units = "°C"))]
    temperature,
    /// Input Relative Humidity
    #[strum(props(long_name = "Input Relative Humidity", units = "%"))]
    humidity,
    /// Input Wind Speed
    #[strum(props(long_name = "Input Wind Speed", units = "m/s"))]
    windSpeed,
}

pub struct Output {
    pub time: DateTime<Utc>,
    pub data: Array1<OutputElement>,
}

impl Output {
    pub fn new(time: DateTime<Utc>, data: Array1<OutputElement>) -> Self {
        Self { time, data }
    }

    pub fn get_array(&self, func: fn(&OutputElement) -> f64) -> Array1<f64> {
        let vec = self.data.as_slice().map_or_else(
            || self.data.iter().map(func).collect::<Vec<_>>(),
            |slice| slice.par_iter().map(func).collect::<Vec<_>>(),
        );
        Array1::from_vec(vec)
    }

    pub fn get(&self, variable: &OutputVariableName) -> Option<Array1<f64>> {
        use OutputVariableName::*;
        match variable {
            emc => Some(self.get_array(|o| o.emc)),
            mc1 => Some(self.get_array(|o| o.mc1)),
            mc10 => Some(self.get_array(|o| o.mc10)),
            mc100 => Some(self.get_array(|o| o.mc100)),
            mc1000 => Some(self.get_array(|o| o.mc1000)),
            mcherb => Some(self.get_array(|o| o.mcherb)),
            mcwood => Some(self.get_array(|o| o.mcwood)),
            fctcur => Some(self.get_array(|o| o.fctcur)),
            sc => Some(self.get_array(|o| o.sc)),
            erc => Some(self.get_array(|o| o.erc)),
            bi => Some(self.get_array(|o| o.bi)),
            ic => Some(self.get_array(|o| o.ic)),
            mcoi => Some(self.get_array(|o| o.mcoi)),
            loi => Some(self.get_array(|o| o.loi)),
            fli => Some(self.get_array(|o| o.fli)),
            // Input variables
            temperature => Some(self.get_array(|o| o.temperature)),
            humidity => Some(self.get_array(|o| o.humidity)),
            windSpeed => Some(self.get_array(|o| o.wind_speed)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;
    use strum::{EnumProperty, IntoEnumIterator};

    #[test]
    fn names_parse_case_insensitive() {
        assert_eq!(OutputVariableName::from_str("BI").unwrap(), OutputVariableName::bi);
        assert_eq!(
            OutputVariableName::from_str("windspeed").unwrap(),
            OutputVariableName::windSpeed
        );
        assert!(OutputVariableName::from_str("ffmc").is_err());
    }

    #[test]
    fn every_variable_has_metadata_and_values() {
        let output = Output::new(
            Utc::now(),
            Array1::from_vec(vec![OutputElement::default(); 3]),
        );
        for var in OutputVariableName::iter() {
            assert!(var.get_str("long_name").is_some());
            assert!(var.get_str("units").is_some());
            let values = output.get(&var).unwrap();
            assert_eq!(values.len(), 3);
            assert!(values.iter().all(|v| *v == NODATAVAL));
        }
    }
}
