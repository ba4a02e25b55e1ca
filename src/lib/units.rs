//! Constant-factor conversions between US customary and SI units.
//!
//! Every empirical constant in the crate is expressed in US customary units
//! (ft, lb, Btu, min). SI values are converted with [`Quantity::from_si`] on the
//! way in and [`Quantity::to_si`] on the way out.
use serde_derive::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumProperty, EnumString};

pub const FT_TO_M: f64 = 0.3048;
pub const LB_TO_KG: f64 = 0.45359237;
pub const BTU_TO_KJ: f64 = 1.05505585;
const FT2_TO_M2: f64 = FT_TO_M * FT_TO_M;
pub const LB_FT3_TO_KG_M3: f64 = LB_TO_KG / (FT2_TO_M2 * FT_TO_M);
pub const LB_FT2_TO_KG_M2: f64 = LB_TO_KG / FT2_TO_M2;
pub const FT_MIN_TO_M_S: f64 = FT_TO_M / 60.0;
pub const BTU_FT2_MIN_TO_KW_M2: f64 = BTU_TO_KJ / FT2_TO_M2 / 60.0;
pub const BTU_FT2_TO_KJ_M2: f64 = BTU_TO_KJ / FT2_TO_M2;
pub const BTU_FT_S_TO_KW_M: f64 = BTU_TO_KJ / FT_TO_M;
pub const BTU_LB_TO_KJ_KG: f64 = 2.326;

// loading
pub const TONS_ACRE_TO_KG_M2: f64 = 0.2241702;
pub const TONS_ACRE_TO_LB_FT2: f64 = 0.0459137;

// wind
pub const MPH_TO_FT_MIN: f64 = 88.0;
pub const M_S_TO_MPH: f64 = 2.2369362921;

/// Convention in which a component receives its inputs and returns its outputs.
#[derive(
    Debug, Default, PartialEq, Eq, Hash, Copy, Clone, EnumString, Display, Serialize, Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum UnitSystem {
    #[default]
    US,
    SI,
}

/// Physical quantities used by the spread and danger models.
#[derive(
    Debug, PartialEq, Eq, Hash, Copy, Clone, EnumString, EnumIter, EnumProperty, Display,
)]
pub enum Quantity {
    #[strum(props(us = "ft", si = "m"))]
    Length,
    #[strum(props(us = "lb", si = "kg"))]
    Mass,
    #[strum(props(us = "Btu", si = "kJ"))]
    Energy,
    #[strum(props(us = "lb/ft3", si = "kg/m3"))]
    Density,
    #[strum(props(us = "lb/ft2", si = "kg/m2"))]
    Loading,
    #[strum(props(us = "1/ft", si = "1/m"))]
    SurfaceAreaToVolume,
    #[strum(props(us = "ft/min", si = "m/s"))]
    WindSpeed,
    #[strum(props(us = "ft/min", si = "m/min"))]
    RateOfSpread,
    #[strum(props(us = "Btu/ft2/min", si = "kW/m2"))]
    ReactionIntensity,
    #[strum(props(us = "Btu/ft2", si = "kJ/m2"))]
    HeatPerUnitArea,
    #[strum(props(us = "Btu/ft/s", si = "kW/m"))]
    FirelineIntensity,
    #[strum(props(us = "Btu/lb", si = "kJ/kg"))]
    HeatContent,
    #[strum(props(us = "-", si = "-"))]
    Moisture,
}

impl Quantity {
    /// Multiplier taking a US customary value to SI.
    pub fn factor(&self) -> f64 {
        use Quantity::*;
        match self {
            Length => FT_TO_M,
            Mass => LB_TO_KG,
            Energy => BTU_TO_KJ,
            Density => LB_FT3_TO_KG_M3,
            Loading => LB_FT2_TO_KG_M2,
            SurfaceAreaToVolume => 1.0 / FT_TO_M,
            WindSpeed => FT_MIN_TO_M_S,
            RateOfSpread => FT_TO_M,
            ReactionIntensity => BTU_FT2_MIN_TO_KW_M2,
            HeatPerUnitArea => BTU_FT2_TO_KJ_M2,
            FirelineIntensity => BTU_FT_S_TO_KW_M,
            HeatContent => BTU_LB_TO_KJ_KG,
            Moisture => 1.0,
        }
    }

    pub fn to_si(&self, us_value: f64) -> f64 {
        us_value * self.factor()
    }

    pub fn from_si(&self, si_value: f64) -> f64 {
        si_value / self.factor()
    }

    /// Convert a value expressed in `system` to US customary.
    pub fn to_us(&self, value: f64, system: UnitSystem) -> f64 {
        match system {
            UnitSystem::US => value,
            UnitSystem::SI => self.from_si(value),
        }
    }
}

pub fn fahrenheit_to_celsius(temp_f: f64) -> f64 {
    (temp_f - 32.0) / 1.8
}

pub fn celsius_to_fahrenheit(temp_c: f64) -> f64 {
    temp_c * 1.8 + 32.0
}
