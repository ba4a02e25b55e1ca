use serde_derive::{Deserialize, Serialize};

use crate::{
    error::{check_finite, check_fraction, check_non_negative, check_positive, Result},
    units::{Quantity, UnitSystem},
};

/// Per fuel class particle properties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelParticleProperties {
    /// low heat content [Btu/lb]
    pub heat_content: f64,
    /// total mineral content [-]
    pub total_mineral: f64,
    /// effective (silica-free) mineral content [-]
    pub effective_mineral: f64,
    /// oven-dry particle density [lb/ft3]
    pub particle_density: f64,
}

impl Default for FuelParticleProperties {
    fn default() -> Self {
        Self {
            heat_content: 8000.0,
            total_mineral: 0.0555,
            effective_mineral: 0.010,
            particle_density: 32.0,
        }
    }
}

impl FuelParticleProperties {
    pub fn validate(&self) -> Result<()> {
        check_non_negative("heat_content", self.heat_content)?;
        check_fraction("total_mineral", self.total_mineral)?;
        check_fraction("effective_mineral", self.effective_mineral)?;
        check_positive("particle_density", self.particle_density)?;
        Ok(())
    }

    pub fn to_us(&self, system: UnitSystem) -> Self {
        Self {
            heat_content: Quantity::HeatContent.to_us(self.heat_content, system),
            particle_density: Quantity::Density.to_us(self.particle_density, system),
            ..*self
        }
    }
}

/// Per fuel class bed properties.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelBedProperties {
    /// surface-area-to-volume ratio [1/ft]
    pub savr: f64,
    /// oven-dry loading [lb/ft2]
    pub loading: f64,
    /// fuel bed depth [ft]
    pub depth: f64,
    /// dead fuel moisture of extinction [fraction]
    pub extinction_moisture: f64,
}

impl FuelBedProperties {
    pub fn validate(&self) -> Result<()> {
        check_positive("savr", self.savr)?;
        check_non_negative("loading", self.loading)?;
        check_positive("depth", self.depth)?;
        check_positive("extinction_moisture", self.extinction_moisture)?;
        check_fraction("extinction_moisture", self.extinction_moisture)?;
        Ok(())
    }

    pub fn to_us(&self, system: UnitSystem) -> Self {
        Self {
            savr: Quantity::SurfaceAreaToVolume.to_us(self.savr, system),
            loading: Quantity::Loading.to_us(self.loading, system),
            depth: Quantity::Length.to_us(self.depth, system),
            ..*self
        }
    }
}

/// Weather and terrain for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EnvironmentalConditions {
    /// fuel moisture content [dry-weight fraction]
    pub moisture: f64,
    /// midflame wind speed [ft/min]
    pub wind_speed: f64,
    /// slope steepness, tan of the slope angle [-]
    pub slope: f64,
}

impl EnvironmentalConditions {
    pub fn validate(&self) -> Result<()> {
        check_non_negative("moisture", self.moisture)?;
        check_non_negative("wind_speed", self.wind_speed)?;
        check_non_negative("slope", self.slope)?;
        Ok(())
    }

    pub fn to_us(&self, system: UnitSystem) -> Self {
        Self {
            wind_speed: Quantity::WindSpeed.to_us(self.wind_speed, system),
            ..*self
        }
    }

    /// Checks only wind and slope, for models that carry moisture per fuel class.
    pub fn validate_terrain(&self) -> Result<()> {
        check_non_negative("wind_speed", self.wind_speed)?;
        check_non_negative("slope", self.slope)?;
        check_finite("moisture", self.moisture)?;
        Ok(())
    }
}

/// Intermediate and output quantities of one spread evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedSpreadState {
    /// net fuel load [lb/ft2]
    pub net_fuel_load: f64,
    /// oven-dry bulk density [lb/ft3]
    pub bulk_density: f64,
    pub packing_ratio: f64,
    pub optimum_packing_ratio: f64,
    pub relative_packing_ratio: f64,
    /// maximum reaction velocity [1/min]
    pub max_reaction_velocity: f64,
    pub reaction_velocity_exponent: f64,
    /// optimum reaction velocity [1/min]
    pub optimum_reaction_velocity: f64,
    pub moisture_damping: f64,
    pub mineral_damping: f64,
    /// reaction intensity [Btu/ft2/min]
    pub reaction_intensity: f64,
    pub propagating_flux_ratio: f64,
    /// wind factor coefficients, valid for wind speeds in ft/min
    pub wind_c: f64,
    pub wind_b: f64,
    pub wind_e: f64,
    /// midflame wind speed used in the wind factor, after limiting [ft/min]
    pub wind_speed: f64,
    pub wind_limited: bool,
    pub wind_factor: f64,
    pub slope_factor: f64,
    pub effective_heating_number: f64,
    /// heat of preignition [Btu/lb]
    pub heat_of_preignition: f64,
    /// [ft/min]
    pub no_wind_no_slope_rate: f64,
    /// [ft/min]
    pub rate_of_spread: f64,
    /// [min]
    pub residence_time: f64,
    /// [Btu/ft2]
    pub heat_per_unit_area: f64,
    /// Byram's fireline intensity [Btu/ft/s]
    pub fireline_intensity: f64,
    /// [ft]
    pub flame_length: f64,
}

impl DerivedSpreadState {
    /// Copy with every dimensional field expressed in SI.
    pub fn to_si(&self) -> Self {
        use Quantity::*;
        Self {
            net_fuel_load: Loading.to_si(self.net_fuel_load),
            bulk_density: Density.to_si(self.bulk_density),
            reaction_intensity: ReactionIntensity.to_si(self.reaction_intensity),
            wind_speed: WindSpeed.to_si(self.wind_speed),
            heat_of_preignition: HeatContent.to_si(self.heat_of_preignition),
            no_wind_no_slope_rate: RateOfSpread.to_si(self.no_wind_no_slope_rate),
            rate_of_spread: RateOfSpread.to_si(self.rate_of_spread),
            heat_per_unit_area: HeatPerUnitArea.to_si(self.heat_per_unit_area),
            fireline_intensity: FirelineIntensity.to_si(self.fireline_intensity),
            flame_length: Length.to_si(self.flame_length),
            ..*self
        }
    }

    pub fn convert(&self, system: UnitSystem) -> Self {
        match system {
            UnitSystem::US => *self,
            UnitSystem::SI => self.to_si(),
        }
    }
}
