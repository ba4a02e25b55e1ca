use serde_derive::{Deserialize, Serialize};

use crate::{
    error::{check_fraction, check_non_negative, check_positive, Result},
    modules::rothermel::models::FuelParticleProperties,
    units::{Quantity, UnitSystem},
};

/// One size class of a fuel complex.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelClass {
    pub particle: FuelParticleProperties,
    /// surface-area-to-volume ratio [1/ft]
    pub savr: f64,
    /// oven-dry loading [lb/ft2]
    pub loading: f64,
    /// moisture content [dry-weight fraction]
    pub moisture: f64,
}

impl FuelClass {
    pub fn validate(&self) -> Result<()> {
        self.particle.validate()?;
        check_positive("savr", self.savr)?;
        check_non_negative("loading", self.loading)?;
        check_non_negative("moisture", self.moisture)?;
        Ok(())
    }

    pub fn to_us(&self, system: UnitSystem) -> Self {
        Self {
            particle: self.particle.to_us(system),
            savr: Quantity::SurfaceAreaToVolume.to_us(self.savr, system),
            loading: Quantity::Loading.to_us(self.loading, system),
            moisture: self.moisture,
        }
    }
}

/// Ordered dead and live size classes sharing one fuel bed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuelComplex {
    pub dead: Vec<FuelClass>,
    pub live: Vec<FuelClass>,
    /// fuel bed depth [ft]
    pub depth: f64,
    /// dead fuel moisture of extinction [fraction]
    pub dead_extinction_moisture: f64,
}

impl FuelComplex {
    pub fn validate(&self) -> Result<()> {
        check_positive("depth", self.depth)?;
        check_positive("dead_extinction_moisture", self.dead_extinction_moisture)?;
        check_fraction("dead_extinction_moisture", self.dead_extinction_moisture)?;
        for class in self.dead.iter().chain(self.live.iter()) {
            class.validate()?;
        }
        Ok(())
    }

    pub fn to_us(&self, system: UnitSystem) -> Self {
        Self {
            dead: self.dead.iter().map(|c| c.to_us(system)).collect(),
            live: self.live.iter().map(|c| c.to_us(system)).collect(),
            depth: Quantity::Length.to_us(self.depth, system),
            dead_extinction_moisture: self.dead_extinction_moisture,
        }
    }
}

/// Weights of one class inside its group.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct WeightedClass {
    /// surface area per unit ground area, savr * loading / particle density [-]
    pub surface_area: f64,
    /// surface-area-based weighting factor
    pub area_weight: f64,
    /// loading-based weighting factor
    pub load_weight: f64,
    /// [lb/ft2]
    pub net_loading: f64,
    pub effective_heating_number: f64,
}

/// Characteristic values of the dead or the live group.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeightedGroup {
    pub classes: Vec<WeightedClass>,
    pub surface_area: f64,
    /// [lb/ft2]
    pub total_loading: f64,
    /// share of the complex surface area
    pub fraction: f64,
    /// area-weighted net loading [lb/ft2]
    pub net_loading: f64,
    /// [1/ft]
    pub savr: f64,
    /// [Btu/lb]
    pub heat_content: f64,
    pub moisture: f64,
    pub effective_mineral: f64,
    pub total_mineral: f64,
    /// sum of w * exp(-k/savr), k = 138 for dead and 500 for live [lb/ft2]
    pub fine_load: f64,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WeightedFuelComplex {
    pub dead: WeightedGroup,
    pub live: WeightedGroup,
    /// characteristic SAV ratio of the complex [1/ft]
    pub savr: f64,
}

impl WeightedFuelComplex {
    fn group_to_si(group: &WeightedGroup) -> WeightedGroup {
        use Quantity::*;
        WeightedGroup {
            classes: group
                .classes
                .iter()
                .map(|c| WeightedClass {
                    net_loading: Loading.to_si(c.net_loading),
                    ..*c
                })
                .collect(),
            total_loading: Loading.to_si(group.total_loading),
            net_loading: Loading.to_si(group.net_loading),
            savr: SurfaceAreaToVolume.to_si(group.savr),
            heat_content: HeatContent.to_si(group.heat_content),
            fine_load: Loading.to_si(group.fine_load),
            ..group.clone()
        }
    }

    pub fn to_si(&self) -> Self {
        Self {
            dead: Self::group_to_si(&self.dead),
            live: Self::group_to_si(&self.live),
            savr: Quantity::SurfaceAreaToVolume.to_si(self.savr),
        }
    }
}

/// Output of one multi-class spread evaluation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct HeterogeneousSpreadState {
    pub complex: WeightedFuelComplex,
    /// [lb/ft3]
    pub bulk_density: f64,
    pub packing_ratio: f64,
    pub optimum_packing_ratio: f64,
    pub relative_packing_ratio: f64,
    /// [1/min]
    pub optimum_reaction_velocity: f64,
    pub dead_moisture_damping: f64,
    pub live_moisture_damping: f64,
    pub dead_mineral_damping: f64,
    pub live_mineral_damping: f64,
    /// fine-load weighted dead moisture [fraction]
    pub fine_dead_moisture: f64,
    /// [fraction]
    pub live_extinction_moisture: f64,
    /// [Btu/ft2/min]
    pub reaction_intensity: f64,
    pub propagating_flux_ratio: f64,
    pub wind_c: f64,
    pub wind_b: f64,
    pub wind_e: f64,
    /// [ft/min]
    pub wind_speed: f64,
    pub wind_limited: bool,
    pub wind_factor: f64,
    pub slope_factor: f64,
    /// [Btu/ft3]
    pub heat_sink: f64,
    /// [ft/min]
    pub no_wind_no_slope_rate: f64,
    /// [ft/min]
    pub rate_of_spread: f64,
    /// [min]
    pub residence_time: f64,
    /// [Btu/ft2]
    pub heat_per_unit_area: f64,
    /// [Btu/ft/s]
    pub fireline_intensity: f64,
    /// [ft]
    pub flame_length: f64,
}

impl HeterogeneousSpreadState {
    pub fn to_si(&self) -> Self {
        use Quantity::*;
        Self {
            complex: self.complex.to_si(),
            bulk_density: Density.to_si(self.bulk_density),
            reaction_intensity: ReactionIntensity.to_si(self.reaction_intensity),
            wind_speed: WindSpeed.to_si(self.wind_speed),
            // Btu/ft3 -> kJ/m3
            heat_sink: self.heat_sink * Energy.factor() / Length.factor().powi(3),
            no_wind_no_slope_rate: RateOfSpread.to_si(self.no_wind_no_slope_rate),
            rate_of_spread: RateOfSpread.to_si(self.rate_of_spread),
            heat_per_unit_area: HeatPerUnitArea.to_si(self.heat_per_unit_area),
            fireline_intensity: FirelineIntensity.to_si(self.fireline_intensity),
            flame_length: Length.to_si(self.flame_length),
            ..self.clone()
        }
    }

    pub fn convert(&self, system: UnitSystem) -> Self {
        match system {
            UnitSystem::US => self.clone(),
            UnitSystem::SI => self.to_si(),
        }
    }
}
