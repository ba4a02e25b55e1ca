use serde_derive::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// Live fuel moisture regression coefficients of an NFDRS climate class.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClimateCoefficients {
    pub class: u8,
    pub herb_a: f64,
    pub herb_b: f64,
    pub annual_a: f64,
    pub annual_b: f64,
    pub wood_a: f64,
    pub wood_b: f64,
    /// woody moisture outside the growing season [%]
    pub dormant_wood: f64,
}

impl ClimateCoefficients {
    #[allow(clippy::too_many_arguments)]
    pub const fn new(
        class: u8,
        herb_a: f64,
        herb_b: f64,
        annual_a: f64,
        annual_b: f64,
        wood_a: f64,
        wood_b: f64,
        dormant_wood: f64,
    ) -> Self {
        Self {
            class,
            herb_a,
            herb_b,
            annual_a,
            annual_b,
            wood_a,
            wood_b,
            dormant_wood,
        }
    }

    /// Days needed to complete green-up, 7 per climate class.
    pub fn greenup_days(&self) -> f64 {
        super::constants::GREENUP_DAYS_PER_CLASS * self.class as f64
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize)]
#[strum(ascii_case_insensitive)]
pub enum LiveFuelStage {
    PreGreen,
    Greenup,
    Green,
    Transition,
    Cured,
    Frozen,
}

/// Phenology flags reported by the observer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LiveStageFlags {
    pub greenup: bool,
    pub cured: bool,
    pub frozen: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LiveMoisture {
    pub stage: LiveFuelStage,
    /// [%]
    pub moisture: f64,
}

/// Observation-time dead fine fuel moisture.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FineDeadMoisture {
    /// [%]
    pub emc: f64,
    /// [%]
    pub mc1: f64,
    /// [%]
    pub mc10: f64,
}

/// Boundary conditions of the slow-response classes for one day.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MoistureBoundaries {
    /// daylight-weighted EMC [%]
    pub emc_bar: f64,
    /// 100-hr boundary [%]
    pub hundred_hour: f64,
    /// 1000-hr daily boundary [%]
    pub thousand_hour: f64,
}

/// Herbaceous load split after curing [lb/ft2 or tons/acre, as given].
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TransferredLoading {
    pub fraction: f64,
    /// 1-hr load including the cured herbaceous share
    pub one_hour_load: f64,
    /// herbaceous load still live
    pub herb_load: f64,
}
