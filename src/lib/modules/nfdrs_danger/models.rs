use serde_derive::{Deserialize, Serialize};

/// Storm geometry of one lightning activity level.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct LightningActivity {
    pub level: u8,
    /// [strikes/min]
    pub cloud_to_ground_rate: f64,
    /// [mi]
    pub storm_diameter: f64,
    /// [mi]
    pub total_width: f64,
    /// dry lightning, no rain corridor
    pub dry: bool,
}

impl LightningActivity {
    pub const fn new(
        level: u8,
        cloud_to_ground_rate: f64,
        storm_diameter: f64,
        total_width: f64,
        dry: bool,
    ) -> Self {
        Self {
            level,
            cloud_to_ground_rate,
            storm_diameter,
            total_width,
            dry,
        }
    }
}

/// Weather and risk inputs of one daily fire danger evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DangerConditions {
    /// observation-time temperature [F]
    pub temperature: f64,
    /// 20-ft wind speed [mi/h]
    pub wind_speed: f64,
    /// 1..=5
    pub slope_class: u8,
    /// 1..=6
    pub lightning_activity_level: u8,
    pub raining: bool,
    pub fuels_wet: bool,
    /// human-caused risk, MRISK
    pub human_risk: f64,
    /// lightning risk scaling factor, LRSF
    pub lightning_risk: f64,
    /// yesterday's lightning occurrence index
    pub previous_loi: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct SpreadComponent {
    /// SC [ft/min]
    pub spread_component: f64,
    /// [Btu/ft2/min]
    pub reaction_intensity: f64,
    /// [%]
    pub live_extinction_moisture: f64,
    /// cured share of the herbaceous load
    pub transfer_fraction: f64,
    /// midflame wind [ft/min]
    pub wind_speed: f64,
    pub wind_limited: bool,
    pub wind_factor: f64,
    pub slope_factor: f64,
    pub packing_ratio: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EnergyReleaseComponent {
    /// ERC
    pub energy_release_component: f64,
    /// loading-weighted reaction intensity [Btu/ft2/min]
    pub reaction_intensity: f64,
    /// [min]
    pub residence_time: f64,
    pub dead_moisture_damping: f64,
    pub live_moisture_damping: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct IgnitionComponent {
    /// [cal/g]
    pub heat_of_ignition: f64,
    /// P(I) [%]
    pub probability_of_ignition: f64,
    /// P(F/I) [-]
    pub probability_of_spread: f64,
    /// IC [%]
    pub ignition_component: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LightningOccurrence {
    /// [min]
    pub lightning_duration: f64,
    /// share of the storm path inside the rain corridor
    pub rain_fraction: f64,
    /// IC inside the rain corridor
    pub rain_ignition_component: f64,
    /// area weighted IC
    pub mean_ignition_component: f64,
    /// LOI
    pub lightning_occurrence_index: f64,
}

/// Full set of daily NFDRS outputs for one cell.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FireDangerIndices {
    pub spread: SpreadComponent,
    pub energy_release: EnergyReleaseComponent,
    pub ignition: IgnitionComponent,
    pub lightning: LightningOccurrence,
    pub burning_index: f64,
    pub human_occurrence_index: f64,
    pub fire_load_index: f64,
}
