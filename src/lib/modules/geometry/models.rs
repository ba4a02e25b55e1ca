use serde_derive::{Deserialize, Serialize};

use crate::{
    error::{check_finite, check_non_negative, check_positive, Result},
    modules::{
        heterogeneous::models::HeterogeneousSpreadState, rothermel::models::DerivedSpreadState,
    },
};

/// Independently computed spread factors to be composed into a head fire.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SpreadVectorInput {
    /// [ft/min]
    pub no_wind_no_slope_rate: f64,
    pub wind_factor: f64,
    pub slope_factor: f64,
    /// wind direction relative to upslope [rad]
    pub wind_bearing: f64,
    /// [min]
    pub elapsed_time: f64,
    pub relative_packing_ratio: f64,
    pub wind_c: f64,
    pub wind_b: f64,
    pub wind_e: f64,
    /// [Btu/ft2/min]
    pub reaction_intensity: f64,
    /// [Btu/ft2]
    pub heat_per_unit_area: f64,
}

impl SpreadVectorInput {
    pub fn from_spread_state(state: &DerivedSpreadState, wind_bearing: f64, elapsed_time: f64) -> Self {
        Self {
            no_wind_no_slope_rate: state.no_wind_no_slope_rate,
            wind_factor: state.wind_factor,
            slope_factor: state.slope_factor,
            wind_bearing,
            elapsed_time,
            relative_packing_ratio: state.relative_packing_ratio,
            wind_c: state.wind_c,
            wind_b: state.wind_b,
            wind_e: state.wind_e,
            reaction_intensity: state.reaction_intensity,
            heat_per_unit_area: state.heat_per_unit_area,
        }
    }

    pub fn from_complex_state(
        state: &HeterogeneousSpreadState,
        wind_bearing: f64,
        elapsed_time: f64,
    ) -> Self {
        Self {
            no_wind_no_slope_rate: state.no_wind_no_slope_rate,
            wind_factor: state.wind_factor,
            slope_factor: state.slope_factor,
            wind_bearing,
            elapsed_time,
            relative_packing_ratio: state.relative_packing_ratio,
            wind_c: state.wind_c,
            wind_b: state.wind_b,
            wind_e: state.wind_e,
            reaction_intensity: state.reaction_intensity,
            heat_per_unit_area: state.heat_per_unit_area,
        }
    }

    pub fn validate(&self) -> Result<()> {
        check_non_negative("no_wind_no_slope_rate", self.no_wind_no_slope_rate)?;
        check_non_negative("wind_factor", self.wind_factor)?;
        check_non_negative("slope_factor", self.slope_factor)?;
        check_finite("wind_bearing", self.wind_bearing)?;
        check_positive("elapsed_time", self.elapsed_time)?;
        check_non_negative("relative_packing_ratio", self.relative_packing_ratio)?;
        check_non_negative("reaction_intensity", self.reaction_intensity)?;
        check_non_negative("heat_per_unit_area", self.heat_per_unit_area)?;
        Ok(())
    }
}

/// Head fire obtained by composing the slope and wind vectors.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FireSpreadDirection {
    /// D_S [ft]
    pub slope_distance: f64,
    /// D_W [ft]
    pub wind_distance: f64,
    /// upslope component [ft]
    pub x: f64,
    /// cross-slope component [ft]
    pub y: f64,
    /// D_H [ft]
    pub head_distance: f64,
    /// R_H [ft/min]
    pub head_rate: f64,
    /// angle between upslope and the direction of maximum spread, asin(|Y|/D_H) [rad]
    pub direction: f64,
    /// signed direction of maximum spread from upslope, in (-pi, pi] [rad]
    pub azimuth: f64,
    /// phi_E
    pub effective_factor: f64,
    /// UE [ft/min]
    pub effective_wind_speed: f64,
    /// Z
    pub length_to_width: f64,
    /// true when UE was reduced to the wind limit
    pub wind_limited: bool,
}

/// Elliptical fire shape grown from a point ignition.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct EllipticalFireSpread {
    /// R_H [ft/min]
    pub head_rate: f64,
    pub length_to_width: f64,
    pub eccentricity: f64,
    /// query bearing from the head direction [rad]
    pub bearing: f64,
    /// R_gamma [ft/min]
    pub rate_at_bearing: f64,
    /// R_B [ft/min]
    pub backing_rate: f64,
    /// [ft]
    pub head_distance: f64,
    /// [ft]
    pub backing_distance: f64,
    /// [ft]
    pub length: f64,
    /// [ft]
    pub width: f64,
    /// f, semi-major axis [ft]
    pub semi_major: f64,
    /// h, semi-minor axis, flanking distance [ft]
    pub semi_minor: f64,
    /// g, distance from ignition point to ellipse center [ft]
    pub focal_offset: f64,
}

/// Spread normal to the perimeter at the point reached along a bearing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FirePerimeterSpread {
    /// gamma [rad]
    pub bearing: f64,
    pub cos_theta: f64,
    /// ellipse parametric angle [rad]
    pub theta: f64,
    /// R_psi [ft/min]
    pub normal_rate: f64,
    /// psi, direction of the outward normal from the head direction [rad]
    pub normal_bearing: f64,
    /// [Btu/ft/s]
    pub fireline_intensity: f64,
}

/// Head fire, shape and perimeter spread for one query bearing.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct FireGeometryState {
    pub direction: FireSpreadDirection,
    pub ellipse: EllipticalFireSpread,
    pub perimeter: FirePerimeterSpread,
}
