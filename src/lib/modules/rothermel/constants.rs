// Empirical constants of the Rothermel (1972) / Albini (1976) model.
// US customary units: ft, lb, Btu, min.

// PACKING
pub const OPTIMUM_PACKING_K: f64 = 3.348;
pub const OPTIMUM_PACKING_EXP: f64 = -0.8189;

// REACTION VELOCITY
pub const MAX_REACTION_C1: f64 = 495.0;
pub const MAX_REACTION_C2: f64 = 0.0594;
pub const REACTION_EXP_C3: f64 = 133.0;
pub const REACTION_EXP_POW: f64 = -0.7913;

// DAMPING
pub const MOISTURE_DAMPING_C1: f64 = -2.59;
pub const MOISTURE_DAMPING_C2: f64 = 5.11;
pub const MOISTURE_DAMPING_C3: f64 = -3.52;
pub const MINERAL_DAMPING_K: f64 = 0.174;
pub const MINERAL_DAMPING_EXP: f64 = -0.19;

// PROPAGATING FLUX RATIO
pub const FLUX_C4: f64 = 0.792;
pub const FLUX_C5: f64 = 0.681;
pub const FLUX_C6: f64 = 192.0;
pub const FLUX_C7: f64 = 0.2595;

// WIND AND SLOPE
pub const WIND_C8: f64 = 7.47;
pub const WIND_C9: f64 = 0.133;
pub const WIND_C_EXP: f64 = 0.55;
pub const WIND_C10: f64 = 0.02526;
pub const WIND_B_EXP: f64 = 0.54;
pub const WIND_C11: f64 = 0.715;
pub const WIND_C12: f64 = 3.59e-4;
pub const SLOPE_C13: f64 = 5.275;
pub const SLOPE_BETA_EXP: f64 = -0.3;

// HEAT SINK
pub const HEATING_NUMBER_C14: f64 = 138.0;
pub const PREIGNITION_C15: f64 = 250.0; // [Btu/lb]
pub const PREIGNITION_C16: f64 = 1116.0; // [Btu/lb per unit moisture]

// DERIVED OUTPUTS
pub const RESIDENCE_TIME_C17: f64 = 384.0; // [min/ft]
pub const FLAME_LENGTH_C18: f64 = 0.45; // [ft per (Btu/ft/s)^0.46]
pub const FLAME_LENGTH_EXP: f64 = 0.46;
pub const SECONDS_PER_MINUTE: f64 = 60.0;
