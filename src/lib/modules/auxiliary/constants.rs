// DYNAMIC FUEL LOAD TRANSFER
// fraction of herbaceous load cured = TRANSFER_SLOPE * moisture + TRANSFER_INTERCEPT
pub const TRANSFER_SLOPE: f64 = -1.11; // per unit moisture fraction
pub const TRANSFER_INTERCEPT: f64 = 1.33;

// LIVE FUEL MOISTURE OF EXTINCTION
pub const LIVE_EXTINCTION_SLOPE: f64 = 2.9;
pub const LIVE_EXTINCTION_INTERCEPT: f64 = 0.226;
// exponents of the fine load weighting exp(-k/savr) [1/ft]
pub const DEAD_FINE_LOAD_EXP: f64 = 138.0;
pub const LIVE_FINE_LOAD_EXP: f64 = 500.0;

// WIND LIMIT
pub const ORIGINAL_WIND_LIMIT_FACTOR: f64 = 0.9; // [ft/min per Btu/ft2/min]
pub const CORRECTED_WIND_LIMIT_FACTOR: f64 = 96.8; // [ft/min per (Btu/ft2/min)^(1/3)]
