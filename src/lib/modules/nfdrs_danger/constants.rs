use super::models::LightningActivity;

// SPREAD COMPONENT
// slope factor per slope class, 5.275 * tan^2 of the class slope
pub const SLOPE_CLASS_FACTORS: [f64; 5] = [0.267, 0.533, 1.068, 2.134, 4.273];

// ENERGY RELEASE COMPONENT
pub const ERC_DAMPING: [f64; 3] = [-2.0, 1.5, -0.5];
pub const ERC_SCALE: f64 = 0.04;
pub const ERC_RESIDENCE: f64 = 384.0;

// BURNING INDEX
pub const BI_COEFF: f64 = 3.01;
pub const BI_EXP: f64 = 0.46;

// IGNITION COMPONENT
pub const QIGN_C0: f64 = 144.5;
pub const QIGN_T1: f64 = -0.266;
pub const QIGN_T2: f64 = -0.00058;
pub const QIGN_TM: f64 = -0.01;
pub const QIGN_M_AMP: f64 = 18.54;
pub const QIGN_M_RATE: f64 = -0.151;
pub const QIGN_M1: f64 = 6.4;
pub const CHI_MAX: f64 = 344.0;
pub const CHI_SCALE: f64 = 10.0;
pub const PI_COEFF: f64 = 0.000923;
pub const PI_EXP: f64 = 3.66;
pub const PI_DIVISOR: f64 = 50.0;
pub const PI_OFFSET: f64 = 0.00232;
pub const PI_NORM: f64 = 0.99767;
pub const IC_SCALE: f64 = 0.10;

// OCCURRENCE INDEXES
pub const MCOI_SCALE: f64 = 0.01;
pub const LOI_SCALE: f64 = 0.01;
pub const LOI_CARRY_OVER: f64 = 0.25;
pub const STORM_SPEED: f64 = 13.0 / 60.0; // [mi/min]
pub const LIGHTNING_DURATION_C0: f64 = -86.83;
pub const LIGHTNING_DURATION_C1: f64 = 153.41;
pub const LIGHTNING_DURATION_EXP: f64 = 0.1437;
pub const QUARTER_PI: f64 = 0.7854;
// 1-hr moisture inside the rain corridor [%]
pub const RAIN_CORRIDOR_MOISTURE: f64 = 35.0;

// FIRE LOAD INDEX
pub const FLI_COEFF: f64 = 0.71;
pub const INDEX_CAP: f64 = 100.0;

// cloud-to-ground rate [strikes/min], storm diameter and total corridor width [mi]
pub static LIGHTNING_TABLE: [LightningActivity; 6] = [
    LightningActivity::new(1, 0.0, 0.0, 0.0, false),
    LightningActivity::new(2, 12.5, 3.0, 7.0, false),
    LightningActivity::new(3, 25.0, 4.0, 8.0, false),
    LightningActivity::new(4, 50.0, 5.0, 9.0, false),
    LightningActivity::new(5, 100.0, 7.0, 11.0, false),
    LightningActivity::new(6, 12.5, 3.0, 7.0, true),
];
