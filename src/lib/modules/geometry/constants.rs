// LENGTH-TO-WIDTH RATIO
// Z = 1 + 0.25 * UE[mi/h], expressed per ft/min
pub const LENGTH_TO_WIDTH_K: f64 = 0.002840909;
