pub const NODATAVAL: f64 = -9999.0;

/// Floor applied to group totals and denominators that may vanish
/// (empty fuel groups, zero-loaded beds, zero heat sink).
pub const SMIDGEN: f64 = 1.0e-6;
