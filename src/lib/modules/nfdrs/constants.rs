// WARM STATE INITIALIZATION
/// 100-hr moisture of a cold start [%]
pub const MC100_INIT: f64 = 20.0;
/// 1000-hr moisture of a cold start [%]
pub const MC1000_INIT: f64 = 25.0;
pub const LOI_INIT: f64 = 0.0;
