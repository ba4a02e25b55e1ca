use serde_derive::{Deserialize, Serialize};

/// Split of an herbaceous load between the cured (dead 1-hr) and live parts.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelLoadTransfer {
    /// cured fraction [-]
    pub fraction: f64,
    /// load moved to the dead 1-hr class
    pub transferred_load: f64,
    /// load left in the live herbaceous class
    pub remaining_live_load: f64,
}
