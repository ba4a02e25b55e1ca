use serde_derive::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter, EnumString};

use crate::error::{check_non_negative, Result};

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Display,
    EnumString,
    EnumIter,
    Serialize,
    Deserialize,
)]
#[strum(ascii_case_insensitive)]
pub enum FuelModelCode {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
}

/// Standard NFDRS fuel model. Loadings in tons/acre, SAV ratios in 1/ft,
/// depth in ft, extinction moisture in percent, heat content in Btu/lb.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NFDRSFuelModel {
    pub code: FuelModelCode,
    pub name: &'static str,
    pub w1: f64,
    pub w10: f64,
    pub w100: f64,
    pub w1000: f64,
    pub wwood: f64,
    pub wherb: f64,
    pub sg1: f64,
    pub sg10: f64,
    pub sg100: f64,
    pub sg1000: f64,
    pub sgwood: f64,
    pub sgherb: f64,
    pub depth: f64,
    pub mxd: f64,
    pub hd: f64,
    pub hl: f64,
    /// spread component value at which the ignition component saturates
    pub scm: f64,
    /// wind reduction factor from 20 ft to midflame
    pub wndfc: f64,
}

impl NFDRSFuelModel {
    pub fn has_herbaceous(&self) -> bool {
        self.wherb > 0.0
    }

    pub fn has_woody(&self) -> bool {
        self.wwood > 0.0
    }
}

/// Moisture contents used to build a fuel complex from a catalog entry [percent].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct FuelMoistures {
    pub mc1: f64,
    pub mc10: f64,
    pub mc100: f64,
    pub mc1000: f64,
    pub herb: f64,
    pub wood: f64,
}

impl FuelMoistures {
    pub fn validate(&self) -> Result<()> {
        check_non_negative("mc1", self.mc1)?;
        check_non_negative("mc10", self.mc10)?;
        check_non_negative("mc100", self.mc100)?;
        check_non_negative("mc1000", self.mc1000)?;
        check_non_negative("herb", self.herb)?;
        check_non_negative("wood", self.wood)?;
        Ok(())
    }
}
