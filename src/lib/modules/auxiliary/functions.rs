use crate::constants::SMIDGEN;

use super::{constants::*, models::FuelLoadTransfer};

// DYNAMIC FUEL LOAD TRANSFER
/// Cured fraction of the herbaceous load for a herbaceous moisture content
/// expressed as a dry-weight fraction.
pub fn transfer_fraction(herb_moisture: f64) -> f64 {
    (TRANSFER_SLOPE * herb_moisture + TRANSFER_INTERCEPT).clamp(0.0, 1.0)
}

pub fn dynamic_fuel_load_transfer(herb_moisture: f64, herb_load: f64) -> FuelLoadTransfer {
    let fraction = transfer_fraction(herb_moisture);
    FuelLoadTransfer {
        fraction,
        transferred_load: fraction * herb_load,
        remaining_live_load: (1.0 - fraction) * herb_load,
    }
}

// LIVE FUEL MOISTURE OF EXTINCTION
/// Dead fine load of a class, w * exp(-138/savr).
pub fn dead_fine_load(load: f64, savr: f64) -> f64 {
    if savr <= 0.0 {
        return 0.0;
    }
    load * f64::exp(-DEAD_FINE_LOAD_EXP / savr)
}

/// Live fine load of a class, w * exp(-500/savr).
pub fn live_fine_load(load: f64, savr: f64) -> f64 {
    if savr <= 0.0 {
        return 0.0;
    }
    load * f64::exp(-LIVE_FINE_LOAD_EXP / savr)
}

/// Moisture of extinction of the live fuels [fraction].
///
/// `load_ratio` is the dead-to-live fine load ratio W, `fine_dead_moisture`
/// the fine-load weighted dead moisture. Never lower than `dead_extinction`.
pub fn live_extinction_moisture(
    dead_extinction: f64,
    load_ratio: f64,
    fine_dead_moisture: f64,
) -> f64 {
    let mx = LIVE_EXTINCTION_SLOPE * load_ratio * (1.0 - fine_dead_moisture / dead_extinction)
        - LIVE_EXTINCTION_INTERCEPT;
    mx.max(dead_extinction)
}

/// Dead-to-live fine load ratio W, 0 when there is no live fine load.
pub fn fine_load_ratio(dead_fine: f64, live_fine: f64) -> f64 {
    if live_fine <= SMIDGEN {
        return 0.0;
    }
    dead_fine / live_fine
}

// EFFECTIVE MIDFLAME WIND SPEED
/// Wind speed [ft/min] that alone produces the combined factor `phi_e`:
/// UE = ((phi_e * beta_ratio^E) / C)^(1/B).
pub fn effective_wind_speed(
    phi_e: f64,
    relative_packing_ratio: f64,
    wind_c: f64,
    wind_b: f64,
    wind_e: f64,
) -> f64 {
    if phi_e <= 0.0 || wind_c <= 0.0 || wind_b <= 0.0 {
        return 0.0;
    }
    ((phi_e * relative_packing_ratio.powf(wind_e)) / wind_c).powf(1.0 / wind_b)
}

// WIND LIMIT
/// Albini's (1976) limit, 0.9 * I_R [ft/min].
pub fn original_wind_limit(reaction_intensity: f64) -> f64 {
    ORIGINAL_WIND_LIMIT_FACTOR * reaction_intensity
}

/// Andrews et al. (2013) limit, 96.8 * I_R^(1/3) [ft/min].
pub fn corrected_wind_limit(reaction_intensity: f64) -> f64 {
    CORRECTED_WIND_LIMIT_FACTOR * reaction_intensity.max(0.0).cbrt()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn transfer_is_clamped() {
        assert_eq!(transfer_fraction(0.0), 1.0);
        assert_eq!(transfer_fraction(2.0), 0.0);
        assert_relative_eq!(transfer_fraction(0.5), 0.775, epsilon = 1e-12);
    }

    #[test]
    fn transfer_conserves_load() {
        let t = dynamic_fuel_load_transfer(0.8, 0.5);
        assert_relative_eq!(t.transferred_load + t.remaining_live_load, 0.5);
        assert_relative_eq!(t.fraction, 1.33 - 1.11 * 0.8, epsilon = 1e-12);
    }

    #[test]
    fn live_extinction_never_below_dead() {
        for ratio in [0.0, 0.05, 0.3, 1.0, 4.0] {
            for mf in [0.0, 0.05, 0.12, 0.3] {
                assert!(live_extinction_moisture(0.12, ratio, mf) >= 0.12);
            }
        }
        // dry dead fuel with plenty of dead load
        assert_relative_eq!(
            live_extinction_moisture(0.25, 1.0, 0.05),
            2.9 * (1.0 - 0.2) - 0.226,
            epsilon = 1e-12
        );
    }

    #[test]
    fn effective_wind_inverts_wind_factor() {
        let (c, b, e) = (0.0054, 1.6, 0.38);
        let beta_ratio = 0.6;
        let u = 440.0;
        let phi_w = c * f64::powf(u, b) * f64::powf(beta_ratio, -e);
        assert_relative_eq!(
            effective_wind_speed(phi_w, beta_ratio, c, b, e),
            u,
            max_relative = 1e-10
        );
        assert_eq!(effective_wind_speed(0.0, beta_ratio, c, b, e), 0.0);
    }

    #[test]
    fn wind_limits() {
        assert_relative_eq!(original_wind_limit(1000.0), 900.0);
        assert_relative_eq!(corrected_wind_limit(1000.0), 968.0, max_relative = 1e-12);
    }
}
