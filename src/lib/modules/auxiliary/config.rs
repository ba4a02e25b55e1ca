use log::trace;

use super::functions::{corrected_wind_limit, original_wind_limit};

/// Wind speed limit as a function of reaction intensity.
/// The variant is fixed at construction.
#[derive(Debug, Clone, Copy)]
pub struct WindLimit {
    pub corrected: bool,

    limit_fn: fn(f64) -> f64,
}

impl WindLimit {
    pub fn new(corrected: bool) -> Self {
        let limit_fn: fn(f64) -> f64 = if corrected {
            corrected_wind_limit
        } else {
            original_wind_limit
        };
        WindLimit {
            corrected,
            limit_fn,
        }
    }

    /// maximum effective wind speed [ft/min]
    pub fn limit(&self, reaction_intensity: f64) -> f64 {
        (self.limit_fn)(reaction_intensity)
    }

    /// Cap `wind_speed` [ft/min] and report whether the cap was reached.
    pub fn apply(&self, wind_speed: f64, reaction_intensity: f64) -> (f64, bool) {
        let limit = self.limit(reaction_intensity);
        if wind_speed > limit {
            trace!("wind speed {wind_speed:.1} ft/min limited to {limit:.1} ft/min");
            (limit, true)
        } else {
            (wind_speed, false)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn variants_select_limit_function() {
        let original = WindLimit::new(false);
        let corrected = WindLimit::new(true);
        assert_eq!(original.apply(1000.0, 500.0), (450.0, true));
        assert_eq!(original.apply(100.0, 500.0), (100.0, false));
        let (u, limited) = corrected.apply(1000.0, 125.0);
        assert!(limited);
        assert!((u - 484.0).abs() < 1e-9);
    }
}
