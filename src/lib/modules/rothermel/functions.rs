use log::trace;

use crate::{constants::SMIDGEN, error::Result, modules::auxiliary::config::WindLimit};

use super::{
    constants::*,
    models::{DerivedSpreadState, EnvironmentalConditions, FuelBedProperties, FuelParticleProperties},
};

/// Division that yields 0 when the denominator vanishes.
pub fn safe_div(num: f64, den: f64) -> f64 {
    if den.abs() <= SMIDGEN {
        0.0
    } else {
        num / den
    }
}

// FUEL BED MODULE
pub fn net_fuel_load(loading: f64, total_mineral: f64) -> f64 {
    loading * (1.0 - total_mineral)
}

pub fn bulk_density(loading: f64, depth: f64) -> f64 {
    loading / depth
}

pub fn packing_ratio(bulk_density: f64, particle_density: f64) -> f64 {
    bulk_density / particle_density
}

pub fn optimum_packing_ratio(savr: f64) -> f64 {
    OPTIMUM_PACKING_K * savr.powf(OPTIMUM_PACKING_EXP)
}

// REACTION MODULE
pub fn max_reaction_velocity(savr: f64) -> f64 {
    let s15 = savr.powf(1.5);
    s15 / (MAX_REACTION_C1 + MAX_REACTION_C2 * s15)
}

pub fn reaction_velocity_exponent(savr: f64) -> f64 {
    REACTION_EXP_C3 * savr.powf(REACTION_EXP_POW)
}

pub fn optimum_reaction_velocity(max_velocity: f64, exponent: f64, relative_packing: f64) -> f64 {
    if relative_packing <= 0.0 {
        return 0.0;
    }
    max_velocity * relative_packing.powf(exponent) * f64::exp(exponent * (1.0 - relative_packing))
}

/// Cubic damping in the moisture ratio r = min(mf/mx, 1).
/// Exactly 0 at or above extinction.
pub fn moisture_damping(moisture: f64, extinction_moisture: f64) -> f64 {
    let r = (moisture / extinction_moisture).min(1.0);
    if r >= 1.0 {
        return 0.0;
    }
    let eta = 1.0 + MOISTURE_DAMPING_C1 * r + MOISTURE_DAMPING_C2 * r * r
        + MOISTURE_DAMPING_C3 * r * r * r;
    eta.clamp(0.0, 1.0)
}

pub fn mineral_damping(effective_mineral: f64) -> f64 {
    if effective_mineral <= 0.0 {
        return 1.0;
    }
    (MINERAL_DAMPING_K * effective_mineral.powf(MINERAL_DAMPING_EXP)).min(1.0)
}

// PROPAGATION MODULE
pub fn propagating_flux_ratio(savr: f64, packing_ratio: f64) -> f64 {
    f64::exp((FLUX_C4 + FLUX_C5 * savr.sqrt()) * (packing_ratio + 0.1)) / (FLUX_C6 + FLUX_C7 * savr)
}

/// Wind factor coefficients (C, B, E) for a characteristic SAV ratio.
pub fn wind_coefficients(savr: f64) -> (f64, f64, f64) {
    let c = WIND_C8 * f64::exp(-WIND_C9 * savr.powf(WIND_C_EXP));
    let b = WIND_C10 * savr.powf(WIND_B_EXP);
    let e = WIND_C11 * f64::exp(-WIND_C12 * savr);
    (c, b, e)
}

pub fn wind_factor(wind_speed: f64, relative_packing: f64, c: f64, b: f64, e: f64) -> f64 {
    if wind_speed <= 0.0 || relative_packing <= 0.0 {
        return 0.0;
    }
    c * wind_speed.powf(b) * relative_packing.powf(-e)
}

pub fn slope_factor(packing_ratio: f64, slope: f64) -> f64 {
    if slope <= 0.0 || packing_ratio <= 0.0 {
        return 0.0;
    }
    SLOPE_C13 * packing_ratio.powf(SLOPE_BETA_EXP) * slope * slope
}

// HEAT SINK MODULE
pub fn effective_heating_number(savr: f64) -> f64 {
    if savr <= 0.0 {
        return 0.0;
    }
    f64::exp(-HEATING_NUMBER_C14 / savr)
}

/// [Btu/lb]
pub fn heat_of_preignition(moisture: f64) -> f64 {
    PREIGNITION_C15 + PREIGNITION_C16 * moisture
}

// RATE OF SPREAD MODULE
pub fn no_wind_no_slope_rate(
    reaction_intensity: f64,
    flux_ratio: f64,
    heat_sink: f64,
) -> f64 {
    safe_div(reaction_intensity * flux_ratio, heat_sink)
}

pub fn rate_of_spread(r0: f64, wind_factor: f64, slope_factor: f64) -> f64 {
    r0 * (1.0 + wind_factor + slope_factor)
}

// DERIVED OUTPUTS
pub fn residence_time(savr: f64) -> f64 {
    RESIDENCE_TIME_C17 / savr
}

/// Byram's intensity [Btu/ft/s] from heat per unit area [Btu/ft2] and rate [ft/min].
pub fn fireline_intensity(heat_per_unit_area: f64, rate_of_spread: f64) -> f64 {
    heat_per_unit_area * rate_of_spread / SECONDS_PER_MINUTE
}

/// [ft]
pub fn flame_length(fireline_intensity: f64) -> f64 {
    if fireline_intensity <= 0.0 {
        return 0.0;
    }
    FLAME_LENGTH_C18 * fireline_intensity.powf(FLAME_LENGTH_EXP)
}

/// Single fuel class Rothermel spread, US customary units in and out.
pub fn compute_spread(
    bed: &FuelBedProperties,
    particle: &FuelParticleProperties,
    env: &EnvironmentalConditions,
    wind_limit: Option<&WindLimit>,
) -> Result<DerivedSpreadState> {
    bed.validate()?;
    particle.validate()?;
    env.validate()?;

    let savr = bed.savr;
    let net_fuel_load = net_fuel_load(bed.loading, particle.total_mineral);
    let bulk_density = bulk_density(bed.loading, bed.depth);
    let packing_ratio = packing_ratio(bulk_density, particle.particle_density);
    let optimum_packing_ratio = optimum_packing_ratio(savr);
    let relative_packing_ratio = packing_ratio / optimum_packing_ratio;

    let max_reaction_velocity = max_reaction_velocity(savr);
    let reaction_velocity_exponent = reaction_velocity_exponent(savr);
    let optimum_reaction_velocity = optimum_reaction_velocity(
        max_reaction_velocity,
        reaction_velocity_exponent,
        relative_packing_ratio,
    );

    let moisture_damping = moisture_damping(env.moisture, bed.extinction_moisture);
    let mineral_damping = mineral_damping(particle.effective_mineral);
    let reaction_intensity = optimum_reaction_velocity
        * net_fuel_load
        * particle.heat_content
        * moisture_damping
        * mineral_damping;

    let propagating_flux_ratio = propagating_flux_ratio(savr, packing_ratio);
    let (wind_c, wind_b, wind_e) = wind_coefficients(savr);
    let (wind_speed, wind_limited) = match wind_limit {
        Some(limit) => limit.apply(env.wind_speed, reaction_intensity),
        None => (env.wind_speed, false),
    };
    let wind_factor = wind_factor(wind_speed, relative_packing_ratio, wind_c, wind_b, wind_e);
    let slope_factor = slope_factor(packing_ratio, env.slope);

    let effective_heating_number = effective_heating_number(savr);
    let heat_of_preignition = heat_of_preignition(env.moisture);
    let heat_sink = bulk_density * effective_heating_number * heat_of_preignition;

    let no_wind_no_slope_rate =
        no_wind_no_slope_rate(reaction_intensity, propagating_flux_ratio, heat_sink);
    let rate_of_spread = rate_of_spread(no_wind_no_slope_rate, wind_factor, slope_factor);
    if moisture_damping == 0.0 {
        trace!(
            "moisture {:.3} at or above extinction {:.3}, no spread",
            env.moisture,
            bed.extinction_moisture
        );
    }

    let residence_time = residence_time(savr);
    let heat_per_unit_area = reaction_intensity * residence_time;
    let fireline_intensity = fireline_intensity(heat_per_unit_area, rate_of_spread);
    let flame_length = flame_length(fireline_intensity);

    Ok(DerivedSpreadState {
        net_fuel_load,
        bulk_density,
        packing_ratio,
        optimum_packing_ratio,
        relative_packing_ratio,
        max_reaction_velocity,
        reaction_velocity_exponent,
        optimum_reaction_velocity,
        moisture_damping,
        mineral_damping,
        reaction_intensity,
        propagating_flux_ratio,
        wind_c,
        wind_b,
        wind_e,
        wind_speed,
        wind_limited,
        wind_factor,
        slope_factor,
        effective_heating_number,
        heat_of_preignition,
        no_wind_no_slope_rate,
        rate_of_spread,
        residence_time,
        heat_per_unit_area,
        fireline_intensity,
        flame_length,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FireSpreadError;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    // Fuel Model 1, short grass
    fn short_grass() -> (FuelBedProperties, FuelParticleProperties) {
        (
            FuelBedProperties {
                savr: 3500.0,
                loading: 0.034,
                depth: 1.0,
                extinction_moisture: 0.12,
            },
            FuelParticleProperties::default(),
        )
    }

    fn env(moisture: f64, wind_speed: f64, slope: f64) -> EnvironmentalConditions {
        EnvironmentalConditions {
            moisture,
            wind_speed,
            slope,
        }
    }

    #[test]
    fn short_grass_no_wind_no_slope() {
        let (bed, particle) = short_grass();
        let s = compute_spread(&bed, &particle, &env(0.05, 0.0, 0.0), None).unwrap();
        assert_relative_eq!(s.packing_ratio, 0.034 / 32.0, max_relative = 1e-12);
        // r = 5/12
        let r: f64 = 0.05 / 0.12;
        assert_relative_eq!(
            s.moisture_damping,
            1.0 - 2.59 * r + 5.11 * r * r - 3.52 * r * r * r,
            max_relative = 1e-12
        );
        assert_abs_diff_eq!(s.moisture_damping, 0.5534, epsilon = 1e-4);
        assert!(s.no_wind_no_slope_rate > 0.0);
        assert_eq!(s.rate_of_spread, s.no_wind_no_slope_rate);
        assert_eq!(s.wind_factor, 0.0);
        assert_eq!(s.slope_factor, 0.0);
        assert_abs_diff_eq!(s.reaction_intensity, 842.67, epsilon = 0.1);
        assert_abs_diff_eq!(s.no_wind_no_slope_rate, 4.869, epsilon = 1e-3);
    }

    #[test]
    fn short_grass_wind_and_slope() {
        let (bed, particle) = short_grass();
        let s = compute_spread(&bed, &particle, &env(0.05, 440.0, 0.3), None).unwrap();
        assert_abs_diff_eq!(s.wind_factor, 21.426, epsilon = 1e-2);
        assert_abs_diff_eq!(s.slope_factor, 3.703, epsilon = 1e-2);
        assert_abs_diff_eq!(s.rate_of_spread, 127.22, epsilon = 0.1);
        assert_abs_diff_eq!(s.flame_length, 5.10, epsilon = 0.01);
    }

    #[test]
    fn no_spread_at_or_above_extinction() {
        let (bed, particle) = short_grass();
        for mf in [0.12, 0.15, 0.5] {
            let s = compute_spread(&bed, &particle, &env(mf, 440.0, 0.5), None).unwrap();
            assert_eq!(s.moisture_damping, 0.0);
            assert_eq!(s.rate_of_spread, 0.0);
            assert_eq!(s.fireline_intensity, 0.0);
        }
    }

    #[test]
    fn rate_is_monotone() {
        let (bed, particle) = short_grass();
        let rate = |mf, u, s| {
            compute_spread(&bed, &particle, &env(mf, u, s), None)
                .unwrap()
                .rate_of_spread
        };
        let mut prev = 0.0;
        for u in [0.0, 50.0, 100.0, 200.0, 400.0, 800.0] {
            let r = rate(0.06, u, 0.2);
            assert!(r >= prev);
            prev = r;
        }
        let mut prev = 0.0;
        for s in [0.0, 0.1, 0.3, 0.6, 1.0] {
            let r = rate(0.06, 88.0, s);
            assert!(r >= prev);
            prev = r;
        }
        let mut prev = f64::MAX;
        for mf in [0.0, 0.02, 0.04, 0.06, 0.08, 0.10, 0.119] {
            let r = rate(mf, 88.0, 0.2);
            assert!(r <= prev);
            prev = r;
        }
    }

    #[test]
    fn zero_load_is_degenerate_not_nan() {
        let (mut bed, particle) = short_grass();
        bed.loading = 0.0;
        let s = compute_spread(&bed, &particle, &env(0.05, 200.0, 0.3), None).unwrap();
        assert_eq!(s.rate_of_spread, 0.0);
        assert_eq!(s.flame_length, 0.0);
    }

    #[test]
    fn contract_violations_fail() {
        let (bed, particle) = short_grass();
        let e = env(0.05, 0.0, 0.0);
        for broken in [
            FuelBedProperties { savr: 0.0, ..bed },
            FuelBedProperties { depth: 0.0, ..bed },
            FuelBedProperties { extinction_moisture: 0.0, ..bed },
            FuelBedProperties { loading: f64::NAN, ..bed },
        ] {
            assert!(matches!(
                compute_spread(&broken, &particle, &e, None),
                Err(FireSpreadError::InvalidInput { .. })
            ));
        }
        let bad_particle = FuelParticleProperties {
            effective_mineral: 1.5,
            ..particle
        };
        assert!(compute_spread(&bed, &bad_particle, &e, None).is_err());
    }

    #[test]
    fn wind_limit_caps_wind_factor() {
        let (bed, particle) = short_grass();
        let limit = WindLimit::new(false);
        let s = compute_spread(&bed, &particle, &env(0.05, 5000.0, 0.0), Some(&limit)).unwrap();
        assert!(s.wind_limited);
        assert_relative_eq!(s.wind_speed, 0.9 * s.reaction_intensity, max_relative = 1e-12);
        let free = compute_spread(&bed, &particle, &env(0.05, 5000.0, 0.0), None).unwrap();
        assert!(free.rate_of_spread > s.rate_of_spread);
    }

    #[test]
    fn mineral_damping_is_capped() {
        assert_eq!(mineral_damping(0.0), 1.0);
        assert_eq!(mineral_damping(1e-9), 1.0);
        assert_abs_diff_eq!(mineral_damping(0.01), 0.41740, epsilon = 1e-5);
    }
}
