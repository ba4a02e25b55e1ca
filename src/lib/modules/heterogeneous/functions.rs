use itertools::izip;
use log::debug;

use crate::{
    constants::SMIDGEN,
    error::Result,
    modules::{
        auxiliary::{
            config::WindLimit,
            functions::{dead_fine_load, fine_load_ratio, live_extinction_moisture, live_fine_load},
        },
        rothermel::{
            functions::{
                flame_length, fireline_intensity, heat_of_preignition, max_reaction_velocity,
                mineral_damping, moisture_damping, net_fuel_load, no_wind_no_slope_rate,
                optimum_packing_ratio, optimum_reaction_velocity, propagating_flux_ratio,
                rate_of_spread, reaction_velocity_exponent, residence_time, safe_div,
                slope_factor, wind_coefficients, wind_factor, effective_heating_number,
            },
            models::EnvironmentalConditions,
        },
    },
};

use super::models::{
    FuelClass, FuelComplex, HeterogeneousSpreadState, WeightedClass, WeightedFuelComplex,
    WeightedGroup,
};

/// Surface area per unit ground area of a class, savr * loading / particle density.
pub fn surface_area(savr: f64, loading: f64, particle_density: f64) -> f64 {
    savr * loading / particle_density
}

/// Normalized weights; an empty or zero group yields zeros.
pub fn weighting_factors(values: &[f64]) -> Vec<f64> {
    let total = values.iter().sum::<f64>().max(SMIDGEN);
    values.iter().map(|v| v / total).collect()
}

/// Weights and characteristic values of one group (dead or live).
pub fn weight_group(classes: &[FuelClass], fine_load_fn: fn(f64, f64) -> f64) -> WeightedGroup {
    if classes.is_empty() {
        return WeightedGroup::default();
    }
    let areas: Vec<f64> = classes
        .iter()
        .map(|c| surface_area(c.savr, c.loading, c.particle.particle_density))
        .collect();
    let loads: Vec<f64> = classes.iter().map(|c| c.loading).collect();
    let area_weights = weighting_factors(&areas);
    let load_weights = weighting_factors(&loads);

    let weighted: Vec<WeightedClass> = izip!(classes, &areas, &area_weights, &load_weights)
        .map(|(c, area, fa, fl)| WeightedClass {
            surface_area: *area,
            area_weight: *fa,
            load_weight: *fl,
            net_loading: net_fuel_load(c.loading, c.particle.total_mineral),
            effective_heating_number: effective_heating_number(c.savr),
        })
        .collect();

    let area_weighted = |value: fn(&FuelClass) -> f64| -> f64 {
        izip!(classes, &area_weights)
            .map(|(c, w)| w * value(c))
            .sum()
    };

    WeightedGroup {
        surface_area: areas.iter().sum(),
        total_loading: loads.iter().sum(),
        fraction: 0.0,
        net_loading: izip!(&weighted, &area_weights)
            .map(|(c, w)| w * c.net_loading)
            .sum(),
        savr: area_weighted(|c| c.savr),
        heat_content: area_weighted(|c| c.particle.heat_content),
        moisture: area_weighted(|c| c.moisture),
        effective_mineral: area_weighted(|c| c.particle.effective_mineral),
        total_mineral: area_weighted(|c| c.particle.total_mineral),
        fine_load: classes.iter().map(|c| fine_load_fn(c.loading, c.savr)).sum(),
        classes: weighted,
    }
}

pub fn weight_complex(complex: &FuelComplex) -> WeightedFuelComplex {
    let mut dead = weight_group(&complex.dead, dead_fine_load);
    let mut live = weight_group(&complex.live, live_fine_load);
    let total = (dead.surface_area + live.surface_area).max(SMIDGEN);
    dead.fraction = dead.surface_area / total;
    live.fraction = live.surface_area / total;
    let savr = dead.fraction * dead.savr + live.fraction * live.savr;
    WeightedFuelComplex { dead, live, savr }
}

/// Fine-load weighted dead moisture and the live moisture of extinction
/// derived from the dead-to-live fine load ratio.
pub fn complex_live_extinction(complex: &FuelComplex, weighted: &WeightedFuelComplex) -> (f64, f64) {
    let (dead, live) = (&weighted.dead, &weighted.live);
    let mx_dead = complex.dead_extinction_moisture;
    let fine_dead_moisture = safe_div(
        complex
            .dead
            .iter()
            .map(|c| c.moisture * dead_fine_load(c.loading, c.savr))
            .sum(),
        dead.fine_load,
    );
    if live.fine_load <= SMIDGEN {
        return (fine_dead_moisture, mx_dead);
    }
    let mx_live = live_extinction_moisture(
        mx_dead,
        fine_load_ratio(dead.fine_load, live.fine_load),
        fine_dead_moisture,
    );
    (fine_dead_moisture, mx_live)
}

/// Group contribution to the heat sink, sum of f_i * eps_i * Qig_i.
fn group_heat_sink(classes: &[FuelClass], weights: &[WeightedClass]) -> f64 {
    izip!(classes, weights)
        .map(|(c, w)| w.area_weight * w.effective_heating_number * heat_of_preignition(c.moisture))
        .sum()
}

/// Multi-class Rothermel spread, US customary units in and out.
/// Moisture is taken per class; `env.moisture` is not used.
pub fn compute_complex_spread(
    complex: &FuelComplex,
    env: &EnvironmentalConditions,
    wind_limit: Option<&WindLimit>,
) -> Result<HeterogeneousSpreadState> {
    complex.validate()?;
    env.validate_terrain()?;

    let weighted = weight_complex(complex);
    let savr = weighted.savr;
    if savr <= SMIDGEN {
        debug!("fuel complex without surface area, no spread");
        return Ok(HeterogeneousSpreadState {
            complex: weighted,
            live_extinction_moisture: complex.dead_extinction_moisture,
            ..Default::default()
        });
    }
    let (dead, live) = (&weighted.dead, &weighted.live);
    let all_classes = || complex.dead.iter().chain(complex.live.iter());

    let bulk_density = all_classes().map(|c| c.loading).sum::<f64>() / complex.depth;
    let packing_ratio = all_classes()
        .map(|c| c.loading / c.particle.particle_density)
        .sum::<f64>()
        / complex.depth;
    let optimum_packing_ratio = optimum_packing_ratio(savr);
    let relative_packing_ratio = packing_ratio / optimum_packing_ratio;
    let optimum_reaction_velocity = optimum_reaction_velocity(
        max_reaction_velocity(savr),
        reaction_velocity_exponent(savr),
        relative_packing_ratio,
    );

    let mx_dead = complex.dead_extinction_moisture;
    let (fine_dead_moisture, live_extinction_moisture) =
        complex_live_extinction(complex, &weighted);

    let dead_moisture_damping = moisture_damping(dead.moisture, mx_dead);
    let live_moisture_damping = moisture_damping(live.moisture, live_extinction_moisture);
    let dead_mineral_damping = mineral_damping(dead.effective_mineral);
    let live_mineral_damping = mineral_damping(live.effective_mineral);

    let reaction_intensity = optimum_reaction_velocity
        * (dead.net_loading * dead.heat_content * dead_mineral_damping * dead_moisture_damping
            + live.net_loading * live.heat_content * live_mineral_damping * live_moisture_damping);

    let propagating_flux_ratio = propagating_flux_ratio(savr, packing_ratio);
    let (wind_c, wind_b, wind_e) = wind_coefficients(savr);
    let (wind_speed, wind_limited) = match wind_limit {
        Some(limit) => limit.apply(env.wind_speed, reaction_intensity),
        None => (env.wind_speed, false),
    };
    let wind_factor = wind_factor(wind_speed, relative_packing_ratio, wind_c, wind_b, wind_e);
    let slope_factor = slope_factor(packing_ratio, env.slope);

    let heat_sink = bulk_density
        * (dead.fraction * group_heat_sink(&complex.dead, &dead.classes)
            + live.fraction * group_heat_sink(&complex.live, &live.classes));

    let no_wind_no_slope_rate =
        no_wind_no_slope_rate(reaction_intensity, propagating_flux_ratio, heat_sink);
    let rate_of_spread = rate_of_spread(no_wind_no_slope_rate, wind_factor, slope_factor);

    let residence_time = residence_time(savr);
    let heat_per_unit_area = reaction_intensity * residence_time;
    let fireline_intensity = fireline_intensity(heat_per_unit_area, rate_of_spread);
    let flame_length = flame_length(fireline_intensity);

    Ok(HeterogeneousSpreadState {
        complex: weighted,
        bulk_density,
        packing_ratio,
        optimum_packing_ratio,
        relative_packing_ratio,
        optimum_reaction_velocity,
        dead_moisture_damping,
        live_moisture_damping,
        dead_mineral_damping,
        live_mineral_damping,
        fine_dead_moisture,
        live_extinction_moisture,
        reaction_intensity,
        propagating_flux_ratio,
        wind_c,
        wind_b,
        wind_e,
        wind_speed,
        wind_limited,
        wind_factor,
        slope_factor,
        heat_sink,
        no_wind_no_slope_rate,
        rate_of_spread,
        residence_time,
        heat_per_unit_area,
        fireline_intensity,
        flame_length,
    })
}
