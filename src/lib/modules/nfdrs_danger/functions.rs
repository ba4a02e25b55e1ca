use itertools::izip;
use log::{debug, trace};

use crate::{
    constants::SMIDGEN,
    error::{check_class, check_finite, check_non_negative, check_positive, Result},
    modules::{
        auxiliary::config::WindLimit,
        fuel_models::{
            constants::{EFFECTIVE_MINERAL, TOTAL_MINERAL},
            functions::{fuel_complex, nfdrs_particle},
            models::{FuelMoistures, NFDRSFuelModel},
        },
        heterogeneous::{
            functions::{complex_live_extinction, compute_complex_spread, weight_complex, weighting_factors},
            models::{FuelClass, FuelComplex},
        },
        rothermel::{
            constants::SLOPE_C13,
            functions::{
                max_reaction_velocity, mineral_damping, net_fuel_load, optimum_packing_ratio,
                optimum_reaction_velocity, reaction_velocity_exponent, safe_div,
            },
            models::EnvironmentalConditions,
        },
    },
    units::{fahrenheit_to_celsius, MPH_TO_FT_MIN, TONS_ACRE_TO_LB_FT2},
};

use super::{
    constants::*,
    models::{
        DangerConditions, EnergyReleaseComponent, FireDangerIndices, IgnitionComponent,
        LightningActivity, LightningOccurrence, SpreadComponent,
    },
};

pub fn slope_class_factor(slope_class: u8) -> Result<f64> {
    let class = check_class("slope_class", slope_class, 1, 5)?;
    Ok(SLOPE_CLASS_FACTORS[(class - 1) as usize])
}

pub fn lightning_activity(level: u8) -> Result<&'static LightningActivity> {
    let level = check_class("lightning_activity_level", level, 1, 6)?;
    Ok(&LIGHTNING_TABLE[(level - 1) as usize])
}

fn packing_ratio(complex: &FuelComplex) -> f64 {
    complex
        .dead
        .iter()
        .chain(complex.live.iter())
        .map(|c| c.loading / c.particle.particle_density)
        .sum::<f64>()
        / complex.depth
}

// SPREAD COMPONENT
/// `wind_speed` is the 20-ft wind [mi/h]. The midflame wind is capped at 0.9 * I_R.
pub fn spread_component(
    model: &NFDRSFuelModel,
    moistures: &FuelMoistures,
    wind_speed: f64,
    slope_class: u8,
    fuels_wet: bool,
) -> Result<SpreadComponent> {
    check_non_negative("wind_speed", wind_speed)?;
    let class_factor = slope_class_factor(slope_class)?;
    let (complex, transfer) = fuel_complex(model, moistures)?;

    if fuels_wet {
        debug!("fuels flagged wet, spread component is 0");
        return Ok(SpreadComponent {
            transfer_fraction: transfer.fraction,
            live_extinction_moisture: model.mxd,
            ..Default::default()
        });
    }

    let env = EnvironmentalConditions {
        moisture: 0.0,
        wind_speed: MPH_TO_FT_MIN * wind_speed * model.wndfc,
        // slope whose Rothermel factor equals the class factor
        slope: (class_factor / SLOPE_C13).sqrt(),
    };
    let state = compute_complex_spread(&complex, &env, Some(&WindLimit::new(false)))?;

    Ok(SpreadComponent {
        spread_component: state.rate_of_spread,
        reaction_intensity: state.reaction_intensity,
        live_extinction_moisture: 100.0 * state.live_extinction_moisture,
        transfer_fraction: transfer.fraction,
        wind_speed: state.wind_speed,
        wind_limited: state.wind_limited,
        wind_factor: state.wind_factor,
        slope_factor: state.slope_factor,
        packing_ratio: state.packing_ratio,
    })
}

// ENERGY RELEASE COMPONENT
pub fn erc_moisture_damping(ratio: f64) -> f64 {
    let r = ratio.clamp(0.0, 1.0);
    let [a, b, c] = ERC_DAMPING;
    (1.0 + a * r + b * r * r + c * r * r * r).clamp(0.0, 1.0)
}

/// Loading-weighted energy release component, 1000-hr class included.
pub fn energy_release_component(
    model: &NFDRSFuelModel,
    moistures: &FuelMoistures,
) -> Result<EnergyReleaseComponent> {
    let (complex, _) = fuel_complex(model, moistures)?;
    let weighted = weight_complex(&complex);
    let (_, live_extinction) = complex_live_extinction(&complex, &weighted);
    let packing_ratio = packing_ratio(&complex);

    let thousand_hour = FuelClass {
        particle: nfdrs_particle(model.hd),
        savr: model.sg1000,
        loading: model.w1000 * TONS_ACRE_TO_LB_FT2,
        moisture: moistures.mc1000 / 100.0,
    };
    let dead: Vec<&FuelClass> = complex.dead.iter().chain(Some(&thousand_hour)).collect();
    let live: Vec<&FuelClass> = complex.live.iter().collect();

    let dead_loads: Vec<f64> = dead.iter().map(|c| c.loading).collect();
    let live_loads: Vec<f64> = live.iter().map(|c| c.loading).collect();
    let dead_weights = weighting_factors(&dead_loads);
    let live_weights = weighting_factors(&live_loads);
    let weighted_sum = |classes: &[&FuelClass], weights: &[f64], value: fn(&FuelClass) -> f64| {
        izip!(classes, weights)
            .map(|(c, w)| w * value(c))
            .sum::<f64>()
    };

    let dead_total: f64 = dead_loads.iter().sum();
    let live_total: f64 = live_loads.iter().sum();
    let total = (dead_total + live_total).max(SMIDGEN);
    let (dead_fraction, live_fraction) = (dead_total / total, live_total / total);

    let savr = dead_fraction * weighted_sum(&dead, &dead_weights, |c| c.savr)
        + live_fraction * weighted_sum(&live, &live_weights, |c| c.savr);
    if savr <= SMIDGEN || packing_ratio <= 0.0 {
        debug!("fuel model {} without fuel, energy release is 0", model.code);
        return Ok(EnergyReleaseComponent::default());
    }

    let dead_moisture = weighted_sum(&dead, &dead_weights, |c| c.moisture);
    let live_moisture = weighted_sum(&live, &live_weights, |c| c.moisture);
    let dead_moisture_damping =
        erc_moisture_damping(dead_moisture / complex.dead_extinction_moisture);
    let live_moisture_damping = erc_moisture_damping(safe_div(live_moisture, live_extinction));

    let optimum_reaction_velocity = optimum_reaction_velocity(
        max_reaction_velocity(savr),
        reaction_velocity_exponent(savr),
        packing_ratio / optimum_packing_ratio(savr),
    );
    let mineral = mineral_damping(EFFECTIVE_MINERAL);
    let reaction_intensity = optimum_reaction_velocity
        * (dead_fraction
            * net_fuel_load(dead_total, TOTAL_MINERAL)
            * model.hd
            * mineral
            * dead_moisture_damping
            + live_fraction
                * net_fuel_load(live_total, TOTAL_MINERAL)
                * model.hl
                * mineral
                * live_moisture_damping);
    let residence_time = ERC_RESIDENCE / savr;

    Ok(EnergyReleaseComponent {
        energy_release_component: ERC_SCALE * reaction_intensity * residence_time,
        reaction_intensity,
        residence_time,
        dead_moisture_damping,
        live_moisture_damping,
    })
}

// BURNING INDEX
pub fn burning_index(spread_component: f64, energy_release_component: f64, fuels_wet: bool) -> f64 {
    if fuels_wet {
        return 0.0;
    }
    BI_COEFF * (spread_component.max(0.0) * energy_release_component.max(0.0)).powf(BI_EXP)
}

// IGNITION COMPONENT
/// Heat of ignition [cal/g] from temperature [C] and 1-hr moisture [%].
pub fn heat_of_ignition(temperature: f64, mc1: f64) -> f64 {
    QIGN_C0
        + QIGN_T1 * temperature
        + QIGN_T2 * temperature * temperature
        + QIGN_TM * temperature * mc1
        + QIGN_M_AMP * (1.0 - f64::exp(QIGN_M_RATE * mc1))
        + QIGN_M1 * mc1
}

/// `temperature` is the observation-time dry bulb [F], `mc1` in percent.
pub fn ignition_component(
    temperature: f64,
    mc1: f64,
    spread_component: f64,
    max_spread_component: f64,
) -> Result<IgnitionComponent> {
    check_finite("temperature", temperature)?;
    check_non_negative("mc1", mc1)?;
    check_non_negative("spread_component", spread_component)?;
    check_positive("max_spread_component", max_spread_component)?;

    let heat_of_ignition = heat_of_ignition(fahrenheit_to_celsius(temperature), mc1);
    let chi = (CHI_MAX - heat_of_ignition) / CHI_SCALE;
    let probability_of_ignition = if chi <= 0.0 {
        0.0
    } else {
        (100.0 * (PI_COEFF * chi.powf(PI_EXP) / PI_DIVISOR - PI_OFFSET) / PI_NORM)
            .clamp(0.0, INDEX_CAP)
    };
    let normalized_spread = (100.0 * spread_component / max_spread_component).min(INDEX_CAP);
    let probability_of_spread = normalized_spread.sqrt();
    let ignition_component =
        (IC_SCALE * probability_of_ignition * probability_of_spread).clamp(0.0, INDEX_CAP);

    Ok(IgnitionComponent {
        heat_of_ignition,
        probability_of_ignition,
        probability_of_spread,
        ignition_component,
    })
}

// OCCURRENCE INDEXES
pub fn human_fire_occurrence_index(human_risk: f64, ignition_component: f64) -> Result<f64> {
    check_non_negative("human_risk", human_risk)?;
    Ok(MCOI_SCALE * human_risk * ignition_component)
}

/// Lightning occurrence index. Without lightning the previous value decays
/// to a quarter, or to 0 when it is raining.
#[allow(clippy::too_many_arguments)]
pub fn lightning_fire_occurrence_index(
    level: u8,
    raining: bool,
    ignition_component: f64,
    mc1: f64,
    dead_extinction_moisture: f64,
    lightning_risk: f64,
    previous_loi: f64,
) -> Result<LightningOccurrence> {
    let activity = lightning_activity(level)?;
    check_non_negative("ignition_component", ignition_component)?;
    check_non_negative("lightning_risk", lightning_risk)?;
    check_non_negative("previous_loi", previous_loi)?;

    if activity.cloud_to_ground_rate <= 0.0 {
        let carried = if raining {
            0.0
        } else {
            LOI_CARRY_OVER * previous_loi
        };
        return Ok(LightningOccurrence {
            lightning_occurrence_index: carried,
            ..Default::default()
        });
    }

    let rate = activity.cloud_to_ground_rate;
    let lightning_duration =
        LIGHTNING_DURATION_C0 + LIGHTNING_DURATION_C1 * rate.powf(LIGHTNING_DURATION_EXP);
    let rain_fraction = if activity.dry {
        0.0
    } else {
        let path = lightning_duration * STORM_SPEED;
        let (d, w) = (activity.storm_diameter, activity.total_width);
        safe_div(path * d + QUARTER_PI * d * d, path * w + QUARTER_PI * w * w)
    };

    // proportional reduction for the wetted 1-hr fuels inside the rain corridor
    let mxd = dead_extinction_moisture;
    let rain_ignition_component = if mxd > mc1 {
        ignition_component * ((mxd - RAIN_CORRIDOR_MOISTURE) / (mxd - mc1)).clamp(0.0, 1.0)
    } else {
        0.0
    };
    let mean_ignition_component =
        rain_ignition_component * rain_fraction + ignition_component * (1.0 - rain_fraction);
    let loi = (LOI_SCALE * rate * lightning_risk * mean_ignition_component).min(INDEX_CAP);
    trace!("LAL {level}: duration {lightning_duration:.1} min, rain fraction {rain_fraction:.3}, LOI {loi:.2}");

    Ok(LightningOccurrence {
        lightning_duration,
        rain_fraction,
        rain_ignition_component,
        mean_ignition_component,
        lightning_occurrence_index: loi,
    })
}

// FIRE LOAD INDEX
pub fn fire_load_index(burning_index: f64, loi: f64, mcoi: f64) -> f64 {
    let bi = burning_index.clamp(0.0, INDEX_CAP);
    let occurrence = (loi + mcoi).clamp(0.0, INDEX_CAP);
    FLI_COEFF * (bi * bi + occurrence * occurrence).sqrt()
}

/// Every NFDRS component and index for one cell and one observation.
pub fn fire_danger(
    model: &NFDRSFuelModel,
    moistures: &FuelMoistures,
    conditions: &DangerConditions,
) -> Result<FireDangerIndices> {
    let spread = spread_component(
        model,
        moistures,
        conditions.wind_speed,
        conditions.slope_class,
        conditions.fuels_wet,
    )?;
    let energy_release = energy_release_component(model, moistures)?;
    let burning_index = burning_index(
        spread.spread_component,
        energy_release.energy_release_component,
        conditions.fuels_wet,
    );
    let ignition = ignition_component(
        conditions.temperature,
        moistures.mc1,
        spread.spread_component,
        model.scm,
    )?;
    let human_occurrence_index =
        human_fire_occurrence_index(conditions.human_risk, ignition.ignition_component)?;
    let lightning = lightning_fire_occurrence_index(
        conditions.lightning_activity_level,
        conditions.raining,
        ignition.ignition_component,
        moistures.mc1,
        model.mxd,
        conditions.lightning_risk,
        conditions.previous_loi,
    )?;
    let fire_load_index = fire_load_index(
        burning_index,
        lightning.lightning_occurrence_index,
        human_occurrence_index,
    );

    Ok(FireDangerIndices {
        spread,
        energy_release,
        ignition,
        lightning,
        burning_index,
        human_occurrence_index,
        fire_load_index,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{error::FireSpreadError, modules::fuel_models::functions::get_fuel_model};
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    fn dry() -> FuelMoistures {
        FuelMoistures {
            mc1: 5.0,
            mc10: 6.0,
            mc100: 10.0,
            mc1000: 15.0,
            herb: 60.0,
            wood: 90.0,
        }
    }

    fn conditions() -> DangerConditions {
        DangerConditions {
            temperature: 85.0,
            wind_speed: 10.0,
            slope_class: 1,
            lightning_activity_level: 1,
            raining: false,
            fuels_wet: false,
            human_risk: 50.0,
            lightning_risk: 1.0,
            previous_loi: 0.0,
        }
    }

    #[test]
    fn burning_index_scenario() {
        assert_abs_diff_eq!(burning_index(50.0, 20.0, false), 72.2, epsilon = 1.0);
        assert_eq!(burning_index(50.0, 20.0, true), 0.0);
    }

    #[test]
    fn fire_load_index_scenarios() {
        assert_abs_diff_eq!(fire_load_index(50.0, 30.0, 20.0), 50.2, epsilon = 0.1);
        assert_abs_diff_eq!(fire_load_index(150.0, 30.0, 30.0), 82.8, epsilon = 0.1);
    }

    #[test]
    fn grass_spread_component() {
        let a = get_fuel_model("A").unwrap();
        let sc = spread_component(a, &dry(), 10.0, 1, false).unwrap();
        assert_relative_eq!(sc.spread_component, 87.777, max_relative = 1e-3);
        assert_relative_eq!(sc.transfer_fraction, 0.664, max_relative = 1e-12);
        assert!(!sc.wind_limited);
        assert!(sc.live_extinction_moisture >= a.mxd);
    }

    #[test]
    fn catalog_bed_spreads_like_the_spread_component() {
        use crate::{modules::rothermel::config::SpreadModelConfig, units::UnitSystem};

        let model = SpreadModelConfig::new("1978", UnitSystem::US);
        for code in ["A", "C", "G", "L"] {
            let fuel = get_fuel_model(code).unwrap();
            let sc = spread_component(fuel, &dry(), 10.0, 2, false).unwrap();
            let (complex, _) = fuel_complex(fuel, &dry()).unwrap();
            let env = EnvironmentalConditions {
                moisture: 0.0,
                wind_speed: MPH_TO_FT_MIN * 10.0 * fuel.wndfc,
                slope: (SLOPE_CLASS_FACTORS[1] / SLOPE_C13).sqrt(),
            };
            let state = model.spread_complex(&complex, &env).unwrap();
            assert_relative_eq!(state.rate_of_spread, sc.spread_component, max_relative = 1e-12);
            assert_relative_eq!(
                state.reaction_intensity,
                sc.reaction_intensity,
                max_relative = 1e-12
            );
        }
    }

    #[test]
    fn ignition_component_worked_example() {
        // 86 F, 5% 1-hr moisture, SC 20 against SCM 40
        let ic = ignition_component(86.0, 5.0, 20.0, 40.0).unwrap();
        assert_relative_eq!(ic.heat_of_ignition, 176.324, max_relative = 1e-5);
        assert_relative_eq!(ic.probability_of_ignition, 55.8475, max_relative = 1e-5);
        assert_relative_eq!(ic.probability_of_spread, 50f64.sqrt(), max_relative = 1e-12);
        assert_relative_eq!(ic.ignition_component, 39.4901, max_relative = 1e-5);
    }

    #[test]
    fn lightning_occurrence_worked_example() {
        let loi = lightning_fire_occurrence_index(3, false, 39.4901, 5.0, 15.0, 1.0, 0.0).unwrap();
        assert_relative_eq!(loi.lightning_duration, 156.804, max_relative = 1e-5);
        assert_relative_eq!(loi.rain_fraction, 0.460981, max_relative = 1e-5);
        // MXD below the corridor moisture: no ignitions in the rain
        assert_eq!(loi.rain_ignition_component, 0.0);
        assert_relative_eq!(loi.mean_ignition_component, 21.2859, max_relative = 1e-5);
        assert_relative_eq!(loi.lightning_occurrence_index, 5.32148, max_relative = 1e-5);

        // no lightning: a quarter of yesterday carries over
        let quiet = lightning_fire_occurrence_index(1, false, 39.4901, 5.0, 15.0, 1.0, 8.0).unwrap();
        assert_relative_eq!(quiet.lightning_occurrence_index, 2.0);
    }

    #[test]
    fn timber_energy_release_component() {
        let g = get_fuel_model("G").unwrap();
        let erc = energy_release_component(g, &dry()).unwrap();
        assert_relative_eq!(erc.energy_release_component, 266.04, max_relative = 1e-3);
        let sc = spread_component(g, &dry(), 10.0, 1, false).unwrap();
        assert_relative_eq!(sc.spread_component, 10.099, max_relative = 1e-3);
        let steep = spread_component(g, &dry(), 10.0, 3, false).unwrap();
        assert_relative_eq!(steep.spread_component, 13.136, max_relative = 1e-3);
    }

    #[test]
    fn wet_fuels_zero_spread_and_burning_index() {
        let g = get_fuel_model("G").unwrap();
        let mut c = conditions();
        c.fuels_wet = true;
        let indices = fire_danger(g, &dry(), &c).unwrap();
        assert_eq!(indices.spread.spread_component, 0.0);
        assert_eq!(indices.burning_index, 0.0);
        assert!(indices.energy_release.energy_release_component > 0.0);
        assert_eq!(indices.ignition.ignition_component, 0.0);
    }

    #[test]
    fn spread_component_monotonicity() {
        let c = get_fuel_model("C").unwrap();
        let calm = spread_component(c, &dry(), 0.0, 1, false).unwrap();
        let windy = spread_component(c, &dry(), 15.0, 1, false).unwrap();
        let steep = spread_component(c, &dry(), 0.0, 5, false).unwrap();
        assert!(windy.spread_component > calm.spread_component);
        assert!(steep.spread_component > calm.spread_component);
        let mut wet = dry();
        wet.mc1 = 12.0;
        wet.mc10 = 14.0;
        let damp = spread_component(c, &wet, 0.0, 1, false).unwrap();
        assert!(damp.spread_component < calm.spread_component);
    }

    #[test]
    fn dead_fuels_above_extinction_do_not_spread() {
        let a = get_fuel_model("A").unwrap();
        let mut wet = dry();
        wet.mc1 = 20.0;
        wet.herb = 20.0;
        let sc = spread_component(a, &wet, 10.0, 1, false).unwrap();
        assert_eq!(sc.spread_component, 0.0);
    }

    #[test]
    fn class_indexes_are_checked() {
        let a = get_fuel_model("A").unwrap();
        assert!(matches!(
            spread_component(a, &dry(), 10.0, 6, false),
            Err(FireSpreadError::ClassOutOfRange { max: 5, .. })
        ));
        assert!(lightning_activity(0).is_err());
        assert!(lightning_activity(7).is_err());
        assert_eq!(slope_class_factor(3).unwrap(), 1.068);
    }

    #[test]
    fn ignition_component_bounds() {
        let ic = ignition_component(85.0, 5.0, 30.0, 30.0).unwrap();
        assert!(ic.probability_of_ignition > 0.0 && ic.probability_of_ignition <= 100.0);
        assert_relative_eq!(ic.probability_of_spread, 10.0);
        assert!(ic.ignition_component <= 100.0);
        let moist = ignition_component(85.0, 15.0, 30.0, 30.0).unwrap();
        assert!(moist.ignition_component < ic.ignition_component);
        let no_spread = ignition_component(85.0, 5.0, 0.0, 30.0).unwrap();
        assert_eq!(no_spread.ignition_component, 0.0);
        assert!(ignition_component(85.0, 5.0, 10.0, 0.0).is_err());
    }

    #[test]
    fn human_occurrence_scales_ignition() {
        assert_relative_eq!(human_fire_occurrence_index(50.0, 40.0).unwrap(), 20.0);
        assert!(human_fire_occurrence_index(-1.0, 40.0).is_err());
    }

    #[test]
    fn lightning_carry_over() {
        let quiet = lightning_fire_occurrence_index(1, false, 40.0, 5.0, 15.0, 1.0, 20.0).unwrap();
        assert_relative_eq!(quiet.lightning_occurrence_index, 5.0);
        let rain = lightning_fire_occurrence_index(1, true, 40.0, 5.0, 15.0, 1.0, 20.0).unwrap();
        assert_eq!(rain.lightning_occurrence_index, 0.0);
    }

    #[test]
    fn lightning_rain_corridor() {
        let storm = lightning_fire_occurrence_index(3, false, 40.0, 5.0, 15.0, 1.0, 0.0).unwrap();
        assert!(storm.rain_fraction > 0.0 && storm.rain_fraction < 1.0);
        assert_eq!(storm.rain_ignition_component, 0.0);
        assert_relative_eq!(
            storm.mean_ignition_component,
            40.0 * (1.0 - storm.rain_fraction),
            max_relative = 1e-12
        );
        let dry = lightning_fire_occurrence_index(6, false, 40.0, 5.0, 15.0, 1.0, 0.0).unwrap();
        assert_eq!(dry.rain_fraction, 0.0);
        assert_relative_eq!(dry.mean_ignition_component, 40.0);
        let heavy = lightning_fire_occurrence_index(5, false, 100.0, 5.0, 15.0, 50.0, 0.0).unwrap();
        assert_eq!(heavy.lightning_occurrence_index, 100.0);
    }

    #[test]
    fn full_evaluation_is_consistent() {
        let g = get_fuel_model("G").unwrap();
        let indices = fire_danger(g, &dry(), &conditions()).unwrap();
        assert_relative_eq!(
            indices.burning_index,
            burning_index(
                indices.spread.spread_component,
                indices.energy_release.energy_release_component,
                false
            )
        );
        assert_relative_eq!(
            indices.human_occurrence_index,
            0.5 * indices.ignition.ignition_component
        );
        assert!(indices.fire_load_index > 0.0);
    }
}
