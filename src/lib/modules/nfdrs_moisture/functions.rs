use log::trace;

use crate::{
    error::{check_class, check_finite, check_non_negative, FireSpreadError, Result},
    modules::auxiliary::functions::transfer_fraction,
    solver::{EquationSolver, RelaxationOde},
};

use super::{
    constants::*,
    models::{
        ClimateCoefficients, FineDeadMoisture, LiveFuelStage, LiveMoisture, LiveStageFlags,
        MoistureBoundaries, TransferredLoading,
    },
};

pub fn climate_coefficients(climate_class: u8) -> Result<&'static ClimateCoefficients> {
    let class = check_class("climate_class", climate_class, 1, 4)?;
    Ok(&CLIMATE_TABLE[(class - 1) as usize])
}

// DEAD FUELS
/// Equilibrium moisture content [%] from temperature [F] and relative humidity [%].
pub fn equilibrium_moisture_content(temperature: f64, humidity: f64) -> Result<f64> {
    check_finite("temperature", temperature)?;
    let rh = check_non_negative("humidity", humidity)?;
    if rh > 100.0 {
        return Err(FireSpreadError::InvalidInput {
            name: "humidity",
            value: rh,
            reason: "must not exceed 100",
        });
    }
    let t = temperature;
    let emc = if rh < EMC_LOW_RH {
        EMC_A[0] + EMC_A[1] * rh + EMC_A[2] * t * rh
    } else if rh < EMC_HIGH_RH {
        EMC_B[0] + EMC_B[1] * rh + EMC_B[2] * t
    } else {
        EMC_C[0] + EMC_C[1] * rh * rh + EMC_C[2] * rh * t + EMC_C[3] * rh
    };
    Ok(emc)
}

pub fn one_hour_moisture(emc: f64, fuel_stick: Option<f64>, raining: bool) -> f64 {
    if raining {
        return RAIN_MOISTURE;
    }
    match fuel_stick {
        Some(mc10) => (STICK_EMC_WEIGHT * emc + mc10) / (STICK_EMC_WEIGHT + 1.0),
        None => ONE_HOUR_EMC_FACTOR * emc,
    }
}

pub fn ten_hour_moisture(emc: f64, fuel_stick: Option<f64>, raining: bool) -> f64 {
    if raining {
        return RAIN_MOISTURE;
    }
    fuel_stick.unwrap_or(TEN_HOUR_EMC_FACTOR * emc)
}

pub fn fine_dead_moisture(
    temperature: f64,
    humidity: f64,
    fuel_stick: Option<f64>,
    raining: bool,
) -> Result<FineDeadMoisture> {
    if let Some(stick) = fuel_stick {
        check_non_negative("fuel_stick", stick)?;
    }
    let emc = equilibrium_moisture_content(temperature, humidity)?;
    Ok(FineDeadMoisture {
        emc,
        mc1: one_hour_moisture(emc, fuel_stick, raining),
        mc10: ten_hour_moisture(emc, fuel_stick, raining),
    })
}

/// Daylight-weighted EMC: EMC at the minimum humidity holds during the
/// daylight hours, EMC at the maximum humidity during the night.
pub fn weighted_emc(emc_min: f64, emc_max: f64, daylight_hours: f64) -> f64 {
    let day = daylight_hours.clamp(0.0, HOURS_PER_DAY);
    (day * emc_min + (HOURS_PER_DAY - day) * emc_max) / HOURS_PER_DAY
}

fn rain_boundary(emc_bar: f64, precipitation_duration: f64, slope: f64, intercept: f64) -> f64 {
    let ppt = precipitation_duration.clamp(0.0, MAX_PRECIPITATION_DURATION);
    ((HOURS_PER_DAY - ppt) * emc_bar + ppt * (slope * ppt + intercept)) / HOURS_PER_DAY
}

pub fn hundred_hour_boundary(emc_bar: f64, precipitation_duration: f64) -> f64 {
    rain_boundary(
        emc_bar,
        precipitation_duration,
        HUNDRED_HOUR_RAIN_SLOPE,
        HUNDRED_HOUR_RAIN_INTERCEPT,
    )
}

pub fn thousand_hour_boundary(emc_bar: f64, precipitation_duration: f64) -> f64 {
    rain_boundary(
        emc_bar,
        precipitation_duration,
        THOUSAND_HOUR_RAIN_SLOPE,
        THOUSAND_HOUR_RAIN_INTERCEPT,
    )
}

#[allow(clippy::too_many_arguments)]
pub fn moisture_boundaries(
    max_temperature: f64,
    min_temperature: f64,
    max_humidity: f64,
    min_humidity: f64,
    daylight_hours: f64,
    precipitation_duration: f64,
) -> Result<MoistureBoundaries> {
    check_non_negative("precipitation_duration", precipitation_duration)?;
    let emc_min = equilibrium_moisture_content(max_temperature, min_humidity)?;
    let emc_max = equilibrium_moisture_content(min_temperature, max_humidity)?;
    let emc_bar = weighted_emc(emc_min, emc_max, daylight_hours);
    Ok(MoistureBoundaries {
        emc_bar,
        hundred_hour: hundred_hour_boundary(emc_bar, precipitation_duration),
        thousand_hour: thousand_hour_boundary(emc_bar, precipitation_duration),
    })
}

/// Mean of the most recent daily 1000-hr boundaries.
pub fn thousand_hour_boundary_mean(history: &[f64]) -> Option<f64> {
    let recent: Vec<f64> = history
        .iter()
        .rev()
        .take(THOUSAND_HOUR_HISTORY)
        .copied()
        .collect();
    if recent.is_empty() {
        return None;
    }
    Some(recent.iter().sum::<f64>() / recent.len() as f64)
}

fn relax(
    solver: &dyn EquationSolver,
    previous: f64,
    boundary_start: f64,
    boundary_end: f64,
    response: f64,
) -> Result<f64> {
    check_non_negative("previous_moisture", previous)?;
    check_finite("boundary_start", boundary_start)?;
    check_finite("boundary_end", boundary_end)?;
    let ode = RelaxationOde {
        boundary_start,
        boundary_end,
        duration: 1.0,
        response,
    };
    let value = solver.integrate(&ode, 0.0, previous, 1.0)?;
    trace!("relaxed {previous:.2} toward {boundary_start:.2}..{boundary_end:.2}: {value:.2}");
    Ok(value)
}

/// 100-hr moisture [%] one day after `previous`. The boundary moves linearly
/// from the previous day's value to today's.
pub fn hundred_hour_moisture(
    solver: &dyn EquationSolver,
    previous: f64,
    boundary_start: f64,
    boundary_end: f64,
) -> Result<f64> {
    relax(solver, previous, boundary_start, boundary_end, HUNDRED_HOUR_RESPONSE)
}

/// 1000-hr moisture [%] one day after `previous`, relaxing toward the
/// seven-day boundary mean as it moves from yesterday's value to today's.
pub fn thousand_hour_moisture(
    solver: &dyn EquationSolver,
    previous: f64,
    mean_start: f64,
    mean_end: f64,
) -> Result<f64> {
    relax(solver, previous, mean_start, mean_end, THOUSAND_HOUR_RESPONSE)
}

// LIVE FUELS
pub fn herbaceous_potential(climate: &ClimateCoefficients, mc1000: f64) -> f64 {
    climate.herb_a + climate.herb_b * mc1000
}

pub fn woody_potential(climate: &ClimateCoefficients, mc1000: f64) -> f64 {
    (climate.wood_a + climate.wood_b * mc1000).clamp(climate.dormant_wood, WOOD_MAX)
}

/// Stage selected from the observer flags, days since green-up started and
/// the potential herbaceous moisture. Frozen takes precedence over cured.
pub fn live_fuel_stage(
    flags: &LiveStageFlags,
    days_since_greenup: f64,
    climate: &ClimateCoefficients,
    herb_potential: f64,
) -> LiveFuelStage {
    if flags.frozen {
        LiveFuelStage::Frozen
    } else if flags.cured {
        LiveFuelStage::Cured
    } else if !flags.greenup {
        LiveFuelStage::PreGreen
    } else if days_since_greenup < climate.greenup_days() {
        LiveFuelStage::Greenup
    } else if herb_potential >= GREEN_THRESHOLD {
        LiveFuelStage::Green
    } else {
        LiveFuelStage::Transition
    }
}

fn greenup_fraction(days_since_greenup: f64, climate: &ClimateCoefficients) -> f64 {
    (days_since_greenup.max(0.0) / climate.greenup_days()).clamp(0.0, 1.0)
}

/// Herbaceous moisture [%]. Cured herbaceous fuel takes the 1-hr moisture.
pub fn herbaceous_moisture(
    stage: LiveFuelStage,
    climate: &ClimateCoefficients,
    mc1: f64,
    mc1000: f64,
    days_since_greenup: f64,
) -> LiveMoisture {
    let potential = herbaceous_potential(climate, mc1000);
    let moisture = match stage {
        LiveFuelStage::PreGreen | LiveFuelStage::Frozen => HERB_FLOOR,
        LiveFuelStage::Cured => mc1,
        LiveFuelStage::Greenup => {
            let target = potential.clamp(HERB_FLOOR, HERB_MAX);
            HERB_FLOOR + (target - HERB_FLOOR) * greenup_fraction(days_since_greenup, climate)
        }
        LiveFuelStage::Green => potential.min(HERB_MAX),
        LiveFuelStage::Transition => (climate.annual_a + climate.annual_b * mc1000)
            .clamp(HERB_FLOOR, GREEN_THRESHOLD),
    };
    LiveMoisture { stage, moisture }
}

/// Woody moisture [%]. Outside the growing season it stays at the dormant value.
pub fn woody_moisture(
    stage: LiveFuelStage,
    climate: &ClimateCoefficients,
    mc1000: f64,
    days_since_greenup: f64,
) -> LiveMoisture {
    let dormant = climate.dormant_wood;
    let potential = woody_potential(climate, mc1000);
    let moisture = match stage {
        LiveFuelStage::PreGreen | LiveFuelStage::Frozen | LiveFuelStage::Cured => dormant,
        LiveFuelStage::Greenup => {
            dormant + (potential - dormant) * greenup_fraction(days_since_greenup, climate)
        }
        LiveFuelStage::Green | LiveFuelStage::Transition => potential,
    };
    LiveMoisture { stage, moisture }
}

/// Move the cured share of the herbaceous load into the 1-hr class,
/// with the herbaceous moisture in percent.
pub fn fuel_loading_transfer(herb_moisture: f64, one_hour_load: f64, herb_load: f64) -> TransferredLoading {
    let fraction = transfer_fraction(herb_moisture / 100.0);
    TransferredLoading {
        fraction,
        one_hour_load: one_hour_load + fraction * herb_load,
        herb_load: (1.0 - fraction) * herb_load,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        error::SolverError, modules::auxiliary::functions::dynamic_fuel_load_transfer,
        solver::RungeKutta4,
    };
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn emc_regression_scenarios() {
        assert_abs_diff_eq!(equilibrium_moisture_content(70.0, 5.0).unwrap(), 1.236, epsilon = 0.01);
        assert_abs_diff_eq!(equilibrium_moisture_content(70.0, 30.0).unwrap(), 5.997, epsilon = 0.01);
        assert_abs_diff_eq!(equilibrium_moisture_content(70.0, 80.0).unwrap(), 16.06, epsilon = 0.01);
    }

    #[test]
    fn emc_rejects_bad_humidity() {
        assert!(equilibrium_moisture_content(70.0, -1.0).is_err());
        assert!(equilibrium_moisture_content(70.0, 101.0).is_err());
        assert!(equilibrium_moisture_content(f64::NAN, 30.0).is_err());
    }

    #[test]
    fn fine_fuels_follow_rain_and_sticks() {
        assert_eq!(one_hour_moisture(6.0, None, true), RAIN_MOISTURE);
        assert_eq!(ten_hour_moisture(6.0, Some(9.0), true), RAIN_MOISTURE);
        assert_relative_eq!(one_hour_moisture(6.0, None, false), 6.18);
        assert_relative_eq!(ten_hour_moisture(6.0, None, false), 7.68);
        assert_relative_eq!(one_hour_moisture(6.0, Some(11.0), false), 7.0);
        assert_eq!(ten_hour_moisture(6.0, Some(11.0), false), 11.0);
    }

    #[test]
    fn boundaries_without_rain_equal_weighted_emc() {
        let b = moisture_boundaries(85.0, 55.0, 80.0, 20.0, 14.0, 0.0).unwrap();
        assert_relative_eq!(b.hundred_hour, b.emc_bar);
        assert_relative_eq!(b.thousand_hour, b.emc_bar);
        let emc_min = equilibrium_moisture_content(85.0, 20.0).unwrap();
        let emc_max = equilibrium_moisture_content(55.0, 80.0).unwrap();
        assert!(b.emc_bar > emc_min && b.emc_bar < emc_max);
    }

    #[test]
    fn rain_raises_boundaries() {
        let dry = moisture_boundaries(85.0, 55.0, 80.0, 20.0, 14.0, 0.0).unwrap();
        let wet = moisture_boundaries(85.0, 55.0, 80.0, 20.0, 14.0, 4.0).unwrap();
        assert!(wet.hundred_hour > dry.hundred_hour);
        assert!(wet.thousand_hour > wet.hundred_hour);
    }

    #[test]
    fn hundred_hour_matches_daily_formula() {
        let solver = RungeKutta4::default();
        let previous = 20.0;
        let boundary = 8.0;
        let mc = hundred_hour_moisture(&solver, previous, boundary, boundary).unwrap();
        let daily = previous + (boundary - previous) * (1.0 - 0.87 * f64::exp(-0.24));
        assert_abs_diff_eq!(mc, daily, epsilon = 1e-6);
    }

    #[test]
    fn hundred_hour_follows_moving_boundary() {
        let solver = RungeKutta4::default();
        let (previous, start, end) = (20.0, 14.0, 6.0);
        let mc = hundred_hour_moisture(&solver, previous, start, end).unwrap();
        // y' = k (a + (b - a) t - y)
        let k = HUNDRED_HOUR_RESPONSE;
        let slope = end - start;
        let exact = end - slope / k + (previous - start + slope / k) * f64::exp(-k);
        assert_abs_diff_eq!(mc, exact, epsilon = 1e-8);

        let toward_start = hundred_hour_moisture(&solver, previous, start, start).unwrap();
        let toward_end = hundred_hour_moisture(&solver, previous, end, end).unwrap();
        assert!(mc < toward_start && mc > toward_end);
    }

    #[test]
    fn thousand_hour_week_matches_weekly_formula() {
        let solver = RungeKutta4::default();
        let previous = 25.0;
        let boundary = 12.0;
        let mut mc = previous;
        for _ in 0..7 {
            mc = thousand_hour_moisture(&solver, mc, boundary, boundary).unwrap();
        }
        let weekly = previous + (boundary - previous) * (1.0 - 0.82 * f64::exp(-0.168));
        assert_abs_diff_eq!(mc, weekly, epsilon = 1e-6);
    }

    #[test]
    fn boundary_mean_uses_last_week() {
        let history: Vec<f64> = (1..=10).map(|d| d as f64).collect();
        assert_relative_eq!(thousand_hour_boundary_mean(&history).unwrap(), 7.0);
        assert!(thousand_hour_boundary_mean(&[]).is_none());
    }

    struct Failing;
    impl EquationSolver for Failing {
        fn integrate(
            &self,
            _system: &dyn crate::solver::ScalarOde,
            t0: f64,
            y0: f64,
            t1: f64,
        ) -> std::result::Result<f64, SolverError> {
            Err(SolverError::NonConvergence {
                t0,
                t1,
                y0,
                reason: "test".into(),
            })
        }
    }

    #[test]
    fn solver_failure_is_surfaced() {
        match hundred_hour_moisture(&Failing, 20.0, 8.0, 8.0) {
            Err(FireSpreadError::Solver(SolverError::NonConvergence { y0, .. })) => {
                assert_eq!(y0, 20.0)
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn climate_class_range() {
        assert!(climate_coefficients(0).is_err());
        assert!(climate_coefficients(5).is_err());
        assert_eq!(climate_coefficients(3).unwrap().dormant_wood, 70.0);
        assert_eq!(climate_coefficients(2).unwrap().greenup_days(), 14.0);
    }

    #[test]
    fn stage_selection() {
        let climate = climate_coefficients(2).unwrap();
        let flags = |greenup, cured, frozen| LiveStageFlags {
            greenup,
            cured,
            frozen,
        };
        use LiveFuelStage::*;
        assert_eq!(live_fuel_stage(&flags(false, false, false), 0.0, climate, 200.0), PreGreen);
        assert_eq!(live_fuel_stage(&flags(true, false, false), 3.0, climate, 200.0), Greenup);
        assert_eq!(live_fuel_stage(&flags(true, false, false), 20.0, climate, 200.0), Green);
        assert_eq!(live_fuel_stage(&flags(true, false, false), 20.0, climate, 80.0), Transition);
        assert_eq!(live_fuel_stage(&flags(true, true, false), 20.0, climate, 200.0), Cured);
        assert_eq!(live_fuel_stage(&flags(true, true, true), 20.0, climate, 200.0), Frozen);
    }

    #[test]
    fn herbaceous_stages() {
        let climate = climate_coefficients(1).unwrap();
        use LiveFuelStage::*;
        assert_eq!(herbaceous_moisture(PreGreen, climate, 5.0, 20.0, 0.0).moisture, HERB_FLOOR);
        assert_eq!(herbaceous_moisture(Cured, climate, 5.0, 20.0, 0.0).moisture, 5.0);
        // potential -70 + 12.8 * 20 = 186
        assert_relative_eq!(herbaceous_moisture(Green, climate, 5.0, 20.0, 0.0).moisture, 186.0);
        assert_relative_eq!(herbaceous_moisture(Green, climate, 5.0, 30.0, 0.0).moisture, HERB_MAX);
        let half = herbaceous_moisture(Greenup, climate, 5.0, 20.0, 3.5).moisture;
        assert_relative_eq!(half, HERB_FLOOR + 0.5 * (186.0 - HERB_FLOOR));
        let transition = herbaceous_moisture(Transition, climate, 5.0, 12.0, 0.0).moisture;
        assert_relative_eq!(transition, (-150.5f64 + 18.4 * 12.0).clamp(30.0, 120.0));
    }

    #[test]
    fn woody_stages() {
        let climate = climate_coefficients(4).unwrap();
        use LiveFuelStage::*;
        assert_eq!(woody_moisture(Cured, climate, 20.0, 0.0).moisture, 80.0);
        // -45 + 9.8 * 20 = 151
        assert_relative_eq!(woody_moisture(Green, climate, 20.0, 0.0).moisture, 151.0);
        assert_relative_eq!(woody_moisture(Green, climate, 40.0, 0.0).moisture, WOOD_MAX);
        assert_relative_eq!(woody_moisture(Green, climate, 5.0, 0.0).moisture, 80.0);
        let start = woody_moisture(Greenup, climate, 20.0, 0.0).moisture;
        assert_relative_eq!(start, 80.0);
    }

    #[test]
    fn percent_and_fraction_transfer_agree() {
        for pct in [0.0, 30.0, 45.0, 80.0, 100.0, 119.0, 150.0, 250.0] {
            let percent = fuel_loading_transfer(pct, 0.2, 0.3);
            let fraction = dynamic_fuel_load_transfer(pct / 100.0, 0.3);
            assert_eq!(percent.fraction, fraction.fraction);
            assert_eq!(percent.herb_load, fraction.remaining_live_load);
            assert_relative_eq!(percent.one_hour_load, 0.2 + fraction.transferred_load);
        }
        assert_eq!(fuel_loading_transfer(20.0, 0.2, 0.3).fraction, 1.0);
        assert_eq!(fuel_loading_transfer(120.0, 0.2, 0.3).fraction, 0.0);
    }
}
