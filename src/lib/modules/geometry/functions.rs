use std::f64::consts::PI;

use log::trace;

use crate::{
    constants::SMIDGEN,
    error::{check_finite, check_non_negative, check_positive, FireSpreadError, Result},
    modules::{
        auxiliary::{config::WindLimit, functions::effective_wind_speed},
        rothermel::functions::{fireline_intensity, safe_div},
    },
};

use super::{
    constants::LENGTH_TO_WIDTH_K,
    models::{
        EllipticalFireSpread, FireGeometryState, FirePerimeterSpread, FireSpreadDirection,
        SpreadVectorInput,
    },
};

/// Length-to-width ratio of the fire ellipse for an effective wind speed [ft/min].
pub fn length_to_width_ratio(effective_wind_speed: f64) -> f64 {
    1.0 + LENGTH_TO_WIDTH_K * effective_wind_speed.max(0.0)
}

pub fn eccentricity(length_to_width: f64) -> f64 {
    let z = length_to_width.max(1.0);
    (z * z - 1.0).sqrt() / z
}

/// Wrap an angle into (-pi, pi].
pub fn normalize_angle(angle: f64) -> f64 {
    let wrapped = (angle + PI).rem_euclid(2.0 * PI) - PI;
    if wrapped <= -PI {
        wrapped + 2.0 * PI
    } else {
        wrapped
    }
}

/// Spread rate along `bearing` from the head direction, R_H(1-e)/(1-e cos(bearing)).
pub fn spread_rate_at_bearing(head_rate: f64, eccentricity: f64, bearing: f64) -> f64 {
    head_rate * (1.0 - eccentricity) / (1.0 - eccentricity * bearing.cos())
}

/// Compose the slope and wind spread vectors into the head fire.
/// Slope acts upslope (bearing 0), wind acts along `wind_bearing`.
///
/// When the wind limit applies, the resultant (x, y) is shortened to the
/// limited head distance and keeps its direction. `slope_distance` and
/// `wind_distance` stay the unlimited component vectors.
pub fn fire_spread_direction(
    input: &SpreadVectorInput,
    wind_limit: Option<&WindLimit>,
) -> Result<FireSpreadDirection> {
    input.validate()?;

    let r0 = input.no_wind_no_slope_rate;
    let t = input.elapsed_time;
    let slope_distance = r0 * input.slope_factor * t;
    let wind_distance = r0 * input.wind_factor * t;

    let mut x = slope_distance + wind_distance * input.wind_bearing.cos();
    let mut y = wind_distance * input.wind_bearing.sin();
    let mut head_distance = x.hypot(y);
    let mut head_rate = r0 + head_distance / t;

    let direction = if head_distance > SMIDGEN {
        (y.abs() / head_distance).clamp(0.0, 1.0).asin()
    } else {
        0.0
    };
    let azimuth = if head_distance > SMIDGEN { y.atan2(x) } else { 0.0 };

    let mut effective_factor = if r0 > SMIDGEN { head_rate / r0 - 1.0 } else { 0.0 };
    let mut effective_wind = effective_wind_speed(
        effective_factor,
        input.relative_packing_ratio,
        input.wind_c,
        input.wind_b,
        input.wind_e,
    );

    let mut wind_limited = false;
    if let Some(limit) = wind_limit {
        let (limited_wind, limited) = limit.apply(effective_wind, input.reaction_intensity);
        if limited {
            wind_limited = true;
            effective_wind = limited_wind;
            effective_factor = input.wind_c
                * effective_wind.powf(input.wind_b)
                * input.relative_packing_ratio.powf(-input.wind_e);
            head_rate = r0 * (1.0 + effective_factor);
            let limited_distance = r0 * effective_factor * t;
            if head_distance > SMIDGEN {
                let scale = limited_distance / head_distance;
                x *= scale;
                y *= scale;
            }
            head_distance = limited_distance;
        }
    }

    Ok(FireSpreadDirection {
        slope_distance,
        wind_distance,
        x,
        y,
        head_distance,
        head_rate,
        direction,
        azimuth,
        effective_factor,
        effective_wind_speed: effective_wind,
        length_to_width: length_to_width_ratio(effective_wind),
        wind_limited,
    })
}

/// Ellipse grown from a point ignition after `elapsed_time` minutes,
/// evaluated along `bearing` from the head direction.
pub fn elliptical_fire_spread(
    head_rate: f64,
    length_to_width: f64,
    bearing: f64,
    elapsed_time: f64,
) -> Result<EllipticalFireSpread> {
    check_non_negative("head_rate", head_rate)?;
    check_finite("bearing", bearing)?;
    check_positive("elapsed_time", elapsed_time)?;
    if !(length_to_width >= 1.0) {
        return Err(FireSpreadError::InvalidInput {
            name: "length_to_width",
            value: length_to_width,
            reason: "must be at least 1",
        });
    }

    let eccentricity = eccentricity(length_to_width);
    let backing_rate = head_rate * (1.0 - eccentricity) / (1.0 + eccentricity);
    let head_distance = head_rate * elapsed_time;
    let backing_distance = backing_rate * elapsed_time;
    let length = head_distance + backing_distance;
    let width = length / length_to_width;
    let semi_major = length / 2.0;

    Ok(EllipticalFireSpread {
        head_rate,
        length_to_width,
        eccentricity,
        bearing,
        rate_at_bearing: spread_rate_at_bearing(head_rate, eccentricity, bearing),
        backing_rate,
        head_distance,
        backing_distance,
        length,
        width,
        semi_major,
        semi_minor: width / 2.0,
        focal_offset: head_distance - semi_major,
    })
}

/// Cosine of the parametric angle of the perimeter point seen from the
/// ignition point along `bearing`.
pub fn perimeter_cos_theta(semi_major: f64, semi_minor: f64, focal_offset: f64, bearing: f64) -> f64 {
    let (f, g, h) = (semi_major, focal_offset, semi_minor);
    let (sin_g, cos_g) = bearing.sin_cos();
    let sin2 = sin_g * sin_g;
    let hc = h * cos_g;
    let den = hc * hc + f * f * sin2;
    if den <= SMIDGEN * SMIDGEN {
        return 1.0;
    }
    let disc = (hc * hc + (f * f - g * g) * sin2).max(0.0);
    ((hc * disc.sqrt() - g * f * sin2) / den).clamp(-1.0, 1.0)
}

/// Spread normal to the perimeter for the point reached along `bearing`.
pub fn fire_perimeter_spread(
    ellipse: &EllipticalFireSpread,
    bearing: f64,
    heat_per_unit_area: f64,
) -> Result<FirePerimeterSpread> {
    check_finite("bearing", bearing)?;
    check_non_negative("heat_per_unit_area", heat_per_unit_area)?;

    let bearing = normalize_angle(bearing);
    let (f, g, h) = (ellipse.semi_major, ellipse.focal_offset, ellipse.semi_minor);
    if f <= SMIDGEN {
        trace!("degenerate ellipse, no perimeter spread");
        return Ok(FirePerimeterSpread {
            bearing,
            cos_theta: bearing.cos(),
            theta: bearing,
            ..Default::default()
        });
    }

    let cos_theta = perimeter_cos_theta(f, h, g, bearing);
    let theta = cos_theta.acos().copysign(bearing);
    let (sin_t, cos_t) = theta.sin_cos();

    let normal_rate = ellipse.head_rate
        * safe_div(
            h * (g * cos_t + f),
            f * (h * h * cos_t * cos_t + f * f * sin_t * sin_t).sqrt(),
        );
    let normal_rate = normal_rate.max(0.0);
    let normal_bearing = (f * sin_t).atan2(h * cos_t);

    Ok(FirePerimeterSpread {
        bearing,
        cos_theta,
        theta,
        normal_rate,
        normal_bearing,
        fireline_intensity: fireline_intensity(heat_per_unit_area, normal_rate),
    })
}

/// Head fire, ellipse and perimeter spread for one query `bearing`
/// measured from the direction of maximum spread.
pub fn fire_geometry(
    input: &SpreadVectorInput,
    wind_limit: Option<&WindLimit>,
    bearing: f64,
) -> Result<FireGeometryState> {
    let direction = fire_spread_direction(input, wind_limit)?;
    let ellipse = elliptical_fire_spread(
        direction.head_rate,
        direction.length_to_width,
        bearing,
        input.elapsed_time,
    )?;
    let perimeter = fire_perimeter_spread(&ellipse, bearing, input.heat_per_unit_area)?;
    Ok(FireGeometryState {
        direction,
        ellipse,
        perimeter,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};
    use std::f64::consts::FRAC_PI_2;

    fn input(wind_bearing: f64) -> SpreadVectorInput {
        SpreadVectorInput {
            no_wind_no_slope_rate: 4.869,
            wind_factor: 21.426,
            slope_factor: 3.703,
            wind_bearing,
            elapsed_time: 60.0,
            relative_packing_ratio: 0.2,
            wind_c: 0.1,
            wind_b: 1.5,
            wind_e: 0.5,
            reaction_intensity: 842.67,
            heat_per_unit_area: 150.0,
        }
    }

    #[test]
    fn aligned_wind_adds_factors() {
        let dir = fire_spread_direction(&input(0.0), None).unwrap();
        assert_abs_diff_eq!(dir.y, 0.0, epsilon = 1e-12);
        assert_abs_diff_eq!(dir.direction, 0.0, epsilon = 1e-12);
        assert_relative_eq!(dir.effective_factor, 21.426 + 3.703, max_relative = 1e-12);
        assert_relative_eq!(dir.head_rate, 4.869 * (1.0 + 21.426 + 3.703), max_relative = 1e-12);
    }

    #[test]
    fn cross_slope_wind_composes_vectors() {
        let inp = input(FRAC_PI_2);
        let dir = fire_spread_direction(&inp, None).unwrap();
        assert_relative_eq!(dir.x, dir.slope_distance, max_relative = 1e-12);
        assert_relative_eq!(dir.y, dir.wind_distance, max_relative = 1e-12);
        assert_relative_eq!(
            dir.direction,
            (dir.wind_distance / dir.head_distance).asin(),
            max_relative = 1e-12
        );
        assert!(dir.effective_factor < 21.426 + 3.703);
        assert!(dir.azimuth > 0.0);

        let mirrored = fire_spread_direction(&input(-FRAC_PI_2), None).unwrap();
        assert_relative_eq!(mirrored.direction, dir.direction, max_relative = 1e-12);
        assert_relative_eq!(mirrored.azimuth, -dir.azimuth, max_relative = 1e-12);
    }

    #[test]
    fn no_spread_gives_circle() {
        let mut inp = input(0.0);
        inp.no_wind_no_slope_rate = 0.0;
        let dir = fire_spread_direction(&inp, None).unwrap();
        assert_eq!(dir.head_rate, 0.0);
        assert_eq!(dir.effective_factor, 0.0);
        assert_eq!(dir.length_to_width, 1.0);
    }

    #[test]
    fn wind_limit_caps_effective_wind() {
        let limit = WindLimit::new(false);
        let mut inp = input(0.0);
        inp.reaction_intensity = 10.0;
        let dir = fire_spread_direction(&inp, Some(&limit)).unwrap();
        assert!(dir.wind_limited);
        assert_relative_eq!(dir.effective_wind_speed, 9.0, max_relative = 1e-12);
        let free = fire_spread_direction(&inp, None).unwrap();
        assert!(dir.head_rate < free.head_rate);
    }

    #[test]
    fn wind_limit_shortens_resultant_along_same_direction() {
        let limit = WindLimit::new(false);
        let mut inp = input(FRAC_PI_2 / 2.0);
        inp.reaction_intensity = 10.0;
        let dir = fire_spread_direction(&inp, Some(&limit)).unwrap();
        let free = fire_spread_direction(&inp, None).unwrap();
        assert!(dir.wind_limited);

        assert_relative_eq!(dir.x.hypot(dir.y), dir.head_distance, max_relative = 1e-12);
        assert_relative_eq!(dir.y.atan2(dir.x), free.azimuth, max_relative = 1e-12);
        assert_relative_eq!(dir.azimuth, free.azimuth, max_relative = 1e-12);
        assert_relative_eq!(dir.direction, free.direction, max_relative = 1e-12);
        assert_relative_eq!(
            dir.head_rate,
            inp.no_wind_no_slope_rate + dir.head_distance / inp.elapsed_time,
            max_relative = 1e-12
        );
        assert_eq!(dir.slope_distance, free.slope_distance);
        assert!(dir.x < free.x && dir.y < free.y);
    }

    #[test]
    fn bearing_rate_matches_head_and_back() {
        for z in [1.5, 3.0, 6.0] {
            let head = elliptical_fire_spread(10.0, z, 0.0, 30.0).unwrap();
            assert_relative_eq!(head.rate_at_bearing, 10.0, max_relative = 1e-12);
            let back = elliptical_fire_spread(10.0, z, PI, 30.0).unwrap();
            assert_relative_eq!(back.rate_at_bearing, back.backing_rate, max_relative = 1e-12);
            assert_relative_eq!(back.length / back.width, z, max_relative = 1e-12);
        }
    }

    #[test]
    fn unit_ratio_is_circle() {
        for gamma in [0.0, 0.7, FRAC_PI_2, 2.5, PI] {
            let e = elliptical_fire_spread(5.0, 1.0, gamma, 10.0).unwrap();
            assert_eq!(e.eccentricity, 0.0);
            assert_relative_eq!(e.rate_at_bearing, 5.0, max_relative = 1e-12);
            assert_relative_eq!(e.backing_rate, 5.0, max_relative = 1e-12);
        }
    }

    #[test]
    fn ratio_below_one_is_rejected() {
        assert!(elliptical_fire_spread(5.0, 0.5, 0.0, 10.0).is_err());
        assert!(elliptical_fire_spread(5.0, 2.0, 0.0, 0.0).is_err());
    }

    #[test]
    fn perimeter_point_lies_on_bearing() {
        let t = 20.0;
        for gamma in [0.1, 0.5, 1.0, FRAC_PI_2, 2.0, 3.0, -1.2] {
            let e = elliptical_fire_spread(12.0, 3.0, gamma, t).unwrap();
            let p = fire_perimeter_spread(&e, gamma, 100.0).unwrap();
            let px = e.focal_offset + e.semi_major * p.theta.cos();
            let py = e.semi_minor * p.theta.sin();
            assert_abs_diff_eq!(py.atan2(px), gamma, epsilon = 1e-9);
            assert_relative_eq!(px.hypot(py), e.rate_at_bearing * t, max_relative = 1e-9);
        }
    }

    #[test]
    fn normal_rate_decreases_away_from_head() {
        let e = elliptical_fire_spread(12.0, 3.0, 0.0, 20.0).unwrap();
        let head = fire_perimeter_spread(&e, 0.0, 100.0).unwrap();
        assert_relative_eq!(
            head.normal_rate,
            12.0 * (e.focal_offset + e.semi_major) / e.semi_major,
            max_relative = 1e-12
        );
        let mut previous = head.normal_rate;
        for i in 1..=36 {
            let gamma = PI * i as f64 / 36.0;
            let p = fire_perimeter_spread(&e, gamma, 100.0).unwrap();
            assert!(p.normal_rate <= previous + 1e-9);
            assert!(p.normal_rate >= 0.0);
            previous = p.normal_rate;
        }
    }

    #[test]
    fn perimeter_intensity_uses_normal_rate() {
        let e = elliptical_fire_spread(12.0, 2.0, 1.0, 20.0).unwrap();
        let p = fire_perimeter_spread(&e, 1.0, 300.0).unwrap();
        assert_relative_eq!(p.fireline_intensity, 300.0 * p.normal_rate / 60.0, max_relative = 1e-12);
    }

    #[test]
    fn geometry_chains_all_stages() {
        let state = fire_geometry(&input(0.3), None, 0.0).unwrap();
        assert_relative_eq!(state.ellipse.head_rate, state.direction.head_rate);
        assert_relative_eq!(
            state.ellipse.length_to_width,
            length_to_width_ratio(state.direction.effective_wind_speed)
        );
        assert!(state.perimeter.normal_rate > 0.0);
    }
}
