use chrono::{DateTime, Datelike, Utc};
use std::f64::consts::PI;

pub fn daylight_hours(
    latitude: f64,       // latitude [°]
    date: DateTime<Utc>, // datetime
) -> f64 {
    // Calculate the number of daylight hours for a given latitude and julian day
    // Based on the FAO formula from https://wikifire.wsl.ch/tiki-index9a98.html?page=Daylight+hours&structure=Fire
    let jday = date.ordinal() as f64;
    let declination = 0.409 * ((2.0 * PI / 365.0) * jday - 1.39).sin();
    let latitude_rad = latitude.to_radians();
    // polar day and night saturate the sunset hour angle
    let sunset_angle = (-(latitude_rad).tan() * (declination).tan())
        .clamp(-1.0, 1.0)
        .acos();

    sunset_angle * 24.0 / PI
}
