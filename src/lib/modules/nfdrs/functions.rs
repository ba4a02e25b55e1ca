use chrono::{DateTime, Utc};
use log::warn;

use crate::{
    constants::NODATAVAL,
    error::Result,
    models::{input::InputElement, output::OutputElement},
    modules::{
        functions::daylight_hours,
        fuel_models::models::FuelMoistures,
        nfdrs_danger::models::DangerConditions,
        nfdrs_moisture::{
            functions::{
                fine_dead_moisture, herbaceous_moisture, herbaceous_potential, live_fuel_stage,
                moisture_boundaries, thousand_hour_boundary_mean, woody_moisture,
            },
            models::LiveStageFlags,
        },
    },
    units::{celsius_to_fahrenheit, M_S_TO_MPH},
};

use super::{
    config::NFDRSModelConfig,
    models::{NFDRSPropertiesElement, NFDRSStateElement},
};

/// Advance the moisture state of one cell by one day and evaluate the indices.
/// The moisture state is committed before the indices are computed, so a
/// failing index evaluation leaves the moistures of the day in place.
fn advance(
    state: &mut NFDRSStateElement,
    props: &NFDRSPropertiesElement,
    input: &InputElement,
    time: &DateTime<Utc>,
    config: &NFDRSModelConfig,
) -> Result<()> {
    let temperature = celsius_to_fahrenheit(input.temperature);

    // DEAD FUELS
    let fine = fine_dead_moisture(
        temperature,
        input.humidity,
        input.fuel_stick(),
        input.raining,
    )?;
    let boundaries = moisture_boundaries(
        celsius_to_fahrenheit(input.max_temperature),
        celsius_to_fahrenheit(input.min_temperature),
        input.max_humidity,
        input.min_humidity,
        daylight_hours(props.lat, *time),
        input.precipitation_duration,
    )?;
    let hundred_start = state.warm.hundred_hour_boundary.unwrap_or(boundaries.hundred_hour);
    let mc100 = config.hundred_hour(state.warm.mc100, hundred_start, boundaries.hundred_hour)?;
    let history = state.next_boundary_history(boundaries.thousand_hour);
    let mean_end = thousand_hour_boundary_mean(&history).unwrap_or(boundaries.thousand_hour);
    let mean_start = thousand_hour_boundary_mean(&state.warm.boundary_history).unwrap_or(mean_end);
    let mc1000 = config.thousand_hour(state.warm.mc1000, mean_start, mean_end)?;

    // the slow-response state only moves once every class is known
    state.warm.mc100 = mc100;
    state.warm.mc1000 = mc1000;
    state.warm.hundred_hour_boundary = Some(boundaries.hundred_hour);
    state.warm.boundary_history = history;
    state.fine = Some(fine);

    // LIVE FUELS
    state.track_greenup(input.greenup, time);
    let days = state.days_since_greenup(time);
    let flags = LiveStageFlags {
        greenup: input.greenup,
        cured: input.cured,
        frozen: input.frozen,
    };
    let stage = live_fuel_stage(
        &flags,
        days,
        props.climate,
        herbaceous_potential(props.climate, mc1000),
    );
    let herb = herbaceous_moisture(stage, props.climate, fine.mc1, mc1000, days);
    let wood = woody_moisture(stage, props.climate, mc1000, days);
    state.herb = Some(herb);
    state.wood = Some(wood);

    // INDICES
    let moistures = FuelMoistures {
        mc1: fine.mc1,
        mc10: fine.mc10,
        mc100,
        mc1000,
        herb: herb.moisture,
        wood: wood.moisture,
    };
    let conditions = DangerConditions {
        temperature,
        wind_speed: input.wind_speed * M_S_TO_MPH,
        slope_class: props.slope_class,
        lightning_activity_level: input.lightning_activity_level,
        raining: input.raining,
        fuels_wet: input.fuels_wet,
        human_risk: props.human_risk,
        lightning_risk: props.lightning_risk,
        previous_loi: state.warm.previous_loi,
    };
    let indices = config.danger(props.fuel_model, &moistures, &conditions)?;
    state.warm.previous_loi = indices.lightning.lightning_occurrence_index;
    state.indices = Some(indices);
    Ok(())
}

pub fn update_state_fn(
    state: &mut NFDRSStateElement,
    props: &NFDRSPropertiesElement,
    input: &InputElement,
    time: &DateTime<Utc>,
    config: &NFDRSModelConfig,
) {
    state.clear_daily();
    if !input.is_complete() {
        // keep the moisture state if we don't have all the data
        return;
    }
    if let Err(err) = advance(state, props, input, time, config) {
        warn!(
            "cell ({:.3}, {:.3}) fuel model {}: {err}",
            props.lon, props.lat, props.fuel_model.code
        );
    }
}

// COMPUTE OUTPUTS
pub fn get_output_fn(
    state: &NFDRSStateElement,
    input: &InputElement,
    _config: &NFDRSModelConfig,
) -> OutputElement {
    let or_nodata = |value: Option<f64>| value.unwrap_or(NODATAVAL);
    let fine = state.fine.as_ref();
    let indices = state.indices.as_ref();

    OutputElement {
        emc: or_nodata(fine.map(|f| f.emc)),
        mc1: or_nodata(fine.map(|f| f.mc1)),
        mc10: or_nodata(fine.map(|f| f.mc10)),
        mc100: or_nodata(fine.map(|_| state.warm.mc100)),
        mc1000: or_nodata(fine.map(|_| state.warm.mc1000)),
        mcherb: or_nodata(state.herb.map(|h| h.moisture)),
        mcwood: or_nodata(state.wood.map(|w| w.moisture)),
        fctcur: or_nodata(indices.map(|i| i.spread.transfer_fraction)),
        sc: or_nodata(indices.map(|i| i.spread.spread_component)),
        erc: or_nodata(indices.map(|i| i.energy_release.energy_release_component)),
        bi: or_nodata(indices.map(|i| i.burning_index)),
        ic: or_nodata(indices.map(|i| i.ignition.ignition_component)),
        mcoi: or_nodata(indices.map(|i| i.human_occurrence_index)),
        loi: or_nodata(indices.map(|i| i.lightning.lightning_occurrence_index)),
        fli: or_nodata(indices.map(|i| i.fire_load_index)),
        temperature: input.temperature,
        humidity: input.humidity,
        wind_speed: input.wind_speed,
    }
}
