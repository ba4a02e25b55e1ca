use std::collections::HashMap;
use std::str::FromStr;

use itertools::Itertools;
use lazy_static::lazy_static;
use strum::IntoEnumIterator;

use crate::{
    error::{FireSpreadError, Result},
    modules::{
        heterogeneous::models::{FuelClass, FuelComplex},
        nfdrs_moisture::{functions::fuel_loading_transfer, models::TransferredLoading},
        rothermel::models::FuelParticleProperties,
    },
    units::{TONS_ACRE_TO_KG_M2, TONS_ACRE_TO_LB_FT2},
};

use super::{
    constants::{EFFECTIVE_MINERAL, FUEL_MODEL_TABLE, PARTICLE_DENSITY, TOTAL_MINERAL},
    models::{FuelModelCode, FuelMoistures, NFDRSFuelModel},
};

lazy_static! {
    static ref CATALOG: HashMap<FuelModelCode, &'static NFDRSFuelModel> =
        FUEL_MODEL_TABLE.iter().map(|m| (m.code, m)).collect();
}

fn not_found(code: &str) -> FireSpreadError {
    FireSpreadError::FuelModelNotFound {
        code: code.to_owned(),
        valid: FuelModelCode::iter().join(", "),
    }
}

/// Look up a fuel model by its one-letter code (case insensitive).
pub fn get_fuel_model(code: &str) -> Result<&'static NFDRSFuelModel> {
    let parsed = FuelModelCode::from_str(code.trim()).map_err(|_| not_found(code))?;
    CATALOG
        .get(&parsed)
        .copied()
        .ok_or_else(|| not_found(code))
}

/// Catalog entries in code order.
pub fn all_fuel_models() -> impl Iterator<Item = &'static NFDRSFuelModel> {
    FuelModelCode::iter().filter_map(|code| CATALOG.get(&code).copied())
}

/// tons/acre -> kg/m2
pub fn fuel_loading_conversion(tons_per_acre: f64) -> f64 {
    tons_per_acre * TONS_ACRE_TO_KG_M2
}

/// tons/acre -> lb/ft2
#[deprecated(note = "use fuel_loading_conversion and convert at the boundary")]
pub fn fuel_loading_conversion_us(tons_per_acre: f64) -> f64 {
    tons_per_acre * TONS_ACRE_TO_LB_FT2
}

/// Particle properties shared by every catalog model.
pub fn nfdrs_particle(heat_content: f64) -> FuelParticleProperties {
    FuelParticleProperties {
        heat_content,
        total_mineral: TOTAL_MINERAL,
        effective_mineral: EFFECTIVE_MINERAL,
        particle_density: PARTICLE_DENSITY,
    }
}

/// Spread fuel bed of a catalog model in US customary units: 1, 10 and
/// 100-hr dead classes plus the live herbaceous and woody classes present.
///
/// The cured herbaceous share is added to the 1-hr load. The 1000-hr class
/// does not carry the fire front and is left out.
pub fn fuel_complex(
    model: &NFDRSFuelModel,
    moistures: &FuelMoistures,
) -> Result<(FuelComplex, TransferredLoading)> {
    moistures.validate()?;
    let load = |tons: f64| tons * TONS_ACRE_TO_LB_FT2;
    let transfer = fuel_loading_transfer(moistures.herb, load(model.w1), load(model.wherb));

    let class = |heat: f64, savr: f64, loading: f64, moisture: f64| FuelClass {
        particle: nfdrs_particle(heat),
        savr,
        loading,
        moisture: moisture / 100.0,
    };

    let dead = vec![
        class(model.hd, model.sg1, transfer.one_hour_load, moistures.mc1),
        class(model.hd, model.sg10, load(model.w10), moistures.mc10),
        class(model.hd, model.sg100, load(model.w100), moistures.mc100),
    ];
    let mut live = Vec::with_capacity(2);
    if model.has_herbaceous() {
        live.push(class(model.hl, model.sgherb, transfer.herb_load, moistures.herb));
    }
    if model.has_woody() {
        live.push(class(model.hl, model.sgwood, load(model.wwood), moistures.wood));
    }

    let complex = FuelComplex {
        dead,
        live,
        depth: model.depth,
        dead_extinction_moisture: model.mxd / 100.0,
    };
    Ok((complex, transfer))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::modules::auxiliary::functions::transfer_fraction;
    use approx::assert_relative_eq;

    fn moistures() -> FuelMoistures {
        FuelMoistures {
            mc1: 5.0,
            mc10: 7.0,
            mc100: 10.0,
            mc1000: 15.0,
            herb: 80.0,
            wood: 120.0,
        }
    }

    #[test]
    fn catalog_has_twenty_models_without_m() {
        assert_eq!(FUEL_MODEL_TABLE.len(), 20);
        assert_eq!(all_fuel_models().count(), 20);
        match get_fuel_model("M") {
            Err(FireSpreadError::FuelModelNotFound { code, valid }) => {
                assert_eq!(code, "M");
                assert!(valid.starts_with("A, B, C"));
                assert!(!valid.contains('M'));
            }
            other => panic!("unexpected {other:?}"),
        }
        assert!(get_fuel_model("Z").is_err());
    }

    #[test]
    fn western_grasses_values() {
        let a = get_fuel_model("a").unwrap();
        assert_eq!(a.code, FuelModelCode::A);
        assert_eq!(a.sg1, 3000.0);
        assert_eq!(a.w1, 0.20);
        assert_eq!(a.depth, 0.80);
        assert_eq!(a.mxd, 15.0);
        assert_eq!(a.hd, 8000.0);
    }

    #[test]
    fn codes_are_in_order() {
        let codes: Vec<_> = all_fuel_models().map(|m| m.code).collect();
        let mut sorted = codes.clone();
        sorted.sort();
        assert_eq!(codes, sorted);
    }

    #[test]
    #[allow(deprecated)]
    fn loading_conversions() {
        assert_relative_eq!(fuel_loading_conversion(1.0), 0.2241702);
        assert_relative_eq!(fuel_loading_conversion_us(1.0), 0.0459137);
        assert_relative_eq!(fuel_loading_conversion(0.0), 0.0);
    }

    #[test]
    fn complex_moves_cured_herb_to_one_hour() {
        let a = get_fuel_model("A").unwrap();
        let (complex, transfer) = fuel_complex(a, &moistures()).unwrap();
        assert_eq!(complex.dead.len(), 3);
        assert_eq!(complex.live.len(), 1);

        let fraction = transfer_fraction(0.8);
        assert_eq!(transfer.fraction, fraction);
        let herb_total = (complex.dead[0].loading - 0.20 * TONS_ACRE_TO_LB_FT2) + complex.live[0].loading;
        assert_relative_eq!(herb_total, 0.30 * TONS_ACRE_TO_LB_FT2, max_relative = 1e-12);
        assert_relative_eq!(
            complex.dead[0].loading,
            (0.20 + fraction * 0.30) * TONS_ACRE_TO_LB_FT2,
            max_relative = 1e-12
        );
        assert_relative_eq!(complex.dead[0].moisture, 0.05);
        assert_eq!(complex.dead[0].savr, a.sg1);
        assert_relative_eq!(complex.dead_extinction_moisture, 0.15);
    }

    #[test]
    fn brush_model_has_only_woody_live() {
        let b = get_fuel_model("B").unwrap();
        let (complex, _) = fuel_complex(b, &moistures()).unwrap();
        assert_eq!(complex.dead.len(), 3);
        assert_eq!(complex.live.len(), 1);
        assert_eq!(complex.live[0].savr, b.sgwood);
        assert_eq!(complex.live[0].particle.heat_content, 9500.0);
    }

    #[test]
    fn negative_moisture_is_rejected() {
        let a = get_fuel_model("A").unwrap();
        let mut m = moistures();
        m.mc10 = -1.0;
        assert!(fuel_complex(a, &m).is_err());
    }
}
