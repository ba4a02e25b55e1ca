use super::models::{FuelModelCode::*, NFDRSFuelModel};

// PARTICLE CONSTANTS (shared by every NFDRS fuel model)
pub const PARTICLE_DENSITY: f64 = 32.0; // [lb/ft3]
pub const TOTAL_MINERAL: f64 = 0.0555; // [-]
pub const EFFECTIVE_MINERAL: f64 = 0.01; // [-]

// SAV ratios of the woody timelag classes [1/ft]
pub const SG10: f64 = 109.0;
pub const SG100: f64 = 30.0;
pub const SG1000: f64 = 8.0;

const fn row(
    code: super::models::FuelModelCode,
    name: &'static str,
    // W1, W10, W100, W1000, WWOOD, WHERB [tons/acre]
    loads: [f64; 6],
    // SG1, SGWOOD, SGHERB [1/ft]
    savr: [f64; 3],
    depth: f64,
    mxd: f64,
    heat: f64,
    scm: f64,
    wndfc: f64,
) -> NFDRSFuelModel {
    NFDRSFuelModel {
        code,
        name,
        w1: loads[0],
        w10: loads[1],
        w100: loads[2],
        w1000: loads[3],
        wwood: loads[4],
        wherb: loads[5],
        sg1: savr[0],
        sg10: SG10,
        sg100: SG100,
        sg1000: SG1000,
        sgwood: savr[1],
        sgherb: savr[2],
        depth,
        mxd,
        hd: heat,
        hl: heat,
        scm,
        wndfc,
    }
}

// 1978 NFDRS fuel models, M is not defined
pub static FUEL_MODEL_TABLE: [NFDRSFuelModel; 20] = [
    row(A, "Western grasses (annual)", [0.20, 0.0, 0.0, 0.0, 0.0, 0.30], [3000.0, 0.0, 3000.0], 0.80, 15.0, 8000.0, 301.0, 0.6),
    row(B, "California chaparral", [3.50, 4.00, 0.50, 0.0, 11.50, 0.0], [700.0, 1250.0, 0.0], 4.50, 15.0, 9500.0, 58.0, 0.5),
    row(C, "Pine-grass savanna", [0.40, 1.00, 0.0, 0.0, 0.50, 0.80], [2000.0, 1500.0, 2500.0], 0.75, 20.0, 8000.0, 32.0, 0.4),
    row(D, "Southern rough", [2.00, 1.00, 0.0, 0.0, 3.00, 0.75], [1250.0, 1500.0, 1500.0], 2.00, 30.0, 9000.0, 68.0, 0.4),
    row(E, "Hardwood litter (winter)", [1.50, 0.50, 0.25, 0.0, 0.50, 0.50], [2000.0, 1500.0, 2000.0], 0.40, 25.0, 8000.0, 25.0, 0.4),
    row(F, "Intermediate brush", [2.50, 2.00, 1.50, 0.0, 9.00, 0.0], [700.0, 1250.0, 0.0], 4.50, 15.0, 9500.0, 24.0, 0.5),
    row(G, "Short-needle conifer (heavy dead)", [2.50, 2.00, 5.00, 12.00, 0.50, 0.50], [2000.0, 1500.0, 2000.0], 1.00, 25.0, 8000.0, 30.0, 0.4),
    row(H, "Short-needle conifer (normal dead)", [1.50, 1.00, 2.00, 2.00, 0.50, 0.50], [2000.0, 1500.0, 2000.0], 0.30, 20.0, 8000.0, 8.0, 0.4),
    row(I, "Heavy slash", [12.00, 12.00, 10.00, 12.00, 0.0, 0.0], [1500.0, 0.0, 0.0], 2.00, 25.0, 8000.0, 65.0, 0.5),
    row(J, "Intermediate slash", [7.00, 7.00, 6.00, 5.50, 0.0, 0.0], [1500.0, 0.0, 0.0], 1.30, 25.0, 8000.0, 44.0, 0.5),
    row(K, "Light slash", [2.50, 2.50, 2.00, 2.50, 0.0, 0.0], [1500.0, 0.0, 0.0], 0.60, 25.0, 8000.0, 23.0, 0.5),
    row(L, "Western grasses (perennial)", [0.25, 0.0, 0.0, 0.0, 0.0, 0.50], [2000.0, 0.0, 2000.0], 1.00, 15.0, 8000.0, 178.0, 0.6),
    row(N, "Sawgrass", [1.50, 1.50, 0.0, 0.0, 2.00, 0.0], [1600.0, 1500.0, 0.0], 3.00, 25.0, 8700.0, 167.0, 0.6),
    row(O, "High pocosin", [2.00, 3.00, 3.00, 2.00, 7.00, 0.0], [1500.0, 1500.0, 0.0], 4.00, 30.0, 9000.0, 99.0, 0.5),
    row(P, "Southern pine plantation", [1.00, 1.00, 0.50, 0.0, 0.50, 0.50], [1750.0, 1500.0, 2000.0], 0.40, 30.0, 8000.0, 14.0, 0.4),
    row(Q, "Alaskan black spruce", [2.00, 2.50, 2.00, 1.00, 4.00, 0.50], [1500.0, 1200.0, 1500.0], 3.00, 25.0, 8000.0, 59.0, 0.4),
    row(R, "Hardwood litter (summer)", [0.50, 0.50, 0.50, 0.0, 0.50, 0.50], [1500.0, 1500.0, 2000.0], 0.25, 25.0, 8000.0, 6.0, 0.4),
    row(S, "Tundra", [0.50, 0.50, 0.50, 0.50, 0.50, 0.50], [1500.0, 1200.0, 1500.0], 0.40, 25.0, 8000.0, 17.0, 0.6),
    row(T, "Sagebrush-grass", [1.00, 0.50, 0.0, 0.0, 2.50, 0.50], [2500.0, 1500.0, 2000.0], 1.25, 15.0, 8000.0, 96.0, 0.6),
    row(U, "Western pines", [1.50, 1.50, 1.00, 0.0, 0.50, 0.50], [1750.0, 1500.0, 2000.0], 0.50, 20.0, 8000.0, 16.0, 0.4),
];
