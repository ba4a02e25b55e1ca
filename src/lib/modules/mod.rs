pub mod auxiliary;
pub mod fuel_models;
pub mod functions;
pub mod geometry;
pub mod heterogeneous;
pub mod nfdrs;
pub mod nfdrs_danger;
pub mod nfdrs_moisture;
pub mod rothermel;
