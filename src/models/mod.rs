// src/models/mod.rs

pub mod aero;
pub mod structure;

pub use aero::AerodynamicModel;
pub use structure::{DerivedMassData, LumpedMass, StructuralModel, LUMPED_MASS_WIDTH};
