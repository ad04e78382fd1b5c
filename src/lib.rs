// src/lib.rs

pub mod config;
pub mod error;
pub mod models;
pub mod modify;
pub mod simulation;

pub use config::Settings;
pub use error::{SimResult, SimulationError};
pub use simulation::framework::run_simulation;
pub use simulation::SimulationState;
