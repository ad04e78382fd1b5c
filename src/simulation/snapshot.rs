// src/simulation/snapshot.rs

use std::fs::File;
use std::io::{BufReader, BufWriter};
use std::path::Path;

use crate::error::{SimResult, SimulationError};
use crate::simulation::SimulationState;

/// 状態全体を bincode で書き出す
pub fn save_snapshot(path: &Path, state: &SimulationState) -> SimResult<()> {
    let writer = BufWriter::new(File::create(path)?);
    bincode::serialize_into(writer, state)?;
    Ok(())
}

pub fn load_snapshot(path: &Path) -> SimResult<SimulationState> {
    if !path.exists() {
        return Err(SimulationError::RestartFileNotFound(path.to_path_buf()));
    }
    let reader = BufReader::new(File::open(path)?);
    Ok(bincode::deserialize_from(reader)?)
}
