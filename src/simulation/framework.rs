// src/simulation/framework.rs

use std::path::Path;

use tracing::info;

use crate::config::Settings;
use crate::error::SimResult;
use crate::models::{AerodynamicModel, StructuralModel};
use crate::simulation::snapshot::load_snapshot;
use crate::simulation::stages::StageKind;
use crate::simulation::SimulationState;

/// シミュレーションステートの初期化
pub fn initialize_simulation_state(settings: Settings) -> SimResult<SimulationState> {
    let structure = StructuralModel::from_scenario(&settings.structure)?;
    let aero = AerodynamicModel::from_scenario(&settings.aero);

    Ok(SimulationState {
        ts: 0,
        time: 0.0,
        structure,
        aero,
        settings,
        history: Vec::new(),
    })
}

/// スナップショットから状態を復元し、新しい設定で上書きする
pub fn restore_simulation_state(path: &Path, settings: Settings) -> SimResult<SimulationState> {
    let mut state = load_snapshot(path)?;
    state.structure.validate()?;
    info!(path = %path.display(), ts = state.ts, "restarting from snapshot");
    state.update_settings(settings);
    Ok(state)
}

/// `flow` に並んだステージを順に実行する
///
/// 登録されていないステージ名があればその時点で中断し、以降のステージは実行しない。
pub fn run_simulation(settings: Settings, restart: Option<&Path>) -> SimResult<SimulationState> {
    let flow = settings.simulation.flow.clone();
    info!(case = %settings.simulation.case, ?flow, "starting simulation");

    let mut state = match restart {
        Some(path) => restore_simulation_state(path, settings)?,
        None => initialize_simulation_state(settings)?,
    };

    for name in &flow {
        let kind: StageKind = name.parse()?;
        let mut stage = kind.build();
        info!(stage = stage.name(), ts = state.ts, "running stage");
        stage.initialise(state)?;
        state = stage.run()?;
    }

    Ok(state)
}
