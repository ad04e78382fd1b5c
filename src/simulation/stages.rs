// src/simulation/stages.rs

use std::str::FromStr;

use tracing::{debug, info};

use crate::error::{SimResult, SimulationError};
use crate::modify::StructuralModifier;
use crate::simulation::snapshot::save_snapshot;
use crate::simulation::{SimulationState, StepRecord};

/// パイプラインの1ステージ
///
/// `initialise` で状態の所有権を受け取り、`run` で返す。
pub trait Stage {
    fn name(&self) -> &'static str;
    fn initialise(&mut self, state: SimulationState) -> SimResult<()>;
    fn run(&mut self) -> SimResult<SimulationState>;
}

/// 登録済みステージの一覧
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StageKind {
    ModifyStructure,
    DynamicCoupled,
    SaveSnapshot,
}

impl FromStr for StageKind {
    type Err = SimulationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "ModifyStructure" => Ok(StageKind::ModifyStructure),
            "DynamicCoupled" => Ok(StageKind::DynamicCoupled),
            "SaveSnapshot" => Ok(StageKind::SaveSnapshot),
            other => Err(SimulationError::UnknownStage(other.to_string())),
        }
    }
}

impl StageKind {
    pub fn build(&self) -> Box<dyn Stage> {
        match self {
            StageKind::ModifyStructure => Box::new(ModifyStructure::default()),
            StageKind::DynamicCoupled => Box::new(DynamicCoupled::default()),
            StageKind::SaveSnapshot => Box::new(SaveSnapshot::default()),
        }
    }
}

fn take_state(slot: &mut Option<SimulationState>, stage: &str) -> SimResult<SimulationState> {
    slot.take().ok_or_else(|| {
        SimulationError::InvalidSettings(format!("{} は初期化されていません", stage))
    })
}

fn missing_section(stage: &str) -> SimulationError {
    SimulationError::InvalidSettings(format!("{} の設定セクションがありません", stage))
}

fn build_modifier(state: &mut SimulationState) -> SimResult<StructuralModifier> {
    let params = state
        .settings
        .modify_structure
        .as_ref()
        .ok_or_else(|| missing_section("ModifyStructure"))?;
    StructuralModifier::initialise(params, &state.settings.simulation.route, &mut state.structure)
}

/// 現在の時間ステップに構造変更を一度だけ適用する
#[derive(Default)]
pub struct ModifyStructure {
    state: Option<SimulationState>,
    modifier: Option<StructuralModifier>,
}

impl Stage for ModifyStructure {
    fn name(&self) -> &'static str {
        "ModifyStructure"
    }

    fn initialise(&mut self, mut state: SimulationState) -> SimResult<()> {
        self.modifier = Some(build_modifier(&mut state)?);
        self.state = Some(state);
        Ok(())
    }

    fn run(&mut self) -> SimResult<SimulationState> {
        let name = self.name();
        let mut state = take_state(&mut self.state, name)?;
        if let Some(modifier) = self.modifier.as_mut() {
            modifier.generate(&mut state.structure, state.ts);
        }
        Ok(state)
    }
}

/// 時間発展ステージ
///
/// `n_time_steps` に達するまで時間ステップを進める。リスタート時は
/// 保存された `ts` から続ける。
#[derive(Default)]
pub struct DynamicCoupled {
    state: Option<SimulationState>,
    modifier: Option<StructuralModifier>,
}

impl Stage for DynamicCoupled {
    fn name(&self) -> &'static str {
        "DynamicCoupled"
    }

    fn initialise(&mut self, mut state: SimulationState) -> SimResult<()> {
        let params = state
            .settings
            .dynamic_coupled
            .as_ref()
            .ok_or_else(|| missing_section(self.name()))?;
        if params.dt.is_nan() || params.dt <= 0.0 {
            return Err(SimulationError::InvalidSettings(format!(
                "DynamicCoupled の dt は正の値が必要です: {}",
                params.dt
            )));
        }
        info!(
            n_time_steps = params.n_time_steps,
            dt = params.dt,
            dynamic_pressure = state.aero.dynamic_pressure(),
            "time marching configured"
        );
        if params.modify_structure {
            self.modifier = Some(build_modifier(&mut state)?);
        }
        self.state = Some(state);
        Ok(())
    }

    fn run(&mut self) -> SimResult<SimulationState> {
        let name = self.name();
        let mut state = take_state(&mut self.state, name)?;
        let params = state
            .settings
            .dynamic_coupled
            .clone()
            .ok_or_else(|| missing_section(name))?;

        while state.ts < params.n_time_steps {
            if let Some(modifier) = self.modifier.as_mut() {
                modifier.generate(&mut state.structure, state.ts);
            }
            let record = StepRecord {
                ts: state.ts,
                time: state.time,
                total_mass: state.structure.derived.total_mass,
            };
            debug!(ts = record.ts, time = record.time, total_mass = record.total_mass, "time step");
            state.history.push(record);

            state.ts += 1;
            state.time += params.dt;
        }
        info!(ts = state.ts, time = state.time, "time marching finished");
        Ok(state)
    }
}

/// 状態をスナップショットとして保存する
#[derive(Default)]
pub struct SaveSnapshot {
    state: Option<SimulationState>,
}

impl Stage for SaveSnapshot {
    fn name(&self) -> &'static str {
        "SaveSnapshot"
    }

    fn initialise(&mut self, state: SimulationState) -> SimResult<()> {
        if state.settings.save_snapshot.is_none() {
            return Err(missing_section(self.name()));
        }
        self.state = Some(state);
        Ok(())
    }

    fn run(&mut self) -> SimResult<SimulationState> {
        let name = self.name();
        let state = take_state(&mut self.state, name)?;
        let params = state
            .settings
            .save_snapshot
            .as_ref()
            .ok_or_else(|| missing_section(name))?;
        let path = state.settings.simulation.route.join(&params.path);

        save_snapshot(&path, &state)?;
        info!(path = %path.display(), ts = state.ts, "snapshot saved");
        Ok(state)
    }
}
