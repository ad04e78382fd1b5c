// src/simulation/mod.rs

pub mod framework;
pub mod load_parameters;
pub mod snapshot;
pub mod stages;

use serde::{Deserialize, Serialize};

use crate::config::Settings;
use crate::models::{AerodynamicModel, StructuralModel};

/// シミュレーションの全体状態を表す構造体
///
/// 各ステージに順番に所有権が渡され、実行後に返される。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SimulationState {
    pub ts: usize,                       // 現在の時間ステップ番号
    pub time: f64,                       // シミュレーション時刻 (s)
    pub structure: StructuralModel,
    pub aero: AerodynamicModel,
    pub settings: Settings,
    pub history: Vec<StepRecord>,        // 時間ステップごとの記録
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StepRecord {
    pub ts: usize,
    pub time: f64,
    pub total_mass: f64,
}

impl SimulationState {
    /// 設定を差し替える (スナップショットに保存された設定より優先する)
    pub fn update_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }
}
