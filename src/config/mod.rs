// src/config/mod.rs

pub mod parameters;
pub mod scenario;

use serde::{Deserialize, Serialize};

use crate::error::SimResult;
pub use parameters::{
    CaseSettings, DynamicCoupledParameters, ModifyStructureParameters, SaveSnapshotParameters,
};
pub use scenario::{AeroScenario, LumpedMassInstance, StructureScenario};

/// 入力ファイル全体の設定
///
/// ステージごとの設定はステージ名をキーとするセクションに置く。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    pub simulation: CaseSettings,
    pub structure: StructureScenario,
    #[serde(default)]
    pub aero: AeroScenario,
    #[serde(rename = "ModifyStructure", default)]
    pub modify_structure: Option<ModifyStructureParameters>,
    #[serde(rename = "DynamicCoupled", default)]
    pub dynamic_coupled: Option<DynamicCoupledParameters>,
    #[serde(rename = "SaveSnapshot", default)]
    pub save_snapshot: Option<SaveSnapshotParameters>,
}

impl Settings {
    pub fn from_yaml_str(contents: &str) -> SimResult<Self> {
        Ok(serde_yaml::from_str(contents)?)
    }

    /// 入力ファイルと同じ構造を持つ辞書から設定を作る
    pub fn from_value(value: serde_yaml::Value) -> SimResult<Self> {
        Ok(serde_yaml::from_value(value)?)
    }
}
