// src/config/parameters.rs

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// ケース全体の設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CaseSettings {
    pub case: String,
    #[serde(default)]
    pub route: PathBuf,        // 相対パスの基準ディレクトリ
    pub flow: Vec<String>,     // 実行するステージ名 (順序どおり)
}

/// ModifyStructure の設定 (3つのリストは同じ長さで位置ごとに対応する)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModifyStructureParameters {
    pub change_variable: Vec<String>,
    pub variable_index: Vec<usize>,
    pub file_list: Vec<PathBuf>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DynamicCoupledParameters {
    pub n_time_steps: usize,
    pub dt: f64,                // 時間刻み (s)
    #[serde(default)]
    pub modify_structure: bool, // 各ステップで ModifyStructure を適用する
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SaveSnapshotParameters {
    pub path: PathBuf,
}
