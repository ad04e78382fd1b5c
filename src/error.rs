// src/error.rs

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum SimulationError {
    #[error("変数 `{0}` は実行時の変更に対応していません")]
    UnsupportedVariable(String),

    #[error("時系列ファイル {path} を読み込めません: {reason}")]
    MalformedTimeline { path: PathBuf, reason: String },

    #[error("リスタート用スナップショット {0} が存在しません")]
    RestartFileNotFound(PathBuf),

    #[error("ステージ `{0}` は登録されていません")]
    UnknownStage(String),

    #[error("設定が不正です: {0}")]
    InvalidSettings(String),

    #[error("{variable} のインデックス {index} は範囲外です (個数 {count})")]
    InstanceOutOfRange {
        variable: &'static str,
        index: usize,
        count: usize,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error(transparent)]
    Yaml(#[from] serde_yaml::Error),

    #[error("スナップショットの変換に失敗しました: {0}")]
    Snapshot(#[from] bincode::Error),
}

pub type SimResult<T> = Result<T, SimulationError>;
