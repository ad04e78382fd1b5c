// src/simulation/load_parameters.rs

use std::fs::File;
use std::path::Path;

use serde_yaml::from_reader;

use crate::config::Settings;
use crate::error::SimResult;

/// 入力ファイル (YAML) の読み込み
pub fn load_settings(path: &Path) -> SimResult<Settings> {
    let file = File::open(path)?;
    let settings: Settings = from_reader(file)?;
    Ok(settings)
}
