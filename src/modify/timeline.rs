// src/modify/timeline.rs

use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{SimResult, SimulationError};

/// 時間ステップごとの目標値の表 (読み込み後は不変)
#[derive(Debug, Clone, PartialEq)]
pub struct Trajectory {
    rows: Vec<Vec<f64>>,
}

impl Trajectory {
    /// 数値表ファイルを読み込む
    ///
    /// 列数が `original` より少ない場合、不足する末尾の列は `original` の
    /// 同じ位置の値で全行を埋める。
    pub fn load(path: &Path, original: &[f64]) -> SimResult<Self> {
        let contents = fs::read_to_string(path).map_err(|e| malformed(path, e.to_string()))?;
        Self::parse(&contents, path, original)
    }

    pub fn parse(contents: &str, path: &Path, original: &[f64]) -> SimResult<Self> {
        let mut rows: Vec<Vec<f64>> = Vec::new();

        for (line_no, line) in contents.lines().enumerate() {
            let line = line.split('#').next().unwrap_or("").trim();
            if line.is_empty() {
                continue;
            }

            let row = split_fields(line)
                .into_iter()
                .map(|token| {
                    token.parse::<f64>().map_err(|_| {
                        malformed(path, format!("{}行目: `{}` は数値ではありません", line_no + 1, token))
                    })
                })
                .collect::<SimResult<Vec<f64>>>()?;
            if row.is_empty() {
                return Err(malformed(path, format!("{}行目に値がありません", line_no + 1)));
            }

            if let Some(first) = rows.first() {
                if first.len() != row.len() {
                    return Err(malformed(
                        path,
                        format!("{}行目の列数 {} が {} と一致しません", line_no + 1, row.len(), first.len()),
                    ));
                }
            }
            rows.push(row);
        }

        let n_columns = match rows.first() {
            Some(row) => row.len(),
            None => return Err(malformed(path, "データ行がありません".to_string())),
        };
        if n_columns > original.len() {
            return Err(malformed(
                path,
                format!("列数 {} が変数の幅 {} を超えています", n_columns, original.len()),
            ));
        }

        // 指定されていない末尾の列は初期値のまま保つ
        for row in rows.iter_mut() {
            row.extend_from_slice(&original[n_columns..]);
        }

        Ok(Trajectory { rows })
    }

    pub(crate) fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn row(&self, ts: usize) -> Option<&[f64]> {
        self.rows.get(ts).map(Vec::as_slice)
    }
}

/// カンマ区切りの行は空欄を空文字列として残す (後段で数値変換エラーになる)。
/// それ以外は連続する空白を1つの区切りとみなす。
fn split_fields(line: &str) -> Vec<&str> {
    if line.contains(',') {
        line.split(',').map(str::trim).collect()
    } else {
        line.split_whitespace().collect()
    }
}

fn malformed(path: &Path, reason: String) -> SimulationError {
    SimulationError::MalformedTimeline {
        path: PathBuf::from(path),
        reason,
    }
}
