// src/modify/variable.rs

use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::warn;

use crate::error::{SimResult, SimulationError};
use crate::models::{LumpedMass, StructuralModel, LUMPED_MASS_WIDTH};
use crate::modify::timeline::Trajectory;

/// 実行時に変更できる構造変数の種類
///
/// 新しい変数に対応する場合はここに列挙子を追加する。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum VariableKind {
    LumpedMass,
}

impl FromStr for VariableKind {
    type Err = SimulationError;

    fn from_str(name: &str) -> Result<Self, Self::Err> {
        match name {
            "lumped_mass" => Ok(VariableKind::LumpedMass),
            other => Err(SimulationError::UnsupportedVariable(other.to_string())),
        }
    }
}

impl VariableKind {
    pub fn name(&self) -> &'static str {
        match self {
            VariableKind::LumpedMass => "lumped_mass",
        }
    }

    /// 平坦化した値の幅
    pub fn width(&self) -> usize {
        match self {
            VariableKind::LumpedMass => LUMPED_MASS_WIDTH,
        }
    }

    pub fn instance_count(&self, structure: &StructuralModel) -> usize {
        match self {
            VariableKind::LumpedMass => structure.num_lumped_masses(),
        }
    }

    pub fn read(&self, structure: &StructuralModel, index: usize) -> SimResult<Vec<f64>> {
        match self {
            VariableKind::LumpedMass => structure
                .lumped_mass(index)
                .map(|lm| lm.to_flat().to_vec())
                .ok_or(SimulationError::InstanceOutOfRange {
                    variable: self.name(),
                    index,
                    count: self.instance_count(structure),
                }),
        }
    }

    pub fn write(&self, structure: &mut StructuralModel, index: usize, values: &[f64]) {
        match self {
            VariableKind::LumpedMass => {
                structure.set_lumped_mass(index, &LumpedMass::from_flat(values))
            }
        }
    }

    /// 質量・位置・慣性をすべてゼロにする
    pub fn zero(&self, structure: &mut StructuralModel, index: usize) {
        match self {
            VariableKind::LumpedMass => structure.set_lumped_mass(index, &LumpedMass::default()),
        }
    }
}

/// 時系列に従って変更される変数1つ (種類 + インスタンス番号)
#[derive(Debug, Clone)]
pub struct ChangedVariable {
    pub kind: VariableKind,
    pub index: usize,
    pub file: PathBuf,
    pub original: Vec<f64>,
    pub current: Vec<f64>,
    pub delta: Vec<f64>,
    trajectory: Trajectory,
    exhausted: bool,
}

impl ChangedVariable {
    /// 構造モデルから初期値を取り込み、時系列ファイルを読み込む
    pub fn initialise(
        kind: VariableKind,
        index: usize,
        file: &Path,
        structure: &StructuralModel,
    ) -> SimResult<Self> {
        let original = kind.read(structure, index)?;
        let trajectory = Trajectory::load(file, &original)?;

        Ok(ChangedVariable {
            kind,
            index,
            file: file.to_path_buf(),
            current: original.clone(),
            delta: vec![0.0; original.len()],
            original,
            trajectory,
            exhausted: false,
        })
    }

    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// 時間ステップ `ts` の値を構造モデルに書き込む
    ///
    /// 時系列の範囲外では最後の値を保持せず、インスタンスの全成分をゼロにする。
    pub fn apply(&mut self, structure: &mut StructuralModel, ts: usize) {
        match self.trajectory.row(ts) {
            Some(target) => {
                for ((d, t), c) in self.delta.iter_mut().zip(target).zip(&self.current) {
                    *d = t - c;
                }
                // current + delta は丸めで target とずれることがあるので target をそのまま使う
                self.kind.write(structure, self.index, target);
                self.current.copy_from_slice(target);
            }
            None => {
                if !self.exhausted {
                    warn!(
                        variable = self.kind.name(),
                        index = self.index,
                        ts,
                        rows = self.trajectory.len(),
                        "time series exhausted, zeroing controlled instance"
                    );
                    self.exhausted = true;
                }
                self.kind.zero(structure, self.index);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LumpedMassInstance, StructureScenario};
    use crate::modify::test_utils::write_temp_file;

    fn structure() -> StructuralModel {
        StructuralModel::from_scenario(&StructureScenario {
            num_node: 2,
            lumped_masses: vec![LumpedMassInstance {
                node: 1,
                mass: 2.0,
                position: [0.1, 0.2, 0.3],
                inertia: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
            }],
        })
        .unwrap()
    }

    #[test]
    fn test_variable_kind_from_str() {
        assert_eq!("lumped_mass".parse::<VariableKind>().unwrap(), VariableKind::LumpedMass);
        assert!(matches!(
            "beam_stiffness".parse::<VariableKind>(),
            Err(SimulationError::UnsupportedVariable(name)) if name == "beam_stiffness"
        ));
    }

    #[test]
    fn test_initialise_captures_original() {
        let s = structure();
        let file = write_temp_file("variable_original", "3.0 0.1 0.2 0.3\n");
        let var = ChangedVariable::initialise(VariableKind::LumpedMass, 0, &file, &s).unwrap();

        assert_eq!(var.original, vec![2.0, 0.1, 0.2, 0.3, 1.0, 1.0, 1.0, 0.0, 0.0, 0.0]);
        assert_eq!(var.current, var.original);
        assert_eq!(&var.trajectory().row(0).unwrap()[4..], &var.original[4..]);
    }

    #[test]
    fn test_initialise_rejects_instance_out_of_range() {
        let s = structure();
        let file = write_temp_file("variable_range", "1.0\n");
        let result = ChangedVariable::initialise(VariableKind::LumpedMass, 3, &file, &s);

        assert!(matches!(
            result,
            Err(SimulationError::InstanceOutOfRange { index: 3, count: 1, .. })
        ));
    }

    #[test]
    fn test_apply_in_range_writes_target_exactly() {
        let mut s = structure();
        let file = write_temp_file(
            "variable_in_range",
            "0.1 0.1 0.1 0.1 0.7 0.7 0.7 0.01 0.02 0.03\n0.3 0.3 0.3 0.3 0.9 0.8 0.7 0.04 0.05 0.06\n",
        );
        let mut var = ChangedVariable::initialise(VariableKind::LumpedMass, 0, &file, &s).unwrap();

        for ts in 0..2 {
            var.apply(&mut s, ts);
            let target = var.trajectory().row(ts).unwrap().to_vec();
            assert_eq!(VariableKind::LumpedMass.read(&s, 0).unwrap(), target);
            assert_eq!(var.current, target);
        }
        let lm = s.lumped_mass(0).unwrap();
        assert_eq!(lm.inertia, [[0.9, 0.04, 0.05], [0.04, 0.8, 0.06], [0.05, 0.06, 0.7]]);
        assert!((var.delta[0] - 0.2).abs() < 1e-12);
    }

    #[test]
    fn test_apply_past_end_zeroes_instance() {
        let mut s = structure();
        let file = write_temp_file("variable_past_end", "5.0 1.0 1.0 1.0\n");
        let mut var = ChangedVariable::initialise(VariableKind::LumpedMass, 0, &file, &s).unwrap();

        var.apply(&mut s, 0);
        assert_eq!(s.lumped_mass[0], 5.0);

        var.apply(&mut s, 1);
        assert_eq!(s.lumped_mass(0).unwrap(), LumpedMass::default());

        // 範囲外では current は更新されない
        assert_eq!(var.current[0], 5.0);
        var.apply(&mut s, 7);
        assert_eq!(s.lumped_mass(0).unwrap(), LumpedMass::default());
    }
}
