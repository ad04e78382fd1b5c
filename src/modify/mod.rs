// src/modify/mod.rs

pub mod control;
pub mod timeline;
pub mod variable;

use std::path::Path;

use tracing::{debug, info};

use crate::config::ModifyStructureParameters;
use crate::error::{SimResult, SimulationError};
use crate::models::StructuralModel;
pub use control::VariableController;
pub use timeline::Trajectory;
pub use variable::{ChangedVariable, VariableKind};

/// 構造パラメータを時間ステップごとに変更する
#[derive(Debug, Clone)]
pub struct StructuralModifier {
    variables: Vec<ChangedVariable>,
    controllers: Vec<VariableController>,
}

impl StructuralModifier {
    /// 設定のリストから変数と制御を組み立てる
    ///
    /// 失敗した場合 `structure` は変更されない。相対パスは `route` を基準にする。
    pub fn initialise(
        params: &ModifyStructureParameters,
        route: &Path,
        structure: &mut StructuralModel,
    ) -> SimResult<Self> {
        let n = params.change_variable.len();
        if params.variable_index.len() != n || params.file_list.len() != n {
            return Err(SimulationError::InvalidSettings(format!(
                "change_variable ({}), variable_index ({}), file_list ({}) の長さが一致しません",
                n,
                params.variable_index.len(),
                params.file_list.len()
            )));
        }

        let mut variables = Vec::with_capacity(n);
        let mut controllers: Vec<VariableController> = Vec::new();

        for ((name, &index), file) in params
            .change_variable
            .iter()
            .zip(&params.variable_index)
            .zip(&params.file_list)
        {
            let kind: VariableKind = name.parse()?;
            let file = route.join(file);
            let variable = ChangedVariable::initialise(kind, index, &file, structure)?;

            match controllers.iter_mut().find(|c| c.kind() == kind) {
                Some(control) => control.register(index),
                None => {
                    let mut control = VariableController::new(kind);
                    control.register(index);
                    controllers.push(control);
                }
            }
            info!(variable = kind.name(), index, file = %file.display(), "variable under control");
            variables.push(variable);
        }

        for control in &controllers {
            control.zero_uncontrolled(structure);
            debug!(
                variable = control.kind().name(),
                controlled = ?control.controlled(),
                "uncontrolled instances zeroed"
            );
        }

        Ok(StructuralModifier {
            variables,
            controllers,
        })
    }

    pub fn variables(&self) -> &[ChangedVariable] {
        &self.variables
    }

    pub fn controllers(&self) -> &[VariableController] {
        &self.controllers
    }

    /// 時間ステップ `ts` の変更を適用する
    ///
    /// 全変数をリスト順に適用した後、各種類の commit を一度ずつ呼ぶ。
    pub fn generate(&mut self, structure: &mut StructuralModel, ts: usize) {
        debug!(ts, n_variables = self.variables.len(), "applying structural changes");
        for variable in self.variables.iter_mut() {
            variable.apply(structure, ts);
        }
        for control in &self.controllers {
            control.commit(structure);
        }
    }
}


#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{LumpedMassInstance, StructureScenario};
    use crate::models::LumpedMass;
    use std::path::PathBuf;
    use super::test_utils::write_temp_file;

    fn structure() -> StructuralModel {
        StructuralModel::from_scenario(&StructureScenario {
            num_node: 4,
            lumped_masses: (0..3)
                .map(|i| LumpedMassInstance {
                    node: i,
                    mass: 2.0,
                    position: [0.5, 0.0, 0.0],
                    inertia: [[1.0, 0.0, 0.0], [0.0, 1.0, 0.0], [0.0, 0.0, 1.0]],
                })
                .collect(),
        })
        .unwrap()
    }

    fn params(names: &[&str], indices: &[usize], files: &[PathBuf]) -> ModifyStructureParameters {
        ModifyStructureParameters {
            change_variable: names.iter().map(|s| s.to_string()).collect(),
            variable_index: indices.to_vec(),
            file_list: files.to_vec(),
        }
    }

    #[test]
    fn test_initialise_zeroes_uncontrolled_instances() {
        let mut s = structure();
        let file = write_temp_file("engine_zero", "4.0\n5.0\n");
        let engine = StructuralModifier::initialise(
            &params(&["lumped_mass"], &[1], &[file]),
            Path::new(""),
            &mut s,
        )
        .unwrap();

        assert_eq!(engine.controllers().len(), 1);
        assert_eq!(s.lumped_mass(0).unwrap(), LumpedMass::default());
        assert_eq!(s.lumped_mass(2).unwrap(), LumpedMass::default());
        assert_eq!(s.lumped_mass[1], 2.0);
    }

    #[test]
    fn test_initialise_unsupported_variable_leaves_structure_unchanged() {
        let mut s = structure();
        let before = s.clone();
        let file = write_temp_file("engine_unsupported", "4.0\n");
        let result = StructuralModifier::initialise(
            &params(&["lumped_mass", "stiffness"], &[0, 1], &[file.clone(), file]),
            Path::new(""),
            &mut s,
        );

        assert!(matches!(result, Err(SimulationError::UnsupportedVariable(_))));
        assert_eq!(s, before);
    }

    #[test]
    fn test_initialise_rejects_unequal_lists() {
        let mut s = structure();
        let result = StructuralModifier::initialise(
            &params(&["lumped_mass"], &[0, 1], &[]),
            Path::new(""),
            &mut s,
        );
        assert!(matches!(result, Err(SimulationError::InvalidSettings(_))));
    }

    #[test]
    fn test_initialise_resolves_files_against_route() {
        let mut s = structure();
        let file = write_temp_file("engine_route", "1.0\n");
        let name = PathBuf::from(file.file_name().unwrap());
        let engine = StructuralModifier::initialise(
            &params(&["lumped_mass"], &[0], &[name]),
            file.parent().unwrap(),
            &mut s,
        )
        .unwrap();

        assert_eq!(engine.variables()[0].file, file);
    }

    #[test]
    fn test_generate_commits_once_per_step() {
        let mut s = structure();
        let file_a = write_temp_file("engine_commit_a", "1.0\n2.0\n3.0\n");
        let file_b = write_temp_file("engine_commit_b", "6.0\n7.0\n8.0\n");
        let mut engine = StructuralModifier::initialise(
            &params(&["lumped_mass", "lumped_mass"], &[0, 2], &[file_a, file_b]),
            Path::new(""),
            &mut s,
        )
        .unwrap();
        let count = s.derived.rebuild_count;

        for ts in 0..4 {
            engine.generate(&mut s, ts);
        }

        assert_eq!(s.derived.rebuild_count, count + 4);
        // ts = 3 は範囲外なので両方ゼロ
        assert_eq!(s.derived.total_mass, 0.0);
    }

    #[test]
    fn test_generate_updates_derived_data_after_all_variables() {
        let mut s = structure();
        let file_a = write_temp_file("engine_derived_a", "1.0\n");
        let file_b = write_temp_file("engine_derived_b", "3.0\n");
        let mut engine = StructuralModifier::initialise(
            &params(&["lumped_mass", "lumped_mass"], &[0, 1], &[file_a, file_b]),
            Path::new(""),
            &mut s,
        )
        .unwrap();

        engine.generate(&mut s, 0);

        assert!((s.derived.total_mass - 4.0).abs() < 1e-12);
        assert_eq!(s.derived.solver_lumped_mass[0], 1.0);
        assert_eq!(s.derived.solver_lumped_mass[10], 3.0);
        assert_eq!(s.derived.solver_lumped_mass[20], 0.0);
    }
}
