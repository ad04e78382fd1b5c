// src/models/structure.rs

use serde::{Deserialize, Serialize};

use crate::config::StructureScenario;
use crate::error::{SimResult, SimulationError};

/// 集中質量1個分を平坦化した値の幅: [m, px, py, pz, ixx, iyy, izz, ixy, ixz, iyz]
pub const LUMPED_MASS_WIDTH: usize = 10;

/// 集中質量1個分の値
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct LumpedMass {
    pub mass: f64,
    pub position: [f64; 3],
    pub inertia: [[f64; 3]; 3],
}

impl LumpedMass {
    /// 対称慣性テンソルは独立な6成分 (対角3つ、非対角3つ) として並べる
    pub fn to_flat(&self) -> [f64; LUMPED_MASS_WIDTH] {
        let p = &self.position;
        let i = &self.inertia;
        [
            self.mass, p[0], p[1], p[2], i[0][0], i[1][1], i[2][2], i[0][1], i[0][2], i[1][2],
        ]
    }

    /// `values` は `LUMPED_MASS_WIDTH` 個の要素を持つこと
    pub fn from_flat(values: &[f64]) -> Self {
        let [ixx, iyy, izz, ixy, ixz, iyz] = [
            values[4], values[5], values[6], values[7], values[8], values[9],
        ];
        LumpedMass {
            mass: values[0],
            position: [values[1], values[2], values[3]],
            inertia: [[ixx, ixy, ixz], [ixy, iyy, iyz], [ixz, iyz, izz]],
        }
    }
}

/// 集中質量から再構築される派生データ
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct DerivedMassData {
    pub total_mass: f64,
    pub mass_weighted_offset: [f64; 3],
    /// ソルバーに渡す平坦化配列 (集中質量ごとに `LUMPED_MASS_WIDTH` 個)
    pub solver_lumped_mass: Vec<f64>,
    pub rebuild_count: u64,
}

/// 構造モデルのうち集中質量に関わる部分
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructuralModel {
    pub num_node: usize,
    pub lumped_mass: Vec<f64>,
    pub lumped_mass_position: Vec<[f64; 3]>,
    pub lumped_mass_inertia: Vec<[[f64; 3]; 3]>,
    pub lumped_mass_nodes: Vec<usize>,
    pub derived: DerivedMassData,
}

impl StructuralModel {
    pub fn from_scenario(scenario: &StructureScenario) -> SimResult<Self> {
        if let Some(bad) = scenario
            .lumped_masses
            .iter()
            .find(|m| m.node >= scenario.num_node)
        {
            return Err(SimulationError::InvalidSettings(format!(
                "集中質量の節点 {} が節点数 {} を超えています",
                bad.node, scenario.num_node
            )));
        }

        let mut model = StructuralModel {
            num_node: scenario.num_node,
            lumped_mass: scenario.lumped_masses.iter().map(|m| m.mass).collect(),
            lumped_mass_position: scenario.lumped_masses.iter().map(|m| m.position).collect(),
            lumped_mass_inertia: scenario.lumped_masses.iter().map(|m| m.inertia).collect(),
            lumped_mass_nodes: scenario.lumped_masses.iter().map(|m| m.node).collect(),
            derived: DerivedMassData::default(),
        };
        model.rebuild_derived();
        Ok(model)
    }

    /// 集中質量の各配列の長さが揃っていることを確認する
    pub fn validate(&self) -> SimResult<()> {
        let n = self.lumped_mass.len();
        let lengths = [
            ("lumped_mass_position", self.lumped_mass_position.len()),
            ("lumped_mass_inertia", self.lumped_mass_inertia.len()),
            ("lumped_mass_nodes", self.lumped_mass_nodes.len()),
        ];
        for (name, len) in lengths {
            if len != n {
                return Err(SimulationError::InvalidSettings(format!(
                    "{} の長さ {} が集中質量の個数 {} と一致しません",
                    name, len, n
                )));
            }
        }
        Ok(())
    }

    pub fn num_lumped_masses(&self) -> usize {
        self.lumped_mass.len()
    }

    pub fn lumped_mass(&self, index: usize) -> Option<LumpedMass> {
        Some(LumpedMass {
            mass: *self.lumped_mass.get(index)?,
            position: *self.lumped_mass_position.get(index)?,
            inertia: *self.lumped_mass_inertia.get(index)?,
        })
    }

    /// 派生データは `rebuild_derived` を呼ぶまで更新されない
    pub fn set_lumped_mass(&mut self, index: usize, value: &LumpedMass) {
        self.lumped_mass[index] = value.mass;
        self.lumped_mass_position[index] = value.position;
        self.lumped_mass_inertia[index] = value.inertia;
    }

    /// 集中質量の集計とソルバー向け配列を作り直す
    pub fn rebuild_derived(&mut self) {
        let total_mass: f64 = self.lumped_mass.iter().sum();

        let mut offset = [0.0; 3];
        if total_mass != 0.0 {
            for (m, p) in self.lumped_mass.iter().zip(&self.lumped_mass_position) {
                for k in 0..3 {
                    offset[k] += m * p[k] / total_mass;
                }
            }
        }

        let solver_lumped_mass = (0..self.num_lumped_masses())
            .filter_map(|i| self.lumped_mass(i))
            .flat_map(|lm| lm.to_flat())
            .collect();

        self.derived = DerivedMassData {
            total_mass,
            mass_weighted_offset: offset,
            solver_lumped_mass,
            rebuild_count: self.derived.rebuild_count + 1,
        };
    }
}
