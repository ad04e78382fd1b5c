// src/config/scenario.rs

use serde::{Deserialize, Serialize};

/// 構造モデルの初期条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StructureScenario {
    pub num_node: usize,
    #[serde(default)]
    pub lumped_masses: Vec<LumpedMassInstance>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LumpedMassInstance {
    pub node: usize,
    pub mass: f64,                 // 質量 (kg)
    #[serde(default)]
    pub position: [f64; 3],        // 節点からのオフセット (m)
    #[serde(default)]
    pub inertia: [[f64; 3]; 3],    // 慣性テンソル (kg m²)
}

/// 空力モデルの初期条件
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AeroScenario {
    pub rho: f64,                  // 大気密度 (kg/m³)
    pub u_inf: f64,                // 一様流速度 (m/s)
    #[serde(default = "default_u_inf_direction")]
    pub u_inf_direction: [f64; 3],
}

impl Default for AeroScenario {
    fn default() -> Self {
        AeroScenario {
            rho: 1.225,
            u_inf: 0.0,
            u_inf_direction: default_u_inf_direction(),
        }
    }
}

fn default_u_inf_direction() -> [f64; 3] {
    [1.0, 0.0, 0.0]
}
