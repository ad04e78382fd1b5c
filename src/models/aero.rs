// src/models/aero.rs

use serde::{Deserialize, Serialize};

use crate::config::AeroScenario;

/// 空力モデル (本体の計算は外部ステージが担う)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AerodynamicModel {
    pub rho: f64,
    pub u_inf: f64,
    pub u_inf_direction: [f64; 3],
}

impl AerodynamicModel {
    pub fn from_scenario(scenario: &AeroScenario) -> Self {
        AerodynamicModel {
            rho: scenario.rho,
            u_inf: scenario.u_inf,
            u_inf_direction: scenario.u_inf_direction,
        }
    }

    /// 動圧 (Pa)
    pub fn dynamic_pressure(&self) -> f64 {
        0.5 * self.rho * self.u_inf * self.u_inf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dynamic_pressure() {
        let aero = AerodynamicModel::from_scenario(&AeroScenario {
            rho: 1.2,
            u_inf: 10.0,
            u_inf_direction: [1.0, 0.0, 0.0],
        });
        assert!((aero.dynamic_pressure() - 60.0).abs() < 1e-12);
    }
}
