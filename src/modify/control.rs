// src/modify/control.rs

use tracing::debug;

use crate::models::StructuralModel;
use crate::modify::variable::VariableKind;

/// 変数の種類ごとの制御
///
/// 変更対象のインスタンスを記録し、対象外のインスタンスを初期化時に一度だけ
/// ゼロにする。派生データの再構築は時間ステップごとに一度だけ行う。
#[derive(Debug, Clone)]
pub struct VariableController {
    kind: VariableKind,
    controlled: Vec<usize>,
}

impl VariableController {
    pub fn new(kind: VariableKind) -> Self {
        VariableController {
            kind,
            controlled: Vec::new(),
        }
    }

    pub fn kind(&self) -> VariableKind {
        self.kind
    }

    pub fn register(&mut self, index: usize) {
        if !self.controlled.contains(&index) {
            self.controlled.push(index);
        }
    }

    pub fn is_controlled(&self, index: usize) -> bool {
        self.controlled.contains(&index)
    }

    pub fn controlled(&self) -> &[usize] {
        &self.controlled
    }

    /// 変更対象でないインスタンスをすべてゼロにする
    pub fn zero_uncontrolled(&self, structure: &mut StructuralModel) {
        for index in 0..self.kind.instance_count(structure) {
            if !self.is_controlled(index) {
                self.kind.zero(structure, index);
            }
        }
    }

    /// 全変数の適用後、時間ステップごとに一度だけ呼ぶ
    pub fn commit(&self, structure: &mut StructuralModel) {
        match self.kind {
            VariableKind::LumpedMass => structure.rebuild_derived(),
        }
        debug!(variable = self.kind.name(), "structural change committed");
    }
}
