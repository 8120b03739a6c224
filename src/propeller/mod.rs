//! 고정피치 프로펠러(MAU 계열) 도표 설계 파이프라인.
//!
//! 속력 예측 → 공동 검토 → 최적 요소 결정 → {피치 수정, 질량/관성, 강도, 계주, 항행 특성}
//! 순으로 진행하며, 각 단계 결과는 [`snapshot::DesignSnapshot`]에 묶여 한 버전으로 관리된다.

pub mod bollard;
pub mod cavitation;
pub mod mass;
pub mod open_water;
pub mod optimum;
pub mod params;
pub mod pitch;
pub mod series;
pub mod snapshot;
pub mod speed;
pub mod strength;
pub mod tables;
pub mod voyage;

use serde::Serialize;
use thiserror::Error;

use crate::fluid::FluidError;
use crate::numeric::InterpError;

pub use params::{PropulsionParameters, ResistanceCurve};
pub use series::BladeCount;
pub use snapshot::DesignSnapshot;

/// 파이프라인 단계 이름.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Stage {
    Speed,
    Cavitation,
    Optimum,
    Pitch,
    Mass,
    Strength,
    Bollard,
    Voyage,
}

impl std::fmt::Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Stage::Speed => "최대 속력 예측",
            Stage::Cavitation => "공동 검토",
            Stage::Optimum => "최적 요소 결정",
            Stage::Pitch => "피치 수정",
            Stage::Mass => "질량 및 관성 모멘트",
            Stage::Strength => "강도 검토",
            Stage::Bollard => "계주 상태",
            Stage::Voyage => "항행 특성",
        };
        f.write_str(name)
    }
}

/// 설계 계산 중 발생 가능한 오류.
#[derive(Debug, Error)]
pub enum DesignError {
    /// 누락/범위 밖 입력. 계산 전에 거부된다.
    #[error("입력값 오류: {0}")]
    InvalidInput(String),
    #[error("지원하지 않는 날개 수: {0} (4 또는 5만 가능)")]
    UnsupportedBladeCount(u32),
    /// 선행 단계 없이 후속 단계를 호출함
    #[error("선행 단계가 실행되지 않았습니다: {0}")]
    MissingStage(Stage),
    #[error("보간 오류: {0}")]
    Interpolation(#[from] InterpError),
    #[error("증기압 계산 오류: {0}")]
    Fluid(#[from] FluidError),
}

pub type Result<T> = std::result::Result<T, DesignError>;

/// 유한한 양수인지 검사한다.
pub(crate) fn require_positive(name: &str, value: f64) -> Result<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(DesignError::InvalidInput(format!(
            "{name}은(는) 양수여야 합니다: {value}"
        )))
    }
}

/// 등간격 격자 한 축에 허용하는 최대 점 수.
pub const MAX_GRID_POINTS: usize = 10_000;

/// `[lo, hi]`를 `step` 간격으로 나눈 점 수. [`MAX_GRID_POINTS`]를 넘으면 거부한다.
pub(crate) fn grid_count(name: &str, lo: f64, hi: f64, step: f64) -> Result<usize> {
    let steps = ((hi - lo) / step + 1e-9).floor();
    if !steps.is_finite() || steps + 1.0 > MAX_GRID_POINTS as f64 {
        return Err(DesignError::InvalidInput(format!(
            "{name} 격자 점이 너무 많습니다 ({lo} ~ {hi}, 간격 {step}, 최대 {MAX_GRID_POINTS}점)"
        )));
    }
    Ok(steps as usize + 1)
}

/// 기준 0.66R 날개 폭 b = 0.226·D·(Ae/A0)/(0.1·Z)
pub fn reference_chord_m(diameter_m: f64, area_ratio: f64, blades: BladeCount) -> f64 {
    0.226 * diameter_m * area_ratio / (0.1 * blades.count() as f64)
}
