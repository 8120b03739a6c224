//! 회귀 다항식 기반 단독(open-water) 성능 모델.

use serde::{Deserialize, Serialize};

use super::series::{evaluate_terms, BladeCount};
use super::{grid_count, DesignError, Result};

/// 한 작동점에서의 단독 성능. KT, KQ는 0 이상으로 절단된 값이다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct OpenWaterPoint {
    pub j: f64,
    pub kt: f64,
    /// 10·KQ
    pub ten_kq: f64,
    pub kq: f64,
    pub eta0: f64,
}

/// 날개 수별 KT/KQ 다항식 평가기.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PerformanceModel {
    blades: BladeCount,
}

impl PerformanceModel {
    pub fn new(blades: BladeCount) -> Self {
        Self { blades }
    }

    /// 날개 수(정수)로 생성한다. 4, 5 이외는 거부한다.
    pub fn for_blade_count(count: u32) -> Result<Self> {
        Ok(Self::new(BladeCount::try_from(count)?))
    }

    pub fn blades(&self) -> BladeCount {
        self.blades
    }

    /// 절단하지 않은 KT 다항식 값.
    pub fn kt_raw(&self, j: f64, pitch_ratio: f64, area_ratio: f64) -> f64 {
        evaluate_terms(self.blades.kt_terms(), j, pitch_ratio, area_ratio)
    }

    /// 절단하지 않은 10·KQ 다항식 값.
    pub fn ten_kq_raw(&self, j: f64, pitch_ratio: f64, area_ratio: f64) -> f64 {
        evaluate_terms(self.blades.ten_kq_terms(), j, pitch_ratio, area_ratio)
    }

    pub fn kt(&self, j: f64, pitch_ratio: f64, area_ratio: f64) -> f64 {
        self.kt_raw(j, pitch_ratio, area_ratio).max(0.0)
    }

    pub fn kq(&self, j: f64, pitch_ratio: f64, area_ratio: f64) -> f64 {
        (self.ten_kq_raw(j, pitch_ratio, area_ratio) / 10.0).max(0.0)
    }

    /// η0 = KT·J / (2π·KQ). J = 0 또는 KQ = 0이면 0.
    pub fn evaluate(&self, j: f64, pitch_ratio: f64, area_ratio: f64) -> OpenWaterPoint {
        let kt = self.kt(j, pitch_ratio, area_ratio);
        let kq = self.kq(j, pitch_ratio, area_ratio);
        let eta0 = if j == 0.0 || kq == 0.0 {
            0.0
        } else {
            kt * j / (2.0 * std::f64::consts::PI * kq)
        };
        OpenWaterPoint {
            j,
            kt,
            ten_kq: kq * 10.0,
            kq,
            eta0,
        }
    }
}

/// 단독 성능 곡선 생성 입력.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OpenWaterCurveInput {
    pub pitch_ratio: f64,
    pub area_ratio: f64,
    pub j_min: f64,
    pub j_max: f64,
    pub j_step: f64,
}

impl Default for OpenWaterCurveInput {
    fn default() -> Self {
        Self {
            pitch_ratio: 0.8,
            area_ratio: 0.55,
            j_min: 0.0,
            j_max: 1.6,
            j_step: 0.1,
        }
    }
}

/// J 격자 위의 단독 성능 곡선.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OpenWaterCurve {
    pub blades: u32,
    pub pitch_ratio: f64,
    pub area_ratio: f64,
    pub points: Vec<OpenWaterPoint>,
}

impl OpenWaterCurve {
    /// η0가 최대인 점.
    pub fn peak_efficiency(&self) -> Option<&OpenWaterPoint> {
        self.points
            .iter()
            .max_by(|a, b| a.eta0.total_cmp(&b.eta0))
    }
}

/// J_min~J_max를 j_step 간격으로 훑어 KT, 10KQ, η0를 계산한다.
pub fn open_water_curve(model: &PerformanceModel, input: &OpenWaterCurveInput) -> Result<OpenWaterCurve> {
    if !(input.j_step > 0.0) {
        return Err(DesignError::InvalidInput(format!(
            "J 간격은 양수여야 합니다 (j_step={})",
            input.j_step
        )));
    }
    if !(input.j_min >= 0.0) || !(input.j_max >= input.j_min) {
        return Err(DesignError::InvalidInput(format!(
            "J 범위가 올바르지 않습니다 ({} ~ {})",
            input.j_min, input.j_max
        )));
    }
    if !(input.pitch_ratio > 0.0) || !(input.area_ratio > 0.0) {
        return Err(DesignError::InvalidInput(
            "P/D와 Ae/A0는 양수여야 합니다".into(),
        ));
    }
    let count = grid_count("J", input.j_min, input.j_max, input.j_step)?;
    let points = (0..count)
        .map(|k| {
            let j = input.j_min + k as f64 * input.j_step;
            model.evaluate(j, input.pitch_ratio, input.area_ratio)
        })
        .collect();
    tracing::debug!(
        blades = model.blades().count(),
        count,
        "open-water curve generated"
    );
    Ok(OpenWaterCurve {
        blades: model.blades().count(),
        pitch_ratio: input.pitch_ratio,
        area_ratio: input.area_ratio,
        points,
    })
}
