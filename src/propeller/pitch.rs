//! 날개 두께비와 보스비 차이에 따른 피치비 수정.

use serde::{Deserialize, Serialize};

use crate::units::advance_speed_mps;

use super::optimum::OptimumDesignPoint;
use super::params::PropulsionParameters;
use super::series::BladeCount;
use super::tables::{station_at, RadialStation};
use super::{reference_chord_m, require_positive, DesignError, Result};

/// 표준 보스비
pub const STANDARD_HUB_RATIO: f64 = 0.18;
/// 표준 도표의 전개면적비
pub const STANDARD_AREA_RATIO: f64 = 0.55;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PitchCorrectionInput {
    /// 실제 보스비 dh/D
    pub hub_ratio: f64,
}

impl Default for PitchCorrectionInput {
    fn default() -> Self {
        Self {
            hub_ratio: STANDARD_HUB_RATIO,
        }
    }
}

/// 피치 수정 결과와 중간값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PitchCorrection {
    /// 0.2R / 0.6R / 0.7R 두께 (mm)
    pub t02_mm: f64,
    pub t06_mm: f64,
    pub t07_mm: f64,
    /// 0.7R 날개 폭 (m)
    pub b07_m: f64,
    pub tb_design: f64,
    pub tb_standard: f64,
    pub delta_tb: f64,
    pub advance_speed_mps: f64,
    /// 피치 P (m)
    pub pitch_m: f64,
    pub rps: f64,
    /// 1 − s
    pub slip_complement: f64,
    pub delta_pitch_thickness: f64,
    pub delta_pitch_hub: f64,
    pub delta_pitch_total: f64,
    pub original_pitch_ratio: f64,
    pub corrected_pitch_ratio: f64,
}

pub(crate) fn station(r: f64) -> Result<&'static RadialStation> {
    station_at(r).ok_or_else(|| DesignError::InvalidInput(format!("표준 단면 {r}R이 없습니다")))
}

/// 최적점의 피치비를 두께·보스비 기준으로 수정한다.
pub fn correct_pitch(
    optimum: &OptimumDesignPoint,
    params: &PropulsionParameters,
    blades: BladeCount,
    input: &PitchCorrectionInput,
) -> Result<PitchCorrection> {
    params.validate()?;
    require_positive("직경", optimum.diameter_m)?;
    require_positive("P/D", optimum.pitch_ratio)?;
    require_positive("면적비", optimum.blade_area_ratio())?;
    if !input.hub_ratio.is_finite() || !(0.0..1.0).contains(&input.hub_ratio) {
        return Err(DesignError::InvalidInput(format!(
            "보스비는 [0, 1) 범위여야 합니다: {}",
            input.hub_ratio
        )));
    }

    let d = optimum.diameter_m;
    let pod = optimum.pitch_ratio;
    let t02_mm = station(0.2)?.thickness_pct / 100.0 * d * 1000.0;
    let t06_mm = station(0.6)?.thickness_pct / 100.0 * d * 1000.0;
    let s07 = station(0.7)?;
    let t07_mm = s07.thickness_pct / 100.0 * d * 1000.0;
    let width_07 = s07.width_pct / 100.0;

    let b07_m = width_07 * reference_chord_m(d, optimum.blade_area_ratio(), blades);
    let b07_std = width_07 * reference_chord_m(d, STANDARD_AREA_RATIO, blades);
    let tb_design = t07_mm / 1000.0 / b07_m;
    let tb_standard = t07_mm / 1000.0 / b07_std;
    let delta_tb = 0.75 * (tb_design - tb_standard);

    let va = advance_speed_mps(optimum.speed_kn, params.wake_fraction);
    let pitch_m = pod * d;
    let n = params.rps();
    let slip_complement = if pitch_m * n > 0.0 { va / (pitch_m * n) } else { 0.0 };

    let delta_pitch_thickness = -2.0 * pod * slip_complement * delta_tb;
    let delta_pitch_hub = if (input.hub_ratio - STANDARD_HUB_RATIO).abs() < 1e-6 {
        0.0
    } else {
        (input.hub_ratio - STANDARD_HUB_RATIO) / 10.0
    };
    let delta_pitch_total = delta_pitch_thickness + delta_pitch_hub;

    tracing::debug!(pod, delta_pitch_total, "pitch corrected");
    Ok(PitchCorrection {
        t02_mm,
        t06_mm,
        t07_mm,
        b07_m,
        tb_design,
        tb_standard,
        delta_tb,
        advance_speed_mps: va,
        pitch_m,
        rps: n,
        slip_complement,
        delta_pitch_thickness,
        delta_pitch_hub,
        delta_pitch_total,
        original_pitch_ratio: pod,
        corrected_pitch_ratio: pod + delta_pitch_total,
    })
}
