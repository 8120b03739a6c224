//! Bp–δ 도표 보간으로 계열별 최대 속력과 초기 주요 치수를 예측한다.

use serde::Serialize;
use tracing::{debug, warn};

use crate::numeric::{linspace, newton, Interpolant, SolverConfig};

use super::params::{PropulsionParameters, ResistanceCurve};
use super::series::BladeCount;
use super::tables::GeometryFamily;
use super::{DesignError, Result};

/// 근 찾기 결과 상태.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind")]
pub enum SolveStatus {
    Converged { iterations: usize },
    /// 수렴 실패로 최대 표본 속력을 대신 사용함
    Degraded { reason: String },
}

impl SolveStatus {
    pub fn is_degraded(&self) -> bool {
        matches!(self, SolveStatus::Degraded { .. })
    }
}

/// 계열 하나의 속력 예측 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedPredictionResult {
    pub family: &'static str,
    /// 공칭 전개면적비
    pub area_ratio: f64,
    /// 최대 속력 (kn)
    pub speed_kn: f64,
    pub pitch_ratio: f64,
    pub delta: f64,
    pub diameter_m: f64,
    pub eta0: f64,
    pub sqrt_bp: f64,
    pub status: SolveStatus,
    /// 근이 표본 속력 범위 밖이라 잘렸는지 여부
    pub clamped: bool,
    pub warnings: Vec<String>,
}

/// 도표 하나의 δ, P/D, η0 보간기 묶음.
#[derive(Debug, Clone)]
pub struct DiagramCurves {
    pub delta: Interpolant,
    pub pitch_ratio: Interpolant,
    pub eta0: Interpolant,
}

impl DiagramCurves {
    pub fn fit(family: &GeometryFamily) -> Result<Self> {
        Ok(Self {
            delta: Interpolant::new(family.sqrt_bp, family.delta)?,
            pitch_ratio: Interpolant::new(family.sqrt_bp, family.pitch_ratio)?,
            eta0: Interpolant::new(family.sqrt_bp, family.eta0)?,
        })
    }
}

/// 선속 V(kn)에서 √Bp. VA = (1 − w)·V [kn], Bp = 1.166·N·√P_D / VA^2.5
pub fn sqrt_bp(params: &PropulsionParameters, speed_kn: f64) -> f64 {
    let va = (1.0 - params.wake_fraction) * speed_kn;
    let bp = 1.166 * params.rpm * params.delivered_power_kw().sqrt() / va.powf(2.5);
    bp.sqrt()
}

/// 추력마력 PTE(V) = P_D·η_H·η0(√Bp(V))
fn thrust_power_kw(params: &PropulsionParameters, diagram: &DiagramCurves, speed_kn: f64) -> f64 {
    params.delivered_power_kw() * params.hull_efficiency() * diagram.eta0.eval(sqrt_bp(params, speed_kn))
}

/// PTE(V) = PE(V)를 풀어 계열의 최대 속력을 예측한다.
pub fn predict_speed(
    family: &GeometryFamily,
    curve: &ResistanceCurve,
    params: &PropulsionParameters,
) -> Result<SpeedPredictionResult> {
    params.validate()?;
    let diagram = DiagramCurves::fit(family)?;
    let pe = curve.interpolant()?;
    let (v_min, v_max) = curve.speed_range();

    let solved = newton(
        |v| thrust_power_kw(params, &diagram, v) - pe.eval(v),
        v_max,
        SolverConfig::default(),
    );

    let mut warnings = Vec::new();
    let (speed_kn, status, clamped) = if solved.converged {
        let clamped = solved.root < v_min || solved.root > v_max;
        if clamped {
            warnings.push(format!(
                "해 {:.2} kn가 표본 범위 [{v_min}, {v_max}] 밖이라 잘렸습니다.",
                solved.root
            ));
        }
        (
            solved.root.clamp(v_min, v_max),
            SolveStatus::Converged {
                iterations: solved.iterations,
            },
            clamped,
        )
    } else {
        let reason = format!(
            "{}회 반복 후 미수렴 (마지막 x={:.4}, 잔차={:.4})",
            solved.iterations, solved.root, solved.residual
        );
        warn!(family = family.name, %reason, "speed root not found, using max sampled speed");
        warnings.push(format!("최대 표본 속력 {v_max} kn로 대체: {reason}"));
        (v_max, SolveStatus::Degraded { reason }, false)
    };

    let va_kn = (1.0 - params.wake_fraction) * speed_kn;
    let sb = sqrt_bp(params, speed_kn);
    let delta = diagram.delta.eval(sb);
    let pitch_ratio = diagram.pitch_ratio.eval(sb);
    let eta0 = diagram.eta0.eval(sb);
    let diameter_m = delta * va_kn / params.rpm;

    let (sb_lo, sb_hi) = diagram.eta0.domain();
    if sb < sb_lo || sb > sb_hi {
        warnings.push(format!(
            "√Bp {sb:.3}가 도표 범위 [{sb_lo}, {sb_hi}] 밖이라 외삽했습니다."
        ));
    }
    if speed_kn < params.design_speed_kn {
        warnings.push(format!(
            "예측 최대 속력 {speed_kn:.2} kn가 설계 속력 {} kn보다 낮습니다.",
            params.design_speed_kn
        ));
    }

    debug!(
        family = family.name,
        speed_kn, pitch_ratio, delta, diameter_m, eta0, "speed predicted"
    );
    Ok(SpeedPredictionResult {
        family: family.name,
        area_ratio: family.area_ratio,
        speed_kn,
        pitch_ratio,
        delta,
        diameter_m,
        eta0,
        sqrt_bp: sb,
        status,
        clamped,
        warnings,
    })
}

/// 날개 수에 해당하는 세 계열을 모두 예측한다. 실패한 계열은 로그를 남기고 제외한다.
pub fn predict_all(
    blades: BladeCount,
    curve: &ResistanceCurve,
    params: &PropulsionParameters,
) -> Result<Vec<SpeedPredictionResult>> {
    params.validate()?;
    let mut rows = Vec::with_capacity(3);
    for family in blades.families() {
        match predict_speed(family, curve, params) {
            Ok(row) => rows.push(row),
            Err(err) => warn!(family = family.name, %err, "speed prediction failed"),
        }
    }
    if rows.is_empty() {
        return Err(DesignError::InvalidInput(
            "모든 계열의 속력 예측이 실패했습니다".into(),
        ));
    }
    Ok(rows)
}

/// 속력 스윕의 한 행.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SweepPoint {
    pub speed_kn: f64,
    pub sqrt_bp: f64,
    pub delta: f64,
    pub pitch_ratio: f64,
    pub eta0: f64,
    /// 추력마력 (kW)
    pub pte_kw: f64,
    /// 유효마력 (kW)
    pub pe_kw: f64,
}

/// 계열 하나에 대한 속력–마력 스윕.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SpeedSweep {
    pub family: &'static str,
    pub points: Vec<SweepPoint>,
    /// PTE와 PE가 교차하는 속력 (선형 보간)
    pub crossings_kn: Vec<f64>,
}

/// 표본 속력 범위를 samples 개로 나눠 PTE/PE 곡선을 만든다.
pub fn speed_sweep(
    family: &GeometryFamily,
    curve: &ResistanceCurve,
    params: &PropulsionParameters,
    samples: usize,
) -> Result<SpeedSweep> {
    params.validate()?;
    if samples < 2 {
        return Err(DesignError::InvalidInput(format!(
            "스윕 점 수는 2 이상이어야 합니다: {samples}"
        )));
    }
    let diagram = DiagramCurves::fit(family)?;
    let pe = curve.interpolant()?;
    let (v_min, v_max) = curve.speed_range();
    let pd = params.delivered_power_kw();
    let eta_h = params.hull_efficiency();

    let points: Vec<SweepPoint> = linspace(v_min, v_max, samples)
        .into_iter()
        .map(|v| {
            let sb = sqrt_bp(params, v);
            let eta0 = diagram.eta0.eval(sb);
            SweepPoint {
                speed_kn: v,
                sqrt_bp: sb,
                delta: diagram.delta.eval(sb),
                pitch_ratio: diagram.pitch_ratio.eval(sb),
                eta0,
                pte_kw: pd * eta_h * eta0,
                pe_kw: pe.eval(v),
            }
        })
        .collect();

    let crossings_kn = points
        .windows(2)
        .filter_map(|w| {
            let d0 = w[0].pte_kw - w[0].pe_kw;
            let d1 = w[1].pte_kw - w[1].pe_kw;
            if d0 == 0.0 {
                Some(w[0].speed_kn)
            } else if d0 * d1 < 0.0 {
                Some(w[0].speed_kn + (w[1].speed_kn - w[0].speed_kn) * d0 / (d0 - d1))
            } else {
                None
            }
        })
        .collect();

    Ok(SpeedSweep {
        family: family.name,
        points,
        crossings_kn,
    })
}
