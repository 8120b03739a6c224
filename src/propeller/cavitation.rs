//! 공동(cavitation) 한계로부터 계열별 소요 전개면적비를 구한다.

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::fluid::{self, SEAWATER_DENSITY, STANDARD_ATMOSPHERE_PA};
use crate::numeric::{Interpolant, MONOTONE_FIRST};
use crate::units::advance_speed_mps;

use super::params::PropulsionParameters;
use super::speed::SpeedPredictionResult;
use super::tables::{SIGMA_BERLIN, SIGMA_WAGENINGEN, TAU_C_BERLIN, TAU_C_WAGENINGEN};
use super::{DesignError, Result};

/// τc 하한/상한
pub const TAU_C_MIN: f64 = 0.05;
pub const TAU_C_MAX: f64 = 0.5;

/// σ–τc 한계 곡선 선택.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum CavitationCriterion {
    /// 범위 밖에서는 보간 곡선으로 외삽한다.
    #[default]
    Wageningen,
    /// 상선 기준. 범위 밖에서는 끝값에 고정한다.
    Berlin,
}

/// τc 값을 얻은 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum TauCSource {
    Interpolated,
    Extrapolated,
    Pinned,
}

/// 증기압 지정 방식.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum VaporPressure {
    /// 직접 입력 (Pa)
    Pascal(f64),
    /// 수온(°C)에서 포화증기압을 계산
    WaterTemperatureC(f64),
}

impl VaporPressure {
    pub fn resolve_pa(&self) -> Result<f64> {
        match *self {
            VaporPressure::Pascal(pv) => Ok(pv),
            VaporPressure::WaterTemperatureC(t) => Ok(fluid::vapor_pressure_pa(t)?),
        }
    }
}

/// 공동 검토 입력.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CavitationInput {
    /// 축 중심 침수 깊이 hs (m)
    pub immersion_m: f64,
    pub vapor_pressure: VaporPressure,
    /// 대기압 (Pa)
    pub atmospheric_pa: f64,
    /// 해수 밀도 (kg/m³)
    pub density: f64,
    pub criterion: CavitationCriterion,
}

impl Default for CavitationInput {
    fn default() -> Self {
        Self {
            immersion_m: 5.0,
            vapor_pressure: VaporPressure::Pascal(1706.0),
            atmospheric_pa: STANDARD_ATMOSPHERE_PA,
            density: SEAWATER_DENSITY,
            criterion: CavitationCriterion::Wageningen,
        }
    }
}

/// 계열 하나의 공동 검토 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CavitationResult {
    pub family: &'static str,
    /// 공칭 전개면적비
    pub area_ratio: f64,
    pub speed_kn: f64,
    /// 전진속도 VA (m/s)
    pub advance_speed_mps: f64,
    /// 0.7R 회전 속도 (m/s)
    pub rotational_speed_07r: f64,
    /// V0.7R² (m²/s²)
    pub resultant_speed_sq: f64,
    pub sigma: f64,
    pub tau_c: f64,
    pub tau_c_source: TauCSource,
    /// 추력 T (N)
    pub thrust_n: f64,
    /// 투영 면적 Ap (m²)
    pub projected_area_m2: f64,
    /// 전개 면적 AE (m²)
    pub expanded_area_m2: f64,
    /// 소요 전개면적비
    pub required_area_ratio: f64,
    pub pitch_ratio: f64,
    pub diameter_m: f64,
    pub eta0: f64,
}

/// 입력 불량으로 건너뛴 계열.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkippedRow {
    pub family: &'static str,
    pub reason: String,
}

/// 공동 검토 단계 전체 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CavitationStage {
    pub criterion: CavitationCriterion,
    pub vapor_pressure_pa: f64,
    /// P_atm + ρ·g·hs (Pa)
    pub total_pressure_pa: f64,
    pub rows: Vec<CavitationResult>,
    pub skipped: Vec<SkippedRow>,
}

/// σ에 대한 τc를 구한다. 결과는 [0.05, 0.5]로 제한된다.
pub fn tau_c(sigma: f64, criterion: CavitationCriterion) -> Result<(f64, TauCSource)> {
    let (raw, source) = match criterion {
        CavitationCriterion::Wageningen => {
            let curve =
                Interpolant::with_strategies(&SIGMA_WAGENINGEN, &TAU_C_WAGENINGEN, &MONOTONE_FIRST)?;
            let source = if curve.contains(sigma) {
                TauCSource::Interpolated
            } else {
                TauCSource::Extrapolated
            };
            (curve.eval(sigma), source)
        }
        CavitationCriterion::Berlin => {
            let (lo, hi) = (SIGMA_BERLIN[0], SIGMA_BERLIN[SIGMA_BERLIN.len() - 1]);
            if sigma < lo {
                (TAU_C_BERLIN[0], TauCSource::Pinned)
            } else if sigma > hi {
                (TAU_C_BERLIN[TAU_C_BERLIN.len() - 1], TauCSource::Pinned)
            } else {
                let curve =
                    Interpolant::with_strategies(&SIGMA_BERLIN, &TAU_C_BERLIN, &MONOTONE_FIRST)?;
                (curve.eval(sigma), TauCSource::Interpolated)
            }
        }
    };
    Ok((raw.clamp(TAU_C_MIN, TAU_C_MAX), source))
}

fn validate(input: &CavitationInput, vapor_pa: f64, total_pa: f64) -> Result<()> {
    if !input.immersion_m.is_finite() || input.immersion_m < 0.0 {
        return Err(DesignError::InvalidInput(format!(
            "침수 깊이는 0 이상이어야 합니다: {}",
            input.immersion_m
        )));
    }
    super::require_positive("대기압", input.atmospheric_pa)?;
    super::require_positive("해수 밀도", input.density)?;
    if !vapor_pa.is_finite() || vapor_pa < 0.0 || vapor_pa >= total_pa {
        return Err(DesignError::InvalidInput(format!(
            "증기압 {vapor_pa} Pa가 전압 {total_pa} Pa에 비해 올바르지 않습니다"
        )));
    }
    Ok(())
}

fn upstream_problem(row: &SpeedPredictionResult) -> Option<String> {
    let checks = [
        ("최대 속력", row.speed_kn),
        ("직경", row.diameter_m),
        ("η0", row.eta0),
        ("P/D", row.pitch_ratio),
    ];
    checks
        .iter()
        .find(|(_, v)| !v.is_finite() || *v <= 0.0)
        .map(|(name, v)| format!("{name} 값이 올바르지 않습니다: {v}"))
}

/// 속력 예측 결과 각각에 대해 공동 한계를 계산한다.
/// 입력이 불량한 행은 건너뛰고 `skipped`에 기록한다.
pub fn evaluate(
    speeds: &[SpeedPredictionResult],
    params: &PropulsionParameters,
    input: &CavitationInput,
) -> Result<CavitationStage> {
    params.validate()?;
    let vapor_pa = input.vapor_pressure.resolve_pa()?;
    let total_pa = fluid::static_pressure_pa(input.atmospheric_pa, input.density, input.immersion_m);
    validate(input, vapor_pa, total_pa)?;

    let rho = input.density;
    let pd = params.delivered_power_kw();
    let mut rows = Vec::with_capacity(speeds.len());
    let mut skipped = Vec::new();

    for row in speeds {
        if let Some(reason) = upstream_problem(row) {
            warn!(family = row.family, %reason, "cavitation row skipped");
            skipped.push(SkippedRow {
                family: row.family,
                reason,
            });
            continue;
        }
        let va = advance_speed_mps(row.speed_kn, params.wake_fraction);
        let omega = 0.7 * std::f64::consts::PI * params.rpm * row.diameter_m / 60.0;
        let v_sq = va * va + omega * omega;
        let dynamic = 0.5 * rho * v_sq;
        let sigma = (total_pa - vapor_pa) / dynamic;
        let (tau, tau_source) = tau_c(sigma, input.criterion)?;

        let thrust_n = pd * row.eta0 * 1000.0 / va;
        let projected = thrust_n / (dynamic * tau);
        let shape = 1.067 - 0.229 * row.pitch_ratio;
        if shape <= 0.0 {
            let reason = format!("P/D {:.3}에서 1.067 − 0.229·P/D ≤ 0", row.pitch_ratio);
            warn!(family = row.family, %reason, "cavitation row skipped");
            skipped.push(SkippedRow {
                family: row.family,
                reason,
            });
            continue;
        }
        let expanded = projected / shape;
        let disc = std::f64::consts::PI * row.diameter_m.powi(2) / 4.0;
        let required = expanded / disc;

        debug!(family = row.family, sigma, tau, required, "cavitation evaluated");
        rows.push(CavitationResult {
            family: row.family,
            area_ratio: row.area_ratio,
            speed_kn: row.speed_kn,
            advance_speed_mps: va,
            rotational_speed_07r: omega,
            resultant_speed_sq: v_sq,
            sigma,
            tau_c: tau,
            tau_c_source: tau_source,
            thrust_n,
            projected_area_m2: projected,
            expanded_area_m2: expanded,
            required_area_ratio: required,
            pitch_ratio: row.pitch_ratio,
            diameter_m: row.diameter_m,
            eta0: row.eta0,
        });
    }

    Ok(CavitationStage {
        criterion: input.criterion,
        vapor_pressure_pa: vapor_pa,
        total_pressure_pa: total_pa,
        rows,
        skipped,
    })
}
