//! 계주(bollard pull) 상태의 추력과 회전수.

use serde::{Deserialize, Serialize};

use crate::fluid::SEAWATER_DENSITY;
use crate::units::rps_from_rpm;

use super::open_water::PerformanceModel;
use super::optimum::OptimumDesignPoint;
use super::params::PropulsionParameters;
use super::{require_positive, Result};

/// J = 0 에서의 KT, KQ를 어디서 얻을지.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum StaticCoefficients {
    /// 직접 입력
    Given { kt0: f64, kq0: f64 },
    /// 최적점의 P/D, Ae/A0로 회귀식을 J = 0에서 평가
    FromModel,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollardInput {
    /// 계주 추력감소계수 t0
    pub thrust_deduction: f64,
    pub coefficients: StaticCoefficients,
    pub density: f64,
}

impl Default for BollardInput {
    fn default() -> Self {
        Self {
            thrust_deduction: 0.04,
            coefficients: StaticCoefficients::FromModel,
            density: SEAWATER_DENSITY,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BollardPull {
    pub kt0: f64,
    pub kq0: f64,
    pub diameter_m: f64,
    /// 전달마력 P_D = Ps·ηR·ηs (kW)
    pub delivered_power_kw: f64,
    /// 토크 Q (kN·m)
    pub torque_knm: f64,
    /// 추력 T (kN)
    pub thrust_kn: f64,
    /// 계주 회전수 (rpm). 계산 불가 시 0.
    pub bollard_rpm: f64,
    /// 예인력 T·(1 − t0) (kN)
    pub towrope_pull_kn: f64,
}

/// 단독 계주 계산 입력.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BollardCase {
    pub shaft_power_kw: f64,
    pub rpm: f64,
    pub shaft_efficiency: f64,
    pub relative_rotative_efficiency: f64,
    pub diameter_m: f64,
    pub kt0: f64,
    pub kq0: f64,
    pub thrust_deduction: f64,
    pub density: f64,
}

impl Default for BollardCase {
    fn default() -> Self {
        Self {
            shaft_power_kw: 6222.0,
            rpm: 155.0,
            shaft_efficiency: 0.97,
            relative_rotative_efficiency: 1.0,
            diameter_m: 2.5,
            kt0: 0.3,
            kq0: 0.03,
            thrust_deduction: 0.04,
            density: SEAWATER_DENSITY,
        }
    }
}

/// 계주 상태를 계산한다. 분모가 0이 되는 경우 NaN 대신 0을 보고한다.
pub fn bollard_pull(case: &BollardCase) -> Result<BollardPull> {
    require_positive("주기 출력", case.shaft_power_kw)?;
    require_positive("회전수", case.rpm)?;
    require_positive("해수 밀도", case.density)?;

    let d = case.diameter_m;
    let pd = case.shaft_power_kw * case.relative_rotative_efficiency * case.shaft_efficiency;
    let n = rps_from_rpm(case.rpm);
    let torque = pd / (2.0 * std::f64::consts::PI * n);
    let thrust = if case.kq0 > 0.0 && d > 0.0 {
        case.kt0 / case.kq0 * (torque / d)
    } else {
        0.0
    };
    let bollard_rpm = if d > 0.0 && case.kt0 > 0.0 && thrust > 0.0 {
        60.0 * (thrust * 1000.0 / (case.density * d.powi(4) * case.kt0)).sqrt()
    } else {
        0.0
    };
    Ok(BollardPull {
        kt0: case.kt0,
        kq0: case.kq0,
        diameter_m: d,
        delivered_power_kw: pd,
        torque_knm: torque,
        thrust_kn: thrust,
        bollard_rpm,
        towrope_pull_kn: thrust * (1.0 - case.thrust_deduction),
    })
}

/// 최적점 기준 계주 상태.
pub fn bollard_for_design(
    optimum: &OptimumDesignPoint,
    params: &PropulsionParameters,
    model: &PerformanceModel,
    input: &BollardInput,
) -> Result<BollardPull> {
    params.validate()?;
    let (kt0, kq0) = match input.coefficients {
        StaticCoefficients::Given { kt0, kq0 } => (kt0, kq0),
        StaticCoefficients::FromModel => {
            let p = model.evaluate(0.0, optimum.pitch_ratio, optimum.blade_area_ratio());
            (p.kt, p.kq)
        }
    };
    bollard_pull(&BollardCase {
        shaft_power_kw: params.shaft_power_kw,
        rpm: params.rpm,
        shaft_efficiency: params.shaft_efficiency,
        relative_rotative_efficiency: params.relative_rotative_efficiency,
        diameter_m: optimum.diameter_m,
        kt0,
        kq0,
        thrust_deduction: input.thrust_deduction,
        density: input.density,
    })
}
