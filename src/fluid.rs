//! 해수 물성 상수와 물의 포화증기압.
//! 포화증기압은 seuif97(IAPWS-IF97)로 계산하고, 범위 밖 NaN이면 Wagner–Pruss 식으로 보정한다.

use seuif97::{tx, OP};
use thiserror::Error;

/// 해수 밀도 (kg/m³)
pub const SEAWATER_DENSITY: f64 = 1025.0;
/// 중력 가속도 (m/s²)
pub const GRAVITY: f64 = 9.81;
/// 표준 대기압 (Pa)
pub const STANDARD_ATMOSPHERE_PA: f64 = 101_325.0;

const CRITICAL_PRESSURE_MPA: f64 = 22.064;
const CRITICAL_TEMPERATURE_K: f64 = 647.096;
const WAGNER_N: [f64; 6] = [
    -7.859_517_83,
    1.844_082_59,
    -11.786_649_7,
    22.680_741_1,
    -15.961_871_9,
    1.801_225_02,
];

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FluidError {
    #[error("포화증기압 유효 범위를 벗어났습니다 (0~374°C): {0}°C")]
    OutOfRange(f64),
}

/// 수온(°C)에서 물의 포화증기압(Pa)을 구한다.
pub fn vapor_pressure_pa(t_c: f64) -> Result<f64, FluidError> {
    let p_mpa = tx(t_c, 0.0, OP);
    if p_mpa.is_finite() && p_mpa > 0.0 {
        return Ok(p_mpa * 1.0e6);
    }
    tracing::debug!(t_c, "IF97 saturation pressure unavailable, using Wagner-Pruss");
    saturation_pressure_wagner_pa(t_c)
}

/// Wagner–Pruss 포화증기압 식 (Pa).
pub fn saturation_pressure_wagner_pa(t_c: f64) -> Result<f64, FluidError> {
    let t_k = t_c + 273.15;
    if !t_k.is_finite() || t_k <= 273.15 - 1e-9 || t_k > CRITICAL_TEMPERATURE_K {
        return Err(FluidError::OutOfRange(t_c));
    }
    let theta = 1.0 - t_k / CRITICAL_TEMPERATURE_K;
    let exponent = (CRITICAL_TEMPERATURE_K / t_k)
        * (WAGNER_N[0] * theta
            + WAGNER_N[1] * theta.powf(1.5)
            + WAGNER_N[2] * theta.powi(3)
            + WAGNER_N[3] * theta.powf(3.5)
            + WAGNER_N[4] * theta.powi(4)
            + WAGNER_N[5] * theta.powf(7.5));
    Ok(CRITICAL_PRESSURE_MPA * exponent.exp() * 1.0e6)
}

/// 수심 h(m)에서의 전압 P_atm + ρgh (Pa)
pub fn static_pressure_pa(atmospheric_pa: f64, density: f64, depth_m: f64) -> f64 {
    atmospheric_pa + density * GRAVITY * depth_m
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn vapor_pressure_at_fifteen_degrees() {
        let pv = vapor_pressure_pa(15.0).expect("pv");
        assert!((pv - 1705.8).abs() < 5.0, "pv={pv}");
        let wagner = saturation_pressure_wagner_pa(15.0).expect("wagner");
        assert!((pv - wagner).abs() < 5.0);
    }

    #[test]
    fn wagner_rejects_supercritical() {
        assert!(saturation_pressure_wagner_pa(400.0).is_err());
    }
}
