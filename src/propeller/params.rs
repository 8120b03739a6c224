//! 선박 추진 조건과 유효마력 곡선.

use serde::{Deserialize, Serialize};

use crate::numeric::Interpolant;
use crate::units::rps_from_rpm;

use super::{DesignError, Result};

/// 추진 계통 입력. 한 번 파이프라인에 들어가면 변경하지 않는다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PropulsionParameters {
    /// 주기 출력 Ps (kW)
    pub shaft_power_kw: f64,
    /// 축 회전수 N (rpm)
    pub rpm: f64,
    /// 축계 효율 ηs
    pub shaft_efficiency: f64,
    /// 상대 회전 효율 ηR
    pub relative_rotative_efficiency: f64,
    /// 반류계수 w
    pub wake_fraction: f64,
    /// 추력감소계수 t
    pub thrust_deduction: f64,
    /// 설계 속력 (kn)
    pub design_speed_kn: f64,
    /// 출력 여유 (기본 10%)
    #[serde(default = "default_power_reserve")]
    pub power_reserve: f64,
}

fn default_power_reserve() -> f64 {
    0.10
}

impl Default for PropulsionParameters {
    fn default() -> Self {
        Self {
            shaft_power_kw: 6222.0,
            rpm: 155.0,
            shaft_efficiency: 0.97,
            relative_rotative_efficiency: 1.0,
            wake_fraction: 0.35,
            thrust_deduction: 0.21,
            design_speed_kn: 15.0,
            power_reserve: default_power_reserve(),
        }
    }
}

impl PropulsionParameters {
    /// 범위를 검사한다. 계산 전에 항상 호출된다.
    pub fn validate(&self) -> Result<()> {
        let positive = [
            ("주기 출력", self.shaft_power_kw),
            ("회전수", self.rpm),
            ("설계 속력", self.design_speed_kn),
        ];
        for (name, v) in positive {
            if !v.is_finite() || v <= 0.0 {
                return Err(DesignError::InvalidInput(format!("{name}은(는) 양수여야 합니다: {v}")));
            }
        }
        let efficiencies = [
            ("축계 효율", self.shaft_efficiency),
            ("상대 회전 효율", self.relative_rotative_efficiency),
        ];
        for (name, v) in efficiencies {
            if !v.is_finite() || v <= 0.0 || v > 1.0 {
                return Err(DesignError::InvalidInput(format!("{name}은(는) (0, 1] 범위여야 합니다: {v}")));
            }
        }
        let fractions = [
            ("반류계수 w", self.wake_fraction),
            ("추력감소계수 t", self.thrust_deduction),
            ("출력 여유", self.power_reserve),
        ];
        for (name, v) in fractions {
            if !v.is_finite() || !(0.0..1.0).contains(&v) {
                return Err(DesignError::InvalidInput(format!("{name}은(는) [0, 1) 범위여야 합니다: {v}")));
            }
        }
        Ok(())
    }

    /// 전달마력 P_D = Ps·(1 − 여유)·ηs·ηR (kW)
    pub fn delivered_power_kw(&self) -> f64 {
        self.shaft_power_kw
            * (1.0 - self.power_reserve)
            * self.shaft_efficiency
            * self.relative_rotative_efficiency
    }

    /// 선체 효율 η_H = (1 − t)/(1 − w)
    pub fn hull_efficiency(&self) -> f64 {
        (1.0 - self.thrust_deduction) / (1.0 - self.wake_fraction)
    }

    /// 초당 회전수 n (rps)
    pub fn rps(&self) -> f64 {
        rps_from_rpm(self.rpm)
    }
}

/// 속력–유효마력(PE) 표본. 속력은 엄격히 증가해야 한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawResistanceCurve")]
pub struct ResistanceCurve {
    speeds_kn: Vec<f64>,
    powers_kw: Vec<f64>,
}

#[derive(Deserialize)]
struct RawResistanceCurve {
    speeds_kn: Vec<f64>,
    powers_kw: Vec<f64>,
}

impl TryFrom<RawResistanceCurve> for ResistanceCurve {
    type Error = DesignError;

    fn try_from(raw: RawResistanceCurve) -> Result<Self> {
        ResistanceCurve::new(raw.speeds_kn, raw.powers_kw)
    }
}

impl Default for ResistanceCurve {
    fn default() -> Self {
        Self {
            speeds_kn: vec![12.0, 13.0, 14.0, 15.0, 16.0, 17.0],
            powers_kw: vec![1497.0, 1953.0, 2505.0, 3213.0, 4070.0, 5161.0],
        }
    }
}

impl ResistanceCurve {
    pub fn new(speeds_kn: Vec<f64>, powers_kw: Vec<f64>) -> Result<Self> {
        if speeds_kn.len() != powers_kw.len() {
            return Err(DesignError::InvalidInput(format!(
                "속력과 유효마력 개수가 다릅니다: {} vs {}",
                speeds_kn.len(),
                powers_kw.len()
            )));
        }
        if speeds_kn.len() < 2 {
            return Err(DesignError::InvalidInput(
                "유효마력 곡선은 2점 이상이어야 합니다".into(),
            ));
        }
        for (&v, &pe) in speeds_kn.iter().zip(&powers_kw) {
            if !v.is_finite() || v <= 0.0 {
                return Err(DesignError::InvalidInput(format!("속력은 양수여야 합니다: {v}")));
            }
            if !pe.is_finite() || pe <= 0.0 {
                return Err(DesignError::InvalidInput(format!("유효마력은 양수여야 합니다: {pe}")));
            }
        }
        if speeds_kn.windows(2).any(|w| w[1] <= w[0]) {
            return Err(DesignError::InvalidInput(
                "속력은 엄격히 증가해야 합니다".into(),
            ));
        }
        Ok(Self {
            speeds_kn,
            powers_kw,
        })
    }

    /// "12,13,14;1497,1953,2505" 형식의 문자열을 읽는다.
    pub fn parse(text: &str) -> Result<Self> {
        let (speeds, powers) = text.split_once(';').ok_or_else(|| {
            DesignError::InvalidInput("속력과 유효마력을 ';'로 구분해야 합니다".into())
        })?;
        Self::new(parse_list(speeds)?, parse_list(powers)?)
    }

    pub fn speeds_kn(&self) -> &[f64] {
        &self.speeds_kn
    }

    pub fn powers_kw(&self) -> &[f64] {
        &self.powers_kw
    }

    /// 표본 속력 범위 (최소, 최대).
    pub fn speed_range(&self) -> (f64, f64) {
        (self.speeds_kn[0], self.speeds_kn[self.speeds_kn.len() - 1])
    }

    pub fn interpolant(&self) -> Result<Interpolant> {
        Ok(Interpolant::new(&self.speeds_kn, &self.powers_kw)?)
    }
}

fn parse_list(text: &str) -> Result<Vec<f64>> {
    text.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| {
            s.parse::<f64>()
                .map_err(|_| DesignError::InvalidInput(format!("숫자가 아닙니다: '{s}'")))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn delivered_power_keeps_ten_percent_reserve() {
        let p = PropulsionParameters::default();
        assert!((p.delivered_power_kw() - 6222.0 * 0.9 * 0.97).abs() < 1e-9);
        assert!((p.hull_efficiency() - 0.79 / 0.65).abs() < 1e-12);
    }

    #[test]
    fn rejects_wake_fraction_of_one() {
        let p = PropulsionParameters {
            wake_fraction: 1.0,
            ..Default::default()
        };
        assert!(matches!(p.validate(), Err(DesignError::InvalidInput(_))));
    }

    #[test]
    fn parses_semicolon_format() {
        let c = ResistanceCurve::parse("12, 13,14 ; 1497,1953,2505").expect("parse");
        assert_eq!(c.speeds_kn(), &[12.0, 13.0, 14.0]);
        assert!(ResistanceCurve::parse("12,13;1497").is_err());
        assert!(ResistanceCurve::parse("13,12;1497,1953").is_err());
        assert!(ResistanceCurve::parse("12,x;1,2").is_err());
    }
}
