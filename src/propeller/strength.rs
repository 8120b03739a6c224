//! 선급 규칙식에 의한 날개 두께 강도 검토 (0.25R, 0.6R).

use serde::{Deserialize, Serialize};

use super::optimum::OptimumDesignPoint;
use super::params::PropulsionParameters;
use super::series::BladeCount;
use super::{reference_chord_m, require_positive, Result};

/// 재료 비중 (망간 황동)
pub const MATERIAL_SPECIFIC_GRAVITY: f64 = 7.6;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StrengthInput {
    /// 경사각 ε (deg)
    pub rake_deg: f64,
    /// 재료 계수 K
    pub material_factor: f64,
}

impl Default for StrengthInput {
    fn default() -> Self {
        Self {
            rake_deg: 8.0,
            material_factor: 1.0,
        }
    }
}

/// 검토 단면의 규칙 계수 K1~K8.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectionCoefficients {
    pub r_over_r: f64,
    pub k: [f64; 8],
    /// b0.66R 대비 폭 비
    pub chord_factor: f64,
}

pub const SECTION_025R: SectionCoefficients = SectionCoefficients {
    r_over_r: 0.25,
    k: [634.0, 250.0, 1410.0, 4.0, 82.0, 34.0, 41.0, 380.0],
    chord_factor: 0.7212,
};

pub const SECTION_06R: SectionCoefficients = SectionCoefficients {
    r_over_r: 0.6,
    k: [207.0, 151.0, 635.0, 34.0, 23.0, 12.0, 65.0, 330.0],
    chord_factor: 0.9911,
};

/// 단면 하나의 검토 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SectionCheck {
    pub r_over_r: f64,
    pub chord_m: f64,
    pub a1: f64,
    pub y: f64,
    pub a2: f64,
    pub x: f64,
    /// 규칙 최소 두께 (mm)
    pub required_mm: f64,
    /// MAU 표준 두께 (mm)
    pub standard_mm: f64,
    /// 채택 두께 (mm)
    pub adopted_mm: f64,
    pub satisfied: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StrengthCheck {
    /// 주기 전달 출력 Ne = ηs·Ps (kW)
    pub engine_power_kw: f64,
    pub sections: [SectionCheck; 2],
}

impl StrengthCheck {
    pub fn all_satisfied(&self) -> bool {
        self.sections.iter().all(|s| s.satisfied)
    }
}

fn standard_thickness_mm(r_over_r: f64, diameter_m: f64) -> f64 {
    if r_over_r < 0.5 {
        // 0.2R과 0.3R 표준 두께의 평균
        (4.06 + 3.59) / 2.0 * diameter_m * 10.0
    } else {
        2.18 * diameter_m * 10.0
    }
}

fn check_section(
    c: &SectionCoefficients,
    optimum: &OptimumDesignPoint,
    blades: BladeCount,
    engine_power_kw: f64,
    rpm: f64,
    input: &StrengthInput,
) -> SectionCheck {
    let d = optimum.diameter_m;
    let z = blades.count() as f64;
    let b = c.chord_factor * reference_chord_m(d, optimum.blade_area_ratio(), blades);
    let dp = 1.0 / optimum.pitch_ratio;
    let eps = input.rake_deg;
    let [k1, k2, k3, k4, k5, k6, k7, k8] = c.k;

    let a1 = dp * (k1 - k2 * dp) + k3 * dp - k4;
    let y = 1.36 * a1 * engine_power_kw / (z * b * rpm);
    let a2 = dp * (k5 + k6 * eps) + k7 * eps + k8;
    let x = a2 * MATERIAL_SPECIFIC_GRAVITY * optimum.blade_area_ratio() * rpm.powi(2) * d.powi(3)
        / (1e10 * z * b);

    let margin = input.material_factor - x;
    let required_mm = if margin > 0.0 && y > 0.0 {
        (y / margin).sqrt()
    } else {
        0.0
    };
    let standard_mm = standard_thickness_mm(c.r_over_r, d);
    SectionCheck {
        r_over_r: c.r_over_r,
        chord_m: b,
        a1,
        y,
        a2,
        x,
        required_mm,
        standard_mm,
        adopted_mm: standard_mm.max(required_mm),
        satisfied: standard_mm >= required_mm,
    }
}

/// 0.25R과 0.6R에서 규칙 최소 두께와 MAU 표준 두께를 비교한다.
pub fn check_strength(
    optimum: &OptimumDesignPoint,
    params: &PropulsionParameters,
    blades: BladeCount,
    input: &StrengthInput,
) -> Result<StrengthCheck> {
    params.validate()?;
    require_positive("직경", optimum.diameter_m)?;
    require_positive("P/D", optimum.pitch_ratio)?;
    require_positive("면적비", optimum.blade_area_ratio())?;
    require_positive("재료 계수", input.material_factor)?;

    let ne = params.shaft_efficiency * params.shaft_power_kw;
    let sections = [SECTION_025R, SECTION_06R]
        .map(|c| check_section(&c, optimum, blades, ne, params.rpm, input));
    for s in &sections {
        if !s.satisfied {
            tracing::warn!(
                r = s.r_over_r,
                required = s.required_mm,
                standard = s.standard_mm,
                "standard thickness below rule minimum"
            );
        }
    }
    Ok(StrengthCheck {
        engine_power_kw: ne,
        sections,
    })
}
