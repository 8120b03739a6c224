//! 날개·보스 질량과 질량 관성 모멘트.
//! 단면적 적분은 9개 표준 단면에 고정 심프슨 승수를 곱해 합산한다.

use serde::{Deserialize, Serialize};

use super::optimum::OptimumDesignPoint;
use super::params::PropulsionParameters;
use super::pitch::station;
use super::series::BladeCount;
use super::tables::{RadialStation, MAU_STATIONS};
use super::{reference_chord_m, require_positive, DesignError, Result};

/// 관성 모멘트 식이 바뀌는 보스비 경계
pub const HUB_RATIO_THRESHOLD: f64 = 0.18;
const MIN_SHAFT_DIAMETER_M: f64 = 0.01;

/// 질량 계산 입력.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MassInput {
    /// 보스비 d/D
    pub hub_ratio: f64,
    /// 보스 길이 Lk (m)
    pub hub_length_m: f64,
    /// 보스 중앙 축경 d0 실측값 (m). 없으면 경험식으로 추정한다.
    pub shaft_diameter_m: Option<f64>,
    /// 재료 밀도 (kg/m³)
    pub density: f64,
    /// 재료 계수 K
    pub material_factor: f64,
}

impl Default for MassInput {
    fn default() -> Self {
        Self {
            hub_ratio: 0.18,
            hub_length_m: 0.2,
            shaft_diameter_m: None,
            density: 8400.0,
            material_factor: 1.0,
        }
    }
}

/// 단면 한 행의 계산값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct StationRow {
    pub r_over_r: f64,
    pub chord_m: f64,
    pub thickness_m: f64,
    /// b × t
    pub chord_thickness: f64,
    /// 단면적 S = b·t·Ka
    pub section_area_m2: f64,
    /// S × 심프슨 승수
    pub simpson_term: f64,
    /// 위 값 × r/R
    pub moment_term: f64,
    /// 위 값 × (r/R)²
    pub second_moment_term: f64,
}

/// 단면 적분 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StationIntegral {
    pub rows: Vec<StationRow>,
    pub simpson_sum: f64,
    pub moment_sum: f64,
    pub second_moment_sum: f64,
}

impl StationIntegral {
    /// 단면적 분포의 반경 방향 도심 (r/R). 합이 0이면 None.
    pub fn radial_centroid(&self) -> Option<f64> {
        (self.simpson_sum > 0.0).then(|| self.moment_sum / self.simpson_sum)
    }
}

/// 표준 단면들에 대해 심프슨 가중 합을 구한다. 합산 순서는 결과에 영향이 없다.
pub fn integrate_stations(
    stations: &[RadialStation],
    diameter_m: f64,
    reference_chord_m: f64,
) -> StationIntegral {
    let rows: Vec<StationRow> = stations
        .iter()
        .map(|s| {
            let chord_m = s.width_pct / 100.0 * reference_chord_m;
            let thickness_m = s.thickness_pct / 100.0 * diameter_m;
            let chord_thickness = chord_m * thickness_m;
            let section_area_m2 = chord_thickness * s.area_coeff;
            let simpson_term = section_area_m2 * s.simpson;
            StationRow {
                r_over_r: s.r_over_r,
                chord_m,
                thickness_m,
                chord_thickness,
                section_area_m2,
                simpson_term,
                moment_term: simpson_term * s.r_over_r,
                second_moment_term: simpson_term * s.r_over_r * s.r_over_r,
            }
        })
        .collect();
    let simpson_sum = rows.iter().map(|r| r.simpson_term).sum();
    let moment_sum = rows.iter().map(|r| r.moment_term).sum();
    let second_moment_sum = rows.iter().map(|r| r.second_moment_term).sum();
    StationIntegral {
        rows,
        simpson_sum,
        moment_sum,
        second_moment_sum,
    }
}

/// 질량 및 관성 모멘트 결과.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MassProperties {
    pub diameter_m: f64,
    pub area_ratio: f64,
    /// 최대 날개 폭 b_max = 0.66R 기준 폭 (m)
    pub max_chord_m: f64,
    pub t02_m: f64,
    pub t06_m: f64,
    pub hub_diameter_m: f64,
    /// 보스 중앙 축경 d0 (m)
    pub shaft_diameter_m: f64,
    /// 보스 질량 계수 0.88 − 0.6·d0/d (절단 후)
    pub hub_coefficient: f64,
    pub blade_mass_kg: f64,
    pub hub_mass_kg: f64,
    pub total_mass_kg: f64,
    /// 질량 관성 모멘트 (kg·m²)
    pub inertia_kg_m2: f64,
    pub stations: StationIntegral,
}

/// 보스 중앙 축경 d0 추정. 실측값이 있으면 그대로 쓰고, 하한 0.01 m.
pub fn shaft_centre_diameter_m(
    delivered_power_kw: f64,
    rpm: f64,
    hub_length_m: f64,
    material_factor: f64,
    measured: Option<f64>,
) -> f64 {
    let d0 = match measured {
        Some(d0) => d0,
        None if delivered_power_kw > 0.0 && rpm > 0.0 => {
            0.045 + 0.12 * (delivered_power_kw / rpm).cbrt() - material_factor * hub_length_m / 2.0
        }
        None => 2.0 * hub_length_m / 13.0,
    };
    d0.max(MIN_SHAFT_DIAMETER_M)
}

/// 최적점의 직경·면적비로 질량과 관성 모멘트를 계산한다.
pub fn mass_properties(
    optimum: &OptimumDesignPoint,
    params: &PropulsionParameters,
    blades: BladeCount,
    input: &MassInput,
) -> Result<MassProperties> {
    let d = optimum.diameter_m;
    let ae = optimum.blade_area_ratio();
    require_positive("직경", d)?;
    require_positive("면적비", ae)?;
    require_positive("재료 밀도", input.density)?;
    require_positive("보스 길이", input.hub_length_m)?;
    if !input.hub_ratio.is_finite() || input.hub_ratio <= 0.0 || input.hub_ratio >= 1.0 {
        return Err(DesignError::InvalidInput(format!(
            "보스비는 (0, 1) 범위여야 합니다: {}",
            input.hub_ratio
        )));
    }
    if let Some(d0) = input.shaft_diameter_m {
        require_positive("축경", d0)?;
    }

    let rho = input.density;
    let z = blades.count() as f64;
    let b_max = reference_chord_m(d, ae, blades);
    let t02 = station(0.2)?.thickness_pct / 100.0 * d;
    let t06 = station(0.6)?.thickness_pct / 100.0 * d;
    let thickness_term = 0.5 * t02 + t06;

    let blade_mass = 0.169 * rho * z * b_max * thickness_term * (1.0 - input.hub_ratio) * d;

    let hub_d = input.hub_ratio * d;
    let d0 = shaft_centre_diameter_m(
        params.delivered_power_kw(),
        params.rpm,
        input.hub_length_m,
        input.material_factor,
        input.shaft_diameter_m,
    );
    let hub_coefficient = (0.88 - 0.6 * d0 / hub_d).clamp(0.1, 1.0);
    let hub_mass = hub_coefficient * input.hub_length_m * rho * hub_d * hub_d;

    let inertia_factor = if input.hub_ratio <= HUB_RATIO_THRESHOLD {
        0.0948
    } else {
        0.0648 + 0.167 * input.hub_ratio
    };
    let inertia = inertia_factor * rho * z * b_max * thickness_term * d.powi(3);

    let stations = integrate_stations(&MAU_STATIONS, d, b_max);

    tracing::debug!(blade_mass, hub_mass, inertia, "mass properties computed");
    Ok(MassProperties {
        diameter_m: d,
        area_ratio: ae,
        max_chord_m: b_max,
        t02_m: t02,
        t06_m: t06,
        hub_diameter_m: hub_d,
        shaft_diameter_m: d0,
        hub_coefficient,
        blade_mass_kg: blade_mass,
        hub_mass_kg: hub_mass,
        total_mass_kg: blade_mass + hub_mass,
        inertia_kg_m2: inertia,
        stations,
    })
}
