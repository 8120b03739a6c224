//! 항행 특성: 회전수 × 선속 격자에서 추력마력 곡선을 만들고
//! 적재 상태별 유효마력 곡선과의 교점을 찾는다.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::fluid::SEAWATER_DENSITY;
use crate::numeric::{brent, scan_sign_changes, Interpolant, SolverConfig};
use crate::units::{advance_speed_mps, rps_from_rpm, KNOT_MPS};

use super::open_water::PerformanceModel;
use super::optimum::OptimumDesignPoint;
use super::params::{PropulsionParameters, ResistanceCurve};
use super::{grid_count, require_positive, DesignError, Result};

/// 교점 탐색 격자 수
pub const INTERSECTION_SCAN_POINTS: usize = 200;
/// 같은 상태에서 이보다 가까운 교점은 하나로 본다 (kn)
pub const DUPLICATE_TOLERANCE_KN: f64 = 0.5;
/// 전진계수 상한
pub const MAX_ADVANCE_RATIO: f64 = 1.5;

/// 적재 상태와 유효마력 배율.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LoadingCondition {
    pub name: String,
    pub scale: f64,
}

impl LoadingCondition {
    pub fn new(name: &str, scale: f64) -> Self {
        Self {
            name: name.to_string(),
            scale,
        }
    }
}

pub fn default_conditions() -> Vec<LoadingCondition> {
    vec![
        LoadingCondition::new("만재", 1.0),
        LoadingCondition::new("밸러스트(85%)", 0.85),
        LoadingCondition::new("과적(120%)", 1.2),
    ]
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VoyageInput {
    /// 검토 회전수. 비어 있으면 N+10, N, N−10.
    #[serde(default)]
    pub rpms: Vec<f64>,
    pub speed_min_kn: f64,
    pub speed_max_kn: f64,
    pub speed_step_kn: f64,
    pub density: f64,
    pub conditions: Vec<LoadingCondition>,
}

impl Default for VoyageInput {
    fn default() -> Self {
        Self {
            rpms: Vec::new(),
            speed_min_kn: 12.0,
            speed_max_kn: 17.0,
            speed_step_kn: 1.0,
            density: SEAWATER_DENSITY,
            conditions: default_conditions(),
        }
    }
}

/// 격자 한 점의 값.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct VoyagePoint {
    pub speed_kn: f64,
    pub advance_speed_mps: f64,
    pub j: f64,
    pub kt: f64,
    pub kq: f64,
    /// 추력 (kN)
    pub thrust_kn: f64,
    /// 유효 추력마력 (kW)
    pub pte_kw: f64,
    /// 토크 (kN·m)
    pub torque_knm: f64,
    /// 전달마력 (kW)
    pub delivered_power_kw: f64,
    /// 소요 주기 출력 (kW, 여유 포함)
    pub shaft_power_kw: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RpmCurve {
    pub rpm: f64,
    pub points: Vec<VoyagePoint>,
}

/// 추력마력 곡선과 유효마력 곡선의 교점.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Intersection {
    pub rpm: f64,
    pub condition: String,
    pub speed_kn: f64,
    pub pte_kw: f64,
    pub shaft_power_kw: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VoyageCurve {
    pub curves: Vec<RpmCurve>,
    pub intersections: Vec<Intersection>,
    /// 가장 빠른 교점
    pub best: Option<Intersection>,
}

fn speed_grid(input: &VoyageInput) -> Result<Vec<f64>> {
    if !(input.speed_min_kn < input.speed_max_kn) {
        return Err(DesignError::InvalidInput(format!(
            "속력 최소값이 최대값보다 작아야 합니다 ({} ~ {})",
            input.speed_min_kn, input.speed_max_kn
        )));
    }
    require_positive("속력 최소값", input.speed_min_kn)?;
    require_positive("속력 간격", input.speed_step_kn)?;
    let count = grid_count(
        "속력",
        input.speed_min_kn,
        input.speed_max_kn,
        input.speed_step_kn,
    )?;
    Ok((0..count)
        .map(|k| input.speed_min_kn + k as f64 * input.speed_step_kn)
        .collect())
}

fn resolve_rpms(input: &VoyageInput, params: &PropulsionParameters) -> Result<Vec<f64>> {
    let rpms = if input.rpms.is_empty() {
        vec![params.rpm + 10.0, params.rpm, params.rpm - 10.0]
    } else {
        input.rpms.clone()
    };
    for &rpm in &rpms {
        require_positive("검토 회전수", rpm)?;
    }
    Ok(rpms)
}

/// 한 회전수에서 선속 격자를 따라 성능을 계산한다.
fn rpm_curve(
    rpm: f64,
    speeds: &[f64],
    optimum: &OptimumDesignPoint,
    params: &PropulsionParameters,
    model: &PerformanceModel,
    density: f64,
) -> RpmCurve {
    let n = rps_from_rpm(rpm);
    let d = optimum.diameter_m;
    let points = speeds
        .iter()
        .map(|&v| {
            let va = advance_speed_mps(v, params.wake_fraction);
            let j = (va / (n * d)).clamp(0.0, MAX_ADVANCE_RATIO);
            let kt = model.kt(j, optimum.pitch_ratio, optimum.blade_area_ratio());
            let kq = model.kq(j, optimum.pitch_ratio, optimum.blade_area_ratio());
            let thrust = kt * density * n * n * d.powi(4) / 1000.0;
            let pte = thrust * (1.0 - params.thrust_deduction) * KNOT_MPS * v;
            let torque = kq * density * n * n * d.powi(5) / 1000.0;
            let delivered = 2.0 * std::f64::consts::PI * n * torque;
            let shaft = delivered / (1.0 - params.power_reserve)
                / (params.relative_rotative_efficiency * params.shaft_efficiency);
            VoyagePoint {
                speed_kn: v,
                advance_speed_mps: va,
                j,
                kt,
                kq,
                thrust_kn: thrust,
                pte_kw: pte,
                torque_knm: torque,
                delivered_power_kw: delivered,
                shaft_power_kw: shaft,
            }
        })
        .collect();
    RpmCurve { rpm, points }
}

/// 구간 안의 근을 찾아 [`DUPLICATE_TOLERANCE_KN`] 이내로 붙은 것은 먼저 찾은 하나만 남긴다.
fn distinct_roots<F>(f: F, (v_min, v_max): (f64, f64)) -> Vec<f64>
where
    F: Fn(f64) -> f64,
{
    let mut roots: Vec<f64> = Vec::new();
    for (a, b) in scan_sign_changes(&f, v_min, v_max, INTERSECTION_SCAN_POINTS) {
        let root = if a == b {
            a
        } else {
            match brent(&f, a, b, SolverConfig::default()) {
                Some(r) if r.converged => r.root,
                _ => continue,
            }
        };
        if root < v_min || root > v_max {
            continue;
        }
        if roots.iter().any(|r| (r - root).abs() < DUPLICATE_TOLERANCE_KN) {
            continue;
        }
        roots.push(root);
    }
    roots
}

fn find_intersections(
    curve: &RpmCurve,
    pe: &Interpolant,
    conditions: &[LoadingCondition],
    (v_min, v_max): (f64, f64),
) -> Result<Vec<Intersection>> {
    let speeds: Vec<f64> = curve.points.iter().map(|p| p.speed_kn).collect();
    let pte = Interpolant::new(&speeds, &curve.points.iter().map(|p| p.pte_kw).collect::<Vec<_>>())?;
    let ps = Interpolant::new(
        &speeds,
        &curve.points.iter().map(|p| p.shaft_power_kw).collect::<Vec<_>>(),
    )?;

    let mut found = Vec::new();
    for condition in conditions {
        let gap = |v: f64| pte.eval(v) - condition.scale * pe.eval(v);
        for root in distinct_roots(gap, (v_min, v_max)) {
            found.push(Intersection {
                rpm: curve.rpm,
                condition: condition.name.clone(),
                speed_kn: root,
                pte_kw: pte.eval(root),
                shaft_power_kw: ps.eval(root),
            });
        }
    }
    Ok(found)
}

/// 최적점 프로펠러의 항행 특성 곡선과 교점을 계산한다.
pub fn voyage_curve(
    optimum: &OptimumDesignPoint,
    params: &PropulsionParameters,
    model: &PerformanceModel,
    resistance: &ResistanceCurve,
    input: &VoyageInput,
) -> Result<VoyageCurve> {
    params.validate()?;
    require_positive("직경", optimum.diameter_m)?;
    require_positive("해수 밀도", input.density)?;
    for c in &input.conditions {
        require_positive("적재 배율", c.scale)?;
    }
    let speeds = speed_grid(input)?;
    let rpms = resolve_rpms(input, params)?;
    let pe = resistance.interpolant()?;
    let window = (input.speed_min_kn, input.speed_max_kn);

    let mut curves = Vec::with_capacity(rpms.len());
    let mut intersections = Vec::new();
    for rpm in rpms {
        let curve = rpm_curve(rpm, &speeds, optimum, params, model, input.density);
        if curve.points.len() >= 2 {
            intersections.extend(find_intersections(&curve, &pe, &input.conditions, window)?);
        }
        curves.push(curve);
    }

    let best = intersections
        .iter()
        .max_by(|a, b| a.speed_kn.total_cmp(&b.speed_kn))
        .cloned();
    debug!(count = intersections.len(), "voyage intersections found");
    Ok(VoyageCurve {
        curves,
        intersections,
        best,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn near_roots_collapse_to_one() {
        let roots = distinct_roots(|v| (v - 14.0) * (v - 14.3), (12.0, 17.0));
        assert_eq!(roots.len(), 1, "{roots:?}");
        assert!((roots[0] - 14.0).abs() < 1e-6, "{roots:?}");
    }

    #[test]
    fn separated_roots_are_kept() {
        let roots = distinct_roots(|v| (v - 13.0) * (v - 15.0), (12.0, 17.0));
        assert_eq!(roots.len(), 2, "{roots:?}");
        assert!((roots[0] - 13.0).abs() < 1e-6);
        assert!((roots[1] - 15.0).abs() < 1e-6);
    }

    #[test]
    fn roots_outside_window_are_dropped() {
        let roots = distinct_roots(|v| v - 20.0, (12.0, 17.0));
        assert!(roots.is_empty());
    }

    #[test]
    fn tiny_speed_step_is_rejected() {
        let input = VoyageInput {
            speed_step_kn: 1e-9,
            ..VoyageInput::default()
        };
        assert!(matches!(
            speed_grid(&input),
            Err(DesignError::InvalidInput(_))
        ));
    }
}
