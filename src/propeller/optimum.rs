//! 소요 면적비 곡선과 항등선의 교점에서 최적 요소를 결정한다.

use serde::Serialize;
use tracing::{debug, warn};

use crate::numeric::{linspace, Interpolant};

use super::cavitation::CavitationResult;
use super::{DesignError, Result};

/// 후보 구간을 나누는 표본 수.
pub const OPTIMUM_SAMPLES: usize = 1001;

/// 선택된 최적 설계점. 후속 단계는 모두 이 값만 읽는다.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OptimumDesignPoint {
    /// 선택된 전개면적비 (후보 공칭값 범위 안)
    pub area_ratio: f64,
    /// 그 점에서의 소요 면적비 f_AE(x)
    pub required_area_ratio: f64,
    pub pitch_ratio: f64,
    pub diameter_m: f64,
    pub eta0: f64,
    pub speed_kn: f64,
    /// 후보 구간 안에서 f_AE(x) − x 가 실제로 부호를 바꾸는지
    pub crossing_found: bool,
    pub warnings: Vec<String>,
}

impl OptimumDesignPoint {
    /// 후속 단계가 쓰는 전개면적비 f_AE(x). 교점이 있으면 x와 같다.
    pub fn blade_area_ratio(&self) -> f64 {
        self.required_area_ratio
    }
}

/// 공동 검토 결과(2행 이상)로부터 최적점을 찾는다.
pub fn select_optimum(rows: &[CavitationResult]) -> Result<OptimumDesignPoint> {
    if rows.len() < 2 {
        return Err(DesignError::InvalidInput(format!(
            "최적 요소 결정에는 후보가 2개 이상 필요합니다 (현재 {})",
            rows.len()
        )));
    }
    let mut sorted: Vec<&CavitationResult> = rows.iter().collect();
    sorted.sort_by(|a, b| a.area_ratio.total_cmp(&b.area_ratio));

    let x: Vec<f64> = sorted.iter().map(|r| r.area_ratio).collect();
    let column = |f: fn(&CavitationResult) -> f64| -> Vec<f64> { sorted.iter().map(|r| f(r)).collect() };
    let f_ae = Interpolant::new(&x, &column(|r| r.required_area_ratio))?;
    let f_pd = Interpolant::new(&x, &column(|r| r.pitch_ratio))?;
    let f_d = Interpolant::new(&x, &column(|r| r.diameter_m))?;
    let f_eta = Interpolant::new(&x, &column(|r| r.eta0))?;
    let f_v = Interpolant::new(&x, &column(|r| r.speed_kn))?;

    let (lo, hi) = f_ae.domain();
    let grid = linspace(lo, hi, OPTIMUM_SAMPLES);
    let gaps: Vec<f64> = grid.iter().map(|&xi| f_ae.eval(xi) - xi).collect();

    let mut best = 0;
    for (i, gap) in gaps.iter().enumerate() {
        if gap.abs() < gaps[best].abs() {
            best = i;
        }
    }
    let crossing_found = gaps.windows(2).any(|w| w[0] == 0.0 || w[0] * w[1] < 0.0)
        || gaps.last().is_some_and(|g| *g == 0.0);

    let chosen = grid[best];
    let mut warnings = Vec::new();
    if !crossing_found {
        let msg = format!(
            "소요 면적비 곡선이 [{lo}, {hi}] 구간에서 항등선과 만나지 않아 가장 가까운 점 {chosen:.4}를 선택했습니다."
        );
        warn!(chosen, "no identity-line crossing inside candidate span");
        warnings.push(msg);
    }

    let point = OptimumDesignPoint {
        area_ratio: chosen,
        required_area_ratio: f_ae.eval(chosen),
        pitch_ratio: f_pd.eval(chosen),
        diameter_m: f_d.eval(chosen),
        eta0: f_eta.eval(chosen),
        speed_kn: f_v.eval(chosen),
        crossing_found,
        warnings,
    };
    debug!(?point, "optimum selected");
    Ok(point)
}
