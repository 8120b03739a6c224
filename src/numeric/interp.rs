//! 1차원 곡선 보간.
//! 생성 시 전략 목록을 앞에서부터 검사해 처음으로 적용 가능한 방식을 고정한다.
//! 적합된 보간기는 불변이며, 여러 질의점에서 재사용해도 안전하다.

use serde::Serialize;
use thiserror::Error;

/// 보간 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum Strategy {
    /// 자연 3차 스플라인 (양 끝 2차 도함수 0). 3점 이상 필요.
    NaturalCubic,
    /// 형상 보존 단조 3차 에르미트 (Fritsch–Carlson). 2점 이상 필요.
    MonotoneCubic,
    /// 단일 점 상수.
    Constant,
}

/// 기본 우선순위: 자연 3차 → 단조 3차 → 상수.
pub const DEFAULT_STRATEGIES: [Strategy; 3] = [
    Strategy::NaturalCubic,
    Strategy::MonotoneCubic,
    Strategy::Constant,
];

/// 실험 곡선처럼 진동을 피해야 하는 데이터용 우선순위.
pub const MONOTONE_FIRST: [Strategy; 2] = [Strategy::MonotoneCubic, Strategy::Constant];

/// 보간기 생성 오류.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum InterpError {
    #[error("보간 데이터가 비어 있습니다")]
    Empty,
    #[error("x/y 길이가 다릅니다 (x={x}, y={y})")]
    LengthMismatch { x: usize, y: usize },
    #[error("x 값이 엄격히 증가하지 않습니다 (index {0})")]
    NotIncreasing(usize),
    #[error("유한하지 않은 값이 포함되어 있습니다 (index {0})")]
    NonFinite(usize),
    #[error("적용 가능한 보간 전략이 없습니다 (점 {points}개)")]
    NoApplicableStrategy { points: usize },
}

#[derive(Debug, Clone)]
enum Fit {
    /// 각 절점의 2차 도함수
    Cubic(Vec<f64>),
    /// 각 절점의 기울기
    Hermite(Vec<f64>),
    Constant,
}

/// 적합이 끝난 1차원 보간기.
#[derive(Debug, Clone)]
pub struct Interpolant {
    xs: Vec<f64>,
    ys: Vec<f64>,
    strategy: Strategy,
    fit: Fit,
}

impl Interpolant {
    /// 기본 전략 순서로 보간기를 만든다.
    pub fn new(xs: &[f64], ys: &[f64]) -> Result<Self, InterpError> {
        Self::with_strategies(xs, ys, &DEFAULT_STRATEGIES)
    }

    /// 주어진 전략 순서로 보간기를 만든다.
    pub fn with_strategies(
        xs: &[f64],
        ys: &[f64],
        strategies: &[Strategy],
    ) -> Result<Self, InterpError> {
        validate(xs, ys)?;
        for &strategy in strategies {
            let fit = match strategy {
                Strategy::NaturalCubic => natural_second_derivatives(xs, ys).map(Fit::Cubic),
                Strategy::MonotoneCubic => monotone_slopes(xs, ys).map(Fit::Hermite),
                Strategy::Constant => (xs.len() == 1).then_some(Fit::Constant),
            };
            if let Some(fit) = fit {
                return Ok(Self {
                    xs: xs.to_vec(),
                    ys: ys.to_vec(),
                    strategy,
                    fit,
                });
            }
        }
        Err(InterpError::NoApplicableStrategy { points: xs.len() })
    }

    /// 실제로 선택된 보간 방식.
    pub fn strategy(&self) -> Strategy {
        self.strategy
    }

    /// 표본 x 범위 (최소, 최대).
    pub fn domain(&self) -> (f64, f64) {
        (self.xs[0], self.xs[self.xs.len() - 1])
    }

    pub fn contains(&self, x: f64) -> bool {
        let (lo, hi) = self.domain();
        x >= lo && x <= hi
    }

    /// x에서 값을 평가한다. 범위 밖은 가장자리 구간의 다항식으로 외삽한다.
    pub fn eval(&self, x: f64) -> f64 {
        let n = self.xs.len();
        if let Fit::Constant = self.fit {
            return self.ys[0];
        }
        let i = self
            .xs
            .partition_point(|&v| v <= x)
            .saturating_sub(1)
            .min(n - 2);
        let (x0, x1) = (self.xs[i], self.xs[i + 1]);
        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        let h = x1 - x0;
        match &self.fit {
            Fit::Cubic(m) => {
                let a = (x1 - x) / h;
                let b = (x - x0) / h;
                a * y0
                    + b * y1
                    + ((a.powi(3) - a) * m[i] + (b.powi(3) - b) * m[i + 1]) * h * h / 6.0
            }
            Fit::Hermite(d) => {
                let t = (x - x0) / h;
                let t2 = t * t;
                let t3 = t2 * t;
                let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
                let h10 = t3 - 2.0 * t2 + t;
                let h01 = -2.0 * t3 + 3.0 * t2;
                let h11 = t3 - t2;
                h00 * y0 + h10 * h * d[i] + h01 * y1 + h11 * h * d[i + 1]
            }
            Fit::Constant => y0,
        }
    }
}

fn validate(xs: &[f64], ys: &[f64]) -> Result<(), InterpError> {
    if xs.is_empty() {
        return Err(InterpError::Empty);
    }
    if xs.len() != ys.len() {
        return Err(InterpError::LengthMismatch {
            x: xs.len(),
            y: ys.len(),
        });
    }
    for (i, (&x, &y)) in xs.iter().zip(ys).enumerate() {
        if !x.is_finite() || !y.is_finite() {
            return Err(InterpError::NonFinite(i));
        }
        if i > 0 && x <= xs[i - 1] {
            return Err(InterpError::NotIncreasing(i));
        }
    }
    Ok(())
}

/// 자연 경계조건 3중대각 방정식을 Thomas 알고리즘으로 푼다.
fn natural_second_derivatives(xs: &[f64], ys: &[f64]) -> Option<Vec<f64>> {
    let n = xs.len();
    if n < 3 {
        return None;
    }
    let size = n - 2;
    let mut c_prime = vec![0.0; size];
    let mut d_prime = vec![0.0; size];
    for k in 0..size {
        let i = k + 1;
        let h0 = xs[i] - xs[i - 1];
        let h1 = xs[i + 1] - xs[i];
        let rhs = 6.0 * ((ys[i + 1] - ys[i]) / h1 - (ys[i] - ys[i - 1]) / h0);
        let diag = 2.0 * (h0 + h1);
        let (denom, carried) = if k == 0 {
            (diag, 0.0)
        } else {
            (diag - h0 * c_prime[k - 1], h0 * d_prime[k - 1])
        };
        if denom == 0.0 {
            return None;
        }
        c_prime[k] = h1 / denom;
        d_prime[k] = (rhs - carried) / denom;
    }

    let mut m = vec![0.0; n];
    m[size] = d_prime[size - 1];
    for k in (0..size - 1).rev() {
        m[k + 1] = d_prime[k] - c_prime[k] * m[k + 2];
    }
    m.iter().all(|v| v.is_finite()).then_some(m)
}

fn monotone_slopes(xs: &[f64], ys: &[f64]) -> Option<Vec<f64>> {
    let n = xs.len();
    if n < 2 {
        return None;
    }
    let h: Vec<f64> = xs.windows(2).map(|w| w[1] - w[0]).collect();
    let delta: Vec<f64> = (0..n - 1).map(|i| (ys[i + 1] - ys[i]) / h[i]).collect();
    if n == 2 {
        return Some(vec![delta[0]; 2]);
    }

    let mut d = vec![0.0; n];
    for k in 1..n - 1 {
        if delta[k - 1] * delta[k] <= 0.0 {
            continue;
        }
        let w1 = 2.0 * h[k] + h[k - 1];
        let w2 = h[k] + 2.0 * h[k - 1];
        d[k] = (w1 + w2) / (w1 / delta[k - 1] + w2 / delta[k]);
    }
    d[0] = end_slope(h[0], h[1], delta[0], delta[1]);
    d[n - 1] = end_slope(h[n - 2], h[n - 3], delta[n - 2], delta[n - 3]);
    d.iter().all(|v| v.is_finite()).then_some(d)
}

/// 끝점 3점 공식. 부호가 뒤집히면 0, 과도하면 3δ로 제한한다.
fn end_slope(h0: f64, h1: f64, m0: f64, m1: f64) -> f64 {
    let d = ((2.0 * h0 + h1) * m0 - h0 * m1) / (h0 + h1);
    if d.signum() != m0.signum() || m0 == 0.0 {
        0.0
    } else if m0.signum() != m1.signum() && d.abs() > 3.0 * m0.abs() {
        3.0 * m0
    } else {
        d
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn natural_cubic_reproduces_linear_data() {
        let xs = [0.0, 1.0, 2.5, 4.0];
        let ys: Vec<f64> = xs.iter().map(|x| 3.0 * x - 1.0).collect();
        let f = Interpolant::new(&xs, &ys).expect("fit");
        assert_eq!(f.strategy(), Strategy::NaturalCubic);
        for x in [0.3, 1.7, 3.9, 5.0, -1.0] {
            assert!((f.eval(x) - (3.0 * x - 1.0)).abs() < 1e-9, "x={x}");
        }
    }

    #[test]
    fn passes_through_knots() {
        let xs = [1.0, 2.0, 3.0, 5.0, 8.0];
        let ys = [2.0, 1.0, 4.0, 3.0, 7.0];
        for strategies in [&DEFAULT_STRATEGIES[..], &MONOTONE_FIRST[..]] {
            let f = Interpolant::with_strategies(&xs, &ys, strategies).expect("fit");
            for (x, y) in xs.iter().zip(ys) {
                assert!((f.eval(*x) - y).abs() < 1e-9);
            }
        }
    }

    #[test]
    fn two_points_fall_back_to_monotone() {
        let f = Interpolant::new(&[0.0, 2.0], &[1.0, 5.0]).expect("fit");
        assert_eq!(f.strategy(), Strategy::MonotoneCubic);
        assert!((f.eval(1.0) - 3.0).abs() < 1e-12);
        assert!((f.eval(3.0) - 7.0).abs() < 1e-12);
    }

    #[test]
    fn single_point_is_constant() {
        let f = Interpolant::new(&[0.5], &[0.2]).expect("fit");
        assert_eq!(f.strategy(), Strategy::Constant);
        assert_eq!(f.eval(10.0), 0.2);
    }

    #[test]
    fn monotone_fit_does_not_overshoot() {
        let xs = [0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = [0.0, 0.0, 1.0, 1.0, 1.0];
        let f = Interpolant::with_strategies(&xs, &ys, &MONOTONE_FIRST).expect("fit");
        let mut prev = f.eval(0.0);
        for k in 1..=400 {
            let v = f.eval(k as f64 * 0.01);
            assert!(v >= prev - 1e-12 && v <= 1.0 + 1e-12);
            prev = v;
        }
    }

    #[test]
    fn rejects_bad_input() {
        assert_eq!(Interpolant::new(&[], &[]).unwrap_err(), InterpError::Empty);
        assert_eq!(
            Interpolant::new(&[0.0, 1.0], &[1.0]).unwrap_err(),
            InterpError::LengthMismatch { x: 2, y: 1 }
        );
        assert_eq!(
            Interpolant::new(&[0.0, 0.0, 1.0], &[1.0, 2.0, 3.0]).unwrap_err(),
            InterpError::NotIncreasing(1)
        );
        assert_eq!(
            Interpolant::new(&[0.0, f64::NAN], &[1.0, 2.0]).unwrap_err(),
            InterpError::NonFinite(1)
        );
        assert_eq!(
            Interpolant::with_strategies(&[0.0, 1.0], &[1.0, 2.0], &[Strategy::NaturalCubic])
                .unwrap_err(),
            InterpError::NoApplicableStrategy { points: 2 }
        );
    }
}
