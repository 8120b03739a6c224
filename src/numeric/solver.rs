//! 스칼라 방정식 근 찾기.
//! 모든 반복은 고정 횟수 안에서 끝나며, 수렴 실패는 오류 대신 `converged = false`로 보고한다.

use serde::Serialize;

/// 반복 해법 공통 설정.
#[derive(Debug, Clone, Copy)]
pub struct SolverConfig {
    pub max_iterations: usize,
    /// 스텝 크기 기준 허용오차 (상대/절대 혼합)
    pub x_tol: f64,
    /// 잔차 기준 허용오차
    pub f_tol: f64,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            max_iterations: 50,
            x_tol: 1e-6,
            f_tol: 1e-9,
        }
    }
}

/// 근 찾기 결과.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RootResult {
    pub root: f64,
    pub residual: f64,
    pub iterations: usize,
    pub converged: bool,
}

/// 수치 미분을 쓰는 뉴턴법. 초기값 x0에서 출발한다.
pub fn newton<F>(f: F, x0: f64, cfg: SolverConfig) -> RootResult
where
    F: Fn(f64) -> f64,
{
    let mut x = x0;
    let mut fx = f(x);
    for iter in 1..=cfg.max_iterations {
        if !fx.is_finite() || !x.is_finite() {
            return not_converged(x, fx, iter);
        }
        if fx.abs() <= cfg.f_tol {
            return RootResult {
                root: x,
                residual: fx,
                iterations: iter - 1,
                converged: true,
            };
        }
        let h = 1e-6 * x.abs().max(1.0);
        let slope = (f(x + h) - f(x - h)) / (2.0 * h);
        if !slope.is_finite() || slope == 0.0 {
            return not_converged(x, fx, iter);
        }
        let step = fx / slope;
        x -= step;
        fx = f(x);
        if step.abs() <= cfg.x_tol * (1.0 + x.abs()) {
            let converged = x.is_finite() && fx.is_finite();
            return RootResult {
                root: x,
                residual: fx,
                iterations: iter,
                converged,
            };
        }
    }
    not_converged(x, fx, cfg.max_iterations)
}

fn not_converged(x: f64, fx: f64, iterations: usize) -> RootResult {
    RootResult {
        root: x,
        residual: fx,
        iterations,
        converged: false,
    }
}

/// Brent 법. [a, b]에서 부호가 바뀌지 않으면 None.
pub fn brent<F>(f: F, a: f64, b: f64, cfg: SolverConfig) -> Option<RootResult>
where
    F: Fn(f64) -> f64,
{
    let (mut a, mut b) = (a, b);
    let (mut fa, mut fb) = (f(a), f(b));
    if !fa.is_finite() || !fb.is_finite() || fa * fb > 0.0 {
        return None;
    }
    if fa == 0.0 {
        return Some(RootResult {
            root: a,
            residual: 0.0,
            iterations: 0,
            converged: true,
        });
    }
    let (mut c, mut fc) = (a, fa);
    let mut d = b - a;
    let mut e = d;

    for iter in 1..=cfg.max_iterations {
        if fb * fc > 0.0 {
            c = a;
            fc = fa;
            d = b - a;
            e = d;
        }
        if fc.abs() < fb.abs() {
            a = b;
            b = c;
            c = a;
            fa = fb;
            fb = fc;
            fc = fa;
        }
        let tol = 2.0 * f64::EPSILON * b.abs() + 0.5 * cfg.x_tol;
        let m = 0.5 * (c - b);
        if m.abs() <= tol || fb == 0.0 {
            return Some(RootResult {
                root: b,
                residual: fb,
                iterations: iter,
                converged: true,
            });
        }
        if e.abs() >= tol && fa.abs() > fb.abs() {
            // 역2차 보간 또는 할선
            let s = fb / fa;
            let (mut p, mut q) = if a == c {
                (2.0 * m * s, 1.0 - s)
            } else {
                let q = fa / fc;
                let r = fb / fc;
                (
                    s * (2.0 * m * q * (q - r) - (b - a) * (r - 1.0)),
                    (q - 1.0) * (r - 1.0) * (s - 1.0),
                )
            };
            if p > 0.0 {
                q = -q;
            } else {
                p = -p;
            }
            if 2.0 * p < (3.0 * m * q - (tol * q).abs()).min((e * q).abs()) {
                e = d;
                d = p / q;
            } else {
                d = m;
                e = m;
            }
        } else {
            d = m;
            e = m;
        }
        a = b;
        fa = fb;
        b += if d.abs() > tol { d } else { tol.copysign(m) };
        fb = f(b);
        if !fb.is_finite() {
            return Some(not_converged(b, fb, iter));
        }
    }
    Some(not_converged(b, fb, cfg.max_iterations))
}

/// [lo, hi]를 samples 개로 나눠 부호가 바뀌는 구간들을 돌려준다.
pub fn scan_sign_changes<F>(f: F, lo: f64, hi: f64, samples: usize) -> Vec<(f64, f64)>
where
    F: Fn(f64) -> f64,
{
    let grid = linspace(lo, hi, samples);
    let values: Vec<f64> = grid.iter().map(|&x| f(x)).collect();
    let mut brackets = Vec::new();
    for i in 0..grid.len().saturating_sub(1) {
        let (f0, f1) = (values[i], values[i + 1]);
        if !f0.is_finite() || !f1.is_finite() {
            continue;
        }
        if f0 == 0.0 || f0 * f1 < 0.0 {
            brackets.push((grid[i], grid[i + 1]));
        }
    }
    if let (Some(&last), Some(&x)) = (values.last(), grid.last()) {
        if last == 0.0 {
            brackets.push((x, x));
        }
    }
    brackets
}

/// 양 끝을 포함하는 등간격 격자.
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (n - 1) as f64;
            (0..n)
                .map(|i| if i == n - 1 { hi } else { lo + step * i as f64 })
                .collect()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newton_finds_square_root() {
        let res = newton(|x| x * x - 2.0, 3.0, SolverConfig::default());
        assert!(res.converged);
        assert!((res.root - 2f64.sqrt()).abs() < 1e-6);
    }

    #[test]
    fn newton_reports_flat_function() {
        let res = newton(|_| 1.0, 0.0, SolverConfig::default());
        assert!(!res.converged);
    }

    #[test]
    fn brent_needs_bracket() {
        assert!(brent(|x| x * x + 1.0, -1.0, 1.0, SolverConfig::default()).is_none());
        let res = brent(|x| x.cos() - x, 0.0, 1.0, SolverConfig::default()).expect("bracket");
        assert!(res.converged);
        assert!((res.root - 0.739_085_133).abs() < 1e-6);
    }

    #[test]
    fn scan_finds_each_crossing() {
        let brackets = scan_sign_changes(|x| (x - 1.25) * (x - 2.75), 0.0, 4.0, 200);
        assert_eq!(brackets.len(), 2);
        assert!(brackets[0].0 <= 1.25 && 1.25 <= brackets[0].1);
        assert!(brackets[1].0 <= 2.75 && 2.75 <= brackets[1].1);
    }

    #[test]
    fn linspace_hits_both_ends() {
        let g = linspace(0.4, 0.7, 1001);
        assert_eq!(g.len(), 1001);
        assert_eq!(g[0], 0.4);
        assert_eq!(g[1000], 0.7);
    }
}
