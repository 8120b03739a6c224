//! 곡선 보간과 근 찾기 등 설계 계산 전반에서 공유하는 수치 도구 모음.

pub mod interp;
pub mod solver;

pub use interp::{InterpError, Interpolant, Strategy, DEFAULT_STRATEGIES, MONOTONE_FIRST};
pub use solver::{brent, linspace, newton, scan_sign_changes, RootResult, SolverConfig};
