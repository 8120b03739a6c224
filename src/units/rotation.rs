use serde::{Deserialize, Serialize};

/// 회전 속도 단위. 내부 기준은 rps이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RotationUnit {
    Rpm,
    Rps,
}

fn to_rps(value: f64, unit: RotationUnit) -> f64 {
    match unit {
        RotationUnit::Rpm => value / 60.0,
        RotationUnit::Rps => value,
    }
}

fn from_rps(value: f64, unit: RotationUnit) -> f64 {
    match unit {
        RotationUnit::Rpm => value * 60.0,
        RotationUnit::Rps => value,
    }
}

/// 회전 속도를 변환한다.
pub fn convert_rotation(value: f64, from: RotationUnit, to: RotationUnit) -> f64 {
    from_rps(to_rps(value, from), to)
}

/// 축 회전수(rpm)를 초당 회전수로 바꾼다.
pub fn rps_from_rpm(rpm: f64) -> f64 {
    convert_rotation(rpm, RotationUnit::Rpm, RotationUnit::Rps)
}
