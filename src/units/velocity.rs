use serde::{Deserialize, Serialize};

/// 선속 계산에 쓰는 1 kn의 m/s 값 (설계 관행상 0.5144로 반올림).
pub const KNOT_MPS: f64 = 0.5144;

/// 속도 단위. 내부 기준은 m/s이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum VelocityUnit {
    MeterPerSecond,
    Knot,
}

fn to_mps(value: f64, unit: VelocityUnit) -> f64 {
    match unit {
        VelocityUnit::MeterPerSecond => value,
        VelocityUnit::Knot => value * KNOT_MPS,
    }
}

fn from_mps(value: f64, unit: VelocityUnit) -> f64 {
    match unit {
        VelocityUnit::MeterPerSecond => value,
        VelocityUnit::Knot => value / KNOT_MPS,
    }
}

/// 속도를 변환한다.
pub fn convert_velocity(value: f64, from: VelocityUnit, to: VelocityUnit) -> f64 {
    let base = to_mps(value, from);
    from_mps(base, to)
}

/// 선속(kn)과 반류계수로 전진속도 VA(m/s)를 구한다.
pub fn advance_speed_mps(ship_speed_kn: f64, wake_fraction: f64) -> f64 {
    convert_velocity(ship_speed_kn, VelocityUnit::Knot, VelocityUnit::MeterPerSecond)
        * (1.0 - wake_fraction)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn knots_to_advance_speed() {
        let v = convert_velocity(10.0, VelocityUnit::Knot, VelocityUnit::MeterPerSecond);
        assert!((v - 5.144).abs() < 1e-12);
        let back = convert_velocity(v, VelocityUnit::MeterPerSecond, VelocityUnit::Knot);
        assert!((back - 10.0).abs() < 1e-12);
        assert!((advance_speed_mps(15.0, 0.35) - 15.0 * 0.5144 * 0.65).abs() < 1e-12);
    }
}
