//! 단위 정의 및 변환 모듈 모음.

pub mod rotation;
pub mod velocity;

pub use rotation::{convert_rotation, rps_from_rpm, RotationUnit};
pub use velocity::{advance_speed_mps, convert_velocity, VelocityUnit, KNOT_MPS};
