//! MAU 계열 Bp–δ 도표, 공동 한계 곡선, 반경 방향 표준 단면 데이터.
//! 값은 도표에서 읽은 참고치이며 실제 설계 시 원도표로 검증해야 한다.

use serde::Serialize;

/// Bp–δ 도표 하나 (날개 수 × 전개면적비 계열).
/// 모든 배열은 √Bp 오름차순으로 정렬되어 있다.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct GeometryFamily {
    pub name: &'static str,
    pub blades: u32,
    /// 공칭 전개면적비 Ae/A0
    pub area_ratio: f64,
    pub sqrt_bp: &'static [f64],
    pub delta: &'static [f64],
    pub pitch_ratio: &'static [f64],
    pub eta0: &'static [f64],
}

pub const MAU4_40: GeometryFamily = GeometryFamily {
    name: "MAU4-40",
    blades: 4,
    area_ratio: 0.40,
    sqrt_bp: &[
        2.43, 2.5, 2.75, 3.0, 3.25, 3.5, 3.75, 4.0, 4.25, 4.5, 4.75, 5.0, 5.25, 5.5, 5.75, 6.0, 6.25,
        6.5, 6.75, 7.0, 7.25, 7.5, 7.75, 8.0, 8.25, 8.5, 8.75, 9.0, 9.25, 9.5, 9.75, 10.0, 10.07,
    ],
    delta: &[
        32.1337, 33.0527, 35.6638, 38.8661, 41.6769, 44.1932, 47.0351, 49.4805, 52.5412, 55.0486,
        57.6749, 60.6623, 62.792, 65.4302, 68.0, 70.9688, 73.4625, 75.5852, 78.1068, 80.4074,
        82.4419, 84.9337, 87.5578, 89.5028, 92.4124, 94.0, 96.0, 98.9679, 100.738, 102.8976,
        105.1432, 107.2132, 107.7646,
    ],
    pitch_ratio: &[
        1.11168, 1.08883, 1.02299, 0.95694, 0.91488, 0.87439, 0.83645, 0.81378, 0.78523, 0.75768,
        0.7395, 0.72046, 0.7014, 0.68219, 0.672, 0.65867, 0.64867, 0.6405, 0.63474, 0.6282,
        0.61852, 0.61276, 0.60609, 0.60127, 0.59407, 0.59, 0.582, 0.57692, 0.57457, 0.57087,
        0.56892, 0.56446, 0.56274,
    ],
    eta0: &[
        0.76169, 0.75949, 0.75125, 0.73741, 0.72345, 0.70847, 0.69006, 0.67778, 0.66364, 0.65216,
        0.64142, 0.62654, 0.61688, 0.60503, 0.592, 0.5806, 0.56823, 0.55987, 0.5475, 0.53862,
        0.53122, 0.52179, 0.51156, 0.50677, 0.49276, 0.485, 0.48, 0.47189, 0.4657, 0.45899,
        0.45096, 0.44431, 0.44269,
    ],
};

pub const MAU4_55: GeometryFamily = GeometryFamily {
    name: "MAU4-55",
    blades: 4,
    area_ratio: 0.55,
    sqrt_bp: &[
        4.586, 4.971, 5.419, 5.945, 6.5, 7.0, 7.5, 8.0, 8.5, 9.0, 9.5, 10.0, 11.0, 13.01,
    ],
    delta: &[
        55.6, 58.8, 63.4, 69.1, 74.0, 78.5, 82.8, 86.9, 90.8, 94.5, 98.0, 101.0, 107.0, 132.3,
    ],
    pitch_ratio: &[
        0.807, 0.774, 0.742, 0.711, 0.680, 0.650, 0.620, 0.595, 0.570, 0.545, 0.525, 0.505, 0.470,
        0.400,
    ],
    eta0: &[
        0.634, 0.614, 0.592, 0.565, 0.540, 0.515, 0.490, 0.465, 0.440, 0.415, 0.390, 0.365, 0.330,
        0.260,
    ],
};

pub const MAU4_70: GeometryFamily = GeometryFamily {
    name: "MAU4-70",
    blades: 4,
    area_ratio: 0.70,
    sqrt_bp: &[
        2.65, 2.75, 3.0, 3.25, 3.5, 3.75, 4.0, 4.25, 4.5, 4.75, 5.0, 5.25, 5.5, 5.75, 6.0, 6.25,
        6.5, 6.75, 7.0, 7.25, 7.5, 7.75, 8.0, 8.25, 8.5, 8.75, 9.0, 9.25, 9.5, 9.75, 10.0, 10.07,
    ],
    delta: &[
        32.0, 33.3173, 36.5182, 39.3473, 42.0, 45.3888, 48.0, 51.0038, 53.4893, 56.0, 58.0,
        60.6577, 63.5746, 65.5697, 68.0, 70.4972, 73.0047, 75.485, 78.0, 80.0, 83.0763, 85.5071,
        87.658, 89.4571, 92.5176, 94.4395, 97.0423, 99.2439, 101.1474, 103.479, 106.0, 106.5729,
    ],
    pitch_ratio: &[
        1.21, 1.17707, 1.09708, 1.02612, 0.97, 0.91193, 0.88, 0.84889, 0.83298, 0.81, 0.79,
        0.76611, 0.75225, 0.74212, 0.73, 0.71751, 0.70499, 0.69253, 0.68, 0.67, 0.66274, 0.65275,
        0.64117, 0.63713, 0.62315, 0.62297, 0.62177, 0.61714, 0.61053, 0.60743, 0.606, 0.6045,
    ],
    eta0: &[
        0.705, 0.69778, 0.68784, 0.6728, 0.66, 0.64316, 0.63, 0.61942, 0.60725, 0.595, 0.585,
        0.57443, 0.56195, 0.55306, 0.541, 0.531, 0.5215, 0.512, 0.503, 0.495, 0.48542, 0.47661,
        0.47013, 0.46359, 0.45545, 0.44874, 0.44245, 0.43662, 0.42907, 0.42284, 0.416, 0.41471,
    ],
};

const MAU5_SQRT_BP: &[f64] = &[2.5, 3.0, 3.5, 4.0, 4.5, 5.0, 5.5, 6.0, 6.5, 7.0, 7.5, 8.0];

pub const MAU5_50: GeometryFamily = GeometryFamily {
    name: "MAU5-50",
    blades: 5,
    area_ratio: 0.50,
    sqrt_bp: MAU5_SQRT_BP,
    delta: &[
        30.0, 35.0, 40.0, 45.0, 50.0, 55.0, 60.0, 65.0, 70.0, 75.0, 80.0, 85.0,
    ],
    pitch_ratio: &[
        1.10, 1.05, 0.95, 0.88, 0.82, 0.78, 0.74, 0.71, 0.68, 0.65, 0.63, 0.61,
    ],
    eta0: &[
        0.75, 0.73, 0.70, 0.67, 0.64, 0.61, 0.58, 0.55, 0.52, 0.49, 0.46, 0.43,
    ],
};

pub const MAU5_65: GeometryFamily = GeometryFamily {
    name: "MAU5-65",
    blades: 5,
    area_ratio: 0.65,
    sqrt_bp: MAU5_SQRT_BP,
    delta: &[
        32.0, 38.0, 44.0, 50.0, 56.0, 62.0, 68.0, 74.0, 80.0, 86.0, 92.0, 98.0,
    ],
    pitch_ratio: &[
        1.08, 1.02, 0.93, 0.85, 0.79, 0.74, 0.70, 0.67, 0.64, 0.61, 0.59, 0.57,
    ],
    eta0: &[
        0.72, 0.70, 0.67, 0.64, 0.61, 0.58, 0.55, 0.52, 0.49, 0.46, 0.43, 0.40,
    ],
};

pub const MAU5_80: GeometryFamily = GeometryFamily {
    name: "MAU5-80",
    blades: 5,
    area_ratio: 0.80,
    sqrt_bp: MAU5_SQRT_BP,
    delta: &[
        34.0, 41.0, 48.0, 55.0, 62.0, 69.0, 76.0, 83.0, 90.0, 97.0, 104.0, 111.0,
    ],
    pitch_ratio: &[
        1.05, 0.98, 0.90, 0.83, 0.77, 0.72, 0.68, 0.65, 0.62, 0.59, 0.57, 0.55,
    ],
    eta0: &[
        0.68, 0.66, 0.63, 0.60, 0.57, 0.54, 0.51, 0.48, 0.45, 0.42, 0.39, 0.36,
    ],
};

pub const FOUR_BLADE_FAMILIES: [GeometryFamily; 3] = [MAU4_40, MAU4_55, MAU4_70];
pub const FIVE_BLADE_FAMILIES: [GeometryFamily; 3] = [MAU5_50, MAU5_65, MAU5_80];

// ---------------- σ–τc 공동 한계 곡선 ----------------

/// Wageningen 한계선 (σ, τc)
pub const SIGMA_WAGENINGEN: [f64; 9] = [0.1136, 0.2, 0.3, 0.4, 0.5, 0.6, 0.8, 1.0, 1.488];
pub const TAU_C_WAGENINGEN: [f64; 9] = [
    0.0777, 0.135, 0.1582, 0.1846, 0.206, 0.2304, 0.2633, 0.2876, 0.34,
];

/// Berlin(상선) 한계선 (σ, τc)
pub const SIGMA_BERLIN: [f64; 13] = [
    0.36, 0.389, 0.407, 0.416, 0.481, 0.54, 0.6, 0.7, 0.806, 0.834, 0.848, 0.9, 1.82,
];
pub const TAU_C_BERLIN: [f64; 13] = [
    0.14, 0.162, 0.164, 0.169, 0.175, 0.190, 0.200, 0.223, 0.224, 0.227, 0.228, 0.251, 0.35,
];

// ---------------- 반경 방향 표준 단면 ----------------

/// r/R 한 위치의 표준 단면 데이터.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct RadialStation {
    pub r_over_r: f64,
    /// 최대 두께, 직경 대비 %
    pub thickness_pct: f64,
    /// 날개 폭, b0.66R 대비 %
    pub width_pct: f64,
    /// 심프슨 승수
    pub simpson: f64,
    /// 단면적 계수 Ka
    pub area_coeff: f64,
}

const fn station(r: f64, t: f64, b: f64, sm: f64, ka: f64) -> RadialStation {
    RadialStation {
        r_over_r: r,
        thickness_pct: t,
        width_pct: b,
        simpson: sm,
        area_coeff: ka,
    }
}

/// 0.2R ~ 1.0R, 0.1R 간격의 9개 단면 (MAU 표준).
pub const MAU_STATIONS: [RadialStation; 9] = [
    station(0.2, 4.06, 66.54, 1.0, 0.674),
    station(0.3, 3.59, 77.70, 4.0, 0.674),
    station(0.4, 3.12, 87.08, 2.0, 0.674),
    station(0.5, 2.65, 94.34, 4.0, 0.6745),
    station(0.6, 2.18, 99.11, 2.0, 0.6745),
    station(0.7, 1.71, 99.64, 4.0, 0.677),
    station(0.8, 1.24, 92.92, 2.0, 0.683),
    station(0.9, 0.77, 73.62, 4.0, 0.695),
    station(1.0, 0.30, 0.0, 1.0, 0.700),
];

/// 주어진 r/R의 표준 단면을 찾는다.
pub fn station_at(r_over_r: f64) -> Option<&'static RadialStation> {
    MAU_STATIONS
        .iter()
        .find(|s| (s.r_over_r - r_over_r).abs() < 1e-9)
}
