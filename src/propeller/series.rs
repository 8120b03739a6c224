//! MAU(AU) 계열 KT / 10KQ 회귀 다항식 계수와 날개 수 선택.

use serde::{Deserialize, Serialize};

use super::tables::{GeometryFamily, FIVE_BLADE_FAMILIES, FOUR_BLADE_FAMILIES};
use super::DesignError;

/// 회귀식의 한 항: coefficient · (P/D)^i · J^j · (Ae/A0)^k
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PolynomialTerm {
    pub coefficient: f64,
    pub i: i32,
    pub j: i32,
    pub k: i32,
}

const fn term(coefficient: f64, i: i32, j: i32, k: i32) -> PolynomialTerm {
    PolynomialTerm {
        coefficient,
        i,
        j,
        k,
    }
}

pub const KT_FOUR_BLADE: &[PolynomialTerm] = &[
    term(-0.2536277E-01, 0, 0, 0),
    term(-0.2072556E+00, 0, 1, 0),
    term(0.5724472E+00, 1, 0, 0),
    term(0.1939063E+00, 2, 0, 3),
    term(-0.2890781E+00, 0, 2, 2),
    term(-0.1074432E+01, 1, 2, 2),
    term(-0.2131741E+00, 2, 0, 0),
    term(0.2703334E+00, 2, 0, 1),
    term(0.1870137E-01, 3, 1, 0),
    term(0.9646077E+00, 0, 3, 3),
    term(-0.2029306E+00, 0, 4, 3),
    term(0.1305797E-02, 7, 0, 1),
    term(-0.5234681E-01, 0, 0, 1),
    term(-0.1710635E+00, 0, 2, 0),
    term(0.7317558E+00, 1, 2, 1),
    term(-0.1049158E+00, 1, 0, 2),
    term(0.6117029E-01, 5, 1, 3),
    term(-0.1214246E+00, 0, 3, 1),
    term(-0.5872456E-02, 7, 2, 1),
    term(-0.1525986E+00, 1, 1, 1),
    term(0.1006423E-02, 7, 4, 1),
    term(-0.8940443E-01, 4, 0, 3),
];

/// 10·KQ 계수 (4엽)
pub const TEN_KQ_FOUR_BLADE: &[PolynomialTerm] = &[
    term(0.3899004E-01, 0, 0, 0),
    term(0.2886616E+00, 2, 0, 0),
    term(0.9977187E-01, 1, 1, 0),
    term(0.7850744E+00, 2, 0, 1),
    term(0.1847187E+00, 0, 2, 2),
    term(-0.6893466E-01, 3, 0, 0),
    term(0.9402823E+00, 0, 3, 3),
    term(-0.4649396E+00, 1, 2, 2),
    term(-0.5417402E+00, 0, 4, 3),
    term(0.1052512E+00, 3, 2, 1),
    term(-0.3419544E+00, 1, 0, 3),
    term(-0.2585986E+00, 0, 4, 0),
    term(0.3239788E-01, 6, 1, 1),
    term(-0.5742804E-01, 2, 3, 0),
    term(-0.7892603E+00, 1, 1, 1),
    term(-0.5324799E+00, 0, 2, 1),
    term(0.4870383E-02, 3, 3, 0),
    term(0.3483905E+00, 1, 4, 1),
    term(0.3204546E-01, 4, 3, 0),
    term(0.5473935E-02, 7, 4, 3),
    term(0.1084547E-01, 5, 0, 1),
    term(-0.1448536E+00, 4, 3, 1),
    term(0.2210349E+00, 1, 3, 0),
    term(-0.5244457E-01, 4, 1, 0),
    term(0.3545902E+00, 0, 1, 3),
    term(-0.1878683E-01, 6, 0, 2),
];

pub const KT_FIVE_BLADE: &[PolynomialTerm] = &[
    term(0.5367018E-01, 0, 0, 0),
    term(-0.3023566E+00, 0, 1, 0),
    term(0.4333625E+00, 1, 0, 0),
    term(-0.1065471E+00, 0, 2, 1),
    term(-0.6582904E+00, 2, 0, 3),
    term(0.1189101E+00, 1, 3, 1),
    term(-0.4408557E-03, 6, 0, 0),
    term(-0.3317857E-01, 1, 4, 1),
    term(0.1151124E+01, 2, 0, 2),
    term(0.1960773E+00, 0, 0, 3),
    term(-0.9747062E-01, 3, 0, 1),
    term(0.2036384E+00, 1, 1, 0),
    term(-0.2566153E+00, 1, 1, 1),
    term(-0.1370242E+00, 0, 2, 0),
    term(-0.2874294E+00, 0, 0, 2),
    term(-0.2854609E+00, 2, 0, 1),
];

/// 10·KQ 계수 (5엽)
pub const TEN_KQ_FIVE_BLADE: &[PolynomialTerm] = &[
    term(-0.9251390E-01, 0, 0, 0),
    term(-0.1229000E+00, 2, 0, 0),
    term(0.3050697E+00, 1, 1, 0),
    term(-0.2935303E+00, 0, 2, 0),
    term(-0.3991474E+00, 2, 0, 1),
    term(-0.1022050E+01, 1, 1, 1),
    term(0.1022833E-01, 7, 0, 0),
    term(0.3521100E-02, 1, 0, 3),
    term(0.2552059E-02, 5, 2, 0),
    term(0.2143532E+00, 0, 1, 3),
    term(0.7131110E-03, 4, 4, 0),
    term(0.2078488E+00, 1, 2, 1),
    term(0.6397058E+00, 1, 0, 0),
    term(0.9404846E-03, 7, 1, 0),
    term(-0.2930044E-01, 0, 1, 1),
    term(-0.7807623E-01, 0, 4, 0),
    term(-0.3025523E+00, 2, 2, 3),
    term(0.1855105E+00, 1, 3, 1),
    term(-0.6724210E+00, 2, 1, 2),
    term(-0.2087142E+00, 4, 0, 3),
    term(0.9400654E+00, 3, 0, 1),
    term(0.9316346E+00, 2, 1, 3),
    term(-0.4348397E-01, 6, 0, 0),
];

/// 항 목록을 평가한다. 지수 0인 변수는 곱해지지 않는다.
pub fn evaluate_terms(terms: &[PolynomialTerm], j: f64, pitch_ratio: f64, area_ratio: f64) -> f64 {
    terms
        .iter()
        .map(|t| t.coefficient * pitch_ratio.powi(t.i) * j.powi(t.j) * area_ratio.powi(t.k))
        .sum()
}

/// 지원하는 날개 수. 계수표와 Bp–δ 도표 묶음을 함께 들고 다닌다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum BladeCount {
    Four,
    Five,
}

impl BladeCount {
    pub fn count(self) -> u32 {
        match self {
            BladeCount::Four => 4,
            BladeCount::Five => 5,
        }
    }

    pub fn kt_terms(self) -> &'static [PolynomialTerm] {
        match self {
            BladeCount::Four => KT_FOUR_BLADE,
            BladeCount::Five => KT_FIVE_BLADE,
        }
    }

    pub fn ten_kq_terms(self) -> &'static [PolynomialTerm] {
        match self {
            BladeCount::Four => TEN_KQ_FOUR_BLADE,
            BladeCount::Five => TEN_KQ_FIVE_BLADE,
        }
    }

    /// 후보 도표 3종 (공칭 면적비 오름차순).
    pub fn families(self) -> &'static [GeometryFamily; 3] {
        match self {
            BladeCount::Four => &FOUR_BLADE_FAMILIES,
            BladeCount::Five => &FIVE_BLADE_FAMILIES,
        }
    }
}

impl TryFrom<u32> for BladeCount {
    type Error = DesignError;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        match value {
            4 => Ok(BladeCount::Four),
            5 => Ok(BladeCount::Five),
            other => Err(DesignError::UnsupportedBladeCount(other)),
        }
    }
}

impl From<BladeCount> for u32 {
    fn from(value: BladeCount) -> Self {
        value.count()
    }
}

impl std::fmt::Display for BladeCount {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}엽", self.count())
    }
}
