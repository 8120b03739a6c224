use propeller_design::propeller::open_water::{
    open_water_curve, OpenWaterCurveInput, PerformanceModel,
};
use propeller_design::propeller::series::{evaluate_terms, PolynomialTerm};
use propeller_design::propeller::{BladeCount, DesignError};

#[test]
fn efficiency_is_zero_at_zero_advance() {
    for blades in [BladeCount::Four, BladeCount::Five] {
        let model = PerformanceModel::new(blades);
        let p = model.evaluate(0.0, 0.8, 0.55);
        assert_eq!(p.eta0, 0.0);
        assert!(p.kt > 0.0, "{blades} KT0={}", p.kt);
        assert!(p.kq > 0.0, "{blades} KQ0={}", p.kq);
    }
}

#[test]
fn coefficients_are_deterministic() {
    let model = PerformanceModel::new(BladeCount::Four);
    let a = model.evaluate(0.5, 0.7, 0.55);
    let b = model.evaluate(0.5, 0.7, 0.55);
    assert_eq!(a, b);
    assert!((a.kq - a.ten_kq / 10.0).abs() < 1e-15);
}

#[test]
fn zero_exponent_leaves_variable_out() {
    let terms = [
        PolynomialTerm {
            coefficient: 2.0,
            i: 0,
            j: 1,
            k: 0,
        },
        PolynomialTerm {
            coefficient: 1.0,
            i: 1,
            j: 0,
            k: 2,
        },
    ];
    // 2·J + (P/D)·(Ae/A0)²
    let v = evaluate_terms(&terms, 0.5, 0.8, 0.5);
    assert!((v - (1.0 + 0.8 * 0.25)).abs() < 1e-12);
}

#[test]
fn clamped_coefficients_never_negative() {
    let model = PerformanceModel::new(BladeCount::Four);
    let p = model.evaluate(1.6, 0.5, 0.4);
    assert!(p.kt >= 0.0);
    assert!(p.kq >= 0.0);
    assert!(p.eta0.is_finite());
}

#[test]
fn unsupported_blade_count() {
    let err = PerformanceModel::for_blade_count(3).expect_err("3 blades");
    assert!(matches!(err, DesignError::UnsupportedBladeCount(3)));
    assert_eq!(
        PerformanceModel::for_blade_count(5).expect("5 blades").blades(),
        BladeCount::Five
    );
}

#[test]
fn default_curve_has_seventeen_points() {
    let model = PerformanceModel::new(BladeCount::Four);
    let curve = open_water_curve(&model, &OpenWaterCurveInput::default()).expect("curve");
    assert_eq!(curve.points.len(), 17);
    assert_eq!(curve.blades, 4);
    assert!((curve.points[16].j - 1.6).abs() < 1e-9);
    let peak = curve.peak_efficiency().expect("peak");
    assert!(peak.eta0 > 0.0 && peak.eta0 < 1.0, "peak={}", peak.eta0);
    assert!((peak.j - 0.7).abs() < 1e-9, "peak J={}", peak.j);
}

#[test]
fn curve_rejects_bad_ranges() {
    let model = PerformanceModel::new(BladeCount::Five);
    let bad_step = OpenWaterCurveInput {
        j_step: 0.0,
        ..OpenWaterCurveInput::default()
    };
    assert!(open_water_curve(&model, &bad_step).is_err());
    let reversed = OpenWaterCurveInput {
        j_min: 1.0,
        j_max: 0.5,
        ..OpenWaterCurveInput::default()
    };
    assert!(open_water_curve(&model, &reversed).is_err());
}

#[test]
fn curve_rejects_oversized_grids() {
    let model = PerformanceModel::new(BladeCount::Four);
    let tiny_step = OpenWaterCurveInput {
        j_step: 1e-9,
        ..OpenWaterCurveInput::default()
    };
    assert!(matches!(
        open_water_curve(&model, &tiny_step),
        Err(DesignError::InvalidInput(_))
    ));
    let endless = OpenWaterCurveInput {
        j_max: f64::INFINITY,
        ..OpenWaterCurveInput::default()
    };
    assert!(matches!(
        open_water_curve(&model, &endless),
        Err(DesignError::InvalidInput(_))
    ));
}
