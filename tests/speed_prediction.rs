//! Bp–δ 도표 기반 최대 속력 예측 회귀 테스트.
use propeller_design::propeller::speed::{predict_all, predict_speed, speed_sweep, sqrt_bp};
use propeller_design::propeller::tables::{MAU4_55, MAU5_65};
use propeller_design::propeller::{BladeCount, DesignError, PropulsionParameters, ResistanceCurve};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

#[test]
fn mau4_55_reference_ship() {
    let params = PropulsionParameters::default();
    let curve = ResistanceCurve::default();
    let row = predict_speed(&MAU4_55, &curve, &params).expect("speed");
    assert!(
        row.speed_kn > 12.0 && row.speed_kn < 17.0,
        "speed={}",
        row.speed_kn
    );
    assert!(row.diameter_m > 0.0);
    assert!(row.eta0 > 0.0 && row.eta0 < 1.0);
    assert!(!row.status.is_degraded());
    assert!(!row.clamped);
    assert_eq!(row.area_ratio, 0.55);

    // D = δ·VA/N, VA in kn
    let va = (1.0 - params.wake_fraction) * row.speed_kn;
    assert_close("diameter", row.diameter_m, row.delta * va / params.rpm, 1e-9);
    assert_close("sqrt_bp", row.sqrt_bp, sqrt_bp(&params, row.speed_kn), 1e-12);
}

#[test]
fn delivered_power_keeps_reserve() {
    let params = PropulsionParameters::default();
    assert_close("P_D", params.delivered_power_kw(), 6222.0 * 0.9 * 0.97, 1e-12);
    assert_close("eta_H", params.hull_efficiency(), 0.79 / 0.65, 1e-12);
}

#[test]
fn all_families_stay_inside_sampled_speeds() {
    let params = PropulsionParameters::default();
    let curve = ResistanceCurve::default();
    for blades in [BladeCount::Four, BladeCount::Five] {
        let rows = predict_all(blades, &curve, &params).expect("predict_all");
        assert_eq!(rows.len(), 3);
        for row in rows {
            assert!(
                (12.0..=17.0).contains(&row.speed_kn),
                "{} speed={}",
                row.family,
                row.speed_kn
            );
        }
    }
}

#[test]
fn underpowered_ship_is_clamped_to_lowest_speed() {
    let params = PropulsionParameters {
        shaft_power_kw: 300.0,
        ..PropulsionParameters::default()
    };
    let curve = ResistanceCurve::default();
    let row = predict_speed(&MAU5_65, &curve, &params).expect("speed");
    assert!((12.0..=17.0).contains(&row.speed_kn));
    assert!(row.clamped || row.status.is_degraded());
    assert!(!row.warnings.is_empty());
}

#[test]
fn overpowered_ship_falls_back_to_top_speed() {
    let params = PropulsionParameters {
        shaft_power_kw: 60_000.0,
        ..PropulsionParameters::default()
    };
    let curve = ResistanceCurve::default();
    let mut degraded = 0;
    for blades in [BladeCount::Four, BladeCount::Five] {
        for row in predict_all(blades, &curve, &params).expect("predict_all") {
            if row.status.is_degraded() {
                degraded += 1;
                assert_eq!(row.speed_kn, 17.0, "{}", row.family);
                assert!(!row.warnings.is_empty(), "{}", row.family);
                assert!(row.diameter_m.is_finite());
            }
        }
    }
    assert!(degraded > 0);
}

#[test]
fn invalid_wake_fraction_is_rejected() {
    let params = PropulsionParameters {
        wake_fraction: 1.0,
        ..PropulsionParameters::default()
    };
    let err = predict_all(BladeCount::Four, &ResistanceCurve::default(), &params)
        .expect_err("w = 1 must fail");
    assert!(matches!(err, DesignError::InvalidInput(_)));
}

#[test]
fn resistance_curve_parses_and_validates() {
    let curve = ResistanceCurve::parse("12, 13, 14; 1497, 1953, 2505").expect("parse");
    assert_eq!(curve.speeds_kn(), &[12.0, 13.0, 14.0]);
    assert_eq!(curve.speed_range(), (12.0, 14.0));
    assert!(ResistanceCurve::parse("12,13;1497").is_err());
    assert!(ResistanceCurve::new(vec![13.0, 12.0], vec![1.0, 2.0]).is_err());
    assert!(ResistanceCurve::new(vec![12.0], vec![1.0]).is_err());
}

#[test]
fn sweep_covers_curve_and_finds_crossing() {
    let params = PropulsionParameters::default();
    let curve = ResistanceCurve::default();
    let sweep = speed_sweep(&MAU4_55, &curve, &params, 51).expect("sweep");
    assert_eq!(sweep.points.len(), 51);
    assert_close("first", sweep.points[0].speed_kn, 12.0, 1e-12);
    assert_close("last", sweep.points[50].speed_kn, 17.0, 1e-12);
    assert_close("pe(12)", sweep.points[0].pe_kw, 1497.0, 1e-9);

    let row = predict_speed(&MAU4_55, &curve, &params).expect("speed");
    assert_eq!(sweep.crossings_kn.len(), 1, "{:?}", sweep.crossings_kn);
    assert!((sweep.crossings_kn[0] - row.speed_kn).abs() < 0.1);
}

#[test]
fn sweep_needs_two_samples() {
    let err = speed_sweep(
        &MAU4_55,
        &ResistanceCurve::default(),
        &PropulsionParameters::default(),
        1,
    )
    .expect_err("one sample");
    assert!(matches!(err, DesignError::InvalidInput(_)));
}
