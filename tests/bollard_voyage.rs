use propeller_design::propeller::bollard::{
    bollard_for_design, bollard_pull, BollardCase, BollardInput, StaticCoefficients,
};
use propeller_design::propeller::open_water::PerformanceModel;
use propeller_design::propeller::optimum::OptimumDesignPoint;
use propeller_design::propeller::voyage::{
    voyage_curve, LoadingCondition, VoyageInput, DUPLICATE_TOLERANCE_KN,
};
use propeller_design::propeller::{
    BladeCount, DesignError, PropulsionParameters, ResistanceCurve,
};

fn assert_close(label: &str, actual: f64, expected: f64, rel_tol: f64) {
    let denom = expected.abs().max(1.0);
    let diff = (actual - expected).abs();
    assert!(
        diff <= rel_tol * denom,
        "{label} expected {expected:.6} got {actual:.6} (diff {diff:.6}, tol {rel_tol})"
    );
}

fn reference_optimum() -> OptimumDesignPoint {
    OptimumDesignPoint {
        area_ratio: 0.55,
        required_area_ratio: 0.55,
        pitch_ratio: 0.7,
        diameter_m: 4.8,
        eta0: 0.6,
        speed_kn: 15.3,
        crossing_found: true,
        warnings: Vec::new(),
    }
}

#[test]
fn bollard_reference_case() {
    let b = bollard_pull(&BollardCase::default()).expect("bollard");
    assert_close("P_D", b.delivered_power_kw, 6035.34, 1e-9);
    assert_close("Q", b.torque_knm, 371.8274, 1e-6);
    assert_close("T", b.thrust_kn, 1487.3097, 1e-6);
    assert_close("n_b", b.bollard_rpm, 667.6508, 1e-6);
    assert_close("towrope", b.towrope_pull_kn, 1427.8173, 1e-6);
}

#[test]
fn zero_torque_coefficient_reports_zero() {
    let case = BollardCase {
        kq0: 0.0,
        ..BollardCase::default()
    };
    let b = bollard_pull(&case).expect("bollard");
    assert_eq!(b.thrust_kn, 0.0);
    assert_eq!(b.bollard_rpm, 0.0);
    assert_eq!(b.towrope_pull_kn, 0.0);
    assert!(b.torque_knm.is_finite());
}

#[test]
fn bollard_rejects_zero_rpm() {
    let case = BollardCase {
        rpm: 0.0,
        ..BollardCase::default()
    };
    assert!(matches!(
        bollard_pull(&case),
        Err(DesignError::InvalidInput(_))
    ));
}

#[test]
fn design_bollard_uses_model_or_given_coefficients() {
    let params = PropulsionParameters::default();
    let model = PerformanceModel::new(BladeCount::Four);
    let optimum = reference_optimum();

    let from_model = bollard_for_design(&optimum, &params, &model, &BollardInput::default())
        .expect("model");
    let p0 = model.evaluate(0.0, 0.7, 0.55);
    assert_close("kt0", from_model.kt0, p0.kt, 1e-12);
    assert_close("kq0", from_model.kq0, p0.kq, 1e-12);
    assert_close("D", from_model.diameter_m, 4.8, 1e-12);
    assert!(from_model.thrust_kn > 0.0);

    let given = BollardInput {
        coefficients: StaticCoefficients::Given {
            kt0: 0.3,
            kq0: 0.03,
        },
        ..BollardInput::default()
    };
    let b = bollard_for_design(&optimum, &params, &model, &given).expect("given");
    assert_eq!(b.kt0, 0.3);
    assert_close(
        "T",
        b.thrust_kn,
        10.0 * b.torque_knm / 4.8,
        1e-12,
    );
}

#[test]
fn voyage_grid_covers_three_rpms() {
    let params = PropulsionParameters::default();
    let model = PerformanceModel::new(BladeCount::Four);
    let voyage = voyage_curve(
        &reference_optimum(),
        &params,
        &model,
        &ResistanceCurve::default(),
        &VoyageInput::default(),
    )
    .expect("voyage");

    let rpms: Vec<f64> = voyage.curves.iter().map(|c| c.rpm).collect();
    assert_eq!(rpms, vec![165.0, 155.0, 145.0]);
    for curve in &voyage.curves {
        assert_eq!(curve.points.len(), 6);
        for p in &curve.points {
            assert!(p.j >= 0.0 && p.j <= 1.5);
            assert_close(
                "PTE",
                p.pte_kw,
                p.thrust_kn * (1.0 - params.thrust_deduction) * 0.5144 * p.speed_kn,
                1e-12,
            );
            assert!(p.shaft_power_kw > p.delivered_power_kw);
        }
    }

    // same speed, faster shaft → more thrust
    let fast = &voyage.curves[0].points[3];
    let slow = &voyage.curves[2].points[3];
    assert!(fast.thrust_kn > slow.thrust_kn);
    assert!(fast.shaft_power_kw > slow.shaft_power_kw);
}

#[test]
fn voyage_intersections_are_distinct_and_ranked() {
    let voyage = voyage_curve(
        &reference_optimum(),
        &PropulsionParameters::default(),
        &PerformanceModel::new(BladeCount::Four),
        &ResistanceCurve::default(),
        &VoyageInput::default(),
    )
    .expect("voyage");

    for (i, a) in voyage.intersections.iter().enumerate() {
        assert!((12.0..=17.0).contains(&a.speed_kn), "{a:?}");
        for b in &voyage.intersections[i + 1..] {
            if a.rpm == b.rpm && a.condition == b.condition {
                assert!((a.speed_kn - b.speed_kn).abs() >= DUPLICATE_TOLERANCE_KN);
            }
        }
    }
    match &voyage.best {
        Some(best) => {
            for x in &voyage.intersections {
                assert!(x.speed_kn <= best.speed_kn);
            }
        }
        None => assert!(voyage.intersections.is_empty()),
    }
}

#[test]
fn custom_rpms_and_conditions() {
    let input = VoyageInput {
        rpms: vec![150.0],
        conditions: vec![LoadingCondition::new("시운전", 0.7)],
        speed_step_kn: 0.5,
        ..VoyageInput::default()
    };
    let voyage = voyage_curve(
        &reference_optimum(),
        &PropulsionParameters::default(),
        &PerformanceModel::new(BladeCount::Four),
        &ResistanceCurve::default(),
        &input,
    )
    .expect("voyage");
    assert_eq!(voyage.curves.len(), 1);
    assert_eq!(voyage.curves[0].points.len(), 11);
    assert!(voyage
        .intersections
        .iter()
        .all(|x| x.rpm == 150.0 && x.condition == "시운전"));
}

#[test]
fn voyage_rejects_empty_speed_window() {
    let input = VoyageInput {
        speed_min_kn: 17.0,
        speed_max_kn: 12.0,
        ..VoyageInput::default()
    };
    let err = voyage_curve(
        &reference_optimum(),
        &PropulsionParameters::default(),
        &PerformanceModel::new(BladeCount::Four),
        &ResistanceCurve::default(),
        &input,
    )
    .expect_err("min >= max");
    assert!(matches!(err, DesignError::InvalidInput(_)));
}
