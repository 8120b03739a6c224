//! 수치 도구와 설계 단계의 성질 기반 테스트.

use propeller_design::numeric::Interpolant;
use propeller_design::propeller::bollard::{bollard_pull, BollardCase};
use propeller_design::propeller::cavitation::{
    evaluate, tau_c, CavitationCriterion, CavitationInput, TAU_C_MAX, TAU_C_MIN,
};
use propeller_design::propeller::mass::integrate_stations;
use propeller_design::propeller::open_water::PerformanceModel;
use propeller_design::propeller::optimum::select_optimum;
use propeller_design::propeller::speed::predict_all;
use propeller_design::propeller::tables::MAU_STATIONS;
use propeller_design::propeller::{BladeCount, PropulsionParameters, ResistanceCurve};
use proptest::prelude::*;

fn knots() -> impl Strategy<Value = (Vec<f64>, Vec<f64>)> {
    prop::collection::vec((0.1f64..5.0, -100.0f64..100.0), 2..12).prop_map(|pairs| {
        let mut x = 0.0;
        let mut xs = Vec::with_capacity(pairs.len());
        let mut ys = Vec::with_capacity(pairs.len());
        for (step, y) in pairs {
            x += step;
            xs.push(x);
            ys.push(y);
        }
        (xs, ys)
    })
}

fn scaled_resistance(scale: f64) -> ResistanceCurve {
    let base = ResistanceCurve::default();
    ResistanceCurve::new(
        base.speeds_kn().to_vec(),
        base.powers_kw().iter().map(|p| p * scale).collect(),
    )
    .expect("scaled curve")
}

// ── 보간 ─────────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn interpolant_passes_through_knots((xs, ys) in knots()) {
        let f = Interpolant::new(&xs, &ys).expect("fit");
        for (x, y) in xs.iter().zip(&ys) {
            let v = f.eval(*x);
            prop_assert!((v - y).abs() <= 1e-8 * y.abs().max(1.0), "f({x}) = {v}, expected {y}");
        }
    }

    #[test]
    fn interpolant_is_finite_outside_domain((xs, ys) in knots(), reach in 0.0f64..10.0) {
        let f = Interpolant::new(&xs, &ys).expect("fit");
        let (lo, hi) = f.domain();
        prop_assert!(f.eval(lo - reach).is_finite());
        prop_assert!(f.eval(hi + reach).is_finite());
    }
}

// ── 단독 성능 ─────────────────────────────────────────────────────────

proptest! {
    #[test]
    fn open_water_coefficients_are_physical(
        j in 0.0f64..1.6,
        pod in 0.5f64..1.4,
        ae in 0.4f64..0.8,
        five in any::<bool>(),
    ) {
        let blades = if five { BladeCount::Five } else { BladeCount::Four };
        let model = PerformanceModel::new(blades);
        let p = model.evaluate(j, pod, ae);
        prop_assert!(p.kt >= 0.0);
        prop_assert!(p.kq >= 0.0);
        prop_assert!(p.eta0.is_finite());
        prop_assert_eq!(model.evaluate(0.0, pod, ae).eta0, 0.0);
    }
}

// ── 속력 / 공동 / 최적점 ───────────────────────────────────────────────

proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn predicted_speed_stays_inside_resistance_curve(scale in 0.8f64..1.25, five in any::<bool>()) {
        let blades = if five { BladeCount::Five } else { BladeCount::Four };
        let curve = scaled_resistance(scale);
        let rows = predict_all(blades, &curve, &PropulsionParameters::default()).expect("rows");
        for row in &rows {
            prop_assert!((12.0..=17.0).contains(&row.speed_kn), "{} {}", row.family, row.speed_kn);
            prop_assert!(row.diameter_m.is_finite() && row.diameter_m > 0.0);
        }
    }

    #[test]
    fn optimum_stays_inside_candidate_span(scale in 0.8f64..1.25, immersion in 2.0f64..10.0) {
        let params = PropulsionParameters::default();
        let rows = predict_all(BladeCount::Four, &scaled_resistance(scale), &params).expect("rows");
        let input = CavitationInput { immersion_m: immersion, ..CavitationInput::default() };
        let stage = evaluate(&rows, &params, &input).expect("cavitation");
        if let Ok(opt) = select_optimum(&stage.rows) {
            let lo = stage.rows.iter().map(|r| r.area_ratio).fold(f64::INFINITY, f64::min);
            let hi = stage.rows.iter().map(|r| r.area_ratio).fold(f64::NEG_INFINITY, f64::max);
            prop_assert!(opt.area_ratio >= lo - 1e-12 && opt.area_ratio <= hi + 1e-12);
            prop_assert!(opt.diameter_m > 0.0);
        }
    }
}

proptest! {
    #[test]
    fn tau_c_stays_in_bounds(sigma in 0.01f64..10.0, berlin in any::<bool>()) {
        let criterion = if berlin { CavitationCriterion::Berlin } else { CavitationCriterion::Wageningen };
        let (tau, _) = tau_c(sigma, criterion).expect("tau_c");
        prop_assert!((TAU_C_MIN..=TAU_C_MAX).contains(&tau));
    }

    #[test]
    fn bollard_never_reports_nan(
        kt0 in 0.0f64..0.6,
        kq0 in 0.0f64..0.08,
        diameter in 0.0f64..8.0,
    ) {
        let case = BollardCase { kt0, kq0, diameter_m: diameter, ..BollardCase::default() };
        let b = bollard_pull(&case).expect("bollard");
        prop_assert!(!b.thrust_kn.is_nan());
        prop_assert!(!b.bollard_rpm.is_nan());
        prop_assert!(!b.towrope_pull_kn.is_nan());
        prop_assert!(b.thrust_kn >= 0.0);
    }

    #[test]
    fn station_order_does_not_change_sums(
        stations in Just(MAU_STATIONS.to_vec()).prop_shuffle(),
        diameter in 1.0f64..8.0,
    ) {
        let chord = 0.3 * diameter;
        let base = integrate_stations(&MAU_STATIONS, diameter, chord);
        let shuffled = integrate_stations(&stations, diameter, chord);
        let tol = 1e-12 * base.simpson_sum.abs().max(1.0);
        prop_assert!((base.simpson_sum - shuffled.simpson_sum).abs() <= tol);
        prop_assert!((base.moment_sum - shuffled.moment_sum).abs() <= tol);
        prop_assert!((base.second_moment_sum - shuffled.second_moment_sum).abs() <= tol);
    }
}
