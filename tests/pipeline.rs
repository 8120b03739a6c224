//! 스냅숏 버전 관리와 전체 파이프라인 회귀 테스트.
use propeller_design::app::write_report;
use propeller_design::propeller::cavitation::{CavitationCriterion, CavitationInput};
use propeller_design::propeller::mass::MassInput;
use propeller_design::propeller::pitch::PitchCorrectionInput;
use propeller_design::propeller::snapshot::{run_pipeline, DesignInputs};
use propeller_design::propeller::voyage::VoyageInput;
use propeller_design::propeller::{
    BladeCount, DesignError, DesignSnapshot, PropulsionParameters, ResistanceCurve, Stage,
};

fn predicted() -> DesignSnapshot {
    DesignSnapshot::predict(
        BladeCount::Four,
        PropulsionParameters::default(),
        ResistanceCurve::default(),
    )
    .expect("predict")
}

#[test]
fn full_pipeline_fills_every_stage() {
    let snap = run_pipeline(&DesignInputs::default()).expect("pipeline");
    assert_eq!(snap.revision, 7);
    assert_eq!(snap.speed().len(), 3);
    assert!(snap.cavitation().is_some());
    assert!(snap.optimum().is_some());
    assert!(snap.pitch().is_some());
    assert!(snap.mass().is_some());
    assert!(snap.strength().is_some());
    assert!(snap.bollard().is_some());
    assert!(snap.voyage().is_some());

    let optimum = snap.optimum().expect("optimum");
    let mass = snap.mass().expect("mass");
    assert_eq!(mass.diameter_m, optimum.diameter_m);
    assert_eq!(snap.bollard().expect("bollard").diameter_m, optimum.diameter_m);
}

#[test]
fn five_blade_pipeline_runs() {
    let inputs = DesignInputs {
        blades: BladeCount::Five,
        ..DesignInputs::default()
    };
    let snap = run_pipeline(&inputs).expect("pipeline");
    let names: Vec<&str> = snap.speed().iter().map(|r| r.family).collect();
    assert_eq!(names, vec!["MAU5-50", "MAU5-65", "MAU5-80"]);
}

#[test]
fn later_stages_need_their_predecessors() {
    let snap = predicted();
    assert_eq!(snap.revision, 0);
    assert!(matches!(
        snap.with_optimum(),
        Err(DesignError::MissingStage(Stage::Cavitation))
    ));
    assert!(matches!(
        snap.with_pitch(&PitchCorrectionInput::default()),
        Err(DesignError::MissingStage(Stage::Optimum))
    ));
    assert!(matches!(
        snap.with_voyage(&VoyageInput::default()),
        Err(DesignError::MissingStage(Stage::Optimum))
    ));

    let cav = snap
        .with_cavitation(&CavitationInput::default())
        .expect("cavitation");
    assert!(matches!(
        cav.with_mass(&MassInput::default()),
        Err(DesignError::MissingStage(Stage::Optimum))
    ));
}

#[test]
fn recomputing_cavitation_clears_downstream() {
    let full = run_pipeline(&DesignInputs::default()).expect("pipeline");
    let berlin = CavitationInput {
        criterion: CavitationCriterion::Berlin,
        ..CavitationInput::default()
    };
    let redone = full.with_cavitation(&berlin).expect("cavitation");

    assert_eq!(redone.revision, full.revision + 1);
    assert_eq!(
        redone.cavitation().expect("stage").criterion,
        CavitationCriterion::Berlin
    );
    assert!(redone.optimum().is_none());
    assert!(redone.pitch().is_none());
    assert!(redone.mass().is_none());
    assert!(redone.strength().is_none());
    assert!(redone.bollard().is_none());
    assert!(redone.voyage().is_none());

    // 이전 버전은 그대로
    assert!(full.voyage().is_some());
    assert_eq!(
        full.cavitation().expect("stage").criterion,
        CavitationCriterion::Wageningen
    );
}

#[test]
fn reselecting_optimum_clears_geometry() {
    let full = run_pipeline(&DesignInputs::default()).expect("pipeline");
    let again = full.with_optimum().expect("optimum");
    assert_eq!(again.optimum(), full.optimum());
    assert!(again.pitch().is_none());
    assert!(again.voyage().is_none());
    assert!(again.cavitation().is_some());
}

#[test]
fn failed_stage_keeps_previous_snapshot() {
    let snap = predicted()
        .with_cavitation(&CavitationInput::default())
        .expect("cavitation")
        .with_optimum()
        .expect("optimum");
    let before = snap.clone();
    let bad = MassInput {
        density: -1.0,
        ..MassInput::default()
    };
    assert!(matches!(
        snap.with_mass(&bad),
        Err(DesignError::InvalidInput(_))
    ));
    assert_eq!(snap, before);
    assert!(snap.mass().is_none());
}

#[test]
fn report_is_written_as_toml() {
    let snap = run_pipeline(&DesignInputs::default()).expect("pipeline");
    let text = toml::to_string_pretty(&snap).expect("serialize");
    assert!(text.contains("revision = 7"));
    assert!(text.contains("MAU4-55"));

    let path = std::env::temp_dir().join(format!(
        "propeller_design_report_{}.toml",
        std::process::id()
    ));
    write_report(&snap, &path).expect("write");
    let written = std::fs::read_to_string(&path).expect("read back");
    let _ = std::fs::remove_file(&path);
    assert_eq!(written, text);
}
