//! 설계 스냅숏: 단계별 결과를 한 버전으로 묶는다.
//!
//! 각 `with_*` 호출은 기존 스냅숏을 건드리지 않고 새 버전을 돌려준다.
//! 선행 단계를 다시 계산하면 그 뒤 단계 결과는 비워진다.

use serde::{Deserialize, Serialize};
use tracing::info;

use super::bollard::{bollard_for_design, BollardInput, BollardPull};
use super::cavitation::{self, CavitationInput, CavitationStage};
use super::mass::{mass_properties, MassInput, MassProperties};
use super::open_water::PerformanceModel;
use super::optimum::{select_optimum, OptimumDesignPoint};
use super::params::{PropulsionParameters, ResistanceCurve};
use super::pitch::{correct_pitch, PitchCorrection, PitchCorrectionInput};
use super::series::BladeCount;
use super::speed::{predict_all, SpeedPredictionResult};
use super::strength::{check_strength, StrengthCheck, StrengthInput};
use super::voyage::{voyage_curve, VoyageCurve, VoyageInput};
use super::{DesignError, Result, Stage};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DesignSnapshot {
    /// 0부터 시작해 단계가 추가될 때마다 1씩 증가
    pub revision: u32,
    pub blades: BladeCount,
    pub params: PropulsionParameters,
    pub resistance: ResistanceCurve,
    speed: Vec<SpeedPredictionResult>,
    cavitation: Option<CavitationStage>,
    optimum: Option<OptimumDesignPoint>,
    pitch: Option<PitchCorrection>,
    mass: Option<MassProperties>,
    strength: Option<StrengthCheck>,
    bollard: Option<BollardPull>,
    voyage: Option<VoyageCurve>,
}

impl DesignSnapshot {
    /// 속력 예측까지 수행한 첫 스냅숏.
    pub fn predict(
        blades: BladeCount,
        params: PropulsionParameters,
        resistance: ResistanceCurve,
    ) -> Result<Self> {
        let speed = predict_all(blades, &resistance, &params)?;
        info!(%blades, rows = speed.len(), "speed prediction done");
        Ok(Self {
            revision: 0,
            blades,
            params,
            resistance,
            speed,
            cavitation: None,
            optimum: None,
            pitch: None,
            mass: None,
            strength: None,
            bollard: None,
            voyage: None,
        })
    }

    fn next(&self) -> Self {
        let mut next = self.clone();
        next.revision += 1;
        next
    }

    fn clear_after_optimum(&mut self) {
        self.pitch = None;
        self.mass = None;
        self.strength = None;
        self.bollard = None;
        self.voyage = None;
    }

    pub fn speed(&self) -> &[SpeedPredictionResult] {
        &self.speed
    }

    pub fn cavitation(&self) -> Option<&CavitationStage> {
        self.cavitation.as_ref()
    }

    pub fn optimum(&self) -> Option<&OptimumDesignPoint> {
        self.optimum.as_ref()
    }

    pub fn pitch(&self) -> Option<&PitchCorrection> {
        self.pitch.as_ref()
    }

    pub fn mass(&self) -> Option<&MassProperties> {
        self.mass.as_ref()
    }

    pub fn strength(&self) -> Option<&StrengthCheck> {
        self.strength.as_ref()
    }

    pub fn bollard(&self) -> Option<&BollardPull> {
        self.bollard.as_ref()
    }

    pub fn voyage(&self) -> Option<&VoyageCurve> {
        self.voyage.as_ref()
    }

    fn require_optimum(&self) -> Result<&OptimumDesignPoint> {
        self.optimum
            .as_ref()
            .ok_or(DesignError::MissingStage(Stage::Optimum))
    }

    pub fn with_cavitation(&self, input: &CavitationInput) -> Result<Self> {
        let stage = cavitation::evaluate(&self.speed, &self.params, input)?;
        let mut next = self.next();
        next.cavitation = Some(stage);
        next.optimum = None;
        next.clear_after_optimum();
        Ok(next)
    }

    pub fn with_optimum(&self) -> Result<Self> {
        let stage = self
            .cavitation
            .as_ref()
            .ok_or(DesignError::MissingStage(Stage::Cavitation))?;
        let optimum = select_optimum(&stage.rows)?;
        info!(
            area_ratio = optimum.area_ratio,
            diameter = optimum.diameter_m,
            "optimum selected"
        );
        let mut next = self.next();
        next.optimum = Some(optimum);
        next.clear_after_optimum();
        Ok(next)
    }

    pub fn with_pitch(&self, input: &PitchCorrectionInput) -> Result<Self> {
        let pitch = correct_pitch(self.require_optimum()?, &self.params, self.blades, input)?;
        let mut next = self.next();
        next.pitch = Some(pitch);
        Ok(next)
    }

    pub fn with_mass(&self, input: &MassInput) -> Result<Self> {
        let mass = mass_properties(self.require_optimum()?, &self.params, self.blades, input)?;
        let mut next = self.next();
        next.mass = Some(mass);
        Ok(next)
    }

    pub fn with_strength(&self, input: &StrengthInput) -> Result<Self> {
        let strength = check_strength(self.require_optimum()?, &self.params, self.blades, input)?;
        let mut next = self.next();
        next.strength = Some(strength);
        Ok(next)
    }

    pub fn with_bollard(&self, input: &BollardInput) -> Result<Self> {
        let model = PerformanceModel::new(self.blades);
        let bollard = bollard_for_design(self.require_optimum()?, &self.params, &model, input)?;
        let mut next = self.next();
        next.bollard = Some(bollard);
        Ok(next)
    }

    pub fn with_voyage(&self, input: &VoyageInput) -> Result<Self> {
        let model = PerformanceModel::new(self.blades);
        let voyage = voyage_curve(
            self.require_optimum()?,
            &self.params,
            &model,
            &self.resistance,
            input,
        )?;
        let mut next = self.next();
        next.voyage = Some(voyage);
        Ok(next)
    }
}

/// 전체 파이프라인 입력. 설정 파일의 `[design]` 표에 대응한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DesignInputs {
    pub blades: BladeCount,
    pub params: PropulsionParameters,
    pub resistance: ResistanceCurve,
    pub cavitation: CavitationInput,
    pub pitch: PitchCorrectionInput,
    pub mass: MassInput,
    pub strength: StrengthInput,
    pub bollard: BollardInput,
    pub voyage: VoyageInput,
}

impl Default for DesignInputs {
    fn default() -> Self {
        Self {
            blades: BladeCount::Four,
            params: PropulsionParameters::default(),
            resistance: ResistanceCurve::default(),
            cavitation: CavitationInput::default(),
            pitch: PitchCorrectionInput::default(),
            mass: MassInput::default(),
            strength: StrengthInput::default(),
            bollard: BollardInput::default(),
            voyage: VoyageInput::default(),
        }
    }
}

/// 모든 단계를 순서대로 실행한다.
pub fn run_pipeline(inputs: &DesignInputs) -> Result<DesignSnapshot> {
    DesignSnapshot::predict(inputs.blades, inputs.params, inputs.resistance.clone())?
        .with_cavitation(&inputs.cavitation)?
        .with_optimum()?
        .with_pitch(&inputs.pitch)?
        .with_mass(&inputs.mass)?
        .with_strength(&inputs.strength)?
        .with_bollard(&inputs.bollard)?
        .with_voyage(&inputs.voyage)
}
