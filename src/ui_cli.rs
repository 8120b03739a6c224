use std::io::{self, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::i18n::{keys, Translator};
use crate::propeller::bollard::BollardPull;
use crate::propeller::cavitation::{CavitationCriterion, CavitationStage, VaporPressure};
use crate::propeller::mass::MassProperties;
use crate::propeller::open_water::{open_water_curve, OpenWaterCurve, PerformanceModel};
use crate::propeller::optimum::OptimumDesignPoint;
use crate::propeller::pitch::PitchCorrection;
use crate::propeller::speed::{speed_sweep, SpeedPredictionResult};
use crate::propeller::strength::StrengthCheck;
use crate::propeller::voyage::VoyageCurve;
use crate::propeller::{BladeCount, DesignSnapshot, ResistanceCurve};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    Speed,
    Cavitation,
    Pitch,
    Mass,
    Strength,
    OpenWater,
    Bollard,
    Voyage,
    Report,
    Settings,
    Exit,
}

/// 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu(tr: &Translator) -> Result<MenuChoice, AppError> {
    for key in [
        keys::MAIN_MENU_TITLE,
        keys::MAIN_MENU_SPEED,
        keys::MAIN_MENU_CAVITATION,
        keys::MAIN_MENU_PITCH,
        keys::MAIN_MENU_MASS,
        keys::MAIN_MENU_STRENGTH,
        keys::MAIN_MENU_OPEN_WATER,
        keys::MAIN_MENU_BOLLARD,
        keys::MAIN_MENU_VOYAGE,
        keys::MAIN_MENU_REPORT,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        println!("{}", tr.t(key));
    }
    loop {
        let sel = read_line(tr.t(keys::PROMPT_MENU_SELECT))?;
        let choice = match sel.trim() {
            "1" => MenuChoice::Speed,
            "2" => MenuChoice::Cavitation,
            "3" => MenuChoice::Pitch,
            "4" => MenuChoice::Mass,
            "5" => MenuChoice::Strength,
            "6" => MenuChoice::OpenWater,
            "7" => MenuChoice::Bollard,
            "8" => MenuChoice::Voyage,
            "9" => MenuChoice::Report,
            "10" => MenuChoice::Settings,
            "0" => MenuChoice::Exit,
            _ => {
                println!("{}", tr.t(keys::INVALID_SELECTION_RETRY));
                continue;
            }
        };
        return Ok(choice);
    }
}

/// 추진 조건을 입력받아 속력 예측 스냅숏을 새로 만든다.
pub fn handle_speed(tr: &Translator, cfg: &mut Config) -> Result<DesignSnapshot, AppError> {
    println!("{}", tr.t(keys::SPEED_HEADING));
    println!("{}", tr.t(keys::PROMPT_KEEP_DEFAULT));
    let design = &mut cfg.design;
    let blades = read_f64_or(tr, keys::PROMPT_BLADES, design.blades.count() as f64)?;
    design.blades = BladeCount::try_from(blades.round() as u32)?;

    let p = &mut design.params;
    p.shaft_power_kw = read_f64_or(tr, keys::PROMPT_SHAFT_POWER, p.shaft_power_kw)?;
    p.rpm = read_f64_or(tr, keys::PROMPT_RPM, p.rpm)?;
    p.shaft_efficiency = read_f64_or(tr, keys::PROMPT_SHAFT_EFFICIENCY, p.shaft_efficiency)?;
    p.relative_rotative_efficiency =
        read_f64_or(tr, keys::PROMPT_ETA_R, p.relative_rotative_efficiency)?;
    p.wake_fraction = read_f64_or(tr, keys::PROMPT_WAKE, p.wake_fraction)?;
    p.thrust_deduction = read_f64_or(tr, keys::PROMPT_THRUST_DEDUCTION, p.thrust_deduction)?;
    p.design_speed_kn = read_f64_or(tr, keys::PROMPT_DESIGN_SPEED, p.design_speed_kn)?;

    let curve = read_line(tr.t(keys::PROMPT_RESISTANCE))?;
    if !curve.trim().is_empty() {
        design.resistance = ResistanceCurve::parse(curve.trim())?;
    }

    let snapshot = DesignSnapshot::predict(design.blades, design.params, design.resistance.clone())?;
    print_speed(tr, snapshot.speed());

    for family in design.blades.families() {
        let sweep = speed_sweep(family, &design.resistance, &design.params, cfg.sweep_samples)?;
        for v in &sweep.crossings_kn {
            println!("  {} PTE = PE @ {v:.2} kn", sweep.family);
        }
    }
    Ok(snapshot)
}

/// 공동 검토와 최적 요소 결정을 함께 수행한다.
pub fn handle_cavitation(
    tr: &Translator,
    cfg: &mut Config,
    snapshot: &DesignSnapshot,
) -> Result<DesignSnapshot, AppError> {
    println!("{}", tr.t(keys::CAVITATION_HEADING));
    println!("{}", tr.t(keys::PROMPT_KEEP_DEFAULT));
    let input = &mut cfg.design.cavitation;
    input.immersion_m = read_f64_or(tr, keys::PROMPT_IMMERSION, input.immersion_m)?;
    let current_temp = match input.vapor_pressure {
        VaporPressure::WaterTemperatureC(t) => t,
        VaporPressure::Pascal(_) => 15.0,
    };
    let temp = read_f64_or(tr, keys::PROMPT_WATER_TEMPERATURE, current_temp)?;
    input.vapor_pressure = VaporPressure::WaterTemperatureC(temp);
    let current_criterion = match input.criterion {
        CavitationCriterion::Wageningen => 1.0,
        CavitationCriterion::Berlin => 2.0,
    };
    input.criterion = match read_f64_or(tr, keys::PROMPT_CRITERION, current_criterion)? as u32 {
        2 => CavitationCriterion::Berlin,
        _ => CavitationCriterion::Wageningen,
    };

    let next = snapshot.with_cavitation(input)?.with_optimum()?;
    if let Some(stage) = next.cavitation() {
        print_cavitation(tr, stage);
    }
    if let Some(optimum) = next.optimum() {
        print_optimum(tr, optimum);
    }
    Ok(next)
}

pub fn handle_pitch(
    tr: &Translator,
    cfg: &mut Config,
    snapshot: &DesignSnapshot,
) -> Result<DesignSnapshot, AppError> {
    println!("{}", tr.t(keys::PITCH_HEADING));
    let input = &mut cfg.design.pitch;
    input.hub_ratio = read_f64_or(tr, keys::PROMPT_HUB_RATIO, input.hub_ratio)?;
    let next = snapshot.with_pitch(input)?;
    if let Some(p) = next.pitch() {
        print_pitch(p);
    }
    Ok(next)
}

pub fn handle_mass(
    tr: &Translator,
    cfg: &mut Config,
    snapshot: &DesignSnapshot,
) -> Result<DesignSnapshot, AppError> {
    println!("{}", tr.t(keys::MASS_HEADING));
    let input = &mut cfg.design.mass;
    input.hub_ratio = read_f64_or(tr, keys::PROMPT_HUB_RATIO, input.hub_ratio)?;
    input.hub_length_m = read_f64_or(tr, keys::PROMPT_HUB_LENGTH, input.hub_length_m)?;
    let d0 = read_f64_or(tr, keys::PROMPT_SHAFT_DIAMETER, input.shaft_diameter_m.unwrap_or(0.0))?;
    input.shaft_diameter_m = (d0 > 0.0).then_some(d0);
    let next = snapshot.with_mass(input)?;
    if let Some(m) = next.mass() {
        print_mass(m);
    }
    Ok(next)
}

pub fn handle_strength(
    tr: &Translator,
    cfg: &mut Config,
    snapshot: &DesignSnapshot,
) -> Result<DesignSnapshot, AppError> {
    println!("{}", tr.t(keys::STRENGTH_HEADING));
    let input = &mut cfg.design.strength;
    input.rake_deg = read_f64_or(tr, keys::PROMPT_RAKE, input.rake_deg)?;
    let next = snapshot.with_strength(input)?;
    if let Some(s) = next.strength() {
        print_strength(s);
    }
    Ok(next)
}

pub fn handle_bollard(
    tr: &Translator,
    cfg: &mut Config,
    snapshot: &DesignSnapshot,
) -> Result<DesignSnapshot, AppError> {
    println!("{}", tr.t(keys::BOLLARD_HEADING));
    let input = &mut cfg.design.bollard;
    input.thrust_deduction = read_f64_or(tr, keys::PROMPT_BOLLARD_T0, input.thrust_deduction)?;
    let next = snapshot.with_bollard(input)?;
    if let Some(b) = next.bollard() {
        print_bollard(b);
    }
    Ok(next)
}

pub fn handle_voyage(
    tr: &Translator,
    cfg: &mut Config,
    snapshot: &DesignSnapshot,
) -> Result<DesignSnapshot, AppError> {
    println!("{}", tr.t(keys::VOYAGE_HEADING));
    let input = &mut cfg.design.voyage;
    let range = read_line(tr.t(keys::PROMPT_SPEED_RANGE))?;
    let values: Vec<f64> = range
        .split(',')
        .filter_map(|s| s.trim().parse().ok())
        .collect();
    if let &[min, max, step] = values.as_slice() {
        input.speed_min_kn = min;
        input.speed_max_kn = max;
        input.speed_step_kn = step;
    }
    let next = snapshot.with_voyage(input)?;
    if let Some(v) = next.voyage() {
        print_voyage(tr, v);
    }
    Ok(next)
}

/// 설계 단계와 무관한 단독 성능 곡선.
pub fn handle_open_water(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::OPEN_WATER_HEADING));
    let blades = read_f64_or(tr, keys::PROMPT_BLADES, cfg.design.blades.count() as f64)?;
    let model = PerformanceModel::for_blade_count(blades.round() as u32)?;
    let input = &mut cfg.open_water;
    input.pitch_ratio = read_f64_or(tr, keys::PROMPT_PITCH_RATIO, input.pitch_ratio)?;
    input.area_ratio = read_f64_or(tr, keys::PROMPT_AREA_RATIO, input.area_ratio)?;
    let curve = open_water_curve(&model, input)?;
    print_open_water(&curve);
    Ok(())
}

/// 언어 설정을 변경한다.
pub fn handle_settings(tr: &Translator, cfg: &mut Config) -> Result<(), AppError> {
    println!("{}", tr.t(keys::SETTINGS_HEADING));
    println!(
        "{} {} ({})",
        tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
        cfg.language,
        tr.language().as_code()
    );
    println!("{}", tr.t(keys::SETTINGS_OPTIONS));
    let sel = read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))?;
    if sel.trim().is_empty() {
        return Ok(());
    }
    let lang = match sel.trim() {
        "1" => "ko",
        "2" => "en",
        "3" => "auto",
        _ => {
            println!("{}", tr.t(keys::SETTINGS_INVALID));
            return Ok(());
        }
    };
    cfg.language = lang.to_string();
    println!("{} {}", tr.t(keys::SETTINGS_SAVED), cfg.language);
    Ok(())
}

pub fn print_speed(tr: &Translator, rows: &[SpeedPredictionResult]) {
    println!(
        "{:<8} {:>8} {:>7} {:>7} {:>7} {:>7}",
        "", "V[kn]", "δ", "P/D", "D[m]", "η0"
    );
    for r in rows {
        println!(
            "{:<8} {:>8.3} {:>7.2} {:>7.4} {:>7.3} {:>7.4}",
            r.family, r.speed_kn, r.delta, r.pitch_ratio, r.diameter_m, r.eta0
        );
        if r.status.is_degraded() {
            println!("  ! {}", tr.t(keys::DEGRADED));
        }
        for w in &r.warnings {
            println!("  ! {w}");
        }
    }
}

pub fn print_cavitation(tr: &Translator, stage: &CavitationStage) {
    println!(
        "Pv = {:.1} Pa, P0 + ρgh = {:.1} Pa",
        stage.vapor_pressure_pa, stage.total_pressure_pa
    );
    for r in &stage.rows {
        println!(
            "{:<8} σ={:.4} τc={:.4} T={:.0} N  Ae/A0 req={:.4}",
            r.family, r.sigma, r.tau_c, r.thrust_n, r.required_area_ratio
        );
    }
    for s in &stage.skipped {
        println!("  ! {} {}: {}", tr.t(keys::ERROR_PREFIX), s.family, s.reason);
    }
}

pub fn print_optimum(tr: &Translator, o: &OptimumDesignPoint) {
    println!("{}", tr.t(keys::OPTIMUM_HEADING));
    println!(
        "x = {:.4}, Ae/A0 = {:.4}, P/D = {:.4}, D = {:.3} m, η0 = {:.4}, V = {:.2} kn",
        o.area_ratio,
        o.blade_area_ratio(),
        o.pitch_ratio,
        o.diameter_m,
        o.eta0,
        o.speed_kn
    );
    if !o.crossing_found {
        println!("  ! {}", tr.t(keys::NO_CROSSING));
    }
}

pub fn print_pitch(p: &PitchCorrection) {
    println!(
        "t/b = {:.5} (std {:.5}), Δ(t/b) = {:.5}",
        p.tb_design, p.tb_standard, p.delta_tb
    );
    println!(
        "ΔP/D = {:.5} (두께 {:.5}, 보스 {:.5})",
        p.delta_pitch_total, p.delta_pitch_thickness, p.delta_pitch_hub
    );
    println!(
        "P/D: {:.4} → {:.4}",
        p.original_pitch_ratio, p.corrected_pitch_ratio
    );
}

pub fn print_mass(m: &MassProperties) {
    println!(
        "날개 {:.1} kg + 보스 {:.1} kg = {:.1} kg",
        m.blade_mass_kg, m.hub_mass_kg, m.total_mass_kg
    );
    println!("d0 = {:.4} m, I = {:.1} kg·m²", m.shaft_diameter_m, m.inertia_kg_m2);
    if let Some(r) = m.stations.radial_centroid() {
        println!("단면적 도심 r/R = {r:.3} (Σ = {:.5})", m.stations.simpson_sum);
    }
}

pub fn print_strength(s: &StrengthCheck) {
    for c in &s.sections {
        println!(
            "{:.2}R: t_req = {:.1} mm, t_std = {:.1} mm → {:.1} mm {}",
            c.r_over_r,
            c.required_mm,
            c.standard_mm,
            c.adopted_mm,
            if c.satisfied { "OK" } else { "NG" }
        );
    }
}

pub fn print_bollard(b: &BollardPull) {
    println!(
        "KT0 = {:.4}, KQ0 = {:.5}, Q = {:.2} kN·m, T = {:.2} kN",
        b.kt0, b.kq0, b.torque_knm, b.thrust_kn
    );
    println!(
        "N_bollard = {:.1} rpm, 예인력 = {:.2} kN",
        b.bollard_rpm, b.towrope_pull_kn
    );
}

pub fn print_voyage(tr: &Translator, v: &VoyageCurve) {
    if v.intersections.is_empty() {
        println!("{}", tr.t(keys::NO_INTERSECTION));
        return;
    }
    for i in &v.intersections {
        println!(
            "{:>6.1} rpm {:<14} V = {:.2} kn, PTE = {:.0} kW, Ps = {:.0} kW",
            i.rpm, i.condition, i.speed_kn, i.pte_kw, i.shaft_power_kw
        );
    }
    if let Some(best) = &v.best {
        println!("→ {:.2} kn @ {:.1} rpm ({})", best.speed_kn, best.rpm, best.condition);
    }
}

pub fn print_open_water(curve: &OpenWaterCurve) {
    println!("{:>5} {:>8} {:>8} {:>8}", "J", "KT", "10KQ", "η0");
    for p in &curve.points {
        println!("{:>5.2} {:>8.4} {:>8.4} {:>8.4}", p.j, p.kt, p.ten_kq, p.eta0);
    }
    if let Some(peak) = curve.peak_efficiency() {
        println!("η0,max = {:.4} @ J = {:.2}", peak.eta0, peak.j);
    }
}

/// 배치 실행 결과 요약.
pub fn print_summary(tr: &Translator, snapshot: &DesignSnapshot) {
    println!("{}", tr.t(keys::SPEED_HEADING));
    print_speed(tr, snapshot.speed());
    if let Some(stage) = snapshot.cavitation() {
        println!("{}", tr.t(keys::CAVITATION_HEADING));
        print_cavitation(tr, stage);
    }
    if let Some(o) = snapshot.optimum() {
        print_optimum(tr, o);
    }
    if let Some(p) = snapshot.pitch() {
        println!("{}", tr.t(keys::PITCH_HEADING));
        print_pitch(p);
    }
    if let Some(m) = snapshot.mass() {
        println!("{}", tr.t(keys::MASS_HEADING));
        print_mass(m);
    }
    if let Some(s) = snapshot.strength() {
        println!("{}", tr.t(keys::STRENGTH_HEADING));
        print_strength(s);
    }
    if let Some(b) = snapshot.bollard() {
        println!("{}", tr.t(keys::BOLLARD_HEADING));
        print_bollard(b);
    }
    if let Some(v) = snapshot.voyage() {
        println!("{}", tr.t(keys::VOYAGE_HEADING));
        print_voyage(tr, v);
    }
}

pub(crate) fn read_line(prompt: &str) -> Result<String, AppError> {
    print!("{prompt}");
    io::stdout().flush()?;
    let mut buf = String::new();
    io::stdin().read_line(&mut buf)?;
    Ok(buf)
}

/// 빈 입력이면 기본값을 돌려준다.
fn read_f64_or(tr: &Translator, key: &str, default: f64) -> Result<f64, AppError> {
    let prompt = format!("{} [{default}]: ", tr.t(key));
    loop {
        let s = read_line(&prompt)?;
        if s.trim().is_empty() {
            return Ok(default);
        }
        match s.trim().parse::<f64>() {
            Ok(v) => return Ok(v),
            Err(_) => println!("{}", tr.t(keys::ERROR_INVALID_NUMBER)),
        }
    }
}
