use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const ERROR_PREFIX: &str = "general.error_prefix";
    pub const APP_EXIT: &str = "general.app_exit";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_SPEED: &str = "main_menu.speed";
    pub const MAIN_MENU_CAVITATION: &str = "main_menu.cavitation";
    pub const MAIN_MENU_PITCH: &str = "main_menu.pitch";
    pub const MAIN_MENU_MASS: &str = "main_menu.mass";
    pub const MAIN_MENU_STRENGTH: &str = "main_menu.strength";
    pub const MAIN_MENU_OPEN_WATER: &str = "main_menu.open_water";
    pub const MAIN_MENU_BOLLARD: &str = "main_menu.bollard";
    pub const MAIN_MENU_VOYAGE: &str = "main_menu.voyage";
    pub const MAIN_MENU_REPORT: &str = "main_menu.report";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const ERROR_INVALID_NUMBER: &str = "error.invalid_number";
    pub const NEED_SPEED_STAGE: &str = "error.need_speed_stage";
    pub const NEED_OPTIMUM_STAGE: &str = "error.need_optimum_stage";

    pub const PROMPT_KEEP_DEFAULT: &str = "prompt.keep_default";
    pub const PROMPT_BLADES: &str = "prompt.blades";
    pub const PROMPT_SHAFT_POWER: &str = "prompt.shaft_power";
    pub const PROMPT_RPM: &str = "prompt.rpm";
    pub const PROMPT_SHAFT_EFFICIENCY: &str = "prompt.shaft_efficiency";
    pub const PROMPT_ETA_R: &str = "prompt.eta_r";
    pub const PROMPT_WAKE: &str = "prompt.wake";
    pub const PROMPT_THRUST_DEDUCTION: &str = "prompt.thrust_deduction";
    pub const PROMPT_DESIGN_SPEED: &str = "prompt.design_speed";
    pub const PROMPT_RESISTANCE: &str = "prompt.resistance";
    pub const PROMPT_IMMERSION: &str = "prompt.immersion";
    pub const PROMPT_WATER_TEMPERATURE: &str = "prompt.water_temperature";
    pub const PROMPT_CRITERION: &str = "prompt.criterion";
    pub const PROMPT_HUB_RATIO: &str = "prompt.hub_ratio";
    pub const PROMPT_HUB_LENGTH: &str = "prompt.hub_length";
    pub const PROMPT_SHAFT_DIAMETER: &str = "prompt.shaft_diameter";
    pub const PROMPT_RAKE: &str = "prompt.rake";
    pub const PROMPT_PITCH_RATIO: &str = "prompt.pitch_ratio";
    pub const PROMPT_AREA_RATIO: &str = "prompt.area_ratio";
    pub const PROMPT_BOLLARD_T0: &str = "prompt.bollard_t0";
    pub const PROMPT_SPEED_RANGE: &str = "prompt.speed_range";
    pub const PROMPT_REPORT_PATH: &str = "prompt.report_path";

    pub const SPEED_HEADING: &str = "speed.heading";
    pub const CAVITATION_HEADING: &str = "cavitation.heading";
    pub const OPTIMUM_HEADING: &str = "optimum.heading";
    pub const PITCH_HEADING: &str = "pitch.heading";
    pub const MASS_HEADING: &str = "mass.heading";
    pub const STRENGTH_HEADING: &str = "strength.heading";
    pub const OPEN_WATER_HEADING: &str = "open_water.heading";
    pub const BOLLARD_HEADING: &str = "bollard.heading";
    pub const VOYAGE_HEADING: &str = "voyage.heading";
    pub const REPORT_SAVED: &str = "report.saved";
    pub const NO_INTERSECTION: &str = "voyage.no_intersection";
    pub const DEGRADED: &str = "speed.degraded";
    pub const NO_CROSSING: &str = "optimum.no_crossing";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    Ko,
    En,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("en") {
            Language::En
        } else {
            Language::Ko
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::Ko => "ko",
            Language::En => "en",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Translator {
    /// 언어 코드(ko/en)에 따라 번역기를 생성한다. 알 수 없는 코드는 ko로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir
            .and_then(|dir| load_overrides(dir, lang_code))
            .or_else(|| load_overrides("locales", lang_code));
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    /// 번역을 가져온다. 영어 번역이 없으면 한국어 문자열을 폴백한다.
    pub fn t(&self, key: &str) -> &'static str {
        if let Some(ref map) = self.overrides {
            if let Some(v) = map.get(key) {
                return Box::leak(v.clone().into_boxed_str());
            }
        }
        match self.lang {
            Language::En => en(key).unwrap_or_else(|| ko(key)),
            Language::Ko => ko(key),
        }
    }
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ko") => Some("ko".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ko" => Some("ko".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    ["LANG", "LC_ALL"]
        .iter()
        .filter_map(|var| std::env::var(var).ok())
        .find_map(|v| normalize_locale_string(&v))
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(path).ok()?;
        parse_toml_to_map(&content)
    };

    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn ko(key: &str) -> &'static str {
    use keys::*;
    match key {
        ERROR_PREFIX => "오류",
        APP_EXIT => "프로그램을 종료합니다.",
        MAIN_MENU_TITLE => "\n=== 프로펠러 설계 (MAU) ===",
        MAIN_MENU_SPEED => "1) 최대 속력 예측",
        MAIN_MENU_CAVITATION => "2) 공동 검토 및 최적 요소 결정",
        MAIN_MENU_PITCH => "3) 피치 수정",
        MAIN_MENU_MASS => "4) 질량 및 관성 모멘트",
        MAIN_MENU_STRENGTH => "5) 강도 검토",
        MAIN_MENU_OPEN_WATER => "6) 단독 성능 곡선",
        MAIN_MENU_BOLLARD => "7) 계주 상태",
        MAIN_MENU_VOYAGE => "8) 항행 특성",
        MAIN_MENU_REPORT => "9) 보고서 저장",
        MAIN_MENU_SETTINGS => "10) 설정",
        MAIN_MENU_EXIT => "0) 종료",
        PROMPT_MENU_SELECT => "메뉴 선택: ",
        INVALID_SELECTION_RETRY => "잘못된 입력입니다. 다시 선택하세요.",
        ERROR_INVALID_NUMBER => "숫자를 입력하세요.",
        NEED_SPEED_STAGE => "먼저 최대 속력 예측을 실행하세요.",
        NEED_OPTIMUM_STAGE => "먼저 공동 검토 및 최적 요소 결정을 실행하세요.",
        PROMPT_KEEP_DEFAULT => "(엔터 입력 시 괄호 안 기본값 사용)",
        PROMPT_BLADES => "날개 수 (4/5)",
        PROMPT_SHAFT_POWER => "주기 출력 Ps [kW]",
        PROMPT_RPM => "회전수 N [rpm]",
        PROMPT_SHAFT_EFFICIENCY => "축계 효율 ηs",
        PROMPT_ETA_R => "상대 회전 효율 ηR",
        PROMPT_WAKE => "반류계수 w",
        PROMPT_THRUST_DEDUCTION => "추력감소계수 t",
        PROMPT_DESIGN_SPEED => "설계 속력 [kn]",
        PROMPT_RESISTANCE => "유효마력 곡선 (속력들;마력들, 엔터 시 기존 유지): ",
        PROMPT_IMMERSION => "축 중심 침수 깊이 [m]",
        PROMPT_WATER_TEMPERATURE => "해수 온도 [°C] (증기압 계산)",
        PROMPT_CRITERION => "공동 기준 (1=Wageningen, 2=Berlin)",
        PROMPT_HUB_RATIO => "보스비 d/D",
        PROMPT_HUB_LENGTH => "보스 길이 Lk [m]",
        PROMPT_SHAFT_DIAMETER => "보스 중앙 축경 d0 [m] (0 = 추정)",
        PROMPT_RAKE => "경사각 [deg]",
        PROMPT_PITCH_RATIO => "피치비 P/D",
        PROMPT_AREA_RATIO => "전개면적비 Ae/A0",
        PROMPT_BOLLARD_T0 => "계주 추력감소계수 t0",
        PROMPT_SPEED_RANGE => "검토 속력 범위 최소,최대,간격 [kn] (엔터 시 기존 유지): ",
        PROMPT_REPORT_PATH => "보고서 파일 경로: ",
        SPEED_HEADING => "\n-- 최대 속력 예측 --",
        CAVITATION_HEADING => "\n-- 공동 검토 --",
        OPTIMUM_HEADING => "\n-- 최적 요소 --",
        PITCH_HEADING => "\n-- 피치 수정 --",
        MASS_HEADING => "\n-- 질량 및 관성 모멘트 --",
        STRENGTH_HEADING => "\n-- 강도 검토 --",
        OPEN_WATER_HEADING => "\n-- 단독 성능 곡선 --",
        BOLLARD_HEADING => "\n-- 계주 상태 --",
        VOYAGE_HEADING => "\n-- 항행 특성 --",
        REPORT_SAVED => "보고서를 저장했습니다:",
        NO_INTERSECTION => "검토 범위 안에서 교점을 찾지 못했습니다.",
        DEGRADED => "수렴 실패, 최대 표본 속력 사용",
        NO_CROSSING => "후보 범위 안에 교점이 없어 최근접점을 사용했습니다.",
        SETTINGS_HEADING => "\n-- 설정 --",
        SETTINGS_CURRENT_LANGUAGE => "현재 언어:",
        SETTINGS_OPTIONS => "1) 한국어  2) English  3) 자동",
        SETTINGS_PROMPT_CHANGE => "변경할 번호(취소하려면 엔터): ",
        SETTINGS_INVALID => "잘못된 입력이므로 변경하지 않습니다.",
        SETTINGS_SAVED => "언어 설정이 변경되었습니다 (다음 실행부터 적용):",
        _ => "[missing translation]",
    }
}

fn en(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        ERROR_PREFIX => "Error",
        APP_EXIT => "Exiting application.",
        MAIN_MENU_TITLE => "\n=== Propeller Design (MAU) ===",
        MAIN_MENU_SPEED => "1) Maximum speed prediction",
        MAIN_MENU_CAVITATION => "2) Cavitation check and optimum selection",
        MAIN_MENU_PITCH => "3) Pitch correction",
        MAIN_MENU_MASS => "4) Mass and moment of inertia",
        MAIN_MENU_STRENGTH => "5) Blade strength",
        MAIN_MENU_OPEN_WATER => "6) Open-water curve",
        MAIN_MENU_BOLLARD => "7) Bollard pull",
        MAIN_MENU_VOYAGE => "8) Voyage performance",
        MAIN_MENU_REPORT => "9) Save report",
        MAIN_MENU_SETTINGS => "10) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        ERROR_INVALID_NUMBER => "Please enter a number.",
        NEED_SPEED_STAGE => "Run the speed prediction first.",
        NEED_OPTIMUM_STAGE => "Run the cavitation check and optimum selection first.",
        PROMPT_KEEP_DEFAULT => "(press enter to keep the value in brackets)",
        PROMPT_BLADES => "Blade count (4/5)",
        PROMPT_SHAFT_POWER => "Shaft power Ps [kW]",
        PROMPT_RPM => "Shaft speed N [rpm]",
        PROMPT_SHAFT_EFFICIENCY => "Shaft efficiency ηs",
        PROMPT_ETA_R => "Relative rotative efficiency ηR",
        PROMPT_WAKE => "Wake fraction w",
        PROMPT_THRUST_DEDUCTION => "Thrust deduction t",
        PROMPT_DESIGN_SPEED => "Design speed [kn]",
        PROMPT_RESISTANCE => "Effective power curve (speeds;powers, enter keeps current): ",
        PROMPT_IMMERSION => "Shaft immersion [m]",
        PROMPT_WATER_TEMPERATURE => "Sea water temperature [°C] (vapour pressure)",
        PROMPT_CRITERION => "Cavitation criterion (1=Wageningen, 2=Berlin)",
        PROMPT_HUB_RATIO => "Hub ratio d/D",
        PROMPT_HUB_LENGTH => "Hub length Lk [m]",
        PROMPT_SHAFT_DIAMETER => "Shaft diameter at hub centre d0 [m] (0 = estimate)",
        PROMPT_RAKE => "Rake angle [deg]",
        PROMPT_PITCH_RATIO => "Pitch ratio P/D",
        PROMPT_AREA_RATIO => "Expanded area ratio Ae/A0",
        PROMPT_BOLLARD_T0 => "Bollard thrust deduction t0",
        PROMPT_SPEED_RANGE => "Speed range min,max,step [kn] (enter keeps current): ",
        PROMPT_REPORT_PATH => "Report file path: ",
        SPEED_HEADING => "\n-- Maximum Speed --",
        CAVITATION_HEADING => "\n-- Cavitation --",
        OPTIMUM_HEADING => "\n-- Optimum --",
        PITCH_HEADING => "\n-- Pitch Correction --",
        MASS_HEADING => "\n-- Mass and Inertia --",
        STRENGTH_HEADING => "\n-- Blade Strength --",
        OPEN_WATER_HEADING => "\n-- Open-Water Curve --",
        BOLLARD_HEADING => "\n-- Bollard Pull --",
        VOYAGE_HEADING => "\n-- Voyage Performance --",
        REPORT_SAVED => "Report saved:",
        NO_INTERSECTION => "No intersection found inside the speed range.",
        DEGRADED => "solver failed, maximum sampled speed used",
        NO_CROSSING => "No crossing inside the candidate range; nearest point used.",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_OPTIONS => "1) 한국어  2) English  3) Auto",
        SETTINGS_PROMPT_CHANGE => "Enter number to change (enter to cancel): ",
        SETTINGS_INVALID => "Invalid input; language unchanged.",
        SETTINGS_SAVED => "Language changed (applies on next start):",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn english_falls_back_to_korean_for_unknown_keys() {
        let tr = Translator::new("en");
        assert_eq!(tr.t(keys::APP_EXIT), "Exiting application.");
        assert_eq!(tr.t("no.such.key"), "[missing translation]");
    }

    #[test]
    fn cli_flag_wins_over_config() {
        assert_eq!(resolve_language(Some("ko-KR"), Some("en")), "ko");
        assert_eq!(resolve_language(Some("auto"), Some("en-GB")), "en");
    }

    #[test]
    fn nested_pack_tables_are_flattened() {
        let map = parse_toml_to_map("[main_menu]\ntitle = \"X\"\n").expect("map");
        assert_eq!(map.get(keys::MAIN_MENU_TITLE).map(String::as_str), Some("X"));
    }
}
