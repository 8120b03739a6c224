use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::propeller::open_water::OpenWaterCurveInput;
use crate::propeller::snapshot::DesignInputs;

/// 기본 설정 파일 이름
pub const DEFAULT_CONFIG_PATH: &str = "config.toml";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// 언어 코드 (ko/en/auto)
    pub language: String,
    /// 속력 스윕 표본 수
    pub sweep_samples: usize,
    /// 설계 입력 기본값
    pub design: DesignInputs,
    /// 단독 성능 곡선 기본 입력
    pub open_water: OpenWaterCurveInput,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            sweep_samples: 51,
            design: DesignInputs::default(),
            open_water: OpenWaterCurveInput::default(),
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// 파일 입출력 오류
    #[error("파일 입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// TOML 역직렬화 오류
    #[error("설정 파싱 오류: {0}")]
    Serde(#[from] toml::de::Error),
    /// TOML 직렬화 오류
    #[error("설정 직렬화 오류: {0}")]
    Serialize(#[from] toml::ser::Error),
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성해 저장한다.
pub fn load_or_default(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
    let path = path.as_ref();
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg: Config = toml::from_str(&content)?;
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        tracing::info!(path = %path.display(), "default config written");
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 TOML로 저장한다.
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }

    /// "auto"는 None으로 본다.
    pub fn language_preference(&self) -> Option<&str> {
        match self.language.trim() {
            "" | "auto" => None,
            other => Some(other),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_survives_toml() {
        let cfg = Config::default();
        let text = toml::to_string_pretty(&cfg).expect("serialize");
        let back: Config = toml::from_str(&text).expect("parse");
        assert_eq!(back, cfg);
    }

    #[test]
    fn partial_file_fills_defaults() {
        let cfg: Config = toml::from_str("language = \"en\"\n").expect("parse");
        assert_eq!(cfg.language_preference(), Some("en"));
        assert_eq!(cfg.design, DesignInputs::default());
    }

    #[test]
    fn bad_resistance_curve_is_rejected() {
        let text = "[design.resistance]\nspeeds_kn = [13.0, 12.0]\npowers_kw = [1.0, 2.0]\n";
        assert!(toml::from_str::<Config>(text).is_err());
    }
}
