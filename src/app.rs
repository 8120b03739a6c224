use std::fs;
use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::config::{Config, ConfigError};
use crate::i18n::{self, Translator};
use crate::propeller::{DesignError, DesignSnapshot};
use crate::ui_cli;
use crate::ui_cli::MenuChoice;

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug, Error)]
pub enum AppError {
    /// 파일 입출력 오류
    #[error("입출력 오류: {0}")]
    Io(#[from] std::io::Error),
    /// 설정 저장/로드 오류
    #[error("설정 오류: {0}")]
    Config(#[from] ConfigError),
    /// 설계 계산 오류
    #[error("설계 계산 오류: {0}")]
    Design(#[from] DesignError),
    /// 보고서 직렬화 오류
    #[error("보고서 작성 오류: {0}")]
    Report(#[from] toml::ser::Error),
}

/// 스냅숏 전체를 TOML 보고서로 저장한다.
pub fn write_report(snapshot: &DesignSnapshot, path: impl AsRef<Path>) -> Result<(), AppError> {
    let content = toml::to_string_pretty(snapshot)?;
    fs::write(path.as_ref(), content)?;
    tracing::info!(path = %path.as_ref().display(), revision = snapshot.revision, "report written");
    Ok(())
}

/// CLI 애플리케이션의 메인 루프를 실행한다.
/// 계산 오류는 출력만 하고 메뉴로 돌아간다.
pub fn run(config: &mut Config, config_path: &Path, tr: &Translator) -> Result<(), AppError> {
    let mut snapshot: Option<DesignSnapshot> = None;
    loop {
        let choice = ui_cli::main_menu(tr)?;
        let outcome = match choice {
            MenuChoice::Speed => ui_cli::handle_speed(tr, config).map(|s| snapshot = Some(s)),
            MenuChoice::OpenWater => ui_cli::handle_open_water(tr, config),
            MenuChoice::Settings => {
                ui_cli::handle_settings(tr, config)?;
                config.save(config_path)?;
                Ok(())
            }
            MenuChoice::Exit => {
                config.save(config_path)?;
                println!("{}", tr.t(i18n::keys::APP_EXIT));
                break;
            }
            stage => {
                let next = match snapshot.as_ref() {
                    None => {
                        println!("{}", tr.t(i18n::keys::NEED_SPEED_STAGE));
                        Ok(None)
                    }
                    Some(current) => run_stage(stage, tr, config, current),
                };
                next.map(|next| {
                    if next.is_some() {
                        snapshot = next;
                    }
                })
            }
        };
        if let Err(err) = outcome {
            match err {
                AppError::Design(DesignError::MissingStage(_)) => {
                    println!("{}", tr.t(i18n::keys::NEED_OPTIMUM_STAGE))
                }
                other => println!("{}: {other}", tr.t(i18n::keys::ERROR_PREFIX)),
            }
        }
    }
    Ok(())
}

/// 스냅숏이 필요한 메뉴를 처리한다. 새 스냅숏이 생기면 돌려준다.
fn run_stage(
    stage: MenuChoice,
    tr: &Translator,
    config: &mut Config,
    current: &DesignSnapshot,
) -> Result<Option<DesignSnapshot>, AppError> {
    let next = match stage {
        MenuChoice::Cavitation => ui_cli::handle_cavitation(tr, config, current)?,
        MenuChoice::Pitch => ui_cli::handle_pitch(tr, config, current)?,
        MenuChoice::Mass => ui_cli::handle_mass(tr, config, current)?,
        MenuChoice::Strength => ui_cli::handle_strength(tr, config, current)?,
        MenuChoice::Bollard => ui_cli::handle_bollard(tr, config, current)?,
        MenuChoice::Voyage => ui_cli::handle_voyage(tr, config, current)?,
        MenuChoice::Report => {
            let path = ui_cli::read_line(tr.t(i18n::keys::PROMPT_REPORT_PATH))?;
            let path = PathBuf::from(path.trim());
            write_report(current, &path)?;
            println!("{} {}", tr.t(i18n::keys::REPORT_SAVED), path.display());
            return Ok(None);
        }
        _ => return Ok(None),
    };
    Ok(Some(next))
}
