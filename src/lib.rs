//! 계산 로직을 라이브러리로 분리하여 대화형 CLI와 배치 실행이 같은 파이프라인을 쓴다.

pub mod app;
pub mod config;
pub mod fluid;
pub mod i18n;
pub mod numeric;
pub mod propeller;
pub mod ui_cli;
pub mod units;
