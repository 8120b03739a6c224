use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use propeller_design::i18n::{resolve_language, Translator};
use propeller_design::propeller::snapshot::run_pipeline;
use propeller_design::{app, config, ui_cli};

#[derive(Parser, Debug)]
#[command(name = "propeller_design")]
#[command(version)]
#[command(about = "MAU 고정피치 프로펠러 도표 설계")]
struct Cli {
    /// 설정 파일 경로
    #[arg(short, long, global = true, default_value = config::DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// 표시 언어 (ko/en/auto)
    #[arg(short, long, global = true)]
    lang: Option<String>,

    /// 언어팩 디렉터리
    #[arg(long, global = true)]
    locales: Option<String>,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// 번호 메뉴로 단계별 계산 (기본)
    Interactive,
    /// 설정 파일의 입력으로 전체 단계를 한 번에 계산
    Run {
        /// 결과 스냅숏을 TOML 보고서로 저장
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 CLI 애플리케이션을 실행한다.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(err) = try_run() {
        eprintln!("오류: {err}");
        std::process::exit(1);
    }
}

fn try_run() -> Result<(), app::AppError> {
    let cli = Cli::parse();
    let mut cfg = config::load_or_default(&cli.config)?;
    let lang = resolve_language(cli.lang.as_deref(), cfg.language_preference());
    let tr = Translator::new_with_pack(&lang, cli.locales.as_deref());

    match cli.command.unwrap_or(Command::Interactive) {
        Command::Interactive => app::run(&mut cfg, &cli.config, &tr)?,
        Command::Run { output } => {
            let snapshot = run_pipeline(&cfg.design)?;
            ui_cli::print_summary(&tr, &snapshot);
            if let Some(path) = output {
                app::write_report(&snapshot, &path)?;
            }
        }
    }
    Ok(())
}
