use std::io;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use pocket_converter::{app, config, ui_cli};

/// 단위/통화 변환기 CLI.
#[derive(Debug, Parser)]
#[command(name = "pocket_converter_cli", version, about = "Unit and currency converter")]
struct Cli {
    /// UI language: auto, en, ru
    #[arg(short = 'L', long, global = true)]
    lang: Option<String>,
    /// Path to the settings file
    #[arg(long, global = true, default_value = config::CONFIG_FILE)]
    config: PathBuf,
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Convert a single value and print the result line
    Convert {
        /// Value to convert; ',' is accepted as decimal separator
        #[arg(allow_hyphen_values = true)]
        value: String,
        /// Conversion code (km-mi, c-f, ...) or its label
        #[arg(short, long)]
        to: Option<String>,
    },
    /// List available conversions in menu order
    List,
}

/// 프로그램의 엔트리 포인트. 설정을 로드한 뒤 요청된 명령을 실행한다.
fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();
    match try_run(cli) {
        Ok(code) => code,
        Err(err) => {
            log::error!("{err}");
            eprintln!("{err}");
            ExitCode::FAILURE
        }
    }
}

fn try_run(cli: Cli) -> Result<ExitCode, app::AppError> {
    let mut cfg = config::load_or_default_from(&cli.config)?;
    let tr = app::translator_for(&cfg, cli.lang.as_deref());
    log::debug!("language: {}", tr.language_code());

    match cli.command {
        None => {
            app::run(&mut cfg, &cli.config, tr)?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::List) => {
            ui_cli::print_table(&mut io::stdout())?;
            Ok(ExitCode::SUCCESS)
        }
        Some(Command::Convert { value, to }) => {
            let ok = app::run_convert(
                &mut io::stdout(),
                &mut io::stderr(),
                &cfg,
                &tr,
                &value,
                to.as_deref(),
            )?;
            Ok(if ok { ExitCode::SUCCESS } else { ExitCode::FAILURE })
        }
    }
}
