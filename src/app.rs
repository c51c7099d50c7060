use std::io::{BufRead, Write};
use std::path::Path;

use crate::config::{Config, ConfigError};
use crate::conversion::{self, Conversion, ConversionError};
use crate::i18n::{self, Translator};
use crate::state::{UiEvent, UiState};
use crate::ui_cli::{self, MenuChoice, Terminal};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(ConfigError),
    /// 변환 오류
    Conversion(ConversionError),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "I/O error: {e}"),
            AppError::Config(e) => write!(f, "{e}"),
            AppError::Conversion(e) => write!(f, "{e}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<ConversionError> for AppError {
    fn from(value: ConversionError) -> Self {
        AppError::Conversion(value)
    }
}

/// 설정에 맞는 번역기를 만든다. `cli_lang` 이 있으면 설정보다 우선한다.
pub fn translator_for(config: &Config, cli_lang: Option<&str>) -> Translator {
    let lang = i18n::resolve_language(cli_lang, Some(config.language.as_str()));
    Translator::new_with_pack(&lang, config.locale_dir.as_deref())
}

/// 값 하나를 변환해 결과 문장을 돌려준다.
///
/// `to` 는 코드나 표시 이름이다. 없으면 설정의 기본 변환을 쓴다.
pub fn convert_once(
    config: &Config,
    tr: &Translator,
    value: &str,
    to: Option<&str>,
) -> Result<String, AppError> {
    let label = match to {
        Some(name) => name.parse::<Conversion>().map(Conversion::label).unwrap_or(name),
        None => config.default_conversion.label(),
    };
    let result = conversion::convert_input(value, label)?;
    Ok(tr.result_line(result))
}

/// 한 번 변환하고 결과 또는 고정 오류 문장을 출력한다. 성공하면 true.
pub fn run_convert<W: Write, E: Write>(
    out: &mut W,
    err: &mut E,
    config: &Config,
    tr: &Translator,
    value: &str,
    to: Option<&str>,
) -> Result<bool, AppError> {
    match convert_once(config, tr, value, to) {
        Ok(line) => {
            writeln!(out, "{line}")?;
            Ok(true)
        }
        Err(AppError::Conversion(e)) => {
            log::warn!("{e}");
            writeln!(err, "{}", tr.t(i18n::keys::ERROR_INPUT_OR_SELECTION))?;
            Ok(false)
        }
        Err(e) => Err(e),
    }
}

/// 표준 입출력으로 대화형 메뉴를 실행한다.
pub fn run(config: &mut Config, config_path: &Path, tr: Translator) -> Result<(), AppError> {
    let mut term = ui_cli::stdio();
    run_with(&mut term, config, config_path, tr)
}

/// 대화형 메뉴의 메인 루프. 입력이 끝나면(EOF) 종료한다.
pub fn run_with<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    config: &mut Config,
    config_path: &Path,
    mut tr: Translator,
) -> Result<(), AppError> {
    let mut state = UiState::new(config.default_conversion);
    loop {
        match ui_cli::main_menu(term, &tr, &state)? {
            MenuChoice::EnterValue => state = ui_cli::handle_enter_value(term, &tr, state)?,
            MenuChoice::ChooseConversion => {
                state = ui_cli::handle_choose_conversion(term, &tr, state)?
            }
            MenuChoice::Convert => {
                state = state.update(UiEvent::Submitted);
                term.say(&state.result_text(&tr))?;
            }
            MenuChoice::Settings => {
                if ui_cli::handle_settings(term, &tr, config)? {
                    config.save_to(config_path)?;
                    tr = translator_for(config, None);
                    term.say(tr.t(i18n::keys::SETTINGS_SAVED))?;
                }
            }
            MenuChoice::Exit => {
                term.say(tr.t(i18n::keys::APP_EXIT))?;
                break;
            }
        }
    }
    Ok(())
}
