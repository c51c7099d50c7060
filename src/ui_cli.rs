use std::io::{self, BufRead, Write};

use crate::app::AppError;
use crate::config::Config;
use crate::conversion::Conversion;
use crate::i18n::{keys, Translator};
use crate::state::{UiEvent, UiState};

/// 메인 메뉴 선택지를 표현한다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuChoice {
    EnterValue,
    ChooseConversion,
    Convert,
    Settings,
    Exit,
}

/// 줄 단위 입력과 출력을 묶는다. 테스트에서는 메모리 버퍼를 넣는다.
pub struct Terminal<R, W> {
    input: R,
    output: W,
}

/// 표준 입출력에 연결된 터미널.
pub fn stdio() -> Terminal<io::StdinLock<'static>, io::Stdout> {
    Terminal::new(io::stdin().lock(), io::stdout())
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_output(self) -> W {
        self.output
    }

    /// 한 줄을 출력한다.
    pub fn say(&mut self, line: &str) -> Result<(), AppError> {
        writeln!(self.output, "{line}")?;
        Ok(())
    }

    /// 프롬프트를 출력하고 한 줄을 읽는다. 입력이 끝났으면 None.
    fn read_line(&mut self, prompt: &str) -> Result<Option<String>, AppError> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;
        let mut buf = String::new();
        if self.input.read_line(&mut buf)? == 0 {
            return Ok(None);
        }
        Ok(Some(buf.trim_end_matches(['\r', '\n']).to_string()))
    }
}

/// 현재 상태와 메인 메뉴를 표시하고 선택값을 반환한다.
pub fn main_menu<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    tr: &Translator,
    state: &UiState,
) -> Result<MenuChoice, AppError> {
    term.say(tr.t(keys::MAIN_MENU_TITLE))?;
    term.say(&format!("{} {}", tr.t(keys::STATUS_INPUT), state.input_text))?;
    term.say(&format!("{} {}", tr.t(keys::STATUS_SELECTED), state.selected_label()))?;
    let result = state.result_text(tr);
    if !result.is_empty() {
        term.say(&result)?;
    }
    for key in [
        keys::MAIN_MENU_INPUT,
        keys::MAIN_MENU_SELECT,
        keys::MAIN_MENU_CONVERT,
        keys::MAIN_MENU_SETTINGS,
        keys::MAIN_MENU_EXIT,
    ] {
        term.say(tr.t(key))?;
    }
    loop {
        let Some(sel) = term.read_line(tr.t(keys::PROMPT_MENU_SELECT))? else {
            return Ok(MenuChoice::Exit);
        };
        match sel.trim() {
            "1" => return Ok(MenuChoice::EnterValue),
            "2" => return Ok(MenuChoice::ChooseConversion),
            "3" => return Ok(MenuChoice::Convert),
            "4" => return Ok(MenuChoice::Settings),
            "0" => return Ok(MenuChoice::Exit),
            _ => term.say(tr.t(keys::INVALID_SELECTION_RETRY))?,
        }
    }
}

/// 값 입력을 받아 상태에 반영한다.
pub fn handle_enter_value<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    tr: &Translator,
    state: UiState,
) -> Result<UiState, AppError> {
    match term.read_line(tr.t(keys::PROMPT_VALUE))? {
        Some(text) => Ok(state.update(UiEvent::InputChanged(text))),
        None => Ok(state),
    }
}

/// 번호 목록에서 변환을 고른다. 빈 입력이면 목록만 닫는다.
pub fn handle_choose_conversion<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    tr: &Translator,
    state: UiState,
) -> Result<UiState, AppError> {
    let state = state.update(UiEvent::MenuToggled);
    term.say(tr.t(keys::SELECT_LABEL))?;
    for (i, conversion) in Conversion::ALL.iter().enumerate() {
        let marker = if *conversion == state.selected { '*' } else { ' ' };
        term.say(&format!("{marker}{}) {}", i + 1, conversion.label()))?;
    }
    loop {
        let Some(sel) = term.read_line(tr.t(keys::PROMPT_CONVERSION))? else {
            return Ok(state.update(UiEvent::MenuDismissed));
        };
        let sel = sel.trim();
        if sel.is_empty() {
            return Ok(state.update(UiEvent::MenuDismissed));
        }
        let picked = sel
            .parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| Conversion::ALL.get(i).copied());
        match picked {
            Some(conversion) => return Ok(state.update(UiEvent::ConversionSelected(conversion))),
            None => term.say(tr.t(keys::INVALID_SELECTION_RETRY))?,
        }
    }
}

/// 설정 메뉴를 처리한다. 설정이 바뀌었으면 true.
pub fn handle_settings<R: BufRead, W: Write>(
    term: &mut Terminal<R, W>,
    tr: &Translator,
    cfg: &mut Config,
) -> Result<bool, AppError> {
    term.say(tr.t(keys::SETTINGS_HEADING))?;
    term.say(&format!(
        "{} {}",
        tr.t(keys::SETTINGS_CURRENT_LANGUAGE),
        cfg.language
    ))?;
    term.say(tr.t(keys::SETTINGS_OPTIONS))?;
    let Some(sel) = term.read_line(tr.t(keys::SETTINGS_PROMPT_CHANGE))? else {
        return Ok(false);
    };
    let language = match sel.trim() {
        "" => return Ok(false),
        "1" => "auto",
        "2" => "en",
        "3" => "ru",
        _ => {
            term.say(tr.t(keys::SETTINGS_INVALID))?;
            return Ok(false);
        }
    };
    cfg.language = language.to_string();
    Ok(true)
}

/// 변환 표를 `코드  이름  종류` 형식으로 출력한다.
pub fn print_table<W: Write>(out: &mut W) -> Result<(), AppError> {
    for conversion in Conversion::ALL {
        writeln!(
            out,
            "{:<8} {:<22} {}",
            conversion.code(),
            conversion.label(),
            conversion.kind().name()
        )?;
    }
    Ok(())
}
