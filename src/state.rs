//! 단일 화면의 상태와 이벤트 전이.
//!
//! GUI 와 CLI 가 같은 전이 함수를 쓴다. egui 에 의존하지 않는다.

use crate::conversion::{self, Conversion, ConversionError};
use crate::i18n::{self, Translator};

/// 화면이 어느 단계에 있는지.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    AwaitingInput,
    ResultShown,
}

/// 마지막 변환 버튼 처리 결과.
#[derive(Debug, Clone, PartialEq)]
pub enum Outcome {
    Converted(f64),
    Failed(ConversionError),
}

/// 사용자 이벤트.
#[derive(Debug, Clone, PartialEq)]
pub enum UiEvent {
    /// 입력란 내용이 바뀜
    InputChanged(String),
    /// 선택 목록 열기/닫기
    MenuToggled,
    /// 목록 바깥을 눌러 닫음
    MenuDismissed,
    /// 목록에서 변환을 고름
    ConversionSelected(Conversion),
    /// 변환 버튼
    Submitted,
}

/// 화면 하나가 소유하는 임시 상태.
#[derive(Debug, Clone, PartialEq)]
pub struct UiState {
    pub input_text: String,
    pub selected: Conversion,
    pub outcome: Option<Outcome>,
    pub menu_open: bool,
}

impl Default for UiState {
    fn default() -> Self {
        Self::new(Conversion::default())
    }
}

impl UiState {
    /// 빈 입력과 주어진 선택으로 화면 상태를 만든다.
    pub fn new(selected: Conversion) -> Self {
        Self {
            input_text: String::new(),
            selected,
            outcome: None,
            menu_open: false,
        }
    }

    pub fn phase(&self) -> Phase {
        if self.outcome.is_some() {
            Phase::ResultShown
        } else {
            Phase::AwaitingInput
        }
    }

    pub fn selected_label(&self) -> &'static str {
        self.selected.label()
    }

    /// 이벤트를 적용한 다음 상태를 돌려준다.
    pub fn update(mut self, event: UiEvent) -> Self {
        match event {
            UiEvent::InputChanged(text) => {
                self.input_text = conversion::normalize_input(&text);
            }
            UiEvent::MenuToggled => {
                self.menu_open = !self.menu_open;
            }
            UiEvent::MenuDismissed => {
                self.menu_open = false;
            }
            UiEvent::ConversionSelected(selected) => {
                self.selected = selected;
                self.menu_open = false;
                self.outcome = None;
            }
            UiEvent::Submitted => {
                let outcome = match conversion::convert_with(&self.input_text, self.selected) {
                    Ok(v) => Outcome::Converted(v),
                    Err(e) => {
                        log::debug!("conversion rejected: {e}");
                        Outcome::Failed(e)
                    }
                };
                self.outcome = Some(outcome);
            }
        }
        self
    }

    /// 결과 표시줄 문자열. 결과가 없으면 빈 문자열.
    pub fn result_text(&self, tr: &Translator) -> String {
        match &self.outcome {
            None => String::new(),
            Some(Outcome::Converted(v)) => tr.result_line(*v),
            Some(Outcome::Failed(_)) => tr.t(i18n::keys::ERROR_INPUT_OR_SELECTION).to_string(),
        }
    }
}
