//! 변환 로직을 라이브러리로 분리하여 CLI 와 GUI 가 같은 상태 전이를 공유한다.

pub mod app;
pub mod config;
pub mod conversion;
pub mod i18n;
pub mod quantity;
pub mod state;
pub mod ui_cli;
pub mod units;
