#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

//! eframe/egui 기반 데스크톱 GUI 진입점.

use eframe::{egui, App, Frame};
use image::GenericImageView;
use pocket_converter::{
    app, config,
    conversion::Conversion,
    i18n::{self, keys},
    state::{UiEvent, UiState},
};
use rfd::FileDialog;
use std::{env, fs, path::Path};

fn main() -> Result<(), eframe::Error> {
    env_logger::init();

    // CLI 언어 옵션 처리: --lang xx 또는 --lang=xx (xx: auto/en/ru)
    let mut cli_lang: Option<String> = None;
    let args: Vec<String> = env::args().collect();
    let mut i = 1;
    while i < args.len() {
        let a = &args[i];
        if let Some(val) = a.strip_prefix("--lang=") {
            cli_lang = Some(val.to_string());
        } else if (a == "--lang" || a == "-L") && i + 1 < args.len() {
            cli_lang = Some(args[i + 1].clone());
            i += 1;
        }
        i += 1;
    }

    let mut viewport = egui::ViewportBuilder::default().with_inner_size([380.0, 420.0]);
    if let Some(icon) = load_app_icon() {
        viewport = viewport.with_icon(icon);
    }
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    let app_cfg = config::load_or_default().unwrap_or_else(|e| {
        log::warn!("{e}; falling back to default settings");
        config::Config::default()
    });
    eframe::run_native(
        "Pocket Converter",
        options,
        Box::new(move |_cc| Box::new(GuiApp::new(app_cfg, cli_lang.as_deref()))),
    )
}

fn load_app_icon() -> Option<egui::IconData> {
    let search = ["icon.png", "assets/icon.png"];
    let path = search.iter().find(|p| Path::new(*p).exists())?;
    let bytes = fs::read(path).ok()?;
    let img = image::load_from_memory(&bytes).ok()?;
    let rgba = img.to_rgba8();
    let (w, h) = img.dimensions();
    Some(egui::IconData {
        rgba: rgba.into_raw(),
        width: w,
        height: h,
    })
}

/// 콤보박스 한 프레임의 상호작용을 화면 이벤트로 옮긴다.
///
/// `popup_shown` 은 이번 프레임에 목록이 그려졌는지 여부이다.
fn combo_events(
    was_open: bool,
    header_clicked: bool,
    popup_shown: bool,
    picked: Option<Conversion>,
) -> Vec<UiEvent> {
    let mut events = Vec::new();
    if header_clicked {
        events.push(UiEvent::MenuToggled);
    }
    if let Some(c) = picked {
        events.push(UiEvent::ConversionSelected(c));
    } else if was_open && !header_clicked && !popup_shown {
        events.push(UiEvent::MenuDismissed);
    }
    events
}

const LANGUAGE_CHOICES: [&str; 3] = ["auto", "en", "ru"];

struct GuiApp {
    config: config::Config,
    tr: i18n::Translator,
    state: UiState,
    show_settings: bool,
    lang_input: String,
    pack_dir_input: String,
    save_status: Option<String>,
}

impl GuiApp {
    fn new(config: config::Config, cli_lang: Option<&str>) -> Self {
        let tr = app::translator_for(&config, cli_lang);
        log::debug!("gui language: {}", tr.language_code());
        Self {
            state: UiState::new(config.default_conversion),
            lang_input: config.language.clone(),
            pack_dir_input: config.locale_dir.clone().unwrap_or_default(),
            config,
            tr,
            show_settings: false,
            save_status: None,
        }
    }

    fn dispatch(&mut self, event: UiEvent) {
        let state = std::mem::take(&mut self.state);
        self.state = state.update(event);
    }

    fn apply_settings(&mut self) {
        self.config.language = self.lang_input.clone();
        let dir = self.pack_dir_input.trim();
        self.config.locale_dir = if dir.is_empty() {
            None
        } else {
            Some(dir.to_string())
        };
        self.tr = app::translator_for(&self.config, None);
        self.save_status = Some(match self.config.save() {
            Ok(()) => self.tr.t(keys::SETTINGS_SAVED).to_string(),
            Err(e) => {
                log::error!("{e}");
                format!("{}: {e}", self.tr.t(keys::ERROR_PREFIX))
            }
        });
    }

    fn ui_converter(&mut self, ui: &mut egui::Ui) {
        let tr = self.tr.clone();

        ui.label(tr.t(keys::INPUT_LABEL));
        let mut text = self.state.input_text.clone();
        let edit = ui.add(egui::TextEdit::singleline(&mut text).desired_width(f32::INFINITY));
        if edit.changed() {
            self.dispatch(UiEvent::InputChanged(text));
        }
        ui.add_space(8.0);

        ui.label(tr.t(keys::SELECT_LABEL));
        let selected = self.state.selected;
        let mut picked = None;
        let combo = egui::ComboBox::from_id_source("conversion")
            .width(ui.available_width())
            .selected_text(selected.label())
            .show_ui(ui, |ui| {
                for c in Conversion::ALL {
                    if ui.selectable_label(c == selected, c.label()).clicked() {
                        picked = Some(c);
                    }
                }
            });
        for event in combo_events(
            self.state.menu_open,
            combo.response.clicked(),
            combo.inner.is_some(),
            picked,
        ) {
            self.dispatch(event);
        }
        ui.add_space(20.0);

        let button = egui::Button::new(tr.t(keys::CONVERT_BUTTON));
        if ui.add_sized([ui.available_width(), 48.0], button).clicked() {
            self.dispatch(UiEvent::Submitted);
        }
        ui.add_space(16.0);

        ui.label(egui::RichText::new(self.state.result_text(&tr)).size(18.0));
    }
}

impl App for GuiApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        let tr = self.tr.clone();

        egui::TopBottomPanel::top("top_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.heading(tr.t(keys::APP_TITLE));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.button("⚙").clicked() {
                        self.show_settings = !self.show_settings;
                    }
                });
            });
        });

        let mut save_clicked = false;
        if self.show_settings {
            egui::Window::new(tr.t(keys::SETTINGS_LANGUAGE))
                .collapsible(false)
                .resizable(false)
                .open(&mut self.show_settings)
                .show(ctx, |ui| {
                    let lang_label = |code: &str| {
                        if code == "auto" {
                            tr.t(keys::SETTINGS_LANGUAGE_AUTO).to_string()
                        } else {
                            code.to_string()
                        }
                    };
                    egui::ComboBox::from_id_source("language")
                        .selected_text(lang_label(&self.lang_input))
                        .show_ui(ui, |ui| {
                            for code in LANGUAGE_CHOICES {
                                ui.selectable_value(
                                    &mut self.lang_input,
                                    code.to_string(),
                                    lang_label(code),
                                );
                            }
                        });
                    ui.label(tr.t(keys::SETTINGS_PACK_DIR));
                    ui.horizontal(|ui| {
                        ui.text_edit_singleline(&mut self.pack_dir_input);
                        if ui.button(tr.t(keys::SETTINGS_BROWSE)).clicked() {
                            if let Some(dir) = FileDialog::new().pick_folder() {
                                self.pack_dir_input = dir.display().to_string();
                            }
                        }
                    });
                    if ui.button(tr.t(keys::SETTINGS_SAVE)).clicked() {
                        save_clicked = true;
                    }
                    if let Some(status) = &self.save_status {
                        ui.label(egui::RichText::new(status).small());
                    }
                });
        }
        if save_clicked {
            self.apply_settings();
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::none()
                .inner_margin(egui::Margin::same(24.0))
                .show(ui, |ui| {
                    ui.vertical_centered_justified(|ui| self.ui_converter(ui));
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn english_app() -> GuiApp {
        GuiApp::new(config::Config::default(), Some("en"))
    }

    #[test]
    fn starts_with_configured_conversion() {
        let cfg = config::Config {
            default_conversion: Conversion::CelsiusToFahrenheit,
            ..config::Config::default()
        };
        let app = GuiApp::new(cfg, Some("en"));
        assert_eq!(app.state.selected_label(), "°C → °F");
        assert_eq!(app.state.result_text(&app.tr), "");
    }

    #[test]
    fn typed_comma_value_converts() {
        let mut app = english_app();
        app.dispatch(UiEvent::InputChanged("1".into()));
        app.dispatch(UiEvent::Submitted);
        assert_eq!(app.state.result_text(&app.tr), "Result: 0.62");

        app.dispatch(UiEvent::InputChanged("12,5".into()));
        assert_eq!(app.state.input_text, "12.5");
        app.dispatch(UiEvent::Submitted);
        assert_eq!(app.state.result_text(&app.tr), "Result: 7.77");
    }

    #[test]
    fn russian_messages_follow_language_flag() {
        let mut app = GuiApp::new(config::Config::default(), Some("ru"));
        app.dispatch(UiEvent::InputChanged("abc".into()));
        app.dispatch(UiEvent::Submitted);
        assert_eq!(
            app.state.result_text(&app.tr),
            "Ошибка ввода или выбора конверсии"
        );
    }

    #[test]
    fn header_click_toggles_menu() {
        assert_eq!(combo_events(false, true, true, None), vec![UiEvent::MenuToggled]);
    }

    #[test]
    fn picking_an_item_selects_it() {
        assert_eq!(
            combo_events(true, false, true, Some(Conversion::RubToUsd)),
            vec![UiEvent::ConversionSelected(Conversion::RubToUsd)]
        );
    }

    #[test]
    fn closed_popup_without_pick_dismisses() {
        assert_eq!(combo_events(true, false, false, None), vec![UiEvent::MenuDismissed]);
        assert!(combo_events(false, false, false, None).is_empty());
    }

    #[test]
    fn combo_flow_clears_previous_result() {
        let mut app = english_app();
        app.dispatch(UiEvent::InputChanged("90".into()));
        app.dispatch(UiEvent::Submitted);
        for e in combo_events(app.state.menu_open, true, true, None) {
            app.dispatch(e);
        }
        assert!(app.state.menu_open);
        for e in combo_events(app.state.menu_open, false, true, Some(Conversion::RubToUsd)) {
            app.dispatch(e);
        }
        assert!(!app.state.menu_open);
        assert_eq!(app.state.result_text(&app.tr), "");
        app.dispatch(UiEvent::Submitted);
        assert_eq!(app.state.result_text(&app.tr), "Result: 1.00");
    }
}
