//! 대화형 CLI 세션을 메모리 버퍼로 재생한다.
use std::io::Cursor;
use std::path::PathBuf;

use pocket_converter::app::{convert_once, run_convert, run_with, AppError};
use pocket_converter::config::{self, Config};
use pocket_converter::conversion::{Conversion, ConversionError};
use pocket_converter::i18n::Translator;
use pocket_converter::ui_cli::{print_table, Terminal};

fn scratch_config(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("pocket_converter_{name}_{}.toml", std::process::id()))
}

fn session(script: &str, cfg: &mut Config, path: &PathBuf) -> String {
    let mut term = Terminal::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
    run_with(&mut term, cfg, path, Translator::new("en")).expect("session runs");
    String::from_utf8(term.into_output()).expect("utf-8 output")
}

#[test]
fn enter_value_and_convert() {
    let path = scratch_config("convert");
    let mut cfg = Config::default();
    let out = session("1\n12,5\n3\n0\n", &mut cfg, &path);
    assert!(out.contains("Value: 12.5"), "{out}");
    assert!(out.contains("Result: 7.77"), "{out}");
    assert!(out.contains("Bye."), "{out}");
    assert!(!path.exists(), "settings untouched, nothing saved");
}

#[test]
fn choosing_conversion_clears_result() {
    let path = scratch_config("choose");
    let mut cfg = Config::default();
    let out = session("1\n0\n3\n2\n3\n3\n0\n", &mut cfg, &path);

    let picker = out.find("Conversion number: ").expect("picker shown");
    assert!(out[..picker].contains("Result: 0.00"), "{out}");

    let next = out.find("Result: 32.00").expect("second conversion shown");
    assert!(picker < next, "{out}");
    let redraw = &out[picker..next];
    assert!(redraw.contains("Conversion: °C → °F"), "{redraw}");
    assert!(!redraw.contains("Result:"), "{redraw}");
}

#[test]
fn bad_menu_entries_are_retried() {
    let path = scratch_config("retry");
    let mut cfg = Config::default();
    let out = session("9\n2\n7\n\n1\nabc\n3\n", &mut cfg, &path);
    assert_eq!(out.matches("Invalid input. Please try again.").count(), 2, "{out}");
    assert!(out.contains("input or selection error"), "{out}");
    // EOF ends the session
    assert!(out.contains("Bye."), "{out}");
}

#[test]
fn settings_change_is_saved_and_applied() {
    let path = scratch_config("settings");
    let _ = std::fs::remove_file(&path);
    let mut cfg = Config::default();
    let out = session("4\n3\n1\nabc\n3\n0\n", &mut cfg, &path);
    assert_eq!(cfg.language, "ru");
    assert!(out.contains("Настройки сохранены."), "{out}");
    assert!(out.contains("Ошибка ввода или выбора конверсии"), "{out}");

    let saved = config::load_or_default_from(&path).expect("saved config");
    assert_eq!(saved.language, "ru");
    let _ = std::fs::remove_file(&path);
}

#[test]
fn table_listing_in_menu_order() {
    let mut out = Vec::new();
    print_table(&mut out).unwrap();
    let text = String::from_utf8(out).unwrap();
    let codes: Vec<&str> = text
        .lines()
        .filter_map(|l| l.split_whitespace().next())
        .collect();
    assert_eq!(codes, ["km-mi", "mi-km", "c-f", "f-c", "rub-usd", "usd-rub"]);
}

fn one_shot(cfg: &Config, value: &str, to: Option<&str>) -> (bool, String, String) {
    let (mut out, mut err) = (Vec::new(), Vec::new());
    let ok = run_convert(&mut out, &mut err, cfg, &Translator::new("en"), value, to)
        .expect("writes to memory");
    (
        ok,
        String::from_utf8(out).unwrap(),
        String::from_utf8(err).unwrap(),
    )
}

#[test]
fn one_shot_convert_by_code_or_label() {
    let cfg = Config::default();
    assert_eq!(
        one_shot(&cfg, "100", Some("c-f")),
        (true, "Result: 212.00\n".into(), String::new())
    );
    assert_eq!(
        one_shot(&cfg, "90", Some("Руб → USD (курс 90)")),
        (true, "Result: 1.00\n".into(), String::new())
    );
    assert_eq!(one_shot(&cfg, "-40", Some("F-C")).1, "Result: -40.00\n");
}

#[test]
fn one_shot_convert_falls_back_to_default_conversion() {
    let cfg = Config {
        default_conversion: Conversion::UsdToRub,
        ..Config::default()
    };
    assert_eq!(one_shot(&cfg, "2,5", None).1, "Result: 225.00\n");
    assert_eq!(one_shot(&Config::default(), "1", None).1, "Result: 0.62\n");
}

#[test]
fn one_shot_convert_errors_print_static_line() {
    let cfg = Config::default();
    let expected = (false, String::new(), "input or selection error\n".to_string());
    assert_eq!(one_shot(&cfg, "1", Some("kg-lb")), expected);
    assert_eq!(one_shot(&cfg, "abc", Some("km-mi")), expected);
}

#[test]
fn convert_errors_surface_as_app_errors() {
    let tr = Translator::new("en");
    let err = convert_once(&Config::default(), &tr, "1", Some("kg-lb")).unwrap_err();
    assert!(matches!(
        err,
        AppError::Conversion(ConversionError::UnknownConversion(ref name)) if name == "kg-lb"
    ));
}
