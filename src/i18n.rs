use std::collections::HashMap;
use std::fs;
use std::path::Path;
use sys_locale::get_locale;

use crate::conversion;

/// 문자열 키를 모아두는 네임스페이스.
pub mod keys {
    pub const APP_TITLE: &str = "general.app_title";
    pub const APP_EXIT: &str = "general.app_exit";
    pub const ERROR_PREFIX: &str = "general.error_prefix";

    pub const RESULT_VALUE: &str = "result.value";
    pub const ERROR_INPUT_OR_SELECTION: &str = "error.input_or_selection";

    pub const INPUT_LABEL: &str = "screen.input_label";
    pub const SELECT_LABEL: &str = "screen.select_label";
    pub const CONVERT_BUTTON: &str = "screen.convert_button";

    pub const MAIN_MENU_TITLE: &str = "main_menu.title";
    pub const MAIN_MENU_INPUT: &str = "main_menu.input";
    pub const MAIN_MENU_SELECT: &str = "main_menu.select";
    pub const MAIN_MENU_CONVERT: &str = "main_menu.convert";
    pub const MAIN_MENU_SETTINGS: &str = "main_menu.settings";
    pub const MAIN_MENU_EXIT: &str = "main_menu.exit";
    pub const PROMPT_MENU_SELECT: &str = "prompt.menu_select";
    pub const PROMPT_VALUE: &str = "prompt.value";
    pub const PROMPT_CONVERSION: &str = "prompt.conversion";
    pub const INVALID_SELECTION_RETRY: &str = "error.invalid_selection_retry";
    pub const STATUS_INPUT: &str = "status.input";
    pub const STATUS_SELECTED: &str = "status.selected";

    pub const SETTINGS_HEADING: &str = "settings.heading";
    pub const SETTINGS_CURRENT_LANGUAGE: &str = "settings.current_language";
    pub const SETTINGS_OPTIONS: &str = "settings.options";
    pub const SETTINGS_PROMPT_CHANGE: &str = "settings.prompt_change";
    pub const SETTINGS_INVALID: &str = "settings.invalid";
    pub const SETTINGS_SAVED: &str = "settings.saved";
    pub const SETTINGS_LANGUAGE: &str = "settings.language";
    pub const SETTINGS_LANGUAGE_AUTO: &str = "settings.language_auto";
    pub const SETTINGS_PACK_DIR: &str = "settings.pack_dir";
    pub const SETTINGS_BROWSE: &str = "settings.browse";
    pub const SETTINGS_SAVE: &str = "settings.save";
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Language {
    En,
    Ru,
}

impl Language {
    fn from_code(code: &str) -> Self {
        let c = code.to_lowercase();
        if c.starts_with("ru") {
            Language::Ru
        } else {
            Language::En
        }
    }

    pub fn as_code(&self) -> &'static str {
        match self {
            Language::En => "en",
            Language::Ru => "ru",
        }
    }
}

/// 런타임 언어 번들을 제공한다.
#[derive(Debug, Clone)]
pub struct Translator {
    lang: Language,
    overrides: Option<HashMap<String, String>>,
}

impl Default for Translator {
    fn default() -> Self {
        Self::new("en")
    }
}

impl Translator {
    /// 언어 코드(en/ru)에 따라 번역기를 생성한다. 알 수 없는 코드는 en으로 폴백한다.
    pub fn new(lang_code: &str) -> Self {
        Self {
            lang: Language::from_code(lang_code),
            overrides: None,
        }
    }

    /// 언어 코드 + 언어팩 디렉터리를 받아서 번역기를 생성한다.
    /// 디렉터리가 없거나 파일이 없으면 내장 문자열만 사용한다.
    pub fn new_with_pack(lang_code: &str, pack_dir: Option<&str>) -> Self {
        let overrides = pack_dir.and_then(|dir| load_overrides(dir, lang_code));
        if overrides.is_some() {
            log::info!("language pack loaded for {lang_code}");
        }
        Self {
            lang: Language::from_code(lang_code),
            overrides,
        }
    }

    pub fn language(&self) -> Language {
        self.lang
    }

    pub fn language_code(&self) -> &'static str {
        self.lang.as_code()
    }

    /// 언어팩에서 키를 조회한다. 언어팩에 없으면 None.
    pub fn lookup(&self, key: &str) -> Option<&str> {
        self.overrides
            .as_ref()
            .and_then(|m| m.get(key))
            .map(String::as_str)
    }

    /// 번역을 가져온다. 언어팩 → 내장 문자열 순으로 찾는다.
    pub fn t(&self, key: &str) -> &str {
        if let Some(v) = self.lookup(key) {
            return v;
        }
        match self.lang {
            Language::Ru => ru(key).unwrap_or_else(|| en(key)),
            Language::En => en(key),
        }
    }

    /// `Result: 0.62` 형태의 결과 문장을 만든다.
    pub fn result_line(&self, value: f64) -> String {
        fill_template(
            self.t(keys::RESULT_VALUE),
            &[("value", conversion::format_value(value))],
        )
    }
}

/// `{name}` 자리표시자를 값으로 치환한다.
pub fn fill_template(template: &str, vars: &[(&str, String)]) -> String {
    let mut out = template.to_string();
    for (k, v) in vars {
        out = out.replace(&format!("{{{k}}}"), v);
    }
    out
}

/// CLI 플래그/설정/시스템 순으로 언어 코드를 결정한다.
pub fn resolve_language(cli_arg: Option<&str>, config_lang: Option<&str>) -> String {
    cli_arg
        .and_then(normalize_lang)
        .or_else(|| config_lang.and_then(normalize_lang))
        .or_else(detect_system_language)
        .unwrap_or_else(|| "en".to_string())
}

fn normalize_lang(code: &str) -> Option<String> {
    let c = code.trim().to_lowercase();
    match c.as_str() {
        "auto" | "" => None,
        other if other.starts_with("ru") => Some("ru".into()),
        other if other.starts_with("en") => Some("en".into()),
        _ => None,
    }
}

fn normalize_locale_string(loc: &str) -> Option<String> {
    let lang = loc
        .split(['.', '_', '-'])
        .next()
        .unwrap_or_default()
        .to_lowercase();
    match lang.as_str() {
        "ru" => Some("ru".into()),
        "en" => Some("en".into()),
        _ => None,
    }
}

/// 시스템 로케일에서 언어를 추정한다.
pub fn detect_system_language() -> Option<String> {
    if let Some(loc) = get_locale() {
        if let Some(lang) = normalize_locale_string(&loc) {
            return Some(lang);
        }
    }
    for var in ["LC_ALL", "LANG"] {
        if let Ok(lang) = std::env::var(var) {
            if let Some(code) = normalize_locale_string(&lang) {
                return Some(code);
            }
        }
    }
    None
}

/// TOML 기반 언어팩을 로드한다. 형식: key = "value" 로 구성된 플랫 맵 또는 중첩 테이블.
fn load_overrides(dir: &str, lang: &str) -> Option<HashMap<String, String>> {
    let try_load = |code: &str| -> Option<HashMap<String, String>> {
        let path = Path::new(dir).join(format!("{code}.toml"));
        let content = fs::read_to_string(&path).ok()?;
        let map = parse_toml_to_map(&content);
        if map.is_none() {
            log::warn!("ignoring unreadable language pack {}", path.display());
        }
        map
    };

    // 1) full code (e.g., ru-ru)
    if let Some(map) = try_load(lang) {
        return Some(map);
    }
    // 2) base code (e.g., ru)
    if let Some((base, _)) = lang.split_once(['-', '_']) {
        if let Some(map) = try_load(base) {
            return Some(map);
        }
    }
    None
}

fn parse_toml_to_map(src: &str) -> Option<HashMap<String, String>> {
    let value: toml::Value = toml::from_str(src).ok()?;
    let table = value.as_table()?;
    let mut map = HashMap::new();

    fn walk(prefix: &str, val: &toml::Value, out: &mut HashMap<String, String>) {
        match val {
            toml::Value::String(s) => {
                out.insert(prefix.to_string(), s.to_string());
            }
            toml::Value::Table(t) => {
                for (k, v) in t {
                    let key = if prefix.is_empty() {
                        k.clone()
                    } else {
                        format!("{prefix}.{k}")
                    };
                    walk(&key, v, out);
                }
            }
            _ => {}
        }
    }

    for (k, v) in table {
        walk(k, v, &mut map);
    }

    if map.is_empty() {
        None
    } else {
        Some(map)
    }
}

fn en(key: &str) -> &'static str {
    use keys::*;
    match key {
        APP_TITLE => "Pocket Converter",
        APP_EXIT => "Bye.",
        ERROR_PREFIX => "Error",
        RESULT_VALUE => "Result: {value}",
        ERROR_INPUT_OR_SELECTION => "input or selection error",
        INPUT_LABEL => "Enter a value",
        SELECT_LABEL => "Choose a conversion",
        CONVERT_BUTTON => "Convert",
        MAIN_MENU_TITLE => "\n=== Pocket Converter ===",
        MAIN_MENU_INPUT => "1) Enter value",
        MAIN_MENU_SELECT => "2) Choose conversion",
        MAIN_MENU_CONVERT => "3) Convert",
        MAIN_MENU_SETTINGS => "4) Settings",
        MAIN_MENU_EXIT => "0) Exit",
        PROMPT_MENU_SELECT => "Select menu: ",
        PROMPT_VALUE => "Value: ",
        PROMPT_CONVERSION => "Conversion number: ",
        INVALID_SELECTION_RETRY => "Invalid input. Please try again.",
        STATUS_INPUT => "Value:",
        STATUS_SELECTED => "Conversion:",
        SETTINGS_HEADING => "\n-- Settings --",
        SETTINGS_CURRENT_LANGUAGE => "Current language:",
        SETTINGS_OPTIONS => "1) auto  2) English  3) Русский",
        SETTINGS_PROMPT_CHANGE => "Number to change (Enter to cancel): ",
        SETTINGS_INVALID => "Invalid input, nothing changed.",
        SETTINGS_SAVED => "Settings saved.",
        SETTINGS_LANGUAGE => "Language",
        SETTINGS_LANGUAGE_AUTO => "System default",
        SETTINGS_PACK_DIR => "Language pack folder",
        SETTINGS_BROWSE => "Browse…",
        SETTINGS_SAVE => "Save",
        _ => "[missing translation]",
    }
}

fn ru(key: &str) -> Option<&'static str> {
    use keys::*;
    Some(match key {
        APP_TITLE => "Конвертер",
        APP_EXIT => "До свидания.",
        ERROR_PREFIX => "Ошибка",
        RESULT_VALUE => "Результат: {value}",
        ERROR_INPUT_OR_SELECTION => "Ошибка ввода или выбора конверсии",
        INPUT_LABEL => "Введите значение",
        SELECT_LABEL => "Выберите конверсию",
        CONVERT_BUTTON => "Конвертировать",
        MAIN_MENU_TITLE => "\n=== Конвертер ===",
        MAIN_MENU_INPUT => "1) Ввести значение",
        MAIN_MENU_SELECT => "2) Выбрать конверсию",
        MAIN_MENU_CONVERT => "3) Конвертировать",
        MAIN_MENU_SETTINGS => "4) Настройки",
        MAIN_MENU_EXIT => "0) Выход",
        PROMPT_MENU_SELECT => "Пункт меню: ",
        PROMPT_VALUE => "Значение: ",
        PROMPT_CONVERSION => "Номер конверсии: ",
        INVALID_SELECTION_RETRY => "Неверный ввод. Попробуйте ещё раз.",
        STATUS_INPUT => "Значение:",
        STATUS_SELECTED => "Конверсия:",
        SETTINGS_HEADING => "\n-- Настройки --",
        SETTINGS_CURRENT_LANGUAGE => "Текущий язык:",
        SETTINGS_PROMPT_CHANGE => "Номер (Enter для отмены): ",
        SETTINGS_INVALID => "Неверный ввод, ничего не изменено.",
        SETTINGS_SAVED => "Настройки сохранены.",
        SETTINGS_LANGUAGE => "Язык",
        SETTINGS_LANGUAGE_AUTO => "Системный",
        SETTINGS_PACK_DIR => "Папка языкового пакета",
        SETTINGS_BROWSE => "Обзор…",
        SETTINGS_SAVE => "Сохранить",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn russian_falls_back_to_english_for_missing_keys() {
        let tr = Translator::new("ru-RU");
        assert_eq!(tr.language(), Language::Ru);
        assert_eq!(tr.t(keys::SETTINGS_OPTIONS), "1) auto  2) English  3) Русский");
        assert_eq!(tr.t(keys::CONVERT_BUTTON), "Конвертировать");
    }

    #[test]
    fn unknown_code_uses_english() {
        let tr = Translator::new("de-DE");
        assert_eq!(tr.language_code(), "en");
        assert_eq!(tr.t(keys::ERROR_INPUT_OR_SELECTION), "input or selection error");
        assert_eq!(tr.t("no.such.key"), "[missing translation]");
    }

    #[test]
    fn cli_flag_beats_config() {
        assert_eq!(resolve_language(Some("ru"), Some("en")), "ru");
        assert_eq!(resolve_language(Some("auto"), Some("en-GB")), "en");
        assert_eq!(resolve_language(None, Some("RU_ru")), "ru");
    }

    #[test]
    fn locale_string_takes_language_part() {
        assert_eq!(normalize_locale_string("ru_RU.UTF-8").as_deref(), Some("ru"));
        assert_eq!(normalize_locale_string("en-US").as_deref(), Some("en"));
        assert_eq!(normalize_locale_string("fr_FR"), None);
    }

    #[test]
    fn nested_pack_tables_flatten_to_dotted_keys() {
        let map = parse_toml_to_map(
            r#"
            [result]
            value = "= {value}"

            [error]
            input_or_selection = "nope"
            "#,
        )
        .expect("pack parses");
        assert_eq!(map.get(keys::RESULT_VALUE).map(String::as_str), Some("= {value}"));
        assert_eq!(
            map.get(keys::ERROR_INPUT_OR_SELECTION).map(String::as_str),
            Some("nope")
        );
        assert!(parse_toml_to_map("answer = 42").is_none());
    }

    #[test]
    fn pack_directory_overrides_builtin_strings() {
        let dir = std::env::temp_dir()
            .join(format!("pocket_converter_pack_{}", std::process::id()));
        fs::create_dir_all(&dir).expect("create pack dir");
        fs::write(dir.join("ru.toml"), "result.value = \"Итого: {value}\"\n")
            .expect("write pack");

        let tr = Translator::new_with_pack("ru-RU", dir.to_str());
        assert_eq!(tr.result_line(90.0), "Итого: 90.00");
        assert_eq!(tr.t(keys::CONVERT_BUTTON), "Конвертировать");

        let missing = Translator::new_with_pack("en", dir.to_str());
        assert_eq!(missing.result_line(1.0), "Result: 1.00");

        let _ = fs::remove_dir_all(&dir);
    }
}
