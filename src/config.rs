use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::conversion::Conversion;

/// 기본 설정 파일 이름. 작업 디렉터리 기준이다.
pub const CONFIG_FILE: &str = "pocket_converter.toml";

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// `auto`, `en`, `ru`
    pub language: String,
    /// 화면을 열 때 선택되어 있을 변환
    pub default_conversion: Conversion,
    /// 언어팩 디렉터리 (`<dir>/<lang>.toml`)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub locale_dir: Option<String>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            language: "auto".to_string(),
            default_conversion: Conversion::default(),
            locale_dir: None,
        }
    }
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Deserialize(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Deserialize(e) => write!(f, "config parse error: {e}"),
            ConfigError::Serialize(e) => write!(f, "config serialize error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Deserialize(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// 작업 디렉터리의 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default() -> Result<Config, ConfigError> {
    load_or_default_from(Path::new(CONFIG_FILE))
}

/// 지정한 경로의 설정을 로드한다. 파일이 없으면 기본값을 기록하고 돌려준다.
pub fn load_or_default_from(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        let content = fs::read_to_string(path)?;
        let cfg = parse(&content)?;
        log::debug!("config loaded from {}", path.display());
        Ok(cfg)
    } else {
        let cfg = Config::default();
        cfg.save_to(path)?;
        log::info!("wrote default config to {}", path.display());
        Ok(cfg)
    }
}

/// TOML 문자열을 설정으로 해석한다. 빠진 키는 기본값으로 채운다.
pub fn parse(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

impl Config {
    /// 기본 경로에 설정을 저장한다.
    pub fn save(&self) -> Result<(), ConfigError> {
        self.save_to(Path::new(CONFIG_FILE))
    }

    pub fn save_to(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_keys_take_defaults() {
        let cfg = parse("language = \"ru\"\n").unwrap();
        assert_eq!(cfg.language, "ru");
        assert_eq!(cfg.default_conversion, Conversion::KmToMiles);
        assert_eq!(cfg.locale_dir, None);
    }

    #[test]
    fn conversion_is_stored_by_code() {
        let cfg = Config {
            default_conversion: Conversion::UsdToRub,
            ..Config::default()
        };
        let text = toml::to_string_pretty(&cfg).unwrap();
        assert!(text.contains("default_conversion = \"usd-rub\""), "{text}");
        assert_eq!(parse(&text).unwrap(), cfg);
    }

    #[test]
    fn unknown_conversion_code_is_rejected() {
        let err = parse("default_conversion = \"kg-lb\"\n").unwrap_err();
        assert!(matches!(err, ConfigError::Deserialize(_)));
    }

    #[test]
    fn load_creates_file_with_defaults() {
        let path = std::env::temp_dir().join(format!(
            "pocket_converter_cfg_{}.toml",
            std::process::id()
        ));
        let _ = fs::remove_file(&path);

        let cfg = load_or_default_from(&path).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(path.exists());

        let again = load_or_default_from(&path).unwrap();
        assert_eq!(again, cfg);
        let _ = fs::remove_file(&path);
    }
}
