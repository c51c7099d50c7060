use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::quantity::QuantityKind;
use crate::units::*;

/// 변환 과정에서 발생 가능한 오류.
///
/// 두 경우 모두 사용자에게는 같은 고정 메시지로 보여준다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConversionError {
    /// 숫자로 해석할 수 없는 입력
    InvalidNumber(String),
    /// 표에 없는 변환 이름
    UnknownConversion(String),
}

impl std::fmt::Display for ConversionError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConversionError::InvalidNumber(s) => write!(f, "not a number: {s:?}"),
            ConversionError::UnknownConversion(s) => write!(f, "unknown conversion: {s:?}"),
        }
    }
}

impl std::error::Error for ConversionError {}

/// 화면에서 고를 수 있는 변환. 표 순서는 [`Conversion::ALL`] 과 같다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Conversion {
    #[serde(rename = "km-mi")]
    KmToMiles,
    #[serde(rename = "mi-km")]
    MilesToKm,
    #[serde(rename = "c-f")]
    CelsiusToFahrenheit,
    #[serde(rename = "f-c")]
    FahrenheitToCelsius,
    #[serde(rename = "rub-usd")]
    RubToUsd,
    #[serde(rename = "usd-rub")]
    UsdToRub,
}

impl Default for Conversion {
    fn default() -> Self {
        Conversion::ALL[0]
    }
}

impl Conversion {
    /// 고정된 변환 표.
    pub const ALL: [Conversion; 6] = [
        Conversion::KmToMiles,
        Conversion::MilesToKm,
        Conversion::CelsiusToFahrenheit,
        Conversion::FahrenheitToCelsius,
        Conversion::RubToUsd,
        Conversion::UsdToRub,
    ];

    /// 선택 목록에 보이는 이름. 표 안에서 유일하다.
    pub fn label(self) -> &'static str {
        match self {
            Conversion::KmToMiles => "Км → Мили",
            Conversion::MilesToKm => "Мили → Км",
            Conversion::CelsiusToFahrenheit => "°C → °F",
            Conversion::FahrenheitToCelsius => "°F → °C",
            Conversion::RubToUsd => "Руб → USD (курс 90)",
            Conversion::UsdToRub => "USD → Руб (курс 90)",
        }
    }

    /// CLI 인자와 설정 파일에 쓰는 ASCII 코드.
    pub fn code(self) -> &'static str {
        match self {
            Conversion::KmToMiles => "km-mi",
            Conversion::MilesToKm => "mi-km",
            Conversion::CelsiusToFahrenheit => "c-f",
            Conversion::FahrenheitToCelsius => "f-c",
            Conversion::RubToUsd => "rub-usd",
            Conversion::UsdToRub => "usd-rub",
        }
    }

    pub fn kind(self) -> QuantityKind {
        match self {
            Conversion::KmToMiles | Conversion::MilesToKm => QuantityKind::Length,
            Conversion::CelsiusToFahrenheit | Conversion::FahrenheitToCelsius => {
                QuantityKind::Temperature
            }
            Conversion::RubToUsd | Conversion::UsdToRub => QuantityKind::Currency,
        }
    }

    /// 값에 변환식을 적용한다. 정의역 제한이나 오버플로 처리는 하지 않는다.
    pub fn apply(self, value: f64) -> f64 {
        match self {
            Conversion::KmToMiles => {
                convert_length(value, LengthUnit::Kilometer, LengthUnit::Mile)
            }
            Conversion::MilesToKm => {
                convert_length(value, LengthUnit::Mile, LengthUnit::Kilometer)
            }
            Conversion::CelsiusToFahrenheit => convert_temperature(
                value,
                TemperatureUnit::Celsius,
                TemperatureUnit::Fahrenheit,
            ),
            Conversion::FahrenheitToCelsius => convert_temperature(
                value,
                TemperatureUnit::Fahrenheit,
                TemperatureUnit::Celsius,
            ),
            Conversion::RubToUsd => convert_currency(value, CurrencyUnit::Rub, CurrencyUnit::Usd),
            Conversion::UsdToRub => convert_currency(value, CurrencyUnit::Usd, CurrencyUnit::Rub),
        }
    }

    /// 코드(대소문자 무시)로 변환을 찾는다.
    pub fn from_code(code: &str) -> Option<Self> {
        let code = code.trim();
        Self::ALL
            .into_iter()
            .find(|c| c.code().eq_ignore_ascii_case(code))
    }
}

impl std::fmt::Display for Conversion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Conversion {
    type Err = ConversionError;

    /// 코드 또는 표시 이름 어느 쪽이든 받는다.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_code(s)
            .or_else(|| lookup(s))
            .ok_or_else(|| ConversionError::UnknownConversion(s.to_string()))
    }
}

/// 표시 이름으로 변환을 찾는다. 없으면 None.
pub fn lookup(label: &str) -> Option<Conversion> {
    Conversion::ALL.into_iter().find(|c| c.label() == label)
}

/// 표 순서대로 표시 이름을 돌려준다.
pub fn labels() -> impl Iterator<Item = &'static str> {
    Conversion::ALL.into_iter().map(Conversion::label)
}

/// 소수점 구분자로 쓰인 ','를 '.'로 바꾼다.
pub fn normalize_input(text: &str) -> String {
    text.replace(',', ".")
}

/// 입력 문자열을 정규화한 뒤 실수로 해석한다. 앞뒤 공백은 무시한다.
///
/// 문자로 쓴 특수값은 `NaN` 과 `Infinity`(부호 허용) 철자만 받는다. `inf`, `nan` 등은 거부한다.
pub fn parse_input(text: &str) -> Result<f64, ConversionError> {
    let normalized = normalize_input(text);
    let trimmed = normalized.trim();
    let body = trimmed.trim_start_matches(['+', '-']);
    let spelled = body.starts_with(|c: char| c.is_ascii_alphabetic());
    if spelled && body != "NaN" && body != "Infinity" {
        return Err(ConversionError::InvalidNumber(text.to_string()));
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| ConversionError::InvalidNumber(text.to_string()))
}

/// 이미 선택된 변환으로 입력 문자열을 환산한다.
pub fn convert_with(text: &str, conversion: Conversion) -> Result<f64, ConversionError> {
    let value = parse_input(text)?;
    Ok(apply_logged(conversion, value))
}

/// 표시 이름으로 변환을 찾아 입력 문자열을 환산한다.
///
/// 입력 검증이 이름 조회보다 먼저이므로 둘 다 틀리면 `InvalidNumber` 가 나온다.
pub fn convert_input(text: &str, label: &str) -> Result<f64, ConversionError> {
    let value = parse_input(text)?;
    let conversion =
        lookup(label).ok_or_else(|| ConversionError::UnknownConversion(label.to_string()))?;
    Ok(apply_logged(conversion, value))
}

fn apply_logged(conversion: Conversion, value: f64) -> f64 {
    let result = conversion.apply(value);
    log::debug!("{} {value} -> {result}", conversion.code());
    result
}

/// 결과를 로케일과 무관하게 소수점 둘째 자리까지 표기한다.
///
/// 이진 값이 아니라 최단 십진 표현을 기준으로 반올림(half-up)한다. 0.125 → `0.13`.
pub fn format_value(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return if value > 0.0 { "Infinity" } else { "-Infinity" }.to_string();
    }

    let repr = format!("{}", value.abs());
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    let mut digits: Vec<u8> = int_part
        .bytes()
        .chain(frac_part.bytes().chain(std::iter::repeat(b'0')).take(2))
        .map(|b| b - b'0')
        .collect();

    if frac_part.as_bytes().get(2).is_some_and(|d| *d >= b'5') {
        let mut i = digits.len();
        loop {
            if i == 0 {
                digits.insert(0, 1);
                break;
            }
            i -= 1;
            if digits[i] == 9 {
                digits[i] = 0;
            } else {
                digits[i] += 1;
                break;
            }
        }
    }

    let split = digits.len() - 2;
    let text: String = digits.iter().map(|d| char::from(b'0' + d)).collect();
    let sign = if value.is_sign_negative() { "-" } else { "" };
    format!("{sign}{}.{}", &text[..split], &text[split..])
}
