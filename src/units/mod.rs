//! 단위 정의 및 변환 모듈 모음.

pub mod currency;
pub mod length;
pub mod temperature;

pub use currency::{convert_currency, CurrencyUnit, RUB_PER_USD};
pub use length::{convert_length, LengthUnit, KM_TO_MILES};
pub use temperature::{convert_temperature, TemperatureUnit};
