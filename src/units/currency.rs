use serde::{Deserialize, Serialize};

/// 고정 환율: 1 USD 당 루블.
pub const RUB_PER_USD: f64 = 90.0;

/// 통화 단위. 내부 기준은 루블이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CurrencyUnit {
    Rub,
    Usd,
}

fn to_rub(value: f64, unit: CurrencyUnit) -> f64 {
    match unit {
        CurrencyUnit::Rub => value,
        CurrencyUnit::Usd => value * RUB_PER_USD,
    }
}

fn from_rub(value_rub: f64, unit: CurrencyUnit) -> f64 {
    match unit {
        CurrencyUnit::Rub => value_rub,
        CurrencyUnit::Usd => value_rub / RUB_PER_USD,
    }
}

/// 고정 환율로 통화를 환산한다. 환율 갱신은 하지 않는다.
pub fn convert_currency(value: f64, from: CurrencyUnit, to: CurrencyUnit) -> f64 {
    let rub = to_rub(value, from);
    from_rub(rub, to)
}
