use serde::{Deserialize, Serialize};

/// 1 km 에 해당하는 마일 수. 역변환도 같은 상수로 나눈다.
pub const KM_TO_MILES: f64 = 0.621371;

/// 길이 단위. 내부 기준은 킬로미터이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LengthUnit {
    Kilometer,
    Mile,
}

fn to_kilometer(value: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Kilometer => value,
        LengthUnit::Mile => value / KM_TO_MILES,
    }
}

fn from_kilometer(value_km: f64, unit: LengthUnit) -> f64 {
    match unit {
        LengthUnit::Kilometer => value_km,
        LengthUnit::Mile => value_km * KM_TO_MILES,
    }
}

/// 길이를 다른 단위로 변환한다.
pub fn convert_length(value: f64, from: LengthUnit, to: LengthUnit) -> f64 {
    let km = to_kilometer(value, from);
    from_kilometer(km, to)
}
