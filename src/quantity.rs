/// 다루는 물리량(및 통화) 종류를 나타낸다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuantityKind {
    Length,
    Temperature,
    Currency,
}

impl QuantityKind {
    /// 목록 출력에 쓰는 짧은 이름.
    pub fn name(self) -> &'static str {
        match self {
            QuantityKind::Length => "length",
            QuantityKind::Temperature => "temperature",
            QuantityKind::Currency => "currency",
        }
    }
}
