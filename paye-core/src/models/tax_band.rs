use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// One slice of a progressive schedule.
///
/// `width` is the size of the slice, `None` for the open-ended top band.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxBand {
    pub width: Option<Decimal>,
    pub rate: Decimal,
}

impl TaxBand {
    pub const fn new(
        width: Decimal,
        rate: Decimal,
    ) -> Self {
        Self {
            width: Some(width),
            rate,
        }
    }

    pub const fn unbounded(rate: Decimal) -> Self {
        Self { width: None, rate }
    }

    /// The part of `remaining` that falls inside this band.
    pub fn consume(
        &self,
        remaining: Decimal,
    ) -> Decimal {
        match self.width {
            Some(width) => remaining.min(width),
            None => remaining,
        }
    }
}
