use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Deduction applied to income before the band table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReliefRule {
    /// Consolidated Relief Allowance:
    /// `max(floor, income × floor_rate) + income × gross_rate`.
    ConsolidatedRelief {
        floor: Decimal,
        floor_rate: Decimal,
        gross_rate: Decimal,
    },

    /// Flat tax-free threshold, with rent relief of
    /// `min(rent × rent_relief_rate, rent_relief_cap)` taken off income first.
    TaxFreeThreshold {
        threshold: Decimal,
        rent_relief_rate: Decimal,
        rent_relief_cap: Decimal,
    },
}

impl ReliefRule {
    /// Proportional relief for `income`. Zero for threshold rules.
    pub fn relief(
        &self,
        income: Decimal,
    ) -> Decimal {
        match *self {
            Self::ConsolidatedRelief {
                floor,
                floor_rate,
                gross_rate,
            } => floor.max(income * floor_rate) + income * gross_rate,
            Self::TaxFreeThreshold { .. } => Decimal::ZERO,
        }
    }

    /// Rent relief for `rent_annual`, capped. Zero when the rule has none.
    pub fn rent_relief(
        &self,
        rent_annual: Decimal,
    ) -> Decimal {
        match *self {
            Self::TaxFreeThreshold {
                rent_relief_rate,
                rent_relief_cap,
                ..
            } => (rent_annual.max(Decimal::ZERO) * rent_relief_rate).min(rent_relief_cap),
            Self::ConsolidatedRelief { .. } => Decimal::ZERO,
        }
    }

    pub fn threshold(&self) -> Decimal {
        match *self {
            Self::TaxFreeThreshold { threshold, .. } => threshold,
            Self::ConsolidatedRelief { .. } => Decimal::ZERO,
        }
    }
}
