//! Rate tables for the two modeled regimes.
//!
//! Each regime is one [`TaxSchedule`] constant holding its band table, its
//! relief rule and, for the legacy regime, the flat crypto capital-gains
//! rate. The engine only ever reads these constants.
//!
//! | Regime | Relief | Bands |
//! |--------|--------|-------|
//! | Legacy (2024/2025) | `max(₦200,000, 1%) + 20%` of income | 7, 11, 15, 19, 21, 24% |
//! | Reform (2025/2026) | ₦800,000 threshold, rent relief 20% capped at ₦500,000 | 15, 18, 21, 23, 25% |

use rust_decimal::Decimal;
use rust_decimal_macros::dec;

use crate::{ReliefRule, TaxBand, TaxRegime};

/// Everything the engine needs to know about one regime.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TaxSchedule {
    pub regime: TaxRegime,
    pub relief: ReliefRule,
    /// Ordered band table; only the last band is unbounded.
    pub bands: &'static [TaxBand],
    /// Flat rate for crypto capital gains, if the regime has one.
    pub crypto_flat_rate: Option<Decimal>,
}

impl TaxSchedule {
    pub fn for_regime(regime: TaxRegime) -> &'static TaxSchedule {
        match regime {
            TaxRegime::Legacy => &LEGACY_SCHEDULE,
            TaxRegime::Reform => &REFORM_SCHEDULE,
        }
    }
}

const LEGACY_BANDS: [TaxBand; 6] = [
    TaxBand::new(dec!(300000), dec!(0.07)),
    TaxBand::new(dec!(300000), dec!(0.11)),
    TaxBand::new(dec!(500000), dec!(0.15)),
    TaxBand::new(dec!(500000), dec!(0.19)),
    TaxBand::new(dec!(1600000), dec!(0.21)),
    TaxBand::unbounded(dec!(0.24)),
];

const REFORM_BANDS: [TaxBand; 5] = [
    TaxBand::new(dec!(2200000), dec!(0.15)),
    TaxBand::new(dec!(9000000), dec!(0.18)),
    TaxBand::new(dec!(13000000), dec!(0.21)),
    TaxBand::new(dec!(25000000), dec!(0.23)),
    TaxBand::unbounded(dec!(0.25)),
];

pub static LEGACY_SCHEDULE: TaxSchedule = TaxSchedule {
    regime: TaxRegime::Legacy,
    relief: ReliefRule::ConsolidatedRelief {
        floor: dec!(200000),
        floor_rate: dec!(0.01),
        gross_rate: dec!(0.20),
    },
    bands: &LEGACY_BANDS,
    crypto_flat_rate: Some(dec!(0.10)),
};

pub static REFORM_SCHEDULE: TaxSchedule = TaxSchedule {
    regime: TaxRegime::Reform,
    relief: ReliefRule::TaxFreeThreshold {
        threshold: dec!(800000),
        rent_relief_rate: dec!(0.20),
        rent_relief_cap: dec!(500000),
    },
    bands: &REFORM_BANDS,
    crypto_flat_rate: None,
};
