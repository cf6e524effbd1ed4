use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CryptoMethod, TaxRegime};

/// Modifiers for a single engine call.
///
/// A `Some` crypto method marks the call as a crypto flow. `rent_annual`
/// only matters under the reform regime.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxOptions {
    pub crypto_method: Option<CryptoMethod>,
    pub rent_annual: Option<Decimal>,
}

impl TaxOptions {
    pub fn with_crypto_method(
        mut self,
        method: CryptoMethod,
    ) -> Self {
        self.crypto_method = Some(method);
        self
    }

    pub fn with_rent(
        mut self,
        rent_annual: Decimal,
    ) -> Self {
        self.rent_annual = Some(rent_annual);
        self
    }
}

/// One line of the band breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakdownLine {
    pub label: String,
    /// Income charged on this line.
    pub amount: Decimal,
    pub rate: Decimal,
    pub tax: Decimal,
}

/// Outcome of one engine call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TaxComputationResult {
    pub regime: TaxRegime,

    /// Income the engine was called with.
    pub income: Decimal,

    /// Total tax payable; always the sum of the breakdown lines.
    pub tax: Decimal,

    /// Proportional relief (legacy CRA). Zero under the reform and for
    /// flat-rate crypto.
    pub relief_applied: Decimal,

    /// Rent relief subtracted before the reform threshold.
    pub rent_relief: Decimal,

    /// Tax-free threshold deducted from the base (reform only).
    pub threshold_applied: Decimal,

    /// Base the band table was applied to.
    pub taxable_income: Decimal,

    /// Set when reform income is at or below the tax-free threshold.
    pub below_threshold: bool,

    pub breakdown: Vec<BreakdownLine>,
}

impl TaxComputationResult {
    pub fn breakdown_total(&self) -> Decimal {
        self.breakdown.iter().map(|line| line.tax).sum()
    }
}
