//! Personal income tax engine for the legacy and reform regimes.
//!
//! One call maps an annual income (already net of business expenses) plus a
//! regime and a set of [`TaxOptions`] to a [`TaxComputationResult`].
//!
//! # Steps
//!
//! | Step | Legacy (2024/2025) | Reform (2025/2026) |
//! |------|--------------------|--------------------|
//! | 1 | Reject negative income or rent | same |
//! | 2 | Crypto capital gains: flat 10%, stop | (no flat rate) |
//! | 3 | CRA: `max(₦200,000, 1%) + 20%` of income | Rent relief: `min(20% of rent, ₦500,000)` |
//! | 4 | Taxable = income − CRA | Income ≤ ₦800,000: nothing due, stop. Else taxable = income − rent relief − ₦800,000 |
//! | 5 | Apply bands in order until the base is used up | same |
//!
//! Each band's tax is rounded half-up to the kobo, and the total is the sum of
//! those rounded figures, so the breakdown always adds up to the total.
//!
//! # Example
//!
//! ```
//! use rust_decimal_macros::dec;
//! use paye_core::{TaxOptions, TaxRegime, compute_tax};
//!
//! let result = compute_tax(dec!(1000000), TaxRegime::Legacy, &TaxOptions::default()).unwrap();
//!
//! // CRA: max(200,000, 10,000) + 200,000 = 400,000
//! assert_eq!(result.relief_applied, dec!(400000));
//! assert_eq!(result.taxable_income, dec!(600000));
//! // 300,000 × 7% + 300,000 × 11%
//! assert_eq!(result.tax, dec!(54000));
//! assert_eq!(result.breakdown.len(), 2);
//! ```

use rust_decimal::Decimal;
use thiserror::Error;
use tracing::{debug, warn};

use crate::calculations::common::{format_naira, format_rate, round_half_up, saturating_sub};
use crate::calculations::schedules::TaxSchedule;
use crate::{BreakdownLine, CryptoMethod, ReliefRule, TaxComputationResult, TaxOptions, TaxRegime};

/// Errors raised when the engine is called outside its contract.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaxEngineError {
    /// A monetary input was below zero.
    #[error("{field} must not be negative, got {value}")]
    NegativeAmount { field: &'static str, value: Decimal },

    /// Annualizing or summing an amount exceeded what a [`Decimal`] can hold.
    #[error("{field} is too large to compute with")]
    AmountOverflow { field: &'static str },

    /// A tax year or regime name that maps to neither regime.
    #[error("unsupported tax regime '{0}' (expected 2025/legacy or 2026/reform)")]
    UnsupportedRegime(String),

    /// A crypto method name other than `capital_gains` or `personal_income`.
    #[error("unsupported crypto tax method '{0}' (expected capital_gains or personal_income)")]
    UnsupportedMethod(String),

    /// A filer category name outside the four known categories.
    #[error("unsupported filer category '{0}' (expected salary, freelancer, both or crypto)")]
    UnsupportedCategory(String),
}

impl TaxEngineError {
    /// True for malformed amounts, as opposed to unknown selector values.
    pub fn is_invalid_input(&self) -> bool {
        matches!(
            self,
            Self::NegativeAmount { .. } | Self::AmountOverflow { .. }
        )
    }
}

/// Rejects a negative amount, logging the offending field.
pub(crate) fn ensure_non_negative(
    field: &'static str,
    value: Decimal,
) -> Result<(), TaxEngineError> {
    if value < Decimal::ZERO {
        warn!(field, value = %value, "rejecting negative amount");
        return Err(TaxEngineError::NegativeAmount { field, value });
    }
    Ok(())
}

/// Computes tax on `income` under `regime`.
///
/// Shorthand for `TaxEngine::for_regime(regime).calculate(income, options)`.
///
/// # Errors
///
/// Returns [`TaxEngineError::NegativeAmount`] for a negative income or rent.
pub fn compute_tax(
    income: Decimal,
    regime: TaxRegime,
    options: &TaxOptions,
) -> Result<TaxComputationResult, TaxEngineError> {
    TaxEngine::for_regime(regime).calculate(income, options)
}

/// Calculator bound to one regime's schedule.
#[derive(Debug, Clone, Copy)]
pub struct TaxEngine<'a> {
    schedule: &'a TaxSchedule,
}

impl TaxEngine<'static> {
    pub fn for_regime(regime: TaxRegime) -> Self {
        Self::new(TaxSchedule::for_regime(regime))
    }
}

impl<'a> TaxEngine<'a> {
    pub fn new(schedule: &'a TaxSchedule) -> Self {
        Self { schedule }
    }

    /// Runs the full computation for one income figure.
    ///
    /// # Errors
    ///
    /// Returns [`TaxEngineError::NegativeAmount`] if `income` or
    /// `options.rent_annual` is below zero.
    pub fn calculate(
        &self,
        income: Decimal,
        options: &TaxOptions,
    ) -> Result<TaxComputationResult, TaxEngineError> {
        ensure_non_negative("income", income)?;
        let rent = options.rent_annual.unwrap_or(Decimal::ZERO);
        ensure_non_negative("rent_annual", rent)?;

        // Legacy crypto capital gains bypass relief and bands entirely
        if let (Some(rate), Some(CryptoMethod::CapitalGains)) =
            (self.schedule.crypto_flat_rate, options.crypto_method)
        {
            return Ok(self.flat_rate_result(income, rate));
        }

        let relief = self.relief(income);
        let rent_relief = self.rent_relief(rent);
        if options.rent_annual.is_some() && self.schedule.relief.threshold().is_zero() {
            debug!(
                regime = self.schedule.regime.as_str(),
                "rent relief not available under this regime; ignoring rent"
            );
        }

        if self.is_below_threshold(income) {
            return Ok(self.below_threshold_result(income, rent_relief));
        }

        let threshold = self.schedule.relief.threshold();
        let taxable_income = self.taxable_income(income, relief, rent_relief);
        if taxable_income.is_zero() && rent_relief > Decimal::ZERO && !threshold.is_zero() {
            warn!(
                income = %income,
                rent_relief = %rent_relief,
                threshold = %threshold,
                "income is above the tax-free threshold but rent relief leaves nothing to tax"
            );
        }

        let (tax, breakdown) = self.apply_bands(taxable_income);

        debug!(
            regime = self.schedule.regime.as_str(),
            income = %income,
            relief = %relief,
            rent_relief = %rent_relief,
            taxable_income = %taxable_income,
            tax = %tax,
            bands = breakdown.len(),
            "computed banded tax"
        );

        Ok(TaxComputationResult {
            regime: self.schedule.regime,
            income,
            tax,
            relief_applied: relief,
            rent_relief,
            threshold_applied: threshold,
            taxable_income,
            below_threshold: false,
            breakdown,
        })
    }

    /// Proportional relief from the schedule's relief rule.
    fn relief(
        &self,
        income: Decimal,
    ) -> Decimal {
        self.schedule.relief.relief(income)
    }

    /// Capped rent relief; zero where the regime has none.
    fn rent_relief(
        &self,
        rent_annual: Decimal,
    ) -> Decimal {
        self.schedule.relief.rent_relief(rent_annual)
    }

    /// The threshold test uses raw income, before rent relief.
    fn is_below_threshold(
        &self,
        income: Decimal,
    ) -> bool {
        match self.schedule.relief {
            ReliefRule::TaxFreeThreshold { threshold, .. } => income <= threshold,
            ReliefRule::ConsolidatedRelief { .. } => false,
        }
    }

    /// Base for the band table: income less rent relief, then less relief and
    /// threshold, each step floored at zero.
    fn taxable_income(
        &self,
        income: Decimal,
        relief: Decimal,
        rent_relief: Decimal,
    ) -> Decimal {
        let after_rent = saturating_sub(income, rent_relief);
        saturating_sub(after_rent, relief + self.schedule.relief.threshold())
    }

    /// Consumes `taxable_income` band by band, in order.
    fn apply_bands(
        &self,
        taxable_income: Decimal,
    ) -> (Decimal, Vec<BreakdownLine>) {
        let mut remaining = taxable_income;
        let mut lower = Decimal::ZERO;
        let mut tax = Decimal::ZERO;
        let mut breakdown = Vec::new();

        for (index, band) in self.schedule.bands.iter().enumerate() {
            if remaining <= Decimal::ZERO {
                break;
            }

            let consumed = band.consume(remaining);
            let band_tax = round_half_up(consumed * band.rate);

            breakdown.push(BreakdownLine {
                label: band_label(index, lower, band.width, band.rate),
                amount: consumed,
                rate: band.rate,
                tax: band_tax,
            });

            tax += band_tax;
            remaining -= consumed;
            if let Some(width) = band.width {
                lower += width;
            }
        }

        (tax, breakdown)
    }

    fn flat_rate_result(
        &self,
        income: Decimal,
        rate: Decimal,
    ) -> TaxComputationResult {
        let tax = round_half_up(income * rate);

        debug!(
            regime = self.schedule.regime.as_str(),
            income = %income,
            rate = %rate,
            tax = %tax,
            "computed flat-rate crypto capital gains tax"
        );

        TaxComputationResult {
            regime: self.schedule.regime,
            income,
            tax,
            relief_applied: Decimal::ZERO,
            rent_relief: Decimal::ZERO,
            threshold_applied: Decimal::ZERO,
            taxable_income: income,
            below_threshold: false,
            breakdown: vec![BreakdownLine {
                label: format!("Crypto capital gains at flat {}", format_rate(rate)),
                amount: income,
                rate,
                tax,
            }],
        }
    }

    fn below_threshold_result(
        &self,
        income: Decimal,
        rent_relief: Decimal,
    ) -> TaxComputationResult {
        let threshold = self.schedule.relief.threshold();

        debug!(
            income = %income,
            threshold = %threshold,
            "income at or below tax-free threshold; no tax due"
        );

        TaxComputationResult {
            regime: self.schedule.regime,
            income,
            tax: Decimal::ZERO,
            relief_applied: Decimal::ZERO,
            rent_relief,
            threshold_applied: threshold,
            taxable_income: Decimal::ZERO,
            below_threshold: true,
            breakdown: vec![BreakdownLine {
                label: format!(
                    "Income at or below the {} tax-free threshold",
                    format_naira(threshold)
                ),
                amount: income,
                rate: Decimal::ZERO,
                tax: Decimal::ZERO,
            }],
        }
    }
}

/// "First ₦300,000 at 7%", "Next ₦300,000 at 11%", "Above ₦3,200,000 at 24%".
fn band_label(
    index: usize,
    lower: Decimal,
    width: Option<Decimal>,
    rate: Decimal,
) -> String {
    match width {
        Some(width) if index == 0 => format!("First {} at {}", format_naira(width), format_rate(rate)),
        Some(width) => format!("Next {} at {}", format_naira(width), format_rate(rate)),
        None => format!("Above {} at {}", format_naira(lower), format_rate(rate)),
    }
}
