//! Take-home pay and side-by-side regime comparison.
//!
//! Both build on [`prepare`] and [`compute_tax`]; nothing here changes how
//! tax is computed, it only reports the result against gross income.

use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::calculations::common::round_half_up;
use crate::calculations::engine::{TaxEngineError, compute_tax};
use crate::calculations::income::prepare;
use crate::{FilerCategory, TaxComputationResult, TaxProfile, TaxRegime};

const MONTHS_PER_YEAR: Decimal = dec!(12);

/// What a filer keeps after tax.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TakeHomeSummary {
    pub category: FilerCategory,
    pub gross_annual: Decimal,
    pub deductible_expenses: Decimal,
    pub computation: TaxComputationResult,
    /// Gross annual income less tax.
    pub net_annual: Decimal,
    pub net_monthly: Decimal,
    pub monthly_tax: Decimal,
    /// Tax as a fraction of gross income, to four places.
    pub effective_rate: Decimal,
}

impl TakeHomeSummary {
    pub fn regime(&self) -> TaxRegime {
        self.computation.regime
    }

    pub fn tax(&self) -> Decimal {
        self.computation.tax
    }
}

/// The same profile under both regimes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegimeComparison {
    pub legacy: TakeHomeSummary,
    pub reform: TakeHomeSummary,
    /// Reform tax minus legacy tax; negative when the reform is cheaper.
    pub tax_difference: Decimal,
}

impl RegimeComparison {
    pub fn reform_saves(&self) -> bool {
        self.tax_difference < Decimal::ZERO
    }
}

/// Computes tax and take-home pay for `profile` under its own tax year.
///
/// # Errors
///
/// Propagates [`TaxEngineError`] from preparation or the engine.
pub fn summarize(profile: &TaxProfile) -> Result<TakeHomeSummary, TaxEngineError> {
    let prepared = prepare(profile)?;
    let computation = compute_tax(prepared.net_income, profile.tax_year, &prepared.options)?;

    let tax = computation.tax;
    let net_annual = round_half_up(prepared.gross_annual - tax);
    let effective_rate = if prepared.gross_annual.is_zero() {
        Decimal::ZERO
    } else {
        (tax / prepared.gross_annual).round_dp(4)
    };

    Ok(TakeHomeSummary {
        category: profile.category,
        gross_annual: prepared.gross_annual,
        deductible_expenses: prepared.deductible_expenses,
        net_annual,
        net_monthly: round_half_up(net_annual / MONTHS_PER_YEAR),
        monthly_tax: round_half_up(tax / MONTHS_PER_YEAR),
        effective_rate,
        computation,
    })
}

/// Summarizes `profile` under both regimes, ignoring its own tax year.
///
/// # Errors
///
/// Propagates [`TaxEngineError`] from either run.
pub fn compare_regimes(profile: &TaxProfile) -> Result<RegimeComparison, TaxEngineError> {
    let legacy = summarize(&profile.for_regime(TaxRegime::Legacy))?;
    let reform = summarize(&profile.for_regime(TaxRegime::Reform))?;
    let tax_difference = reform.tax() - legacy.tax();

    debug!(
        legacy_tax = %legacy.tax(),
        reform_tax = %reform.tax(),
        difference = %tax_difference,
        "compared regimes"
    );

    Ok(RegimeComparison {
        legacy,
        reform,
        tax_difference,
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{BusinessExpenses, IncomePeriod};

    fn salary(
        regime: TaxRegime,
        annual: Decimal,
    ) -> TaxProfile {
        TaxProfile::new(regime, FilerCategory::Salary, annual)
    }

    #[test]
    fn summarize_legacy_salary() {
        let summary = summarize(&salary(TaxRegime::Legacy, dec!(1000000))).unwrap();

        assert_eq!(summary.tax(), dec!(54000));
        assert_eq!(summary.net_annual, dec!(946000));
        assert_eq!(summary.net_monthly, dec!(78833.33));
        assert_eq!(summary.monthly_tax, dec!(4500));
        assert_eq!(summary.effective_rate, dec!(0.054));
    }

    #[test]
    fn summarize_monthly_freelancer_under_reform() {
        let profile = TaxProfile {
            tax_year: TaxRegime::Reform,
            category: FilerCategory::Freelancer,
            income: dec!(250000),
            period: IncomePeriod::Monthly,
            expenses: BusinessExpenses {
                internet: dec!(10000),
                ..Default::default()
            },
            crypto_method: None,
            rent_annual: None,
        };

        let summary = summarize(&profile).unwrap();

        assert_eq!(summary.gross_annual, dec!(3000000));
        assert_eq!(summary.deductible_expenses, dec!(120000));
        // 2,880,000 − 800,000 = 2,080,000 at 15%
        assert_eq!(summary.computation.taxable_income, dec!(2080000));
        assert_eq!(summary.tax(), dec!(312000));
        // Expenses are reported, not taken out of take-home
        assert_eq!(summary.net_annual, dec!(2688000));
        assert_eq!(summary.net_monthly, dec!(224000));
    }

    #[test]
    fn summarize_zero_income_has_zero_effective_rate() {
        let summary = summarize(&salary(TaxRegime::Reform, dec!(0))).unwrap();

        assert_eq!(summary.effective_rate, dec!(0));
        assert_eq!(summary.net_annual, dec!(0));
        assert!(summary.computation.below_threshold);
    }

    #[test]
    fn summarize_propagates_engine_errors() {
        let result = summarize(&salary(TaxRegime::Reform, dec!(-5)));

        assert!(matches!(
            result,
            Err(TaxEngineError::NegativeAmount { field: "income", .. })
        ));
    }

    #[test]
    fn compare_regimes_reports_difference() {
        let comparison = compare_regimes(&salary(TaxRegime::Legacy, dec!(1000000))).unwrap();

        assert_eq!(comparison.legacy.tax(), dec!(54000));
        assert_eq!(comparison.reform.tax(), dec!(30000));
        assert_eq!(comparison.tax_difference, dec!(-24000));
        assert!(comparison.reform_saves());
        assert_eq!(comparison.legacy.regime(), TaxRegime::Legacy);
        assert_eq!(comparison.reform.regime(), TaxRegime::Reform);
    }

    #[test]
    fn compare_regimes_for_large_income_costs_more_under_reform() {
        let comparison = compare_regimes(&salary(TaxRegime::Reform, dec!(30000000))).unwrap();

        // Legacy: 5,480,000. Reform base is 29,200,000:
        // 330,000 + 1,620,000 + 2,730,000 + 5,000,000 × 23%
        assert_eq!(comparison.reform.tax(), dec!(5830000));
        assert_eq!(comparison.tax_difference, dec!(350000));
        assert!(!comparison.reform_saves());
    }
}
