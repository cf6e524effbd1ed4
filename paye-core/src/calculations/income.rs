//! Turns a filer's [`TaxProfile`] into the figures the engine is called with.
//!
//! The engine expects annual income already net of business expenses. This
//! module annualizes monthly entries, decides which expenses the filer's
//! category may deduct, and picks the crypto method for crypto filers.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::calculations::common::saturating_sub;
use crate::calculations::engine::{TaxEngineError, ensure_non_negative};
use crate::{IncomePeriod, TaxOptions, TaxProfile};

/// Engine-ready view of a profile.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PreparedIncome {
    /// Income for the full year, before expenses.
    pub gross_annual: Decimal,

    /// Annual business expenses actually deducted. Zero for categories that
    /// cannot deduct expenses.
    pub deductible_expenses: Decimal,

    /// What the engine is called with: gross less deductible expenses.
    pub net_income: Decimal,

    pub options: TaxOptions,
}

/// Scales an amount for one `period` up to a full year.
///
/// # Errors
///
/// Returns [`TaxEngineError::AmountOverflow`] naming `field` when the annual
/// figure does not fit in a [`Decimal`].
pub fn annualize(
    field: &'static str,
    amount: Decimal,
    period: IncomePeriod,
) -> Result<Decimal, TaxEngineError> {
    amount
        .checked_mul(Decimal::from(period.periods_per_year()))
        .ok_or_else(|| {
            warn!(field, amount = %amount, period = period.as_str(), "amount overflows when annualized");
            TaxEngineError::AmountOverflow { field }
        })
}

/// Validates a profile and derives the engine inputs from it.
///
/// # Errors
///
/// Returns [`TaxEngineError::NegativeAmount`] naming the first negative
/// income, expense or rent field, and [`TaxEngineError::AmountOverflow`]
/// when income or the expense total is too large to annualize.
pub fn prepare(profile: &TaxProfile) -> Result<PreparedIncome, TaxEngineError> {
    ensure_non_negative("income", profile.income)?;
    for (field, value) in profile.expenses.fields() {
        ensure_non_negative(field, value)?;
    }
    if let Some(rent) = profile.rent_annual {
        ensure_non_negative("rent_annual", rent)?;
    }

    let gross_annual = annualize("income", profile.income, profile.period)?;
    let deductible_expenses = if profile.category.deducts_business_expenses() {
        let total = profile
            .expenses
            .checked_total()
            .ok_or(TaxEngineError::AmountOverflow { field: "expenses" })?;
        annualize("expenses", total, profile.period)?
    } else {
        if !profile.expenses.is_empty() {
            warn!(
                category = profile.category.as_str(),
                "category cannot deduct business expenses; ignoring them"
            );
        }
        Decimal::ZERO
    };

    let crypto_method = if profile.category.is_crypto() {
        Some(profile.crypto_method.unwrap_or_default())
    } else {
        if let Some(method) = profile.crypto_method {
            warn!(
                category = profile.category.as_str(),
                method = method.as_str(),
                "crypto method given for a non-crypto filer; ignoring it"
            );
        }
        None
    };

    debug!(
        category = profile.category.as_str(),
        period = profile.period.as_str(),
        gross_annual = %gross_annual,
        deductible_expenses = %deductible_expenses,
        "prepared income"
    );

    Ok(PreparedIncome {
        gross_annual,
        deductible_expenses,
        net_income: saturating_sub(gross_annual, deductible_expenses),
        options: TaxOptions {
            crypto_method,
            rent_annual: profile.rent_annual,
        },
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;
    use crate::{BusinessExpenses, CryptoMethod, FilerCategory, TaxRegime};

    fn expenses() -> BusinessExpenses {
        BusinessExpenses {
            internet: dec!(20000),
            tools: dec!(15000),
            workspace_rent: dec!(50000),
            other: dec!(5000),
        }
    }

    fn freelancer_profile() -> TaxProfile {
        TaxProfile {
            tax_year: TaxRegime::Reform,
            category: FilerCategory::Freelancer,
            income: dec!(450000),
            period: IncomePeriod::Monthly,
            expenses: expenses(),
            crypto_method: None,
            rent_annual: None,
        }
    }

    #[test]
    fn annualize_multiplies_monthly_by_twelve() {
        assert_eq!(
            annualize("income", dec!(250000), IncomePeriod::Monthly),
            Ok(dec!(3000000))
        );
        assert_eq!(
            annualize("income", dec!(250000), IncomePeriod::Yearly),
            Ok(dec!(250000))
        );
    }

    #[test]
    fn annualize_reports_overflow_by_field() {
        assert_eq!(
            annualize("income", Decimal::MAX, IncomePeriod::Monthly),
            Err(TaxEngineError::AmountOverflow { field: "income" })
        );
        // A yearly figure is never scaled, so even the maximum fits
        assert_eq!(
            annualize("income", Decimal::MAX, IncomePeriod::Yearly),
            Ok(Decimal::MAX)
        );
    }

    #[test]
    fn freelancer_deducts_annualized_expenses() {
        let prepared = prepare(&freelancer_profile()).unwrap();

        assert_eq!(prepared.gross_annual, dec!(5400000));
        // (20,000 + 15,000 + 50,000 + 5,000) × 12
        assert_eq!(prepared.deductible_expenses, dec!(1080000));
        assert_eq!(prepared.net_income, dec!(4320000));
    }

    #[test]
    fn salary_earner_deducts_nothing() {
        let profile = TaxProfile {
            category: FilerCategory::Salary,
            ..freelancer_profile()
        };

        let prepared = prepare(&profile).unwrap();

        assert_eq!(prepared.deductible_expenses, dec!(0));
        assert_eq!(prepared.net_income, dec!(5400000));
    }

    #[test]
    fn expenses_larger_than_income_floor_at_zero() {
        let profile = TaxProfile {
            category: FilerCategory::Both,
            income: dec!(50000),
            ..freelancer_profile()
        };

        let prepared = prepare(&profile).unwrap();

        assert_eq!(prepared.net_income, dec!(0));
    }

    #[test]
    fn crypto_filer_defaults_to_capital_gains() {
        let profile = TaxProfile::new(TaxRegime::Legacy, FilerCategory::Crypto, dec!(5000000));

        let prepared = prepare(&profile).unwrap();

        assert_eq!(
            prepared.options.crypto_method,
            Some(CryptoMethod::CapitalGains)
        );
    }

    #[test]
    fn crypto_method_dropped_for_salary_earner() {
        let mut profile = TaxProfile::new(TaxRegime::Legacy, FilerCategory::Salary, dec!(5000000));
        profile.crypto_method = Some(CryptoMethod::CapitalGains);

        let prepared = prepare(&profile).unwrap();

        assert_eq!(prepared.options.crypto_method, None);
    }

    #[test]
    fn rent_passes_through_unannualized() {
        let profile = TaxProfile {
            rent_annual: Some(dec!(1200000)),
            ..freelancer_profile()
        };

        let prepared = prepare(&profile).unwrap();

        assert_eq!(prepared.options.rent_annual, Some(dec!(1200000)));
    }

    #[test]
    fn negative_expense_is_rejected_by_name() {
        let mut profile = freelancer_profile();
        profile.expenses.tools = dec!(-1);

        let result = prepare(&profile);

        assert_eq!(
            result,
            Err(TaxEngineError::NegativeAmount {
                field: "tools",
                value: dec!(-1),
            })
        );
    }

    #[test]
    fn huge_monthly_income_is_rejected_not_panicking() {
        let profile = TaxProfile {
            income: Decimal::MAX,
            ..freelancer_profile()
        };

        let err = prepare(&profile).unwrap_err();

        assert_eq!(err, TaxEngineError::AmountOverflow { field: "income" });
        assert!(err.is_invalid_input());
    }

    #[test]
    fn expense_total_overflow_is_rejected() {
        let mut profile = freelancer_profile();
        profile.period = IncomePeriod::Yearly;
        profile.expenses.internet = Decimal::MAX;
        profile.expenses.tools = Decimal::MAX;

        assert_eq!(
            prepare(&profile),
            Err(TaxEngineError::AmountOverflow { field: "expenses" })
        );
    }

    #[test]
    fn annualized_expense_overflow_is_rejected() {
        let mut profile = freelancer_profile();
        profile.income = dec!(1);
        profile.expenses.other = dec!(10000000000000000000000000000);

        assert_eq!(
            prepare(&profile),
            Err(TaxEngineError::AmountOverflow { field: "expenses" })
        );
    }

    #[test]
    fn ignored_expenses_never_overflow() {
        let mut profile = freelancer_profile();
        profile.category = FilerCategory::Salary;
        profile.expenses.internet = Decimal::MAX;
        profile.expenses.tools = Decimal::MAX;

        let prepared = prepare(&profile).unwrap();

        assert_eq!(prepared.deductible_expenses, dec!(0));
    }

    #[test]
    fn negative_rent_is_rejected() {
        let profile = TaxProfile {
            rent_annual: Some(dec!(-10)),
            ..freelancer_profile()
        };

        assert!(prepare(&profile).unwrap_err().is_invalid_input());
    }
}
