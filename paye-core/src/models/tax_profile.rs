use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::{CryptoMethod, FilerCategory, TaxRegime};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IncomePeriod {
    Monthly,
    #[default]
    Yearly,
}

impl IncomePeriod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Monthly => "monthly",
            Self::Yearly => "yearly",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "monthly" | "month" => Some(Self::Monthly),
            "yearly" | "year" | "annual" | "annually" => Some(Self::Yearly),
            _ => None,
        }
    }

    pub fn periods_per_year(&self) -> u32 {
        match self {
            Self::Monthly => 12,
            Self::Yearly => 1,
        }
    }
}

/// Business expenses a freelancer may deduct, entered in the same period
/// as the income they offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BusinessExpenses {
    pub internet: Decimal,
    pub tools: Decimal,
    pub workspace_rent: Decimal,
    pub other: Decimal,
}

impl BusinessExpenses {
    /// Sum of all four fields; `None` if it does not fit in a [`Decimal`].
    pub fn checked_total(&self) -> Option<Decimal> {
        self.internet
            .checked_add(self.tools)?
            .checked_add(self.workspace_rent)?
            .checked_add(self.other)
    }

    pub fn is_empty(&self) -> bool {
        self.fields().iter().all(|(_, value)| value.is_zero())
    }

    /// Field name and value pairs, for validation messages.
    pub fn fields(&self) -> [(&'static str, Decimal); 4] {
        [
            ("internet", self.internet),
            ("tools", self.tools),
            ("workspace_rent", self.workspace_rent),
            ("other_expenses", self.other),
        ]
    }
}

/// Everything a filer enters before asking for a computation.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct TaxProfile {
    pub tax_year: TaxRegime,
    pub category: FilerCategory,
    /// Gross income (or crypto gains) for one `period`.
    pub income: Decimal,
    pub period: IncomePeriod,
    pub expenses: BusinessExpenses,
    pub crypto_method: Option<CryptoMethod>,
    /// Annual housing rent, used for reform rent relief.
    pub rent_annual: Option<Decimal>,
}

impl TaxProfile {
    pub fn new(
        tax_year: TaxRegime,
        category: FilerCategory,
        income: Decimal,
    ) -> Self {
        Self {
            tax_year,
            category,
            income,
            ..Default::default()
        }
    }

    /// Same profile evaluated under another regime.
    pub fn for_regime(
        &self,
        regime: TaxRegime,
    ) -> Self {
        Self {
            tax_year: regime,
            ..self.clone()
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    #[test]
    fn checked_total_sums_or_reports_overflow() {
        let expenses = BusinessExpenses {
            internet: dec!(20000),
            tools: dec!(15000),
            workspace_rent: dec!(50000),
            other: dec!(5000),
        };
        let overflowing = BusinessExpenses {
            internet: Decimal::MAX,
            other: dec!(1),
            ..Default::default()
        };

        assert_eq!(expenses.checked_total(), Some(dec!(90000)));
        assert_eq!(overflowing.checked_total(), None);
        assert!(BusinessExpenses::default().is_empty());
        assert!(!expenses.is_empty());
    }

    #[test]
    fn period_names_parse_back() {
        for period in [IncomePeriod::Monthly, IncomePeriod::Yearly] {
            assert_eq!(IncomePeriod::parse(period.as_str()), Some(period));
        }
        assert_eq!(IncomePeriod::parse("Annual"), Some(IncomePeriod::Yearly));
        assert_eq!(IncomePeriod::parse("weekly"), None);
    }
}
