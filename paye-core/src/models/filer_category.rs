use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calculations::TaxEngineError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FilerCategory {
    #[default]
    Salary,
    Freelancer,
    Both,
    Crypto,
}

impl FilerCategory {
    pub fn all() -> &'static [FilerCategory] {
        &[
            FilerCategory::Salary,
            FilerCategory::Freelancer,
            FilerCategory::Both,
            FilerCategory::Crypto,
        ]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Salary => "salary",
            Self::Freelancer => "freelancer",
            Self::Both => "both",
            Self::Crypto => "crypto",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Self::Salary => "Salary earner",
            Self::Freelancer => "Freelancer",
            Self::Both => "Salary and freelance",
            Self::Crypto => "Crypto trader",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "salary" => Some(Self::Salary),
            "freelancer" | "freelance" => Some(Self::Freelancer),
            "both" => Some(Self::Both),
            "crypto" => Some(Self::Crypto),
            _ => None,
        }
    }

    /// Whether business expenses may be deducted from gross income.
    pub fn deducts_business_expenses(&self) -> bool {
        matches!(self, Self::Freelancer | Self::Both)
    }

    pub fn is_crypto(&self) -> bool {
        matches!(self, Self::Crypto)
    }
}

impl FromStr for FilerCategory {
    type Err = TaxEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TaxEngineError::UnsupportedCategory(s.to_string()))
    }
}

/// How crypto gains are taxed.
///
/// Only consulted for crypto filers. Under the legacy regime
/// `CapitalGains` is a flat 10% charge; under the reform both methods
/// share the personal income bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CryptoMethod {
    #[default]
    CapitalGains,
    PersonalIncome,
}

impl CryptoMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::CapitalGains => "capital_gains",
            Self::PersonalIncome => "personal_income",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "capital_gains" | "cgt" => Some(Self::CapitalGains),
            "personal_income" | "pit" => Some(Self::PersonalIncome),
            _ => None,
        }
    }
}

impl FromStr for CryptoMethod {
    type Err = TaxEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TaxEngineError::UnsupportedMethod(s.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn only_freelance_categories_deduct_expenses() {
        assert!(!FilerCategory::Salary.deducts_business_expenses());
        assert!(FilerCategory::Freelancer.deducts_business_expenses());
        assert!(FilerCategory::Both.deducts_business_expenses());
        assert!(!FilerCategory::Crypto.deducts_business_expenses());
    }

    #[test]
    fn category_round_trips_through_as_str() {
        for category in FilerCategory::all() {
            assert_eq!(FilerCategory::parse(category.as_str()), Some(*category));
        }
    }

    #[test]
    fn unknown_category_is_unsupported() {
        assert_eq!(
            "pensioner".parse::<FilerCategory>(),
            Err(TaxEngineError::UnsupportedCategory("pensioner".to_string()))
        );
    }

    #[test]
    fn crypto_method_accepts_dashes_and_short_names() {
        assert_eq!(
            CryptoMethod::parse("capital-gains"),
            Some(CryptoMethod::CapitalGains)
        );
        assert_eq!(CryptoMethod::parse("PIT"), Some(CryptoMethod::PersonalIncome));
    }

    #[test]
    fn unknown_crypto_method_is_unsupported() {
        assert_eq!(
            "staking".parse::<CryptoMethod>(),
            Err(TaxEngineError::UnsupportedMethod("staking".to_string()))
        );
    }
}
