use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::calculations::TaxEngineError;

/// The two modeled tax regimes, ordered oldest first.
///
/// `Legacy` covers the 2024/2025 rules (tax year 2025) and `Reform` the
/// 2025/2026 rules introduced by the 2026 reform (tax year 2026).
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum TaxRegime {
    #[serde(alias = "2025", alias = "2024/2025")]
    Legacy,
    #[default]
    #[serde(alias = "2026", alias = "2025/2026")]
    Reform,
}

impl TaxRegime {
    pub fn all() -> &'static [TaxRegime] {
        &[TaxRegime::Legacy, TaxRegime::Reform]
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Legacy => "legacy",
            Self::Reform => "reform",
        }
    }

    /// The tax year the regime is selected by.
    pub fn tax_year(&self) -> i32 {
        match self {
            Self::Legacy => 2025,
            Self::Reform => 2026,
        }
    }

    /// Human label in the "2024/2025" style.
    pub fn label(&self) -> &'static str {
        match self {
            Self::Legacy => "2024/2025",
            Self::Reform => "2025/2026",
        }
    }

    pub fn from_tax_year(year: i32) -> Result<Self, TaxEngineError> {
        match year {
            2025 => Ok(Self::Legacy),
            2026 => Ok(Self::Reform),
            other => Err(TaxEngineError::UnsupportedRegime(other.to_string())),
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "legacy" | "2025" | "2024/2025" | "2024/25" => Some(Self::Legacy),
            "reform" | "2026" | "2025/2026" | "2025/26" => Some(Self::Reform),
            _ => None,
        }
    }
}

impl FromStr for TaxRegime {
    type Err = TaxEngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| TaxEngineError::UnsupportedRegime(s.to_string()))
    }
}

impl fmt::Display for TaxRegime {
    fn fmt(
        &self,
        f: &mut fmt::Formatter<'_>,
    ) -> fmt::Result {
        write!(f, "{} ({})", self.label(), self.as_str())
    }
}
