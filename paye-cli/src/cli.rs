use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use paye_core::input::parse_amount;
use paye_core::{BusinessExpenses, CryptoMethod, FilerCategory, IncomePeriod, TaxProfile, TaxRegime};
use rust_decimal::Decimal;

use crate::config::{OutputFormat, Overrides};

/// Nigerian personal income tax calculator.
///
/// Computes tax under the 2024/2025 (legacy) and 2025/2026 (reform) rules,
/// with a band-by-band breakdown and take-home pay.
#[derive(Debug, Parser)]
#[command(name = "paye", version, about)]
pub struct Cli {
    /// TOML file with default tax_year, format and log_level.
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format.
    #[arg(long, value_enum, global = true)]
    pub format: Option<OutputFormat>,

    /// Log level or filter directive (RUST_LOG takes precedence).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Also append log records to this file.
    #[arg(long, global = true)]
    pub log_file: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Compute tax and take-home pay under one regime.
    Compute(ProfileArgs),

    /// Compute the same profile under both regimes.
    Compare(ProfileArgs),

    /// Evaluate every scenario in a CSV file.
    Batch(BatchArgs),
}

#[derive(Debug, Clone, Args)]
pub struct ProfileArgs {
    /// Tax year or regime: 2025/legacy or 2026/reform.
    #[arg(long, short = 'y')]
    pub tax_year: Option<TaxRegime>,

    /// salary, freelancer, both or crypto.
    #[arg(long, short, default_value = "salary")]
    pub category: FilerCategory,

    /// Gross income (or crypto gains) for the period, e.g. "450,000".
    #[arg(long, short, value_parser = parse_amount)]
    pub income: Decimal,

    /// Income and expenses are monthly figures.
    #[arg(long, short)]
    pub monthly: bool,

    #[arg(long, value_parser = parse_amount)]
    pub internet: Option<Decimal>,

    #[arg(long, value_parser = parse_amount)]
    pub tools: Option<Decimal>,

    #[arg(long, value_parser = parse_amount)]
    pub workspace_rent: Option<Decimal>,

    #[arg(long, value_parser = parse_amount)]
    pub other_expenses: Option<Decimal>,

    /// capital_gains or personal_income (crypto filers only).
    #[arg(long)]
    pub crypto_method: Option<CryptoMethod>,

    /// Annual housing rent, for reform rent relief.
    #[arg(long, value_parser = parse_amount)]
    pub rent: Option<Decimal>,
}

impl ProfileArgs {
    pub fn to_profile(
        &self,
        tax_year: TaxRegime,
    ) -> TaxProfile {
        TaxProfile {
            tax_year,
            category: self.category,
            income: self.income,
            period: if self.monthly {
                IncomePeriod::Monthly
            } else {
                IncomePeriod::Yearly
            },
            expenses: BusinessExpenses {
                internet: self.internet.unwrap_or_default(),
                tools: self.tools.unwrap_or_default(),
                workspace_rent: self.workspace_rent.unwrap_or_default(),
                other: self.other_expenses.unwrap_or_default(),
            },
            crypto_method: self.crypto_method,
            rent_annual: self.rent,
        }
    }
}

#[derive(Debug, Clone, Args)]
pub struct BatchArgs {
    /// Scenario CSV file.
    #[arg(long, short)]
    pub file: PathBuf,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        let tax_year = match &self.command {
            Command::Compute(args) | Command::Compare(args) => args.tax_year,
            Command::Batch(_) => None,
        };
        Overrides {
            tax_year,
            format: self.format,
            log_level: self.log_level.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use rust_decimal_macros::dec;

    use super::*;

    fn parse(args: &[&str]) -> Cli {
        Cli::try_parse_from(std::iter::once("paye").chain(args.iter().copied())).unwrap()
    }

    #[test]
    fn compute_parses_formatted_amounts() {
        let cli = parse(&[
            "compute",
            "--income",
            "₦450,000",
            "--monthly",
            "--category",
            "freelancer",
            "--internet",
            "20,000",
        ]);

        let Command::Compute(args) = &cli.command else {
            panic!("expected compute, got {:?}", cli.command);
        };
        let profile = args.to_profile(TaxRegime::Reform);
        assert_eq!(profile.income, dec!(450000));
        assert_eq!(profile.period, IncomePeriod::Monthly);
        assert_eq!(profile.category, FilerCategory::Freelancer);
        assert_eq!(profile.expenses.internet, dec!(20000));
        assert_eq!(profile.expenses.tools, dec!(0));
    }

    #[test]
    fn tax_year_flag_accepts_year_or_name() {
        let by_year = parse(&["compute", "--income", "1", "--tax-year", "2025"]);
        let by_name = parse(&["compare", "--income", "1", "-y", "reform"]);

        assert_eq!(by_year.overrides().tax_year, Some(TaxRegime::Legacy));
        assert_eq!(by_name.overrides().tax_year, Some(TaxRegime::Reform));
    }

    #[test]
    fn global_flags_after_subcommand() {
        let cli = parse(&["batch", "--file", "s.csv", "--format", "json", "--log-level", "debug"]);

        let overrides = cli.overrides();
        assert_eq!(overrides.format, Some(OutputFormat::Json));
        assert_eq!(overrides.log_level.as_deref(), Some("debug"));
        assert_eq!(overrides.tax_year, None);
    }

    #[test]
    fn crypto_method_flag_parses() {
        let cli = parse(&[
            "compute",
            "--income",
            "5000000",
            "--category",
            "crypto",
            "--crypto-method",
            "personal_income",
        ]);

        let Command::Compute(args) = cli.command else {
            panic!("expected compute");
        };
        assert_eq!(args.crypto_method, Some(CryptoMethod::PersonalIncome));
    }

    #[test]
    fn invalid_inputs_are_rejected() {
        let cases: [&[&str]; 4] = [
            &["compute"],
            &["compute", "--income", "1.2.3"],
            &["compute", "--income", "1", "--category", "pilot"],
            &["compute", "--income", "1", "--tax-year", "2030"],
        ];

        for args in cases {
            let result = Cli::try_parse_from(std::iter::once("paye").chain(args.iter().copied()));
            assert!(result.is_err(), "expected {args:?} to be rejected");
        }
    }
}
