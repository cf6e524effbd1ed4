mod filer_category;
mod relief_rule;
mod tax_band;
mod tax_computation;
mod tax_profile;
mod tax_regime;

pub use filer_category::{CryptoMethod, FilerCategory};
pub use relief_rule::ReliefRule;
pub use tax_band::TaxBand;
pub use tax_computation::{BreakdownLine, TaxComputationResult, TaxOptions};
pub use tax_profile::{BusinessExpenses, IncomePeriod, TaxProfile};
pub use tax_regime::TaxRegime;
