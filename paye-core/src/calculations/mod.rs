//! Tax calculation for the legacy and reform regimes.
//!
//! - [`schedules`] holds the band tables and relief rules.
//! - [`engine`] applies a schedule to annual income.
//! - [`income`] turns a filer profile into engine input.
//! - [`take_home`] reports net pay and compares regimes.

pub mod common;
pub mod engine;
pub mod income;
pub mod schedules;
pub mod take_home;

pub use engine::{TaxEngine, TaxEngineError, compute_tax};
pub use income::{PreparedIncome, annualize, prepare};
pub use schedules::{LEGACY_SCHEDULE, REFORM_SCHEDULE, TaxSchedule};
pub use take_home::{RegimeComparison, TakeHomeSummary, compare_regimes, summarize};
