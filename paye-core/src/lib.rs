//! Personal income tax engine for Nigerian filers.
//!
//! Computes tax under the legacy (2024/2025) and reform (2025/2026)
//! regimes, prepares filer profiles for the engine, and reports take-home
//! pay. See [`calculations::engine`] for the computation itself.

pub mod calculations;
pub mod input;
pub mod models;

pub use calculations::{
    RegimeComparison, TakeHomeSummary, TaxEngine, TaxEngineError, TaxSchedule, compare_regimes,
    compute_tax, prepare, summarize,
};
pub use models::*;
