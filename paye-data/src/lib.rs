//! Scenario files: many filer profiles in one CSV, evaluated as a batch.

mod batch;
mod loader;

pub use batch::{ScenarioBatch, ScenarioError, ScenarioOutcome};
pub use loader::{Scenario, ScenarioLoadError, ScenarioLoader, ScenarioRow};
