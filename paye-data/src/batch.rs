use paye_core::{TakeHomeSummary, TaxEngineError, summarize};
use thiserror::Error;
use tracing::{debug, warn};

use crate::{ScenarioLoadError, ScenarioRow};

/// Why one scenario produced no summary.
#[derive(Debug, Error)]
pub enum ScenarioError {
    /// The row could not be turned into a profile.
    #[error(transparent)]
    Load(#[from] ScenarioLoadError),

    /// The profile was read but the engine rejected it.
    #[error(transparent)]
    Engine(#[from] TaxEngineError),
}

/// Result of evaluating one scenario.
#[derive(Debug)]
pub struct ScenarioOutcome {
    pub label: String,
    pub result: Result<TakeHomeSummary, ScenarioError>,
}

impl ScenarioOutcome {
    pub fn is_ok(&self) -> bool {
        self.result.is_ok()
    }
}

/// Evaluates scenarios independently of each other.
pub struct ScenarioBatch;

impl ScenarioBatch {
    /// Summarizes every loaded row in input order. A row that failed to load
    /// or fails to compute keeps its error in the outcome and the rest still
    /// run.
    pub fn evaluate(rows: Vec<ScenarioRow>) -> Vec<ScenarioOutcome> {
        let outcomes: Vec<ScenarioOutcome> = rows
            .into_iter()
            .map(|row| {
                let result = row
                    .scenario
                    .map_err(ScenarioError::from)
                    .and_then(|scenario| summarize(&scenario.profile).map_err(ScenarioError::from));
                if let Err(ScenarioError::Engine(e)) = &result {
                    warn!(row = row.row, label = %row.label, error = %e, "scenario failed");
                }
                ScenarioOutcome {
                    label: row.label,
                    result,
                }
            })
            .collect();

        debug!(
            total = outcomes.len(),
            failed = outcomes.iter().filter(|o| !o.is_ok()).count(),
            "evaluated scenario batch"
        );
        outcomes
    }
}
