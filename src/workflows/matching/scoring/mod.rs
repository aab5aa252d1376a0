mod config;
mod geo;
mod rules;

pub use config::{MatchWeights, MAX_RATING};
pub use geo::haversine_km;

use super::domain::{TaskListing, WorkerId, WorkerProfile};
use serde::{Deserialize, Serialize};

/// Stateless scorer applying the weight configuration to one candidate.
pub struct MatchEngine {
    weights: MatchWeights,
}

impl MatchEngine {
    pub fn new(weights: MatchWeights) -> Self {
        Self { weights }
    }

    pub fn weights(&self) -> &MatchWeights {
        &self.weights
    }

    /// Score one worker against one task. Deterministic in its inputs.
    pub fn score(&self, task: &TaskListing, worker: &WorkerProfile) -> MatchOutcome {
        let distance_km = geo::haversine_km(task.location, worker.location);
        let (components, score) = rules::score_candidate(task, worker, distance_km, &self.weights);

        MatchOutcome {
            worker_id: worker.worker_id.clone(),
            display_name: worker.display_name.clone(),
            distance_km,
            score,
            components,
        }
    }
}

/// Factors contributing to a match score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchFactor {
    Proximity,
    Reputation,
    CategoryFit,
    Experience,
    ProofOfWork,
}

/// Discrete contribution to a match score, allowing transparent shortlists.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreComponent {
    pub factor: MatchFactor,
    pub points: f64,
    pub notes: String,
}

/// Scoring output for one candidate. Ephemeral, rebuilt on every shortlist.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchOutcome {
    pub worker_id: WorkerId,
    pub display_name: String,
    pub distance_km: f64,
    pub score: u32,
    pub components: Vec<ScoreComponent>,
}
