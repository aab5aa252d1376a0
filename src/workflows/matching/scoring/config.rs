use serde::{Deserialize, Serialize};

/// Highest rating the marketplace hands out, anchoring the reputation term.
pub const MAX_RATING: f64 = 5.0;

/// Weight configuration for the match score terms.
///
/// The defaults are the production heuristic: proximity dominates, reputation
/// and category fit follow, experience and proof of work round it out.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchWeights {
    pub proximity_cap: f64,
    pub proximity_falloff_per_km: f64,
    pub reputation_multiplier: f64,
    pub category_bonus: f64,
    pub experience_per_task: f64,
    pub experience_cap: f64,
    pub proof_per_link: f64,
    pub proof_cap: f64,
}

impl MatchWeights {
    /// Nominal ceiling of the raw score under these weights.
    ///
    /// With the defaults this is 120, not 100. The raw score is never rescaled
    /// to a percentage; clients that want one divide by this value.
    pub fn nominal_ceiling(&self) -> f64 {
        self.proximity_cap
            + self.reputation_multiplier * MAX_RATING
            + self.category_bonus
            + self.experience_cap
            + self.proof_cap
    }
}

impl Default for MatchWeights {
    fn default() -> Self {
        Self {
            proximity_cap: 50.0,
            proximity_falloff_per_km: 2.0,
            reputation_multiplier: 5.0,
            category_bonus: 20.0,
            experience_per_task: 0.5,
            experience_cap: 15.0,
            proof_per_link: 2.0,
            proof_cap: 10.0,
        }
    }
}
