use super::super::domain::{TaskListing, WorkerProfile};
use super::config::MatchWeights;
use super::{MatchFactor, ScoreComponent};

pub(crate) fn score_candidate(
    task: &TaskListing,
    worker: &WorkerProfile,
    distance_km: f64,
    weights: &MatchWeights,
) -> (Vec<ScoreComponent>, u32) {
    let mut components = Vec::with_capacity(5);

    let proximity = (weights.proximity_cap - distance_km * weights.proximity_falloff_per_km)
        .max(0.0);
    components.push(ScoreComponent {
        factor: MatchFactor::Proximity,
        points: proximity,
        notes: format!("{distance_km:.1} km from task site"),
    });

    let reputation = f64::from(worker.rating) * weights.reputation_multiplier;
    components.push(ScoreComponent {
        factor: MatchFactor::Reputation,
        points: reputation,
        notes: format!("{:.1} star rating", worker.rating),
    });

    let category_fit = if worker.has_skill(&task.category) {
        weights.category_bonus
    } else {
        0.0
    };
    components.push(ScoreComponent {
        factor: MatchFactor::CategoryFit,
        points: category_fit,
        notes: if category_fit > 0.0 {
            format!("skill tags cover '{}'", task.category)
        } else {
            format!("no skill tag for '{}'", task.category)
        },
    });

    let experience = (f64::from(worker.completed_tasks) * weights.experience_per_task)
        .min(weights.experience_cap);
    components.push(ScoreComponent {
        factor: MatchFactor::Experience,
        points: experience,
        notes: format!("{} completed task(s)", worker.completed_tasks),
    });

    let proof = (worker.proof_links.len() as f64 * weights.proof_per_link).min(weights.proof_cap);
    components.push(ScoreComponent {
        factor: MatchFactor::ProofOfWork,
        points: proof,
        notes: format!("{} proof link(s)", worker.proof_links.len()),
    });

    // Terms stay unrounded; the sum rounds once.
    let total: f64 = components.iter().map(|component| component.points).sum();
    let score = total.round() as u32;

    (components, score)
}
