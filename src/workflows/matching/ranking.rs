use tracing::debug;

use super::domain::{TaskListing, WorkerId, WorkerProfile};
use super::eligibility::screen_candidate;
use super::scoring::{MatchEngine, MatchOutcome};

/// Shortlist length used when no override is configured.
pub const DEFAULT_SHORTLIST_SIZE: usize = 5;

/// Filter, score, and rank a worker pool for one task.
///
/// The pool slice arrives in registration order; the descending sort is stable,
/// so equal scores keep that order. Output length is `min(limit, eligible)`.
pub(crate) fn rank_candidates(
    task: &TaskListing,
    pool: &[WorkerProfile],
    requester: &WorkerId,
    engine: &MatchEngine,
    limit: usize,
) -> Vec<MatchOutcome> {
    let mut candidates: Vec<MatchOutcome> = pool
        .iter()
        .filter(|worker| match screen_candidate(worker, requester) {
            Ok(()) => true,
            Err(reason) => {
                debug!(worker_id = %worker.worker_id.0, %reason, "candidate excluded");
                false
            }
        })
        .map(|worker| engine.score(task, worker))
        .collect();

    candidates.sort_by(|a, b| b.score.cmp(&a.score));
    candidates.truncate(limit);
    candidates
}
