use std::collections::BTreeMap;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::domain::{
    TaskDraft, TaskId, TaskListing, TaskStatus, WorkerAvailability, WorkerId, WorkerProfile,
    WorkerRegistration,
};
use super::eligibility::{screen_candidate, IneligibilityReason};
use super::ranking::{rank_candidates, DEFAULT_SHORTLIST_SIZE};
use super::repository::{
    HireNotice, HirePublisher, NotifyError, RegistryError, TaskBoard, WorkerDirectory,
};
use super::scoring::{MatchEngine, MatchOutcome, MatchWeights};

/// Service composing the worker directory, task board, scorer, and hire hook.
pub struct InstantMatchService<D, B, N> {
    directory: Arc<D>,
    board: Arc<B>,
    notifier: Arc<N>,
    engine: Arc<MatchEngine>,
    shortlist_size: usize,
}

static WORKER_SEQUENCE: AtomicU64 = AtomicU64::new(1);
static TASK_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_worker_id() -> WorkerId {
    let id = WORKER_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    WorkerId(format!("wkr-{id:06}"))
}

fn next_task_id() -> TaskId {
    let id = TASK_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    TaskId(format!("task-{id:06}"))
}

impl<D, B, N> InstantMatchService<D, B, N>
where
    D: WorkerDirectory + 'static,
    B: TaskBoard + 'static,
    N: HirePublisher + 'static,
{
    pub fn new(directory: Arc<D>, board: Arc<B>, notifier: Arc<N>, weights: MatchWeights) -> Self {
        Self {
            directory,
            board,
            notifier,
            engine: Arc::new(MatchEngine::new(weights)),
            shortlist_size: DEFAULT_SHORTLIST_SIZE,
        }
    }

    pub fn with_shortlist_size(mut self, size: usize) -> Self {
        self.shortlist_size = size.max(1);
        self
    }

    /// Register a worker, returning the directory-backed profile.
    ///
    /// Ratings are clamped to the marketplace's 0-5 band at this edge; the
    /// scorer itself never validates.
    pub fn register_worker(
        &self,
        registration: WorkerRegistration,
    ) -> Result<WorkerProfile, MatchServiceError> {
        let WorkerRegistration {
            display_name,
            location,
            role,
            availability,
            rating,
            completed_tasks,
            skills,
            proof_links,
        } = registration;

        let profile = WorkerProfile {
            worker_id: next_worker_id(),
            display_name,
            location,
            role,
            availability,
            rating: rating.clamp(0.0, 5.0),
            completed_tasks,
            skills,
            proof_links,
            registered_at: Utc::now(),
        };

        let stored = self.directory.upsert(profile)?;
        Ok(stored)
    }

    /// Flip a worker's availability, returning the updated profile.
    pub fn set_availability(
        &self,
        worker_id: &WorkerId,
        availability: WorkerAvailability,
    ) -> Result<WorkerProfile, MatchServiceError> {
        let profile = self.directory.set_availability(worker_id, availability)?;
        Ok(profile)
    }

    pub fn get_worker(&self, worker_id: &WorkerId) -> Result<WorkerProfile, MatchServiceError> {
        let profile = self
            .directory
            .fetch(worker_id)?
            .ok_or(RegistryError::NotFound)?;
        Ok(profile)
    }

    /// Post a task to the board. The poster must already be registered.
    pub fn post_task(&self, draft: TaskDraft) -> Result<TaskListing, MatchServiceError> {
        self.directory
            .fetch(&draft.posted_by)?
            .ok_or(RegistryError::NotFound)?;

        let TaskDraft {
            title,
            category,
            location,
            pay_amount,
            posted_by,
        } = draft;

        let listing = TaskListing {
            task_id: next_task_id(),
            title,
            category,
            location,
            pay_amount,
            posted_by,
            status: TaskStatus::Open,
            posted_at: Utc::now(),
            assigned_to: None,
        };

        let stored = self.board.post(listing)?;
        Ok(stored)
    }

    pub fn get_task(&self, task_id: &TaskId) -> Result<TaskListing, MatchServiceError> {
        let listing = self.board.fetch(task_id)?.ok_or(RegistryError::NotFound)?;
        Ok(listing)
    }

    /// Rank the current pool for a task and return the top candidates.
    ///
    /// Pure over its inputs: the same directory contents and task always yield
    /// the same ordered shortlist.
    pub fn shortlist(
        &self,
        task_id: &TaskId,
        requester: &WorkerId,
    ) -> Result<MatchShortlist, MatchServiceError> {
        let task = self.board.fetch(task_id)?.ok_or(RegistryError::NotFound)?;
        let pool = self.directory.snapshot()?;
        let candidates = rank_candidates(&task, &pool, requester, &self.engine, self.shortlist_size);

        Ok(MatchShortlist {
            task_id: task.task_id,
            requester_id: requester.clone(),
            score_ceiling: self.engine.weights().nominal_ceiling().round() as u32,
            candidates,
        })
    }

    /// Assign an open task to an eligible worker and publish the hire notice.
    pub fn hire(
        &self,
        task_id: &TaskId,
        requester: &WorkerId,
        worker_id: &WorkerId,
    ) -> Result<TaskListing, MatchServiceError> {
        let mut task = self.board.fetch(task_id)?.ok_or(RegistryError::NotFound)?;

        if task.status != TaskStatus::Open {
            return Err(MatchServiceError::TaskNotOpen {
                status: task.status.label(),
            });
        }

        let worker = self
            .directory
            .fetch(worker_id)?
            .ok_or(RegistryError::NotFound)?;
        screen_candidate(&worker, requester)?;

        task.status = TaskStatus::Assigned;
        task.assigned_to = Some(worker.worker_id.clone());
        self.board.update(task.clone())?;

        let mut details = BTreeMap::new();
        details.insert("category".to_string(), task.category.clone());
        details.insert("pay_amount".to_string(), task.pay_amount.to_string());
        self.notifier.publish(HireNotice {
            template: "worker_hired".to_string(),
            task_id: task.task_id.clone(),
            worker_id: worker.worker_id,
            details,
        })?;

        Ok(task)
    }
}

/// Ordered shortlist returned to API and CLI consumers.
///
/// `score_ceiling` is the nominal maximum of the raw score (120 under default
/// weights); scores are intentionally not rescaled to a 0-100 band.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchShortlist {
    pub task_id: TaskId,
    pub requester_id: WorkerId,
    pub score_ceiling: u32,
    pub candidates: Vec<MatchOutcome>,
}

/// Error raised by the instant match service.
#[derive(Debug, thiserror::Error)]
pub enum MatchServiceError {
    #[error(transparent)]
    Registry(#[from] RegistryError),
    #[error(transparent)]
    Notify(#[from] NotifyError),
    #[error("worker not eligible for hire: {0}")]
    Ineligible(#[from] IneligibilityReason),
    #[error("task is not open for hiring (status {status})")]
    TaskNotOpen { status: &'static str },
}
