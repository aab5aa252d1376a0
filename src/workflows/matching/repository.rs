use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use serde::{Deserialize, Serialize};
use tracing::info;

use super::domain::{TaskId, TaskListing, WorkerAvailability, WorkerId, WorkerProfile};

/// Storage abstraction over the registered worker pool.
///
/// `snapshot` must return workers in registration order; the ranking pipeline
/// relies on that order to break score ties.
pub trait WorkerDirectory: Send + Sync {
    fn upsert(&self, profile: WorkerProfile) -> Result<WorkerProfile, RegistryError>;
    fn fetch(&self, id: &WorkerId) -> Result<Option<WorkerProfile>, RegistryError>;
    fn set_availability(
        &self,
        id: &WorkerId,
        availability: WorkerAvailability,
    ) -> Result<WorkerProfile, RegistryError>;
    fn snapshot(&self) -> Result<Vec<WorkerProfile>, RegistryError>;
}

/// Storage abstraction over posted tasks.
pub trait TaskBoard: Send + Sync {
    fn post(&self, listing: TaskListing) -> Result<TaskListing, RegistryError>;
    fn fetch(&self, id: &TaskId) -> Result<Option<TaskListing>, RegistryError>;
    fn update(&self, listing: TaskListing) -> Result<(), RegistryError>;
}

/// Error enumeration for directory and board failures.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("record already exists")]
    Conflict,
    #[error("record not found")]
    NotFound,
    #[error("registry unavailable: {0}")]
    Unavailable(String),
}

/// Trait describing outbound hire notification hooks (push, e-mail adapters).
pub trait HirePublisher: Send + Sync {
    fn publish(&self, notice: HireNotice) -> Result<(), NotifyError>;
}

/// Hire event payload so routes/tests can assert integration boundaries.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HireNotice {
    pub template: String,
    pub task_id: TaskId,
    pub worker_id: WorkerId,
    pub details: BTreeMap<String, String>,
}

/// Notification dispatch error.
#[derive(Debug, thiserror::Error)]
pub enum NotifyError {
    #[error("notification transport unavailable: {0}")]
    Transport(String),
}

/// Registration-order directory backed by process memory.
#[derive(Default)]
pub struct InMemoryDirectory {
    workers: Mutex<Vec<WorkerProfile>>,
}

impl WorkerDirectory for InMemoryDirectory {
    fn upsert(&self, profile: WorkerProfile) -> Result<WorkerProfile, RegistryError> {
        let mut guard = self.workers.lock().expect("directory mutex poisoned");
        match guard
            .iter_mut()
            .find(|existing| existing.worker_id == profile.worker_id)
        {
            // Replace in place so score ties keep their original pool order.
            Some(existing) => *existing = profile.clone(),
            None => guard.push(profile.clone()),
        }
        Ok(profile)
    }

    fn fetch(&self, id: &WorkerId) -> Result<Option<WorkerProfile>, RegistryError> {
        let guard = self.workers.lock().expect("directory mutex poisoned");
        Ok(guard.iter().find(|worker| worker.worker_id == *id).cloned())
    }

    fn set_availability(
        &self,
        id: &WorkerId,
        availability: WorkerAvailability,
    ) -> Result<WorkerProfile, RegistryError> {
        let mut guard = self.workers.lock().expect("directory mutex poisoned");
        let worker = guard
            .iter_mut()
            .find(|worker| worker.worker_id == *id)
            .ok_or(RegistryError::NotFound)?;
        worker.availability = availability;
        Ok(worker.clone())
    }

    fn snapshot(&self) -> Result<Vec<WorkerProfile>, RegistryError> {
        let guard = self.workers.lock().expect("directory mutex poisoned");
        Ok(guard.clone())
    }
}

/// Task board backed by process memory.
#[derive(Default)]
pub struct InMemoryBoard {
    tasks: Mutex<HashMap<TaskId, TaskListing>>,
}

impl TaskBoard for InMemoryBoard {
    fn post(&self, listing: TaskListing) -> Result<TaskListing, RegistryError> {
        let mut guard = self.tasks.lock().expect("board mutex poisoned");
        if guard.contains_key(&listing.task_id) {
            return Err(RegistryError::Conflict);
        }
        guard.insert(listing.task_id.clone(), listing.clone());
        Ok(listing)
    }

    fn fetch(&self, id: &TaskId) -> Result<Option<TaskListing>, RegistryError> {
        let guard = self.tasks.lock().expect("board mutex poisoned");
        Ok(guard.get(id).cloned())
    }

    fn update(&self, listing: TaskListing) -> Result<(), RegistryError> {
        let mut guard = self.tasks.lock().expect("board mutex poisoned");
        guard.insert(listing.task_id.clone(), listing);
        Ok(())
    }
}

/// Publisher that records hires to the log stream only.
#[derive(Default)]
pub struct LoggingHirePublisher;

impl HirePublisher for LoggingHirePublisher {
    fn publish(&self, notice: HireNotice) -> Result<(), NotifyError> {
        info!(
            template = %notice.template,
            task_id = %notice.task_id.0,
            worker_id = %notice.worker_id.0,
            "hire notice published"
        );
        Ok(())
    }
}
