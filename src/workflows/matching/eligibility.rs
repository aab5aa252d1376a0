use super::domain::{WorkerId, WorkerProfile};

/// Reasons a worker is kept out of a task's candidate pool.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IneligibilityReason {
    #[error("worker is the requesting user")]
    SelfMatch,
    #[error("account role '{0}' cannot take tasks")]
    NotWorkerCapable(&'static str),
    #[error("worker is {0} and not taking tasks")]
    Unavailable(&'static str),
}

/// Pool admission check: not the requester, worker-capable, currently online.
pub fn screen_candidate(
    worker: &WorkerProfile,
    requester: &WorkerId,
) -> Result<(), IneligibilityReason> {
    if worker.worker_id == *requester {
        return Err(IneligibilityReason::SelfMatch);
    }

    if !worker.role.is_worker_capable() {
        return Err(IneligibilityReason::NotWorkerCapable(worker.role.label()));
    }

    if !worker.availability.accepts_work() {
        return Err(IneligibilityReason::Unavailable(worker.availability.label()));
    }

    Ok(())
}
