use std::sync::{Arc, Mutex};

use axum::http::StatusCode;
use axum::response::Response;
use chrono::Utc;
use serde_json::Value;

use crate::workflows::matching::domain::{
    GeoPoint, MarketplaceRole, TaskDraft, TaskId, TaskListing, TaskStatus, WorkerAvailability,
    WorkerId, WorkerProfile, WorkerRegistration,
};
use crate::workflows::matching::repository::{
    HireNotice, HirePublisher, InMemoryBoard, InMemoryDirectory, NotifyError,
};
use crate::workflows::matching::scoring::{MatchEngine, MatchWeights};
use crate::workflows::matching::service::InstantMatchService;

/// Downtown Des Moines, shared task site for fixtures.
pub(super) const TASK_SITE: GeoPoint = GeoPoint {
    lat: 41.5868,
    lng: -93.6250,
};

pub(super) fn engine() -> MatchEngine {
    MatchEngine::new(MatchWeights::default())
}

pub(super) fn task(category: &str) -> TaskListing {
    TaskListing {
        task_id: TaskId("task-fixture".to_string()),
        title: "Apartment move".to_string(),
        category: category.to_string(),
        location: TASK_SITE,
        pay_amount: 120,
        posted_by: WorkerId("wkr-poster".to_string()),
        status: TaskStatus::Open,
        posted_at: Utc::now(),
        assigned_to: None,
    }
}

pub(super) fn profile(suffix: &str, location: GeoPoint) -> WorkerProfile {
    WorkerProfile {
        worker_id: WorkerId(format!("wkr-{suffix}")),
        display_name: format!("Worker {suffix}"),
        location,
        role: MarketplaceRole::Worker,
        availability: WorkerAvailability::Online,
        rating: 4.0,
        completed_tasks: 12,
        skills: vec!["moving".to_string(), "cleaning".to_string()],
        proof_links: vec!["https://portfolio.example/1".to_string()],
        registered_at: Utc::now(),
    }
}

pub(super) fn registration(name: &str, location: GeoPoint) -> WorkerRegistration {
    WorkerRegistration {
        display_name: name.to_string(),
        location,
        role: MarketplaceRole::Worker,
        availability: WorkerAvailability::Online,
        rating: 4.0,
        completed_tasks: 12,
        skills: vec!["moving".to_string(), "cleaning".to_string()],
        proof_links: vec!["https://portfolio.example/1".to_string()],
    }
}

pub(super) fn draft(category: &str, posted_by: WorkerId) -> TaskDraft {
    TaskDraft {
        title: "Apartment move".to_string(),
        category: category.to_string(),
        location: TASK_SITE,
        pay_amount: 120,
        posted_by,
    }
}

pub(super) type TestService =
    InstantMatchService<InMemoryDirectory, InMemoryBoard, RecordingPublisher>;

pub(super) fn build_service() -> (
    TestService,
    Arc<InMemoryDirectory>,
    Arc<RecordingPublisher>,
) {
    let directory = Arc::new(InMemoryDirectory::default());
    let board = Arc::new(InMemoryBoard::default());
    let publisher = Arc::new(RecordingPublisher::default());
    let service = InstantMatchService::new(
        directory.clone(),
        board,
        publisher.clone(),
        MatchWeights::default(),
    );
    (service, directory, publisher)
}

#[derive(Default)]
pub(super) struct RecordingPublisher {
    events: Mutex<Vec<HireNotice>>,
}

impl RecordingPublisher {
    pub(super) fn events(&self) -> Vec<HireNotice> {
        self.events.lock().expect("publisher mutex poisoned").clone()
    }
}

impl HirePublisher for RecordingPublisher {
    fn publish(&self, notice: HireNotice) -> Result<(), NotifyError> {
        self.events
            .lock()
            .expect("publisher mutex poisoned")
            .push(notice);
        Ok(())
    }
}

pub(super) struct FailingPublisher;

impl HirePublisher for FailingPublisher {
    fn publish(&self, _notice: HireNotice) -> Result<(), NotifyError> {
        Err(NotifyError::Transport("push gateway offline".to_string()))
    }
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}

pub(super) fn assert_status(response: &Response, expected: StatusCode) {
    assert_eq!(response.status(), expected);
}
