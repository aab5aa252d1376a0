//! Integration specifications for the instant-match workflow.
//!
//! Scenarios drive the public service facade and HTTP router end-to-end so
//! eligibility, scoring, ranking, and the hire action are validated without
//! reaching into private modules.

mod common {
    use std::sync::{Arc, Mutex};

    use instant_match::workflows::matching::{
        GeoPoint, HireNotice, HirePublisher, InMemoryBoard, InMemoryDirectory, InstantMatchService,
        MarketplaceRole, MatchWeights, NotifyError, TaskDraft, WorkerAvailability, WorkerId,
        WorkerRegistration,
    };

    /// Downtown Des Moines, shared task site for fixtures.
    pub(super) const TASK_SITE: GeoPoint = GeoPoint {
        lat: 41.5868,
        lng: -93.6250,
    };

    pub(super) fn registration(name: &str, location: GeoPoint) -> WorkerRegistration {
        WorkerRegistration {
            display_name: name.to_string(),
            location,
            role: MarketplaceRole::Worker,
            availability: WorkerAvailability::Online,
            rating: 4.0,
            completed_tasks: 12,
            skills: vec!["moving".to_string()],
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

    #[derive(Default)]
    pub(super) struct RecordingPublisher {
        events: Mutex<Vec<HireNotice>>,
    }

    impl RecordingPublisher {
        pub(super) fn events(&self) -> Vec<HireNotice> {
            self.events.lock().expect("lock").clone()
        }
    }

    impl HirePublisher for RecordingPublisher {
        fn publish(&self, notice: HireNotice) -> Result<(), NotifyError> {
            self.events.lock().expect("lock").push(notice);
            Ok(())
        }
    }

    pub(super) type Service =
        InstantMatchService<InMemoryDirectory, InMemoryBoard, RecordingPublisher>;

    pub(super) fn build_service() -> (Arc<Service>, Arc<RecordingPublisher>) {
        let directory = Arc::new(InMemoryDirectory::default());
        let board = Arc::new(InMemoryBoard::default());
        let publisher = Arc::new(RecordingPublisher::default());
        let service = Arc::new(InstantMatchService::new(
            directory,
            board,
            publisher.clone(),
            MatchWeights::default(),
        ));
        (service, publisher)
    }
}

mod shortlisting {
    use super::common::*;
    use instant_match::workflows::matching::{GeoPoint, WorkerAvailability};

    #[test]
    fn pool_is_filtered_scored_and_ordered() {
        let (service, _) = build_service();

        let poster = service
            .register_worker(registration("Poster", TASK_SITE))
            .expect("registers");

        let mut colocated = registration("Colocated ace", TASK_SITE);
        colocated.rating = 5.0;
        colocated.completed_tasks = 30;
        colocated.proof_links = (0..5).map(|i| format!("https://p/{i}")).collect();
        let ace = service.register_worker(colocated).expect("registers");

        let suburb = GeoPoint {
            lat: 41.70,
            lng: -93.6250,
        };
        let commuter = service
            .register_worker(registration("Commuter", suburb))
            .expect("registers");

        let mut offline = registration("Offline", TASK_SITE);
        offline.availability = WorkerAvailability::Offline;
        service.register_worker(offline).expect("registers");

        let task = service
            .post_task(draft("moving", poster.worker_id.clone()))
            .expect("posts");
        let shortlist = service
            .shortlist(&task.task_id, &poster.worker_id)
            .expect("shortlists");

        assert_eq!(shortlist.candidates.len(), 2);
        assert_eq!(shortlist.candidates[0].worker_id, ace.worker_id);
        assert_eq!(shortlist.candidates[0].score, 120);
        assert_eq!(shortlist.candidates[1].worker_id, commuter.worker_id);
        assert!(shortlist.candidates[1].score < 120);
        assert_eq!(shortlist.score_ceiling, 120);
    }

    #[test]
    fn shortlist_is_capped_at_five_candidates() {
        let (service, _) = build_service();
        let poster = service
            .register_worker(registration("Poster", TASK_SITE))
            .expect("registers");

        for index in 0..7 {
            service
                .register_worker(registration(&format!("Worker {index}"), TASK_SITE))
                .expect("registers");
        }

        let task = service
            .post_task(draft("moving", poster.worker_id.clone()))
            .expect("posts");
        let shortlist = service
            .shortlist(&task.task_id, &poster.worker_id)
            .expect("shortlists");

        assert_eq!(shortlist.candidates.len(), 5);
    }

    #[test]
    fn availability_changes_rerank_the_pool() {
        let (service, _) = build_service();
        let poster = service
            .register_worker(registration("Poster", TASK_SITE))
            .expect("registers");
        let worker = service
            .register_worker(registration("Candidate", TASK_SITE))
            .expect("registers");

        let task = service
            .post_task(draft("moving", poster.worker_id.clone()))
            .expect("posts");

        let before = service
            .shortlist(&task.task_id, &poster.worker_id)
            .expect("shortlists");
        assert_eq!(before.candidates.len(), 1);

        service
            .set_availability(&worker.worker_id, WorkerAvailability::Busy)
            .expect("updates");

        let after = service
            .shortlist(&task.task_id, &poster.worker_id)
            .expect("shortlists");
        assert!(after.candidates.is_empty());
    }
}

mod hiring {
    use super::common::*;
    use instant_match::workflows::matching::TaskStatus;

    #[test]
    fn hire_completes_the_match_and_notifies() {
        let (service, publisher) = build_service();
        let poster = service
            .register_worker(registration("Poster", TASK_SITE))
            .expect("registers");
        let worker = service
            .register_worker(registration("Candidate", TASK_SITE))
            .expect("registers");
        let task = service
            .post_task(draft("moving", poster.worker_id.clone()))
            .expect("posts");

        let hired = service
            .hire(&task.task_id, &poster.worker_id, &worker.worker_id)
            .expect("hires");

        assert_eq!(hired.status, TaskStatus::Assigned);
        assert_eq!(hired.assigned_to, Some(worker.worker_id.clone()));

        let events = publisher.events();
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].template, "worker_hired");
        assert_eq!(events[0].task_id, task.task_id);
    }
}

mod routing {
    use super::common::*;
    use axum::body::{to_bytes, Body};
    use axum::http::{Request, StatusCode};
    use instant_match::workflows::matching::match_router;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn read_json(response: axum::response::Response) -> Value {
        let body = to_bytes(response.into_body(), 1024 * 1024)
            .await
            .expect("body");
        serde_json::from_slice(&body).expect("json")
    }

    #[tokio::test]
    async fn full_flow_over_http() {
        let (service, _) = build_service();
        let poster = service
            .register_worker(registration("Poster", TASK_SITE))
            .expect("registers");
        let worker = service
            .register_worker(registration("Candidate", TASK_SITE))
            .expect("registers");
        let router = match_router(service);

        let post_task = Request::builder()
            .method("POST")
            .uri("/api/v1/tasks")
            .header("content-type", "application/json")
            .body(Body::from(
                json!({
                    "title": "Apartment move",
                    "category": "moving",
                    "location": { "lat": TASK_SITE.lat, "lng": TASK_SITE.lng },
                    "pay_amount": 120,
                    "posted_by": poster.worker_id.0
                })
                .to_string(),
            ))
            .expect("request");

        let response = router
            .clone()
            .oneshot(post_task)
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::CREATED);
        let listing = read_json(response).await;
        let task_id = listing
            .get("task_id")
            .and_then(Value::as_str)
            .expect("task id")
            .to_string();

        let matches = Request::builder()
            .method("POST")
            .uri(format!("/api/v1/tasks/{task_id}/matches"))
            .header("content-type", "application/json")
            .body(Body::from(
                json!({ "requester_id": poster.worker_id.0 }).to_string(),
            ))
            .expect("request");

        let response = router
            .clone()
            .oneshot(matches)
            .await
            .expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let shortlist = read_json(response).await;
        let candidates = shortlist
            .get("candidates")
            .and_then(Value::as_array)
            .expect("candidates");
        assert_eq!(candidates.len(), 1);
        assert_eq!(
            candidates[0].get("worker_id"),
            Some(&json!(worker.worker_id.0))
        );

        let hire = Request::builder()
            .method("POST")
            .uri(format!("/api/v1/tasks/{task_id}/hire"))
            .header("content-type", "application/json")
            .body(Body::from(
                json!({
                    "requester_id": poster.worker_id.0,
                    "worker_id": worker.worker_id.0
                })
                .to_string(),
            ))
            .expect("request");

        let response = router.oneshot(hire).await.expect("router dispatch");
        assert_eq!(response.status(), StatusCode::OK);
        let hired = read_json(response).await;
        assert_eq!(hired.get("status"), Some(&json!("assigned")));
    }
}
