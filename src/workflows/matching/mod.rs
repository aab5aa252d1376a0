//! Instant match workflow: pool eligibility, candidate scoring, and shortlist
//! ranking for posted tasks, plus the service facade and HTTP surface.

pub mod domain;
pub(crate) mod eligibility;
pub mod ranking;
pub mod repository;
pub mod router;
pub(crate) mod scoring;
pub mod service;

#[cfg(test)]
mod tests;

pub use domain::{
    GeoPoint, MarketplaceRole, TaskDraft, TaskId, TaskListing, TaskStatus, WorkerAvailability,
    WorkerId, WorkerProfile, WorkerRegistration,
};
pub use eligibility::IneligibilityReason;
pub use ranking::DEFAULT_SHORTLIST_SIZE;
pub use repository::{
    HireNotice, HirePublisher, InMemoryBoard, InMemoryDirectory, LoggingHirePublisher, NotifyError,
    RegistryError, TaskBoard, WorkerDirectory,
};
pub use router::match_router;
pub use scoring::{
    haversine_km, MatchEngine, MatchFactor, MatchOutcome, MatchWeights, ScoreComponent, MAX_RATING,
};
pub use service::{InstantMatchService, MatchServiceError, MatchShortlist};
