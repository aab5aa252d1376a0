use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for registered workers.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct WorkerId(pub String);

/// Identifier wrapper for posted tasks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TaskId(pub String);

/// Geographic coordinate in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

/// Account roles on the marketplace. Only worker-capable roles enter match pools.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketplaceRole {
    Poster,
    Worker,
    Hybrid,
}

impl MarketplaceRole {
    pub const fn is_worker_capable(self) -> bool {
        matches!(self, Self::Worker | Self::Hybrid)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Poster => "poster",
            Self::Worker => "worker",
            Self::Hybrid => "hybrid",
        }
    }
}

/// Presence state driving pool membership. Only online workers take new tasks.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkerAvailability {
    Online,
    Busy,
    Offline,
}

impl WorkerAvailability {
    pub const fn accepts_work(self) -> bool {
        matches!(self, Self::Online)
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Online => "online",
            Self::Busy => "busy",
            Self::Offline => "offline",
        }
    }
}

/// Inbound registration payload before the directory assigns an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerRegistration {
    pub display_name: String,
    pub location: GeoPoint,
    pub role: MarketplaceRole,
    pub availability: WorkerAvailability,
    pub rating: f32,
    pub completed_tasks: u32,
    #[serde(default)]
    pub skills: Vec<String>,
    #[serde(default)]
    pub proof_links: Vec<String>,
}

/// Directory-backed worker record consumed read-only by the match scorer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkerProfile {
    pub worker_id: WorkerId,
    pub display_name: String,
    pub location: GeoPoint,
    pub role: MarketplaceRole,
    pub availability: WorkerAvailability,
    pub rating: f32,
    pub completed_tasks: u32,
    pub skills: Vec<String>,
    pub proof_links: Vec<String>,
    pub registered_at: DateTime<Utc>,
}

impl WorkerProfile {
    /// Category containment check used by the scorer's category-fit term.
    pub fn has_skill(&self, category: &str) -> bool {
        self.skills
            .iter()
            .any(|skill| skill.eq_ignore_ascii_case(category))
    }
}

/// Draft payload for posting a task to the board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskDraft {
    pub title: String,
    pub category: String,
    pub location: GeoPoint,
    pub pay_amount: u32,
    pub posted_by: WorkerId,
}

/// Board-backed task record used as scoring input and hire target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TaskListing {
    pub task_id: TaskId,
    pub title: String,
    pub category: String,
    pub location: GeoPoint,
    pub pay_amount: u32,
    pub posted_by: WorkerId,
    pub status: TaskStatus,
    pub posted_at: DateTime<Utc>,
    pub assigned_to: Option<WorkerId>,
}

/// High level status tracked across the task lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    Open,
    Assigned,
    Completed,
    Cancelled,
}

impl TaskStatus {
    pub const fn label(self) -> &'static str {
        match self {
            TaskStatus::Open => "open",
            TaskStatus::Assigned => "assigned",
            TaskStatus::Completed => "completed",
            TaskStatus::Cancelled => "cancelled",
        }
    }
}
