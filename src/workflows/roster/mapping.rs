use crate::workflows::matching::domain::{MarketplaceRole, WorkerAvailability};

/// Map an export's role label onto a marketplace role.
pub(crate) fn role_for_label(label: &str) -> Option<MarketplaceRole> {
    match label.trim().to_ascii_lowercase().as_str() {
        "poster" | "client" => Some(MarketplaceRole::Poster),
        "worker" | "tasker" => Some(MarketplaceRole::Worker),
        "hybrid" | "both" => Some(MarketplaceRole::Hybrid),
        _ => None,
    }
}

/// Map an export's presence label onto an availability state.
pub(crate) fn availability_for_label(label: &str) -> Option<WorkerAvailability> {
    match label.trim().to_ascii_lowercase().as_str() {
        "online" | "available" => Some(WorkerAvailability::Online),
        "busy" | "on_task" | "on task" => Some(WorkerAvailability::Busy),
        "offline" | "away" => Some(WorkerAvailability::Offline),
        _ => None,
    }
}

/// Split a semicolon-delimited cell into trimmed, non-empty entries.
pub(crate) fn split_tags(cell: &str) -> impl Iterator<Item = &str> {
    cell.split(';')
        .map(str::trim)
        .filter(|entry| !entry.is_empty())
}

/// Canonical skill form: lowercased with inner whitespace collapsed, so export
/// spellings line up with task category tags.
pub(crate) fn normalize_skill(raw: &str) -> String {
    raw.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_ascii_lowercase()
}
