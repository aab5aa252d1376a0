use serde::{Deserialize, Deserializer};
use std::io::Read;

use super::mapping;
use crate::workflows::matching::domain::{GeoPoint, MarketplaceRole, WorkerAvailability};

#[derive(Debug)]
pub(crate) struct RosterRecord {
    pub(crate) display_name: String,
    pub(crate) location: GeoPoint,
    pub(crate) role: MarketplaceRole,
    pub(crate) availability: WorkerAvailability,
    pub(crate) rating: f32,
    pub(crate) completed_tasks: u32,
    pub(crate) skills: Vec<String>,
    pub(crate) proof_links: Vec<String>,
}

pub(crate) enum RowOutcome {
    Record(RosterRecord),
    Invalid { line: u64, reason: String },
}

pub(crate) fn parse_records<R: Read>(reader: R) -> Result<Vec<RowOutcome>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut outcomes = Vec::new();

    for (index, record) in csv_reader.deserialize::<RosterRow>().enumerate() {
        // Header occupies line 1; data rows start at line 2.
        let line = index as u64 + 2;
        let row = record?;
        match row.into_record() {
            Ok(record) => outcomes.push(RowOutcome::Record(record)),
            Err(reason) => outcomes.push(RowOutcome::Invalid { line, reason }),
        }
    }

    Ok(outcomes)
}

#[derive(Debug, Deserialize)]
struct RosterRow {
    #[serde(rename = "Name")]
    name: String,
    #[serde(rename = "Latitude")]
    latitude: String,
    #[serde(rename = "Longitude")]
    longitude: String,
    #[serde(rename = "Role", default, deserialize_with = "empty_string_as_none")]
    role: Option<String>,
    #[serde(
        rename = "Availability",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    availability: Option<String>,
    #[serde(rename = "Rating", default, deserialize_with = "empty_string_as_none")]
    rating: Option<String>,
    #[serde(
        rename = "Completed Tasks",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    completed_tasks: Option<String>,
    #[serde(rename = "Skills", default, deserialize_with = "empty_string_as_none")]
    skills: Option<String>,
    #[serde(
        rename = "Proof Links",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    proof_links: Option<String>,
}

impl RosterRow {
    fn into_record(self) -> Result<RosterRecord, String> {
        if self.name.is_empty() {
            return Err("missing worker name".to_string());
        }

        let lat = parse_coordinate(&self.latitude, "Latitude")?;
        let lng = parse_coordinate(&self.longitude, "Longitude")?;

        let role = match self.role.as_deref() {
            Some(label) => mapping::role_for_label(label)
                .ok_or_else(|| format!("unknown role '{label}'"))?,
            None => MarketplaceRole::Worker,
        };

        let availability = match self.availability.as_deref() {
            Some(label) => mapping::availability_for_label(label)
                .ok_or_else(|| format!("unknown availability '{label}'"))?,
            None => WorkerAvailability::Online,
        };

        // Absent optional numerics contribute zero downstream.
        let rating = match self.rating.as_deref() {
            Some(raw) => raw
                .parse::<f32>()
                .map_err(|_| format!("invalid rating '{raw}'"))?,
            None => 0.0,
        };

        let completed_tasks = match self.completed_tasks.as_deref() {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|_| format!("invalid completed task count '{raw}'"))?,
            None => 0,
        };

        Ok(RosterRecord {
            display_name: self.name,
            location: GeoPoint { lat, lng },
            role,
            availability,
            rating,
            completed_tasks,
            skills: mapping::split_tags(self.skills.as_deref().unwrap_or_default())
                .map(mapping::normalize_skill)
                .collect(),
            proof_links: mapping::split_tags(self.proof_links.as_deref().unwrap_or_default())
                .map(str::to_string)
                .collect(),
        })
    }
}

fn parse_coordinate(raw: &str, column: &str) -> Result<f64, String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(format!("missing {column}"));
    }
    trimmed
        .parse::<f64>()
        .map_err(|_| format!("invalid {column} '{trimmed}'"))
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}
