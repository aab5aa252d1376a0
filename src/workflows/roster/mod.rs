//! Worker roster import from marketplace CSV exports.
//!
//! Exports carry one worker per row (`Name, Latitude, Longitude, Role,
//! Availability, Rating, Completed Tasks, Skills, Proof Links`). Skills and
//! proof links are semicolon-delimited cells; blank optional cells fall back
//! to the marketplace defaults.

mod mapping;
mod parser;

use std::io::Read;
use std::path::Path;

use crate::workflows::matching::domain::WorkerRegistration;
use parser::RowOutcome;

#[derive(Debug)]
pub enum RosterImportError {
    Io(std::io::Error),
    Csv(csv::Error),
    InvalidRow { line: u64, reason: String },
}

impl std::fmt::Display for RosterImportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RosterImportError::Io(err) => write!(f, "failed to read roster export: {}", err),
            RosterImportError::Csv(err) => write!(f, "invalid roster CSV data: {}", err),
            RosterImportError::InvalidRow { line, reason } => {
                write!(f, "roster row {} rejected: {}", line, reason)
            }
        }
    }
}

impl std::error::Error for RosterImportError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            RosterImportError::Io(err) => Some(err),
            RosterImportError::Csv(err) => Some(err),
            RosterImportError::InvalidRow { .. } => None,
        }
    }
}

impl From<std::io::Error> for RosterImportError {
    fn from(err: std::io::Error) -> Self {
        Self::Io(err)
    }
}

impl From<csv::Error> for RosterImportError {
    fn from(err: csv::Error) -> Self {
        Self::Csv(err)
    }
}

pub struct RosterImporter;

impl RosterImporter {
    pub fn from_path<P: AsRef<Path>>(
        path: P,
    ) -> Result<Vec<WorkerRegistration>, RosterImportError> {
        let file = std::fs::File::open(path)?;
        Self::from_reader(file)
    }

    pub fn from_reader<R: Read>(reader: R) -> Result<Vec<WorkerRegistration>, RosterImportError> {
        let mut registrations = Vec::new();

        for outcome in parser::parse_records(reader)? {
            match outcome {
                RowOutcome::Record(record) => registrations.push(WorkerRegistration {
                    display_name: record.display_name,
                    location: record.location,
                    role: record.role,
                    availability: record.availability,
                    rating: record.rating,
                    completed_tasks: record.completed_tasks,
                    skills: record.skills,
                    proof_links: record.proof_links,
                }),
                RowOutcome::Invalid { line, reason } => {
                    return Err(RosterImportError::InvalidRow { line, reason });
                }
            }
        }

        Ok(registrations)
    }
}
