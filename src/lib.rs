//! Instant worker matching for an on-demand task marketplace.
//!
//! The matching workflow scores registered workers against a posted task by
//! proximity, reputation, category fit, experience, and proof of work, then
//! returns an ordered shortlist. The roster workflow imports worker pools from
//! CSV exports so deployments can seed the directory.

pub mod config;
pub mod error;
pub mod telemetry;
pub mod workflows;
