#![forbid(unsafe_code)]

//! Project requirements record (headless).
//!
//! This crate holds everything the document pipeline consumes but does not render:
//! - the project data model and its stakeholder lookup index
//! - payload validation for create / update submissions
//! - an explicitly constructed in-memory project store
//! - the non-functional requirement edit sheet and the summary statistics

pub mod config;
pub mod error;
pub mod model;
pub mod nonfunctional;
pub mod store;
pub mod summary;
pub mod validate;

pub use config::ReportConfig;
pub use error::{Error, Result};
pub use model::{
    FunctionalRequirement, InsertProject, NfrCategory, NonFunctionalRequirement, Project,
    ProjectPatch, STAKEHOLDER_ROLES, Stakeholder, StakeholderIndex,
};
pub use nonfunctional::NonFunctionalSheet;
pub use store::{MemoryProjectStore, ProjectStorage};
pub use summary::ProjectSummary;
pub use validate::{
    parse_insert_payload, parse_patch_payload, validate_insert, validate_patch, validate_project,
};

#[cfg(test)]
mod tests;
