//! Payload validation for project submissions.
//!
//! Shape errors (wrong JSON types) are reported before content errors so messages always name the
//! first offending field.

use crate::error::{Error, Result};
use crate::model::{
    FunctionalRequirement, InsertProject, NfrCategory, NonFunctionalRequirement, Project,
    ProjectPatch, Stakeholder,
};
use rustc_hash::FxHashSet;
use serde_json::Value;

const TEXT_FIELDS: [&str; 3] = ["name", "domain", "description"];
const LIST_FIELDS: [&str; 3] = [
    "stakeholders",
    "functionalRequirements",
    "nonFunctionalRequirements",
];

/// Parses and validates a create payload.
pub fn parse_insert_payload(value: &Value) -> Result<InsertProject> {
    check_shape(value, true)?;
    let insert: InsertProject = serde_json::from_value(value.clone())?;
    validate_insert(&insert)?;
    Ok(insert)
}

/// Parses and validates a partial update payload.
pub fn parse_patch_payload(value: &Value) -> Result<ProjectPatch> {
    check_shape(value, false)?;
    let patch: ProjectPatch = serde_json::from_value(value.clone())?;
    validate_patch(&patch)?;
    Ok(patch)
}

pub fn validate_insert(insert: &InsertProject) -> Result<()> {
    require_text("name", &insert.name)?;
    require_text("domain", &insert.domain)?;
    require_text("description", &insert.description)?;
    validate_lists(
        &insert.stakeholders,
        &insert.functional_requirements,
        &insert.non_functional_requirements,
    )
}

pub fn validate_patch(patch: &ProjectPatch) -> Result<()> {
    if let Some(name) = patch.name.as_deref() {
        require_text("name", name)?;
    }
    if let Some(domain) = patch.domain.as_deref() {
        require_text("domain", domain)?;
    }
    if let Some(description) = patch.description.as_deref() {
        require_text("description", description)?;
    }
    validate_lists(
        patch.stakeholders.as_deref().unwrap_or_default(),
        patch.functional_requirements.as_deref().unwrap_or_default(),
        patch.non_functional_requirements.as_deref().unwrap_or_default(),
    )
}

pub fn validate_project(project: &Project) -> Result<()> {
    if project.id.trim().is_empty() {
        return Err(Error::invalid("id", "must not be empty"));
    }
    require_text("name", &project.name)?;
    require_text("domain", &project.domain)?;
    require_text("description", &project.description)?;
    validate_lists(
        &project.stakeholders,
        &project.functional_requirements,
        &project.non_functional_requirements,
    )
}

fn check_shape(value: &Value, require_text_fields: bool) -> Result<()> {
    let Some(obj) = value.as_object() else {
        return Err(Error::invalid("payload", "must be a JSON object"));
    };
    for field in TEXT_FIELDS {
        match obj.get(field) {
            Some(Value::String(_)) => {}
            None if !require_text_fields => {}
            None | Some(Value::Null) => return Err(Error::invalid(field, "is required")),
            Some(_) => return Err(Error::invalid(field, "must be a string")),
        }
    }
    for field in LIST_FIELDS {
        match obj.get(field) {
            None | Some(Value::Null) | Some(Value::Array(_)) => {}
            Some(_) => return Err(Error::invalid(field, "must be an array")),
        }
    }
    Ok(())
}

fn require_text(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(Error::invalid(field, "must not be empty"));
    }
    Ok(())
}

fn validate_lists(
    stakeholders: &[Stakeholder],
    functional: &[FunctionalRequirement],
    non_functional: &[NonFunctionalRequirement],
) -> Result<()> {
    unique_ids("stakeholders", stakeholders.iter().map(|s| s.id.as_str()))?;
    unique_ids("functionalRequirements", functional.iter().map(|r| r.id.as_str()))?;
    unique_ids(
        "nonFunctionalRequirements",
        non_functional.iter().map(|r| r.id.as_str()),
    )?;

    let mut seen: FxHashSet<NfrCategory> = FxHashSet::default();
    for req in non_functional {
        if !seen.insert(req.category) {
            return Err(Error::DuplicateCategory {
                category: req.category,
            });
        }
    }
    Ok(())
}

fn unique_ids<'a>(collection: &'static str, ids: impl Iterator<Item = &'a str>) -> Result<()> {
    let mut seen: FxHashSet<&str> = FxHashSet::default();
    for id in ids {
        if id.trim().is_empty() {
            return Err(Error::invalid(collection, "contains an entry with an empty id"));
        }
        if !seen.insert(id) {
            return Err(Error::DuplicateId {
                collection,
                id: id.to_string(),
            });
        }
    }
    Ok(())
}
