use super::{NO_FUNCTIONAL_REQUIREMENTS, SectionInput};
use crate::layout::PageLayoutEngine;
use crate::text::TextStyle;

/// Label used when a requirement points at a stakeholder that is not in the project.
pub const UNKNOWN_STAKEHOLDER: &str = "Unknown";

/// `FR-{position:03}: {description} ({stakeholder})` for the 1-based `position`.
pub fn functional_label(position: usize, description: &str, stakeholder: Option<&str>) -> String {
    format!(
        "FR-{position:03}: {description} ({})",
        stakeholder.unwrap_or(UNKNOWN_STAKEHOLDER)
    )
}

pub(super) fn render(input: &SectionInput<'_>, layout: &mut PageLayoutEngine<'_>, y: f64) -> f64 {
    let geometry = *layout.geometry();
    let x = geometry.margin;
    let width = geometry.content_width();

    let y = layout.ensure_space(y, geometry.section_limit());
    let mut y = layout.place(
        "Functional Requirements",
        x,
        y + 20.0,
        None,
        TextStyle::bold(14.0),
    );

    let project = input.project;
    if project.functional_requirements.is_empty() {
        return layout.place(
            NO_FUNCTIONAL_REQUIREMENTS,
            x,
            y + 10.0,
            Some(width),
            TextStyle::normal(10.0),
        ) + 5.0;
    }

    let index = project.stakeholder_index();
    for (i, req) in project.functional_requirements.iter().enumerate() {
        let stakeholder = index.name_of(&req.stakeholder_id);
        if stakeholder.is_none() {
            tracing::debug!(requirement = %req.id, stakeholder = %req.stakeholder_id, "unresolved stakeholder");
        }
        let line = functional_label(i + 1, &req.description, stakeholder);

        y = layout.ensure_space(y, geometry.entry_limit());
        y = layout.place_wrapped(&line, x, y + 10.0, width, TextStyle::normal(10.0)) + 5.0;
    }
    y
}
