use super::SectionInput;
use crate::layout::PageLayoutEngine;
use crate::text::TextStyle;

pub(super) fn render(input: &SectionInput<'_>, layout: &mut PageLayoutEngine<'_>, _y: f64) -> f64 {
    let x = layout.geometry().margin;
    let project = input.project;

    let y = layout.new_page();
    let y = layout.place("Project Statistics", x, y, None, TextStyle::bold(14.0));
    let y = layout.place(
        &format!("Total Stakeholders: {}", project.stakeholders.len()),
        x,
        y + 15.0,
        None,
        TextStyle::normal(10.0),
    );
    let y = layout.place(
        &format!(
            "Functional Requirements: {}",
            project.functional_requirements.len()
        ),
        x,
        y + 10.0,
        None,
        TextStyle::normal(10.0),
    );
    layout.place(
        &format!(
            "Non-Functional Requirements: {}",
            project.non_functional_requirements.len()
        ),
        x,
        y + 10.0,
        None,
        TextStyle::normal(10.0),
    )
}
