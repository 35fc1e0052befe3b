use super::SectionInput;
use crate::layout::PageLayoutEngine;
use crate::text::TextStyle;

/// Absent entirely when the project has no non-functional requirements.
pub(super) fn render(input: &SectionInput<'_>, layout: &mut PageLayoutEngine<'_>, y: f64) -> f64 {
    let requirements = &input.project.non_functional_requirements;
    if requirements.is_empty() {
        return y;
    }

    let geometry = *layout.geometry();
    let x = geometry.margin;
    let width = geometry.content_width();

    let y = layout.ensure_space(y, geometry.section_limit());
    let mut y = layout.place(
        "Non-Functional Requirements",
        x,
        y + 20.0,
        None,
        TextStyle::bold(14.0),
    );

    for req in requirements {
        y = layout.ensure_space(y, geometry.entry_limit());
        y = layout.place(
            &format!("{}:", req.category.heading()),
            x,
            y + 15.0,
            None,
            TextStyle::bold(10.0),
        );
        y = layout.place_wrapped(
            &req.description,
            x,
            y + 5.0,
            width,
            TextStyle::normal(10.0),
        ) + 5.0;
    }
    y
}
