use super::{NO_STAKEHOLDERS, SectionInput};
use crate::layout::PageLayoutEngine;
use crate::text::TextStyle;

pub(super) fn render(input: &SectionInput<'_>, layout: &mut PageLayoutEngine<'_>, y: f64) -> f64 {
    let geometry = *layout.geometry();
    let x = geometry.margin;
    let y = layout.ensure_space(y, geometry.section_limit());
    let mut y = layout.place("Stakeholders", x, y + 10.0, None, TextStyle::bold(14.0));

    let stakeholders = &input.project.stakeholders;
    if stakeholders.is_empty() {
        return layout.place(NO_STAKEHOLDERS, x, y + 10.0, None, TextStyle::normal(10.0));
    }
    for (i, s) in stakeholders.iter().enumerate() {
        let line = format!("{}. {} - {}", i + 1, s.name, s.role);
        y = layout.ensure_space(y, geometry.entry_limit());
        y = layout.place(&line, x, y + 10.0, None, TextStyle::normal(10.0));
    }
    y
}
