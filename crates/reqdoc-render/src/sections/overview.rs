use super::SectionInput;
use crate::layout::PageLayoutEngine;
use crate::text::TextStyle;

pub(super) fn render(input: &SectionInput<'_>, layout: &mut PageLayoutEngine<'_>, _y: f64) -> f64 {
    let x = layout.geometry().margin;
    let width = layout.geometry().content_width();

    let y = layout.new_page();
    let y = layout.place("Project Overview", x, y, None, TextStyle::bold(16.0));
    layout.place_wrapped(
        &input.project.description,
        x,
        y + 15.0,
        width,
        TextStyle::normal(10.0),
    ) + 10.0
}
