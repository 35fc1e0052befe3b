use super::SectionInput;
use crate::layout::PageLayoutEngine;
use crate::text::TextStyle;

/// `M/D/YYYY` without zero padding.
pub(crate) fn format_generated_date(date: chrono::NaiveDate) -> String {
    date.format("%-m/%-d/%Y").to_string()
}

pub(super) fn render(input: &SectionInput<'_>, layout: &mut PageLayoutEngine<'_>, y: f64) -> f64 {
    let x = layout.geometry().margin;
    let project = input.project;

    let y = layout.place("Requirements Document", x, y + 30.0, None, TextStyle::bold(24.0));
    let y = layout.place(&project.name, x, y + 20.0, None, TextStyle::normal(18.0));
    let y = layout.place(
        &format!("Domain: {}", project.domain),
        x,
        y + 15.0,
        None,
        TextStyle::normal(12.0),
    );
    layout.place(
        &format!("Generated: {}", format_generated_date(input.generated_on)),
        x,
        y + 10.0,
        None,
        TextStyle::normal(12.0),
    )
}
