use super::SectionInput;
use crate::layout::PageLayoutEngine;
use crate::text::TextStyle;

/// Skipped without touching the page when no chart images are available.
pub(super) fn render(input: &SectionInput<'_>, layout: &mut PageLayoutEngine<'_>, y: f64) -> f64 {
    if input.charts.is_empty() {
        return y;
    }

    let geometry = *layout.geometry();
    let x = geometry.margin;

    let y = layout.new_page();
    let y = layout.place("Requirements Analysis", x, y, None, TextStyle::bold(14.0));

    let mut chart_y = y + 20.0;
    for (asset, chart) in input.charts.iter().enumerate() {
        chart_y = layout.ensure_space(chart_y, geometry.chart_limit());
        chart_y = layout.place(
            chart.kind().title(),
            x,
            chart_y,
            None,
            TextStyle::bold(12.0),
        );

        let (width, height) = chart.fit_within(geometry.content_width(), input.chart_max_height);
        layout.place_image(chart.kind(), asset, x, chart_y + 10.0, width, height);
        chart_y += height + 30.0;
    }
    chart_y
}
