//! Standalone SVG for the built-in analysis charts.
//!
//! Output is plain SVG 1.1 (no CSS, no `<foreignObject>`) so it rasterizes the same in any
//! headless renderer.

use crate::chart::{PieSlice, StakeholderBar};
use std::fmt::Write as _;

pub const CHART_WIDTH: f64 = 400.0;
pub const CHART_HEIGHT: f64 = 300.0;

const FONT_FAMILY: &str = "Helvetica, Arial, sans-serif";
const TEXT_COLOR: &str = "#333333";
const GRID_COLOR: &str = "#e5e7eb";
const BAR_FILL: &str = "#3b82f6";

/// Formats a coordinate with at most three decimals and no trailing zeros.
pub(crate) fn fmt(v: f64) -> String {
    if !v.is_finite() {
        return "0".to_string();
    }
    let rounded = (v * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        return "0".to_string();
    }
    let mut s = format!("{rounded:.3}");
    while s.ends_with('0') {
        s.pop();
    }
    if s.ends_with('.') {
        s.pop();
    }
    s
}

pub(crate) fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

fn open_svg(out: &mut String, label: &str) {
    let _ = write!(
        out,
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{w}" height="{h}" viewBox="0 0 {w} {h}" role="img" aria-label="{label}">"#,
        w = fmt(CHART_WIDTH),
        h = fmt(CHART_HEIGHT),
        label = escape_xml(label),
    );
    let _ = write!(
        out,
        r#"<rect x="0" y="0" width="{w}" height="{h}" fill="white"/>"#,
        w = fmt(CHART_WIDTH),
        h = fmt(CHART_HEIGHT),
    );
}

fn polar_xy(cx: f64, cy: f64, radius: f64, angle: f64) -> (f64, f64) {
    (cx + radius * angle.sin(), cy - radius * angle.cos())
}

fn write_slice_value(out: &mut String, x: f64, y: f64, value: usize) {
    let _ = write!(
        out,
        r#"<text x="{x}" y="{y}" font-family="{FONT_FAMILY}" font-size="14" fill="white" text-anchor="middle" dominant-baseline="central">{value}</text>"#,
        x = fmt(x),
        y = fmt(y),
    );
}

/// Pie chart with one slice per non-zero value and a legend row underneath.
pub fn render_pie_chart_svg(slices: &[PieSlice]) -> String {
    let (cx, cy, r) = (CHART_WIDTH / 2.0, 125.0, 90.0);
    let total: usize = slices.iter().map(|s| s.value).sum();

    let mut out = String::new();
    open_svg(&mut out, "Requirements Distribution");

    let mut start = 0.0_f64;
    for slice in slices.iter().filter(|s| s.value > 0) {
        let fill = escape_xml(slice.fill);
        if slice.value == total {
            let _ = write!(
                &mut out,
                r#"<circle cx="{cx}" cy="{cy}" r="{r}" fill="{fill}" stroke="white" stroke-width="2"/>"#,
                cx = fmt(cx),
                cy = fmt(cy),
                r = fmt(r),
            );
            write_slice_value(&mut out, cx, cy, slice.value);
            break;
        }
        let sweep = slice.value as f64 / total as f64 * std::f64::consts::TAU;
        let end = start + sweep;
        let (x0, y0) = polar_xy(cx, cy, r, start);
        let (x1, y1) = polar_xy(cx, cy, r, end);
        let large = if sweep > std::f64::consts::PI { 1 } else { 0 };
        let _ = write!(
            &mut out,
            r#"<path d="M{cx},{cy}L{x0},{y0}A{r},{r},0,{large},1,{x1},{y1}Z" fill="{fill}" stroke="white" stroke-width="2"/>"#,
            cx = fmt(cx),
            cy = fmt(cy),
            x0 = fmt(x0),
            y0 = fmt(y0),
            x1 = fmt(x1),
            y1 = fmt(y1),
            r = fmt(r),
        );

        let (lx, ly) = polar_xy(cx, cy, r * 0.6, start + sweep / 2.0);
        write_slice_value(&mut out, lx, ly, slice.value);
        start = end;
    }

    let legend_y = 255.0;
    let column = CHART_WIDTH / slices.len().max(1) as f64;
    for (i, slice) in slices.iter().enumerate() {
        let x = column * i as f64 + 16.0;
        let _ = write!(
            &mut out,
            r#"<rect x="{x}" y="{y}" width="12" height="12" fill="{fill}"/>"#,
            x = fmt(x),
            y = fmt(legend_y - 10.0),
            fill = escape_xml(slice.fill),
        );
        let _ = write!(
            &mut out,
            r#"<text x="{x}" y="{y}" font-family="{FONT_FAMILY}" font-size="12" fill="{TEXT_COLOR}">{label}</text>"#,
            x = fmt(x + 18.0),
            y = fmt(legend_y),
            label = escape_xml(slice.label),
        );
    }

    out.push_str("</svg>");
    out
}

/// Smallest "nice" axis maximum (1, 2 or 5 times a power of ten) holding `max`.
fn axis_max(max: usize) -> usize {
    if max == 0 {
        return 1;
    }
    let mut step = 1usize;
    loop {
        for m in [1, 2, 5] {
            if m * step >= max {
                return m * step;
            }
        }
        step *= 10;
    }
}

/// Vertical bar chart with one bar per stakeholder and rotated labels.
pub fn render_bar_chart_svg(bars: &[StakeholderBar]) -> String {
    let (left, right, top, bottom) = (48.0, 24.0, 16.0, 84.0);
    let plot_w = CHART_WIDTH - left - right;
    let plot_h = CHART_HEIGHT - top - bottom;
    let base_y = top + plot_h;

    let max = axis_max(bars.iter().map(|b| b.value).max().unwrap_or(0));
    let ticks = max.min(5);
    let tick_step = max as f64 / ticks as f64;

    let mut out = String::new();
    open_svg(&mut out, "Requirements by Stakeholder");

    for t in 0..=ticks {
        let value = tick_step * t as f64;
        let y = base_y - value / max as f64 * plot_h;
        let _ = write!(
            &mut out,
            r#"<line x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke="{GRID_COLOR}" stroke-dasharray="3 3"/>"#,
            x1 = fmt(left),
            x2 = fmt(left + plot_w),
            y = fmt(y),
        );
        let _ = write!(
            &mut out,
            r#"<text x="{x}" y="{y}" font-family="{FONT_FAMILY}" font-size="11" fill="{TEXT_COLOR}" text-anchor="end" dominant-baseline="central">{v}</text>"#,
            x = fmt(left - 6.0),
            y = fmt(y),
            v = fmt(value),
        );
    }

    let slot = plot_w / bars.len().max(1) as f64;
    let bar_w = (slot * 0.6).min(48.0);
    for (i, bar) in bars.iter().enumerate() {
        let center = left + slot * (i as f64 + 0.5);
        let h = bar.value as f64 / max as f64 * plot_h;
        if h > 0.0 {
            let _ = write!(
                &mut out,
                r#"<rect x="{x}" y="{y}" width="{w}" height="{h}" fill="{BAR_FILL}"/>"#,
                x = fmt(center - bar_w / 2.0),
                y = fmt(base_y - h),
                w = fmt(bar_w),
                h = fmt(h),
            );
        }
        let _ = write!(
            &mut out,
            r#"<text x="{x}" y="{y}" font-family="{FONT_FAMILY}" font-size="11" fill="{TEXT_COLOR}" text-anchor="end" transform="rotate(-45 {x} {y})">{label}</text>"#,
            x = fmt(center),
            y = fmt(base_y + 14.0),
            label = escape_xml(&bar.label),
        );
    }

    let _ = write!(
        &mut out,
        r#"<line x1="{x1}" y1="{y}" x2="{x2}" y2="{y}" stroke="{TEXT_COLOR}"/>"#,
        x1 = fmt(left),
        x2 = fmt(left + plot_w),
        y = fmt(base_y),
    );

    out.push_str("</svg>");
    out
}
