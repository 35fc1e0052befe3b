#![forbid(unsafe_code)]

//! Built-in chart images drawn with `resvg`.
//!
//! [`ProjectChartRenderer`] is a [`ChartSource`] for one project. Rendering failures are logged
//! and reported as a missing chart so the report is still produced.

use crate::render::{ChartImage, ChartKind, ChartSource};
use reqdoc_core::Project;
use reqdoc_render::chart::{requirement_distribution, requirements_by_stakeholder};
use reqdoc_render::svg::{render_bar_chart_svg, render_pie_chart_svg};

#[derive(Debug, thiserror::Error)]
pub enum RasterError {
    #[error("failed to parse SVG")]
    SvgParse,
    #[error("failed to allocate pixmap for raster rendering")]
    PixmapAlloc,
    #[error("invalid background color: {0}")]
    Background(String),
    #[error(transparent)]
    Image(#[from] reqdoc_render::Error),
}

pub type Result<T> = std::result::Result<T, RasterError>;

#[derive(Debug, Clone)]
pub struct RasterOptions {
    pub scale: f32,
    pub background: Option<String>,
}

impl Default for RasterOptions {
    /// Twice the nominal 400x300 chart size on white.
    fn default() -> Self {
        Self {
            scale: 2.0,
            background: Some("white".to_string()),
        }
    }
}

/// SVG for one built-in chart, or `None` when the project has nothing to plot.
pub fn chart_svg(project: &Project, kind: ChartKind) -> Option<String> {
    match kind {
        ChartKind::Pie => requirement_distribution(project).map(|s| render_pie_chart_svg(&s)),
        ChartKind::Bar => requirements_by_stakeholder(project).map(|b| render_bar_chart_svg(&b)),
    }
}

pub fn svg_to_chart_image(svg: &str, kind: ChartKind, options: &RasterOptions) -> Result<ChartImage> {
    let pixmap = svg_to_pixmap(svg, options.scale, options.background.as_deref())?;
    let mut rgba = Vec::with_capacity(pixmap.data().len());
    for px in pixmap.pixels() {
        let c = px.demultiply();
        rgba.extend_from_slice(&[c.red(), c.green(), c.blue(), c.alpha()]);
    }
    Ok(ChartImage::from_rgba(kind, pixmap.width(), pixmap.height(), rgba)?)
}

/// Draws the built-in charts for one project on demand.
#[derive(Debug, Clone)]
pub struct ProjectChartRenderer<'a> {
    project: &'a Project,
    options: RasterOptions,
}

impl<'a> ProjectChartRenderer<'a> {
    pub fn new(project: &'a Project) -> Self {
        Self {
            project,
            options: RasterOptions::default(),
        }
    }

    pub fn with_options(mut self, options: RasterOptions) -> Self {
        self.options = options;
        self
    }
}

impl ChartSource for ProjectChartRenderer<'_> {
    fn chart(&self, kind: ChartKind) -> Option<ChartImage> {
        let svg = chart_svg(self.project, kind)?;
        match svg_to_chart_image(&svg, kind, &self.options) {
            Ok(image) => Some(image),
            Err(err) => {
                tracing::warn!(chart = %kind, error = %err, "chart rendering failed; skipping");
                None
            }
        }
    }
}

fn svg_to_pixmap(svg: &str, scale: f32, background: Option<&str>) -> Result<tiny_skia::Pixmap> {
    let mut opt = usvg::Options::default();
    opt.fontdb_mut().load_system_fonts();
    opt.font_family = "Helvetica".to_string();

    let tree = usvg::Tree::from_str(svg, &opt).map_err(|_| RasterError::SvgParse)?;
    let size = tree.size();
    let width_px = (size.width() * scale).ceil().max(1.0) as u32;
    let height_px = (size.height() * scale).ceil().max(1.0) as u32;

    let mut pixmap = tiny_skia::Pixmap::new(width_px, height_px).ok_or(RasterError::PixmapAlloc)?;
    if let Some(bg) = background {
        let color = parse_tiny_skia_color(bg).ok_or_else(|| RasterError::Background(bg.to_string()))?;
        pixmap.fill(color);
    }

    resvg::render(
        &tree,
        tiny_skia::Transform::from_scale(scale, scale),
        &mut pixmap.as_mut(),
    );
    Ok(pixmap)
}

fn parse_tiny_skia_color(text: &str) -> Option<tiny_skia::Color> {
    let s = text.trim().to_ascii_lowercase();
    match s.as_str() {
        "transparent" => return Some(tiny_skia::Color::from_rgba8(0, 0, 0, 0)),
        "white" => return Some(tiny_skia::Color::WHITE),
        "black" => return Some(tiny_skia::Color::BLACK),
        _ => {}
    }

    let hex = s.strip_prefix('#')?;
    fn hex2(b: &[u8]) -> Option<u8> {
        let hi = (*b.first()? as char).to_digit(16)? as u8;
        let lo = (*b.get(1)? as char).to_digit(16)? as u8;
        Some((hi << 4) | lo)
    }
    fn hex1(c: u8) -> Option<u8> {
        let v = (c as char).to_digit(16)? as u8;
        Some((v << 4) | v)
    }

    let bytes = hex.as_bytes();
    let (r, g, b) = match bytes.len() {
        3 => (hex1(bytes[0])?, hex1(bytes[1])?, hex1(bytes[2])?),
        6 => (hex2(&bytes[0..2])?, hex2(&bytes[2..4])?, hex2(&bytes[4..6])?),
        _ => return None,
    };
    Some(tiny_skia::Color::from_rgba8(r, g, b, 255))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn background_colors_parse() {
        assert_eq!(
            parse_tiny_skia_color("#fff"),
            Some(tiny_skia::Color::from_rgba8(255, 255, 255, 255))
        );
        assert_eq!(
            parse_tiny_skia_color(" #10B981 "),
            Some(tiny_skia::Color::from_rgba8(16, 185, 129, 255))
        );
        assert!(parse_tiny_skia_color("teal").is_none());
    }

    #[test]
    fn svg_rasterizes_at_the_requested_scale() {
        let svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="10" height="5" viewBox="0 0 10 5"><rect width="10" height="5" fill="black"/></svg>"#;
        let image = svg_to_chart_image(svg, ChartKind::Pie, &RasterOptions::default()).unwrap();
        assert_eq!((image.width(), image.height()), (20, 10));
        assert!(image.is_opaque());
        assert_eq!(&image.rgba()[..4], &[0, 0, 0, 255]);
    }

    #[test]
    fn broken_svg_is_an_error() {
        let err = svg_to_chart_image("<svg", ChartKind::Bar, &RasterOptions::default()).unwrap_err();
        assert!(matches!(err, RasterError::SvgParse));
    }
}
