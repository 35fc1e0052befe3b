use serde::{Deserialize, Serialize};

mod helvetica;
mod wrap;

pub use wrap::wrap_text_lines;

/// Line height used when several wrapped lines are drawn from one baseline, as a multiple of the
/// font size.
pub const LINE_HEIGHT_FACTOR: f64 = 1.15;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FontWeight {
    #[default]
    Normal,
    Bold,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in points.
    pub font_size: f64,
    pub font_weight: FontWeight,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self::normal(10.0)
    }
}

impl TextStyle {
    pub fn normal(font_size: f64) -> Self {
        Self {
            font_size,
            font_weight: FontWeight::Normal,
        }
    }

    pub fn bold(font_size: f64) -> Self {
        Self {
            font_size,
            font_weight: FontWeight::Bold,
        }
    }
}

/// Width / height in points.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub line_count: usize,
}

pub trait TextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics;
}

fn text_lines(text: &str) -> Vec<&str> {
    let out = text.split('\n').collect::<Vec<_>>();
    if out.is_empty() { vec![""] } else { out }
}

/// Measures with the Helvetica / Helvetica-Bold advance widths the PDF writer sets text in.
#[derive(Debug, Clone, Copy, Default)]
pub struct HelveticaTextMeasurer;

impl HelveticaTextMeasurer {
    pub fn line_width(line: &str, style: &TextStyle) -> f64 {
        let table = match style.font_weight {
            FontWeight::Normal => &helvetica::REGULAR,
            FontWeight::Bold => &helvetica::BOLD,
        };
        let units: u32 = line
            .chars()
            .map(|ch| u32::from(helvetica::char_width(table, ch)))
            .sum();
        f64::from(units) / 1000.0 * style.font_size.max(0.0)
    }
}

impl TextMeasurer for HelveticaTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let lines = text_lines(text);
        let width = lines
            .iter()
            .map(|line| Self::line_width(line, style))
            .fold(0.0, f64::max);
        TextMetrics {
            width,
            height: lines.len() as f64 * style.font_size * LINE_HEIGHT_FACTOR,
            line_count: lines.len(),
        }
    }
}

/// Fixed-advance measurer: every character is `char_width_factor` em wide.
#[derive(Debug, Clone, Default)]
pub struct DeterministicTextMeasurer {
    pub char_width_factor: f64,
    pub line_height_factor: f64,
}

impl TextMeasurer for DeterministicTextMeasurer {
    fn measure(&self, text: &str, style: &TextStyle) -> TextMetrics {
        let char_width_factor = if self.char_width_factor == 0.0 {
            0.6
        } else {
            self.char_width_factor
        };
        let line_height_factor = if self.line_height_factor == 0.0 {
            LINE_HEIGHT_FACTOR
        } else {
            self.line_height_factor
        };

        let lines = text_lines(text);
        let font_size = style.font_size.max(1.0);
        let max_chars = lines
            .iter()
            .map(|line| line.chars().count())
            .max()
            .unwrap_or(0);

        TextMetrics {
            width: max_chars as f64 * font_size * char_width_factor,
            height: lines.len() as f64 * font_size * line_height_factor,
            line_count: lines.len(),
        }
    }
}
