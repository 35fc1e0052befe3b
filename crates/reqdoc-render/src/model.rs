use crate::chart::ChartKind;
use crate::text::TextStyle;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Layout coordinates are millimetres from the top-left page corner; PDF space is points.
pub const PT_PER_MM: f64 = 72.0 / 25.4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PageSize {
    /// 210 x 297 mm
    #[default]
    A4,
    /// 8.5 x 11 in
    Letter,
}

impl PageSize {
    pub fn dimensions_mm(self) -> (f64, f64) {
        match self {
            PageSize::A4 => (210.0, 297.0),
            PageSize::Letter => (215.9, 279.4),
        }
    }
}

impl std::str::FromStr for PageSize {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "a4" => Ok(Self::A4),
            "letter" | "us-letter" => Ok(Self::Letter),
            _ => Err(()),
        }
    }
}

/// Page box plus the space each kind of block keeps free below the cursor.
///
/// A block starts on a new page when the cursor is already past `height - margin - reserve`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageGeometry {
    pub width: f64,
    pub height: f64,
    pub margin: f64,
    /// Before a section heading (functional / non-functional).
    pub section_reserve: f64,
    /// Before a single requirement entry.
    pub entry_reserve: f64,
    /// Before a chart title and image.
    pub chart_reserve: f64,
}

impl Default for PageGeometry {
    fn default() -> Self {
        Self::for_size(PageSize::A4)
    }
}

impl PageGeometry {
    pub fn for_size(size: PageSize) -> Self {
        let (width, height) = size.dimensions_mm();
        Self {
            width,
            height,
            margin: 20.0,
            section_reserve: 77.0,
            entry_reserve: 27.0,
            chart_reserve: 127.0,
        }
    }

    pub fn content_width(&self) -> f64 {
        self.width - 2.0 * self.margin
    }

    /// Lowest baseline any line may use.
    pub fn bottom(&self) -> f64 {
        self.height - self.margin
    }

    pub fn section_limit(&self) -> f64 {
        self.height - self.margin - self.section_reserve
    }

    pub fn entry_limit(&self) -> f64 {
        self.height - self.margin - self.entry_reserve
    }

    pub fn chart_limit(&self) -> f64 {
        self.height - self.margin - self.chart_reserve
    }
}

/// One text block. `y` is the baseline of the first line; further lines follow at
/// `font_size * LINE_HEIGHT_FACTOR` points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextItem {
    pub x: f64,
    pub y: f64,
    pub style: TextStyle,
    pub lines: Vec<String>,
}

/// A chart image placed by its top-left corner. `asset` indexes the chart list the document was
/// laid out with.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImageItem {
    pub kind: ChartKind,
    pub asset: usize,
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum PageItem {
    Text(TextItem),
    Image(ImageItem),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PageLayout {
    pub items: Vec<PageItem>,
}

impl PageLayout {
    pub fn text_lines(&self) -> impl Iterator<Item = &str> {
        self.items.iter().flat_map(|item| match item {
            PageItem::Text(text) => text.lines.iter().map(String::as_str).collect::<Vec<_>>(),
            PageItem::Image(_) => Vec::new(),
        })
    }

    pub fn images(&self) -> impl Iterator<Item = &ImageItem> {
        self.items.iter().filter_map(|item| match item {
            PageItem::Image(image) => Some(image),
            PageItem::Text(_) => None,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutedDocument {
    pub title: String,
    pub generated_on: NaiveDate,
    pub geometry: PageGeometry,
    pub pages: Vec<PageLayout>,
}

impl LayoutedDocument {
    /// Every rendered line in page order.
    pub fn text_lines(&self) -> Vec<&str> {
        self.pages.iter().flat_map(|page| page.text_lines()).collect()
    }

    /// Zero-based page holding the first line equal to `line`.
    pub fn page_of(&self, line: &str) -> Option<usize> {
        self.pages
            .iter()
            .position(|page| page.text_lines().any(|l| l == line))
    }
}
