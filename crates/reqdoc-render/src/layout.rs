//! Page canvas with a caller-driven vertical cursor.
//!
//! The engine never breaks pages on its own. Callers compare their cursor against one of the
//! [`PageGeometry`] limits (usually through [`PageLayoutEngine::ensure_space`]) before writing the
//! next block.

use crate::chart::ChartKind;
use crate::model::{ImageItem, PT_PER_MM, PageGeometry, PageItem, PageLayout, TextItem};
use crate::text::{TextMeasurer, TextStyle, wrap_text_lines};

/// Cursor advance per placed line, as a multiple of the font size.
pub const CURSOR_ADVANCE_FACTOR: f64 = 0.5;

pub struct PageLayoutEngine<'a> {
    geometry: PageGeometry,
    measurer: &'a dyn TextMeasurer,
    pages: Vec<PageLayout>,
}

impl<'a> PageLayoutEngine<'a> {
    /// Starts with one empty page.
    pub fn new(geometry: PageGeometry, measurer: &'a dyn TextMeasurer) -> Self {
        Self {
            geometry,
            measurer,
            pages: vec![PageLayout::default()],
        }
    }

    pub fn geometry(&self) -> &PageGeometry {
        &self.geometry
    }

    /// Cursor position at the top margin.
    pub fn top(&self) -> f64 {
        self.geometry.margin
    }

    pub fn page_count(&self) -> usize {
        self.pages.len()
    }

    fn current_page(&mut self) -> &mut PageLayout {
        if self.pages.is_empty() {
            self.pages.push(PageLayout::default());
        }
        let last = self.pages.len() - 1;
        &mut self.pages[last]
    }

    /// Places `text` with its first baseline at `(x, y)` and returns the advanced cursor.
    ///
    /// With `max_width` (mm) the text wraps and the cursor advances once per wrapped line.
    /// Without it the text is a single unwrapped block and the cursor advances by one line.
    pub fn place(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        max_width: Option<f64>,
        style: TextStyle,
    ) -> f64 {
        let (lines, advance_lines) = match max_width {
            Some(width) => {
                let lines =
                    wrap_text_lines(text, self.measurer, &style, Some(width * PT_PER_MM));
                let n = lines.len();
                (lines, n)
            }
            None => (wrap_text_lines(text, self.measurer, &style, None), 1),
        };

        self.push_text(x, y, style, lines);
        y + advance_lines as f64 * style.font_size * CURSOR_ADVANCE_FACTOR
    }

    /// Places wrapped text without writing below [`PageGeometry::bottom`].
    ///
    /// A block that would cross the bottom margin but fits on an empty page moves to a new page.
    /// A block taller than a page fills the current page and continues on the following ones.
    pub fn place_wrapped(
        &mut self,
        text: &str,
        x: f64,
        y: f64,
        max_width: f64,
        style: TextStyle,
    ) -> f64 {
        let advance = style.font_size * CURSOR_ADVANCE_FACTOR;
        let bottom = self.geometry.bottom();
        let top = self.top();
        let mut lines = wrap_text_lines(text, self.measurer, &style, Some(max_width * PT_PER_MM));

        let mut y = y;
        let height = lines.len() as f64 * advance;
        if y + height > bottom && y > top && top + height <= bottom {
            y = self.new_page();
        }

        loop {
            let room = ((bottom - y) / advance).floor().max(0.0) as usize;
            if room == 0 && y > top {
                y = self.new_page();
                continue;
            }
            let rest = lines.split_off(room.max(1).min(lines.len()));
            let placed = lines.len();
            self.push_text(x, y, style, lines);
            y += placed as f64 * advance;
            if rest.is_empty() {
                return y;
            }
            lines = rest;
            y = self.new_page();
        }
    }

    fn push_text(&mut self, x: f64, y: f64, style: TextStyle, lines: Vec<String>) {
        self.current_page().items.push(PageItem::Text(TextItem {
            x,
            y,
            style,
            lines,
        }));
    }

    /// Places a chart image by its top-left corner. The cursor is left to the caller.
    pub fn place_image(
        &mut self,
        kind: ChartKind,
        asset: usize,
        x: f64,
        y: f64,
        width: f64,
        height: f64,
    ) {
        self.current_page().items.push(PageItem::Image(ImageItem {
            kind,
            asset,
            x,
            y,
            width,
            height,
        }));
    }

    /// Starts a new page and returns the cursor at its top margin.
    pub fn new_page(&mut self) -> f64 {
        self.pages.push(PageLayout::default());
        tracing::debug!(page = self.pages.len(), "page break");
        self.top()
    }

    /// Starts a new page when `y` is already past `limit`; otherwise returns `y` unchanged.
    pub fn ensure_space(&mut self, y: f64, limit: f64) -> f64 {
        if y > limit { self.new_page() } else { y }
    }

    pub fn finish(self) -> Vec<PageLayout> {
        self.pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::text::HelveticaTextMeasurer;

    fn engine() -> PageLayoutEngine<'static> {
        PageLayoutEngine::new(PageGeometry::default(), &HelveticaTextMeasurer)
    }

    #[test]
    fn unwrapped_text_advances_half_the_font_size() {
        let mut layout = engine();
        let y = layout.place("Stakeholders", 20.0, 40.0, None, TextStyle::bold(14.0));
        assert_eq!(y, 47.0);
    }

    #[test]
    fn wrapped_text_advances_once_per_line() {
        let mut layout = engine();
        let text = "word ".repeat(200);
        let y = layout.place(&text, 20.0, 40.0, Some(170.0), TextStyle::normal(10.0));
        let pages = layout.finish();
        let PageItem::Text(item) = &pages[0].items[0] else {
            panic!("expected text item");
        };
        assert!(item.lines.len() > 1);
        assert_eq!(y, 40.0 + item.lines.len() as f64 * 5.0);
    }

    fn text_items(pages: &[PageLayout]) -> Vec<(usize, &TextItem)> {
        pages
            .iter()
            .enumerate()
            .flat_map(|(page, layout)| {
                layout.items.iter().filter_map(move |item| match item {
                    PageItem::Text(text) => Some((page, text)),
                    PageItem::Image(_) => None,
                })
            })
            .collect()
    }

    #[test]
    fn wrapped_block_that_fits_stays_put() {
        let mut layout = engine();
        let y = layout.place_wrapped("Redesign", 20.0, 43.0, 170.0, TextStyle::normal(10.0));
        assert_eq!(y, 48.0);
        assert_eq!(layout.page_count(), 1);
    }

    #[test]
    fn wrapped_block_crossing_the_bottom_moves_to_a_new_page() {
        let mut layout = engine();
        let text = "word ".repeat(100);
        let y = layout.place_wrapped(&text, 20.0, 270.0, 170.0, TextStyle::normal(10.0));
        let pages = layout.finish();
        assert_eq!(pages.len(), 2);
        assert!(pages[0].items.is_empty());
        let items = text_items(&pages);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].1.y, 20.0);
        assert_eq!(y, 20.0 + items[0].1.lines.len() as f64 * 5.0);
    }

    #[test]
    fn wrapped_block_taller_than_a_page_is_split() {
        let mut layout = engine();
        let text = "word ".repeat(5000);
        layout.place_wrapped(&text, 20.0, 43.0, 170.0, TextStyle::normal(10.0));
        let pages = layout.finish();
        assert!(pages.len() > 2);

        let items = text_items(&pages);
        assert_eq!(items.len(), pages.len());
        assert_eq!(items[0].1.y, 43.0);
        for (_, item) in items {
            let last_baseline = item.y + (item.lines.len() - 1) as f64 * 5.0;
            assert!(last_baseline <= 277.0, "line placed below the margin: {last_baseline}");
        }
    }

    #[test]
    fn ensure_space_breaks_only_past_the_limit() {
        let mut layout = engine();
        assert_eq!(layout.ensure_space(200.0, 200.0), 200.0);
        assert_eq!(layout.page_count(), 1);
        assert_eq!(layout.ensure_space(200.5, 200.0), 20.0);
        assert_eq!(layout.page_count(), 2);
    }

    #[test]
    fn a4_limits_match_the_classic_thresholds() {
        let g = PageGeometry::default();
        assert_eq!(g.section_limit(), 200.0);
        assert_eq!(g.entry_limit(), 250.0);
        assert_eq!(g.chart_limit(), 150.0);
        assert_eq!(g.content_width(), 170.0);
    }

    #[test]
    fn letter_limits_are_recomputed_from_page_height() {
        let g = PageGeometry::for_size(crate::model::PageSize::Letter);
        assert!((g.section_limit() - 182.4).abs() < 1e-9);
        assert!((g.entry_limit() - 232.4).abs() < 1e-9);
    }
}
