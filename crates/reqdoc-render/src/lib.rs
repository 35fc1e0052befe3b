#![forbid(unsafe_code)]

//! Headless requirements-document pipeline: page layout, section renderers and a PDF writer.
//!
//! [`generate_document`] is the entry point. [`layout_document`] stops before serialization and
//! returns the page model, which is what most tests inspect.

pub mod assemble;
pub mod chart;
pub mod layout;
pub mod model;
pub mod pdf;
pub mod sections;
pub mod svg;
pub mod text;

pub use assemble::{
    GeneratedDocument, document_filename, generate_document, generate_document_async,
    layout_document,
};
pub use chart::{ChartImage, ChartKind, ChartSource, NoCharts, SuppliedCharts};
pub use model::{LayoutedDocument, PageGeometry, PageSize};

use crate::text::{DeterministicTextMeasurer, HelveticaTextMeasurer, TextMeasurer};
use chrono::NaiveDate;
use reqdoc_core::ReportConfig;
use std::sync::Arc;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("invalid chart image ({kind}): {message}")]
    InvalidImage { kind: ChartKind, message: String },
    #[error("failed to decode chart image: {0}")]
    ImageDecode(#[from] image::ImageError),
    #[error("failed to compress PDF stream: {0}")]
    Compress(#[from] std::io::Error),
    #[error("invalid render config: {message}")]
    InvalidConfig { message: String },
}

pub type Result<T> = std::result::Result<T, Error>;

fn invalid_config(message: impl Into<String>) -> Error {
    Error::InvalidConfig {
        message: message.into(),
    }
}

#[derive(Clone)]
pub struct RenderOptions {
    pub text_measurer: Arc<dyn TextMeasurer + Send + Sync>,
    pub geometry: PageGeometry,
    /// Upper bound for chart image height, in millimetres.
    pub chart_max_height: f64,
    /// Fixes the cover page date. `None` uses the local date at generation time.
    pub fixed_today: Option<NaiveDate>,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            text_measurer: Arc::new(HelveticaTextMeasurer),
            geometry: PageGeometry::default(),
            chart_max_height: 120.0,
            fixed_today: None,
        }
    }
}

impl std::fmt::Debug for RenderOptions {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RenderOptions")
            .field("geometry", &self.geometry)
            .field("chart_max_height", &self.chart_max_height)
            .field("fixed_today", &self.fixed_today)
            .finish_non_exhaustive()
    }
}

impl RenderOptions {
    pub fn with_fixed_today(mut self, today: NaiveDate) -> Self {
        self.fixed_today = Some(today);
        self
    }

    pub fn with_geometry(mut self, geometry: PageGeometry) -> Self {
        self.geometry = geometry;
        self
    }

    /// Reads `page.*`, `chart.maxHeight`, `text.measurer` and `document.date`. Missing keys keep
    /// their defaults.
    pub fn from_config(config: &ReportConfig) -> Result<Self> {
        let mut options = Self::default();

        if let Some(size) = config.get_str("page.size") {
            let size = size
                .parse::<PageSize>()
                .map_err(|_| invalid_config(format!("unknown page size: {size}")))?;
            options.geometry = PageGeometry::for_size(size);
        }

        let g = &mut options.geometry;
        for (key, slot) in [
            ("page.margin", &mut g.margin),
            ("page.sectionReserve", &mut g.section_reserve),
            ("page.entryReserve", &mut g.entry_reserve),
            ("page.chartReserve", &mut g.chart_reserve),
        ] {
            if let Some(v) = config.get_f64(key) {
                if v < 0.0 {
                    return Err(invalid_config(format!("{key} must not be negative")));
                }
                *slot = v;
            }
        }
        if options.geometry.content_width() <= 0.0
            || options.geometry.margin * 2.0 >= options.geometry.height
        {
            return Err(invalid_config("page.margin leaves no room for content"));
        }

        if let Some(v) = config.get_f64("chart.maxHeight") {
            if v <= 0.0 {
                return Err(invalid_config("chart.maxHeight must be positive"));
            }
            options.chart_max_height = v;
        }

        match config.get_str("text.measurer") {
            None | Some("helvetica") => {}
            Some("deterministic") => {
                options.text_measurer = Arc::new(DeterministicTextMeasurer::default());
            }
            Some(other) => {
                return Err(invalid_config(format!("unknown text measurer: {other}")));
            }
        }

        if let Some(date) = config.get_str("document.date") {
            let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|_| {
                invalid_config(format!("document.date must be YYYY-MM-DD, got {date}"))
            })?;
            options.fixed_today = Some(date);
        }

        Ok(options)
    }

    pub fn generation_date(&self) -> NaiveDate {
        self.fixed_today
            .unwrap_or_else(|| chrono::Local::now().date_naive())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn config_overrides_page_and_date() {
        let config = ReportConfig::from_value(json!({
            "page": { "size": "letter", "margin": 25 },
            "chart": { "maxHeight": 100 },
            "document": { "date": "2024-03-07" }
        }));
        let options = RenderOptions::from_config(&config).unwrap();
        assert_eq!(options.geometry.width, 215.9);
        assert_eq!(options.geometry.margin, 25.0);
        assert_eq!(options.chart_max_height, 100.0);
        assert_eq!(
            options.generation_date(),
            NaiveDate::from_ymd_opt(2024, 3, 7).unwrap()
        );
    }

    #[test]
    fn empty_config_keeps_defaults() {
        let options = RenderOptions::from_config(&ReportConfig::empty_object()).unwrap();
        assert_eq!(options.geometry, PageGeometry::default());
        assert_eq!(options.chart_max_height, 120.0);
        assert!(options.fixed_today.is_none());
    }

    #[test]
    fn bad_config_values_are_rejected() {
        for (value, message) in [
            (json!({ "page": { "size": "a5" } }), "unknown page size: a5"),
            (
                json!({ "text": { "measurer": "system" } }),
                "unknown text measurer: system",
            ),
            (
                json!({ "document": { "date": "7/3/2024" } }),
                "document.date must be YYYY-MM-DD, got 7/3/2024",
            ),
            (
                json!({ "page": { "margin": 120 } }),
                "page.margin leaves no room for content",
            ),
        ] {
            let err = RenderOptions::from_config(&ReportConfig::from_value(value)).unwrap_err();
            assert_eq!(err.to_string(), format!("invalid render config: {message}"));
        }
    }
}
