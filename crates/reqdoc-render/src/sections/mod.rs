//! Document sections, rendered in a fixed order against one [`PageLayoutEngine`].
//!
//! Every renderer takes the cursor left by the previous one and returns the advanced cursor.

mod analysis;
mod cover;
mod functional;
mod nonfunctional;
mod overview;
mod stakeholders;
mod statistics;

use crate::chart::ChartImage;
use crate::layout::PageLayoutEngine;
use chrono::NaiveDate;
use reqdoc_core::Project;
use serde::Serialize;

pub use functional::functional_label;

pub const NO_STAKEHOLDERS: &str = "No stakeholders defined.";
pub const NO_FUNCTIONAL_REQUIREMENTS: &str = "No functional requirements defined.";

/// Everything a section may read. Sections never see the chart source, only the images it
/// produced.
#[derive(Debug, Clone, Copy)]
pub struct SectionInput<'a> {
    pub project: &'a Project,
    pub generated_on: NaiveDate,
    pub charts: &'a [ChartImage],
    /// Upper bound for a chart image's height, in millimetres.
    pub chart_max_height: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum Section {
    Cover,
    Overview,
    Stakeholders,
    FunctionalRequirements,
    NonFunctionalRequirements,
    VisualAnalysis,
    Statistics,
}

pub const SECTION_ORDER: [Section; 7] = [
    Section::Cover,
    Section::Overview,
    Section::Stakeholders,
    Section::FunctionalRequirements,
    Section::NonFunctionalRequirements,
    Section::VisualAnalysis,
    Section::Statistics,
];

impl Section {
    pub fn name(self) -> &'static str {
        match self {
            Section::Cover => "cover",
            Section::Overview => "overview",
            Section::Stakeholders => "stakeholders",
            Section::FunctionalRequirements => "functionalRequirements",
            Section::NonFunctionalRequirements => "nonFunctionalRequirements",
            Section::VisualAnalysis => "visualAnalysis",
            Section::Statistics => "statistics",
        }
    }

    pub fn render(self, input: &SectionInput<'_>, layout: &mut PageLayoutEngine<'_>, y: f64) -> f64 {
        tracing::debug!(section = self.name(), page = layout.page_count(), y, "render section");
        match self {
            Section::Cover => cover::render(input, layout, y),
            Section::Overview => overview::render(input, layout, y),
            Section::Stakeholders => stakeholders::render(input, layout, y),
            Section::FunctionalRequirements => functional::render(input, layout, y),
            Section::NonFunctionalRequirements => nonfunctional::render(input, layout, y),
            Section::VisualAnalysis => analysis::render(input, layout, y),
            Section::Statistics => statistics::render(input, layout, y),
        }
    }
}
