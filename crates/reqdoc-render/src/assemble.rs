//! Drives the section renderers in order and finalizes the artifact.

use crate::chart::{ChartImage, ChartSource, collect_charts};
use crate::layout::PageLayoutEngine;
use crate::model::LayoutedDocument;
use crate::sections::{SECTION_ORDER, SectionInput};
use crate::{RenderOptions, Result, pdf};
use regex::Regex;
use reqdoc_core::Project;
use std::sync::OnceLock;

/// A finished report: suggested file name, the page model and the PDF bytes.
#[derive(Debug, Clone)]
pub struct GeneratedDocument {
    pub filename: String,
    pub layout: LayoutedDocument,
    pub bytes: Vec<u8>,
}

/// `"Customer Portal Redesign"` → `"Customer-Portal-Redesign-Requirements.pdf"`.
pub fn document_filename(project_name: &str) -> String {
    static WS_RE: OnceLock<Regex> = OnceLock::new();
    let re = WS_RE.get_or_init(|| Regex::new(r"\s+").expect("valid regex"));
    format!("{}-Requirements.pdf", re.replace_all(project_name, "-"))
}

/// Lays out every section without serializing. Image items index into `charts`.
pub fn layout_document(
    project: &Project,
    charts: &[ChartImage],
    options: &RenderOptions,
) -> LayoutedDocument {
    let generated_on = options.generation_date();
    let input = SectionInput {
        project,
        generated_on,
        charts,
        chart_max_height: options.chart_max_height,
    };

    let mut layout = PageLayoutEngine::new(options.geometry, options.text_measurer.as_ref());
    let mut y = layout.top();
    for section in SECTION_ORDER {
        y = section.render(&input, &mut layout, y);
    }

    LayoutedDocument {
        title: format!("{} Requirements", project.name),
        generated_on,
        geometry: options.geometry,
        pages: layout.finish(),
    }
}

/// Generates the complete report. Either every section is written or an error is returned.
pub fn generate_document(
    project: &Project,
    charts: &dyn ChartSource,
    options: &RenderOptions,
) -> Result<GeneratedDocument> {
    let charts = collect_charts(charts);
    let layout = layout_document(project, &charts, options);
    let bytes = pdf::write_pdf(&layout, &charts)?;
    let filename = document_filename(&project.name);
    tracing::debug!(
        filename = %filename,
        pages = layout.pages.len(),
        charts = charts.len(),
        bytes = bytes.len(),
        "document generated"
    );
    Ok(GeneratedDocument {
        filename,
        layout,
        bytes,
    })
}

/// Executor-agnostic async wrapper around [`generate_document`]. All work is CPU-bound.
pub async fn generate_document_async(
    project: &Project,
    charts: &(dyn ChartSource + Sync),
    options: &RenderOptions,
) -> Result<GeneratedDocument> {
    generate_document(project, charts, options)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn whitespace_runs_collapse_to_one_hyphen() {
        assert_eq!(document_filename("A  B   C"), "A-B-C-Requirements.pdf");
        assert_eq!(
            document_filename("Customer Portal Redesign"),
            "Customer-Portal-Redesign-Requirements.pdf"
        );
        assert_eq!(document_filename("Tab\tand\nnewline"), "Tab-and-newline-Requirements.pdf");
        assert_eq!(document_filename(" edge "), "-edge--Requirements.pdf");
    }
}
