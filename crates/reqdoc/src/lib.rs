#![forbid(unsafe_code)]

//! `reqdoc` turns a requirements-wizard project record into a paginated PDF report.
//!
//! # Features
//!
//! - `render`: enable page layout and PDF output (`reqdoc::render`)
//! - `raster`: draw the built-in analysis charts with `resvg` and embed them in the report

pub use reqdoc_core::*;

#[cfg(feature = "render")]
pub mod render {
    pub use reqdoc_render::chart::{
        PieSlice, StakeholderBar, requirement_distribution, requirements_by_stakeholder,
    };
    pub use reqdoc_render::model::{LayoutedDocument, PageGeometry, PageLayout, PageSize};
    pub use reqdoc_render::sections::{Section, functional_label};
    pub use reqdoc_render::text::{DeterministicTextMeasurer, HelveticaTextMeasurer, TextMeasurer};
    pub use reqdoc_render::{
        ChartImage, ChartKind, ChartSource, GeneratedDocument, NoCharts, RenderOptions,
        SuppliedCharts, document_filename,
    };

    #[cfg(feature = "raster")]
    pub mod raster;

    #[derive(Debug, thiserror::Error)]
    pub enum HeadlessError {
        #[error(transparent)]
        Project(#[from] reqdoc_core::Error),
        #[error(transparent)]
        Render(#[from] reqdoc_render::Error),
    }

    pub type Result<T> = std::result::Result<T, HeadlessError>;

    /// Validates `project` and lays it out without producing PDF bytes.
    pub fn layout_project_sync(
        project: &reqdoc_core::Project,
        charts: &dyn ChartSource,
        options: &RenderOptions,
    ) -> Result<LayoutedDocument> {
        reqdoc_core::validate_project(project)?;
        let charts = reqdoc_render::chart::collect_charts(charts);
        Ok(reqdoc_render::layout_document(project, &charts, options))
    }

    /// Validates `project` and generates the report (executor-free).
    pub fn generate_report_sync(
        project: &reqdoc_core::Project,
        charts: &dyn ChartSource,
        options: &RenderOptions,
    ) -> Result<GeneratedDocument> {
        reqdoc_core::validate_project(project)?;
        Ok(reqdoc_render::generate_document(project, charts, options)?)
    }

    pub async fn generate_report(
        project: &reqdoc_core::Project,
        charts: &(dyn ChartSource + Sync),
        options: &RenderOptions,
    ) -> Result<GeneratedDocument> {
        generate_report_sync(project, charts, options)
    }

    /// Bundles render options with a host-owned project store.
    ///
    /// The store is a plain value; nothing here is global.
    #[derive(Debug, Clone, Default)]
    pub struct ReportService<S = reqdoc_core::MemoryProjectStore> {
        pub store: S,
        pub options: RenderOptions,
    }

    impl<S: reqdoc_core::ProjectStorage> ReportService<S> {
        pub fn new(store: S, options: RenderOptions) -> Self {
            Self { store, options }
        }

        pub fn with_config(mut self, config: &reqdoc_core::ReportConfig) -> Result<Self> {
            self.options = RenderOptions::from_config(config)?;
            Ok(self)
        }

        /// Validates and stores a create payload.
        pub fn create_project(
            &mut self,
            insert: reqdoc_core::InsertProject,
        ) -> Result<reqdoc_core::Project> {
            reqdoc_core::validate_insert(&insert)?;
            Ok(self.store.create(insert))
        }

        /// Applies a partial update. `Ok(None)` when the id is unknown.
        pub fn update_project(
            &mut self,
            id: &str,
            patch: reqdoc_core::ProjectPatch,
        ) -> Result<Option<reqdoc_core::Project>> {
            reqdoc_core::validate_patch(&patch)?;
            let Some(mut merged) = self.store.get(id) else {
                return Ok(None);
            };
            merged.apply_patch(patch.clone());
            reqdoc_core::validate_project(&merged)?;
            Ok(self.store.update(id, patch))
        }

        /// Generates the report for a stored project. `Ok(None)` when the id is unknown.
        pub fn generate_sync(
            &self,
            id: &str,
            charts: &dyn ChartSource,
        ) -> Result<Option<GeneratedDocument>> {
            let Some(project) = self.store.get(id) else {
                return Ok(None);
            };
            Ok(Some(generate_report_sync(&project, charts, &self.options)?))
        }

        #[cfg(feature = "raster")]
        pub fn generate_with_charts_sync(&self, id: &str) -> Result<Option<GeneratedDocument>> {
            let Some(project) = self.store.get(id) else {
                return Ok(None);
            };
            let charts = raster::ProjectChartRenderer::new(&project);
            Ok(Some(generate_report_sync(&project, &charts, &self.options)?))
        }
    }
}
