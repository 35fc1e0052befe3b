#![cfg(feature = "render")]

use chrono::NaiveDate;
use reqdoc::render::{
    HeadlessError, NoCharts, RenderOptions, ReportService, generate_report, generate_report_sync,
    layout_project_sync,
};
use reqdoc::{InsertProject, MemoryProjectStore, ProjectPatch, ProjectStorage, Stakeholder};
use std::path::PathBuf;

fn fixture(name: &str) -> serde_json::Value {
    let path = PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("../../fixtures/projects")
        .join(format!("{name}.json"));
    let text = std::fs::read_to_string(&path).unwrap();
    serde_json::from_str(&text).unwrap()
}

fn options() -> RenderOptions {
    RenderOptions::default().with_fixed_today(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap())
}

#[test]
fn service_creates_updates_and_generates() {
    let insert = reqdoc::parse_insert_payload(&fixture("insert_payload")).unwrap();
    let mut service = ReportService::new(MemoryProjectStore::new(), options());
    let project = service.create_project(insert).unwrap();
    assert_eq!(service.store.len(), 1);

    let patch = ProjectPatch {
        name: Some("Customer  Portal   v2".to_string()),
        stakeholders: Some(vec![Stakeholder {
            id: "s1".to_string(),
            name: "Alice".to_string(),
            role: "Business Owner".to_string(),
        }]),
        ..ProjectPatch::default()
    };
    let updated = service.update_project(&project.id, patch).unwrap().unwrap();
    assert_eq!(updated.id, project.id);
    assert_eq!(updated.domain, "E-commerce");
    assert_eq!(updated.stakeholders.len(), 1);

    let doc = service.generate_sync(&project.id, &NoCharts).unwrap().unwrap();
    assert_eq!(doc.filename, "Customer-Portal-v2-Requirements.pdf");
    let lines = doc.layout.text_lines();
    assert!(lines.contains(&"1. Alice - Business Owner"));
    // Bob was dropped by the wholesale stakeholder replacement.
    assert!(lines.contains(&"FR-002: Password reset by email (Unknown)"));

    assert!(service.generate_sync("missing", &NoCharts).unwrap().is_none());
    assert!(
        service
            .update_project("missing", ProjectPatch::default())
            .unwrap()
            .is_none()
    );
}

#[test]
fn invalid_records_are_rejected_before_rendering() {
    let mut project: reqdoc::Project = serde_json::from_value(fixture("customer_portal")).unwrap();
    project.name = "   ".to_string();
    let err = generate_report_sync(&project, &NoCharts, &options()).unwrap_err();
    assert!(matches!(err, HeadlessError::Project(_)));
    assert_eq!(err.to_string(), "Invalid project payload: name must not be empty");
}

#[test]
fn invalid_insert_is_not_stored() {
    let mut service = ReportService::new(MemoryProjectStore::new(), options());
    let err = service
        .create_project(InsertProject {
            name: "Portal".to_string(),
            domain: String::new(),
            description: "d".to_string(),
            ..InsertProject::default()
        })
        .unwrap_err();
    assert_eq!(err.to_string(), "Invalid project payload: domain must not be empty");
    assert!(service.store.list_all().is_empty());
}

#[test]
fn async_generation_matches_layout() {
    let project: reqdoc::Project = serde_json::from_value(fixture("customer_portal")).unwrap();
    let layout = layout_project_sync(&project, &NoCharts, &options()).unwrap();
    let doc = futures::executor::block_on(generate_report(&project, &NoCharts, &options())).unwrap();
    assert_eq!(doc.layout, layout);
    assert!(doc.bytes.starts_with(b"%PDF-"));
}

#[cfg(feature = "raster")]
mod raster {
    use super::*;
    use reqdoc::render::ChartKind;
    use reqdoc::render::raster::{ProjectChartRenderer, chart_svg};
    use reqdoc::render::ChartSource;

    #[test]
    fn built_in_charts_render_at_double_scale() {
        let project: reqdoc::Project = serde_json::from_value(fixture("customer_portal")).unwrap();
        let renderer = ProjectChartRenderer::new(&project);
        for kind in ChartKind::ALL {
            let image = renderer.chart(kind).unwrap();
            assert_eq!((image.width(), image.height()), (800, 600));
            assert!(image.is_opaque());
        }

        let doc = generate_report_sync(&project, &renderer, &options()).unwrap();
        let lines = doc.layout.text_lines();
        assert!(lines.contains(&"Requirements Analysis"));
        assert!(lines.contains(&"Requirements by Stakeholder"));
    }

    #[test]
    fn charts_without_data_are_skipped() {
        let project: reqdoc::Project = serde_json::from_value(fixture("empty_lists")).unwrap();
        assert!(chart_svg(&project, ChartKind::Pie).is_none());
        assert!(chart_svg(&project, ChartKind::Bar).is_none());

        let renderer = ProjectChartRenderer::new(&project);
        let doc = generate_report_sync(&project, &renderer, &options()).unwrap();
        assert!(!doc.layout.text_lines().contains(&"Requirements Analysis"));
        assert_eq!(doc.layout.pages.len(), 3);
    }
}
