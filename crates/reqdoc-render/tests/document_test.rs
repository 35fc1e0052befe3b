use chrono::NaiveDate;
use reqdoc_core::{FunctionalRequirement, Project};
use reqdoc_render::sections::{NO_FUNCTIONAL_REQUIREMENTS, NO_STAKEHOLDERS};
use reqdoc_render::{
    ChartImage, ChartKind, NoCharts, RenderOptions, SuppliedCharts, generate_document,
    generate_document_async, layout_document,
};
use std::path::PathBuf;

fn workspace_root() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("..")
        .join("..")
}

fn load_project(name: &str) -> Project {
    let path = workspace_root()
        .join("fixtures")
        .join("projects")
        .join(format!("{name}.json"));
    let text = std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("failed to read {}: {e}", path.display()));
    serde_json::from_str(&text).unwrap_or_else(|e| panic!("invalid fixture {name}: {e}"))
}

fn options() -> RenderOptions {
    RenderOptions::default().with_fixed_today(NaiveDate::from_ymd_opt(2024, 3, 7).unwrap())
}

fn index_of(lines: &[&str], needle: &str) -> usize {
    lines
        .iter()
        .position(|l| *l == needle)
        .unwrap_or_else(|| panic!("missing line {needle:?} in {lines:#?}"))
}

#[test]
fn customer_portal_renders_sections_in_order() {
    let project = load_project("customer_portal");
    let doc = layout_document(&project, &[], &options());
    let lines = doc.text_lines();

    let expected = [
        "Requirements Document",
        "Customer Portal",
        "Domain: E-commerce",
        "Generated: 3/7/2024",
        "Project Overview",
        "Redesign",
        "Stakeholders",
        "1. Alice - PM",
        "Functional Requirements",
        "FR-001: Login (Alice)",
        "Non-Functional Requirements",
        "SECURITY:",
        "Use TLS",
        "Project Statistics",
        "Total Stakeholders: 1",
        "Functional Requirements: 1",
        "Non-Functional Requirements: 1",
    ];
    assert_eq!(lines, expected);

    assert_eq!(doc.page_of("Customer Portal"), Some(0));
    assert_eq!(doc.page_of("Redesign"), Some(1));
    assert_eq!(doc.page_of("Project Statistics"), Some(2));
}

#[test]
fn empty_lists_render_empty_states() {
    let project = load_project("empty_lists");
    let doc = layout_document(&project, &[], &options());
    let lines = doc.text_lines();

    assert!(index_of(&lines, NO_STAKEHOLDERS) < index_of(&lines, NO_FUNCTIONAL_REQUIREMENTS));
    assert!(!lines.contains(&"Non-Functional Requirements"));
    assert!(lines.contains(&"Total Stakeholders: 0"));
    assert!(lines.contains(&"Non-Functional Requirements: 0"));

    let generated = generate_document(&project, &NoCharts, &options()).unwrap();
    assert!(generated.bytes.starts_with(b"%PDF-"));
}

#[test]
fn unresolved_stakeholder_is_labelled_unknown() {
    let project = load_project("unknown_stakeholder");
    let doc = layout_document(&project, &[], &options());
    let lines = doc.text_lines();

    assert!(lines.contains(&"FR-001: Dispatchers assign work orders to technicians (Dana)"));
    assert!(lines.contains(&"FR-002: Work orders sync when the device reconnects (Unknown)"));
    assert!(lines.contains(&"FR-003: Capture a customer signature on completion (Eli)"));
    assert!(index_of(&lines, "PERFORMANCE:") < index_of(&lines, "USABILITY:"));
}

#[test]
fn requirement_numbers_are_zero_padded_past_one_hundred() {
    let mut project = load_project("customer_portal");
    project.functional_requirements = (1..=100)
        .map(|i| FunctionalRequirement {
            id: format!("f{i}"),
            stakeholder_id: "s1".to_string(),
            description: format!("Requirement {i}"),
        })
        .collect();

    let doc = layout_document(&project, &[], &options());
    let lines = doc.text_lines();
    assert!(lines.contains(&"FR-001: Requirement 1 (Alice)"));
    assert!(lines.contains(&"FR-012: Requirement 12 (Alice)"));
    assert!(lines.contains(&"FR-100: Requirement 100 (Alice)"));
    assert!(doc.pages.len() > 5);
    assert!(doc.page_of("FR-100: Requirement 100 (Alice)") > doc.page_of("FR-001: Requirement 1 (Alice)"));
}

#[test]
fn long_descriptions_wrap_inside_the_content_width() {
    let project = load_project("unknown_stakeholder");
    let doc = layout_document(&project, &[], &options());
    let overview: Vec<&str> = doc.pages[1].text_lines().collect();
    let first = index_of(&overview, "Project Overview");
    let stakeholders = index_of(&overview, "Stakeholders");
    assert!(stakeholders - first > 2, "description should wrap: {overview:#?}");
}

#[test]
fn generation_is_byte_identical_for_a_fixed_date() {
    let project = load_project("unknown_stakeholder");
    let a = generate_document(&project, &NoCharts, &options()).unwrap();
    let b = generate_document(&project, &NoCharts, &options()).unwrap();
    assert_eq!(a.bytes, b.bytes);
    assert_eq!(a.filename, "Field-Service-App-Requirements.pdf");

    let later = RenderOptions::default().with_fixed_today(NaiveDate::from_ymd_opt(2025, 1, 1).unwrap());
    let c = generate_document(&project, &NoCharts, &later).unwrap();
    assert_ne!(a.bytes, c.bytes);
}

#[test]
fn supplied_charts_add_an_analysis_page() {
    let project = load_project("customer_portal");
    let mut rgba = vec![255u8; 40 * 30 * 4];
    // One translucent pixel forces a soft mask.
    rgba[3] = 128;
    let charts = SuppliedCharts::new()
        .with(ChartImage::from_rgba(ChartKind::Pie, 40, 30, rgba).unwrap())
        .with(ChartImage::from_rgba(ChartKind::Bar, 40, 30, vec![200; 40 * 30 * 4]).unwrap());

    let generated = generate_document(&project, &charts, &options()).unwrap();
    let lines = generated.layout.text_lines();
    let analysis = index_of(&lines, "Requirements Analysis");
    assert!(index_of(&lines, "Use TLS") < analysis);
    assert!(analysis < index_of(&lines, "Requirements Distribution"));
    assert!(index_of(&lines, "Requirements Distribution") < index_of(&lines, "Requirements by Stakeholder"));
    assert!(index_of(&lines, "Requirements by Stakeholder") < index_of(&lines, "Project Statistics"));

    let images: usize = generated.layout.pages.iter().map(|p| p.images().count()).sum();
    assert_eq!(images, 2);
    assert!(generated.bytes.starts_with(b"%PDF-"));
    assert!(generated.bytes.windows(5).any(|w| w == b"SMask"));
    // Two chart images plus the pie chart's alpha mask.
    let image_objects = generated
        .bytes
        .windows(15)
        .filter(|w| *w == b"/Subtype /Image")
        .count();
    assert_eq!(image_objects, 3);
}

#[test]
fn async_wrapper_matches_sync_output() {
    let project = load_project("customer_portal");
    let sync = generate_document(&project, &NoCharts, &options()).unwrap();
    let async_doc =
        futures::executor::block_on(generate_document_async(&project, &NoCharts, &options()))
            .unwrap();
    assert_eq!(sync.bytes, async_doc.bytes);
    assert_eq!(async_doc.filename, "Customer-Portal-Requirements.pdf");
}

#[test]
fn pdf_declares_base14_fonts_and_one_page_per_layout_page() {
    let project = load_project("customer_portal");
    let generated = generate_document(&project, &NoCharts, &options()).unwrap();
    let bytes = &generated.bytes;
    let contains = |needle: &[u8]| bytes.windows(needle.len()).any(|w| w == needle);

    assert!(contains(b"/Helvetica-Bold"));
    assert!(contains(b"/WinAnsiEncoding"));
    assert!(contains(b"/FlateDecode"));
    assert!(contains(b"/Count 3"));
    assert!(bytes.ends_with(b"%%EOF") || bytes.ends_with(b"%%EOF\n"));
}
