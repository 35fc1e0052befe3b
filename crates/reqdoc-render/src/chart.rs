//! Chart images for the optional visual-analysis page.
//!
//! Images come from a [`ChartSource`]. A source that has nothing to offer returns `None`; that is
//! the ordinary "no chart" branch and never an error.

use crate::{Error, Result};
use reqdoc_core::Project;
use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    /// Functional vs non-functional requirement counts.
    Pie,
    /// Functional requirements per stakeholder.
    Bar,
}

impl ChartKind {
    /// Document order.
    pub const ALL: [ChartKind; 2] = [ChartKind::Pie, ChartKind::Bar];

    pub fn title(self) -> &'static str {
        match self {
            ChartKind::Pie => "Requirements Distribution",
            ChartKind::Bar => "Requirements by Stakeholder",
        }
    }
}

impl fmt::Display for ChartKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ChartKind::Pie => "pie",
            ChartKind::Bar => "bar",
        })
    }
}

/// A rendered chart as a straight (non-premultiplied) RGBA8 pixel buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct ChartImage {
    kind: ChartKind,
    width: u32,
    height: u32,
    rgba: Vec<u8>,
}

impl fmt::Debug for ChartImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChartImage")
            .field("kind", &self.kind)
            .field("width", &self.width)
            .field("height", &self.height)
            .field("bytes", &self.rgba.len())
            .finish()
    }
}

impl ChartImage {
    pub fn from_rgba(kind: ChartKind, width: u32, height: u32, rgba: Vec<u8>) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(Error::InvalidImage {
                kind,
                message: format!("empty image ({width}x{height})"),
            });
        }
        let expected = (width as usize) * (height as usize) * 4;
        if rgba.len() != expected {
            return Err(Error::InvalidImage {
                kind,
                message: format!(
                    "expected {expected} RGBA bytes for {width}x{height}, got {}",
                    rgba.len()
                ),
            });
        }
        Ok(Self {
            kind,
            width,
            height,
            rgba,
        })
    }

    pub fn from_png(kind: ChartKind, bytes: &[u8]) -> Result<Self> {
        let decoded = image::load_from_memory_with_format(bytes, image::ImageFormat::Png)?;
        let rgba = decoded.to_rgba8();
        let (width, height) = rgba.dimensions();
        Self::from_rgba(kind, width, height, rgba.into_raw())
    }

    pub fn kind(&self) -> ChartKind {
        self.kind
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }

    pub fn aspect_ratio(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }

    pub fn is_opaque(&self) -> bool {
        self.rgba.chunks_exact(4).all(|px| px[3] == u8::MAX)
    }

    /// Largest `(width, height)` inside `max_width x max_height` with this image's aspect ratio.
    pub fn fit_within(&self, max_width: f64, max_height: f64) -> (f64, f64) {
        let aspect = self.aspect_ratio();
        let mut width = max_width;
        let mut height = width / aspect;
        if height > max_height {
            height = max_height;
            width = height * aspect;
        }
        (width, height)
    }
}

pub trait ChartSource {
    fn chart(&self, kind: ChartKind) -> Option<ChartImage>;
}

/// A source without charts; the visual-analysis page is skipped.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoCharts;

impl ChartSource for NoCharts {
    fn chart(&self, _kind: ChartKind) -> Option<ChartImage> {
        None
    }
}

/// Charts rendered elsewhere and handed in up front.
#[derive(Debug, Clone, Default)]
pub struct SuppliedCharts {
    pie: Option<ChartImage>,
    bar: Option<ChartImage>,
}

impl SuppliedCharts {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stores `image` in the slot of its own kind, replacing any previous one.
    pub fn with(mut self, image: ChartImage) -> Self {
        match image.kind() {
            ChartKind::Pie => self.pie = Some(image),
            ChartKind::Bar => self.bar = Some(image),
        }
        self
    }
}

impl ChartSource for SuppliedCharts {
    fn chart(&self, kind: ChartKind) -> Option<ChartImage> {
        match kind {
            ChartKind::Pie => self.pie.clone(),
            ChartKind::Bar => self.bar.clone(),
        }
    }
}

/// Asks `source` for every chart kind in document order.
pub fn collect_charts(source: &dyn ChartSource) -> Vec<ChartImage> {
    let mut out = Vec::new();
    for kind in ChartKind::ALL {
        match source.chart(kind) {
            Some(image) if image.kind() == kind => out.push(image),
            Some(image) => {
                tracing::warn!(requested = %kind, got = %image.kind(), "chart source returned the wrong chart kind");
            }
            None => tracing::debug!(chart = %kind, "chart unavailable"),
        }
    }
    out
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PieSlice {
    pub label: &'static str,
    pub value: usize,
    pub fill: &'static str,
}

/// Functional vs non-functional counts. `None` when the project has no requirements at all.
pub fn requirement_distribution(project: &Project) -> Option<Vec<PieSlice>> {
    let functional = project.functional_requirements.len();
    let non_functional = project.non_functional_requirements.len();
    if functional == 0 && non_functional == 0 {
        return None;
    }
    Some(vec![
        PieSlice {
            label: "Functional Requirements",
            value: functional,
            fill: "#f59e0b",
        },
        PieSlice {
            label: "Non-Functional Requirements",
            value: non_functional,
            fill: "#10b981",
        },
    ])
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StakeholderBar {
    pub label: String,
    pub value: usize,
}

/// Functional requirement count per stakeholder, in stakeholder order. `None` without
/// stakeholders, or when the project has no requirements at all.
pub fn requirements_by_stakeholder(project: &Project) -> Option<Vec<StakeholderBar>> {
    if project.stakeholders.is_empty() || requirement_distribution(project).is_none() {
        return None;
    }
    Some(
        project
            .stakeholders
            .iter()
            .map(|s| StakeholderBar {
                label: s.name.clone(),
                value: project
                    .functional_requirements
                    .iter()
                    .filter(|r| r.stakeholder_id == s.id)
                    .count(),
            })
            .collect(),
    )
}
