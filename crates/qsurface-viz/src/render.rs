//! Lattice diagram rendering
//!
//! One round of the lattice becomes a three-layer vector diagram:
//! data-ancilla connections at the bottom, ancilla markers above them and
//! data markers on top. Error and syndrome state are encoded as colors,
//! outline weights and one-letter labels.

use crate::config::{RenderConfig, RenderStyle, StrokeStyle};
use crate::document::{Document, Group, Shape, ANCILLA_GROUP, CONNECTIONS_GROUP, DATA_GROUP};
use crate::error::VizError;
use crate::geometry::{find_edges, BoundingBox, CanvasTransform};
use crate::lattice::{AncillaKind, ErrorState, Lattice, Round};
use crate::outputs::RoundArtifacts;
use crate::find_rasterizer;
use crate::raster::{try_rasterize, RasterOutcome, Rasterizer};
use anyhow::Result;
use rayon::prelude::*;
use std::path::{Path, PathBuf};

/// Visual class of a data-ancilla connection
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeHighlight {
    /// Z error on the data site reaching a Z-type ancilla
    ZDetected,
    /// X error on the data site reaching an X-type ancilla
    XDetected,
    Neutral,
}

impl EdgeHighlight {
    /// First match wins: Z before X before neutral
    pub fn classify(state: &ErrorState, kind: AncillaKind) -> Self {
        if state.z && kind == AncillaKind::Z {
            EdgeHighlight::ZDetected
        } else if state.x && kind == AncillaKind::X {
            EdgeHighlight::XDetected
        } else {
            EdgeHighlight::Neutral
        }
    }

    pub fn stroke<'a>(&self, style: &'a RenderStyle) -> &'a StrokeStyle {
        match self {
            EdgeHighlight::ZDetected => &style.edge_z_detected,
            EdgeHighlight::XDetected => &style.edge_x_detected,
            EdgeHighlight::Neutral => &style.edge_default,
        }
    }
}

/// What a render call produced
#[derive(Debug, Clone)]
pub enum RenderOutcome {
    /// Round had no data sites; nothing was written
    Empty,
    Rendered {
        document: Document,
        svg_path: PathBuf,
        raster: RasterOutcome,
    },
}

impl RenderOutcome {
    pub fn svg_path(&self) -> Option<&Path> {
        match self {
            RenderOutcome::Rendered { svg_path, .. } => Some(svg_path),
            RenderOutcome::Empty => None,
        }
    }

    pub fn document(&self) -> Option<&Document> {
        match self {
            RenderOutcome::Rendered { document, .. } => Some(document),
            RenderOutcome::Empty => None,
        }
    }
}

/// Renderer parameterized by layout, topology and palette
#[derive(Debug, Clone)]
pub struct LatticeRenderer {
    config: RenderConfig,
    /// Pinned raster tool; looked up on `PATH` per render when unset
    rasterizer: Option<(Rasterizer, PathBuf)>,
}

impl LatticeRenderer {
    pub fn new(config: RenderConfig) -> Result<Self, VizError> {
        config.validate()?;
        Ok(Self {
            config,
            rasterizer: None,
        })
    }

    /// Use `exe`, driven as `rasterizer`, for PNG output
    pub fn with_rasterizer(mut self, rasterizer: Rasterizer, exe: PathBuf) -> Self {
        self.rasterizer = Some((rasterizer, exe));
        self
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Build the diagram for one round, or `None` if it has no data sites
    pub fn build_document(&self, round: &Round) -> Option<Document> {
        if round.is_empty() {
            return None;
        }
        let bounds = BoundingBox::from_coords(round.coords())?;
        let transform = CanvasTransform::new(&bounds, self.config.unit_scale, self.config.padding);
        let style = &self.config.style;

        log::debug!(
            "Bounds x=[{}, {}] y=[{}, {}], canvas {}x{}",
            bounds.min_x,
            bounds.max_x,
            bounds.min_y,
            bounds.max_y,
            transform.width,
            transform.height
        );

        let mut doc = Document::new(transform.width, transform.height);

        let mut connections = Group::new(CONNECTIONS_GROUP);
        let edges = find_edges(round, self.config.topology.adjacency_band());
        for edge in &edges {
            let data = &round.data_qubits[edge.data];
            let ancilla = &round.ancilla_qubits[edge.ancilla];
            let stroke = EdgeHighlight::classify(&data.state, ancilla.kind).stroke(style);
            let (x1, y1) = transform.to_canvas(data.coord);
            let (x2, y2) = transform.to_canvas(ancilla.coord);
            connections.push(Shape::Line {
                x1,
                y1,
                x2,
                y2,
                stroke: stroke.color.clone(),
                stroke_width: stroke.width,
            });
        }
        log::debug!("{} connections ({} topology)", edges.len(), self.config.topology.name());
        doc.push_group(connections);

        let mut ancillas = Group::new(ANCILLA_GROUP);
        for ancilla in &round.ancilla_qubits {
            let (cx, cy) = transform.to_canvas(ancilla.coord);
            let fill = match ancilla.kind {
                AncillaKind::Z => &style.z_ancilla_fill,
                AncillaKind::X => &style.x_ancilla_fill,
            };
            let outline = if ancilla.syndrome {
                &style.syndrome_outline
            } else {
                &style.ancilla_outline
            };
            ancillas.push(Shape::Circle {
                cx,
                cy,
                r: style.ancilla_radius,
                fill: fill.clone(),
                stroke: outline.color.clone(),
                stroke_width: outline.width,
            });
            ancillas.push(Shape::Text {
                text: ancilla.kind.label().to_string(),
                x: cx,
                y: cy,
                font_size: style.ancilla_label_size,
                fill: style.ancilla_label_color.clone(),
                bold: false,
            });
        }
        doc.push_group(ancillas);

        let mut data_group = Group::new(DATA_GROUP);
        for data in &round.data_qubits {
            let (cx, cy) = transform.to_canvas(data.coord);
            data_group.push(Shape::Circle {
                cx,
                cy,
                r: style.data_radius,
                fill: style.data_fill.clone(),
                stroke: style.data_stroke.color.clone(),
                stroke_width: style.data_stroke.width,
            });
            if let Some(label) = data.state.label() {
                data_group.push(Shape::Text {
                    text: label.to_string(),
                    x: cx,
                    y: cy,
                    font_size: style.data_label_size,
                    fill: style.data_label_color.clone(),
                    bold: style.data_label_bold,
                });
            }
        }
        doc.push_group(data_group);

        Some(doc)
    }

    /// Render one round to `base` (round-suffixed for `round_index > 0`).
    ///
    /// The SVG is written before any raster attempt, and raster failures
    /// never fail the call.
    pub fn render(&self, round: &Round, round_index: usize, base: &Path) -> Result<RenderOutcome> {
        let Some(document) = self.build_document(round) else {
            log::info!("No data qubits to draw (round {}).", round_index);
            return Ok(RenderOutcome::Empty);
        };

        let artifacts = RoundArtifacts::new(base, round_index);
        document.save(&artifacts.vector)?;
        log::info!("Saved lattice visualization to {}", artifacts.vector.display());

        let raster = if self.config.emit_raster {
            let tool = self.rasterizer.clone().or_else(find_rasterizer);
            try_rasterize(tool, &artifacts.vector, &artifacts.raster)
        } else {
            RasterOutcome::Skipped
        };

        Ok(RenderOutcome::Rendered {
            document,
            svg_path: artifacts.vector,
            raster,
        })
    }

    /// Render a single round of `lattice`
    pub fn render_round(
        &self,
        lattice: &Lattice,
        round_index: usize,
        base: &Path,
    ) -> Result<RenderOutcome> {
        let round = lattice.round(round_index)?;
        self.render(round, round_index, base)
    }

    /// Render every round; rounds are independent and run in parallel.
    ///
    /// Outcomes are returned in round order.
    pub fn render_all(&self, lattice: &Lattice, base: &Path) -> Result<Vec<RenderOutcome>> {
        lattice
            .rounds
            .par_iter()
            .enumerate()
            .map(|(index, round)| self.render(round, index, base))
            .collect()
    }
}
