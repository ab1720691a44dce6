//! Canvas geometry and coordinate-derived adjacency
//!
//! The engine does not hand over its connectivity graph, so edges are
//! reconstructed from data-ancilla distances. Half-integer coordinates are
//! not exact in floating point, which is why adjacency uses an open band
//! around the exact squared distance instead of equality.

use crate::lattice::{Coord, Round};

/// Open interval of squared distances that count as adjacent
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjacencyBand {
    pub lo: f64,
    pub hi: f64,
}

impl AdjacencyBand {
    /// Rotated layout: diagonal half step, exact value 0.5
    pub const ROTATED: AdjacencyBand = AdjacencyBand { lo: 0.4, hi: 0.6 };

    /// Planar/toric layout: axis-aligned half step, exact value 0.25
    pub const UNROTATED: AdjacencyBand = AdjacencyBand { lo: 0.2, hi: 0.3 };

    /// Strict containment; both bounds are excluded
    pub fn contains(&self, dist_sq: f64) -> bool {
        self.lo < dist_sq && dist_sq < self.hi
    }
}

/// Axis-aligned bounds of a set of coordinates
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
}

impl BoundingBox {
    /// Bounds of `coords`, or `None` when the iterator is empty
    pub fn from_coords<I>(coords: I) -> Option<Self>
    where
        I: IntoIterator<Item = Coord>,
    {
        coords.into_iter().fold(None, |acc, c| {
            Some(match acc {
                None => BoundingBox {
                    min_x: c.x,
                    max_x: c.x,
                    min_y: c.y,
                    max_y: c.y,
                },
                Some(b) => BoundingBox {
                    min_x: b.min_x.min(c.x),
                    max_x: b.max_x.max(c.x),
                    min_y: b.min_y.min(c.y),
                    max_y: b.max_y.max(c.y),
                },
            })
        })
    }

    pub fn width(&self) -> f64 {
        self.max_x - self.min_x
    }

    pub fn height(&self) -> f64 {
        self.max_y - self.min_y
    }
}

/// Maps lattice coordinates onto the canvas.
///
/// The lattice y-axis points up and the canvas y-axis points down, so the
/// vertical coordinate is flipped against the canvas height.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CanvasTransform {
    pub min_x: f64,
    pub min_y: f64,
    pub unit_scale: f64,
    pub padding: f64,
    pub width: f64,
    pub height: f64,
}

impl CanvasTransform {
    /// Size the canvas for `bounds`.
    ///
    /// An axis with zero extent is given one unit of extent so the canvas is
    /// never collapsed to the padding alone.
    pub fn new(bounds: &BoundingBox, unit_scale: f64, padding: f64) -> Self {
        let span = |extent: f64| if extent > 0.0 { extent } else { 1.0 };
        Self {
            min_x: bounds.min_x,
            min_y: bounds.min_y,
            unit_scale,
            padding,
            width: span(bounds.width()) * unit_scale + 2.0 * padding,
            height: span(bounds.height()) * unit_scale + 2.0 * padding,
        }
    }

    pub fn to_canvas(&self, coord: Coord) -> (f64, f64) {
        let rel_x = coord.x - self.min_x;
        let rel_y = coord.y - self.min_y;
        let canvas_x = self.padding + rel_x * self.unit_scale;
        let canvas_y = self.height - (self.padding + rel_y * self.unit_scale);
        (canvas_x, canvas_y)
    }
}

/// Derived data-ancilla connection (indices into the round's site lists)
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Edge {
    pub data: usize,
    pub ancilla: usize,
    pub dist_sq: f64,
}

/// Every data-ancilla pair whose squared distance falls inside `band`.
///
/// Exhaustive scan; lattices here have at most a few hundred sites. Edges
/// come out grouped by data site in input order, then by ancilla order.
pub fn find_edges(round: &Round, band: AdjacencyBand) -> Vec<Edge> {
    let mut edges = Vec::new();
    for (di, data) in round.data_qubits.iter().enumerate() {
        for (ai, ancilla) in round.ancilla_qubits.iter().enumerate() {
            let dist_sq = data.coord.distance_sq(&ancilla.coord);
            if band.contains(dist_sq) {
                edges.push(Edge {
                    data: di,
                    ancilla: ai,
                    dist_sq,
                });
            }
        }
    }
    edges
}
