//! Configuration structures for lattice rendering
//!
//! Everything that used to be a fixed drawing constant (colors, radii,
//! stroke widths) lives in `RenderStyle`, and the lattice geometry is a
//! `Topology` descriptor rather than part of the renderer type.

use crate::error::VizError;
use crate::geometry::AdjacencyBand;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Root configuration document (`qsviz.toml`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VizConfig {
    #[serde(default)]
    pub render: RenderConfig,
}

impl VizConfig {
    /// Load configuration from TOML file
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config: {}", path.display()))?;
        let config = Self::from_str(&content)
            .with_context(|| format!("Failed to parse config: {}", path.display()))?;
        Ok(config)
    }

    /// Parse configuration from TOML string
    #[allow(clippy::should_implement_trait)]
    pub fn from_str(content: &str) -> Result<Self, VizError> {
        Ok(toml::from_str(content)?)
    }

    pub fn validate(&self) -> Result<(), VizError> {
        self.render.validate()
    }
}

/// Lattice geometry the renderer is drawing.
///
/// The topology only decides which data-ancilla distance counts as an edge.
/// Periodic wrap-around of the toric code is not drawn.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Topology {
    /// Data on integer sites, stabilizers on half-integer plaquette centers
    #[default]
    Rotated,
    /// Data on edge midpoints, open boundaries
    Planar,
    /// Data on edge midpoints, periodic boundaries
    Toric,
}

impl Topology {
    /// Squared-distance band that identifies a data-ancilla edge.
    ///
    /// Rotated: exact value 0.5 (diagonal half step). Planar/toric: 0.25
    /// (axis-aligned half step).
    pub fn adjacency_band(&self) -> AdjacencyBand {
        match self {
            Topology::Rotated => AdjacencyBand::ROTATED,
            Topology::Planar | Topology::Toric => AdjacencyBand::UNROTATED,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Topology::Rotated => "rotated",
            Topology::Planar => "planar",
            Topology::Toric => "toric",
        }
    }
}

/// Render parameters for a single call
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RenderConfig {
    /// Pixels per unit lattice distance
    #[serde(default = "default_unit_scale")]
    pub unit_scale: f64,

    /// Border margin (pixels)
    #[serde(default = "default_padding")]
    pub padding: f64,

    /// Also attempt a PNG copy through an external rasterizer
    #[serde(default)]
    pub emit_raster: bool,

    #[serde(default)]
    pub topology: Topology,

    #[serde(default)]
    pub style: RenderStyle,
}

fn default_unit_scale() -> f64 {
    100.0
}

fn default_padding() -> f64 {
    50.0
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            unit_scale: default_unit_scale(),
            padding: default_padding(),
            emit_raster: false,
            topology: Topology::default(),
            style: RenderStyle::default(),
        }
    }
}

impl RenderConfig {
    pub fn with_raster(mut self, emit_raster: bool) -> Self {
        self.emit_raster = emit_raster;
        self
    }

    pub fn with_topology(mut self, topology: Topology) -> Self {
        self.topology = topology;
        self
    }

    /// Reject layouts that would produce an empty or inverted canvas
    pub fn validate(&self) -> Result<(), VizError> {
        if !(self.unit_scale.is_finite() && self.unit_scale > 0.0) {
            return Err(VizError::config(format!(
                "unit_scale must be positive and finite, got {}",
                self.unit_scale
            )));
        }
        if !(self.padding.is_finite() && self.padding >= 0.0) {
            return Err(VizError::config(format!(
                "padding must be non-negative and finite, got {}",
                self.padding
            )));
        }
        if !(self.style.data_radius > 0.0 && self.style.ancilla_radius > 0.0) {
            return Err(VizError::config("marker radii must be positive"));
        }
        Ok(())
    }
}

/// Stroke attributes of one edge style
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    pub color: String,
    pub width: f64,
}

impl StrokeStyle {
    pub fn new(color: &str, width: f64) -> Self {
        Self {
            color: color.to_string(),
            width,
        }
    }
}

/// Palette and marker geometry
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderStyle {
    pub data_radius: f64,
    pub ancilla_radius: f64,

    /// Fill of Z-type stabilizers
    pub z_ancilla_fill: String,
    /// Fill of X-type stabilizers
    pub x_ancilla_fill: String,
    pub data_fill: String,
    pub data_stroke: StrokeStyle,

    /// Edge with no detected error
    pub edge_default: StrokeStyle,
    /// Z error on the data site, Z-type ancilla
    pub edge_z_detected: StrokeStyle,
    /// X error on the data site, X-type ancilla
    pub edge_x_detected: StrokeStyle,

    pub ancilla_outline: StrokeStyle,
    /// Outline of an ancilla whose syndrome is set
    pub syndrome_outline: StrokeStyle,

    pub ancilla_label_size: f64,
    pub ancilla_label_color: String,
    pub data_label_size: f64,
    pub data_label_color: String,
    pub data_label_bold: bool,
}

impl Default for RenderStyle {
    fn default() -> Self {
        Self {
            data_radius: 15.0,
            ancilla_radius: 12.0,
            z_ancilla_fill: "#dbb2af".to_string(),
            x_ancilla_fill: "#bcbde6".to_string(),
            data_fill: "#813991ff".to_string(),
            data_stroke: StrokeStyle::new("#2c3e50", 0.5),
            edge_default: StrokeStyle::new("#dcdde1", 3.0),
            edge_z_detected: StrokeStyle::new("#ff5e00ff", 5.0),
            edge_x_detected: StrokeStyle::new("#ff8c00ff", 5.0),
            ancilla_outline: StrokeStyle::new("grey", 0.5),
            syndrome_outline: StrokeStyle::new("red", 4.0),
            ancilla_label_size: 10.0,
            ancilla_label_color: "grey".to_string(),
            data_label_size: 14.0,
            data_label_color: "#ffc7bfff".to_string(),
            data_label_bold: true,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = RenderConfig::default();
        assert_eq!(config.unit_scale, 100.0);
        assert_eq!(config.padding, 50.0);
        assert!(!config.emit_raster);
        assert_eq!(config.topology, Topology::Rotated);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validate_rejects_bad_scale() {
        let mut config = RenderConfig::default();
        config.unit_scale = 0.0;
        assert!(config.validate().is_err());
        config.unit_scale = f64::NAN;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_negative_padding() {
        let mut config = RenderConfig::default();
        config.padding = -1.0;
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validate_rejects_zero_radius() {
        let mut config = RenderConfig::default();
        config.style.ancilla_radius = 0.0;
        assert!(matches!(config.validate(), Err(VizError::ConfigError(_))));
    }

    #[test]
    fn test_toml_partial_override() {
        let config = VizConfig::from_str(
            r##"
            [render]
            unit_scale = 40.0
            topology = "planar"

            [render.style]
            data_fill = "#000000"
            "##,
        )
        .unwrap();
        assert_eq!(config.render.unit_scale, 40.0);
        assert_eq!(config.render.padding, 50.0);
        assert_eq!(config.render.topology, Topology::Planar);
        assert_eq!(config.render.style.data_fill, "#000000");
        assert_eq!(config.render.style.ancilla_radius, 12.0);
    }

    #[test]
    fn test_empty_toml_is_default() {
        let config = VizConfig::from_str("").unwrap();
        assert_eq!(config.render.unit_scale, 100.0);
        assert_eq!(config.render.style, RenderStyle::default());
    }

    #[test]
    fn test_topology_bands() {
        assert!(Topology::Rotated.adjacency_band().contains(0.5));
        assert!(!Topology::Rotated.adjacency_band().contains(0.25));
        assert!(Topology::Toric.adjacency_band().contains(0.25));
        assert!(!Topology::Planar.adjacency_band().contains(0.5));
    }
}
