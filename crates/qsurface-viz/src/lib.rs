//! Surface-code lattice diagrams and correction diagnostics
//!
//! Read-only views over the state of a surface-code simulation:
//!
//! - Per-round SVG lattice diagrams with error/syndrome highlighting
//!   (optional PNG copy via an external rasterizer)
//! - Correction diff between pre- and post-decoding snapshots
//! - Plain-text correction and syndrome reports
//! - A correction pack bundling all of the above for one decoding pass
//!
//! # CLI Contract
//!
//! ```bash
//! qsviz render --lattice state.json --out lattice.svg [--round 3 | --all-rounds] [--png]
//! qsviz diff --before pre.json --after post.json --round 0 --out corrections.txt
//! qsviz syndrome --lattice state.json --out syndrome.txt
//! qsviz pack --before pre.json --after post.json --out-dir results/ [--png]
//! ```

pub mod config;
pub mod diff;
pub mod document;
pub mod error;
pub mod geometry;
pub mod lattice;
pub mod outputs;
pub mod pack;
pub mod raster;
pub mod render;
pub mod reports;

// Re-exports
pub use config::{RenderConfig, RenderStyle, StrokeStyle, Topology, VizConfig};
pub use diff::{ChangeKind, CorrectionDiff};
pub use document::{Document, Group, Shape};
pub use error::VizError;
pub use geometry::{find_edges, AdjacencyBand, BoundingBox, CanvasTransform, Edge};
pub use lattice::{
    AncillaKind, AncillaSite, Coord, DataSite, ErrorState, Lattice, Round, Snapshot, Syndrome,
};
pub use outputs::{raster_artifact_path, vector_artifact_path, OutputDir, RoundArtifacts};
pub use pack::{CorrectionPack, PackResult};
pub use raster::{RasterOutcome, Rasterizer};
pub use render::{EdgeHighlight, LatticeRenderer, RenderOutcome};
pub use reports::{DiffReport, SyndromeReport};

/// Crate version (from Cargo.toml)
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// First SVG rasterizer found on `PATH`
pub fn find_rasterizer() -> Option<(Rasterizer, std::path::PathBuf)> {
    Rasterizer::ALL
        .iter()
        .find_map(|r| which::which(r.binary()).ok().map(|path| (*r, path)))
}

/// Installation instructions for missing dependencies
pub fn dependency_install_instructions(dep: &str) -> String {
    match dep {
        "raster" => r#"
An SVG rasterizer is required for PNG export (SVG output is unaffected).

Options (install any one):
  rsvg-convert: sudo apt install librsvg2-bin     # Recommended
                brew install librsvg
  cairosvg:     pip install cairosvg
  inkscape:     sudo apt install inkscape
  ImageMagick:  sudo apt install imagemagick      # provides `magick` (v7)
"#
        .to_string(),
        _ => format!("Unknown dependency: {}", dep),
    }
}
