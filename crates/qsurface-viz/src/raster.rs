//! PNG conversion through an external SVG rasterizer
//!
//! Raster output is best-effort: the SVG is always the authoritative
//! artifact, and a missing or failing rasterizer is reported as a warning.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use std::process::Command;

/// Supported command-line rasterizers, in lookup order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Rasterizer {
    RsvgConvert,
    CairoSvg,
    Inkscape,
    Magick,
}

impl Rasterizer {
    pub const ALL: [Rasterizer; 4] = [
        Rasterizer::RsvgConvert,
        Rasterizer::CairoSvg,
        Rasterizer::Inkscape,
        Rasterizer::Magick,
    ];

    /// Executable name looked up on `PATH`
    pub fn binary(&self) -> &'static str {
        match self {
            Rasterizer::RsvgConvert => "rsvg-convert",
            Rasterizer::CairoSvg => "cairosvg",
            Rasterizer::Inkscape => "inkscape",
            Rasterizer::Magick => "magick",
        }
    }

    fn command(&self, exe: &Path, svg_path: &Path, png_path: &Path) -> Command {
        let mut cmd = Command::new(exe);
        match self {
            Rasterizer::RsvgConvert => {
                cmd.args(["-f", "png", "-o"]).arg(png_path).arg(svg_path);
            }
            Rasterizer::CairoSvg => {
                cmd.arg(svg_path).arg("-o").arg(png_path);
            }
            Rasterizer::Inkscape => {
                let mut export = std::ffi::OsString::from("--export-filename=");
                export.push(png_path);
                cmd.arg(svg_path).arg("--export-type=png").arg(export);
            }
            Rasterizer::Magick => {
                cmd.arg(svg_path).arg(png_path);
            }
        }
        cmd
    }

    /// Convert `svg_path` into `png_path` with this tool
    pub fn convert(&self, exe: &Path, svg_path: &Path, png_path: &Path) -> Result<()> {
        let status = self
            .command(exe, svg_path, png_path)
            .status()
            .with_context(|| format!("Failed to run {}: {}", self.binary(), exe.display()))?;

        if !status.success() {
            bail!("{} exited with error ({})", self.binary(), status);
        }

        if !png_path.exists() {
            bail!("PNG was not generated: {}", png_path.display());
        }

        Ok(())
    }
}

/// Result of a best-effort raster attempt
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RasterOutcome {
    /// Raster output was not requested
    Skipped,
    Written(PathBuf),
    /// No rasterizer installed
    Unavailable,
    /// Rasterizer present but conversion failed
    Failed(String),
}

impl RasterOutcome {
    pub fn is_written(&self) -> bool {
        matches!(self, RasterOutcome::Written(_))
    }
}

/// Attempt conversion with a discovered tool (see [`crate::find_rasterizer`]),
/// turning every failure into a logged warning
pub fn try_rasterize(
    tool: Option<(Rasterizer, PathBuf)>,
    svg_path: &Path,
    png_path: &Path,
) -> RasterOutcome {
    let Some((rasterizer, exe)) = tool else {
        log::warn!(
            "No SVG rasterizer found (tried {}). PNG export skipped.",
            Rasterizer::ALL
                .iter()
                .map(|r| r.binary())
                .collect::<Vec<_>>()
                .join(", ")
        );
        return RasterOutcome::Unavailable;
    };

    log::debug!("Rasterizing with {} ({})", rasterizer.binary(), exe.display());
    match rasterizer.convert(&exe, svg_path, png_path) {
        Ok(()) => {
            log::info!("Saved PNG version to {}", png_path.display());
            RasterOutcome::Written(png_path.to_path_buf())
        }
        Err(e) => {
            log::warn!("Failed to save PNG: {:#}", e);
            RasterOutcome::Failed(format!("{:#}", e))
        }
    }
}
