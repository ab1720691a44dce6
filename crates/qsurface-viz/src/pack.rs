//! Correction pack: every artifact of one decoding pass in one directory
//!
//! Given the lattice dump taken after error injection and the one taken
//! after decoding, writes into an [`OutputDir`]:
//! ```text
//! error_state.svg   lattice before correction (round-suffixed past round 0)
//! final_state.svg   lattice after correction
//! corrections.txt   diff report, with the logical-error verdict if known
//! syndrome.txt      triggered ancillas before correction
//! ```

use crate::diff::CorrectionDiff;
use crate::lattice::Lattice;
use crate::outputs::OutputDir;
use crate::raster::RasterOutcome;
use crate::render::{LatticeRenderer, RenderOutcome};
use crate::reports::{DiffReport, SyndromeReport};
use anyhow::Result;
use std::path::PathBuf;

pub const ERROR_STATE_STEM: &str = "error_state";
pub const FINAL_STATE_STEM: &str = "final_state";

/// What a pack run wrote
#[derive(Debug, Clone)]
pub struct PackResult {
    pub output_dir: PathBuf,
    pub error_state: RenderOutcome,
    pub final_state: RenderOutcome,
    pub diff: CorrectionDiff,
    /// Triggered ancillas listed in the syndrome report
    pub n_triggered: usize,
    pub logical_error: Option<bool>,
    /// Files generated, in write order
    pub files_generated: Vec<PathBuf>,
}

/// Renders and reports one round of a before/after lattice pair
pub struct CorrectionPack<'a> {
    renderer: &'a LatticeRenderer,
    output: OutputDir,
}

impl<'a> CorrectionPack<'a> {
    pub fn new(renderer: &'a LatticeRenderer, output: OutputDir) -> Self {
        Self { renderer, output }
    }

    pub fn run(&self, before: &Lattice, after: &Lattice, round: usize) -> Result<PackResult> {
        let pre = before.round(round)?;
        let post = after.round(round)?;
        log::info!(
            "Writing correction pack for round {} to {}",
            round,
            self.output.base_dir.display()
        );

        let mut files = Vec::new();

        let error_path = self.output.lattice_svg(ERROR_STATE_STEM);
        let error_state = self.renderer.render(pre, round, &error_path)?;
        let final_path = self.output.lattice_svg(FINAL_STATE_STEM);
        let final_state = self.renderer.render(post, round, &final_path)?;
        for outcome in [&error_state, &final_state] {
            if let RenderOutcome::Rendered { svg_path, raster, .. } = outcome {
                files.push(svg_path.clone());
                if let RasterOutcome::Written(png) = raster {
                    files.push(png.clone());
                }
            }
        }

        let diff = CorrectionDiff::classify(&pre.snapshot(), &post.snapshot());
        let logical_error = after.logical_error();
        let corrections = self.output.diff_report();
        DiffReport::new(&diff, round)
            .with_logical_error(logical_error)
            .write(&corrections)?;
        files.push(corrections);

        let syndrome = SyndromeReport::for_round(round, pre.syndrome());
        let syndrome_path = self.output.syndrome_report();
        syndrome.write(&syndrome_path)?;
        files.push(syndrome_path);

        if logical_error == Some(true) {
            log::warn!("Decoder left a logical error (round {})", round);
        }

        Ok(PackResult {
            output_dir: self.output.base_dir.clone(),
            error_state,
            final_state,
            diff,
            n_triggered: syndrome.len(),
            logical_error,
            files_generated: files,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::RenderConfig;
    use crate::lattice::{AncillaKind, AncillaSite, DataSite, ErrorState, Round};
    use std::fs;
    use tempfile::TempDir;

    fn round(state: ErrorState, triggered: bool) -> Round {
        Round::new(
            vec![
                DataSite::new(0.0, 0.0, state),
                DataSite::new(1.0, 1.0, ErrorState::default()),
            ],
            vec![AncillaSite::new(0.5, 0.5, AncillaKind::X, triggered)],
        )
    }

    #[test]
    fn test_pack_writes_every_artifact() {
        let temp = TempDir::new().unwrap();
        let output = OutputDir::new(&temp.path().join("pack")).unwrap();
        let renderer = LatticeRenderer::new(RenderConfig::default()).unwrap();

        let before = Lattice::new(vec![round(ErrorState::new(true, false), true)]);
        let after = Lattice::new(vec![round(ErrorState::default(), false)]).with_no_error(true);

        let result = CorrectionPack::new(&renderer, output).run(&before, &after, 0).unwrap();

        let dir = temp.path().join("pack");
        assert_eq!(result.output_dir, dir);
        assert_eq!(
            result.files_generated,
            vec![
                dir.join("error_state.svg"),
                dir.join("final_state.svg"),
                dir.join("corrections.txt"),
                dir.join("syndrome.txt"),
            ]
        );
        for file in &result.files_generated {
            assert!(file.exists(), "missing {}", file.display());
        }
        assert_eq!(result.diff.total(), 1);
        assert_eq!(result.n_triggered, 1);
        assert_eq!(result.logical_error, Some(false));

        let corrections = fs::read_to_string(dir.join("corrections.txt")).unwrap();
        assert!(corrections.starts_with("X-corrections\n(0, 0, 0)\n"));
        assert!(corrections.ends_with("Logical error occurred: false\n"));
        let syndrome = fs::read_to_string(dir.join("syndrome.txt")).unwrap();
        assert_eq!(syndrome, "X-type\n(0.5, 0.5, 0)\n\nZ-type\n(none)\n\n");
    }

    #[test]
    fn test_pack_round_out_of_range() {
        let temp = TempDir::new().unwrap();
        let output = OutputDir::new(temp.path()).unwrap();
        let renderer = LatticeRenderer::new(RenderConfig::default()).unwrap();
        let lattice = Lattice::new(vec![round(ErrorState::default(), false)]);

        let err = CorrectionPack::new(&renderer, output)
            .run(&lattice, &lattice, 3)
            .unwrap_err();
        assert!(err.to_string().contains("out of range"));
        assert!(fs::read_dir(temp.path()).unwrap().next().is_none());
    }
}
