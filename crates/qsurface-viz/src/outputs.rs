//! Artifact naming for per-round outputs
//!
//! Round 0 writes to the requested name as-is. Later rounds get the round
//! index inserted before the extension: `lattice.svg` at round 3 becomes
//! `lattice_3.svg`, and its raster copy `lattice_3.png`.

use anyhow::{Context, Result};
use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

pub const VECTOR_EXTENSION: &str = "svg";
pub const RASTER_EXTENSION: &str = "png";

/// Vector artifact path for `round_index`.
///
/// A base name without extension keeps its name at round 0 and gains
/// `.svg` for later rounds.
pub fn vector_artifact_path(base: &Path, round_index: usize) -> PathBuf {
    if round_index == 0 {
        return base.to_path_buf();
    }

    let stem = base.file_stem().map(OsString::from).unwrap_or_default();
    let ext = base
        .extension()
        .map(OsString::from)
        .unwrap_or_else(|| OsString::from(VECTOR_EXTENSION));

    let mut name = stem;
    name.push(format!("_{}.", round_index));
    name.push(ext);
    base.with_file_name(name)
}

/// Raster artifact path sharing the vector artifact's base and round suffix
pub fn raster_artifact_path(vector_path: &Path) -> PathBuf {
    vector_path.with_extension(RASTER_EXTENSION)
}

/// Both artifact paths of one round
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundArtifacts {
    pub vector: PathBuf,
    pub raster: PathBuf,
}

impl RoundArtifacts {
    pub fn new(base: &Path, round_index: usize) -> Self {
        let vector = vector_artifact_path(base, round_index);
        let raster = raster_artifact_path(&vector);
        Self { vector, raster }
    }
}

/// Output directory layout of a correction pack (`qsviz pack --out-dir`)
#[derive(Debug, Clone)]
pub struct OutputDir {
    pub base_dir: PathBuf,
}

impl OutputDir {
    /// Create the directory if needed
    pub fn new(base_dir: &Path) -> Result<Self> {
        fs::create_dir_all(base_dir)
            .with_context(|| format!("Failed to create directory: {}", base_dir.display()))?;
        Ok(Self {
            base_dir: base_dir.to_path_buf(),
        })
    }

    /// Base name for lattice diagrams; rounds are suffixed from it
    pub fn lattice_svg(&self, stem: &str) -> PathBuf {
        self.base_dir.join(format!("{}.{}", stem, VECTOR_EXTENSION))
    }

    pub fn diff_report(&self) -> PathBuf {
        self.base_dir.join("corrections.txt")
    }

    pub fn syndrome_report(&self) -> PathBuf {
        self.base_dir.join("syndrome.txt")
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_zero_is_unchanged() {
        assert_eq!(
            vector_artifact_path(Path::new("lattice.svg"), 0),
            PathBuf::from("lattice.svg")
        );
        assert_eq!(
            vector_artifact_path(Path::new("out/lattice"), 0),
            PathBuf::from("out/lattice")
        );
    }

    #[test]
    fn test_round_suffix_before_extension() {
        assert_eq!(
            vector_artifact_path(Path::new("lattice.svg"), 3),
            PathBuf::from("lattice_3.svg")
        );
        assert_eq!(
            vector_artifact_path(Path::new("runs/d5/final.svg"), 12),
            PathBuf::from("runs/d5/final_12.svg")
        );
    }

    #[test]
    fn test_missing_extension_assumes_svg() {
        assert_eq!(
            vector_artifact_path(Path::new("lattice"), 2),
            PathBuf::from("lattice_2.svg")
        );
    }

    #[test]
    fn test_dotted_directory_is_not_an_extension() {
        assert_eq!(
            vector_artifact_path(Path::new("out.v2/lattice"), 1),
            PathBuf::from("out.v2/lattice_1.svg")
        );
    }

    #[test]
    fn test_suffix_round_trip() {
        for k in 1..20usize {
            let named = vector_artifact_path(Path::new("state.svg"), k);
            let name = named.to_str().unwrap();
            let suffix = format!("_{}.svg", k);
            assert!(name.ends_with(&suffix));
            let restored = format!("{}.svg", &name[..name.len() - suffix.len()]);
            assert_eq!(restored, "state.svg");
        }
    }

    #[test]
    fn test_raster_shares_round_suffix() {
        let artifacts = RoundArtifacts::new(Path::new("final.svg"), 2);
        assert_eq!(artifacts.vector, PathBuf::from("final_2.svg"));
        assert_eq!(artifacts.raster, PathBuf::from("final_2.png"));

        let initial = RoundArtifacts::new(Path::new("initial_state.svg"), 0);
        assert_eq!(initial.raster, PathBuf::from("initial_state.png"));
    }

    #[test]
    fn test_output_dir_paths() {
        let temp = tempfile::TempDir::new().unwrap();
        let out = OutputDir::new(&temp.path().join("run")).unwrap();
        assert!(out.base_dir.is_dir());
        assert_eq!(
            out.lattice_svg("error_state"),
            temp.path().join("run").join("error_state.svg")
        );
        assert!(out.diff_report().ends_with("corrections.txt"));
    }
}
