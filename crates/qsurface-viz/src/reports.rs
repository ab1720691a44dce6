//! Plain-text correction and syndrome reports
//!
//! Every listed site is written as `(x, y, round)`, one per line, under a
//! fixed section header. Empty sections print `(none)`.

use crate::diff::CorrectionDiff;
use crate::lattice::{Coord, Lattice, Syndrome};
use anyhow::{Context, Result};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;

pub const X_CORRECTIONS: &str = "X-corrections";
pub const Z_CORRECTIONS: &str = "Z-corrections";
pub const BOTH_CORRECTIONS: &str = "Both X & Z corrections";
pub const X_TYPE: &str = "X-type";
pub const Z_TYPE: &str = "Z-type";

const NONE_MARKER: &str = "(none)";

fn push_section<'a, I>(out: &mut String, title: &str, entries: I)
where
    I: IntoIterator<Item = (&'a Coord, usize)>,
{
    out.push_str(title);
    out.push('\n');
    let mut empty = true;
    for (coord, round) in entries {
        out.push_str(&coord.with_round(round));
        out.push('\n');
        empty = false;
    }
    if empty {
        out.push_str(NONE_MARKER);
        out.push('\n');
    }
    out.push('\n');
}

fn tag<'a>(
    coords: &'a BTreeSet<Coord>,
    round: usize,
) -> impl Iterator<Item = (&'a Coord, usize)> + 'a {
    coords.iter().map(move |c| (c, round))
}

/// Where a decoder applied corrections in one round
#[derive(Debug, Clone)]
pub struct DiffReport<'a> {
    pub diff: &'a CorrectionDiff,
    pub round: usize,
    /// Decoder verdict; printed after the total when known
    pub logical_error: Option<bool>,
}

impl<'a> DiffReport<'a> {
    pub fn new(diff: &'a CorrectionDiff, round: usize) -> Self {
        Self {
            diff,
            round,
            logical_error: None,
        }
    }

    pub fn with_logical_error(mut self, logical_error: Option<bool>) -> Self {
        self.logical_error = logical_error;
        self
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        push_section(&mut out, X_CORRECTIONS, tag(&self.diff.x_only, self.round));
        push_section(&mut out, Z_CORRECTIONS, tag(&self.diff.z_only, self.round));
        push_section(&mut out, BOTH_CORRECTIONS, tag(&self.diff.both, self.round));
        out.push_str(&format!("Total qubits corrected: {}\n", self.diff.total()));
        if let Some(logical_error) = self.logical_error {
            out.push_str(&format!("Logical error occurred: {}\n", logical_error));
        }
        out
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())
            .with_context(|| format!("Failed to write diff report: {}", path.display()))?;
        log::info!(
            "Wrote correction report ({} sites) to {}",
            self.diff.total(),
            path.display()
        );
        Ok(())
    }
}

/// Triggered ancillas, possibly across several rounds
#[derive(Debug, Clone, Default)]
pub struct SyndromeReport {
    rounds: Vec<(usize, Syndrome)>,
}

impl SyndromeReport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Report for a single round
    pub fn for_round(round: usize, syndrome: Syndrome) -> Self {
        let mut report = Self::new();
        report.add_round(round, syndrome);
        report
    }

    /// Report covering every round of a lattice
    pub fn for_lattice(lattice: &Lattice) -> Self {
        let mut report = Self::new();
        for (index, round) in lattice.rounds.iter().enumerate() {
            report.add_round(index, round.syndrome());
        }
        report
    }

    pub fn add_round(&mut self, round: usize, syndrome: Syndrome) {
        self.rounds.push((round, syndrome));
    }

    /// Number of triggered ancillas listed
    pub fn len(&self) -> usize {
        self.rounds.iter().map(|(_, s)| s.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn render(&self) -> String {
        let mut out = String::new();
        push_section(
            &mut out,
            X_TYPE,
            self.rounds
                .iter()
                .flat_map(|(r, s)| s.x_type.iter().map(move |c| (c, *r))),
        );
        push_section(
            &mut out,
            Z_TYPE,
            self.rounds
                .iter()
                .flat_map(|(r, s)| s.z_type.iter().map(move |c| (c, *r))),
        );
        out
    }

    pub fn write(&self, path: &Path) -> Result<()> {
        fs::write(path, self.render())
            .with_context(|| format!("Failed to write syndrome report: {}", path.display()))?;
        log::info!(
            "Wrote syndrome report ({} triggered ancillas) to {}",
            self.len(),
            path.display()
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::{ErrorState, Snapshot};

    #[test]
    fn test_diff_report_sections_in_order() {
        let before: Snapshot = [
            (Coord::new(0.0, 0.0), ErrorState::new(false, false)),
            (Coord::new(1.0, 2.0), ErrorState::new(true, true)),
            (Coord::new(3.0, 1.0), ErrorState::new(false, true)),
        ]
        .into_iter()
        .collect();
        let after: Snapshot = [
            (Coord::new(0.0, 0.0), ErrorState::new(true, false)),
            (Coord::new(1.0, 2.0), ErrorState::new(false, false)),
            (Coord::new(3.0, 1.0), ErrorState::new(false, true)),
        ]
        .into_iter()
        .collect();
        let diff = CorrectionDiff::classify(&before, &after);
        let text = DiffReport::new(&diff, 4).render();

        assert_eq!(
            text,
            "X-corrections\n(0, 0, 4)\n\n\
             Z-corrections\n(none)\n\n\
             Both X & Z corrections\n(1, 2, 4)\n\n\
             Total qubits corrected: 2\n"
        );
    }

    #[test]
    fn test_diff_report_logical_error_line() {
        let diff = CorrectionDiff::default();
        let text = DiffReport::new(&diff, 0)
            .with_logical_error(Some(true))
            .render();
        assert!(text.ends_with("Total qubits corrected: 0\nLogical error occurred: true\n"));

        let unknown = DiffReport::new(&diff, 0).with_logical_error(None).render();
        assert!(!unknown.contains("Logical error"));
    }

    #[test]
    fn test_syndrome_report_multi_round() {
        let mut report = SyndromeReport::new();
        report.add_round(
            0,
            Syndrome {
                x_type: vec![Coord::new(0.5, 0.5)],
                z_type: vec![],
            },
        );
        report.add_round(
            1,
            Syndrome {
                x_type: vec![Coord::new(1.5, 0.5)],
                z_type: vec![Coord::new(0.5, 1.5)],
            },
        );
        assert_eq!(report.len(), 3);
        assert_eq!(
            report.render(),
            "X-type\n(0.5, 0.5, 0)\n(1.5, 0.5, 1)\n\nZ-type\n(0.5, 1.5, 1)\n\n"
        );
    }

    #[test]
    fn test_empty_syndrome_report() {
        let report = SyndromeReport::for_round(2, Syndrome::default());
        assert!(report.is_empty());
        assert_eq!(report.render(), "X-type\n(none)\n\nZ-type\n(none)\n\n");
    }
}
