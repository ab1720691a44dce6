//! Correction diff between pre- and post-decoding snapshots
//!
//! Each data site is bucketed by which error channels changed across the
//! correction pass. Only *whether* a channel flipped matters, not in which
//! direction.

use crate::lattice::{Coord, Snapshot};
use std::collections::BTreeSet;

/// Which channels of a site changed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChangeKind {
    XOnly,
    ZOnly,
    Both,
}

/// Disjoint partition of corrected sites, each bucket in coordinate order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CorrectionDiff {
    pub x_only: BTreeSet<Coord>,
    pub z_only: BTreeSet<Coord>,
    pub both: BTreeSet<Coord>,
}

impl CorrectionDiff {
    /// Compare two snapshots of the same round.
    ///
    /// Walks the coordinates of `before`; both snapshots are expected to
    /// hold the same key set. A coordinate missing from `after` is skipped
    /// with a warning.
    pub fn classify(before: &Snapshot, after: &Snapshot) -> Self {
        let mut diff = CorrectionDiff::default();
        for (coord, prev) in before.iter() {
            let Some(next) = after.get(coord) else {
                log::warn!("Site {} missing from post-correction snapshot", coord);
                continue;
            };
            let change = match (prev.x != next.x, prev.z != next.z) {
                (true, true) => ChangeKind::Both,
                (true, false) => ChangeKind::XOnly,
                (false, true) => ChangeKind::ZOnly,
                (false, false) => continue,
            };
            diff.insert(*coord, change);
        }
        diff
    }

    fn insert(&mut self, coord: Coord, change: ChangeKind) {
        match change {
            ChangeKind::XOnly => self.x_only.insert(coord),
            ChangeKind::ZOnly => self.z_only.insert(coord),
            ChangeKind::Both => self.both.insert(coord),
        };
    }

    /// Bucket a coordinate landed in, if any
    pub fn change_at(&self, coord: &Coord) -> Option<ChangeKind> {
        if self.both.contains(coord) {
            Some(ChangeKind::Both)
        } else if self.x_only.contains(coord) {
            Some(ChangeKind::XOnly)
        } else if self.z_only.contains(coord) {
            Some(ChangeKind::ZOnly)
        } else {
            None
        }
    }

    /// Number of corrected sites
    pub fn total(&self) -> usize {
        self.x_only.len() + self.z_only.len() + self.both.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::lattice::ErrorState;

    fn snap(entries: &[((f64, f64), (bool, bool))]) -> Snapshot {
        entries
            .iter()
            .map(|&(c, (x, z))| (Coord::from(c), ErrorState::new(x, z)))
            .collect()
    }

    #[test]
    fn test_single_x_flip() {
        let before = snap(&[((0.0, 0.0), (false, false))]);
        let after = snap(&[((0.0, 0.0), (true, false))]);
        let diff = CorrectionDiff::classify(&before, &after);
        assert_eq!(diff.x_only.iter().copied().collect::<Vec<_>>(), vec![Coord::new(0.0, 0.0)]);
        assert!(diff.z_only.is_empty());
        assert!(diff.both.is_empty());
    }

    #[test]
    fn test_direction_does_not_matter() {
        let before = snap(&[((0.0, 0.0), (true, true)), ((1.0, 0.0), (false, true))]);
        let after = snap(&[((0.0, 0.0), (false, false)), ((1.0, 0.0), (false, false))]);
        let diff = CorrectionDiff::classify(&before, &after);
        assert_eq!(diff.change_at(&Coord::new(0.0, 0.0)), Some(ChangeKind::Both));
        assert_eq!(diff.change_at(&Coord::new(1.0, 0.0)), Some(ChangeKind::ZOnly));
        assert_eq!(diff.total(), 2);
    }

    #[test]
    fn test_unchanged_sites_unclassified() {
        let state = snap(&[((0.0, 0.0), (true, false)), ((2.0, 1.0), (false, true))]);
        let diff = CorrectionDiff::classify(&state, &state.clone());
        assert!(diff.is_empty());
        assert_eq!(diff.change_at(&Coord::new(0.0, 0.0)), None);
    }

    #[test]
    fn test_negative_zero_matches_positive_zero() {
        let mut before = Snapshot::new();
        before.insert(Coord { x: -0.0, y: 0.0 }, ErrorState::new(false, false));
        let after = snap(&[((0.0, 0.0), (true, false))]);
        let diff = CorrectionDiff::classify(&before, &after);
        assert_eq!(diff.change_at(&Coord::new(0.0, 0.0)), Some(ChangeKind::XOnly));
        assert_eq!(diff.total(), 1);
        let listed = diff.x_only.iter().next().unwrap();
        assert_eq!(listed.with_round(0), "(0, 0, 0)");
    }

    #[test]
    fn test_buckets_sorted() {
        let before = snap(&[
            ((2.0, 0.0), (false, false)),
            ((0.0, 3.0), (false, false)),
            ((0.0, 1.0), (false, false)),
        ]);
        let after = snap(&[
            ((2.0, 0.0), (true, false)),
            ((0.0, 3.0), (true, false)),
            ((0.0, 1.0), (true, false)),
        ]);
        let diff = CorrectionDiff::classify(&before, &after);
        assert_eq!(
            diff.x_only.into_iter().collect::<Vec<_>>(),
            vec![
                Coord::new(0.0, 1.0),
                Coord::new(0.0, 3.0),
                Coord::new(2.0, 0.0)
            ]
        );
    }
}
