//! Syndrome extraction and report output

use qsurface_viz::{
    AncillaKind, AncillaSite, Coord, DataSite, ErrorState, Lattice, Round, SyndromeReport,
};
use std::fs;
use tempfile::TempDir;

fn round_with_triggers(triggers: &[(f64, f64, AncillaKind)]) -> Round {
    let mut ancillas = vec![
        AncillaSite::new(0.5, 0.5, AncillaKind::X, false),
        AncillaSite::new(0.5, 1.5, AncillaKind::Z, false),
        AncillaSite::new(1.5, 0.5, AncillaKind::Z, false),
        AncillaSite::new(1.5, 1.5, AncillaKind::X, false),
    ];
    for a in ancillas.iter_mut() {
        a.syndrome = triggers
            .iter()
            .any(|&(x, y, k)| a.coord == Coord::new(x, y) && a.kind == k);
    }
    Round::new(vec![DataSite::new(1.0, 1.0, ErrorState::new(true, true))], ancillas)
}

#[test]
fn test_lattice_syndrome_report() {
    let lattice = Lattice::new(vec![
        round_with_triggers(&[]),
        round_with_triggers(&[(1.5, 1.5, AncillaKind::X), (0.5, 0.5, AncillaKind::X)]),
        round_with_triggers(&[(1.5, 0.5, AncillaKind::Z)]),
    ]);

    let report = SyndromeReport::for_lattice(&lattice);
    assert_eq!(report.len(), 3);

    let temp = TempDir::new().unwrap();
    let path = temp.path().join("syndrome.txt");
    report.write(&path).unwrap();

    let text = fs::read_to_string(&path).unwrap();
    assert_eq!(
        text,
        "X-type\n(0.5, 0.5, 1)\n(1.5, 1.5, 1)\n\nZ-type\n(1.5, 0.5, 2)\n\n"
    );
}
