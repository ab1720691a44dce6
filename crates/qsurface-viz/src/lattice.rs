//! Lattice data model consumed from the simulation engine
//!
//! The engine owns the lattice; this crate only reads per-round copies of
//! it. A `Lattice` is a sequence of `Round`s (layers), each holding the data
//! sites and ancilla sites of one time-slice. Adjacency is never stored here,
//! it is derived from coordinates at render time (see `geometry`).

use crate::error::VizError;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::Path;

/// 2-D lattice coordinate.
///
/// Data sites sit on integer coordinates and ancillas on half-integers in
/// the rotated layout. Ordering is lexicographic on `(x, y)` using IEEE
/// total ordering, which makes coordinates usable as `BTreeMap` keys.
/// `-0.0` and `0.0` are the same site: both compare equal and print as `0`.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(from = "RawCoord")]
pub struct Coord {
    pub x: f64,
    pub y: f64,
}

#[derive(Deserialize)]
struct RawCoord {
    x: f64,
    y: f64,
}

impl From<RawCoord> for Coord {
    fn from(raw: RawCoord) -> Self {
        Coord::new(raw.x, raw.y)
    }
}

/// Fold `-0.0` into `0.0`; every other value is unchanged
fn unsigned_zero(v: f64) -> f64 {
    v + 0.0
}

impl Coord {
    pub fn new(x: f64, y: f64) -> Self {
        Self {
            x: unsigned_zero(x),
            y: unsigned_zero(y),
        }
    }

    /// Squared Euclidean distance to another coordinate
    pub fn distance_sq(&self, other: &Coord) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Report form `(x, y, round)`
    pub fn with_round(&self, round: usize) -> String {
        format!(
            "({}, {}, {})",
            unsigned_zero(self.x),
            unsigned_zero(self.y),
            round
        )
    }
}

impl PartialEq for Coord {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Coord {}

impl PartialOrd for Coord {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for Coord {
    fn cmp(&self, other: &Self) -> Ordering {
        unsigned_zero(self.x)
            .total_cmp(&unsigned_zero(other.x))
            .then_with(|| unsigned_zero(self.y).total_cmp(&unsigned_zero(other.y)))
    }
}

impl From<(f64, f64)> for Coord {
    fn from((x, y): (f64, f64)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Coord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", unsigned_zero(self.x), unsigned_zero(self.y))
    }
}

/// Pauli error channels present on a data site
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ErrorState {
    /// Bit-flip channel
    #[serde(default)]
    pub x: bool,
    /// Phase-flip channel
    #[serde(default)]
    pub z: bool,
}

impl ErrorState {
    pub const fn new(x: bool, z: bool) -> Self {
        Self { x, z }
    }

    /// Marker label: `Y` when both channels are set
    pub fn label(&self) -> Option<&'static str> {
        match (self.x, self.z) {
            (true, true) => Some("Y"),
            (true, false) => Some("X"),
            (false, true) => Some("Z"),
            (false, false) => None,
        }
    }

    /// Same state with the two channels exchanged
    pub fn swapped(&self) -> Self {
        Self {
            x: self.z,
            z: self.x,
        }
    }
}

/// Stabilizer type measured by an ancilla
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AncillaKind {
    /// Detects bit-flip (`x`) errors on adjacent data sites
    X,
    /// Detects phase-flip (`z`) errors on adjacent data sites
    Z,
}

impl AncillaKind {
    pub fn label(&self) -> &'static str {
        match self {
            AncillaKind::X => "X",
            AncillaKind::Z => "Z",
        }
    }

    /// Whether this ancilla kind detects the given channel of `state`
    pub fn detects(&self, state: &ErrorState) -> bool {
        match self {
            AncillaKind::X => state.x,
            AncillaKind::Z => state.z,
        }
    }
}

impl fmt::Display for AncillaKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DataSite {
    #[serde(flatten)]
    pub coord: Coord,
    #[serde(default)]
    pub state: ErrorState,
}

impl DataSite {
    pub fn new(x: f64, y: f64, state: ErrorState) -> Self {
        Self {
            coord: Coord::new(x, y),
            state,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AncillaSite {
    #[serde(flatten)]
    pub coord: Coord,
    pub kind: AncillaKind,
    /// Triggered in the current measurement
    #[serde(default)]
    pub syndrome: bool,
}

impl AncillaSite {
    pub fn new(x: f64, y: f64, kind: AncillaKind, syndrome: bool) -> Self {
        Self {
            coord: Coord::new(x, y),
            kind,
            syndrome,
        }
    }
}

/// One time-slice of the lattice
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Round {
    #[serde(default)]
    pub data_qubits: Vec<DataSite>,
    #[serde(default)]
    pub ancilla_qubits: Vec<AncillaSite>,
}

impl Round {
    pub fn new(data_qubits: Vec<DataSite>, ancilla_qubits: Vec<AncillaSite>) -> Self {
        Self {
            data_qubits,
            ancilla_qubits,
        }
    }

    /// No data sites: nothing to draw
    pub fn is_empty(&self) -> bool {
        self.data_qubits.is_empty()
    }

    /// All site coordinates, data first
    pub fn coords(&self) -> impl Iterator<Item = Coord> + '_ {
        self.data_qubits
            .iter()
            .map(|d| d.coord)
            .chain(self.ancilla_qubits.iter().map(|a| a.coord))
    }

    /// Capture the data-site error state of this round
    pub fn snapshot(&self) -> Snapshot {
        self.data_qubits
            .iter()
            .map(|d| (d.coord, d.state))
            .collect()
    }

    /// Triggered ancillas, split by kind and sorted by coordinate
    pub fn syndrome(&self) -> Syndrome {
        let mut syndrome = Syndrome::default();
        for ancilla in self.ancilla_qubits.iter().filter(|a| a.syndrome) {
            match ancilla.kind {
                AncillaKind::X => syndrome.x_type.push(ancilla.coord),
                AncillaKind::Z => syndrome.z_type.push(ancilla.coord),
            }
        }
        syndrome.x_type.sort();
        syndrome.z_type.sort();
        syndrome
    }
}

/// Sequence of rounds; round 0 is the initial layer
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Lattice {
    #[serde(default)]
    pub rounds: Vec<Round>,
    /// Engine verdict after decoding: `true` when no logical error remains.
    /// Absent from dumps taken before the decoder ran.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub no_error: Option<bool>,
}

impl Lattice {
    pub fn new(rounds: Vec<Round>) -> Self {
        Self {
            rounds,
            no_error: None,
        }
    }

    pub fn with_no_error(mut self, no_error: bool) -> Self {
        self.no_error = Some(no_error);
        self
    }

    /// Whether the decoder left a logical error, if the dump says
    pub fn logical_error(&self) -> Option<bool> {
        self.no_error.map(|ok| !ok)
    }

    pub fn round(&self, index: usize) -> Result<&Round, VizError> {
        self.rounds.get(index).ok_or(VizError::RoundOutOfRange {
            requested: index,
            available: self.rounds.len(),
        })
    }

    pub fn from_json(json: &str) -> Result<Self, VizError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Load a lattice dump written by the simulation driver
    pub fn load(path: &Path) -> Result<Self> {
        let json = fs::read_to_string(path)
            .with_context(|| format!("Failed to read lattice file: {}", path.display()))?;
        let lattice = Self::from_json(&json)
            .with_context(|| format!("Failed to parse lattice file: {}", path.display()))?;
        Ok(lattice)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json)
            .with_context(|| format!("Failed to write lattice file: {}", path.display()))?;
        Ok(())
    }
}

/// Error state of every data site at one instant.
///
/// Keyed by coordinate so iteration is always in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Snapshot {
    states: BTreeMap<Coord, ErrorState>,
}

impl Snapshot {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, coord: Coord, state: ErrorState) {
        self.states.insert(coord, state);
    }

    pub fn get(&self, coord: &Coord) -> Option<&ErrorState> {
        self.states.get(coord)
    }

    pub fn len(&self) -> usize {
        self.states.len()
    }

    pub fn is_empty(&self) -> bool {
        self.states.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&Coord, &ErrorState)> {
        self.states.iter()
    }

    /// Snapshot with `x` and `z` exchanged on every site
    pub fn swapped(&self) -> Self {
        self.states
            .iter()
            .map(|(coord, state)| (*coord, state.swapped()))
            .collect()
    }
}

impl FromIterator<(Coord, ErrorState)> for Snapshot {
    fn from_iter<I: IntoIterator<Item = (Coord, ErrorState)>>(iter: I) -> Self {
        Self {
            states: iter.into_iter().collect(),
        }
    }
}

/// Ordered lists of triggered ancilla sites in one round
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Syndrome {
    pub x_type: Vec<Coord>,
    pub z_type: Vec<Coord>,
}

impl Syndrome {
    pub fn is_empty(&self) -> bool {
        self.x_type.is_empty() && self.z_type.is_empty()
    }

    pub fn len(&self) -> usize {
        self.x_type.len() + self.z_type.len()
    }
}
