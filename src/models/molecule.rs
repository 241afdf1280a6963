//! Molecule model module.
//!
//! Contains the atom list read from a geometry file, the label-keyed
//! position map, and the bond records produced by the analysis.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::geometry::Point;

/// A single atom: its label and Cartesian position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Atom {
    pub symbol: String,
    pub position: Point,
}

impl Atom {
    pub fn new(symbol: impl Into<String>, position: Point) -> Self {
        Self {
            symbol: symbol.into(),
            position,
        }
    }
}

/// Atoms in file order plus the header comment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Molecule {
    pub comment: String,
    pub atoms: Vec<Atom>,
}

/// Label-keyed positions in first-insertion order.
pub type SymbolPositions = IndexMap<String, Point>;

impl Molecule {
    pub const fn new(comment: String, atoms: Vec<Atom>) -> Self {
        Self { comment, atoms }
    }

    pub fn len(&self) -> usize {
        self.atoms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.atoms.is_empty()
    }

    /// Atom labels in file order.
    pub fn symbols(&self) -> impl Iterator<Item = &str> {
        self.atoms.iter().map(|atom| atom.symbol.as_str())
    }

    /// Atom positions in file order.
    pub fn positions(&self) -> impl Iterator<Item = &Point> {
        self.atoms.iter().map(|atom| &atom.position)
    }

    /// Builds the label-keyed map.
    ///
    /// A repeated label keeps its first slot but takes the later position.
    pub fn to_symbol_positions(&self) -> SymbolPositions {
        let positions: SymbolPositions = self
            .atoms
            .iter()
            .map(|atom| (atom.symbol.clone(), atom.position))
            .collect();

        if positions.len() < self.atoms.len() {
            tracing::warn!(
                atoms = self.atoms.len(),
                unique_labels = positions.len(),
                "Repeated atom labels collapsed in symbol map"
            );
        }

        positions
    }
}

/// One end of a bond.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BondEnd {
    pub index: usize,
    pub symbol: String,
}

/// A pair of atoms whose distance falls inside the bond window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bond {
    pub first: BondEnd,
    pub second: BondEnd,
    pub length: f64,
}

impl Bond {
    pub fn new(first: (usize, &str), second: (usize, &str), length: f64) -> Self {
        Self {
            first: BondEnd {
                index: first.0,
                symbol: first.1.to_string(),
            },
            second: BondEnd {
                index: second.0,
                symbol: second.1.to_string(),
            },
            length,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn water() -> Molecule {
        Molecule::new(
            "water".to_string(),
            vec![
                Atom::new("O", [0.0, 0.0, 0.1173]),
                Atom::new("H", [0.0, 0.7572, -0.4692]),
                Atom::new("H", [0.0, -0.7572, -0.4692]),
            ],
        )
    }

    #[test]
    fn test_molecule_len() {
        let molecule = water();
        assert_eq!(molecule.len(), 3);
        assert!(!molecule.is_empty());
        assert!(Molecule::default().is_empty());
    }

    #[test]
    fn test_symbols_in_file_order() {
        let molecule = water();
        let symbols: Vec<&str> = molecule.symbols().collect();
        assert_eq!(symbols, vec!["O", "H", "H"]);
    }

    #[test]
    fn test_positions_in_file_order() {
        let molecule = water();
        let positions: Vec<&Point> = molecule.positions().collect();
        assert_eq!(positions[1], &[0.0, 0.7572, -0.4692]);
    }

    // ============ to_symbol_positions 테스트 ============

    #[test]
    fn test_symbol_positions_unique_labels() {
        let molecule = Molecule::new(
            String::new(),
            vec![
                Atom::new("O1", [0.0, 0.0, 0.0]),
                Atom::new("H1", [1.0, 0.0, 0.0]),
                Atom::new("H2", [0.0, 1.0, 0.0]),
            ],
        );
        let map = molecule.to_symbol_positions();
        let keys: Vec<&String> = map.keys().collect();
        assert_eq!(keys, vec!["O1", "H1", "H2"]);
    }

    #[test]
    fn test_symbol_positions_repeated_label_keeps_slot_takes_last_value() {
        let map = water().to_symbol_positions();
        assert_eq!(map.len(), 2);
        assert_eq!(map.get_index_of("O"), Some(0));
        assert_eq!(map.get_index_of("H"), Some(1));
        assert_eq!(map["H"], [0.0, -0.7572, -0.4692]);
    }

    #[test]
    fn test_bond_new() {
        let bond = Bond::new((0, "O"), (2, "H"), 0.96);
        assert_eq!(bond.first.index, 0);
        assert_eq!(bond.second.symbol, "H");
        assert!((bond.length - 0.96).abs() < f64::EPSILON);
    }
}
