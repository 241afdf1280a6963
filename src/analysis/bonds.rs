//! Bond search over atom pairs.

use crate::analysis::pairs::{index_pairs, IndexPairs, PairStrategy};
use crate::cache::{CacheBackend, CacheStats, FunctionId, Memoized};
use crate::error::AppResult;
use crate::geometry::{bond_check, calculate_distance, BondRange, Point};
use crate::models::{Bond, Molecule, SymbolPositions};

/// Cache identity of the distance function. Bump the version whenever
/// `calculate_distance` changes so stale results are not served.
pub const DISTANCE_FN_NAME: &str = "calculate_distance";
pub const DISTANCE_FN_VERSION: u32 = 1;

/// Finds bonded pairs among the atoms of `molecule`, in file order.
pub fn find_bonds<D>(
    molecule: &Molecule,
    range: &BondRange,
    strategy: PairStrategy,
    distance: &mut D,
) -> AppResult<Vec<Bond>>
where
    D: FnMut(&Point, &Point) -> AppResult<f64>,
{
    let atoms = &molecule.atoms;
    let mut bonds = Vec::new();

    for (i, j) in index_pairs(atoms.len(), strategy) {
        let length = distance(&atoms[i].position, &atoms[j].position)?;
        if bond_check(length, range) {
            bonds.push(Bond::new(
                (i, atoms[i].symbol.as_str()),
                (j, atoms[j].symbol.as_str()),
                length,
            ));
        }
    }

    Ok(bonds)
}

/// Label-keyed variant: combinations of the map's labels in insertion order.
pub fn find_bonds_by_symbol<D>(
    positions: &SymbolPositions,
    range: &BondRange,
    distance: &mut D,
) -> AppResult<Vec<Bond>>
where
    D: FnMut(&Point, &Point) -> AppResult<f64>,
{
    let mut bonds = Vec::new();

    for (i, j) in IndexPairs::new(positions.len()) {
        let (Some((sym1, p1)), Some((sym2, p2))) =
            (positions.get_index(i), positions.get_index(j))
        else {
            continue;
        };
        let length = distance(p1, p2)?;
        if bond_check(length, range) {
            bonds.push(Bond::new((i, sym1.as_str()), (j, sym2.as_str()), length));
        }
    }

    Ok(bonds)
}

/// Bond finder whose distance calls go through a memoization cache.
pub struct Analyzer<B: CacheBackend> {
    range: BondRange,
    distance: Memoized<B>,
}

impl<B: CacheBackend> Analyzer<B> {
    pub fn new(range: BondRange, backend: B, ttl_secs: u64) -> Self {
        let function = FunctionId::new(DISTANCE_FN_NAME, DISTANCE_FN_VERSION);
        Self {
            range,
            distance: Memoized::new(function, backend).with_ttl(ttl_secs),
        }
    }

    pub const fn range(&self) -> &BondRange {
        &self.range
    }

    pub const fn cache_stats(&self) -> CacheStats {
        self.distance.stats()
    }

    pub fn backend_mut(&mut self) -> &mut B {
        self.distance.backend_mut()
    }

    /// Memoized Euclidean distance.
    pub fn distance(&mut self, a: &Point, b: &Point) -> AppResult<f64> {
        self.distance.call(&(a, b), |(a, b)| calculate_distance(a, b))
    }

    pub fn run(&mut self, molecule: &Molecule, strategy: PairStrategy) -> AppResult<Vec<Bond>> {
        let range = self.range;
        let bonds = find_bonds(molecule, &range, strategy, &mut |a: &Point, b: &Point| {
            self.distance(a, b)
        })?;

        tracing::debug!(
            strategy = strategy.name(),
            atoms = molecule.len(),
            bonds = bonds.len(),
            "Bond search finished"
        );
        Ok(bonds)
    }

    pub fn run_by_symbol(&mut self, positions: &SymbolPositions) -> AppResult<Vec<Bond>> {
        let range = self.range;
        let bonds = find_bonds_by_symbol(positions, &range, &mut |a: &Point, b: &Point| {
            self.distance(a, b)
        })?;

        tracing::debug!(
            labels = positions.len(),
            bonds = bonds.len(),
            "Label-keyed bond search finished"
        );
        Ok(bonds)
    }
}
