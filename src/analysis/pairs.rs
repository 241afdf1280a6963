//! Unordered index-pair enumeration.

use std::iter::FusedIterator;

use serde::{Deserialize, Serialize};

/// How atom pairs are enumerated. Every strategy yields `(i, j)` with
/// `i < j` in the same lexicographic order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PairStrategy {
    /// Two nested index loops, keeping `i < j`.
    NestedLoops,
    /// Lazily filtered iterator over the full `n x n` product.
    Lazy,
    /// Direct 2-combinations of the indices.
    #[default]
    Combinations,
}

impl PairStrategy {
    pub const ALL: [Self; 3] = [Self::NestedLoops, Self::Lazy, Self::Combinations];

    /// Section heading printed when several strategies run together.
    pub const fn heading(self) -> &'static str {
        match self {
            Self::NestedLoops => "nested for-loops: ",
            Self::Lazy => "generator expression: ",
            Self::Combinations => "itertools combinations",
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            Self::NestedLoops => "nested",
            Self::Lazy => "lazy",
            Self::Combinations => "combinations",
        }
    }
}

/// Iterator over every 2-combination of `0..n`.
#[derive(Debug, Clone)]
pub struct IndexPairs {
    n: usize,
    i: usize,
    j: usize,
}

impl IndexPairs {
    pub const fn new(n: usize) -> Self {
        Self { n, i: 0, j: 1 }
    }

    const fn remaining(&self) -> usize {
        if self.n < 2 || self.i >= self.n - 1 {
            return 0;
        }
        let rows_left = self.n - 1 - self.i;
        (self.n - self.j) + rows_left * (rows_left - 1) / 2
    }
}

impl Iterator for IndexPairs {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        if self.n < 2 || self.i >= self.n - 1 {
            return None;
        }
        let pair = (self.i, self.j);
        self.j += 1;
        if self.j == self.n {
            self.i += 1;
            self.j = self.i + 1;
        }
        Some(pair)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.remaining();
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for IndexPairs {}

impl FusedIterator for IndexPairs {}

/// Number of unordered pairs among `n` items.
pub const fn pair_count(n: usize) -> usize {
    n.saturating_sub(1) * n / 2
}

/// Two nested loops over `0..n` keeping `i < j`, resumed one pair at a time.
#[derive(Debug, Clone)]
pub struct NestedLoopPairs {
    n: usize,
    i: usize,
    j: usize,
}

impl Iterator for NestedLoopPairs {
    type Item = (usize, usize);

    fn next(&mut self) -> Option<Self::Item> {
        while self.i < self.n {
            while self.j < self.n {
                let j = self.j;
                self.j += 1;
                if self.i < j {
                    return Some((self.i, j));
                }
            }
            self.i += 1;
            self.j = 0;
        }
        None
    }
}

impl FusedIterator for NestedLoopPairs {}

pub const fn nested_loop_pairs(n: usize) -> NestedLoopPairs {
    NestedLoopPairs { n, i: 0, j: 0 }
}

/// Pairs produced on demand from the full product; nothing is materialized.
pub fn lazy_pairs(n: usize) -> impl Iterator<Item = (usize, usize)> {
    (0..n)
        .flat_map(move |i| (0..n).map(move |j| (i, j)))
        .filter(|(i, j)| i < j)
}

/// Enumerates the index pairs of `n` atoms with the chosen strategy.
pub fn index_pairs(n: usize, strategy: PairStrategy) -> Box<dyn Iterator<Item = (usize, usize)>> {
    match strategy {
        PairStrategy::NestedLoops => Box::new(nested_loop_pairs(n)),
        PairStrategy::Lazy => Box::new(lazy_pairs(n)),
        PairStrategy::Combinations => Box::new(IndexPairs::new(n)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_pairs_four() {
        let pairs: Vec<_> = IndexPairs::new(4).collect();
        assert_eq!(
            pairs,
            vec![(0, 1), (0, 2), (0, 3), (1, 2), (1, 3), (2, 3)]
        );
    }

    #[test]
    fn test_index_pairs_degenerate() {
        assert_eq!(IndexPairs::new(0).count(), 0);
        assert_eq!(IndexPairs::new(1).count(), 0);
        assert_eq!(IndexPairs::new(2).collect::<Vec<_>>(), vec![(0, 1)]);
    }

    #[test]
    fn test_index_pairs_exact_size() {
        let mut pairs = IndexPairs::new(5);
        assert_eq!(pairs.len(), 10);
        pairs.next();
        pairs.next();
        assert_eq!(pairs.len(), 8);
        pairs.by_ref().for_each(drop);
        assert_eq!(pairs.len(), 0);
        assert!(pairs.next().is_none());
    }

    #[test]
    fn test_pair_count() {
        assert_eq!(pair_count(0), 0);
        assert_eq!(pair_count(1), 0);
        assert_eq!(pair_count(2), 1);
        assert_eq!(pair_count(10), 45);
    }

    #[test]
    fn test_strategies_agree() {
        for n in [0, 1, 2, 3, 7, 12] {
            let expected: Vec<_> = IndexPairs::new(n).collect();
            for strategy in PairStrategy::ALL {
                let pairs: Vec<_> = index_pairs(n, strategy).collect();
                assert_eq!(pairs, expected, "{strategy:?} differs for n = {n}");
            }
        }
    }

    #[test]
    fn test_lazy_pairs_is_lazy() {
        // Taking a prefix of a huge product must not enumerate all of it
        let first: Vec<_> = lazy_pairs(1_000_000).take(2).collect();
        assert_eq!(first, vec![(0, 1), (0, 2)]);
    }

    #[test]
    fn test_nested_loop_pairs_is_lazy() {
        let first: Vec<_> = nested_loop_pairs(1_000_000).take(2).collect();
        assert_eq!(first, vec![(0, 1), (0, 2)]);
        assert_eq!(
            index_pairs(1_000_000, PairStrategy::NestedLoops).next(),
            Some((0, 1))
        );
    }

    #[test]
    fn test_nested_loop_pairs_fused() {
        let mut pairs = nested_loop_pairs(3);
        assert_eq!(pairs.by_ref().count(), 3);
        assert!(pairs.next().is_none());
        assert!(pairs.next().is_none());
    }

    #[test]
    fn test_headings() {
        assert_eq!(PairStrategy::NestedLoops.heading(), "nested for-loops: ");
        assert_eq!(PairStrategy::Lazy.heading(), "generator expression: ");
        assert_eq!(PairStrategy::Combinations.heading(), "itertools combinations");
        assert_eq!(PairStrategy::default(), PairStrategy::Combinations);
    }
}
