//! Bond analysis module.

pub mod bonds;
pub mod pairs;

pub use bonds::{find_bonds, find_bonds_by_symbol, Analyzer, DISTANCE_FN_NAME, DISTANCE_FN_VERSION};
pub use pairs::{
    index_pairs, nested_loop_pairs, pair_count, IndexPairs, NestedLoopPairs, PairStrategy,
};
