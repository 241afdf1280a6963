//! Command line arguments.

use std::path::PathBuf;

use clap::{Parser, ValueEnum};

use crate::analysis::PairStrategy;

#[derive(Parser, Debug)]
#[command(
    name = "geom-analysis",
    version,
    about = "Analyzes a user given xyz file and outputs the length of the bonds."
)]
pub struct Cli {
    #[arg(help = "The filepath for the xyz file to analyze.")]
    pub xyz_file: PathBuf,

    #[arg(
        long,
        value_enum,
        default_value_t = StrategyArg::Combinations,
        help = "How atom pairs are enumerated"
    )]
    pub strategy: StrategyArg,

    #[arg(long, help = "Key atoms by their label instead of file position")]
    pub by_symbol: bool,

    #[arg(long, help = "Exclusive lower bound of a bond length")]
    pub min_length: Option<f64>,

    #[arg(long, help = "Inclusive upper bound of a bond length")]
    pub max_length: Option<f64>,

    #[arg(long, help = "Decimal places in text output")]
    pub precision: Option<usize>,

    #[arg(long, help = "Directory holding memoized distance results")]
    pub cache_dir: Option<PathBuf>,

    #[arg(long, help = "Memoize in memory only")]
    pub no_cache: bool,

    #[arg(long, help = "Remove cached results before running")]
    pub clear_cache: bool,

    #[arg(long, help = "Output machine-readable JSON")]
    pub json: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, ValueEnum)]
pub enum StrategyArg {
    Nested,
    Lazy,
    Combinations,
    All,
}

impl StrategyArg {
    /// Enumeration passes to run, in order.
    pub fn strategies(self) -> Vec<PairStrategy> {
        match self {
            Self::Nested => vec![PairStrategy::NestedLoops],
            Self::Lazy => vec![PairStrategy::Lazy],
            Self::Combinations => vec![PairStrategy::Combinations],
            Self::All => PairStrategy::ALL.to_vec(),
        }
    }
}
