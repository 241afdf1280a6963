//! Bond length analysis for XYZ molecular geometries.
//!
//! Reads an XYZ file, measures every unordered atom pair and reports the
//! pairs whose distance falls within a bond window. Distance calls are
//! memoized in a persistent cache keyed by their arguments.

pub mod analysis;
pub mod cache;
pub mod cli;
pub mod commands;
pub mod config;
pub mod error;
pub mod geometry;
pub mod models;
pub mod output;
