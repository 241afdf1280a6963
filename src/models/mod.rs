//! Model module.
//!
//! Contains the molecule entities and the XYZ reader.

pub mod molecule;
pub mod xyz;

pub use molecule::*;
pub use xyz::{load_xyz, parse_xyz};
