//! Coordinate math and the bond-length window.

use serde::{Deserialize, Serialize};

use crate::error::{AppError, AppResult};

/// Cartesian position of an atom.
pub type Point = [f64; 3];

/// Default exclusive lower bound of a bond, in the file's length unit.
pub const DEFAULT_MIN_BOND_LENGTH: f64 = 0.0;

/// Default inclusive upper bound of a bond.
pub const DEFAULT_MAX_BOND_LENGTH: f64 = 1.5;

/// Euclidean distance between two points.
#[must_use]
pub fn calculate_distance(a: &Point, b: &Point) -> f64 {
    a.iter()
        .zip(b.iter())
        .map(|(p, q)| (p - q).powi(2))
        .sum::<f64>()
        .sqrt()
}

/// Interval of distances that count as a bond: `minimum < d <= maximum`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BondRange {
    pub minimum: f64,
    pub maximum: f64,
}

impl BondRange {
    /// Creates a window, rejecting non-finite bounds and inverted ranges.
    pub fn new(minimum: f64, maximum: f64) -> AppResult<Self> {
        if !minimum.is_finite() || !maximum.is_finite() {
            return Err(AppError::InvalidArgument(format!(
                "bond length bounds must be finite (got {minimum}, {maximum})"
            )));
        }
        if minimum > maximum {
            return Err(AppError::InvalidArgument(format!(
                "minimum bond length {minimum} exceeds maximum {maximum}"
            )));
        }
        Ok(Self { minimum, maximum })
    }

    /// Whether `distance` falls inside the window.
    #[must_use]
    pub fn contains(&self, distance: f64) -> bool {
        self.minimum < distance && distance <= self.maximum
    }
}

impl Default for BondRange {
    fn default() -> Self {
        Self {
            minimum: DEFAULT_MIN_BOND_LENGTH,
            maximum: DEFAULT_MAX_BOND_LENGTH,
        }
    }
}

/// Decides whether two atoms `distance` apart are bonded.
#[must_use]
pub fn bond_check(distance: f64, range: &BondRange) -> bool {
    range.contains(distance)
}
