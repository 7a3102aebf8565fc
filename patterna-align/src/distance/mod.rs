//! Dissimilarity measures between token sequences
//!
//! A [`Distance`] scores two rows by structure only: token text never
//! matters, type tags do. The same compatibility rule drives the aligners'
//! match scoring, see [`types_compatible`].

pub mod absolute;
pub mod matrix;
pub mod tree_edit;

pub use absolute::AbsoluteDistance;
pub use matrix::DistanceMatrix;
pub use tree_edit::TreeEditDistance;

use patterna_core::{PatternaError, PatternaResult, Sequence, TokenType};
use std::fmt;
use std::str::FromStr;

/// Symmetric, non-negative dissimilarity that is zero on identical input
pub trait Distance: Send + Sync {
    /// Registry key of this distance
    fn name(&self) -> &'static str;

    fn compute(&self, u: &Sequence, v: &Sequence) -> f64;
}

/// Whether two type tags count as the same shape.
///
/// Equal tags match, space and punctuation share one bucket, and unless
/// `strict` is set an `Alpha` or `Digit` matches a generalized `Alphanum`.
pub fn types_compatible(a: TokenType, b: TokenType, strict: bool) -> bool {
    if a == b || (a.is_punctuation_class() && b.is_punctuation_class()) {
        return true;
    }
    !strict
        && ((a.is_alpha_or_digit() && b == TokenType::Alphanum)
            || (b.is_alpha_or_digit() && a == TokenType::Alphanum))
}

/// Registered distance variants
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DistanceKind {
    TreeEdit,
    Absolute,
}

impl DistanceKind {
    pub fn key(&self) -> &'static str {
        match self {
            Self::TreeEdit => tree_edit::DISTANCE_TED,
            Self::Absolute => absolute::DISTANCE_ABSOLUTE,
        }
    }

    /// Build the distance. `strict` only affects the tree edit distance.
    pub fn create(&self, strict: bool) -> Box<dyn Distance> {
        match self {
            Self::TreeEdit => Box::new(TreeEditDistance::new(strict)),
            Self::Absolute => Box::new(AbsoluteDistance),
        }
    }
}

impl Default for DistanceKind {
    fn default() -> Self {
        Self::TreeEdit
    }
}

impl FromStr for DistanceKind {
    type Err = PatternaError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            tree_edit::DISTANCE_TED => Ok(Self::TreeEdit),
            absolute::DISTANCE_ABSOLUTE => Ok(Self::Absolute),
            _ => Err(PatternaError::configuration(format!("unknown distance: {}", s))),
        }
    }
}

impl fmt::Display for DistanceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Build a distance from its registry key
pub fn create_distance(key: &str, strict: bool) -> PatternaResult<Box<dyn Distance>> {
    Ok(key.parse::<DistanceKind>()?.create(strict))
}
