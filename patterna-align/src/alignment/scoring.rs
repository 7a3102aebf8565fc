//! Scoring schemes for pairwise token alignment

use crate::distance::types_compatible;
use patterna_core::Token;

/// Match score used by [`TypeMatchScoring`]
pub const MATCH_SCORE: i64 = 1;
pub const MISMATCH_SCORE: i64 = 0;
pub const GAP_SCORE: i64 = -1;

/// Scores used when gaps should cluster together
pub const GROUPED_MATCH_SCORE: i64 = 2;
pub const GROUPED_MISMATCH_SCORE: i64 = 0;
pub const GROUPED_GAP_SCORE: i64 = -3;

pub trait ScoringScheme: Send + Sync {
    /// Score of putting `a` and `b` in one column
    fn score(&self, a: &Token, b: &Token) -> i64;

    /// Score added for each token set against a gap
    fn gap(&self) -> i64;

    /// Boundary cell for index `i` of either side, `F[i,-1]` and `F[-1,i]`
    fn boundary(&self, i: usize) -> i64;
}

/// Match when the type tags are compatible
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeMatchScoring;

impl ScoringScheme for TypeMatchScoring {
    fn score(&self, a: &Token, b: &Token) -> i64 {
        if types_compatible(a.token_type, b.token_type, false) {
            MATCH_SCORE
        } else {
            MISMATCH_SCORE
        }
    }

    fn gap(&self) -> i64 {
        GAP_SCORE
    }

    fn boundary(&self, i: usize) -> i64 {
        -(i as i64)
    }
}

/// Heavier gap cost and a rewarding boundary, so leading gaps run together
#[derive(Debug, Clone, Copy, Default)]
pub struct GroupedGapScoring;

impl ScoringScheme for GroupedGapScoring {
    fn score(&self, a: &Token, b: &Token) -> i64 {
        if types_compatible(a.token_type, b.token_type, false) {
            GROUPED_MATCH_SCORE
        } else {
            GROUPED_MISMATCH_SCORE
        }
    }

    fn gap(&self) -> i64 {
        GROUPED_GAP_SCORE
    }

    fn boundary(&self, i: usize) -> i64 {
        2 * i as i64
    }
}
