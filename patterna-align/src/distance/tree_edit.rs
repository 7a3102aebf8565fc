//! Type-mismatch distance between two rows, normalized by the longer row
use super::{types_compatible, Distance};
use patterna_core::Sequence;

pub const DISTANCE_TED: &str = "TED";

#[derive(Debug, Clone, Copy, Default)]
pub struct TreeEditDistance {
    strict: bool,
}

impl TreeEditDistance {
    pub fn new(strict: bool) -> Self {
        Self { strict }
    }

    pub fn strict() -> Self {
        Self::new(true)
    }

    pub fn is_strict(&self) -> bool {
        self.strict
    }

    /// Un-normalized edit count: positional mismatches plus the unmatched tail
    pub fn edits(&self, u: &Sequence, v: &Sequence) -> usize {
        let mismatches = u
            .iter()
            .zip(v.iter())
            .filter(|(a, b)| !types_compatible(a.token_type, b.token_type, self.strict))
            .count();

        mismatches + u.len().abs_diff(v.len())
    }
}

impl Distance for TreeEditDistance {
    fn name(&self) -> &'static str {
        DISTANCE_TED
    }

    fn compute(&self, u: &Sequence, v: &Sequence) -> f64 {
        let longest = u.len().max(v.len());
        if longest == 0 {
            return 0.0;
        }
        self.edits(u, v) as f64 / longest as f64
    }
}
