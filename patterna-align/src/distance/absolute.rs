//! Length difference between two rows
use super::Distance;
use patterna_core::Sequence;

pub const DISTANCE_ABSOLUTE: &str = "ABS";

#[derive(Debug, Clone, Copy, Default)]
pub struct AbsoluteDistance;

impl Distance for AbsoluteDistance {
    fn name(&self) -> &'static str {
        DISTANCE_ABSOLUTE
    }

    fn compute(&self, u: &Sequence, v: &Sequence) -> f64 {
        u.len().abs_diff(v.len()) as f64
    }
}
