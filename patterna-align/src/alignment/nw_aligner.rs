//! Needleman-Wunsch global alignment of two token sequences
use super::dp::{global_path, DpModel, Objective, Step};
use super::scoring::{GroupedGapScoring, ScoringScheme, TypeMatchScoring};
use super::types::Alignment;
use crate::distance::types_compatible;
use patterna_core::{PatternaError, PatternaResult, Sequence, Token};
use tracing::trace;

#[derive(Debug, Clone)]
pub struct PairwiseAlignment {
    pub score: i64,
    pub alignment: Alignment,
    /// Fraction of columns where neither side is a gap and the types agree
    pub identity: f64,
}

pub struct NeedlemanWunsch<S: ScoringScheme> {
    scoring: S,
}

struct PairModel<'a, S: ScoringScheme> {
    scoring: &'a S,
    x: &'a Sequence,
    y: &'a Sequence,
}

impl<S: ScoringScheme> DpModel for PairModel<'_, S> {
    fn origin(&self) -> i64 {
        0
    }

    fn row_boundary(&self, i: usize) -> i64 {
        self.scoring.boundary(i)
    }

    fn col_boundary(&self, j: usize) -> i64 {
        self.scoring.boundary(j)
    }

    fn diagonal(&self, i: usize, j: usize) -> i64 {
        self.scoring.score(&self.x[i], &self.y[j])
    }

    fn gap(&self) -> i64 {
        self.scoring.gap()
    }
}

impl<S: ScoringScheme> NeedlemanWunsch<S> {
    pub fn new(scoring: S) -> Self {
        Self { scoring }
    }

    /// `x` drives the table rows, `y` the columns
    pub fn align(&self, x: &Sequence, y: &Sequence) -> PairwiseAlignment {
        let model = PairModel {
            scoring: &self.scoring,
            x,
            y,
        };
        let path = global_path(&model, x.len(), y.len(), Objective::Maximize);

        let mut x_aligned = Vec::with_capacity(path.steps.len());
        let mut y_aligned = Vec::with_capacity(path.steps.len());
        let mut matches = 0usize;

        for step in &path.steps {
            match *step {
                Step::Both(i, j) => {
                    if types_compatible(x[i].token_type, y[j].token_type, false) {
                        matches += 1;
                    }
                    x_aligned.push(x[i].clone());
                    y_aligned.push(y[j].clone());
                }
                Step::RowOnly(i) => {
                    x_aligned.push(x[i].clone());
                    y_aligned.push(Token::gap(y.row_index()));
                }
                Step::ColOnly(j) => {
                    x_aligned.push(Token::gap(x.row_index()));
                    y_aligned.push(y[j].clone());
                }
            }
        }

        let width = path.steps.len();
        trace!(
            "Aligned rows {} and {}: width {}, score {}",
            x.row_index(),
            y.row_index(),
            width,
            path.score
        );

        PairwiseAlignment {
            score: path.score,
            alignment: Alignment::from_aligned(vec![
                Sequence::new(x.row_index(), x_aligned),
                Sequence::new(y.row_index(), y_aligned),
            ]),
            identity: matches as f64 / width.max(1) as f64,
        }
    }
}

/// Pairwise aligner choosing the scoring scheme from `keep_gaps_together`
#[derive(Debug, Clone, Copy, Default)]
pub struct PairwiseAligner {
    keep_gaps_together: bool,
}

impl PairwiseAligner {
    pub fn new(keep_gaps_together: bool) -> Self {
        Self { keep_gaps_together }
    }

    pub fn keeps_gaps_together(&self) -> bool {
        self.keep_gaps_together
    }

    /// Align exactly two rows
    pub fn align(&self, rows: &[Sequence]) -> PatternaResult<Alignment> {
        match rows {
            [x, y] => Ok(self.align_pair(x, y)),
            _ => Err(PatternaError::invalid_input(format!(
                "pairwise alignment needs exactly 2 sequences, got {}",
                rows.len()
            ))),
        }
    }

    pub fn align_pair(&self, x: &Sequence, y: &Sequence) -> Alignment {
        self.align_detailed(x, y).alignment
    }

    pub fn align_detailed(&self, x: &Sequence, y: &Sequence) -> PairwiseAlignment {
        if self.keep_gaps_together {
            NeedlemanWunsch::new(GroupedGapScoring).align(x, y)
        } else {
            NeedlemanWunsch::new(TypeMatchScoring).align(x, y)
        }
    }
}
